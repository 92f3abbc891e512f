//! End to end runs over a small UTF-16 Docs dump.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde_json::{Value, json};
use tempfile::TempDir;

use ficsit_extract::models::{Form, PowerProfile};
use ficsit_extract::{Catalog, Tables, docs, emit, extract};

const SCRIPT: &str = "/Script/CoreUObject.Class'/Script/FactoryGame.";

fn native_class(label: &str) -> String {
    format!("{SCRIPT}{label}'")
}

fn ingredient(id: &str, amount: u32) -> String {
    format!(
        "(ItemClass=\"/Script/Engine.BlueprintGeneratedClass'/Game/FactoryGame/Resource/Desc_{id}.Desc_{id}_C'\",Amount={amount})"
    )
}

fn ingredient_list(entries: &[(&str, u32)]) -> String {
    let inner: Vec<String> = entries.iter().map(|(id, n)| ingredient(id, *n)).collect();
    format!("({})", inner.join(","))
}

fn producer(machine: &str) -> String {
    format!("(\"/Game/FactoryGame/Buildable/Factory/{machine}/Build_{machine}.Build_{machine}_C\")")
}

fn recipe(
    class_name: &str,
    name: &str,
    machine: &str,
    duration: &str,
    inputs: &[(&str, u32)],
    outputs: &[(&str, u32)],
) -> Value {
    json!({
        "ClassName": class_name,
        "mDisplayName": name,
        "mIngredients": ingredient_list(inputs),
        "mProduct": ingredient_list(outputs),
        "mManufactoringDuration": duration,
        "mProducedIn": producer(machine),
        "mRelevantEvents": "",
    })
}

fn fixture() -> Value {
    json!([
        {
            "NativeClass": native_class("FGResourceDescriptor"),
            "Classes": [
                { "ClassName": "Desc_OreIron_C", "mDisplayName": "Iron Ore", "mForm": "RF_SOLID", "mStackSize": "SS_HUGE", "mResourceSinkPoints": "1" },
                { "ClassName": "Desc_Water_C", "mDisplayName": "Water", "mForm": "RF_LIQUID", "mStackSize": "SS_FLUID", "mResourceSinkPoints": "0" },
                { "ClassName": "Desc_LiquidOil_C", "mDisplayName": "Crude Oil", "mForm": "RF_LIQUID", "mStackSize": "SS_FLUID" },
            ],
        },
        {
            "NativeClass": native_class("FGItemDescriptor"),
            "Classes": [
                { "ClassName": "Desc_IronIngot_C", "mDisplayName": "Iron Ingot", "mStackSize": "SS_BIG", "mResourceSinkPoints": "2" },
                { "ClassName": "Desc_Plastic_C", "mDisplayName": "Plastic", "mResourceSinkPoints": "75" },
                { "ClassName": "Desc_IronPlate_C", "mDisplayName": "Iron Plate", "mResourceSinkPoints": "6" },
            ],
        },
        {
            "NativeClass": native_class("FGSchematic"),
            "Classes": [{ "ClassName": "Schematic_1-1_C" }],
        },
        {
            "NativeClass": native_class("FGRecipe"),
            "Classes": [
                recipe("Recipe_IngotIron_C", "Iron Ingot", "SmelterMk1", "2.000000", &[("OreIron", 1)], &[("IronIngot", 1)]),
                recipe(
                    "Recipe_Alternate_PureIronIngot_C",
                    "Alternate: Pure Iron Ingot",
                    "OilRefinery",
                    "12.000000",
                    &[("OreIron", 7), ("LiquidOil", 4000)],
                    &[("IronIngot", 13)],
                ),
                recipe("Recipe_Plastic_C", "Plastic", "OilRefinery", "2.000000", &[("LiquidOil", 120)], &[("Plastic", 2)]),
                recipe("Recipe_IronPlate_C", "Iron Plate", "ConstructorMk1", "6.000000", &[("IronIngot", 3)], &[("IronPlate", 2)]),
                recipe("Recipe_Mystery_C", "Mystery Part", "AssemblerMk1", "4.000000", &[("IronPlate", 2)], &[("Mystery", 1)]),
                recipe("Recipe_XmasBall_C", "Xmas Ball", "ConstructorMk1", "4.000000", &[("IronIngot", 1)], &[("XmasBall", 1)]),
                {
                    "ClassName": "Recipe_IronPlateHand_C",
                    "mDisplayName": "Iron Plate",
                    "mIngredients": ingredient_list(&[("IronIngot", 3)]),
                    "mProduct": ingredient_list(&[("IronPlate", 2)]),
                    "mManufactoringDuration": "6.000000",
                    "mProducedIn": "(\"/Game/FactoryGame/Buildable/-Shared/WorkBench/BP_WorkBenchComponent.BP_WorkBenchComponent_C\")",
                    "mRelevantEvents": "",
                },
            ],
        },
        {
            "NativeClass": native_class("FGBuildableManufacturer"),
            "Classes": [
                { "ClassName": "Build_SmelterMk1_C", "mDisplayName": "Smelter", "mPowerConsumption": "4.000000" },
                { "ClassName": "Build_OilRefinery_C", "mDisplayName": "Refinery", "mPowerConsumption": "30.000000" },
            ],
        },
        {
            "NativeClass": native_class("FGBuildableManufacturerVariablePower"),
            "Classes": [
                {
                    "ClassName": "Build_HadronCollider_C",
                    "mDisplayName": "Particle Accelerator",
                    "mEstimatedMininumPowerConsumption": "100.000000",
                    "mEstimatedMaximumPowerConsumption": "300.000000",
                },
            ],
        },
    ])
}

/// Write `value` the way the game ships it: UTF-16 LE with a byte-order mark.
fn write_utf16(path: &Path, value: &Value) {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in value.to_string().encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    fs::write(path, bytes).unwrap();
}

fn run_fixture(dir: &TempDir) -> Catalog {
    let input = dir.path().join("en-US.json");
    write_utf16(&input, &fixture());
    let sections = docs::load_sections(&input).unwrap();
    extract(&sections, &Tables::default()).0
}

#[test]
fn test_fluid_amounts_and_rates() {
    let dir = TempDir::new().unwrap();
    let catalog = run_fixture(&dir);

    let plastic = &catalog.recipes["Plastic"];
    assert_eq!(plastic.building_id, "OilRefinery");
    assert_eq!(plastic.cycle_duration_s, 2.0);
    assert_eq!(plastic.inputs[0].item_id, "LiquidOil");
    assert_eq!(plastic.inputs[0].amount, 0.12);
    assert_eq!(plastic.inputs[0].rate_per_minute, 3.6);
    assert_eq!(plastic.outputs[0].amount, 2.0);
    assert_eq!(plastic.outputs[0].rate_per_minute, 60.0);

    let ingot = &catalog.recipes["IngotIron"];
    assert_eq!(ingot.inputs[0].rate_per_minute, 30.0);
}

#[test]
fn test_alternate_links_to_default() {
    let dir = TempDir::new().unwrap();
    let catalog = run_fixture(&dir);

    let alternate = &catalog.recipes["Alternate_PureIronIngot"];
    assert!(alternate.is_alternate);
    assert_eq!(alternate.primary_output_id, "IronIngot");
    assert_eq!(alternate.default_recipe_id.as_deref(), Some("IngotIron"));
    assert_eq!(alternate.inputs[1].amount, 4.0);
    assert_eq!(alternate.outputs[0].rate_per_minute, 65.0);
}

#[test]
fn test_skipped_recipes() {
    let dir = TempDir::new().unwrap();
    let catalog = run_fixture(&dir);

    assert!(!catalog.recipes.contains_key("IronPlateHand"));
    assert!(!catalog.recipes.contains_key("XmasBall"));
    assert_eq!(catalog.recipes.len(), 5);
}

#[test]
fn test_unreferenced_and_missing_items() {
    let dir = TempDir::new().unwrap();
    let catalog = run_fixture(&dir);

    assert!(!catalog.items.contains_key("Water"));
    assert!(catalog.items.contains_key("LiquidOil"));
    assert_eq!(catalog.items["LiquidOil"].form, Form::Liquid);
    assert!(catalog.items["OreIron"].is_raw_resource);
    assert_eq!(catalog.items["OreIron"].stack_size, 500);

    assert!(catalog.recipes.contains_key("Mystery"));
    assert!(!catalog.items.contains_key("Mystery"));
    assert_eq!(catalog.missing_items.iter().collect::<Vec<_>>(), vec!["Mystery"]);
}

#[test]
fn test_buildings() {
    let dir = TempDir::new().unwrap();
    let catalog = run_fixture(&dir);

    assert_eq!(
        catalog.buildings["HadronCollider"].power,
        PowerProfile::Variable {
            base_mw: 100.0,
            min_mw: 100.0,
            max_mw: 300.0,
            average_mw: 200.0,
        }
    );
    assert_eq!(catalog.buildings["OilRefinery"].power, PowerProfile::Constant { base_mw: 30.0 });
    assert_eq!(catalog.buildings["OilRefinery"].input_slots, 2);
    assert_eq!(catalog.buildings["OilRefinery"].output_slots, 2);
}

#[test]
fn test_catalog_integrity() {
    let dir = TempDir::new().unwrap();
    let catalog = run_fixture(&dir);

    for (id, item) in &catalog.items {
        assert_eq!(id, &item.id);
    }

    let mut referenced = HashSet::new();
    for (id, recipe) in &catalog.recipes {
        assert_eq!(id, &recipe.id);
        assert!(!recipe.outputs.is_empty());
        assert_eq!(recipe.primary_output_id, recipe.outputs[0].item_id);
        assert!(recipe.cycle_duration_s > 0.0);
        assert!(Tables::default().building_order().any(|b| b == recipe.building_id));

        if let Some(default_id) = &recipe.default_recipe_id {
            let default = &catalog.recipes[default_id];
            assert!(!default.is_alternate);
            assert_eq!(default.primary_output_id, recipe.primary_output_id);
        }

        for io in recipe.inputs.iter().chain(&recipe.outputs) {
            referenced.insert(io.item_id.as_str());
            let expected = (io.amount * 60.0 / recipe.cycle_duration_s * 1e4).round_ties_even() / 1e4;
            assert_eq!(io.rate_per_minute, expected);
        }
    }

    for id in catalog.items.keys() {
        assert!(referenced.contains(id.as_str()), "{id} is not used by any recipe");
    }
    for id in &referenced {
        assert!(catalog.items.contains_key(*id) || catalog.missing_items.contains(*id));
    }
}

#[test]
fn test_modules_are_deterministic() {
    let dir = TempDir::new().unwrap();
    let tables = Tables::default();
    let first_out = dir.path().join("first");
    let second_out = dir.path().join("second");

    let catalog = run_fixture(&dir);
    let first = emit::write_modules(&first_out, &catalog, &tables).unwrap();
    let catalog = run_fixture(&dir);
    let second = emit::write_modules(&second_out, &catalog, &tables).unwrap();

    assert_eq!(first.len(), 3);
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.file_name(), b.file_name());
        assert_eq!(fs::read(a).unwrap(), fs::read(b).unwrap());
    }

    let recipes = fs::read_to_string(second_out.join("recipes.ts")).unwrap();
    assert!(recipes.contains("// === SmelterMk1 (Default) ==="));
    assert!(recipes.contains("// === OilRefinery (Alternate) ==="));
    assert!(recipes.contains(
        "inputs: [{ itemId: \"LiquidOil\", amount: 0.12, ratePerMinute: 3.6 }],"
    ));
    assert!(recipes.contains("defaultRecipeId: \"IngotIron\","));

    let items = fs::read_to_string(second_out.join("items.ts")).unwrap();
    assert!(items.contains("// === ORE ==="));
    assert!(!items.contains("\"Water\""));

    let buildings = fs::read_to_string(second_out.join("buildings.ts")).unwrap();
    assert!(buildings.contains("averageMW: 200,"));
    assert!(buildings.ends_with("} as const satisfies Record<string, Building>;\n"));
}

#[test]
fn test_load_rejects_utf8_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("en-US.json");
    fs::write(&input, b"[]\n").unwrap();
    // Three bytes cannot be UTF-16.
    assert!(docs::load_sections(&input).is_err());
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = docs::load_sections(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, docs::DocsError::Read { .. }));
}
