//! Recipe extraction from the FGRecipe section
//!
//! Only recipes made in one of the known machines survive. Fluid amounts are
//! converted from the game's milli-units before per-minute rates are derived.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::docs::RawRecord;
use crate::error::{SkipCounts, SkipReason};
use crate::models::{IngredientAmount, Item, RawRecipe};
use crate::parse::{self, ItemAmount};
use crate::tables::{BUILDING_PREFIX, RECIPE_PREFIX, Tables, strip_id};

const ALTERNATE_CLASS_PREFIX: &str = "Recipe_Alternate_";
const ALTERNATE_NAME_PREFIX: &str = "Alternate:";

/// Milli-units per whole unit for liquids and gases.
const FLUID_SCALE: f64 = 1000.0;

/// `value` rounded to `places` decimal places, ties to even.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round_ties_even() / scale
}

pub fn rate_per_minute(amount: f64, cycle_duration_s: f64) -> f64 {
    round_to(amount * 60.0 / cycle_duration_s, 4)
}

/// Cycle time in seconds. Missing, unparsable or non-positive values mean
/// one second.
fn cycle_duration(record: &RawRecord) -> f64 {
    record
        .get("mManufactoringDuration")
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs > 0.0)
        .unwrap_or(1.0)
}

fn is_seasonal(class_name: &str, display_name: Option<&str>, tables: &Tables) -> bool {
    tables.seasonal_markers.iter().any(|marker| {
        class_name.contains(marker) || display_name.is_some_and(|name| name.contains(marker))
    })
}

fn convert(entry: ItemAmount<'_>, cycle_duration_s: f64, items: &IndexMap<String, Item>) -> IngredientAmount {
    let amount = match items.get(entry.item_id) {
        Some(item) if item.form.is_fluid() => entry.amount / FLUID_SCALE,
        _ => entry.amount,
    };

    IngredientAmount {
        item_id: entry.item_id.to_string(),
        amount,
        rate_per_minute: rate_per_minute(amount, cycle_duration_s),
    }
}

/// Build one recipe. `items` is the full descriptor catalog, consulted only
/// for ingredient forms.
pub fn extract_recipe(
    record: &RawRecord,
    items: &IndexMap<String, Item>,
    tables: &Tables,
) -> Result<RawRecipe, SkipReason> {
    let class_name = record.get("ClassName").ok_or(SkipReason::MissingClassName)?;

    let machine = parse::producer_machine(record.get_or("mProducedIn", ""), tables)
        .ok_or(SkipReason::NoProducer)?;

    let display_name = record.get("mDisplayName");
    if !record.get_or("mRelevantEvents", "").trim().is_empty()
        || is_seasonal(class_name, display_name, tables)
    {
        return Err(SkipReason::SeasonalEvent);
    }

    let id = strip_id(class_name, RECIPE_PREFIX);
    let cycle_duration_s = cycle_duration(record);

    let outputs: Vec<_> = parse::ingredients(record.get_or("mProduct", ""))
        .map(|entry| convert(entry, cycle_duration_s, items))
        .collect();
    let Some(primary) = outputs.first() else {
        return Err(SkipReason::NoOutputs);
    };
    let primary_output_id = primary.item_id.clone();

    let inputs = parse::ingredients(record.get_or("mIngredients", ""))
        .map(|entry| convert(entry, cycle_duration_s, items))
        .collect();

    let is_alternate = class_name.starts_with(ALTERNATE_CLASS_PREFIX)
        || display_name.is_some_and(|name| name.starts_with(ALTERNATE_NAME_PREFIX));

    Ok(RawRecipe {
        id: id.to_string(),
        name: display_name.unwrap_or(id).to_string(),
        building_id: strip_id(machine, BUILDING_PREFIX).to_string(),
        cycle_duration_s,
        inputs,
        outputs,
        primary_output_id,
        is_alternate,
    })
}

#[derive(Debug, Default)]
pub struct RecipeExtraction {
    pub recipes: IndexMap<String, RawRecipe>,
    pub skipped: SkipCounts,
}

/// All machine recipes in dump order, last record winning on duplicate ids.
pub fn extract_recipes(
    records: &[RawRecord],
    items: &IndexMap<String, Item>,
    tables: &Tables,
) -> RecipeExtraction {
    info!("Found {} total FGRecipe entries", records.len());
    let mut extraction = RecipeExtraction::default();

    for record in records {
        match extract_recipe(record, items, tables) {
            Ok(recipe) => {
                extraction.recipes.insert(recipe.id.clone(), recipe);
            }
            Err(reason) => {
                debug!(class_name = record.get("ClassName"), %reason, "Skipping recipe");
                extraction.skipped.record(reason);
            }
        }
    }

    extraction
}
