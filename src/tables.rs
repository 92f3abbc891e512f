//! Static game knowledge used during extraction
//!
//! None of this is present in the Docs dump in a usable form. The tables are
//! plain data: extractors receive a `&Tables` and every lookup falls back to
//! a fixed default when the key is absent.

use crate::models::{Form, ItemCategory};

/// Class-name prefixes and the `_C` suffix stripped to obtain ids.
pub const ITEM_PREFIX: &str = "Desc_";
pub const RECIPE_PREFIX: &str = "Recipe_";
pub const BUILDING_PREFIX: &str = "Build_";
pub const CLASS_SUFFIX: &str = "_C";

pub const RESOURCE_DESCRIPTOR: &str = "FGResourceDescriptor";
pub const CONSTANT_POWER_MANUFACTURER: &str = "FGBuildableManufacturer";
pub const VARIABLE_POWER_MANUFACTURER: &str = "FGBuildableManufacturerVariablePower";
pub const RECIPE_MARKER: &str = "FGRecipe";
pub const CUSTOMIZATION_MARKER: &str = "Customization";

pub const DEFAULT_STACK_SIZE: u32 = 100;
pub const DEFAULT_SLOTS: (u32, u32) = (2, 1);

#[derive(Debug, Clone)]
pub struct Tables {
    pub item_descriptor_labels: &'static [&'static str],
    pub stack_sizes: &'static [(&'static str, u32)],
    pub forms: &'static [(&'static str, Form)],
    /// Producer class names a recipe may be assigned to, in emission order.
    pub machines: &'static [&'static str],
    /// Producer path fragments for hand-crafting, never a machine.
    pub manual_producers: &'static [&'static str],
    pub building_slots: &'static [(&'static str, (u32, u32))],
    pub seasonal_markers: &'static [&'static str],
    pub category_order: &'static [ItemCategory],
}

impl Default for Tables {
    fn default() -> Self {
        Tables {
            item_descriptor_labels: &[
                "FGItemDescriptor",
                "FGResourceDescriptor",
                "FGItemDescriptorBiomass",
                "FGItemDescriptorNuclearFuel",
                "FGPowerShardDescriptor",
                "FGConsumableDescriptor",
                "FGItemDescriptorPowerBoosterFuel",
                "FGAmmoTypeProjectile",
                "FGAmmoTypeSpreadshot",
                "FGAmmoTypeInstantHit",
                "FGEquipmentDescriptor",
            ],
            stack_sizes: &[
                ("SS_ONE", 1),
                ("SS_SMALL", 50),
                ("SS_MEDIUM", 100),
                ("SS_BIG", 200),
                ("SS_HUGE", 500),
                ("SS_FLUID", 0),
            ],
            forms: &[
                ("RF_SOLID", Form::Solid),
                ("RF_LIQUID", Form::Liquid),
                ("RF_GAS", Form::Gas),
                ("RF_HEAT", Form::Solid),
                ("RF_INVALID", Form::Solid),
            ],
            machines: &[
                "Build_SmelterMk1_C",
                "Build_FoundryMk1_C",
                "Build_ConstructorMk1_C",
                "Build_AssemblerMk1_C",
                "Build_ManufacturerMk1_C",
                "Build_OilRefinery_C",
                "Build_Packager_C",
                "Build_Blender_C",
                "Build_HadronCollider_C",
                "Build_QuantumEncoder_C",
                "Build_Converter_C",
            ],
            manual_producers: &["BuildGun", "WorkBench", "AutomatedWorkBench"],
            building_slots: &[
                ("SmelterMk1", (1, 1)),
                ("FoundryMk1", (2, 1)),
                ("ConstructorMk1", (1, 1)),
                ("AssemblerMk1", (2, 1)),
                ("ManufacturerMk1", (4, 1)),
                ("OilRefinery", (2, 2)),
                ("Packager", (2, 2)),
                ("Blender", (4, 2)),
                ("HadronCollider", (2, 1)),
                ("QuantumEncoder", (4, 2)),
                ("Converter", (2, 2)),
            ],
            seasonal_markers: &["Xmas", "Fireworks"],
            category_order: &[
                ItemCategory::Ore,
                ItemCategory::Fluid,
                ItemCategory::Ingot,
                ItemCategory::Biomass,
                ItemCategory::Component,
                ItemCategory::Industrial,
                ItemCategory::Communication,
                ItemCategory::SpaceElevator,
                ItemCategory::Nuclear,
                ItemCategory::Quantum,
                ItemCategory::Ficsit,
                ItemCategory::Alien,
                ItemCategory::Ammo,
                ItemCategory::Fuel,
                ItemCategory::Packaged,
            ],
        }
    }
}

impl Tables {
    pub fn is_item_descriptor(&self, label: &str) -> bool {
        self.item_descriptor_labels.contains(&label)
    }

    pub fn stack_size(&self, code: &str) -> u32 {
        lookup(self.stack_sizes, code).unwrap_or(DEFAULT_STACK_SIZE)
    }

    pub fn form(&self, code: &str) -> Form {
        lookup(self.forms, code).unwrap_or(Form::Solid)
    }

    pub fn is_machine(&self, class_name: &str) -> bool {
        self.machines.contains(&class_name)
    }

    pub fn slots(&self, building_id: &str) -> (u32, u32) {
        lookup(self.building_slots, building_id).unwrap_or(DEFAULT_SLOTS)
    }

    /// Building ids in emission order, derived from the machine list.
    pub fn building_order(&self) -> impl Iterator<Item = &'static str> {
        self.machines
            .iter()
            .map(|&class_name| strip_id(class_name, BUILDING_PREFIX))
    }
}

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Strip `prefix` and the `_C` class suffix from a class name, each only
/// when present.
pub fn strip_id<'a>(class_name: &'a str, prefix: &str) -> &'a str {
    let name = class_name.strip_prefix(prefix).unwrap_or(class_name);
    name.strip_suffix(CLASS_SUFFIX).unwrap_or(name)
}
