//! Data models for Satisfactory items, recipes and buildings

/// Physical form of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Form {
    Solid,
    Liquid,
    Gas,
}

impl Form {
    /// Liquids and gases are stored by the game in milli-units.
    pub fn is_fluid(self) -> bool {
        matches!(self, Form::Liquid | Form::Gas)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Form::Solid => "solid",
            Form::Liquid => "liquid",
            Form::Gas => "gas",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemCategory {
    Ore,
    Fluid,
    Ingot,
    Biomass,
    Component,
    Industrial,
    Communication,
    SpaceElevator,
    Nuclear,
    Quantum,
    Ficsit,
    Alien,
    Ammo,
    Fuel,
    Packaged,
}

impl ItemCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemCategory::Ore => "ore",
            ItemCategory::Fluid => "fluid",
            ItemCategory::Ingot => "ingot",
            ItemCategory::Biomass => "biomass",
            ItemCategory::Component => "component",
            ItemCategory::Industrial => "industrial",
            ItemCategory::Communication => "communication",
            ItemCategory::SpaceElevator => "space-elevator",
            ItemCategory::Nuclear => "nuclear",
            ItemCategory::Quantum => "quantum",
            ItemCategory::Ficsit => "ficsit",
            ItemCategory::Alien => "alien",
            ItemCategory::Ammo => "ammo",
            ItemCategory::Fuel => "fuel",
            ItemCategory::Packaged => "packaged",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub category: ItemCategory,
    pub form: Form,
    pub stack_size: u32,
    pub sink_points: u64,
    pub is_raw_resource: bool,
}

/// One entry of a recipe's input or output list, after unit conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientAmount {
    pub item_id: String,
    pub amount: f64,
    pub rate_per_minute: f64,
}

/// A recipe as produced by extraction, before alternates are linked to
/// their defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecipe {
    pub id: String,
    pub name: String,
    pub building_id: String,
    pub cycle_duration_s: f64,
    pub inputs: Vec<IngredientAmount>,
    /// Never empty; the extractor rejects recipes without products.
    pub outputs: Vec<IngredientAmount>,
    pub primary_output_id: String,
    pub is_alternate: bool,
}

impl RawRecipe {
    pub fn resolve(self, default_recipe_id: Option<String>) -> Recipe {
        Recipe {
            id: self.id,
            name: self.name,
            building_id: self.building_id,
            cycle_duration_s: self.cycle_duration_s,
            inputs: self.inputs,
            outputs: self.outputs,
            primary_output_id: self.primary_output_id,
            is_alternate: self.is_alternate,
            default_recipe_id,
        }
    }
}

/// A finalized recipe. `default_recipe_id` is only ever set on alternates.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub building_id: String,
    pub cycle_duration_s: f64,
    pub inputs: Vec<IngredientAmount>,
    pub outputs: Vec<IngredientAmount>,
    pub primary_output_id: String,
    pub is_alternate: bool,
    pub default_recipe_id: Option<String>,
}

impl Recipe {
    /// Every item id referenced as an input or output, in listing order.
    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.inputs
            .iter()
            .chain(&self.outputs)
            .map(|io| io.item_id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PowerProfile {
    Constant {
        base_mw: f64,
    },
    Variable {
        base_mw: f64,
        min_mw: f64,
        max_mw: f64,
        average_mw: f64,
    },
}

impl PowerProfile {
    /// Variable-power machines start at their minimum draw.
    pub fn variable(min_mw: f64, max_mw: f64) -> Self {
        PowerProfile::Variable {
            base_mw: min_mw,
            min_mw,
            max_mw,
            average_mw: ((min_mw + max_mw) / 2.0).round_ties_even(),
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, PowerProfile::Variable { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    pub id: String,
    pub name: String,
    pub power: PowerProfile,
    pub input_slots: u32,
    pub output_slots: u32,
    pub can_overclock: bool,
}
