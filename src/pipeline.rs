//! End-to-end extraction from parsed Docs sections to finished catalogs

use std::collections::BTreeSet;

use indexmap::IndexMap;
use tracing::info;

use crate::buildings;
use crate::classify;
use crate::docs::RawSection;
use crate::error::SkipCounts;
use crate::items;
use crate::models::{Building, Item, Recipe};
use crate::recipes;
use crate::resolve;
use crate::tables::Tables;

/// The three finished catalogs, keyed by id in first-seen dump order.
#[derive(Debug, Default)]
pub struct Catalog {
    pub items: IndexMap<String, Item>,
    pub recipes: IndexMap<String, Recipe>,
    pub buildings: IndexMap<String, Building>,
    /// Item ids used by recipes that have no descriptor.
    pub missing_items: BTreeSet<String>,
}

#[derive(Debug, Default)]
pub struct ExtractStats {
    pub sections: usize,
    pub discarded_sections: usize,
    pub item_descriptors: usize,
    pub items: usize,
    pub dropped_items: usize,
    pub missing_items: usize,
    pub recipe_records: usize,
    pub default_recipes: usize,
    pub alternate_recipes: usize,
    pub alternates_without_default: usize,
    pub skipped_recipes: SkipCounts,
    pub constant_power_buildings: usize,
    pub variable_power_buildings: usize,
}

impl std::fmt::Display for ExtractStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Items: {} kept of {} descriptors ({} unused, {} missing descriptors)",
            self.items, self.item_descriptors, self.dropped_items, self.missing_items
        )?;
        writeln!(
            f,
            "Recipes: {} default, {} alternate ({} without default) from {} records",
            self.default_recipes,
            self.alternate_recipes,
            self.alternates_without_default,
            self.recipe_records
        )?;
        writeln!(
            f,
            "Skipped recipes: {} ({} no machine, {} seasonal, {} no outputs, {} unnamed)",
            self.skipped_recipes.total(),
            self.skipped_recipes.no_producer,
            self.skipped_recipes.seasonal_event,
            self.skipped_recipes.no_outputs,
            self.skipped_recipes.missing_class_name
        )?;
        write!(
            f,
            "Buildings: {} constant power, {} variable power. Sections: {} read, {} ignored",
            self.constant_power_buildings,
            self.variable_power_buildings,
            self.sections,
            self.discarded_sections
        )
    }
}

/// Run every extraction stage over the dump.
pub fn extract(sections: &[RawSection], tables: &Tables) -> (Catalog, ExtractStats) {
    let mut stats = ExtractStats {
        sections: sections.len(),
        ..ExtractStats::default()
    };

    let routed = classify::route(sections, tables);
    stats.discarded_sections = routed.discarded;

    let all_items = items::extract_items(&routed.items, tables);
    stats.item_descriptors = all_items.len();

    let extraction = recipes::extract_recipes(routed.recipes, &all_items, tables);
    stats.recipe_records = routed.recipes.len();
    stats.skipped_recipes = extraction.skipped;

    let recipes = resolve::link_alternates(extraction.recipes);
    for recipe in recipes.values() {
        match (recipe.is_alternate, &recipe.default_recipe_id) {
            (false, _) => stats.default_recipes += 1,
            (true, Some(_)) => stats.alternate_recipes += 1,
            (true, None) => {
                stats.alternate_recipes += 1;
                stats.alternates_without_default += 1;
            }
        }
    }
    info!(
        "Extracted {} machine recipes ({} default, {} alternate)",
        recipes.len(),
        stats.default_recipes,
        stats.alternate_recipes
    );

    let filtered = resolve::filter_items(all_items, &recipes);
    stats.items = filtered.items.len();
    stats.dropped_items = filtered.dropped;
    stats.missing_items = filtered.missing.len();
    info!("Final item count: {}", stats.items);

    let buildings = buildings::extract_buildings(&routed.buildings, tables);
    for building in buildings.values() {
        if building.power.is_variable() {
            stats.variable_power_buildings += 1;
        } else {
            stats.constant_power_buildings += 1;
        }
    }

    let catalog = Catalog {
        items: filtered.items,
        recipes,
        buildings,
        missing_items: filtered.missing,
    };
    (catalog, stats)
}
