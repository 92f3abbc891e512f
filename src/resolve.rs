//! Cross-references between the recipe and item catalogs
//!
//! Alternates get linked to the first default recipe sharing their primary
//! output, and the item catalog is cut down to what recipes actually use.

use std::collections::{BTreeSet, HashMap, HashSet};

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::models::{Item, RawRecipe, Recipe};

/// Map each primary output to the first non-alternate recipe producing it.
pub fn default_recipes(recipes: &IndexMap<String, RawRecipe>) -> HashMap<&str, &str> {
    let mut defaults = HashMap::new();
    for recipe in recipes.values().filter(|r| !r.is_alternate) {
        defaults
            .entry(recipe.primary_output_id.as_str())
            .or_insert(recipe.id.as_str());
    }
    defaults
}

/// Finalize every recipe, filling `default_recipe_id` on alternates.
pub fn link_alternates(recipes: IndexMap<String, RawRecipe>) -> IndexMap<String, Recipe> {
    let defaults: HashMap<String, String> = default_recipes(&recipes)
        .into_iter()
        .map(|(output, id)| (output.to_string(), id.to_string()))
        .collect();

    recipes
        .into_iter()
        .map(|(id, recipe)| {
            let default_recipe_id = if recipe.is_alternate {
                let found = defaults.get(&recipe.primary_output_id).cloned();
                if found.is_none() {
                    debug!(recipe = %id, output = %recipe.primary_output_id, "Alternate recipe has no default");
                }
                found
            } else {
                None
            };
            (id, recipe.resolve(default_recipe_id))
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct ItemFilter {
    pub items: IndexMap<String, Item>,
    /// Unreferenced descriptors that were removed.
    pub dropped: usize,
    /// Referenced ids with no descriptor, sorted.
    pub missing: BTreeSet<String>,
}

/// Keep only items some recipe consumes or produces.
pub fn filter_items(items: IndexMap<String, Item>, recipes: &IndexMap<String, Recipe>) -> ItemFilter {
    let referenced: HashSet<&str> = recipes.values().flat_map(|r| r.item_ids()).collect();
    info!("Items referenced in recipes: {}", referenced.len());

    let missing: BTreeSet<String> = referenced
        .iter()
        .filter(|id| !items.contains_key(**id))
        .map(|id| id.to_string())
        .collect();
    if !missing.is_empty() {
        warn!(
            "{} items referenced in recipes but missing descriptors: {:?}",
            missing.len(),
            missing
        );
    }

    let total = items.len();
    let items: IndexMap<String, Item> = items
        .into_iter()
        .filter(|(id, _)| {
            let keep = referenced.contains(id.as_str());
            if !keep {
                debug!(item = %id, "Dropping item not used by any recipe");
            }
            keep
        })
        .collect();

    ItemFilter {
        dropped: total - items.len(),
        items,
        missing,
    }
}
