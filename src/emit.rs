//! TypeScript module generation for the consuming application
//!
//! Output is fully determined by the catalogs: groups follow the priority
//! lists in [`Tables`], entries inside a group are sorted by display name, and
//! sorting is stable so equal names keep catalog order.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use tracing::info;

use crate::models::{Building, IngredientAmount, Item, ItemCategory, PowerProfile, Recipe};
use crate::pipeline::Catalog;
use crate::tables::Tables;

/// Quoted, escaped string literal.
fn ts_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

/// Whole numbers print without a fractional part.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// At most four decimals, trailing zeros trimmed.
pub fn format_rate(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let fixed = format!("{:.4}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn ts_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Split `groups` into those named by `priority` (in that order) and the
/// rest in key order.
fn prioritize<K: Ord + Clone, V>(
    mut groups: BTreeMap<K, V>,
    priority: impl IntoIterator<Item = K>,
) -> (Vec<(K, V)>, Vec<(K, V)>) {
    let known = priority
        .into_iter()
        .filter_map(|key| groups.remove(&key).map(|group| (key, group)))
        .collect();
    (known, groups.into_iter().collect())
}

pub struct ItemGroup<'a> {
    pub category: ItemCategory,
    pub items: Vec<&'a Item>,
}

/// Items grouped by category in emission order.
pub fn item_groups<'a>(items: &'a IndexMap<String, Item>, tables: &Tables) -> Vec<ItemGroup<'a>> {
    let mut by_category: BTreeMap<ItemCategory, Vec<&Item>> = BTreeMap::new();
    for item in items.values() {
        by_category.entry(item.category).or_default().push(item);
    }

    let (known, mut rest) = prioritize(by_category, tables.category_order.iter().copied());
    rest.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));

    known
        .into_iter()
        .chain(rest)
        .map(|(category, mut items)| {
            items.sort_by(|a, b| a.name.cmp(&b.name));
            ItemGroup { category, items }
        })
        .collect()
}

pub struct RecipeGroup<'a> {
    pub banner: String,
    pub recipes: Vec<&'a Recipe>,
}

/// Recipes grouped by building in emission order. Known buildings get
/// separate default and alternate groups.
pub fn recipe_groups<'a>(recipes: &'a IndexMap<String, Recipe>, tables: &Tables) -> Vec<RecipeGroup<'a>> {
    let mut by_building: BTreeMap<&str, Vec<&Recipe>> = BTreeMap::new();
    for recipe in recipes.values() {
        by_building.entry(recipe.building_id.as_str()).or_default().push(recipe);
    }
    for group in by_building.values_mut() {
        group.sort_by(|a, b| (a.is_alternate, &a.name).cmp(&(b.is_alternate, &b.name)));
    }

    let order: Vec<&str> = tables.building_order().collect();
    let (known, rest) = prioritize(by_building, order);
    let mut groups = Vec::new();

    for (building_id, recipes) in known {
        let (alternates, defaults): (Vec<&Recipe>, Vec<&Recipe>) =
            recipes.into_iter().partition(|r| r.is_alternate);
        if !defaults.is_empty() {
            groups.push(RecipeGroup {
                banner: format!("{} (Default)", building_id),
                recipes: defaults,
            });
        }
        if !alternates.is_empty() {
            groups.push(RecipeGroup {
                banner: format!("{} (Alternate)", building_id),
                recipes: alternates,
            });
        }
    }

    for (building_id, recipes) in rest {
        groups.push(RecipeGroup {
            banner: building_id.to_string(),
            recipes,
        });
    }

    groups
}

/// Constant-power buildings first, then variable-power, each by name.
pub fn building_order(buildings: &IndexMap<String, Building>) -> Vec<&Building> {
    let mut ordered: Vec<&Building> = buildings.values().collect();
    ordered.sort_by(|a, b| (a.power.is_variable(), &a.name).cmp(&(b.power.is_variable(), &b.name)));
    ordered
}

pub struct ItemsModule<'a> {
    pub items: &'a IndexMap<String, Item>,
    pub tables: &'a Tables,
}

impl fmt::Display for ItemsModule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "import type {{ Item }} from \"../types\";")?;
        writeln!(f)?;
        writeln!(f, "export const ITEMS: Record<string, Item> = {{")?;

        for group in item_groups(self.items, self.tables) {
            writeln!(
                f,
                "  // === {} ===",
                group.category.as_str().to_uppercase().replace('-', " ")
            )?;
            for item in group.items {
                writeln!(f, "  {}: {{", ts_string(&item.id))?;
                writeln!(f, "    id: {},", ts_string(&item.id))?;
                writeln!(f, "    name: {},", ts_string(&item.name))?;
                writeln!(f, "    category: {},", ts_string(item.category.as_str()))?;
                writeln!(f, "    form: {},", ts_string(item.form.as_str()))?;
                writeln!(f, "    stackSize: {},", item.stack_size)?;
                writeln!(f, "    sinkPoints: {},", item.sink_points)?;
                writeln!(f, "    isRawResource: {},", ts_bool(item.is_raw_resource))?;
                writeln!(f, "  }},")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "}};")?;
        writeln!(f)?;
        writeln!(f, "export const ITEMS_LIST = Object.values(ITEMS);")?;
        writeln!(
            f,
            "export const PRODUCIBLE_ITEMS = ITEMS_LIST.filter((i) => !i.isRawResource);"
        )
    }
}

fn ingredient(io: &IngredientAmount) -> String {
    format!(
        "{{ itemId: {}, amount: {}, ratePerMinute: {} }}",
        ts_string(&io.item_id),
        format_number(io.amount),
        format_rate(io.rate_per_minute)
    )
}

fn write_ingredients(f: &mut impl fmt::Write, field: &str, list: &[IngredientAmount]) -> fmt::Result {
    if let [only] = list {
        return writeln!(f, "    {}: [{}],", field, ingredient(only));
    }
    writeln!(f, "    {}: [", field)?;
    for io in list {
        writeln!(f, "      {},", ingredient(io))?;
    }
    writeln!(f, "    ],")
}

fn write_recipe(f: &mut impl fmt::Write, recipe: &Recipe) -> fmt::Result {
    writeln!(f, "  {}: {{", ts_string(&recipe.id))?;
    writeln!(f, "    id: {},", ts_string(&recipe.id))?;
    writeln!(f, "    name: {},", ts_string(&recipe.name))?;
    writeln!(f, "    buildingId: {},", ts_string(&recipe.building_id))?;
    writeln!(f, "    cycleDuration: {},", format_number(recipe.cycle_duration_s))?;
    write_ingredients(f, "inputs", &recipe.inputs)?;
    write_ingredients(f, "outputs", &recipe.outputs)?;
    writeln!(f, "    primaryOutputId: {},", ts_string(&recipe.primary_output_id))?;
    writeln!(f, "    isAlternate: {},", ts_bool(recipe.is_alternate))?;
    match &recipe.default_recipe_id {
        Some(id) => writeln!(f, "    defaultRecipeId: {},", ts_string(id))?,
        None => writeln!(f, "    defaultRecipeId: null,")?,
    }
    writeln!(f, "  }},")
}

const RECIPE_LOOKUPS: &str = "\
// Derived lookups
export const RECIPES_LIST = Object.values(RECIPES);

export const RECIPES_BY_OUTPUT: Record<string, Recipe[]> = {};
for (const recipe of RECIPES_LIST) {
  for (const output of recipe.outputs) {
    if (!RECIPES_BY_OUTPUT[output.itemId]) {
      RECIPES_BY_OUTPUT[output.itemId] = [];
    }
    RECIPES_BY_OUTPUT[output.itemId].push(recipe);
  }
}

export const DEFAULT_RECIPE_FOR_ITEM: Record<string, Recipe> = {};
for (const recipe of RECIPES_LIST) {
  if (!recipe.isAlternate) {
    DEFAULT_RECIPE_FOR_ITEM[recipe.primaryOutputId] = recipe;
  }
}
";

pub struct RecipesModule<'a> {
    pub recipes: &'a IndexMap<String, Recipe>,
    pub tables: &'a Tables,
}

impl fmt::Display for RecipesModule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "import type {{ Recipe }} from \"../types\";")?;
        writeln!(f)?;
        writeln!(f, "export const RECIPES: Record<string, Recipe> = {{")?;

        for group in recipe_groups(self.recipes, self.tables) {
            writeln!(f, "  // === {} ===", group.banner)?;
            for recipe in group.recipes {
                write_recipe(f, recipe)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "}};")?;
        writeln!(f)?;
        f.write_str(RECIPE_LOOKUPS)
    }
}

pub struct BuildingsModule<'a> {
    pub buildings: &'a IndexMap<String, Building>,
}

impl fmt::Display for BuildingsModule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "import type {{ Building }} from \"../types\";")?;
        writeln!(f)?;
        writeln!(f, "export const BUILDINGS = {{")?;

        for building in building_order(self.buildings) {
            writeln!(f, "  {}: {{", ts_string(&building.id))?;
            writeln!(f, "    id: {},", ts_string(&building.id))?;
            writeln!(f, "    name: {},", ts_string(&building.name))?;
            match building.power {
                PowerProfile::Constant { base_mw } => writeln!(
                    f,
                    "    power: {{ mode: \"constant\", baseMW: {} }},",
                    format_number(base_mw)
                )?,
                PowerProfile::Variable {
                    base_mw,
                    min_mw,
                    max_mw,
                    average_mw,
                } => {
                    writeln!(f, "    power: {{")?;
                    writeln!(f, "      mode: \"variable\",")?;
                    writeln!(f, "      baseMW: {},", format_number(base_mw))?;
                    writeln!(f, "      minMW: {},", format_number(min_mw))?;
                    writeln!(f, "      maxMW: {},", format_number(max_mw))?;
                    writeln!(f, "      averageMW: {},", format_number(average_mw))?;
                    writeln!(f, "    }},")?;
                }
            }
            writeln!(f, "    inputSlots: {},", building.input_slots)?;
            writeln!(f, "    outputSlots: {},", building.output_slots)?;
            writeln!(f, "    canOverclock: {},", ts_bool(building.can_overclock))?;
            writeln!(f, "  }},")?;
        }

        writeln!(f, "}} as const satisfies Record<string, Building>;")
    }
}

fn write_module(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

/// Write `items.ts`, `recipes.ts` and `buildings.ts` into `output_dir`.
pub fn write_modules(output_dir: &Path, catalog: &Catalog, tables: &Tables) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let modules = [
        (
            "items.ts",
            ItemsModule { items: &catalog.items, tables }.to_string(),
            format!("{} items", catalog.items.len()),
        ),
        (
            "recipes.ts",
            RecipesModule { recipes: &catalog.recipes, tables }.to_string(),
            format!("{} recipes", catalog.recipes.len()),
        ),
        (
            "buildings.ts",
            BuildingsModule { buildings: &catalog.buildings }.to_string(),
            format!("{} buildings", catalog.buildings.len()),
        ),
    ];

    let mut written = Vec::with_capacity(modules.len());
    for (file_name, contents, summary) in modules {
        let path = output_dir.join(file_name);
        write_module(&path, &contents)?;
        info!("  Written: {} ({})", path.display(), summary);
        written.push(path);
    }

    Ok(written)
}
