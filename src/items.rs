//! Item catalog extraction from item descriptor sections

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::classify::ItemSection;
use crate::docs::RawRecord;
use crate::error::SkipReason;
use crate::models::{Form, Item, ItemCategory};
use crate::tables::{ITEM_PREFIX, RESOURCE_DESCRIPTOR, Tables, strip_id};

/// How a category rule inspects the lower-cased item id.
#[derive(Debug, Clone, Copy)]
enum Matcher {
    Contains(&'static [&'static str]),
    StartsWith(&'static [&'static str]),
    FluidForm,
}

#[derive(Debug, Clone, Copy)]
struct CategoryRule {
    matcher: Matcher,
    category: ItemCategory,
}

const fn rule(matcher: Matcher, category: ItemCategory) -> CategoryRule {
    CategoryRule { matcher, category }
}

/// Evaluated top to bottom for plain item descriptors. First match wins.
const CATEGORY_RULES: &[CategoryRule] = &[
    rule(Matcher::Contains(&["ingot"]), ItemCategory::Ingot),
    rule(Matcher::StartsWith(&["spaceelevatorpart"]), ItemCategory::SpaceElevator),
    rule(Matcher::Contains(&["nuclear", "uranium", "plutonium"]), ItemCategory::Nuclear),
    rule(Matcher::Contains(&["ficsite", "ficsonium", "sam"]), ItemCategory::Ficsit),
    rule(
        Matcher::Contains(&[
            "darkmatter",
            "darkenergy",
            "timecr",
            "quantumosc",
            "singularity",
            "temporalproc",
            "quantumenergy",
        ]),
        ItemCategory::Quantum,
    ),
    rule(Matcher::Contains(&["alien"]), ItemCategory::Alien),
    rule(Matcher::StartsWith(&["packaged"]), ItemCategory::Packaged),
    rule(
        Matcher::StartsWith(&["cartridge", "nobelisk", "rebar", "spikedrebar"]),
        ItemCategory::Ammo,
    ),
    rule(Matcher::Contains(&["projectile"]), ItemCategory::Ammo),
    rule(Matcher::FluidForm, ItemCategory::Fluid),
    rule(
        Matcher::Contains(&[
            "modularframe",
            "motor",
            "computer",
            "circuitboard",
            "highspeedconnector",
            "electromagneticcontrolrod",
            "coolingdevice",
            "coolingsystem",
            "pressureconversioncube",
            "crystaloscillator",
            "supercomputer",
        ]),
        ItemCategory::Industrial,
    ),
    rule(Matcher::Contains(&["communicat", "radiocontrol"]), ItemCategory::Communication),
];

impl CategoryRule {
    fn matches(&self, lower_id: &str, form: Form) -> bool {
        match self.matcher {
            Matcher::Contains(words) => words.iter().any(|w| lower_id.contains(w)),
            Matcher::StartsWith(words) => words.iter().any(|w| lower_id.starts_with(w)),
            Matcher::FluidForm => form.is_fluid(),
        }
    }
}

/// Category for an item, from its section label first and its id second.
pub fn categorize(item_id: &str, label: &str, form: Form) -> ItemCategory {
    match label {
        RESOURCE_DESCRIPTOR if form.is_fluid() => return ItemCategory::Fluid,
        RESOURCE_DESCRIPTOR => return ItemCategory::Ore,
        "FGItemDescriptorBiomass" => return ItemCategory::Biomass,
        "FGItemDescriptorNuclearFuel" => return ItemCategory::Nuclear,
        "FGPowerShardDescriptor" | "FGItemDescriptorPowerBoosterFuel" => {
            return ItemCategory::Quantum;
        }
        "FGConsumableDescriptor" => return ItemCategory::Component,
        _ => {}
    }

    let lower_id = item_id.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|rule| rule.matches(&lower_id, form))
        .map_or(ItemCategory::Component, |rule| rule.category)
}

/// Build one item from a descriptor record.
pub fn extract_item(record: &RawRecord, label: &str, tables: &Tables) -> Result<Item, SkipReason> {
    let class_name = record.get("ClassName").ok_or(SkipReason::MissingClassName)?;
    let id = strip_id(class_name, ITEM_PREFIX);

    let form = tables.form(record.get_or("mForm", "RF_SOLID"));
    let stack_size = tables.stack_size(record.get_or("mStackSize", "SS_MEDIUM"));
    let sink_points = record
        .get("mResourceSinkPoints")
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .unwrap_or(0);

    Ok(Item {
        id: id.to_string(),
        name: record.get_or("mDisplayName", id).to_string(),
        category: categorize(id, label, form),
        form,
        stack_size,
        sink_points,
        is_raw_resource: label == RESOURCE_DESCRIPTOR,
    })
}

/// Every item descriptor in dump order. Later records with an id already
/// seen replace the earlier one in place.
pub fn extract_items(sections: &[ItemSection<'_>], tables: &Tables) -> IndexMap<String, Item> {
    let mut items = IndexMap::new();

    for section in sections {
        for record in section.records {
            match extract_item(record, section.label, tables) {
                Ok(item) => {
                    items.insert(item.id.clone(), item);
                }
                Err(reason) => debug!(label = section.label, %reason, "Skipping item descriptor"),
            }
        }
    }

    info!("Found {} total item descriptors", items.len());
    items
}
