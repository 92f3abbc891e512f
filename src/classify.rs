//! Routing of Docs sections to the extractor that understands them

use tracing::{debug, warn};

use crate::buildings::PowerShape;
use crate::docs::{RawRecord, RawSection};
use crate::tables::{
    CONSTANT_POWER_MANUFACTURER, CUSTOMIZATION_MARKER, RECIPE_MARKER, Tables,
    VARIABLE_POWER_MANUFACTURER,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    ItemDescriptor,
    Recipes,
    ConstantPowerBuilding,
    VariablePowerBuilding,
}

/// Short class label of a section, e.g. `FGItemDescriptor` from
/// `/Script/CoreUObject.Class'/Script/FactoryGame.FGItemDescriptor'`.
pub fn native_class_label(native_class: &str) -> &str {
    let last = native_class.rsplit('.').next().unwrap_or(native_class);
    last.strip_suffix('\'').unwrap_or(last)
}

pub fn classify(label: &str, tables: &Tables) -> Option<SectionKind> {
    if tables.is_item_descriptor(label) {
        Some(SectionKind::ItemDescriptor)
    } else if label.contains(RECIPE_MARKER) && !label.contains(CUSTOMIZATION_MARKER) {
        Some(SectionKind::Recipes)
    } else if label == CONSTANT_POWER_MANUFACTURER {
        Some(SectionKind::ConstantPowerBuilding)
    } else if label == VARIABLE_POWER_MANUFACTURER {
        Some(SectionKind::VariablePowerBuilding)
    } else {
        None
    }
}

/// Item descriptor records along with the label of the section they came
/// from, which decides raw-resource status and part of the category.
#[derive(Debug, Clone, Copy)]
pub struct ItemSection<'a> {
    pub label: &'a str,
    pub records: &'a [RawRecord],
}

#[derive(Debug, Default)]
pub struct RoutedSections<'a> {
    pub items: Vec<ItemSection<'a>>,
    /// Records of the single authoritative recipe section, if any.
    pub recipes: &'a [RawRecord],
    pub buildings: Vec<(PowerShape, &'a [RawRecord])>,
    pub discarded: usize,
}

/// Sort every section into its extractor's bucket, keeping dump order.
pub fn route<'a>(sections: &'a [RawSection], tables: &Tables) -> RoutedSections<'a> {
    let mut routed = RoutedSections::default();
    let mut recipe_section_seen = false;

    for section in sections {
        let label = native_class_label(&section.native_class);
        let records = section.records.as_slice();

        match classify(label, tables) {
            Some(SectionKind::ItemDescriptor) => routed.items.push(ItemSection { label, records }),
            Some(SectionKind::Recipes) if !recipe_section_seen => {
                recipe_section_seen = true;
                routed.recipes = records;
            }
            Some(SectionKind::Recipes) => {
                warn!(label, records = records.len(), "Ignoring additional recipe section");
            }
            Some(SectionKind::ConstantPowerBuilding) => {
                routed.buildings.push((PowerShape::Constant, records));
            }
            Some(SectionKind::VariablePowerBuilding) => {
                routed.buildings.push((PowerShape::Variable, records));
            }
            None => {
                debug!(label, "Discarding section");
                routed.discarded += 1;
            }
        }
    }

    routed
}
