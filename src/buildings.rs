//! Building extraction from manufacturer sections

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::docs::RawRecord;
use crate::error::SkipReason;
use crate::models::{Building, PowerProfile};
use crate::tables::{BUILDING_PREFIX, Tables, strip_id};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerShape {
    Constant,
    Variable,
}

fn megawatts(record: &RawRecord, field: &str) -> f64 {
    record
        .get(field)
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|mw| mw.is_finite())
        .unwrap_or(0.0)
}

pub fn extract_building(
    record: &RawRecord,
    shape: PowerShape,
    tables: &Tables,
) -> Result<Building, SkipReason> {
    let class_name = record.get("ClassName").ok_or(SkipReason::MissingClassName)?;
    let id = strip_id(class_name, BUILDING_PREFIX);
    let (input_slots, output_slots) = tables.slots(id);

    let power = match shape {
        PowerShape::Constant => PowerProfile::Constant {
            base_mw: megawatts(record, "mPowerConsumption"),
        },
        // The game's field name really is misspelled.
        PowerShape::Variable => PowerProfile::variable(
            megawatts(record, "mEstimatedMininumPowerConsumption"),
            megawatts(record, "mEstimatedMaximumPowerConsumption"),
        ),
    };

    Ok(Building {
        id: id.to_string(),
        name: record.get_or("mDisplayName", id).to_string(),
        power,
        input_slots,
        output_slots,
        // No field in the dump says otherwise for any manufacturer.
        can_overclock: true,
    })
}

/// Buildings from every manufacturer section in dump order, last record
/// winning on duplicate ids.
pub fn extract_buildings(
    sections: &[(PowerShape, &[RawRecord])],
    tables: &Tables,
) -> IndexMap<String, Building> {
    let mut buildings = IndexMap::new();

    for &(shape, records) in sections {
        for record in records {
            match extract_building(record, shape, tables) {
                Ok(building) => {
                    buildings.insert(building.id.clone(), building);
                }
                Err(reason) => debug!(?shape, %reason, "Skipping building"),
            }
        }
    }

    info!("Extracted {} buildings", buildings.len());
    buildings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[(&str, &str)]) -> RawRecord {
        fields.iter().copied().collect()
    }

    #[test]
    fn test_constant_power_building() {
        let tables = Tables::default();
        let building = extract_building(
            &record(&[
                ("ClassName", "Build_ManufacturerMk1_C"),
                ("mDisplayName", "Manufacturer"),
                ("mPowerConsumption", "55.000000"),
            ]),
            PowerShape::Constant,
            &tables,
        )
        .unwrap();

        assert_eq!(
            building,
            Building {
                id: "ManufacturerMk1".to_string(),
                name: "Manufacturer".to_string(),
                power: PowerProfile::Constant { base_mw: 55.0 },
                input_slots: 4,
                output_slots: 1,
                can_overclock: true,
            }
        );
    }

    #[test]
    fn test_variable_power_building() {
        let tables = Tables::default();
        let building = extract_building(
            &record(&[
                ("ClassName", "Build_HadronCollider_C"),
                ("mDisplayName", "Particle Accelerator"),
                ("mEstimatedMininumPowerConsumption", "100.000000"),
                ("mEstimatedMaximumPowerConsumption", "300.000000"),
            ]),
            PowerShape::Variable,
            &tables,
        )
        .unwrap();

        assert_eq!(
            building.power,
            PowerProfile::Variable {
                base_mw: 100.0,
                min_mw: 100.0,
                max_mw: 300.0,
                average_mw: 200.0,
            }
        );
        assert_eq!((building.input_slots, building.output_slots), (2, 1));
    }

    #[test]
    fn test_building_defaults() {
        let tables = Tables::default();
        let building = extract_building(
            &record(&[("ClassName", "Build_Mystery_C"), ("mPowerConsumption", "lots")]),
            PowerShape::Constant,
            &tables,
        )
        .unwrap();
        assert_eq!(building.name, "Mystery");
        assert_eq!(building.power, PowerProfile::Constant { base_mw: 0.0 });
        assert_eq!((building.input_slots, building.output_slots), (2, 1));

        let variable = extract_building(&record(&[("ClassName", "Build_Converter_C")]), PowerShape::Variable, &tables)
            .unwrap();
        assert_eq!(variable.power, PowerProfile::variable(0.0, 0.0));
        assert_eq!((variable.input_slots, variable.output_slots), (2, 2));
    }

    #[test]
    fn test_extract_buildings() {
        let tables = Tables::default();
        let constant = vec![
            record(&[("ClassName", "Build_SmelterMk1_C"), ("mPowerConsumption", "4")]),
            record(&[("mDisplayName", "No class")]),
        ];
        let variable = vec![record(&[("ClassName", "Build_QuantumEncoder_C")])];

        let sections = [
            (PowerShape::Constant, constant.as_slice()),
            (PowerShape::Variable, variable.as_slice()),
        ];
        let buildings = extract_buildings(&sections, &tables);
        assert_eq!(
            buildings.keys().collect::<Vec<_>>(),
            vec!["SmelterMk1", "QuantumEncoder"]
        );
        assert!(buildings["QuantumEncoder"].power.is_variable());
    }
}
