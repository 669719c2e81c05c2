//! # Reference Data
//!
//! Every immutable table a calculation reads, bundled into one
//! [`ReferenceData`] value: the aircraft catalog, passenger table sets, and
//! the cargo, fuel, trim, trim-correction and CG-envelope tables.
//!
//! The built-in data is constructed once per process on first use and never
//! modified afterwards. Construction runs every table's own invariant checks
//! plus the cross-checks in [`ReferenceData::validate`]; a defect surfaces as
//! an `Err` from [`builtin`] rather than a panic.
//!
//! ## Example
//!
//! ```rust
//! use loadsheet_core::reference;
//!
//! let data = reference::builtin().unwrap();
//! let variant = data.aircraft("738-MS-16BC").unwrap();
//! assert_eq!(variant.weights.mtow, 77_000.0);
//! assert!(data.aircraft("747-400").is_err());
//! ```

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::aircraft::{self, AircraftVariant, Hold, Series};
use crate::errors::{CalcError, CalcResult};
use crate::tables::{
    cargo, fuel, passenger, trim, CargoIndexTable, CgEnvelopes, FuelIndexTable, PassengerTableSet,
    TrimCorrections, TrimTable,
};

/// All reference tables consumed by lookups, trim and validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub aircraft: Vec<AircraftVariant>,
    pub passenger_sets: BTreeMap<String, PassengerTableSet>,
    pub cargo: CargoIndexTable,
    pub fuel: FuelIndexTable,
    pub trim_table: TrimTable,
    pub trim_corrections: TrimCorrections,
    pub envelopes: CgEnvelopes,
}

impl ReferenceData {
    /// Build and cross-check the built-in 737 data.
    pub fn builtin_data() -> CalcResult<Self> {
        let passenger_sets = passenger::builtin_sets()?
            .into_iter()
            .map(|set| (set.id.clone(), set))
            .collect();

        let data = ReferenceData {
            aircraft: aircraft::builtin_variants(),
            passenger_sets,
            cargo: cargo::builtin_table()?,
            fuel: fuel::builtin_table()?,
            trim_table: trim::builtin_trim_table()?,
            trim_corrections: trim::builtin_trim_corrections(),
            envelopes: trim::builtin_envelopes()?,
        };
        data.validate()?;
        Ok(data)
    }

    /// Parse reference data from JSON and cross-check it.
    ///
    /// Individual tables validate themselves during deserialization.
    pub fn from_json_str(text: &str) -> CalcResult<Self> {
        let data: ReferenceData = serde_json::from_str(text)?;
        data.validate()?;
        Ok(data)
    }

    /// Consistency checks that span more than one table.
    pub fn validate(&self) -> CalcResult<()> {
        for (i, variant) in self.aircraft.iter().enumerate() {
            if self.aircraft[..i].iter().any(|v| v.id == variant.id) {
                return Err(CalcError::invalid_table(
                    "aircraft catalog",
                    format!("duplicate aircraft id {}", variant.id),
                ));
            }

            let set = self.passenger_set(&variant.index_table_set)?;
            for (zone, layout) in &variant.zones {
                let table = set.zone_table(*zone)?;
                if table.max_value() != layout.max_pax {
                    return Err(CalcError::invalid_table(
                        table.name(),
                        format!(
                            "covers 1-{} but {} seats {} in zone {}",
                            table.max_value(),
                            variant.id,
                            layout.max_pax,
                            zone
                        ),
                    ));
                }
            }

            let seats: u32 = variant.zones.values().map(|z| z.max_pax).sum();
            if seats != variant.total_seats {
                return Err(CalcError::invalid_table(
                    "aircraft catalog",
                    format!(
                        "{} zone capacities sum to {} but total seats is {}",
                        variant.id, seats, variant.total_seats
                    ),
                ));
            }
        }

        for hold in Hold::ALL {
            let table = self.cargo.hold_table(hold)?;
            if f64::from(table.max_value()) != hold.structural_limit_kg() {
                return Err(CalcError::invalid_table(
                    table.name(),
                    format!(
                        "covers 1-{} kg but the {} structural limit is {} kg",
                        table.max_value(),
                        hold,
                        hold.structural_limit_kg()
                    ),
                ));
            }
        }

        Ok(())
    }

    /// Aircraft variant by catalog id.
    pub fn aircraft(&self, id: &str) -> CalcResult<&AircraftVariant> {
        self.aircraft
            .iter()
            .find(|v| v.id == id)
            .ok_or_else(|| CalcError::unknown_aircraft(id))
    }

    /// Passenger table set by id.
    pub fn passenger_set(&self, id: &str) -> CalcResult<&PassengerTableSet> {
        self.passenger_sets
            .get(id)
            .ok_or_else(|| CalcError::unknown_table_set(id))
    }

    /// Catalog variants of one fleet series, in catalog order.
    pub fn variants_by_series(&self, series: Series) -> Vec<&AircraftVariant> {
        self.aircraft.iter().filter(|v| v.series == series).collect()
    }
}

static BUILTIN: Lazy<CalcResult<ReferenceData>> = Lazy::new(ReferenceData::builtin_data);

/// The process-wide built-in reference data.
pub fn builtin() -> CalcResult<&'static ReferenceData> {
    BUILTIN.as_ref().map_err(|err| err.clone())
}

/// Built-in aircraft variant by id.
pub fn get_aircraft_by_id(id: &str) -> CalcResult<&'static AircraftVariant> {
    builtin()?.aircraft(id)
}

/// Built-in variants of one fleet series.
pub fn variants_by_series(series: Series) -> CalcResult<Vec<&'static AircraftVariant>> {
    Ok(builtin()?.variants_by_series(series))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::Zone;
    use crate::tables::{RangeRow, RangeTable};

    #[test]
    fn test_builtin_constructs() {
        let data = builtin().unwrap();
        assert_eq!(data.aircraft.len(), 8);
        assert_eq!(data.passenger_sets.len(), 4);
    }

    #[test]
    fn test_lookup_by_id() {
        let variant = get_aircraft_by_id("738-FF").unwrap();
        assert_eq!(variant.index_table_set, passenger::SET_16BC_150EY);

        let err = get_aircraft_by_id("A320").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_AIRCRAFT");
        assert!(err.is_reference_error());
    }

    #[test]
    fn test_unknown_table_set() {
        let err = builtin().unwrap().passenger_set("738-20BC").unwrap_err();
        assert_eq!(err.to_string(), "Unknown index table set: 738-20BC");
    }

    #[test]
    fn test_variants_by_series() {
        let ml = variants_by_series(Series::ML).unwrap();
        let ids: Vec<_> = ml.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["738-ML-16BC", "738-ML-12BC"]);
        assert_eq!(variants_by_series(Series::Max8).unwrap().len(), 1);
    }

    #[test]
    fn test_validate_catches_missing_table_set() {
        let mut data = ReferenceData::builtin_data().unwrap();
        data.passenger_sets.remove(passenger::SET_MAX_8);
        assert_eq!(data.validate().unwrap_err().error_code(), "UNKNOWN_TABLE_SET");
    }

    #[test]
    fn test_validate_catches_capacity_mismatch() {
        let mut data = ReferenceData::builtin_data().unwrap();
        let set = data.passenger_sets.get_mut(passenger::SET_16BC_144EY).unwrap();
        let short = RangeTable::from_triples("short OD", &[(1, 40, 10)]).unwrap();
        set.zones.insert(Zone::OD, short);

        let err = data.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TABLE");
        assert!(err.to_string().contains("zone OD"));
    }

    #[test]
    fn test_validate_catches_cargo_limit_mismatch() {
        let mut data = ReferenceData::builtin_data().unwrap();
        let hold4 = data.cargo.hold_table(Hold::Hold4).unwrap();
        let wider = hold4.extended("wide HOLD4", &[RangeRow::new(475, 500, 6)]).unwrap();
        data.cargo.holds.insert(Hold::Hold4, wider);
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_validate_catches_seat_total_mismatch() {
        let mut data = ReferenceData::builtin_data().unwrap();
        data.aircraft[0].total_seats += 1;
        assert!(data.validate().unwrap_err().to_string().contains("total seats"));
    }

    #[test]
    fn test_json_roundtrip_revalidates() {
        let data = builtin().unwrap();
        let json = serde_json::to_string(data).unwrap();
        let parsed = ReferenceData::from_json_str(&json).unwrap();
        assert_eq!(parsed.aircraft, data.aircraft);
        assert_eq!(parsed.passenger_sets, data.passenger_sets);
        assert_eq!(parsed.cargo, data.cargo);

        let mut broken: serde_json::Value = serde_json::from_str(&json).unwrap();
        broken["aircraft"][0]["index_table_set"] = serde_json::Value::from("nope");
        assert!(ReferenceData::from_json_str(&broken.to_string()).is_err());
    }
}
