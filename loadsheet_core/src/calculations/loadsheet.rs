//! # Loadsheet Calculation
//!
//! Combines the basic weight, passenger/cargo/fuel indices and last-minute
//! changes into one [`LoadsheetResult`], then derives %MAC and takeoff trim.
//!
//! ## Pipeline
//!
//! 1. Per-zone, per-hold and fuel indices
//! 2. Passenger and cargo weights
//! 3. Forward (negative) and aft (positive) index groups
//! 4. ZFW = DOW + passengers + cargo; ZFI = DOI + all zone and hold indices
//! 5. Last-minute changes give final ZFW/ZFI
//! 6. TOW = final ZFW + fuel; TOI = final ZFI + fuel index
//! 7. Landing weight = TOW - trip fuel
//! 8. %MAC at zero fuel and takeoff
//! 9. Trim at (TOI, TOW)
//!
//! Any lookup failure aborts the calculation; there is no partial result.
//! Limit checks are separate, see [`crate::validation`].
//!
//! ## Example
//!
//! ```rust
//! use loadsheet_core::calculations::loadsheet::{calculate, LoadsheetInput};
//! use loadsheet_core::settings::CalcSettings;
//!
//! let input: LoadsheetInput = serde_json::from_str(r#"{
//!     "aircraft_id": "738-MS-16BC",
//!     "basic": { "dow": 41000.0, "doi": 40.0 },
//!     "passengers": { "OA": 10, "OB": 30, "OC": 30, "OD": 20 },
//!     "fuel": { "wing_tanks": 8000.0, "center_tank": 0.0 },
//!     "takeoff": { "flaps": "F5", "thrust": "24K" }
//! }"#).unwrap();
//!
//! let result = calculate(&input, &CalcSettings::default()).unwrap();
//! assert_eq!(result.weights.tow, 55_930.0);
//! assert_eq!(result.trim.final_trim(), Some(5.4));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::aircraft::{AirframeType, Hold, TakeoffConfig, Zone};
use crate::cg::index_to_mac_with_fallback;
use crate::errors::{CalcError, CalcResult};
use crate::lookup::{FuelIndexMethod, FuelIndexResult, HoldIndex, ZoneIndex};
use crate::reference::{self, ReferenceData};
use crate::settings::CalcSettings;
use crate::trim::TrimOutcome;
use crate::units::round_to;

// ============================================================================
// Input
// ============================================================================

/// Dry operating weight and index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasicWeights {
    /// Dry operating weight in kg
    pub dow: f64,
    /// Dry operating index
    pub doi: f64,
}

/// Fuel on board by tank group, kg
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FuelLoad {
    /// Main tanks 1 and 2 combined
    #[serde(default)]
    pub wing_tanks: f64,
    #[serde(default)]
    pub center_tank: f64,
}

impl FuelLoad {
    pub fn total(&self) -> f64 {
        self.wing_tanks + self.center_tank
    }
}

/// A late weight/index adjustment. Either sign is allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmcItem {
    /// What changed, e.g. "PAX" or "BAGGAGE"
    pub category: String,
    /// Where, e.g. "OB" or "HOLD3"
    pub location: String,
    /// Weight delta in kg
    pub weight: f64,
    /// Index delta
    pub index: f64,
}

/// Input for a loadsheet calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "aircraft_id": "738-MS-16BC",
///   "basic": { "dow": 41000.0, "doi": 40.0 },
///   "passengers": { "OA": 10, "OB": 30, "OC": 30, "OD": 20 },
///   "cargo": { "HOLD1": 0.0, "HOLD3": 450.0 },
///   "fuel": { "wing_tanks": 8000.0, "center_tank": 0.0 },
///   "takeoff": { "flaps": "F5", "thrust": "24K" },
///   "trip_fuel": 4200.0,
///   "lmc_items": [
///     { "category": "PAX", "location": "OD", "weight": 77.0, "index": 0.6 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadsheetInput {
    /// Catalog id of the aircraft variant
    pub aircraft_id: String,

    pub basic: BasicWeights,

    /// Passengers per zone; absent zones are empty
    #[serde(default)]
    pub passengers: BTreeMap<Zone, i32>,

    /// Cargo kg per hold; absent holds are empty
    #[serde(default)]
    pub cargo: BTreeMap<Hold, f64>,

    pub fuel: FuelLoad,

    pub takeoff: TakeoffConfig,

    /// Planned trip fuel in kg. When absent or zero a fraction of total fuel
    /// is assumed (see [`CalcSettings::trip_fuel_fraction`]).
    #[serde(default)]
    pub trip_fuel: Option<f64>,

    #[serde(default)]
    pub lmc_items: Vec<LmcItem>,
}

impl LoadsheetInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.basic.dow.is_finite() && self.basic.dow > 0.0) {
            return Err(CalcError::invalid_input(
                "basic.dow",
                self.basic.dow.to_string(),
                "Dry operating weight must be positive",
            ));
        }
        if !self.basic.doi.is_finite() {
            return Err(CalcError::invalid_input(
                "basic.doi",
                self.basic.doi.to_string(),
                "Dry operating index must be a number",
            ));
        }
        for (field, value) in [
            ("fuel.wing_tanks", self.fuel.wing_tanks),
            ("fuel.center_tank", self.fuel.center_tank),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(CalcError::invalid_input(field, value.to_string(), "Fuel cannot be negative"));
            }
        }
        if let Some(trip) = self.trip_fuel {
            if !(trip.is_finite() && trip >= 0.0) {
                return Err(CalcError::invalid_input("trip_fuel", trip.to_string(), "Trip fuel cannot be negative"));
            }
        }
        for (i, item) in self.lmc_items.iter().enumerate() {
            if !item.weight.is_finite() || !item.index.is_finite() {
                return Err(CalcError::invalid_input(
                    format!("lmc_items[{}]", i),
                    format!("{} kg / {}", item.weight, item.index),
                    "Weight and index deltas must be numbers",
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Result
// ============================================================================

/// Aircraft identification echoed on the loadsheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftSummary {
    pub id: String,
    pub display_name: String,
    pub airframe: AirframeType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerBreakdown {
    pub zones: BTreeMap<Zone, ZoneIndex>,
    pub total_pax: i32,
    pub total_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoBreakdown {
    pub holds: BTreeMap<Hold, HoldIndex>,
    pub total_weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelBreakdown {
    pub wing_tanks: f64,
    pub center_tank: f64,
    pub total: f64,
    #[serde(flatten)]
    pub index: FuelIndexResult,
}

/// Forward-biased contributions.
///
/// `total` only sums members that are actually negative, the way the paper
/// loadsheet lists them; a positive DOI shows here but adds nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NegativeIndices {
    pub doi: f64,
    pub hold1: f64,
    pub hold2: f64,
    pub zone_oa: f64,
    pub zone_ob: f64,
    pub total: f64,
}

/// Aft-biased contributions. `total` only sums members that are positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositiveIndices {
    pub hold3: f64,
    pub hold4: f64,
    pub zone_oc: f64,
    pub zone_od: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexSummary {
    pub doi: f64,
    pub negative: NegativeIndices,
    pub positive: PositiveIndices,
    pub all_pax_index: f64,
    pub all_cargo_index: f64,
    /// Zero fuel index before last-minute changes
    pub zfi: f64,
    pub final_zfi: f64,
    pub toi: f64,
}

/// Weights in kg
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightSummary {
    pub dow: f64,
    /// DOW + passengers + cargo, as totalled on the loadsheet
    pub subtotal: f64,
    pub zfw: f64,
    pub final_zfw: f64,
    pub tow: f64,
    pub trip_fuel: f64,
    /// True when trip fuel was assumed rather than supplied
    pub trip_fuel_estimated: bool,
    /// Whole kg
    pub landing_weight: f64,
}

/// CG positions in %MAC, 1 decimal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CgSummary {
    pub zfmac: f64,
    pub tomac: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmcSummary {
    pub items: Vec<LmcItem>,
    pub total_weight: f64,
    pub total_index: f64,
}

/// Complete loadsheet. Every printed figure can be read from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadsheetResult {
    pub aircraft: AircraftSummary,
    pub passengers: PassengerBreakdown,
    pub cargo: CargoBreakdown,
    pub fuel: FuelBreakdown,
    pub indices: IndexSummary,
    pub weights: WeightSummary,
    pub cg: CgSummary,
    pub trim: TrimOutcome,
    pub lmc: LmcSummary,
    pub takeoff_config: TakeoffConfig,
}

// ============================================================================
// Calculation
// ============================================================================

fn negative_part(value: f64) -> f64 {
    if value < 0.0 {
        value
    } else {
        0.0
    }
}

fn positive_part(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Run a loadsheet calculation against the built-in reference data.
pub fn calculate(input: &LoadsheetInput, settings: &CalcSettings) -> CalcResult<LoadsheetResult> {
    calculate_with(reference::builtin()?, input, settings)
}

/// Run a loadsheet calculation against `data`.
pub fn calculate_with(
    data: &ReferenceData,
    input: &LoadsheetInput,
    settings: &CalcSettings,
) -> CalcResult<LoadsheetResult> {
    input.validate()?;
    settings.validate()?;

    let aircraft = data.aircraft(&input.aircraft_id)?;
    debug!(aircraft = %aircraft.id, table_set = %aircraft.index_table_set, "starting loadsheet");

    // Indices
    let zones = data.all_passenger_indices(
        &input.passengers,
        &aircraft.index_table_set,
        settings.passenger_weights.adult,
    )?;
    let holds = data.all_cargo_indices(&input.cargo)?;
    let total_fuel = input.fuel.total();
    let fuel_index = data.total_fuel_index(total_fuel, input.fuel.wing_tanks, input.fuel.center_tank)?;

    // Weights
    let total_pax: i32 = zones.values().map(|z| z.pax).sum();
    let pax_weight: f64 = zones.values().map(|z| z.weight).sum();
    let cargo_weight: f64 = holds.values().map(|h| h.weight).sum();
    debug!(total_pax, pax_weight, cargo_weight, "payload");

    // Index groups
    let zone_index = |zone: Zone| zones.get(&zone).map_or(0.0, |z| f64::from(z.index));
    let hold_index = |hold: Hold| holds.get(&hold).map_or(0.0, |h| f64::from(h.index));

    let doi = input.basic.doi;
    let (hold1, hold2) = (hold_index(Hold::Hold1), hold_index(Hold::Hold2));
    let (zone_oa, zone_ob) = (zone_index(Zone::OA), zone_index(Zone::OB));
    let negative = NegativeIndices {
        doi,
        hold1,
        hold2,
        zone_oa,
        zone_ob,
        total: [doi, hold1, hold2, zone_oa, zone_ob].into_iter().map(negative_part).sum(),
    };

    let (hold3, hold4) = (hold_index(Hold::Hold3), hold_index(Hold::Hold4));
    let (zone_oc, zone_od) = (zone_index(Zone::OC), zone_index(Zone::OD));
    let positive = PositiveIndices {
        hold3,
        hold4,
        zone_oc,
        zone_od,
        total: [hold3, hold4, zone_oc, zone_od].into_iter().map(positive_part).sum(),
    };

    // Zero fuel
    let all_pax_index: f64 = Zone::ALL.into_iter().map(zone_index).sum();
    let all_cargo_index: f64 = Hold::ALL.into_iter().map(hold_index).sum();
    let subtotal = input.basic.dow + pax_weight + cargo_weight;
    let zfw = subtotal;
    let zfi = doi + all_pax_index + all_cargo_index;
    debug!(zfw, zfi, negative = negative.total, positive = positive.total, "zero fuel");

    // Last-minute changes
    let lmc_weight: f64 = input.lmc_items.iter().map(|i| i.weight).sum();
    let lmc_index: f64 = input.lmc_items.iter().map(|i| i.index).sum();
    let final_zfw = zfw + lmc_weight;
    let final_zfi = zfi + lmc_index;
    if !input.lmc_items.is_empty() {
        debug!(count = input.lmc_items.len(), lmc_weight, lmc_index, "last-minute changes applied");
    }

    // Takeoff and landing
    let tow = final_zfw + total_fuel;
    let toi = final_zfi + f64::from(fuel_index.index);
    let (trip_fuel, trip_fuel_estimated) = match input.trip_fuel {
        Some(trip) if trip > 0.0 => (trip, false),
        _ => {
            let trip = total_fuel * settings.trip_fuel_fraction;
            if total_fuel > 0.0 {
                warn!(
                    trip_fuel = trip,
                    fraction = settings.trip_fuel_fraction,
                    "no trip fuel supplied, landing weight uses estimate"
                );
            }
            (trip, true)
        }
    };
    for (field, value) in [("zfw", final_zfw), ("zfi", final_zfi), ("tow", tow), ("toi", toi)] {
        if !value.is_finite() {
            return Err(CalcError::invalid_input(field, value.to_string(), "Computed value is not finite"));
        }
    }
    let landing_weight = (tow - trip_fuel).round();
    debug!(tow, toi, fuel_method = %fuel_index.method, landing_weight, "takeoff");

    // CG and trim
    let zfmac = round_to(
        index_to_mac_with_fallback(final_zfi, Some(final_zfw), settings.mac_fallback_weight_kg),
        1,
    );
    let tomac = round_to(
        index_to_mac_with_fallback(toi, Some(tow), settings.mac_fallback_weight_kg),
        1,
    );
    let trim = data.trim_for(aircraft, toi, tow, input.takeoff)?;
    debug!(zfmac, tomac, trim = ?trim.final_trim(), "balance");

    Ok(LoadsheetResult {
        aircraft: AircraftSummary {
            id: aircraft.id.clone(),
            display_name: aircraft.display_name.clone(),
            airframe: aircraft.airframe,
        },
        passengers: PassengerBreakdown {
            zones,
            total_pax,
            total_weight: pax_weight,
        },
        cargo: CargoBreakdown {
            holds,
            total_weight: cargo_weight,
        },
        fuel: FuelBreakdown {
            wing_tanks: input.fuel.wing_tanks,
            center_tank: input.fuel.center_tank,
            total: total_fuel,
            index: fuel_index,
        },
        indices: IndexSummary {
            doi,
            negative,
            positive,
            all_pax_index,
            all_cargo_index,
            zfi,
            final_zfi,
            toi,
        },
        weights: WeightSummary {
            dow: input.basic.dow,
            subtotal,
            zfw,
            final_zfw,
            tow,
            trip_fuel,
            trip_fuel_estimated,
            landing_weight,
        },
        cg: CgSummary { zfmac, tomac },
        trim,
        lmc: LmcSummary {
            items: input.lmc_items.clone(),
            total_weight: lmc_weight,
            total_index: lmc_index,
        },
        takeoff_config: input.takeoff,
    })
}

impl LoadsheetResult {
    /// True when no fuel is on board
    pub fn is_zero_fuel(&self) -> bool {
        self.fuel.index.method == FuelIndexMethod::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::{Flaps, Thrust};

    fn scenario_input() -> LoadsheetInput {
        LoadsheetInput {
            aircraft_id: "738-MS-16BC".to_string(),
            basic: BasicWeights { dow: 41_000.0, doi: 40.0 },
            passengers: BTreeMap::from([(Zone::OA, 10), (Zone::OB, 30), (Zone::OC, 30), (Zone::OD, 20)]),
            cargo: BTreeMap::new(),
            fuel: FuelLoad { wing_tanks: 8_000.0, center_tank: 0.0 },
            takeoff: TakeoffConfig::new(Flaps::F5, Thrust::K24),
            trip_fuel: None,
            lmc_items: Vec::new(),
        }
    }

    fn run(input: &LoadsheetInput) -> LoadsheetResult {
        calculate(input, &CalcSettings::default()).unwrap()
    }

    #[test]
    fn test_scenario_passengers() {
        let result = run(&scenario_input());
        assert_eq!(result.passengers.total_pax, 90);
        assert_eq!(result.passengers.total_weight, 6_930.0);
        let indices: Vec<_> = result.passengers.zones.values().map(|z| z.index).collect();
        assert_eq!(indices, [-7, -10, 5, 12]);
    }

    #[test]
    fn test_scenario_weights_and_indices() {
        let result = run(&scenario_input());
        assert_eq!(result.weights.subtotal, 47_930.0);
        assert_eq!(result.weights.zfw, 47_930.0);
        assert_eq!(result.weights.final_zfw, 47_930.0);
        assert_eq!(result.weights.tow, 55_930.0);
        assert_eq!(result.weights.landing_weight, 51_130.0);
        assert!(result.weights.trip_fuel_estimated);

        assert_eq!(result.indices.zfi, 40.0);
        assert_eq!(result.indices.final_zfi, 40.0);
        assert_eq!(result.indices.toi, 48.0);
        assert_eq!(result.fuel.index.index, 8);
        assert_eq!(result.fuel.index.method, FuelIndexMethod::Total);
    }

    #[test]
    fn test_scenario_cg_and_trim() {
        let result = run(&scenario_input());
        assert_eq!(result.cg.zfmac, 17.2);
        assert_eq!(result.cg.tomac, 21.5);

        let setting = result.trim.setting().unwrap();
        assert_eq!(setting.base_trim, 5.1);
        assert_eq!(setting.correction, 0.3);
        assert_eq!(setting.final_trim, 5.4);
    }

    #[test]
    fn test_sign_groups_skip_mismatched_signs() {
        let result = run(&scenario_input());
        // DOI 40 is listed in the forward group but does not count there
        assert_eq!(result.indices.negative.doi, 40.0);
        assert_eq!(result.indices.negative.total, -17.0);
        assert_eq!(result.indices.positive.total, 17.0);
        assert_eq!(result.indices.all_pax_index, 0.0);
    }

    #[test]
    fn test_zero_payload_roundtrip() {
        let input = LoadsheetInput {
            passengers: BTreeMap::new(),
            fuel: FuelLoad::default(),
            ..scenario_input()
        };
        let result = run(&input);
        assert_eq!(result.weights.final_zfw, 41_000.0);
        assert_eq!(result.indices.final_zfi, 40.0);
        assert_eq!(result.weights.tow, 41_000.0);
        assert_eq!(result.weights.landing_weight, 41_000.0);
        assert!(result.is_zero_fuel());
    }

    #[test]
    fn test_supplied_trip_fuel_is_used() {
        let input = LoadsheetInput {
            trip_fuel: Some(4_200.0),
            ..scenario_input()
        };
        let result = run(&input);
        assert_eq!(result.weights.trip_fuel, 4_200.0);
        assert_eq!(result.weights.landing_weight, 51_730.0);
        assert!(!result.weights.trip_fuel_estimated);
    }

    #[test]
    fn test_zero_trip_fuel_falls_back_to_estimate() {
        let input = LoadsheetInput {
            trip_fuel: Some(0.0),
            ..scenario_input()
        };
        let result = run(&input);
        assert_eq!(result.weights.trip_fuel, 4_800.0);
        assert_eq!(result.weights.landing_weight, 51_130.0);
        assert!(result.weights.trip_fuel_estimated);
    }

    #[test]
    fn test_non_finite_settings_rejected_for_fmc_trim() {
        let mut settings = CalcSettings::default();
        settings.passenger_weights.adult = f64::NAN;
        let input = LoadsheetInput {
            aircraft_id: "73M8".to_string(),
            passengers: BTreeMap::from([(Zone::OB, 30)]),
            takeoff: TakeoffConfig::new(Flaps::F5, Thrust::NotApplicable),
            ..scenario_input()
        };
        let err = calculate(&input, &settings).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_lmc_applied() {
        let input = LoadsheetInput {
            lmc_items: vec![
                LmcItem { category: "BAG".into(), location: "HOLD3".into(), weight: 200.0, index: 1.5 },
                LmcItem { category: "PAX".into(), location: "OA".into(), weight: -50.0, index: -0.5 },
            ],
            ..scenario_input()
        };
        let result = run(&input);
        assert_eq!(result.lmc.total_weight, 150.0);
        assert_eq!(result.lmc.total_index, 1.0);
        assert_eq!(result.weights.zfw, 47_930.0);
        assert_eq!(result.weights.final_zfw, 48_080.0);
        assert_eq!(result.indices.final_zfi, 41.0);
        assert_eq!(result.indices.toi, 49.0);
        assert_eq!(result.weights.tow, 56_080.0);
    }

    #[test]
    fn test_cargo_and_split_fuel() {
        let input = LoadsheetInput {
            cargo: BTreeMap::from([(Hold::Hold1, 200.0), (Hold::Hold3, 500.0)]),
            fuel: FuelLoad { wing_tanks: 16_000.0, center_tank: 4_000.0 },
            ..scenario_input()
        };
        let result = run(&input);
        assert_eq!(result.cargo.total_weight, 700.0);
        assert_eq!(result.indices.all_cargo_index, 1.0);
        assert_eq!(result.indices.negative.hold1, -2.0);
        assert_eq!(result.indices.positive.hold3, 3.0);
        assert_eq!(result.fuel.index.method, FuelIndexMethod::Split);
        assert_eq!(result.fuel.index.index, -7);
        assert_eq!(result.indices.zfi, 41.0);
        assert_eq!(result.indices.toi, 34.0);
        assert_eq!(result.weights.tow, 68_630.0);
    }

    #[test]
    fn test_max8_trim_automatic() {
        let input = LoadsheetInput {
            aircraft_id: "73M8".to_string(),
            passengers: BTreeMap::from([(Zone::OB, 54)]),
            takeoff: TakeoffConfig::new(Flaps::F5, Thrust::NotApplicable),
            ..scenario_input()
        };
        let result = run(&input);
        assert!(!result.trim.is_calculated());
        assert_eq!(result.aircraft.airframe, AirframeType::B737Max8);
    }

    #[test]
    fn test_unknown_aircraft() {
        let input = LoadsheetInput {
            aircraft_id: "738-XX".to_string(),
            ..scenario_input()
        };
        let err = calculate(&input, &CalcSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_AIRCRAFT");
    }

    #[test]
    fn test_out_of_range_aborts() {
        let mut input = scenario_input();
        input.passengers.insert(Zone::OA, 17);
        let err = calculate(&input, &CalcSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
    }

    #[test]
    fn test_invalid_input() {
        let mut input = scenario_input();
        input.basic.dow = 0.0;
        assert_eq!(input.validate().unwrap_err().error_code(), "INVALID_INPUT");

        let mut input = scenario_input();
        input.fuel.center_tank = -1.0;
        let err = calculate(&input, &CalcSettings::default()).unwrap_err();
        assert!(err.to_string().contains("fuel.center_tank"));

        let mut input = scenario_input();
        input.trip_fuel = Some(-5.0);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_custom_passenger_weight() {
        let mut settings = CalcSettings::default();
        settings.passenger_weights.adult = 80.0;
        let result = calculate(&scenario_input(), &settings).unwrap();
        assert_eq!(result.passengers.total_weight, 7_200.0);
    }

    #[test]
    fn test_json_input_defaults() {
        let json = r#"{
            "aircraft_id": "738-MS-12BC",
            "basic": { "dow": 42000.0, "doi": 45.0 },
            "fuel": { "wing_tanks": 5000.0 },
            "takeoff": { "flaps": "F15", "thrust": "22K" }
        }"#;
        let input: LoadsheetInput = serde_json::from_str(json).unwrap();
        assert!(input.passengers.is_empty());
        assert_eq!(input.fuel.center_tank, 0.0);
        assert_eq!(input.trip_fuel, None);

        let result = run(&input);
        assert_eq!(result.fuel.index.index, 2);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"method\":\"total\""));
    }
}
