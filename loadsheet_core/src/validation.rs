//! # Limit Validation
//!
//! Checks a [`LoadsheetResult`] against the aircraft's certified limits and
//! CG envelopes. A violated limit is a verdict, not an error: every check
//! returns `pass` plus human-readable messages, and [`validate_all`] collects
//! every violation at once. Weight checks fail on a non-finite weight; the
//! CG checks cannot interpolate one and return an error instead.
//!
//! ## Example
//!
//! ```rust
//! use loadsheet_core::reference::get_aircraft_by_id;
//! use loadsheet_core::validation::validate_tow;
//!
//! let aircraft = get_aircraft_by_id("738-MS-16BC").unwrap();
//! let check = validate_tow(78_000.0, aircraft);
//! assert!(!check.pass);
//! assert_eq!(check.errors[0], "TOW 78000 kg exceeds MTOW 77000 kg (over by 1000 kg)");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aircraft::{AircraftVariant, Hold, Zone};
use crate::calculations::loadsheet::LoadsheetResult;
use crate::errors::{CalcError, CalcResult};
use crate::reference::{self, ReferenceData};
use crate::settings::CalcSettings;
use crate::tables::{CgEnvelope, LoadPhase};
use crate::units::round_to;

/// Verdict of one check
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationCheck {
    pub pass: bool,
    pub errors: Vec<String>,
}

impl ValidationCheck {
    fn from_errors(errors: Vec<String>) -> Self {
        ValidationCheck {
            pass: errors.is_empty(),
            errors,
        }
    }
}

/// CG verdict with the envelope limits it was judged against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CgCheck {
    pub pass: bool,
    pub errors: Vec<String>,
    pub phase: LoadPhase,
    pub mac: f64,
    /// 1 decimal
    pub forward_limit: f64,
    /// 1 decimal
    pub aft_limit: f64,
}

/// Every verdict for one loadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub all_pass: bool,
    /// All messages from every check, in check order
    pub errors: Vec<String>,
    pub tow: ValidationCheck,
    pub zfw: ValidationCheck,
    pub landing_weight: ValidationCheck,
    pub lmc: ValidationCheck,
    pub cg_zfw: CgCheck,
    pub cg_tow: CgCheck,
    pub passengers: BTreeMap<Zone, ValidationCheck>,
    pub cargo: BTreeMap<Hold, ValidationCheck>,
}

/// TOW against MTOW and, when certified, MTXW.
pub fn validate_tow(tow: f64, aircraft: &AircraftVariant) -> ValidationCheck {
    let limits = &aircraft.weights;
    let mut errors = Vec::new();
    if !tow.is_finite() {
        errors.push(format!("TOW {} kg is not a valid weight", tow));
    } else if tow > limits.mtow {
        errors.push(format!(
            "TOW {} kg exceeds MTOW {} kg (over by {} kg)",
            tow,
            limits.mtow,
            tow - limits.mtow
        ));
    }
    if let Some(mtxw) = limits.mtxw {
        if tow > mtxw {
            errors.push(format!("TOW {} kg exceeds MTXW {} kg", tow, mtxw));
        }
    }
    ValidationCheck::from_errors(errors)
}

/// Final ZFW against MZFW.
pub fn validate_zfw(zfw: f64, aircraft: &AircraftVariant) -> ValidationCheck {
    let mzfw = aircraft.weights.mzfw;
    let mut errors = Vec::new();
    if !zfw.is_finite() {
        errors.push(format!("ZFW {} kg is not a valid weight", zfw));
    } else if zfw > mzfw {
        errors.push(format!("ZFW {} kg exceeds MZFW {} kg (over by {} kg)", zfw, mzfw, zfw - mzfw));
    }
    ValidationCheck::from_errors(errors)
}

/// Landing weight against MLW.
pub fn validate_landing_weight(landing_weight: f64, aircraft: &AircraftVariant) -> ValidationCheck {
    let mlw = aircraft.weights.mlw;
    let mut errors = Vec::new();
    if !landing_weight.is_finite() {
        errors.push(format!("Landing weight {} kg is not a valid weight", landing_weight));
    } else if landing_weight > mlw {
        errors.push(format!(
            "Landing weight {} kg exceeds MLW {} kg (over by {} kg)",
            landing_weight,
            mlw,
            landing_weight - mlw
        ));
    }
    ValidationCheck::from_errors(errors)
}

/// Absolute LMC weight total against `tolerance_kg`.
///
/// Fails when either value is NaN.
pub fn validate_lmc(total_weight: f64, tolerance_kg: f64) -> ValidationCheck {
    let mut errors = Vec::new();
    if !(total_weight.abs() <= tolerance_kg) {
        errors.push(format!("LMC total {} kg exceeds ±{} kg limit", total_weight, tolerance_kg));
    }
    ValidationCheck::from_errors(errors)
}

/// `mac` at `weight` against the `phase` envelope.
///
/// A non-finite `mac` or `weight` cannot be judged and is an
/// [`CalcError::InvalidInput`].
pub fn validate_cg_envelope(
    mac: f64,
    weight: f64,
    phase: LoadPhase,
    envelope: &CgEnvelope,
) -> CalcResult<CgCheck> {
    if !mac.is_finite() {
        return Err(CalcError::invalid_input(
            format!("{} CG", phase),
            mac.to_string(),
            "%MAC must be finite",
        ));
    }
    let (forward, aft) = envelope.limits_at(weight)?;
    let forward_limit = round_to(forward, 1);
    let aft_limit = round_to(aft, 1);

    let mut errors = Vec::new();
    if mac < forward {
        errors.push(format!("{} CG {}% MAC is forward of limit {}% MAC", phase, mac, forward_limit));
    }
    if mac > aft {
        errors.push(format!("{} CG {}% MAC is aft of limit {}% MAC", phase, mac, aft_limit));
    }
    Ok(CgCheck {
        pass: errors.is_empty(),
        errors,
        phase,
        mac,
        forward_limit,
        aft_limit,
    })
}

/// Passenger count of one zone against its seating capacity.
pub fn validate_passenger_zone(zone: Zone, pax: i32, aircraft: &AircraftVariant) -> ValidationCheck {
    let mut errors = Vec::new();
    if pax < 0 {
        errors.push(format!("Zone {}: passenger count cannot be negative", zone));
    } else {
        match aircraft.zones.get(&zone) {
            Some(layout) if i64::from(pax) > i64::from(layout.max_pax) => {
                errors.push(format!("Zone {}: {} pax exceeds capacity of {}", zone, pax, layout.max_pax));
            }
            Some(_) => {}
            None if pax > 0 => {
                errors.push(format!("Zone {}: not configured on {}", zone, aircraft.id));
            }
            None => {}
        }
    }
    ValidationCheck::from_errors(errors)
}

/// Cargo weight of one hold against its structural limit.
pub fn validate_cargo_weight(hold: Hold, weight: f64) -> ValidationCheck {
    let max = hold.structural_limit_kg();
    let mut errors = Vec::new();
    if weight < 0.0 {
        errors.push(format!("{}: cargo weight cannot be negative", hold));
    } else if weight > max {
        errors.push(format!("{}: {} kg exceeds max {} kg", hold, weight, max));
    }
    ValidationCheck::from_errors(errors)
}

/// Run every check on `result` using the built-in envelopes.
pub fn validate_all(
    result: &LoadsheetResult,
    aircraft: &AircraftVariant,
    settings: &CalcSettings,
) -> CalcResult<ValidationReport> {
    validate_all_with(reference::builtin()?, result, aircraft, settings)
}

/// Run every check on `result` using the envelopes in `data`.
pub fn validate_all_with(
    data: &ReferenceData,
    result: &LoadsheetResult,
    aircraft: &AircraftVariant,
    settings: &CalcSettings,
) -> CalcResult<ValidationReport> {
    let weights = &result.weights;

    let tow = validate_tow(weights.tow, aircraft);
    let zfw = validate_zfw(weights.final_zfw, aircraft);
    let landing_weight = validate_landing_weight(weights.landing_weight, aircraft);
    let lmc = validate_lmc(result.lmc.total_weight, settings.lmc_tolerance_kg);
    let cg_zfw = validate_cg_envelope(
        result.cg.zfmac,
        weights.final_zfw,
        LoadPhase::ZeroFuel,
        data.envelopes.for_phase(LoadPhase::ZeroFuel),
    )?;
    let cg_tow = validate_cg_envelope(
        result.cg.tomac,
        weights.tow,
        LoadPhase::Takeoff,
        data.envelopes.for_phase(LoadPhase::Takeoff),
    )?;
    let passengers: BTreeMap<Zone, ValidationCheck> = result
        .passengers
        .zones
        .iter()
        .map(|(&zone, z)| (zone, validate_passenger_zone(zone, z.pax, aircraft)))
        .collect();
    let cargo: BTreeMap<Hold, ValidationCheck> = result
        .cargo
        .holds
        .iter()
        .map(|(&hold, h)| (hold, validate_cargo_weight(hold, h.weight)))
        .collect();

    let mut errors = Vec::new();
    for check in [&tow, &zfw, &landing_weight, &lmc] {
        errors.extend(check.errors.iter().cloned());
    }
    errors.extend(cg_zfw.errors.iter().cloned());
    errors.extend(cg_tow.errors.iter().cloned());
    for check in passengers.values().chain(cargo.values()) {
        errors.extend(check.errors.iter().cloned());
    }

    let all_pass = errors.is_empty();
    debug!(aircraft = %aircraft.id, all_pass, violations = errors.len(), "validation complete");

    Ok(ValidationReport {
        all_pass,
        errors,
        tow,
        zfw,
        landing_weight,
        lmc,
        cg_zfw,
        cg_tow,
        passengers,
        cargo,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::{Flaps, TakeoffConfig, Thrust};
    use crate::calculations::loadsheet::{calculate, BasicWeights, FuelLoad, LmcItem, LoadsheetInput};
    use crate::reference::get_aircraft_by_id;

    fn ms16() -> &'static AircraftVariant {
        get_aircraft_by_id("738-MS-16BC").unwrap()
    }

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

    #[test]
    fn test_tow_over_mtow_message() {
        let check = validate_tow(77_500.0, ms16());
        assert!(!check.pass);
        assert_eq!(check.errors.len(), 2);
        let message = &check.errors[0];
        assert!(message.contains("77500"));
        assert!(message.contains("77000"));
        assert!(message.contains("500"));
        assert_eq!(check.errors[1], "TOW 77500 kg exceeds MTXW 77227 kg");
    }

    #[test]
    fn test_tow_between_mtow_and_mtxw() {
        let check = validate_tow(77_100.0, ms16());
        assert_eq!(check.errors, ["TOW 77100 kg exceeds MTOW 77000 kg (over by 100 kg)"]);
        assert!(validate_tow(77_000.0, ms16()).pass);
    }

    #[test]
    fn test_zfw_and_landing() {
        let zfw = validate_zfw(62_000.0, ms16());
        assert_eq!(zfw.errors, ["ZFW 62000 kg exceeds MZFW 61688 kg (over by 312 kg)"]);
        assert!(validate_zfw(61_688.0, ms16()).pass);

        let landing = validate_landing_weight(65_417.0, ms16());
        assert_eq!(landing.errors, ["Landing weight 65417 kg exceeds MLW 65317 kg (over by 100 kg)"]);
    }

    #[test]
    fn test_lmc_tolerance() {
        assert!(validate_lmc(500.0, 500.0).pass);
        assert!(validate_lmc(-500.0, 500.0).pass);
        assert_eq!(validate_lmc(-600.0, 500.0).errors, ["LMC total -600 kg exceeds ±500 kg limit"]);
        assert!(!validate_lmc(501.0, 500.0).pass);
    }

    #[test]
    fn test_lmc_nan_never_passes() {
        assert!(!validate_lmc(10_000.0, f64::NAN).pass);
        assert!(!validate_lmc(f64::NAN, 500.0).pass);
    }

    #[test]
    fn test_non_finite_weights_fail() {
        assert!(!validate_tow(f64::NAN, ms16()).pass);
        assert!(!validate_zfw(f64::INFINITY, ms16()).pass);
        assert_eq!(
            validate_landing_weight(f64::NAN, ms16()).errors,
            ["Landing weight NaN kg is not a valid weight"]
        );
    }

    #[test]
    fn test_cg_envelope_rejects_non_finite() {
        let data = reference::builtin().unwrap();
        let envelope = data.envelopes.for_phase(LoadPhase::Takeoff);
        let err = validate_cg_envelope(20.0, f64::NAN, LoadPhase::Takeoff, envelope).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(validate_cg_envelope(f64::NAN, 60_000.0, LoadPhase::Takeoff, envelope).is_err());
    }

    #[test]
    fn test_cg_envelope_anchor_is_exact() {
        let data = reference::builtin().unwrap();
        let envelope = data.envelopes.for_phase(LoadPhase::ZeroFuel);
        let check = validate_cg_envelope(20.0, 62_000.0, LoadPhase::ZeroFuel, envelope).unwrap();
        assert!(check.pass);
        assert_eq!(check.forward_limit, 15.5);
        assert_eq!(check.aft_limit, 32.5);
    }

    #[test]
    fn test_cg_envelope_violations() {
        let data = reference::builtin().unwrap();
        let envelope = data.envelopes.for_phase(LoadPhase::Takeoff);

        let forward = validate_cg_envelope(13.9, 50_000.0, LoadPhase::Takeoff, envelope).unwrap();
        assert_eq!(forward.errors, ["TOW CG 13.9% MAC is forward of limit 14% MAC"]);

        // 76,000 kg sits halfway between 74,000 (32.0) and 78,000 (31.5)
        let aft = validate_cg_envelope(32.0, 76_000.0, LoadPhase::Takeoff, envelope).unwrap();
        assert!(!aft.pass);
        assert_eq!(aft.aft_limit, 31.8);

        // clamped beyond the last anchor
        let heavy = validate_cg_envelope(16.8, 95_000.0, LoadPhase::Takeoff, envelope).unwrap();
        assert!(!heavy.pass);
        assert_eq!(heavy.forward_limit, 17.0);
    }

    #[test]
    fn test_passenger_zone() {
        assert!(validate_passenger_zone(Zone::OA, 16, ms16()).pass);
        assert_eq!(
            validate_passenger_zone(Zone::OA, 17, ms16()).errors,
            ["Zone OA: 17 pax exceeds capacity of 16"]
        );
        assert_eq!(
            validate_passenger_zone(Zone::OC, -1, ms16()).errors,
            ["Zone OC: passenger count cannot be negative"]
        );
    }

    #[test]
    fn test_cargo_weight() {
        assert!(validate_cargo_weight(Hold::Hold4, 474.0).pass);
        assert_eq!(validate_cargo_weight(Hold::Hold4, 475.0).errors, ["HOLD4: 475 kg exceeds max 474 kg"]);
        assert_eq!(
            validate_cargo_weight(Hold::Hold1, -1.0).errors,
            ["HOLD1: cargo weight cannot be negative"]
        );
    }

    #[test]
    fn test_scenario_all_pass() {
        let settings = CalcSettings::default();
        let result = calculate(&scenario_input(), &settings).unwrap();
        let report = validate_all(&result, ms16(), &settings).unwrap();
        assert!(report.all_pass, "{:?}", report.errors);
        assert!(report.errors.is_empty());
        assert_eq!(report.cg_zfw.forward_limit, 14.0);
        assert_eq!(report.cg_zfw.aft_limit, 33.0);
        assert_eq!(report.passengers.len(), 4);
        assert_eq!(report.cargo.len(), 4);
    }

    #[test]
    fn test_report_collects_every_violation() {
        let settings = CalcSettings::default();
        let input = LoadsheetInput {
            basic: BasicWeights { dow: 52_000.0, doi: 40.0 },
            cargo: BTreeMap::from([(Hold::Hold2, 2_600.0), (Hold::Hold3, 3_100.0)]),
            fuel: FuelLoad { wing_tanks: 13_000.0, center_tank: 5_000.0 },
            trip_fuel: Some(1_000.0),
            lmc_items: vec![LmcItem {
                category: "BAG".into(),
                location: "HOLD3".into(),
                weight: 600.0,
                index: 1.0,
            }],
            ..scenario_input()
        };
        let result = calculate(&input, &settings).unwrap();
        let report = validate_all(&result, ms16(), &settings).unwrap();

        assert!(!report.all_pass);
        assert!(!report.tow.pass);
        assert!(!report.zfw.pass);
        assert!(!report.landing_weight.pass);
        assert!(!report.lmc.pass);
        assert!(report.errors.len() >= 5);
        assert!(report.errors.iter().any(|e| e.starts_with("TOW ") && e.contains("MTOW")));
    }
}
