//! # Trim Engine
//!
//! Stabilizer trim for takeoff: bilinear interpolation over the trim grid
//! (takeoff index along each row, takeoff weight across rows) plus an
//! additive flap/thrust correction.
//!
//! Airframes whose FMC computes trim never consult the grid and return
//! [`TrimOutcome::Automatic`].
//!
//! ## Example
//!
//! ```rust
//! use loadsheet_core::aircraft::{Flaps, TakeoffConfig, Thrust};
//! use loadsheet_core::reference::get_aircraft_by_id;
//! use loadsheet_core::trim::calculate_trim;
//!
//! let aircraft = get_aircraft_by_id("738-MS-16BC").unwrap();
//! let config = TakeoffConfig::new(Flaps::F5, Thrust::K24);
//! let outcome = calculate_trim(aircraft, 48.0, 55_930.0, config).unwrap();
//! assert_eq!(outcome.final_trim(), Some(5.4));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aircraft::{AircraftVariant, Flaps, TakeoffConfig, Thrust};
use crate::errors::{CalcError, CalcResult};
use crate::reference::{self, ReferenceData};
use crate::units::round_to;

/// Message shown in place of a trim value on FMC-trimmed airframes
pub const AUTOMATIC_TRIM_MESSAGE: &str = "Trim will be calculated by FMC";

/// Trim read from the grid and corrected for the takeoff configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimSetting {
    /// Grid value, 1 decimal
    pub base_trim: f64,
    pub correction: f64,
    /// Base plus correction, 1 decimal
    pub final_trim: f64,
    pub flaps: Flaps,
    pub thrust: Thrust,
}

/// Result of a trim calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TrimOutcome {
    Calculated(TrimSetting),
    Automatic { message: String, flaps: Flaps },
}

impl TrimOutcome {
    pub fn is_calculated(&self) -> bool {
        matches!(self, TrimOutcome::Calculated(_))
    }

    pub fn setting(&self) -> Option<&TrimSetting> {
        match self {
            TrimOutcome::Calculated(setting) => Some(setting),
            TrimOutcome::Automatic { .. } => None,
        }
    }

    pub fn final_trim(&self) -> Option<f64> {
        self.setting().map(|s| s.final_trim)
    }
}

fn check_trim_inputs(toi: f64, tow_kg: f64) -> CalcResult<()> {
    if !toi.is_finite() {
        return Err(CalcError::invalid_input("toi", toi.to_string(), "Takeoff index must be finite"));
    }
    if !tow_kg.is_finite() {
        return Err(CalcError::invalid_input("tow", tow_kg.to_string(), "Takeoff weight must be finite"));
    }
    Ok(())
}

impl ReferenceData {
    /// Unrounded base trim at (`toi`, `tow_kg`).
    ///
    /// Both axes clamp to the grid; there is no extrapolation.
    pub fn base_trim(&self, toi: f64, tow_kg: f64) -> CalcResult<f64> {
        check_trim_inputs(toi, tow_kg)?;
        let empty_grid = || CalcError::invalid_table("trim grid", "row has no points");
        let rows = self.trim_table.rows();
        let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
            return Err(CalcError::invalid_table("trim grid", "table has no rows"));
        };
        let tow = tow_kg.clamp(first.tow, last.tow);

        let upper_pos = rows.partition_point(|r| r.tow < tow);
        let upper = rows.get(upper_pos).ok_or_else(empty_grid)?;
        let lower = match upper_pos.checked_sub(1) {
            Some(pos) if upper.tow != tow => &rows[pos],
            _ => return upper.trim_at(toi).ok_or_else(empty_grid),
        };

        let low_trim = lower.trim_at(toi).ok_or_else(empty_grid)?;
        let high_trim = upper.trim_at(toi).ok_or_else(empty_grid)?;
        let ratio = (tow - lower.tow) / (upper.tow - lower.tow);
        Ok(low_trim + ratio * (high_trim - low_trim))
    }

    /// Takeoff trim for `aircraft` at (`toi`, `tow_kg`) in `config`.
    pub fn trim_for(
        &self,
        aircraft: &AircraftVariant,
        toi: f64,
        tow_kg: f64,
        config: TakeoffConfig,
    ) -> CalcResult<TrimOutcome> {
        check_trim_inputs(toi, tow_kg)?;
        if aircraft.uses_automatic_trim() {
            debug!(aircraft = %aircraft.id, "trim left to FMC");
            return Ok(TrimOutcome::Automatic {
                message: AUTOMATIC_TRIM_MESSAGE.to_string(),
                flaps: config.flaps,
            });
        }

        let base = self.base_trim(toi, tow_kg)?;
        let correction = self.trim_corrections.correction(config.flaps, config.thrust);
        let setting = TrimSetting {
            base_trim: round_to(base, 1),
            correction,
            final_trim: round_to(base + correction, 1),
            flaps: config.flaps,
            thrust: config.thrust,
        };
        debug!(toi, tow_kg, base, correction, final_trim = setting.final_trim, "trim calculated");
        Ok(TrimOutcome::Calculated(setting))
    }
}

/// Takeoff trim from the built-in tables.
pub fn calculate_trim(aircraft: &AircraftVariant, toi: f64, tow_kg: f64, config: TakeoffConfig) -> CalcResult<TrimOutcome> {
    reference::builtin()?.trim_for(aircraft, toi, tow_kg, config)
}

/// Unrounded base trim from the built-in grid.
pub fn lookup_base_trim(toi: f64, tow_kg: f64) -> CalcResult<f64> {
    reference::builtin()?.base_trim(toi, tow_kg)
}
