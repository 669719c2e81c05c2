//! # Calculation Settings
//!
//! Recalibratable constants used by the orchestrator and validator. The
//! defaults match the operator's current procedures; a settings file (TOML or
//! JSON) may override any subset of fields without a rebuild.
//!
//! ## TOML Example
//!
//! ```toml
//! trip_fuel_fraction = 0.55
//!
//! [passenger_weights]
//! adult = 80.0
//! ```
//!
//! ```rust
//! use loadsheet_core::settings::CalcSettings;
//!
//! let settings = CalcSettings::from_toml_str("trip_fuel_fraction = 0.55").unwrap();
//! assert_eq!(settings.trip_fuel_fraction, 0.55);
//! assert_eq!(settings.passenger_weights.adult, 77.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Settings consumed by a calculation and its validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcSettings {
    /// Standard mass per person
    pub passenger_weights: PassengerWeights,

    /// Share of total fuel assumed burnt when no trip fuel is supplied.
    ///
    /// A planning heuristic, not a certified figure.
    pub trip_fuel_fraction: f64,

    /// Weight assumed by the index-to-%MAC conversion when none is available
    pub mac_fallback_weight_kg: f64,

    /// Maximum absolute total of last-minute-change weight
    pub lmc_tolerance_kg: f64,
}

impl Default for CalcSettings {
    fn default() -> Self {
        CalcSettings {
            passenger_weights: PassengerWeights::default(),
            trip_fuel_fraction: 0.6,
            mac_fallback_weight_kg: 55_000.0,
            lmc_tolerance_kg: 500.0,
        }
    }
}

impl CalcSettings {
    /// Parse settings from TOML, filling absent fields with defaults.
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        let settings: CalcSettings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from JSON, filling absent fields with defaults.
    pub fn from_json_str(text: &str) -> CalcResult<Self> {
        let settings: CalcSettings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values no operator would intend.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.trip_fuel_fraction.is_finite() && (0.0..=1.0).contains(&self.trip_fuel_fraction)) {
            return Err(CalcError::invalid_input(
                "trip_fuel_fraction",
                self.trip_fuel_fraction.to_string(),
                "Fraction must be between 0 and 1",
            ));
        }
        if !(self.mac_fallback_weight_kg.is_finite() && self.mac_fallback_weight_kg > 0.0) {
            return Err(CalcError::invalid_input(
                "mac_fallback_weight_kg",
                self.mac_fallback_weight_kg.to_string(),
                "Fallback weight must be a positive number",
            ));
        }
        if !(self.lmc_tolerance_kg.is_finite() && self.lmc_tolerance_kg >= 0.0) {
            return Err(CalcError::invalid_input(
                "lmc_tolerance_kg",
                self.lmc_tolerance_kg.to_string(),
                "Tolerance must be a non-negative number",
            ));
        }
        self.passenger_weights.validate()
    }
}

/// Standard passenger and crew masses in kg.
///
/// Only `adult` enters the calculation, since zone counts are seated
/// passengers and crew is part of the DOW. The other masses are carried so
/// a loadsheet can state every standard mass it was prepared under.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassengerWeights {
    /// Adult passenger (the weight used for every seated passenger)
    pub adult: f64,
    /// Child, ages 2-12
    pub child: f64,
    /// Infant under 2, not occupying a seat
    pub infant: f64,
    /// Flight deck crew member
    pub flight_crew: f64,
    /// Cabin crew member
    pub cabin_crew: f64,
}

impl Default for PassengerWeights {
    fn default() -> Self {
        PassengerWeights {
            adult: 77.0,
            child: 35.0,
            infant: 0.0,
            flight_crew: 85.0,
            cabin_crew: 75.0,
        }
    }
}

impl PassengerWeights {
    fn validate(&self) -> CalcResult<()> {
        if !(self.adult.is_finite() && self.adult > 0.0) {
            return Err(CalcError::invalid_input(
                "passenger_weights.adult",
                self.adult.to_string(),
                "Adult weight must be a positive number",
            ));
        }
        let others = [
            ("passenger_weights.child", self.child),
            ("passenger_weights.infant", self.infant),
            ("passenger_weights.flight_crew", self.flight_crew),
            ("passenger_weights.cabin_crew", self.cabin_crew),
        ];
        for (field, value) in others {
            if !(value.is_finite() && value >= 0.0) {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Weight must be a non-negative number",
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for PassengerWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "adult {} kg, child {} kg, infant {} kg, flight crew {} kg, cabin crew {} kg",
            self.adult, self.child, self.infant, self.flight_crew, self.cabin_crew
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = CalcSettings::default();
        assert_eq!(settings.passenger_weights.adult, 77.0);
        assert_eq!(settings.trip_fuel_fraction, 0.6);
        assert_eq!(settings.mac_fallback_weight_kg, 55_000.0);
        assert_eq!(settings.lmc_tolerance_kg, 500.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_standard_masses_display() {
        let weights = CalcSettings::from_toml_str("[passenger_weights]\ncabin_crew = 80.0").unwrap().passenger_weights;
        assert_eq!(
            weights.to_string(),
            "adult 77 kg, child 35 kg, infant 0 kg, flight crew 85 kg, cabin crew 80 kg"
        );
    }

    #[test]
    fn test_partial_toml() {
        let text = r#"
            lmc_tolerance_kg = 400.0

            [passenger_weights]
            adult = 80.0
        "#;
        let settings = CalcSettings::from_toml_str(text).unwrap();
        assert_eq!(settings.lmc_tolerance_kg, 400.0);
        assert_eq!(settings.passenger_weights.adult, 80.0);
        assert_eq!(settings.passenger_weights.child, 35.0);
        assert_eq!(settings.trip_fuel_fraction, 0.6);
    }

    #[test]
    fn test_partial_json() {
        let settings = CalcSettings::from_json_str(r#"{ "mac_fallback_weight_kg": 60000.0 }"#).unwrap();
        assert_eq!(settings.mac_fallback_weight_kg, 60_000.0);
        assert_eq!(settings.lmc_tolerance_kg, 500.0);
    }

    #[test]
    fn test_rejects_bad_fraction() {
        let err = CalcSettings::from_toml_str("trip_fuel_fraction = 1.5").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_rejects_bad_syntax() {
        let err = CalcSettings::from_toml_str("trip_fuel_fraction = ").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_rejects_zero_adult_weight() {
        let err = CalcSettings::from_json_str(r#"{ "passenger_weights": { "adult": 0.0 } }"#).unwrap_err();
        assert!(err.to_string().contains("passenger_weights.adult"));
    }

    #[test]
    fn test_rejects_non_finite_toml_values() {
        let cases = [
            "lmc_tolerance_kg = nan",
            "lmc_tolerance_kg = inf",
            "mac_fallback_weight_kg = nan",
            "mac_fallback_weight_kg = inf",
            "trip_fuel_fraction = nan",
            "[passenger_weights]\nadult = nan",
            "[passenger_weights]\nadult = inf",
            "[passenger_weights]\ncabin_crew = nan",
            "[passenger_weights]\nchild = -inf",
        ];
        for text in cases {
            let err = CalcSettings::from_toml_str(text).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT", "{}", text);
        }
    }

    #[test]
    fn test_validate_catches_nan_set_in_code() {
        let mut settings = CalcSettings::default();
        settings.lmc_tolerance_kg = f64::NAN;
        assert!(settings.validate().is_err());

        let mut settings = CalcSettings::default();
        settings.passenger_weights.adult = f64::NAN;
        assert!(settings.validate().is_err());
    }
}
