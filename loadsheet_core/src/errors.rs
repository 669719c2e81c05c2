//! # Error Types
//!
//! Structured error types for loadsheet_core. Lookup and reference-data
//! failures abort a calculation; limit violations are *not* errors and are
//! reported through [`crate::validation`] instead.
//!
//! Two broad families exist:
//!
//! - **Reference errors** (`Unknown*`, `InvalidTable`): the caller handed in an
//!   identifier or table that the reference data does not know about. These
//!   are configuration or integration mistakes.
//! - **Data-entry errors** (`OutOfRange`, `InvalidInput`): a measurement falls
//!   outside every table's covered domain or is physically meaningless.
//!
//! ## Example
//!
//! ```rust
//! use loadsheet_core::errors::{CalcError, CalcResult};
//!
//! fn check_dow(dow_kg: f64) -> CalcResult<()> {
//!     if dow_kg <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "dow",
//!             dow_kg.to_string(),
//!             "Dry operating weight must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_dow(-1.0).unwrap_err().is_data_entry_error());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for loadsheet_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for load & trim operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is meaningless (negative fuel, zero DOW, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Aircraft variant id not present in the catalog
    #[error("Unknown aircraft variant: {aircraft_id}")]
    UnknownAircraft { aircraft_id: String },

    /// Passenger index table set id not present in the reference data
    #[error("Unknown index table set: {table_set}")]
    UnknownTableSet { table_set: String },

    /// Cabin zone not present (or not covered by a table set)
    #[error("Unknown zone: {zone}")]
    UnknownZone { zone: String },

    /// Cargo hold not present in the cargo index table
    #[error("Unknown hold: {hold}")]
    UnknownHold { hold: String },

    /// Fuel tank group not present in the fuel index table
    #[error("Unknown fuel type: {fuel_type}")]
    UnknownFuelType { fuel_type: String },

    /// A measurement lies outside every row of the table it was looked up in
    #[error("{quantity} {value} out of range for {table}")]
    OutOfRange {
        quantity: String,
        value: String,
        table: String,
    },

    /// Reference table failed its consistency checks
    #[error("Invalid table '{table}': {reason}")]
    InvalidTable { table: String, reason: String },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownAircraft error
    pub fn unknown_aircraft(aircraft_id: impl Into<String>) -> Self {
        CalcError::UnknownAircraft {
            aircraft_id: aircraft_id.into(),
        }
    }

    /// Create an UnknownTableSet error
    pub fn unknown_table_set(table_set: impl Into<String>) -> Self {
        CalcError::UnknownTableSet {
            table_set: table_set.into(),
        }
    }

    /// Create an UnknownZone error
    pub fn unknown_zone(zone: impl Into<String>) -> Self {
        CalcError::UnknownZone { zone: zone.into() }
    }

    /// Create an UnknownHold error
    pub fn unknown_hold(hold: impl Into<String>) -> Self {
        CalcError::UnknownHold { hold: hold.into() }
    }

    /// Create an UnknownFuelType error
    pub fn unknown_fuel_type(fuel_type: impl Into<String>) -> Self {
        CalcError::UnknownFuelType {
            fuel_type: fuel_type.into(),
        }
    }

    /// Create an OutOfRange error
    pub fn out_of_range(quantity: impl Into<String>, value: impl Into<String>, table: impl Into<String>) -> Self {
        CalcError::OutOfRange {
            quantity: quantity.into(),
            value: value.into(),
            table: table.into(),
        }
    }

    /// Create an InvalidTable error
    pub fn invalid_table(table: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidTable {
            table: table.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Identifier or table problems: present these as configuration mistakes.
    pub fn is_reference_error(&self) -> bool {
        matches!(
            self,
            CalcError::UnknownAircraft { .. }
                | CalcError::UnknownTableSet { .. }
                | CalcError::UnknownZone { .. }
                | CalcError::UnknownHold { .. }
                | CalcError::UnknownFuelType { .. }
                | CalcError::InvalidTable { .. }
        )
    }

    /// Measurement problems: present these as data-entry mistakes.
    pub fn is_data_entry_error(&self) -> bool {
        matches!(self, CalcError::OutOfRange { .. } | CalcError::InvalidInput { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnknownAircraft { .. } => "UNKNOWN_AIRCRAFT",
            CalcError::UnknownTableSet { .. } => "UNKNOWN_TABLE_SET",
            CalcError::UnknownZone { .. } => "UNKNOWN_ZONE",
            CalcError::UnknownHold { .. } => "UNKNOWN_HOLD",
            CalcError::UnknownFuelType { .. } => "UNKNOWN_FUEL_TYPE",
            CalcError::OutOfRange { .. } => "OUT_OF_RANGE",
            CalcError::InvalidTable { .. } => "INVALID_TABLE",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

impl From<toml::de::Error> for CalcError {
    fn from(err: toml::de::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::out_of_range("Passenger count", "17", "zone OA");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"OutOfRange\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_display() {
        let error = CalcError::out_of_range("Cargo weight", "900 kg", "HOLD1");
        assert_eq!(error.to_string(), "Cargo weight 900 kg out of range for HOLD1");

        let error = CalcError::unknown_table_set("738-99BC");
        assert_eq!(error.to_string(), "Unknown index table set: 738-99BC");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::unknown_zone("OE").error_code(), "UNKNOWN_ZONE");
        assert_eq!(CalcError::unknown_hold("HOLD5").error_code(), "UNKNOWN_HOLD");
        assert_eq!(CalcError::serialization("bad").error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_error_categories() {
        assert!(CalcError::unknown_fuel_type("AUX").is_reference_error());
        assert!(!CalcError::unknown_fuel_type("AUX").is_data_entry_error());
        assert!(CalcError::out_of_range("Fuel", "1", "x").is_data_entry_error());
        assert!(CalcError::invalid_table("OA", "gap").is_reference_error());
    }
}
