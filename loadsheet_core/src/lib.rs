//! # loadsheet_core - Boeing 737 Load & Trim Engine
//!
//! `loadsheet_core` computes the weight-and-balance sheet for 737-800 and
//! 737 MAX 8 variants: passenger, cargo and fuel indices, zero-fuel and
//! takeoff weights, CG in %MAC, stabilizer trim, and verdicts against the
//! aircraft's certified limits. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions over immutable reference tables
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Verdicts, not panics**: Limit violations are reported, lookup failures are errors
//!
//! ## Quick Start
//!
//! ```rust
//! use loadsheet_core::calculations::loadsheet::{calculate, LoadsheetInput};
//! use loadsheet_core::reference::get_aircraft_by_id;
//! use loadsheet_core::settings::CalcSettings;
//! use loadsheet_core::validation::validate_all;
//!
//! let input: LoadsheetInput = serde_json::from_str(r#"{
//!     "aircraft_id": "738-MS-16BC",
//!     "basic": { "dow": 41000.0, "doi": 40.0 },
//!     "passengers": { "OA": 10, "OB": 30, "OC": 30, "OD": 20 },
//!     "fuel": { "wing_tanks": 8000.0 },
//!     "takeoff": { "flaps": "F5", "thrust": "24K" }
//! }"#).unwrap();
//!
//! let settings = CalcSettings::default();
//! let result = calculate(&input, &settings).unwrap();
//! let aircraft = get_aircraft_by_id(&input.aircraft_id).unwrap();
//! let report = validate_all(&result, aircraft, &settings).unwrap();
//! assert!(report.tow.pass);
//! assert_eq!(result.passengers.total_pax, 90);
//! ```
//!
//! ## Modules
//!
//! - [`aircraft`] - Aircraft variants, zones, holds, flap and thrust selections
//! - [`tables`] - Validated index tables, trim grid and CG envelopes
//! - [`reference`] - Process-wide built-in reference data
//! - [`lookup`] - Passenger, cargo and fuel index lookup
//! - [`trim`] - Stabilizer trim
//! - [`cg`] - Index to %MAC conversion
//! - [`calculations`] - Loadsheet calculation
//! - [`validation`] - Weight, LMC, CG and capacity checks
//! - [`settings`] - Recalibratable constants
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod aircraft;
pub mod calculations;
pub mod cg;
pub mod errors;
pub mod lookup;
pub mod reference;
pub mod settings;
pub mod tables;
pub mod trim;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::{LoadsheetInput, LoadsheetResult};
pub use errors::{CalcError, CalcResult};
pub use reference::ReferenceData;
pub use settings::CalcSettings;
pub use trim::TrimOutcome;
pub use validation::ValidationReport;
