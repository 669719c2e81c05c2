//! # Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, settings) -> CalcResult<*Result>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`loadsheet`] - Weight and balance loadsheet with %MAC and takeoff trim

pub mod loadsheet;

pub use loadsheet::{
    calculate, calculate_with, BasicWeights, FuelLoad, LmcItem, LoadsheetInput, LoadsheetResult,
};
