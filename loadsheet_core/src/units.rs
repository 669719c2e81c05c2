//! # Unit Types
//!
//! Lightweight newtype wrappers for the handful of physical quantities that
//! flow through the balance arithmetic. Loadsheet figures stay plain `f64`
//! kilograms and index units at the API boundary (they serialize as numbers
//! either way); the wrappers guard the arm/%MAC conversion where a mixed-up
//! inch and kilogram would silently produce a plausible-looking CG.
//!
//! ## Example
//!
//! ```rust
//! use loadsheet_core::units::{round_to, Inches, Kilograms};
//!
//! let arm = Inches(658.3) - Inches(628.84);
//! assert!((arm.0 - 29.46).abs() < 1e-9);
//!
//! let payload = Kilograms(6930.0) + Kilograms(700.0);
//! assert_eq!(round_to(payload.value() / 1000.0, 1), 7.6);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Balance arm (station) in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// CG position as a percentage of the mean aerodynamic chord
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PercentMac(pub f64);

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Kilograms);
impl_arithmetic!(Inches);
impl_arithmetic!(PercentMac);

/// Round to `decimals` places, ties away from zero.
///
/// Loadsheet figures are printed to one decimal (%MAC, trim) or whole units
/// (weights, fuel index), so every rounding in the crate goes through here.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Inches(658.3);
        let b = Inches(628.84);
        assert!(((a - b).0 - 29.46).abs() < 1e-9);
        assert_eq!((Kilograms(100.0) * 2.0).0, 200.0);
        assert_eq!((Kilograms(100.0) / 4.0).0, 25.0);
        assert_eq!((PercentMac(10.0) + PercentMac(2.5)).value(), 12.5);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(5.4228, 1), 5.4);
        assert_eq!(round_to(17.166, 1), 17.2);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(51130.4, 0), 51130.0);
    }

    #[test]
    fn test_serialization() {
        let kg = Kilograms(41000.0);
        let json = serde_json::to_string(&kg).unwrap();
        assert_eq!(json, "41000.0");

        let roundtrip: Kilograms = serde_json::from_str(&json).unwrap();
        assert_eq!(kg, roundtrip);
    }
}
