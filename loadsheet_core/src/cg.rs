//! # CG Converter
//!
//! Converts a balance index to a CG position in %MAC. The index unit is
//! defined from the arm by
//!
//! ```text
//! index = W * (arm - REFERENCE_ARM) / SCALE + OFFSET
//! ```
//!
//! so the conversion is its exact inverse, followed by expressing the arm as
//! a fraction of the mean aerodynamic chord:
//!
//! ```text
//! arm  = (index - OFFSET) * SCALE / W + REFERENCE_ARM
//! %MAC = (arm - LEMAC) / MAC_LENGTH * 100
//! ```
//!
//! ## Example
//!
//! ```rust
//! use loadsheet_core::cg::{index_to_mac, mac_to_index};
//!
//! let mac = index_to_mac(40.0, Some(41_000.0));
//! assert!((mac - 16.687).abs() < 1e-3);
//! assert!((mac_to_index(mac, 41_000.0) - 40.0).abs() < 1e-9);
//! ```

use tracing::warn;

use crate::units::{Inches, Kilograms, PercentMac};

/// Balance-chart reference station
pub const REFERENCE_ARM: Inches = Inches(658.3);
/// Index scale factor
pub const INDEX_SCALE: f64 = 40_000.0;
/// Index offset
pub const INDEX_OFFSET: f64 = 45.0;
/// Leading edge of the mean aerodynamic chord
pub const LEMAC: Inches = Inches(628.84);
/// Mean aerodynamic chord length
pub const MAC_LENGTH: Inches = Inches(147.31);
/// Weight assumed when none is known
pub const DEFAULT_FALLBACK_WEIGHT_KG: f64 = 55_000.0;

/// Balance arm of `index` at `weight`.
pub fn arm_at(index: f64, weight: Kilograms) -> Inches {
    Inches((index - INDEX_OFFSET) * INDEX_SCALE / weight.value()) + REFERENCE_ARM
}

/// Arm expressed along the MAC.
pub fn arm_to_mac(arm: Inches) -> PercentMac {
    PercentMac((arm - LEMAC).value() / MAC_LENGTH.value() * 100.0)
}

/// Arm at a %MAC position.
pub fn mac_to_arm(mac: PercentMac) -> Inches {
    MAC_LENGTH * (mac.value() / 100.0) + LEMAC
}

/// %MAC of `index` at `weight_kg`.
///
/// A missing or non-positive weight falls back to
/// [`DEFAULT_FALLBACK_WEIGHT_KG`], which is only an approximation.
pub fn index_to_mac(index: f64, weight_kg: Option<f64>) -> f64 {
    index_to_mac_with_fallback(index, weight_kg, DEFAULT_FALLBACK_WEIGHT_KG)
}

/// %MAC of `index`, using `fallback_weight_kg` when no usable weight is given.
pub fn index_to_mac_with_fallback(index: f64, weight_kg: Option<f64>, fallback_weight_kg: f64) -> f64 {
    let weight = match weight_kg {
        Some(w) if w > 0.0 => w,
        _ => {
            warn!(index, fallback_weight_kg, "no usable weight, %MAC approximated at fallback weight");
            fallback_weight_kg
        }
    };
    arm_to_mac(arm_at(index, Kilograms(weight))).value()
}

/// Index corresponding to `mac` %MAC at `weight_kg`.
pub fn mac_to_index(mac: f64, weight_kg: f64) -> f64 {
    let arm = mac_to_arm(PercentMac(mac));
    (arm - REFERENCE_ARM).value() * weight_kg / INDEX_SCALE + INDEX_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_offset_index_sits_at_reference_arm() {
        // index 45 puts the CG on the reference station whatever the weight
        let expected = arm_to_mac(REFERENCE_ARM).value();
        assert!(approx(index_to_mac(45.0, Some(55_000.0)), expected, 1e-12));
        assert!(approx(index_to_mac(45.0, Some(70_000.0)), expected, 1e-12));
        assert!(approx(expected, 19.9986, 1e-4));
    }

    #[test]
    fn test_known_values() {
        assert!(approx(index_to_mac(40.0, Some(47_930.0)), 17.166, 1e-3));
        assert!(approx(index_to_mac(48.0, Some(55_930.0)), 21.455, 1e-3));
    }

    #[test]
    fn test_fallback_weight() {
        let fallback = index_to_mac(50.0, None);
        assert!(approx(fallback, 22.467, 1e-3));
        assert_eq!(index_to_mac(50.0, Some(0.0)), fallback);
        assert_eq!(index_to_mac(50.0, Some(-10.0)), fallback);
        assert_eq!(index_to_mac(50.0, Some(55_000.0)), fallback);

        let custom = index_to_mac_with_fallback(50.0, None, 60_000.0);
        assert_eq!(custom, index_to_mac(50.0, Some(60_000.0)));
    }

    #[test]
    fn test_mac_arm_endpoints() {
        assert_eq!(arm_to_mac(LEMAC).value(), 0.0);
        assert!(approx(arm_to_mac(LEMAC + MAC_LENGTH).value(), 100.0, 1e-9));
        assert!(approx(mac_to_arm(PercentMac(25.0)).value(), 628.84 + 147.31 / 4.0, 1e-9));
    }

    #[test]
    fn test_heavier_aircraft_moves_less() {
        let light = index_to_mac(60.0, Some(45_000.0));
        let heavy = index_to_mac(60.0, Some(75_000.0));
        assert!(light > heavy);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_mac_index_roundtrip(index in -20.0..120.0_f64, weight in 35_000.0..85_000.0_f64) {
                let mac = index_to_mac(index, Some(weight));
                prop_assert!((mac_to_index(mac, weight) - index).abs() < 1e-6);
            }
        }
    }
}
