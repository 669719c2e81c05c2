//! Fuel index table (737-800).
//!
//! Unlike the passenger and cargo tables these are discrete anchors read by
//! interpolation. Up to [`TOTAL_FUEL_LIMIT_KG`] the `TOTAL_FUEL` curve
//! applies; beyond it the wing (tanks 1 and 2) and center tank curves are
//! read separately.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::AnchorTable;
use crate::errors::{CalcError, CalcResult};

/// Upper end of the `TOTAL_FUEL` curve
pub const TOTAL_FUEL_LIMIT_KG: f64 = 13_500.0;

/// Tank group a fuel curve applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FuelTank {
    #[serde(rename = "TOTAL_FUEL")]
    TotalFuel,
    #[serde(rename = "WING_TANKS_1_2")]
    WingTanks12,
    #[serde(rename = "CENTER_TANK")]
    CenterTank,
}

impl FuelTank {
    pub const ALL: [FuelTank; 3] = [FuelTank::TotalFuel, FuelTank::WingTanks12, FuelTank::CenterTank];

    pub fn code(&self) -> &'static str {
        match self {
            FuelTank::TotalFuel => "TOTAL_FUEL",
            FuelTank::WingTanks12 => "WING_TANKS_1_2",
            FuelTank::CenterTank => "CENTER_TANK",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().replace(['-', ' '], "_").as_str() {
            "TOTAL_FUEL" | "TOTAL" => Ok(FuelTank::TotalFuel),
            "WING_TANKS_1_2" | "WING_TANKS" | "WING" => Ok(FuelTank::WingTanks12),
            "CENTER_TANK" | "CENTRE_TANK" | "CENTER" | "CENTRE" => Ok(FuelTank::CenterTank),
            _ => Err(CalcError::unknown_fuel_type(s)),
        }
    }
}

impl fmt::Display for FuelTank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for FuelTank {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FuelTank::from_str_flexible(s)
    }
}

/// Fuel anchor curves keyed by tank group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelIndexTable {
    pub tanks: BTreeMap<FuelTank, AnchorTable>,
}

impl FuelIndexTable {
    /// Curve for `tank`, failing with `UnknownFuelType` when absent.
    pub fn tank_table(&self, tank: FuelTank) -> CalcResult<&AnchorTable> {
        self.tanks
            .get(&tank)
            .ok_or_else(|| CalcError::unknown_fuel_type(tank.code()))
    }

    /// Fuel index for `weight_kg` on the `tank` curve; zero short-circuits.
    pub fn index_for(&self, tank: FuelTank, weight_kg: f64) -> CalcResult<i32> {
        if weight_kg == 0.0 {
            return Ok(0);
        }
        if !weight_kg.is_finite() {
            return Err(CalcError::out_of_range("Fuel weight", format!("{} kg", weight_kg), tank.code()));
        }
        Ok(self.tank_table(tank)?.index_at(weight_kg))
    }
}

const TOTAL_FUEL: &[(f64, i32)] = &[
    (500.0, 0), (1000.0, 0), (1500.0, 0), (2000.0, 0), (2500.0, 0), (3000.0, 0),
    (3500.0, 0), (4000.0, 1), (4500.0, 1), (5000.0, 2), (5500.0, 3), (6000.0, 3),
    (6500.0, 4), (7000.0, 5), (7500.0, 7), (8000.0, 8), (8500.0, 7), (9000.0, 7),
    (9500.0, 6), (10000.0, 6), (10500.0, 5), (11000.0, 5), (11500.0, 4), (12000.0, 3),
    (12500.0, 2), (13000.0, 2), (13500.0, 1),
];

const WING_TANKS_1_2: &[(f64, i32)] = &[
    (14000.0, 0), (14500.0, 0), (15000.0, -1), (15500.0, -2), (16000.0, -2),
    (16500.0, -3), (17000.0, -3), (17500.0, -4), (18000.0, -4), (18500.0, -5),
    (19000.0, -6), (19500.0, -6), (20000.0, -7), (20500.0, -8), (20819.0, -9),
];

// The 7801 kg anchor is carried over from the manual transcription as-is.
const CENTER_TANK: &[(f64, i32)] = &[
    (500.0, 0), (1000.0, -1), (1500.0, -2), (2000.0, -3), (2500.0, -3), (3000.0, -4),
    (3500.0, -4), (4000.0, -5), (4500.0, -6), (5000.0, -6), (5500.0, -7), (6000.0, -8),
    (6500.0, -8), (7000.0, -9), (7500.0, -10), (7801.0, 8), (8000.0, -10), (8500.0, -11),
    (9000.0, -12), (9500.0, -12), (10000.0, -13), (10500.0, -13), (11000.0, -14),
    (11500.0, -14), (12000.0, -15), (12500.0, -16), (13000.0, -17), (13019.0, -17),
];

/// Construct the built-in 737-800 fuel table.
pub fn builtin_table() -> CalcResult<FuelIndexTable> {
    let mut tanks = BTreeMap::new();
    for (tank, pairs) in [
        (FuelTank::TotalFuel, TOTAL_FUEL),
        (FuelTank::WingTanks12, WING_TANKS_1_2),
        (FuelTank::CenterTank, CENTER_TANK),
    ] {
        tanks.insert(tank, AnchorTable::from_pairs(tank.code(), pairs)?);
    }
    Ok(FuelIndexTable { tanks })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_fuel_curve_ends_at_limit() {
        let table = builtin_table().unwrap();
        let last = table.tank_table(FuelTank::TotalFuel).unwrap().points().last().copied().unwrap();
        assert_eq!(last.weight, TOTAL_FUEL_LIMIT_KG);
    }

    #[test]
    fn test_exact_anchor() {
        let table = builtin_table().unwrap();
        assert_eq!(table.index_for(FuelTank::TotalFuel, 8000.0).unwrap(), 8);
        assert_eq!(table.index_for(FuelTank::WingTanks12, 20819.0).unwrap(), -9);
        assert_eq!(table.index_for(FuelTank::CenterTank, 7801.0).unwrap(), 8);
    }

    #[test]
    fn test_interpolation_and_clamping() {
        let table = builtin_table().unwrap();
        // 7000 -> 5, 7500 -> 7: 7250 lands exactly on 6
        assert_eq!(table.index_for(FuelTank::TotalFuel, 7250.0).unwrap(), 6);
        // 7000 -> 5, 7500 -> 7: 7125 is 5.5, rounded away from zero
        assert_eq!(table.index_for(FuelTank::TotalFuel, 7125.0).unwrap(), 6);
        assert_eq!(table.index_for(FuelTank::TotalFuel, 100.0).unwrap(), 0);
        assert_eq!(table.index_for(FuelTank::WingTanks12, 9000.0).unwrap(), 0);
        assert_eq!(table.index_for(FuelTank::WingTanks12, 30000.0).unwrap(), -9);
        assert_eq!(table.index_for(FuelTank::CenterTank, 1250.0).unwrap(), -2);
    }

    #[test]
    fn test_zero_and_non_finite() {
        let table = builtin_table().unwrap();
        for tank in FuelTank::ALL {
            assert_eq!(table.index_for(tank, 0.0).unwrap(), 0);
        }
        assert!(table.index_for(FuelTank::TotalFuel, f64::NAN).is_err());
    }

    #[test]
    fn test_missing_tank() {
        let mut table = builtin_table().unwrap();
        table.tanks.remove(&FuelTank::CenterTank);
        assert_eq!(table.index_for(FuelTank::CenterTank, 500.0).unwrap_err().error_code(), "UNKNOWN_FUEL_TYPE");
    }

    #[test]
    fn test_fuel_tank_parsing() {
        assert_eq!("wing tanks 1 2".parse::<FuelTank>().unwrap(), FuelTank::WingTanks12);
        assert_eq!(FuelTank::from_str_flexible("centre").unwrap(), FuelTank::CenterTank);
        assert_eq!(FuelTank::from_str_flexible("AUX").unwrap_err().error_code(), "UNKNOWN_FUEL_TYPE");
        assert_eq!(serde_json::to_string(&FuelTank::WingTanks12).unwrap(), "\"WING_TANKS_1_2\"");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_anchor_weights_return_stored_index(tank_pick in 0usize..3, anchor_pick in 0usize..64) {
                let table = builtin_table().unwrap();
                let tank = FuelTank::ALL[tank_pick];
                let points = table.tank_table(tank).unwrap().points();
                let anchor = points[anchor_pick % points.len()];
                prop_assert_eq!(table.index_for(tank, anchor.weight).unwrap(), anchor.index);
            }
        }
    }
}
