//! # Index Lookup
//!
//! Resolves raw measurements to index contributions:
//!
//! | Measurement | Table shape | Policy |
//! |---|---|---|
//! | passengers per zone | range rows | bracket search, out-of-domain fails |
//! | cargo kg per hold | range rows | bracket search, out-of-domain fails |
//! | fuel kg per tank group | anchors | exact / clamp / interpolate and round |
//!
//! Free functions read the built-in reference data; the same operations are
//! available as [`ReferenceData`] methods for caller-supplied tables.
//!
//! ## Example
//!
//! ```rust
//! use loadsheet_core::aircraft::Zone;
//! use loadsheet_core::lookup::{calculate_fuel_index, get_passenger_index, FuelIndexMethod};
//!
//! assert_eq!(get_passenger_index(Zone::OB, 30, "738-16BC-144EY").unwrap(), -10);
//!
//! let fuel = calculate_fuel_index(8000.0, 8000.0, 0.0).unwrap();
//! assert_eq!(fuel.index, 8);
//! assert_eq!(fuel.method, FuelIndexMethod::Total);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aircraft::{Hold, Zone};
use crate::errors::CalcResult;
use crate::reference::{self, ReferenceData};
use crate::tables::fuel::TOTAL_FUEL_LIMIT_KG;
use crate::tables::FuelTank;

/// How a fuel index was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelIndexMethod {
    /// No fuel on board
    None,
    /// Single read of the total-fuel curve
    Total,
    /// Wing and center tank curves read separately and summed
    Split,
}

impl fmt::Display for FuelIndexMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FuelIndexMethod::None => "none",
            FuelIndexMethod::Total => "total",
            FuelIndexMethod::Split => "split",
        };
        write!(f, "{}", text)
    }
}

/// Fuel index with the method used. Partial indices are only present for
/// [`FuelIndexMethod::Split`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelIndexResult {
    pub index: i32,
    pub method: FuelIndexMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wing_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_index: Option<i32>,
}

/// Passenger count, weight and index of one zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneIndex {
    pub pax: i32,
    pub weight: f64,
    pub index: i32,
}

/// Cargo weight and index of one hold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoldIndex {
    pub weight: f64,
    pub index: i32,
}

impl ReferenceData {
    /// Passenger index for `pax` in `zone` of table set `table_set`.
    pub fn passenger_index(&self, zone: Zone, pax: i32, table_set: &str) -> CalcResult<i32> {
        if pax == 0 {
            return Ok(0);
        }
        self.passenger_set(table_set)?.index_for(zone, pax)
    }

    /// Cargo index for `weight_kg` in `hold`.
    pub fn cargo_index(&self, hold: Hold, weight_kg: f64) -> CalcResult<i32> {
        self.cargo.index_for(hold, weight_kg)
    }

    /// Fuel index for `weight_kg` on one tank group's curve.
    pub fn fuel_index(&self, tank: FuelTank, weight_kg: f64) -> CalcResult<i32> {
        self.fuel.index_for(tank, weight_kg)
    }

    /// Fuel index for a whole fuel load.
    ///
    /// Loads up to the end of the total-fuel curve read that curve once;
    /// heavier loads read the wing and center curves separately.
    pub fn total_fuel_index(&self, total_kg: f64, wing_kg: f64, center_kg: f64) -> CalcResult<FuelIndexResult> {
        if total_kg == 0.0 {
            return Ok(FuelIndexResult {
                index: 0,
                method: FuelIndexMethod::None,
                wing_index: None,
                center_index: None,
            });
        }

        if total_kg <= TOTAL_FUEL_LIMIT_KG {
            let index = self.fuel_index(FuelTank::TotalFuel, total_kg)?;
            debug!(total_kg, index, "fuel index from total-fuel curve");
            return Ok(FuelIndexResult {
                index,
                method: FuelIndexMethod::Total,
                wing_index: None,
                center_index: None,
            });
        }

        let wing_index = if wing_kg > 0.0 {
            self.fuel_index(FuelTank::WingTanks12, wing_kg)?
        } else {
            0
        };
        let center_index = if center_kg > 0.0 {
            self.fuel_index(FuelTank::CenterTank, center_kg)?
        } else {
            0
        };
        debug!(total_kg, wing_index, center_index, "fuel index from split tanks");
        Ok(FuelIndexResult {
            index: wing_index + center_index,
            method: FuelIndexMethod::Split,
            wing_index: Some(wing_index),
            center_index: Some(center_index),
        })
    }

    /// Index of every zone, with passenger weight at `adult_weight_kg` each.
    pub fn all_passenger_indices(
        &self,
        passengers: &BTreeMap<Zone, i32>,
        table_set: &str,
        adult_weight_kg: f64,
    ) -> CalcResult<BTreeMap<Zone, ZoneIndex>> {
        Zone::ALL
            .iter()
            .map(|&zone| {
                let pax = passengers.get(&zone).copied().unwrap_or(0);
                let index = self.passenger_index(zone, pax, table_set)?;
                let weight = f64::from(pax) * adult_weight_kg;
                Ok((zone, ZoneIndex { pax, weight, index }))
            })
            .collect()
    }

    /// Index of every hold.
    pub fn all_cargo_indices(&self, cargo: &BTreeMap<Hold, f64>) -> CalcResult<BTreeMap<Hold, HoldIndex>> {
        Hold::ALL
            .iter()
            .map(|&hold| {
                let weight = cargo.get(&hold).copied().unwrap_or(0.0);
                let index = self.cargo_index(hold, weight)?;
                Ok((hold, HoldIndex { weight, index }))
            })
            .collect()
    }
}

/// Passenger index from the built-in tables.
pub fn get_passenger_index(zone: Zone, pax: i32, table_set: &str) -> CalcResult<i32> {
    reference::builtin()?.passenger_index(zone, pax, table_set)
}

/// Cargo index from the built-in tables.
pub fn get_cargo_index(hold: Hold, weight_kg: f64) -> CalcResult<i32> {
    reference::builtin()?.cargo_index(hold, weight_kg)
}

/// Fuel index from the built-in tables.
pub fn get_fuel_index(tank: FuelTank, weight_kg: f64) -> CalcResult<i32> {
    reference::builtin()?.fuel_index(tank, weight_kg)
}

/// Fuel index for a whole fuel load from the built-in tables.
pub fn calculate_fuel_index(total_kg: f64, wing_kg: f64, center_kg: f64) -> CalcResult<FuelIndexResult> {
    reference::builtin()?.total_fuel_index(total_kg, wing_kg, center_kg)
}

/// Per-zone indices from the built-in tables.
pub fn get_all_passenger_indices(
    passengers: &BTreeMap<Zone, i32>,
    table_set: &str,
    adult_weight_kg: f64,
) -> CalcResult<BTreeMap<Zone, ZoneIndex>> {
    reference::builtin()?.all_passenger_indices(passengers, table_set, adult_weight_kg)
}

/// Per-hold indices from the built-in tables.
pub fn get_all_cargo_indices(cargo: &BTreeMap<Hold, f64>) -> CalcResult<BTreeMap<Hold, HoldIndex>> {
    reference::builtin()?.all_cargo_indices(cargo)
}
