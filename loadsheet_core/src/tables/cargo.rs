//! Cargo index table (common to all 737-800 cabin layouts).
//!
//! Each hold's domain ends at its structural floor limit, so a weight the
//! table cannot resolve is also a weight the hold cannot carry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::RangeTable;
use crate::aircraft::Hold;
use crate::errors::{CalcError, CalcResult};

/// Per-hold range tables keyed by hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoIndexTable {
    pub holds: BTreeMap<Hold, RangeTable>,
}

impl CargoIndexTable {
    /// Hold sub-table, failing with `UnknownHold` when absent.
    pub fn hold_table(&self, hold: Hold) -> CalcResult<&RangeTable> {
        self.holds
            .get(&hold)
            .ok_or_else(|| CalcError::unknown_hold(hold.code()))
    }

    /// Cargo index for `weight_kg` in `hold`.
    ///
    /// Weights are resolved to the nearest whole kilogram, the resolution of
    /// the printed table. Zero short-circuits to index 0.
    pub fn index_for(&self, hold: Hold, weight_kg: f64) -> CalcResult<i32> {
        if weight_kg == 0.0 {
            return Ok(0);
        }
        let table = self.hold_table(hold)?;
        let whole_kg = weight_kg.round();
        if !whole_kg.is_finite() {
            return Err(CalcError::out_of_range("Cargo weight", format!("{} kg", weight_kg), hold.code()));
        }
        table
            .lookup(whole_kg as i64)
            .ok_or_else(|| CalcError::out_of_range("Cargo weight", format!("{} kg", weight_kg), hold.code()))
    }
}

const HOLD1: &[(u32, u32, i32)] = &[
    (1, 47, 0), (48, 141, -1), (142, 236, -2), (237, 330, -3), (331, 425, -4),
    (426, 519, -5), (520, 613, -6), (614, 708, -7), (709, 802, -8), (803, 888, -9),
];

const HOLD2: &[(u32, u32, i32)] = &[
    (1, 76, 0), (77, 230, -1), (231, 384, -2), (385, 538, -3), (539, 692, -4),
    (693, 846, -5), (847, 1000, -6), (1001, 1154, -7), (1155, 1308, -8), (1309, 1462, -9),
    (1463, 1616, -10), (1617, 1769, -11), (1770, 1923, -12), (1924, 2077, -13),
    (2078, 2231, -14), (2232, 2385, -15), (2386, 2539, -16), (2540, 2670, -17),
];

const HOLD3: &[(u32, u32, i32)] = &[
    (1, 95, 0), (96, 287, 1), (288, 478, 2), (479, 670, 3), (671, 861, 4),
    (862, 1053, 5), (1054, 1244, 6), (1245, 1436, 7), (1437, 1627, 8), (1628, 1819, 9),
    (1820, 2010, 10), (2011, 2202, 11), (2203, 2393, 12), (2394, 2584, 13),
    (2585, 2776, 14), (2777, 2967, 15), (2968, 3157, 16),
];

const HOLD4: &[(u32, u32, i32)] = &[
    (1, 47, 1), (48, 143, 2), (144, 238, 3), (239, 333, 4), (334, 429, 5), (430, 474, 6),
];

/// Construct the built-in 737-800 cargo table.
pub fn builtin_table() -> CalcResult<CargoIndexTable> {
    let mut holds = BTreeMap::new();
    for (hold, triples) in [
        (Hold::Hold1, HOLD1),
        (Hold::Hold2, HOLD2),
        (Hold::Hold3, HOLD3),
        (Hold::Hold4, HOLD4),
    ] {
        holds.insert(hold, RangeTable::from_triples(format!("cargo {}", hold), triples)?);
    }
    Ok(CargoIndexTable { holds })
}
