//! Passenger index tables by cabin configuration.
//!
//! One [`PassengerTableSet`] per cabin layout, holding a range table for
//! each of the four zones. Forward zones (OA, OB) carry negative indices,
//! aft zones (OC, OD) positive ones.
//!
//! The FF-series 16BC/150EY set is composed from 16BC/144EY at construction
//! time: all rows copied, with one extra OC row covering 49-54 passengers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{RangeRow, RangeTable};
use crate::aircraft::Zone;
use crate::errors::{CalcError, CalcResult};

pub const SET_16BC_144EY: &str = "738-16BC-144EY";
pub const SET_12BC_162EY: &str = "738-12BC-162EY";
pub const SET_16BC_150EY: &str = "738-16BC-150EY";
pub const SET_MAX_8: &str = "737-max-8";

/// Named bundle of zone tables for one cabin layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerTableSet {
    pub id: String,
    pub zones: BTreeMap<Zone, RangeTable>,
}

impl PassengerTableSet {
    pub fn new(id: impl Into<String>, zones: BTreeMap<Zone, RangeTable>) -> Self {
        PassengerTableSet { id: id.into(), zones }
    }

    /// Zone sub-table, failing with `UnknownZone` when absent.
    pub fn zone_table(&self, zone: Zone) -> CalcResult<&RangeTable> {
        self.zones
            .get(&zone)
            .ok_or_else(|| CalcError::unknown_zone(format!("{} (table set {})", zone, self.id)))
    }

    /// Passenger index for `pax` passengers seated in `zone`.
    ///
    /// Zero passengers short-circuit to index 0 without touching the table.
    pub fn index_for(&self, zone: Zone, pax: i32) -> CalcResult<i32> {
        if pax == 0 {
            return Ok(0);
        }
        let table = self.zone_table(zone)?;
        table.lookup(i64::from(pax)).ok_or_else(|| {
            CalcError::out_of_range("Passenger count", pax.to_string(), format!("zone {}", zone))
        })
    }

    /// Copy of `self` under a new id with `extra` rows appended to `zone`.
    pub fn extended(&self, id: impl Into<String>, zone: Zone, extra: &[RangeRow]) -> CalcResult<Self> {
        let id = id.into();
        let mut zones = self.zones.clone();
        let base = self.zone_table(zone)?;
        let widened = base.extended(format!("{} {}", id, zone), extra)?;
        zones.insert(zone, widened);
        Ok(PassengerTableSet { id, zones })
    }

    /// Same rows registered under another id.
    pub fn aliased(&self, id: impl Into<String>) -> Self {
        PassengerTableSet {
            id: id.into(),
            zones: self.zones.clone(),
        }
    }
}

fn build_set(id: &str, zones: [(Zone, &[(u32, u32, i32)]); 4]) -> CalcResult<PassengerTableSet> {
    let mut tables = BTreeMap::new();
    for (zone, triples) in zones {
        tables.insert(zone, RangeTable::from_triples(format!("{} {}", id, zone), triples)?);
    }
    Ok(PassengerTableSet::new(id, tables))
}

// Rows 1-4, business, max 16
const OA_16BC: &[(u32, u32, i32)] = &[
    (1, 2, -1), (3, 3, -2), (4, 4, -3), (5, 6, -4), (7, 7, -5), (8, 8, -6),
    (9, 10, -7), (11, 11, -8), (12, 12, -9), (13, 14, -10), (15, 15, -11), (16, 16, -12),
];

// Rows 5-12, economy, max 48
const OB_16BC: &[(u32, u32, i32)] = &[
    (1, 1, 0), (2, 4, -1), (5, 7, -2), (8, 10, -3), (11, 13, -4), (14, 16, -5),
    (17, 19, -6), (20, 23, -7), (24, 26, -8), (27, 29, -9), (30, 32, -10), (33, 35, -11),
    (36, 38, -12), (39, 41, -13), (42, 44, -14), (45, 47, -15), (48, 48, -16),
];

// Rows 14-21, economy, max 48
const OC_16BC: &[(u32, u32, i32)] = &[
    (1, 2, 0), (3, 8, 1), (9, 14, 2), (15, 20, 3), (21, 26, 4), (27, 32, 5),
    (33, 38, 6), (39, 44, 7), (45, 48, 8),
];

// Rows 22-29, economy, max 48
const OD_16BC: &[(u32, u32, i32)] = &[
    (1, 2, 1), (3, 4, 2), (5, 5, 3), (6, 7, 4), (8, 8, 5), (9, 10, 6),
    (11, 12, 7), (13, 13, 8), (14, 15, 9), (16, 16, 10), (17, 18, 11), (19, 20, 12),
    (21, 21, 13), (22, 23, 14), (24, 25, 15), (26, 26, 16), (27, 28, 17), (29, 29, 18),
    (30, 31, 19), (32, 33, 20), (34, 34, 21), (35, 36, 22), (37, 37, 23), (38, 39, 24),
    (40, 41, 25), (42, 42, 26), (43, 44, 27), (45, 46, 28), (47, 47, 29), (48, 48, 30),
];

// Rows 1-3, business, max 12
const OA_12BC: &[(u32, u32, i32)] = &[
    (1, 2, -1), (3, 3, -2), (4, 4, -3), (5, 6, -4), (7, 7, -5), (8, 8, -6),
    (9, 10, -7), (11, 11, -8), (12, 12, -9),
];

// Rows 4-12, economy, max 54
const OB_12BC: &[(u32, u32, i32)] = &[
    (1, 1, 0), (2, 4, -1), (5, 7, -2), (8, 10, -3), (11, 13, -4), (14, 16, -5),
    (17, 19, -6), (20, 23, -7), (24, 26, -8), (27, 29, -9), (30, 32, -10), (33, 35, -11),
    (36, 38, -12), (39, 41, -13), (42, 44, -14), (45, 47, -15), (48, 50, -16), (51, 53, -17),
    (54, 54, -18),
];

// Rows 14-22, economy, max 54
const OC_12BC: &[(u32, u32, i32)] = &[
    (1, 2, 0), (3, 8, 1), (9, 14, 2), (15, 20, 3), (21, 26, 4), (27, 32, 5),
    (33, 38, 6), (39, 44, 7), (45, 50, 8), (51, 54, 9),
];

// Rows 23-31, economy, max 54
const OD_12BC: &[(u32, u32, i32)] = &[
    (1, 2, 1), (3, 4, 2), (5, 5, 3), (6, 7, 4), (8, 8, 5), (9, 10, 6),
    (11, 12, 7), (13, 13, 8), (14, 15, 9), (16, 16, 10), (17, 18, 11), (19, 20, 12),
    (21, 21, 13), (22, 23, 14), (24, 25, 15), (26, 26, 16), (27, 28, 17), (29, 29, 18),
    (30, 31, 19), (32, 33, 20), (34, 34, 21), (35, 36, 22), (37, 37, 23), (38, 39, 24),
    (40, 41, 25), (42, 42, 26), (43, 44, 27), (45, 46, 28), (47, 47, 29), (48, 48, 30),
    (49, 50, 31), (51, 52, 32), (53, 53, 33), (54, 54, 34),
];

// FF-series: OC seats 54 instead of 48
const OC_150EY_EXTENSION: &[RangeRow] = &[RangeRow { min: 49, max: 54, index: 9 }];

/// Construct every built-in passenger table set.
pub fn builtin_sets() -> CalcResult<Vec<PassengerTableSet>> {
    let set_16bc = build_set(
        SET_16BC_144EY,
        [(Zone::OA, OA_16BC), (Zone::OB, OB_16BC), (Zone::OC, OC_16BC), (Zone::OD, OD_16BC)],
    )?;
    let set_12bc = build_set(
        SET_12BC_162EY,
        [(Zone::OA, OA_12BC), (Zone::OB, OB_12BC), (Zone::OC, OC_12BC), (Zone::OD, OD_12BC)],
    )?;
    let set_150ey = set_16bc.extended(SET_16BC_150EY, Zone::OC, OC_150EY_EXTENSION)?;
    let set_max8 = set_12bc.aliased(SET_MAX_8);

    Ok(vec![set_16bc, set_12bc, set_150ey, set_max8])
}
