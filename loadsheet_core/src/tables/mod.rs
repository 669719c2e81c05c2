//! # Index Tables
//!
//! Immutable lookup tables from the performance manual, in two shapes:
//!
//! - **Range tables** ([`RangeTable`]): ordered `[min, max] -> index` rows that
//!   cover `1..=max` without gaps or overlaps. Used for passenger zones and
//!   cargo holds.
//! - **Anchor tables** ([`AnchorTable`], [`trim::TrimTable`],
//!   [`trim::CgEnvelope`]): discrete points, strictly increasing along their
//!   key, read with clamp-at-boundary / linear-between-anchors interpolation.
//!
//! Every constructor validates its invariants and returns
//! `CalcError::InvalidTable` on violation; tables deserialized from JSON go
//! through the same checks via `#[serde(try_from = ...)]`.
//!
//! ## Example
//!
//! ```rust
//! use loadsheet_core::tables::RangeTable;
//!
//! let table = RangeTable::from_triples("demo", &[(1, 2, -1), (3, 5, -2)]).unwrap();
//! assert_eq!(table.lookup(4), Some(-2));
//! assert_eq!(table.lookup(6), None);
//!
//! // Gaps are rejected at construction time
//! assert!(RangeTable::from_triples("bad", &[(1, 2, 0), (4, 5, 1)]).is_err());
//! ```

pub mod cargo;
pub mod fuel;
pub mod passenger;
pub mod trim;

pub use cargo::CargoIndexTable;
pub use fuel::{FuelIndexTable, FuelTank};
pub use passenger::PassengerTableSet;
pub use trim::{CgEnvelope, CgEnvelopes, EnvelopePoint, LoadPhase, TrimCorrections, TrimPoint, TrimRow, TrimTable};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Range tables
// ============================================================================

/// One `[min, max] -> index` row, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeRow {
    pub min: u32,
    pub max: u32,
    pub index: i32,
}

impl RangeRow {
    pub fn new(min: u32, max: u32, index: i32) -> Self {
        RangeRow { min, max, index }
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= i64::from(self.min) && value <= i64::from(self.max)
    }
}

#[derive(Deserialize)]
struct RawRangeTable {
    name: String,
    rows: Vec<RangeRow>,
}

/// Contiguous, exhaustive range table over `1..=max_value()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRangeTable")]
pub struct RangeTable {
    name: String,
    rows: Vec<RangeRow>,
}

impl TryFrom<RawRangeTable> for RangeTable {
    type Error = CalcError;

    fn try_from(raw: RawRangeTable) -> Result<Self, Self::Error> {
        RangeTable::new(raw.name, raw.rows)
    }
}

impl RangeTable {
    /// Build and validate a range table.
    ///
    /// Rows must be non-empty, start at 1, and each row must begin exactly
    /// one past the previous row's end.
    pub fn new(name: impl Into<String>, rows: Vec<RangeRow>) -> CalcResult<Self> {
        let name = name.into();
        let first = rows
            .first()
            .ok_or_else(|| CalcError::invalid_table(&name, "table has no rows"))?;
        if first.min != 1 {
            return Err(CalcError::invalid_table(
                &name,
                format!("first range starts at {}, expected 1", first.min),
            ));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.min > row.max {
                return Err(CalcError::invalid_table(
                    &name,
                    format!("row {} has min {} above max {}", i, row.min, row.max),
                ));
            }
            if let Some(next) = rows.get(i + 1) {
                if row.max.checked_add(1) != Some(next.min) {
                    let kind = if next.min <= row.max { "overlap" } else { "gap" };
                    return Err(CalcError::invalid_table(
                        &name,
                        format!("{} between [{}, {}] and [{}, {}]", kind, row.min, row.max, next.min, next.max),
                    ));
                }
            }
        }
        Ok(RangeTable { name, rows })
    }

    /// Build from `(min, max, index)` triples.
    pub fn from_triples(name: impl Into<String>, triples: &[(u32, u32, i32)]) -> CalcResult<Self> {
        let rows = triples
            .iter()
            .map(|&(min, max, index)| RangeRow::new(min, max, index))
            .collect();
        RangeTable::new(name, rows)
    }

    /// Copy this table's rows, append `extra`, and validate the result.
    pub fn extended(&self, name: impl Into<String>, extra: &[RangeRow]) -> CalcResult<Self> {
        let mut rows = self.rows.clone();
        rows.extend_from_slice(extra);
        RangeTable::new(name, rows)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[RangeRow] {
        &self.rows
    }

    /// Upper bound of the covered domain
    pub fn max_value(&self) -> u32 {
        self.rows.last().map_or(0, |r| r.max)
    }

    /// Index of the row whose range contains `value`.
    ///
    /// Rows are ordered and non-overlapping, so the first row whose upper
    /// bound reaches `value` is the only candidate.
    pub fn lookup(&self, value: i64) -> Option<i32> {
        let pos = self.rows.partition_point(|row| i64::from(row.max) < value);
        self.rows
            .get(pos)
            .filter(|row| row.contains(value))
            .map(|row| row.index)
    }
}

// ============================================================================
// Anchor tables
// ============================================================================

/// Clamp-at-boundary, linear-between-anchors interpolation.
///
/// `points` must be sorted strictly increasing by `key`. An exact key match
/// returns the stored value untouched. Returns `None` for an empty slice or a
/// non-finite `x`.
pub(crate) fn interpolate_clamped<T>(
    points: &[T],
    x: f64,
    key: impl Fn(&T) -> f64,
    value: impl Fn(&T) -> f64,
) -> Option<f64> {
    if !x.is_finite() {
        return None;
    }
    let first = points.first()?;
    let last = points.last()?;
    if x <= key(first) {
        return Some(value(first));
    }
    if x >= key(last) {
        return Some(value(last));
    }

    let upper_pos = points.partition_point(|p| key(p) < x);
    let upper = points.get(upper_pos)?;
    if key(upper) == x {
        return Some(value(upper));
    }
    let lower = points.get(upper_pos.checked_sub(1)?)?;
    let ratio = (x - key(lower)) / (key(upper) - key(lower));
    Some(value(lower) + ratio * (value(upper) - value(lower)))
}

/// Ensure `keys` is non-empty and strictly increasing.
pub(crate) fn check_strictly_increasing(
    table: &str,
    axis: &str,
    keys: impl IntoIterator<Item = f64>,
) -> CalcResult<()> {
    let mut previous: Option<f64> = None;
    for key in keys {
        if !key.is_finite() {
            return Err(CalcError::invalid_table(table, format!("non-finite {} {}", axis, key)));
        }
        if let Some(prev) = previous {
            if key <= prev {
                return Err(CalcError::invalid_table(
                    table,
                    format!("{} {} does not increase after {}", axis, key, prev),
                ));
            }
        }
        previous = Some(key);
    }
    if previous.is_none() {
        return Err(CalcError::invalid_table(table, "table has no points"));
    }
    Ok(())
}

/// One `{weight, index}` anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub weight: f64,
    pub index: i32,
}

#[derive(Deserialize)]
struct RawAnchorTable {
    name: String,
    points: Vec<AnchorPoint>,
}

/// Discrete `{weight, index}` anchors, strictly increasing by weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAnchorTable")]
pub struct AnchorTable {
    name: String,
    points: Vec<AnchorPoint>,
}

impl TryFrom<RawAnchorTable> for AnchorTable {
    type Error = CalcError;

    fn try_from(raw: RawAnchorTable) -> Result<Self, Self::Error> {
        AnchorTable::new(raw.name, raw.points)
    }
}

impl AnchorTable {
    pub fn new(name: impl Into<String>, points: Vec<AnchorPoint>) -> CalcResult<Self> {
        let name = name.into();
        check_strictly_increasing(&name, "weight", points.iter().map(|p| p.weight))?;
        Ok(AnchorTable { name, points })
    }

    /// Build from `(weight, index)` pairs.
    pub fn from_pairs(name: impl Into<String>, pairs: &[(f64, i32)]) -> CalcResult<Self> {
        let points = pairs
            .iter()
            .map(|&(weight, index)| AnchorPoint { weight, index })
            .collect();
        AnchorTable::new(name, points)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[AnchorPoint] {
        &self.points
    }

    /// Index at `weight`: the stored index on an exact anchor, the boundary
    /// index outside the table, otherwise the interpolated value rounded to
    /// a whole index unit (ties away from zero).
    pub fn index_at(&self, weight: f64) -> i32 {
        if let Some(exact) = self.points.iter().find(|p| p.weight == weight) {
            return exact.index;
        }
        interpolate_clamped(&self.points, weight, |p| p.weight, |p| f64::from(p.index))
            .map_or(0, |index| index.round() as i32)
    }
}
