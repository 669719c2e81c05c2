//! Stabilizer trim grid, flap/thrust trim corrections and CG envelopes
//! (737-800).
//!
//! The trim grid maps (takeoff index, takeoff weight) to base trim units.
//! Calibration reference: TOI 53 at TOW 62,072 kg reads about 5.2 units.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{check_strictly_increasing, interpolate_clamped};
use crate::aircraft::{Flaps, Thrust};
use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Trim grid
// ============================================================================

/// One `{toi, trim}` point of a grid row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimPoint {
    pub toi: f64,
    pub trim: f64,
}

/// All trim points for one takeoff weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrimRow {
    pub tow: f64,
    pub points: Vec<TrimPoint>,
}

impl TrimRow {
    /// Trim for `toi` along this row, clamped to the row's end points.
    /// `None` for a non-finite `toi`.
    pub fn trim_at(&self, toi: f64) -> Option<f64> {
        interpolate_clamped(&self.points, toi, |p| p.toi, |p| p.trim)
    }
}

/// Two-dimensional trim grid, strictly increasing on both axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TrimRow>", into = "Vec<TrimRow>")]
pub struct TrimTable {
    rows: Vec<TrimRow>,
}

impl TryFrom<Vec<TrimRow>> for TrimTable {
    type Error = CalcError;

    fn try_from(rows: Vec<TrimRow>) -> Result<Self, Self::Error> {
        TrimTable::new(rows)
    }
}

impl From<TrimTable> for Vec<TrimRow> {
    fn from(table: TrimTable) -> Self {
        table.rows
    }
}

impl TrimTable {
    pub fn new(rows: Vec<TrimRow>) -> CalcResult<Self> {
        check_strictly_increasing("trim", "tow", rows.iter().map(|r| r.tow))?;
        for row in &rows {
            let name = format!("trim row {}", row.tow);
            check_strictly_increasing(&name, "toi", row.points.iter().map(|p| p.toi))?;
        }
        Ok(TrimTable { rows })
    }

    pub fn rows(&self) -> &[TrimRow] {
        &self.rows
    }
}

const TRIM_TOI_AXIS: [f64; 7] = [20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0];

const TRIM_GRID: &[(f64, [f64; 7])] = &[
    (45_000.0, [3.8, 4.5, 5.2, 5.9, 6.6, 7.3, 8.0]),
    (50_000.0, [3.5, 4.2, 4.9, 5.6, 6.3, 7.0, 7.7]),
    (55_000.0, [3.2, 3.9, 4.6, 5.3, 6.0, 6.7, 7.4]),
    (60_000.0, [3.0, 3.7, 4.4, 5.1, 5.8, 6.5, 7.2]),
    (65_000.0, [2.7, 3.4, 4.1, 4.8, 5.5, 6.2, 6.9]),
    (70_000.0, [2.5, 3.2, 3.9, 4.6, 5.3, 6.0, 6.7]),
    (75_000.0, [2.2, 2.9, 3.6, 4.3, 5.0, 5.7, 6.4]),
    (80_000.0, [2.0, 2.7, 3.4, 4.1, 4.8, 5.5, 6.2]),
];

/// Construct the built-in 737-800 trim grid.
pub fn builtin_trim_table() -> CalcResult<TrimTable> {
    let rows = TRIM_GRID
        .iter()
        .map(|(tow, trims)| TrimRow {
            tow: *tow,
            points: TRIM_TOI_AXIS
                .iter()
                .zip(trims)
                .map(|(&toi, &trim)| TrimPoint { toi, trim })
                .collect(),
        })
        .collect();
    TrimTable::new(rows)
}

// ============================================================================
// Trim corrections
// ============================================================================

/// Additive trim correction by flap setting and thrust rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrimCorrections(pub BTreeMap<Flaps, BTreeMap<Thrust, f64>>);

impl TrimCorrections {
    /// Correction in trim units; 0 when either key is absent.
    pub fn correction(&self, flaps: Flaps, thrust: Thrust) -> f64 {
        self.0
            .get(&flaps)
            .and_then(|by_thrust| by_thrust.get(&thrust))
            .copied()
            .unwrap_or(0.0)
    }
}

/// Construct the built-in 737-800 trim corrections.
pub fn builtin_trim_corrections() -> TrimCorrections {
    TrimCorrections(BTreeMap::from([
        (
            Flaps::F5,
            BTreeMap::from([(Thrust::K26, 0.0), (Thrust::K24, 0.3), (Thrust::K22, 0.5)]),
        ),
        (
            Flaps::F15,
            BTreeMap::from([(Thrust::K26, -0.8), (Thrust::K24, -0.5), (Thrust::K22, -0.3)]),
        ),
    ]))
}

// ============================================================================
// CG envelopes
// ============================================================================

/// Load phase an envelope applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPhase {
    ZeroFuel,
    Takeoff,
}

impl LoadPhase {
    pub fn code(&self) -> &'static str {
        match self {
            LoadPhase::ZeroFuel => "ZFW",
            LoadPhase::Takeoff => "TOW",
        }
    }
}

impl fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Forward and aft %MAC limits at one weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopePoint {
    pub weight: f64,
    pub forward: f64,
    pub aft: f64,
}

/// CG limits by weight, strictly increasing in weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<EnvelopePoint>", into = "Vec<EnvelopePoint>")]
pub struct CgEnvelope {
    points: Vec<EnvelopePoint>,
}

impl TryFrom<Vec<EnvelopePoint>> for CgEnvelope {
    type Error = CalcError;

    fn try_from(points: Vec<EnvelopePoint>) -> Result<Self, Self::Error> {
        CgEnvelope::new(points)
    }
}

impl From<CgEnvelope> for Vec<EnvelopePoint> {
    fn from(envelope: CgEnvelope) -> Self {
        envelope.points
    }
}

impl CgEnvelope {
    pub fn new(points: Vec<EnvelopePoint>) -> CalcResult<Self> {
        check_strictly_increasing("cg envelope", "weight", points.iter().map(|p| p.weight))?;
        if let Some(p) = points.iter().find(|p| p.forward >= p.aft) {
            return Err(CalcError::invalid_table(
                "cg envelope",
                format!("forward limit {} not ahead of aft limit {} at {} kg", p.forward, p.aft, p.weight),
            ));
        }
        Ok(CgEnvelope { points })
    }

    fn from_triples(triples: &[(f64, f64, f64)]) -> CalcResult<Self> {
        CgEnvelope::new(
            triples
                .iter()
                .map(|&(weight, forward, aft)| EnvelopePoint { weight, forward, aft })
                .collect(),
        )
    }

    pub fn points(&self) -> &[EnvelopePoint] {
        &self.points
    }

    /// `(forward, aft)` %MAC limits at `weight`; boundary anchors apply
    /// outside the data range.
    pub fn limits_at(&self, weight: f64) -> CalcResult<(f64, f64)> {
        if !weight.is_finite() {
            return Err(CalcError::invalid_input(
                "weight",
                weight.to_string(),
                "Envelope weight must be finite",
            ));
        }
        let forward = interpolate_clamped(&self.points, weight, |p| p.weight, |p| p.forward);
        let aft = interpolate_clamped(&self.points, weight, |p| p.weight, |p| p.aft);
        match (forward, aft) {
            (Some(forward), Some(aft)) => Ok((forward, aft)),
            _ => Err(CalcError::invalid_table("cg envelope", "table has no points")),
        }
    }
}

/// Envelope per load phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CgEnvelopes {
    pub zero_fuel: CgEnvelope,
    pub takeoff: CgEnvelope,
}

impl CgEnvelopes {
    pub fn for_phase(&self, phase: LoadPhase) -> &CgEnvelope {
        match phase {
            LoadPhase::ZeroFuel => &self.zero_fuel,
            LoadPhase::Takeoff => &self.takeoff,
        }
    }
}

const ZFW_ENVELOPE: &[(f64, f64, f64)] = &[
    (38_000.0, 14.0, 33.0),
    (42_000.0, 14.0, 33.0),
    (46_000.0, 14.0, 33.0),
    (50_000.0, 14.0, 33.0),
    (54_000.0, 14.5, 33.0),
    (58_000.0, 15.0, 33.0),
    (62_000.0, 15.5, 32.5),
    (63_000.0, 16.0, 32.0),
];

const TOW_ENVELOPE: &[(f64, f64, f64)] = &[
    (42_000.0, 14.0, 33.0),
    (46_000.0, 14.0, 33.0),
    (50_000.0, 14.0, 33.0),
    (54_000.0, 14.0, 33.0),
    (58_000.0, 14.0, 33.0),
    (62_000.0, 14.5, 33.0),
    (66_000.0, 15.0, 33.0),
    (70_000.0, 15.5, 32.5),
    (74_000.0, 16.0, 32.0),
    (78_000.0, 16.5, 31.5),
    (80_000.0, 17.0, 31.0),
];

/// Construct the built-in 737-800 CG envelopes.
pub fn builtin_envelopes() -> CalcResult<CgEnvelopes> {
    Ok(CgEnvelopes {
        zero_fuel: CgEnvelope::from_triples(ZFW_ENVELOPE)?,
        takeoff: CgEnvelope::from_triples(TOW_ENVELOPE)?,
    })
}
