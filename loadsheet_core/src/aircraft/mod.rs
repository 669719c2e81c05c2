//! # Aircraft Variants
//!
//! Airframe/cabin configurations and the identifiers shared by every table:
//! cabin zones, cargo holds, takeoff flap and thrust selections.
//!
//! Variants are immutable reference data. The built-in catalog lives in
//! [`catalog`] and is served through [`crate::reference`].
//!
//! ## Example
//!
//! ```rust
//! use loadsheet_core::aircraft::{Zone, Hold, Thrust};
//!
//! assert_eq!(Zone::from_str_flexible("oc").unwrap(), Zone::OC);
//! assert_eq!(Hold::from_str_flexible("3").unwrap(), Hold::Hold3);
//! assert_eq!(Thrust::from_str_flexible("24k").unwrap(), Thrust::K24);
//! assert!(Zone::from_str_flexible("OE").is_err());
//! ```

pub mod catalog;

pub use catalog::{builtin_variants, SeriesOption, SERIES_OPTIONS};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Passenger cabin zone, front to back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Zone {
    OA,
    OB,
    OC,
    OD,
}

impl Zone {
    /// All zones in cabin order
    pub const ALL: [Zone; 4] = [Zone::OA, Zone::OB, Zone::OC, Zone::OD];

    /// Loadsheet code ("OA".."OD")
    pub fn code(&self) -> &'static str {
        match self {
            Zone::OA => "OA",
            Zone::OB => "OB",
            Zone::OC => "OC",
            Zone::OD => "OD",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().replace(['-', '_', ' '], "").as_str() {
            "OA" | "ZONEOA" => Ok(Zone::OA),
            "OB" | "ZONEOB" => Ok(Zone::OB),
            "OC" | "ZONEOC" => Ok(Zone::OC),
            "OD" | "ZONEOD" => Ok(Zone::OD),
            _ => Err(CalcError::unknown_zone(s)),
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Zone {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Zone::from_str_flexible(s)
    }
}

/// Lower-deck cargo hold, front to back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Hold {
    Hold1,
    Hold2,
    Hold3,
    Hold4,
}

impl Hold {
    /// All holds in fuselage order
    pub const ALL: [Hold; 4] = [Hold::Hold1, Hold::Hold2, Hold::Hold3, Hold::Hold4];

    /// Loadsheet code ("HOLD1".."HOLD4")
    pub fn code(&self) -> &'static str {
        match self {
            Hold::Hold1 => "HOLD1",
            Hold::Hold2 => "HOLD2",
            Hold::Hold3 => "HOLD3",
            Hold::Hold4 => "HOLD4",
        }
    }

    /// Structural floor limit of the hold in kg
    pub fn structural_limit_kg(&self) -> f64 {
        match self {
            Hold::Hold1 => 888.0,
            Hold::Hold2 => 2670.0,
            Hold::Hold3 => 3157.0,
            Hold::Hold4 => 474.0,
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().replace(['-', '_', ' '], "").as_str() {
            "HOLD1" | "H1" | "1" => Ok(Hold::Hold1),
            "HOLD2" | "H2" | "2" => Ok(Hold::Hold2),
            "HOLD3" | "H3" | "3" => Ok(Hold::Hold3),
            "HOLD4" | "H4" | "4" => Ok(Hold::Hold4),
            _ => Err(CalcError::unknown_hold(s)),
        }
    }
}

impl fmt::Display for Hold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Hold {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hold::from_str_flexible(s)
    }
}

/// Takeoff flap setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Flaps {
    #[default]
    F5,
    F15,
}

impl Flaps {
    /// All flap settings for UI selection
    pub const ALL: [Flaps; 2] = [Flaps::F5, Flaps::F15];

    /// Display code ("F5", "F15")
    pub fn code(&self) -> &'static str {
        match self {
            Flaps::F5 => "F5",
            Flaps::F15 => "F15",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().replace(' ', "").as_str() {
            "F5" | "5" | "FLAPS5" => Ok(Flaps::F5),
            "F15" | "15" | "FLAPS15" => Ok(Flaps::F15),
            _ => Err(CalcError::invalid_input("flaps", s, "Expected F5 or F15")),
        }
    }
}

impl fmt::Display for Flaps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Engine takeoff thrust rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Thrust {
    #[serde(rename = "26K")]
    K26,
    #[serde(rename = "24K")]
    K24,
    #[serde(rename = "22K")]
    K22,
    /// Rating is not selected by the crew (LEAP-1B)
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl Thrust {
    /// Display code ("26K", "24K", "22K", "N/A")
    pub fn code(&self) -> &'static str {
        match self {
            Thrust::K26 => "26K",
            Thrust::K24 => "24K",
            Thrust::K22 => "22K",
            Thrust::NotApplicable => "N/A",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().replace(' ', "").as_str() {
            "26K" | "26" => Ok(Thrust::K26),
            "24K" | "24" => Ok(Thrust::K24),
            "22K" | "22" => Ok(Thrust::K22),
            "N/A" | "NA" => Ok(Thrust::NotApplicable),
            _ => Err(CalcError::invalid_input("thrust", s, "Expected 26K, 24K, 22K or N/A")),
        }
    }
}

impl fmt::Display for Thrust {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Takeoff configuration selected by the crew
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TakeoffConfig {
    pub flaps: Flaps,
    pub thrust: Thrust,
}

impl TakeoffConfig {
    pub fn new(flaps: Flaps, thrust: Thrust) -> Self {
        TakeoffConfig { flaps, thrust }
    }
}

/// Airframe type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AirframeType {
    #[serde(rename = "737-800")]
    B737_800,
    #[serde(rename = "737-MAX-8")]
    B737Max8,
}

impl AirframeType {
    /// Stabilizer trim is computed by the flight management computer, not
    /// read from the loadsheet trim table.
    pub fn uses_automatic_trim(&self) -> bool {
        matches!(self, AirframeType::B737Max8)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AirframeType::B737_800 => "737-800",
            AirframeType::B737Max8 => "737-MAX-8",
        }
    }
}

impl fmt::Display for AirframeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Fleet series (registration block)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Series {
    MS,
    MX,
    ML,
    FF,
    #[serde(rename = "MAX-8")]
    Max8,
}

impl Series {
    pub const ALL: [Series; 5] = [Series::MS, Series::MX, Series::ML, Series::FF, Series::Max8];

    pub fn code(&self) -> &'static str {
        match self {
            Series::MS => "MS",
            Series::MX => "MX",
            Series::ML => "ML",
            Series::FF => "FF",
            Series::Max8 => "MAX-8",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().replace(['_', ' '], "-").as_str() {
            "MS" => Ok(Series::MS),
            "MX" | "MLM" => Ok(Series::MX),
            "ML" => Ok(Series::ML),
            "FF" => Ok(Series::FF),
            "MAX-8" | "MAX8" | "73M8" => Ok(Series::Max8),
            _ => Err(CalcError::invalid_input("series", s, "Unknown fleet series")),
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Cabin class of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CabinClass {
    Business,
    Economy,
}

/// Seat rows, class and capacity of one cabin zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneConfig {
    pub first_row: u32,
    pub last_row: u32,
    pub cabin_class: CabinClass,
    pub max_pax: u32,
}

impl ZoneConfig {
    pub fn new(first_row: u32, last_row: u32, cabin_class: CabinClass, max_pax: u32) -> Self {
        ZoneConfig {
            first_row,
            last_row,
            cabin_class,
            max_pax,
        }
    }

    /// Row range as printed on the loadsheet, e.g. "5-12"
    pub fn rows(&self) -> String {
        format!("{}-{}", self.first_row, self.last_row)
    }
}

/// Certified structural weight limits in kg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightLimits {
    /// Maximum takeoff weight
    pub mtow: f64,
    /// Maximum taxi weight
    pub mtxw: Option<f64>,
    /// Maximum landing weight
    pub mlw: f64,
    /// Maximum zero fuel weight
    pub mzfw: f64,
}

/// A specific airframe/cabin configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftVariant {
    /// Catalog identifier, e.g. "738-MS-16BC"
    pub id: String,
    pub display_name: String,
    pub airframe: AirframeType,
    pub series: Series,
    /// Registration mask, e.g. "9M-MS*"
    pub registration: Option<String>,
    /// Cabin configuration, e.g. "16BC/144EY"
    pub config: String,
    pub powerplant: String,
    pub available_thrust: Vec<Thrust>,
    pub weights: WeightLimits,
    pub zones: BTreeMap<Zone, ZoneConfig>,
    pub total_seats: u32,
    /// Passenger index table set used by this cabin layout
    pub index_table_set: String,
    pub notes: Option<String>,
}

impl AircraftVariant {
    /// Zone layout, failing with `UnknownZone` if the cabin lacks it.
    pub fn zone(&self, zone: Zone) -> CalcResult<&ZoneConfig> {
        self.zones
            .get(&zone)
            .ok_or_else(|| CalcError::unknown_zone(format!("{} ({})", zone, self.id)))
    }

    /// Zone capacity, failing with `UnknownZone` if the cabin lacks it.
    pub fn max_pax(&self, zone: Zone) -> CalcResult<u32> {
        self.zone(zone).map(|z| z.max_pax)
    }

    /// True when the FMC computes stabilizer trim for this variant
    pub fn uses_automatic_trim(&self) -> bool {
        self.airframe.uses_automatic_trim()
    }

    /// Whether the crew may select this thrust rating
    pub fn supports_thrust(&self, thrust: Thrust) -> bool {
        self.available_thrust.contains(&thrust)
    }
}
