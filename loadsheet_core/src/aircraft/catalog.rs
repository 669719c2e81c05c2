//! Built-in fleet catalog (737-800 and 737 MAX 8).
//!
//! All weights in kg. Zone layouts come in two cabin families:
//! 16 business seats (rows 1-4) or 12 business seats (rows 1-3).

use std::collections::BTreeMap;

use serde::Serialize;

use super::{
    AircraftVariant, AirframeType, CabinClass, Series, Thrust, WeightLimits, Zone, ZoneConfig,
};

/// Fleet series as offered for selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesOption {
    pub series: Series,
    pub label: &'static str,
    pub engine: &'static str,
}

pub const SERIES_OPTIONS: [SeriesOption; 5] = [
    SeriesOption { series: Series::MS, label: "737-800 MS-series", engine: "CFM56-24K" },
    SeriesOption { series: Series::MX, label: "737-800 MX-series & MLM onward", engine: "CFM56-26K" },
    SeriesOption { series: Series::ML, label: "737-800 ML-series (SFP)", engine: "CFM56-26K" },
    SeriesOption { series: Series::FF, label: "737-800 FF-series (SFP)", engine: "CFM56-26K" },
    SeriesOption { series: Series::Max8, label: "737 MAX 8", engine: "LEAP-1B" },
];

/// 16BC/144EY cabin; `oc_max` widens to 54 on the FF-series.
fn zones_16bc(oc_max: u32) -> BTreeMap<Zone, ZoneConfig> {
    BTreeMap::from([
        (Zone::OA, ZoneConfig::new(1, 4, CabinClass::Business, 16)),
        (Zone::OB, ZoneConfig::new(5, 12, CabinClass::Economy, 48)),
        (Zone::OC, ZoneConfig::new(14, 21, CabinClass::Economy, oc_max)),
        (Zone::OD, ZoneConfig::new(22, 29, CabinClass::Economy, 48)),
    ])
}

fn zones_12bc() -> BTreeMap<Zone, ZoneConfig> {
    BTreeMap::from([
        (Zone::OA, ZoneConfig::new(1, 3, CabinClass::Business, 12)),
        (Zone::OB, ZoneConfig::new(4, 12, CabinClass::Economy, 54)),
        (Zone::OC, ZoneConfig::new(14, 22, CabinClass::Economy, 54)),
        (Zone::OD, ZoneConfig::new(23, 31, CabinClass::Economy, 54)),
    ])
}

fn limits(mtow: f64, mtxw: f64, mlw: f64, mzfw: f64) -> WeightLimits {
    WeightLimits {
        mtow,
        mtxw: Some(mtxw),
        mlw,
        mzfw,
    }
}

struct VariantDef {
    id: &'static str,
    display_name: &'static str,
    airframe: AirframeType,
    series: Series,
    registration: Option<&'static str>,
    config: &'static str,
    powerplant: &'static str,
    thrust: &'static [Thrust],
    weights: WeightLimits,
    zones: BTreeMap<Zone, ZoneConfig>,
    total_seats: u32,
    table_set: &'static str,
    notes: Option<&'static str>,
}

impl From<VariantDef> for AircraftVariant {
    fn from(s: VariantDef) -> Self {
        AircraftVariant {
            id: s.id.to_string(),
            display_name: s.display_name.to_string(),
            airframe: s.airframe,
            series: s.series,
            registration: s.registration.map(str::to_string),
            config: s.config.to_string(),
            powerplant: s.powerplant.to_string(),
            available_thrust: s.thrust.to_vec(),
            weights: s.weights,
            zones: s.zones,
            total_seats: s.total_seats,
            index_table_set: s.table_set.to_string(),
            notes: s.notes.map(str::to_string),
        }
    }
}

const CFM_24K: &[Thrust] = &[Thrust::K24, Thrust::K22];
const CFM_26K: &[Thrust] = &[Thrust::K26, Thrust::K24, Thrust::K22];

/// Construct the built-in catalog.
pub fn builtin_variants() -> Vec<AircraftVariant> {
    let specs = vec![
        VariantDef {
            id: "738-MS-16BC",
            display_name: "737-800 MS-series (16BC/144EY)",
            airframe: AirframeType::B737_800,
            series: Series::MS,
            registration: Some("9M-MS*"),
            config: "16BC/144EY",
            powerplant: "CFM 56-24K",
            thrust: CFM_24K,
            weights: limits(77_000.0, 77_227.0, 65_317.0, 61_688.0),
            zones: zones_16bc(48),
            total_seats: 160,
            table_set: "738-16BC-144EY",
            notes: None,
        },
        VariantDef {
            id: "738-MS-12BC",
            display_name: "737-800 MS-series (12BC/162EY)",
            airframe: AirframeType::B737_800,
            series: Series::MS,
            registration: Some("9M-MS*"),
            config: "12BC/162EY",
            powerplant: "CFM 56-24K",
            thrust: CFM_24K,
            weights: limits(77_000.0, 77_227.0, 66_360.0, 62_731.0),
            zones: zones_12bc(),
            total_seats: 174,
            table_set: "738-12BC-162EY",
            notes: None,
        },
        VariantDef {
            id: "738-MX-16BC",
            display_name: "737-800 MX-series (16BC/144EY)",
            airframe: AirframeType::B737_800,
            series: Series::MX,
            registration: Some("9M-MX*, 9M-MLM*"),
            config: "16BC/144EY",
            powerplant: "CFM 56-26K",
            thrust: CFM_26K,
            weights: limits(79_015.0, 79_242.0, 66_360.0, 62_731.0),
            zones: zones_16bc(48),
            total_seats: 160,
            table_set: "738-16BC-144EY",
            notes: None,
        },
        VariantDef {
            id: "738-MX-12BC",
            display_name: "737-800 MX-series (12BC/162EY)",
            airframe: AirframeType::B737_800,
            series: Series::MX,
            registration: Some("9M-MX*, 9M-MLM*"),
            config: "12BC/162EY",
            powerplant: "CFM 56-26K",
            thrust: CFM_26K,
            weights: limits(79_015.0, 79_242.0, 66_360.0, 62_731.0),
            zones: zones_12bc(),
            total_seats: 174,
            table_set: "738-12BC-162EY",
            notes: None,
        },
        VariantDef {
            id: "738-ML-16BC",
            display_name: "737-800 ML-series SFP (16BC/144EY)",
            airframe: AirframeType::B737_800,
            series: Series::ML,
            registration: Some("9M-ML*"),
            config: "16BC/144EY",
            powerplant: "CFM 56-26K",
            thrust: CFM_26K,
            weights: limits(79_015.0, 79_242.0, 65_317.0, 61_688.0),
            zones: zones_16bc(48),
            total_seats: 160,
            table_set: "738-16BC-144EY",
            notes: Some("Short Field Performance"),
        },
        VariantDef {
            id: "738-ML-12BC",
            display_name: "737-800 ML-series SFP (12BC/162EY)",
            airframe: AirframeType::B737_800,
            series: Series::ML,
            registration: Some("9M-ML*"),
            config: "12BC/162EY",
            powerplant: "CFM 56-26K",
            thrust: CFM_26K,
            weights: limits(79_015.0, 79_242.0, 65_317.0, 62_731.0),
            zones: zones_12bc(),
            total_seats: 174,
            table_set: "738-12BC-162EY",
            notes: Some("Short Field Performance"),
        },
        VariantDef {
            id: "738-FF",
            display_name: "737-800 FF-series SFP (16BC/150EY)",
            airframe: AirframeType::B737_800,
            series: Series::FF,
            registration: Some("9M-FF*"),
            config: "16BC/150EY",
            powerplant: "CFM 56-26K",
            thrust: CFM_26K,
            weights: limits(79_015.0, 79_242.0, 65_317.0, 61_688.0),
            zones: zones_16bc(54),
            total_seats: 166,
            table_set: "738-16BC-150EY",
            notes: Some("Short Field Performance + Higher density economy"),
        },
        VariantDef {
            id: "73M8",
            display_name: "737 MAX 8 (12BC/162EY)",
            airframe: AirframeType::B737Max8,
            series: Series::Max8,
            registration: None,
            config: "12BC/162EY",
            powerplant: "LEAP-1B",
            thrust: &[Thrust::NotApplicable],
            weights: limits(82_644.0, 82_871.0, 69_308.0, 65_952.0),
            zones: zones_12bc(),
            total_seats: 174,
            table_set: "737-max-8",
            notes: Some("Trim calculated by FMC, not manually"),
        },
    ];

    specs.into_iter().map(AircraftVariant::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size_and_unique_ids() {
        let variants = builtin_variants();
        assert_eq!(variants.len(), 8);

        let mut ids: Vec<_> = variants.iter().map(|v| v.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_zone_capacity_matches_seats() {
        for variant in builtin_variants() {
            let seats: u32 = variant.zones.values().map(|z| z.max_pax).sum();
            assert_eq!(seats, variant.total_seats, "{}", variant.id);
        }
    }

    #[test]
    fn test_ff_series_wider_oc() {
        let ff = builtin_variants().into_iter().find(|v| v.id == "738-FF").unwrap();
        assert_eq!(ff.max_pax(Zone::OC).unwrap(), 54);
        assert_eq!(ff.max_pax(Zone::OB).unwrap(), 48);
    }

    #[test]
    fn test_max8_is_fmc_trimmed() {
        let max8 = builtin_variants().into_iter().find(|v| v.id == "73M8").unwrap();
        assert!(max8.uses_automatic_trim());
        assert!(max8.supports_thrust(Thrust::NotApplicable));
        assert!(!max8.supports_thrust(Thrust::K26));
    }

    #[test]
    fn test_every_series_has_an_option() {
        let variants = builtin_variants();
        for option in SERIES_OPTIONS {
            assert!(variants.iter().any(|v| v.series == option.series));
        }
    }
}
