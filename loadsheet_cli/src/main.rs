//! # Loadsheet CLI
//!
//! Terminal front end for loadsheet_core: lists the fleet, runs a loadsheet
//! from a JSON request and prints it with its limit verdicts, or computes a
//! takeoff trim on its own.
//!
//! Diagnostics go to stderr (`RUST_LOG` or `-v`), results to stdout.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use loadsheet_core::aircraft::{AircraftVariant, Flaps, Series, TakeoffConfig, Thrust, SERIES_OPTIONS};
use loadsheet_core::calculations::loadsheet::{calculate, LoadsheetInput, LoadsheetResult};
use loadsheet_core::reference;
use loadsheet_core::settings::CalcSettings;
use loadsheet_core::trim::{calculate_trim, TrimOutcome};
use loadsheet_core::validation::{validate_all, ValidationCheck, ValidationReport};
use loadsheet_core::CalcError;

#[derive(Parser)]
#[command(author, version, about = "Boeing 737 load & trim sheets", long_about = None)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List aircraft variants and their limits
    Aircraft {
        /// Only this fleet series (MS, MX, ML, FF, MAX-8)
        #[arg(long)]
        series: Option<String>,
    },
    /// Calculate and validate a loadsheet from a JSON request
    Calculate {
        /// Calculation request (JSON)
        input: PathBuf,

        /// Settings file (TOML, or JSON by extension)
        #[arg(long, env = "LOADSHEET_SETTINGS")]
        settings: Option<PathBuf>,

        /// Print result and verdicts as JSON
        #[arg(long)]
        json: bool,
    },
    /// Takeoff trim only
    Trim {
        /// Aircraft variant id
        #[arg(long)]
        aircraft: String,

        /// Takeoff index
        #[arg(long, allow_negative_numbers = true)]
        toi: f64,

        /// Takeoff weight, kg
        #[arg(long)]
        tow: f64,

        #[arg(long, default_value = "F5")]
        flaps: String,

        #[arg(long, default_value = "26K")]
        thrust: String,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Aircraft { series } => list_aircraft(series.as_deref()),
        Commands::Calculate { input, settings, json } => run_calculation(&input, settings.as_deref(), json),
        Commands::Trim {
            aircraft,
            toi,
            tow,
            flaps,
            thrust,
        } => run_trim(&aircraft, toi, tow, &flaps, &thrust),
    }
}

// ============================================================================
// aircraft
// ============================================================================

fn list_aircraft(series: Option<&str>) -> Result<ExitCode> {
    let data = reference::builtin()?;
    let variants: Vec<&AircraftVariant> = match series {
        Some(code) => {
            let series = Series::from_str_flexible(code)?;
            if let Some(option) = SERIES_OPTIONS.iter().find(|o| o.series == series) {
                println!("{} ({})", option.label, option.engine);
                println!();
            }
            data.variants_by_series(series)
        }
        None => data.aircraft.iter().collect(),
    };

    println!(
        "{:<12} {:<38} {:>7} {:>7} {:>7} {:>7} {:>6}",
        "ID", "VARIANT", "MTOW", "MTXW", "MLW", "MZFW", "SEATS"
    );
    for v in variants {
        let mtxw = v.weights.mtxw.map_or_else(|| "-".to_string(), |w| format!("{:.0}", w));
        println!(
            "{:<12} {:<38} {:>7.0} {:>7} {:>7.0} {:>7.0} {:>6}",
            v.id, v.display_name, v.weights.mtow, mtxw, v.weights.mlw, v.weights.mzfw, v.total_seats
        );
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// calculate
// ============================================================================

fn load_settings(path: Option<&Path>) -> Result<CalcSettings> {
    let Some(path) = path else {
        return Ok(CalcSettings::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading settings {}", path.display()))?;
    let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let settings = if is_json {
        CalcSettings::from_json_str(&text)
    } else {
        CalcSettings::from_toml_str(&text)
    };
    settings.with_context(|| format!("loading settings {}", path.display()))
}

fn error_kind(err: &CalcError) -> &'static str {
    if err.is_reference_error() {
        "Configuration error"
    } else if err.is_data_entry_error() {
        "Data entry error"
    } else {
        "Error"
    }
}

fn run_calculation(input_path: &Path, settings_path: Option<&Path>, json: bool) -> Result<ExitCode> {
    let settings = load_settings(settings_path)?;
    let text = fs::read_to_string(input_path).with_context(|| format!("reading {}", input_path.display()))?;
    let input: LoadsheetInput =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", input_path.display()))?;

    let result = match calculate(&input, &settings) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("{}: {}", error_kind(&err), err);
            if json {
                println!("{}", serde_json::to_string_pretty(&err)?);
            }
            return Ok(ExitCode::from(1));
        }
    };

    let aircraft = reference::get_aircraft_by_id(&result.aircraft.id)?;
    let report = validate_all(&result, aircraft, &settings)?;
    let prepared = Local::now().format("%Y-%m-%d %H:%M %Z").to_string();

    if json {
        let output = serde_json::json!({
            "prepared_at": prepared,
            "result": result,
            "validation": report,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_loadsheet(&result, &report, &settings, &prepared);
    }

    if report.all_pass {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(2))
    }
}

fn status(check: &ValidationCheck) -> &'static str {
    if check.pass {
        "[OK]"
    } else {
        "[FAIL]"
    }
}

fn print_trim(trim: &TrimOutcome) {
    match trim {
        TrimOutcome::Calculated(setting) => {
            println!(
                "  STAB TRIM  {:.1}  (base {:.1} {:+.1} for {} / {})",
                setting.final_trim, setting.base_trim, setting.correction, setting.flaps, setting.thrust
            );
        }
        TrimOutcome::Automatic { message, flaps } => {
            println!("  STAB TRIM  {} ({})", message, flaps);
        }
    }
}

fn print_loadsheet(result: &LoadsheetResult, report: &ValidationReport, settings: &CalcSettings, prepared: &str) {
    let rule = "═══════════════════════════════════════════════";
    let weights = &result.weights;
    let indices = &result.indices;

    println!("{}", rule);
    println!("  LOADSHEET  {}", result.aircraft.display_name);
    println!("  {}  prepared {}", result.aircraft.id, prepared);
    println!("{}", rule);
    println!();

    println!("Passengers:");
    for (zone, z) in &result.passengers.zones {
        println!("  {}  {:>3} pax  {:>6.0} kg  idx {:>+4}", zone, z.pax, z.weight, z.index);
    }
    println!(
        "  Total {:>3} pax  {:>6.0} kg",
        result.passengers.total_pax, result.passengers.total_weight
    );
    println!();

    println!("Cargo:");
    for (hold, h) in &result.cargo.holds {
        println!("  {}  {:>6.0} kg  idx {:>+4}", hold, h.weight, h.index);
    }
    println!("  Total  {:>6.0} kg", result.cargo.total_weight);
    println!();

    let fuel = &result.fuel;
    println!("Fuel:");
    println!(
        "  Wing {:.0} kg  Center {:.0} kg  Total {:.0} kg  idx {:+} ({})",
        fuel.wing_tanks, fuel.center_tank, fuel.total, fuel.index.index, fuel.index.method
    );
    println!();

    println!("Index groups:");
    println!(
        "  Forward  DOI {:.1}  H1 {:+.0}  H2 {:+.0}  OA {:+.0}  OB {:+.0}  = {:+.1}",
        indices.negative.doi,
        indices.negative.hold1,
        indices.negative.hold2,
        indices.negative.zone_oa,
        indices.negative.zone_ob,
        indices.negative.total
    );
    println!(
        "  Aft      H3 {:+.0}  H4 {:+.0}  OC {:+.0}  OD {:+.0}  = {:+.1}",
        indices.positive.hold3,
        indices.positive.hold4,
        indices.positive.zone_oc,
        indices.positive.zone_od,
        indices.positive.total
    );
    println!();

    if !result.lmc.items.is_empty() {
        println!("Last minute changes:");
        for item in &result.lmc.items {
            println!(
                "  {:<10} {:<8} {:>+7.0} kg  idx {:>+5.1}",
                item.category, item.location, item.weight, item.index
            );
        }
        println!("  Total {:>+7.0} kg  idx {:>+5.1}", result.lmc.total_weight, result.lmc.total_index);
        println!();
    }

    println!("Weights and balance:");
    println!("  DOW   {:>8.0} kg   DOI {:>6.1}", weights.dow, indices.doi);
    println!("  ZFW   {:>8.0} kg   ZFI {:>6.1}   {}", weights.final_zfw, indices.final_zfi, status(&report.zfw));
    println!("  TOW   {:>8.0} kg   TOI {:>6.1}   {}", weights.tow, indices.toi, status(&report.tow));
    let estimate = if weights.trip_fuel_estimated { " (estimated trip fuel)" } else { "" };
    println!(
        "  LAW   {:>8.0} kg{}   {}",
        weights.landing_weight,
        estimate,
        status(&report.landing_weight)
    );
    println!();

    println!("CG:");
    println!(
        "  ZF  {:.1}% MAC  (limits {:.1} - {:.1})",
        result.cg.zfmac, report.cg_zfw.forward_limit, report.cg_zfw.aft_limit
    );
    println!(
        "  TO  {:.1}% MAC  (limits {:.1} - {:.1})",
        result.cg.tomac, report.cg_tow.forward_limit, report.cg_tow.aft_limit
    );
    print_trim(&result.trim);
    println!();

    println!("Standard masses: {}", settings.passenger_weights);
    println!("{}", rule);
    if report.all_pass {
        println!("  RESULT: WITHIN LIMITS");
    } else {
        println!("  RESULT: LIMITS EXCEEDED");
        for error in &report.errors {
            println!("  - {}", error);
        }
    }
    println!("{}", rule);
}

// ============================================================================
// trim
// ============================================================================

fn run_trim(aircraft_id: &str, toi: f64, tow: f64, flaps: &str, thrust: &str) -> Result<ExitCode> {
    let aircraft = reference::get_aircraft_by_id(aircraft_id)?;
    let flaps = Flaps::from_str_flexible(flaps)?;
    let mut thrust = Thrust::from_str_flexible(thrust)?;
    if aircraft.uses_automatic_trim() {
        thrust = Thrust::NotApplicable;
    } else if !aircraft.supports_thrust(thrust) {
        warn!(aircraft = %aircraft.id, %thrust, "thrust rating not available on this variant");
    }

    let outcome = calculate_trim(aircraft, toi, tow, TakeoffConfig::new(flaps, thrust))?;
    println!("{}  TOI {:.1}  TOW {:.0} kg", aircraft.display_name, toi, tow);
    print_trim(&outcome);
    Ok(ExitCode::SUCCESS)
}
