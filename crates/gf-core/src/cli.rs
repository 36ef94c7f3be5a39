//! Command-line surface: forecast, classify, and profile inspection.
//!
//! Every `run_*` function returns an [`ExitCode`]; forecasts and
//! classifications encode the risk level in it.

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use gf_common::{Error, GlucoseUnit, OutputFormat, Reading, Result, RunId, SCHEMA_VERSION};
use gf_config::{resolve_config, ConfigPaths, ConfigSnapshot, DevicePreset, ParameterProfile};
use gf_config::{EngineConfig, ResolvedConfig};
use serde::Deserialize;

use crate::exit_codes::ExitCode;
use crate::forecast::Forecaster;
use crate::logging::LogFormat;
use crate::output::{render_assessment, render_forecast, render_json, render_snapshot};
use crate::risk::{classify, TrendArrow};

#[derive(Parser, Debug)]
#[command(name = "gf-core", version)]
#[command(about = "Glucose state estimation, short-term projection and risk classification")]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Engine config file (overrides GF_CONFIG and the XDG config file)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log line format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter a batch of readings, project ahead and classify risk
    Forecast(ForecastArgs),
    /// Classify risk from explicit values
    Classify(ClassifyArgs),
    /// Inspect the effective parameter profile
    Profile(ProfileArgs),
}

#[derive(Args, Debug)]
pub struct ForecastArgs {
    /// JSON array of {"timestamp", "value"} objects, or `-` for stdin
    #[arg(long, value_name = "FILE")]
    pub readings: PathBuf,

    /// Unit of the input values
    #[arg(long, value_enum, default_value_t = GlucoseUnit::MmolPerL)]
    pub unit: GlucoseUnit,

    /// Evaluation time (RFC 3339); defaults to the current time
    #[arg(long, value_name = "RFC3339")]
    pub now: Option<String>,

    /// Apply a CGM device preset to the profile
    #[arg(long)]
    pub device: Option<String>,
}

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Current glucose
    #[arg(long, allow_negative_numbers = true)]
    pub current: f64,

    /// Rate of change per minute
    #[arg(long, allow_negative_numbers = true)]
    pub velocity: f64,

    /// Value projected about 15 minutes ahead
    #[arg(long, allow_negative_numbers = true)]
    pub projected: f64,

    /// Unit of the three values above
    #[arg(long, value_enum, default_value_t = GlucoseUnit::MmolPerL)]
    pub unit: GlucoseUnit,
}

#[derive(Args, Debug)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommands,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Show the effective configuration and profile fingerprint
    Show {
        /// Apply a CGM device preset to the profile
        #[arg(long)]
        device: Option<String>,
    },
    /// Print the JSON schema of the parameter profile
    Schema,
}

/// Dispatch a parsed command line.
pub fn run(cli: &Cli) -> ExitCode {
    let result = match &cli.command {
        Commands::Forecast(args) => run_forecast(cli, args),
        Commands::Classify(args) => run_classify(cli, args),
        Commands::Profile(args) => match &args.command {
            ProfileCommands::Show { device } => run_profile_show(cli, device.as_deref()),
            ProfileCommands::Schema => run_profile_schema(),
        },
    };
    match result {
        Ok(code) => code,
        Err(err) => report_error(cli.format, &err),
    }
}

fn run_forecast(cli: &Cli, args: &ForecastArgs) -> Result<ExitCode> {
    let (resolved, _) = load_config(cli, args.device.as_deref())?;
    let now = match &args.now {
        Some(s) => parse_time(s)?,
        None => Utc::now(),
    };
    let readings = load_readings(&args.readings, args.unit)?;

    let report = Forecaster::new(resolved.config).forecast(&readings, now)?;
    let text = match cli.format {
        OutputFormat::Summary => render_forecast(&report, args.unit),
        format => render_json(&report, format)?,
    };
    println!("{}", text);
    Ok(ExitCode::from_risk(report.risk.level))
}

fn run_classify(cli: &Cli, args: &ClassifyArgs) -> Result<ExitCode> {
    let (resolved, _) = load_config(cli, None)?;
    let current = args.unit.to_mmol(args.current);
    let velocity = args.unit.to_mmol(args.velocity);
    let projected = args.unit.to_mmol(args.projected);

    let assessment = classify(current, velocity, projected, &resolved.config.risk);
    let text = match cli.format {
        OutputFormat::Summary => render_assessment(&assessment, velocity),
        format => {
            let output = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "run_id": RunId::new(),
                "generated_at": Utc::now().to_rfc3339(),
                "command": "classify",
                "inputs": {
                    "current": current,
                    "velocity": velocity,
                    "projected_near": projected,
                },
                "risk": assessment,
                "trend": TrendArrow::from_velocity(velocity),
            });
            render_json(&output, format)?
        }
    };
    println!("{}", text);
    Ok(ExitCode::from_risk(assessment.level))
}

fn run_profile_show(cli: &Cli, device: Option<&str>) -> Result<ExitCode> {
    let (resolved, device) = load_config(cli, device)?;
    let snapshot = ConfigSnapshot::capture(&resolved.config, resolved.source, device);
    let text = match cli.format {
        OutputFormat::Summary => render_snapshot(&snapshot),
        format => render_json(&snapshot, format)?,
    };
    println!("{}", text);
    Ok(ExitCode::Safe)
}

fn run_profile_schema() -> Result<ExitCode> {
    let schema = schemars::schema_for!(ParameterProfile);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(ExitCode::Safe)
}

/// Resolve the config file chain, then overlay the device preset if any.
fn load_config(
    cli: &Cli,
    device: Option<&str>,
) -> Result<(ResolvedConfig, Option<DevicePreset>)> {
    let mut resolved = resolve_config(&ConfigPaths::discover(cli.config.clone()))?;
    let device = device
        .map(|d| d.parse::<DevicePreset>())
        .transpose()?;
    if let Some(preset) = device {
        resolved.config = EngineConfig {
            profile: resolved.config.profile.with_device(preset),
            ..resolved.config
        };
        resolved.config.validate()?;
    }
    Ok((resolved, device))
}

fn parse_time(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::InvalidTimestamp(format!("{}: {}", s, e)))
}

#[derive(Debug, Deserialize)]
struct RawReading {
    timestamp: DateTime<Utc>,
    /// `null` marks a sensor gap value; it is screened like any other bad value.
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReadingsFile {
    List(Vec<RawReading>),
    Wrapped { readings: Vec<RawReading> },
}

/// Read a readings file (or stdin for `-`) and convert to mmol/L.
pub fn load_readings(path: &Path, unit: GlucoseUnit) -> Result<Vec<Reading>> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    parse_readings(&content, unit)
}

pub fn parse_readings(json: &str, unit: GlucoseUnit) -> Result<Vec<Reading>> {
    let raw = match serde_json::from_str::<ReadingsFile>(json)? {
        ReadingsFile::List(list) => list,
        ReadingsFile::Wrapped { readings } => readings,
    };
    Ok(raw
        .into_iter()
        .map(|r| Reading::from_unit(r.timestamp, r.value.unwrap_or(f64::NAN), unit))
        .collect())
}

fn report_error(format: OutputFormat, err: &Error) -> ExitCode {
    let code = ExitCode::from_error(err);
    eprintln!("gf-core: {}", err);
    if format.is_machine_readable() {
        let output = serde_json::json!({
            "schema_version": SCHEMA_VERSION,
            "error": {
                "code": err.code(),
                "exit_code": code.as_i32(),
                "message": err.to_string(),
            }
        });
        if let Ok(text) = render_json(&output, format) {
            println!("{}", text);
        }
    }
    code
}
