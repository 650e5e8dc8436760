use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;
use log::{LevelFilter, debug};
use std::io::Read;
use std::path::{Path, PathBuf};

use tonnage::config::Config;
use tonnage::logging::{Target, init_logger_with_target, parse_level};
use tonnage::stats::{DateWindow, SessionVolume, summarize};
use tonnage::volume::{
    NumericInput, RawSet, RoundingMethod, VolumeOptions, WeightUnit, calculate_set_volume,
    calculate_total_volume_raw, convert_weight, normalize_volume_input, parse_raw_sets,
};
use tonnage::workout::WorkoutRecord;

const LOG_VAR: &str = "TONNAGE_LOG";

#[derive(Parser, Debug)]
#[command(version, about = "Tonnage - training volume calculator", long_about = None)]
struct Args {
    /// off, error, warn, info, debug or trace (defaults to $TONNAGE_LOG, then warn)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum UnitArg {
    Kg,
    Lb,
}

impl From<UnitArg> for WeightUnit {
    fn from(u: UnitArg) -> Self {
        match u {
            UnitArg::Kg => WeightUnit::Kg,
            UnitArg::Lb => WeightUnit::Lb,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RoundingArg {
    Floor,
    Ceil,
    Round,
}

impl From<RoundingArg> for RoundingMethod {
    fn from(r: RoundingArg) -> Self {
        match r {
            RoundingArg::Floor => RoundingMethod::Floor,
            RoundingArg::Ceil => RoundingMethod::Ceil,
            RoundingArg::Round => RoundingMethod::Round,
        }
    }
}

#[derive(clap::Args, Debug, Clone, Copy, Default)]
struct RoundingOpts {
    /// Decimal places kept in the result
    #[arg(long)]
    precision: Option<u32>,
    #[arg(long, value_enum)]
    rounding: Option<RoundingArg>,
}

impl RoundingOpts {
    fn resolve(self, base: VolumeOptions) -> VolumeOptions {
        VolumeOptions {
            precision: self.precision.unwrap_or(base.precision),
            rounding_method: self
                .rounding
                .map(RoundingMethod::from)
                .unwrap_or(base.rounding_method),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a weight between kg and lb
    Convert {
        #[arg(allow_negative_numbers = true)]
        weight: f64,
        #[arg(long, value_enum)]
        from: UnitArg,
        #[arg(long, value_enum)]
        to: UnitArg,
    },
    /// Volume of a single set (weight x reps)
    SetVolume {
        #[arg(allow_negative_numbers = true)]
        weight: String,
        #[arg(allow_negative_numbers = true)]
        reps: String,
    },
    /// Round a volume figure
    Normalize {
        #[arg(allow_negative_numbers = true)]
        volume: String,
        #[command(flatten)]
        rounding: RoundingOpts,
    },
    /// Total volume of a JSON array of sets (`-` reads stdin)
    Total {
        input: PathBuf,
        #[arg(long, value_enum)]
        unit: Option<UnitArg>,
        #[command(flatten)]
        rounding: RoundingOpts,
    },
    /// Record a workout from a JSON array of sets and print it as JSON
    Record {
        input: PathBuf,
        #[arg(long)]
        name: Option<String>,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, value_enum)]
        unit: Option<UnitArg>,
    },
    /// Chart statistics over a JSON array of session volumes
    Stats {
        input: PathBuf,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Trailing window of this many days ending at --to (or today)
        #[arg(long, conflicts_with = "from")]
        days: Option<u32>,
        #[arg(long, value_enum)]
        unit: Option<UnitArg>,
        #[command(flatten)]
        rounding: RoundingOpts,
    },
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_raw_sets(path: &Path) -> Result<Vec<RawSet>> {
    let json = read_input(path)?;
    parse_raw_sets(&json)
        .with_context(|| format!("{} is not a JSON array of sets", path.display()))
}

fn log_level(args: &Args) -> Result<LevelFilter> {
    let Some(level) = args.log_level.clone().or_else(|| std::env::var(LOG_VAR).ok()) else {
        return Ok(LevelFilter::Warn);
    };
    parse_level(&level).ok_or_else(|| anyhow!("Unknown log level {:?}", level))
}

fn run(command: Commands, config: &Config) -> Result<String> {
    let output = match command {
        Commands::Convert { weight, from, to } => {
            convert_weight(weight, from.into(), to.into()).to_string()
        }
        Commands::SetVolume { weight, reps } => {
            let set =
                RawSet::new(weight.as_str(), reps.as_str(), config.default_unit).into_set()?;
            calculate_set_volume(set.weight, set.reps)?.to_string()
        }
        Commands::Normalize { volume, rounding } => {
            let options = rounding.resolve(config.options);
            normalize_volume_input(&NumericInput::Text(volume), &options)?.to_string()
        }
        Commands::Total {
            input,
            unit,
            rounding,
        } => {
            let raw_sets = read_raw_sets(&input)?;
            let unit = unit.map(WeightUnit::from).unwrap_or(config.default_unit);
            let options = rounding.resolve(config.options);
            debug!("total over {} sets in {}", raw_sets.len(), unit);
            let total = calculate_total_volume_raw(&raw_sets, unit, &options)?;
            format!("{} {}", total, unit)
        }
        Commands::Record {
            input,
            name,
            date,
            unit,
        } => {
            let raw_sets = read_raw_sets(&input)?;
            let unit = unit.map(WeightUnit::from).unwrap_or(config.default_unit);
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let record = WorkoutRecord::from_raw(name, date, unit, raw_sets)?;
            serde_json::to_string_pretty(&record)?
        }
        Commands::Stats {
            input,
            from,
            to,
            days,
            unit,
            rounding,
        } => {
            let json = read_input(&input)?;
            let sessions: Vec<SessionVolume> = serde_json::from_str(&json).with_context(|| {
                format!("{} is not a JSON array of session volumes", input.display())
            })?;
            let window = match days {
                Some(days) => {
                    DateWindow::last_days(to.unwrap_or_else(|| Local::now().date_naive()), days)
                }
                None => DateWindow { from, to },
            };
            let unit = unit.map(WeightUnit::from).unwrap_or(config.default_unit);
            let stats = summarize(&sessions, &window, unit, &rounding.resolve(config.options))?;
            serde_json::to_string_pretty(&stats)?
        }
    };
    Ok(output)
}

fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();
    init_logger_with_target(log_level(&args)?, Target::Stderr);

    let config = Config::from_env()?;
    debug!("Loaded config {:?}", config);

    let output = run(args.command, &config)?;
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn run_args(argv: &[&str]) -> Result<String> {
        let args = Args::try_parse_from(argv)?;
        run(args.command, &Config::default())
    }

    #[test]
    fn convert_and_set_volume() {
        let out = run_args(&["tonnage", "convert", "50", "--from", "kg", "--to", "kg"]).unwrap();
        assert_eq!(out, "50");
        assert_eq!(run_args(&["tonnage", "set-volume", "100", "5"]).unwrap(), "500");
        assert!(run_args(&["tonnage", "set-volume", "100", "2.5"]).is_err());
        assert!(run_args(&["tonnage", "set-volume", "-1", "5"]).is_err());
    }

    #[test]
    fn normalize_flags_override_config() {
        let out = run_args(&["tonnage", "normalize", "1.006", "--rounding", "floor"]).unwrap();
        assert_eq!(out, "1");
        let out = run_args(&["tonnage", "normalize", "1.006"]).unwrap();
        assert_eq!(out, "1.01");
        let out = run_args(&["tonnage", "normalize", "12.3456", "--precision", "1"]).unwrap();
        assert_eq!(out, "12.3");
    }

    #[test]
    fn total_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = r#"[
            {"weight": 100, "reps": 5, "unit": "kg"},
            {"weight": "110", "reps": "5"},
            {"weight": 120, "reps": 5}
        ]"#;
        file.write_all(json.as_bytes()).unwrap();
        let arg = file.path().to_string_lossy().to_string();
        assert_eq!(run_args(&["tonnage", "total", &arg]).unwrap(), "1650 kg");

        let out = run_args(&["tonnage", "total", &arg, "--unit", "lb", "--precision", "0"]);
        assert_eq!(out.unwrap(), "3638 lb");
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Args::try_parse_from(["tonnage", "total", "x.json", "--unit", "stone"]).is_err());
        let conflicting = ["tonnage", "stats", "x.json", "--from", "2025-01-01", "--days", "7"];
        assert!(Args::try_parse_from(conflicting).is_err());
    }
}
