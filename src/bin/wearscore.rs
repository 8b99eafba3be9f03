//! wearscore CLI - Command-line interface for the daily scorers
//!
//! Commands:
//! - score: Score one day from a Fitbit bundle or canonical inputs
//! - summary: Summarize a JSON array of daily reports
//! - baseline: Estimate a baseline from a series of values
//! - sleep-need: Recommend tonight's sleep
//! - config: Print the default scoring configuration

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use wearscore::adapters::{FitbitAdapter, VendorPayloadAdapter};
use wearscore::pipeline::{score_day, DailyReport};
use wearscore::sleep::SleepNeedEstimator;
use wearscore::trends::WeeklySummary;
use wearscore::types::DailyInputs;
use wearscore::{BaselineEstimator, ScoreError, ScoringConfig, WEARSCORE_VERSION};

/// wearscore - Daily strain, sleep and recovery scores from wearable data
#[derive(Parser)]
#[command(name = "wearscore")]
#[command(version = WEARSCORE_VERSION)]
#[command(about = "Score wearable data into strain, sleep and recovery", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one day and print the daily report
    Score {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "fitbit")]
        format: InputFormat,

        /// Scoring configuration file (JSON, partial overrides allowed)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pretty-print the report
        #[arg(long)]
        pretty: bool,
    },

    /// Summarize a JSON array of daily reports
    Summary {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Pretty-print the summary
        #[arg(long)]
        pretty: bool,
    },

    /// Estimate a baseline from historical values
    Baseline {
        /// Historical samples; zero or negative values are ignored
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },

    /// Recommend tonight's sleep
    SleepNeed {
        /// Today's strain (0-21)
        #[arg(long)]
        strain: f64,

        /// Accumulated sleep debt in hours
        #[arg(long, default_value = "0")]
        debt: f64,

        /// Scoring configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the default scoring configuration
    Config,
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Bundle of raw Fitbit Web API responses
    Fitbit,
    /// Canonical daily inputs as produced by an adapter
    Canonical,
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays machine readable
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), WearscoreCliError> {
    match cli.command {
        Commands::Score {
            input,
            format,
            config,
            pretty,
        } => cmd_score(&input, format, config.as_deref(), pretty),
        Commands::Summary { input, pretty } => cmd_summary(&input, pretty),
        Commands::Baseline { values } => cmd_baseline(&values),
        Commands::SleepNeed {
            strain,
            debt,
            config,
        } => cmd_sleep_need(strain, debt, config.as_deref()),
        Commands::Config => {
            println!("{}", ScoringConfig::default().to_json()?);
            Ok(())
        }
    }
}

fn cmd_score(
    input: &Path,
    format: InputFormat,
    config: Option<&Path>,
    pretty: bool,
) -> Result<(), WearscoreCliError> {
    let config = load_config(config)?;
    let input_data = read_input(input)?;

    let inputs = match format {
        InputFormat::Fitbit => FitbitAdapter.parse(&input_data)?,
        InputFormat::Canonical => serde_json::from_str::<DailyInputs>(&input_data)?,
    };

    let report = score_day(&inputs, &config);
    println!("{}", report.to_json(pretty)?);
    Ok(())
}

fn cmd_summary(input: &Path, pretty: bool) -> Result<(), WearscoreCliError> {
    let input_data = read_input(input)?;
    let reports: Vec<DailyReport> = serde_json::from_str(&input_data)?;

    if reports.is_empty() {
        return Err(WearscoreCliError::NoReports);
    }

    let summary = WeeklySummary::from_reports(&reports);
    let output = if pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };
    println!("{output}");
    Ok(())
}

fn cmd_baseline(values: &[f64]) -> Result<(), WearscoreCliError> {
    let baseline = BaselineEstimator::estimate(values);
    println!("{}", serde_json::to_string(&baseline)?);
    Ok(())
}

fn cmd_sleep_need(strain: f64, debt: f64, config: Option<&Path>) -> Result<(), WearscoreCliError> {
    let config = load_config(config)?;
    let need = SleepNeedEstimator::estimate(strain, debt, &config.sleep_need);
    println!("{}", serde_json::to_string(&need)?);
    Ok(())
}

fn read_input(input: &Path) -> Result<String, WearscoreCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn load_config(path: Option<&Path>) -> Result<ScoringConfig, WearscoreCliError> {
    match path {
        Some(path) => Ok(ScoringConfig::from_json(&fs::read_to_string(path)?)?),
        None => Ok(ScoringConfig::default()),
    }
}

// Error handling

#[derive(Debug)]
enum WearscoreCliError {
    Io(io::Error),
    Score(ScoreError),
    Json(serde_json::Error),
    NoReports,
}

impl From<io::Error> for WearscoreCliError {
    fn from(e: io::Error) -> Self {
        WearscoreCliError::Io(e)
    }
}

impl From<ScoreError> for WearscoreCliError {
    fn from(e: ScoreError) -> Self {
        WearscoreCliError::Score(e)
    }
}

impl From<serde_json::Error> for WearscoreCliError {
    fn from(e: serde_json::Error) -> Self {
        WearscoreCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<WearscoreCliError> for CliError {
    fn from(e: WearscoreCliError) -> Self {
        match e {
            WearscoreCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            WearscoreCliError::Score(ScoreError::InvalidConfig(msg)) => CliError {
                code: "INVALID_CONFIG".to_string(),
                message: msg,
                hint: Some("Run 'wearscore config' to see the defaults".to_string()),
            },
            WearscoreCliError::Score(ScoreError::JsonError(e)) | WearscoreCliError::Json(e) => {
                CliError {
                    code: "JSON_ERROR".to_string(),
                    message: e.to_string(),
                    hint: Some("Check JSON syntax of the input and config files".to_string()),
                }
            }
            WearscoreCliError::Score(e) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Ensure input is a JSON object keyed by Fitbit endpoint".to_string()),
            },
            WearscoreCliError::NoReports => CliError {
                code: "NO_REPORTS".to_string(),
                message: "No daily reports found in input".to_string(),
                hint: Some("Pass the output of 'wearscore score' as a JSON array".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_config_is_a_json_error() {
        let err = ScoringConfig::from_json("{ not json").unwrap_err();
        let cli_error = CliError::from(WearscoreCliError::from(err));
        assert_eq!(cli_error.code, "JSON_ERROR");
    }

    #[test]
    fn test_invalid_config_and_bundle_errors() {
        let err = ScoringConfig::from_json(r#"{"sleep_debt": {"window": 0}}"#).unwrap_err();
        assert_eq!(
            CliError::from(WearscoreCliError::from(err)).code,
            "INVALID_CONFIG"
        );

        let err = FitbitAdapter.parse("[1, 2]").unwrap_err();
        assert_eq!(CliError::from(WearscoreCliError::from(err)).code, "PARSE_ERROR");
    }
}
