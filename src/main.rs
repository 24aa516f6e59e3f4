//! Search Everywhere A/B metrics
//!
//! Single batch pass over an event log:
//! - Load the CSV and normalize each row's JSON payload
//! - Split events into experiment cohorts
//! - Report successful-search rate and mean session duration per cohort

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use event_loader::{load_events_from_path, LoaderConfig};
use experiment_core::limits::{DEFAULT_COHORTS, DEFAULT_PAYLOAD_COLUMN};
use metrics_engine::analyze;
use telemetry::{init_tracing, metrics, TracingConfig};

/// Command-line arguments. Flags override the config file and environment.
#[derive(Parser, Debug)]
#[command(name = "search-ab-metrics")]
#[command(version, about = "Per-cohort search metrics for the A/B experiment event log")]
struct Args {
    /// Event log CSV file
    input: PathBuf,

    /// Column holding the JSON payload
    #[arg(long)]
    payload_column: Option<String>,

    /// Valid experiment group (repeat for each group)
    #[arg(long = "cohort")]
    cohorts: Vec<i64>,

    /// Config file (TOML); defaults to config/default.toml if present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_payload_column")]
    payload_column: String,

    #[serde(default = "default_cohorts")]
    cohorts: Vec<i64>,

    #[serde(default = "default_log_filter")]
    log_filter: String,

    #[serde(default)]
    log_json: bool,
}

fn default_payload_column() -> String {
    DEFAULT_PAYLOAD_COLUMN.to_string()
}

fn default_cohorts() -> Vec<i64> {
    DEFAULT_COHORTS.to_vec()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            payload_column: default_payload_column(),
            cohorts: default_cohorts(),
            log_filter: default_log_filter(),
            log_json: false,
        }
    }
}

impl Config {
    /// Applies command-line flags on top of file and environment settings.
    fn with_args(mut self, args: &Args) -> Self {
        if let Some(column) = &args.payload_column {
            self.payload_column = column.clone();
        }
        if !args.cohorts.is_empty() {
            self.cohorts = args.cohorts.clone();
        }
        if args.log_json {
            self.log_json = true;
        }
        self
    }

    fn loader(&self) -> LoaderConfig {
        LoaderConfig::default()
            .with_payload_column(self.payload_column.clone())
            .with_cohorts(self.cohorts.iter().copied())
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config.with_args(&args),
        Err(e) => {
            let err = experiment_core::Error::config(format!("{e:#}"));
            eprintln!("error: {err}");
            return ExitCode::from(err.exit_code());
        }
    };

    init_tracing(
        TracingConfig::new()
            .with_filter(config.log_filter.clone())
            .with_json(config.log_json),
    );

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Load, analyze, print.
fn run(args: &Args, config: &Config) -> Result<()> {
    info!(
        "Starting search A/B metrics v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!(
        input = %args.input.display(),
        payload_column = %config.payload_column,
        cohorts = ?config.cohorts,
        "Loaded config"
    );

    let loader = config.loader();
    let events = load_events_from_path(&args.input, &loader)
        .with_context(|| format!("Failed to load events from {}", args.input.display()))?;

    let report = analyze(events, &loader.cohorts).context("Failed to compute cohort metrics")?;

    print!("{report}");

    metrics().log_snapshot();
    Ok(())
}

/// Maps the root cause onto the error taxonomy's exit code.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<experiment_core::Error>()
        .map(experiment_core::Error::exit_code)
        .unwrap_or(1)
}

/// Load configuration from files and environment.
fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    let file = match path {
        Some(path) => config::File::from(path)
            .required(true)
            .format(config::FileFormat::Toml),
        None => config::File::with_name("config/default")
            .required(false)
            .format(config::FileFormat::Toml),
    };

    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        .add_source(file)
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("ABTEST")
                .list_separator(",")
                .with_list_parse_key("cohorts")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    config
        .try_deserialize()
        .context("Failed to deserialize configuration")
}
