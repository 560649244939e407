//! Batch engine binary for the Heroism simulation.
//!
//! Loads the configuration, runs one batch of seeded rescue runs and
//! prints a JSON [`BatchReport`](report::BatchReport) on stdout. Logs go to
//! stderr so the report can be piped.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `HEROISM_CONFIG` or `heroism-config.yaml`
//! 2. Initialize structured logging (tracing) from the `logging` section
//! 3. Validate the configuration
//! 4. Run the batch
//! 5. Print the report

mod error;
mod report;

use std::io::Write;
use std::path::{Path, PathBuf};

use heroism_core::batch::{self, BatchConfig};
use heroism_core::config::{LogFormat, LoggingConfig, SimulationConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::report::BatchReport;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "heroism-config.yaml";

/// Application entry point for the batch engine.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the batch cannot be
/// set up, or the report cannot be written.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, loaded_from) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!("heroism-engine starting");
    match &loaded_from {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => info!("Config file not found, using defaults"),
    }

    // 3. Validate.
    config.validate().map_err(EngineError::from)?;
    info!(
        scale = %config.world.scale,
        seed = config.world.seed,
        runs = config.batch.runs,
        randomized = config.batch.randomized,
        max_ticks = config.world.max_ticks,
        "Configuration validated"
    );

    // 4. Run the batch.
    let batch_config = BatchConfig::from_config(config.clone());
    let result = batch::run_batch(&batch_config).map_err(EngineError::from)?;

    // 5. Print the report.
    let report = BatchReport::new(config, result);
    write_report(&report)?;

    info!(
        counted_runs = result.counted_runs,
        faulted_runs = result.faulted_runs,
        "heroism-engine shutdown complete"
    );
    Ok(())
}

/// Load the simulation configuration.
///
/// `HEROISM_CONFIG` names the file; otherwise `heroism-config.yaml` in the
/// working directory is used if present, and the defaults if not.
fn load_config() -> Result<(SimulationConfig, Option<PathBuf>), EngineError> {
    let config_path = std::env::var_os("HEROISM_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if config_path.exists() {
        let config = SimulationConfig::from_file(&config_path)?;
        Ok((config, Some(config_path)))
    } else if config_path != Path::new(DEFAULT_CONFIG_PATH) {
        // An explicitly named file that is missing is an error.
        let source = std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", config_path.display()),
        );
        Err(EngineError::Config {
            source: source.into(),
        })
    } else {
        let mut config = SimulationConfig::default();
        config.apply_env_overrides()?;
        Ok((config, None))
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

/// Write the report to stdout as pretty-printed JSON.
fn write_report(report: &BatchReport) -> Result<(), EngineError> {
    let json = serde_json::to_string_pretty(report)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    stdout.flush()?;
    Ok(())
}
