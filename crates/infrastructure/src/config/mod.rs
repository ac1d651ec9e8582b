//! Application configuration
//!
//! Split into focused sub-modules:
//! - `files`: tap input and trip output paths
//! - `processing`: pairing mode and batch error policy
//! - `fares`: the route price list
//!
//! Sources are layered: built-in defaults, then an optional TOML file, then
//! `FARE_ENGINE_*` environment variables (nested keys joined by `__`, e.g.
//! `FARE_ENGINE_FILES__INPUT`).

mod fares;
mod files;
mod processing;

use std::path::Path;

use domain::PriceTable;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use fares::{FareEntry, price_table_from};
pub use files::FilesConfig;
pub use processing::ProcessingConfig;

use crate::telemetry::LoggingConfig;

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "fare-engine";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "FARE_ENGINE";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Input and output files
    #[serde(default)]
    pub files: FilesConfig,

    /// Pairing and error handling
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Route prices; empty means the built-in table
    #[serde(default)]
    pub fares: Vec<FareEntry>,
}

impl AppConfig {
    /// Load configuration from defaults, a file and the environment
    ///
    /// With `path` set, that file must exist. Otherwise `fare-engine.toml`
    /// in the working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("files.input", "taps.csv")?
            .set_default("files.output", "trips.csv")?
            .set_default("processing.error_policy", "skip_and_log")?
            .set_default("processing.pairing", "adjacent")?
            .set_default("logging.filter", "info")?
            .set_default("logging.json", false)?
            .add_source(file)
            // Override with environment variables (e.g., FARE_ENGINE_FILES__OUTPUT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(
            input = %config.files.input.display(),
            output = %config.files.output.display(),
            fares = config.fares.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Build the price table described by `fares`
    pub fn price_table(&self) -> Result<PriceTable, config::ConfigError> {
        price_table_from(&self.fares).map_err(|e| config::ConfigError::Message(e.to_string()))
    }
}
