//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports for CSV files, loads configuration and
//! sets up logging.

pub mod adapters;
pub mod config;
pub mod telemetry;
pub mod validation;

pub use adapters::*;
pub use config::{AppConfig, FareEntry, FilesConfig, ProcessingConfig};
pub use telemetry::{LoggingConfig, TelemetryError, init_logging};
pub use validation::{TAP_TIMESTAMP_FORMAT, TapRecord, TapRecordError};
