//! Logging setup
//!
//! Installs a `tracing` subscriber writing to stderr, either human-readable
//! or as JSON lines.

mod logging;

pub use logging::{LoggingConfig, TelemetryError, init_logging};
