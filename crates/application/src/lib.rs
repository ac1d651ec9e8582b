//! Application layer - Use cases and orchestration
//!
//! Contains the trip classifier, the batch fare calculation service and the
//! port definitions that ingestion and output adapters implement.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
