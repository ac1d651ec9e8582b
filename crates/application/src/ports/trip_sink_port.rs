//! Trip sink port
//!
//! Defines where classified trips go.

use async_trait::async_trait;
use domain::TripOutcome;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for writing trip outcomes
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TripSinkPort: Send + Sync {
    /// Write all trips, in order, replacing any previous output
    ///
    /// Returns the number of trips written.
    async fn write_trips(&self, trips: &[TripOutcome]) -> Result<usize, ApplicationError>;
}
