//! Tap source port
//!
//! Defines where ordered tap events come from. The infrastructure layer
//! implements this for CSV files.

use async_trait::async_trait;
use domain::TapEvent;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for reading an ordered sequence of taps
///
/// Implementations hand back taps in the order they should be paired and
/// have already dropped records that fail field validation.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TapSourcePort: Send + Sync {
    /// Read every tap from the source
    async fn read_taps(&self) -> Result<Vec<TapEvent>, ApplicationError>;
}
