//! Trip outcome entity
//!
//! One outcome is produced per pair of adjacent taps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{BusId, CompanyId, Fare, Pan, StopId, TripStatus};

/// Result of classifying a pair of taps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripOutcome {
    /// When the trip started
    pub started: DateTime<Utc>,
    /// When the trip finished
    pub finished: DateTime<Utc>,
    /// Seconds between start and finish; negative for out-of-order taps
    pub duration_secs: i64,
    /// Boarding stop
    pub from_stop: StopId,
    /// Alighting stop, or the inferred far end for incomplete trips
    pub to_stop: StopId,
    /// Amount charged
    pub charge: Fare,
    /// Company of the boarding tap
    pub company: CompanyId,
    /// Bus of the boarding tap
    pub bus: BusId,
    /// Card of the boarding tap
    pub pan: Pan,
    /// Classification
    pub status: TripStatus,
}

impl TripOutcome {
    /// Whether the card is charged anything for this trip
    pub fn is_chargeable(&self) -> bool {
        !self.charge.is_zero()
    }
}
