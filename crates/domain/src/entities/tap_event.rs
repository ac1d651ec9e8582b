//! Tap event entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{BusId, CompanyId, Pan, StopId, TapDirection, TapId};

/// A single card tap at a stop
///
/// Field-level validity (positive id, non-blank identifiers, timestamp not
/// in the future) is established by whoever builds the tap; the fare engine
/// takes it as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapEvent {
    /// Record identifier
    pub id: TapId,
    /// When the tap happened (UTC)
    pub timestamp: DateTime<Utc>,
    /// Boarding or alighting
    pub direction: TapDirection,
    /// Stop where the tap happened
    pub stop: StopId,
    /// Operating company
    pub company: CompanyId,
    /// Bus the reader is mounted on
    pub bus: BusId,
    /// Card that tapped
    pub pan: Pan,
}

impl TapEvent {
    /// Create a new tap event
    #[must_use]
    pub fn new(
        id: TapId,
        timestamp: DateTime<Utc>,
        direction: TapDirection,
        stop: StopId,
        company: CompanyId,
        bus: BusId,
        pan: Pan,
    ) -> Self {
        Self {
            id,
            timestamp,
            direction,
            stop,
            company,
            bus,
            pan,
        }
    }

    /// Seconds since the Unix epoch
    pub fn epoch_seconds(&self) -> i64 {
        self.timestamp.timestamp()
    }

    /// Whether this is a boarding tap
    pub fn is_on(&self) -> bool {
        self.direction == TapDirection::On
    }

    /// Whether this is an alighting tap
    pub fn is_off(&self) -> bool {
        self.direction == TapDirection::Off
    }

    /// Signed seconds from this tap to `later`
    ///
    /// Negative when `later` actually precedes this tap.
    pub fn seconds_until(&self, later: &Self) -> i64 {
        later.epoch_seconds() - self.epoch_seconds()
    }
}
