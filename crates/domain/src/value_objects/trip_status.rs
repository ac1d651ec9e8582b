//! Trip status value object
//!
//! The outcome class assigned to each pair of adjacent taps.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TripStatus {
    /// Boarded and alighted at different stops
    Completed,
    /// Boarded with no alighting tap; charged the maximum fare
    Incomplete,
    /// Boarded and alighted at the same stop; charged nothing
    Cancelled,
}

impl TripStatus {
    /// Upper-case label used in reports
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Completed => "COMPLETED",
            Self::Incomplete => "INCOMPLETE",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// All statuses in report order
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Completed, Self::Incomplete, Self::Cancelled]
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
