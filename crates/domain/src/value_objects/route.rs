//! Route value object
//!
//! A route is an unordered pair of distinct stops. The endpoints are stored
//! in sorted order, so `Route::new(a, b)` and `Route::new(b, a)` produce the
//! same value under the derived `Eq`, `Hash` and `Ord`.
//!
//! # Examples
//!
//! ```
//! use domain::{Route, StopId};
//!
//! let one = StopId::new("STOP1").unwrap();
//! let two = StopId::new("STOP2").unwrap();
//!
//! let forward = Route::new(one.clone(), two.clone()).unwrap();
//! let backward = Route::new(two, one).unwrap();
//! assert_eq!(forward, backward);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::StopId;
use crate::errors::DomainError;

/// Direction-independent pair of stops
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(StopId, StopId)", into = "(StopId, StopId)")]
pub struct Route {
    low: StopId,
    high: StopId,
}

impl Route {
    /// Create a route between two distinct stops
    pub fn new(a: StopId, b: StopId) -> Result<Self, DomainError> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Ok(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Ok(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => Err(DomainError::InvalidRoute(format!(
                "a route needs two distinct stops, got {a} twice"
            ))),
        }
    }

    /// Endpoints in canonical order
    pub fn endpoints(&self) -> (&StopId, &StopId) {
        (&self.low, &self.high)
    }

    /// Whether `stop` is one of the endpoints
    pub fn contains(&self, stop: &StopId) -> bool {
        self.low == *stop || self.high == *stop
    }

    /// The endpoint opposite `stop`, if `stop` is on this route
    pub fn other_end(&self, stop: &StopId) -> Option<&StopId> {
        if self.low == *stop {
            Some(&self.high)
        } else if self.high == *stop {
            Some(&self.low)
        } else {
            None
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.low, self.high)
    }
}

impl TryFrom<(StopId, StopId)> for Route {
    type Error = DomainError;

    fn try_from((a, b): (StopId, StopId)) -> Result<Self, Self::Error> {
        Self::new(a, b)
    }
}

impl From<Route> for (StopId, StopId) {
    fn from(route: Route) -> Self {
        (route.low, route.high)
    }
}
