//! Price table
//!
//! The fixed set of priced routes. Built once, then only read: every lookup
//! takes `&self`, so one table can be shared by any number of callers.
//!
//! # Examples
//!
//! ```
//! use domain::{PriceTable, StopId};
//!
//! let table = PriceTable::default_seed();
//! let stop3 = StopId::new("STOP3").unwrap();
//!
//! let (route, fare) = table.max_fare_touching(&stop3).unwrap();
//! assert_eq!(route.other_end(&stop3).unwrap().as_str(), "STOP1");
//! assert_eq!(fare.to_string(), "7.30");
//! ```

use std::collections::{BTreeMap, BTreeSet};

use crate::errors::DomainError;
use crate::value_objects::{Fare, Route, StopId};

/// Immutable mapping from route to fare
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceTable {
    fares: BTreeMap<Route, Fare>,
}

impl PriceTable {
    /// Build a table from route/fare entries
    ///
    /// Fails with [`DomainError::DuplicateRoute`] if a route appears twice,
    /// in either direction.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (Route, Fare)>,
    ) -> Result<Self, DomainError> {
        let mut fares = BTreeMap::new();
        for (route, fare) in entries {
            if fares.contains_key(&route) {
                return Err(DomainError::DuplicateRoute(route.to_string()));
            }
            fares.insert(route, fare);
        }
        Ok(Self { fares })
    }

    /// The three-stop network: STOP1-STOP2 3.25, STOP2-STOP3 5.50, STOP1-STOP3 7.30
    #[must_use]
    pub fn default_seed() -> Self {
        let seed = [
            ("STOP1", "STOP2", 325),
            ("STOP2", "STOP3", 550),
            ("STOP1", "STOP3", 730),
        ];

        let fares = seed
            .into_iter()
            .filter_map(|(a, b, cents)| {
                let route = Route::new(StopId::new(a).ok()?, StopId::new(b).ok()?).ok()?;
                Some((route, Fare::from_cents(cents)))
            })
            .collect();

        Self { fares }
    }

    /// Exact, direction-independent lookup
    pub fn fare_for(&self, route: &Route) -> Option<Fare> {
        self.fares.get(route).copied()
    }

    /// Fare for travelling between two stops
    ///
    /// Fails with [`DomainError::UnknownRoute`] naming both stops when the
    /// pair is not priced, including when both stops are the same.
    pub fn fare_between(&self, from: &StopId, to: &StopId) -> Result<Fare, DomainError> {
        Route::new(from.clone(), to.clone())
            .ok()
            .and_then(|route| self.fare_for(&route))
            .ok_or_else(|| DomainError::unknown_route(from.as_str(), to.as_str()))
    }

    /// The most expensive route that has `stop` as an endpoint
    ///
    /// Equal maximum fares are broken by the smallest identifier at the
    /// other end of the route. Fails with [`DomainError::NoRouteFound`] if
    /// no route touches `stop`.
    pub fn max_fare_touching(&self, stop: &StopId) -> Result<(&Route, Fare), DomainError> {
        self.fares
            .iter()
            .filter_map(|(route, fare)| route.other_end(stop).map(|other| (route, *fare, other)))
            .max_by(|(_, fare_a, other_a), (_, fare_b, other_b)| {
                fare_a.cmp(fare_b).then_with(|| other_b.cmp(other_a))
            })
            .map(|(route, fare, _)| (route, fare))
            .ok_or_else(|| DomainError::no_route_found(stop.as_str()))
    }

    /// All priced routes in canonical order
    pub fn routes(&self) -> impl Iterator<Item = (&Route, Fare)> {
        self.fares.iter().map(|(route, fare)| (route, *fare))
    }

    /// Every stop that appears on at least one route
    pub fn stops(&self) -> BTreeSet<&StopId> {
        self.fares
            .keys()
            .flat_map(|route| {
                let (a, b) = route.endpoints();
                [a, b]
            })
            .collect()
    }

    /// Number of priced routes
    pub fn len(&self) -> usize {
        self.fares.len()
    }

    /// Whether the table prices nothing
    pub fn is_empty(&self) -> bool {
        self.fares.is_empty()
    }
}
