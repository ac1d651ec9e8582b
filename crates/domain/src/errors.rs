//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A mandatory input was absent
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A completed trip references a stop combination with no fare
    #[error("Unknown travel cost between stops {from}, {to}")]
    UnknownRoute { from: String, to: String },

    /// No route in the price table touches the stop
    #[error("No route found touching stop {stop}")]
    NoRouteFound { stop: String },

    /// A route must join two distinct stops
    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    /// The same route was priced twice
    #[error("Duplicate route: {0}")]
    DuplicateRoute(String),

    /// Fare amount out of range or unparseable
    #[error("Invalid fare: {0}")]
    InvalidFare(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create an unknown route error
    pub fn unknown_route(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::UnknownRoute {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create a no route found error
    pub fn no_route_found(stop: impl Into<String>) -> Self {
        Self::NoRouteFound { stop: stop.into() }
    }
}
