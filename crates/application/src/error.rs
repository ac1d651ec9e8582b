//! Application-level errors

use domain::{DomainError, TapId};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A tap pair could not be classified and the batch was aborted
    #[error("Classification failed for tap {tap_id}: {source}")]
    Classification {
        tap_id: TapId,
        #[source]
        source: DomainError,
    },

    /// Reading taps failed
    #[error("Tap source error: {0}")]
    Source(String),

    /// Writing trips failed
    #[error("Trip sink error: {0}")]
    Sink(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// The domain error behind this failure, if any
    pub const fn domain_error(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) | Self::Classification { source: e, .. } => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_error_message_names_tap_and_cause() {
        let err = ApplicationError::Classification {
            tap_id: TapId::new(7).unwrap(),
            source: DomainError::unknown_route("STOP1", "STOP9"),
        };
        assert_eq!(
            err.to_string(),
            "Classification failed for tap 7: Unknown travel cost between stops STOP1, STOP9"
        );
    }

    #[test]
    fn domain_error_converts_transparently() {
        let err: ApplicationError = DomainError::no_route_found("STOP4").into();
        assert_eq!(err.to_string(), "No route found touching stop STOP4");
        assert!(err.domain_error().is_some());
    }

    #[test]
    fn io_errors_have_no_domain_cause() {
        let err = ApplicationError::Source("missing file".to_string());
        assert!(err.domain_error().is_none());
    }
}
