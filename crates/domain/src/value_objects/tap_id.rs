//! Tap identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Positive identifier of a single tap record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct TapId(u64);

impl TapId {
    /// Create a tap identifier; zero is rejected
    pub fn new(value: u64) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::ValidationError(
                "Tap id must be positive, got 0".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Get the raw value
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for TapId {
    type Error = DomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TapId> for u64 {
    fn from(id: TapId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_rejected() {
        assert!(TapId::try_from(0).is_err());
    }

    #[test]
    fn positive_id_is_accepted() {
        let id = TapId::try_from(42).unwrap();
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
    }
}
