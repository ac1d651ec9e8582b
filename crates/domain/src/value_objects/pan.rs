//! Primary Account Number value object
//!
//! The PAN is treated as an opaque card identifier. It is never parsed or
//! checksummed here; [`Pan::masked`] exists so log lines never carry the
//! full number.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Number of trailing digits left visible by [`Pan::masked`]
const VISIBLE_SUFFIX: usize = 4;

/// Card Primary Account Number
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pan(String);

impl Pan {
    /// Create a PAN, rejecting blank input
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(DomainError::ValidationError(
                "PAN must not be blank".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Get the full PAN
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// PAN with everything but the last four characters replaced by `*`
    #[must_use]
    pub fn masked(&self) -> String {
        let len = self.0.chars().count();
        let hidden = len.saturating_sub(VISIBLE_SUFFIX);
        self.0
            .chars()
            .enumerate()
            .map(|(i, c)| if i < hidden { '*' } else { c })
            .collect()
    }
}

// Debug goes to logs, so it must not leak the full number.
impl fmt::Debug for Pan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pan").field(&self.masked()).finish()
    }
}

impl fmt::Display for Pan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Pan {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Pan> for String {
    fn from(pan: Pan) -> Self {
        pan.0
    }
}
