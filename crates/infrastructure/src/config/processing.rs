//! Batch processing behaviour.

use application::{BatchErrorPolicy, PairingMode};
use serde::{Deserialize, Serialize};

/// How a tap batch is paired and how failures are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// `skip_and_log` or `abort_all`
    #[serde(default)]
    pub error_policy: BatchErrorPolicy,

    /// `adjacent` or `per_card`
    #[serde(default)]
    pub pairing: PairingMode,
}
