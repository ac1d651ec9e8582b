//! Input and output file locations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where taps are read from and trips are written to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Tap CSV to read
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Trip CSV to write, replaced on every run
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_input() -> PathBuf {
    PathBuf::from("taps.csv")
}

fn default_output() -> PathBuf {
    PathBuf::from("trips.csv")
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
        }
    }
}
