//! Orchestrator configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::task::TaskKind;

/// Configuration for the generation orchestrator.
///
/// Poll interval and timeout are optional; when unset, the modality
/// defaults apply (image: 5 s / 300 s, video: 10 s / 1800 s).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Directory where downloaded artifacts are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Seconds between status polls.
    #[serde(default)]
    pub poll_interval_secs: Option<u64>,

    /// Maximum seconds to wait for a terminal state.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("mediagen_output")
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            poll_interval_secs: None,
            timeout_secs: None,
        }
    }
}

impl OrchestratorConfig {
    /// Effective poll interval for a modality.
    pub fn poll_interval(&self, kind: TaskKind) -> Duration {
        self.poll_interval_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| kind.default_poll_interval())
    }

    /// Effective deadline for a modality.
    pub fn timeout(&self, kind: TaskKind) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| kind.default_timeout())
    }
}
