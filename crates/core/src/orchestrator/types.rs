//! Error types for the generation orchestrator.

use std::path::PathBuf;

use thiserror::Error;

use crate::client::ApiError;
use crate::poller::PollError;
use crate::request::ValidationError;

/// Errors that end a generation run.
///
/// Transient status-query failures and single-artifact download failures
/// are absorbed inside the poller and the download loop; they never show
/// up here.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Request parameters outside allowed ranges. Raised before any
    /// network call.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// The remote API rejected the submission. Never retried.
    #[error("submission failed: {0}")]
    Submission(#[from] ApiError),

    /// Terminal task failure or deadline expiry, passed through from the
    /// poller unchanged.
    #[error(transparent)]
    Poll(#[from] PollError),

    /// Output directory could not be created.
    #[error("failed to create output directory {path}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure of a single artifact download. Logged and skipped; never
/// aborts the remaining downloads.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
