//! Error types for API operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when talking to the generation API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The account has no credits left (response code 9000).
    #[error("insufficient credits")]
    InsufficientCredits,

    /// The API rejected the request with a non-success envelope code.
    #[error("API rejected request (code {code}): {message}")]
    Rejected { code: i64, message: String },

    /// Artifact fetch returned a non-success HTTP status.
    #[error("unexpected HTTP status {status} fetching {url}")]
    FetchStatus { status: u16, url: String },

    /// The response body did not match the expected envelope.
    #[error("malformed API response: {0}")]
    Parse(String),

    /// A local source image could not be read.
    #[error("failed to read source image {path}")]
    SourceImage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
