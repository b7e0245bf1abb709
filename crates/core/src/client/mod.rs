//! Generation API abstraction.
//!
//! This module provides a `GenerationApi` trait covering the three remote
//! operations the orchestration core needs (submit, query status, fetch
//! bytes), plus the reqwest-backed implementation.

mod error;
mod http;
mod traits;

pub use error::ApiError;
pub use http::HttpGenerationClient;
pub use traits::{FetchedPayload, GenerationApi};
