//! Trait definition for the generation API collaborators.

use async_trait::async_trait;

use crate::request::SubmitRequest;
use crate::task::{StatusSnapshot, TaskKind};

use super::error::ApiError;

/// A fetched artifact body plus its declared content type.
#[derive(Debug, Clone)]
pub struct FetchedPayload {
    /// Raw response body.
    pub bytes: Vec<u8>,
    /// Declared content type, lowercased, parameters stripped.
    pub content_type: Option<String>,
}

/// The three remote operations the orchestration core depends on.
///
/// Implementations own the transport details; callers never see HTTP.
#[async_trait]
pub trait GenerationApi: Send + Sync {
    /// Submit a generation request; returns the task identifier.
    async fn submit(&self, request: &SubmitRequest) -> Result<String, ApiError>;

    /// Query the current status of a task.
    async fn query_status(
        &self,
        task_id: &str,
        kind: TaskKind,
    ) -> Result<StatusSnapshot, ApiError>;

    /// Retrieve one result artifact.
    async fn fetch(&self, url: &str) -> Result<FetchedPayload, ApiError>;
}
