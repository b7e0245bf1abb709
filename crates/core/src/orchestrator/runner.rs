//! Generation orchestrator implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::client::GenerationApi;
use crate::poller::Poller;
use crate::request::GenerationRequest;
use crate::task::{DownloadedArtifact, Task};

use super::config::OrchestratorConfig;
use super::ext::derive_extension;
use super::types::{ArtifactError, OrchestratorError};

/// Drives one generation task end to end: validate, submit, poll,
/// download. Exactly one task runs per call; the orchestrator owns the
/// polling loop's lifetime.
pub struct GenerationOrchestrator {
    api: Arc<dyn GenerationApi>,
    config: OrchestratorConfig,
}

impl GenerationOrchestrator {
    /// Create an orchestrator over an API implementation.
    pub fn new(api: Arc<dyn GenerationApi>, config: OrchestratorConfig) -> Self {
        Self { api, config }
    }

    /// Run a generation request to completion.
    ///
    /// Returns the artifacts that downloaded successfully, in result-URL
    /// order. A completed task without result URLs yields an empty list;
    /// individual download failures are logged and skipped.
    pub async fn run(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<DownloadedArtifact>, OrchestratorError> {
        // Fail fast on bad parameters, before any network call.
        let submit = request.build()?;
        let kind = submit.kind;

        info!("submitting {} generation request", kind.as_str());
        let task_id = self.api.submit(&submit).await?;
        let task = Task::new(task_id, kind);

        let interval = self.config.poll_interval(kind);
        let deadline = self.config.timeout(kind);
        info!(
            "task {} created, polling every {}s (deadline {}s)",
            task.id,
            interval.as_secs(),
            deadline.as_secs()
        );

        let snapshot = Poller::new(self.api.as_ref())
            .poll(&task, interval, deadline)
            .await?;

        if snapshot.result_urls.is_empty() {
            // The remote system can report success without media, e.g. on
            // quota edge cases. Not an error.
            warn!("task {} completed without result URLs", task.id);
            return Ok(Vec::new());
        }

        self.download_all(&task, &snapshot.result_urls).await
    }

    /// Download every result URL in order, skipping individual failures.
    async fn download_all(
        &self,
        task: &Task,
        urls: &[String],
    ) -> Result<Vec<DownloadedArtifact>, OrchestratorError> {
        tokio::fs::create_dir_all(&self.config.output_dir)
            .await
            .map_err(|source| OrchestratorError::OutputDir {
                path: self.config.output_dir.clone(),
                source,
            })?;

        let mut artifacts = Vec::with_capacity(urls.len());
        for (index, url) in urls.iter().enumerate() {
            debug!(
                "downloading artifact {}/{} for task {}",
                index + 1,
                urls.len(),
                task.id
            );
            match self.download_one(task, index, url).await {
                Ok(artifact) => {
                    info!("downloaded {}", artifact.local_path.display());
                    artifacts.push(artifact);
                }
                Err(e) => {
                    warn!(
                        "failed to download artifact {} of task {} from {}: {}",
                        index, task.id, url, e
                    );
                }
            }
        }

        Ok(artifacts)
    }

    async fn download_one(
        &self,
        task: &Task,
        index: usize,
        url: &str,
    ) -> Result<DownloadedArtifact, ArtifactError> {
        let payload = self.api.fetch(url).await?;

        let extension = derive_extension(task.kind, payload.content_type.as_deref(), url);
        let filename = format!("{}_{}{}", task.id, index, extension);
        let local_path = self.config.output_dir.join(filename);

        tokio::fs::write(&local_path, &payload.bytes)
            .await
            .map_err(|source| ArtifactError::Write {
                path: local_path.clone(),
                source,
            })?;

        Ok(DownloadedArtifact {
            source_url: url.to_string(),
            local_path,
            sequence_index: index,
        })
    }
}
