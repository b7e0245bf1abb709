//! Mock generation API for tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::client::{ApiError, FetchedPayload, GenerationApi};
use crate::request::SubmitRequest;
use crate::task::{StatusSnapshot, TaskKind};

/// Scripted outcome of a submit call.
#[derive(Debug, Clone)]
enum SubmitScript {
    Ok(String),
    InsufficientCredits,
    Rejected { code: i64, message: String },
}

/// Scripted outcome of a status query.
#[derive(Debug, Clone)]
enum StatusScript {
    Snapshot(StatusSnapshot),
    TransientError(String),
}

/// Scripted outcome of an artifact fetch.
#[derive(Debug, Clone)]
enum FetchScript {
    Payload(FetchedPayload),
    NotFound,
}

/// Mock implementation of the `GenerationApi` trait.
///
/// Provides controllable behavior for testing:
/// - Record submitted requests for assertions
/// - Play back a scripted sequence of status snapshots
/// - Map URLs to fetch payloads or failures
///
/// The status script is consumed in order; the last entry repeats once
/// the queue runs down to it, so an endless polling loop always has an
/// answer.
pub struct MockGenerationApi {
    submit_script: RwLock<SubmitScript>,
    status_script: RwLock<VecDeque<StatusScript>>,
    fetch_script: RwLock<HashMap<String, FetchScript>>,
    submitted: Arc<RwLock<Vec<SubmitRequest>>>,
    query_count: RwLock<usize>,
}

impl Default for MockGenerationApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerationApi {
    /// Create a mock whose submit succeeds with task id `task-1`.
    pub fn new() -> Self {
        Self {
            submit_script: RwLock::new(SubmitScript::Ok("task-1".to_string())),
            status_script: RwLock::new(VecDeque::new()),
            fetch_script: RwLock::new(HashMap::new()),
            submitted: Arc::new(RwLock::new(Vec::new())),
            query_count: RwLock::new(0),
        }
    }

    /// Make submit succeed with the given task id.
    pub async fn set_submit_ok(&self, task_id: &str) {
        *self.submit_script.write().await = SubmitScript::Ok(task_id.to_string());
    }

    /// Make submit fail with the insufficient-credits code.
    pub async fn set_submit_insufficient_credits(&self) {
        *self.submit_script.write().await = SubmitScript::InsufficientCredits;
    }

    /// Make submit fail with an arbitrary rejection.
    pub async fn set_submit_rejected(&self, code: i64, message: &str) {
        *self.submit_script.write().await = SubmitScript::Rejected {
            code,
            message: message.to_string(),
        };
    }

    /// Queue a status snapshot.
    pub async fn push_status(&self, snapshot: StatusSnapshot) {
        self.status_script
            .write()
            .await
            .push_back(StatusScript::Snapshot(snapshot));
    }

    /// Queue a transient status-query failure.
    pub async fn push_status_error(&self, message: &str) {
        self.status_script
            .write()
            .await
            .push_back(StatusScript::TransientError(message.to_string()));
    }

    /// Map a URL to a successful fetch.
    pub async fn set_fetch(&self, url: &str, bytes: Vec<u8>, content_type: Option<&str>) {
        self.fetch_script.write().await.insert(
            url.to_string(),
            FetchScript::Payload(FetchedPayload {
                bytes,
                content_type: content_type.map(str::to_string),
            }),
        );
    }

    /// Map a URL to a fetch failure.
    pub async fn set_fetch_error(&self, url: &str) {
        self.fetch_script
            .write()
            .await
            .insert(url.to_string(), FetchScript::NotFound);
    }

    /// Requests recorded by submit, in call order.
    pub async fn submitted(&self) -> Vec<SubmitRequest> {
        self.submitted.read().await.clone()
    }

    /// Number of status queries made so far.
    pub async fn query_count(&self) -> usize {
        *self.query_count.read().await
    }

    /// A queued snapshot (image vocabulary, code 1).
    pub fn queued() -> StatusSnapshot {
        StatusSnapshot::from_raw(TaskKind::Image, Some(1), vec![], None)
    }

    /// A processing snapshot (code 2).
    pub fn processing() -> StatusSnapshot {
        StatusSnapshot::from_raw(TaskKind::Image, Some(2), vec![], None)
    }

    /// A completed snapshot (code 3) with the given result URLs.
    pub fn completed(urls: Vec<String>) -> StatusSnapshot {
        StatusSnapshot::from_raw(TaskKind::Image, Some(3), urls, None)
    }

    /// A failed snapshot (code 4) with the given message.
    pub fn failed(message: &str) -> StatusSnapshot {
        StatusSnapshot::from_raw(TaskKind::Image, Some(4), vec![], Some(message.to_string()))
    }
}

#[async_trait]
impl GenerationApi for MockGenerationApi {
    async fn submit(&self, request: &SubmitRequest) -> Result<String, ApiError> {
        self.submitted.write().await.push(request.clone());

        match self.submit_script.read().await.clone() {
            SubmitScript::Ok(task_id) => Ok(task_id),
            SubmitScript::InsufficientCredits => Err(ApiError::InsufficientCredits),
            SubmitScript::Rejected { code, message } => Err(ApiError::Rejected { code, message }),
        }
    }

    async fn query_status(
        &self,
        _task_id: &str,
        _kind: TaskKind,
    ) -> Result<StatusSnapshot, ApiError> {
        *self.query_count.write().await += 1;

        let mut script = self.status_script.write().await;
        let entry = if script.len() > 1 {
            script.pop_front()
        } else {
            script.front().cloned()
        };

        match entry {
            Some(StatusScript::Snapshot(snapshot)) => Ok(snapshot),
            Some(StatusScript::TransientError(message)) => Err(ApiError::Parse(message)),
            None => Err(ApiError::Parse("no scripted status".to_string())),
        }
    }

    async fn fetch(&self, url: &str) -> Result<FetchedPayload, ApiError> {
        match self.fetch_script.read().await.get(url) {
            Some(FetchScript::Payload(payload)) => Ok(payload.clone()),
            Some(FetchScript::NotFound) | None => Err(ApiError::FetchStatus {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}
