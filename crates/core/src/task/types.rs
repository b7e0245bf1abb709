//! Types for generation tasks and their status vocabulary.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Generation modality.
///
/// Carries the per-modality variant data (status vocabulary, polling
/// defaults, wire field names) so every other component can stay
/// modality-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Image,
    Video,
}

impl TaskKind {
    /// Returns the string representation for logging and API paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Image => "image",
            TaskKind::Video => "video",
        }
    }

    /// Map a raw remote status code to a task state.
    ///
    /// Codes outside the table map to `Unknown` and are treated as
    /// non-terminal; the remote vocabulary may grow new codes. Code 5
    /// (upload in progress) only exists in the video vocabulary.
    pub fn map_status(&self, raw: i64) -> TaskState {
        match (self, raw) {
            (_, 1) => TaskState::Queued,
            (_, 2) => TaskState::Processing,
            (_, 3) => TaskState::Completed,
            (_, 4) => TaskState::Failed,
            (TaskKind::Video, 5) => TaskState::Uploading,
            _ => TaskState::Unknown,
        }
    }

    /// Default pause between status polls.
    pub fn default_poll_interval(&self) -> Duration {
        match self {
            TaskKind::Image => Duration::from_secs(5),
            TaskKind::Video => Duration::from_secs(10),
        }
    }

    /// Default deadline for reaching a terminal state.
    pub fn default_timeout(&self) -> Duration {
        match self {
            TaskKind::Image => Duration::from_secs(300),
            TaskKind::Video => Duration::from_secs(1800),
        }
    }

    /// Fallback artifact extension when neither the content type nor the
    /// URL yields a plausible one.
    pub fn default_extension(&self) -> &'static str {
        match self {
            TaskKind::Image => ".png",
            TaskKind::Video => ".mp4",
        }
    }

    /// Longest file suffix the modality considers plausible, dot included.
    pub fn max_extension_len(&self) -> usize {
        match self {
            TaskKind::Image => 6,
            TaskKind::Video => 5,
        }
    }

    /// API path for status queries.
    pub fn status_endpoint(&self) -> &'static str {
        match self {
            TaskKind::Image => "/v1/images/infobytaskid",
            TaskKind::Video => "/v1/video/infobytaskid",
        }
    }

    /// Wire field carrying the raw status code in query responses.
    pub fn status_field(&self) -> &'static str {
        match self {
            TaskKind::Image => "image_status",
            TaskKind::Video => "task_status",
        }
    }

    /// Wire field carrying the failure message in query responses.
    pub fn message_field(&self) -> &'static str {
        match self {
            TaskKind::Image => "error_message",
            TaskKind::Video => "message",
        }
    }
}

/// State of a generation task, derived from the raw remote status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// Waiting in the remote queue.
    Queued,
    /// Generation in progress.
    Processing,
    /// Finished successfully; result URLs are available.
    Completed,
    /// Remote system reports terminal failure.
    Failed,
    /// Result upload in progress (video vocabulary only).
    Uploading,
    /// Code not in the known table; retried as non-terminal.
    Unknown,
}

impl TaskState {
    /// Returns the string representation for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Queued => "queued",
            TaskState::Processing => "processing",
            TaskState::Completed => "completed",
            TaskState::Failed => "failed",
            TaskState::Uploading => "uploading",
            TaskState::Unknown => "unknown",
        }
    }

    /// Only `Completed` and `Failed` end polling.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Completed | TaskState::Failed)
    }
}

/// One submitted generation job. Immutable after creation; all mutable
/// state lives in the polling loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Opaque identifier assigned by the remote API.
    pub id: String,
    /// Modality of the job.
    pub kind: TaskKind,
    /// When the submission succeeded.
    pub submitted_at: DateTime<Utc>,
}

impl Task {
    /// Create a task from a successful submission.
    pub fn new(id: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            id: id.into(),
            kind,
            submitted_at: Utc::now(),
        }
    }
}

/// One polling observation. Each poll produces a new snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Raw status code as reported by the remote API, if any.
    pub raw_code: Option<i64>,
    /// Derived state.
    pub state: TaskState,
    /// Result URLs, populated only on `Completed`.
    #[serde(default)]
    pub result_urls: Vec<String>,
    /// Failure message, populated only on `Failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl StatusSnapshot {
    /// Build a snapshot from raw query-response data.
    ///
    /// A missing status code yields `Unknown`, which the poller retries.
    pub fn from_raw(
        kind: TaskKind,
        raw_code: Option<i64>,
        result_urls: Vec<String>,
        error_message: Option<String>,
    ) -> Self {
        let state = raw_code
            .map(|code| kind.map_status(code))
            .unwrap_or(TaskState::Unknown);
        Self {
            raw_code,
            state,
            result_urls,
            error_message,
        }
    }
}

/// One retrieved result file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadedArtifact {
    /// Remote URL the file was fetched from.
    pub source_url: String,
    /// Where the file was written.
    pub local_path: PathBuf,
    /// Position within the task's result list; used for deterministic naming.
    pub sequence_index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table_shared_codes() {
        for kind in [TaskKind::Image, TaskKind::Video] {
            assert_eq!(kind.map_status(1), TaskState::Queued);
            assert_eq!(kind.map_status(2), TaskState::Processing);
            assert_eq!(kind.map_status(3), TaskState::Completed);
            assert_eq!(kind.map_status(4), TaskState::Failed);
        }
    }

    #[test]
    fn test_uploading_is_video_only() {
        assert_eq!(TaskKind::Video.map_status(5), TaskState::Uploading);
        assert_eq!(TaskKind::Image.map_status(5), TaskState::Unknown);
    }

    #[test]
    fn test_unmapped_codes_are_unknown() {
        for code in [0, 6, 7, 99, -1, 1000] {
            assert_eq!(TaskKind::Image.map_status(code), TaskState::Unknown);
            assert_eq!(TaskKind::Video.map_status(code), TaskState::Unknown);
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(TaskState::Completed.is_terminal());
        assert!(TaskState::Failed.is_terminal());
        assert!(!TaskState::Queued.is_terminal());
        assert!(!TaskState::Processing.is_terminal());
        assert!(!TaskState::Uploading.is_terminal());
        assert!(!TaskState::Unknown.is_terminal());
    }

    #[test]
    fn test_snapshot_from_raw_missing_code() {
        let snapshot = StatusSnapshot::from_raw(TaskKind::Image, None, vec![], None);
        assert_eq!(snapshot.state, TaskState::Unknown);
        assert!(snapshot.raw_code.is_none());
    }

    #[test]
    fn test_snapshot_from_raw_completed() {
        let snapshot = StatusSnapshot::from_raw(
            TaskKind::Video,
            Some(3),
            vec!["http://example.com/a.mp4".to_string()],
            None,
        );
        assert_eq!(snapshot.state, TaskState::Completed);
        assert_eq!(snapshot.result_urls.len(), 1);
    }

    #[test]
    fn test_modality_defaults() {
        assert_eq!(TaskKind::Image.default_poll_interval(), Duration::from_secs(5));
        assert_eq!(TaskKind::Image.default_timeout(), Duration::from_secs(300));
        assert_eq!(TaskKind::Video.default_poll_interval(), Duration::from_secs(10));
        assert_eq!(TaskKind::Video.default_timeout(), Duration::from_secs(1800));
        assert_eq!(TaskKind::Image.default_extension(), ".png");
        assert_eq!(TaskKind::Video.default_extension(), ".mp4");
    }

    #[test]
    fn test_task_kind_serialization() {
        assert_eq!(serde_json::to_string(&TaskKind::Image).unwrap(), "\"image\"");
        assert_eq!(serde_json::to_string(&TaskKind::Video).unwrap(), "\"video\"");
    }
}
