//! Fixed-interval status polling.
//!
//! The poller is the only suspension point in a generation run: between
//! polls the task is fully idle, and the only ways out of the loop are a
//! terminal snapshot or deadline expiry.

use std::time::Duration;

use thiserror::Error;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::client::GenerationApi;
use crate::task::{StatusSnapshot, Task, TaskState};

/// How often a still-pending task is surfaced at info level; individual
/// polls log at debug.
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(60);

/// Terminal polling failures.
#[derive(Debug, Error)]
pub enum PollError {
    /// The remote system reported terminal failure for the task.
    #[error("task {task_id} failed: {message}")]
    TaskFailed { task_id: String, message: String },

    /// Deadline elapsed before a terminal state.
    #[error("timed out after {elapsed_secs}s waiting for task {task_id}")]
    Timeout { task_id: String, elapsed_secs: u64 },
}

/// Polls a task's status until it reaches a terminal state.
pub struct Poller<'a> {
    api: &'a dyn GenerationApi,
}

impl<'a> Poller<'a> {
    pub fn new(api: &'a dyn GenerationApi) -> Self {
        Self { api }
    }

    /// Poll at `interval` until the task completes, fails, or `deadline`
    /// elapses.
    ///
    /// A failed or unusable status query is transient: the tick is slept
    /// out and the loop continues without resetting the deadline. Raw
    /// codes outside the modality's table are non-terminal and retried.
    /// The timeout can only fire at or after `deadline` has elapsed.
    pub async fn poll(
        &self,
        task: &Task,
        interval: Duration,
        deadline: Duration,
    ) -> Result<StatusSnapshot, PollError> {
        let start = Instant::now();
        let mut last_heartbeat = Duration::ZERO;

        while start.elapsed() < deadline {
            let snapshot = match self.api.query_status(&task.id, task.kind).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    debug!("status query for task {} failed, will retry: {}", task.id, e);
                    sleep(interval).await;
                    continue;
                }
            };

            let elapsed = start.elapsed();
            match snapshot.state {
                TaskState::Completed => {
                    info!(
                        "task {} completed after {}s with {} result(s)",
                        task.id,
                        elapsed.as_secs(),
                        snapshot.result_urls.len()
                    );
                    return Ok(snapshot);
                }
                TaskState::Failed => {
                    let message = snapshot
                        .error_message
                        .clone()
                        .unwrap_or_else(|| "unknown error".to_string());
                    return Err(PollError::TaskFailed {
                        task_id: task.id.clone(),
                        message,
                    });
                }
                state => {
                    if elapsed - last_heartbeat >= HEARTBEAT_INTERVAL {
                        info!(
                            "task {} still {} (elapsed: {}s)",
                            task.id,
                            state.as_str(),
                            elapsed.as_secs()
                        );
                        last_heartbeat = elapsed;
                    } else {
                        debug!(
                            "task {}: {} (elapsed: {}s)",
                            task.id,
                            state.as_str(),
                            elapsed.as_secs()
                        );
                    }
                    sleep(interval).await;
                }
            }
        }

        Err(PollError::Timeout {
            task_id: task.id.clone(),
            elapsed_secs: start.elapsed().as_secs(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskKind;
    use crate::testing::MockGenerationApi;

    fn task() -> Task {
        Task::new("task-1", TaskKind::Image)
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_completed_snapshot() {
        let api = MockGenerationApi::new();
        api.push_status(MockGenerationApi::processing()).await;
        api.push_status(MockGenerationApi::processing()).await;
        api.push_status(MockGenerationApi::completed(vec![
            "http://x/a.png".to_string()
        ]))
        .await;

        let poller = Poller::new(&api);
        let snapshot = poller
            .poll(&task(), Duration::from_secs(5), Duration::from_secs(300))
            .await
            .unwrap();

        assert_eq!(snapshot.state, TaskState::Completed);
        assert_eq!(snapshot.result_urls, vec!["http://x/a.png"]);
        assert_eq!(api.query_count().await, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_task_carries_remote_message() {
        let api = MockGenerationApi::new();
        api.push_status(MockGenerationApi::queued()).await;
        api.push_status(MockGenerationApi::failed("content policy violation"))
            .await;

        let poller = Poller::new(&api);
        let err = poller
            .poll(&task(), Duration::from_secs(5), Duration::from_secs(300))
            .await
            .unwrap_err();

        match err {
            PollError::TaskFailed { task_id, message } => {
                assert_eq!(task_id, "task-1");
                assert_eq!(message, "content policy violation");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_codes_are_retried_until_deadline() {
        let api = MockGenerationApi::new();
        // Code 77 is not in any table; the loop must neither crash nor
        // treat it as terminal.
        api.push_status(StatusSnapshot::from_raw(TaskKind::Image, Some(77), vec![], None))
            .await;

        let poller = Poller::new(&api);
        let err = poller
            .poll(&task(), Duration::from_secs(5), Duration::from_secs(30))
            .await
            .unwrap_err();

        assert!(matches!(err, PollError::Timeout { .. }));
        assert!(api.query_count().await > 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_never_fires_early() {
        let api = MockGenerationApi::new();
        api.push_status(MockGenerationApi::processing()).await;

        let poller = Poller::new(&api);
        let start = Instant::now();
        let err = poller
            .poll(&task(), Duration::from_secs(3), Duration::from_secs(10))
            .await
            .unwrap_err();

        assert!(matches!(err, PollError::Timeout { .. }));
        assert!(start.elapsed() >= Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_query_errors_do_not_abort() {
        let api = MockGenerationApi::new();
        api.push_status_error("connection reset").await;
        api.push_status_error("connection reset").await;
        api.push_status(MockGenerationApi::completed(vec![
            "http://x/a.png".to_string()
        ]))
        .await;

        let poller = Poller::new(&api);
        let snapshot = poller
            .poll(&task(), Duration::from_secs(5), Duration::from_secs(300))
            .await
            .unwrap();

        assert_eq!(snapshot.state, TaskState::Completed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_errors_do_not_reset_deadline() {
        let api = MockGenerationApi::new();
        api.push_status_error("unreachable").await;

        let poller = Poller::new(&api);
        let start = Instant::now();
        let err = poller
            .poll(&task(), Duration::from_secs(5), Duration::from_secs(20))
            .await
            .unwrap_err();

        assert!(matches!(err, PollError::Timeout { .. }));
        // 20s deadline, 5s interval: the loop runs its course instead of
        // restarting on every error.
        assert!(start.elapsed() < Duration::from_secs(30));
    }
}
