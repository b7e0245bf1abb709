//! Orchestrator lifecycle integration tests.
//!
//! These tests drive complete generation runs against the mock API:
//! submit -> poll -> download, including the failure paths.

use std::sync::Arc;

use tempfile::TempDir;

use mediagen_core::{
    testing::MockGenerationApi, ApiError, GenerationOrchestrator, GenerationRequest, ImageRequest,
    OrchestratorConfig, OrchestratorError, PollError, ValidationError, VideoRequest,
};

/// Test helper bundling the mock API and a temp output directory.
struct TestHarness {
    api: Arc<MockGenerationApi>,
    _temp_dir: TempDir,
    output_dir: std::path::PathBuf,
}

impl TestHarness {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_dir = temp_dir.path().join("artifacts");
        Self {
            api: Arc::new(MockGenerationApi::new()),
            output_dir,
            _temp_dir: temp_dir,
        }
    }

    fn create_orchestrator(&self) -> GenerationOrchestrator {
        let config = OrchestratorConfig {
            output_dir: self.output_dir.clone(),
            poll_interval_secs: Some(1),
            timeout_secs: Some(60),
        };
        GenerationOrchestrator::new(Arc::clone(&self.api) as Arc<dyn mediagen_core::GenerationApi>, config)
    }

    fn image_request(prompt: &str) -> GenerationRequest {
        ImageRequest::new(prompt).into()
    }
}

#[tokio::test(start_paused = true)]
async fn test_happy_path_two_polls_then_completed() {
    let harness = TestHarness::new();
    harness.api.set_submit_ok("abc").await;
    harness.api.push_status(MockGenerationApi::processing()).await;
    harness.api.push_status(MockGenerationApi::processing()).await;
    harness
        .api
        .push_status(MockGenerationApi::completed(vec![
            "http://x/a.png".to_string()
        ]))
        .await;
    harness
        .api
        .set_fetch("http://x/a.png", vec![1, 2, 3], Some("image/png"))
        .await;

    let artifacts = harness
        .create_orchestrator()
        .run(&TestHarness::image_request("a cat on the moon"))
        .await
        .unwrap();

    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].sequence_index, 0);
    assert!(artifacts[0]
        .local_path
        .to_string_lossy()
        .ends_with("abc_0.png"));
    assert_eq!(std::fs::read(&artifacts[0].local_path).unwrap(), vec![1, 2, 3]);
    assert_eq!(harness.api.query_count().await, 3);
}

#[tokio::test(start_paused = true)]
async fn test_insufficient_credits_fails_before_polling() {
    let harness = TestHarness::new();
    harness.api.set_submit_insufficient_credits().await;

    let err = harness
        .create_orchestrator()
        .run(&TestHarness::image_request("a cat"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrchestratorError::Submission(ApiError::InsufficientCredits)
    ));
    assert_eq!(harness.api.query_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_submission_rejected_not_retried() {
    let harness = TestHarness::new();
    harness.api.set_submit_rejected(9999, "bad prompt").await;

    let err = harness
        .create_orchestrator()
        .run(&TestHarness::image_request("a cat"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrchestratorError::Submission(ApiError::Rejected { code: 9999, .. })
    ));
    assert_eq!(harness.api.submitted().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_validation_fails_before_submit() {
    let harness = TestHarness::new();

    let request: GenerationRequest = VideoRequest::new("epic timelapse")
        .with_duration_secs(20)
        .into();
    let err = harness.create_orchestrator().run(&request).await.unwrap_err();

    assert!(matches!(
        err,
        OrchestratorError::Validation(ValidationError::DurationOutOfRange { got: 20, .. })
    ));
    assert!(harness.api.submitted().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_local_source_images_preferred_over_url() {
    let harness = TestHarness::new();
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("photo.png");
    std::fs::write(&source, b"fake image").unwrap();

    harness
        .api
        .push_status(MockGenerationApi::completed(vec![]))
        .await;

    let request: GenerationRequest = ImageRequest::new("restyle this")
        .with_source_image(&source)
        .with_image_url("http://example.com/photo.png")
        .into();
    harness.create_orchestrator().run(&request).await.unwrap();

    let submitted = harness.api.submitted().await;
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].source_images, vec![source]);
    assert!(submitted[0].image_url.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_completed_without_urls_returns_empty_list() {
    let harness = TestHarness::new();
    harness
        .api
        .push_status(MockGenerationApi::completed(vec![]))
        .await;

    let artifacts = harness
        .create_orchestrator()
        .run(&TestHarness::image_request("a cat"))
        .await
        .unwrap();

    assert!(artifacts.is_empty());
    assert!(!harness.output_dir.exists());
}

#[tokio::test(start_paused = true)]
async fn test_failed_download_skipped_others_kept() {
    let harness = TestHarness::new();
    harness.api.set_submit_ok("task-9").await;
    harness
        .api
        .push_status(MockGenerationApi::completed(vec![
            "http://x/0.png".to_string(),
            "http://x/1.png".to_string(),
            "http://x/2.png".to_string(),
        ]))
        .await;
    harness
        .api
        .set_fetch("http://x/0.png", vec![0], Some("image/png"))
        .await;
    harness.api.set_fetch_error("http://x/1.png").await;
    harness
        .api
        .set_fetch("http://x/2.png", vec![2], Some("image/png"))
        .await;

    let artifacts = harness
        .create_orchestrator()
        .run(&TestHarness::image_request("three cats"))
        .await
        .unwrap();

    // Index 1 failed; 0 and 2 survive in order.
    assert_eq!(artifacts.len(), 2);
    assert_eq!(artifacts[0].sequence_index, 0);
    assert_eq!(artifacts[1].sequence_index, 2);
    assert!(artifacts[1]
        .local_path
        .to_string_lossy()
        .ends_with("task-9_2.png"));
}

#[tokio::test(start_paused = true)]
async fn test_task_failure_propagates_message() {
    let harness = TestHarness::new();
    harness
        .api
        .push_status(MockGenerationApi::failed("model overloaded"))
        .await;

    let err = harness
        .create_orchestrator()
        .run(&TestHarness::image_request("a cat"))
        .await
        .unwrap_err();

    match err {
        OrchestratorError::Poll(PollError::TaskFailed { message, .. }) => {
            assert_eq!(message, "model overloaded");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_timeout_when_never_terminal() {
    let harness = TestHarness::new();
    harness.api.push_status(MockGenerationApi::queued()).await;

    let err = harness
        .create_orchestrator()
        .run(&TestHarness::image_request("a cat"))
        .await
        .unwrap_err();

    match err {
        OrchestratorError::Poll(PollError::Timeout { elapsed_secs, .. }) => {
            assert!(elapsed_secs >= 60);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_extension_falls_back_to_url_then_default() {
    let harness = TestHarness::new();
    harness.api.set_submit_ok("t").await;
    harness
        .api
        .push_status(MockGenerationApi::completed(vec![
            "http://x/a.webp".to_string(),
            "http://x/b".to_string(),
        ]))
        .await;
    // No usable content type on either payload.
    harness.api.set_fetch("http://x/a.webp", vec![1], None).await;
    harness
        .api
        .set_fetch("http://x/b", vec![2], Some("application/octet-stream"))
        .await;

    let artifacts = harness
        .create_orchestrator()
        .run(&TestHarness::image_request("two cats"))
        .await
        .unwrap();

    assert!(artifacts[0].local_path.to_string_lossy().ends_with("t_0.webp"));
    assert!(artifacts[1].local_path.to_string_lossy().ends_with("t_1.png"));
}
