//! Reqwest-backed generation API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ApiConfig;
use crate::request::SubmitRequest;
use crate::task::{StatusSnapshot, TaskKind};

use super::error::ApiError;
use super::traits::{FetchedPayload, GenerationApi};

/// Envelope code for a successful API response.
const CODE_SUCCESS: i64 = 1000;

/// Envelope code for the insufficient-credits rejection.
const CODE_INSUFFICIENT_CREDITS: i64 = 9000;

/// HTTP client for the generation API.
pub struct HttpGenerationClient {
    client: Client,
    base_url: String,
    api_key: String,
    submit_timeout: Duration,
    query_timeout: Duration,
    fetch_timeout: Duration,
}

impl HttpGenerationClient {
    /// Create a client from configuration and a resolved credential.
    pub fn new(config: &ApiConfig, api_key: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            submit_timeout: Duration::from_secs(config.submit_timeout_secs),
            query_timeout: Duration::from_secs(config.query_timeout_secs),
            fetch_timeout: Duration::from_secs(config.fetch_timeout_secs),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Unwrap the `{code, msg, data}` envelope, mapping rejection codes to
    /// typed errors.
    fn unwrap_envelope<T>(envelope: Envelope<T>) -> Result<T, ApiError> {
        if envelope.code != CODE_SUCCESS {
            if envelope.code == CODE_INSUFFICIENT_CREDITS {
                return Err(ApiError::InsufficientCredits);
            }
            return Err(ApiError::Rejected {
                code: envelope.code,
                message: envelope
                    .msg
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        envelope
            .data
            .ok_or_else(|| ApiError::Parse("missing data in success response".to_string()))
    }
}

#[async_trait]
impl GenerationApi for HttpGenerationClient {
    async fn submit(&self, request: &SubmitRequest) -> Result<String, ApiError> {
        let mut form = Form::new();
        for (name, value) in &request.fields {
            form = form.text(*name, value.clone());
        }

        // Source images are read fully before the request is built, so no
        // file handle outlives submission on any exit path.
        for path in &request.source_images {
            let bytes = tokio::fs::read(path).await.map_err(|source| {
                ApiError::SourceImage {
                    path: path.clone(),
                    source,
                }
            })?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "source".to_string());
            form = form.part("sourceImage", Part::bytes(bytes).file_name(file_name));
        }

        if let Some(ref url) = request.image_url {
            form = form.text("imageUrl", url.clone());
        }

        let endpoint = self.url(request.endpoint);
        debug!("submitting {} request to {}", request.kind.as_str(), endpoint);

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .timeout(self.submit_timeout)
            .send()
            .await?;

        let envelope: Envelope<SubmitData> = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(format!("failed to parse submit response: {}", e)))?;

        let data = Self::unwrap_envelope(envelope)?;
        Ok(data.taskid)
    }

    async fn query_status(
        &self,
        task_id: &str,
        kind: TaskKind,
    ) -> Result<StatusSnapshot, ApiError> {
        let body = match kind {
            TaskKind::Image => serde_json::json!({ "taskid": task_id }),
            TaskKind::Video => serde_json::json!({ "taskid": task_id, "moreTaskInfo": false }),
        };

        let response = self
            .client
            .post(self.url(kind.status_endpoint()))
            .bearer_auth(&self.api_key)
            .json(&body)
            .timeout(self.query_timeout)
            .send()
            .await?;

        let envelope: Envelope<Value> = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(format!("failed to parse status response: {}", e)))?;

        let data = Self::unwrap_envelope(envelope)?;

        // The raw-status and message field names are modality vocabulary,
        // so extraction goes through the kind instead of a fixed struct.
        let raw_code = data.get(kind.status_field()).and_then(Value::as_i64);
        let result_urls = data
            .get("url")
            .and_then(Value::as_array)
            .map(|urls| {
                urls.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let error_message = data
            .get(kind.message_field())
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(StatusSnapshot::from_raw(
            kind,
            raw_code,
            result_urls,
            error_message,
        ))
    }

    async fn fetch(&self, url: &str) -> Result<FetchedPayload, ApiError> {
        let response = self
            .client
            .get(url)
            .timeout(self.fetch_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::FetchStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(|value| value.trim().to_ascii_lowercase());

        let bytes = response.bytes().await?;

        Ok(FetchedPayload {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

// ============================================================================
// Wire types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    code: i64,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<T>,
}

#[derive(Debug, Default, Deserialize)]
struct SubmitData {
    taskid: String,
}
