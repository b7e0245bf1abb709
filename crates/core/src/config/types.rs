use serde::{Deserialize, Serialize};

use crate::orchestrator::OrchestratorConfig;

use super::ConfigError;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
}

impl Config {
    /// Resolve the API credential. A CLI-supplied override beats the
    /// config/env value; an empty string counts as unset.
    pub fn api_key(&self, cli_override: Option<&str>) -> Result<String, ConfigError> {
        cli_override
            .map(str::to_string)
            .or_else(|| self.api.key.clone())
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }
}

/// Generation API endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// API key. Usually supplied via the MEDIAGEN_API_KEY environment
    /// variable rather than written into the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Base URL of the generation API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Timeout for submission requests in seconds.
    #[serde(default = "default_submit_timeout")]
    pub submit_timeout_secs: u64,
    /// Timeout for status queries in seconds.
    #[serde(default = "default_query_timeout")]
    pub query_timeout_secs: u64,
    /// Timeout for artifact downloads in seconds.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: None,
            base_url: default_base_url(),
            submit_timeout_secs: default_submit_timeout(),
            query_timeout_secs: default_query_timeout(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://test.tensorai.tensorslab.com".to_string()
}

fn default_submit_timeout() -> u64 {
    60
}

fn default_query_timeout() -> u64 {
    30
}

fn default_fetch_timeout() -> u64 {
    300
}
