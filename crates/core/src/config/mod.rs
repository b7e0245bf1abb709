//! Configuration loading and types.

mod loader;
mod types;

pub use loader::{load_config, load_config_from_str};
pub use types::{ApiConfig, Config};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("API key is not set (pass --api-key, set MEDIAGEN_API_KEY, or add api.key to the config file)")]
    MissingApiKey,
}
