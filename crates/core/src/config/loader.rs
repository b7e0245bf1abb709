use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Default config file name, looked up relative to the working directory.
const DEFAULT_CONFIG_FILE: &str = "mediagen.toml";

/// Load configuration with environment variable overrides.
///
/// An explicit `path` must exist; without one, `mediagen.toml` is merged
/// only if present, so running with pure defaults plus `MEDIAGEN_*`
/// environment variables works out of the box.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::FileNotFound(p.display().to_string()));
            }
            Toml::file(p)
        }
        None => Toml::file(DEFAULT_CONFIG_FILE),
    };

    let config: Config = Figment::new()
        .merge(file)
        .merge(Env::prefixed("MEDIAGEN_").split("_"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
