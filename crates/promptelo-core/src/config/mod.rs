//! Client configuration.
//!
//! Values come from `~/.promptelo/config.json` when present, with
//! `PROMPTELO_*` environment variables taking precedence over the file.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS};

/// Client-side configuration for the novelty service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the community server.
    pub server_url: String,

    /// Optional anonymous user id for personal stats tracking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Request timeout in seconds. Default: `5.0`.
    #[serde(rename = "timeout", default = "default_timeout")]
    pub timeout_secs: f64,
}

fn default_timeout() -> f64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            user_id: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    const ENV_SERVER_URL: &'static str = "PROMPTELO_SERVER_URL";
    const ENV_USER_ID: &'static str = "PROMPTELO_USER_ID";
    const ENV_TIMEOUT_SECS: &'static str = "PROMPTELO_TIMEOUT_SECS";

    /// Loads configuration from the default path plus environment overrides.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default().with_env_overrides(),
        }
    }

    /// Loads configuration from `path` plus environment overrides.
    ///
    /// A missing or unparseable file yields the defaults rather than an
    /// error; the environment always wins over the file.
    pub fn load_from(path: &Path) -> Self {
        let from_file = std::fs::read_to_string(path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();

        Self::with_env_overrides(from_file)
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = env::var(Self::ENV_SERVER_URL) {
            if !url.trim().is_empty() {
                self.server_url = url;
            }
        }
        if let Ok(user_id) = env::var(Self::ENV_USER_ID) {
            if !user_id.trim().is_empty() {
                self.user_id = Some(user_id);
            }
        }
        if let Some(timeout) = env::var(Self::ENV_TIMEOUT_SECS)
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|t| t.is_finite() && *t > 0.0)
        {
            self.timeout_secs = timeout;
        }
        self
    }

    /// Persists the configuration to the default path.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoHomeDir)?;
        self.save_to(&path)
    }

    /// Persists the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::WriteFailed {
                path: path.to_path_buf(),
                source,
            })?;
        }

        let raw = serde_json::to_string_pretty(self)
            .map_err(|source| ConfigError::SerializeFailed { source })?;

        std::fs::write(path, raw).map_err(|source| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `~/.promptelo/config.json`, when a home directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".promptelo").join("config.json"))
    }
}
