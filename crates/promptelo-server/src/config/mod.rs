//! Environment-backed server configuration.
//!
//! Most settings have defaults. Override with `PROMPTELO_*` environment
//! variables; the embedding API key comes from `OPENAI_API_KEY`.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;

use crate::embedding::{DEFAULT_EMBEDDING_BASE_URL, DEFAULT_EMBEDDING_DIM, DEFAULT_EMBEDDING_MODEL};
use crate::novelty::DEFAULT_NEIGHBOR_K;
use crate::store::DEFAULT_COLLECTION_NAME;

/// Which vector store backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Exact in-memory store (no persistence across restarts).
    Memory,
    /// Qdrant collection.
    Qdrant,
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Store backend. Default: [`StoreBackend::Memory`].
    pub store_backend: StoreBackend,

    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Qdrant collection name. Default: `prompt_embeddings`.
    pub collection_name: String,

    /// Base URL of the OpenAI-compatible embedding API.
    pub embedding_base_url: String,

    /// Embedding API key; without one the embedder runs in stub mode.
    pub embedding_api_key: Option<String>,

    /// Embedding model name.
    pub embedding_model: String,

    /// Embedding vector dimension. Default: `1536`.
    pub embedding_dim: usize,

    /// Neighbors fetched per evaluation. Default: `50`.
    pub neighbor_k: usize,

    /// Allowed requests per rate-limit window. Default: `60`.
    pub rate_limit_requests: u32,

    /// Rate-limit window in seconds. Default: `60`.
    pub rate_limit_window_secs: u64,
}

/// Default Qdrant URL used when `PROMPTELO_QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            store_backend: StoreBackend::Memory,
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
            embedding_base_url: DEFAULT_EMBEDDING_BASE_URL.to_string(),
            embedding_api_key: None,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            neighbor_k: DEFAULT_NEIGHBOR_K,
            rate_limit_requests: 60,
            rate_limit_window_secs: 60,
        }
    }
}

impl ServerConfig {
    const ENV_PORT: &'static str = "PROMPTELO_PORT";
    const ENV_BIND_ADDR: &'static str = "PROMPTELO_BIND_ADDR";
    const ENV_STORE: &'static str = "PROMPTELO_STORE";
    const ENV_QDRANT_URL: &'static str = "PROMPTELO_QDRANT_URL";
    const ENV_COLLECTION: &'static str = "PROMPTELO_COLLECTION";
    const ENV_EMBEDDING_URL: &'static str = "PROMPTELO_EMBEDDING_URL";
    const ENV_EMBEDDING_API_KEY: &'static str = "OPENAI_API_KEY";
    const ENV_EMBEDDING_MODEL: &'static str = "PROMPTELO_EMBEDDING_MODEL";
    const ENV_EMBEDDING_DIM: &'static str = "PROMPTELO_EMBEDDING_DIM";
    const ENV_NEIGHBOR_K: &'static str = "PROMPTELO_NEIGHBOR_K";
    const ENV_RATE_LIMIT_REQUESTS: &'static str = "PROMPTELO_RATE_LIMIT_REQUESTS";
    const ENV_RATE_LIMIT_WINDOW: &'static str = "PROMPTELO_RATE_LIMIT_WINDOW";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let store_backend = Self::parse_store_backend_from_env(defaults.store_backend)?;
        let qdrant_url = Self::parse_string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url);
        let collection_name =
            Self::parse_string_from_env(Self::ENV_COLLECTION, defaults.collection_name);
        let embedding_base_url =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_URL, defaults.embedding_base_url);
        let embedding_api_key = Self::parse_optional_string_from_env(Self::ENV_EMBEDDING_API_KEY);
        let embedding_model =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_MODEL, defaults.embedding_model);
        let embedding_dim =
            Self::parse_usize_from_env(Self::ENV_EMBEDDING_DIM, defaults.embedding_dim);
        let neighbor_k = Self::parse_usize_from_env(Self::ENV_NEIGHBOR_K, defaults.neighbor_k);
        let rate_limit_requests = Self::parse_u32_from_env(
            Self::ENV_RATE_LIMIT_REQUESTS,
            defaults.rate_limit_requests,
        );
        let rate_limit_window_secs =
            Self::parse_u64_from_env(Self::ENV_RATE_LIMIT_WINDOW, defaults.rate_limit_window_secs);

        Ok(Self {
            port,
            bind_addr,
            store_backend,
            qdrant_url,
            collection_name,
            embedding_base_url,
            embedding_api_key,
            embedding_model,
            embedding_dim,
            neighbor_k,
            rate_limit_requests,
            rate_limit_window_secs,
        })
    }

    /// Validates basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.embedding_dim == 0 {
            return Err(ConfigError::InvalidValue {
                setting: "embedding_dim",
                message: "must be positive".to_string(),
            });
        }
        if self.neighbor_k == 0 {
            return Err(ConfigError::InvalidValue {
                setting: "neighbor_k",
                message: "must be positive".to_string(),
            });
        }
        if self.rate_limit_requests == 0 {
            return Err(ConfigError::InvalidValue {
                setting: "rate_limit_requests",
                message: "must be positive".to_string(),
            });
        }
        if self.rate_limit_window_secs == 0 {
            return Err(ConfigError::InvalidValue {
                setting: "rate_limit_window_secs",
                message: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_store_backend_from_env(default: StoreBackend) -> Result<StoreBackend, ConfigError> {
        match env::var(Self::ENV_STORE) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "memory" => Ok(StoreBackend::Memory),
                "qdrant" => Ok(StoreBackend::Qdrant),
                _ => Err(ConfigError::UnknownStoreBackend { value }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_usize_from_env(var_name: &str, default: usize) -> usize {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_u32_from_env(var_name: &str, default: u32) -> u32 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}
