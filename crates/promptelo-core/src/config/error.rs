use std::path::PathBuf;

use thiserror::Error;

/// Errors from persisting client configuration.
///
/// Loading never fails: a missing or malformed file falls back to defaults.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No home directory could be resolved for the default config path.
    #[error("could not determine a home directory for the config file")]
    NoHomeDir,

    /// The config directory or file could not be written.
    #[error("failed to write config to '{path}': {source}")]
    WriteFailed {
        /// Target path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config could not be serialized.
    #[error("failed to serialize config: {source}")]
    SerializeFailed {
        /// Underlying serde error.
        source: serde_json::Error,
    },
}
