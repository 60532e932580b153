use thiserror::Error;

#[derive(Debug, Error)]
/// Errors from loading or validating server configuration.
pub enum ConfigError {
    /// The port value could not be parsed.
    #[error("invalid port value '{value}': {source}")]
    PortParseError {
        /// Offending value.
        value: String,
        /// Parse error.
        source: std::num::ParseIntError,
    },

    /// Port 0 is reserved.
    #[error("port must be nonzero, got '{value}'")]
    InvalidPort {
        /// Offending value.
        value: String,
    },

    /// The bind address could not be parsed.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        /// Offending value.
        value: String,
        /// Parse error.
        source: std::net::AddrParseError,
    },

    /// Unknown store backend name.
    #[error("unknown store backend '{value}' (expected 'memory' or 'qdrant')")]
    UnknownStoreBackend {
        /// Offending value.
        value: String,
    },

    /// A numeric setting is outside its valid range.
    #[error("invalid value for {setting}: {message}")]
    InvalidValue {
        /// Setting name.
        setting: &'static str,
        /// Explanation.
        message: String,
    },
}
