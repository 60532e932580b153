use thiserror::Error;

/// Errors from the embedding provider.
///
/// All of these are fatal for the evaluate call that triggered them; the
/// remote client only ever observes the resulting non-success status.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// A remote backend was requested without an API key.
    #[error("embedding provider requires an API key")]
    MissingApiKey,

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {message}")]
    ClientBuildFailed {
        /// Error message.
        message: String,
    },

    /// The provider request failed (timeout, connection, DNS).
    #[error("embedding request to '{url}' failed: {message}")]
    RequestFailed {
        /// Request URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// The provider answered with a non-success status.
    #[error("embedding provider returned status {status}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
    },

    /// The provider response did not match the expected schema.
    #[error("malformed embedding response: {message}")]
    MalformedResponse {
        /// Error message.
        message: String,
    },

    /// The provider returned no embedding data.
    #[error("embedding provider returned an empty data array")]
    EmptyResponse,

    /// The returned vector had the wrong dimension.
    #[error("invalid embedding dimension: expected {expected}, got {actual}")]
    InvalidDimension {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },
}
