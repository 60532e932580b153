use thiserror::Error;

/// Errors surfaced by the novelty client's non-degrading endpoints.
///
/// Scoring itself never returns these; every failure there collapses to
/// [`NoveltyOutcome::Unavailable`](super::NoveltyOutcome::Unavailable).
#[derive(Debug, Error)]
pub enum NoveltyClientError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {message}")]
    ClientBuildFailed {
        /// Error message.
        message: String,
    },

    /// The request could not be completed (timeout, connection refused, DNS).
    #[error("request to '{url}' failed: {message}")]
    RequestFailed {
        /// Request URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// The server rejected the request with `429 Too Many Requests`.
    #[error("rate limit exceeded at '{url}'")]
    RateLimited {
        /// Request URL.
        url: String,
    },

    /// The server answered with a non-success status.
    #[error("unexpected status {status} from '{url}'")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Request URL.
        url: String,
    },

    /// The response body did not match the expected schema.
    #[error("malformed response from '{url}': {message}")]
    MalformedResponse {
        /// Request URL.
        url: String,
        /// Error message.
        message: String,
    },
}
