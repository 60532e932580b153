use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by vector store operations.
pub enum StoreError {
    /// Could not connect to the Qdrant endpoint.
    #[error("failed to connect to Qdrant at '{url}': {message}")]
    ConnectionFailed {
        /// Endpoint URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// Collection creation failed.
    #[error("failed to create collection '{collection}': {message}")]
    CreateCollectionFailed {
        /// Collection name.
        collection: String,
        /// Error message.
        message: String,
    },

    /// Insert failed.
    #[error("failed to insert record into '{collection}': {message}")]
    InsertFailed {
        /// Collection name.
        collection: String,
        /// Error message.
        message: String,
    },

    /// Similarity query failed.
    #[error("failed to query '{collection}': {message}")]
    QueryFailed {
        /// Collection name.
        collection: String,
        /// Error message.
        message: String,
    },

    /// Counting records failed.
    #[error("failed to count records in '{collection}': {message}")]
    CountFailed {
        /// Collection name.
        collection: String,
        /// Error message.
        message: String,
    },

    /// Reading the novelty-score sample failed.
    #[error("failed to sample scores from '{collection}': {message}")]
    SampleFailed {
        /// Collection name.
        collection: String,
        /// Error message.
        message: String,
    },

    /// Vector dimension mismatch.
    #[error("invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },
}
