//! Promptelo community server library (used by the server binary and
//! integration tests).
//!
//! - [`gateway`] - axum router, handlers, and rate limiting
//! - [`novelty`] - embedding + store orchestration behind `/api/v1/score`
//! - [`embedding`] - OpenAI-compatible provider with a deterministic stub
//! - [`store`] - append-only embedding corpus (in-memory exact or Qdrant)
//! - [`config`] - `PROMPTELO_*` environment configuration

pub mod config;
pub mod embedding;
pub mod gateway;
pub mod novelty;
pub mod store;

pub use config::{ConfigError, ServerConfig, StoreBackend};
pub use embedding::{EmbeddingClient, EmbeddingConfig, EmbeddingError};
pub use gateway::{HandlerState, RateLimitConfig, RateLimiter, create_router_with_state};
pub use novelty::{NoveltyError, NoveltyEvaluation, NoveltyService};
pub use store::{
    MemoryVectorStore, Neighbor, PromptRecord, QdrantVectorStore, StoreError, StoreStats,
    VectorStore,
};
