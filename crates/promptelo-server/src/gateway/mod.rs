//! HTTP gateway (Axum) for novelty scoring and stats.
//!
//! This module is primarily used by the `promptelo-server` binary.

pub mod error;
pub mod handler;
pub mod limit;
pub mod state;

#[cfg(test)]
mod tests;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::{ErrorResponse, GatewayError};
pub use handler::{health_handler, root_handler, score_handler, stats_handler};
pub use limit::{RateDecision, RateLimitConfig, RateLimiter};
pub use state::HandlerState;

use crate::store::VectorStore;

/// Builds the full router over `state`.
pub fn create_router_with_state<S>(state: HandlerState<S>) -> Router
where
    S: VectorStore + 'static,
{
    Router::new()
        .route("/", get(root_handler))
        .route("/api/v1/score", post(score_handler))
        .route("/api/v1/stats", get(stats_handler))
        .route("/api/v1/health", get(health_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            limit::rate_limit_middleware::<S>,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
