//! Per-client sliding-window rate limiting.
//!
//! Keyed by client IP (honoring `X-Forwarded-For` behind a proxy). The
//! health endpoint is never throttled so probes keep working while a
//! client is limited.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use parking_lot::Mutex;
use std::net::SocketAddr;

use crate::gateway::state::HandlerState;
use crate::store::VectorStore;

/// Paths exempt from rate limiting.
const EXEMPT_PATHS: [&str; 1] = ["/api/v1/health"];

/// Rate limiter settings.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    /// Allowed requests per window.
    pub max_requests: u32,
    /// Window length.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 60,
            window: Duration::from_secs(60),
        }
    }
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// Request admitted; `remaining` may be spent within the window.
    Allowed { remaining: u32 },
    /// Request rejected; retry after the window has passed.
    Limited { retry_after: Duration },
}

/// Sliding-window counter per client key.
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: Mutex<HashMap<String, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Limit per window.
    pub fn limit(&self) -> u32 {
        self.config.max_requests
    }

    /// Records a request for `key` and decides whether to admit it.
    pub fn check(&self, key: &str) -> RateDecision {
        let now = Instant::now();
        let mut windows = self.windows.lock();
        let timestamps = windows.entry(key.to_string()).or_default();

        timestamps.retain(|t| now.duration_since(*t) < self.config.window);

        if timestamps.len() as u32 >= self.config.max_requests {
            return RateDecision::Limited {
                retry_after: self.config.window,
            };
        }

        timestamps.push(now);
        let remaining = self.config.max_requests - timestamps.len() as u32;
        RateDecision::Allowed { remaining }
    }
}

/// Resolves the client key: first `X-Forwarded-For` hop, else the peer
/// address, else a shared bucket.
fn client_key(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Axum middleware applying [`RateLimiter`] to every non-exempt route.
pub async fn rate_limit_middleware<S: VectorStore + 'static>(
    State(state): State<HandlerState<S>>,
    request: Request,
    next: Next,
) -> Response {
    if EXEMPT_PATHS.contains(&request.uri().path()) {
        return next.run(request).await;
    }

    let key = client_key(&request);
    let limit = state.limiter.limit();

    match state.limiter.check(&key) {
        RateDecision::Allowed { remaining } => {
            let mut response = next.run(request).await;
            let headers = response.headers_mut();
            headers.insert("x-ratelimit-limit", header_num(limit));
            headers.insert("x-ratelimit-remaining", header_num(remaining));
            response
        }
        RateDecision::Limited { retry_after } => {
            let retry_secs = retry_after.as_secs();
            let body = axum::Json(serde_json::json!({
                "detail": "Rate limit exceeded",
                "retry_after": retry_secs,
            }));

            let mut response = (StatusCode::TOO_MANY_REQUESTS, body).into_response();
            let headers = response.headers_mut();
            headers.insert("x-ratelimit-limit", header_num(limit));
            headers.insert("x-ratelimit-remaining", header_num(0));
            headers.insert("retry-after", header_num(retry_secs as u32));
            response
        }
    }
}

fn header_num(value: u32) -> HeaderValue {
    HeaderValue::from_str(&value.to_string()).unwrap_or(HeaderValue::from_static("0"))
}
