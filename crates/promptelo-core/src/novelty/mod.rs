//! Client for the community novelty service.
//!
//! One blocking call per scoring request, bounded by the configured
//! timeout, with no retry. Scoring degrades to
//! [`NoveltyOutcome::Unavailable`] on any failure; only [`stats`] and
//! [`health`] surface typed errors.
//!
//! [`stats`]: NoveltyClient::stats
//! [`health`]: NoveltyClient::health

pub mod error;
pub mod types;


pub use error::NoveltyClientError;
pub use types::{
    GlobalStats, HealthStatus, NoveltyOutcome, NoveltyResult, PercentileThresholds, ScoreRequest,
    ScoreResponse,
};

use std::time::Duration;

use tracing::debug;

use crate::config::ClientConfig;

/// HTTP client for the novelty service.
pub struct NoveltyClient {
    http: reqwest::Client,
    base_url: String,
    user_id: Option<String>,
}

impl std::fmt::Debug for NoveltyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoveltyClient")
            .field("base_url", &self.base_url)
            .field("user_id", &self.user_id)
            .finish()
    }
}

impl NoveltyClient {
    /// Creates a client honoring `config`'s URL, user id, and timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, NoveltyClientError> {
        if !config.timeout_secs.is_finite() || config.timeout_secs <= 0.0 {
            return Err(NoveltyClientError::ClientBuildFailed {
                message: format!("timeout must be positive, got {}", config.timeout_secs),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs_f64(config.timeout_secs))
            .build()
            .map_err(|e| NoveltyClientError::ClientBuildFailed {
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: config.server_url.trim_end_matches('/').to_string(),
            user_id: config.user_id.clone(),
        })
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Scores `prompt` against the community corpus.
    ///
    /// Timeout, connection failure, non-success status, and malformed
    /// payloads all degrade to [`NoveltyOutcome::Unavailable`]. The call
    /// also records the prompt's embedding server-side on success.
    pub async fn score(&self, prompt: &str) -> NoveltyOutcome {
        match self.try_score(prompt).await {
            Ok(response) => NoveltyOutcome::Available(response.novelty),
            Err(error) => {
                debug!(error = %error, "novelty service unavailable, degrading");
                NoveltyOutcome::Unavailable
            }
        }
    }

    async fn try_score(&self, prompt: &str) -> Result<ScoreResponse, NoveltyClientError> {
        let url = format!("{}/api/v1/score", self.base_url);
        let request = ScoreRequest {
            prompt: prompt.to_string(),
            user_id: self.user_id.clone(),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| NoveltyClientError::RequestFailed {
                url: url.clone(),
                message: e.to_string(),
            })?;

        Self::decode(url, response).await
    }

    /// Fetches corpus-wide statistics.
    pub async fn stats(&self) -> Result<GlobalStats, NoveltyClientError> {
        let url = format!("{}/api/v1/stats", self.base_url);
        let response =
            self.http
                .get(&url)
                .send()
                .await
                .map_err(|e| NoveltyClientError::RequestFailed {
                    url: url.clone(),
                    message: e.to_string(),
                })?;

        Self::decode(url, response).await
    }

    /// Checks server health.
    pub async fn health(&self) -> Result<HealthStatus, NoveltyClientError> {
        let url = format!("{}/api/v1/health", self.base_url);
        let response =
            self.http
                .get(&url)
                .send()
                .await
                .map_err(|e| NoveltyClientError::RequestFailed {
                    url: url.clone(),
                    message: e.to_string(),
                })?;

        Self::decode(url, response).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        url: String,
        response: reqwest::Response,
    ) -> Result<T, NoveltyClientError> {
        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(NoveltyClientError::RateLimited { url });
        }
        if !status.is_success() {
            return Err(NoveltyClientError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        response
            .json()
            .await
            .map_err(|e| NoveltyClientError::MalformedResponse {
                url,
                message: e.to_string(),
            })
    }
}
