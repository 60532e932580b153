use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Novelty scoring result returned by the community server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoveltyResult {
    /// Novelty in `[0, 1]`; 1 means nothing similar has been seen.
    pub novelty_score: f64,
    /// Percentile rank of `novelty_score` among the stored corpus, `[0, 100]`.
    pub percentile: f64,
    /// Number of similar prompts found.
    pub similar_count: u64,
    /// Whether the prompt clears the configured novelty percentile.
    pub is_novel: bool,
}

/// Outcome of a novelty request.
///
/// `Unavailable` is a valid state, not an error: the aggregator consumes it
/// by redistributing the novelty weight. Sentinel scores are never used.
#[derive(Debug, Clone, PartialEq)]
pub enum NoveltyOutcome {
    Available(NoveltyResult),
    Unavailable,
}

impl NoveltyOutcome {
    /// Returns `true` if the service answered.
    pub fn is_available(&self) -> bool {
        matches!(self, NoveltyOutcome::Available(_))
    }

    /// The full result, if available.
    pub fn result(&self) -> Option<&NoveltyResult> {
        match self {
            NoveltyOutcome::Available(result) => Some(result),
            NoveltyOutcome::Unavailable => None,
        }
    }

    /// Just the novelty score, if available.
    pub fn score(&self) -> Option<f64> {
        self.result().map(|r| r.novelty_score)
    }

    /// Short status string for logs.
    pub fn debug_status(&self) -> &'static str {
        match self {
            NoveltyOutcome::Available(_) => "AVAILABLE",
            NoveltyOutcome::Unavailable => "UNAVAILABLE",
        }
    }
}

/// Request body for `POST /api/v1/score`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Response body for `POST /api/v1/score`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub novelty: NoveltyResult,
    /// Corpus size after this submission was recorded.
    pub total_prompts: u64,
    pub timestamp: DateTime<Utc>,
}

/// Percentile thresholds of the stored novelty-score distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileThresholds {
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
}

/// Response body for `GET /api/v1/stats`. Aggregates only; no prompt text
/// or embeddings are ever exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub total_prompts: u64,
    pub avg_novelty_score: f64,
    pub percentile_thresholds: PercentileThresholds,
    pub top_novelty_scores: Vec<f64>,
}

/// Response body for `GET /api/v1/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub store_reachable: bool,
    pub embedder_mode: String,
    pub version: String,
}
