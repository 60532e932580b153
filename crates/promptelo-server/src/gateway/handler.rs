use axum::{Json, extract::State};
use chrono::Utc;
use tracing::{info, instrument};

use promptelo::constants::MAX_PROMPT_CHARS;
use promptelo::novelty::{
    GlobalStats, HealthStatus, PercentileThresholds, ScoreRequest, ScoreResponse,
};

use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;
use crate::store::VectorStore;

/// Sample size used for the stats reflection.
const STATS_SAMPLE_LIMIT: usize = 1000;

/// `POST /api/v1/score`: scores a prompt for novelty and records its
/// embedding. The prompt itself is never persisted.
#[instrument(skip(state, request))]
pub async fn score_handler<S: VectorStore>(
    State(state): State<HandlerState<S>>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, GatewayError> {
    if request.prompt.is_empty() {
        return Err(GatewayError::InvalidRequest(
            "prompt must not be empty".to_string(),
        ));
    }
    let length = request.prompt.chars().count();
    if length > MAX_PROMPT_CHARS {
        return Err(GatewayError::InvalidRequest(format!(
            "prompt is {length} characters, limit is {MAX_PROMPT_CHARS}"
        )));
    }

    let evaluation = state
        .service
        .evaluate(&request.prompt, request.user_id)
        .await?;

    info!(
        novelty_score = evaluation.novelty.novelty_score,
        percentile = evaluation.novelty.percentile,
        similar_count = evaluation.novelty.similar_count,
        total_prompts = evaluation.total_prompts,
        "prompt scored"
    );

    Ok(Json(ScoreResponse {
        novelty: evaluation.novelty,
        total_prompts: evaluation.total_prompts,
        timestamp: Utc::now(),
    }))
}

/// `GET /api/v1/stats`: aggregate statistics over the stored corpus.
/// Exposes only scores and counts, never prompts or embeddings.
#[instrument(skip(state))]
pub async fn stats_handler<S: VectorStore>(
    State(state): State<HandlerState<S>>,
) -> Result<Json<GlobalStats>, GatewayError> {
    let store = state.service.store();
    let total = store.stats().await?.total_count;
    let sample = store.score_sample(STATS_SAMPLE_LIMIT).await?;

    Ok(Json(build_global_stats(total, sample)))
}

/// `GET /api/v1/health`: liveness plus component status. Never rate
/// limited.
#[instrument(skip(state))]
pub async fn health_handler<S: VectorStore>(
    State(state): State<HandlerState<S>>,
) -> Json<HealthStatus> {
    let store_reachable = state.service.store().stats().await.is_ok();
    let embedder_mode = if state.service.embedder().is_stub() {
        "stub"
    } else {
        "remote"
    };

    let status = if store_reachable { "healthy" } else { "degraded" };

    Json(HealthStatus {
        status: status.to_string(),
        store_reachable,
        embedder_mode: embedder_mode.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /`: service identification.
pub async fn root_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "promptelo-server",
        "version": env!("CARGO_PKG_VERSION"),
        "health": "/api/v1/health",
    }))
}

fn build_global_stats(total: u64, mut sample: Vec<f64>) -> GlobalStats {
    sample.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let avg = if sample.is_empty() {
        0.5
    } else {
        sample.iter().sum::<f64>() / sample.len() as f64
    };

    let thresholds = PercentileThresholds {
        p50: percentile_of(&sample, 0.50),
        p75: percentile_of(&sample, 0.75),
        p90: percentile_of(&sample, 0.90),
        p95: percentile_of(&sample, 0.95),
        p99: percentile_of(&sample, 0.99),
    };

    let top_novelty_scores = sample.iter().rev().take(10).copied().collect();

    GlobalStats {
        total_prompts: total,
        avg_novelty_score: avg,
        percentile_thresholds: thresholds,
        top_novelty_scores,
    }
}

/// Nearest-rank percentile over an ascending-sorted sample. Falls back to
/// the historical defaults on an empty sample.
fn percentile_of(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return match q {
            q if q >= 0.99 => 0.92,
            q if q >= 0.95 => 0.85,
            q if q >= 0.90 => 0.78,
            q if q >= 0.75 => 0.65,
            _ => 0.5,
        };
    }

    let rank = ((q * sorted.len() as f64).ceil() as usize).clamp(1, sorted.len());
    sorted[rank - 1]
}
