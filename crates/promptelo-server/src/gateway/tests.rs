use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use promptelo::constants::MAX_PROMPT_CHARS;

use crate::embedding::EmbeddingClient;
use crate::gateway::limit::{RateLimitConfig, RateLimiter};
use crate::gateway::state::HandlerState;
use crate::gateway::create_router_with_state;
use crate::novelty::NoveltyService;
use crate::store::MemoryVectorStore;

const DIM: usize = 32;

fn app_with_limit(config: RateLimitConfig) -> Router {
    let service = Arc::new(NoveltyService::new(
        EmbeddingClient::stub(DIM),
        MemoryVectorStore::new(DIM),
    ));
    let state = HandlerState::new(service, Arc::new(RateLimiter::new(config)));
    create_router_with_state(state)
}

fn app() -> Router {
    app_with_limit(RateLimitConfig::default())
}

fn score_request(prompt: &str) -> Request<Body> {
    let body = serde_json::json!({ "prompt": prompt }).to_string();
    Request::builder()
        .method("POST")
        .uri("/api/v1/score")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn score_returns_a_full_novelty_result() {
    let app = app();

    let response = app
        .oneshot(score_request("design a rate limiter for the API gateway"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let novelty = &json["novelty"];
    let score = novelty["novelty_score"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&score));
    let percentile = novelty["percentile"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&percentile));
    assert!(novelty["similar_count"].as_u64().is_some());
    assert!(novelty["is_novel"].as_bool().is_some());
    assert_eq!(json["total_prompts"].as_u64(), Some(1));
    assert!(json["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn empty_prompt_is_rejected() {
    let response = app().oneshot(score_request("")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"].as_u64(), Some(400));
}

#[tokio::test]
async fn oversized_prompt_is_rejected() {
    let oversized = "x".repeat(MAX_PROMPT_CHARS + 1);

    let response = app().oneshot(score_request(&oversized)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_prompts_lose_novelty_across_requests() {
    let app = app();
    let prompt = "migrate the session store to redis";

    let first = app.clone().oneshot(score_request(prompt)).await.unwrap();
    let first_score = body_json(first).await["novelty"]["novelty_score"]
        .as_f64()
        .unwrap();

    let second = app.clone().oneshot(score_request(prompt)).await.unwrap();
    let second_score = body_json(second).await["novelty"]["novelty_score"]
        .as_f64()
        .unwrap();

    assert!(second_score < first_score);
}

#[tokio::test]
async fn health_reports_component_status() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["store_reachable"], true);
    assert_eq!(json["embedder_mode"], "stub");
    assert!(json["version"].as_str().is_some());
}

#[tokio::test]
async fn root_identifies_the_service() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "promptelo-server");
}

#[tokio::test]
async fn stats_reflect_scored_prompts() {
    let app = app();

    for i in 0..3 {
        let response = app
            .clone()
            .oneshot(score_request(&format!("stats seed prompt {i}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total_prompts"].as_u64(), Some(3));
    assert!(json["avg_novelty_score"].as_f64().is_some());

    let thresholds = &json["percentile_thresholds"];
    let p50 = thresholds["p50"].as_f64().unwrap();
    let p99 = thresholds["p99"].as_f64().unwrap();
    assert!(p50 <= p99);

    assert!(json["top_novelty_scores"].as_array().unwrap().len() <= 10);
}

#[tokio::test]
async fn stats_never_expose_prompts_or_embeddings() {
    let app = app();
    app.clone()
        .oneshot(score_request("a secret prompt body"))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let raw = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(!raw.contains("secret prompt body"));
}

#[tokio::test]
async fn requests_over_the_limit_get_429() {
    let app = app_with_limit(RateLimitConfig {
        max_requests: 2,
        window: Duration::from_secs(60),
    });

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(score_request("within the limit"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(score_request("over the limit"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        response.headers().get("x-ratelimit-remaining").unwrap(),
        "0"
    );
    assert!(response.headers().get("retry-after").is_some());
}

#[tokio::test]
async fn rate_limit_headers_are_set_on_success() {
    let app = app_with_limit(RateLimitConfig {
        max_requests: 5,
        window: Duration::from_secs(60),
    });

    let response = app.oneshot(score_request("check the headers")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-ratelimit-limit").unwrap(), "5");
    assert_eq!(
        response.headers().get("x-ratelimit-remaining").unwrap(),
        "4"
    );
}

#[tokio::test]
async fn health_is_exempt_from_rate_limiting() {
    let app = app_with_limit(RateLimitConfig {
        max_requests: 1,
        window: Duration::from_secs(60),
    });

    // Exhaust the limit.
    app.clone()
        .oneshot(score_request("use up the quota"))
        .await
        .unwrap();

    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn forwarded_clients_are_limited_independently() {
    let app = app_with_limit(RateLimitConfig {
        max_requests: 1,
        window: Duration::from_secs(60),
    });

    let request_from = |ip: &str| {
        let body = serde_json::json!({ "prompt": "per-client buckets" }).to_string();
        Request::builder()
            .method("POST")
            .uri("/api/v1/score")
            .header("content-type", "application/json")
            .header("x-forwarded-for", ip)
            .body(Body::from(body))
            .unwrap()
    };

    let first = app.clone().oneshot(request_from("10.0.0.1")).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let throttled = app.clone().oneshot(request_from("10.0.0.1")).await.unwrap();
    assert_eq!(throttled.status(), StatusCode::TOO_MANY_REQUESTS);

    let other_client = app.clone().oneshot(request_from("10.0.0.2")).await.unwrap();
    assert_eq!(other_client.status(), StatusCode::OK);
}
