//! Promptelo community server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use promptelo_server::config::{ServerConfig, StoreBackend};
use promptelo_server::embedding::{EmbeddingClient, EmbeddingConfig};
use promptelo_server::gateway::{HandlerState, RateLimitConfig, RateLimiter, create_router_with_state};
use promptelo_server::novelty::NoveltyService;
use promptelo_server::store::{MemoryVectorStore, QdrantVectorStore, VectorStore};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::from_env()?;
    config.validate()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        store = ?config.store_backend,
        "promptelo-server starting"
    );

    let embedder = match &config.embedding_api_key {
        Some(api_key) => EmbeddingClient::remote(EmbeddingConfig {
            base_url: config.embedding_base_url.clone(),
            api_key: api_key.clone(),
            model: config.embedding_model.clone(),
            dim: config.embedding_dim,
        })?,
        None => {
            tracing::warn!("no OPENAI_API_KEY configured, running embedder in stub mode");
            EmbeddingClient::stub(config.embedding_dim)
        }
    };

    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("memory store selected, corpus will not survive restarts");
            let store = MemoryVectorStore::new(config.embedding_dim);
            serve(config, embedder, store).await
        }
        StoreBackend::Qdrant => {
            let store = QdrantVectorStore::connect(
                &config.qdrant_url,
                &config.collection_name,
                config.embedding_dim,
            )
            .await?;
            tracing::info!(
                url = %config.qdrant_url,
                collection = %config.collection_name,
                "connected to Qdrant"
            );
            serve(config, embedder, store).await
        }
    }
}

async fn serve<S: VectorStore + 'static>(
    config: ServerConfig,
    embedder: EmbeddingClient,
    store: S,
) -> anyhow::Result<()> {
    let addr: SocketAddr = config.socket_addr().parse()?;

    let service = Arc::new(
        NoveltyService::new(embedder, store).with_neighbor_k(config.neighbor_k),
    );
    let limiter = Arc::new(RateLimiter::new(RateLimitConfig {
        max_requests: config.rate_limit_requests,
        window: Duration::from_secs(config.rate_limit_window_secs),
    }));

    let state = HandlerState::new(service, limiter);
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "server listening");

    // ConnectInfo gives the rate limiter a per-client key when no proxy
    // sets X-Forwarded-For.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("promptelo-server shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("PROMPTELO_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8000);

    let url = format!("http://127.0.0.1:{}/api/v1/health", port);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    rt.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .expect("failed to build client");

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("received SIGTERM, initiating graceful shutdown");
        }
    }
}
