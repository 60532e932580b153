//! Embedding generation.
//!
//! Wraps an OpenAI-compatible `/v1/embeddings` endpoint, with a
//! deterministic stub backend for running without an API key. The stub
//! derives an L2-normalized pseudo-vector from a blake3 XOF over the text:
//! identical text yields an identical vector, so duplicate-detection
//! semantics hold end to end even in stub mode.

mod error;


pub use error::EmbeddingError;

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

/// Default OpenAI-compatible endpoint base.
pub const DEFAULT_EMBEDDING_BASE_URL: &str = "https://api.openai.com";

/// Default embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Dimension of the default embedding model.
pub const DEFAULT_EMBEDDING_DIM: usize = 1536;

/// Input cap forwarded to the provider; roughly the model's 8191-token
/// window at four characters per token.
pub const EMBEDDING_MAX_CHARS: usize = 8191 * 4;

const EMBEDDING_TIMEOUT_SECS: u64 = 30;

/// Settings for the remote backend.
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// Expected vector dimension.
    pub dim: usize,
}

enum EmbeddingBackend {
    Remote {
        http: reqwest::Client,
        base_url: String,
        api_key: String,
        model: String,
    },
    Stub,
}

/// Embedding generator (remote provider or deterministic stub).
pub struct EmbeddingClient {
    backend: EmbeddingBackend,
    dim: usize,
}

impl std::fmt::Debug for EmbeddingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingClient")
            .field(
                "backend",
                &match &self.backend {
                    EmbeddingBackend::Remote { model, .. } => format!("Remote({model})"),
                    EmbeddingBackend::Stub => "Stub".to_string(),
                },
            )
            .field("dim", &self.dim)
            .finish()
    }
}

#[derive(Deserialize)]
struct EmbeddingApiResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl EmbeddingClient {
    /// Creates a client for a remote OpenAI-compatible provider.
    pub fn remote(config: EmbeddingConfig) -> Result<Self, EmbeddingError> {
        if config.api_key.trim().is_empty() {
            return Err(EmbeddingError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(EMBEDDING_TIMEOUT_SECS))
            .build()
            .map_err(|e| EmbeddingError::ClientBuildFailed {
                message: e.to_string(),
            })?;

        Ok(Self {
            backend: EmbeddingBackend::Remote {
                http,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                api_key: config.api_key,
                model: config.model,
            },
            dim: config.dim,
        })
    }

    /// Creates a deterministic stub client (no network, no key).
    pub fn stub(dim: usize) -> Self {
        warn!(dim, "embedder running in STUB mode, vectors are synthetic");
        Self {
            backend: EmbeddingBackend::Stub,
            dim,
        }
    }

    /// Expected vector dimension.
    pub fn embedding_dim(&self) -> usize {
        self.dim
    }

    /// Returns `true` when running without a real provider.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbeddingBackend::Stub)
    }

    /// Generates an embedding for `text`.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let text = truncate_chars(text, EMBEDDING_MAX_CHARS);

        match &self.backend {
            EmbeddingBackend::Remote {
                http,
                base_url,
                api_key,
                model,
            } => {
                let vector = Self::embed_remote(http, base_url, api_key, model, text).await?;
                if vector.len() != self.dim {
                    return Err(EmbeddingError::InvalidDimension {
                        expected: self.dim,
                        actual: vector.len(),
                    });
                }
                Ok(vector)
            }
            EmbeddingBackend::Stub => Ok(stub_embedding(text, self.dim)),
        }
    }

    async fn embed_remote(
        http: &reqwest::Client,
        base_url: &str,
        api_key: &str,
        model: &str,
        text: &str,
    ) -> Result<Vec<f32>, EmbeddingError> {
        #[derive(serde::Serialize)]
        struct EmbedRequest<'a> {
            model: &'a str,
            input: &'a str,
            encoding_format: &'a str,
        }

        let url = format!("{base_url}/v1/embeddings");
        debug!(model, chars = text.len(), "requesting embedding");

        let response = http
            .post(&url)
            .bearer_auth(api_key)
            .json(&EmbedRequest {
                model,
                input: text,
                encoding_format: "float",
            })
            .send()
            .await
            .map_err(|e| EmbeddingError::RequestFailed {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EmbeddingError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let parsed: EmbeddingApiResponse =
            response
                .json()
                .await
                .map_err(|e| EmbeddingError::MalformedResponse {
                    message: e.to_string(),
                })?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or(EmbeddingError::EmptyResponse)
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Deterministic pseudo-embedding: blake3 XOF bytes mapped into `[-1, 1]`
/// and L2-normalized.
fn stub_embedding(text: &str, dim: usize) -> Vec<f32> {
    let mut reader = blake3::Hasher::new().update(text.as_bytes()).finalize_xof();
    let mut bytes = vec![0u8; dim * 4];
    reader.fill(&mut bytes);

    let mut vector: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|chunk| {
            let bits = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            (bits as f64 / u32::MAX as f64 * 2.0 - 1.0) as f32
        })
        .collect();

    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in &mut vector {
            *value /= norm;
        }
    }

    vector
}
