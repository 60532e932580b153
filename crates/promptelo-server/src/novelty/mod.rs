//! Server-side novelty evaluation.
//!
//! Orchestrates embedding generation, the neighbor query, the novelty
//! transform, corpus insertion, and the percentile ranking. The neighbor
//! query always runs before the insert, so a submission is never compared
//! against itself.

pub mod score;


pub use score::novelty_from_neighbors;

use thiserror::Error;
use tracing::{debug, warn};

use promptelo::novelty::NoveltyResult;

use crate::embedding::{EmbeddingClient, EmbeddingError};
use crate::store::{Neighbor, StoreError, VectorStore};

/// Neighbors fetched per evaluation.
pub const DEFAULT_NEIGHBOR_K: usize = 50;

/// Minimum cosine similarity for a neighbor to count as "similar".
pub const DEFAULT_SIMILARITY_FLOOR: f32 = 0.70;

/// Percentile at or above which a prompt is flagged as novel.
pub const DEFAULT_NOVEL_PERCENTILE: f64 = 85.0;

/// Evaluation failures observed by the gateway.
///
/// The remote client never sees these details, only the resulting status.
#[derive(Debug, Error)]
pub enum NoveltyError {
    /// The embedding provider failed; the whole evaluation is aborted.
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    /// A store read failed; the whole evaluation is aborted. (A failed
    /// insert after a successful query is logged and swallowed instead.)
    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),
}

/// Result of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct NoveltyEvaluation {
    /// The novelty scoring result.
    pub novelty: NoveltyResult,
    /// Corpus size after this submission.
    pub total_prompts: u64,
}

/// Evaluates prompt novelty against a vector store.
#[derive(Debug)]
pub struct NoveltyService<S: VectorStore> {
    embedder: EmbeddingClient,
    store: S,
    neighbor_k: usize,
    similarity_floor: f32,
    novel_percentile: f64,
}

impl<S: VectorStore> NoveltyService<S> {
    /// Creates a service with the default tunables.
    pub fn new(embedder: EmbeddingClient, store: S) -> Self {
        Self {
            embedder,
            store,
            neighbor_k: DEFAULT_NEIGHBOR_K,
            similarity_floor: DEFAULT_SIMILARITY_FLOOR,
            novel_percentile: DEFAULT_NOVEL_PERCENTILE,
        }
    }

    /// Overrides the neighbor fetch size.
    pub fn with_neighbor_k(mut self, neighbor_k: usize) -> Self {
        self.neighbor_k = neighbor_k;
        self
    }

    /// Overrides the similarity floor.
    pub fn with_similarity_floor(mut self, similarity_floor: f32) -> Self {
        self.similarity_floor = similarity_floor;
        self
    }

    /// Overrides the novelty percentile cutoff.
    pub fn with_novel_percentile(mut self, novel_percentile: f64) -> Self {
        self.novel_percentile = novel_percentile;
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The underlying embedder.
    pub fn embedder(&self) -> &EmbeddingClient {
        &self.embedder
    }

    /// Scores `prompt` against the corpus and records its embedding.
    ///
    /// The query reads the store before the insert, so the submission never
    /// appears among its own neighbors. If the insert fails after a
    /// successful query the result is still returned and the corpus
    /// undercounts by one.
    pub async fn evaluate(
        &self,
        prompt: &str,
        user_id: Option<String>,
    ) -> Result<NoveltyEvaluation, NoveltyError> {
        let embedding = self.embedder.embed(prompt).await?;

        let neighbors = self.store.query(&embedding, self.neighbor_k).await?;
        let similar: Vec<Neighbor> = neighbors
            .into_iter()
            .filter(|n| n.similarity >= self.similarity_floor)
            .collect();

        let novelty_score = novelty_from_neighbors(&similar);

        debug!(
            similar_count = similar.len(),
            novelty_score, "neighbors scored"
        );

        if let Err(error) = self.store.insert(embedding, novelty_score, user_id).await {
            warn!(error = %error, "failed to record embedding, corpus will undercount");
        }

        let total = self.store.stats().await?.total_count;
        let percentile = if total == 0 {
            50.0
        } else {
            self.store.rank_below(novelty_score).await? as f64 / total as f64 * 100.0
        };
        let is_novel = percentile >= self.novel_percentile;

        Ok(NoveltyEvaluation {
            novelty: NoveltyResult {
                novelty_score,
                percentile,
                similar_count: similar.len() as u64,
                is_novel,
            },
            total_prompts: total,
        })
    }
}
