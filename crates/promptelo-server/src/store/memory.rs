//! Exact in-memory store.
//!
//! Scans the whole corpus per query. Exact k-NN is fine at the expected
//! scale; swap in [`QdrantVectorStore`](super::QdrantVectorStore) when it
//! is not.

use std::cmp::Ordering;

use chrono::Utc;
use parking_lot::RwLock;

use super::error::StoreError;
use super::model::{Neighbor, PromptRecord, StoreStats, cosine_similarity};
use super::VectorStore;

/// Append-only in-memory vector store with exact cosine search.
pub struct MemoryVectorStore {
    dim: usize,
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    records: Vec<PromptRecord>,
    next_id: u64,
}

impl MemoryVectorStore {
    /// Creates an empty store accepting vectors of dimension `dim`.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Expected vector dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    fn check_dim(&self, len: usize) -> Result<(), StoreError> {
        if len != self.dim {
            return Err(StoreError::InvalidDimension {
                expected: self.dim,
                actual: len,
            });
        }
        Ok(())
    }
}

impl VectorStore for MemoryVectorStore {
    async fn insert(
        &self,
        embedding: Vec<f32>,
        novelty_score: f64,
        user_id: Option<String>,
    ) -> Result<u64, StoreError> {
        self.check_dim(embedding.len())?;

        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.records.push(PromptRecord {
            id,
            embedding,
            novelty_score,
            user_id,
            created_at: Utc::now(),
        });

        Ok(id)
    }

    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<Neighbor>, StoreError> {
        self.check_dim(embedding.len())?;

        let inner = self.inner.read();
        let mut neighbors: Vec<Neighbor> = inner
            .records
            .iter()
            .map(|record| Neighbor {
                id: record.id,
                similarity: cosine_similarity(embedding, &record.embedding),
                novelty_score: record.novelty_score,
            })
            .collect();

        neighbors.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
                .then(a.id.cmp(&b.id))
        });
        neighbors.truncate(k);

        Ok(neighbors)
    }

    async fn stats(&self) -> Result<StoreStats, StoreError> {
        let inner = self.inner.read();
        Ok(StoreStats {
            total_count: inner.records.len() as u64,
        })
    }

    async fn rank_below(&self, novelty_score: f64) -> Result<u64, StoreError> {
        let inner = self.inner.read();
        Ok(inner
            .records
            .iter()
            .filter(|r| r.novelty_score < novelty_score)
            .count() as u64)
    }

    async fn score_sample(&self, limit: usize) -> Result<Vec<f64>, StoreError> {
        let inner = self.inner.read();
        Ok(inner
            .records
            .iter()
            .rev()
            .take(limit)
            .map(|r| r.novelty_score)
            .collect())
    }
}
