//! Qdrant-backed store.
//!
//! Durable backend for the shared corpus. Qdrant's HNSW index makes the
//! neighbor query approximate; degraded recall is an accepted trade-off of
//! this backend and does not change the store contract. Record ids are
//! assigned from a process-local counter seeded from the collection count,
//! which assumes a single writing instance.

use std::cmp::Ordering as CmpOrdering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::{
    Condition, CountPointsBuilder, CreateCollectionBuilder, Distance, Filter, PointStruct, Range,
    ScoredPoint, ScrollPointsBuilder, SearchPointsBuilder, UpsertPointsBuilder,
    VectorParamsBuilder,
};

use super::VectorStore;
use super::error::StoreError;
use super::model::{Neighbor, StoreStats};

/// Vector store over a Qdrant collection with cosine distance.
pub struct QdrantVectorStore {
    client: Qdrant,
    url: String,
    collection: String,
    dim: usize,
    next_id: AtomicU64,
}

impl std::fmt::Debug for QdrantVectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QdrantVectorStore")
            .field("url", &self.url)
            .field("collection", &self.collection)
            .field("dim", &self.dim)
            .finish()
    }
}

impl QdrantVectorStore {
    /// Connects to `url`, ensures `collection` exists, and seeds the id
    /// counter from the current record count.
    pub async fn connect(url: &str, collection: &str, dim: usize) -> Result<Self, StoreError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| StoreError::ConnectionFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let store = Self {
            client,
            url: url.to_string(),
            collection: collection.to_string(),
            dim,
            next_id: AtomicU64::new(0),
        };

        store.ensure_collection().await?;

        let count = store.count(None).await?;
        store.next_id.store(count, Ordering::SeqCst);

        Ok(store)
    }

    /// Configured endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Creates the collection if it does not exist yet.
    pub async fn ensure_collection(&self) -> Result<(), StoreError> {
        let exists = self
            .client
            .collection_exists(&self.collection)
            .await
            .map_err(|e| StoreError::CreateCollectionFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        if exists {
            return Ok(());
        }

        let vectors_config = VectorParamsBuilder::new(self.dim as u64, Distance::Cosine);

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(vectors_config)
                    .on_disk_payload(true),
            )
            .await
            .map_err(|e| StoreError::CreateCollectionFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    async fn count(&self, filter: Option<Filter>) -> Result<u64, StoreError> {
        let mut builder = CountPointsBuilder::new(&self.collection).exact(true);
        if let Some(filter) = filter {
            builder = builder.filter(filter);
        }

        let response =
            self.client
                .count(builder)
                .await
                .map_err(|e| StoreError::CountFailed {
                    collection: self.collection.clone(),
                    message: e.to_string(),
                })?;

        Ok(response.result.map(|r| r.count).unwrap_or(0))
    }

    fn neighbor_from_scored_point(point: ScoredPoint) -> Option<Neighbor> {
        let id = match point.id.and_then(|pid| pid.point_id_options) {
            Some(PointIdOptions::Num(n)) => n,
            _ => return None,
        };

        let novelty_score = point
            .payload
            .get("novelty_score")
            .and_then(|v| v.as_double())
            .unwrap_or(0.0);

        Some(Neighbor {
            id,
            similarity: point.score,
            novelty_score,
        })
    }
}

impl VectorStore for QdrantVectorStore {
    async fn insert(
        &self,
        embedding: Vec<f32>,
        novelty_score: f64,
        user_id: Option<String>,
    ) -> Result<u64, StoreError> {
        if embedding.len() != self.dim {
            return Err(StoreError::InvalidDimension {
                expected: self.dim,
                actual: embedding.len(),
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);

        let mut payload: HashMap<String, qdrant_client::qdrant::Value> = HashMap::new();
        payload.insert("novelty_score".to_string(), novelty_score.into());
        payload.insert("created_at".to_string(), Utc::now().to_rfc3339().into());
        if let Some(user_id) = user_id {
            payload.insert("user_id".to_string(), user_id.into());
        }

        let point = PointStruct::new(id, embedding, payload);

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, vec![point]).wait(true))
            .await
            .map_err(|e| StoreError::InsertFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        Ok(id)
    }

    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<Neighbor>, StoreError> {
        if embedding.len() != self.dim {
            return Err(StoreError::InvalidDimension {
                expected: self.dim,
                actual: embedding.len(),
            });
        }

        let search = SearchPointsBuilder::new(&self.collection, embedding.to_vec(), k as u64)
            .with_payload(true);

        let response =
            self.client
                .search_points(search)
                .await
                .map_err(|e| StoreError::QueryFailed {
                    collection: self.collection.clone(),
                    message: e.to_string(),
                })?;

        let mut neighbors: Vec<Neighbor> = response
            .result
            .into_iter()
            .filter_map(Self::neighbor_from_scored_point)
            .collect();

        // Qdrant orders by score but leaves ties unspecified; enforce the
        // insertion-order tie break here.
        neighbors.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(CmpOrdering::Equal)
                .then(a.id.cmp(&b.id))
        });

        Ok(neighbors)
    }

    async fn stats(&self) -> Result<StoreStats, StoreError> {
        Ok(StoreStats {
            total_count: self.count(None).await?,
        })
    }

    async fn rank_below(&self, novelty_score: f64) -> Result<u64, StoreError> {
        let filter = Filter::must([Condition::range(
            "novelty_score",
            Range {
                lt: Some(novelty_score),
                ..Default::default()
            },
        )]);

        self.count(Some(filter)).await
    }

    async fn score_sample(&self, limit: usize) -> Result<Vec<f64>, StoreError> {
        let scroll = ScrollPointsBuilder::new(&self.collection)
            .limit(limit as u32)
            .with_payload(true)
            .with_vectors(false);

        let response =
            self.client
                .scroll(scroll)
                .await
                .map_err(|e| StoreError::SampleFailed {
                    collection: self.collection.clone(),
                    message: e.to_string(),
                })?;

        Ok(response
            .result
            .into_iter()
            .filter_map(|point| {
                point
                    .payload
                    .get("novelty_score")
                    .and_then(|v| v.as_double())
            })
            .collect())
    }
}
