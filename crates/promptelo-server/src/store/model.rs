use chrono::{DateTime, Utc};

/// A neighbor returned by a similarity query.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    /// Record id (insertion-ordered).
    pub id: u64,
    /// Cosine similarity to the query vector.
    pub similarity: f32,
    /// Novelty score the neighbor was recorded with.
    pub novelty_score: f64,
}

/// A stored embedding record. No prompt text is ever persisted.
#[derive(Debug, Clone)]
pub struct PromptRecord {
    /// Record id.
    pub id: u64,
    /// Embedding vector.
    pub embedding: Vec<f32>,
    /// Novelty score at submission time.
    pub novelty_score: f64,
    /// Optional anonymous submitter id.
    pub user_id: Option<String>,
    /// Insertion timestamp.
    pub created_at: DateTime<Utc>,
}

/// Aggregate store counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    /// Total number of stored records.
    pub total_count: u64,
}

/// Cosine similarity between two vectors. Zero for mismatched lengths or
/// zero-norm inputs.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}
