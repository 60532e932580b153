use std::sync::Arc;

use crate::gateway::limit::RateLimiter;
use crate::novelty::NoveltyService;
use crate::store::VectorStore;

/// Shared state behind every handler.
pub struct HandlerState<S: VectorStore + 'static> {
    pub service: Arc<NoveltyService<S>>,
    pub limiter: Arc<RateLimiter>,
}

// Manual impl: `#[derive(Clone)]` would require `S: Clone`, which the
// Arc-held service does not need.
impl<S: VectorStore + 'static> Clone for HandlerState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            limiter: Arc::clone(&self.limiter),
        }
    }
}

impl<S: VectorStore + 'static> HandlerState<S> {
    pub fn new(service: Arc<NoveltyService<S>>, limiter: Arc<RateLimiter>) -> Self {
        Self { service, limiter }
    }
}
