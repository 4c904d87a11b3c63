use std::sync::Arc;
use tracing::instrument;

use crate::domain::{ports::VectorStore, ChunkRecord, DomainError, FilterSpec, ScoredChunk};

/// Answers a query by combining a filter spec with a similarity search.
///
/// Stateless between calls; the store owns all persisted data.
pub struct Retriever {
    vector_store: Arc<dyn VectorStore>,
}

impl Retriever {
    pub fn new(vector_store: Arc<dyn VectorStore>) -> Self {
        Self { vector_store }
    }

    /// Payload-only retrieval; ordering follows the store's descending-score
    /// order. `top_k == 0` is rejected rather than clamped.
    #[instrument(skip(self, filter))]
    pub async fn retrieve(
        &self,
        collection: &str,
        query: &str,
        top_k: usize,
        filter: &FilterSpec,
    ) -> Result<Vec<ChunkRecord>, DomainError> {
        let scored = self
            .retrieve_with_scores(collection, query, top_k, filter)
            .await?;
        Ok(scored.into_iter().map(|hit| hit.payload).collect())
    }

    /// Like [`Retriever::retrieve`] but keeps each hit's similarity score
    /// alongside its payload.
    #[instrument(skip(self, filter))]
    pub async fn retrieve_with_scores(
        &self,
        collection: &str,
        query: &str,
        top_k: usize,
        filter: &FilterSpec,
    ) -> Result<Vec<ScoredChunk>, DomainError> {
        if top_k == 0 {
            return Err(DomainError::validation("top_k must be positive"));
        }
        self.vector_store
            .search(collection, query, top_k, filter)
            .await
    }
}
