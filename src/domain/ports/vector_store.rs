use crate::domain::{errors::DomainError, ChunkRecord, FilterSpec, ScoredChunk};
use async_trait::async_trait;

#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Idempotently guarantees `name` exists with the embedder's dimension
    /// and cosine distance. A no-op when the collection is already present.
    async fn ensure_collection(&self, name: &str) -> Result<(), DomainError>;

    /// Embeds every record's text in one batch and writes one point per
    /// record, each under a freshly generated point id. An empty slice is a
    /// no-op; a missing collection is a `NotFound` error.
    async fn upsert(&self, collection: &str, records: &[ChunkRecord]) -> Result<(), DomainError>;

    /// Embeds `query` and returns up to `limit` hits restricted by `filter`
    /// (unrestricted when the spec is empty), ordered by descending score.
    /// Tie order is backend-native and must not be relied upon.
    async fn search(
        &self,
        collection: &str,
        query: &str,
        limit: usize,
        filter: &FilterSpec,
    ) -> Result<Vec<ScoredChunk>, DomainError>;
}
