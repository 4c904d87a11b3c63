use std::sync::Arc;

use async_trait::async_trait;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant, QdrantError};
use uuid::Uuid;

use crate::domain::{
    ports::{Embedder, VectorStore},
    ChunkRecord, DomainError, FilterSpec, ScoredChunk,
};

use super::filter::build_filter;

/// Qdrant-backed store. Collections are created lazily with the embedder's
/// dimension and cosine distance; every point carries the chunk payload.
pub struct QdrantVectorStore {
    client: Qdrant,
    embedder: Arc<dyn Embedder>,
}

impl QdrantVectorStore {
    pub fn new(url: &str, embedder: Arc<dyn Embedder>) -> Result<Self, DomainError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| DomainError::connectivity(e.to_string()))?;

        Ok(Self { client, embedder })
    }

    /// Qdrant reports a missing collection as a response error; everything
    /// else on this path is treated as a connectivity failure.
    fn store_error(collection: &str, err: QdrantError) -> DomainError {
        let msg = err.to_string();
        if msg.contains("doesn't exist") || msg.contains("Not found") {
            DomainError::not_found(format!("collection `{collection}` does not exist"))
        } else {
            DomainError::connectivity(msg)
        }
    }

    fn record_payload(record: &ChunkRecord) -> Result<Payload, DomainError> {
        serde_json::json!({
            "doc_id": record.doc_id.to_string(),
            "chunk_id": record.chunk_id,
            "title": record.title,
            "url": record.url,
            "section": record.section,
            "text": record.text,
        })
        .try_into()
        .map_err(|_| DomainError::internal("Failed to create point payload"))
    }
}

#[async_trait]
impl VectorStore for QdrantVectorStore {
    async fn ensure_collection(&self, name: &str) -> Result<(), DomainError> {
        let collections = self
            .client
            .list_collections()
            .await
            .map_err(|e| DomainError::connectivity(e.to_string()))?;

        let exists = collections.collections.iter().any(|c| c.name == name);

        if !exists {
            self.client
                .create_collection(CreateCollectionBuilder::new(name).vectors_config(
                    VectorParamsBuilder::new(self.embedder.dimension() as u64, Distance::Cosine),
                ))
                .await
                .map_err(|e| DomainError::connectivity(e.to_string()))?;
        }

        Ok(())
    }

    async fn upsert(&self, collection: &str, records: &[ChunkRecord]) -> Result<(), DomainError> {
        if records.is_empty() {
            return Ok(());
        }

        let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
        let vectors = self.embedder.encode(&texts).await?;

        let mut points = Vec::with_capacity(records.len());
        for (record, vector) in records.iter().zip(vectors) {
            points.push(PointStruct::new(
                Uuid::new_v4().to_string(),
                vector.into_inner(),
                Self::record_payload(record)?,
            ));
        }

        self.client
            .upsert_points(UpsertPointsBuilder::new(collection, points))
            .await
            .map_err(|e| Self::store_error(collection, e))?;

        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        query: &str,
        limit: usize,
        filter: &FilterSpec,
    ) -> Result<Vec<ScoredChunk>, DomainError> {
        filter.validate()?;

        let vector = self
            .embedder
            .encode(&[query])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::internal("No embedding returned for query"))?;

        let mut request =
            SearchPointsBuilder::new(collection, vector.into_inner(), limit as u64)
                .with_payload(true);
        if let Some(filter) = build_filter(filter) {
            request = request.filter(filter);
        }

        let results = self
            .client
            .search_points(request)
            .await
            .map_err(|e| Self::store_error(collection, e))?;

        let hits: Vec<ScoredChunk> = results
            .result
            .into_iter()
            .filter_map(|point| {
                let payload = point.payload;

                let doc_id: Uuid = payload.get("doc_id")?.as_str()?.parse().ok()?;
                let chunk_id = payload.get("chunk_id")?.as_integer()? as usize;
                let title = payload.get("title")?.as_str()?.to_string();
                let url = payload.get("url")?.as_str()?.to_string();
                let section = payload.get("section")?.as_str()?.to_string();
                let text = payload.get("text")?.as_str()?.to_string();

                Some(ScoredChunk {
                    payload: ChunkRecord {
                        doc_id,
                        chunk_id,
                        title,
                        url,
                        section,
                        text,
                    },
                    score: point.score,
                })
            })
            .collect();

        Ok(hits)
    }
}
