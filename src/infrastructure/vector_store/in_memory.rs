use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    ports::{Embedder, VectorStore},
    ChunkRecord, DomainError, Embedding, FieldValue, FilterSpec, ScoredChunk,
};

struct StoredPoint {
    point_id: Uuid,
    record: ChunkRecord,
    vector: Embedding,
}

/// In-process store with brute-force cosine search. Backs tests and local
/// runs; mirrors the Qdrant adapter's contract, including filter semantics.
pub struct InMemoryVectorStore {
    embedder: Arc<dyn Embedder>,
    collections: RwLock<HashMap<String, Vec<StoredPoint>>>,
}

impl InMemoryVectorStore {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            collections: RwLock::new(HashMap::new()),
        }
    }

    fn record_field(record: &ChunkRecord, field: &str) -> Option<FieldValue> {
        match field {
            "doc_id" => Some(FieldValue::String(record.doc_id.to_string())),
            "chunk_id" => Some(FieldValue::Integer(record.chunk_id as i64)),
            "title" => Some(FieldValue::String(record.title.clone())),
            "url" => Some(FieldValue::String(record.url.clone())),
            "section" => Some(FieldValue::String(record.section.clone())),
            "text" => Some(FieldValue::String(record.text.clone())),
            _ => None,
        }
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn ensure_collection(&self, name: &str) -> Result<(), DomainError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        collections.entry(name.to_string()).or_default();
        Ok(())
    }

    async fn upsert(&self, collection: &str, records: &[ChunkRecord]) -> Result<(), DomainError> {
        if records.is_empty() {
            return Ok(());
        }

        let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
        let vectors = self.embedder.encode(&texts).await?;

        let mut collections = self
            .collections
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let points = collections
            .get_mut(collection)
            .ok_or_else(|| {
                DomainError::not_found(format!("collection `{collection}` does not exist"))
            })?;

        for (record, vector) in records.iter().zip(vectors) {
            points.push(StoredPoint {
                point_id: Uuid::new_v4(),
                record: record.clone(),
                vector,
            });
        }

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

        let collections = self
            .collections
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let points = collections.get(collection).ok_or_else(|| {
            DomainError::not_found(format!("collection `{collection}` does not exist"))
        })?;

        let mut hits: Vec<ScoredChunk> = points
            .iter()
            .filter(|point| filter.evaluate(|field| Self::record_field(&point.record, field)))
            .map(|point| ScoredChunk {
                payload: point.record.clone(),
                score: vector.cosine_similarity(&point.vector),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(limit);

        Ok(hits)
    }
}
