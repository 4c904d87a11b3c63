use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One bounded slice of a source document, the unit of embedding and retrieval.
///
/// `(doc_id, chunk_id)` identifies a chunk within its document. The vector
/// store assigns each upserted point its own fresh point id, distinct from
/// `doc_id`, so re-ingesting a page never collides with earlier points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub doc_id: Uuid,
    pub chunk_id: usize,
    pub title: String,
    pub url: String,
    pub section: String,
    pub text: String,
}

impl ChunkRecord {
    pub fn new(doc_id: Uuid, chunk_id: usize, text: impl Into<String>) -> Self {
        Self {
            doc_id,
            chunk_id,
            title: String::new(),
            url: String::new(),
            section: String::new(),
            text: text.into(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }
}

/// A search hit: the stored payload plus its similarity score.
///
/// The score lives in its own field rather than being merged into the
/// payload, so a payload field named "score" can never be overwritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub payload: ChunkRecord,
    pub score: f32,
}
