pub mod config;
pub mod embedding;
pub mod ingestion;
pub mod vector_store;

pub use config::{Config, EmbeddingConfig, IngestConfig};
pub use embedding::{StubEmbedder, TextEmbedder};
pub use ingestion::HttpPageSource;
pub use vector_store::{InMemoryVectorStore, QdrantVectorStore};
