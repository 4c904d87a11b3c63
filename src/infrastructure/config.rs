use std::env;
use std::str::FromStr;

/// Process configuration, loaded from the environment with documented
/// defaults. `dotenvy` is invoked by the binaries before this is read.
#[derive(Debug, Clone)]
pub struct Config {
    pub qdrant_url: String,
    pub collection: String,
    pub embedding: EmbeddingConfig,
    pub ingest: IngestConfig,
}

#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub model: String,
    pub dimension: usize,
}

#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Crawl root; page discovery reads `contents.html` under it.
    pub base_url: String,
    /// Maximum pages per ingestion run.
    pub page_limit: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub min_chunk_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            qdrant_url: "http://localhost:6334".to_string(),
            collection: "docs".to_string(),
            embedding: EmbeddingConfig {
                model: "text-embedding-3-small".to_string(),
                dimension: 1536,
            },
            ingest: IngestConfig {
                base_url: "https://docs.python.org/3/".to_string(),
                page_limit: 50,
                chunk_size: 500,
                chunk_overlap: 50,
                min_chunk_chars: 200,
            },
        }
    }
}

impl Config {
    /// Reads `QDRANT_URL`, `COLLECTION`, `EMBEDDING_MODEL`,
    /// `EMBEDDING_DIMENSION`, `DOCS_BASE_URL`, `INGEST_LIMIT`, `CHUNK_SIZE`,
    /// `CHUNK_OVERLAP` and `MIN_CHUNK_CHARS`, falling back to the defaults
    /// above for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            qdrant_url: env_or("QDRANT_URL", defaults.qdrant_url),
            collection: env_or("COLLECTION", defaults.collection),
            embedding: EmbeddingConfig {
                model: env_or("EMBEDDING_MODEL", defaults.embedding.model),
                dimension: env_or_parse("EMBEDDING_DIMENSION", defaults.embedding.dimension),
            },
            ingest: IngestConfig {
                base_url: env_or("DOCS_BASE_URL", defaults.ingest.base_url),
                page_limit: env_or_parse("INGEST_LIMIT", defaults.ingest.page_limit),
                chunk_size: env_or_parse("CHUNK_SIZE", defaults.ingest.chunk_size),
                chunk_overlap: env_or_parse("CHUNK_OVERLAP", defaults.ingest.chunk_overlap),
                min_chunk_chars: env_or_parse("MIN_CHUNK_CHARS", defaults.ingest.min_chunk_chars),
            },
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

fn env_or_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
