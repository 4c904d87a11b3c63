//! Documentation ingestion and retrieval pipeline.
//!
//! Crawls a documentation site, chunks and embeds its pages into a Qdrant
//! collection, and answers queries through filtered similarity search.
//! The domain layer defines the entities and ports; application services
//! orchestrate them; infrastructure supplies the Qdrant, OpenAI-embedding,
//! and HTTP-crawling adapters.

pub mod application;
pub mod domain;
pub mod infrastructure;
