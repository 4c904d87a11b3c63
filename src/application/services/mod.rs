mod ingest;
mod retriever;

pub use ingest::{ChunkingOptions, IngestReport, IngestService, PageFailure};
pub use retriever::Retriever;
