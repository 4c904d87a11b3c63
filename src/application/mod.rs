//! Application layer - use cases and orchestration.
//!
//! Services here orchestrate domain logic through the domain ports (traits)
//! rather than concrete adapters.

pub mod services;

pub use services::{ChunkingOptions, IngestReport, IngestService, PageFailure, Retriever};
