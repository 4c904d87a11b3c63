mod chunk;
mod embedding;
mod filter;
mod page;

pub use chunk::{ChunkRecord, ScoredChunk};
pub use embedding::Embedding;
pub use filter::{Condition, FieldValue, FilterSpec};
pub use page::DocumentPage;
