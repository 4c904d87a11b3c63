mod filter;
mod in_memory;
mod qdrant;

pub use filter::build_filter;
pub use in_memory::InMemoryVectorStore;
pub use qdrant::QdrantVectorStore;
