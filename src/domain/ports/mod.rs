mod embedder;
mod page_source;
mod vector_store;

pub use embedder::Embedder;
pub use page_source::PageSource;
pub use vector_store::VectorStore;
