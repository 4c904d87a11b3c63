use crate::domain::{errors::DomainError, DocumentPage};
use async_trait::async_trait;

/// Source of documentation pages for ingestion. Implementations own the
/// transport and HTML extraction; callers only see readable page text.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Lists absolute page URLs, deduplicated and sorted, truncated to
    /// `limit` when given.
    async fn list_pages(&self, limit: Option<usize>) -> Result<Vec<String>, DomainError>;

    /// Fetches and extracts the page behind one URL.
    async fn fetch(&self, url: &str) -> Result<DocumentPage, DomainError>;
}
