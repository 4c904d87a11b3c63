use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::{
    chunking::{normalize_text, split_text},
    ports::{PageSource, VectorStore},
    ChunkRecord, DomainError,
};

/// Chunking knobs applied to every ingested page.
#[derive(Debug, Clone)]
pub struct ChunkingOptions {
    /// Soft upper bound on chunk length, in characters.
    pub chunk_size: usize,
    /// Tail of the previous chunk carried into the next one.
    pub chunk_overlap: usize,
    /// Chunks shorter than this after cleaning are dropped.
    pub min_chunk_chars: usize,
}

impl Default for ChunkingOptions {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_overlap: 50,
            min_chunk_chars: 200,
        }
    }
}

/// One page that failed to ingest; the run carries on past it.
#[derive(Debug, Clone)]
pub struct PageFailure {
    pub url: String,
    pub reason: String,
}

/// Outcome of an ingestion run. Failed pages are accumulated here instead of
/// aborting the batch; every successfully upserted page stays persisted even
/// if a later page fails.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub pages_total: usize,
    pub pages_failed: usize,
    pub chunks_inserted: usize,
    pub failures: Vec<PageFailure>,
}

/// Crawls a documentation site and indexes its pages chunk by chunk.
pub struct IngestService {
    pages: Arc<dyn PageSource>,
    vector_store: Arc<dyn VectorStore>,
    options: ChunkingOptions,
}

impl IngestService {
    pub fn new(
        pages: Arc<dyn PageSource>,
        vector_store: Arc<dyn VectorStore>,
        options: ChunkingOptions,
    ) -> Self {
        Self {
            pages,
            vector_store,
            options,
        }
    }

    /// Ensures `collection` exists, then ingests up to `page_limit` pages.
    /// Listing failures abort the run; per-page failures are recorded in the
    /// report and skipped.
    #[instrument(skip(self))]
    pub async fn ingest(
        &self,
        collection: &str,
        page_limit: Option<usize>,
    ) -> Result<IngestReport, DomainError> {
        self.vector_store.ensure_collection(collection).await?;

        let urls = self.pages.list_pages(page_limit).await?;
        let mut report = IngestReport::default();

        for url in urls {
            report.pages_total += 1;
            match self.ingest_page(collection, &url).await {
                Ok(count) => {
                    report.chunks_inserted += count;
                    info!(url = %url, chunks = count, "page indexed");
                }
                Err(err) => {
                    report.pages_failed += 1;
                    warn!(url = %url, error = %err, "page skipped");
                    report.failures.push(PageFailure {
                        url,
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            pages = report.pages_total,
            failed = report.pages_failed,
            chunks = report.chunks_inserted,
            "ingestion finished"
        );
        Ok(report)
    }

    /// Fetch, extract, chunk, clean, dedupe and upsert one page. Returns the
    /// number of chunks written.
    async fn ingest_page(&self, collection: &str, url: &str) -> Result<usize, DomainError> {
        let page = self.pages.fetch(url).await?;

        let title = if page.title.is_empty() {
            url.rsplit('/').next().unwrap_or(url).to_string()
        } else {
            page.title
        };

        let mut seen = HashSet::new();
        let mut cleaned = Vec::new();
        for raw in split_text(&page.text, self.options.chunk_size, self.options.chunk_overlap) {
            let chunk = normalize_text(&raw);
            if chunk.len() < self.options.min_chunk_chars {
                continue;
            }
            if !seen.insert(chunk.clone()) {
                continue;
            }
            cleaned.push(chunk);
        }

        let doc_id = Uuid::new_v4();
        let records: Vec<ChunkRecord> = cleaned
            .into_iter()
            .enumerate()
            .map(|(idx, text)| {
                ChunkRecord::new(doc_id, idx, text)
                    .with_title(title.clone())
                    .with_url(url)
            })
            .collect();

        if records.is_empty() {
            return Ok(0);
        }

        self.vector_store.upsert(collection, &records).await?;
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DocumentPage, FilterSpec};
    use crate::infrastructure::vector_store::InMemoryVectorStore;
    use crate::infrastructure::StubEmbedder;
    use async_trait::async_trait;

    struct FakePages;

    #[async_trait]
    impl PageSource for FakePages {
        async fn list_pages(&self, limit: Option<usize>) -> Result<Vec<String>, DomainError> {
            let pages = vec![
                "https://docs.example.com/intro.html".to_string(),
                "https://docs.example.com/broken.html".to_string(),
            ];
            Ok(match limit {
                Some(n) => pages.into_iter().take(n).collect(),
                None => pages,
            })
        }

        async fn fetch(&self, url: &str) -> Result<DocumentPage, DomainError> {
            if url.ends_with("broken.html") {
                return Err(DomainError::connectivity("connection reset"));
            }
            let text = "Python lists are mutable sequences used to store \
                        collections of homogeneous items. They support \
                        indexing, slicing, and in-place modification, which \
                        distinguishes them from immutable tuples."
                .repeat(2);
            Ok(DocumentPage {
                title: "Intro".to_string(),
                text,
            })
        }
    }

    fn service(store: Arc<InMemoryVectorStore>) -> IngestService {
        IngestService::new(
            Arc::new(FakePages),
            store,
            ChunkingOptions {
                chunk_size: 300,
                chunk_overlap: 30,
                min_chunk_chars: 50,
            },
        )
    }

    #[tokio::test]
    async fn test_failed_page_is_reported_not_fatal() {
        let store = Arc::new(InMemoryVectorStore::new(Arc::new(StubEmbedder::new(8))));
        let report = service(store.clone()).ingest("docs", None).await.unwrap();

        assert_eq!(report.pages_total, 2);
        assert_eq!(report.pages_failed, 1);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].url.ends_with("broken.html"));
        assert!(report.chunks_inserted > 0);

        // The healthy page's chunks are searchable afterwards.
        let hits = store
            .search("docs", "mutable sequences", 3, &FilterSpec::new())
            .await
            .unwrap();
        assert!(!hits.is_empty());
        assert_eq!(hits[0].payload.title, "Intro");
        assert_eq!(hits[0].payload.url, "https://docs.example.com/intro.html");
    }

    #[tokio::test]
    async fn test_page_limit_is_honored() {
        let store = Arc::new(InMemoryVectorStore::new(Arc::new(StubEmbedder::new(8))));
        let report = service(store).ingest("docs", Some(1)).await.unwrap();

        assert_eq!(report.pages_total, 1);
        assert_eq!(report.pages_failed, 0);
    }
}
