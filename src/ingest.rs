use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docdex::application::{ChunkingOptions, IngestService};
use docdex::infrastructure::{Config, HttpPageSource, QdrantVectorStore, TextEmbedder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docdex=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env();

    let embedder = Arc::new(TextEmbedder::from_config(&config.embedding));
    let store = Arc::new(QdrantVectorStore::new(&config.qdrant_url, embedder)?);
    let pages = Arc::new(HttpPageSource::new(&config.ingest.base_url)?);

    let service = IngestService::new(
        pages,
        store,
        ChunkingOptions {
            chunk_size: config.ingest.chunk_size,
            chunk_overlap: config.ingest.chunk_overlap,
            min_chunk_chars: config.ingest.min_chunk_chars,
        },
    );

    info!(
        collection = %config.collection,
        base_url = %config.ingest.base_url,
        page_limit = config.ingest.page_limit,
        "starting ingestion"
    );

    let report = service
        .ingest(&config.collection, Some(config.ingest.page_limit))
        .await?;

    for failure in &report.failures {
        warn!(url = %failure.url, reason = %failure.reason, "page failed");
    }
    println!(
        "Done: pages={}, failed={}, chunks={}",
        report.pages_total, report.pages_failed, report.chunks_inserted
    );

    Ok(())
}
