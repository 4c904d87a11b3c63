use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docdex::application::Retriever;
use docdex::domain::FilterSpec;
use docdex::infrastructure::{Config, QdrantVectorStore, TextEmbedder};

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

    let mut args = std::env::args().skip(1).peekable();
    let mut with_scores = false;
    if args.peek().map(String::as_str) == Some("--scores") {
        with_scores = true;
        args.next();
    }
    let Some(query) = args.next() else {
        anyhow::bail!("usage: search [--scores] <query> [top_k]");
    };
    let top_k: usize = match args.next() {
        Some(raw) => raw.parse()?,
        None => 5,
    };

    let embedder = Arc::new(TextEmbedder::from_config(&config.embedding));
    let store = Arc::new(QdrantVectorStore::new(&config.qdrant_url, embedder)?);
    let retriever = Retriever::new(store);

    info!(collection = %config.collection, top_k, "searching");

    let filter = FilterSpec::new();
    if with_scores {
        let hits = retriever
            .retrieve_with_scores(&config.collection, &query, top_k, &filter)
            .await?;
        for (rank, hit) in hits.iter().enumerate() {
            println!(
                "[{}] {:.4} {} ({})",
                rank + 1,
                hit.score,
                hit.payload.title,
                hit.payload.url
            );
            println!("{}\n", hit.payload.text);
        }
    } else {
        let hits = retriever
            .retrieve(&config.collection, &query, top_k, &filter)
            .await?;
        for (rank, payload) in hits.iter().enumerate() {
            println!("[{}] {} ({})", rank + 1, payload.title, payload.url);
            println!("{}\n", payload.text);
        }
    }

    Ok(())
}
