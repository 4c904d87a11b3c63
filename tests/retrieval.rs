use std::sync::Arc;

use uuid::Uuid;

use docdex::application::Retriever;
use docdex::domain::ports::VectorStore;
use docdex::domain::{ChunkRecord, Condition, DomainError, FilterSpec};
use docdex::infrastructure::{InMemoryVectorStore, StubEmbedder};

fn store() -> Arc<InMemoryVectorStore> {
    Arc::new(InMemoryVectorStore::new(Arc::new(StubEmbedder::new(32))))
}

#[tokio::test]
async fn end_to_end_single_chunk_roundtrip() {
    let store = store();
    store.ensure_collection("docs").await.unwrap();

    let record = ChunkRecord::new(Uuid::new_v4(), 0, "Python lists are mutable sequences.")
        .with_title("x")
        .with_url("u");
    store.upsert("docs", &[record]).await.unwrap();

    let retriever = Retriever::new(store);
    let hits = retriever
        .retrieve("docs", "What is a mutable sequence?", 1, &FilterSpec::new())
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].text, "Python lists are mutable sequences.");
    assert_eq!(hits[0].title, "x");
    assert_eq!(hits[0].url, "u");
}

#[tokio::test]
async fn filtered_retrieval_excludes_deprecated_sections() {
    let store = store();
    store.ensure_collection("docs").await.unwrap();

    let doc_id = Uuid::new_v4();
    let records = vec![
        ChunkRecord::new(doc_id, 0, "The array module provides compact arrays.")
            .with_section("library"),
        ChunkRecord::new(doc_id, 1, "The imp module provides import machinery.")
            .with_section("deprecated"),
        ChunkRecord::new(doc_id, 2, "The optparse module parses options.").with_section("legacy"),
    ];
    store.upsert("docs", &records).await.unwrap();

    let retriever = Retriever::new(store);
    let filter =
        FilterSpec::new().must_not(Condition::any_of("section", ["deprecated", "legacy"]));

    let hits = retriever
        .retrieve_with_scores("docs", "module", 5, &filter)
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].payload.section, "library");
    assert!(hits[0].score >= -1.0 && hits[0].score <= 1.0);
}

#[tokio::test]
async fn search_against_unknown_collection_is_not_found() {
    let retriever = Retriever::new(store());
    let err = retriever
        .retrieve("never-created", "anything", 3, &FilterSpec::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn requested_limit_caps_result_count() {
    let store = store();
    store.ensure_collection("docs").await.unwrap();

    let doc_id = Uuid::new_v4();
    let records: Vec<ChunkRecord> = (0..4)
        .map(|i| ChunkRecord::new(doc_id, i, format!("Chapter {i} discusses sequences in depth.")))
        .collect();
    store.upsert("docs", &records).await.unwrap();

    let retriever = Retriever::new(store);
    let hits = retriever
        .retrieve_with_scores("docs", "sequences", 2, &FilterSpec::new())
        .await
        .unwrap();

    assert_eq!(hits.len(), 2);
    assert!(hits[0].score >= hits[1].score);
}
