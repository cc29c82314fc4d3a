//! Tests for the local backend through the partition-scoped adapter

use std::sync::Arc;

use pran_domain::ports::providers::{
    DocumentSource, SearchFilter, VectorStoreFactory, VectorStoreProvider,
};
use pran_domain::{Document, Error, Partition};
use pran_providers::embedding::NullEmbeddingProvider;
use pran_providers::vector_store::{
    BackendKind, LocalStore, VectorBackend, VectorBackendFactory, VectorStoreSettings,
};
use serde_json::json;
use tempfile::TempDir;

const DIMS: usize = 16;

fn local_settings(dir: &TempDir) -> VectorStoreSettings {
    let mut settings = VectorStoreSettings::default();
    settings.backend = BackendKind::Local;
    settings.dimensions = DIMS;
    settings.local.base_path = dir.path().to_path_buf();
    settings
}

async fn factory(dir: &TempDir, dims: usize) -> VectorBackendFactory {
    let backend = VectorBackend::connect(&local_settings(dir)).await.unwrap();
    VectorBackendFactory::new(
        backend,
        Arc::new(NullEmbeddingProvider::with_dimensions(dims)),
        dims,
        100,
    )
}

async fn open(factory: &VectorBackendFactory, name: &str) -> Arc<dyn VectorStoreProvider> {
    factory.open(Partition::new(name).unwrap()).await.unwrap()
}

fn remedies() -> Vec<Document> {
    vec![
        Document::new("Ginger tea with honey eases a dry cough.")
            .with_metadata("source", json!("cough.pdf"))
            .with_metadata("page", json!(2)),
        Document::new("Steam inhalation with eucalyptus clears congestion.")
            .with_metadata("source", json!("cough.pdf"))
            .with_metadata("page", json!(5)),
        Document::new("Turmeric milk before bed supports recovery.")
            .with_metadata("source", json!("ayurveda.pdf")),
    ]
}

#[tokio::test]
async fn test_add_returns_one_id_per_document() {
    let dir = TempDir::new().unwrap();
    let store = open(&factory(&dir, DIMS).await, "remedies_collection").await;

    let ids = store.add_documents(&remedies()).await.unwrap();
    assert_eq!(ids.len(), 3);
    assert_eq!(store.count().await.unwrap(), 3);
    assert_eq!(store.provider_name(), "local");
}

#[tokio::test]
async fn test_partitions_are_isolated() {
    let dir = TempDir::new().unwrap();
    let factory = factory(&dir, DIMS).await;
    let yoga = open(&factory, "yoga_collection").await;
    let ayush = open(&factory, "ayush_collection").await;

    yoga.add_documents(&[Document::new("Child's pose relieves back tension.")])
        .await
        .unwrap();
    ayush.add_documents(&remedies()).await.unwrap();

    assert_eq!(yoga.count().await.unwrap(), 1);
    assert_eq!(ayush.count().await.unwrap(), 3);

    let hits = yoga.search("Turmeric milk before bed supports recovery.", 4, None).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].content, "Child's pose relieves back tension.");
}

#[tokio::test]
async fn test_search_is_bounded_and_ordered() {
    let dir = TempDir::new().unwrap();
    let store = open(&factory(&dir, DIMS).await, "remedies_collection").await;
    store.add_documents(&remedies()).await.unwrap();

    let hits = store
        .search("Steam inhalation with eucalyptus clears congestion.", 2, None)
        .await
        .unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].content, "Steam inhalation with eucalyptus clears congestion.");
    assert!((hits[0].similarity - 1.0).abs() < 1e-5);
    assert!(hits[0].similarity >= hits[1].similarity);
    for hit in &hits {
        assert!((-1.0..=1.0 + 1e-6).contains(&hit.similarity));
    }
}

#[tokio::test]
async fn test_metadata_round_trips_without_content_key() {
    let dir = TempDir::new().unwrap();
    let store = open(&factory(&dir, DIMS).await, "remedies_collection").await;
    store.add_documents(&remedies()).await.unwrap();

    let hits = store
        .search("Ginger tea with honey eases a dry cough.", 1, None)
        .await
        .unwrap();
    assert_eq!(hits[0].metadata.get("source"), Some(&json!("cough.pdf")));
    assert_eq!(hits[0].metadata.get("page"), Some(&json!(2)));
    assert!(!hits[0].metadata.contains_key("text"));
    assert_eq!(hits[0].source_name(), Some("cough.pdf"));
}

#[tokio::test]
async fn test_filter_restricts_results() {
    let dir = TempDir::new().unwrap();
    let store = open(&factory(&dir, DIMS).await, "remedies_collection").await;
    store.add_documents(&remedies()).await.unwrap();

    let filter = SearchFilter::from([("source".to_string(), json!("ayurveda.pdf"))]);
    let hits = store
        .search("Ginger tea with honey eases a dry cough.", 4, Some(&filter))
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].content, "Turmeric milk before bed supports recovery.");
}

#[tokio::test]
async fn test_empty_partition_search_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = open(&factory(&dir, DIMS).await, "empty_collection").await;
    assert!(store.search("anything", 4, None).await.unwrap().is_empty());
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_invalid_inputs_are_rejected() {
    let dir = TempDir::new().unwrap();
    let store = open(&factory(&dir, DIMS).await, "remedies_collection").await;

    let err = store.add_documents(&[]).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));

    let err = store
        .add_documents(&[Document::new("x").with_metadata("text", json!("shadow"))])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));

    let err = store.search("cough", 0, None).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_reopening_with_other_dimension_fails() {
    let dir = TempDir::new().unwrap();
    let store = open(&factory(&dir, DIMS).await, "remedies_collection").await;
    store.add_documents(&remedies()).await.unwrap();

    let other = factory(&dir, DIMS * 2).await;
    let err = other
        .open(Partition::new("remedies_collection").unwrap())
        .await
        .err()
        .unwrap();
    assert!(matches!(
        err,
        Error::DimensionMismatch {
            expected: DIMS,
            actual
        } if actual == DIMS * 2
    ));
}

#[tokio::test]
async fn test_records_survive_reload() {
    let dir = TempDir::new().unwrap();
    {
        let store = open(&factory(&dir, DIMS).await, "remedies_collection").await;
        store.add_documents(&remedies()).await.unwrap();
    }

    let reopened = open(&factory(&dir, DIMS).await, "remedies_collection").await;
    assert_eq!(reopened.count().await.unwrap(), 3);
    let hits = reopened
        .search("Turmeric milk before bed supports recovery.", 1, None)
        .await
        .unwrap();
    assert_eq!(hits[0].content, "Turmeric milk before bed supports recovery.");
}

#[tokio::test]
async fn test_list_and_export_collections() {
    let dir = TempDir::new().unwrap();
    let factory = factory(&dir, DIMS).await;
    open(&factory, "yoga_collection")
        .await
        .add_documents(&[Document::new("Sun salutation warms the body.")])
        .await
        .unwrap();
    open(&factory, "ayush_collection")
        .await
        .add_documents(&remedies())
        .await
        .unwrap();

    let source = LocalStore::new(dir.path().to_path_buf());
    let collections = source.list_collections().await.unwrap();
    let names: Vec<_> = collections.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["ayush_collection", "yoga_collection"]);
    assert_eq!(collections[0].vector_count, 3);
    assert_eq!(collections[0].dimensions, Some(DIMS));

    let exported = source.export("ayush_collection").await.unwrap();
    assert_eq!(exported.len(), 3);
    assert_eq!(exported[0].content(), "Ginger tea with honey eases a dry cough.");
    assert_eq!(exported[0].metadata().get("page"), Some(&json!(2)));

    assert!(source.export("missing_collection").await.is_err());
}

#[tokio::test]
async fn test_malformed_lines_are_skipped() {
    let dir = TempDir::new().unwrap();
    {
        let store = open(&factory(&dir, DIMS).await, "remedies_collection").await;
        store.add_documents(&remedies()).await.unwrap();
    }
    let records = dir.path().join("remedies_collection").join("records.jsonl");
    let mut content = std::fs::read_to_string(&records).unwrap();
    content.push_str("{not json}\n");
    std::fs::write(&records, content).unwrap();

    let source = LocalStore::new(dir.path().to_path_buf());
    assert_eq!(source.export("remedies_collection").await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_collections_on_missing_root() {
    let dir = TempDir::new().unwrap();
    let source = LocalStore::new(dir.path().join("never-created"));
    assert!(source.list_collections().await.unwrap().is_empty());
}
