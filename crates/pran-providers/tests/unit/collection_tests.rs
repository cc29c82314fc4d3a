//! Tests for the collection-per-partition backend against a mock HTTP server

use std::sync::Arc;

use mockito::{Matcher, Mock, Server, ServerGuard};
use pran_domain::ports::providers::{SearchFilter, VectorStoreFactory};
use pran_domain::{Document, Error, Partition};
use pran_providers::embedding::NullEmbeddingProvider;
use pran_providers::vector_store::{
    BackendKind, VectorBackend, VectorBackendFactory, VectorStoreSettings,
};
use serde_json::json;

const DIMS: usize = 8;

fn settings(server: &ServerGuard) -> VectorStoreSettings {
    let mut settings = VectorStoreSettings::default();
    settings.backend = BackendKind::Collection;
    settings.dimensions = DIMS;
    settings.timeout_secs = 5;
    settings.collection.url = Some(server.url());
    settings.collection.api_key = Some("qdrant-key".to_string());
    settings
}

async fn factory(server: &ServerGuard) -> VectorBackendFactory {
    let backend = VectorBackend::connect(&settings(server)).await.unwrap();
    VectorBackendFactory::new(
        backend,
        Arc::new(NullEmbeddingProvider::with_dimensions(DIMS)),
        DIMS,
        2,
    )
}

async fn existing_with_size(
    server: &mut ServerGuard,
    collection: &str,
    size: usize,
) -> (Mock, Mock) {
    let exists = server
        .mock("GET", format!("/collections/{collection}/exists").as_str())
        .with_status(200)
        .with_body(r#"{"result": {"exists": true}, "status": "ok"}"#)
        .create_async()
        .await;
    let info = server
        .mock("GET", format!("/collections/{collection}").as_str())
        .with_status(200)
        .with_body(
            json!({"result": {"config": {"params": {
                "vectors": {"size": size, "distance": "Cosine"}
            }}}})
            .to_string(),
        )
        .create_async()
        .await;
    (exists, info)
}

async fn existing(server: &mut ServerGuard, collection: &str) -> (Mock, Mock) {
    existing_with_size(server, collection, DIMS).await
}

#[tokio::test]
async fn test_missing_url_is_configuration_error() {
    let server = Server::new_async().await;
    let mut settings = settings(&server);
    settings.collection.url = None;
    let err = VectorBackend::connect(&settings).await.err().unwrap();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[tokio::test]
async fn test_open_creates_missing_collection() {
    let mut server = Server::new_async().await;
    let _exists = server
        .mock("GET", "/collections/yoga_collection/exists")
        .match_header("api-key", "qdrant-key")
        .with_status(200)
        .with_body(r#"{"result": {"exists": false}}"#)
        .create_async()
        .await;
    let create = server
        .mock("PUT", "/collections/yoga_collection")
        .match_body(Matcher::Json(json!({"vectors": {"size": DIMS, "distance": "Cosine"}})))
        .with_status(200)
        .with_body(r#"{"result": true}"#)
        .expect(1)
        .create_async()
        .await;

    let factory = factory(&server).await;
    factory
        .open(Partition::new("yoga_collection").unwrap())
        .await
        .unwrap();
    create.assert_async().await;
}

#[tokio::test]
async fn test_open_rejects_collection_with_other_dimension() {
    let mut server = Server::new_async().await;
    let (_exists, info) = existing_with_size(&mut server, "yoga_collection", 4).await;
    let create = server
        .mock("PUT", "/collections/yoga_collection")
        .expect(0)
        .create_async()
        .await;

    let err = factory(&server)
        .await
        .open(Partition::new("yoga_collection").unwrap())
        .await
        .err()
        .unwrap();

    info.assert_async().await;
    create.assert_async().await;
    assert!(matches!(
        err,
        Error::DimensionMismatch {
            expected: 4,
            actual: DIMS
        }
    ));
}

#[tokio::test]
async fn test_upsert_batches_and_count() {
    let mut server = Server::new_async().await;
    let _exists = existing(&mut server, "ayush_collection").await;
    let upsert = server
        .mock(
            "PUT",
            Matcher::Regex(r"^/collections/ayush_collection/points".to_string()),
        )
        .with_status(200)
        .with_body(r#"{"result": {"status": "completed"}}"#)
        .expect(3)
        .create_async()
        .await;
    let _count = server
        .mock("POST", "/collections/ayush_collection/points/count")
        .match_body(Matcher::Json(json!({"exact": true})))
        .with_status(200)
        .with_body(r#"{"result": {"count": 5}}"#)
        .create_async()
        .await;

    let store = factory(&server)
        .await
        .open(Partition::new("ayush_collection").unwrap())
        .await
        .unwrap();
    let docs: Vec<Document> = (0..5)
        .map(|i| Document::new(format!("Triphala note {i}")))
        .collect();
    let ids = store.add_documents(&docs).await.unwrap();

    upsert.assert_async().await;
    assert_eq!(ids.len(), 5);
    assert_eq!(store.count().await.unwrap(), 5);
    assert_eq!(store.provider_name(), "collection");
}

#[tokio::test]
async fn test_search_maps_payload() {
    let mut server = Server::new_async().await;
    let _exists = existing(&mut server, "symptoms_collection").await;
    let search = server
        .mock("POST", "/collections/symptoms_collection/points/search")
        .match_body(Matcher::PartialJson(json!({
            "limit": 3,
            "with_payload": true,
            "filter": {"must": [{"key": "source", "match": {"value": "fever.pdf"}}]}
        })))
        .with_status(200)
        .with_body(
            json!({"result": [
                {"id": "1", "score": 0.88, "payload": {"text": "Rest and fluids", "source": "fever.pdf"}},
                {"id": "2", "score": 0.52, "payload": {"text": "Cool compress", "source": "fever.pdf"}}
            ]})
            .to_string(),
        )
        .create_async()
        .await;

    let store = factory(&server)
        .await
        .open(Partition::new("symptoms_collection").unwrap())
        .await
        .unwrap();
    let filter = SearchFilter::from([("source".to_string(), json!("fever.pdf"))]);
    let hits = store.search("high fever", 3, Some(&filter)).await.unwrap();

    search.assert_async().await;
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].content, "Rest and fluids");
    assert_eq!(hits[0].metadata.get("source"), Some(&json!("fever.pdf")));
    assert!(!hits[0].metadata.contains_key("text"));
}

#[tokio::test]
async fn test_server_error_is_transient() {
    let mut server = Server::new_async().await;
    let _exists = existing(&mut server, "yoga_collection").await;
    let _search = server
        .mock("POST", "/collections/yoga_collection/points/search")
        .with_status(502)
        .create_async()
        .await;

    let store = factory(&server)
        .await
        .open(Partition::new("yoga_collection").unwrap())
        .await
        .unwrap();
    let err = store.search("neck stretch", 4, None).await.unwrap_err();
    assert!(err.is_retryable());
    assert!(err.is_backend_unavailable());
}
