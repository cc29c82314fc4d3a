//! Composition root tests
//!
//! Contexts use the null embedder, a local store in a temp directory and an
//! Ollama model, none of which touch the network while being built.

use pran_domain::error::Error;
use pran_domain::value_objects::Document;
use pran_infrastructure::AppContext;
use pran_infrastructure::config::{AppConfig, EmbeddingProviderKind, LanguageModelKind};
use tempfile::TempDir;

fn offline_config(dir: &TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.embedding.provider = EmbeddingProviderKind::Null;
    config.language_model.provider = LanguageModelKind::Ollama;
    config.language_model.model = "llama3".to_string();
    config.vector_store.dimensions = 16;
    config.vector_store.local.base_path = dir.path().join("vectors");
    config
}

#[test]
fn test_null_embedder_follows_store_dimensions() {
    let dir = TempDir::new().unwrap();
    let context = AppContext::new(offline_config(&dir));
    assert_eq!(context.embedder().unwrap().dimensions(), 16);
}

#[test]
fn test_embedder_dimension_mismatch() {
    let dir = TempDir::new().unwrap();
    let mut config = offline_config(&dir);
    config.embedding.provider = EmbeddingProviderKind::OpenAI;
    config.embedding.model = "text-embedding-3-small".to_string();
    config.embedding.api_key = Some("sk-test".to_string());

    let err = AppContext::new(config).embedder().err().unwrap();
    assert!(matches!(
        err,
        Error::DimensionMismatch {
            expected: 16,
            actual: 1536
        }
    ));
}

#[test]
fn test_missing_model_key_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    let mut config = offline_config(&dir);
    config.language_model.provider = LanguageModelKind::OpenAI;
    config.language_model.api_key = None;

    let err = AppContext::new(config).language_model().err().unwrap();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[tokio::test]
async fn test_pipeline_builds_offline() {
    let dir = TempDir::new().unwrap();
    let context = AppContext::new(offline_config(&dir));
    assert!(context.pipeline().await.is_ok());
    assert!(context.analyzer().is_ok());
}

#[tokio::test]
async fn test_open_partition_round_trip() {
    let dir = TempDir::new().unwrap();
    let context = AppContext::new(offline_config(&dir));

    let store = context.open_partition("yoga_collection").await.unwrap();
    let ids = store
        .add_documents(&[
            Document::new("Sun salutation sequence"),
            Document::new("Breathing before asana practice"),
        ])
        .await
        .unwrap();
    assert_eq!(ids.len(), 2);
    assert_eq!(store.count().await.unwrap(), 2);

    let local = context.local_store(None);
    assert_eq!(local.count("yoga_collection").await.unwrap(), 2);
}

#[tokio::test]
async fn test_migration_refuses_same_local_store() {
    let dir = TempDir::new().unwrap();
    let context = AppContext::new(offline_config(&dir));

    let err = context.migration(None).await.err().unwrap();
    assert!(matches!(err, Error::InvalidArgument { .. }));

    let other = dir.path().join("legacy");
    assert!(context.migration(Some(other)).await.is_ok());
}
