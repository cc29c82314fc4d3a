//! Tests for the HTTP embedding providers and the offline null provider

use std::time::Duration;

use mockito::{Matcher, Server};
use pran_domain::Error;
use pran_domain::ports::providers::EmbeddingProvider;
use pran_providers::embedding::{
    NullEmbeddingProvider, OllamaEmbeddingProvider, OpenAIEmbeddingProvider,
};
use reqwest::Client;
use serde_json::json;

fn openai(url: &str) -> OpenAIEmbeddingProvider {
    OpenAIEmbeddingProvider::new(
        Some("sk-test"),
        Some(url),
        "text-embedding-3-small".to_string(),
        Duration::from_secs(5),
        Client::new(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_openai_embeds_batch_in_one_call() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/embeddings")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({
            "model": "text-embedding-3-small",
            "input": ["cough", "fever"]
        })))
        .with_status(200)
        .with_body(
            json!({"data": [
                {"index": 0, "embedding": [0.1, 0.2, 0.3]},
                {"index": 1, "embedding": [0.4, 0.5, 0.6]}
            ]})
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let provider = openai(&server.url());
    let embeddings = provider
        .embed_batch(&["cough".to_string(), "fever".to_string()])
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(embeddings.len(), 2);
    assert_eq!(embeddings[1].dimensions, 3);
    assert_eq!(embeddings[0].model, "text-embedding-3-small");
    assert_eq!(provider.dimensions(), 1536);
}

#[tokio::test]
async fn test_openai_count_mismatch_is_rejected() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/embeddings")
        .with_status(200)
        .with_body(json!({"data": [{"embedding": [0.1]}]}).to_string())
        .create_async()
        .await;

    let err = openai(&server.url())
        .embed_batch(&["a".to_string(), "b".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Embedding { .. }));
}

#[tokio::test]
async fn test_openai_status_mapping() {
    let mut server = Server::new_async().await;
    let _limited = server
        .mock("POST", "/embeddings")
        .with_status(429)
        .with_body("slow down")
        .create_async()
        .await;
    let err = openai(&server.url()).embed("cough").await.unwrap_err();
    assert!(err.is_retryable());

    let mut server = Server::new_async().await;
    let _denied = server
        .mock("POST", "/embeddings")
        .with_status(401)
        .with_body("bad key")
        .create_async()
        .await;
    let err = openai(&server.url()).embed("cough").await.unwrap_err();
    assert!(!err.is_retryable());
    assert!(matches!(err, Error::Embedding { .. }));
}

#[test]
fn test_openai_requires_api_key() {
    let result = OpenAIEmbeddingProvider::new(
        None,
        None,
        "text-embedding-3-small".to_string(),
        Duration::from_secs(5),
        Client::new(),
    );
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[tokio::test]
async fn test_ollama_embeds_batch() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/embed")
        .match_body(Matcher::PartialJson(json!({"model": "nomic-embed-text"})))
        .with_status(200)
        .with_body(json!({"embeddings": [[0.1, 0.2], [0.3, 0.4]]}).to_string())
        .create_async()
        .await;

    let provider = OllamaEmbeddingProvider::new(
        Some(&format!("{}/", server.url())),
        "nomic-embed-text".to_string(),
        Duration::from_secs(5),
        Client::new(),
    );
    let embeddings = provider
        .embed_batch(&["a".to_string(), "b".to_string()])
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(embeddings.len(), 2);
    assert_eq!(provider.dimensions(), 768);
    assert_eq!(provider.provider_name(), "ollama");
}

#[tokio::test]
async fn test_unreachable_server_is_transient() {
    let provider = OllamaEmbeddingProvider::new(
        Some("http://127.0.0.1:9"),
        "all-minilm".to_string(),
        Duration::from_secs(2),
        Client::new(),
    );
    let err = provider.embed("cough").await.unwrap_err();
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_null_provider_is_deterministic() {
    let provider = NullEmbeddingProvider::with_dimensions(12);
    let batch = provider
        .embed_batch(&["tulsi".to_string(), "neem".to_string(), "tulsi".to_string()])
        .await
        .unwrap();

    assert_eq!(batch.len(), 3);
    assert!(batch.iter().all(|e| e.vector.len() == 12));
    assert_eq!(batch[0].vector, batch[2].vector);
    assert_ne!(batch[0].vector, batch[1].vector);
    assert!(batch[0].vector.iter().all(|v| (-1.0..=1.0).contains(v)));

    let single = provider.embed("tulsi").await.unwrap();
    assert_eq!(single.vector, batch[0].vector);
}
