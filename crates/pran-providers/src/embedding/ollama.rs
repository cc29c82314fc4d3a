//! Ollama Embedding Provider
//!
//! Implements the EmbeddingProvider port using Ollama's local embedding API.
//! Supports local embedding models like nomic-embed-text and all-minilm.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use pran_domain::error::{Error, Result};
use pran_domain::ports::providers::EmbeddingProvider;
use pran_domain::value_objects::Embedding;

use crate::constants::{
    CONTENT_TYPE_JSON, EMBEDDING_DIMENSION_OLLAMA_DEFAULT, EMBEDDING_DIMENSION_OLLAMA_MINILM,
    EMBEDDING_DIMENSION_OLLAMA_MXBAI, EMBEDDING_DIMENSION_OLLAMA_NOMIC, OLLAMA_DEFAULT_BASE_URL,
};
use crate::embedding::helpers::constructor;
use crate::utils::{HttpResponseUtils, ServiceKind};

/// Ollama embedding provider
///
/// Uses the batch endpoint `/api/embed`, so N texts cost one request.
pub struct OllamaEmbeddingProvider {
    base_url: String,
    model: String,
    timeout: Duration,
    http_client: Client,
}

impl OllamaEmbeddingProvider {
    /// Create a new Ollama embedding provider
    ///
    /// # Arguments
    /// * `base_url` - Ollama server URL, defaults to `http://localhost:11434`
    /// * `model` - Model name (e.g., "nomic-embed-text")
    /// * `timeout` - Request timeout duration
    /// * `http_client` - Reqwest HTTP client for making API requests
    pub fn new(base_url: Option<&str>, model: String, timeout: Duration, http_client: Client) -> Self {
        Self {
            base_url: constructor::get_effective_url(base_url, OLLAMA_DEFAULT_BASE_URL),
            model,
            timeout,
            http_client,
        }
    }

    /// Get the model name for this provider
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let payload = serde_json::json!({
            "model": self.model,
            "input": texts,
        });

        let response = self
            .http_client
            .post(format!("{}/api/embed", self.base_url))
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                HttpResponseUtils::send_error(e, "ollama", ServiceKind::Embedding, self.timeout)
            })?;

        let response_data =
            HttpResponseUtils::check_and_parse(response, "ollama", ServiceKind::Embedding).await?;

        let vectors = response_data["embeddings"].as_array().ok_or_else(|| {
            Error::embedding("Invalid response format: missing embeddings array")
        })?;

        if vectors.len() != texts.len() {
            return Err(Error::embedding(format!(
                "Response data count mismatch: expected {}, got {}",
                texts.len(),
                vectors.len()
            )));
        }

        vectors
            .iter()
            .map(|value| {
                constructor::parse_vector(value)
                    .map(|vector| Embedding::new(vector, self.model.clone()))
                    .ok_or_else(|| Error::embedding("Invalid embedding format"))
            })
            .collect()
    }

    fn dimensions(&self) -> usize {
        match self.model.as_str() {
            "nomic-embed-text" => EMBEDDING_DIMENSION_OLLAMA_NOMIC,
            "all-minilm" => EMBEDDING_DIMENSION_OLLAMA_MINILM,
            "mxbai-embed-large" => EMBEDDING_DIMENSION_OLLAMA_MXBAI,
            _ => EMBEDDING_DIMENSION_OLLAMA_DEFAULT,
        }
    }

    fn provider_name(&self) -> &str {
        "ollama"
    }
}
