//! OpenAI Embedding Provider
//!
//! Implements the EmbeddingProvider port using OpenAI's embedding API.
//! Supports text-embedding-3-small, text-embedding-3-large, and ada-002.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use pran_domain::error::{Error, Result};
use pran_domain::ports::providers::EmbeddingProvider;
use pran_domain::value_objects::Embedding;

use crate::constants::{
    CONTENT_TYPE_JSON, EMBEDDING_DIMENSION_OPENAI_ADA, EMBEDDING_DIMENSION_OPENAI_LARGE,
    EMBEDDING_DIMENSION_OPENAI_SMALL, OPENAI_DEFAULT_BASE_URL,
};
use crate::embedding::helpers::constructor;
use crate::utils::{HttpResponseUtils, ServiceKind};

/// OpenAI embedding provider
///
/// Receives its HTTP client via constructor injection. All texts of a batch
/// are embedded with a single request.
///
/// ## Example
///
/// ```rust,no_run
/// use pran_providers::embedding::OpenAIEmbeddingProvider;
/// use reqwest::Client;
/// use std::time::Duration;
///
/// fn example() -> Result<(), Box<dyn std::error::Error>> {
///     let provider = OpenAIEmbeddingProvider::new(
///         Some("sk-your-api-key"),
///         None,
///         "text-embedding-3-small".to_string(),
///         Duration::from_secs(30),
///         Client::new(),
///     )?;
///     Ok(())
/// }
/// ```
pub struct OpenAIEmbeddingProvider {
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
    http_client: Client,
}

impl OpenAIEmbeddingProvider {
    /// Create a new OpenAI embedding provider
    ///
    /// Fails with a configuration error when the API key is missing.
    pub fn new(
        api_key: Option<&str>,
        base_url: Option<&str>,
        model: String,
        timeout: Duration,
        http_client: Client,
    ) -> Result<Self> {
        Ok(Self {
            api_key: constructor::require_api_key(api_key, "OpenAI embedding")?,
            base_url: constructor::get_effective_url(base_url, OPENAI_DEFAULT_BASE_URL),
            model,
            timeout,
            http_client,
        })
    }

    /// Get the base URL for this provider
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn fetch_embeddings(&self, texts: &[String]) -> Result<serde_json::Value> {
        let payload = serde_json::json!({
            "input": texts,
            "model": self.model,
            "encoding_format": "float"
        });

        let response = self
            .http_client
            .post(format!("{}/embeddings", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                HttpResponseUtils::send_error(e, "openai", ServiceKind::Embedding, self.timeout)
            })?;

        HttpResponseUtils::check_and_parse(response, "openai", ServiceKind::Embedding).await
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAIEmbeddingProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let response_data = self.fetch_embeddings(texts).await?;

        let data = response_data["data"]
            .as_array()
            .ok_or_else(|| Error::embedding("Invalid response format: missing data array"))?;

        if data.len() != texts.len() {
            return Err(Error::embedding(format!(
                "Response data count mismatch: expected {}, got {}",
                texts.len(),
                data.len()
            )));
        }

        data.iter()
            .enumerate()
            .map(|(i, item)| {
                constructor::parse_vector(&item["embedding"])
                    .map(|vector| Embedding::new(vector, self.model.clone()))
                    .ok_or_else(|| {
                        Error::embedding(format!("Invalid embedding format for text {i}"))
                    })
            })
            .collect()
    }

    fn dimensions(&self) -> usize {
        match self.model.as_str() {
            "text-embedding-3-large" => EMBEDDING_DIMENSION_OPENAI_LARGE,
            "text-embedding-ada-002" => EMBEDDING_DIMENSION_OPENAI_ADA,
            _ => EMBEDDING_DIMENSION_OPENAI_SMALL,
        }
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}
