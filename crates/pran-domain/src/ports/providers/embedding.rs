//! Embedding Provider Port

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::value_objects::Embedding;

/// Text embedding generation service
///
/// Maps text to fixed-length vectors. The dimensionality is fixed per
/// deployment and must match the vector backend's configured dimension.
///
/// # Example
///
/// ```ignore
/// use pran_domain::ports::providers::EmbeddingProvider;
///
/// let embeddings = provider.embed_batch(&texts).await?;
/// assert_eq!(embeddings.len(), texts.len());
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Get embedding for a single text (default implementation provided)
    async fn embed(&self, text: &str) -> Result<Embedding> {
        let embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| Error::embedding("No embedding returned"))
    }

    /// Get embeddings for multiple texts, one per input in input order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>>;

    /// Get the dimensionality of embeddings produced by this provider
    fn dimensions(&self) -> usize;

    /// Get the name/identifier of this provider implementation
    ///
    /// # Returns
    /// A string identifier for the provider (e.g., "openai", "ollama", "null")
    fn provider_name(&self) -> &str;
}
