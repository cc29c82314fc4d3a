//! Embedding and language model configuration types
//!
//! Credentials are optional at load time. A provider that needs one fails
//! with a configuration error when it is constructed.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CHAT_MODEL, DEFAULT_EMBEDDING_MODEL, DEFAULT_PROVIDER_TIMEOUT_SECS, DEFAULT_TEMPERATURE,
};

/// Embedding provider selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProviderKind {
    /// OpenAI-compatible embeddings endpoint
    #[default]
    OpenAI,
    /// Local Ollama server
    Ollama,
    /// Deterministic offline vectors (tests, local experiments)
    Null,
}

/// Embedding provider configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProviderKind,
    pub model: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    /// Vector length of the null provider; the vector store dimension when unset
    pub dimensions: Option<usize>,
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::default(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            base_url: None,
            api_key: None,
            dimensions: None,
            timeout_secs: DEFAULT_PROVIDER_TIMEOUT_SECS,
        }
    }
}

/// Language model provider selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageModelKind {
    /// OpenAI-compatible chat completions endpoint
    #[default]
    OpenAI,
    /// Local Ollama server
    Ollama,
}

/// Language model configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageModelConfig {
    pub provider: LanguageModelKind,
    pub model: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for LanguageModelConfig {
    fn default() -> Self {
        Self {
            provider: LanguageModelKind::default(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            base_url: None,
            api_key: None,
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_PROVIDER_TIMEOUT_SECS,
        }
    }
}
