//! # Pran - Provider Implementations
//!
//! Concrete adapters for the ports declared in `pran-domain`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Embedding | `EmbeddingProvider` | OpenAI, Ollama, Null |
//! | Language model | `LanguageModel` | OpenAI, Ollama |
//! | Vector store | `VectorStoreProvider` | Namespaced, Collection, Local (one adapter) |
//! | Cache | `CacheProvider` | Moka |
//!
//! ## Usage
//!
//! ```ignore
//! use pran_providers::embedding::NullEmbeddingProvider;
//! use pran_providers::vector_store::{VectorBackend, VectorBackendFactory, VectorStoreSettings};
//!
//! let backend = VectorBackend::connect(&VectorStoreSettings::default()).await?;
//! let factory = VectorBackendFactory::new(backend, Arc::new(NullEmbeddingProvider::new()), 384, 100);
//! ```

pub use pran_domain::error::{Error, Result};
pub use pran_domain::ports::providers::{
    CacheProvider, DocumentSource, EmbeddingProvider, LanguageModel, VectorStoreFactory,
    VectorStoreProvider,
};

/// Provider-specific constants
pub mod constants;

/// Shared utilities for provider implementations
pub mod utils;

/// HTTP client configuration
pub mod http;

/// Embedding provider implementations
pub mod embedding;

/// Language model implementations
pub mod language_model;

/// Vector store adapter and backends
pub mod vector_store;

/// Cache provider implementations
pub mod cache;

pub use cache::MokaCacheProvider;
pub use embedding::{NullEmbeddingProvider, OllamaEmbeddingProvider, OpenAIEmbeddingProvider};
pub use http::HttpClientConfig;
pub use language_model::{OllamaChatModel, OpenAIChatModel};
pub use vector_store::{LocalStore, VectorBackend, VectorBackendFactory, VectorStoreAdapter};
