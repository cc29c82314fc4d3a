//! Embedding provider implementations
//!
//! | Provider | Transport | Batch |
//! |----------|-----------|-------|
//! | [`OpenAIEmbeddingProvider`] | `POST {base}/embeddings` | one call per batch |
//! | [`OllamaEmbeddingProvider`] | `POST {base}/api/embed` | one call per batch |
//! | [`NullEmbeddingProvider`] | none | deterministic, offline |

/// Shared constructor helpers
pub mod helpers;
/// Null provider for tests and offline use
pub mod null;
/// Ollama local embedding API
pub mod ollama;
/// OpenAI embedding API
pub mod openai;

pub use null::NullEmbeddingProvider;
pub use ollama::OllamaEmbeddingProvider;
pub use openai::OpenAIEmbeddingProvider;
