//! External Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | EmbeddingProvider | Text embedding generation services |
//! | LanguageModel | Text and structured completion |
//! | VectorStoreProvider | Partition-scoped vector storage and search |
//! | CacheProvider | Bounded key/value cache |

/// Cache provider port
pub mod cache;
/// Embedding provider port
pub mod embedding;
/// Language model port
pub mod language_model;
/// Vector store provider port
pub mod vector_store;

pub use cache::CacheProvider;
pub use embedding::EmbeddingProvider;
pub use language_model::{CompletionRequest, LanguageModel, ResponseFormat};
pub use vector_store::{DocumentSource, SearchFilter, VectorStoreFactory, VectorStoreProvider};
