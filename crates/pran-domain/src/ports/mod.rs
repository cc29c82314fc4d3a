//! Domain Port Interfaces
//!
//! Ports define the contracts that external layers must implement:
//! the domain declares the interfaces, providers and application
//! services implement them.

/// Domain handler port
pub mod handler;
/// External service provider ports
pub mod providers;

pub use handler::DomainHandler;
pub use providers::{
    CacheProvider, CompletionRequest, EmbeddingProvider, LanguageModel, ResponseFormat,
    DocumentSource, SearchFilter, VectorStoreFactory, VectorStoreProvider,
};
