//! Vector store implementations
//!
//! One [`VectorStoreAdapter`] per partition wraps exactly one
//! [`VectorBackend`] variant, chosen once from configuration.
//!
//! | Variant | Service | Partition realization | Native score |
//! |---------|---------|-----------------------|--------------|
//! | `namespaced` | Pinecone REST | namespace inside one shared index | cosine similarity |
//! | `collection` | Qdrant REST | one collection per partition | cosine similarity |
//! | `local` | filesystem | `<base_path>/<collection>/` | cosine similarity in [-1, 1] |
//!
//! Scores are passed through unmodified and must not be compared across
//! variants.

/// Partition-scoped adapter and backend selection
pub mod adapter;
/// Per-collection backend (Qdrant REST)
pub mod collection;
/// Backend settings
pub mod config;
/// Embedded local backend
pub mod local;
/// Shared-index namespaced backend (Pinecone REST)
pub mod namespaced;
/// Vector similarity helpers
pub mod similarity;

pub use adapter::{VectorBackend, VectorBackendFactory, VectorRecord, VectorStoreAdapter};
pub use collection::CollectionStore;
pub use config::{
    BackendKind, CollectionSettings, LocalSettings, NamespacedSettings, VectorStoreSettings,
};
pub use local::LocalStore;
pub use namespaced::NamespacedIndex;
