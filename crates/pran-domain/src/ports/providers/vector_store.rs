//! Vector Store Provider Port

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::{CollectionInfo, Document, Metadata, Partition, SearchResult};

/// Flat equality filter over metadata keys
pub type SearchFilter = Metadata;

/// Partition-scoped vector storage
///
/// One instance serves exactly one [`Partition`] for its whole lifetime and
/// may be shared across concurrent requests.
///
/// # Example
///
/// ```ignore
/// use pran_domain::ports::providers::VectorStoreProvider;
///
/// let ids = store.add_documents(&docs).await?;
/// let hits = store.search("home remedy for cough", 4, None).await?;
/// assert!(hits.len() <= 4);
/// ```
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// The partition this store is scoped to
    fn partition(&self) -> &Partition;

    /// Embed and write documents, returning one fresh id per document
    ///
    /// Fails with `InvalidArgument` for an empty slice and with
    /// `DimensionMismatch` when an embedding does not fit the backend.
    async fn add_documents(&self, documents: &[Document]) -> Result<Vec<String>>;

    /// Nearest-neighbor search, at most `k` results by non-increasing
    /// similarity
    async fn search(
        &self,
        query: &str,
        k: usize,
        filter: Option<&SearchFilter>,
    ) -> Result<Vec<SearchResult>>;

    /// Number of live records in this partition only
    async fn count(&self) -> Result<u64>;

    /// Backend variant name (e.g. "namespaced", "collection", "local")
    fn provider_name(&self) -> &str;
}

/// Builds partition-scoped stores over one configured backend
///
/// All stores produced by one factory share the same backend client.
#[async_trait]
pub trait VectorStoreFactory: Send + Sync {
    /// Open (and provision, when the backend needs it) a store for a partition
    async fn open(&self, partition: Partition) -> Result<Arc<dyn VectorStoreProvider>>;

    /// Backend variant name
    fn backend_name(&self) -> &str;
}

/// Read access to every collection of a store, for inspection and migration
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// All collections with their record counts
    async fn list_collections(&self) -> Result<Vec<CollectionInfo>>;

    /// Every document of one collection, in insertion order
    async fn export(&self, collection: &str) -> Result<Vec<Document>>;
}
