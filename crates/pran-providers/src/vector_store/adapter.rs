//! Vector Store Adapter
//!
//! Presents one partition-scoped contract over the three backend variants.
//! The adapter owns batching, embedding, dimension checks and result
//! normalization; backends only move records.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use pran_domain::constants::RESERVED_CONTENT_KEY;
use pran_domain::error::{Error, Result};
use pran_domain::ports::providers::{
    EmbeddingProvider, SearchFilter, VectorStoreFactory, VectorStoreProvider,
};
use pran_domain::value_objects::{Document, Metadata, Partition, SearchResult};

use crate::http::HttpClientConfig;
use crate::vector_store::collection::CollectionStore;
use crate::vector_store::config::{BackendKind, VectorStoreSettings};
use crate::vector_store::local::LocalStore;
use crate::vector_store::namespaced::NamespacedIndex;

/// One record as written to a backend
#[derive(Debug, Clone, PartialEq)]
pub struct VectorRecord {
    /// Unique record id
    pub id: String,
    /// Embedding values
    pub values: Vec<f32>,
    /// Document content
    pub content: String,
    /// Caller metadata, without the reserved content key
    pub metadata: Metadata,
}

impl VectorRecord {
    /// Metadata plus content under the reserved key, as stored by the
    /// remote backends
    pub fn payload(&self) -> Metadata {
        let mut payload = self.metadata.clone();
        payload.insert(
            RESERVED_CONTENT_KEY.to_string(),
            Value::String(self.content.clone()),
        );
        payload
    }
}

/// The physical backend, fixed for the adapter's lifetime
///
/// Each variant holds a shared client; cloning is cheap.
#[derive(Clone)]
pub enum VectorBackend {
    /// Namespaces inside one shared index
    Namespaced(Arc<NamespacedIndex>),
    /// One collection per partition
    Collection(Arc<CollectionStore>),
    /// Local directory per collection
    Local(Arc<LocalStore>),
}

impl VectorBackend {
    /// Build the backend selected by `settings.backend`
    ///
    /// Fails with a configuration error when the selected variant is
    /// missing credentials or URLs. Only the selected variant's settings
    /// are inspected.
    pub async fn connect(settings: &VectorStoreSettings) -> Result<Self> {
        let http = HttpClientConfig::with_timeout(std::time::Duration::from_secs(
            settings.timeout_secs,
        ));
        let backend = match settings.backend {
            BackendKind::Namespaced => {
                let client = http.build_client()?;
                let index = NamespacedIndex::connect(
                    &settings.namespaced,
                    settings.dimensions,
                    client,
                    http.timeout,
                )
                .await?;
                VectorBackend::Namespaced(Arc::new(index))
            }
            BackendKind::Collection => {
                let client = http.build_client()?;
                let store = CollectionStore::new(&settings.collection, client, http.timeout)?;
                VectorBackend::Collection(Arc::new(store))
            }
            BackendKind::Local => {
                VectorBackend::Local(Arc::new(LocalStore::new(settings.local.base_path.clone())))
            }
        };
        info!(backend = %settings.backend, "Vector store backend ready");
        Ok(backend)
    }

    /// Backend variant
    pub fn kind(&self) -> BackendKind {
        match self {
            VectorBackend::Namespaced(_) => BackendKind::Namespaced,
            VectorBackend::Collection(_) => BackendKind::Collection,
            VectorBackend::Local(_) => BackendKind::Local,
        }
    }

    async fn prepare(&self, partition: &Partition, dimensions: usize) -> Result<()> {
        match self {
            // The shared index is provisioned once in `connect`
            VectorBackend::Namespaced(_) => Ok(()),
            VectorBackend::Collection(store) => {
                store
                    .ensure_collection(partition.collection(), dimensions)
                    .await
            }
            VectorBackend::Local(store) => store.open(partition.collection(), dimensions).await,
        }
    }

    async fn write(&self, partition: &Partition, records: &[VectorRecord]) -> Result<()> {
        match self {
            VectorBackend::Namespaced(index) => index.upsert(&partition.namespace(), records).await,
            VectorBackend::Collection(store) => store.upsert(partition.collection(), records).await,
            VectorBackend::Local(store) => store.append(partition.collection(), records).await,
        }
    }

    async fn query(
        &self,
        partition: &Partition,
        vector: &[f32],
        k: usize,
        filter: Option<&SearchFilter>,
    ) -> Result<Vec<SearchResult>> {
        match self {
            VectorBackend::Namespaced(index) => {
                index.query(&partition.namespace(), vector, k, filter).await
            }
            VectorBackend::Collection(store) => {
                store.search(partition.collection(), vector, k, filter).await
            }
            VectorBackend::Local(store) => {
                store.search(partition.collection(), vector, k, filter).await
            }
        }
    }

    async fn count(&self, partition: &Partition) -> Result<u64> {
        match self {
            VectorBackend::Namespaced(index) => index.count(&partition.namespace()).await,
            VectorBackend::Collection(store) => store.count(partition.collection()).await,
            VectorBackend::Local(store) => store.count(partition.collection()).await,
        }
    }

    /// Whether writes must be split into bounded upsert calls
    fn has_payload_limit(&self) -> bool {
        !matches!(self, VectorBackend::Local(_))
    }
}

/// Partition-scoped vector store
///
/// ## Writes
///
/// All documents of one call are embedded with a single batch call. Remote
/// backends receive them in upsert calls of at most `upsert_batch_size`
/// records; a failing call surfaces as one [`Error::BatchUpsert`] naming
/// the failed range, after earlier chunks were written.
///
/// ## Reads
///
/// Results are bounded by `k`, ordered by non-increasing backend-native
/// similarity and never carry the reserved content key in their metadata.
pub struct VectorStoreAdapter {
    partition: Partition,
    embedder: Arc<dyn EmbeddingProvider>,
    backend: VectorBackend,
    dimensions: usize,
    upsert_batch_size: usize,
}

impl VectorStoreAdapter {
    /// Create an adapter, provisioning the partition when the backend needs it
    pub async fn connect(
        partition: Partition,
        embedder: Arc<dyn EmbeddingProvider>,
        backend: VectorBackend,
        dimensions: usize,
        upsert_batch_size: usize,
    ) -> Result<Self> {
        if dimensions == 0 {
            return Err(Error::config("vector dimension must be greater than zero"));
        }
        backend.prepare(&partition, dimensions).await?;
        debug!(
            collection = %partition,
            backend = %backend.kind(),
            "Vector store adapter connected"
        );
        Ok(Self {
            partition,
            embedder,
            backend,
            dimensions,
            upsert_batch_size: upsert_batch_size.max(1),
        })
    }

    /// Vector dimension enforced on every embedding
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn check_dimension(&self, actual: usize) -> Result<()> {
        if actual == self.dimensions {
            Ok(())
        } else {
            Err(Error::dimension_mismatch(self.dimensions, actual))
        }
    }

    async fn build_records(&self, documents: &[Document]) -> Result<Vec<VectorRecord>> {
        let texts: Vec<String> = documents.iter().map(|d| d.content().to_string()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        if embeddings.len() != documents.len() {
            return Err(Error::embedding(format!(
                "expected {} embeddings, got {}",
                documents.len(),
                embeddings.len()
            )));
        }

        documents
            .iter()
            .zip(embeddings)
            .map(|(doc, embedding)| {
                self.check_dimension(embedding.vector.len())?;
                Ok(VectorRecord {
                    id: uuid::Uuid::new_v4().to_string(),
                    values: embedding.vector,
                    content: doc.content().to_string(),
                    metadata: doc.metadata().clone(),
                })
            })
            .collect()
    }
}

#[async_trait]
impl VectorStoreProvider for VectorStoreAdapter {
    fn partition(&self) -> &Partition {
        &self.partition
    }

    async fn add_documents(&self, documents: &[Document]) -> Result<Vec<String>> {
        if documents.is_empty() {
            return Err(Error::invalid_argument("add_documents requires at least one document"));
        }
        for doc in documents {
            doc.validate()?;
        }

        let records = self.build_records(documents).await?;
        let total = records.len();

        if self.backend.has_payload_limit() {
            for (chunk_index, chunk) in records.chunks(self.upsert_batch_size).enumerate() {
                let start = chunk_index * self.upsert_batch_size;
                let end = start + chunk.len();
                self.backend
                    .write(&self.partition, chunk)
                    .await
                    .map_err(|e| Error::batch_upsert(start, end, total, e))?;
                debug!(collection = %self.partition, start, end, total, "Upserted batch");
            }
        } else {
            self.backend.write(&self.partition, &records).await?;
        }

        info!(collection = %self.partition, count = total, "Documents added");
        Ok(records.into_iter().map(|r| r.id).collect())
    }

    async fn search(
        &self,
        query: &str,
        k: usize,
        filter: Option<&SearchFilter>,
    ) -> Result<Vec<SearchResult>> {
        if k == 0 {
            return Err(Error::invalid_argument("k must be at least 1"));
        }
        let embedding = self.embedder.embed(query).await?;
        self.check_dimension(embedding.vector.len())?;

        let mut results = self
            .backend
            .query(&self.partition, &embedding.vector, k, filter)
            .await?;

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(k);
        for result in &mut results {
            result.metadata.remove(RESERVED_CONTENT_KEY);
        }
        debug!(collection = %self.partition, k, hits = results.len(), "Search completed");
        Ok(results)
    }

    async fn count(&self) -> Result<u64> {
        self.backend.count(&self.partition).await
    }

    fn provider_name(&self) -> &str {
        self.backend.kind().as_str()
    }
}

/// Opens adapters for any partition over one shared backend
pub struct VectorBackendFactory {
    backend: VectorBackend,
    embedder: Arc<dyn EmbeddingProvider>,
    dimensions: usize,
    upsert_batch_size: usize,
}

impl VectorBackendFactory {
    /// Create a factory over a connected backend
    pub fn new(
        backend: VectorBackend,
        embedder: Arc<dyn EmbeddingProvider>,
        dimensions: usize,
        upsert_batch_size: usize,
    ) -> Self {
        Self {
            backend,
            embedder,
            dimensions,
            upsert_batch_size,
        }
    }

    /// The shared backend
    pub fn backend(&self) -> &VectorBackend {
        &self.backend
    }
}

#[async_trait]
impl VectorStoreFactory for VectorBackendFactory {
    async fn open(&self, partition: Partition) -> Result<Arc<dyn VectorStoreProvider>> {
        let adapter = VectorStoreAdapter::connect(
            partition,
            Arc::clone(&self.embedder),
            self.backend.clone(),
            self.dimensions,
            self.upsert_batch_size,
        )
        .await?;
        Ok(Arc::new(adapter))
    }

    fn backend_name(&self) -> &str {
        self.backend.kind().as_str()
    }
}
