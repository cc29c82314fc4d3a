//! Embedded local backend
//!
//! Each collection is a directory under the base path:
//!
//! ```text
//! <base_path>/<collection>/manifest.json   {"collection": .., "dimensions": ..}
//! <base_path>/<collection>/records.jsonl   one record per line
//! ```
//!
//! Records are held in memory after the first access and appended to the
//! JSON-lines file on every write. Search is brute-force cosine similarity
//! with a bounded min-heap.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use pran_domain::error::{Error, Result};
use pran_domain::ports::providers::{DocumentSource, SearchFilter};
use pran_domain::value_objects::{CollectionInfo, Document, Metadata, SearchResult};

use crate::constants::{LOCAL_MANIFEST_FILE, LOCAL_RECORDS_FILE};
use crate::vector_store::adapter::VectorRecord;
use crate::vector_store::similarity::{compute_norm, cosine_similarity_with_norm, top_k};

const PROVIDER: &str = "local";

/// File helpers, all mapping failures to I/O errors naming the file
mod file_utils {
    use std::path::Path;

    use pran_domain::error::{Error, Result};
    use serde::Serialize;
    use serde::de::DeserializeOwned;

    pub async fn exists(path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }

    pub async fn read_json<T: DeserializeOwned>(path: &Path, description: &str) -> Result<T> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::io_with_source(format!("Failed to read {description}"), e))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::io_with_source(format!("Failed to parse {description}"), e))
    }

    pub async fn write_json<T: Serialize>(path: &Path, data: &T, description: &str) -> Result<()> {
        let content = serde_json::to_string_pretty(data)
            .map_err(|e| Error::io_with_source(format!("Failed to serialize {description}"), e))?;
        tokio::fs::write(path, content)
            .await
            .map_err(|e| Error::io_with_source(format!("Failed to write {description}"), e))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Manifest {
    collection: String,
    dimensions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRecord {
    id: String,
    content: String,
    #[serde(default)]
    metadata: Metadata,
    vector: Vec<f32>,
}

struct IndexedRecord {
    record: StoredRecord,
    norm: f32,
}

impl From<StoredRecord> for IndexedRecord {
    fn from(record: StoredRecord) -> Self {
        let norm = compute_norm(&record.vector);
        Self { record, norm }
    }
}

/// One loaded collection
struct LocalCollection {
    dir: PathBuf,
    dimensions: usize,
    records: RwLock<Vec<IndexedRecord>>,
}

impl LocalCollection {
    async fn load(dir: PathBuf, manifest: &Manifest) -> Result<Self> {
        let records_path = dir.join(LOCAL_RECORDS_FILE);
        let mut records = Vec::new();
        if file_utils::exists(&records_path).await {
            let content = tokio::fs::read_to_string(&records_path)
                .await
                .map_err(|e| Error::io_with_source("Failed to read collection records", e))?;
            for (line_no, line) in content.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<StoredRecord>(line) {
                    Ok(record) => records.push(IndexedRecord::from(record)),
                    Err(e) => warn!(
                        collection = %manifest.collection,
                        line = line_no + 1,
                        error = %e,
                        "Skipping malformed record"
                    ),
                }
            }
        }
        debug!(collection = %manifest.collection, records = records.len(), "Loaded collection");
        Ok(Self {
            dir,
            dimensions: manifest.dimensions,
            records: RwLock::new(records),
        })
    }

    async fn append(&self, records: &[VectorRecord]) -> Result<()> {
        let mut buffer = String::new();
        let mut indexed = Vec::with_capacity(records.len());
        for record in records {
            let stored = StoredRecord {
                id: record.id.clone(),
                content: record.content.clone(),
                metadata: record.metadata.clone(),
                vector: record.values.clone(),
            };
            buffer.push_str(&serde_json::to_string(&stored)?);
            buffer.push('\n');
            indexed.push(IndexedRecord::from(stored));
        }

        // Holding the write lock serializes file appends
        let mut guard = self.records.write().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.dir.join(LOCAL_RECORDS_FILE))
            .await
            .map_err(|e| Error::io_with_source("Failed to open collection records", e))?;
        file.write_all(buffer.as_bytes())
            .await
            .map_err(|e| Error::io_with_source("Failed to append collection records", e))?;
        file.flush()
            .await
            .map_err(|e| Error::io_with_source("Failed to flush collection records", e))?;
        guard.extend(indexed);
        Ok(())
    }

    async fn search(
        &self,
        vector: &[f32],
        k: usize,
        filter: Option<&SearchFilter>,
    ) -> Vec<SearchResult> {
        let records = self.records.read().await;
        let scores = records
            .iter()
            .enumerate()
            .filter(|(_, r)| filter.is_none_or(|f| matches_filter(&r.record.metadata, f)))
            .map(|(idx, r)| (idx, cosine_similarity_with_norm(&r.record.vector, vector, r.norm)));

        top_k(scores, k)
            .into_iter()
            .map(|(idx, score)| {
                let record = &records[idx].record;
                SearchResult {
                    content: record.content.clone(),
                    metadata: record.metadata.clone(),
                    similarity: f64::from(score),
                }
            })
            .collect()
    }

    async fn len(&self) -> u64 {
        self.records.read().await.len() as u64
    }

    async fn documents(&self) -> Vec<Document> {
        self.records
            .read()
            .await
            .iter()
            .map(|r| Document::with_metadata_map(r.record.content.clone(), r.record.metadata.clone()))
            .collect()
    }
}

/// Scalar equality on every filter key; non-scalar filter values are ignored
fn matches_filter(metadata: &Metadata, filter: &SearchFilter) -> bool {
    filter
        .iter()
        .filter(|(_, value)| value.is_string() || value.is_number() || value.is_boolean())
        .all(|(key, value)| metadata.get(key) == Some(value))
}

/// Filesystem-backed store of many collections
///
/// Cheap to share; all collections opened through one instance are cached
/// and shared between adapters.
pub struct LocalStore {
    base_path: PathBuf,
    collections: RwLock<HashMap<String, Arc<LocalCollection>>>,
}

impl LocalStore {
    /// Create a store rooted at `base_path`; nothing is touched until first use
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            base_path,
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Root directory
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn collection_dir(&self, collection: &str) -> PathBuf {
        self.base_path.join(collection)
    }

    /// Open a collection, creating it with `dimensions` when absent
    ///
    /// Fails with `DimensionMismatch` when the collection exists with a
    /// different dimension.
    pub async fn open(&self, collection: &str, dimensions: usize) -> Result<()> {
        if let Some(existing) = self.loaded(collection).await? {
            if existing.dimensions != dimensions {
                return Err(Error::dimension_mismatch(existing.dimensions, dimensions));
            }
            return Ok(());
        }

        let mut collections = self.collections.write().await;
        if let Some(existing) = collections.get(collection) {
            if existing.dimensions != dimensions {
                return Err(Error::dimension_mismatch(existing.dimensions, dimensions));
            }
            return Ok(());
        }

        let dir = self.collection_dir(collection);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| Error::io_with_source("Failed to create collection directory", e))?;
        let manifest = Manifest {
            collection: collection.to_string(),
            dimensions,
        };
        file_utils::write_json(&dir.join(LOCAL_MANIFEST_FILE), &manifest, "collection manifest")
            .await?;
        info!(collection, dimensions, path = %dir.display(), "Created local collection");

        let loaded = Arc::new(LocalCollection::load(dir, &manifest).await?);
        collections.insert(collection.to_string(), loaded);
        Ok(())
    }

    /// Cached or on-disk collection, `None` when it does not exist
    async fn loaded(&self, collection: &str) -> Result<Option<Arc<LocalCollection>>> {
        if let Some(existing) = self.collections.read().await.get(collection) {
            return Ok(Some(Arc::clone(existing)));
        }

        let dir = self.collection_dir(collection);
        let manifest_path = dir.join(LOCAL_MANIFEST_FILE);
        if !file_utils::exists(&manifest_path).await {
            return Ok(None);
        }

        let mut collections = self.collections.write().await;
        if let Some(existing) = collections.get(collection) {
            return Ok(Some(Arc::clone(existing)));
        }
        let manifest: Manifest = file_utils::read_json(&manifest_path, "collection manifest").await?;
        let loaded = Arc::new(LocalCollection::load(dir, &manifest).await?);
        collections.insert(collection.to_string(), Arc::clone(&loaded));
        Ok(Some(loaded))
    }

    async fn require(&self, collection: &str) -> Result<Arc<LocalCollection>> {
        self.loaded(collection)
            .await?
            .ok_or_else(|| Error::vector_db(format!("Collection '{collection}' does not exist")))
    }

    /// Append records to an opened collection
    pub async fn append(&self, collection: &str, records: &[VectorRecord]) -> Result<()> {
        let target = self.require(collection).await?;
        if let Some(bad) = records.iter().find(|r| r.values.len() != target.dimensions) {
            return Err(Error::dimension_mismatch(target.dimensions, bad.values.len()));
        }
        target.append(records).await?;
        debug!(collection, added = records.len(), "Appended local records");
        Ok(())
    }

    /// Top-`k` cosine search; an absent collection yields no results
    pub async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        k: usize,
        filter: Option<&SearchFilter>,
    ) -> Result<Vec<SearchResult>> {
        match self.loaded(collection).await? {
            Some(target) => {
                if vector.len() != target.dimensions {
                    return Err(Error::dimension_mismatch(target.dimensions, vector.len()));
                }
                Ok(target.search(vector, k, filter).await)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Record count; 0 when the collection does not exist
    pub async fn count(&self, collection: &str) -> Result<u64> {
        match self.loaded(collection).await? {
            Some(target) => Ok(target.len().await),
            None => Ok(0),
        }
    }
}

#[async_trait]
impl DocumentSource for LocalStore {
    async fn list_collections(&self) -> Result<Vec<CollectionInfo>> {
        if !file_utils::exists(&self.base_path).await {
            return Ok(Vec::new());
        }
        let mut entries = tokio::fs::read_dir(&self.base_path)
            .await
            .map_err(|e| Error::io_with_source("Failed to read vector store directory", e))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::io_with_source("Failed to read directory entry", e))?
        {
            let path = entry.path();
            if !file_utils::exists(&path.join(LOCAL_MANIFEST_FILE)).await {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();

        let mut infos = Vec::with_capacity(names.len());
        for name in names {
            if let Some(collection) = self.loaded(&name).await? {
                infos.push(CollectionInfo::new(
                    name,
                    collection.len().await,
                    Some(collection.dimensions),
                    PROVIDER,
                ));
            }
        }
        Ok(infos)
    }

    async fn export(&self, collection: &str) -> Result<Vec<Document>> {
        Ok(self.require(collection).await?.documents().await)
    }
}
