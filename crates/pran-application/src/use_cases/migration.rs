//! Migration Use Case
//!
//! Copies collections from a [`DocumentSource`] (normally the local store)
//! into the configured backend, one batch at a time.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use pran_domain::constants::UPSERT_BATCH_SIZE;
use pran_domain::error::Result;
use pran_domain::ports::providers::{DocumentSource, VectorStoreFactory};
use pran_domain::value_objects::Partition;

/// Outcome of a migration run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Collections copied completely
    pub migrated: Vec<String>,
    /// Collections with no documents
    pub skipped: Vec<String>,
    /// Collections that failed, with the error text
    pub failed: Vec<(String, String)>,
    /// Documents written across all collections
    pub documents: usize,
}

impl MigrationReport {
    fn record_error(&mut self, collection: &str, error: impl std::fmt::Display) {
        self.failed.push((collection.to_string(), error.to_string()));
    }

    /// Whether every requested collection was copied or skipped
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Collection copier between two stores
pub struct MigrationService {
    source: Arc<dyn DocumentSource>,
    target: Arc<dyn VectorStoreFactory>,
    batch_size: usize,
}

impl MigrationService {
    pub fn new(source: Arc<dyn DocumentSource>, target: Arc<dyn VectorStoreFactory>) -> Self {
        Self {
            source,
            target,
            batch_size: UPSERT_BATCH_SIZE,
        }
    }

    /// Override the number of documents per write (at least 1)
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Copy the named collections, or every source collection when empty
    ///
    /// A failing collection is recorded in the report and does not stop the
    /// others. Only listing the source collections can fail the whole run.
    pub async fn migrate(&self, collections: &[String]) -> Result<MigrationReport> {
        let names: Vec<String> = if collections.is_empty() {
            self.source
                .list_collections()
                .await?
                .into_iter()
                .map(|info| info.name)
                .collect()
        } else {
            collections.to_vec()
        };

        let mut report = MigrationReport::default();
        for name in &names {
            match self.migrate_collection(name).await {
                Ok(0) => {
                    warn!(collection = %name, "Source collection is empty, skipping");
                    report.skipped.push(name.clone());
                }
                Ok(written) => {
                    info!(collection = %name, documents = written, "Collection migrated");
                    report.migrated.push(name.clone());
                    report.documents += written;
                }
                Err(e) => {
                    warn!(collection = %name, error = %e, "Collection migration failed");
                    report.record_error(name, e);
                }
            }
        }
        Ok(report)
    }

    async fn migrate_collection(&self, name: &str) -> Result<usize> {
        let documents = self.source.export(name).await?;
        if documents.is_empty() {
            return Ok(0);
        }
        let store = self.target.open(Partition::new(name)?).await?;
        let total = documents.len();
        let mut written = 0;
        for (index, batch) in documents.chunks(self.batch_size).enumerate() {
            store.add_documents(batch).await?;
            written += batch.len();
            info!(
                collection = %name,
                batch = index + 1,
                written,
                total,
                backend = self.target.backend_name(),
                "Migrated batch"
            );
        }
        Ok(written)
    }
}
