//! Moka in-memory cache provider
//!
//! Concurrent, bounded in-memory cache. Once `max_entries` is reached moka
//! evicts entries by its TinyLFU policy; eviction order is not observable
//! by callers.
//!
//! ## Example
//!
//! ```ignore
//! use pran_providers::cache::MokaCacheProvider;
//!
//! let provider = MokaCacheProvider::with_capacity(256);
//! ```

use async_trait::async_trait;
use moka::future::Cache;
use pran_domain::constants::INTENT_CACHE_CAPACITY;
use pran_domain::error::Result;
use pran_domain::ports::providers::CacheProvider;

/// Moka-based in-memory cache provider
#[derive(Clone)]
pub struct MokaCacheProvider {
    cache: Cache<String, String>,
    max_entries: u64,
}

impl Default for MokaCacheProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MokaCacheProvider {
    /// Create a new Moka cache provider with default settings
    pub fn new() -> Self {
        Self::with_capacity(INTENT_CACHE_CAPACITY)
    }

    /// Create a new Moka cache provider holding at most `max_entries` entries
    pub fn with_capacity(max_entries: u64) -> Self {
        let cache = Cache::builder().max_capacity(max_entries).build();
        Self { cache, max_entries }
    }

    /// Get the maximum number of entries
    pub fn max_entries(&self) -> u64 {
        self.max_entries
    }
}

#[async_trait]
impl CacheProvider for MokaCacheProvider {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cache.get(key).await)
    }

    async fn set_json(&self, key: &str, value: &str) -> Result<()> {
        self.cache.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.cache.remove(key).await.is_some())
    }

    async fn clear(&self) -> Result<()> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }

    async fn size(&self) -> Result<usize> {
        // Run pending tasks to ensure entry_count is accurate
        self.cache.run_pending_tasks().await;
        Ok(usize::try_from(self.cache.entry_count()).unwrap_or(usize::MAX))
    }

    fn provider_name(&self) -> &str {
        "moka"
    }
}

impl std::fmt::Debug for MokaCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCacheProvider")
            .field("max_entries", &self.max_entries)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}
