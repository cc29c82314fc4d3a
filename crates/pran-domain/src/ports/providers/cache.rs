//! Cache Provider Port
//!
//! Bounded key/value cache holding JSON strings. Used to memoize the intent
//! portion of a classification.

use async_trait::async_trait;

use crate::error::Result;

/// Cache Provider Port
///
/// Implementations must tolerate concurrent reads and inserts; a lost
/// update is acceptable, a corrupted read is not.
///
/// # Example
///
/// ```ignore
/// use pran_domain::ports::providers::CacheProvider;
///
/// cache.set_json("intent:hello", &routing_json).await?;
/// if let Some(json) = cache.get_json("intent:hello").await? {
///     let routing: IntentRouting = serde_json::from_str(&json)?;
/// }
/// ```
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug {
    /// Get a value from the cache as JSON string
    async fn get_json(&self, key: &str) -> Result<Option<String>>;

    /// Set a value in the cache from JSON string
    async fn set_json(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value, returning whether it existed
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Clear all values from the cache
    async fn clear(&self) -> Result<()>;

    /// Get the cache size (number of entries)
    async fn size(&self) -> Result<usize>;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}
