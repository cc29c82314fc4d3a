//! Browse-related value objects
//!
//! Inspection of stored collections, used by the collection listing and
//! migration commands.

use serde::{Deserialize, Serialize};

/// Information about a stored collection
///
/// # Example
///
/// ```
/// use pran_domain::value_objects::CollectionInfo;
///
/// let info = CollectionInfo::new("yoga_collection", 1500, Some(384), "local");
/// assert_eq!(info.name, "yoga_collection");
/// assert!(!info.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Logical collection name
    pub name: String,

    /// Number of records in the collection
    pub vector_count: u64,

    /// Vector dimension recorded for the collection, when known
    pub dimensions: Option<usize>,

    /// Name of the backend holding the collection
    pub provider: String,
}

impl CollectionInfo {
    /// Create a new CollectionInfo instance
    pub fn new(
        name: impl Into<String>,
        vector_count: u64,
        dimensions: Option<usize>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            vector_count,
            dimensions,
            provider: provider.into(),
        }
    }

    /// Whether the collection holds no records
    pub fn is_empty(&self) -> bool {
        self.vector_count == 0
    }
}
