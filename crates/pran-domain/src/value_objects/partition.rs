//! Partition Value Object
//!
//! A partition isolates one collection's records from every other
//! collection, whatever the physical backend.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::NAMESPACE_SEPARATOR;
use crate::error::{Error, Result};

/// Value Object: Partition identity
///
/// Wraps the logical collection name. Each backend variant realizes it
/// differently:
///
/// | Backend | Physical realization |
/// |---------|----------------------|
/// | namespaced | namespace [`Partition::namespace`] inside one shared index |
/// | collection | a collection named exactly [`Partition::collection`] |
/// | local | directory `<base>/<collection>` |
///
/// ## Namespace derivation
///
/// `namespace = collection.replace('_', "-").to_lowercase()`. Existing data
/// is stored under names produced by this rule, so it must not change.
/// Two collection names that normalize to the same namespace (for example
/// `Yoga_Collection` and `yoga-collection`) share records in the namespaced
/// backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Partition {
    collection: String,
}

impl Partition {
    /// Create a partition for a logical collection name
    pub fn new(collection: impl Into<String>) -> Result<Self> {
        let collection = collection.into();
        let trimmed = collection.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_argument("collection name cannot be empty"));
        }
        if trimmed.contains(['/', '\\']) || trimmed == "." || trimmed == ".." {
            return Err(Error::invalid_argument(format!(
                "collection name '{trimmed}' must not contain path separators"
            )));
        }
        Ok(Self {
            collection: trimmed.to_string(),
        })
    }

    /// The logical collection name
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Namespace used inside the shared index
    pub fn namespace(&self) -> String {
        self.collection
            .replace('_', &NAMESPACE_SEPARATOR.to_string())
            .to_lowercase()
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.collection)
    }
}
