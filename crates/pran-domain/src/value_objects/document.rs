//! Document Value Objects
//!
//! The unit of content written to a vector partition.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::constants::RESERVED_CONTENT_KEY;
use crate::error::{Error, Result};

/// Caller-defined metadata attached to a document
///
/// Values are expected to be scalars (string, number, bool); the adapter
/// treats keys as opaque apart from the reserved content key.
pub type Metadata = HashMap<String, Value>;

/// Value Object: Document
///
/// Text content plus metadata. Immutable once created.
///
/// ## Example
///
/// ```rust
/// use pran_domain::value_objects::Document;
/// use serde_json::json;
///
/// let doc = Document::new("Tulsi tea soothes a sore throat.")
///     .with_metadata("source", json!("ayurveda_basics.pdf"));
/// assert_eq!(doc.metadata()["source"], json!("ayurveda_basics.pdf"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    content: String,
    #[serde(default)]
    metadata: Metadata,
}

impl Document {
    /// Create a document without metadata
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: Metadata::new(),
        }
    }

    /// Create a document with the given metadata
    pub fn with_metadata_map(content: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }

    /// Add a single metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// The document text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The document metadata
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Consume the document, returning its parts
    pub fn into_parts(self) -> (String, Metadata) {
        (self.content, self.metadata)
    }

    /// Check that the document can be written to any backend
    ///
    /// The reserved content key may not appear in caller metadata, since
    /// some backends keep the content under it.
    pub fn validate(&self) -> Result<()> {
        if self.metadata.contains_key(RESERVED_CONTENT_KEY) {
            return Err(Error::invalid_argument(format!(
                "metadata key '{RESERVED_CONTENT_KEY}' is reserved for document content"
            )));
        }
        Ok(())
    }
}
