//! Search-Related Value Objects

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::RESERVED_CONTENT_KEY;
use crate::value_objects::Metadata;

/// Value Object: Ranked Search Result
///
/// One match returned by a partition search.
///
/// ## Business Rules
///
/// - `similarity` is the backend-native score, passed through unmodified.
///   Scores must not be compared across backend variants.
/// - `metadata` never contains the reserved content key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// The matched document content
    pub content: String,
    /// Caller metadata stored with the document
    pub metadata: Metadata,
    /// Backend-native similarity score (higher is more similar)
    pub similarity: f64,
}

impl SearchResult {
    /// Build a result from a backend payload that keeps the content under
    /// the reserved key, moving it out of the metadata.
    pub fn from_payload(mut payload: Metadata, similarity: f64) -> Self {
        let content = match payload.remove(RESERVED_CONTENT_KEY) {
            Some(Value::String(text)) => text,
            Some(other) => other.to_string(),
            None => String::new(),
        };
        Self {
            content,
            metadata: payload,
            similarity,
        }
    }

    /// Name of the source document, when the metadata carries one
    pub fn source_name(&self) -> Option<&str> {
        ["source", "file_name", "filename"]
            .iter()
            .find_map(|key| self.metadata.get(*key).and_then(Value::as_str))
    }
}
