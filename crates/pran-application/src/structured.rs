//! Structured model output parsing
//!
//! Models asked for JSON still wrap it in code fences or surround it with
//! prose. The parser takes the outermost `{ ... }` span and deserializes it.

use serde::de::DeserializeOwned;

use pran_domain::error::{Error, Result};

/// Outermost JSON object in a model reply, without fences or prose
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Deserialize the JSON object embedded in a model reply
///
/// Fails with a language model error naming what was wrong; callers decide
/// on their fallback.
pub fn parse_structured<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let object = extract_json_object(raw)
        .ok_or_else(|| Error::language_model("reply contains no JSON object"))?;
    serde_json::from_str(object)
        .map_err(|e| Error::language_model(format!("reply does not match the expected shape: {e}")))
}
