//! Common helpers for API-based providers
//!
//! Shared constructor patterns used by the embedding and language model
//! providers.

/// Common constructor patterns
pub mod constructor {
    use pran_domain::error::{Error, Result};

    /// Normalize an API key, failing when it is missing or blank
    pub fn require_api_key(api_key: Option<&str>, provider: &str) -> Result<String> {
        match api_key.map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key.to_string()),
            _ => Err(Error::config(format!("{provider} requires an api_key"))),
        }
    }

    /// Get effective URL with fallback to default, without trailing slash
    pub fn get_effective_url(provided_url: Option<&str>, default_url: &str) -> String {
        provided_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(default_url)
            .trim_end_matches('/')
            .to_string()
    }

    /// Parse a JSON array of numbers into an f32 vector
    pub fn parse_vector(value: &serde_json::Value) -> Option<Vec<f32>> {
        value.as_array().map(|values| {
            values
                .iter()
                .map(|v| v.as_f64().unwrap_or(0.0) as f32)
                .collect()
        })
    }
}
