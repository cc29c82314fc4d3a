//! Pipeline and domain routing configuration types

use serde::{Deserialize, Serialize};

use pran_domain::constants::{
    DEFAULT_SEARCH_TOP_K, DOCUMENT_ANALYSIS_TIMEOUT_SECS, HANDLER_TIMEOUT_SECS,
    INTENT_CACHE_CAPACITY, MAX_INTENTS_PER_QUERY,
};

/// Orchestration limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Timeout of one domain handler invocation (seconds)
    pub handler_timeout_secs: u64,
    /// Timeout of one document analysis (seconds)
    pub analysis_timeout_secs: u64,
    /// Entries kept in the intent cache
    pub intent_cache_capacity: u64,
    /// Domains a single query may be routed to
    pub max_intents: usize,
    /// Passages retrieved per domain
    pub search_top_k: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            handler_timeout_secs: HANDLER_TIMEOUT_SECS,
            analysis_timeout_secs: DOCUMENT_ANALYSIS_TIMEOUT_SECS,
            intent_cache_capacity: INTENT_CACHE_CAPACITY,
            max_intents: MAX_INTENTS_PER_QUERY,
            search_top_k: DEFAULT_SEARCH_TOP_K,
        }
    }
}

/// Per-intent override of the knowledge collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    /// Collection to retrieve from; an empty name makes the intent model-only
    pub collection: Option<String>,
    /// Passages retrieved for this intent
    pub top_k: Option<usize>,
}
