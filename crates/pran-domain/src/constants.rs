//! Domain layer constants
//!
//! Constants that are part of the retrieval and orchestration rules and
//! are shared by the provider and application layers.

// ============================================================================
// VECTOR STORAGE CONSTANTS
// ============================================================================

/// Metadata key under which backends that store generic metadata keep the content
pub const RESERVED_CONTENT_KEY: &str = "text";

/// Maximum number of records sent in one upsert call to size-limited backends
pub const UPSERT_BATCH_SIZE: usize = 100;

/// Separator substituted for `_` when deriving a namespace from a collection name
pub const NAMESPACE_SEPARATOR: char = '-';

/// Name of the shared index used by the namespaced backend
pub const DEFAULT_SHARED_INDEX_NAME: &str = "pran-protocol";

/// Backend label of transient language model failures
///
/// A model outage is retryable but is not a retrieval outage.
pub const LANGUAGE_MODEL_BACKEND: &str = "language_model";

/// Default number of results returned by a search
pub const DEFAULT_SEARCH_TOP_K: usize = 4;

// ============================================================================
// CLASSIFICATION CONSTANTS
// ============================================================================

/// Maximum number of domains a single query is routed to
pub const MAX_INTENTS_PER_QUERY: usize = 3;

/// Default capacity of the intent cache (entries)
pub const INTENT_CACHE_CAPACITY: u64 = 256;

/// Confidence assigned to the fallback intent
pub const FALLBACK_INTENT_CONFIDENCE: f32 = 1.0;

// ============================================================================
// DISPATCH AND ANALYSIS CONSTANTS
// ============================================================================

/// Default timeout for one domain handler invocation (seconds)
pub const HANDLER_TIMEOUT_SECS: u64 = 30;

/// Timeout for a document analysis call (seconds)
pub const DOCUMENT_ANALYSIS_TIMEOUT_SECS: u64 = 10;

/// Number of leading characters of a document sent for analysis
pub const DOCUMENT_ANALYSIS_MAX_CHARS: usize = 2000;

/// Soft word limit the fusion step asks the model to respect
pub const FUSION_WORD_LIMIT: usize = 200;
