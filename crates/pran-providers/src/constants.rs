//! Provider Constants
//!
//! Constants specific to provider implementations. Domain constants live in
//! pran-domain.

// ============================================================================
// EMBEDDING PROVIDER CONSTANTS
// ============================================================================

/// Null embedding provider dimension (for testing)
pub const EMBEDDING_DIMENSION_NULL: usize = 384;

/// OpenAI text-embedding-3-small dimension
pub const EMBEDDING_DIMENSION_OPENAI_SMALL: usize = 1536;

/// OpenAI text-embedding-3-large dimension
pub const EMBEDDING_DIMENSION_OPENAI_LARGE: usize = 3072;

/// OpenAI text-embedding-ada-002 dimension
pub const EMBEDDING_DIMENSION_OPENAI_ADA: usize = 1536;

/// Ollama nomic-embed-text dimension
pub const EMBEDDING_DIMENSION_OLLAMA_NOMIC: usize = 768;

/// Ollama all-minilm dimension
pub const EMBEDDING_DIMENSION_OLLAMA_MINILM: usize = 384;

/// Ollama mxbai-embed-large dimension
pub const EMBEDDING_DIMENSION_OLLAMA_MXBAI: usize = 1024;

/// Ollama default dimension
pub const EMBEDDING_DIMENSION_OLLAMA_DEFAULT: usize = 768;

// ============================================================================
// API ENDPOINTS
// ============================================================================

/// OpenAI API base URL
pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Ollama server default URL
pub const OLLAMA_DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Control plane of the namespaced index service
pub const NAMESPACED_DEFAULT_CONTROL_PLANE_URL: &str = "https://api.pinecone.io";

/// Default serverless cloud for a newly created shared index
pub const NAMESPACED_DEFAULT_CLOUD: &str = "aws";

/// Default serverless region for a newly created shared index
pub const NAMESPACED_DEFAULT_REGION: &str = "us-east-1";

/// API version header sent to the namespaced index service
pub const NAMESPACED_API_VERSION: &str = "2024-07";

// ============================================================================
// HTTP CONSTANTS
// ============================================================================

/// JSON content type
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Error message prefix for request timeouts
pub const ERROR_MSG_REQUEST_TIMEOUT: &str = "Request timed out after";

// ============================================================================
// LOCAL STORE CONSTANTS
// ============================================================================

/// Manifest file inside a local collection directory
pub const LOCAL_MANIFEST_FILE: &str = "manifest.json";

/// Append-only record file inside a local collection directory
pub const LOCAL_RECORDS_FILE: &str = "records.jsonl";
