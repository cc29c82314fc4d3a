//! Infrastructure layer constants

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "PRAN";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "pran.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "pran";

/// Largest accepted upsert batch size
pub const MAX_UPSERT_BATCH_SIZE: usize = 1000;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_ENV_VAR: &str = "PRAN_LOG";

/// File stem used for rolling log files when the path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "pran";

// ============================================================================
// PROVIDER DEFAULTS
// ============================================================================

/// Default embedding model
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Default chat model
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

/// Default sampling temperature for domain answers
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Default provider request timeout (seconds)
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 60;
