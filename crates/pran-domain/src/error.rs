//! Error handling types

use thiserror::Error;

use crate::constants::LANGUAGE_MODEL_BACKEND;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Sentence shown to end users when supporting documents could not be fetched
pub const USER_MESSAGE_RETRIEVAL_UNAVAILABLE: &str =
    "I could not retrieve supporting information right now. Please try again in a moment.";

/// Sentence shown to end users when no answer could be assembled
pub const USER_MESSAGE_NO_ANSWER: &str =
    "I could not produce an answer to that question. Please try rephrasing it.";

/// Main error type for Pran
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Missing or invalid configuration, raised when a component is built
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Embedding length disagrees with the backend's configured dimension
    #[error("Dimension mismatch: backend expects {expected} dimensions, embedding has {actual}")]
    DimensionMismatch {
        /// Dimension the backend was configured with
        expected: usize,
        /// Dimension of the offending embedding
        actual: usize,
    },

    /// Network failure or timeout talking to a backend; the caller may retry
    #[error("Transient {backend} error: {message}")]
    TransientBackend {
        /// Backend that failed (e.g. "namespaced", "embedding")
        backend: String,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Vector database rejected an operation
    #[error("Vector database error: {message}")]
    VectorDb {
        /// Description of the vector database error
        message: String,
    },

    /// One chunk of a batched upsert failed
    #[error("Upsert of records {start}..{end} (of {total}) failed: {source}")]
    BatchUpsert {
        /// First record index of the failed chunk
        start: usize,
        /// One past the last record index of the failed chunk
        end: usize,
        /// Number of records in the whole call
        total: usize,
        /// Failure reported for the chunk
        #[source]
        source: Box<Error>,
    },

    /// Embedding provider operation error
    #[error("Embedding provider error: {message}")]
    Embedding {
        /// Description of the embedding provider error
        message: String,
    },

    /// Language model call error
    #[error("Language model error: {message}")]
    LanguageModel {
        /// Description of the language model error
        message: String,
    },

    /// Fusion was asked to merge an empty set of answers
    #[error("Nothing to synthesize: no domain answers were supplied")]
    NothingToSynthesize,

    /// Every dispatched domain handler failed or timed out
    #[error("No domain could answer the query ({failed} handler(s) failed)")]
    NoDomainAnswered {
        /// Number of handlers that were dispatched and failed
        failed: usize,
    },

    /// Every dispatched handler failed and the vector backend was unreachable
    #[error("Supporting information could not be retrieved: {message}")]
    RetrievalUnavailable {
        /// Description of the underlying backend failure
        message: String,
    },

    /// The pipeline produced a blank answer
    #[error("The pipeline produced an empty answer")]
    EmptyAnswer,

    /// Cache operation error
    #[error("Cache error: {message}")]
    Cache {
        /// Description of the cache error
        message: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Basic error creation methods
impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a vector database error
    pub fn vector_db<S: Into<String>>(message: S) -> Self {
        Self::VectorDb {
            message: message.into(),
        }
    }

    /// Create an embedding provider error
    pub fn embedding<S: Into<String>>(message: S) -> Self {
        Self::Embedding {
            message: message.into(),
        }
    }

    /// Create a language model error
    pub fn language_model<S: Into<String>>(message: S) -> Self {
        Self::LanguageModel {
            message: message.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }
}

// I/O error creation methods
impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Transient backend error creation methods
impl Error {
    /// Create a transient backend error
    pub fn transient<B: Into<String>, S: Into<String>>(backend: B, message: S) -> Self {
        Self::TransientBackend {
            backend: backend.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a transient backend error with source
    pub fn transient_with_source<
        B: Into<String>,
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        backend: B,
        message: S,
        source: E,
    ) -> Self {
        Self::TransientBackend {
            backend: backend.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Wrap a chunk failure with the range of records it covered
    pub fn batch_upsert(start: usize, end: usize, total: usize, source: Error) -> Self {
        Self::BatchUpsert {
            start,
            end,
            total,
            source: Box::new(source),
        }
    }
}

// Classification helpers
impl Error {
    /// Whether the caller may retry the operation unchanged
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::TransientBackend { .. } => true,
            Self::BatchUpsert { source, .. } => source.is_retryable(),
            _ => false,
        }
    }

    /// Whether the error originates in an unreachable retrieval backend
    ///
    /// Vector store and embedding outages count; language model outages
    /// do not.
    pub fn is_backend_unavailable(&self) -> bool {
        match self {
            Self::RetrievalUnavailable { .. } => true,
            Self::TransientBackend { backend, .. } => backend != LANGUAGE_MODEL_BACKEND,
            Self::BatchUpsert { source, .. } => source.is_backend_unavailable(),
            _ => false,
        }
    }

    /// The sentence that may be shown to an end user for this error
    ///
    /// Internal causes are never echoed; they belong in logs.
    pub fn user_message(&self) -> &'static str {
        if self.is_backend_unavailable() {
            USER_MESSAGE_RETRIEVAL_UNAVAILABLE
        } else {
            USER_MESSAGE_NO_ANSWER
        }
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::internal(s)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::internal(s)
    }
}
