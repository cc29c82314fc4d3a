//! Language model implementations
//!
//! Chat-completion adapters implementing the `LanguageModel` port. Both
//! honour [`ResponseFormat::Json`] through their native JSON mode. The reply
//! may still be fenced or malformed, so callers parse it leniently.
//!
//! [`ResponseFormat::Json`]: pran_domain::ports::providers::ResponseFormat::Json

/// Ollama chat API
pub mod ollama;
/// OpenAI chat completions API
pub mod openai;

pub use ollama::OllamaChatModel;
pub use openai::OpenAIChatModel;
