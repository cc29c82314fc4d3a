//! Language Model Port
//!
//! The model is an opaque completion capability: a system instruction and
//! a user message go in, text comes out. Components that ask for
//! structured output parse the returned text themselves and apply their
//! own fallback when it is malformed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Output shape requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Free text
    #[default]
    Text,
    /// A single JSON object
    Json,
}

/// One completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System instruction
    pub system: String,
    /// User message
    pub user: String,
    /// Requested output shape
    pub format: ResponseFormat,
    /// Sampling temperature override
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Free-text request
    pub fn text(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            format: ResponseFormat::Text,
            temperature: None,
        }
    }

    /// Structured (JSON object) request
    pub fn json(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            format: ResponseFormat::Json,
            ..Self::text(system, user)
        }
    }

    /// Override the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Text completion service
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Run one completion and return the raw model text
    async fn complete(&self, request: CompletionRequest) -> Result<String>;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}
