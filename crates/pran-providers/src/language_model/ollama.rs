//! Ollama Chat Model
//!
//! Implements the LanguageModel port on `POST {base}/api/chat` with
//! streaming disabled.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use pran_domain::error::{Error, Result};
use pran_domain::ports::providers::{CompletionRequest, LanguageModel, ResponseFormat};

use crate::constants::{CONTENT_TYPE_JSON, OLLAMA_DEFAULT_BASE_URL};
use crate::embedding::helpers::constructor;
use crate::utils::{HttpResponseUtils, ServiceKind};

#[derive(Debug, Serialize)]
struct OllamaMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'static str>,
    options: OllamaOptions,
}

#[derive(Debug, Deserialize)]
struct OllamaMessageResponse {
    content: String,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessageResponse,
}

/// Ollama chat model
pub struct OllamaChatModel {
    base_url: String,
    model: String,
    temperature: f32,
    timeout: Duration,
    http_client: Client,
}

impl OllamaChatModel {
    /// Create a new Ollama chat model
    pub fn new(
        base_url: Option<&str>,
        model: String,
        temperature: f32,
        timeout: Duration,
        http_client: Client,
    ) -> Self {
        Self {
            base_url: constructor::get_effective_url(base_url, OLLAMA_DEFAULT_BASE_URL),
            model,
            temperature,
            timeout,
            http_client,
        }
    }
}

#[async_trait]
impl LanguageModel for OllamaChatModel {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let body = OllamaRequest {
            model: &self.model,
            messages: vec![
                OllamaMessage {
                    role: "system",
                    content: &request.system,
                },
                OllamaMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            stream: false,
            format: (request.format == ResponseFormat::Json).then_some("json"),
            options: OllamaOptions {
                temperature: request.temperature.unwrap_or(self.temperature),
            },
        };

        let response = self
            .http_client
            .post(format!("{}/api/chat", self.base_url))
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                HttpResponseUtils::send_error(e, "ollama", ServiceKind::LanguageModel, self.timeout)
            })?;

        let response =
            HttpResponseUtils::check_status(response, "ollama", ServiceKind::LanguageModel).await?;
        let parsed: OllamaResponse = response
            .json()
            .await
            .map_err(|e| Error::language_model(format!("ollama response parse failed: {e}")))?;

        Ok(parsed.message.content)
    }

    fn provider_name(&self) -> &str {
        "ollama"
    }
}
