//! OpenAI Chat Model
//!
//! Implements the LanguageModel port on `POST {base}/chat/completions`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use pran_domain::error::{Error, Result};
use pran_domain::ports::providers::{CompletionRequest, LanguageModel, ResponseFormat};

use crate::constants::{CONTENT_TYPE_JSON, OPENAI_DEFAULT_BASE_URL};
use crate::embedding::helpers::constructor;
use crate::utils::{HttpResponseUtils, ServiceKind};

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ChatResponseFormat>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// OpenAI chat model
pub struct OpenAIChatModel {
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    timeout: Duration,
    http_client: Client,
}

impl OpenAIChatModel {
    /// Create a new OpenAI chat model
    ///
    /// Fails with a configuration error when the API key is missing.
    pub fn new(
        api_key: Option<&str>,
        base_url: Option<&str>,
        model: String,
        temperature: f32,
        timeout: Duration,
        http_client: Client,
    ) -> Result<Self> {
        Ok(Self {
            api_key: constructor::require_api_key(api_key, "OpenAI chat")?,
            base_url: constructor::get_effective_url(base_url, OPENAI_DEFAULT_BASE_URL),
            model,
            temperature,
            timeout,
            http_client,
        })
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LanguageModel for OpenAIChatModel {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature.unwrap_or(self.temperature),
            response_format: (request.format == ResponseFormat::Json)
                .then_some(ChatResponseFormat { kind: "json_object" }),
        };

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                HttpResponseUtils::send_error(e, "openai", ServiceKind::LanguageModel, self.timeout)
            })?;

        let response =
            HttpResponseUtils::check_status(response, "openai", ServiceKind::LanguageModel).await?;
        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::language_model(format!("openai response parse failed: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::language_model("openai returned no message content"))
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}
