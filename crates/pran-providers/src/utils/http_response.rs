//! HTTP Response Utilities
//!
//! Helper functions for processing HTTP responses from API providers.
//! Rate limiting, server errors and network failures are reported as
//! retryable transient errors; everything else is a permanent rejection.

use std::time::Duration;

use pran_domain::error::{Error, Result};
use reqwest::{Response, StatusCode};

use pran_domain::constants::LANGUAGE_MODEL_BACKEND;

use crate::constants::ERROR_MSG_REQUEST_TIMEOUT;

/// Kind of remote service, selecting the permanent error variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    /// Embedding API
    Embedding,
    /// Chat / completion API
    LanguageModel,
    /// Vector database
    VectorStore,
}

impl ServiceKind {
    fn permanent(self, message: String) -> Error {
        match self {
            ServiceKind::Embedding => Error::embedding(message),
            ServiceKind::LanguageModel => Error::language_model(message),
            ServiceKind::VectorStore => Error::vector_db(message),
        }
    }

    /// Backend label carried by transient errors
    fn backend<'a>(self, provider_name: &'a str) -> &'a str {
        match self {
            ServiceKind::LanguageModel => LANGUAGE_MODEL_BACKEND,
            ServiceKind::Embedding | ServiceKind::VectorStore => provider_name,
        }
    }
}

/// Utilities for processing HTTP responses
pub struct HttpResponseUtils;

impl HttpResponseUtils {
    /// Check response status and parse JSON
    ///
    /// # Arguments
    /// * `response` - The HTTP response to check
    /// * `provider_name` - Name of the provider for error messages
    /// * `kind` - Service kind, used for non-retryable failures
    pub async fn check_and_parse(
        response: Response,
        provider_name: &str,
        kind: ServiceKind,
    ) -> Result<serde_json::Value> {
        let response = Self::check_status(response, provider_name, kind).await?;
        response.json().await.map_err(|e| {
            kind.permanent(format!("{provider_name} response parse failed: {e}"))
        })
    }

    /// Check response status, returning the response on success
    pub async fn check_status(
        response: Response,
        provider_name: &str,
        kind: ServiceKind,
    ) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(Self::status_error(status, provider_name, kind, &error_text))
    }

    /// Map a non-success status to an error
    pub fn status_error(
        status: StatusCode,
        provider_name: &str,
        kind: ServiceKind,
        details: &str,
    ) -> Error {
        let code = status.as_u16();
        match code {
            429 => Error::transient(
                kind.backend(provider_name),
                format!("{provider_name} rate limit exceeded: {details}"),
            ),
            500..=599 => Error::transient(
                kind.backend(provider_name),
                format!("{provider_name} server error ({code}): {details}"),
            ),
            401 | 403 => kind.permanent(format!(
                "{provider_name} authentication failed ({code}): {details}"
            )),
            _ => kind.permanent(format!(
                "{provider_name} request failed ({code}): {details}"
            )),
        }
    }

    /// Map a failure to send a request; always retryable
    pub fn send_error(
        error: reqwest::Error,
        provider_name: &str,
        kind: ServiceKind,
        timeout: Duration,
    ) -> Error {
        if error.is_timeout() {
            Error::transient(
                kind.backend(provider_name),
                format!("{provider_name}: {ERROR_MSG_REQUEST_TIMEOUT} {timeout:?}"),
            )
        } else {
            Error::transient_with_source(
                kind.backend(provider_name),
                format!("{provider_name}: HTTP request failed"),
                error,
            )
        }
    }
}
