//! Response Validator Use Case
//!
//! Secondary safety net on the final response. It fails open: any model or
//! parse failure yields a passing verdict, since the primary guard already
//! ran during classification.

use std::sync::Arc;

use tracing::{debug, info, warn};

use pran_domain::ports::providers::{CompletionRequest, LanguageModel};
use pran_domain::value_objects::ValidationVerdict;

use crate::prompts;
use crate::structured::parse_structured;

/// Post-hoc response check
pub struct ResponseValidator {
    model: Arc<dyn LanguageModel>,
}

impl ResponseValidator {
    /// Create a validator
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Review `response` to `query`; never fails
    pub async fn validate(&self, query: &str, response: &str) -> ValidationVerdict {
        let request = CompletionRequest::json(
            prompts::VALIDATE_SYSTEM,
            prompts::validate_user(query, response),
        )
        .with_temperature(0.0);

        let verdict = match self.model.complete(request).await {
            Ok(reply) => match parse_structured::<ValidationVerdict>(&reply) {
                Ok(verdict) => verdict,
                Err(e) => {
                    warn!(error = %e, "Validator reply unusable, failing open");
                    return ValidationVerdict::fail_open("Validation error, defaulted to safe");
                }
            },
            Err(e) => {
                warn!(error = %e, "Validator call failed, failing open");
                return ValidationVerdict::fail_open("Validation error, defaulted to safe");
            }
        };

        if verdict.is_safe {
            debug!(amended = verdict.revised_response.is_some(), "Response passed validation");
        } else {
            info!(reason = ?verdict.reason, "Response blocked by validator");
        }
        verdict
    }
}
