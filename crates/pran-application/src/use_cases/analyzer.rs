//! Document Analyzer Use Case
//!
//! Structured summary of an uploaded medical document, bounded in time so
//! an upload never waits on a slow model.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use pran_domain::constants::{DOCUMENT_ANALYSIS_MAX_CHARS, DOCUMENT_ANALYSIS_TIMEOUT_SECS};
use pran_domain::ports::providers::{CompletionRequest, LanguageModel};
use pran_domain::value_objects::DocumentAnalysis;

use crate::prompts;
use crate::structured::parse_structured;

/// Model-backed document analyzer
pub struct DocumentAnalyzer {
    model: Arc<dyn LanguageModel>,
    timeout: Duration,
    max_chars: usize,
}

impl DocumentAnalyzer {
    /// Create an analyzer with the default 10 s bound
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self::with_timeout(model, Duration::from_secs(DOCUMENT_ANALYSIS_TIMEOUT_SECS))
    }

    /// Create an analyzer with a custom time bound
    pub fn with_timeout(model: Arc<dyn LanguageModel>, timeout: Duration) -> Self {
        Self {
            model,
            timeout,
            max_chars: DOCUMENT_ANALYSIS_MAX_CHARS,
        }
    }

    /// Analyze the leading part of `text`; never fails
    ///
    /// A timeout yields the "pending" placeholder, any other failure the
    /// "unavailable" one.
    pub async fn analyze(&self, text: &str) -> DocumentAnalysis {
        let excerpt: String = text.chars().take(self.max_chars).collect();
        let request =
            CompletionRequest::json(prompts::ANALYZE_SYSTEM, excerpt).with_temperature(0.0);

        match tokio::time::timeout(self.timeout, self.model.complete(request)).await {
            Err(_) => {
                warn!(timeout = ?self.timeout, "Document analysis timed out");
                DocumentAnalysis::pending(text.chars().count())
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Document analysis failed");
                DocumentAnalysis::unavailable(e.to_string())
            }
            Ok(Ok(reply)) => match parse_structured::<DocumentAnalysis>(&reply) {
                Ok(mut analysis) => {
                    analysis.analyzed = true;
                    analysis.error = None;
                    debug!(document_type = ?analysis.document_type, "Document analyzed");
                    analysis
                }
                Err(e) => {
                    warn!(error = %e, "Document analysis reply unusable");
                    DocumentAnalysis::unavailable(e.to_string())
                }
            },
        }
    }
}
