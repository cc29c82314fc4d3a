//! Healthcare Pipeline Use Case
//!
//! End-to-end answer flow: classify, refuse unsafe queries, dispatch to
//! the domain handlers, fuse their answers and run the response check.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use pran_domain::error::{Error, Result};
use pran_domain::value_objects::{ClassificationResult, Intent, ValidationVerdict};

use crate::use_cases::classifier::IntentClassifier;
use crate::use_cases::dispatcher::{Dispatcher, HandlerOutcome, HandlerStatus};
use crate::use_cases::fusion::ResponseFusion;
use crate::use_cases::validator::ResponseValidator;

/// Reply to a query judged unsafe; it never names the category
pub const REFUSAL_MESSAGE: &str = "I can only help with health and wellness questions. \
Please rephrase your question without personal identifiers or unrelated requests.";

/// Replacement for a response blocked by the validator
pub const BLOCKED_RESPONSE_MESSAGE: &str = "I'm not able to give a safe answer to this \
question. Please consult a qualified healthcare professional.";

/// Per-handler line of a trace
#[derive(Debug, Clone, Serialize)]
pub struct HandlerTrace {
    pub intent: Intent,
    pub status: &'static str,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&HandlerOutcome> for HandlerTrace {
    fn from(outcome: &HandlerOutcome) -> Self {
        let error = match &outcome.status {
            HandlerStatus::Failed(e) => Some(e.to_string()),
            _ => None,
        };
        Self {
            intent: outcome.intent,
            status: outcome.label(),
            elapsed_ms: u64::try_from(outcome.elapsed.as_millis()).unwrap_or(u64::MAX),
            error,
        }
    }
}

/// How an answer was produced
#[derive(Debug, Clone, Serialize)]
pub struct PipelineTrace {
    /// Classification used for routing
    pub classification: ClassificationResult,
    /// Whether the classification is the parse-failure default
    pub classification_fallback: bool,
    /// Whether the query was refused as unsafe
    pub refused: bool,
    /// One entry per dispatched intent
    pub handlers: Vec<HandlerTrace>,
    /// Verdict of the response check, when it ran
    pub validation: Option<ValidationVerdict>,
}

/// Final answer plus its trace
#[derive(Debug, Clone, Serialize)]
pub struct PipelineAnswer {
    pub answer: String,
    pub trace: PipelineTrace,
}

/// The orchestration layer behind a single user query
pub struct HealthcarePipeline {
    classifier: Arc<IntentClassifier>,
    dispatcher: Arc<Dispatcher>,
    fusion: ResponseFusion,
    validator: ResponseValidator,
}

impl HealthcarePipeline {
    pub fn new(
        classifier: Arc<IntentClassifier>,
        dispatcher: Arc<Dispatcher>,
        fusion: ResponseFusion,
        validator: ResponseValidator,
    ) -> Self {
        Self {
            classifier,
            dispatcher,
            fusion,
            validator,
        }
    }

    /// Answer one query
    ///
    /// Fails with `NoDomainAnswered` or `RetrievalUnavailable` when no
    /// handler produced an answer, and with `EmptyAnswer` when fusion
    /// leaves nothing to show.
    pub async fn answer(&self, query: &str) -> Result<PipelineAnswer> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::invalid_argument("Query must not be empty"));
        }
        let started = Instant::now();

        let outcome = self.classifier.classify_outcome(query).await;
        let classification_fallback = outcome.is_fallback();
        if classification_fallback {
            warn!("Routing query with the fallback classification");
        }
        let classification = outcome.into_result();

        if !classification.is_safe {
            info!(category = ?classification.safety_category, "Refusing unsafe query");
            return Ok(PipelineAnswer {
                answer: REFUSAL_MESSAGE.to_string(),
                trace: PipelineTrace {
                    classification,
                    classification_fallback,
                    refused: true,
                    handlers: Vec::new(),
                    validation: None,
                },
            });
        }

        let intents: Vec<Intent> = classification.intents().collect();
        let report = self.dispatcher.dispatch(query, &intents).await;
        let handlers: Vec<HandlerTrace> = report.outcomes().iter().map(HandlerTrace::from).collect();

        let answers = report.answers();
        if answers.is_empty() {
            return Err(match report.backend_failure() {
                Some(e) => Error::RetrievalUnavailable {
                    message: e.to_string(),
                },
                None => Error::NoDomainAnswered {
                    failed: report.failed_count(),
                },
            });
        }
        debug!(answered = answers.len(), failed = report.failed_count(), "Dispatch finished");

        let fused = self.fusion.fuse(query, &answers).await?;
        if fused.trim().is_empty() {
            return Err(Error::EmptyAnswer);
        }

        let verdict = self.validator.validate(query, &fused).await;
        let answer = verdict
            .apply(&fused)
            .unwrap_or_else(|| BLOCKED_RESPONSE_MESSAGE.to_string());

        info!(
            primary = %classification.primary_intent,
            domains = intents.len(),
            elapsed = ?started.elapsed(),
            "Answered query"
        );
        Ok(PipelineAnswer {
            answer,
            trace: PipelineTrace {
                classification,
                classification_fallback,
                refused: false,
                handlers,
                validation: Some(verdict),
            },
        })
    }
}
