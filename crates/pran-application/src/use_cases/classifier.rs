//! Intent Classifier Use Case
//!
//! One model call per query produces the safety verdict and the ranked
//! intents together. The intent half is memoized per exact query text in a
//! bounded cache; the safety half is always computed fresh, so a cache hit
//! still costs one (safety-only) model call.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Deserialize;
use tracing::{debug, warn};

use pran_domain::constants::MAX_INTENTS_PER_QUERY;
use pran_domain::error::Result;
use pran_domain::ports::providers::{CacheProvider, CompletionRequest, LanguageModel};
use pran_domain::value_objects::{
    ClassificationOutcome, ClassificationResult, Intent, IntentRouting, SafetyCategory,
    SafetyVerdict, ScoredIntent,
};

use crate::prompts;
use crate::structured::parse_structured;

/// Cache key helpers
mod cache_keys {
    #[inline]
    pub fn intent(query: &str) -> String {
        format!("intent:{query}")
    }
}

fn default_safe() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct RawIntent {
    intent: String,
    #[serde(default)]
    confidence: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct RawSafety {
    #[serde(default = "default_safe")]
    is_safe: bool,
    #[serde(default)]
    safety_category: Option<String>,
}

impl RawSafety {
    fn verdict(&self) -> SafetyVerdict {
        let category = self
            .safety_category
            .as_deref()
            .and_then(|c| c.parse::<SafetyCategory>().ok());
        SafetyVerdict::new(self.is_safe, category)
    }
}

#[derive(Debug, Deserialize)]
struct RawClassification {
    #[serde(flatten)]
    safety: RawSafety,
    #[serde(default)]
    primary_intent: Option<String>,
    #[serde(default)]
    all_intents: Vec<RawIntent>,
}

impl RawClassification {
    /// Build the routing, dropping intent labels outside the known set
    fn routing(&self, max_intents: usize) -> IntentRouting {
        let primary = self
            .primary_intent
            .as_deref()
            .and_then(|p| p.parse::<Intent>().ok());
        let intents = self
            .all_intents
            .iter()
            .filter_map(|raw| match raw.intent.parse::<Intent>() {
                Ok(intent) => Some(ScoredIntent::new(intent, raw.confidence.unwrap_or(1.0))),
                Err(_) => {
                    debug!(intent = %raw.intent, "Dropping unknown intent label");
                    None
                }
            })
            .collect();
        IntentRouting::new(primary, intents, max_intents)
    }
}

/// Joint safety and intent classifier
///
/// Safe for concurrent use. Concurrent calls for the same uncached query
/// are serialized on a per-query lock so only the first one runs the joint
/// classification; the others find the routing cached and run the
/// safety-only check.
pub struct IntentClassifier {
    model: Arc<dyn LanguageModel>,
    cache: Arc<dyn CacheProvider>,
    max_intents: usize,
    in_flight: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl IntentClassifier {
    /// Create a classifier memoizing routings in `cache`
    pub fn new(model: Arc<dyn LanguageModel>, cache: Arc<dyn CacheProvider>) -> Self {
        Self {
            model,
            cache,
            max_intents: MAX_INTENTS_PER_QUERY,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Override the maximum number of intents per query (at least 1)
    pub fn with_max_intents(mut self, max_intents: usize) -> Self {
        self.max_intents = max_intents.max(1);
        self
    }

    /// Classify a query; never fails
    ///
    /// Unusable model output resolves to the safe default: safe, routed to
    /// general conversation only.
    pub async fn classify(&self, query: &str) -> ClassificationResult {
        let outcome = self.classify_outcome(query).await;
        if let ClassificationOutcome::Fallback { reason } = &outcome {
            warn!(reason = %reason, "Classification fell back to safe default");
        }
        outcome.into_result()
    }

    /// Classify a query, keeping the fallback visible to the caller
    pub async fn classify_outcome(&self, query: &str) -> ClassificationOutcome {
        let key = cache_keys::intent(query);
        if let Some(routing) = self.cached_routing(&key).await {
            return self.with_fresh_safety(query, routing).await;
        }

        let gate = self.gate(&key);
        let outcome = {
            let _guard = gate.lock().await;
            match self.cached_routing(&key).await {
                Some(routing) => self.with_fresh_safety(query, routing).await,
                None => self.joint(query, &key).await,
            }
        };
        self.release(&key, &gate);
        outcome
    }

    async fn joint(&self, query: &str, key: &str) -> ClassificationOutcome {
        let raw: RawClassification = match self.ask(prompts::CLASSIFY_SYSTEM, query).await {
            Ok(raw) => raw,
            Err(e) => {
                return ClassificationOutcome::Fallback {
                    reason: e.to_string(),
                };
            }
        };

        let routing = raw.routing(self.max_intents);
        self.store_routing(key, &routing).await;
        debug!(
            primary = %routing.primary_intent(),
            intents = routing.all_intents().len(),
            "Classified query"
        );
        ClassificationOutcome::Parsed(ClassificationResult::from_parts(
            raw.safety.verdict(),
            routing,
        ))
    }

    async fn with_fresh_safety(&self, query: &str, routing: IntentRouting) -> ClassificationOutcome {
        debug!(primary = %routing.primary_intent(), "Cached routing, checking safety");
        match self.ask::<RawSafety>(prompts::SAFETY_SYSTEM, query).await {
            Ok(safety) => {
                ClassificationOutcome::Parsed(ClassificationResult::from_parts(safety.verdict(), routing))
            }
            Err(e) => ClassificationOutcome::Fallback {
                reason: e.to_string(),
            },
        }
    }

    async fn ask<T: serde::de::DeserializeOwned>(&self, system: &str, query: &str) -> Result<T> {
        let reply = self
            .model
            .complete(CompletionRequest::json(system, query).with_temperature(0.0))
            .await?;
        parse_structured(&reply)
    }

    async fn cached_routing(&self, key: &str) -> Option<IntentRouting> {
        match self.cache.get_json(key).await {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(routing) => Some(routing),
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable cached routing");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Intent cache read failed");
                None
            }
        }
    }

    async fn store_routing(&self, key: &str, routing: &IntentRouting) {
        let stored = match serde_json::to_string(routing) {
            Ok(json) => self.cache.set_json(key, &json).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = stored {
            warn!(error = %e, "Intent cache write failed");
        }
    }

    fn gate(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(in_flight.entry(key.to_string()).or_default())
    }

    fn release(&self, key: &str, gate: &Arc<tokio::sync::Mutex<()>>) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        // Only the map and this caller hold the gate: nobody else is waiting
        if Arc::strong_count(gate) <= 2 {
            in_flight.remove(key);
        }
    }
}
