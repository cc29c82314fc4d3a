//! Classification Value Objects
//!
//! Result of the joint safety and intent classification of one query.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::FALLBACK_INTENT_CONFIDENCE;
use crate::error::Error;
use crate::value_objects::{Intent, ScoredIntent};

/// Safety category assigned to a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyCategory {
    /// Attempt to bypass the assistant's safety rules
    Jailbreak,
    /// Disclosure of personal identifiers
    Pii,
    /// Non-medical harmful content
    Harmful,
    /// Everything else, including all medical content
    Safe,
}

impl SafetyCategory {
    /// Wire name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            SafetyCategory::Jailbreak => "jailbreak",
            SafetyCategory::Pii => "pii",
            SafetyCategory::Harmful => "harmful",
            SafetyCategory::Safe => "safe",
        }
    }
}

impl fmt::Display for SafetyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SafetyCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "jailbreak" => Ok(SafetyCategory::Jailbreak),
            "pii" => Ok(SafetyCategory::Pii),
            "harmful" => Ok(SafetyCategory::Harmful),
            "safe" => Ok(SafetyCategory::Safe),
            other => Err(Error::invalid_argument(format!(
                "unknown safety category '{other}'"
            ))),
        }
    }
}

/// Safety half of a classification; never cached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyVerdict {
    /// Whether the query may be answered
    pub is_safe: bool,
    /// Category behind the verdict
    pub category: SafetyCategory,
}

impl SafetyVerdict {
    /// Verdict for a safe query
    pub fn safe() -> Self {
        Self {
            is_safe: true,
            category: SafetyCategory::Safe,
        }
    }

    /// Build a verdict, reconciling the flag with the category
    ///
    /// An unsafe verdict never carries the `Safe` category and a safe
    /// verdict always does.
    pub fn new(is_safe: bool, category: Option<SafetyCategory>) -> Self {
        if is_safe {
            return Self::safe();
        }
        let category = match category {
            Some(SafetyCategory::Safe) | None => SafetyCategory::Harmful,
            Some(other) => other,
        };
        Self {
            is_safe: false,
            category,
        }
    }
}

/// Intent half of a classification; may be memoized per query text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentRouting {
    primary_intent: Intent,
    all_intents: Vec<ScoredIntent>,
}

impl IntentRouting {
    /// Routing to the general conversation domain only
    pub fn general_conversation() -> Self {
        Self {
            primary_intent: Intent::GeneralConversation,
            all_intents: vec![ScoredIntent::new(
                Intent::GeneralConversation,
                FALLBACK_INTENT_CONFIDENCE,
            )],
        }
    }

    /// Normalize raw classifier output into a routing
    ///
    /// Intents are deduplicated (highest confidence wins), ordered by
    /// descending confidence and truncated to `max_intents`. A primary
    /// intent missing from the list is added to it. An empty result
    /// falls back to general conversation.
    pub fn new(primary: Option<Intent>, intents: Vec<ScoredIntent>, max_intents: usize) -> Self {
        let mut ranked: Vec<ScoredIntent> = Vec::with_capacity(intents.len() + 1);
        for scored in intents {
            match ranked.iter_mut().find(|s| s.intent == scored.intent) {
                Some(existing) if existing.confidence < scored.confidence => {
                    existing.confidence = scored.confidence;
                }
                Some(_) => {}
                None => ranked.push(scored),
            }
        }

        if let Some(primary) = primary {
            if !ranked.iter().any(|s| s.intent == primary) {
                let confidence = ranked
                    .iter()
                    .map(|s| s.confidence)
                    .reduce(f32::max)
                    .unwrap_or(FALLBACK_INTENT_CONFIDENCE);
                ranked.push(ScoredIntent::new(primary, confidence));
            }
        }

        if ranked.is_empty() {
            return Self::general_conversation();
        }

        // Stable sort keeps the model's order among equal confidences
        ranked.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(max_intents.max(1));

        let primary_intent = primary
            .filter(|p| ranked.iter().any(|s| s.intent == *p))
            .unwrap_or(ranked[0].intent);

        Self {
            primary_intent,
            all_intents: ranked,
        }
    }

    /// Main intent of the query
    pub fn primary_intent(&self) -> Intent {
        self.primary_intent
    }

    /// All intents, by descending confidence
    pub fn all_intents(&self) -> &[ScoredIntent] {
        &self.all_intents
    }

    /// Whether the query spans more than one domain
    pub fn is_multi_domain(&self) -> bool {
        self.all_intents.len() > 1
    }
}

/// Value Object: joint safety and intent classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Whether the query may be answered
    pub is_safe: bool,
    /// Category behind the safety verdict
    pub safety_category: SafetyCategory,
    /// Main intent
    pub primary_intent: Intent,
    /// All intents by descending confidence
    pub all_intents: Vec<ScoredIntent>,
    /// True exactly when `all_intents` has more than one entry
    pub is_multi_domain: bool,
}

impl ClassificationResult {
    /// Combine a fresh safety verdict with a (possibly cached) routing
    pub fn from_parts(safety: SafetyVerdict, routing: IntentRouting) -> Self {
        let is_multi_domain = routing.is_multi_domain();
        Self {
            is_safe: safety.is_safe,
            safety_category: safety.category,
            primary_intent: routing.primary_intent,
            all_intents: routing.all_intents,
            is_multi_domain,
        }
    }

    /// Fixed safe default used when classifier output cannot be parsed
    pub fn safe_default() -> Self {
        Self::from_parts(SafetyVerdict::safe(), IntentRouting::general_conversation())
    }

    /// The intents to dispatch, in ranked order
    pub fn intents(&self) -> impl Iterator<Item = Intent> + '_ {
        self.all_intents.iter().map(|s| s.intent)
    }
}

/// Outcome of one classification attempt
///
/// The single point where a parse failure is turned into the safe default.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassificationOutcome {
    /// Model output parsed successfully
    Parsed(ClassificationResult),
    /// Model output was unusable; carries the reason for logging
    Fallback {
        /// Why the model output was rejected
        reason: String,
    },
}

impl ClassificationOutcome {
    /// Whether the fallback default was used
    pub fn is_fallback(&self) -> bool {
        matches!(self, ClassificationOutcome::Fallback { .. })
    }

    /// Resolve into a result, applying the safe default for fallbacks
    pub fn into_result(self) -> ClassificationResult {
        match self {
            ClassificationOutcome::Parsed(result) => result,
            ClassificationOutcome::Fallback { .. } => ClassificationResult::safe_default(),
        }
    }
}
