//! Mock services for application tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pran_domain::constants::LANGUAGE_MODEL_BACKEND;
use pran_domain::error::{Error, Result};
use pran_domain::ports::DomainHandler;
use pran_domain::ports::providers::{CompletionRequest, LanguageModel};
use pran_domain::value_objects::Intent;

/// Scripted reply of the fake model
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Fail(String),
    Transient(String),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }

    fn resolve(&self) -> Result<String> {
        match self {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail(message) => Err(Error::language_model(message.clone())),
            Reply::Transient(message) => {
                Err(Error::transient(LANGUAGE_MODEL_BACKEND, message.clone()))
            }
        }
    }
}

/// Language model answering by system prompt prefix
///
/// Every request is recorded. A request matching no rule fails.
#[derive(Default)]
pub struct ScriptedModel {
    rules: Vec<(String, Reply)>,
    delay: Option<Duration>,
    calls: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests whose system prompt starts with `prefix`
    pub fn on(mut self, prefix: impl Into<String>, reply: Reply) -> Self {
        self.rules.push((prefix.into(), reply));
        self
    }

    /// Sleep before every reply
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }

    /// Number of requests whose system prompt starts with `prefix`
    pub fn calls_for(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .expect("calls lock")
            .iter()
            .filter(|r| r.system.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        self.calls.lock().expect("calls lock").push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.rules
            .iter()
            .find(|(prefix, _)| request.system.starts_with(prefix.as_str()))
            .map_or_else(
                || Err(Error::language_model("no scripted reply")),
                |(_, reply)| reply.resolve(),
            )
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}

/// Behaviour of a fake handler
#[derive(Debug, Clone)]
pub enum Behaviour {
    Answer(String),
    Blank,
    Fail,
    Unreachable,
    ModelOutage,
    Hang(Duration),
}

/// Domain handler with a fixed behaviour
pub struct FakeHandler {
    intent: Intent,
    behaviour: Behaviour,
    calls: Mutex<usize>,
}

impl FakeHandler {
    pub fn new(intent: Intent, behaviour: Behaviour) -> Arc<Self> {
        Arc::new(Self {
            intent,
            behaviour,
            calls: Mutex::new(0),
        })
    }

    pub fn answering(intent: Intent, answer: &str) -> Arc<Self> {
        Self::new(intent, Behaviour::Answer(answer.to_string()))
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().expect("calls lock")
    }
}

#[async_trait]
impl DomainHandler for FakeHandler {
    fn intent(&self) -> Intent {
        self.intent
    }

    async fn answer(&self, _query: &str) -> Result<String> {
        *self.calls.lock().expect("calls lock") += 1;
        match &self.behaviour {
            Behaviour::Answer(text) => Ok(text.clone()),
            Behaviour::Blank => Ok("   ".to_string()),
            Behaviour::Fail => Err(Error::language_model("handler model refused")),
            Behaviour::Unreachable => Err(Error::transient("collection", "connection refused")),
            Behaviour::ModelOutage => Err(Error::transient(LANGUAGE_MODEL_BACKEND, "502 bad gateway")),
            Behaviour::Hang(duration) => {
                tokio::time::sleep(*duration).await;
                Ok("too late".to_string())
            }
        }
    }
}

/// JSON reply of the joint classifier
pub fn classification_json(is_safe: bool, primary: &str, intents: &[(&str, f32)]) -> String {
    let intents = intents
        .iter()
        .map(|(intent, confidence)| serde_json::json!({"intent": intent, "confidence": confidence}))
        .collect::<Vec<_>>();
    serde_json::json!({
        "is_safe": is_safe,
        "safety_category": if is_safe { "safe" } else { "jailbreak" },
        "primary_intent": primary,
        "all_intents": intents,
    })
    .to_string()
}

/// JSON reply of the safety-only check
pub fn safety_json(is_safe: bool) -> String {
    serde_json::json!({
        "is_safe": is_safe,
        "safety_category": if is_safe { "safe" } else { "pii" },
    })
    .to_string()
}
