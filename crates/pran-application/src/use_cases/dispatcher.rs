//! Handler dispatch
//!
//! Fans a query out to the handler of every classified intent, each under
//! its own timeout, and waits for all of them before reporting. One
//! handler's failure never cancels or affects its siblings.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tracing::{debug, warn};

use pran_domain::constants::HANDLER_TIMEOUT_SECS;
use pran_domain::error::Error;
use pran_domain::ports::DomainHandler;
use pran_domain::value_objects::{FusionInput, Intent};

/// What happened to one dispatched intent
#[derive(Debug)]
pub enum HandlerStatus {
    /// The handler produced a non-blank answer
    Answered(String),
    /// The handler returned an error or a blank answer
    Failed(Error),
    /// The handler did not finish within the timeout
    TimedOut,
    /// No handler is registered for the intent
    Unregistered,
}

/// Result of one handler invocation
#[derive(Debug)]
pub struct HandlerOutcome {
    /// The dispatched intent
    pub intent: Intent,
    /// How the invocation ended
    pub status: HandlerStatus,
    /// Wall time spent on the invocation
    pub elapsed: Duration,
}

impl HandlerOutcome {
    /// The answer, when the handler produced one
    pub fn answer(&self) -> Option<&str> {
        match &self.status {
            HandlerStatus::Answered(text) => Some(text),
            _ => None,
        }
    }

    /// Short status label for traces and logs
    pub fn label(&self) -> &'static str {
        match self.status {
            HandlerStatus::Answered(_) => "answered",
            HandlerStatus::Failed(_) => "failed",
            HandlerStatus::TimedOut => "timed_out",
            HandlerStatus::Unregistered => "unregistered",
        }
    }
}

/// Every outcome of one dispatch, in dispatch order
#[derive(Debug, Default)]
pub struct DispatchReport {
    outcomes: Vec<HandlerOutcome>,
}

impl DispatchReport {
    /// All outcomes
    pub fn outcomes(&self) -> &[HandlerOutcome] {
        &self.outcomes
    }

    /// Consume the report
    pub fn into_outcomes(self) -> Vec<HandlerOutcome> {
        self.outcomes
    }

    /// Answers of the successful handlers, in dispatch order
    pub fn answers(&self) -> FusionInput {
        self.outcomes
            .iter()
            .filter_map(|o| o.answer().map(|a| (o.intent, a.to_string())))
            .collect()
    }

    /// Number of dispatched intents without an answer
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.answer().is_none()).count()
    }

    /// The first failure caused by an unreachable backend, if any
    pub fn backend_failure(&self) -> Option<&Error> {
        self.outcomes.iter().find_map(|o| match &o.status {
            HandlerStatus::Failed(e) if e.is_backend_unavailable() => Some(e),
            _ => None,
        })
    }
}

/// Registry of domain handlers plus the fan-out policy
pub struct Dispatcher {
    handlers: HashMap<Intent, Arc<dyn DomainHandler>>,
    timeout: Duration,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(HANDLER_TIMEOUT_SECS))
    }
}

impl Dispatcher {
    /// Create an empty dispatcher with a per-handler timeout
    pub fn new(timeout: Duration) -> Self {
        Self {
            handlers: HashMap::new(),
            timeout,
        }
    }

    /// Register a handler under its own intent, replacing any previous one
    pub fn register(&mut self, handler: Arc<dyn DomainHandler>) {
        self.handlers.insert(handler.intent(), handler);
    }

    /// Builder form of [`Dispatcher::register`]
    pub fn with_handler(mut self, handler: Arc<dyn DomainHandler>) -> Self {
        self.register(handler);
        self
    }

    /// Whether a handler is registered for `intent`
    pub fn handles(&self, intent: Intent) -> bool {
        self.handlers.contains_key(&intent)
    }

    /// Per-handler timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Invoke the handler of every intent concurrently
    ///
    /// Duplicate intents are dispatched once. Returns only after every
    /// invocation has answered, failed or timed out.
    pub async fn dispatch(&self, query: &str, intents: &[Intent]) -> DispatchReport {
        let mut unique: Vec<Intent> = Vec::with_capacity(intents.len());
        for intent in intents {
            if !unique.contains(intent) {
                unique.push(*intent);
            }
        }

        let outcomes = join_all(unique.into_iter().map(|intent| self.invoke(intent, query))).await;
        DispatchReport { outcomes }
    }

    async fn invoke(&self, intent: Intent, query: &str) -> HandlerOutcome {
        let started = Instant::now();
        let Some(handler) = self.handlers.get(&intent) else {
            warn!(intent = %intent, "No handler registered for intent");
            return HandlerOutcome {
                intent,
                status: HandlerStatus::Unregistered,
                elapsed: started.elapsed(),
            };
        };

        let status = match tokio::time::timeout(self.timeout, handler.answer(query)).await {
            Ok(Ok(answer)) if !answer.trim().is_empty() => HandlerStatus::Answered(answer),
            Ok(Ok(_)) => {
                warn!(intent = %intent, "Handler returned a blank answer");
                HandlerStatus::Failed(Error::EmptyAnswer)
            }
            Ok(Err(e)) => {
                warn!(intent = %intent, error = %e, "Handler failed");
                HandlerStatus::Failed(e)
            }
            Err(_) => {
                warn!(intent = %intent, timeout = ?self.timeout, "Handler timed out");
                HandlerStatus::TimedOut
            }
        };
        let elapsed = started.elapsed();
        debug!(intent = %intent, ?elapsed, "Handler finished");
        HandlerOutcome {
            intent,
            status,
            elapsed,
        }
    }
}
