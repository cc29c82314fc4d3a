use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use pran_domain::error::Result;
use pran_domain::ports::DomainHandler;
use pran_domain::ports::providers::{CompletionRequest, LanguageModel};
use pran_domain::value_objects::Intent;

use crate::prompts;

/// Handler answering from the model alone
pub struct ModelHandler {
    intent: Intent,
    model: Arc<dyn LanguageModel>,
}

impl ModelHandler {
    pub fn new(intent: Intent, model: Arc<dyn LanguageModel>) -> Self {
        Self { intent, model }
    }
}

#[async_trait]
impl DomainHandler for ModelHandler {
    fn intent(&self) -> Intent {
        self.intent
    }

    async fn answer(&self, query: &str) -> Result<String> {
        debug!(intent = %self.intent, "Answering from model");
        self.model
            .complete(CompletionRequest::text(prompts::model_system(self.intent), query))
            .await
    }
}
