//! Retrieval-grounded handler

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use pran_domain::constants::DEFAULT_SEARCH_TOP_K;
use pran_domain::error::Result;
use pran_domain::ports::DomainHandler;
use pran_domain::ports::providers::{CompletionRequest, LanguageModel, VectorStoreProvider};
use pran_domain::value_objects::{Intent, SearchResult};

use crate::prompts;

/// Handler that searches its intent's partition and answers from the hits
///
/// Search errors propagate so the dispatcher can tell an unreachable
/// backend apart from a model failure.
pub struct RetrievalHandler {
    intent: Intent,
    store: Arc<dyn VectorStoreProvider>,
    model: Arc<dyn LanguageModel>,
    top_k: usize,
}

impl RetrievalHandler {
    /// Create a handler returning the default number of passages
    pub fn new(
        intent: Intent,
        store: Arc<dyn VectorStoreProvider>,
        model: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            intent,
            store,
            model,
            top_k: DEFAULT_SEARCH_TOP_K,
        }
    }

    /// Override the number of passages (at least 1)
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    /// Render hits as passages, each tagged with its citation
    pub fn render_context(&self, hits: &[SearchResult]) -> String {
        let fallback = self.store.partition().collection();
        hits.iter()
            .map(|hit| {
                let source = hit.source_name().unwrap_or(fallback);
                format!("{}\n[Source: {source}]", hit.content.trim())
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[async_trait]
impl DomainHandler for RetrievalHandler {
    fn intent(&self) -> Intent {
        self.intent
    }

    async fn answer(&self, query: &str) -> Result<String> {
        let hits = self.store.search(query, self.top_k, None).await?;
        debug!(
            intent = %self.intent,
            collection = self.store.partition().collection(),
            hits = hits.len(),
            "Retrieved passages"
        );
        let context = if hits.is_empty() {
            "(no relevant passages found)".to_string()
        } else {
            self.render_context(&hits)
        };
        self.model
            .complete(CompletionRequest::text(
                prompts::retrieval_system(self.intent),
                prompts::retrieval_user(query, &context),
            ))
            .await
    }
}
