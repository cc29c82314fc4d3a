//! Main application configuration

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use pran_application::handlers::default_collection;
use pran_domain::value_objects::Intent;
use pran_providers::vector_store::VectorStoreSettings;

use super::logging::LoggingConfig;
use super::pipeline::{DomainConfig, PipelineConfig};
use super::providers::{EmbeddingConfig, LanguageModelConfig};

/// How one intent is answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRoute {
    pub intent: Intent,
    /// Retrieval collection, `None` for model-only answers
    pub collection: Option<String>,
    pub top_k: usize,
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Embedding provider
    pub embedding: EmbeddingConfig,
    /// Language model provider
    pub language_model: LanguageModelConfig,
    /// Vector store backend
    pub vector_store: VectorStoreSettings,
    /// Orchestration limits
    pub pipeline: PipelineConfig,
    /// Per-intent overrides keyed by intent name
    pub domains: BTreeMap<String, DomainConfig>,
}

impl AppConfig {
    /// Routing of every intent, with overrides applied over the built-in map
    ///
    /// An override with a blank collection makes the intent model-only; one
    /// without a collection keeps the built-in collection.
    pub fn domain_routes(&self) -> Vec<DomainRoute> {
        Intent::ALL
            .iter()
            .map(|&intent| {
                let override_ = self.domains.get(intent.as_str());
                let collection = match override_.and_then(|domain| domain.collection.as_deref()) {
                    Some(name) if name.trim().is_empty() => None,
                    Some(name) => Some(name.trim().to_string()),
                    None => default_collection(intent).map(str::to_string),
                };
                let top_k = override_
                    .and_then(|domain| domain.top_k)
                    .unwrap_or(self.pipeline.search_top_k);
                DomainRoute {
                    intent,
                    collection,
                    top_k,
                }
            })
            .collect()
    }
}
