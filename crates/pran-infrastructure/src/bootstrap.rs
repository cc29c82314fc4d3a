//! Composition root
//!
//! Turns an [`AppConfig`] into wired providers and use cases. Nothing is
//! built until it is asked for, so commands that only touch the local store
//! do not need model credentials.
//!
//! ```text
//! AppConfig → provider factories → VectorBackendFactory ─┐
//!                                 → LanguageModel ───────┼→ HealthcarePipeline
//!                                 → MokaCacheProvider ───┘
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use pran_application::handlers::{ModelHandler, RetrievalHandler};
use pran_application::use_cases::{
    DocumentAnalyzer, Dispatcher, HealthcarePipeline, IntentClassifier, MigrationService,
    ResponseFusion, ResponseValidator,
};
use pran_domain::error::{Error, Result};
use pran_domain::ports::providers::{
    EmbeddingProvider, LanguageModel, VectorStoreFactory, VectorStoreProvider,
};
use pran_domain::value_objects::Partition;
use pran_providers::embedding::{
    NullEmbeddingProvider, OllamaEmbeddingProvider, OpenAIEmbeddingProvider,
};
use pran_providers::language_model::{OllamaChatModel, OpenAIChatModel};
use pran_providers::vector_store::{LocalStore, VectorBackend, VectorBackendFactory};
use pran_providers::{HttpClientConfig, MokaCacheProvider};

use crate::config::{
    AppConfig, EmbeddingConfig, EmbeddingProviderKind, LanguageModelConfig, LanguageModelKind,
};

/// Factory for creating embedding providers
pub struct EmbeddingProviderFactory;

impl EmbeddingProviderFactory {
    /// Create the configured embedding provider
    ///
    /// `store_dimensions` sizes the null provider when the embedding section
    /// does not set its own dimension.
    pub fn create(
        config: &EmbeddingConfig,
        store_dimensions: usize,
    ) -> Result<Arc<dyn EmbeddingProvider>> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let provider: Arc<dyn EmbeddingProvider> = match config.provider {
            EmbeddingProviderKind::OpenAI => {
                let client = HttpClientConfig::with_timeout(timeout).build_client()?;
                Arc::new(OpenAIEmbeddingProvider::new(
                    config.api_key.as_deref(),
                    config.base_url.as_deref(),
                    config.model.clone(),
                    timeout,
                    client,
                )?)
            }
            EmbeddingProviderKind::Ollama => {
                let client = HttpClientConfig::with_timeout(timeout).build_client()?;
                Arc::new(OllamaEmbeddingProvider::new(
                    config.base_url.as_deref(),
                    config.model.clone(),
                    timeout,
                    client,
                ))
            }
            EmbeddingProviderKind::Null => Arc::new(NullEmbeddingProvider::with_dimensions(
                config.dimensions.unwrap_or(store_dimensions),
            )),
        };
        debug!(provider = provider.provider_name(), "Embedding provider created");
        Ok(provider)
    }
}

/// Factory for creating language models
pub struct LanguageModelFactory;

impl LanguageModelFactory {
    /// Create the configured language model
    pub fn create(config: &LanguageModelConfig) -> Result<Arc<dyn LanguageModel>> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = HttpClientConfig::with_timeout(timeout).build_client()?;
        let model: Arc<dyn LanguageModel> = match config.provider {
            LanguageModelKind::OpenAI => Arc::new(OpenAIChatModel::new(
                config.api_key.as_deref(),
                config.base_url.as_deref(),
                config.model.clone(),
                config.temperature,
                timeout,
                client,
            )?),
            LanguageModelKind::Ollama => Arc::new(OllamaChatModel::new(
                config.base_url.as_deref(),
                config.model.clone(),
                config.temperature,
                timeout,
                client,
            )),
        };
        debug!(provider = model.provider_name(), "Language model created");
        Ok(model)
    }
}

/// Application context built from configuration
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Embedding provider whose dimension matches the vector store
    pub fn embedder(&self) -> Result<Arc<dyn EmbeddingProvider>> {
        let expected = self.config.vector_store.dimensions;
        let embedder = EmbeddingProviderFactory::create(&self.config.embedding, expected)?;
        if embedder.dimensions() != expected {
            return Err(Error::dimension_mismatch(expected, embedder.dimensions()));
        }
        Ok(embedder)
    }

    /// Language model used by every use case
    pub fn language_model(&self) -> Result<Arc<dyn LanguageModel>> {
        LanguageModelFactory::create(&self.config.language_model)
    }

    /// Connect the configured backend and return a partition factory
    pub async fn vector_stores(&self) -> Result<Arc<VectorBackendFactory>> {
        let settings = &self.config.vector_store;
        let embedder = self.embedder()?;
        let backend = VectorBackend::connect(settings).await?;
        Ok(Arc::new(VectorBackendFactory::new(
            backend,
            embedder,
            settings.dimensions,
            settings.upsert_batch_size,
        )))
    }

    /// Open one partition of the configured backend
    pub async fn open_partition(&self, collection: &str) -> Result<Arc<dyn VectorStoreProvider>> {
        self.vector_stores()
            .await?
            .open(Partition::new(collection)?)
            .await
    }

    /// Local store at the configured base path, or at `base_path`
    pub fn local_store(&self, base_path: Option<PathBuf>) -> Arc<LocalStore> {
        let path = base_path.unwrap_or_else(|| self.config.vector_store.local.base_path.clone());
        Arc::new(LocalStore::new(path))
    }

    /// Answer pipeline with one handler per intent
    pub async fn pipeline(&self) -> Result<HealthcarePipeline> {
        let pipeline_config = &self.config.pipeline;
        let model = self.language_model()?;
        let stores = self.vector_stores().await?;

        let mut partitions: HashMap<String, Arc<dyn VectorStoreProvider>> = HashMap::new();
        let mut dispatcher = Dispatcher::new(Duration::from_secs(pipeline_config.handler_timeout_secs));
        for route in self.config.domain_routes() {
            match route.collection {
                Some(collection) => {
                    let store = match partitions.get(&collection) {
                        Some(store) => Arc::clone(store),
                        None => {
                            let store = stores.open(Partition::new(collection.as_str())?).await?;
                            partitions.insert(collection.clone(), Arc::clone(&store));
                            store
                        }
                    };
                    dispatcher.register(Arc::new(
                        RetrievalHandler::new(route.intent, store, Arc::clone(&model))
                            .with_top_k(route.top_k),
                    ));
                }
                None => {
                    dispatcher.register(Arc::new(ModelHandler::new(route.intent, Arc::clone(&model))));
                }
            }
        }

        let cache = Arc::new(MokaCacheProvider::with_capacity(pipeline_config.intent_cache_capacity));
        let classifier = IntentClassifier::new(Arc::clone(&model), cache)
            .with_max_intents(pipeline_config.max_intents);

        info!(
            backend = stores.backend_name(),
            partitions = partitions.len(),
            model = model.provider_name(),
            "Pipeline ready"
        );
        Ok(HealthcarePipeline::new(
            Arc::new(classifier),
            Arc::new(dispatcher),
            ResponseFusion::new(Arc::clone(&model)),
            ResponseValidator::new(model),
        ))
    }

    /// Document analyzer bounded by the configured timeout
    pub fn analyzer(&self) -> Result<DocumentAnalyzer> {
        Ok(DocumentAnalyzer::with_timeout(
            self.language_model()?,
            Duration::from_secs(self.config.pipeline.analysis_timeout_secs),
        ))
    }

    /// Migration from a local store into the configured backend
    pub async fn migration(&self, source_path: Option<PathBuf>) -> Result<MigrationService> {
        let source = self.local_store(source_path);
        let target = self.vector_stores().await?;
        if let VectorBackend::Local(store) = target.backend() {
            if store.base_path() == source.base_path() {
                return Err(Error::invalid_argument(
                    "Migration source and target are the same local store",
                ));
            }
        }
        Ok(MigrationService::new(source, target)
            .with_batch_size(self.config.vector_store.upsert_batch_size))
    }
}
