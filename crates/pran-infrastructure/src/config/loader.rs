//! Configuration loader
//!
//! Handles loading configuration from default values, a TOML file and
//! `PRAN_` environment variables, in that order of precedence.

use std::env;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use pran_domain::error::{Error, Result};
use pran_domain::value_objects::Intent;

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
    MAX_UPSERT_BATCH_SIZE,
};
use crate::error_ext::ErrorContext;
use crate::logging::log_config_loaded;

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, or `pran.toml` discovered)
    /// 3. Environment variables with prefix (e.g., `PRAN_VECTOR_STORE__BACKEND`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        match &self.config_path {
            Some(config_path) if config_path.exists() => {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            }
            Some(config_path) => {
                return Err(Error::config(format!(
                    "Configuration file not found: {}",
                    config_path.display()
                )));
            }
            None => {
                if let Some(default_path) = Self::find_default_config_path() {
                    figment = figment.merge(Toml::file(&default_path));
                    log_config_loaded(&default_path, true);
                }
            }
        }

        // Double underscore separates nested keys so single underscores stay in names
        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;
        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;
        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;
        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(current_dir.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_logging_config(config)?;
    validate_vector_store_config(config)?;
    validate_provider_config(config)?;
    validate_pipeline_config(config)?;
    validate_domains_config(config)?;
    Ok(())
}

fn validate_logging_config(config: &AppConfig) -> Result<()> {
    crate::logging::parse_log_level(&config.logging.level).map(|_| ())
}

fn validate_vector_store_config(config: &AppConfig) -> Result<()> {
    let store = &config.vector_store;
    if store.dimensions == 0 {
        return Err(Error::config("Vector store dimensions cannot be 0"));
    }
    if !(1..=MAX_UPSERT_BATCH_SIZE).contains(&store.upsert_batch_size) {
        return Err(Error::config(format!(
            "Upsert batch size must be between 1 and {MAX_UPSERT_BATCH_SIZE}, got {}",
            store.upsert_batch_size
        )));
    }
    if store.timeout_secs == 0 {
        return Err(Error::config("Vector store timeout cannot be 0"));
    }
    Ok(())
}

fn validate_provider_config(config: &AppConfig) -> Result<()> {
    if config.embedding.timeout_secs == 0 {
        return Err(Error::config("Embedding timeout cannot be 0"));
    }
    if config.embedding.dimensions == Some(0) {
        return Err(Error::config("Embedding dimensions cannot be 0"));
    }
    if config.language_model.timeout_secs == 0 {
        return Err(Error::config("Language model timeout cannot be 0"));
    }
    if !(0.0..=2.0).contains(&config.language_model.temperature) {
        return Err(Error::config(format!(
            "Language model temperature must be between 0 and 2, got {}",
            config.language_model.temperature
        )));
    }
    Ok(())
}

fn validate_pipeline_config(config: &AppConfig) -> Result<()> {
    let pipeline = &config.pipeline;
    if pipeline.handler_timeout_secs == 0 {
        return Err(Error::config("Handler timeout cannot be 0"));
    }
    if pipeline.analysis_timeout_secs == 0 {
        return Err(Error::config("Analysis timeout cannot be 0"));
    }
    if pipeline.intent_cache_capacity == 0 {
        return Err(Error::config("Intent cache capacity cannot be 0"));
    }
    if pipeline.max_intents == 0 {
        return Err(Error::config("Maximum intents per query cannot be 0"));
    }
    if pipeline.search_top_k == 0 {
        return Err(Error::config("Search top_k cannot be 0"));
    }
    Ok(())
}

fn validate_domains_config(config: &AppConfig) -> Result<()> {
    for (name, domain) in &config.domains {
        name.parse::<Intent>()
            .map_err(|_| Error::config(format!("Unknown domain '{name}' in [domains]")))?;
        if domain.top_k == Some(0) {
            return Err(Error::config(format!("Domain '{name}' top_k cannot be 0")));
        }
    }
    Ok(())
}
