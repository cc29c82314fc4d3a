//! # Pran
//!
//! Retrieval and answer orchestration for healthcare questions.
//!
//! A query is screened for safety, routed to one or more health domains,
//! answered by each domain over its own document partition, fused into one
//! reply with citations intact and finally checked by a validator before it
//! is returned.
//!
//! ## Example
//!
//! ```ignore
//! use pran::infrastructure::{AppContext, ConfigLoader};
//!
//! let config = ConfigLoader::new().load()?;
//! let pipeline = AppContext::new(config).pipeline().await?;
//! let answer = pipeline.answer("What yoga helps with back pain?").await?;
//! println!("{}", answer.answer);
//! ```
//!
//! ## Architecture
//!
//! - `domain` - errors, value objects and ports
//! - `application` - classifier, dispatcher, fusion, validator and pipeline
//! - `providers` - embedding, language model, vector store and cache adapters
//! - `infrastructure` - configuration, logging and wiring

pub mod cli;

/// Domain layer - core types and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use pran_domain::*;
}

/// Application layer - use cases and domain handlers
pub mod application {
    pub use pran_application::*;
}

/// Provider adapters
pub mod providers {
    pub use pran_providers::*;
}

/// Infrastructure layer - config, logging and bootstrap
pub mod infrastructure {
    pub use pran_infrastructure::*;
}

pub use application::{HealthcarePipeline, PipelineAnswer};
pub use domain::error::{Error, Result};
pub use infrastructure::{AppConfig, AppContext, ConfigLoader};
