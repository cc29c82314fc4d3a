//! Application Layer - Pran
//!
//! Use cases of the healthcare retrieval and orchestration layer. Every
//! external capability is reached through the ports of `pran-domain`;
//! concrete providers are wired by `pran-infrastructure`.
//!
//! ## Use Cases
//!
//! - Joint safety and intent classification with a bounded intent cache
//! - Concurrent dispatch to domain handlers with per-handler timeouts
//! - Fusion of domain answers that keeps source citations
//! - Post-hoc response validation (fail-open)
//! - Document analysis and collection migration
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `pran-domain`: For value objects, errors and port traits
//! - Pure Rust libraries for async, serialization, etc.

pub mod handlers;
pub mod prompts;
pub mod structured;
pub mod use_cases;

pub use handlers::{ModelHandler, RetrievalHandler, default_collection};
pub use use_cases::*;
