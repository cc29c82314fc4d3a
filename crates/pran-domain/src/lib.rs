//! # Domain Layer
//!
//! Core types of Pran, the healthcare retrieval and orchestration layer.
//! This crate has no I/O: it defines the error taxonomy, the value objects
//! passed between components and the ports that providers implement.
//!
//! ## Organization
//!
//! - **error** - Single error enum and `Result` alias
//! - **constants** - Domain constants (batch sizes, timeouts, limits)
//! - **value_objects** - Documents, partitions, classifications, verdicts
//! - **ports** - Embedding, language model, vector store, cache and handler traits

/// Domain-level constants
pub mod constants;
/// Error handling types
pub mod error;
/// Port interfaces
pub mod ports;
/// Value objects
pub mod value_objects;

pub use error::{Error, Result};
pub use value_objects::*;
