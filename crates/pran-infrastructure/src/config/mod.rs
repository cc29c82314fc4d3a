//! Configuration management
//!
//! `AppConfig` and its sections, plus the figment-based loader.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::*;
