//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns of Pran.
//!
//! - **config** - `AppConfig` loaded with figment (defaults, TOML, `PRAN_` env)
//! - **logging** - tracing subscriber setup
//! - **error_ext** - context extension for foreign errors
//! - **bootstrap** - composition root wiring providers into use cases

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use bootstrap::AppContext;
pub use config::{AppConfig, ConfigLoader};
