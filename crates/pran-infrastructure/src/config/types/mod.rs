//! Configuration types module

pub mod app;
pub mod logging;
pub mod pipeline;
pub mod providers;

// Re-export main types
pub use app::*;
pub use logging::*;
pub use pipeline::*;
pub use providers::*;
