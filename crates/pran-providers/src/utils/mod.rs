//! Shared utilities for provider implementations

/// HTTP response handling
pub mod http_response;
/// JSON value accessors
pub mod json;

pub use http_response::{HttpResponseUtils, ServiceKind};
pub use json::JsonExt;
