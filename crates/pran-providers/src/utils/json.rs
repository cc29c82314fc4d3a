//! JSON Value Extension
//!
//! Provides convenient accessor methods for JSON values with default fallbacks.

use std::collections::HashMap;

/// Extension trait for serde_json::Value with convenient accessor methods
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use pran_providers::utils::JsonExt;
///
/// let stats = json!({"namespaces": {"yoga-collection": {"vectorCount": 42}}});
/// let ns = &stats["namespaces"]["yoga-collection"];
/// assert_eq!(ns.u64_or("vectorCount", 0), 42);
/// assert!(ns.opt_str("name").is_none());
/// ```
pub trait JsonExt {
    /// Get u64 value or default
    fn u64_or(&self, key: &str, default: u64) -> u64;

    /// Get bool value or default
    fn bool_or(&self, key: &str, default: bool) -> bool;

    /// Get optional string
    fn opt_str(&self, key: &str) -> Option<&str>;
}

/// Internal trait for types that can be used as JSON-like containers
trait JsonContainer {
    fn get_value(&self, key: &str) -> Option<&serde_json::Value>;
}

impl JsonContainer for serde_json::Value {
    #[inline]
    fn get_value(&self, key: &str) -> Option<&serde_json::Value> {
        self.get(key)
    }
}

impl JsonContainer for HashMap<String, serde_json::Value> {
    #[inline]
    fn get_value(&self, key: &str) -> Option<&serde_json::Value> {
        self.get(key)
    }
}

/// Macro to implement JsonExt for types that implement JsonContainer
macro_rules! impl_json_ext {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl JsonExt for $ty {
                #[inline]
                fn u64_or(&self, key: &str, default: u64) -> u64 {
                    self.get_value(key).and_then(|v| v.as_u64()).unwrap_or(default)
                }

                #[inline]
                fn bool_or(&self, key: &str, default: bool) -> bool {
                    self.get_value(key).and_then(|v| v.as_bool()).unwrap_or(default)
                }

                #[inline]
                fn opt_str(&self, key: &str) -> Option<&str> {
                    self.get_value(key).and_then(|v| v.as_str())
                }
            }
        )+
    };
}

impl_json_ext!(serde_json::Value, HashMap<String, serde_json::Value>);
