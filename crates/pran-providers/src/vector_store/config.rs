//! Vector store backend settings
//!
//! Deserialized as the `[vector_store]` section of the application
//! configuration. Credentials are optional here; the selected backend
//! checks them when it is constructed.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use pran_domain::constants::{DEFAULT_SHARED_INDEX_NAME, UPSERT_BATCH_SIZE};
use pran_domain::error::Error;
use serde::{Deserialize, Serialize};

use crate::constants::{
    NAMESPACED_DEFAULT_CLOUD, NAMESPACED_DEFAULT_CONTROL_PLANE_URL, NAMESPACED_DEFAULT_REGION,
};

/// Backend variant selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Namespaces inside one shared index
    #[serde(alias = "pinecone")]
    Namespaced,
    /// One collection per partition
    #[serde(alias = "qdrant")]
    Collection,
    /// Local directory per collection
    #[default]
    #[serde(alias = "chroma")]
    Local,
}

impl BackendKind {
    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Namespaced => "namespaced",
            BackendKind::Collection => "collection",
            BackendKind::Local => "local",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "namespaced" | "pinecone" => Ok(BackendKind::Namespaced),
            "collection" | "qdrant" => Ok(BackendKind::Collection),
            "local" | "chroma" => Ok(BackendKind::Local),
            other => Err(Error::config(format!("unknown vector store backend '{other}'"))),
        }
    }
}

/// Shared-index backend settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespacedSettings {
    /// API key (required)
    pub api_key: Option<String>,
    /// Name of the shared index
    pub index_name: String,
    /// Data-plane host; resolved through the control plane when absent
    pub index_host: Option<String>,
    /// Control-plane base URL
    pub control_plane_url: String,
    /// Serverless cloud used when the index must be created
    pub cloud: String,
    /// Serverless region used when the index must be created
    pub region: String,
}

impl Default for NamespacedSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            index_name: DEFAULT_SHARED_INDEX_NAME.to_string(),
            index_host: None,
            control_plane_url: NAMESPACED_DEFAULT_CONTROL_PLANE_URL.to_string(),
            cloud: NAMESPACED_DEFAULT_CLOUD.to_string(),
            region: NAMESPACED_DEFAULT_REGION.to_string(),
        }
    }
}

/// Per-collection backend settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionSettings {
    /// Service URL (required)
    pub url: Option<String>,
    /// API key (required)
    pub api_key: Option<String>,
}

/// Local store settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalSettings {
    /// Directory holding one sub-directory per collection
    pub base_path: PathBuf,
}

impl Default for LocalSettings {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("./data/vectors"),
        }
    }
}

/// Vector store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorStoreSettings {
    /// Selected backend variant
    pub backend: BackendKind,
    /// Vector dimension every embedding must have
    pub dimensions: usize,
    /// Records per upsert call for remote backends
    pub upsert_batch_size: usize,
    /// Request timeout for remote backends, in seconds
    pub timeout_secs: u64,
    /// Shared-index backend
    pub namespaced: NamespacedSettings,
    /// Per-collection backend
    pub collection: CollectionSettings,
    /// Local backend
    pub local: LocalSettings,
}

impl Default for VectorStoreSettings {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            dimensions: 384,
            upsert_batch_size: UPSERT_BATCH_SIZE,
            timeout_secs: 30,
            namespaced: NamespacedSettings::default(),
            collection: CollectionSettings::default(),
            local: LocalSettings::default(),
        }
    }
}
