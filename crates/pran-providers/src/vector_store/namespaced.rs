//! Shared-index namespaced backend
//!
//! All partitions live in one index; each partition is a namespace derived
//! from its collection name (see [`Partition::namespace`]). Content is kept
//! in record metadata under the reserved `text` key.
//!
//! Wire calls (Pinecone REST):
//!
//! - control plane `GET /indexes/{name}` and, on 404, `POST /indexes`
//! - data plane `POST /vectors/upsert`, `POST /query`, `POST /describe_index_stats`
//!
//! [`Partition::namespace`]: pran_domain::value_objects::Partition::namespace

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use pran_domain::error::{Error, Result};
use pran_domain::ports::providers::SearchFilter;
use pran_domain::value_objects::{Metadata, SearchResult};

use crate::constants::{CONTENT_TYPE_JSON, NAMESPACED_API_VERSION};
use crate::utils::{HttpResponseUtils, JsonExt, ServiceKind};
use crate::vector_store::adapter::VectorRecord;
use crate::vector_store::config::NamespacedSettings;

const PROVIDER: &str = "namespaced";

#[derive(Debug, Serialize)]
struct UpsertVector<'a> {
    id: &'a str,
    values: &'a [f32],
    metadata: Metadata,
}

#[derive(Debug, Serialize)]
struct UpsertRequest<'a> {
    vectors: Vec<UpsertVector<'a>>,
    namespace: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    namespace: &'a str,
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
    include_values: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct QueryMatch {
    #[serde(default)]
    score: f64,
    #[serde(default)]
    metadata: Metadata,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

/// Client for one shared index
pub struct NamespacedIndex {
    http_client: Client,
    api_key: String,
    host: String,
    index_name: String,
    timeout: Duration,
}

impl NamespacedIndex {
    /// Connect to the shared index, creating it when it does not exist
    ///
    /// With `index_host` configured the control plane is not contacted; the
    /// dimension is then checked against the data plane's index stats.
    pub async fn connect(
        settings: &NamespacedSettings,
        dimensions: usize,
        http_client: Client,
        timeout: Duration,
    ) -> Result<Self> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::config("namespaced vector store requires an api_key"))?
            .to_string();

        let configured = settings.index_host.as_deref().filter(|h| !h.trim().is_empty());
        let host = match configured {
            Some(host) => normalize_host(host),
            None => {
                let control = ControlPlane {
                    http_client: &http_client,
                    api_key: &api_key,
                    base_url: settings.control_plane_url.trim_end_matches('/'),
                    timeout,
                };
                control.resolve_host(settings, dimensions).await?
            }
        };

        let index = Self {
            http_client,
            api_key,
            host,
            index_name: settings.index_name.clone(),
            timeout,
        };
        if configured.is_some() {
            index.verify_dimension(dimensions).await?;
        }

        info!(index = %index.index_name, host = %index.host, "Connected to shared index");
        Ok(index)
    }

    /// Name of the shared index
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Data-plane host
    pub fn host(&self) -> &str {
        &self.host
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http_client
            .post(format!("{}{path}", self.host))
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", NAMESPACED_API_VERSION)
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request
            .send()
            .await
            .map_err(|e| {
                HttpResponseUtils::send_error(e, PROVIDER, ServiceKind::VectorStore, self.timeout)
            })?;
        HttpResponseUtils::check_and_parse(response, PROVIDER, ServiceKind::VectorStore).await
    }

    async fn verify_dimension(&self, dimensions: usize) -> Result<()> {
        let stats = self
            .send(self.post("/describe_index_stats").json(&json!({})))
            .await?;
        match stats.get("dimension").and_then(Value::as_u64) {
            Some(existing) => check_dimension(existing, dimensions),
            None => Ok(()),
        }
    }

    /// Upsert one chunk of records into a namespace
    pub async fn upsert(&self, namespace: &str, records: &[VectorRecord]) -> Result<()> {
        let body = UpsertRequest {
            vectors: records
                .iter()
                .map(|r| UpsertVector {
                    id: &r.id,
                    values: &r.values,
                    metadata: r.payload(),
                })
                .collect(),
            namespace,
        };
        let response = self.send(self.post("/vectors/upsert").json(&body)).await?;
        debug!(
            namespace,
            upserted = response.u64_or("upsertedCount", records.len() as u64),
            "Namespace upsert"
        );
        Ok(())
    }

    /// Query a namespace
    pub async fn query(
        &self,
        namespace: &str,
        vector: &[f32],
        k: usize,
        filter: Option<&SearchFilter>,
    ) -> Result<Vec<SearchResult>> {
        let body = QueryRequest {
            namespace,
            vector,
            top_k: k,
            include_metadata: true,
            include_values: false,
            filter: filter.and_then(equality_filter),
        };
        let response = self.send(self.post("/query").json(&body)).await?;
        let parsed: QueryResponse = serde_json::from_value(response)
            .map_err(|e| Error::vector_db(format!("Invalid query response: {e}")))?;

        Ok(parsed
            .matches
            .into_iter()
            .map(|m| SearchResult::from_payload(m.metadata, m.score))
            .collect())
    }

    /// Record count of one namespace; 0 when the namespace does not exist
    pub async fn count(&self, namespace: &str) -> Result<u64> {
        let stats = self
            .send(self.post("/describe_index_stats").json(&json!({})))
            .await?;
        Ok(stats["namespaces"][namespace].u64_or("vectorCount", 0))
    }
}

struct ControlPlane<'a> {
    http_client: &'a Client,
    api_key: &'a str,
    base_url: &'a str,
    timeout: Duration,
}

impl ControlPlane<'_> {
    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("Api-Key", self.api_key)
            .header("X-Pinecone-API-Version", NAMESPACED_API_VERSION)
            .timeout(self.timeout)
    }

    async fn describe(&self, name: &str) -> Result<Option<Value>> {
        let response = self
            .request(self.http_client.get(format!("{}/indexes/{name}", self.base_url)))
            .send()
            .await
            .map_err(|e| {
                HttpResponseUtils::send_error(e, PROVIDER, ServiceKind::VectorStore, self.timeout)
            })?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        HttpResponseUtils::check_and_parse(response, PROVIDER, ServiceKind::VectorStore)
            .await
            .map(Some)
    }

    async fn create(&self, settings: &NamespacedSettings, dimensions: usize) -> Result<Value> {
        let body = json!({
            "name": settings.index_name,
            "dimension": dimensions,
            "metric": "cosine",
            "spec": {"serverless": {"cloud": settings.cloud, "region": settings.region}}
        });
        let response = self
            .request(self.http_client.post(format!("{}/indexes", self.base_url)))
            .header("Content-Type", CONTENT_TYPE_JSON)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                HttpResponseUtils::send_error(e, PROVIDER, ServiceKind::VectorStore, self.timeout)
            })?;
        HttpResponseUtils::check_and_parse(response, PROVIDER, ServiceKind::VectorStore).await
    }

    async fn resolve_host(&self, settings: &NamespacedSettings, dimensions: usize) -> Result<String> {
        let description = match self.describe(&settings.index_name).await? {
            Some(description) => description,
            None => {
                warn!(index = %settings.index_name, dimensions, "Shared index not found, creating it");
                let created = self.create(settings, dimensions).await?;
                if created.opt_str("host").is_some() {
                    created
                } else {
                    self.describe(&settings.index_name).await?.unwrap_or(created)
                }
            }
        };

        if let Some(existing) = description.get("dimension").and_then(Value::as_u64) {
            check_dimension(existing, dimensions)?;
        }

        description
            .opt_str("host")
            .filter(|h| !h.is_empty())
            .map(normalize_host)
            .ok_or_else(|| {
                Error::transient(PROVIDER, format!("index '{}' has no host yet", settings.index_name))
            })
    }
}

fn check_dimension(existing: u64, dimensions: usize) -> Result<()> {
    let existing = usize::try_from(existing).unwrap_or(usize::MAX);
    if existing == dimensions {
        Ok(())
    } else {
        Err(Error::dimension_mismatch(existing, dimensions))
    }
}

fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}

/// Translate a flat equality filter into `{key: {"$eq": value}}` form
///
/// Values the index cannot match on (null, arrays, objects) are dropped.
fn equality_filter(filter: &SearchFilter) -> Option<Value> {
    let clauses: serde_json::Map<String, Value> = filter
        .iter()
        .filter(|(key, value)| {
            let usable = value.is_string() || value.is_number() || value.is_boolean();
            if !usable {
                debug!(key = %key, "Ignoring non-scalar filter value");
            }
            usable
        })
        .map(|(key, value)| (key.clone(), json!({"$eq": value})))
        .collect();
    (!clauses.is_empty()).then_some(Value::Object(clauses))
}
