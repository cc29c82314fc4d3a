//! Collection-per-partition backend
//!
//! Each partition maps to its own remote collection (Qdrant REST). The
//! collection is created with cosine distance on first use; content travels
//! in the point payload under the reserved `text` key.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info};

use pran_domain::error::{Error, Result};
use pran_domain::ports::providers::SearchFilter;
use pran_domain::value_objects::{Metadata, SearchResult};

use crate::constants::CONTENT_TYPE_JSON;
use crate::utils::{HttpResponseUtils, JsonExt, ServiceKind};
use crate::vector_store::adapter::VectorRecord;
use crate::vector_store::config::CollectionSettings;

const PROVIDER: &str = "collection";

#[derive(Debug, Serialize)]
struct Point<'a> {
    id: &'a str,
    vector: &'a [f32],
    payload: Metadata,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    vector: &'a [f32],
    limit: usize,
    with_payload: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ScoredPoint {
    #[serde(default)]
    score: f64,
    #[serde(default)]
    payload: Option<Metadata>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<ScoredPoint>,
}

/// Client for a collection-per-partition vector database
pub struct CollectionStore {
    http_client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl CollectionStore {
    /// Create a store client
    ///
    /// Fails with a configuration error when `url` or `api_key` is missing.
    pub fn new(settings: &CollectionSettings, http_client: Client, timeout: Duration) -> Result<Self> {
        let base_url = settings
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| Error::config("collection vector store requires a url"))?
            .trim_end_matches('/')
            .to_string();
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::config("collection vector store requires an api_key"))?
            .to_string();

        Ok(Self {
            http_client,
            base_url,
            api_key,
            timeout,
        })
    }

    /// Base URL of the database
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("api-key", &self.api_key)
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Value> {
        let response = self
            .request(builder)
            .send()
            .await
            .map_err(|e| {
                HttpResponseUtils::send_error(e, PROVIDER, ServiceKind::VectorStore, self.timeout)
            })?;
        HttpResponseUtils::check_and_parse(response, PROVIDER, ServiceKind::VectorStore).await
    }

    fn url(&self, collection: &str, path: &str) -> String {
        format!("{}/collections/{collection}{path}", self.base_url)
    }

    /// Create the collection with cosine distance when it does not exist
    ///
    /// An existing collection must have been created with `dimensions`,
    /// otherwise this fails with a dimension mismatch.
    pub async fn ensure_collection(&self, collection: &str, dimensions: usize) -> Result<()> {
        let exists = self
            .send(self.http_client.get(self.url(collection, "/exists")))
            .await?;
        if exists["result"].bool_or("exists", false) {
            let info = self.send(self.http_client.get(self.url(collection, ""))).await?;
            // Named-vector collections carry no single size
            if let Some(size) = info["result"]["config"]["params"]["vectors"]
                .get("size")
                .and_then(Value::as_u64)
            {
                let size = usize::try_from(size).unwrap_or(usize::MAX);
                if size != dimensions {
                    return Err(Error::dimension_mismatch(size, dimensions));
                }
            }
            debug!(collection, "Collection exists");
            return Ok(());
        }

        let body = json!({"vectors": {"size": dimensions, "distance": "Cosine"}});
        self.send(self.http_client.put(self.url(collection, "")).json(&body))
            .await?;
        info!(collection, dimensions, "Created collection");
        Ok(())
    }

    /// Upsert one chunk of records
    pub async fn upsert(&self, collection: &str, records: &[VectorRecord]) -> Result<()> {
        let points: Vec<Point<'_>> = records
            .iter()
            .map(|r| Point {
                id: &r.id,
                vector: &r.values,
                payload: r.payload(),
            })
            .collect();
        self.send(
            self.http_client
                .put(self.url(collection, "/points?wait=true"))
                .json(&json!({ "points": points })),
        )
        .await?;
        Ok(())
    }

    /// Nearest-neighbor search within one collection
    pub async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        k: usize,
        filter: Option<&SearchFilter>,
    ) -> Result<Vec<SearchResult>> {
        let body = SearchRequest {
            vector,
            limit: k,
            with_payload: true,
            filter: filter.and_then(must_filter),
        };
        let response = self
            .send(
                self.http_client
                    .post(self.url(collection, "/points/search"))
                    .json(&body),
            )
            .await?;
        let parsed: SearchResponse = serde_json::from_value(response)
            .map_err(|e| Error::vector_db(format!("Invalid search response: {e}")))?;

        Ok(parsed
            .result
            .into_iter()
            .map(|p| SearchResult::from_payload(p.payload.unwrap_or_default(), p.score))
            .collect())
    }

    /// Exact point count of one collection
    pub async fn count(&self, collection: &str) -> Result<u64> {
        let response = self
            .send(
                self.http_client
                    .post(self.url(collection, "/points/count"))
                    .json(&json!({"exact": true})),
            )
            .await?;
        Ok(response["result"].u64_or("count", 0))
    }
}

/// Translate a flat equality filter into a `must` clause list
///
/// Match clauses take keywords, integers and booleans; other values
/// (floats, null, arrays, objects) are dropped.
fn must_filter(filter: &SearchFilter) -> Option<Value> {
    let clauses: Vec<Value> = filter
        .iter()
        .filter(|(key, value)| {
            let usable =
                value.is_string() || value.is_i64() || value.is_u64() || value.is_boolean();
            if !usable {
                debug!(key = %key, "Ignoring unmatchable filter value");
            }
            usable
        })
        .map(|(key, value)| json!({"key": key, "match": {"value": value}}))
        .collect();
    (!clauses.is_empty()).then(|| json!({ "must": clauses }))
}
