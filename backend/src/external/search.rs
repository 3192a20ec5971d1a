//! Search index client
//!
//! Queries an Algolia index of business documents over its REST API.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::BusinessDoc;

use crate::error::{AppError, AppResult};
use crate::external::SearchIndex;

/// Exact-match filter expression, ANDed clause by clause
///
/// Values are quoted and escaped, so a slug containing `"` cannot break out
/// of its clause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    clauses: Vec<(String, String)>,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `attribute` to equal `value`
    pub fn eq(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.clauses.push((attribute.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl std::fmt::Display for SearchFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (attribute, value)) in self.clauses.iter().enumerate() {
            if i > 0 {
                write!(f, " AND ")?;
            }
            write!(f, "{}:\"{}\"", attribute, escape_filter_value(value))?;
        }
        Ok(())
    }
}

fn escape_filter_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Algolia search client
#[derive(Clone)]
pub struct AlgoliaClient {
    client: Client,
    base_url: String,
    application_id: String,
    api_key: String,
    index_name: String,
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    filters: &'a str,
}

#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    hits: Vec<T>,
    #[serde(rename = "nbHits", default)]
    nb_hits: usize,
}

impl AlgoliaClient {
    /// Create a new AlgoliaClient against an explicit base URL
    pub fn new(
        base_url: impl Into<String>,
        application_id: impl Into<String>,
        api_key: impl Into<String>,
        index_name: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            application_id: application_id.into(),
            api_key: api_key.into(),
            index_name: index_name.into(),
        }
    }

    pub fn from_config(config: &crate::config::SearchConfig) -> Self {
        Self::new(
            config.base_url(),
            config.application_id.clone(),
            config.api_key.clone(),
            config.index_name.clone(),
        )
    }
}

#[async_trait::async_trait]
impl SearchIndex for AlgoliaClient {
    async fn search(&self, query: &str, filter: &SearchFilter) -> AppResult<Vec<BusinessDoc>> {
        let url = format!("{}/1/indexes/{}/query", self.base_url, self.index_name);
        let filters = filter.to_string();

        tracing::debug!(index = %self.index_name, %filters, "querying search index");

        let response = self
            .client
            .post(&url)
            .header("X-Algolia-Application-Id", &self.application_id)
            .header("X-Algolia-API-Key", &self.api_key)
            .json(&QueryRequest {
                query,
                filters: &filters,
            })
            .send()
            .await
            .map_err(|e| AppError::Search(format!("Search request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Search(format!(
                "Search API error: {} - {}",
                status, body
            )));
        }

        let data: QueryResponse<BusinessDoc> = response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("Failed to parse search response: {}", e)))?;

        tracing::debug!(hits = data.hits.len(), nb_hits = data.nb_hits, "search complete");
        Ok(data.hits)
    }
}
