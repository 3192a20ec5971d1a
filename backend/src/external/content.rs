//! Content backend client
//!
//! Reads the business, location and category collections from the Webflow
//! CMS API. `prepare` pages through every collection for a site and keeps the
//! site's dataset in memory; reads are served from that snapshot. Without a
//! refresh interval the snapshot is built once per process; with one, the
//! first `prepare` after it lapses reloads the site while readers keep the
//! previous snapshot.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use shared::{BusinessRecord, OptionRecord, SiteContext};
use tokio::sync::{Mutex, RwLock};

use crate::config::ContentConfig;
use crate::error::{AppError, AppResult};
use crate::external::ContentBackend;

/// Items requested per page; the API maximum
const PAGE_LIMIT: usize = 100;

/// Collection IDs the site reads from
#[derive(Debug, Clone)]
pub struct Collections {
    pub businesses: String,
    pub locations: String,
    pub categories: String,
}

/// Materialised content for one site
#[derive(Debug, Clone, Default)]
pub struct SiteDataset {
    pub items: Vec<BusinessRecord>,
    pub locations: Vec<OptionRecord>,
    pub categories: Vec<OptionRecord>,
}

struct Snapshot {
    loaded_at: Instant,
    dataset: Arc<SiteDataset>,
}

/// Per-site state; `loading` serialises loads so concurrent prepares fetch once
#[derive(Default)]
struct SiteSlot {
    loading: Mutex<()>,
    snapshot: RwLock<Option<Snapshot>>,
}

/// Webflow CMS client
#[derive(Clone)]
pub struct WebflowClient {
    client: Client,
    base_url: String,
    api_token: String,
    collections: Collections,
    refresh_after: Option<Duration>,
    sites: Arc<Mutex<HashMap<String, Arc<SiteSlot>>>>,
}

/// One page of a collection listing
#[derive(Debug, Deserialize)]
struct CollectionPage {
    items: Vec<CmsItem>,
    #[serde(default)]
    offset: usize,
    total: usize,
}

/// Collection item with the CMS publishing flags split from its fields
#[derive(Debug, Deserialize)]
struct CmsItem {
    #[serde(rename = "_archived", default)]
    archived: bool,
    #[serde(rename = "_draft", default)]
    draft: bool,
    #[serde(flatten)]
    fields: serde_json::Map<String, Value>,
}

impl CmsItem {
    fn is_published(&self) -> bool {
        !self.archived && !self.draft
    }
}

/// Published items of a page as `T`; items that do not fit `T` are skipped
fn published_items<T: DeserializeOwned>(collection_id: &str, items: Vec<CmsItem>) -> Vec<T> {
    items
        .into_iter()
        .filter(CmsItem::is_published)
        .filter_map(|item| {
            let id = item.fields.get("_id").cloned().unwrap_or(Value::Null);
            match serde_json::from_value(Value::Object(item.fields)) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(
                        collection = %collection_id,
                        item = %id,
                        error = %e,
                        "skipping malformed collection item"
                    );
                    None
                }
            }
        })
        .collect()
}

impl WebflowClient {
    /// Create a new WebflowClient
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>, collections: Collections) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: api_token.into(),
            collections,
            refresh_after: None,
            sites: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Reload a site's content on the first `prepare` after `interval`
    pub fn with_refresh_after(mut self, interval: Duration) -> Self {
        self.refresh_after = Some(interval);
        self
    }

    pub fn from_config(config: &ContentConfig) -> Self {
        let client = Self::new(
            config.endpoint.clone(),
            config.api_token.clone(),
            Collections {
                businesses: config.businesses_collection.clone(),
                locations: config.locations_collection.clone(),
                categories: config.categories_collection.clone(),
            },
        );
        match config.refresh_secs {
            Some(secs) => client.with_refresh_after(Duration::from_secs(secs)),
            None => client,
        }
    }

    async fn slot(&self, site_id: &str) -> Arc<SiteSlot> {
        let mut sites = self.sites.lock().await;
        sites.entry(site_id.to_string()).or_default().clone()
    }

    fn is_stale(&self, snapshot: &Snapshot) -> bool {
        self.refresh_after
            .map_or(false, |interval| snapshot.loaded_at.elapsed() >= interval)
    }

    /// The prepared dataset for a site
    async fn dataset(&self, site: &SiteContext) -> AppResult<Arc<SiteDataset>> {
        let slot = self.slot(&site.id).await;
        let snapshot = slot.snapshot.read().await;
        snapshot
            .as_ref()
            .map(|s| s.dataset.clone())
            .ok_or_else(|| AppError::Content(format!("content for site {} read before prepare", site.id)))
    }

    async fn load(&self, site: &SiteContext) -> AppResult<SiteDataset> {
        let items: Vec<BusinessRecord> = self
            .fetch_collection::<BusinessRecord>(&self.collections.businesses)
            .await?
            .into_iter()
            .filter(|item| item.site == site.id)
            .collect();

        let locations: Vec<OptionRecord> = self
            .fetch_collection::<OptionRecord>(&self.collections.locations)
            .await?
            .into_iter()
            .filter(|location| location.site.as_deref() == Some(site.id.as_str()))
            .collect();

        let categories = self
            .fetch_collection::<OptionRecord>(&self.collections.categories)
            .await?;

        tracing::info!(
            site = %site.id,
            items = items.len(),
            locations = locations.len(),
            categories = categories.len(),
            "content backend prepared"
        );

        Ok(SiteDataset {
            items,
            locations,
            categories,
        })
    }

    /// Read every published item of a collection, page by page
    async fn fetch_collection<T: DeserializeOwned>(&self, collection_id: &str) -> AppResult<Vec<T>> {
        let mut items = Vec::new();
        let mut offset = 0;

        loop {
            let url = format!(
                "{}/collections/{}/items?offset={}&limit={}",
                self.base_url, collection_id, offset, PAGE_LIMIT
            );

            let response = self
                .client
                .get(&url)
                .bearer_auth(&self.api_token)
                .header("accept-version", "1.0.0")
                .send()
                .await
                .map_err(|e| AppError::Content(format!("Content request failed: {}", e)))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(AppError::Content(format!(
                    "Content API error for collection {}: {} - {}",
                    collection_id, status, body
                )));
            }

            let page: CollectionPage = response.json().await.map_err(|e| {
                AppError::Content(format!("Failed to parse collection {}: {}", collection_id, e))
            })?;

            let received = page.items.len();
            items.extend(published_items::<T>(collection_id, page.items));

            offset = page.offset + received;
            if received == 0 || offset >= page.total {
                break;
            }
        }

        Ok(items)
    }
}

#[async_trait::async_trait]
impl ContentBackend for WebflowClient {
    async fn prepare(&self, site: &SiteContext) -> AppResult<()> {
        let slot = self.slot(&site.id).await;
        let _loading = slot.loading.lock().await;

        let has_snapshot = match slot.snapshot.read().await.as_ref() {
            Some(snapshot) if !self.is_stale(snapshot) => return Ok(()),
            Some(_) => true,
            None => false,
        };

        match self.load(site).await {
            Ok(dataset) => {
                *slot.snapshot.write().await = Some(Snapshot {
                    loaded_at: Instant::now(),
                    dataset: Arc::new(dataset),
                });
                Ok(())
            }
            Err(e) if has_snapshot => {
                tracing::warn!(site = %site.id, error = %e, "content refresh failed, keeping previous snapshot");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn current_site_items(&self, site: &SiteContext) -> AppResult<Vec<BusinessRecord>> {
        Ok(self.dataset(site).await?.items.clone())
    }

    async fn current_site_locations(&self, site: &SiteContext) -> AppResult<Vec<OptionRecord>> {
        Ok(self.dataset(site).await?.locations.clone())
    }

    async fn categories(&self, site: &SiteContext) -> AppResult<Vec<OptionRecord>> {
        Ok(self.dataset(site).await?.categories.clone())
    }
}
