//! Static page resolution for business detail pages

use std::sync::Arc;

use shared::{BusinessDoc, BusinessPage, SiteContext, StaticPaths};

use crate::error::AppResult;
use crate::external::{ContentBackend, SearchFilter, SearchIndex};

/// Resolves business detail pages and enumerates their routes
#[derive(Clone)]
pub struct PageResolver {
    content: Arc<dyn ContentBackend>,
    search: Arc<dyn SearchIndex>,
    site: SiteContext,
}

impl PageResolver {
    pub fn new(
        content: Arc<dyn ContentBackend>,
        search: Arc<dyn SearchIndex>,
        site: SiteContext,
    ) -> Self {
        Self {
            content,
            search,
            site,
        }
    }

    /// First search hit whose slug matches exactly, or `None`
    ///
    /// A missing business is an ordinary outcome; only collaborator failures
    /// are errors.
    pub async fn resolve_business_by_slug(&self, slug: &str) -> AppResult<Option<BusinessDoc>> {
        self.content.prepare(&self.site).await?;

        let filter = SearchFilter::new()
            .eq("slug", slug)
            .eq("site", self.site.id.clone());
        let hits = self.search.search("", &filter).await?;

        if hits.len() > 1 {
            tracing::warn!(slug, hits = hits.len(), "slug matched more than one business");
        }

        Ok(hits.into_iter().next())
    }

    /// Detail page props, `None` renders the not-found page
    pub async fn business_page(&self, slug: &str) -> AppResult<Option<BusinessPage>> {
        Ok(self
            .resolve_business_by_slug(slug)
            .await?
            .map(BusinessPage::new))
    }

    /// Route parameters for every current-site listing
    pub async fn list_all_slugs(&self) -> AppResult<StaticPaths> {
        self.content.prepare(&self.site).await?;

        let items = self.content.current_site_items(&self.site).await?;
        let paths = StaticPaths::from_records(&items);

        tracing::info!(length = paths.len(), "prepared static business item paths");
        Ok(paths)
    }
}
