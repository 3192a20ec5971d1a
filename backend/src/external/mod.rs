//! External API integrations
//!
//! Each collaborator sits behind a trait so services can be exercised with
//! mocks; the HTTP clients below are the production implementations.

pub mod content;
pub mod search;
pub mod submission;

use async_trait::async_trait;
use shared::{BusinessDoc, BusinessRecord, OptionRecord, SiteContext, SubmissionPayload, TransportError};

use crate::error::AppResult;

pub use content::WebflowClient;
pub use search::{AlgoliaClient, SearchFilter};
pub use submission::HttpSubmissionClient;

/// Content backend holding listings, locations and categories
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentBackend: Send + Sync {
    /// Materialise the site's dataset. Idempotent; must complete before any read.
    async fn prepare(&self, site: &SiteContext) -> AppResult<()>;

    /// Every listing belonging to the site
    async fn current_site_items(&self, site: &SiteContext) -> AppResult<Vec<BusinessRecord>>;

    /// Neighbourhoods belonging to the site
    async fn current_site_locations(&self, site: &SiteContext) -> AppResult<Vec<OptionRecord>>;

    /// Categories shared by every site
    async fn categories(&self, site: &SiteContext) -> AppResult<Vec<OptionRecord>>;
}

/// Search index over business documents
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Run a free-text query restricted by a filter, hits in index order
    async fn search(&self, query: &str, filter: &SearchFilter) -> AppResult<Vec<BusinessDoc>>;
}

/// Endpoint accepting business submissions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionApi: Send + Sync {
    /// POST a submission once; no retry
    async fn submit(&self, payload: &SubmissionPayload) -> Result<(), TransportError>;
}
