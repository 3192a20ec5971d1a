//! Option lists for the submission page

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::{options_from_labels, options_from_records, SelectOption, SiteContext, STATIC_TAGS};

use crate::error::AppResult;
use crate::external::ContentBackend;

/// Props for the submission page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmitPageProps {
    pub region_name: String,
    pub locations: Vec<SelectOption>,
    pub categories: Vec<SelectOption>,
    pub tag_options: Vec<SelectOption>,
}

/// Loads the submission page's select options, each sorted by label
#[derive(Clone)]
pub struct OptionLoader {
    content: Arc<dyn ContentBackend>,
    site: SiteContext,
}

impl OptionLoader {
    pub fn new(content: Arc<dyn ContentBackend>, site: SiteContext) -> Self {
        Self { content, site }
    }

    pub async fn load(&self) -> AppResult<SubmitPageProps> {
        self.content.prepare(&self.site).await?;

        let locations = self.content.current_site_locations(&self.site).await?;
        let categories = self.content.categories(&self.site).await?;

        Ok(SubmitPageProps {
            region_name: self.site.region_name.clone(),
            locations: options_from_records(&locations),
            categories: options_from_records(&categories),
            tag_options: options_from_labels(STATIC_TAGS.iter().copied()),
        })
    }
}
