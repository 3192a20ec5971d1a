//! Business listing models

use serde::{Deserialize, Serialize};

/// A business listing as stored in the content backend
///
/// Field names follow the content backend's kebab-case slugs. Optional text
/// fields are absent rather than empty when the listing never set them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct BusinessRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Unique within a site
    pub slug: String,
    #[serde(default)]
    pub description: String,
    /// Reference into the category collection
    #[serde(default)]
    pub category: Option<String>,
    /// Reference into the site's location collection
    #[serde(default)]
    pub location: Option<String>,
    /// Free-form tag labels joined with ", "
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub instagram_profile_url: Option<String>,
    #[serde(default)]
    pub facebook_page_url: Option<String>,
    #[serde(default)]
    pub twitter_profile_url: Option<String>,
    #[serde(default)]
    pub gift_card_url: Option<String>,
    #[serde(default)]
    pub online_store_url: Option<String>,
    #[serde(default)]
    pub supports_takeout: bool,
    #[serde(default)]
    pub supports_delivery: bool,
    #[serde(default)]
    pub sells_food: bool,
    #[serde(default)]
    pub order_food_url: Option<String>,
    #[serde(default)]
    pub order_groceries_url: Option<String>,
    #[serde(default)]
    pub supports_uber_eats: bool,
    #[serde(default)]
    pub supports_skip_the_dishes: bool,
    #[serde(default, rename = "supports-grubhub")]
    pub supports_grubhub: bool,
    #[serde(default)]
    pub supports_foodora: bool,
    #[serde(default, rename = "supports-doordash")]
    pub supports_doordash: bool,
    #[serde(default)]
    pub ordering_instructions: Option<String>,
    #[serde(default)]
    pub donations_url: Option<String>,
    /// Header image reference, transformed for display elsewhere
    #[serde(default)]
    pub header_image: Option<String>,
    /// Site the listing belongs to
    pub site: String,
}

/// A business document returned by the search index
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BusinessDoc {
    #[serde(rename = "objectID")]
    pub object_id: String,
    #[serde(flatten)]
    pub record: BusinessRecord,
}

/// Route parameter for one pre-generated business page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlugParam {
    pub slug: String,
}

/// Pre-generated business page routes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StaticPaths {
    pub paths: Vec<SlugParam>,
    /// Slugs missing at build time are rendered on demand
    pub fallback: bool,
}

impl StaticPaths {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a BusinessRecord>,
    {
        Self {
            paths: records
                .into_iter()
                .map(|record| SlugParam {
                    slug: record.slug.clone(),
                })
                .collect(),
            fallback: true,
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Page metadata rendered into the document head
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
}

/// Business detail page props
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BusinessPage {
    pub meta: PageMeta,
    pub business: BusinessDoc,
}

impl BusinessPage {
    pub fn new(business: BusinessDoc) -> Self {
        let meta = PageMeta {
            title: format!("{} is open during COVID-19", business.record.name),
            og_image: business.record.header_image.clone(),
        };
        Self { meta, business }
    }
}
