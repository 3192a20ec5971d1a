//! Common types used across the directory

use serde::{Deserialize, Serialize};

/// The regional site instance every collaborator call is scoped to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteContext {
    /// Content backend identifier of the site
    pub id: String,
    /// Human readable region, e.g. "Ottawa"
    pub region_name: String,
}

impl SiteContext {
    pub fn new(id: impl Into<String>, region_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            region_name: region_name.into(),
        }
    }
}
