//! Configuration management for the Together Apart site
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with TA_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::SiteContext;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Regional site this instance serves
    pub site: SiteConfig,

    /// Search index configuration
    pub search: SearchConfig,

    /// Content backend configuration
    pub content: ContentConfig,

    /// Submission endpoint configuration
    pub submission: SubmissionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Content backend site identifier
    pub id: String,

    /// Region shown in page copy, e.g. "Ottawa"
    pub region_name: String,

    /// Address shown on the submission acknowledgement
    pub contact_email: String,
}

impl SiteConfig {
    pub fn context(&self) -> SiteContext {
        SiteContext::new(self.id.clone(), self.region_name.clone())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Algolia application ID
    pub application_id: String,

    /// Search-only API key
    pub api_key: String,

    /// Index holding business documents
    pub index_name: String,

    /// Override for the API host (defaults to the application's DSN host)
    pub endpoint: Option<String>,
}

impl SearchConfig {
    pub fn base_url(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("https://{}-dsn.algolia.net", self.application_id))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    /// Webflow API endpoint
    pub endpoint: String,

    /// Webflow API token
    pub api_token: String,

    /// Collection holding business listings
    pub businesses_collection: String,

    /// Collection holding neighbourhoods
    pub locations_collection: String,

    /// Collection holding categories
    pub categories_collection: String,

    /// Seconds before a site's content is reloaded; unset keeps the first load
    #[serde(default)]
    pub refresh_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SubmissionConfig {
    /// URL the submission form POSTs to
    pub endpoint: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("TA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("site.contact_email", "hi@together-apart.ca")?
            .set_default("content.endpoint", "https://api.webflow.com")?
            .set_default("submission.endpoint", "http://localhost:3001/submit")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (TA_ prefix)
            .add_source(
                Environment::with_prefix("TA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
