//! Together Apart - business directory site
//!
//! Serves page data for the directory: business detail pages resolved from
//! the search index, route enumeration from the content backend, and the
//! business submission form's options and submission pipeline.

use std::sync::Arc;

use axum::{routing::get, Router};
use shared::SiteContext;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};

use external::{ContentBackend, SearchIndex, SubmissionApi};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub site: SiteContext,
    pub content: Arc<dyn ContentBackend>,
    pub search: Arc<dyn SearchIndex>,
    pub submission: Arc<dyn SubmissionApi>,
}

impl AppState {
    /// State wired to the production HTTP collaborators
    pub fn from_config(config: Config) -> Self {
        let content = external::WebflowClient::from_config(&config.content);
        let search = external::AlgoliaClient::from_config(&config.search);
        let submission = external::HttpSubmissionClient::new(config.submission.endpoint.clone());

        Self {
            site: config.site.context(),
            config: Arc::new(config),
            content: Arc::new(content),
            search: Arc::new(search),
            submission: Arc::new(submission),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Together Apart directory API v1"
}
