//! Route definitions for the Together Apart site

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/businesses", business_routes())
        .route(
            "/submit-a-business",
            get(handlers::get_submit_page).post(handlers::submit_business),
        )
}

/// Business detail page routes
fn business_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_business_paths))
        .route("/:slug", get(handlers::get_business_page))
}
