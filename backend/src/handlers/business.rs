//! HTTP handlers for business detail pages

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{BusinessPage, StaticPaths};

use crate::error::AppResult;
use crate::services::PageResolver;
use crate::AppState;

/// Body of the not-found page
#[derive(Debug, Serialize)]
pub struct NotFoundPage {
    pub title: String,
    pub message: String,
}

impl NotFoundPage {
    pub fn business(slug: &str) -> Self {
        Self {
            title: "Page not found".to_string(),
            message: format!("We couldn't find a business listed as \"{}\".", slug),
        }
    }
}

/// Either the detail page or the not-found page
pub enum BusinessPageResponse {
    Found(BusinessPage),
    NotFound(NotFoundPage),
}

impl IntoResponse for BusinessPageResponse {
    fn into_response(self) -> Response {
        match self {
            BusinessPageResponse::Found(page) => Json(page).into_response(),
            BusinessPageResponse::NotFound(page) => {
                (StatusCode::NOT_FOUND, Json(page)).into_response()
            }
        }
    }
}

fn resolver(state: &AppState) -> PageResolver {
    PageResolver::new(state.content.clone(), state.search.clone(), state.site.clone())
}

/// List route parameters for every business page
pub async fn list_business_paths(State(state): State<AppState>) -> AppResult<Json<StaticPaths>> {
    let paths = resolver(&state).list_all_slugs().await?;
    Ok(Json(paths))
}

/// Get a business detail page by slug
pub async fn get_business_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<BusinessPageResponse> {
    let response = match resolver(&state).business_page(&slug).await? {
        Some(page) => BusinessPageResponse::Found(page),
        None => BusinessPageResponse::NotFound(NotFoundPage::business(&slug)),
    };
    Ok(response)
}
