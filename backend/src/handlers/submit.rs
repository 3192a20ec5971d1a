//! HTTP handlers for the business submission page

use axum::{extract::State, Json};
use shared::SubmitFormValues;

use crate::error::AppResult;
use crate::services::{OptionLoader, SubmissionReceipt, SubmissionService, SubmitPageProps};
use crate::AppState;

/// Get the submission page's option lists
pub async fn get_submit_page(State(state): State<AppState>) -> AppResult<Json<SubmitPageProps>> {
    let loader = OptionLoader::new(state.content.clone(), state.site.clone());
    let props = loader.load().await?;
    Ok(Json(props))
}

/// Validate and forward a business submission
pub async fn submit_business(
    State(state): State<AppState>,
    Json(values): Json<SubmitFormValues>,
) -> AppResult<Json<SubmissionReceipt>> {
    let service = SubmissionService::new(
        state.submission.clone(),
        state.site.clone(),
        state.config.site.contact_email.clone(),
    );
    let receipt = service.submit(values).await?;
    Ok(Json(receipt))
}
