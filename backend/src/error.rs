//! Error handling for the Together Apart site
//!
//! Provides consistent JSON error responses for the page data API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{FieldErrors, FormError, Toast};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    #[error("Invalid form state: {0}")]
    InvalidState(String),

    // External service errors
    #[error("Search index error: {0}")]
    Search(String),

    #[error("Content backend error: {0}")]
    Content(String),

    #[error("Submission failed: {}", .0.message)]
    SubmissionFailed(Toast),
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Invalid(fields) => AppError::Validation(fields),
            other => AppError::InvalidState(other.to_string()),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    /// Inline message per invalid field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
    /// Transient notice for the client to show
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toast: Option<Toast>,
}

impl ErrorDetail {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            fields: None,
            toast: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    fields: Some(fields.clone()),
                    ..ErrorDetail::new("VALIDATION_ERROR", "One or more fields are invalid")
                },
            ),
            AppError::InvalidState(msg) => (
                StatusCode::CONFLICT,
                ErrorDetail::new("INVALID_STATE", msg.clone()),
            ),
            AppError::Search(_) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail::new("SEARCH_ERROR", "The search index is unavailable"),
            ),
            AppError::Content(_) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail::new("CONTENT_ERROR", "The content backend is unavailable"),
            ),
            AppError::SubmissionFailed(toast) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    toast: Some(toast.clone()),
                    ..ErrorDetail::new("SUBMISSION_FAILED", toast.message.clone())
                },
            ),
        };

        // Expected outcomes are logged quieter than collaborator failures
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
