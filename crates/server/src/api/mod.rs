//! HTTP API endpoint modules.
//!
//! Shared error type and store/extraction error mapping live here.

pub mod contents;
pub mod doc;
mod health;


use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::error;

use brightpath_ingest::ExtractionError;
use brightpath_store::StoreError;

// ── Shared types ─────────────────────────────────────────────────

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse { error: message.into() }))
}

pub(crate) fn store_error(e: StoreError) -> ApiError {
    match e {
        StoreError::NotFound { .. } => api_error(StatusCode::NOT_FOUND, e.to_string()),
        StoreError::InvalidRecord(_) => api_error(StatusCode::BAD_REQUEST, e.to_string()),
        StoreError::Io(_) | StoreError::Json(_) => {
            error!("Store failure: {}", e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

pub(crate) fn extraction_error(e: ExtractionError) -> ApiError {
    api_error(
        StatusCode::UNPROCESSABLE_ENTITY,
        format!("Unsupported or unreadable document: {e}"),
    )
}

// ── Re-exports ───────────────────────────────────────────────────

pub use health::{config_summary, health};
