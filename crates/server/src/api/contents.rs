//! Upload-and-convert plus CRUD over stored content drafts.

use std::str::FromStr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use brightpath_core::{ContentRecord, ContentType};
use brightpath_ingest::{build_draft, convert_document, ConvertedDocument, DraftMeta};
use brightpath_store::{Direction, Filter, StoreError};

use super::{api_error, extraction_error, store_error, ApiError};
use crate::state::AppState;

const DEFAULT_AUTHOR: &str = "anonymous";

// ── Request types ────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// lesson, assessment, game, or activity.
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub category: Option<String>,
    pub created_by: Option<String>,
    pub status: Option<String>,
    /// Record field to sort by, e.g. `title` or `createdAt`.
    pub order_by: Option<String>,
    #[serde(default)]
    pub desc: bool,
    pub limit: Option<usize>,
}

struct UploadedFile {
    file_name: String,
    bytes: Bytes,
}

#[derive(Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    title: Option<String>,
    category: Option<String>,
    created_by: Option<String>,
}

// ── Helpers ──────────────────────────────────────────────────────

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(e.status(), format!("Multipart error: {}", e.body_text())))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("unnamed").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| api_error(e.status(), format!("Failed to read file: {}", e.body_text())))?;
                form.file = Some(UploadedFile { file_name, bytes });
            }
            "title" | "category" | "created_by" | "createdBy" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Invalid field '{name}': {e}")))?;
                let value = Some(text.trim().to_string()).filter(|v| !v.is_empty());
                match name.as_str() {
                    "title" => form.title = value,
                    "category" => form.category = value,
                    _ => form.created_by = value,
                }
            }
            other => debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    Ok(form)
}

/// PDF/DOCX parsing is CPU-bound; keep it off the async workers.
async fn convert(file: UploadedFile) -> Result<ConvertedDocument, ApiError> {
    let UploadedFile { file_name, bytes } = file;
    tokio::task::spawn_blocking(move || convert_document(&bytes, &file_name))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("Conversion task failed: {e}")))?
        .map_err(extraction_error)
}

fn require_file(form: &mut UploadForm) -> Result<UploadedFile, ApiError> {
    form.file
        .take()
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "No file provided"))
}

/// Equality filters over the stored record's camelCase fields.
pub(crate) fn content_filters(
    content_type: Option<&str>,
    category: Option<&str>,
    created_by: Option<&str>,
    status: Option<&str>,
) -> Result<Vec<Filter>, ApiError> {
    let mut filters = Vec::new();
    if let Some(raw) = content_type.filter(|s| !s.is_empty()) {
        let parsed = ContentType::from_str(raw)
            .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;
        filters.push(Filter::equals("type", parsed.as_str()));
    }
    if let Some(category) = category.filter(|s| !s.is_empty()) {
        filters.push(Filter::equals("category", category));
    }
    if let Some(author) = created_by.filter(|s| !s.is_empty()) {
        filters.push(Filter::equals("createdBy", author));
    }
    if let Some(status) = status.filter(|s| !s.is_empty()) {
        filters.push(Filter::equals("status", status.to_lowercase()));
    }
    Ok(filters)
}

fn not_found(id: &str) -> ApiError {
    api_error(StatusCode::NOT_FOUND, format!("Content '{id}' not found"))
}

// ── POST /api/contents/classify ──────────────────────────────────

/// Classify a document without storing anything
///
/// Accepts multipart/form-data with a `file` field (PDF, DOCX, TXT, MD).
#[utoipa::path(
    post,
    path = "/api/contents/classify",
    tag = "Contents",
    request_body(content_type = "multipart/form-data", description = "Document upload"),
    responses(
        (status = 200, description = "Extraction summary and classification", body = Object),
        (status = 400, description = "No file provided", body = super::ErrorResponse),
        (status = 422, description = "Unsupported or unreadable document", body = super::ErrorResponse)
    )
)]
pub async fn classify_upload(multipart: Multipart) -> Result<Json<ConvertedDocument>, ApiError> {
    let mut form = read_form(multipart).await?;
    let file = require_file(&mut form)?;
    Ok(Json(convert(file).await?))
}

// ── POST /api/contents/upload ────────────────────────────────────

/// Upload a document and store it as a draft
///
/// The document is extracted, classified, wrapped in the matching template,
/// and inserted into the contents collection.
#[utoipa::path(
    post,
    path = "/api/contents/upload",
    tag = "Contents",
    request_body(content_type = "multipart/form-data", description = "`file` plus optional `title`, `category`, `created_by`"),
    responses(
        (status = 201, description = "Stored draft", body = Object),
        (status = 400, description = "No file provided", body = super::ErrorResponse),
        (status = 422, description = "Unsupported or unreadable document", body = super::ErrorResponse),
        (status = 500, description = "Store failure", body = super::ErrorResponse)
    )
)]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let mut form = read_form(multipart).await?;
    let file = require_file(&mut form)?;
    let source_file = file.file_name.clone();
    let converted = convert(file).await?;

    let draft = build_draft(
        &converted.classified,
        DraftMeta {
            title: form.title,
            category: form
                .category
                .unwrap_or_else(|| state.config.content.default_category.clone()),
            created_by: form.created_by.unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            source_file,
        },
    );
    let record = draft
        .to_value()
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let id = state
        .store
        .insert(state.contents(), record)
        .await
        .map_err(store_error)?;
    let stored = state
        .store
        .get(state.contents(), &id)
        .await
        .map_err(store_error)?
        .ok_or_else(|| not_found(&id))?;

    info!(
        "Stored {} draft '{}' ({}) from '{}'",
        draft.content_type, draft.title, id, draft.source_file
    );
    Ok((StatusCode::CREATED, Json(stored)))
}

// ── GET /api/contents ────────────────────────────────────────────

/// List stored contents
#[utoipa::path(
    get,
    path = "/api/contents",
    tag = "Contents",
    params(ListParams),
    responses(
        (status = 200, description = "Matching records", body = Vec<Object>),
        (status = 400, description = "Unknown content type", body = super::ErrorResponse)
    )
)]
pub async fn list_contents(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let filters = content_filters(
        params.content_type.as_deref(),
        params.category.as_deref(),
        params.created_by.as_deref(),
        params.status.as_deref(),
    )?;

    let mut query = brightpath_store::Query::new();
    query.filters = filters;
    if let Some(field) = params.order_by.filter(|f| !f.is_empty()) {
        let direction = if params.desc { Direction::Desc } else { Direction::Asc };
        query = query.order_by(field, direction);
    }
    if let Some(limit) = params.limit {
        query = query.limit(limit);
    }

    let records = state
        .store
        .query(state.contents(), &query)
        .await
        .map_err(store_error)?;
    Ok(Json(records))
}

// ── /api/contents/{id} ───────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/contents/{id}",
    tag = "Contents",
    params(("id" = String, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Stored record", body = Object),
        (status = 404, description = "Not found", body = super::ErrorResponse)
    )
)]
pub async fn get_content(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state
        .store
        .get(state.contents(), &id)
        .await
        .map_err(store_error)?
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

/// Partially update a record
///
/// Top-level keys replace the stored ones; `id` is ignored and `updatedAt`
/// is refreshed. The merged record must still be a valid content record
/// whose `type` agrees with its payload.
#[utoipa::path(
    patch,
    path = "/api/contents/{id}",
    tag = "Contents",
    params(("id" = String, Path, description = "Content ID")),
    request_body = Object,
    responses(
        (status = 200, description = "Updated record", body = Object),
        (status = 400, description = "Invalid update", body = super::ErrorResponse),
        (status = 404, description = "Not found", body = super::ErrorResponse)
    )
)]
pub async fn update_content(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(partial): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let Value::Object(mut changes) = partial else {
        return Err(api_error(StatusCode::BAD_REQUEST, "Expected a JSON object"));
    };
    changes.remove("id");
    changes.insert("updatedAt".to_string(), json!(Utc::now()));

    // Validated under the store's write lock so a concurrent PATCH cannot
    // slip in between the check and the commit.
    let valid_content = |merged: &Value| -> Result<(), String> {
        ContentRecord::validated(merged.clone())
            .map(|_| ())
            .map_err(|e| format!("Invalid content update: {e}"))
    };
    let updated = state
        .store
        .update_checked(state.contents(), &id, Value::Object(changes), &valid_content)
        .await
        .map_err(|e| match e {
            StoreError::NotFound { .. } => not_found(&id),
            StoreError::InvalidRecord(msg) => api_error(StatusCode::BAD_REQUEST, msg),
            other => store_error(other),
        })?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/contents/{id}",
    tag = "Contents",
    params(("id" = String, Path, description = "Content ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = super::ErrorResponse)
    )
)]
pub async fn delete_content(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .store
        .delete(state.contents(), &id)
        .await
        .map_err(store_error)?;
    if deleted {
        info!("Deleted content '{}'", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&id))
    }
}
