//! HTTP router construction.
//!
//! Assembles all Axum routes, middleware, and OpenAPI docs into a single `Router`.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::api::{self, contents};
use crate::live;
use crate::state::AppState;

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.server.max_upload_bytes();
    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/health", get(api::health))
        .route("/api/config", get(api::config_summary))
        .route(
            "/api/contents/classify",
            post(contents::classify_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/contents/upload",
            post(contents::upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Static segments MUST precede /{id}
        .route("/api/contents/ws", get(live::contents_ws))
        .route("/api/contents", get(contents::list_contents))
        .route(
            "/api/contents/{id}",
            get(contents::get_content)
                .patch(contents::update_content)
                .delete(contents::delete_content),
        )
        .layer(cors)
        .with_state(state)
        .merge(Scalar::with_url("/docs", api::doc::ApiDoc::openapi()))
}

fn cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::permissive();
    }
    match HeaderValue::from_str(origin) {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(e) => {
            warn!("Invalid CORS_ORIGIN '{}': {}; allowing any origin", origin, e);
            CorsLayer::permissive()
        }
    }
}
