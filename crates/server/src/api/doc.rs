//! OpenAPI documentation aggregator.
//!
//! Collects the `#[utoipa::path]`-annotated handlers into a single OpenAPI
//! document, served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "brightpath API",
        version = "0.1.0",
        description = "Turn uploaded teaching documents into lesson, quiz, game, and activity drafts.",
    ),
    tags(
        (name = "Health", description = "Server liveness and effective configuration"),
        (name = "Contents", description = "Document classification, draft upload, and content CRUD"),
    ),
    paths(
        crate::api::health::health,
        crate::api::health::config_summary,
        crate::api::contents::classify_upload,
        crate::api::contents::upload,
        crate::api::contents::list_contents,
        crate::api::contents::get_content,
        crate::api::contents::update_content,
        crate::api::contents::delete_content,
    ),
    components(schemas(crate::api::ErrorResponse, crate::api::health::HealthResponse))
)]
pub struct ApiDoc;
