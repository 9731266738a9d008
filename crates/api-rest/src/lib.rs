//! # API REST
//!
//! Reference analysis service for MediMind.
//!
//! Handles:
//! - HTTP endpoints with axum (`/`, `/health`, `/api/analyze`, `/api/diagnose`)
//! - Multipart intake uploads, bounded by a configurable body limit
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON errors, CORS)
//!
//! Uses `api-shared` for the wire contract shared with the client.

#![warn(rust_2018_idioms)]

mod config;
mod handlers;

pub use config::{
    ServerConfig, ServerConfigError, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_REST_ADDR,
    ENV_MAX_UPLOAD_BYTES, ENV_REST_ADDR,
};

use api_shared::{wire, ANALYZE_PATH, DIAGNOSE_PATH, HEALTH_PATH};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::root, handlers::health, handlers::analyze, handlers::diagnose),
    components(schemas(
        wire::RootRes,
        wire::HealthRes,
        wire::ErrorRes,
        wire::AnalyzeReq,
        wire::AnalyzeRes,
    ))
)]
pub struct ApiDoc;

/// Build the service router.
///
/// The body limit applies to the whole multipart upload.
pub fn build_router(cfg: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route(HEALTH_PATH, get(handlers::health))
        .route(ANALYZE_PATH, post(handlers::analyze))
        .route(DIAGNOSE_PATH, post(handlers::diagnose))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(cfg.max_upload_bytes()))
        .layer(CorsLayer::permissive())
}

/// Bind `cfg.addr()` and serve until the process is stopped.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails while running.
pub async fn serve(cfg: ServerConfig) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(cfg.addr()).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        max_upload_bytes = cfg.max_upload_bytes(),
        "++ Starting MediMind analysis service"
    );
    axum::serve(listener, build_router(&cfg)).await
}
