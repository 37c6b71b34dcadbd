//! Route definitions for the LoreSmith HTTP API.
//!
//! All routes are organized by domain and mounted under `/api` (the
//! liveness probe stays at the root). The router receives `AppState`
//! and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(document_routes())
        .merge(version_routes())
        .merge(batch_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(build_compression_layer())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Document CRUD, upload, lifecycle
fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/documents", get(handlers::document::list_documents))
        .route("/documents", post(handlers::document::upload_document))
        .route(
            "/documents/validation/rules",
            get(handlers::document::validation_rules),
        )
        .route("/documents/{id}", get(handlers::document::get_document))
        .route("/documents/{id}", patch(handlers::document::update_document))
        .route(
            "/documents/{id}",
            delete(handlers::document::delete_document),
        )
        .route(
            "/documents/{id}/metadata",
            patch(handlers::document::update_metadata),
        )
        .route(
            "/documents/{id}/process",
            post(handlers::document::process_document),
        )
        .route("/documents/{id}/status", get(handlers::document::get_status))
        .route(
            "/documents/{id}/favorite",
            post(handlers::document::toggle_favorite),
        )
}

/// Version history and the current-version pointer
fn version_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/documents/{id}/versions",
            get(handlers::version::list_versions),
        )
        .route(
            "/documents/{id}/versions",
            post(handlers::version::create_version),
        )
        .route(
            "/documents/{id}/versions/{version_id}/restore",
            post(handlers::version::restore_version),
        )
        .route(
            "/documents/{id}/versions/{version_id}",
            delete(handlers::version::delete_version),
        )
}

/// Batch operations over document ID sets
fn batch_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/documents/batch/delete",
            post(handlers::document::batch_delete),
        )
        .route(
            "/documents/batch/favorite",
            post(handlers::document::batch_favorite),
        )
        .route("/documents/batch/tags", post(handlers::document::batch_tags))
}

/// Detailed health (component reachability)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health/detailed", get(handlers::health::health_detailed))
}
