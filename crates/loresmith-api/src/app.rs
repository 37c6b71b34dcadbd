//! Application builder — wires storage + state + router into a running server.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use loresmith_core::config::AppConfig;
use loresmith_core::error::AppError;
use loresmith_core::traits::storage::StorageProvider;
use loresmith_storage::local::LocalStorageProvider;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application from pre-wired state.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the LoreSmith server with the given configuration and database
/// pool. Blocks until shutdown (ctrl-c).
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    tracing::info!("Starting LoreSmith server...");

    // ── Step 1: Create data directories ──────────────────────────
    create_data_directories(&config).await?;

    // ── Step 2: Initialize storage ───────────────────────────────
    tracing::info!(root = %config.storage.local.root_path, "Initializing local storage");
    let storage: Arc<dyn StorageProvider> =
        Arc::new(LocalStorageProvider::new(&config.storage.local.root_path).await?);

    // ── Step 3: Wire repositories and services ───────────────────
    let state = AppState::new(config.clone(), db_pool, storage);

    // ── Step 4: Build and start HTTP server ──────────────────────
    let app = build_app(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("LoreSmith server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

async fn create_data_directories(config: &AppConfig) -> Result<(), AppError> {
    let dirs = [
        config.storage.data_root.clone(),
        config.storage.local.root_path.clone(),
    ];

    for dir in &dirs {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create dir '{dir}': {e}")))?;
    }

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
}
