//! Health check handlers.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use crate::dto::response::{DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /health — liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP".to_string(),
        timestamp: Utc::now(),
    })
}

/// GET /api/health/detailed — component reachability.
pub async fn health_detailed(State(state): State<AppState>) -> Json<DetailedHealthResponse> {
    let database = match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
    {
        Ok(1) => "connected",
        _ => "unreachable",
    };

    let storage = match state.storage.health_check().await {
        Ok(true) => "available",
        _ => "unavailable",
    };

    let status = if database == "connected" && storage == "available" {
        "UP"
    } else {
        "DEGRADED"
    };

    Json(DetailedHealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        storage: storage.to_string(),
    })
}
