//! Document version handlers.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use loresmith_core::error::AppError;
use loresmith_entity::document::version::DocumentVersion;
use loresmith_service::document::version::CreateVersionParams;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// Version list payload: all versions plus the current pointer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionListResponse {
    /// Versions, newest number first.
    pub versions: Vec<DocumentVersion>,
    /// The version number the document currently points at.
    pub current_version: i32,
}

/// GET /api/documents/{id}/versions
pub async fn list_versions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VersionListResponse>>, ApiError> {
    let (versions, current_version) = state.version_service.list(id).await?;
    Ok(Json(ApiResponse::ok(VersionListResponse {
        versions,
        current_version,
    })))
}

/// POST /api/documents/{id}/versions — multipart.
///
/// Fields: `file` (optional; absent means snapshot the current
/// content), `changes`, `created_by`.
pub async fn create_version(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<DocumentVersion>>, ApiError> {
    let mut data: Option<Bytes> = None;
    let mut file_name: Option<String> = None;
    let mut changes: Option<String> = None;
    let mut created_by: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                file_name = field.file_name().map(String::from);
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            "changes" => {
                changes = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            "created_by" => {
                created_by = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let version = state
        .version_service
        .create(
            id,
            CreateVersionParams {
                data,
                file_name,
                changes,
                created_by,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(version)))
}

/// POST /api/documents/{id}/versions/{version_id}/restore
pub async fn restore_version(
    State(state): State<AppState>,
    Path((id, version_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<DocumentVersion>>, ApiError> {
    let version = state.version_service.restore(id, version_id).await?;
    Ok(Json(ApiResponse::ok(version)))
}

/// DELETE /api/documents/{id}/versions/{version_id}
pub async fn delete_version(
    State(state): State<AppState>,
    Path((id, version_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.version_service.delete(id, version_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Version deleted successfully".to_string(),
    })))
}
