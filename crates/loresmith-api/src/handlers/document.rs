//! Document CRUD, upload, and batch handlers.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use bytes::Bytes;
use uuid::Uuid;
use validator::Validate;

use loresmith_core::error::AppError;
use loresmith_entity::document::model::{Document, UpdateDocument};
use loresmith_entity::document::status::DocumentStatus;
use loresmith_service::document::upload::UploadParams;
use loresmith_service::document::validate::ValidationRules;

use crate::dto::request::{
    BatchFavoriteRequest, BatchIdsRequest, BatchTagsRequest, UpdateDocumentRequest,
};
use crate::dto::response::{
    ApiResponse, CountResponse, DocumentStatusResponse, MessageResponse, PaginatedResponse,
};
use crate::error::ApiError;
use crate::extractors::{FilterParams, PaginationParams};
use crate::state::AppState;

/// GET /api/documents
pub async fn list_documents(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<FilterParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<Document>>>, ApiError> {
    let page = state
        .document_service
        .list(filter.into_filter(), pagination.into_page_request())
        .await?;

    Ok(Json(ApiResponse::ok(page.into())))
}

/// GET /api/documents/{id}
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let document = state.document_service.get(id).await?;
    Ok(Json(ApiResponse::ok(document)))
}

/// POST /api/documents — multipart upload.
///
/// Fields: `file` (required), `metadata` (JSON object text), `category`,
/// `tags` (comma-separated).
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut data: Option<Bytes> = None;
    let mut metadata: Option<serde_json::Value> = None;
    let mut category: Option<String> = None;
    let mut tags: Vec<String> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                file_name = field.file_name().map(String::from);
                content_type = field.content_type().map(String::from);
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            "metadata" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                metadata = Some(
                    serde_json::from_str(&text)
                        .map_err(|_| AppError::validation("Invalid metadata JSON"))?,
                );
            }
            "category" => {
                category = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            "tags" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                tags = text
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect();
            }
            _ => {}
        }
    }

    let file_name = file_name.ok_or_else(|| AppError::validation("file is required"))?;
    let data = data.ok_or_else(|| AppError::validation("file data is required"))?;

    let document = state
        .upload_service
        .upload(UploadParams {
            file_name,
            content_type,
            data,
            metadata,
            category,
            tags,
        })
        .await?;

    Ok(Json(ApiResponse::ok(document)))
}

/// PATCH /api/documents/{id}
pub async fn update_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateDocumentRequest>,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let status = match req.status.as_deref() {
        Some(s) => Some(s.parse::<DocumentStatus>()?),
        None => None,
    };

    let update = UpdateDocument {
        name: req.name,
        content_type: req.content_type,
        category: req.category,
        tags: req.tags,
        status,
        progress: req.progress,
        metadata: req.metadata,
        validation_result: req.validation_result,
    };

    if update.is_empty() {
        return Err(AppError::validation("No fields to update").into());
    }

    let document = state.document_service.update(id, update).await?;
    Ok(Json(ApiResponse::ok(document)))
}

/// PATCH /api/documents/{id}/metadata
pub async fn update_metadata(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(metadata): Json<serde_json::Value>,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let document = state.document_service.update_metadata(id, &metadata).await?;
    Ok(Json(ApiResponse::ok(document)))
}

/// DELETE /api/documents/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.document_service.delete(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Document deleted successfully".to_string(),
    })))
}

/// POST /api/documents/{id}/process
pub async fn process_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let document = state.document_service.start_processing(id).await?;
    Ok(Json(ApiResponse::ok(document)))
}

/// GET /api/documents/{id}/status
pub async fn get_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DocumentStatusResponse>>, ApiError> {
    let (status, progress) = state.document_service.status(id).await?;
    Ok(Json(ApiResponse::ok(DocumentStatusResponse {
        status: status.to_string(),
        progress,
    })))
}

/// POST /api/documents/{id}/favorite
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let document = state.document_service.toggle_favorite(id).await?;
    Ok(Json(ApiResponse::ok(document)))
}

/// POST /api/documents/batch/delete
pub async fn batch_delete(
    State(state): State<AppState>,
    Json(req): Json<BatchIdsRequest>,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let count = state.batch_service.delete_documents(&req.ids).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// POST /api/documents/batch/favorite
pub async fn batch_favorite(
    State(state): State<AppState>,
    Json(req): Json<BatchFavoriteRequest>,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let count = state
        .batch_service
        .set_favorites(&req.ids, req.is_favorite)
        .await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// POST /api/documents/batch/tags
pub async fn batch_tags(
    State(state): State<AppState>,
    Json(req): Json<BatchTagsRequest>,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let count = state
        .batch_service
        .update_tags(&req.ids, &req.tags, req.operation)
        .await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// GET /api/documents/validation/rules
pub async fn validation_rules(
    State(state): State<AppState>,
) -> Json<ApiResponse<ValidationRules>> {
    Json(ApiResponse::ok(state.upload_service.rules()))
}
