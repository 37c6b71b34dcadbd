//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use loresmith_service::document::batch::TagOperation;

/// Partial document update body (`PATCH /api/documents/{id}`).
///
/// `status` is a direct override and bypasses the progress-promotion
/// rule by design.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDocumentRequest {
    /// New name.
    pub name: Option<String>,
    /// New MIME type.
    pub content_type: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// Replacement tag set.
    pub tags: Option<Vec<String>>,
    /// Direct status override (lowercase string form).
    pub status: Option<String>,
    /// New progress value (0-100).
    pub progress: Option<i32>,
    /// Metadata entries to merge in.
    pub metadata: Option<serde_json::Value>,
    /// New validation result.
    pub validation_result: Option<serde_json::Value>,
}

/// Batch delete body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BatchIdsRequest {
    /// Document IDs to operate on.
    #[validate(length(min = 1, message = "ids must not be empty"))]
    pub ids: Vec<Uuid>,
}

/// Batch favorite body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BatchFavoriteRequest {
    /// Document IDs to operate on.
    #[validate(length(min = 1, message = "ids must not be empty"))]
    pub ids: Vec<Uuid>,
    /// Favorite flag to apply.
    pub is_favorite: bool,
}

/// Batch tag update body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BatchTagsRequest {
    /// Document IDs to operate on.
    #[validate(length(min = 1, message = "ids must not be empty"))]
    pub ids: Vec<Uuid>,
    /// Tags to combine with each document's existing set.
    pub tags: Vec<String>,
    /// How to combine them.
    pub operation: TagOperation,
}
