//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use loresmith_core::types::pagination::PageResponse;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Paginated response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T: Serialize> {
    /// Items in this page.
    pub items: Vec<T>,
    /// Total item count.
    pub total: u64,
    /// Current page.
    pub page: u64,
    /// Items per page.
    pub limit: u64,
    /// Total pages.
    pub total_pages: u64,
}

impl<T: Serialize> From<PageResponse<T>> for PaginatedResponse<T> {
    fn from(page: PageResponse<T>) -> Self {
        Self {
            items: page.items,
            total: page.total_items,
            page: page.page,
            limit: page.page_size,
            total_pages: page.total_pages,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Count response for batch operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// Number of documents affected.
    pub count: u64,
}

/// Liveness probe response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status, always "UP" when the process is serving.
    pub status: String,
    /// Server time.
    pub timestamp: DateTime<Utc>,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Database status.
    pub database: String,
    /// Storage status.
    pub storage: String,
}

/// Status projection for a single document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStatusResponse {
    /// Lifecycle status.
    pub status: String,
    /// Progress, 0-100.
    pub progress: i32,
}
