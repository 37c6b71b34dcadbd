//! Document version entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An immutable snapshot of a document's content at a point in time.
///
/// Version numbers are sequential per document and never reused:
/// the next number is always `max(version_number) + 1`, independent of
/// which version the document currently points at.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DocumentVersion {
    /// Unique version identifier.
    pub id: Uuid,
    /// The document this version belongs to.
    pub document_id: Uuid,
    /// Sequential version number, unique per document.
    pub version_number: i32,
    /// Path to this version's content in storage.
    pub storage_path: String,
    /// Size in bytes.
    pub size_bytes: i64,
    /// Free-text description of what changed.
    pub changes: Option<String>,
    /// Who created this version (client-supplied; auth is external).
    pub created_by: Option<String>,
    /// When this version was created.
    pub created_at: DateTime<Utc>,
}
