//! Document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::DocumentStatus;

/// A tracked uploaded document plus its metadata and lifecycle state.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    /// Unique document identifier, immutable, assigned at creation.
    pub id: Uuid,
    /// The document name (including extension).
    pub name: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// MIME type of the file.
    pub content_type: Option<String>,
    /// The path within the storage provider.
    pub storage_path: String,
    /// Lifecycle status.
    pub status: DocumentStatus,
    /// Upload/processing progress, 0-100.
    pub progress: i32,
    /// Tags (set semantics; insertion order preserved for display).
    pub tags: Vec<String>,
    /// Optional single category label.
    pub category: Option<String>,
    /// Whether the document is marked as a favorite.
    pub is_favorite: bool,
    /// Whether the stored file is encrypted at rest.
    pub is_encrypted: bool,
    /// Encryption bookkeeping (algorithm, key id) when encrypted.
    pub encryption_metadata: Option<serde_json::Value>,
    /// Open key/value metadata map (JSON), shallow-merged on update.
    pub metadata: Option<serde_json::Value>,
    /// Structured validation judgment (JSON), if the document was validated.
    pub validation_result: Option<serde_json::Value>,
    /// Version number the document currently points at.
    pub current_version: i32,
    /// When the document was created (upload time).
    pub created_at: DateTime<Utc>,
    /// When the document was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
    }

    /// Path of the sidecar encryption-metadata file, when encrypted.
    pub fn encryption_sidecar_path(&self) -> Option<String> {
        self.is_encrypted
            .then(|| format!("{}.meta", self.storage_path))
    }
}

/// Data required to create a new document record.
///
/// The identifier is generated by the service before insert so the
/// storage path can be derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocument {
    /// Pre-generated document identifier.
    pub id: Uuid,
    /// The document name.
    pub name: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// MIME type.
    pub content_type: Option<String>,
    /// The path within the storage provider.
    pub storage_path: String,
    /// Initial tags.
    pub tags: Vec<String>,
    /// Category label.
    pub category: Option<String>,
    /// Whether the stored file is encrypted.
    pub is_encrypted: bool,
    /// Encryption bookkeeping.
    pub encryption_metadata: Option<serde_json::Value>,
    /// Initial metadata.
    pub metadata: Option<serde_json::Value>,
}

/// Partial update of a document record.
///
/// `None` fields are left untouched. `metadata` is shallow-merged into
/// the existing map; every other present field replaces the stored
/// value (`tags` replaces the whole set).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDocument {
    /// New name.
    pub name: Option<String>,
    /// New MIME type.
    pub content_type: Option<String>,
    /// New category (`Some(None)` is not representable; use the empty
    /// string to clear).
    pub category: Option<String>,
    /// Replacement tag set.
    pub tags: Option<Vec<String>>,
    /// Direct status override.
    pub status: Option<DocumentStatus>,
    /// New progress value (0-100).
    pub progress: Option<i32>,
    /// Metadata entries to merge in.
    pub metadata: Option<serde_json::Value>,
    /// New validation result.
    pub validation_result: Option<serde_json::Value>,
}

impl UpdateDocument {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.content_type.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.status.is_none()
            && self.progress.is_none()
            && self.metadata.is_none()
            && self.validation_result.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document {
            id: Uuid::new_v4(),
            name: "handbook.pdf".to_string(),
            size_bytes: 2048,
            content_type: Some("application/pdf".to_string()),
            storage_path: "ab/cd/document.pdf".to_string(),
            status: DocumentStatus::Uploaded,
            progress: 100,
            tags: vec!["lore".to_string()],
            category: None,
            is_favorite: false,
            is_encrypted: false,
            encryption_metadata: None,
            metadata: None,
            validation_result: None,
            current_version: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_extension() {
        let doc = sample();
        assert_eq!(doc.extension().as_deref(), Some("pdf"));

        let mut doc = sample();
        doc.name = "README".to_string();
        assert_eq!(doc.extension(), None);
    }

    #[test]
    fn test_encryption_sidecar_only_when_encrypted() {
        let mut doc = sample();
        assert_eq!(doc.encryption_sidecar_path(), None);

        doc.is_encrypted = true;
        assert_eq!(
            doc.encryption_sidecar_path().as_deref(),
            Some("ab/cd/document.pdf.meta")
        );
    }

    #[test]
    fn test_update_is_empty() {
        assert!(UpdateDocument::default().is_empty());
        let update = UpdateDocument {
            progress: Some(50),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
