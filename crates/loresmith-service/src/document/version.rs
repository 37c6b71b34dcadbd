//! Document versioning — create, list, restore, delete.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use loresmith_core::error::AppError;
use loresmith_core::traits::storage::StorageProvider;
use loresmith_database::repositories::document::DocumentRepository;
use loresmith_database::repositories::version::{NewVersion, VersionRepository};
use loresmith_entity::document::model::Document;
use loresmith_entity::document::version::DocumentVersion;
use loresmith_storage::layout;

/// Parameters for creating a new version.
#[derive(Debug, Clone, Default)]
pub struct CreateVersionParams {
    /// New content for this version. When absent, the document's
    /// current file is snapshotted.
    pub data: Option<Bytes>,
    /// Name of the uploaded file (for its extension), when content is
    /// supplied.
    pub file_name: Option<String>,
    /// Free-text description of the change.
    pub changes: Option<String>,
    /// Client-supplied author.
    pub created_by: Option<String>,
}

/// Manages document version history and the current-version pointer.
#[derive(Debug, Clone)]
pub struct VersionService {
    documents: Arc<DocumentRepository>,
    versions: Arc<VersionRepository>,
    storage: Arc<dyn StorageProvider>,
}

impl VersionService {
    /// Creates a new version service.
    pub fn new(
        documents: Arc<DocumentRepository>,
        versions: Arc<VersionRepository>,
        storage: Arc<dyn StorageProvider>,
    ) -> Self {
        Self {
            documents,
            versions,
            storage,
        }
    }

    /// Lists all versions of a document plus the current pointer.
    pub async fn list(&self, document_id: Uuid) -> Result<(Vec<DocumentVersion>, i32), AppError> {
        let document = self.get_document(document_id).await?;
        let versions = self.versions.find_versions(document_id).await?;
        Ok((versions, document.current_version))
    }

    /// Creates a new version and advances the current-version pointer.
    ///
    /// Numbering is append-only: the next number is one past the
    /// highest ever issued for the document, never derived from the
    /// (possibly restored) pointer. Restoring to v2 after reaching v5
    /// and then creating a version yields v6, not v3.
    pub async fn create(
        &self,
        document_id: Uuid,
        params: CreateVersionParams,
    ) -> Result<DocumentVersion, AppError> {
        let document = self.get_document(document_id).await?;

        let next = self.versions.latest_version_number(document_id).await? + 1;
        let file_name = params.file_name.as_deref().unwrap_or(&document.name);
        let storage_path = layout::version_path(document_id, next, file_name);

        let size_bytes = match params.data {
            Some(data) => {
                let len = data.len() as i64;
                self.storage.write(&storage_path, data).await?;
                len
            }
            None => {
                // Snapshot the current content.
                let data = self.storage.read_bytes(&document.storage_path).await?;
                let len = data.len() as i64;
                self.storage.write(&storage_path, data).await?;
                len
            }
        };

        let created = self
            .versions
            .create_version(NewVersion {
                document_id,
                version_number: next,
                storage_path: &storage_path,
                size_bytes,
                changes: params.changes.as_deref(),
                created_by: params.created_by.as_deref(),
            })
            .await;

        let version = match created {
            Ok(version) => version,
            Err(e) => {
                // The row never landed; drop the file we just wrote.
                if let Err(cleanup) = self.storage.delete(&storage_path).await {
                    warn!(document_id = %document_id, error = %cleanup, "Failed to remove orphaned version file");
                }
                return Err(e);
            }
        };

        info!(
            document_id = %document_id,
            version = version.version_number,
            "Document version created"
        );

        Ok(version)
    }

    /// Points the document back at an existing version.
    ///
    /// Non-destructive: later versions are kept and a subsequent new
    /// version continues numbering from the historical maximum.
    pub async fn restore(
        &self,
        document_id: Uuid,
        version_id: Uuid,
    ) -> Result<DocumentVersion, AppError> {
        self.get_document(document_id).await?;
        let version = self.get_version(document_id, version_id).await?;

        self.versions
            .set_current_version(document_id, version.version_number)
            .await?;

        info!(
            document_id = %document_id,
            version = version.version_number,
            "Document version restored"
        );

        Ok(version)
    }

    /// Deletes a single version.
    ///
    /// The version the document currently points at cannot be deleted —
    /// restore elsewhere or create a newer version first.
    pub async fn delete(&self, document_id: Uuid, version_id: Uuid) -> Result<(), AppError> {
        let document = self.get_document(document_id).await?;
        let version = self.get_version(document_id, version_id).await?;

        if version.version_number == document.current_version {
            return Err(AppError::conflict(format!(
                "Version {} is the current version and cannot be deleted",
                version.version_number
            )));
        }

        if let Err(e) = self.storage.delete(&version.storage_path).await {
            warn!(document_id = %document_id, error = %e, "Failed to remove version file");
        }

        self.versions.delete_version(document_id, version_id).await?;

        info!(
            document_id = %document_id,
            version = version.version_number,
            "Document version deleted"
        );

        Ok(())
    }

    async fn get_document(&self, document_id: Uuid) -> Result<Document, AppError> {
        self.documents
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document {document_id} not found")))
    }

    async fn get_version(
        &self,
        document_id: Uuid,
        version_id: Uuid,
    ) -> Result<DocumentVersion, AppError> {
        self.versions
            .find_version(document_id, version_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Version {version_id} not found")))
    }
}
