//! Core document operations and lifecycle rules.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use loresmith_core::error::AppError;
use loresmith_core::traits::storage::StorageProvider;
use loresmith_core::types::filter::DocumentFilter;
use loresmith_core::types::pagination::{PageRequest, PageResponse};
use loresmith_database::repositories::document::DocumentRepository;
use loresmith_entity::document::metadata::DocumentMetadata;
use loresmith_entity::document::model::{Document, UpdateDocument};
use loresmith_entity::document::status::DocumentStatus;
use loresmith_storage::layout;

/// Handles document CRUD and the lifecycle rules the store does not
/// know about: progress promotion, metadata key validation, and
/// best-effort file cleanup on deletion.
#[derive(Debug, Clone)]
pub struct DocumentService {
    /// Document repository.
    repo: Arc<DocumentRepository>,
    /// File storage backend.
    storage: Arc<dyn StorageProvider>,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(repo: Arc<DocumentRepository>, storage: Arc<dyn StorageProvider>) -> Self {
        Self { repo, storage }
    }

    /// Lists documents with filters and pagination, newest first.
    pub async fn list(
        &self,
        filter: DocumentFilter,
        page: PageRequest,
    ) -> Result<PageResponse<Document>, AppError> {
        self.repo.list(&filter, &page).await
    }

    /// Gets a single document.
    pub async fn get(&self, id: Uuid) -> Result<Document, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document {id} not found")))
    }

    /// Applies a partial update.
    ///
    /// Setting progress to 100 promotes an `uploading` document to
    /// `uploaded` unless the request also sets a status explicitly.
    /// A status in the request always wins — direct overrides are a
    /// documented capability, not an accident.
    pub async fn update(&self, id: Uuid, mut update: UpdateDocument) -> Result<Document, AppError> {
        if let Some(progress) = update.progress {
            if !(0..=100).contains(&progress) {
                return Err(AppError::validation("Progress must be between 0 and 100"));
            }
        }
        if let Some(metadata) = &update.metadata {
            update.metadata = Some(DocumentMetadata::from_json_value(metadata)?.to_json_value());
        }

        if update.status.is_none() && update.progress == Some(100) {
            let current = self.get(id).await?;
            if !current.status.is_at_least_uploaded() {
                update.status = Some(DocumentStatus::Uploaded);
            }
        }

        let document = self.repo.update(id, &update).await?;
        info!(document_id = %id, "Document updated");
        Ok(document)
    }

    /// Merges entries into a document's metadata map.
    ///
    /// Keys are validated against the allow-list; existing keys are
    /// overwritten, absent keys are kept (merge, not replace).
    pub async fn update_metadata(
        &self,
        id: Uuid,
        metadata: &serde_json::Value,
    ) -> Result<Document, AppError> {
        let validated = DocumentMetadata::from_json_value(metadata)?;
        let document = self
            .repo
            .merge_metadata(id, &validated.to_json_value())
            .await?;
        info!(document_id = %id, "Document metadata merged");
        Ok(document)
    }

    /// Flips the favorite flag.
    pub async fn toggle_favorite(&self, id: Uuid) -> Result<Document, AppError> {
        self.repo.toggle_favorite(id).await
    }

    /// Marks the document as processing.
    ///
    /// The extraction pipeline itself is an external collaborator; this
    /// only records that processing has started.
    pub async fn start_processing(&self, id: Uuid) -> Result<Document, AppError> {
        // Ensure the document exists before flipping state.
        self.get(id).await?;
        let document = self
            .repo
            .update(
                id,
                &UpdateDocument {
                    status: Some(DocumentStatus::Processing),
                    progress: Some(0),
                    ..Default::default()
                },
            )
            .await?;
        info!(document_id = %id, "Document processing started");
        Ok(document)
    }

    /// Returns the document's status and progress.
    pub async fn status(&self, id: Uuid) -> Result<(DocumentStatus, i32), AppError> {
        let document = self.get(id).await?;
        Ok((document.status, document.progress))
    }

    /// Deletes a document, its versions (cascade), and its files.
    ///
    /// File removal is best-effort: a missing or undeletable file is
    /// logged and the row deletion proceeds — the database record is
    /// the source of truth and must not become un-deletable because a
    /// file went missing.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let document = self.get(id).await?;

        self.cleanup_files(&document).await;

        let removed = self.repo.delete(id).await?;
        if !removed {
            // Raced with another delete; the row is gone either way.
            warn!(document_id = %id, "Document row already removed");
        }

        info!(document_id = %id, "Document deleted");
        Ok(())
    }

    /// Best-effort removal of every file belonging to a document.
    pub(crate) async fn cleanup_files(&self, document: &Document) {
        if let Some(sidecar) = document.encryption_sidecar_path() {
            if let Err(e) = self.storage.delete(&sidecar).await {
                warn!(document_id = %document.id, error = %e, "Failed to remove encryption sidecar");
            }
        }

        let dir = layout::document_dir(document.id);
        if let Err(e) = self.storage.delete_dir(&dir).await {
            warn!(document_id = %document.id, error = %e, "Failed to remove document files");
        }
    }
}
