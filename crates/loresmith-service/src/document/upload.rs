//! Document upload ingestion.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{error, info};
use uuid::Uuid;

use loresmith_core::config::storage::{EncryptionConfig, StorageConfig};
use loresmith_core::error::AppError;
use loresmith_core::traits::storage::StorageProvider;
use loresmith_database::repositories::document::DocumentRepository;
use loresmith_entity::document::metadata::DocumentMetadata;
use loresmith_entity::document::model::{CreateDocument, Document, UpdateDocument};
use loresmith_entity::document::status::DocumentStatus;
use loresmith_storage::layout;

use super::validate::{UploadValidator, infer_content_type};

/// Parameters for a document upload.
#[derive(Debug, Clone)]
pub struct UploadParams {
    /// Original file name.
    pub file_name: String,
    /// Declared MIME type, if the client sent one.
    pub content_type: Option<String>,
    /// File content.
    pub data: Bytes,
    /// Optional metadata map (validated against the allow-list).
    pub metadata: Option<serde_json::Value>,
    /// Optional category label.
    pub category: Option<String>,
    /// Initial tags.
    pub tags: Vec<String>,
}

/// Ingests uploads: validates, creates the record, writes the file,
/// and promotes the document to `uploaded`.
#[derive(Debug, Clone)]
pub struct UploadService {
    repo: Arc<DocumentRepository>,
    storage: Arc<dyn StorageProvider>,
    validator: UploadValidator,
    encryption: EncryptionConfig,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        repo: Arc<DocumentRepository>,
        storage: Arc<dyn StorageProvider>,
        storage_config: &StorageConfig,
        encryption: EncryptionConfig,
    ) -> Self {
        Self {
            repo,
            storage,
            validator: UploadValidator::new(storage_config),
            encryption,
        }
    }

    /// The published validation rules.
    pub fn rules(&self) -> super::validate::ValidationRules {
        self.validator.rules()
    }

    /// Uploads a new document.
    ///
    /// The record is created first (status `uploading`); the content is
    /// then written and progress set to 100, which promotes the status
    /// to `uploaded`. A failed write leaves the record in `error`.
    pub async fn upload(&self, params: UploadParams) -> Result<Document, AppError> {
        self.validator.validate(
            &params.file_name,
            params.data.len() as u64,
            params.content_type.as_deref(),
        )?;

        let metadata = match &params.metadata {
            Some(value) => Some(DocumentMetadata::from_json_value(value)?.to_json_value()),
            None => None,
        };

        let id = Uuid::new_v4();
        let storage_path = layout::document_path(id, &params.file_name);
        let content_type = params
            .content_type
            .clone()
            .or_else(|| infer_content_type(&params.file_name).map(String::from));

        let encryption_metadata = self.encryption.enabled.then(|| {
            serde_json::json!({
                "algorithm": self.encryption.algorithm,
                "sidecar": layout::sidecar_path(&storage_path),
            })
        });

        let document = self
            .repo
            .create(&CreateDocument {
                id,
                name: params.file_name.clone(),
                size_bytes: params.data.len() as i64,
                content_type,
                storage_path: storage_path.clone(),
                tags: params.tags,
                category: params.category,
                is_encrypted: self.encryption.enabled,
                encryption_metadata,
                metadata,
            })
            .await?;

        if let Err(e) = self.storage.write(&storage_path, params.data).await {
            error!(document_id = %id, error = %e, "Upload write failed");
            self.repo
                .update(
                    id,
                    &UpdateDocument {
                        status: Some(DocumentStatus::Error),
                        ..Default::default()
                    },
                )
                .await?;
            return Err(e);
        }

        let document = self
            .repo
            .update(
                document.id,
                &UpdateDocument {
                    status: Some(DocumentStatus::Uploaded),
                    progress: Some(100),
                    ..Default::default()
                },
            )
            .await?;

        info!(
            document_id = %document.id,
            name = %document.name,
            size_bytes = document.size_bytes,
            "Document uploaded"
        );

        Ok(document)
    }
}
