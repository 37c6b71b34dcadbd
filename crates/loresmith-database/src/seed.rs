//! Seed step: populate one sample document and its first version when
//! the documents table is empty. Idempotent across restarts.

use tracing::info;
use uuid::Uuid;

use loresmith_core::result::AppResult;
use loresmith_entity::document::model::{CreateDocument, UpdateDocument};
use loresmith_entity::document::status::DocumentStatus;

use crate::repositories::document::DocumentRepository;
use crate::repositories::version::{NewVersion, VersionRepository};

/// Insert the sample document unless data already exists.
pub async fn run_seed(
    documents: &DocumentRepository,
    versions: &VersionRepository,
) -> AppResult<()> {
    if documents.count_all().await? > 0 {
        info!("Documents table already populated, skipping seed");
        return Ok(());
    }

    let id = Uuid::new_v4();
    let document = documents
        .create(&CreateDocument {
            id,
            name: "welcome.md".to_string(),
            size_bytes: 2048,
            content_type: Some("text/markdown".to_string()),
            storage_path: format!("{id}/document.md"),
            tags: vec!["sample".to_string()],
            category: Some("guides".to_string()),
            is_encrypted: false,
            encryption_metadata: None,
            metadata: Some(serde_json::json!({
                "title": "Welcome to LoreSmith",
                "author": "LoreSmith Team",
            })),
        })
        .await?;

    versions
        .create_version(NewVersion {
            document_id: document.id,
            version_number: 1,
            storage_path: &format!("{id}/versions/v1.md"),
            size_bytes: document.size_bytes,
            changes: Some("Initial version"),
            created_by: None,
        })
        .await?;

    documents
        .update(
            document.id,
            &UpdateDocument {
                status: Some(DocumentStatus::Uploaded),
                progress: Some(100),
                ..Default::default()
            },
        )
        .await?;

    info!(document_id = %document.id, "Seeded sample document");
    Ok(())
}
