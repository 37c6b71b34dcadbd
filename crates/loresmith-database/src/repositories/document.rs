//! Document repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use loresmith_core::error::{AppError, ErrorKind};
use loresmith_core::result::AppResult;
use loresmith_core::types::filter::DocumentFilter;
use loresmith_core::types::pagination::{PageRequest, PageResponse};
use loresmith_entity::document::model::{CreateDocument, Document, UpdateDocument};
use loresmith_entity::document::status::DocumentStatus;

/// Shared filter clause used by `list` and its count query. Each
/// predicate collapses to TRUE when its bind is NULL.
const FILTER_WHERE: &str = "($1::document_status IS NULL OR status = $1) \
     AND ($2::text IS NULL OR category = $2) \
     AND ($3::text IS NULL OR $3 = ANY(tags)) \
     AND ($4::boolean IS NULL OR is_favorite = $4)";

/// Repository for document CRUD and query operations.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a document by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))
    }

    /// Find all documents matching a set of IDs (missing IDs are skipped).
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Document>> {
        sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE id = ANY($1) ORDER BY created_at DESC",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find documents", e))
    }

    /// List documents with filtering and pagination, newest first.
    pub async fn list(
        &self,
        filter: &DocumentFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Document>> {
        let status = match filter.status.as_deref() {
            Some(s) => Some(s.parse::<DocumentStatus>()?),
            None => None,
        };

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM documents WHERE {FILTER_WHERE}"))
                .bind(status)
                .bind(&filter.category)
                .bind(&filter.tag)
                .bind(filter.favorite)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count documents", e)
                })?;

        let documents = sqlx::query_as::<_, Document>(&format!(
            "SELECT * FROM documents WHERE {FILTER_WHERE} \
             ORDER BY created_at DESC LIMIT $5 OFFSET $6"
        ))
        .bind(status)
        .bind(&filter.category)
        .bind(&filter.tag)
        .bind(filter.favorite)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))?;

        Ok(PageResponse::new(
            documents,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new document record.
    ///
    /// Status defaults to `uploading` and progress to 0 via column
    /// defaults.
    pub async fn create(&self, data: &CreateDocument) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(
            "INSERT INTO documents \
             (id, name, size_bytes, content_type, storage_path, tags, category, \
              is_encrypted, encryption_metadata, metadata) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(data.id)
        .bind(&data.name)
        .bind(data.size_bytes)
        .bind(&data.content_type)
        .bind(&data.storage_path)
        .bind(&data.tags)
        .bind(&data.category)
        .bind(data.is_encrypted)
        .bind(&data.encryption_metadata)
        .bind(&data.metadata)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("documents_pkey") => {
                AppError::conflict(format!("Document {} already exists", data.id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create document", e),
        })
    }

    /// Partially update a document.
    ///
    /// Absent fields keep their stored value; `metadata` is
    /// shallow-merged into the existing map; `tags` replaces the set.
    pub async fn update(&self, id: Uuid, update: &UpdateDocument) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(
            "UPDATE documents SET \
             name = COALESCE($2, name), \
             content_type = COALESCE($3, content_type), \
             category = COALESCE($4, category), \
             tags = COALESCE($5, tags), \
             status = COALESCE($6, status), \
             progress = COALESCE($7, progress), \
             metadata = CASE WHEN $8::jsonb IS NULL THEN metadata \
                             ELSE COALESCE(metadata, '{}'::jsonb) || $8::jsonb END, \
             validation_result = COALESCE($9, validation_result), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.content_type)
        .bind(&update.category)
        .bind(&update.tags)
        .bind(update.status)
        .bind(update.progress)
        .bind(&update.metadata)
        .bind(&update.validation_result)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update document", e))?
        .ok_or_else(|| AppError::not_found(format!("Document {id} not found")))
    }

    /// Merge entries into a document's metadata map.
    pub async fn merge_metadata(
        &self,
        id: Uuid,
        metadata: &serde_json::Value,
    ) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(
            "UPDATE documents SET \
             metadata = COALESCE(metadata, '{}'::jsonb) || $2::jsonb, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(metadata)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update metadata", e))?
        .ok_or_else(|| AppError::not_found(format!("Document {id} not found")))
    }

    /// Replace a document's tag set.
    pub async fn update_tags(&self, id: Uuid, tags: &[String]) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(
            "UPDATE documents SET tags = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(tags)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update tags", e))?
        .ok_or_else(|| AppError::not_found(format!("Document {id} not found")))
    }

    /// Flip a document's favorite flag.
    pub async fn toggle_favorite(&self, id: Uuid) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(
            "UPDATE documents SET is_favorite = NOT is_favorite, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to toggle favorite", e))?
        .ok_or_else(|| AppError::not_found(format!("Document {id} not found")))
    }

    /// Delete a document. Versions are removed by the cascade.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete document", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every document in the ID set, tolerating missing IDs.
    /// Returns the number of rows removed.
    pub async fn delete_many(&self, ids: &[Uuid]) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM documents WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete documents", e)
            })?;
        Ok(result.rows_affected())
    }

    /// Set the favorite flag on every document in the ID set.
    /// Returns the number of rows updated.
    pub async fn set_favorite_many(&self, ids: &[Uuid], is_favorite: bool) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE documents SET is_favorite = $2, updated_at = NOW() WHERE id = ANY($1)",
        )
        .bind(ids)
        .bind(is_favorite)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update favorites", e))?;
        Ok(result.rows_affected())
    }

    /// Count all documents.
    pub async fn count_all(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM documents")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count documents", e))
    }
}
