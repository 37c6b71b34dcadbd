//! Document version repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use loresmith_core::error::{AppError, ErrorKind};
use loresmith_core::result::AppResult;
use loresmith_entity::document::version::DocumentVersion;

/// Constraint name backing the per-document version-number uniqueness.
const VERSION_NUMBER_KEY: &str = "document_versions_document_id_version_number_key";

/// Parameters for inserting a version row.
#[derive(Debug, Clone)]
pub struct NewVersion<'a> {
    /// Owning document.
    pub document_id: Uuid,
    /// Number to assign (callers compute `latest + 1`).
    pub version_number: i32,
    /// Path of the version's content in storage.
    pub storage_path: &'a str,
    /// Size in bytes.
    pub size_bytes: i64,
    /// Free-text change description.
    pub changes: Option<&'a str>,
    /// Client-supplied author.
    pub created_by: Option<&'a str>,
}

/// Repository for document version rows and the current-version pointer.
#[derive(Debug, Clone)]
pub struct VersionRepository {
    pool: PgPool,
}

impl VersionRepository {
    /// Create a new version repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all versions of a document, newest number first.
    pub async fn find_versions(&self, document_id: Uuid) -> AppResult<Vec<DocumentVersion>> {
        sqlx::query_as::<_, DocumentVersion>(
            "SELECT * FROM document_versions WHERE document_id = $1 ORDER BY version_number DESC",
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list versions", e))
    }

    /// Find a specific version of a document by its row ID.
    pub async fn find_version(
        &self,
        document_id: Uuid,
        version_id: Uuid,
    ) -> AppResult<Option<DocumentVersion>> {
        sqlx::query_as::<_, DocumentVersion>(
            "SELECT * FROM document_versions WHERE document_id = $1 AND id = $2",
        )
        .bind(document_id)
        .bind(version_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find version", e))
    }

    /// Highest version number issued for a document, 0 when none exist.
    ///
    /// Callers compute the next number as `latest + 1`; numbering is
    /// append-only and independent of the current-version pointer.
    pub async fn latest_version_number(&self, document_id: Uuid) -> AppResult<i32> {
        sqlx::query_scalar(
            "SELECT COALESCE(MAX(version_number), 0) FROM document_versions WHERE document_id = $1",
        )
        .bind(document_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to get latest version number", e)
        })
    }

    /// Insert a version row and advance the document's current-version
    /// pointer in a single transaction.
    ///
    /// If the number was taken by a racing insert, the uniqueness
    /// constraint rejects the row and the whole transaction rolls back
    /// with a `Conflict`.
    pub async fn create_version(&self, new: NewVersion<'_>) -> AppResult<DocumentVersion> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let version = sqlx::query_as::<_, DocumentVersion>(
            "INSERT INTO document_versions \
             (document_id, version_number, storage_path, size_bytes, changes, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(new.document_id)
        .bind(new.version_number)
        .bind(new.storage_path)
        .bind(new.size_bytes)
        .bind(new.changes)
        .bind(new.created_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some(VERSION_NUMBER_KEY) =>
            {
                AppError::conflict(format!(
                    "Version {} of document {} already exists",
                    new.version_number, new.document_id
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create version", e),
        })?;

        let updated = sqlx::query(
            "UPDATE documents SET current_version = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(new.document_id)
        .bind(new.version_number)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to advance current version", e)
        })?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Document {} not found",
                new.document_id
            )));
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit version", e)
        })?;

        Ok(version)
    }

    /// Point the document at an existing version number.
    ///
    /// Non-destructive: later versions are kept and numbering continues
    /// from the historical maximum.
    pub async fn set_current_version(
        &self,
        document_id: Uuid,
        version_number: i32,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE documents SET current_version = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(document_id)
        .bind(version_number)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to set current version", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Document {document_id} not found"
            )));
        }
        Ok(())
    }

    /// Delete a single version row.
    pub async fn delete_version(&self, document_id: Uuid, version_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM document_versions WHERE document_id = $1 AND id = $2")
                .bind(document_id)
                .bind(version_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to delete version", e)
                })?;
        Ok(result.rows_affected() > 0)
    }
}
