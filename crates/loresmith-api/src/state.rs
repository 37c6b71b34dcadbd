//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use loresmith_core::config::AppConfig;
use loresmith_core::traits::storage::StorageProvider;
use loresmith_database::repositories::document::DocumentRepository;
use loresmith_database::repositories::version::VersionRepository;
use loresmith_service::document::batch::BatchService;
use loresmith_service::document::service::DocumentService;
use loresmith_service::document::upload::UploadService;
use loresmith_service::document::version::VersionService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks; nothing is reached
/// through globals, so tests can build isolated instances.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// File storage backend.
    pub storage: Arc<dyn StorageProvider>,
    /// Document repository.
    pub document_repo: Arc<DocumentRepository>,
    /// Version repository.
    pub version_repo: Arc<VersionRepository>,
    /// Document CRUD and lifecycle service.
    pub document_service: Arc<DocumentService>,
    /// Upload ingestion service.
    pub upload_service: Arc<UploadService>,
    /// Version history service.
    pub version_service: Arc<VersionService>,
    /// Batch operation service.
    pub batch_service: Arc<BatchService>,
}

impl AppState {
    /// Wire up repositories and services over a pool and storage backend.
    pub fn new(config: AppConfig, db_pool: PgPool, storage: Arc<dyn StorageProvider>) -> Self {
        let document_repo = Arc::new(DocumentRepository::new(db_pool.clone()));
        let version_repo = Arc::new(VersionRepository::new(db_pool.clone()));

        let document_service = Arc::new(DocumentService::new(
            Arc::clone(&document_repo),
            Arc::clone(&storage),
        ));
        let upload_service = Arc::new(UploadService::new(
            Arc::clone(&document_repo),
            Arc::clone(&storage),
            &config.storage,
            config.encryption.clone(),
        ));
        let version_service = Arc::new(VersionService::new(
            Arc::clone(&document_repo),
            Arc::clone(&version_repo),
            Arc::clone(&storage),
        ));
        let batch_service = Arc::new(BatchService::new(
            Arc::clone(&document_repo),
            Arc::clone(&storage),
        ));

        Self {
            config: Arc::new(config),
            db_pool,
            storage,
            document_repo,
            version_repo,
            document_service,
            upload_service,
            version_service,
            batch_service,
        }
    }
}
