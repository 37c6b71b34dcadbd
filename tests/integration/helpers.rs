//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use loresmith_api::state::AppState;
use loresmith_core::config::app::ServerConfig;
use loresmith_core::config::logging::LoggingConfig;
use loresmith_core::config::storage::{EncryptionConfig, LocalStorageConfig, StorageConfig};
use loresmith_core::config::{AppConfig, DatabaseConfig};
use loresmith_core::traits::storage::StorageProvider;
use loresmith_storage::local::LocalStorageProvider;

/// A parsed response: status plus JSON body.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Keeps the storage directory alive for the test's duration.
    _storage_dir: tempfile::TempDir,
}

impl TestApp {
    /// Create a new test application.
    ///
    /// The database pool is created lazily and never connected by the
    /// routes exercised here; storage lives in a temp directory.
    pub async fn new() -> Self {
        let storage_dir = tempfile::tempdir().expect("Failed to create storage dir");

        let config = AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "postgres://loresmith@localhost:5432/loresmith_test".to_string(),
                max_connections: 1,
                min_connections: 0,
                connect_timeout_seconds: 1,
                idle_timeout_seconds: 60,
            },
            storage: StorageConfig {
                data_root: storage_dir.path().display().to_string(),
                local: LocalStorageConfig {
                    root_path: storage_dir.path().join("documents").display().to_string(),
                },
                ..Default::default()
            },
            encryption: EncryptionConfig::default(),
            logging: LoggingConfig::default(),
        };

        let db_pool = loresmith_database::connection::DatabasePool::connect_lazy(&config.database)
            .expect("Failed to build lazy pool")
            .into_pool();

        let storage: Arc<dyn StorageProvider> = Arc::new(
            LocalStorageProvider::new(&config.storage.local.root_path)
                .await
                .expect("Failed to init storage"),
        );

        let state = AppState::new(config, db_pool, storage);
        let router = loresmith_api::build_app(state);

        Self {
            router,
            _storage_dir: storage_dir,
        }
    }

    /// Issue a request with an optional JSON body.
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(path);

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("Failed to build request"),
            None => builder.body(Body::empty()).expect("Failed to build request"),
        };

        self.send(request).await
    }

    /// Issue a multipart request with a pre-encoded body.
    pub async fn request_multipart(
        &self,
        method: &str,
        path: &str,
        boundary: &str,
        body: String,
    ) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Encode a multipart body with one text field.
pub fn multipart_text_field(boundary: &str, name: &str, value: &str) -> String {
    format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n--{boundary}--\r\n"
    )
}

/// Encode a multipart body with one file field.
pub fn multipart_file_field(
    boundary: &str,
    file_name: &str,
    content_type: &str,
    content: &str,
) -> String {
    format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
         Content-Type: {content_type}\r\n\r\n{content}\r\n--{boundary}--\r\n"
    )
}
