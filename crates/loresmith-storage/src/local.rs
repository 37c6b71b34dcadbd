//! Local filesystem storage provider.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::StreamExt;
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::debug;

use loresmith_core::error::{AppError, ErrorKind};
use loresmith_core::result::AppResult;
use loresmith_core::traits::storage::{ByteStream, StorageProvider};

/// Local filesystem storage provider.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    /// Root directory for all stored files.
    root: PathBuf,
}

impl LocalStorageProvider {
    /// Create a new local storage provider rooted at the given path.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a relative path to an absolute path within the root.
    fn resolve(&self, path: &str) -> PathBuf {
        let clean = path.trim_start_matches('/');
        self.root.join(clean)
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.exists() && self.root.is_dir())
    }

    async fn read(&self, path: &str) -> AppResult<ByteStream> {
        let full_path = self.resolve(path);
        let file = fs::File::open(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("File not found: {path}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to open file: {path}"),
                    e,
                )
            }
        })?;

        let stream = ReaderStream::new(file);
        Ok(Box::pin(stream.map(|r| r.map(|b| b.into()))))
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        let full_path = self.resolve(path);
        let data = fs::read(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("File not found: {path}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read file: {path}"),
                    e,
                )
            }
        })?;
        Ok(Bytes::from(data))
    }

    async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
        let full_path = self.resolve(path);
        self.ensure_parent(&full_path).await?;

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write file: {path}"),
                e,
            )
        })?;

        debug!(path, bytes = data.len(), "Wrote file");
        Ok(())
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path);
        if full_path.exists() {
            fs::remove_file(&full_path).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete file: {path}"),
                    e,
                )
            })?;
        }
        Ok(())
    }

    async fn delete_dir(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path);
        if full_path.exists() {
            fs::remove_dir_all(&full_path).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete directory: {path}"),
                    e,
                )
            })?;
        }
        Ok(())
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        let full_path = self.resolve(path);
        Ok(full_path.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;

    async fn provider() -> (tempfile::TempDir, LocalStorageProvider) {
        let dir = tempfile::tempdir().expect("tempdir");
        let provider = LocalStorageProvider::new(dir.path().to_str().unwrap())
            .await
            .expect("provider");
        (dir, provider)
    }

    #[tokio::test]
    async fn test_write_then_read_bytes() {
        let (_dir, provider) = provider().await;
        provider
            .write("doc/document.txt", Bytes::from_static(b"lore"))
            .await
            .expect("write");

        let data = provider.read_bytes("doc/document.txt").await.expect("read");
        assert_eq!(&data[..], b"lore");
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let (_dir, provider) = provider().await;
        let err = provider.read_bytes("nope.txt").await.expect_err("missing");
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (_dir, provider) = provider().await;
        provider
            .write("a/b.txt", Bytes::from_static(b"x"))
            .await
            .unwrap();

        provider.delete("a/b.txt").await.expect("first delete");
        provider.delete("a/b.txt").await.expect("second delete");
        assert!(!provider.exists("a/b.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_dir_removes_tree() {
        let (_dir, provider) = provider().await;
        provider
            .write("doc/versions/v1.txt", Bytes::from_static(b"v1"))
            .await
            .unwrap();
        provider
            .write("doc/document.txt", Bytes::from_static(b"cur"))
            .await
            .unwrap();

        provider.delete_dir("doc").await.expect("delete dir");
        assert!(!provider.exists("doc").await.unwrap());
    }

    #[tokio::test]
    async fn test_read_streams_full_content() {
        let (_dir, provider) = provider().await;
        let payload = vec![7u8; 64 * 1024];
        provider
            .write("big.bin", Bytes::from(payload.clone()))
            .await
            .unwrap();

        let stream = provider.read("big.bin").await.expect("stream");
        let chunks: Vec<Bytes> = stream.try_collect().await.expect("collect");
        let total: usize = chunks.iter().map(|c| c.len()).sum();
        assert_eq!(total, payload.len());
    }
}
