//! Storage and encryption configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for all runtime data.
    #[serde(default = "default_data_root")]
    pub data_root: String,
    /// Maximum upload size in bytes (default 50 MiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Minimum upload size in bytes (default 1 KiB).
    #[serde(default = "default_min_upload")]
    pub min_upload_size_bytes: u64,
    /// Local filesystem storage configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            max_upload_size_bytes: default_max_upload(),
            min_upload_size_bytes: default_min_upload(),
            local: LocalStorageConfig::default(),
        }
    }
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Root path for local document storage.
    #[serde(default = "default_local_root")]
    pub root_path: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
        }
    }
}

/// Document encryption configuration.
///
/// Encryption itself is performed by an external collaborator; the
/// service only tracks the flag and cleans up the sidecar metadata file
/// on deletion.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EncryptionConfig {
    /// Whether uploaded documents are encrypted at rest.
    #[serde(default)]
    pub enabled: bool,
    /// Encryption algorithm identifier (informational).
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    /// Key reference (never logged).
    #[serde(default)]
    pub key: String,
}

fn default_data_root() -> String {
    "./data".to_string()
}

fn default_max_upload() -> u64 {
    52_428_800 // 50 MiB
}

fn default_min_upload() -> u64 {
    1024 // 1 KiB
}

fn default_local_root() -> String {
    "./data/documents".to_string()
}

fn default_algorithm() -> String {
    "aes-256-gcm".to_string()
}
