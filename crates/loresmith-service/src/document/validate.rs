//! Upload validation rules.
//!
//! Documents are checked for size bounds and an allow-listed content
//! type before anything is written. The same rules are published over
//! the API so clients can validate before uploading.

use serde::{Deserialize, Serialize};

use loresmith_core::config::storage::StorageConfig;
use loresmith_core::{AppError, AppResult};
use loresmith_entity::document::metadata;

/// Supported content types and their canonical extensions.
pub const SUPPORTED_TYPES: &[(&str, &str)] = &[
    ("application/pdf", ".pdf"),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ".docx",
    ),
    ("text/plain", ".txt"),
    ("text/markdown", ".md"),
    ("text/html", ".html"),
];

/// Upload validation rules derived from configuration.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    min_size_bytes: u64,
    max_size_bytes: u64,
}

/// Validation rules as published by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRules {
    /// Accepted MIME types.
    pub supported_types: Vec<String>,
    /// Minimum upload size in bytes.
    pub min_size_bytes: u64,
    /// Maximum upload size in bytes.
    pub max_size_bytes: u64,
    /// Recognized metadata keys.
    pub metadata_keys: Vec<String>,
}

impl UploadValidator {
    /// Build a validator from storage configuration.
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            min_size_bytes: config.min_upload_size_bytes,
            max_size_bytes: config.max_upload_size_bytes,
        }
    }

    /// Validate an upload's name, size, and content type.
    ///
    /// When no content type is supplied it is inferred from the file
    /// extension; a file that matches neither is rejected.
    pub fn validate(
        &self,
        file_name: &str,
        size_bytes: u64,
        content_type: Option<&str>,
    ) -> AppResult<()> {
        if file_name.trim().is_empty() {
            return Err(AppError::validation("File name cannot be empty"));
        }
        if size_bytes < self.min_size_bytes {
            return Err(AppError::validation(format!(
                "File is too small (minimum {} bytes)",
                self.min_size_bytes
            )));
        }
        if size_bytes > self.max_size_bytes {
            return Err(AppError::validation(format!(
                "File is too large (maximum {} bytes)",
                self.max_size_bytes
            )));
        }

        let resolved = content_type.or_else(|| infer_content_type(file_name));
        match resolved {
            Some(ct) if SUPPORTED_TYPES.iter().any(|(mime, _)| *mime == ct) => Ok(()),
            Some(ct) => Err(AppError::validation(format!(
                "Unsupported file type: {ct}"
            ))),
            None => Err(AppError::validation(
                "Unknown file type: supply a content type or a recognized extension",
            )),
        }
    }

    /// The rules in publishable form.
    pub fn rules(&self) -> ValidationRules {
        ValidationRules {
            supported_types: SUPPORTED_TYPES
                .iter()
                .map(|(mime, _)| (*mime).to_string())
                .collect(),
            min_size_bytes: self.min_size_bytes,
            max_size_bytes: self.max_size_bytes,
            metadata_keys: metadata::ALLOWED_KEYS
                .iter()
                .map(|k| (*k).to_string())
                .collect(),
        }
    }
}

/// Infer a supported content type from a file extension.
pub fn infer_content_type(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.').map(|(_, e)| e.to_lowercase())?;
    SUPPORTED_TYPES
        .iter()
        .find(|(_, known)| known.trim_start_matches('.') == ext)
        .map(|(mime, _)| *mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> UploadValidator {
        UploadValidator {
            min_size_bytes: 1024,
            max_size_bytes: 10_000,
        }
    }

    #[test]
    fn test_size_bounds() {
        let v = validator();
        assert!(v.validate("a.pdf", 1023, Some("application/pdf")).is_err());
        assert!(v.validate("a.pdf", 1024, Some("application/pdf")).is_ok());
        assert!(v.validate("a.pdf", 10_001, Some("application/pdf")).is_err());
    }

    #[test]
    fn test_content_type_inferred_from_extension() {
        let v = validator();
        assert!(v.validate("notes.md", 2048, None).is_ok());
        assert!(v.validate("archive.zip", 2048, None).is_err());
        assert!(v.validate("noextension", 2048, None).is_err());
    }

    #[test]
    fn test_unsupported_declared_type_rejected() {
        let v = validator();
        let err = v
            .validate("a.bin", 2048, Some("application/octet-stream"))
            .expect_err("must reject");
        assert!(err.message.contains("Unsupported"));
    }

    #[test]
    fn test_rules_include_metadata_keys() {
        let rules = validator().rules();
        assert!(rules.supported_types.contains(&"text/markdown".to_string()));
        assert!(rules.metadata_keys.contains(&"author".to_string()));
    }
}
