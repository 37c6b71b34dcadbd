//! On-disk path layout for document storage.
//!
//! Every document owns a directory named after its id:
//!
//! ```text
//! {id}/document{ext}            current content
//! {id}/versions/v{n}{ext}       per-version snapshots
//! {id}/document{ext}.meta       encryption sidecar (when encrypted)
//! ```
//!
//! Paths are relative to the storage provider root and always use
//! forward slashes.

use uuid::Uuid;

/// Directory holding everything belonging to one document.
pub fn document_dir(id: Uuid) -> String {
    id.to_string()
}

/// Path of a document's current content file.
pub fn document_path(id: Uuid, file_name: &str) -> String {
    format!("{id}/document{}", extension_of(file_name))
}

/// Path of a specific version's content file.
pub fn version_path(id: Uuid, version_number: i32, file_name: &str) -> String {
    format!(
        "{id}/versions/v{version_number}{}",
        extension_of(file_name)
    )
}

/// Path of the encryption metadata sidecar for a stored file.
pub fn sidecar_path(storage_path: &str) -> String {
    format!("{storage_path}.meta")
}

/// The dot-prefixed extension of a file name, or the empty string.
fn extension_of(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            format!(".{}", ext.to_lowercase())
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_path_keeps_extension() {
        let id = Uuid::nil();
        assert_eq!(
            document_path(id, "Report.PDF"),
            format!("{id}/document.pdf")
        );
    }

    #[test]
    fn test_document_path_without_extension() {
        let id = Uuid::nil();
        assert_eq!(document_path(id, "README"), format!("{id}/document"));
        // A leading dot is a hidden file, not an extension.
        assert_eq!(document_path(id, ".gitignore"), format!("{id}/document"));
    }

    #[test]
    fn test_version_path_numbering() {
        let id = Uuid::nil();
        assert_eq!(
            version_path(id, 3, "notes.md"),
            format!("{id}/versions/v3.md")
        );
    }

    #[test]
    fn test_sidecar_path() {
        assert_eq!(sidecar_path("abc/document.pdf"), "abc/document.pdf.meta");
    }
}
