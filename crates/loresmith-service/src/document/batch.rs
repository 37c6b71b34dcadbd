//! Batch operations over client-selected document sets.
//!
//! Batch mutations are applied atomically per item, not transactionally
//! as a whole: a missing ID never fails the rest of the batch.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use loresmith_core::error::AppError;
use loresmith_core::traits::storage::StorageProvider;
use loresmith_database::repositories::document::DocumentRepository;
use loresmith_storage::layout;

/// How a batch tag update combines the given tags with each document's
/// existing set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagOperation {
    /// Union the tags into the existing set (deduplicated).
    Add,
    /// Remove the named tags.
    Remove,
    /// Replace the set wholesale.
    Set,
}

/// Applies a tag operation to one document's existing tags.
///
/// Insertion order is preserved for display; duplicates never appear.
pub fn apply_tag_operation(
    existing: &[String],
    tags: &[String],
    operation: TagOperation,
) -> Vec<String> {
    match operation {
        TagOperation::Add => {
            let mut seen: HashSet<&str> = existing.iter().map(String::as_str).collect();
            let mut result = existing.to_vec();
            for tag in tags {
                if seen.insert(tag) {
                    result.push(tag.clone());
                }
            }
            result
        }
        TagOperation::Remove => {
            let remove: HashSet<&str> = tags.iter().map(String::as_str).collect();
            existing
                .iter()
                .filter(|t| !remove.contains(t.as_str()))
                .cloned()
                .collect()
        }
        TagOperation::Set => {
            let mut seen = HashSet::new();
            tags.iter()
                .filter(|t| seen.insert(t.as_str()))
                .cloned()
                .collect()
        }
    }
}

/// Batch mutations across document ID sets.
#[derive(Debug, Clone)]
pub struct BatchService {
    repo: Arc<DocumentRepository>,
    storage: Arc<dyn StorageProvider>,
}

impl BatchService {
    /// Creates a new batch service.
    pub fn new(repo: Arc<DocumentRepository>, storage: Arc<dyn StorageProvider>) -> Self {
        Self { repo, storage }
    }

    /// Deletes every document in the set, tolerating missing IDs.
    /// Returns the number of documents removed.
    pub async fn delete_documents(&self, ids: &[Uuid]) -> Result<u64, AppError> {
        let documents = self.repo.find_by_ids(ids).await?;

        for document in &documents {
            if let Some(sidecar) = document.encryption_sidecar_path() {
                if let Err(e) = self.storage.delete(&sidecar).await {
                    warn!(document_id = %document.id, error = %e, "Failed to remove encryption sidecar");
                }
            }
            let dir = layout::document_dir(document.id);
            if let Err(e) = self.storage.delete_dir(&dir).await {
                warn!(document_id = %document.id, error = %e, "Failed to remove document files");
            }
        }

        let removed = self.repo.delete_many(ids).await?;
        info!(requested = ids.len(), removed, "Batch delete completed");
        Ok(removed)
    }

    /// Sets the favorite flag across the set. Returns the count updated.
    pub async fn set_favorites(&self, ids: &[Uuid], is_favorite: bool) -> Result<u64, AppError> {
        let updated = self.repo.set_favorite_many(ids, is_favorite).await?;
        info!(requested = ids.len(), updated, is_favorite, "Batch favorite completed");
        Ok(updated)
    }

    /// Applies a tag operation across the set. Returns the count updated.
    ///
    /// Only documents in the ID set are touched; IDs with no matching
    /// document are skipped.
    pub async fn update_tags(
        &self,
        ids: &[Uuid],
        tags: &[String],
        operation: TagOperation,
    ) -> Result<u64, AppError> {
        let documents = self.repo.find_by_ids(ids).await?;
        let mut updated = 0u64;

        for document in &documents {
            let new_tags = apply_tag_operation(&document.tags, tags, operation);
            self.repo.update_tags(document.id, &new_tags).await?;
            updated += 1;
        }

        info!(requested = ids.len(), updated, ?operation, "Batch tag update completed");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_add_unions_and_dedups() {
        // A: [x] + [y] -> [x, y]; B: [] + [y] -> [y]
        assert_eq!(
            apply_tag_operation(&tags(&["x"]), &tags(&["y"]), TagOperation::Add),
            tags(&["x", "y"])
        );
        assert_eq!(
            apply_tag_operation(&[], &tags(&["y"]), TagOperation::Add),
            tags(&["y"])
        );
        // Adding an existing tag does not duplicate it.
        assert_eq!(
            apply_tag_operation(&tags(&["x", "y"]), &tags(&["y"]), TagOperation::Add),
            tags(&["x", "y"])
        );
    }

    #[test]
    fn test_remove_filters_named_tags() {
        assert_eq!(
            apply_tag_operation(&tags(&["x", "y"]), &tags(&["x"]), TagOperation::Remove),
            tags(&["y"])
        );
        // Removing an absent tag is a no-op.
        assert_eq!(
            apply_tag_operation(&tags(&["y"]), &tags(&["z"]), TagOperation::Remove),
            tags(&["y"])
        );
    }

    #[test]
    fn test_set_replaces_wholesale() {
        assert_eq!(
            apply_tag_operation(&tags(&["x", "y"]), &tags(&["z"]), TagOperation::Set),
            tags(&["z"])
        );
        // Duplicates in the incoming set collapse.
        assert_eq!(
            apply_tag_operation(&tags(&["x"]), &tags(&["z", "z"]), TagOperation::Set),
            tags(&["z"])
        );
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        assert_eq!(
            apply_tag_operation(&tags(&["b", "a"]), &tags(&["c", "a"]), TagOperation::Add),
            tags(&["b", "a", "c"])
        );
    }
}
