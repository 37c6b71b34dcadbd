//! Normalized client-side document cache.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use loresmith_entity::document::model::Document;
use loresmith_entity::document::status::DocumentStatus;

/// Metadata fields shown by default in document listings.
fn default_visible_fields() -> Vec<String> {
    ["title", "author", "page_count"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Normalized collection of documents plus selection and UI bookkeeping.
///
/// Documents are keyed by id; `order` preserves the server's listing
/// order (upload time descending). Optimistic mutations update local
/// state immediately and are overwritten wholesale when the
/// authoritative response arrives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentCache {
    /// Documents keyed by id.
    documents: HashMap<Uuid, Document>,
    /// Display order of document ids.
    order: Vec<Uuid>,
    /// Single-selection id.
    selected: Option<Uuid>,
    /// Multi-selection id set (batch operations).
    selection: HashSet<Uuid>,
    /// Whether batch-selection mode is active.
    batch_mode: bool,
    /// Whether a fetch is in flight.
    loading: bool,
    /// Last error message, if any.
    error: Option<String>,
    /// Metadata fields the user chose to display.
    visible_metadata_fields: Vec<String>,
}

impl Default for DocumentCache {
    fn default() -> Self {
        Self {
            documents: HashMap::new(),
            order: Vec::new(),
            selected: None,
            selection: HashSet::new(),
            batch_mode: false,
            loading: false,
            error: None,
            visible_metadata_fields: default_visible_fields(),
        }
    }
}

impl DocumentCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Reads ────────────────────────────────────────────────

    /// Get a document by id.
    pub fn get(&self, id: Uuid) -> Option<&Document> {
        self.documents.get(&id)
    }

    /// All documents in display order.
    pub fn all(&self) -> Vec<&Document> {
        self.order
            .iter()
            .filter_map(|id| self.documents.get(id))
            .collect()
    }

    /// Number of cached documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when the cache holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The single-selected document id.
    pub fn selected(&self) -> Option<Uuid> {
        self.selected
    }

    /// The multi-selection set.
    pub fn selection(&self) -> &HashSet<Uuid> {
        &self.selection
    }

    /// Whether batch-selection mode is active.
    pub fn batch_mode(&self) -> bool {
        self.batch_mode
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last recorded error.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Metadata fields the user chose to display.
    pub fn visible_metadata_fields(&self) -> &[String] {
        &self.visible_metadata_fields
    }

    // ── Collection mutations ─────────────────────────────────

    /// Replace the whole collection (authoritative list response).
    ///
    /// Selections pointing at documents that no longer exist are
    /// dropped.
    pub fn set_documents(&mut self, documents: Vec<Document>) {
        self.order = documents.iter().map(|d| d.id).collect();
        self.documents = documents.into_iter().map(|d| (d.id, d)).collect();
        self.selection.retain(|id| self.documents.contains_key(id));
        if let Some(selected) = self.selected {
            if !self.documents.contains_key(&selected) {
                self.selected = None;
            }
        }
    }

    /// Insert or update one document. New documents go to the front
    /// (newest-first display order).
    pub fn upsert(&mut self, document: Document) {
        let id = document.id;
        if self.documents.insert(id, document).is_none() {
            self.order.insert(0, id);
        }
    }

    /// Insert or update many documents.
    pub fn upsert_many(&mut self, documents: Vec<Document>) {
        for document in documents {
            self.upsert(document);
        }
    }

    /// Remove one document and any selection pointing at it.
    pub fn remove(&mut self, id: Uuid) {
        self.documents.remove(&id);
        self.order.retain(|d| *d != id);
        self.selection.remove(&id);
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    /// Remove many documents.
    pub fn remove_many(&mut self, ids: &[Uuid]) {
        for id in ids {
            self.remove(*id);
        }
    }

    // ── Selection ────────────────────────────────────────────

    /// Set (or clear) the single selection.
    pub fn select(&mut self, id: Option<Uuid>) {
        self.selected = id.filter(|id| self.documents.contains_key(id));
    }

    /// Toggle an id in the multi-selection set.
    pub fn toggle_selection(&mut self, id: Uuid) {
        if !self.documents.contains_key(&id) {
            return;
        }
        if !self.selection.insert(id) {
            self.selection.remove(&id);
        }
    }

    /// Clear the multi-selection set.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Enter or leave batch-selection mode. Leaving clears the set.
    pub fn set_batch_mode(&mut self, enabled: bool) {
        self.batch_mode = enabled;
        if !enabled {
            self.selection.clear();
        }
    }

    // ── Optimistic local mutations ───────────────────────────

    /// Locally flip a document's favorite flag.
    pub fn toggle_favorite(&mut self, id: Uuid) {
        if let Some(document) = self.documents.get_mut(&id) {
            document.is_favorite = !document.is_favorite;
        }
    }

    /// Locally merge metadata entries into a document (shallow).
    pub fn merge_metadata(&mut self, id: Uuid, entries: &serde_json::Value) {
        let Some(document) = self.documents.get_mut(&id) else {
            return;
        };
        let Some(incoming) = entries.as_object() else {
            return;
        };

        let mut merged = document
            .metadata
            .as_ref()
            .and_then(|m| m.as_object().cloned())
            .unwrap_or_default();
        for (k, v) in incoming {
            merged.insert(k.clone(), v.clone());
        }
        document.metadata = Some(serde_json::Value::Object(merged));
    }

    /// Locally record a newly created version: bumps the document's
    /// `current_version` to the given number.
    pub fn append_version(&mut self, id: Uuid, version_number: i32) {
        if let Some(document) = self.documents.get_mut(&id) {
            document.current_version = version_number;
        }
    }

    /// Locally update status and progress.
    pub fn set_status(&mut self, id: Uuid, status: DocumentStatus, progress: i32) {
        if let Some(document) = self.documents.get_mut(&id) {
            document.status = status;
            document.progress = progress.clamp(0, 100);
        }
    }

    // ── Flags & preferences ──────────────────────────────────

    /// Set the loading flag (clears the error when a fetch starts).
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        if loading {
            self.error = None;
        }
    }

    /// Record a fetch error.
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
        self.loading = false;
    }

    /// Replace the visible-metadata-field preference.
    pub fn set_visible_metadata_fields(&mut self, fields: Vec<String>) {
        self.visible_metadata_fields = fields;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn doc(name: &str) -> Document {
        Document {
            id: Uuid::new_v4(),
            name: name.to_string(),
            size_bytes: 2048,
            content_type: Some("application/pdf".to_string()),
            storage_path: format!("{name}/document.pdf"),
            status: DocumentStatus::Uploaded,
            progress: 100,
            tags: Vec::new(),
            category: None,
            is_favorite: false,
            is_encrypted: false,
            encryption_metadata: None,
            metadata: None,
            validation_result: None,
            current_version: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_set_documents_replaces_and_prunes_selection() {
        let mut cache = DocumentCache::new();
        let a = doc("a");
        let b = doc("b");
        let a_id = a.id;
        cache.set_documents(vec![a, b]);
        cache.select(Some(a_id));
        cache.toggle_selection(a_id);

        let c = doc("c");
        cache.set_documents(vec![c]);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.selected(), None);
        assert!(cache.selection().is_empty());
    }

    #[test]
    fn test_upsert_new_goes_to_front() {
        let mut cache = DocumentCache::new();
        let a = doc("a");
        let b = doc("b");
        let b_id = b.id;
        cache.set_documents(vec![a]);
        cache.upsert(b);

        assert_eq!(cache.all()[0].id, b_id);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_upsert_existing_keeps_order() {
        let mut cache = DocumentCache::new();
        let a = doc("a");
        let mut b = doc("b");
        let b_id = b.id;
        cache.set_documents(vec![a, b.clone()]);

        b.name = "b-renamed".to_string();
        cache.upsert(b);

        assert_eq!(cache.all()[1].id, b_id);
        assert_eq!(cache.get(b_id).unwrap().name, "b-renamed");
    }

    #[test]
    fn test_remove_clears_selections() {
        let mut cache = DocumentCache::new();
        let a = doc("a");
        let a_id = a.id;
        cache.set_documents(vec![a]);
        cache.select(Some(a_id));
        cache.toggle_selection(a_id);

        cache.remove(a_id);

        assert!(cache.is_empty());
        assert_eq!(cache.selected(), None);
        assert!(cache.selection().is_empty());
    }

    #[test]
    fn test_toggle_favorite_twice_restores_state() {
        let mut cache = DocumentCache::new();
        let a = doc("a");
        let a_id = a.id;
        cache.set_documents(vec![a]);

        cache.toggle_favorite(a_id);
        assert!(cache.get(a_id).unwrap().is_favorite);
        cache.toggle_favorite(a_id);
        assert!(!cache.get(a_id).unwrap().is_favorite);
    }

    #[test]
    fn test_merge_metadata_is_shallow() {
        let mut cache = DocumentCache::new();
        let mut a = doc("a");
        a.metadata = Some(json!({"title": "Lore", "author": "Ada"}));
        let a_id = a.id;
        cache.set_documents(vec![a]);

        cache.merge_metadata(a_id, &json!({"author": "Grace", "page_count": 9}));

        let meta = cache.get(a_id).unwrap().metadata.as_ref().unwrap();
        assert_eq!(meta["title"], json!("Lore"));
        assert_eq!(meta["author"], json!("Grace"));
        assert_eq!(meta["page_count"], json!(9));
    }

    #[test]
    fn test_append_version_bumps_pointer() {
        let mut cache = DocumentCache::new();
        let a = doc("a");
        let a_id = a.id;
        cache.set_documents(vec![a]);

        cache.append_version(a_id, 2);
        assert_eq!(cache.get(a_id).unwrap().current_version, 2);
    }

    #[test]
    fn test_leaving_batch_mode_clears_selection() {
        let mut cache = DocumentCache::new();
        let a = doc("a");
        let a_id = a.id;
        cache.set_documents(vec![a]);

        cache.set_batch_mode(true);
        cache.toggle_selection(a_id);
        assert_eq!(cache.selection().len(), 1);

        cache.set_batch_mode(false);
        assert!(cache.selection().is_empty());
    }

    #[test]
    fn test_selecting_unknown_document_is_ignored() {
        let mut cache = DocumentCache::new();
        cache.select(Some(Uuid::new_v4()));
        assert_eq!(cache.selected(), None);
        cache.toggle_selection(Uuid::new_v4());
        assert!(cache.selection().is_empty());
    }

    #[test]
    fn test_loading_clears_previous_error() {
        let mut cache = DocumentCache::new();
        cache.set_error(Some("network down".to_string()));
        assert_eq!(cache.error(), Some("network down"));

        cache.set_loading(true);
        assert!(cache.is_loading());
        assert_eq!(cache.error(), None);
    }

    #[test]
    fn test_set_status_clamps_progress() {
        let mut cache = DocumentCache::new();
        let a = doc("a");
        let a_id = a.id;
        cache.set_documents(vec![a]);

        cache.set_status(a_id, DocumentStatus::Processing, 150);
        let d = cache.get(a_id).unwrap();
        assert_eq!(d.status, DocumentStatus::Processing);
        assert_eq!(d.progress, 100);
    }
}
