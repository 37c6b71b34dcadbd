//! List filter types for document queries.

use serde::{Deserialize, Serialize};

/// Equality predicates applied to document listings.
///
/// Every field is optional; `None` means "do not filter on this field".
/// The repository turns each present field into a `WHERE` clause.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentFilter {
    /// Filter by lifecycle status (lowercase string form).
    pub status: Option<String>,
    /// Filter by category label.
    pub category: Option<String>,
    /// Filter by a single tag (containment).
    pub tag: Option<String>,
    /// Filter by favorite flag.
    pub favorite: Option<bool>,
}

impl DocumentFilter {
    /// True when no predicate is set.
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.category.is_none()
            && self.tag.is_none()
            && self.favorite.is_none()
    }
}
