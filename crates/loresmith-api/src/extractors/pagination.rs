//! Pagination and filter query parameter extractors.

use serde::{Deserialize, Serialize};

use loresmith_core::types::filter::DocumentFilter;
use loresmith_core::types::pagination::PageRequest;

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based, default: 1).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page (default: 25, max: 100).
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    25
}

impl PaginationParams {
    /// Converts to a clamped `PageRequest`.
    pub fn into_page_request(self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

/// Query parameters for document list filtering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterParams {
    /// Filter by lifecycle status.
    pub status: Option<String>,
    /// Filter by category.
    pub category: Option<String>,
    /// Filter by a single tag.
    pub tag: Option<String>,
    /// Filter by favorite flag.
    pub favorite: Option<bool>,
}

impl FilterParams {
    /// Converts to the repository filter type.
    pub fn into_filter(self) -> DocumentFilter {
        DocumentFilter {
            status: self.status,
            category: self.category,
            tag: self.tag,
            favorite: self.favorite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply() {
        let params: PaginationParams = serde_json::from_str("{}").expect("parse");
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 25);
    }

    #[test]
    fn test_into_page_request_clamps() {
        let params = PaginationParams {
            page: 0,
            limit: 9999,
        };
        let page = params.into_page_request();
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 100);
    }
}
