//! Document metadata value object.
//!
//! Metadata is stored as an open JSON map but validated against an
//! allow-list of recognized keys at the service boundary. Free-form
//! payloads belong under the `custom` key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use loresmith_core::{AppError, AppResult};

/// Keys accepted in a document metadata map.
pub const ALLOWED_KEYS: &[&str] = &[
    "title",
    "author",
    "subject",
    "description",
    "source",
    "date",
    "language",
    "classification",
    "page_count",
    "word_count",
    "keywords",
    "custom",
];

/// A validated document metadata map.
///
/// Wraps the open JSON object with key validation and shallow-merge
/// semantics. Stored in the `metadata` JSONB column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentMetadata(pub BTreeMap<String, serde_json::Value>);

impl DocumentMetadata {
    /// Create empty metadata.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse and validate a metadata map from a JSON value.
    ///
    /// The value must be a JSON object and every key must be on the
    /// allow-list.
    pub fn from_json_value(value: &serde_json::Value) -> AppResult<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| AppError::validation("Metadata must be a JSON object"))?;

        for key in map.keys() {
            if !ALLOWED_KEYS.contains(&key.as_str()) {
                return Err(AppError::validation(format!(
                    "Unrecognized metadata key '{key}'. Allowed keys: {}",
                    ALLOWED_KEYS.join(", ")
                )));
            }
        }

        Ok(Self(
            map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        ))
    }

    /// Convert to a `serde_json::Value` for storage.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::to_value(&self.0).unwrap_or_default()
    }

    /// Shallow-merge `other` into this map (incoming keys win).
    pub fn merge(&mut self, other: &DocumentMetadata) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// True when the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_unknown_key() {
        let err = DocumentMetadata::from_json_value(&json!({"favorite_color": "blue"}))
            .expect_err("unknown key must fail");
        assert!(err.message.contains("favorite_color"));
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(DocumentMetadata::from_json_value(&json!(["a", "b"])).is_err());
    }

    #[test]
    fn test_merge_is_shallow_and_incoming_wins() {
        let mut base =
            DocumentMetadata::from_json_value(&json!({"author": "Ada", "title": "Lore"})).unwrap();
        let incoming =
            DocumentMetadata::from_json_value(&json!({"author": "Grace", "page_count": 12}))
                .unwrap();

        base.merge(&incoming);

        let merged = base.to_json_value();
        assert_eq!(merged["author"], json!("Grace"));
        assert_eq!(merged["title"], json!("Lore"));
        assert_eq!(merged["page_count"], json!(12));
    }

    #[test]
    fn test_custom_key_carries_arbitrary_payload() {
        let meta =
            DocumentMetadata::from_json_value(&json!({"custom": {"anything": [1, 2, 3]}})).unwrap();
        assert_eq!(meta.to_json_value()["custom"]["anything"], json!([1, 2, 3]));
    }
}
