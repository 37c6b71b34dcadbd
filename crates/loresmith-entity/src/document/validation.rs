//! Document validation result value object.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Structured judgment produced when a document's content is validated.
///
/// Stored in the `validation_result` JSONB column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the document passed validation overall.
    pub is_valid: bool,
    /// Overall quality score, 0-100.
    pub score: i32,
    /// Human-readable issues found during validation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
    /// Per-dimension metric scores, 0-100 each.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metrics: BTreeMap<String, i32>,
}

impl ValidationResult {
    /// Convert to a `serde_json::Value` for storage.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Parse from a `serde_json::Value`, tolerating missing fields.
    pub fn from_json_value(value: &serde_json::Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_tolerates_partial_payload() {
        let parsed = ValidationResult::from_json_value(&json!({"is_valid": true, "score": 88}));
        assert!(parsed.is_valid);
        assert_eq!(parsed.score, 88);
        assert!(parsed.issues.is_empty());
        assert!(parsed.metrics.is_empty());
    }

    #[test]
    fn test_metrics_survive_storage_shape() {
        let result = ValidationResult {
            is_valid: false,
            score: 40,
            issues: vec!["too few pages".to_string()],
            metrics: BTreeMap::from([("coherence".to_string(), 35), ("length".to_string(), 45)]),
        };
        let value = result.to_json_value();
        assert_eq!(value["metrics"]["coherence"], json!(35));
        assert_eq!(ValidationResult::from_json_value(&value), result);
    }
}
