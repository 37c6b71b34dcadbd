//! Document lifecycle status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a document.
///
/// Transitions are monotonic in intent (uploading → uploaded →
/// processing → complete, with `error` reachable from any non-terminal
/// state), but no strict transition table is enforced: the update API
/// may set any status directly as an explicit escape hatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "document_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Upload in progress.
    Uploading,
    /// Upload finished, not yet processed.
    Uploaded,
    /// Content extraction pipeline is running.
    Processing,
    /// A processing or upload step failed.
    Error,
    /// Fully processed.
    Complete,
}

impl DocumentStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uploading => "uploading",
            Self::Uploaded => "uploaded",
            Self::Processing => "processing",
            Self::Error => "error",
            Self::Complete => "complete",
        }
    }

    /// Whether this status is at or beyond the `uploaded` stage.
    ///
    /// The progress-promotion rule only promotes `uploading` documents;
    /// anything further along is never demoted.
    pub fn is_at_least_uploaded(&self) -> bool {
        !matches!(self, Self::Uploading)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = loresmith_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uploading" => Ok(Self::Uploading),
            "uploaded" => Ok(Self::Uploaded),
            "processing" => Ok(Self::Processing),
            "error" => Ok(Self::Error),
            "complete" => Ok(Self::Complete),
            _ => Err(loresmith_core::AppError::validation(format!(
                "Invalid document status: '{s}'. Expected one of: uploading, uploaded, processing, error, complete"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_str() {
        for s in ["uploading", "uploaded", "processing", "error", "complete"] {
            let status: DocumentStatus = s.parse().expect("should parse");
            assert_eq!(status.as_str(), s);
        }
    }

    #[test]
    fn test_invalid_status_rejected() {
        assert!("archived".parse::<DocumentStatus>().is_err());
    }

    #[test]
    fn test_uploaded_threshold() {
        assert!(!DocumentStatus::Uploading.is_at_least_uploaded());
        assert!(DocumentStatus::Uploaded.is_at_least_uploaded());
        assert!(DocumentStatus::Complete.is_at_least_uploaded());
    }
}
