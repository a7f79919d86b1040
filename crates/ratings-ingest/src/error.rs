//! Error types for rated-disability ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort ingestion of a source document.
///
/// Every variant is fatal for the document: the caller must not go on to
/// display or export anything from it.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file not found.
    #[error("source file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Document Errors ===
    /// Document is not valid JSON.
    #[error("source is not valid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    /// Document lacks the expected record list.
    #[error(
        "malformed source: {reason} at '{segment}' (expected data.attributes.individual_ratings)"
    )]
    MalformedSource {
        /// Path prefix where the structure broke off.
        segment: String,
        reason: String,
    },
}

impl IngestError {
    pub fn malformed(segment: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedSource {
            segment: segment.into(),
            reason: reason.into(),
        }
    }

    /// Ingestion errors always end the session for that document.
    pub fn is_fatal(&self) -> bool {
        true
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/ratings.json"),
        };
        assert_eq!(err.to_string(), "source file not found: /path/to/ratings.json");
    }

    #[test]
    fn test_malformed_display_names_segment() {
        let err = IngestError::malformed("data.attributes", "missing key");
        assert_eq!(
            err.to_string(),
            "malformed source: missing key at 'data.attributes' \
             (expected data.attributes.individual_ratings)"
        );
        assert!(err.is_fatal());
    }

    #[test]
    fn test_error_from_invalid_json() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = IngestError::InvalidJson { source };
        assert!(err.to_string().starts_with("source is not valid JSON"));
    }
}
