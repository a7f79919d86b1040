//! Error types for rendering, writing and re-reading exports.

use std::path::PathBuf;
use thiserror::Error;

use crate::format::ExportFormat;

/// Errors raised by the export layer.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The destination could not be written. Nothing was left at `path`.
    #[error("failed to write {format} export to {path}: {source}")]
    ExportWriteFailed {
        path: PathBuf,
        format: ExportFormat,
        #[source]
        source: std::io::Error,
    },

    /// The rows could not be encoded in the requested format.
    #[error("failed to encode {format} export: {message}")]
    Encode {
        format: ExportFormat,
        message: String,
    },

    /// The format is display-only and cannot be parsed back.
    #[error("{format} exports cannot be read back")]
    UnsupportedImport { format: ExportFormat },

    /// A document could not be parsed back into rows.
    #[error("failed to read {format} document: {message}")]
    Import {
        format: ExportFormat,
        message: String,
    },
}

impl ExportError {
    pub fn encode(format: ExportFormat, source: impl std::fmt::Display) -> Self {
        Self::Encode {
            format,
            message: source.to_string(),
        }
    }

    pub fn import(format: ExportFormat, source: impl std::fmt::Display) -> Self {
        Self::Import {
            format,
            message: source.to_string(),
        }
    }

    /// Whether the caller can retry with another destination or format.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ExportWriteFailed { .. } | Self::Encode { .. })
    }
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
