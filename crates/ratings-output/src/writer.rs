//! Writing rendered documents to disk.

use std::borrow::Borrow;
use std::io::Write;
use std::path::{Path, PathBuf};

use ratings_model::RatingRow;
use tempfile::NamedTempFile;

use crate::document::{ExportDocument, render_document};
use crate::error::{ExportError, Result};
use crate::format::ExportFormat;

/// Outcome of a successful export write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenExport {
    pub path: PathBuf,
    pub format: ExportFormat,
    pub bytes: usize,
}

/// Write `document` to `path` atomically.
///
/// The bytes go to a temporary file next to the destination, which is
/// synced and then renamed over `path`. On failure the temporary file is
/// removed and any existing file at `path` is left as it was.
pub fn write_document(document: &ExportDocument, path: &Path) -> Result<WrittenExport> {
    let format = document.format();
    let write_failed = |source: std::io::Error| ExportError::ExportWriteFailed {
        path: path.to_path_buf(),
        format,
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent).map_err(write_failed)?;
    temp.write_all(document.bytes()).map_err(write_failed)?;
    temp.as_file().sync_all().map_err(write_failed)?;
    temp.persist(path).map_err(|e| write_failed(e.error))?;

    tracing::info!(
        path = %path.display(),
        format = format.slug(),
        bytes = document.len(),
        "wrote export"
    );
    Ok(WrittenExport {
        path: path.to_path_buf(),
        format,
        bytes: document.len(),
    })
}

/// Render `rows` in order and write them to `path`.
pub fn export_rows<R: Borrow<RatingRow>>(
    rows: &[R],
    format: ExportFormat,
    path: &Path,
) -> Result<WrittenExport> {
    let document = render_document(rows, format)?;
    tracing::debug!(rows = rows.len(), format = format.slug(), "rendered export");
    write_document(&document, path).inspect_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "export write failed");
    })
}
