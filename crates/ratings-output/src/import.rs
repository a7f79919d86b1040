//! Reading exported documents back into rows.

use crate::document::ExportRow;
use crate::error::{ExportError, Result};
use crate::format::ExportFormat;
use crate::{delimited, markdown, xlsx};

/// Parse a previously exported document back into its display rows.
///
/// Grid text is display-only and yields [`ExportError::UnsupportedImport`].
pub fn parse_document(bytes: &[u8], format: ExportFormat) -> Result<Vec<ExportRow>> {
    match format {
        ExportFormat::Csv | ExportFormat::Tsv => delimited::parse(bytes, format),
        ExportFormat::Markdown => {
            let text = std::str::from_utf8(bytes).map_err(|e| ExportError::import(format, e))?;
            markdown::parse(text)
        }
        ExportFormat::Xlsx => xlsx::parse(bytes),
        ExportFormat::Grid => Err(ExportError::UnsupportedImport { format }),
    }
}
