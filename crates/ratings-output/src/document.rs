//! Rendered export documents.

use std::borrow::Borrow;

use ratings_model::{Column, RatingRow};

use crate::error::Result;
use crate::format::ExportFormat;
use crate::{delimited, grid, markdown, xlsx};

/// A fully rendered export payload.
///
/// Owned by the caller; the export layer keeps no reference to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    format: ExportFormat,
    bytes: Vec<u8>,
}

impl ExportDocument {
    pub fn new(format: ExportFormat, bytes: Vec<u8>) -> Self {
        Self { format, bytes }
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The payload as text, for text formats.
    pub fn as_text(&self) -> Option<&str> {
        if !self.format.is_text() {
            return None;
        }
        std::str::from_utf8(&self.bytes).ok()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// The displayed text of one exported row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExportRow {
    pub decision: String,
    pub rating: String,
    pub condition: String,
    pub description: String,
    pub is_static: String,
}

impl ExportRow {
    pub fn from_row(row: &RatingRow) -> Self {
        Self::from_cells(row.cells())
    }

    pub fn from_cells(cells: [String; 5]) -> Self {
        let [decision, rating, condition, description, is_static] = cells;
        Self {
            decision,
            rating,
            condition,
            description,
            is_static,
        }
    }

    /// Cell text in export column order.
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.decision,
            &self.rating,
            &self.condition,
            &self.description,
            &self.is_static,
        ]
    }

    pub fn cell(&self, column: Column) -> &str {
        self.cells()[column.index()]
    }
}

impl From<&RatingRow> for ExportRow {
    fn from(row: &RatingRow) -> Self {
        Self::from_row(row)
    }
}

/// Render rows, in the given order, into a document of `format`.
pub fn render_document<R: Borrow<RatingRow>>(
    rows: &[R],
    format: ExportFormat,
) -> Result<ExportDocument> {
    let rows: Vec<ExportRow> = rows
        .iter()
        .map(|row| ExportRow::from_row(row.borrow()))
        .collect();
    let bytes = match format {
        ExportFormat::Csv | ExportFormat::Tsv => delimited::render(&rows, format)?,
        ExportFormat::Markdown => markdown::render(&rows).into_bytes(),
        ExportFormat::Xlsx => xlsx::render(&rows)?,
        ExportFormat::Grid => grid::render(&rows).into_bytes(),
    };
    Ok(ExportDocument::new(format, bytes))
}
