//! Comma- and tab-delimited text.

use ratings_model::Column;

use crate::document::ExportRow;
use crate::error::{ExportError, Result};
use crate::format::ExportFormat;

fn delimiter_for(format: ExportFormat) -> Result<u8> {
    format
        .delimiter()
        .ok_or_else(|| ExportError::encode(format, "format is not delimited"))
}

pub(crate) fn render(rows: &[ExportRow], format: ExportFormat) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter_for(format)?)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer
        .write_record(Column::headers())
        .map_err(|e| ExportError::encode(format, e))?;
    for row in rows {
        writer
            .write_record(row.cells())
            .map_err(|e| ExportError::encode(format, e))?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::encode(format, e.error()))
}

pub(crate) fn parse(bytes: &[u8], format: ExportFormat) -> Result<Vec<ExportRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_for(format)?)
        .has_headers(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| ExportError::import(format, e))?
        .clone();
    let expected = Column::headers();
    if headers.iter().ne(expected.iter().copied()) {
        return Err(ExportError::import(
            format,
            format!("unexpected header row: {}", headers.iter().collect::<Vec<_>>().join(", ")),
        ));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ExportError::import(format, e))?;
        let cells: [String; 5] =
            std::array::from_fn(|i| record.get(i).unwrap_or_default().to_string());
        rows.push(ExportRow::from_cells(cells));
    }
    Ok(rows)
}
