//! Markdown pipe tables.

use ratings_model::Column;

use crate::document::ExportRow;
use crate::error::{ExportError, Result};
use crate::format::ExportFormat;

/// Alignment row: ratings right-aligned, everything else left-aligned.
const ALIGNMENT_ROW: &str = "|:---|---:|:---|:---|:---|";

pub(crate) fn escape_cell(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '|' => escaped.push_str("\\|"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub(crate) fn unescape_cell(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl IntoIterator<Item = &'a str>) {
    out.push('|');
    for cell in cells {
        out.push(' ');
        out.push_str(&escape_cell(cell));
        out.push_str(" |");
    }
    out.push('\n');
}

pub(crate) fn render(rows: &[ExportRow]) -> String {
    let mut out = String::new();
    push_line(&mut out, Column::headers());
    out.push_str(ALIGNMENT_ROW);
    out.push('\n');
    for row in rows {
        push_line(&mut out, row.cells());
    }
    out
}

/// Split a table line on unescaped pipes.
fn split_line(line: &str) -> Option<Vec<String>> {
    let inner = line.trim().strip_prefix('|')?;
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                current.push(ch);
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            '|' => {
                cells.push(current.strip_prefix(' ').unwrap_or(&current).to_string());
                current.clear();
            }
            other => current.push(other),
        }
    }
    if !current.trim().is_empty() {
        return None;
    }
    Some(
        cells
            .into_iter()
            .map(|cell| unescape_cell(cell.strip_suffix(' ').unwrap_or(&cell)))
            .collect(),
    )
}

pub(crate) fn parse(text: &str) -> Result<Vec<ExportRow>> {
    let format = ExportFormat::Markdown;
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let header = lines
        .next()
        .and_then(split_line)
        .ok_or_else(|| ExportError::import(format, "missing header row"))?;
    if header.iter().map(String::as_str).ne(Column::headers()) {
        return Err(ExportError::import(
            format,
            format!("unexpected header row: {}", header.join(", ")),
        ));
    }
    match lines.next() {
        Some(line) if line.trim() == ALIGNMENT_ROW => {}
        _ => return Err(ExportError::import(format, "missing alignment row")),
    }

    let mut rows = Vec::new();
    for (index, line) in lines.enumerate() {
        let number = index + 1;
        let cells = split_line(line).ok_or_else(|| {
            ExportError::import(format, format!("row {number}: not a table line"))
        })?;
        let cells: [String; 5] = cells.try_into().map_err(|cells: Vec<String>| {
            let found = cells.len();
            ExportError::import(format, format!("row {number}: expected 5 cells, found {found}"))
        })?;
        rows.push(ExportRow::from_cells(cells));
    }
    Ok(rows)
}
