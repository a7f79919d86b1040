//! Plain-text grid tables for terminals and pasting into notes.

use comfy_table::presets::ASCII_FULL;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use ratings_model::Column;

use crate::document::ExportRow;

pub(crate) fn render(rows: &[ExportRow]) -> String {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .force_no_tty()
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(Column::headers().to_vec());
    for row in rows {
        table.add_row(row.cells().to_vec());
    }
    if let Some(column) = table.column_mut(Column::Rating.index()) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    let mut out = table.to_string();
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_ascii_borders_and_all_columns() {
        let rows = vec![ExportRow::from_cells(
            ["Service Connected", "50", "PTSD", "", "Yes"].map(str::to_string),
        )];
        let rendered = render(&rows);
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[0].starts_with("+-"));
        assert!(lines[1].contains("Decision") && lines[1].contains("Rating%"));
        assert!(
            lines
                .iter()
                .any(|line| line.contains("Service Connected") && line.contains("PTSD"))
        );
        assert!(rendered.is_ascii());
        assert!(rendered.ends_with("+\n"));
    }

    #[test]
    fn long_cells_are_not_wrapped() {
        let description = "x".repeat(300);
        let rows = vec![ExportRow::from_cells(
            ["Service Connected", "10", "Knee", description.as_str(), "No"].map(str::to_string),
        )];
        assert!(render(&rows).contains(&description));
    }
}
