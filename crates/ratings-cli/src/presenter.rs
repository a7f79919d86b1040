//! Presentation capability used by interactive sessions.
//!
//! The engine never prints. A front-end implements [`Presenter`] to show a
//! ranked view and to collect filter and export choices from the user.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use ratings_core::{OrderingMode, RankedResult};
use ratings_model::{Column, FilterToken, NOT_AVAILABLE, RatingRow, SortDirection};
use ratings_output::ExportFormat;

/// Message shown when a selection leaves no rows.
pub const NO_RESULTS: &str = "No results matched your criteria.";

/// Message shown when an empty result is offered for export.
pub const NO_DATA_TO_EXPORT: &str = "No data to export";

/// Where and how to export the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportChoice {
    pub format: ExportFormat,
    pub path: PathBuf,
}

/// Front-end hooks for an interactive session.
///
/// `Ok(None)` from a prompt means the user cancelled.
pub trait Presenter {
    fn render_table(&mut self, result: &RankedResult<'_>) -> io::Result<()>;

    /// Ask for filter labels. An empty list is a real answer, not a cancel.
    fn prompt_filters(&mut self) -> io::Result<Option<Vec<String>>>;

    fn prompt_export(&mut self, formats: &[ExportFormat]) -> io::Result<Option<ExportChoice>>;

    fn report(&mut self, message: &str) -> io::Result<()>;
}

/// Line-oriented presenter over any reader and writer.
pub struct TerminalPresenter<R, W> {
    input: R,
    output: W,
    styled: bool,
    width: u16,
}

impl<R: BufRead, W: Write> TerminalPresenter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            styled: false,
            width: 120,
        }
    }

    /// Emit ANSI styling in tables.
    #[must_use]
    pub fn with_styling(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Read one line; `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        self.read_line()
    }

    fn build_table(&self, rows: &[&RatingRow]) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .apply_modifier(UTF8_SOLID_INNER_BORDERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_width(self.width);
        if self.styled {
            table.enforce_styling();
        } else {
            table.force_no_tty();
        }
        table.set_header(
            Column::ALL
                .iter()
                .map(|column| header_cell(column.label()))
                .collect::<Vec<_>>(),
        );
        for row in rows {
            table.add_row(vec![
                decision_cell(row),
                rating_cell(row),
                Cell::new(row.condition()),
                Cell::new(row.description()),
                Cell::new(row.cell(Column::Static)),
            ]);
        }
        align_column(&mut table, Column::Rating.index(), CellAlignment::Right);
        align_column(&mut table, Column::Static.index(), CellAlignment::Center);
        table
    }
}

impl<R: BufRead, W: Write> Presenter for TerminalPresenter<R, W> {
    fn render_table(&mut self, result: &RankedResult<'_>) -> io::Result<()> {
        if result.is_empty() {
            return writeln!(self.output, "{NO_RESULTS}");
        }
        let table = self.build_table(result.rows());
        writeln!(self.output, "{table}")?;
        writeln!(
            self.output,
            "Showing {} of {} ratings, {}.",
            result.len(),
            result.source_len(),
            ordering_label(result.ordering())
        )
    }

    fn prompt_filters(&mut self) -> io::Result<Option<Vec<String>>> {
        writeln!(self.output, "Filters:")?;
        for token in FilterToken::ALL {
            writeln!(self.output, "  {}. {}", token.menu_key(), token.label())?;
        }
        let Some(answer) = self.ask("Choose filters (comma-separated numbers, q to quit): ")? else {
            return Ok(None);
        };
        if answer.eq_ignore_ascii_case("q") || answer.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }
        Ok(Some(
            answer
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect(),
        ))
    }

    fn prompt_export(&mut self, formats: &[ExportFormat]) -> io::Result<Option<ExportChoice>> {
        writeln!(self.output, "Export formats:")?;
        for format in formats {
            writeln!(self.output, "  {}. {}", format.menu_key(), format.label())?;
        }
        loop {
            let Some(answer) = self.ask("Export as (number, blank to skip): ")? else {
                return Ok(None);
            };
            if answer.is_empty() || answer == "0" {
                return Ok(None);
            }
            let Some(format) = answer
                .parse::<ExportFormat>()
                .ok()
                .filter(|format| formats.contains(format))
            else {
                writeln!(self.output, "Unknown export format: {answer}")?;
                continue;
            };

            let default_name = format.default_file_name();
            let Some(name) = self.ask(&format!("File name [{default_name}]: "))? else {
                return Ok(None);
            };
            let path = if name.is_empty() {
                PathBuf::from(default_name)
            } else {
                PathBuf::from(name)
            };
            return Ok(Some(ExportChoice { format, path }));
        }
    }

    fn report(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }
}

fn ordering_label(ordering: OrderingMode) -> String {
    match ordering {
        OrderingMode::DefaultRanked => "service connected first, highest rating first".to_string(),
        OrderingMode::ColumnSort { column, direction } => {
            let direction = match direction {
                SortDirection::Ascending => "ascending",
                SortDirection::Descending => "descending",
            };
            format!("sorted by {column} {direction}")
        }
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(value: &str) -> Cell {
    Cell::new(value).add_attribute(Attribute::Dim)
}

fn decision_cell(row: &RatingRow) -> Cell {
    let decision = row.decision();
    let cell = Cell::new(decision.display());
    if decision.is_service_connected() {
        cell.fg(Color::Green)
    } else if decision.is_not_service_connected() {
        cell.fg(Color::Yellow)
    } else {
        cell
    }
}

fn rating_cell(row: &RatingRow) -> Cell {
    match row.rating_percent() {
        Some(rating) => Cell::new(rating),
        None => dim_cell(NOT_AVAILABLE),
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
