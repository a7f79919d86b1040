//! Export format catalogue.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Comma-delimited text.
    Csv,
    /// Tab-delimited text.
    Tsv,
    /// Pipe table.
    Markdown,
    /// Office Open XML spreadsheet.
    Xlsx,
    /// ASCII grid table, as printed to a terminal.
    Grid,
}

impl ExportFormat {
    /// All formats in menu order.
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Csv,
        ExportFormat::Tsv,
        ExportFormat::Markdown,
        ExportFormat::Xlsx,
        ExportFormat::Grid,
    ];

    /// Menu number used by interactive prompts.
    pub fn menu_key(&self) -> u8 {
        match self {
            ExportFormat::Csv => 1,
            ExportFormat::Tsv => 2,
            ExportFormat::Markdown => 3,
            ExportFormat::Xlsx => 4,
            ExportFormat::Grid => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Tsv => "TXT (tab-separated)",
            ExportFormat::Markdown => "Markdown",
            ExportFormat::Xlsx => "XLSX",
            ExportFormat::Grid => "Grid text",
        }
    }

    /// Short command-line name.
    pub fn slug(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Grid => "grid",
        }
    }

    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv | ExportFormat::Grid => "txt",
            ExportFormat::Markdown => "md",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    /// Suggested destination file name.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "results.csv",
            ExportFormat::Tsv => "results.txt",
            ExportFormat::Markdown => "results.md",
            ExportFormat::Xlsx => "results.xlsx",
            ExportFormat::Grid => "results_grid.txt",
        }
    }

    /// Field delimiter for delimited formats.
    pub fn delimiter(&self) -> Option<u8> {
        match self {
            ExportFormat::Csv => Some(b','),
            ExportFormat::Tsv => Some(b'\t'),
            _ => None,
        }
    }

    /// Returns true when the document is UTF-8 text.
    pub fn is_text(&self) -> bool {
        !matches!(self, ExportFormat::Xlsx)
    }

    /// Guess a format from a destination path's extension.
    ///
    /// `.txt` maps to tab-separated text; grid text must be chosen explicitly.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(ExportFormat::Csv),
            "txt" | "tsv" | "tab" => Some(ExportFormat::Tsv),
            "md" | "markdown" => Some(ExportFormat::Markdown),
            "xlsx" => Some(ExportFormat::Xlsx),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    /// Parse a menu number or format name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "1" | "csv" => Ok(ExportFormat::Csv),
            "2" | "tsv" | "txt" | "tab" => Ok(ExportFormat::Tsv),
            "3" | "md" | "markdown" => Ok(ExportFormat::Markdown),
            "4" | "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            "5" | "grid" => Ok(ExportFormat::Grid),
            _ => Err(format!("Unknown export format: {}", s.trim())),
        }
    }
}
