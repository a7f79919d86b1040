//! CLI argument definitions for the ratings viewer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use ratings_model::Column;
use ratings_output::ExportFormat;

#[derive(Parser)]
#[command(
    name = "ratings",
    version,
    about = "View, filter and export VA disability rating records",
    long_about = "View, filter and export VA disability rating records.\n\n\
                  Reads the rated-disabilities JSON document, ranks service-connected\n\
                  conditions first by rating, and exports the view as CSV, TSV,\n\
                  Markdown, XLSX or a plain-text grid."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow condition and description text in trace logs.
    ///
    /// Rating records are medical data; by default they are redacted.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Filter, rank and print ratings, optionally exporting the result.
    View(ViewArgs),

    /// Menu-driven session: choose filters, review, then export.
    Interactive(InteractiveArgs),

    /// List the supported export formats.
    Formats,
}

#[derive(Parser)]
pub struct ViewArgs {
    /// Rated-disabilities JSON document.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Filter to apply; repeat to combine (all, service-connected,
    /// not-service-connected, static, non-static, or menu numbers 0-4).
    #[arg(long = "filter", value_name = "FILTER", default_value = "all")]
    pub filters: Vec<String>,

    /// Case-insensitive text that must appear somewhere in a row.
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Sort by one column instead of the default ranking.
    #[arg(long = "sort-by", value_name = "COLUMN")]
    pub sort_by: Option<Column>,

    /// Sort the chosen column ascending (default is descending).
    #[arg(long = "ascending", requires = "sort_by")]
    pub ascending: bool,

    /// Write the result to this file.
    #[arg(long = "export", value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Export format (inferred from the file extension when omitted).
    #[arg(long = "format", value_name = "FORMAT", requires = "export")]
    pub format: Option<ExportFormat>,
}

#[derive(Parser)]
pub struct InteractiveArgs {
    /// Rated-disabilities JSON document.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
