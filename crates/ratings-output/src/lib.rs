//! Rating exports.
//!
//! Renders an ordered row sequence into a flat document. Every format
//! carries the same five columns in the same order
//! (`Decision`, `Rating%`, `Condition`, `Description`, `Static`) and differs
//! only in delimiters and markup. A missing rating renders as `N/A`; the
//! static indicator renders as `Yes`, `No` or `N/A`.
//!
//! # Example
//!
//! ```ignore
//! use ratings_output::{ExportFormat, render_document, write_document};
//!
//! let document = render_document(ranked.rows(), ExportFormat::Markdown)?;
//! let written = write_document(&document, Path::new("results.md"))?;
//! println!("wrote {} bytes", written.bytes);
//! ```

mod delimited;
mod document;
mod error;
mod format;
mod grid;
mod import;
mod markdown;
mod writer;
mod xlsx;

pub use document::{ExportDocument, ExportRow, render_document};
pub use error::{ExportError, Result};
pub use format::ExportFormat;
pub use import::parse_document;
pub use writer::{WrittenExport, export_rows, write_document};
