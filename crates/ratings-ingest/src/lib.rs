//! Rated-disability ingestion.
//!
//! Turns a rated-disabilities JSON document into normalized
//! [`RatingRow`](ratings_model::RatingRow)s.
//!
//! # Features
//!
//! - **Extraction**: Locate the record list at `data.attributes.individual_ratings`
//! - **Normalization**: Map each raw record to a fixed-shape row, degrading
//!   unreadable fields instead of failing
//! - **Loading**: Read and parse a document from disk
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use ratings_ingest::load_ratings_file;
//!
//! let batch = load_ratings_file(Path::new("rated_disabilities.json"))?;
//! for defect in &batch.defects {
//!     eprintln!("{defect}");
//! }
//! ```

mod error;
mod normalize;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === Normalization ===
pub use normalize::{FieldDefect, NormalizedBatch, RawRecord, normalize_record, normalize_records};

// === Source Documents ===
pub use source::{RECORD_PATH, extract_records, load_ratings_file, parse_source};
