//! Source document extraction and loading.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{IngestError, Result};
use crate::normalize::{NormalizedBatch, normalize_records};

/// Dotted path of the record list inside a rated-disabilities document.
pub const RECORD_PATH: &str = "data.attributes.individual_ratings";

const RECORD_PATH_SEGMENTS: [&str; 3] = ["data", "attributes", "individual_ratings"];

/// Take the record list out of a parsed document.
///
/// # Errors
///
/// Returns [`IngestError::MalformedSource`] when any segment of
/// [`RECORD_PATH`] is missing, when an intermediate value is not an object,
/// or when the final value is not an array. An empty array is valid.
pub fn extract_records(document: Value) -> Result<Vec<Value>> {
    let mut current = document;
    let mut walked: Vec<&str> = Vec::with_capacity(RECORD_PATH_SEGMENTS.len());
    for segment in RECORD_PATH_SEGMENTS {
        walked.push(segment);
        let Value::Object(mut map) = current else {
            let parent = if walked.len() == 1 {
                "<root>".to_string()
            } else {
                walked[..walked.len() - 1].join(".")
            };
            return Err(IngestError::malformed(parent, "expected an object"));
        };
        current = map
            .remove(segment)
            .ok_or_else(|| IngestError::malformed(walked.join("."), "missing key"))?;
    }
    match current {
        Value::Array(records) => Ok(records),
        Value::Null => Err(IngestError::malformed(RECORD_PATH, "record list is null")),
        _ => Err(IngestError::malformed(RECORD_PATH, "expected an array")),
    }
}

/// Parse document text and normalize its records.
pub fn parse_source(text: &str) -> Result<NormalizedBatch> {
    let document: Value =
        serde_json::from_str(text).map_err(|source| IngestError::InvalidJson { source })?;
    let records = extract_records(document)?;
    Ok(normalize_records(records))
}

/// Read a rated-disabilities JSON file and normalize its records.
pub fn load_ratings_file(path: &Path) -> Result<NormalizedBatch> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    debug!(path = %path.display(), bytes = text.len(), "read source file");

    let batch = parse_source(&text)?;
    if !batch.defects.is_empty() {
        warn!(
            path = %path.display(),
            defects = batch.defects.len(),
            "some record fields could not be read and were left empty"
        );
    }
    info!(path = %path.display(), records = batch.len(), "loaded ratings");
    Ok(batch)
}
