//! Record normalization.
//!
//! A raw record is an untyped JSON object. Each field is read on its own;
//! a field that cannot be read degrades to its absent value and is reported
//! as a [`FieldDefect`], never as an error.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use ratings_model::{Decision, RatingRow};

/// Source field names as they appear in the rated-disabilities payload.
pub mod fields {
    pub const DECISION: &str = "decision";
    pub const RATING_PERCENTAGE: &str = "rating_percentage";
    pub const CONDITION: &str = "diagnostic_type_name";
    pub const DESCRIPTION: &str = "diagnostic_text";
    pub const STATIC_IND: &str = "static_ind";
    pub const RECORD: &str = "record";
}

/// The fields of one source record the normalizer reads.
///
/// Unknown keys are ignored; `null` and missing keys both read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub decision: Option<Value>,
    #[serde(default)]
    pub rating_percentage: Option<Value>,
    #[serde(default)]
    pub diagnostic_type_name: Option<Value>,
    #[serde(default)]
    pub diagnostic_text: Option<Value>,
    #[serde(default)]
    pub static_ind: Option<Value>,
}

impl RawRecord {
    /// Read a record from a JSON value.
    ///
    /// Returns an error message when the value is not an object.
    pub fn from_value(value: Value) -> std::result::Result<Self, String> {
        if !value.is_object() {
            return Err(format!("expected an object, found {}", json_kind(&value)));
        }
        serde_json::from_value(value).map_err(|e| e.to_string())
    }
}

/// A field that could not be read and was replaced by its absent value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefect {
    /// Zero-based position of the record in the source list.
    pub record: usize,
    pub field: &'static str,
    pub reason: String,
}

impl fmt::Display for FieldDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "record {}: field '{}' unreadable ({})",
            self.record, self.field, self.reason
        )
    }
}

/// Rows normalized from one document plus the fields that degraded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedBatch {
    pub rows: Vec<RatingRow>,
    pub defects: Vec<FieldDefect>,
}

impl NormalizedBatch {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Normalize every record of a source list, in order.
pub fn normalize_records(records: Vec<Value>) -> NormalizedBatch {
    let mut batch = NormalizedBatch {
        rows: Vec::with_capacity(records.len()),
        defects: Vec::new(),
    };
    for (index, value) in records.into_iter().enumerate() {
        let raw = match RawRecord::from_value(value) {
            Ok(raw) => raw,
            Err(reason) => {
                batch.defects.push(FieldDefect {
                    record: index,
                    field: fields::RECORD,
                    reason,
                });
                RawRecord::default()
            }
        };
        let (row, defects) = normalize_record(&raw, index);
        batch.rows.push(row);
        batch.defects.extend(defects);
    }
    batch
}

/// Normalize one raw record.
///
/// `index` only labels any defects that are reported.
pub fn normalize_record(raw: &RawRecord, index: usize) -> (RatingRow, Vec<FieldDefect>) {
    let mut defects = Vec::new();
    let mut defect = |field: &'static str, reason: String| {
        defects.push(FieldDefect {
            record: index,
            field,
            reason,
        });
    };

    let decision = match &raw.decision {
        None => Decision::missing(),
        Some(Value::String(text)) => Decision::from_raw(text.as_str()),
        Some(other) => {
            defect(
                fields::DECISION,
                format!("expected a string, found {}", json_kind(other)),
            );
            Decision::from_raw(other.to_string())
        }
    };

    let rating_percent = match &raw.rating_percentage {
        None => None,
        Some(value) => match read_percentage(value) {
            Ok(percent) => Some(percent),
            Err(reason) => {
                defect(fields::RATING_PERCENTAGE, reason);
                None
            }
        },
    };

    let condition = read_text(raw.diagnostic_type_name.as_ref()).unwrap_or_else(|reason| {
        defect(fields::CONDITION, reason);
        String::new()
    });

    let description = read_text(raw.diagnostic_text.as_ref()).unwrap_or_else(|reason| {
        defect(fields::DESCRIPTION, reason);
        String::new()
    });

    let is_static = match &raw.static_ind {
        None => None,
        Some(Value::Bool(flag)) => Some(*flag),
        Some(other) => {
            defect(
                fields::STATIC_IND,
                format!("expected a boolean, found {}", json_kind(other)),
            );
            None
        }
    };

    let row = RatingRow::new(decision, rating_percent, condition, description, is_static);
    (row, defects)
}

/// Read a non-negative whole percentage from a number or a digit string.
fn read_percentage(value: &Value) -> std::result::Result<u32, String> {
    match value {
        Value::Number(number) => {
            if let Some(whole) = number.as_u64() {
                return u32::try_from(whole).map_err(|_| format!("{whole} is out of range"));
            }
            match number.as_f64() {
                Some(float)
                    if float >= 0.0 && float.fract() == 0.0 && float <= f64::from(u32::MAX) =>
                {
                    Ok(float as u32)
                }
                _ => Err(format!("{number} is not a non-negative whole number")),
            }
        }
        Value::String(text) => text
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("'{text}' is not a non-negative whole number")),
        other => Err(format!("expected a number, found {}", json_kind(other))),
    }
}

fn read_text(value: Option<&Value>) -> std::result::Result<String, String> {
    match value {
        None => Ok(String::new()),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(format!("expected a string, found {}", json_kind(other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratings_model::DecisionKind;
    use serde_json::json;

    fn normalize_one(value: Value) -> (RatingRow, Vec<FieldDefect>) {
        let raw = RawRecord::from_value(value).expect("object record");
        normalize_record(&raw, 0)
    }

    #[test]
    fn complete_record_maps_every_field() {
        let (row, defects) = normalize_one(json!({
            "decision": "Service Connected",
            "rating_percentage": 30,
            "diagnostic_type_name": "Tinnitus",
            "diagnostic_text": "Recurrent tinnitus",
            "static_ind": true,
            "effective_date": "2021-03-01"
        }));
        assert!(defects.is_empty());
        assert_eq!(row.decision().kind(), DecisionKind::ServiceConnected);
        assert_eq!(row.rating_percent(), Some(30));
        assert_eq!(row.condition(), "Tinnitus");
        assert_eq!(row.description(), "Recurrent tinnitus");
        assert_eq!(row.is_static(), Some(true));
    }

    #[test]
    fn missing_fields_become_absent_without_defects() {
        let (row, defects) = normalize_one(json!({}));
        assert!(defects.is_empty());
        assert_eq!(row.decision().kind(), DecisionKind::Unknown);
        assert_eq!(row.decision().display(), "N/A");
        assert_eq!(row.rating_percent(), None);
        assert_eq!(row.condition(), "");
        assert_eq!(row.is_static(), None);
    }

    #[test]
    fn null_fields_read_as_missing() {
        let (row, defects) = normalize_one(json!({
            "decision": null,
            "rating_percentage": null,
            "static_ind": null
        }));
        assert!(defects.is_empty());
        assert_eq!(row.rating_percent(), None);
        assert_eq!(row.is_static(), None);
    }

    #[test]
    fn zero_rating_stays_distinct_from_missing() {
        let (row, _) = normalize_one(json!({ "rating_percentage": 0 }));
        assert_eq!(row.rating_percent(), Some(0));
    }

    #[test]
    fn malformed_fields_degrade_individually() {
        let (row, defects) = normalize_one(json!({
            "decision": "Not Service Connected",
            "rating_percentage": -10,
            "diagnostic_type_name": ["not", "text"],
            "diagnostic_text": "Left knee strain",
            "static_ind": "yes"
        }));
        assert_eq!(row.decision().kind(), DecisionKind::NotServiceConnected);
        assert_eq!(row.rating_percent(), None);
        assert_eq!(row.condition(), "");
        assert_eq!(row.description(), "Left knee strain");
        assert_eq!(row.is_static(), None);

        let fields: Vec<&str> = defects.iter().map(|d| d.field).collect();
        assert_eq!(
            fields,
            vec!["rating_percentage", "diagnostic_type_name", "static_ind"]
        );
    }

    #[test]
    fn numeric_strings_and_whole_floats_are_accepted() {
        let (row, defects) = normalize_one(json!({ "rating_percentage": " 50 " }));
        assert!(defects.is_empty());
        assert_eq!(row.rating_percent(), Some(50));

        let (row, defects) = normalize_one(json!({ "rating_percentage": 70.0 }));
        assert!(defects.is_empty());
        assert_eq!(row.rating_percent(), Some(70));

        let (row, defects) = normalize_one(json!({ "rating_percentage": 12.5 }));
        assert_eq!(defects.len(), 1);
        assert_eq!(row.rating_percent(), None);
    }

    #[test]
    fn non_string_decision_keeps_raw_text() {
        let (row, defects) = normalize_one(json!({ "decision": 1 }));
        assert_eq!(defects.len(), 1);
        assert_eq!(row.decision().kind(), DecisionKind::Unknown);
        assert_eq!(row.decision().display(), "1");
    }

    #[test]
    fn non_object_record_degrades_to_empty_row() {
        let batch =
            normalize_records(vec![json!("oops"), json!({ "decision": "Service Connected" })]);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.defects.len(), 1);
        assert_eq!(batch.defects[0].record, 0);
        assert_eq!(batch.defects[0].field, "record");
        assert_eq!(batch.rows[0].decision().kind(), DecisionKind::Unknown);
        assert!(batch.rows[1].decision().is_service_connected());
    }

    #[test]
    fn defect_display_is_actionable() {
        let defect = FieldDefect {
            record: 3,
            field: fields::STATIC_IND,
            reason: "expected a boolean, found a string".to_string(),
        };
        assert_eq!(
            defect.to_string(),
            "record 3: field 'static_ind' unreadable (expected a boolean, found a string)"
        );
    }
}
