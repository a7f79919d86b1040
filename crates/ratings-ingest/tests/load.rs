//! Integration tests for loading rated-disabilities documents from disk.

use std::io::Write;
use std::path::{Path, PathBuf};

use ratings_ingest::{IngestError, load_ratings_file, parse_source};
use ratings_model::DecisionKind;
use tempfile::NamedTempFile;

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/rated_disabilities.json")
}

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn loads_fixture_in_source_order() {
    let batch = load_ratings_file(&fixture_path()).unwrap();

    assert_eq!(batch.len(), 4);
    assert!(batch.defects.is_empty());

    let conditions: Vec<&str> = batch.rows.iter().map(|r| r.condition()).collect();
    assert_eq!(
        conditions,
        vec![
            "Limitation of flexion, knee",
            "PTSD",
            "Tinnitus",
            "Lumbosacral or cervical strain"
        ]
    );
    assert_eq!(
        batch.rows[0].decision().kind(),
        DecisionKind::NotServiceConnected
    );
    assert_eq!(batch.rows[2].rating_percent(), None);
    assert_eq!(batch.rows[2].is_static(), None);
}

#[test]
fn missing_file_is_reported_with_path() {
    let path = Path::new("/definitely/not/here/ratings.json");
    let err = load_ratings_file(path).unwrap_err();
    match err {
        IngestError::FileNotFound { path: reported } => assert_eq!(reported, path),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn document_without_record_path_is_malformed() {
    let file = write_temp(r#"{ "data": { "attributes": { "combined_disability_rating": 40 } } }"#);
    let err = load_ratings_file(file.path()).unwrap_err();
    match err {
        IngestError::MalformedSource { segment, .. } => {
            assert_eq!(segment, "data.attributes.individual_ratings");
        }
        other => panic!("expected MalformedSource, got {other:?}"),
    }
}

#[test]
fn one_bad_field_does_not_abort_the_rest() {
    let batch = parse_source(
        r#"{ "data": { "attributes": { "individual_ratings": [
            {
                "decision": "Service Connected",
                "rating_percentage": "lots",
                "diagnostic_type_name": "Tinnitus"
            },
            {
                "decision": "Service Connected",
                "rating_percentage": 20,
                "diagnostic_type_name": "Knee"
            }
        ] } } }"#,
    )
    .unwrap();

    assert_eq!(batch.len(), 2);
    assert_eq!(batch.defects.len(), 1);
    assert_eq!(batch.defects[0].record, 0);
    assert_eq!(batch.defects[0].field, "rating_percentage");
    assert_eq!(batch.rows[0].rating_percent(), None);
    assert_eq!(batch.rows[0].condition(), "Tinnitus");
    assert_eq!(batch.rows[1].rating_percent(), Some(20));
}
