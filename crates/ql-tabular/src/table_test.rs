//! Tests for table data construction and JSON ingestion.

use crate::infer::ColumnType;
use crate::record::Record;
use crate::table::TableData;
use crate::CellValue;

// ── Construction ───────────────────────────────────────────────────────

#[test]
fn from_records_aligns_rows() {
    let data = TableData::from_records(
        "t",
        vec!["a".to_string(), "b".to_string()],
        vec![
            Record::Row(vec![CellValue::Integer(1), CellValue::Integer(2)]),
            Record::Row(vec![CellValue::Integer(3)]),
        ],
    )
    .unwrap();
    assert_eq!(data.rows()[1], vec![CellValue::Integer(3), CellValue::Null]);
}

#[test]
fn emptiness_checks() {
    let no_rows = TableData::new("t", vec!["a".to_string()], vec![]);
    assert!(no_rows.is_empty_rows());
    assert!(!no_rows.is_empty_header());
    assert!(no_rows.is_empty());

    let no_headers = TableData::new("t", vec![], vec![vec![]]);
    assert!(no_headers.is_empty_header());
    assert!(no_headers.is_empty());
}

#[test]
fn column_types_run_per_column() {
    let data = TableData::new(
        "t",
        vec!["i".to_string(), "r".to_string(), "s".to_string()],
        vec![
            vec![
                CellValue::Integer(1),
                CellValue::Real(1.5),
                CellValue::from("x"),
            ],
            vec![
                CellValue::from("2"),
                CellValue::Integer(2),
                CellValue::from("y"),
            ],
        ],
    );
    assert_eq!(
        data.column_types(),
        vec![ColumnType::Integer, ColumnType::Real, ColumnType::Text]
    );
}

// ── JSON ingestion ─────────────────────────────────────────────────────

#[test]
fn json_array_of_objects() {
    let data = TableData::from_json_str(
        "t",
        r#"[{"a": 1, "b": "x"}, {"b": "y", "c": 2.5}]"#,
    )
    .unwrap();
    assert_eq!(data.headers(), ["a", "b", "c"]);
    assert_eq!(
        data.rows()[0],
        vec![
            CellValue::Integer(1),
            CellValue::Text("x".to_string()),
            CellValue::Null
        ]
    );
    assert_eq!(
        data.rows()[1],
        vec![
            CellValue::Null,
            CellValue::Text("y".to_string()),
            CellValue::Real(2.5)
        ]
    );
}

#[test]
fn json_array_of_arrays_uses_first_row_as_headers() {
    let data =
        TableData::from_json_str("t", r#"[["a", "b"], [1, 2], [3, 4]]"#).unwrap();
    assert_eq!(data.headers(), ["a", "b"]);
    assert_eq!(data.num_rows(), 2);
    assert_eq!(
        data.rows()[0],
        vec![CellValue::Integer(1), CellValue::Integer(2)]
    );
}

#[test]
fn json_non_array_rejected() {
    assert!(TableData::from_json_str("t", r#"{"a": 1}"#).is_err());
    assert!(TableData::from_json_str("t", "42").is_err());
}

#[test]
fn json_empty_array_rejected() {
    assert!(TableData::from_json_str("t", "[]").is_err());
}

#[test]
fn json_non_string_header_rejected() {
    assert!(TableData::from_json_str("t", r#"[[1, 2], [3, 4]]"#).is_err());
}

#[test]
fn json_mixed_rows_rejected() {
    assert!(TableData::from_json_str("t", r#"[{"a": 1}, [1]]"#).is_err());
}

#[test]
fn json_parse_error_surfaces() {
    let err = TableData::from_json_str("t", "not json").unwrap_err();
    assert!(err.to_string().starts_with("[T006]"), "{err}");
}
