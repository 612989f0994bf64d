//! Tests for DDL and the create-and-load pipeline.

use ql_query::make_index_name;
use ql_tabular::{CellValue, ColumnType, DupColHandler, Record, TableData};

use crate::connection::SqliteDb;
use crate::create::CreateTableOptions;
use crate::error::DbError;

// ── Helpers ────────────────────────────────────────────────────────────

fn memdb() -> SqliteDb {
    SqliteDb::open_memory().unwrap()
}

fn sample_data(name: &str) -> TableData {
    TableData::new(
        name,
        vec!["attr_a".to_string(), "attr_b".to_string()],
        vec![
            vec![CellValue::Integer(1), CellValue::Real(0.1)],
            vec![CellValue::Integer(2), CellValue::Real(0.2)],
        ],
    )
}

// ── create_table / create_index ────────────────────────────────────────

#[test]
fn create_table_builds_schema() {
    let db = memdb();
    db.create_table("t", &["a INTEGER".to_string(), "b TEXT".to_string()])
        .unwrap();
    assert_eq!(db.fetch_attr_names("t").unwrap(), ["a", "b"]);
}

#[test]
fn create_table_is_noop_when_table_exists() {
    let db = memdb();
    db.create_table("t", &["a INTEGER".to_string()]).unwrap();
    db.execute("INSERT INTO t VALUES (1)").unwrap();
    // Second call with a different schema leaves the original untouched.
    db.create_table("t", &["other TEXT".to_string()]).unwrap();
    assert_eq!(db.fetch_attr_names("t").unwrap(), ["a"]);
    assert_eq!(db.fetch_num_records("t", None).unwrap(), 1);
}

#[test]
fn create_table_rejects_empty_attrs() {
    let db = memdb();
    assert!(db.create_table("t", &[]).is_err());
}

#[test]
fn create_index_uses_derived_name() {
    let db = memdb();
    db.create_table("t", &["a INTEGER".to_string()]).unwrap();
    db.create_index("t", "a").unwrap();

    let expected = make_index_name("t", "a");
    let rows = db.fetch_sqlite_master().unwrap();
    assert!(
        rows.iter()
            .any(|r| r.entry_type == "index" && r.name == expected),
        "{rows:?}"
    );
}

#[test]
fn create_index_missing_attr_errors() {
    let db = memdb();
    db.create_table("t", &["a INTEGER".to_string()]).unwrap();
    assert!(db.create_index("t", "missing").is_err());
}

#[test]
fn create_index_list_skips_missing_attrs() {
    let db = memdb();
    db.create_table("t", &["a INTEGER".to_string()]).unwrap();
    db.create_index_list("t", &["a", "missing"]).unwrap();
    assert_eq!(db.table_metadata("t").unwrap().indexed_attrs, ["a"]);
}

// ── create_table_from_table_data ───────────────────────────────────────

#[test]
fn pipeline_infers_column_types() {
    let db = memdb();
    let table = db
        .create_table_from_table_data(&sample_data("sample"), &CreateTableOptions::default())
        .unwrap();
    assert_eq!(table, "sample");
    assert_eq!(
        db.fetch_attr_types("sample").unwrap(),
        vec![
            ("attr_a".to_string(), ColumnType::Integer),
            ("attr_b".to_string(), ColumnType::Real),
        ]
    );
    assert_eq!(db.fetch_num_records("sample", None).unwrap(), 2);
}

#[test]
fn pipeline_sanitizes_table_name() {
    let db = memdb();
    let table = db
        .create_table_from_table_data(&sample_data("sample table!"), &CreateTableOptions::default())
        .unwrap();
    assert_eq!(table, "sample_table");
    assert!(db.has_table("sample_table"));
}

#[test]
fn pipeline_loads_symbol_heavy_headers() {
    let db = memdb();
    let data = TableData::new(
        "t",
        vec!["k@l[m]n{o}p;q:r,s.t/u".to_string()],
        vec![vec![CellValue::Integer(1)]],
    );
    db.create_table_from_table_data(&data, &CreateTableOptions::default())
        .unwrap();
    // The comma became an underscore; the rest of the name survives.
    assert_eq!(
        db.fetch_attr_names("t").unwrap(),
        ["k@l[m]n{o}p;q:r_s.t/u"]
    );
    assert_eq!(db.fetch_num_records("t", None).unwrap(), 1);
}

#[test]
fn pipeline_loads_keyword_headers() {
    let db = memdb();
    let data = TableData::new(
        "t",
        vec!["and".to_string(), "Index".to_string()],
        vec![vec![CellValue::Integer(1), CellValue::Integer(2)]],
    );
    db.create_table_from_table_data(&data, &CreateTableOptions::default())
        .unwrap();
    assert_eq!(db.fetch_attr_names("t").unwrap(), ["and", "Index"]);
    assert_eq!(db.fetch_num_records("t", None).unwrap(), 1);
}

#[test]
fn pipeline_rejects_empty_data() {
    let db = memdb();
    let empty = TableData::new("t", vec!["a".to_string()], vec![]);
    let err = db
        .create_table_from_table_data(&empty, &CreateTableOptions::default())
        .unwrap_err();
    assert!(matches!(err, DbError::Tabular(_)), "{err}");
}

#[test]
fn pipeline_sets_primary_key() {
    let db = memdb();
    let options = CreateTableOptions {
        primary_key: Some("attr_a".to_string()),
        ..Default::default()
    };
    db.create_table_from_table_data(&sample_data("t"), &options)
        .unwrap();
    assert_eq!(
        db.table_metadata("t").unwrap().primary_key.as_deref(),
        Some("attr_a")
    );
}

#[test]
fn pipeline_rejects_unknown_primary_key() {
    let db = memdb();
    let options = CreateTableOptions {
        primary_key: Some("nope".to_string()),
        ..Default::default()
    };
    assert!(db
        .create_table_from_table_data(&sample_data("t"), &options)
        .is_err());
}

#[test]
fn pipeline_adds_synthetic_key_column() {
    let db = memdb();
    let options = CreateTableOptions {
        add_primary_key_column: Some("id".to_string()),
        ..Default::default()
    };
    db.create_table_from_table_data(&sample_data("t"), &options)
        .unwrap();

    assert_eq!(
        db.fetch_attr_names("t").unwrap(),
        ["id", "attr_a", "attr_b"]
    );
    let ids = db.fetch_values("id", "t", None).unwrap();
    assert_eq!(ids, vec![CellValue::Integer(1), CellValue::Integer(2)]);
}

#[test]
fn pipeline_rejects_synthetic_key_collision() {
    let db = memdb();
    let options = CreateTableOptions {
        add_primary_key_column: Some("ATTR_A".to_string()),
        ..Default::default()
    };
    assert!(db
        .create_table_from_table_data(&sample_data("t"), &options)
        .is_err());
}

#[test]
fn pipeline_rejects_both_key_options() {
    let db = memdb();
    let options = CreateTableOptions {
        primary_key: Some("attr_a".to_string()),
        add_primary_key_column: Some("id".to_string()),
        ..Default::default()
    };
    assert!(db
        .create_table_from_table_data(&sample_data("t"), &options)
        .is_err());
}

#[test]
fn pipeline_creates_requested_indexes() {
    let db = memdb();
    let options = CreateTableOptions {
        index_attrs: vec!["attr_b".to_string(), "missing".to_string()],
        ..Default::default()
    };
    db.create_table_from_table_data(&sample_data("t"), &options)
        .unwrap();
    assert_eq!(db.table_metadata("t").unwrap().indexed_attrs, ["attr_b"]);
}

#[test]
fn pipeline_renames_duplicate_headers_when_asked() {
    let db = memdb();
    let data = TableData::new(
        "t",
        vec!["a".to_string(), "a".to_string()],
        vec![vec![CellValue::Integer(1), CellValue::Integer(2)]],
    );

    let err = db
        .create_table_from_table_data(&data, &CreateTableOptions::default())
        .unwrap_err();
    assert!(matches!(err, DbError::Tabular(_)), "{err}");

    let options = CreateTableOptions {
        dup_col_handler: DupColHandler::Rename,
        ..Default::default()
    };
    db.create_table_from_table_data(&data, &options).unwrap();
    assert_eq!(db.fetch_attr_names("t").unwrap(), ["a", "a_1"]);
}

// ── Matrix and JSON fronts ─────────────────────────────────────────────

#[test]
fn create_from_data_matrix() {
    let db = memdb();
    let attrs = vec!["x".to_string(), "y".to_string()];
    let records = vec![
        Record::Row(vec![CellValue::Integer(1), CellValue::from("a")]),
        Record::Row(vec![CellValue::Integer(2)]),
    ];
    db.create_table_from_data_matrix("m", &attrs, records, &CreateTableOptions::default())
        .unwrap();

    assert_eq!(db.fetch_num_records("m", None).unwrap(), 2);
    let rows = db.select("*", "m", None, None).unwrap();
    assert_eq!(rows[1], vec![CellValue::Integer(2), CellValue::Null]);
}

#[test]
fn create_from_json() {
    let db = memdb();
    db.create_table_from_json(
        "j",
        r#"[{"a": 1, "b": "x"}, {"a": 2, "b": "y"}]"#,
        &CreateTableOptions::default(),
    )
    .unwrap();

    assert_eq!(
        db.fetch_attr_types("j").unwrap(),
        vec![
            ("a".to_string(), ColumnType::Integer),
            ("b".to_string(), ColumnType::Text),
        ]
    );
    assert_eq!(db.fetch_num_records("j", None).unwrap(), 2);
}

// ── drop_table ─────────────────────────────────────────────────────────

#[test]
fn drop_table_removes_tables_and_views() {
    let db = memdb();
    db.execute_batch(
        "CREATE TABLE t (a INTEGER);
         CREATE VIEW v AS SELECT a FROM t;",
    )
    .unwrap();

    db.drop_table("v").unwrap();
    assert!(!db.has_view("v"));
    db.drop_table("t").unwrap();
    assert!(!db.has_table("t"));
    // Missing tables and sqlite_* internals are ignored.
    db.drop_table("t").unwrap();
    db.drop_table("sqlite_sequence").unwrap();
}
