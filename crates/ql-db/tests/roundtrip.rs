//! End-to-end round trips: load from JSON, query, mutate, dump, reopen.

use ql_db::{
    append_table, CellValue, CreateTableOptions, OpenMode, Record, SetClause, SqliteDb, WhereExpr,
};

#[test]
fn json_to_file_database_and_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roundtrip.sqlite");

    {
        let db = SqliteDb::open(&path, OpenMode::Write).unwrap();
        db.create_table_from_json(
            "ranking",
            r#"[
                {"name": "spam", "rank": 1},
                {"name": "egg",  "rank": 2},
                {"name": "ham",  "rank": 3}
            ]"#,
            &CreateTableOptions {
                index_attrs: vec!["rank".to_string()],
                ..Default::default()
            },
        )
        .unwrap();

        db.insert(
            "ranking",
            Record::Row(vec![CellValue::from("toast"), CellValue::Integer(4)]),
        )
        .unwrap();

        let clause = WhereExpr::cond("name", "egg");
        db.update("ranking", &[SetClause::new("rank", 9)], Some(&clause))
            .unwrap();
        db.delete("ranking", Some(&WhereExpr::cond("name", "ham")))
            .unwrap();
    }

    // Reopen in append mode: everything persisted.
    let db = SqliteDb::open(&path, OpenMode::Append).unwrap();
    assert_eq!(db.fetch_num_records("ranking", None).unwrap(), 3);
    assert_eq!(
        db.fetch_value(
            "rank",
            "ranking",
            Some(&WhereExpr::cond("name", "egg"))
        )
        .unwrap(),
        Some(CellValue::Integer(9))
    );
    assert_eq!(db.table_metadata("ranking").unwrap().indexed_attrs, ["rank"]);
}

#[test]
fn dump_then_append_between_databases() {
    let src = SqliteDb::open_memory().unwrap();
    src.create_table_from_json(
        "t",
        r#"[["a", "b"], [1, 1.5], [2, 2.5]]"#,
        &CreateTableOptions::default(),
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dump.sqlite");
    src.dump(&path).unwrap();

    let dst = SqliteDb::open(&path, OpenMode::Append).unwrap();
    assert_eq!(dst.fetch_num_records("t", None).unwrap(), 2);

    // Append the same content once more through the public API.
    append_table(&src, &dst, "t").unwrap();
    assert_eq!(dst.fetch_num_records("t", None).unwrap(), 4);
}

#[test]
fn select_as_memdb_is_independent() {
    let db = SqliteDb::open_memory().unwrap();
    db.create_table_from_json(
        "events",
        r#"[{"kind": "start", "n": 1}, {"kind": "stop", "n": 2}]"#,
        &CreateTableOptions::default(),
    )
    .unwrap();

    let memdb = db
        .select_as_memdb("events", Some(&WhereExpr::cond("kind", "start")), None)
        .unwrap();
    assert_eq!(memdb.fetch_num_records("events", None).unwrap(), 1);

    // Mutating the extract does not touch the source.
    memdb.delete("events", None).unwrap();
    assert_eq!(db.fetch_num_records("events", None).unwrap(), 2);
}
