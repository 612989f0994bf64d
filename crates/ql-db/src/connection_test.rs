//! Tests for connection open modes and the transaction helper.

use crate::connection::{connect_memdb, OpenMode, SqliteDb};
use crate::error::{DbError, DbResult};

// ── Helpers ────────────────────────────────────────────────────────────

fn count(db: &SqliteDb, sql: &str) -> i64 {
    db.conn()
        .query_row(sql, [], |row| row.get::<_, i64>(0))
        .unwrap()
}

fn exec(db: &SqliteDb, sql: &str) {
    db.execute(sql).unwrap();
}

// ── Open modes ─────────────────────────────────────────────────────────

#[test]
fn open_memory_succeeds() {
    let db = SqliteDb::open_memory().unwrap();
    assert_eq!(db.path(), ":memory:");
    assert_eq!(db.mode(), OpenMode::Write);
}

#[test]
fn connect_memdb_is_equivalent() {
    let db = connect_memdb().unwrap();
    exec(&db, "CREATE TABLE t (a INTEGER)");
    assert!(db.has_table("t"));
}

#[test]
fn open_file_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.sqlite");
    assert!(!path.exists());
    let _db = SqliteDb::open(&path, OpenMode::Append).unwrap();
    assert!(path.exists());
}

#[test]
fn read_only_requires_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.sqlite");
    let err = SqliteDb::open(&path, OpenMode::ReadOnly).unwrap_err();
    assert!(matches!(err, DbError::Connection(_)), "{err}");
}

#[test]
fn db_handle_is_debug_formattable() {
    let db = connect_memdb().unwrap();
    let repr = format!("{db:?}");
    assert!(repr.contains(":memory:"), "{repr}");
}

#[test]
fn read_only_rejects_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ro.sqlite");
    {
        let db = SqliteDb::open(&path, OpenMode::Append).unwrap();
        exec(&db, "CREATE TABLE t (a INTEGER)");
    }

    let db = SqliteDb::open(&path, OpenMode::ReadOnly).unwrap();
    let err = db.drop_table("t").unwrap_err();
    assert!(matches!(err, DbError::PermissionDenied(_)), "{err}");
}

#[test]
fn write_mode_truncates_existing_tables() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trunc.sqlite");
    {
        let db = SqliteDb::open(&path, OpenMode::Append).unwrap();
        exec(&db, "CREATE TABLE old (a INTEGER)");
    }

    let db = SqliteDb::open(&path, OpenMode::Write).unwrap();
    assert!(db.fetch_table_names(false).unwrap().is_empty());
}

#[test]
fn append_mode_keeps_existing_tables() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keep.sqlite");
    {
        let db = SqliteDb::open(&path, OpenMode::Append).unwrap();
        exec(&db, "CREATE TABLE kept (a INTEGER)");
        exec(&db, "INSERT INTO kept VALUES (1)");
    }

    let db = SqliteDb::open(&path, OpenMode::Append).unwrap();
    assert_eq!(count(&db, "SELECT COUNT(*) FROM kept"), 1);
}

// ── Execute ────────────────────────────────────────────────────────────

#[test]
fn execute_error_carries_query_context() {
    let db = SqliteDb::open_memory().unwrap();
    let err = db.execute("SELECT * FROM no_such_table").unwrap_err();
    assert!(err.to_string().contains("no_such_table"), "{err}");
}

// ── Transaction helper ─────────────────────────────────────────────────

#[test]
fn transaction_commits_on_success() {
    let db = SqliteDb::open_memory().unwrap();
    exec(&db, "CREATE TABLE t (a INTEGER)");
    db.transaction(|conn| {
        conn.execute("INSERT INTO t VALUES (1)", [])
            .map_err(DbError::Sqlite)?;
        Ok(())
    })
    .unwrap();

    assert_eq!(count(&db, "SELECT COUNT(*) FROM t"), 1);
}

#[test]
fn transaction_rolls_back_on_error() {
    let db = SqliteDb::open_memory().unwrap();
    exec(&db, "CREATE TABLE t (a INTEGER)");
    let result: DbResult<()> = db.transaction(|conn| {
        conn.execute("INSERT INTO t VALUES (1)", [])
            .map_err(DbError::Sqlite)?;
        Err(DbError::Transaction("intentional failure".to_string()))
    });

    assert!(result.is_err());
    assert_eq!(
        count(&db, "SELECT COUNT(*) FROM t"),
        0,
        "Row should have been rolled back"
    );
}
