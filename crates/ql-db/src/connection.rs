//! SQLite connection wrapper.
//!
//! [`SqliteDb`] owns a rusqlite [`Connection`] plus the path and open mode
//! it was created with. Higher-level operations (introspection, DML, DDL,
//! cross-database copies) are implemented in the sibling modules.

use std::path::Path;

use log::debug;
use rusqlite::{Connection, OpenFlags};

use crate::error::{DbError, DbResult};

/// In-memory databases report this as their path.
pub const MEMORY_DB_PATH: &str = ":memory:";

/// How the database file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Open an existing file; all mutating operations are rejected.
    ReadOnly,
    /// Create or truncate: every existing table is dropped after opening.
    Write,
    /// Create if missing, keep existing content.
    Append,
}

/// Wrapper around a single synchronous SQLite connection.
#[derive(Debug)]
pub struct SqliteDb {
    conn: Connection,
    path: String,
    mode: OpenMode,
}

impl SqliteDb {
    /// Open the database at `path` with the given mode.
    ///
    /// ReadOnly requires the file to exist. Write drops all existing
    /// tables after connecting, giving a fresh database.
    pub fn open<P: AsRef<Path>>(path: P, mode: OpenMode) -> DbResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let conn = match mode {
            OpenMode::ReadOnly => {
                if !path.exists() {
                    return Err(DbError::Connection(format!(
                        "database file not found: {display}"
                    )));
                }
                Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
                    .map_err(|e| DbError::Connection(format!("{e}: {display}")))?
            }
            OpenMode::Write | OpenMode::Append => Connection::open(path)
                .map_err(|e| DbError::Connection(format!("{e}: {display}")))?,
        };
        debug!("opened database: {display} ({mode:?})");

        let db = Self {
            conn,
            path: display,
            mode,
        };
        if mode == OpenMode::Write {
            db.drop_all_tables()?;
        }
        Ok(db)
    }

    /// Create a fresh in-memory database.
    pub fn open_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::Connection(e.to_string()))?;
        Ok(Self {
            conn,
            path: MEMORY_DB_PATH.to_string(),
            mode: OpenMode::Write,
        })
    }

    /// Borrow the underlying rusqlite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Path the database was opened with (`:memory:` for in-memory).
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    /// Reject the call unless the database was opened writable.
    pub(crate) fn require_write(&self, operation: &str) -> DbResult<()> {
        if self.mode == OpenMode::ReadOnly {
            return Err(DbError::PermissionDenied(format!(
                "{operation} requires Write or Append mode: {}",
                self.path
            )));
        }
        Ok(())
    }

    /// Execute a single statement, returning the number of affected rows.
    pub fn execute(&self, sql: &str) -> DbResult<usize> {
        debug!("execute: {sql}");
        self.conn.execute(sql, []).map_err(|e| DbError::Query {
            query: sql.to_string(),
            source: e,
        })
    }

    /// Execute a batch of semicolon-separated statements.
    pub fn execute_batch(&self, sql: &str) -> DbResult<()> {
        debug!("execute_batch: {sql}");
        self.conn.execute_batch(sql).map_err(|e| DbError::Query {
            query: sql.to_string(),
            source: e,
        })
    }

    /// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back
    /// on error.
    pub fn transaction<F, T>(&self, body: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        self.conn
            .execute_batch("BEGIN TRANSACTION")
            .map_err(|e| DbError::Transaction(format!("BEGIN failed: {e}")))?;

        let result = body(&self.conn);

        match &result {
            Ok(_) => {
                if let Err(commit_err) = self.conn.execute_batch("COMMIT") {
                    let _ = self.conn.execute_batch("ROLLBACK");
                    return Err(DbError::Transaction(format!("COMMIT failed: {commit_err}")));
                }
            }
            Err(_) => {
                let _ = self.conn.execute_batch("ROLLBACK");
            }
        }
        result
    }

    fn drop_all_tables(&self) -> DbResult<()> {
        for table in self.fetch_table_names(false)? {
            self.drop_table(&table)?;
        }
        Ok(())
    }
}

/// Create a fresh in-memory database. Shorthand for [`SqliteDb::open_memory`].
pub fn connect_memdb() -> DbResult<SqliteDb> {
    SqliteDb::open_memory()
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod tests;
