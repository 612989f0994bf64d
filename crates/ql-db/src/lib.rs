//! ql-db - SQLite connection wrapper and high-level table operations
//!
//! [`SqliteDb`] wraps a single synchronous rusqlite connection with open
//! modes, schema introspection, SELECT/INSERT/UPDATE/DELETE helpers, and a
//! create-and-load pipeline from tabular data. Cross-database utilities
//! (append, copy, dump) live in [`copy`].

pub mod connection;
pub mod copy;
pub mod create;
pub mod error;
pub mod ops;
mod row;
pub mod schema;

pub use connection::{connect_memdb, OpenMode, SqliteDb, MEMORY_DB_PATH};
pub use copy::{append_table, copy_table};
pub use create::CreateTableOptions;
pub use error::{DbError, DbResult};
pub use schema::{SqliteMasterRow, TableMetadata};

// Re-exported so callers can build queries and data without importing the
// lower crates directly.
pub use ql_query::{CmpOperator, SetClause, Where, WhereExpr};
pub use ql_tabular::{CellValue, ColumnType, DupColHandler, Record, TableData};
