//! Error types for ql-db.

use thiserror::Error;

/// Errors raised by the SQLite connection layer.
#[derive(Error, Debug)]
pub enum DbError {
    /// D001: the database could not be opened.
    #[error("[D001] connection error: {0}")]
    Connection(String),

    /// D002: a query failed; carries the query for context.
    #[error("[D002] query failed: {source}: {query}")]
    Query {
        query: String,
        #[source]
        source: rusqlite::Error,
    },

    /// D003: the table (or view) does not exist.
    #[error("[D003] table '{table}' not found in '{path}'")]
    TableNotFound { table: String, path: String },

    /// D004: the attribute does not exist in the table.
    #[error("[D004] attribute '{attr}' not found in table '{table}'")]
    AttributeNotFound { attr: String, table: String },

    /// D005: the operation requires a write-capable open mode.
    #[error("[D005] permission denied: {0}")]
    PermissionDenied(String),

    /// D006: the transaction could not be completed.
    #[error("[D006] transaction error: {0}")]
    Transaction(String),

    /// D007: the caller passed unusable input.
    #[error("[D007] invalid input: {0}")]
    InvalidInput(String),

    /// D008: an SQLite error outside a logged query.
    #[error("[D008] sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// D009: a name failed validation.
    #[error("[D009] {0}")]
    Name(#[from] ql_query::QueryError),

    /// D010: tabular data could not be normalized or converted.
    #[error("[D010] {0}")]
    Tabular(#[from] ql_tabular::TabularError),
}

/// Result type alias for [`DbError`].
pub type DbResult<T> = Result<T, DbError>;
