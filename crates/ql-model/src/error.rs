//! Error types for ql-model.

use thiserror::Error;

/// Errors raised by the model layer.
#[derive(Error, Debug)]
pub enum ModelError {
    /// O001: the record length does not match the column count.
    #[error("[O001] record has {actual} values but model '{model}' has {expected} columns")]
    Arity {
        model: String,
        expected: usize,
        actual: usize,
    },

    /// O002: a value is not storable in its column.
    #[error("[O002] type mismatch for column '{column}': {reason}")]
    TypeMismatch { column: String, reason: String },

    /// O003: a fetched record cannot be decoded into the model.
    #[error("[O003] malformed record at column {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    /// O004: the underlying database operation failed.
    #[error("[O004] {0}")]
    Db(#[from] ql_db::DbError),
}

/// Result type alias for [`ModelError`].
pub type ModelResult<T> = Result<T, ModelError>;
