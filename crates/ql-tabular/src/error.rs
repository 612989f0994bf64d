//! Error types for ql-tabular.

use thiserror::Error;

/// Errors raised while normalizing or converting tabular data.
#[derive(Error, Debug)]
pub enum TabularError {
    /// T001: the table data has no usable content.
    #[error("[T001] empty table data: {0}")]
    EmptyData(String),

    /// T002: two columns normalized to the same name.
    #[error("[T002] duplicate column name: '{name}'")]
    DuplicateColumn { name: String },

    /// T003: the JSON document does not have a tabular shape.
    #[error("[T003] unsupported JSON shape: {0}")]
    JsonShape(String),

    /// T004: a record is wider than the header row.
    #[error("[T004] record has {actual} values but the table has {expected} columns")]
    RecordArity { expected: usize, actual: usize },

    /// T005: a table or column name failed validation.
    #[error("[T005] {0}")]
    Name(#[from] ql_query::QueryError),

    /// T006: the JSON document failed to parse.
    #[error("[T006] JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Result type alias for [`TabularError`].
pub type TabularResult<T> = Result<T, TabularError>;
