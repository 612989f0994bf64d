//! Error types for ql-query.

use thiserror::Error;

/// Errors raised while validating names or building SQL strings.
#[derive(Error, Debug)]
pub enum QueryError {
    /// Q001: a table or attribute name failed validation.
    #[error("[Q001] invalid name '{name}': {reason}")]
    NameValidation { name: String, reason: String },

    /// Q002: a query fragment cannot be rendered as valid SQL.
    #[error("[Q002] SQL syntax error: {0}")]
    Syntax(String),
}

/// Result type alias for [`QueryError`].
pub type QueryResult<T> = Result<T, QueryError>;
