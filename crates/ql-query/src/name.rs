//! SQLite identifier validation.
//!
//! SQLite reserves a set of keywords; some of them ("reusable" here) can
//! still serve as identifiers when quoted, the rest cannot be used at all.
//! `IF` switches camps depending on context: it is rejected as a table name
//! but accepted (quoted) as an attribute name.

use crate::error::{QueryError, QueryResult};

/// Keywords that remain usable as identifiers when quoted.
const REUSABLE_KEYWORDS: &[&str] = &[
    "ABORT",
    "ACTION",
    "AFTER",
    "ANALYZE",
    "ASC",
    "ATTACH",
    "BEFORE",
    "BEGIN",
    "BY",
    "CASCADE",
    "CAST",
    "COLUMN",
    "CONFLICT",
    "CROSS",
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "DATABASE",
    "DEFERRED",
    "DESC",
    "DETACH",
    "EACH",
    "END",
    "EXCLUSIVE",
    "EXPLAIN",
    "FAIL",
    "FOR",
    "FULL",
    "GLOB",
    "IGNORE",
    "IMMEDIATE",
    "INDEXED",
    "INITIALLY",
    "INNER",
    "INSTEAD",
    "KEY",
    "LEFT",
    "LIKE",
    "MATCH",
    "NATURAL",
    "NO",
    "OF",
    "OFFSET",
    "OUTER",
    "PLAN",
    "PRAGMA",
    "QUERY",
    "RAISE",
    "RECURSIVE",
    "REGEXP",
    "REINDEX",
    "RELEASE",
    "RENAME",
    "REPLACE",
    "RESTRICT",
    "RIGHT",
    "ROLLBACK",
    "ROW",
    "SAVEPOINT",
    "TEMP",
    "TEMPORARY",
    "TRIGGER",
    "VACUUM",
    "VIEW",
    "VIRTUAL",
    "WITH",
    "WITHOUT",
];

/// Keywords that cannot be used as identifiers even when quoted.
const NON_REUSABLE_KEYWORDS: &[&str] = &[
    "ADD",
    "ALL",
    "ALTER",
    "AND",
    "AS",
    "AUTOINCREMENT",
    "BETWEEN",
    "CASE",
    "CHECK",
    "COLLATE",
    "COMMIT",
    "CONSTRAINT",
    "CREATE",
    "DEFAULT",
    "DEFERRABLE",
    "DELETE",
    "DISTINCT",
    "DROP",
    "ELSE",
    "ESCAPE",
    "EXCEPT",
    "EXISTS",
    "FOREIGN",
    "FROM",
    "GROUP",
    "HAVING",
    "IN",
    "INDEX",
    "INSERT",
    "INTERSECT",
    "INTO",
    "IS",
    "ISNULL",
    "JOIN",
    "LIMIT",
    "NOT",
    "NOTNULL",
    "NULL",
    "ON",
    "OR",
    "ORDER",
    "PRIMARY",
    "REFERENCES",
    "SELECT",
    "SET",
    "TABLE",
    "THEN",
    "TO",
    "TRANSACTION",
    "UNION",
    "UNIQUE",
    "UPDATE",
    "USING",
    "VALUES",
    "WHEN",
    "WHERE",
];

/// Outcome of a keyword/character check on an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCheck {
    /// Not a reserved keyword.
    Ok,
    /// Reserved, but usable when quoted.
    ReservedReusable,
    /// Reserved and unusable as an identifier.
    ReservedNonReusable,
}

fn check_basic(name: &str) -> QueryResult<()> {
    if name.is_empty() {
        return Err(QueryError::NameValidation {
            name: name.to_string(),
            reason: "empty name".to_string(),
        });
    }

    if name.chars().any(|c| c.is_ascii_control()) {
        return Err(QueryError::NameValidation {
            name: name.to_string(),
            reason: "unprintable character found".to_string(),
        });
    }

    Ok(())
}

/// Check a table name for unprintable characters and reserved keywords.
///
/// `IF` is treated as non-reusable in table context.
pub fn check_table_name(name: &str) -> QueryResult<NameCheck> {
    check_basic(name)?;

    let upper = name.to_ascii_uppercase();
    if NON_REUSABLE_KEYWORDS.contains(&upper.as_str()) || upper == "IF" {
        return Ok(NameCheck::ReservedNonReusable);
    }
    if REUSABLE_KEYWORDS.contains(&upper.as_str()) {
        return Ok(NameCheck::ReservedReusable);
    }

    Ok(NameCheck::Ok)
}

/// Check an attribute name for unprintable characters and reserved keywords.
///
/// `IF` is treated as reusable in attribute context.
pub fn check_attr_name(name: &str) -> QueryResult<NameCheck> {
    check_basic(name)?;

    let upper = name.to_ascii_uppercase();
    if upper != "IF" && NON_REUSABLE_KEYWORDS.contains(&upper.as_str()) {
        return Ok(NameCheck::ReservedNonReusable);
    }
    if upper == "IF" || REUSABLE_KEYWORDS.contains(&upper.as_str()) {
        return Ok(NameCheck::ReservedReusable);
    }

    Ok(NameCheck::Ok)
}

/// Validate a table name for direct use in a query.
///
/// Reusable keywords pass (they are quoted at render time); non-reusable
/// keywords, empty names, and unprintable characters are rejected.
pub fn validate_table_name(name: &str) -> QueryResult<()> {
    match check_table_name(name)? {
        NameCheck::Ok | NameCheck::ReservedReusable => Ok(()),
        NameCheck::ReservedNonReusable => Err(QueryError::NameValidation {
            name: name.to_string(),
            reason: "reserved keyword".to_string(),
        }),
    }
}

/// Validate an attribute name for direct use in a query.
///
/// Stricter than [`validate_table_name`]: any reserved keyword is rejected.
pub fn validate_attr_name(name: &str) -> QueryResult<()> {
    match check_attr_name(name)? {
        NameCheck::Ok => Ok(()),
        NameCheck::ReservedReusable | NameCheck::ReservedNonReusable => {
            Err(QueryError::NameValidation {
                name: name.to_string(),
                reason: "reserved keyword".to_string(),
            })
        }
    }
}

#[cfg(test)]
#[path = "name_test.rs"]
mod tests;
