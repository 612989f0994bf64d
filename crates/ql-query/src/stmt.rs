//! Whole-statement builders.

use sha2::{Digest, Sha256};

use crate::clause::{SetClause, WhereExpr};
use crate::error::{QueryError, QueryResult};
use crate::expr::TableRef;
use crate::name::validate_table_name;
use crate::value::SqlValue;

/// Builder for SELECT statements.
///
/// ```
/// use ql_query::{Select, SqlValue, WhereExpr};
///
/// let sql = Select::new("*", "rank_table")
///     .filter(WhereExpr::cond("rank", 1))
///     .extra("ORDER BY name")
///     .to_sql()
///     .unwrap();
/// assert_eq!(sql, "SELECT * FROM rank_table WHERE rank = 1 ORDER BY name");
/// ```
#[derive(Debug, Clone)]
pub struct Select {
    select: String,
    table: String,
    where_clause: Option<WhereExpr>,
    extra: Option<String>,
}

impl Select {
    pub fn new<S: Into<String>, T: Into<String>>(select: S, table: T) -> Self {
        Self {
            select: select.into(),
            table: table.into(),
            where_clause: None,
            extra: None,
        }
    }

    pub fn filter(mut self, clause: WhereExpr) -> Self {
        self.where_clause = Some(clause);
        self
    }

    /// Trailing clauses such as `ORDER BY` / `LIMIT`, appended verbatim.
    pub fn extra<S: Into<String>>(mut self, extra: S) -> Self {
        self.extra = Some(extra.into());
        self
    }

    pub fn to_sql(&self) -> QueryResult<String> {
        validate_table_name(&self.table)?;
        if self.select.trim().is_empty() {
            return Err(QueryError::Syntax(
                "SELECT column list must not be empty".to_string(),
            ));
        }

        let mut sql = format!("SELECT {} FROM {}", self.select, TableRef::new(&self.table));
        if let Some(clause) = &self.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&clause.to_sql()?);
        }
        if let Some(extra) = &self.extra {
            sql.push(' ');
            sql.push_str(extra);
        }

        Ok(sql)
    }
}

/// Build an INSERT statement with the values embedded as literals.
pub fn insert_query(table: &str, values: &[SqlValue]) -> QueryResult<String> {
    validate_table_name(table)?;
    if values.is_empty() {
        return Err(QueryError::Syntax(
            "INSERT requires at least one value".to_string(),
        ));
    }

    let literals: Vec<String> = values.iter().map(SqlValue::to_literal).collect();
    Ok(format!(
        "INSERT INTO {} VALUES ({})",
        TableRef::new(table),
        literals.join(",")
    ))
}

/// Build a parameterized INSERT statement with `num_attrs` placeholders,
/// for use with prepared statements over many records.
pub fn insert_many_query(table: &str, num_attrs: usize) -> QueryResult<String> {
    validate_table_name(table)?;
    if num_attrs == 0 {
        return Err(QueryError::Syntax(
            "INSERT requires at least one attribute".to_string(),
        ));
    }

    let placeholders = vec!["?"; num_attrs].join(",");
    Ok(format!(
        "INSERT INTO {} VALUES ({placeholders})",
        TableRef::new(table)
    ))
}

/// Build an UPDATE statement from SET assignments and an optional WHERE tree.
pub fn make_update(
    table: &str,
    set_clauses: &[SetClause],
    where_clause: Option<&WhereExpr>,
) -> QueryResult<String> {
    validate_table_name(table)?;
    if set_clauses.is_empty() {
        return Err(QueryError::Syntax(
            "UPDATE requires at least one SET clause".to_string(),
        ));
    }

    let assignments: Vec<String> = set_clauses.iter().map(SetClause::to_sql).collect();
    let mut sql = format!(
        "UPDATE {} SET {}",
        TableRef::new(table),
        assignments.join(", ")
    );
    if let Some(clause) = where_clause {
        sql.push_str(" WHERE ");
        sql.push_str(&clause.to_sql()?);
    }

    Ok(sql)
}

/// Render a `key IN (...)` fragment from text values.
pub fn make_where_in(key: &str, values: &[&str]) -> String {
    let literals: Vec<String> = values
        .iter()
        .map(|v| SqlValue::Text(v.to_string()).to_literal())
        .collect();
    format!("{key} IN ({})", literals.join(", "))
}

/// Render a `key NOT IN (...)` fragment from text values.
pub fn make_where_not_in(key: &str, values: &[&str]) -> String {
    let literals: Vec<String> = values
        .iter()
        .map(|v| SqlValue::Text(v.to_string()).to_literal())
        .collect();
    format!("{key} NOT IN ({})", literals.join(", "))
}

/// Derive a deterministic index name for a table/attribute pair.
///
/// Symbols and unprintable characters are stripped from both names, and a
/// short hash of the raw pair keeps names distinct after stripping.
pub fn make_index_name(table: &str, attr: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(table.as_bytes());
    hasher.update(attr.as_bytes());
    let digest = hasher.finalize();
    let tag: String = digest.iter().take(4).map(|b| format!("{b:02x}")).collect();

    format!(
        "{}_{}_index_{}",
        strip_symbols(table),
        strip_symbols(attr),
        tag
    )
}

fn strip_symbols(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

#[cfg(test)]
#[path = "stmt_test.rs"]
mod tests;
