//! WHERE and SET clause building blocks.

use std::fmt;
use std::str::FromStr;

use crate::error::{QueryError, QueryResult};
use crate::expr::Attr;
use crate::value::SqlValue;

/// Comparison operators usable in a WHERE condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOperator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl CmpOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            CmpOperator::Eq => "=",
            CmpOperator::Ne => "!=",
            CmpOperator::Gt => ">",
            CmpOperator::Ge => ">=",
            CmpOperator::Lt => "<",
            CmpOperator::Le => "<=",
        }
    }
}

impl FromStr for CmpOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" | "==" => Ok(CmpOperator::Eq),
            "!=" | "<>" => Ok(CmpOperator::Ne),
            ">" => Ok(CmpOperator::Gt),
            ">=" => Ok(CmpOperator::Ge),
            "<" => Ok(CmpOperator::Lt),
            "<=" => Ok(CmpOperator::Le),
            other => Err(QueryError::Syntax(format!(
                "unknown comparison operator: {other}"
            ))),
        }
    }
}

impl fmt::Display for CmpOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `attr <op> value` condition.
///
/// Comparing against [`SqlValue::Null`] renders as `IS NULL` / `IS NOT NULL`;
/// ordering operators against NULL are a syntax error.
///
/// ```
/// use ql_query::{SqlValue, Where};
///
/// let w = Where::new("key", SqlValue::from("hoge"));
/// assert_eq!(w.to_sql().unwrap(), "key = 'hoge'");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Where {
    key: String,
    value: SqlValue,
    operator: CmpOperator,
}

impl Where {
    pub fn new<S: Into<String>, V: Into<SqlValue>>(key: S, value: V) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            operator: CmpOperator::Eq,
        }
    }

    pub fn with_operator<S: Into<String>, V: Into<SqlValue>>(
        key: S,
        value: V,
        operator: CmpOperator,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            operator,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn to_sql(&self) -> QueryResult<String> {
        let attr = Attr::new(&self.key);
        if self.value.is_null() {
            return match self.operator {
                CmpOperator::Eq => Ok(format!("{attr} IS NULL")),
                CmpOperator::Ne => Ok(format!("{attr} IS NOT NULL")),
                op => Err(QueryError::Syntax(format!(
                    "operator '{op}' is not applicable to NULL"
                ))),
            };
        }

        Ok(format!(
            "{attr} {} {}",
            self.operator,
            self.value.to_literal()
        ))
    }
}

/// A WHERE tree: single conditions combined with AND/OR, plus a raw
/// escape hatch for fragments the builders do not cover.
#[derive(Debug, Clone, PartialEq)]
pub enum WhereExpr {
    Cond(Where),
    And(Vec<WhereExpr>),
    Or(Vec<WhereExpr>),
    Raw(String),
}

impl WhereExpr {
    pub fn cond<S: Into<String>, V: Into<SqlValue>>(key: S, value: V) -> Self {
        WhereExpr::Cond(Where::new(key, value))
    }

    pub fn to_sql(&self) -> QueryResult<String> {
        match self {
            WhereExpr::Cond(w) => w.to_sql(),
            WhereExpr::Raw(s) => Ok(s.clone()),
            WhereExpr::And(parts) => join_parts(parts, " AND "),
            WhereExpr::Or(parts) => join_parts(parts, " OR "),
        }
    }
}

fn join_parts(parts: &[WhereExpr], sep: &str) -> QueryResult<String> {
    if parts.is_empty() {
        return Err(QueryError::Syntax(
            "empty condition list in WHERE clause".to_string(),
        ));
    }

    let rendered: QueryResult<Vec<String>> = parts
        .iter()
        .map(|p| {
            let sql = p.to_sql()?;
            // Nested composites keep their own grouping.
            Ok(match p {
                WhereExpr::And(_) | WhereExpr::Or(_) => format!("({sql})"),
                _ => sql,
            })
        })
        .collect();

    Ok(rendered?.join(sep))
}

impl From<Where> for WhereExpr {
    fn from(w: Where) -> Self {
        WhereExpr::Cond(w)
    }
}

/// A single `attr = value` assignment for UPDATE statements.
#[derive(Debug, Clone, PartialEq)]
pub struct SetClause {
    key: String,
    value: SqlValue,
}

impl SetClause {
    pub fn new<S: Into<String>, V: Into<SqlValue>>(key: S, value: V) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn to_sql(&self) -> String {
        format!("{} = {}", Attr::new(&self.key), self.value.to_literal())
    }
}

#[cfg(test)]
#[path = "clause_test.rs"]
mod tests;
