//! Shared helpers for moving cells between rusqlite rows and [`CellValue`].

use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::ToSql;

use ql_tabular::CellValue;

use crate::error::{DbError, DbResult};

/// Read a column value as a cell, mapping SQLite storage classes directly.
pub(crate) fn cell_from_row(row: &rusqlite::Row<'_>, idx: usize) -> CellValue {
    match row.get_ref(idx) {
        Ok(ValueRef::Null) | Err(_) => CellValue::Null,
        Ok(ValueRef::Integer(i)) => CellValue::Integer(i),
        Ok(ValueRef::Real(r)) => CellValue::Real(r),
        Ok(ValueRef::Text(t)) => CellValue::Text(String::from_utf8_lossy(t).into_owned()),
        Ok(ValueRef::Blob(b)) => CellValue::Blob(b.to_vec()),
    }
}

/// Borrow a cell as a bindable statement parameter.
///
/// Local newtype because `ToSql` cannot be implemented for the foreign
/// cell type directly.
pub(crate) struct SqlParam<'a>(pub(crate) &'a CellValue);

impl ToSql for SqlParam<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self.0 {
            CellValue::Null => ToSqlOutput::Borrowed(ValueRef::Null),
            CellValue::Integer(i) => ToSqlOutput::Borrowed(ValueRef::Integer(*i)),
            CellValue::Real(r) => ToSqlOutput::Borrowed(ValueRef::Real(*r)),
            CellValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            CellValue::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
        })
    }
}

/// Execute a prepared statement and collect all results as cells.
///
/// Returns `(column_names, rows)`.
pub(crate) fn execute_and_collect(
    stmt: &mut rusqlite::Statement<'_>,
) -> DbResult<(Vec<String>, Vec<Vec<CellValue>>)> {
    let column_names: Vec<String> = stmt.column_names().iter().map(|n| n.to_string()).collect();

    let rows: Vec<Vec<CellValue>> = stmt
        .query_map([], |row| {
            let col_count = row.as_ref().column_count();
            Ok((0..col_count).map(|i| cell_from_row(row, i)).collect())
        })
        .map_err(DbError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DbError::Sqlite)?;

    Ok((column_names, rows))
}
