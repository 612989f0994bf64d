//! Query operations: SELECT variants, bulk insert, UPDATE, DELETE.

use log::debug;
use rusqlite::params_from_iter;

use ql_query::{
    insert_many_query, make_update, Select, SetClause, TableRef, WhereExpr,
};
use ql_tabular::{CellValue, Record, TableData};

use crate::connection::SqliteDb;
use crate::error::{DbError, DbResult};
use crate::row::{execute_and_collect, SqlParam};

impl SqliteDb {
    /// Run a SELECT and return the raw result rows.
    pub fn select(
        &self,
        select: &str,
        table: &str,
        where_clause: Option<&WhereExpr>,
        extra: Option<&str>,
    ) -> DbResult<Vec<Vec<CellValue>>> {
        let (_, rows) = self.select_with_names(select, table, where_clause, extra)?;
        Ok(rows)
    }

    /// Run a SELECT and package the result as table data named after the
    /// source table.
    pub fn select_as_table(
        &self,
        select: &str,
        table: &str,
        where_clause: Option<&WhereExpr>,
        extra: Option<&str>,
    ) -> DbResult<TableData> {
        let (headers, rows) = self.select_with_names(select, table, where_clause, extra)?;
        Ok(TableData::new(table, headers, rows))
    }

    /// Run a SELECT and return each row as `(column, value)` pairs in
    /// column order.
    pub fn select_as_records(
        &self,
        select: &str,
        table: &str,
        where_clause: Option<&WhereExpr>,
        extra: Option<&str>,
    ) -> DbResult<Vec<Vec<(String, CellValue)>>> {
        let (headers, rows) = self.select_with_names(select, table, where_clause, extra)?;
        Ok(rows
            .into_iter()
            .map(|row| headers.iter().cloned().zip(row).collect())
            .collect())
    }

    fn select_with_names(
        &self,
        select: &str,
        table: &str,
        where_clause: Option<&WhereExpr>,
        extra: Option<&str>,
    ) -> DbResult<(Vec<String>, Vec<Vec<CellValue>>)> {
        self.verify_table_existence(table, true)?;

        let mut query = Select::new(select, table);
        if let Some(clause) = where_clause {
            query = query.filter(clause.clone());
        }
        if let Some(extra) = extra {
            query = query.extra(extra);
        }
        let sql = query.to_sql()?;
        debug!("select: {sql}");

        let mut stmt = self.conn().prepare(&sql).map_err(|e| DbError::Query {
            query: sql.clone(),
            source: e,
        })?;
        execute_and_collect(&mut stmt)
    }

    /// First column of the first matching row. `None` when the table does
    /// not exist or nothing matches.
    pub fn fetch_value(
        &self,
        select: &str,
        table: &str,
        where_clause: Option<&WhereExpr>,
    ) -> DbResult<Option<CellValue>> {
        if !self.has_table(table) && !self.has_view(table) {
            return Ok(None);
        }
        let rows = self.select(select, table, where_clause, None)?;
        Ok(rows.into_iter().next().and_then(|row| row.into_iter().next()))
    }

    /// First column of every matching row.
    pub fn fetch_values(
        &self,
        select: &str,
        table: &str,
        where_clause: Option<&WhereExpr>,
    ) -> DbResult<Vec<CellValue>> {
        let rows = self.select(select, table, where_clause, None)?;
        Ok(rows
            .into_iter()
            .filter_map(|row| row.into_iter().next())
            .collect())
    }

    /// Number of records matching the condition.
    pub fn fetch_num_records(
        &self,
        table: &str,
        where_clause: Option<&WhereExpr>,
    ) -> DbResult<i64> {
        self.verify_table_existence(table, true)?;
        let rows = self.select("COUNT(*)", table, where_clause, None)?;
        match rows.into_iter().next().and_then(|row| row.into_iter().next()) {
            Some(CellValue::Integer(n)) => Ok(n),
            _ => Ok(0),
        }
    }

    /// Insert a single record.
    pub fn insert(&self, table: &str, record: Record) -> DbResult<()> {
        self.insert_many(table, vec![record])?;
        Ok(())
    }

    /// Insert many records through one prepared statement.
    ///
    /// Records are aligned to the table's attribute order; map records may
    /// omit attributes (NULL is inserted). Returns the number of inserted
    /// records; empty input is a no-op.
    pub fn insert_many(&self, table: &str, records: Vec<Record>) -> DbResult<usize> {
        self.require_write("insert")?;
        self.verify_table_existence(table, false)?;
        if records.is_empty() {
            return Ok(0);
        }

        let headers = self.fetch_attr_names(table)?;
        let rows = records
            .into_iter()
            .map(|r| r.into_row(&headers))
            .collect::<Result<Vec<_>, _>>()?;

        self.insert_rows(table, headers.len(), rows)
    }

    /// Insert pre-aligned rows. Shared between [`SqliteDb::insert_many`]
    /// and the table-creation pipeline.
    pub(crate) fn insert_rows(
        &self,
        table: &str,
        num_attrs: usize,
        rows: Vec<Vec<CellValue>>,
    ) -> DbResult<usize> {
        let sql = insert_many_query(table, num_attrs)?;
        debug!("insert {} records into {table}: {sql}", rows.len());

        let count = self.transaction(|conn| {
            let mut stmt = conn.prepare(&sql).map_err(|e| DbError::Query {
                query: sql.clone(),
                source: e,
            })?;
            let mut count = 0;
            for row in &rows {
                if row.len() != num_attrs {
                    return Err(DbError::InvalidInput(format!(
                        "record has {} values but table '{table}' has {num_attrs} attributes",
                        row.len()
                    )));
                }
                stmt.execute(params_from_iter(row.iter().map(SqlParam)))
                    .map_err(|e| DbError::Query {
                        query: sql.clone(),
                        source: e,
                    })?;
                count += 1;
            }
            Ok(count)
        })?;
        Ok(count)
    }

    /// Update matching rows. Returns the number of affected rows.
    pub fn update(
        &self,
        table: &str,
        sets: &[SetClause],
        where_clause: Option<&WhereExpr>,
    ) -> DbResult<usize> {
        self.require_write("update")?;
        self.verify_table_existence(table, false)?;
        let sql = make_update(table, sets, where_clause)?;
        self.execute(&sql)
    }

    /// Delete matching rows (all rows without a condition). Returns the
    /// number of affected rows.
    pub fn delete(&self, table: &str, where_clause: Option<&WhereExpr>) -> DbResult<usize> {
        self.require_write("delete")?;
        self.verify_table_existence(table, false)?;

        let mut sql = format!("DELETE FROM {}", TableRef::new(table));
        if let Some(clause) = where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&clause.to_sql()?);
        }
        self.execute(&sql)
    }
}

#[cfg(test)]
#[path = "ops_test.rs"]
mod tests;
