//! Schema introspection over `sqlite_master` and table PRAGMAs.

use rusqlite::OptionalExtension;
use serde::Serialize;

use ql_query::{validate_attr_name, validate_table_name, TableRef};
use ql_tabular::ColumnType;

use crate::connection::SqliteDb;
use crate::error::{DbError, DbResult};

/// One row of the `sqlite_master` catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SqliteMasterRow {
    pub entry_type: String,
    pub name: String,
    pub tbl_name: String,
    pub rootpage: i64,
    pub sql: Option<String>,
}

/// Primary key, indexes, and column types of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableMetadata {
    pub primary_key: Option<String>,
    pub indexed_attrs: Vec<String>,
    pub attr_types: Vec<(String, ColumnType)>,
}

#[derive(Debug)]
struct TableInfoRow {
    name: String,
    decl_type: String,
    pk: i64,
}

impl SqliteDb {
    /// Names of user tables, optionally including views. SQLite's own
    /// `sqlite_*` tables are excluded.
    pub fn fetch_table_names(&self, include_views: bool) -> DbResult<Vec<String>> {
        let types = if include_views {
            "('table', 'view')"
        } else {
            "('table')"
        };
        self.fetch_master_names(&format!(
            "SELECT name FROM sqlite_master WHERE type IN {types}"
        ))
    }

    /// Names of views.
    pub fn fetch_view_names(&self) -> DbResult<Vec<String>> {
        self.fetch_master_names("SELECT name FROM sqlite_master WHERE type = 'view'")
    }

    fn fetch_master_names(&self, sql: &str) -> DbResult<Vec<String>> {
        let mut stmt = self.conn().prepare(sql)?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names
            .into_iter()
            .filter(|n| !n.starts_with("sqlite_"))
            .collect())
    }

    /// True when a table with this name exists. Invalid names return false.
    pub fn has_table(&self, table: &str) -> bool {
        if validate_table_name(table).is_err() {
            return false;
        }
        self.fetch_table_names(false)
            .map(|names| names.iter().any(|n| n == table))
            .unwrap_or(false)
    }

    /// True when a view with this name exists. Invalid names return false.
    pub fn has_view(&self, view: &str) -> bool {
        if validate_table_name(view).is_err() {
            return false;
        }
        self.fetch_view_names()
            .map(|names| names.iter().any(|n| n == view))
            .unwrap_or(false)
    }

    /// Error with [`DbError::TableNotFound`] unless the table (or, when
    /// allowed, a view) exists.
    pub fn verify_table_existence(&self, table: &str, allow_view: bool) -> DbResult<()> {
        validate_table_name(table)?;
        if self.has_table(table) || (allow_view && self.has_view(table)) {
            return Ok(());
        }
        Err(DbError::TableNotFound {
            table: table.to_string(),
            path: self.path().to_string(),
        })
    }

    /// Attribute names of a table or view, in schema order.
    pub fn fetch_attr_names(&self, table: &str) -> DbResult<Vec<String>> {
        Ok(self
            .table_info(table)?
            .into_iter()
            .map(|row| row.name)
            .collect())
    }

    /// Attribute names with their declared types mapped to affinities.
    pub fn fetch_attr_types(&self, table: &str) -> DbResult<Vec<(String, ColumnType)>> {
        Ok(self
            .table_info(table)?
            .into_iter()
            .map(|row| {
                let col_type = ColumnType::from_sql(&row.decl_type);
                (row.name, col_type)
            })
            .collect())
    }

    /// True when the table exists and has the attribute.
    pub fn has_attr(&self, table: &str, attr: &str) -> bool {
        if validate_attr_name(attr).is_err() {
            return false;
        }
        self.fetch_attr_names(table)
            .map(|names| names.iter().any(|n| n == attr))
            .unwrap_or(false)
    }

    /// True when the table exists and has every attribute. Empty input is
    /// false.
    pub fn has_attrs<S: AsRef<str>>(&self, table: &str, attrs: &[S]) -> bool {
        if attrs.is_empty() {
            return false;
        }
        attrs.iter().all(|a| self.has_attr(table, a.as_ref()))
    }

    /// Error with [`DbError::AttributeNotFound`] unless the attribute
    /// exists in the table.
    pub fn verify_attr_existence(&self, table: &str, attr: &str) -> DbResult<()> {
        self.verify_table_existence(table, true)?;
        if self.has_attr(table, attr) {
            return Ok(());
        }
        Err(DbError::AttributeNotFound {
            attr: attr.to_string(),
            table: table.to_string(),
        })
    }

    /// Typed rows of the `sqlite_master` catalog.
    pub fn fetch_sqlite_master(&self) -> DbResult<Vec<SqliteMasterRow>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT type, name, tbl_name, rootpage, sql FROM sqlite_master")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(SqliteMasterRow {
                    entry_type: row.get(0)?,
                    name: row.get(1)?,
                    tbl_name: row.get(2)?,
                    rootpage: row.get(3)?,
                    sql: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Primary key, indexed attributes, and column types of a table.
    pub fn table_metadata(&self, table: &str) -> DbResult<TableMetadata> {
        let info = self.table_info(table)?;
        let primary_key = info
            .iter()
            .find(|row| row.pk > 0)
            .map(|row| row.name.clone());
        let attr_types = info
            .into_iter()
            .map(|row| {
                let col_type = ColumnType::from_sql(&row.decl_type);
                (row.name, col_type)
            })
            .collect();

        Ok(TableMetadata {
            primary_key,
            indexed_attrs: self.indexed_attrs(table)?,
            attr_types,
        })
    }

    fn table_info(&self, table: &str) -> DbResult<Vec<TableInfoRow>> {
        self.verify_table_existence(table, true)?;
        let sql = format!("PRAGMA table_info({})", TableRef::new(table));
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(TableInfoRow {
                    name: row.get(1)?,
                    decl_type: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    pk: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Attributes covered by single-column indexes on the table.
    fn indexed_attrs(&self, table: &str) -> DbResult<Vec<String>> {
        let sql = format!("PRAGMA index_list({})", TableRef::new(table));
        let mut stmt = self.conn().prepare(&sql)?;
        let index_names = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut attrs = Vec::new();
        for index in index_names {
            let sql = format!("PRAGMA index_info({})", TableRef::new(&index));
            let attr: Option<String> = self
                .conn()
                .query_row(&sql, [], |row| row.get(2))
                .optional()?;
            if let Some(attr) = attr {
                if !attrs.contains(&attr) {
                    attrs.push(attr);
                }
            }
        }
        Ok(attrs)
    }
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
