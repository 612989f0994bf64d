//! Table and index creation, including the load-from-tabular-data pipeline.

use log::debug;

use ql_query::{make_index_name, validate_table_name, Attr, TableRef};
use ql_tabular::{
    CellValue, DupColHandler, Record, TableData, TableDataSanitizer, TabularError,
};

use crate::connection::SqliteDb;
use crate::error::{DbError, DbResult};

/// Options for [`SqliteDb::create_table_from_table_data`] and friends.
#[derive(Debug, Clone, Default)]
pub struct CreateTableOptions {
    /// Mark this attribute as PRIMARY KEY. Must name an existing attribute.
    pub primary_key: Option<String>,
    /// Prepend a synthetic `INTEGER PRIMARY KEY AUTOINCREMENT` column with
    /// this name. Mutually exclusive with `primary_key`.
    pub add_primary_key_column: Option<String>,
    /// Create an index on each of these attributes after loading.
    pub index_attrs: Vec<String>,
    /// How to handle duplicate headers during sanitization.
    pub dup_col_handler: DupColHandler,
}

impl SqliteDb {
    /// `CREATE TABLE IF NOT EXISTS` with pre-rendered attribute
    /// descriptions. A no-op when the table already exists.
    pub fn create_table(&self, table: &str, attr_descs: &[String]) -> DbResult<()> {
        self.require_write("create_table")?;
        validate_table_name(table)?;
        if attr_descs.is_empty() {
            return Err(DbError::InvalidInput(
                "create_table requires at least one attribute".to_string(),
            ));
        }
        if self.has_table(table) {
            debug!("table already exists, skipped: {table}");
            return Ok(());
        }

        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            TableRef::new(table),
            attr_descs.join(", ")
        );
        self.execute(&sql)?;
        Ok(())
    }

    /// Create an index on one attribute, named via [`make_index_name`].
    pub fn create_index(&self, table: &str, attr: &str) -> DbResult<()> {
        self.require_write("create_index")?;
        self.verify_attr_existence(table, attr)?;

        let sql = format!(
            "CREATE INDEX IF NOT EXISTS {} ON {}({})",
            TableRef::new(make_index_name(table, attr)),
            TableRef::new(table),
            Attr::new(attr)
        );
        self.execute(&sql)?;
        Ok(())
    }

    /// Create indexes on every listed attribute, silently skipping
    /// attributes the table does not have.
    pub fn create_index_list<S: AsRef<str>>(&self, table: &str, attrs: &[S]) -> DbResult<()> {
        self.require_write("create_index_list")?;
        for attr in attrs {
            let attr = attr.as_ref();
            if !self.has_attr(table, attr) {
                debug!("skipped index on missing attribute: {table}.{attr}");
                continue;
            }
            self.create_index(table, attr)?;
        }
        Ok(())
    }

    /// Sanitize, create, and load a table from tabular data.
    ///
    /// Column types are inferred from the rows. Returns the final
    /// (sanitized) table name.
    pub fn create_table_from_table_data(
        &self,
        data: &TableData,
        options: &CreateTableOptions,
    ) -> DbResult<String> {
        self.require_write("create_table_from_table_data")?;
        if data.is_empty() {
            return Err(DbError::Tabular(TabularError::EmptyData(format!(
                "table data '{}' has no header or no rows",
                data.name()
            ))));
        }

        let sanitizer = TableDataSanitizer::new(options.dup_col_handler);
        let data = sanitizer.normalize(data)?;
        let table = data.name().to_string();
        let headers = data.headers();

        if let Some(pk) = &options.primary_key {
            if options.add_primary_key_column.is_some() {
                return Err(DbError::InvalidInput(
                    "primary_key and add_primary_key_column are mutually exclusive".to_string(),
                ));
            }
            if !headers.iter().any(|h| h == pk) {
                return Err(DbError::InvalidInput(format!(
                    "primary key attribute '{pk}' not found in headers"
                )));
            }
        }
        if let Some(pk_col) = &options.add_primary_key_column {
            if headers.iter().any(|h| h.eq_ignore_ascii_case(pk_col)) {
                return Err(DbError::InvalidInput(format!(
                    "primary key column '{pk_col}' collides with an existing header"
                )));
            }
        }

        let mut attr_descs: Vec<String> = Vec::with_capacity(headers.len() + 1);
        if let Some(pk_col) = &options.add_primary_key_column {
            attr_descs.push(format!(
                "{} INTEGER PRIMARY KEY AUTOINCREMENT",
                Attr::new(pk_col)
            ));
        }
        for (header, col_type) in headers.iter().zip(data.column_types()) {
            let mut desc = format!("{} {col_type}", Attr::new(header));
            if options.primary_key.as_deref() == Some(header.as_str()) {
                desc.push_str(" PRIMARY KEY");
            }
            attr_descs.push(desc);
        }

        self.create_table(&table, &attr_descs)?;

        let num_attrs = attr_descs.len();
        let rows: Vec<Vec<CellValue>> = data
            .into_rows()
            .into_iter()
            .map(|mut row| {
                if options.add_primary_key_column.is_some() {
                    row.insert(0, CellValue::Null);
                }
                row
            })
            .collect();
        self.insert_rows(&table, num_attrs, rows)?;

        if !options.index_attrs.is_empty() {
            self.create_index_list(&table, &options.index_attrs)?;
        }

        Ok(table)
    }

    /// Create and load a table from headers plus records.
    pub fn create_table_from_data_matrix(
        &self,
        table: &str,
        attrs: &[String],
        records: Vec<Record>,
        options: &CreateTableOptions,
    ) -> DbResult<String> {
        let data = TableData::from_records(table, attrs.to_vec(), records)?;
        self.create_table_from_table_data(&data, options)
    }

    /// Create and load a table from a JSON document (array of objects or
    /// array of arrays with a header row).
    pub fn create_table_from_json(
        &self,
        table: &str,
        json: &str,
        options: &CreateTableOptions,
    ) -> DbResult<String> {
        let data = TableData::from_json_str(table, json)?;
        self.create_table_from_table_data(&data, options)
    }

    /// Drop a table or view if it exists. SQLite's internal `sqlite_*`
    /// tables are ignored.
    pub fn drop_table(&self, table: &str) -> DbResult<()> {
        self.require_write("drop_table")?;
        if table.starts_with("sqlite_") {
            return Ok(());
        }

        if self.has_table(table) {
            self.execute(&format!("DROP TABLE {}", TableRef::new(table)))?;
        } else if self.has_view(table) {
            self.execute(&format!("DROP VIEW {}", TableRef::new(table)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
