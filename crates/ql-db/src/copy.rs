//! Cross-database table utilities: append, copy, dump, memdb extraction.

use std::path::Path;

use log::{debug, error};

use ql_query::WhereExpr;
use ql_tabular::{ColumnType, TableData};

use crate::connection::{SqliteDb, OpenMode};
use crate::error::{DbError, DbResult};
use crate::schema::TableMetadata;

/// Append every record of `table` in `src` to the same table in `dst`.
///
/// When the table does not exist in `dst` it is created with the source
/// schema (declared types, primary key, indexes). When it does exist the
/// attribute lists must match.
pub fn append_table(src: &SqliteDb, dst: &SqliteDb, table: &str) -> DbResult<bool> {
    dst.require_write("append_table")?;
    src.verify_table_existence(table, true)?;

    let data = src.select_as_table("*", table, None, None)?;
    debug!(
        "append table: {}({table}) -> {}({table}), {} records",
        src.path(),
        dst.path(),
        data.num_rows()
    );

    if dst.has_table(table) {
        let dst_attrs = dst.fetch_attr_names(table)?;
        if dst_attrs != data.headers() {
            return Err(DbError::InvalidInput(format!(
                "schema mismatch for '{table}': source attributes {:?}, destination {:?}",
                data.headers(),
                dst_attrs
            )));
        }
        let num_attrs = data.headers().len();
        dst.insert_rows(table, num_attrs, data.into_rows())?;
    } else {
        let meta = src.table_metadata(table)?;
        create_with_metadata(dst, data, &meta)?;
    }
    Ok(true)
}

/// Copy `src_table` in `src` to `dst_table` in `dst`.
///
/// An existing destination table is dropped first when `overwrite` is
/// set; otherwise the copy is refused and `false` is returned.
pub fn copy_table(
    src: &SqliteDb,
    dst: &SqliteDb,
    src_table: &str,
    dst_table: &str,
    overwrite: bool,
) -> DbResult<bool> {
    dst.require_write("copy_table")?;
    src.verify_table_existence(src_table, true)?;

    if dst.has_table(dst_table) {
        if !overwrite {
            error!(
                "failed to copy table: the table '{dst_table}' already exists in {}",
                dst.path()
            );
            return Ok(false);
        }
        dst.drop_table(dst_table)?;
    }

    let source = src.select_as_table("*", src_table, None, None)?;
    let data = TableData::new(
        dst_table,
        source.headers().to_vec(),
        source.into_rows(),
    );
    let meta = src.table_metadata(src_table)?;
    create_with_metadata(dst, data, &meta)?;
    Ok(true)
}

impl SqliteDb {
    /// Copy every table of this database into a database at `path`.
    pub fn dump<P: AsRef<Path>>(&self, path: P) -> DbResult<()> {
        let out = SqliteDb::open(path, OpenMode::Write)?;
        for table in self.fetch_table_names(false)? {
            append_table(self, &out, &table)?;
        }
        Ok(())
    }

    /// Materialize a selection from `table` into a fresh in-memory
    /// database, preserving the source primary key and indexes.
    pub fn select_as_memdb(
        &self,
        table: &str,
        where_clause: Option<&WhereExpr>,
        extra: Option<&str>,
    ) -> DbResult<SqliteDb> {
        self.verify_table_existence(table, true)?;
        let data = self.select_as_table("*", table, where_clause, extra)?;
        let meta = self.table_metadata(table)?;

        let memdb = SqliteDb::open_memory()?;
        create_with_metadata(&memdb, data, &meta)?;
        Ok(memdb)
    }
}

/// Create `data`'s table in `dst` using the source schema metadata, then
/// load the rows and recreate indexes.
fn create_with_metadata(dst: &SqliteDb, data: TableData, meta: &TableMetadata) -> DbResult<()> {
    let attr_descs: Vec<String> = data
        .headers()
        .iter()
        .map(|header| {
            let col_type = meta
                .attr_types
                .iter()
                .find(|(name, _)| name == header)
                .map_or(ColumnType::Text, |(_, t)| *t);
            let mut desc = format!("{} {col_type}", ql_query::Attr::new(header));
            if meta.primary_key.as_deref() == Some(header.as_str()) {
                desc.push_str(" PRIMARY KEY");
            }
            desc
        })
        .collect();

    let table = data.name().to_string();
    let num_attrs = data.headers().len();
    dst.create_table(&table, &attr_descs)?;
    dst.insert_rows(&table, num_attrs, data.into_rows())?;
    if !meta.indexed_attrs.is_empty() {
        dst.create_index_list(&table, &meta.indexed_attrs)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "copy_test.rs"]
mod tests;
