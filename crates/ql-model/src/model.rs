//! The [`Model`] trait: table-per-type convenience over [`SqliteDb`].

use log::debug;

use ql_db::{Record, SqliteDb, WhereExpr};
use ql_tabular::CellValue;

use crate::column::ColumnDef;
use crate::error::{ModelError, ModelResult};

/// A struct mapped to one table.
///
/// Implementors provide the table name, column definitions, and the
/// record conversions; everything else comes for free.
pub trait Model: Sized {
    fn table_name() -> String;

    fn columns() -> Vec<ColumnDef>;

    /// The struct as a record in column order.
    fn to_record(&self) -> Vec<CellValue>;

    /// Decode a fetched record (in column order) back into the struct.
    fn from_record(record: &[CellValue]) -> ModelResult<Self>;

    fn attr_names() -> Vec<String> {
        Self::columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    /// Create the model's table if it does not exist yet.
    fn create_table(db: &SqliteDb) -> ModelResult<()> {
        let descs: Vec<String> = Self::columns().iter().map(ColumnDef::ddl).collect();
        debug!("create model table: {}", Self::table_name());
        db.create_table(&Self::table_name(), &descs)?;
        Ok(())
    }

    /// Validate and insert one instance.
    fn insert(db: &SqliteDb, row: &Self) -> ModelResult<()> {
        let record = row.to_record();
        let columns = Self::columns();
        if record.len() != columns.len() {
            return Err(ModelError::Arity {
                model: Self::table_name(),
                expected: columns.len(),
                actual: record.len(),
            });
        }
        for (cell, column) in record.iter().zip(&columns) {
            column.check_value(cell)?;
        }

        db.insert(&Self::table_name(), Record::Row(record))?;
        Ok(())
    }

    /// Fetch matching rows as model instances.
    fn select(
        db: &SqliteDb,
        where_clause: Option<&WhereExpr>,
        extra: Option<&str>,
    ) -> ModelResult<Vec<Self>> {
        let rows = db.select("*", &Self::table_name(), where_clause, extra)?;
        rows.iter().map(|row| Self::from_record(row)).collect()
    }

    fn fetch_num_records(db: &SqliteDb, where_clause: Option<&WhereExpr>) -> ModelResult<i64> {
        Ok(db.fetch_num_records(&Self::table_name(), where_clause)?)
    }

    fn drop_table(db: &SqliteDb) -> ModelResult<()> {
        db.drop_table(&Self::table_name())?;
        Ok(())
    }
}

// ── Record decoding helpers ────────────────────────────────────────────

fn field(record: &[CellValue], idx: usize) -> ModelResult<&CellValue> {
    record.get(idx).ok_or_else(|| ModelError::MalformedRecord {
        index: idx,
        reason: "missing column".to_string(),
    })
}

pub fn integer_field(record: &[CellValue], idx: usize) -> ModelResult<i64> {
    match field(record, idx)? {
        CellValue::Integer(i) => Ok(*i),
        other => Err(ModelError::MalformedRecord {
            index: idx,
            reason: format!("expected integer, got {}", other.type_name()),
        }),
    }
}

pub fn real_field(record: &[CellValue], idx: usize) -> ModelResult<f64> {
    match field(record, idx)? {
        CellValue::Real(r) => Ok(*r),
        CellValue::Integer(i) => Ok(*i as f64),
        other => Err(ModelError::MalformedRecord {
            index: idx,
            reason: format!("expected real, got {}", other.type_name()),
        }),
    }
}

pub fn text_field(record: &[CellValue], idx: usize) -> ModelResult<String> {
    match field(record, idx)? {
        CellValue::Text(s) => Ok(s.clone()),
        other => Err(ModelError::MalformedRecord {
            index: idx,
            reason: format!("expected text, got {}", other.type_name()),
        }),
    }
}

pub fn opt_integer_field(record: &[CellValue], idx: usize) -> ModelResult<Option<i64>> {
    match field(record, idx)? {
        CellValue::Null => Ok(None),
        _ => integer_field(record, idx).map(Some),
    }
}

pub fn opt_real_field(record: &[CellValue], idx: usize) -> ModelResult<Option<f64>> {
    match field(record, idx)? {
        CellValue::Null => Ok(None),
        _ => real_field(record, idx).map(Some),
    }
}

pub fn opt_text_field(record: &[CellValue], idx: usize) -> ModelResult<Option<String>> {
    match field(record, idx)? {
        CellValue::Null => Ok(None),
        _ => text_field(record, idx).map(Some),
    }
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
