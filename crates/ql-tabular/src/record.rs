//! Input records for table creation and bulk insert.

use std::collections::HashMap;

use crate::error::{TabularError, TabularResult};
use crate::CellValue;

/// One input record: either positional values or a map keyed by header.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Row(Vec<CellValue>),
    Map(HashMap<String, CellValue>),
}

impl Record {
    /// Align the record to the given header order.
    ///
    /// Map records fill missing keys with NULL; positional records are
    /// padded with NULL on the right and rejected when too wide.
    pub fn into_row(self, headers: &[String]) -> TabularResult<Vec<CellValue>> {
        match self {
            Record::Row(mut row) => {
                if row.len() > headers.len() {
                    return Err(TabularError::RecordArity {
                        expected: headers.len(),
                        actual: row.len(),
                    });
                }
                row.resize(headers.len(), CellValue::Null);
                Ok(row)
            }
            Record::Map(mut map) => Ok(headers
                .iter()
                .map(|h| map.remove(h).unwrap_or(CellValue::Null))
                .collect()),
        }
    }
}

impl From<Vec<CellValue>> for Record {
    fn from(row: Vec<CellValue>) -> Self {
        Record::Row(row)
    }
}

impl From<HashMap<String, CellValue>> for Record {
    fn from(map: HashMap<String, CellValue>) -> Self {
        Record::Map(map)
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
