//! In-memory tabular data.

use serde_json::Value;

use crate::convert::cell_from_json;
use crate::error::{TabularError, TabularResult};
use crate::infer::{infer_column_type, ColumnType};
use crate::record::Record;
use crate::CellValue;

/// A named table of headers and rows, the common currency between data
/// sources and the database layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl TableData {
    /// Build from pre-aligned rows.
    pub fn new<S: Into<String>>(name: S, headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Build from heterogeneous records, aligning each to the header order.
    pub fn from_records<S: Into<String>>(
        name: S,
        headers: Vec<String>,
        records: Vec<Record>,
    ) -> TabularResult<Self> {
        let rows = records
            .into_iter()
            .map(|r| r.into_row(&headers))
            .collect::<TabularResult<Vec<_>>>()?;
        Ok(Self::new(name, headers, rows))
    }

    /// Parse a JSON document into table data. See [`TableData::from_json_value`].
    pub fn from_json_str<S: Into<String>>(name: S, json: &str) -> TabularResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(name, value)
    }

    /// Build table data from a parsed JSON value.
    ///
    /// Accepts an array of objects (headers are the union of keys in
    /// first-seen order) or an array of arrays (the first array is the
    /// header row and must be all strings).
    pub fn from_json_value<S: Into<String>>(name: S, value: Value) -> TabularResult<Self> {
        let Value::Array(items) = value else {
            return Err(TabularError::JsonShape(
                "expected a top-level JSON array".to_string(),
            ));
        };
        if items.is_empty() {
            return Err(TabularError::EmptyData("JSON array is empty".to_string()));
        }

        match &items[0] {
            Value::Object(_) => Self::from_json_objects(name, items),
            Value::Array(_) => Self::from_json_arrays(name, items),
            other => Err(TabularError::JsonShape(format!(
                "array elements must be objects or arrays, got {other}"
            ))),
        }
    }

    fn from_json_objects<S: Into<String>>(name: S, items: Vec<Value>) -> TabularResult<Self> {
        let mut headers: Vec<String> = Vec::new();
        let mut objects = Vec::with_capacity(items.len());
        for item in items {
            let Value::Object(map) = item else {
                return Err(TabularError::JsonShape(
                    "mixed object/non-object rows".to_string(),
                ));
            };
            for key in map.keys() {
                if !headers.iter().any(|h| h == key) {
                    headers.push(key.clone());
                }
            }
            objects.push(map);
        }

        let rows = objects
            .into_iter()
            .map(|mut map| {
                headers
                    .iter()
                    .map(|h| map.remove(h).map_or(CellValue::Null, cell_from_json))
                    .collect()
            })
            .collect();
        Ok(Self::new(name, headers, rows))
    }

    fn from_json_arrays<S: Into<String>>(name: S, items: Vec<Value>) -> TabularResult<Self> {
        let mut iter = items.into_iter();
        let header_row = iter.next().unwrap_or(Value::Null);
        let Value::Array(header_cells) = header_row else {
            return Err(TabularError::JsonShape("missing header row".to_string()));
        };
        let headers = header_cells
            .into_iter()
            .map(|cell| match cell {
                Value::String(s) => Ok(s),
                other => Err(TabularError::JsonShape(format!(
                    "header row must be all strings, got {other}"
                ))),
            })
            .collect::<TabularResult<Vec<_>>>()?;

        let records = iter
            .map(|item| {
                let Value::Array(cells) = item else {
                    return Err(TabularError::JsonShape(
                        "mixed array/non-array rows".to_string(),
                    ));
                };
                Ok(Record::Row(cells.into_iter().map(cell_from_json).collect()))
            })
            .collect::<TabularResult<Vec<_>>>()?;

        Self::from_records(name, headers, records)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<CellValue>> {
        self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty_header(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn is_empty_rows(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when there is nothing to load (no headers or no rows).
    pub fn is_empty(&self) -> bool {
        self.is_empty_header() || self.is_empty_rows()
    }

    /// Infer a column type per header from the row data.
    pub fn column_types(&self) -> Vec<ColumnType> {
        (0..self.headers.len())
            .map(|idx| infer_column_type(self.rows.iter().filter_map(|row| row.get(idx))))
            .collect()
    }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
