//! Cell conversions from foreign value types.

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::CellValue;

/// Datetime cells are stored as text in this format.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Convert a JSON value into a cell.
///
/// Numbers keep their integer/real distinction, booleans become 0/1, and
/// nested arrays/objects are re-serialized as JSON text.
pub fn cell_from_json(value: Value) -> CellValue {
    match value {
        Value::Null => CellValue::Null,
        Value::Bool(b) => CellValue::from(b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else {
                CellValue::Real(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => CellValue::Text(s),
        nested @ (Value::Array(_) | Value::Object(_)) => CellValue::Text(nested.to_string()),
    }
}

/// Convert a naive datetime into a text cell.
pub fn cell_from_datetime(dt: NaiveDateTime) -> CellValue {
    CellValue::Text(dt.format(DATETIME_FORMAT).to_string())
}

#[cfg(test)]
#[path = "convert_test.rs"]
mod tests;
