//! Column type inference over heterogeneous cells.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CellValue;

/// SQLite column affinity chosen for an inferred column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
    Blob,
}

impl ColumnType {
    /// SQLite type name for DDL.
    pub fn as_sql(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
            ColumnType::Blob => "BLOB",
        }
    }

    /// Map a declared SQLite column type back to an affinity, following
    /// SQLite's own affinity rules (INT anywhere wins, then textual
    /// types, then REAL/FLOA/DOUB).
    pub fn from_sql(decl: &str) -> ColumnType {
        let upper = decl.to_ascii_uppercase();
        if upper.contains("INT") {
            ColumnType::Integer
        } else if upper.contains("CHAR") || upper.contains("CLOB") || upper.contains("TEXT") {
            ColumnType::Text
        } else if upper.contains("BLOB") || upper.is_empty() {
            ColumnType::Blob
        } else if upper.contains("REAL") || upper.contains("FLOA") || upper.contains("DOUB") {
            ColumnType::Real
        } else {
            ColumnType::Text
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// What a single cell looks like to the sniffer. Nulls and empty text
/// carry no type information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sniff {
    Integer,
    Real,
    Text,
    Blob,
}

fn sniff_cell(cell: &CellValue) -> Option<Sniff> {
    match cell {
        CellValue::Null => None,
        CellValue::Integer(_) => Some(Sniff::Integer),
        CellValue::Real(_) => Some(Sniff::Real),
        CellValue::Blob(_) => Some(Sniff::Blob),
        CellValue::Text(s) => {
            if s.is_empty() {
                None
            } else if s.parse::<i64>().is_ok() {
                Some(Sniff::Integer)
            } else if s.parse::<f64>().is_ok() {
                Some(Sniff::Real)
            } else {
                Some(Sniff::Text)
            }
        }
    }
}

/// Infer the column type for a sequence of cells.
///
/// INTEGER when every typed cell sniffs integer, REAL when every typed
/// cell sniffs numeric with at least one real, BLOB when every typed cell
/// is a blob, TEXT otherwise. A column with no typed cells defaults to
/// TEXT.
pub fn infer_column_type<'a, I>(cells: I) -> ColumnType
where
    I: IntoIterator<Item = &'a CellValue>,
{
    let mut seen_any = false;
    let mut all_integer = true;
    let mut all_numeric = true;
    let mut all_blob = true;

    for cell in cells {
        let Some(sniff) = sniff_cell(cell) else {
            continue;
        };
        seen_any = true;
        match sniff {
            Sniff::Integer => {
                all_blob = false;
            }
            Sniff::Real => {
                all_integer = false;
                all_blob = false;
            }
            Sniff::Blob => {
                all_integer = false;
                all_numeric = false;
            }
            Sniff::Text => {
                all_integer = false;
                all_numeric = false;
                all_blob = false;
            }
        }
    }

    if !seen_any {
        return ColumnType::Text;
    }
    if all_integer {
        ColumnType::Integer
    } else if all_numeric {
        ColumnType::Real
    } else if all_blob {
        ColumnType::Blob
    } else {
        ColumnType::Text
    }
}

#[cfg(test)]
#[path = "infer_test.rs"]
mod tests;
