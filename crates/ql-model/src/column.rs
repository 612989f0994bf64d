//! Column definitions and their DDL rendering.

use ql_query::Attr;
use ql_tabular::{CellValue, ColumnType};

use crate::error::{ModelError, ModelResult};

/// One column of a model's table.
///
/// Built with the fluent setters:
///
/// ```
/// use ql_model::ColumnDef;
/// use ql_tabular::ColumnType;
///
/// let id = ColumnDef::new("id", ColumnType::Integer)
///     .primary_key()
///     .autoincrement();
/// assert_eq!(id.ddl(), "id INTEGER PRIMARY KEY AUTOINCREMENT");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    name: String,
    col_type: ColumnType,
    primary_key: bool,
    autoincrement: bool,
    not_null: bool,
    unique: bool,
    default: Option<CellValue>,
}

impl ColumnDef {
    pub fn new<S: Into<String>>(name: S, col_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            col_type,
            primary_key: false,
            autoincrement: false,
            not_null: false,
            unique: false,
            default: None,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn autoincrement(mut self) -> Self {
        self.autoincrement = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn default_value<V: Into<CellValue>>(mut self, value: V) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn col_type(&self) -> ColumnType {
        self.col_type
    }

    pub fn is_autoincrement(&self) -> bool {
        self.autoincrement
    }

    /// Render the column's DDL fragment.
    ///
    /// PRIMARY KEY suppresses NOT NULL and UNIQUE, AUTOINCREMENT applies
    /// only to INTEGER primary keys, and NOT NULL suppresses DEFAULT.
    pub fn ddl(&self) -> String {
        let mut parts = vec![Attr::new(&self.name).to_string(), self.col_type.to_string()];

        if self.primary_key {
            parts.push("PRIMARY KEY".to_string());
            if self.autoincrement && self.col_type == ColumnType::Integer {
                parts.push("AUTOINCREMENT".to_string());
            }
        } else {
            if self.not_null {
                parts.push("NOT NULL".to_string());
            }
            if self.unique {
                parts.push("UNIQUE".to_string());
            }
        }

        if !self.not_null && !self.primary_key {
            if let Some(default) = &self.default {
                parts.push(format!("DEFAULT {}", default.to_literal()));
            }
        }

        parts.join(" ")
    }

    /// Check that a cell is storable in this column.
    pub fn check_value(&self, cell: &CellValue) -> ModelResult<()> {
        if cell.is_null() {
            if (self.not_null || self.primary_key) && !self.autoincrement {
                return Err(ModelError::TypeMismatch {
                    column: self.name.clone(),
                    reason: "NULL is not allowed".to_string(),
                });
            }
            return Ok(());
        }

        let compatible = match self.col_type {
            ColumnType::Integer => matches!(cell, CellValue::Integer(_)),
            ColumnType::Real => matches!(cell, CellValue::Integer(_) | CellValue::Real(_)),
            ColumnType::Text => !matches!(cell, CellValue::Blob(_)),
            ColumnType::Blob => matches!(cell, CellValue::Blob(_)),
        };
        if compatible {
            Ok(())
        } else {
            Err(ModelError::TypeMismatch {
                column: self.name.clone(),
                reason: format!(
                    "{} value is not storable in a {} column",
                    cell.type_name(),
                    self.col_type
                ),
            })
        }
    }
}

#[cfg(test)]
#[path = "column_test.rs"]
mod tests;
