//! ql-tabular - tabular data model for Quicklite
//!
//! Loosely-typed tabular data on its way into SQLite: cell conversion from
//! JSON and datetimes, per-column type inference, record alignment, and
//! table/header sanitization.

pub mod convert;
pub mod error;
pub mod infer;
pub mod record;
pub mod sanitize;
pub mod table;

pub use convert::{cell_from_datetime, cell_from_json};
pub use error::{TabularError, TabularResult};
pub use infer::{infer_column_type, ColumnType};
pub use record::Record;
pub use sanitize::{DupColHandler, TableDataSanitizer};
pub use table::TableData;

/// The cell value type shared across the workspace.
pub use ql_query::SqlValue as CellValue;
