//! ql-model - declarative model layer for Quicklite
//!
//! Describe a table as a struct plus [`ColumnDef`]s, implement [`Model`],
//! and get create/insert/select/count/drop against a [`ql_db::SqliteDb`]
//! with record validation on the way in.

pub mod column;
pub mod error;
pub mod model;

pub use column::ColumnDef;
pub use error::{ModelError, ModelResult};
pub use model::{
    integer_field, opt_integer_field, opt_real_field, opt_text_field, real_field, text_field,
    Model,
};
