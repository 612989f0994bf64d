//! ql-query - SQL string-building primitives for Quicklite
//!
//! This crate renders safely-escaped SQLite identifiers and literals and
//! assembles SELECT/INSERT/UPDATE statement strings. It knows nothing about
//! connections or tabular data; higher layers build on these primitives.

pub mod clause;
pub mod error;
pub mod expr;
pub mod name;
pub mod stmt;
pub mod value;

pub use clause::{CmpOperator, SetClause, Where, WhereExpr};
pub use error::{QueryError, QueryResult};
pub use expr::{Attr, AttrList, TableRef};
pub use name::{check_attr_name, check_table_name, validate_attr_name, validate_table_name, NameCheck};
pub use stmt::{
    insert_many_query, insert_query, make_index_name, make_update, make_where_in,
    make_where_not_in, Select,
};
pub use value::SqlValue;
