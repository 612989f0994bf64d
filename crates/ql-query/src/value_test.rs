//! Tests for SQL literal rendering and value conversions.

use crate::value::SqlValue;

// ── Literal rendering ──────────────────────────────────────────────────

#[test]
fn null_renders_as_keyword() {
    assert_eq!(SqlValue::Null.to_literal(), "NULL");
}

#[test]
fn integers_render_bare() {
    assert_eq!(SqlValue::Integer(0).to_literal(), "0");
    assert_eq!(SqlValue::Integer(-42).to_literal(), "-42");
}

#[test]
fn reals_render_bare() {
    assert_eq!(SqlValue::Real(1.2).to_literal(), "1.2");
    assert_eq!(SqlValue::Real(-0.5).to_literal(), "-0.5");
}

#[test]
fn text_is_single_quoted() {
    assert_eq!(SqlValue::from("hoge").to_literal(), "'hoge'");
}

#[test]
fn text_with_single_quote_switches_to_double_quotes() {
    assert_eq!(SqlValue::from("O'Brien").to_literal(), "\"O'Brien\"");
}

#[test]
fn numeric_text_renders_bare() {
    assert_eq!(SqlValue::from("42").to_literal(), "42");
    assert_eq!(SqlValue::from("1.2").to_literal(), "1.2");
}

#[test]
fn non_numeric_text_stays_quoted() {
    assert_eq!(SqlValue::from("1.2.3").to_literal(), "'1.2.3'");
    assert_eq!(SqlValue::from("").to_literal(), "''");
}

#[test]
fn current_timestamp_passes_through() {
    assert_eq!(
        SqlValue::from("CURRENT_TIMESTAMP").to_literal(),
        "CURRENT_TIMESTAMP"
    );
}

#[test]
fn blob_renders_as_hex() {
    assert_eq!(
        SqlValue::Blob(vec![0xDE, 0xAD, 0x01]).to_literal(),
        "X'DEAD01'"
    );
}

// ── Conversions ────────────────────────────────────────────────────────

#[test]
fn bool_maps_to_integer() {
    assert_eq!(SqlValue::from(true), SqlValue::Integer(1));
    assert_eq!(SqlValue::from(false), SqlValue::Integer(0));
}

#[test]
fn option_maps_none_to_null() {
    assert_eq!(SqlValue::from(None::<i64>), SqlValue::Null);
    assert_eq!(SqlValue::from(Some(7i64)), SqlValue::Integer(7));
}

#[test]
fn type_names_match_sqlite_storage_classes() {
    assert_eq!(SqlValue::Null.type_name(), "null");
    assert_eq!(SqlValue::Integer(1).type_name(), "integer");
    assert_eq!(SqlValue::Real(1.0).type_name(), "real");
    assert_eq!(SqlValue::from("x").type_name(), "text");
    assert_eq!(SqlValue::Blob(vec![]).type_name(), "blob");
}
