#![allow(dead_code)]

use sql_interp::{Arg, SqlInterp, SqlValue};

pub fn text(s: &str) -> SqlValue {
    SqlValue::Text(String::from(s))
}

pub fn texts(values: &[&str]) -> Vec<SqlValue> {
    values.iter().map(|s| text(s)).collect()
}

pub fn ints(values: &[i64]) -> Vec<SqlValue> {
    values.iter().copied().map(SqlValue::Int).collect()
}

pub fn interp(args: Vec<Arg>) -> (String, Vec<SqlValue>) {
    SqlInterp::new()
        .interp(args)
        .unwrap_or_else(|e| panic!("Failed to interpolate: {e}"))
}

/// Asserts that every `?` in `sql` has exactly one bind value.
pub fn assert_aligned(sql: &str, bind: &[SqlValue]) {
    let placeholders = sql.matches('?').count();
    assert_eq!(
        placeholders,
        bind.len(),
        "{placeholders} placeholders but {} bind values in: {sql}",
        bind.len()
    );
}
