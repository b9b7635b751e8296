//! Registering wrappers for application types.

mod common;
use common::*;

use std::sync::Arc;

use sql_interp::{
    args, Arg, Esc, Fragment, InterpError, Result, ScalarEsc, SqlInterp, SqlValue, TypeRegistry,
    ValueKind,
};

#[derive(Debug)]
struct Table {
    name: &'static str,
}

/// Renders a table name verbatim after `FROM`/`JOIN`, bound elsewhere.
#[derive(Debug)]
struct TableEsc(Arc<Table>);

impl Esc for TableEsc {
    fn from_join_ctxt(&self) -> Result<Fragment> {
        Ok((String::from(self.0.name), vec![]))
    }

    fn default_ctxt(&self) -> Result<Fragment> {
        ScalarEsc::new(self.0.name).default_ctxt()
    }
}

#[derive(Debug)]
struct Point {
    x: i64,
    y: i64,
}

#[derive(Debug)]
struct PointEsc(Arc<Point>);

impl Esc for PointEsc {
    fn name(&self) -> &'static str {
        "PointEsc"
    }

    fn default_ctxt(&self) -> Result<Fragment> {
        Ok((
            String::from("POINT(?, ?)"),
            vec![SqlValue::Int(self.0.x), SqlValue::Int(self.0.y)],
        ))
    }
}

fn table_types() -> TypeRegistry {
    let mut types = TypeRegistry::empty();
    types.register::<Table, _>(|table| Box::new(TableEsc(table)));
    types
}

fn point_types() -> TypeRegistry {
    let mut types = TypeRegistry::empty();
    types.register::<Point, _>(|point| Box::new(PointEsc(point)));
    types
}

fn users() -> SqlValue {
    SqlValue::custom(Table { name: "users" })
}

#[test]
fn custom_wrapper_in_from_context() {
    let interp = SqlInterp::with_types(table_types());
    let (sql, bind) = interp
        .interp(args!["SELECT * FROM", users(), "WHERE id =", 1])
        .unwrap();
    assert_eq!(sql, "SELECT * FROM users WHERE id = ?");
    assert_eq!(bind, vec![SqlValue::Int(1)]);
}

#[test]
fn custom_wrapper_falls_back_to_default_context() {
    let interp = SqlInterp::with_types(table_types());
    let (sql, bind) = interp
        .interp(args!["SELECT * FROM audit WHERE target =", users()])
        .unwrap();
    assert_eq!(sql, "SELECT * FROM audit WHERE target = ?");
    assert_eq!(bind, texts(&["users"]));
}

#[test]
fn custom_wrapper_reports_unimplemented_contexts() {
    let interp = SqlInterp::with_types(table_types());
    let err = interp.interp(args!["UPDATE t SET", users()]).unwrap_err();
    assert_eq!(
        err,
        InterpError::UnknownContext {
            esc: "TableEsc",
            context: sql_interp::Context::SetUpdate,
        }
    );
}

#[test]
fn unregistered_custom_value_is_bound_as_scalar() {
    let (sql, bind) = interp(args!["SELECT * FROM t WHERE x =", users()]);
    assert_eq!(sql, "SELECT * FROM t WHERE x = ?");
    assert_eq!(bind.len(), 1);
    assert_eq!(bind[0].kind(), ValueKind::of::<Table>());
}

#[test]
fn add_types_keeps_builtin_wrappers() {
    let mut interp = SqlInterp::new();
    interp.add_types(table_types()).add_types(point_types());

    let (sql, bind) = interp
        .interp(args![
            "SELECT * FROM",
            users(),
            "WHERE location =",
            SqlValue::custom(Point { x: 3, y: 4 }),
            "AND id IN",
            vec![1, 2],
        ])
        .unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM users WHERE location = POINT(?, ?) AND id IN (?, ?)"
    );
    assert_eq!(bind, ints(&[3, 4, 1, 2]));
}

#[test]
fn explicit_wrapper_argument() {
    let point = Arc::new(Point { x: 5, y: 6 });
    let (sql, bind) = interp(args!["UPDATE t SET loc =", Arg::esc(PointEsc(point))]);
    assert_eq!(sql, "UPDATE t SET loc = POINT(?, ?)");
    assert_eq!(bind, ints(&[5, 6]));
}

#[test]
fn interp_esc_uses_registered_types() {
    let interp = SqlInterp::with_types(point_types());
    let esc = interp.esc(SqlValue::custom(Point { x: 0, y: 0 }));
    assert_eq!(esc.name(), "PointEsc");
    assert_eq!(interp.esc(vec![1_i32]).name(), "ListEsc");
}

#[test]
fn registered_kind_overrides_builtin_list() {
    let mut types = TypeRegistry::empty();
    types.register_kind(ValueKind::List, |value| Box::new(ScalarEsc::new(value)));
    let interp = SqlInterp::with_types(types);

    let err = interp.interp(args!["WHERE id IN", vec![1, 2]]).unwrap_err();
    assert_eq!(err.to_string(), "IN context not implemented for ScalarEsc");

    let (sql, bind) = interp.interp(args!["WHERE id =", vec![1, 2]]).unwrap();
    assert_eq!(sql, "WHERE id = ?");
    assert_eq!(bind, ints(&[1, 2]));
}
