//! # sql-interp
//!
//! Interpolate Rust values into SQL based on where they appear.
//!
//! Arguments are raw SQL text or values. Each value looks at the SQL that
//! precedes it and renders itself accordingly: a list after `IN` becomes
//! `(?, ?, ?)`, a map after `SET` becomes `a = ?, b = ?`, a map after
//! `INSERT INTO table` becomes `(a, b) VALUES (?, ?)`, and so on. The result
//! is a SQL string using `?` placeholders plus the bind values, ready to
//! hand to a database driver.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use sql_interp::{sql_interp, SqlValue};
//!
//! let item = HashMap::from([("first_name", "John"), ("last_name", "Doe")]);
//! let (sql, bind) = sql_interp!("INSERT INTO table", item).unwrap();
//! assert_eq!(sql, "INSERT INTO table (first_name, last_name) VALUES (?, ?)");
//! assert_eq!(
//!     bind,
//!     vec![
//!         SqlValue::Text(String::from("John")),
//!         SqlValue::Text(String::from("Doe")),
//!     ]
//! );
//!
//! let (sql, bind) = sql_interp!("SELECT * FROM table WHERE x =", 3, "AND y IN", vec![1, 2, 3]).unwrap();
//! assert_eq!(sql, "SELECT * FROM table WHERE x = ? AND y IN (?, ?, ?)");
//! assert_eq!(bind.len(), 4);
//! ```
//!
//! ## Strings Are SQL
//!
//! String arguments are inserted verbatim. To bind a string, wrap it with
//! [`esc`] first:
//!
//! ```rust
//! use sql_interp::{esc, sql_interp};
//!
//! let first_name = "John";
//!
//! // Wrong: the string becomes part of the SQL.
//! let (sql, _) = sql_interp!("SELECT * FROM table WHERE first_name =", first_name).unwrap();
//! assert_eq!(sql, "SELECT * FROM table WHERE first_name = John");
//!
//! // Right.
//! let (sql, bind) = sql_interp!("SELECT * FROM table WHERE first_name =", esc(first_name)).unwrap();
//! assert_eq!(sql, "SELECT * FROM table WHERE first_name = ?");
//! assert_eq!(bind.len(), 1);
//! ```
//!
//! ## Custom Types
//!
//! Implement [`Esc`] for a wrapper and register it with a [`TypeRegistry`];
//! see the `custom_type` example.

mod context;
mod error;
mod esc;
mod interp;
mod registry;
mod value;

pub use context::Context;
pub use error::{InterpError, Result};
pub use esc::{DictEsc, Esc, Fragment, ListEsc, ScalarEsc};
pub use interp::{esc, sql_interp, Arg, SqlInterp, Statement};
pub use registry::{EscFactory, TypeRegistry};
pub use value::{Opaque, SqlValue, ToSqlValue, ValueKind};

/// Collects arguments into a `Vec<Arg>`.
///
/// ```
/// use sql_interp::{args, SqlInterp};
///
/// let args = args!["SELECT * FROM t WHERE id =", 7];
/// let (sql, bind) = SqlInterp::new().interp(args).unwrap();
/// assert_eq!(sql, "SELECT * FROM t WHERE id = ?");
/// assert_eq!(bind.len(), 1);
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {{
        let args: ::std::vec::Vec<$crate::Arg> = ::std::vec![$($crate::Arg::from($arg)),*];
        args
    }};
}

/// Builds a statement from any mix of SQL text and values using the default
/// wrappers.
///
/// ```
/// use sql_interp::sql_interp;
///
/// let (sql, bind) = sql_interp!("DELETE FROM table WHERE y =", 2).unwrap();
/// assert_eq!(sql, "DELETE FROM table WHERE y = ?");
/// assert_eq!(bind.len(), 1);
/// ```
#[macro_export]
macro_rules! sql_interp {
    ($($arg:expr),* $(,)?) => {
        $crate::sql_interp($crate::args![$($arg),*])
    };
}

/// Builds a [`SqlValue::Map`] from `key => value` pairs of mixed value types.
///
/// ```
/// use sql_interp::{sql_interp, sql_map, SqlValue};
///
/// let where_ = sql_map! { "x" => 3, "y" => vec![1, 2, 3] };
/// let (sql, bind) = sql_interp!("SELECT * FROM table WHERE", where_).unwrap();
/// assert_eq!(sql, "SELECT * FROM table WHERE x = ? AND y IN (?, ?, ?)");
/// assert_eq!(bind, vec![
///     SqlValue::Int(3),
///     SqlValue::Int(1),
///     SqlValue::Int(2),
///     SqlValue::Int(3),
/// ]);
/// ```
#[macro_export]
macro_rules! sql_map {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut entries = ::std::collections::BTreeMap::<::std::string::String, $crate::SqlValue>::new();
        $(
            entries.insert(
                ::std::string::String::from($key),
                $crate::ToSqlValue::to_sql_value($value),
            );
        )*
        $crate::SqlValue::Map(entries)
    }};
}
