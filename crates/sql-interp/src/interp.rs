//! Building statements from a mix of SQL text and values.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::sync::LazyLock;

use tracing::debug;

use crate::error::Result;
use crate::esc::{DictEsc, Esc, ListEsc, ScalarEsc};
use crate::registry::TypeRegistry;
use crate::value::{Opaque, SqlValue, ToSqlValue};

static DEFAULT_REGISTRY: LazyLock<TypeRegistry> = LazyLock::new(TypeRegistry::default);

/// One argument to [`sql_interp`] or [`SqlInterp::interp`].
///
/// Strings convert to [`Arg::Sql`] and are inserted verbatim. To bind a
/// string as a value, wrap it first with [`esc`] or [`SqlInterp::esc`];
/// forgetting to do so puts the string straight into the SQL.
#[derive(Debug)]
pub enum Arg {
    /// Raw SQL text.
    Sql(String),
    /// A value that already carries its rendering rules.
    Esc(Box<dyn Esc>),
    /// A value to be wrapped according to the registry.
    Value(SqlValue),
}

impl Arg {
    /// Wraps a concrete [`Esc`] implementation.
    #[must_use]
    pub fn esc<E: Esc + 'static>(esc: E) -> Self {
        Self::Esc(Box::new(esc))
    }
}

impl From<&str> for Arg {
    fn from(sql: &str) -> Self {
        Self::Sql(String::from(sql))
    }
}

impl From<String> for Arg {
    fn from(sql: String) -> Self {
        Self::Sql(sql)
    }
}

impl From<Box<dyn Esc>> for Arg {
    fn from(esc: Box<dyn Esc>) -> Self {
        Self::Esc(esc)
    }
}

impl From<ScalarEsc> for Arg {
    fn from(esc: ScalarEsc) -> Self {
        Self::esc(esc)
    }
}

impl From<ListEsc> for Arg {
    fn from(esc: ListEsc) -> Self {
        Self::esc(esc)
    }
}

impl From<DictEsc> for Arg {
    fn from(esc: DictEsc) -> Self {
        Self::esc(esc)
    }
}

impl From<SqlValue> for Arg {
    fn from(value: SqlValue) -> Self {
        Self::Value(value)
    }
}

macro_rules! impl_from_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self::Value(value.to_sql_value())
                }
            }
        )*
    };
}

impl_from_value!(Opaque, bool, i64, i32, i16, i8, u32, u16, u8, f64, f32);

impl<T: ToSqlValue> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        Self::Value(value.to_sql_value())
    }
}

impl<T: ToSqlValue> From<Vec<T>> for Arg {
    fn from(value: Vec<T>) -> Self {
        Self::Value(value.to_sql_value())
    }
}

impl<T: ToSqlValue, const N: usize> From<[T; N]> for Arg {
    fn from(value: [T; N]) -> Self {
        Self::Value(value.to_sql_value())
    }
}

impl<T: ToSqlValue + Clone> From<&[T]> for Arg {
    fn from(value: &[T]) -> Self {
        Self::Value(value.to_sql_value())
    }
}

macro_rules! impl_from_tuple {
    ($($name:ident),+) => {
        impl<$($name: ToSqlValue),+> From<($($name,)+)> for Arg {
            fn from(value: ($($name,)+)) -> Self {
                Self::Value(value.to_sql_value())
            }
        }
    };
}

impl_from_tuple!(A);
impl_from_tuple!(A, B);
impl_from_tuple!(A, B, C);
impl_from_tuple!(A, B, C, D);
impl_from_tuple!(A, B, C, D, E);
impl_from_tuple!(A, B, C, D, E, F);

impl<K, V, S> From<HashMap<K, V, S>> for Arg
where
    K: Into<String>,
    V: ToSqlValue,
    S: BuildHasher,
{
    fn from(value: HashMap<K, V, S>) -> Self {
        Self::Value(value.to_sql_value())
    }
}

impl<K: Into<String>, V: ToSqlValue> From<BTreeMap<K, V>> for Arg {
    fn from(value: BTreeMap<K, V>) -> Self {
        Self::Value(value.to_sql_value())
    }
}

/// A statement under construction: SQL text plus bind values.
///
/// Pieces are joined with a single space unless the text so far is empty or
/// already ends in a space; the pieces themselves are never trimmed.
///
/// # Example
///
/// ```
/// use sql_interp::{esc, Statement};
///
/// let mut stmt = Statement::new();
/// stmt.push_sql("SELECT * FROM users WHERE id IN");
/// stmt.push_esc(&*esc(vec![1, 2])).unwrap();
///
/// assert_eq!(stmt.sql(), "SELECT * FROM users WHERE id IN (?, ?)");
/// assert_eq!(stmt.bind().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    sql: String,
    bind: Vec<SqlValue>,
}

impl Statement {
    /// Creates an empty statement.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sql: String::new(),
            bind: Vec::new(),
        }
    }

    /// Appends raw SQL.
    pub fn push_sql(&mut self, part: &str) -> &mut Self {
        if !self.sql.is_empty() && !self.sql.ends_with(' ') {
            self.sql.push(' ');
        }
        self.sql.push_str(part);
        self
    }

    /// Renders `esc` in the context of the SQL so far and appends the result.
    ///
    /// # Errors
    ///
    /// Returns the wrapper's error; the statement is left unchanged.
    pub fn push_esc<E: Esc + ?Sized>(&mut self, esc: &E) -> Result<&mut Self> {
        let (snippet, bind) = esc.to_sql(&self.sql)?;
        self.push_sql(&snippet);
        self.bind.extend(bind);
        Ok(self)
    }

    /// Appends one argument, wrapping plain values with `registry`.
    ///
    /// # Errors
    ///
    /// Returns the wrapper's error; the statement is left unchanged.
    pub fn push_arg(&mut self, arg: Arg, registry: &TypeRegistry) -> Result<&mut Self> {
        match arg {
            Arg::Sql(sql) => Ok(self.push_sql(&sql)),
            Arg::Esc(esc) => self.push_esc(esc.as_ref()),
            Arg::Value(value) => self.push_esc(registry.esc(value).as_ref()),
        }
    }

    /// The SQL so far.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The bind values so far.
    #[must_use]
    pub fn bind(&self) -> &[SqlValue] {
        &self.bind
    }

    /// Consumes the statement, returning SQL and bind values.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.bind)
    }
}

/// Interpolates values into SQL with its own set of wrappers.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use sql_interp::{args, SqlInterp};
///
/// let sqli = SqlInterp::new();
/// let item = HashMap::from([("first_name", "John"), ("last_name", "Doe")]);
///
/// let (sql, bind) = sqli.interp(args!["UPDATE table SET", item, "WHERE y <>", 2]).unwrap();
/// assert_eq!(sql, "UPDATE table SET first_name = ?, last_name = ? WHERE y <> ?");
/// assert_eq!(bind.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SqlInterp {
    registry: TypeRegistry,
}

impl SqlInterp {
    /// Creates an interpolator with the default wrappers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an interpolator with the default wrappers plus `types`.
    #[must_use]
    pub fn with_types(types: TypeRegistry) -> Self {
        let mut sqli = Self::new();
        sqli.add_types(types);
        sqli
    }

    /// Adds wrappers, replacing existing entries for the same kinds.
    pub fn add_types(&mut self, types: TypeRegistry) -> &mut Self {
        self.registry.extend(types);
        self
    }

    /// The registry used to wrap values.
    #[must_use]
    pub const fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Wraps `value`, e.g. to bind a string instead of inserting it as SQL.
    #[must_use]
    pub fn esc<T: ToSqlValue>(&self, value: T) -> Box<dyn Esc> {
        self.registry.esc(value)
    }

    /// Builds a statement from `args`.
    ///
    /// # Errors
    ///
    /// Returns [`InterpError::UnknownContext`](crate::InterpError::UnknownContext)
    /// when a value cannot be rendered where it appears.
    pub fn interp<I>(&self, args: I) -> Result<(String, Vec<SqlValue>)>
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        build(&self.registry, args)
    }
}

/// Wraps `value` using the default wrappers.
///
/// ```
/// use sql_interp::{esc, sql_interp, Arg, SqlValue};
///
/// let (sql, bind) = sql_interp([
///     Arg::from("SELECT * FROM table WHERE full_name ="),
///     Arg::from(esc("John Doe")),
/// ])
/// .unwrap();
///
/// assert_eq!(sql, "SELECT * FROM table WHERE full_name = ?");
/// assert_eq!(bind, vec![SqlValue::Text(String::from("John Doe"))]);
/// ```
#[must_use]
pub fn esc<T: ToSqlValue>(value: T) -> Box<dyn Esc> {
    DEFAULT_REGISTRY.esc(value)
}

/// Builds a statement from `args` using the default wrappers.
///
/// See also the [`sql_interp!`](crate::sql_interp!) macro.
///
/// # Errors
///
/// Returns [`InterpError::UnknownContext`](crate::InterpError::UnknownContext)
/// when a value cannot be rendered where it appears.
pub fn sql_interp<I>(args: I) -> Result<(String, Vec<SqlValue>)>
where
    I: IntoIterator,
    I::Item: Into<Arg>,
{
    build(&DEFAULT_REGISTRY, args)
}

fn build<I>(registry: &TypeRegistry, args: I) -> Result<(String, Vec<SqlValue>)>
where
    I: IntoIterator,
    I::Item: Into<Arg>,
{
    let mut statement = Statement::new();
    for arg in args {
        statement.push_arg(arg.into(), registry)?;
    }
    debug!(
        sql = %statement.sql(),
        binds = statement.bind().len(),
        "Built statement"
    );
    Ok(statement.into_parts())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::error::InterpError;

    #[test]
    fn test_push_sql_adds_single_space() {
        let mut stmt = Statement::new();
        stmt.push_sql("SELECT").push_sql("*").push_sql("FROM table");
        assert_eq!(stmt.sql(), "SELECT * FROM table");
    }

    #[test]
    fn test_push_sql_keeps_existing_whitespace() {
        let mut stmt = Statement::new();
        stmt.push_sql("SELECT ").push_sql(" *").push_sql("   FROM table");
        assert_eq!(stmt.sql(), "SELECT  *    FROM table");
    }

    #[test]
    fn test_push_sql_only_checks_for_space() {
        let mut stmt = Statement::new();
        stmt.push_sql("SELECT\n").push_sql("1");
        assert_eq!(stmt.sql(), "SELECT\n 1");
    }

    #[test]
    fn test_push_esc_uses_current_sql_as_context() {
        let mut stmt = Statement::new();
        stmt.push_sql("INSERT INTO t");
        stmt.push_esc(&ListEsc::new([1_i32, 2])).unwrap();
        assert_eq!(stmt.sql(), "INSERT INTO t VALUES (?, ?)");
        assert_eq!(stmt.bind(), &[SqlValue::Int(1), SqlValue::Int(2)]);
    }

    #[test]
    fn test_push_esc_after_trailing_space() {
        let mut stmt = Statement::new();
        stmt.push_sql("SELECT * FROM t WHERE id IN ");
        stmt.push_esc(&ListEsc::new([1_i32, 2])).unwrap();
        assert_eq!(stmt.sql(), "SELECT * FROM t WHERE id IN (?, ?)");

        stmt.push_sql(" AND x = ");
        stmt.push_esc(&ScalarEsc::new(3_i32)).unwrap();
        assert_eq!(stmt.sql(), "SELECT * FROM t WHERE id IN (?, ?)  AND x = ?");
        assert_eq!(stmt.bind().len(), 3);
    }

    #[test]
    fn test_push_esc_failure_leaves_statement_unchanged() {
        let mut stmt = Statement::new();
        stmt.push_sql("UPDATE t SET");
        let err = stmt.push_esc(&ListEsc::new([1_i32])).unwrap_err();
        assert_eq!(err, InterpError::unknown_context("ListEsc", Context::SetUpdate));
        assert_eq!(stmt.sql(), "UPDATE t SET");
        assert!(stmt.bind().is_empty());
    }

    #[test]
    fn test_push_arg_variants() {
        let registry = TypeRegistry::default();
        let mut stmt = Statement::new();
        stmt.push_arg(Arg::from("SELECT * FROM t WHERE a ="), &registry)
            .unwrap()
            .push_arg(Arg::from(esc("x")), &registry)
            .unwrap()
            .push_arg(Arg::from("AND b IN"), &registry)
            .unwrap()
            .push_arg(Arg::from(vec![1_i32, 2]), &registry)
            .unwrap();

        let (sql, bind) = stmt.into_parts();
        assert_eq!(sql, "SELECT * FROM t WHERE a = ? AND b IN (?, ?)");
        assert_eq!(
            bind,
            vec![
                SqlValue::Text(String::from("x")),
                SqlValue::Int(1),
                SqlValue::Int(2),
            ]
        );
    }

    #[test]
    fn test_strings_are_raw_sql() {
        assert!(matches!(Arg::from("x = 1"), Arg::Sql(_)));
        assert!(matches!(Arg::from(String::from("x = 1")), Arg::Sql(_)));
        assert!(matches!(Arg::from(Some("x")), Arg::Value(SqlValue::Text(_))));
        assert!(matches!(Arg::from(esc("x")), Arg::Esc(_)));
    }

    #[test]
    fn test_interp_with_types() {
        let mut types = TypeRegistry::empty();
        types.register_kind(crate::ValueKind::List, |value| Box::new(ScalarEsc::new(value)));
        let sqli = SqlInterp::with_types(types);
        assert!(sqli.registry().contains(crate::ValueKind::List));
        assert!(sqli.registry().contains(crate::ValueKind::Map));
        assert!(!SqlInterp::new().registry().contains(crate::ValueKind::Text));
        assert_eq!(sqli.esc(vec![1_i32]).name(), "ScalarEsc");

        let (sql, bind) = sqli.interp(["SELECT * FROM t WHERE x ="]).unwrap();
        assert_eq!(sql, "SELECT * FROM t WHERE x =");
        assert!(bind.is_empty());

        let (sql, bind) = sqli
            .interp([Arg::from("WHERE x ="), Arg::from(vec![1_i32, 2])])
            .unwrap();
        assert_eq!(sql, "WHERE x = ?");
        assert_eq!(bind.len(), 2);
    }

    #[test]
    fn test_interp_empty() {
        let (sql, bind) = sql_interp(Vec::<Arg>::new()).unwrap();
        assert!(sql.is_empty());
        assert!(bind.is_empty());
    }
}
