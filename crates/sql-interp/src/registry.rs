//! Choosing a wrapper for a value.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::esc::{DictEsc, Esc, ListEsc, ScalarEsc};
use crate::value::{SqlValue, ToSqlValue, ValueKind};

/// Builds the wrapper for a value of a registered kind.
pub type EscFactory = Arc<dyn Fn(SqlValue) -> Box<dyn Esc> + Send + Sync>;

/// Maps value kinds to the wrapper that renders them.
///
/// Kinds without an entry are wrapped in a [`ScalarEsc`]. The default
/// registry wraps lists in a [`ListEsc`] and maps in a [`DictEsc`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use sql_interp::{Esc, Fragment, ScalarEsc, SqlValue, TypeRegistry};
///
/// #[derive(Debug)]
/// struct Table(String);
///
/// #[derive(Debug)]
/// struct TableEsc(Arc<Table>);
///
/// impl Esc for TableEsc {
///     fn from_join_ctxt(&self) -> sql_interp::Result<Fragment> {
///         Ok((self.0 .0.clone(), vec![]))
///     }
///
///     fn default_ctxt(&self) -> sql_interp::Result<Fragment> {
///         ScalarEsc::new(self.0 .0.as_str()).default_ctxt()
///     }
/// }
///
/// let mut registry = TypeRegistry::default();
/// registry.register::<Table, _>(|table| Box::new(TableEsc(table)));
///
/// let esc = registry.esc(SqlValue::custom(Table(String::from("users"))));
/// assert_eq!(esc.name(), "TableEsc");
/// assert_eq!(esc.to_sql("SELECT * FROM").unwrap().0, "users");
/// ```
#[derive(Clone)]
pub struct TypeRegistry {
    factories: HashMap<ValueKind, EscFactory>,
}

impl TypeRegistry {
    /// Creates a registry with no entries; every value becomes a [`ScalarEsc`].
    #[must_use]
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers `factory` for every value of `kind`, replacing any previous
    /// entry.
    pub fn register_kind<F>(&mut self, kind: ValueKind, factory: F) -> &mut Self
    where
        F: Fn(SqlValue) -> Box<dyn Esc> + Send + Sync + 'static,
    {
        self.factories.insert(kind, Arc::new(factory));
        self
    }

    /// Registers `factory` for opaque values holding a `T`.
    ///
    /// Values are created with [`SqlValue::custom`].
    pub fn register<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Any + Send + Sync,
        F: Fn(Arc<T>) -> Box<dyn Esc> + Send + Sync + 'static,
    {
        self.register_kind(ValueKind::of::<T>(), move |value| {
            let inner = match &value {
                SqlValue::Custom(opaque) => opaque.downcast::<T>(),
                _ => None,
            };
            inner.map_or_else(|| scalar_esc(value), &factory)
        })
    }

    /// Merges the entries of `other` into this registry. Entries of `other`
    /// win.
    pub fn extend(&mut self, other: Self) -> &mut Self {
        self.factories.extend(other.factories);
        self
    }

    /// Returns `true` if `kind` has a registered wrapper.
    #[must_use]
    pub fn contains(&self, kind: ValueKind) -> bool {
        self.factories.contains_key(&kind)
    }

    /// Wraps `value` in the wrapper registered for its kind.
    #[must_use]
    pub fn esc<T: ToSqlValue>(&self, value: T) -> Box<dyn Esc> {
        let value = value.to_sql_value();
        let kind = value.kind();
        let factory = self.factories.get(&kind).cloned().unwrap_or_else(|| {
            trace!(?kind, "No wrapper registered, using ScalarEsc");
            Arc::new(scalar_esc) as EscFactory
        });
        factory(value)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register_kind(ValueKind::List, list_esc)
            .register_kind(ValueKind::Map, dict_esc);
        registry
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("kinds", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn scalar_esc(value: SqlValue) -> Box<dyn Esc> {
    Box::new(ScalarEsc::new(value))
}

fn list_esc(value: SqlValue) -> Box<dyn Esc> {
    match value {
        SqlValue::List(items) => Box::new(ListEsc::from(items)),
        other => scalar_esc(other),
    }
}

fn dict_esc(value: SqlValue) -> Box<dyn Esc> {
    match value {
        SqlValue::Map(entries) => Box::new(DictEsc::from(entries)),
        other => scalar_esc(other),
    }
}
