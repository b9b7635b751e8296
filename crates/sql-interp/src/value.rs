//! Bind values and the conversions that produce them.
//!
//! Every value handed to the interpolator ends up as a [`SqlValue`]. Scalars
//! are bound as-is; sequences and string-keyed mappings keep their structure
//! so that the wrapper chosen for them can decide how many placeholders to
//! emit.

use std::any::{Any, TypeId};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use std::sync::Arc;

/// A value that can be interpolated into SQL or passed as a bind parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
    /// Ordered sequence of values (vectors, slices, arrays and tuples).
    List(Vec<SqlValue>),
    /// String-keyed mapping. Keys iterate in lexicographic order.
    Map(BTreeMap<String, SqlValue>),
    /// A caller-owned value of an arbitrary type, bound unchanged.
    Custom(Opaque),
}

impl SqlValue {
    /// Returns the parameter placeholder.
    #[must_use]
    pub const fn placeholder() -> &'static str {
        "?"
    }

    /// Wraps an arbitrary value so it can travel through the interpolator.
    ///
    /// Register a wrapper for `T` with [`TypeRegistry::register`] to control
    /// how it renders; otherwise it is bound as a single opaque parameter.
    ///
    /// [`TypeRegistry::register`]: crate::TypeRegistry::register
    #[must_use]
    pub fn custom<T: Any + Send + Sync>(value: T) -> Self {
        Self::Custom(Opaque::new(value))
    }

    /// Creates a blob value.
    ///
    /// Byte vectors and slices convert to [`SqlValue::List`] through
    /// [`ToSqlValue`] like any other sequence, so binary data has to be
    /// wrapped here to bind as a single parameter.
    ///
    /// ```
    /// use sql_interp::{ToSqlValue, ValueKind, SqlValue};
    ///
    /// assert_eq!(SqlValue::blob(vec![0_u8, 1]).kind(), ValueKind::Blob);
    /// assert_eq!(vec![0_u8, 1].to_sql_value().kind(), ValueKind::List);
    /// ```
    #[must_use]
    pub fn blob(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Blob(bytes.into())
    }

    /// Returns the kind used to look up a wrapper for this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::Blob(_) => ValueKind::Blob,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
            Self::Custom(opaque) => ValueKind::Custom(opaque.type_id()),
        }
    }

    /// Iterates the value, if it is iterable.
    ///
    /// Lists yield their items and maps yield their keys as text. Text,
    /// blobs and everything else are not iterable.
    #[must_use]
    pub fn try_iter(&self) -> Option<Vec<Self>> {
        match self {
            Self::List(items) => Some(items.clone()),
            Self::Map(entries) => Some(entries.keys().cloned().map(Self::Text).collect()),
            _ => None,
        }
    }
}

/// The tag a [`TypeRegistry`](crate::TypeRegistry) dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`SqlValue::Null`].
    Null,
    /// [`SqlValue::Bool`].
    Bool,
    /// [`SqlValue::Int`].
    Int,
    /// [`SqlValue::Float`].
    Float,
    /// [`SqlValue::Text`].
    Text,
    /// [`SqlValue::Blob`].
    Blob,
    /// [`SqlValue::List`], including converted tuples and arrays.
    List,
    /// [`SqlValue::Map`].
    Map,
    /// An [`Opaque`] value of the given concrete type.
    Custom(TypeId),
}

impl ValueKind {
    /// The kind of opaque values holding a `T`.
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self::Custom(TypeId::of::<T>())
    }
}

/// A type-erased, cheaply clonable value.
#[derive(Clone)]
pub struct Opaque {
    type_id: TypeId,
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

impl Opaque {
    /// Wraps `value`.
    #[must_use]
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wraps an already shared value.
    #[must_use]
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            value,
        }
    }

    /// The `TypeId` of the wrapped value.
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The type name of the wrapped value.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrows the wrapped value if it is a `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Returns a shared handle to the wrapped value if it is a `T`.
    #[must_use]
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.value).downcast::<T>().ok()
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Opaque")
            .field("type", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for Opaque {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Custom(self)
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

macro_rules! impl_int {
    ($($ty:ty),*) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(self) -> SqlValue {
                    SqlValue::Int(i64::from(self))
                }
            }
        )*
    };
}

impl_int!(i64, i32, i16, i8, u32, u16, u8);

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for f32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(f64::from(self))
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

impl<T: ToSqlValue> ToSqlValue for Vec<T> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::List(self.into_iter().map(ToSqlValue::to_sql_value).collect())
    }
}

impl<T: ToSqlValue, const N: usize> ToSqlValue for [T; N] {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::List(self.into_iter().map(ToSqlValue::to_sql_value).collect())
    }
}

impl<T: ToSqlValue + Clone> ToSqlValue for &[T] {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::List(self.iter().cloned().map(ToSqlValue::to_sql_value).collect())
    }
}

macro_rules! impl_tuple {
    ($($name:ident),+) => {
        impl<$($name: ToSqlValue),+> ToSqlValue for ($($name,)+) {
            #[allow(non_snake_case)]
            fn to_sql_value(self) -> SqlValue {
                let ($($name,)+) = self;
                SqlValue::List(vec![$($name.to_sql_value()),+])
            }
        }
    };
}

impl_tuple!(A);
impl_tuple!(A, B);
impl_tuple!(A, B, C);
impl_tuple!(A, B, C, D);
impl_tuple!(A, B, C, D, E);
impl_tuple!(A, B, C, D, E, F);

impl<K, V, S> ToSqlValue for HashMap<K, V, S>
where
    K: Into<String>,
    V: ToSqlValue,
    S: BuildHasher,
{
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Map(
            self.into_iter()
                .map(|(k, v)| (k.into(), v.to_sql_value()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: ToSqlValue> ToSqlValue for BTreeMap<K, V> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Map(
            self.into_iter()
                .map(|(k, v)| (k.into(), v.to_sql_value()))
                .collect(),
        )
    }
}
