//! Fallback wrapper for values without a dedicated wrapper.

use tracing::trace;

use super::{Esc, Fragment};
use crate::error::Result;
use crate::value::{SqlValue, ToSqlValue};

/// Wraps a single value. Only the default context is supported.
///
/// In the default context the value renders as one `?`. If the value is
/// iterable (see [`SqlValue::try_iter`]) its items become the bind values;
/// otherwise the value itself is bound.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarEsc {
    value: SqlValue,
}

impl ScalarEsc {
    /// Wraps `value`.
    #[must_use]
    pub fn new<T: ToSqlValue>(value: T) -> Self {
        Self {
            value: value.to_sql_value(),
        }
    }

    /// The wrapped value.
    #[must_use]
    pub const fn value(&self) -> &SqlValue {
        &self.value
    }
}

impl Esc for ScalarEsc {
    fn name(&self) -> &'static str {
        "ScalarEsc"
    }

    fn default_ctxt(&self) -> Result<Fragment> {
        let bind = self.value.try_iter().unwrap_or_else(|| {
            trace!(kind = ?self.value.kind(), "Value is not iterable, binding it whole");
            vec![self.value.clone()]
        });
        Ok((String::from(SqlValue::placeholder()), bind))
    }
}
