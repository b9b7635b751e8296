//! Wrapper for ordered sequences.

use super::{Esc, Fragment};
use crate::error::Result;
use crate::value::{SqlValue, ToSqlValue};

/// Wraps an ordered sequence of values.
///
/// | Context       | Rendering              |
/// |---------------|------------------------|
/// | `IN`          | `(?, ?, ...)`          |
/// | `INSERT INTO` | `VALUES (?, ?, ...)`   |
/// | default       | `(?, ?, ...)`          |
///
/// The bind values are the items, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEsc {
    items: Vec<SqlValue>,
}

impl ListEsc {
    /// Wraps the items of `items`.
    #[must_use]
    pub fn new<T: ToSqlValue>(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().map(ToSqlValue::to_sql_value).collect(),
        }
    }

    /// The wrapped items.
    #[must_use]
    pub fn items(&self) -> &[SqlValue] {
        &self.items
    }

    /// Returns `count` comma-separated placeholders in parentheses.
    #[must_use]
    pub fn placeholders(count: usize) -> String {
        format!("({})", vec![SqlValue::placeholder(); count].join(", "))
    }
}

impl From<Vec<SqlValue>> for ListEsc {
    fn from(items: Vec<SqlValue>) -> Self {
        Self { items }
    }
}

impl Esc for ListEsc {
    fn name(&self) -> &'static str {
        "ListEsc"
    }

    fn in_ctxt(&self) -> Result<Fragment> {
        self.default_ctxt()
    }

    fn insert_into_ctxt(&self) -> Result<Fragment> {
        let sql = format!("VALUES {}", Self::placeholders(self.items.len()));
        Ok((sql, self.items.clone()))
    }

    fn default_ctxt(&self) -> Result<Fragment> {
        Ok((Self::placeholders(self.items.len()), self.items.clone()))
    }
}
