//! Wrappers that know how to render a value in each SQL context.
//!
//! An [`Esc`] is a value adorned with one rendering rule per [`Context`]. The
//! bundled wrappers cover scalars, sequences and string-keyed mappings. To
//! interpolate your own types, implement [`Esc`] and register it with a
//! [`TypeRegistry`](crate::TypeRegistry).
//!
//! # Example
//!
//! ```
//! use sql_interp::{Esc, ListEsc};
//!
//! let esc = ListEsc::new(vec![1, 2, 3]);
//! let (sql, bind) = esc.to_sql("SELECT * FROM t WHERE id IN").unwrap();
//!
//! assert_eq!(sql, "(?, ?, ?)");
//! assert_eq!(bind.len(), 3);
//! ```

mod dict;
mod list;
mod scalar;

use std::fmt;

use tracing::debug;

use crate::context::Context;
use crate::error::{InterpError, Result};
use crate::value::SqlValue;

pub use dict::DictEsc;
pub use list::ListEsc;
pub use scalar::ScalarEsc;

/// A rendered SQL snippet and its bind values, in placeholder order.
pub type Fragment = (String, Vec<SqlValue>);

/// A value that can render itself into a SQL snippet plus bind values.
///
/// Every method returns a snippet and the bind values for the `?`
/// placeholders it contains, in order. Only [`Esc::default_ctxt`] is
/// required; the other contexts fail with
/// [`InterpError::UnknownContext`] unless overridden.
pub trait Esc: fmt::Debug {
    /// Name used in errors and logs.
    fn name(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Handles `IN` / `NOT IN`.
    ///
    /// # Errors
    ///
    /// Returns [`InterpError::UnknownContext`] unless implemented.
    fn in_ctxt(&self) -> Result<Fragment> {
        Err(InterpError::unknown_context(self.name(), Context::In))
    }

    /// Handles `SET` / `ON DUPLICATE KEY UPDATE`.
    ///
    /// # Errors
    ///
    /// Returns [`InterpError::UnknownContext`] unless implemented.
    fn set_update_ctxt(&self) -> Result<Fragment> {
        Err(InterpError::unknown_context(self.name(), Context::SetUpdate))
    }

    /// Handles `INSERT INTO <table>`.
    ///
    /// # Errors
    ///
    /// Returns [`InterpError::UnknownContext`] unless implemented.
    fn insert_into_ctxt(&self) -> Result<Fragment> {
        Err(InterpError::unknown_context(self.name(), Context::InsertInto))
    }

    /// Handles `FROM` / `JOIN`.
    ///
    /// # Errors
    ///
    /// Returns [`InterpError::UnknownContext`] unless implemented.
    fn from_join_ctxt(&self) -> Result<Fragment> {
        Err(InterpError::unknown_context(self.name(), Context::FromJoin))
    }

    /// Handles every position no other context claims.
    ///
    /// # Errors
    ///
    /// Implementations may return [`InterpError::UnknownContext`].
    fn default_ctxt(&self) -> Result<Fragment>;

    /// Renders in an already classified context.
    ///
    /// # Errors
    ///
    /// Propagates the error of the context method.
    fn render(&self, context: Context) -> Result<Fragment> {
        match context {
            Context::In => self.in_ctxt(),
            Context::SetUpdate => self.set_update_ctxt(),
            Context::InsertInto => self.insert_into_ctxt(),
            Context::FromJoin => self.from_join_ctxt(),
            Context::Default => self.default_ctxt(),
        }
    }

    /// Renders the value for insertion right after `sql`.
    ///
    /// # Errors
    ///
    /// Returns [`InterpError::UnknownContext`] if this wrapper has no rule
    /// for the context `sql` ends in.
    fn to_sql(&self, sql: &str) -> Result<Fragment> {
        let context = Context::classify(sql);
        let (snippet, bind) = self.render(context)?;
        debug!(
            esc = self.name(),
            context = %context,
            sql = %snippet,
            binds = bind.len(),
            "Interpolated value"
        );
        Ok((snippet, bind))
    }
}

/// `module::path::Name<Args>` -> `Name`
fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
