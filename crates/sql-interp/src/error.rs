//! Error types for interpolation.

use thiserror::Error;

use crate::context::Context;

/// Interpolation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpError {
    /// A wrapper does not know how to render itself in the classified context.
    ///
    /// Restructure the SQL around the value, or register a wrapper that
    /// supports the context.
    #[error("{context} context not implemented for {esc}")]
    UnknownContext {
        /// Name of the wrapper that was asked to render.
        esc: &'static str,
        /// The context that was classified from the preceding SQL.
        context: Context,
    },
}

impl InterpError {
    /// Create an unknown context error.
    #[must_use]
    pub const fn unknown_context(esc: &'static str, context: Context) -> Self {
        Self::UnknownContext { esc, context }
    }
}

/// Result type alias for interpolation.
pub type Result<T> = std::result::Result<T, InterpError>;
