//! Classification of the point in a SQL statement where a value is inserted.
//!
//! The context is decided purely from the trailing text of the SQL written so
//! far. The patterns overlap, so they are always tried in the same order and
//! the first match wins.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static NOT_IN: LazyLock<Regex> = LazyLock::new(|| compile(r"\b(?:NOT\s+)?IN\s*$"));

static SET_UPDATE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(?:ON\s+DUPLICATE\s+KEY\s+UPDATE|SET)\s*$"));

static INSERT_INTO: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\bINSERT[\w\s]*\sINTO\s*[a-zA-Z_][a-zA-Z0-9_$.]*\s*$"));

static FROM_JOIN: LazyLock<Regex> = LazyLock::new(|| compile(r"(?:\bFROM|JOIN)\s*$"));

fn compile(pattern: &str) -> Regex {
    Regex::new(&format!("(?si){pattern}")).expect("Invalid context regex")
}

/// Where in a statement a value is being inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    /// After `IN` or `NOT IN`.
    In,
    /// After `SET` or `ON DUPLICATE KEY UPDATE`.
    SetUpdate,
    /// After `INSERT ... INTO <table>`.
    InsertInto,
    /// After `FROM` or `JOIN`.
    FromJoin,
    /// Anywhere else.
    Default,
}

impl Context {
    /// Classifies the insertion point that follows `sql`.
    ///
    /// # Example
    ///
    /// ```
    /// use sql_interp::Context;
    ///
    /// assert_eq!(Context::classify("SELECT * FROM t WHERE id NOT IN"), Context::In);
    /// assert_eq!(Context::classify("UPDATE t SET"), Context::SetUpdate);
    /// assert_eq!(Context::classify("INSERT INTO t"), Context::InsertInto);
    /// assert_eq!(Context::classify("SELECT * FROM t WHERE x ="), Context::Default);
    /// ```
    #[must_use]
    pub fn classify(sql: &str) -> Self {
        if NOT_IN.is_match(sql) {
            Self::In
        } else if SET_UPDATE.is_match(sql) {
            Self::SetUpdate
        } else if INSERT_INTO.is_match(sql) {
            Self::InsertInto
        } else if FROM_JOIN.is_match(sql) {
            Self::FromJoin
        } else {
            Self::Default
        }
    }

    /// Returns the human-readable name of this context.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::SetUpdate => "SET/UPDATE",
            Self::InsertInto => "INSERT INTO",
            Self::FromJoin => "FROM/JOIN",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
