//! Wrapper for string-keyed mappings.

use std::collections::BTreeMap;

use super::{Esc, Fragment, ListEsc};
use crate::error::Result;
use crate::value::{SqlValue, ToSqlValue};

/// Wraps a mapping of column names to values.
///
/// Keys are always rendered in lexicographic order, and bind values follow
/// the same order.
///
/// | Context       | Rendering                                  |
/// |---------------|--------------------------------------------|
/// | `SET`         | `a = ?, b = ?`                             |
/// | `INSERT INTO` | `(a, b) VALUES (?, ?)`                     |
/// | default       | `a = ? AND b IS NULL AND c IN (?, ?)`      |
///
/// In the default context a [`SqlValue::Null`] renders as `IS NULL` without
/// a bind value, and a [`SqlValue::List`] renders as `IN (...)` binding each
/// item.
#[derive(Debug, Clone, PartialEq)]
pub struct DictEsc {
    entries: BTreeMap<String, SqlValue>,
}

impl DictEsc {
    /// Wraps the given key/value pairs.
    #[must_use]
    pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: ToSqlValue,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_sql_value()))
                .collect(),
        }
    }

    /// The wrapped entries, in key order.
    #[must_use]
    pub const fn entries(&self) -> &BTreeMap<String, SqlValue> {
        &self.entries
    }

    fn keys(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    fn values(&self) -> Vec<SqlValue> {
        self.entries.values().cloned().collect()
    }
}

impl From<BTreeMap<String, SqlValue>> for DictEsc {
    fn from(entries: BTreeMap<String, SqlValue>) -> Self {
        Self { entries }
    }
}

impl Esc for DictEsc {
    fn name(&self) -> &'static str {
        "DictEsc"
    }

    fn set_update_ctxt(&self) -> Result<Fragment> {
        let sql = self
            .entries
            .keys()
            .map(|key| format!("{key} = {}", SqlValue::placeholder()))
            .collect::<Vec<_>>()
            .join(", ");
        Ok((sql, self.values()))
    }

    fn insert_into_ctxt(&self) -> Result<Fragment> {
        let sql = format!(
            "({}) VALUES {}",
            self.keys().join(", "),
            ListEsc::placeholders(self.entries.len())
        );
        Ok((sql, self.values()))
    }

    fn default_ctxt(&self) -> Result<Fragment> {
        let mut clauses = Vec::with_capacity(self.entries.len());
        let mut bind = Vec::new();

        for (key, value) in &self.entries {
            match value {
                SqlValue::Null => clauses.push(format!("{key} IS NULL")),
                SqlValue::List(items) => {
                    let (in_sql, in_bind) = ListEsc::from(items.clone()).default_ctxt()?;
                    clauses.push(format!("{key} IN {in_sql}"));
                    bind.extend(in_bind);
                }
                other => {
                    clauses.push(format!("{key} = {}", SqlValue::placeholder()));
                    bind.push(other.clone());
                }
            }
        }

        Ok((clauses.join(" AND "), bind))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::context::Context;
    use crate::error::InterpError;

    fn dict_esc() -> DictEsc {
        let mut map = HashMap::new();
        map.insert("one", 1_i32);
        map.insert("two", 2);
        map.insert("three", 3);
        DictEsc::new(map)
    }

    fn ints(values: &[i64]) -> Vec<SqlValue> {
        values.iter().copied().map(SqlValue::Int).collect()
    }

    #[test]
    fn test_entries_are_sorted() {
        let binding = dict_esc();
        let keys: Vec<&str> = binding.entries().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["one", "three", "two"]);
        assert_eq!(dict_esc().entries().get("two"), Some(&SqlValue::Int(2)));
    }

    #[test]
    fn test_in_ctxt() {
        assert_eq!(
            dict_esc().in_ctxt().unwrap_err(),
            InterpError::unknown_context("DictEsc", Context::In)
        );
    }

    #[test]
    fn test_set_update_ctxt() {
        let (sql, bind) = dict_esc().set_update_ctxt().unwrap();
        assert_eq!(sql, "one = ?, three = ?, two = ?");
        assert_eq!(bind, ints(&[1, 3, 2]));
    }

    #[test]
    fn test_insert_into_ctxt() {
        let (sql, bind) = dict_esc().insert_into_ctxt().unwrap();
        assert_eq!(sql, "(one, three, two) VALUES (?, ?, ?)");
        assert_eq!(bind, ints(&[1, 3, 2]));
    }

    #[test]
    fn test_from_join_ctxt() {
        assert_eq!(
            dict_esc().from_join_ctxt().unwrap_err(),
            InterpError::unknown_context("DictEsc", Context::FromJoin)
        );
    }

    #[test]
    fn test_default_ctxt() {
        let (sql, bind) = dict_esc().default_ctxt().unwrap();
        assert_eq!(sql, "one = ? AND three = ? AND two = ?");
        assert_eq!(bind, ints(&[1, 3, 2]));
    }

    #[test]
    fn test_default_ctxt_null_and_list() {
        let esc = DictEsc::new([
            ("status", SqlValue::Null),
            ("id", vec![4_i32, 5].to_sql_value()),
            ("age", SqlValue::Int(30)),
        ]);
        let (sql, bind) = esc.default_ctxt().unwrap();
        assert_eq!(sql, "age = ? AND id IN (?, ?) AND status IS NULL");
        assert_eq!(bind, ints(&[30, 4, 5]));
    }

    #[test]
    fn test_null_is_bound_outside_default_ctxt() {
        let esc = DictEsc::new([("deleted_at", SqlValue::Null)]);
        let (sql, bind) = esc.set_update_ctxt().unwrap();
        assert_eq!(sql, "deleted_at = ?");
        assert_eq!(bind, vec![SqlValue::Null]);
    }

    #[test]
    fn test_empty_dict() {
        let esc = DictEsc::new(Vec::<(String, i32)>::new());
        assert_eq!(esc.set_update_ctxt().unwrap(), (String::new(), vec![]));
        assert_eq!(esc.default_ctxt().unwrap(), (String::new(), vec![]));
        assert_eq!(
            esc.insert_into_ctxt().unwrap(),
            (String::from("() VALUES ()"), vec![])
        );
    }
}
