//! Conversion between JSON documents and interpolation arguments.

use anyhow::bail;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use sql_interp::{Arg, SqlValue};

/// Key of the single-entry object that binds its value explicitly.
pub const ESC_KEY: &str = "$esc";

/// The rendered statement as printed on stdout.
#[derive(Debug, Serialize)]
pub struct Output {
    pub sql: String,
    pub bind: Vec<Value>,
}

impl Output {
    pub fn new(sql: String, bind: &[SqlValue]) -> Self {
        Self {
            sql,
            bind: bind.iter().map(value_to_json).collect(),
        }
    }
}

/// Parses a JSON array of arguments.
pub fn args_from_str(input: &str) -> anyhow::Result<Vec<Arg>> {
    let document: Value = serde_json::from_str(input)?;
    args_from_json(document)
}

pub fn args_from_json(document: Value) -> anyhow::Result<Vec<Arg>> {
    match document {
        Value::Array(items) => Ok(items.into_iter().map(arg_from_json).collect()),
        other => bail!(
            "Expected a JSON array of arguments, got {}",
            json_type(&other)
        ),
    }
}

/// Strings are SQL text, `{"$esc": v}` is an explicitly wrapped value, and
/// anything else is a value for the registry to wrap.
pub fn arg_from_json(value: Value) -> Arg {
    match value {
        Value::String(sql) => Arg::Sql(sql),
        Value::Object(mut map) if map.len() == 1 && map.contains_key(ESC_KEY) => {
            let inner = map.remove(ESC_KEY).unwrap_or(Value::Null);
            Arg::from(sql_interp::esc(value_from_json(inner)))
        }
        other => Arg::Value(value_from_json(other)),
    }
}

pub fn value_from_json(value: Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Bool(b),
        Value::Number(n) => n
            .as_i64()
            .map_or_else(|| SqlValue::Float(n.as_f64().unwrap_or(f64::NAN)), SqlValue::Int),
        Value::String(s) => SqlValue::Text(s),
        Value::Array(items) => SqlValue::List(items.into_iter().map(value_from_json).collect()),
        Value::Object(map) => SqlValue::Map(
            map.into_iter()
                .map(|(k, v)| (k, value_from_json(v)))
                .collect(),
        ),
    }
}

/// Non-finite floats become `null`; opaque values become their type name.
pub fn value_to_json(value: &SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Bool(b) => Value::Bool(*b),
        SqlValue::Int(i) => Value::Number(Number::from(*i)),
        SqlValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        SqlValue::Text(s) => Value::String(s.clone()),
        SqlValue::Blob(bytes) => {
            Value::Array(bytes.iter().map(|b| Value::Number(Number::from(*b))).collect())
        }
        SqlValue::List(items) => Value::Array(items.iter().map(value_to_json).collect()),
        SqlValue::Map(entries) => Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect::<Map<_, _>>(),
        ),
        SqlValue::Custom(opaque) => Value::String(opaque.type_name().to_owned()),
    }
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
