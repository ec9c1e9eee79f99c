//! Core data model types.
//!
//! Every algorithm in this crate works on [`Value`], a schema-less, JSON-like value. Records come
//! in two shapes that are accepted interchangeably:
//!
//! - mapping-like: [`Value::Map`], an insertion-ordered [`Record`]
//! - object-like: [`Value::Object`], a [`Record`] of fields tagged with a class name
//!
//! [`Value::fields`] is the single place where the two shapes are unified.

use std::fmt;

use indexmap::IndexMap;

use crate::error::{ReshapeError, ReshapeResult};

/// A schema-less record: field name to value, in insertion order.
pub type Record = IndexMap<String, Value>;

/// An object-like record: named fields plus the name of the type they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    /// Type name of the source object (informational only).
    pub class: String,
    /// Object fields in declaration order.
    pub fields: Record,
}

impl Object {
    /// Create a new object.
    pub fn new(class: impl Into<String>, fields: Record) -> Self {
        Self {
            class: class.into(),
            fields,
        }
    }
}

/// A single dynamically typed value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Missing/empty value.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int64(i64),
    /// Unsigned integer beyond the range of [`Value::Int64`].
    UInt64(u64),
    /// 64-bit float.
    Float64(f64),
    /// UTF-8 string.
    Utf8(String),
    /// Ordered sequence of values.
    List(Vec<Value>),
    /// Mapping-like record.
    Map(Record),
    /// Object-like record.
    Object(Object),
}

impl Value {
    /// An empty mapping (`{}`).
    pub fn empty_map() -> Self {
        Value::Map(Record::new())
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Fields of a record, regardless of whether it is mapping-like or object-like.
    ///
    /// Returns `None` for scalars and lists.
    pub fn fields(&self) -> Option<&Record> {
        match self {
            Value::Map(record) => Some(record),
            Value::Object(object) => Some(&object.fields),
            _ => None,
        }
    }

    /// Look up a field on a record. `Null` fields are reported as absent.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields()?.get(name).filter(|v| !v.is_null())
    }

    /// Derive a bucket key from this value.
    ///
    /// Strings are used as-is, numbers and booleans through their `Display` form. `Null` and
    /// composite values (lists, maps, objects) have no key.
    pub fn as_key(&self) -> Option<String> {
        match self {
            Value::Utf8(s) => Some(s.clone()),
            Value::Int64(v) => Some(v.to_string()),
            Value::UInt64(v) => Some(v.to_string()),
            Value::Float64(v) => Some(v.to_string()),
            Value::Bool(v) => Some(v.to_string()),
            Value::Null | Value::List(_) | Value::Map(_) | Value::Object(_) => None,
        }
    }

    /// Shallow object-to-mapping conversion. Non-object values are returned unchanged.
    pub fn into_mapping(self) -> Self {
        match self {
            Value::Object(object) => Value::Map(object.fields),
            other => other,
        }
    }

    /// Build a mapping-like record from `(name, value)` pairs.
    pub fn record<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(Value::UInt64(v), Value::Int64)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int64(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Utf8(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Utf8(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Map(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Value::Object(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int64(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt64(u)
                } else {
                    Value::Float64(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Utf8(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int64(i) => serde_json::Value::from(i),
            Value::UInt64(u) => serde_json::Value::from(u),
            Value::Float64(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Utf8(s) => serde_json::Value::String(s),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Map(fields) | Value::Object(Object { fields, .. }) => serde_json::Value::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// An ordered, non-empty list of key names.
///
/// Used by the reshape engine to compute nested bucket keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// Create a key path from one or more key names.
    ///
    /// Returns [`ReshapeError::EmptyKeyPath`] if `keys` is empty.
    pub fn new<I, S>(keys: I) -> ReshapeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        if keys.is_empty() {
            return Err(ReshapeError::EmptyKeyPath);
        }
        Ok(Self(keys))
    }

    /// Key names in order.
    pub fn keys(&self) -> &[String] {
        &self.0
    }

    /// Number of keys, which is also the depth of a reshaped result.
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl From<&str> for KeyPath {
    fn from(key: &str) -> Self {
        Self(vec![key.to_string()])
    }
}

impl From<String> for KeyPath {
    fn from(key: String) -> Self {
        Self(vec![key])
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}
