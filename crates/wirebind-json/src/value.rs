//! The dynamic in-memory value representation.
//!
//! A [`Value`] is what codecs decode into and encode from. Struct values are
//! objects keyed by *logical* field name; union values are tagged variants;
//! enumeration values are ordinals. The wire-name translation is entirely
//! the codec's concern.

use indexmap::IndexMap;
use serde_json::Number;

/// A runtime value of some schema-described type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    /// Struct values (keyed by logical field name) and string-map values
    Object(IndexMap<String, Value>),
    /// A union value: the selected variant's logical name plus its payload.
    /// Void variants carry no payload.
    Variant {
        tag: String,
        value: Option<Box<Value>>,
    },
    /// An opaque JSON value, passed through unexamined
    Json(serde_json::Value),
}

impl Value {
    /// A union value with a payload
    pub fn variant(tag: impl Into<String>, value: Value) -> Self {
        Value::Variant {
            tag: tag.into(),
            value: Some(Box::new(value)),
        }
    }

    /// A payload-less (void) union value
    pub fn unit_variant(tag: impl Into<String>) -> Self {
        Value::Variant {
            tag: tag.into(),
            value: None,
        }
    }

    /// An object value from (key, value) pairs, preserving order
    pub fn object<K: Into<String>, I: IntoIterator<Item = (K, Value)>>(entries: I) -> Self {
        Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(entries) => Some(entries),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
