//! Values of a materialized JSON document.
//!
//! This module provides [`Value`], the counterpart of `serde_json::Value` in which every
//! JSON object has been rebuilt as a shared [`JsonMap`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;

use super::{JsonMap, materialize_value};

/// A JSON value whose objects are concurrent maps.
///
/// # Value Types
///
/// ## Scalars
/// - [`Value::Null`], [`Value::Bool`], [`Value::Number`], [`Value::String`] - copied
///   unchanged from the decoded document
///
/// ## Sequences
/// - [`Value::Array`] - an array of arbitrary values, each materialized in turn
/// - [`Value::Objects`] - a non-empty array whose elements are all objects; its
///   elements are maps directly rather than `Value`s
///
/// ## Objects
/// - [`Value::Object`] - a nested [`JsonMap`] with its own lock
///
/// Maps are held by `Arc`. Cloning a `Value`, or reading one out of a map, hands back
/// the same nested maps rather than copies of them.
///
/// ```
/// # use concurrent_map::{JsonMap, Value};
/// let map = JsonMap::from_json(br#"{"user": {"name": "ada"}, "tags": ["x", "y"]}"#).unwrap();
///
/// let user = map.get("user").unwrap();
/// let user = user.as_object().unwrap();
/// assert!(user.get("name").unwrap() == "ada");
///
/// assert_eq!(map.get("tags").unwrap().as_array().map(<[Value]>::len), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Objects(Vec<Arc<JsonMap>>),
    Object(Arc<JsonMap>),
}

impl Value {
    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Objects(_) => "objects",
            Value::Object(_) => "object",
        }
    }

    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this is an array in either representation
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Objects(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Attempts to read the value as a signed integer
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    /// Attempts to read the value as a float
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(Number::as_f64)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements of a general array
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the maps of an array made only of objects
    pub fn as_objects(&self) -> Option<&[Arc<JsonMap>]> {
        match self {
            Value::Objects(maps) => Some(maps),
            _ => None,
        }
    }

    /// Returns the nested map of an object
    pub fn as_object(&self) -> Option<&Arc<JsonMap>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the number of elements of an array in either representation
    pub fn array_len(&self) -> Option<usize> {
        match self {
            Value::Array(values) => Some(values.len()),
            Value::Objects(maps) => Some(maps.len()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// Writes the value as compact JSON text
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::Value::from(self))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(values)
    }
}

impl From<JsonMap> for Value {
    fn from(map: JsonMap) -> Self {
        Value::Object(Arc::new(map))
    }
}

impl From<Arc<JsonMap>> for Value {
    fn from(map: Arc<JsonMap>) -> Self {
        Value::Object(map)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        materialize_value(value)
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(values) => {
                serde_json::Value::Array(values.iter().map(serde_json::Value::from).collect())
            }
            Value::Objects(maps) => serde_json::Value::Array(
                maps.iter()
                    .map(|map| serde_json::Value::from(map.as_ref()))
                    .collect(),
            ),
            Value::Object(map) => serde_json::Value::from(map.as_ref()),
        }
    }
}

impl From<&JsonMap> for serde_json::Value {
    /// Converts a snapshot of the map back into a plain JSON object.
    fn from(map: &JsonMap) -> Self {
        serde_json::Value::Object(
            map.items()
                .into_iter()
                .map(|(key, value)| (key, serde_json::Value::from(&value)))
                .collect(),
        )
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(values) => serializer.collect_seq(values),
            Value::Objects(maps) => serializer.collect_seq(maps.iter().map(Arc::as_ref)),
            Value::Object(map) => map.as_ref().serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(materialize_value)
    }
}

// Direct comparisons with primitives

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.as_i64() == Some(*other)
    }
}
