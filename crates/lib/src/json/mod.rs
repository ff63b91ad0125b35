//! Recursive materialization of JSON documents into concurrent maps.
//!
//! A decoded JSON document is rebuilt so that every object, at any depth, becomes a
//! [`JsonMap`]. Arrays and scalars stay ordinary values:
//!
//! - object → [`Value::Object`], materialized key by key
//! - non-empty array of objects only → [`Value::Objects`], one map per element
//! - any other array → [`Value::Array`], each element materialized in turn
//! - null, booleans, numbers and strings → unchanged
//!
//! [`JsonMap::merge_json`] decodes a payload and merges the result into an existing map.

mod errors;
mod value;

pub use errors::JsonError;
pub use value::Value;

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Map;
use tracing::debug;

use crate::map::ConcurrentMap;
use crate::Result;

/// A concurrent map holding a materialized JSON object.
pub type JsonMap = ConcurrentMap<String, Value>;

/// Materializes a decoded JSON object into a fresh [`JsonMap`].
///
/// Every value is materialized with [`materialize_value`]. The new map is sized to
/// the number of entries in `object`.
pub fn materialize_object(object: Map<String, serde_json::Value>) -> JsonMap {
    let map = JsonMap::with_capacity(object.len());
    for (key, value) in object {
        map.set(key, materialize_value(value));
    }
    map
}

/// Materializes a single decoded JSON value.
///
/// Objects become maps wherever they appear, including inside arrays and arrays of
/// arrays. An array takes the [`Value::Objects`] form only when it is non-empty and
/// every element is an object; an empty array is a plain [`Value::Array`].
pub fn materialize_value(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Object(object) => Value::Object(Arc::new(materialize_object(object))),
        serde_json::Value::Array(elements) => match into_objects(elements) {
            Ok(objects) => Value::Objects(
                objects
                    .into_iter()
                    .map(|object| Arc::new(materialize_object(object)))
                    .collect(),
            ),
            Err(elements) => Value::Array(elements.into_iter().map(materialize_value).collect()),
        },
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => Value::Number(n),
        serde_json::Value::String(s) => Value::String(s),
    }
}

/// Unwraps the elements of an array made only of objects, or hands the array back.
fn into_objects(
    elements: Vec<serde_json::Value>,
) -> std::result::Result<Vec<Map<String, serde_json::Value>>, Vec<serde_json::Value>> {
    if elements.is_empty() || !elements.iter().all(serde_json::Value::is_object) {
        return Err(elements);
    }
    Ok(elements
        .into_iter()
        .filter_map(|element| match element {
            serde_json::Value::Object(object) => Some(object),
            _ => None,
        })
        .collect())
}

/// Returns the name of a decoded value's JSON type.
fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl JsonMap {
    /// Decodes `data` as a JSON object and merges it into this map.
    ///
    /// Objects are materialized recursively. The result is then stored key by key with
    /// [`set`](ConcurrentMap::set), so existing keys are overwritten and all other keys
    /// are kept. Readers running during the merge may see some of the new keys but not
    /// others; all of them are present once this returns.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::Decode`] if `data` is not valid JSON or its top-level value
    /// is not an object. The map is not modified in that case.
    pub fn merge_json(&self, data: &[u8]) -> Result<()> {
        let object: Map<String, serde_json::Value> = serde_json::from_slice(data)
            .inspect_err(|error| debug!(%error, "Rejected JSON payload"))?;
        self.merge_object(object);
        Ok(())
    }

    /// Same as [`merge_json`](Self::merge_json), for text input.
    pub fn merge_json_str(&self, data: &str) -> Result<()> {
        self.merge_json(data.as_bytes())
    }

    /// Merges an already-decoded JSON object into this map.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::NotAnObject`] if `value` is not an object, leaving the map
    /// untouched.
    pub fn merge_json_value(&self, value: serde_json::Value) -> Result<()> {
        match value {
            serde_json::Value::Object(object) => {
                self.merge_object(object);
                Ok(())
            }
            other => Err(JsonError::NotAnObject {
                found: json_type_name(&other),
            }
            .into()),
        }
    }

    fn merge_object(&self, object: Map<String, serde_json::Value>) {
        let materialized = materialize_object(object).into_inner();
        let entries = materialized.len();
        for (key, value) in materialized {
            self.set(key, value);
        }
        debug!(entries, "Merged JSON object");
    }

    /// Decodes `data` as a JSON object into a new map.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::Decode`] for invalid JSON or a non-object payload.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let map = Self::new();
        map.merge_json(data)?;
        Ok(map)
    }

    /// Converts a snapshot of this map back into a plain JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::from(self)
    }
}

impl<K, V> Serialize for ConcurrentMap<K, V>
where
    K: Serialize + Eq + Hash + Clone,
    V: Serialize + Clone,
{
    /// Serializes a snapshot, so the lock is released before the serializer runs.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.items().serialize(serializer)
    }
}

impl<'de, K, V> Deserialize<'de> for ConcurrentMap<K, V>
where
    K: Deserialize<'de> + Eq + Hash,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        HashMap::<K, V>::deserialize(deserializer).map(Self::from)
    }
}
