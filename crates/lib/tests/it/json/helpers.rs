use std::collections::HashMap;
use std::sync::Arc;

use concurrent_map::{JsonMap, Value};

/// Create a map holding string values, for building expected trees
pub fn object(pairs: &[(&str, &str)]) -> Arc<JsonMap> {
    Arc::new(
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), Value::from(*value)))
            .collect(),
    )
}

/// Wrap a single-entry string object as a `Value`
pub fn object_value(key: &str, value: &str) -> Value {
    Value::Object(object(&[(key, value)]))
}

/// Merge `json` into a fresh map and return its entries
pub fn merge_into_new(json: &str) -> HashMap<String, Value> {
    let map = JsonMap::with_capacity(1);
    map.merge_json_str(json).expect("Failed to merge JSON");
    map.items()
}

/// Build the expected entries of a merged map
pub fn entries(pairs: Vec<(&str, Value)>) -> HashMap<String, Value> {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
