//! Recursive materialization of nested objects and arrays.

use concurrent_map::Value;

use super::helpers::*;

#[test]
fn test_simple_key_value() {
    let items = merge_into_new(r#"{"key": "value"}"#);

    assert_eq!(items, entries(vec![("key", Value::from("value"))]));
}

#[test]
fn test_nested_object_becomes_map() {
    let items = merge_into_new(r#"{"key": {"key": "value"}}"#);

    assert_eq!(items.len(), 1);
    let inner = items["key"].as_object().expect("nested object should be a map");
    assert_eq!(inner.get("key"), Some(Value::from("value")));
    assert_eq!(items, entries(vec![("key", object_value("key", "value"))]));
}

#[test]
fn test_uniform_object_array_becomes_maps() {
    let items = merge_into_new(r#"{"key": [{"key": "value"}, {"key": "value"}]}"#);

    let maps = items["key"].as_objects().expect("expected an array of maps");
    assert_eq!(maps.len(), 2);
    for map in maps {
        assert_eq!(map.get("key"), Some(Value::from("value")));
    }
}

#[test]
fn test_mixed_nesting() {
    let items =
        merge_into_new(r#"{"key": [{"key1": "value"}, [{"key2": "value"}], {"key3": "value"}]}"#);

    let expected = Value::Array(vec![
        object_value("key1", "value"),
        Value::Objects(vec![object(&[("key2", "value")])]),
        object_value("key3", "value"),
    ]);
    assert_eq!(items, entries(vec![("key", expected)]));
}

#[test]
fn test_complex_nested_slice() {
    let items = merge_into_new(
        r#"{"key": [{"key1": "value"}, [{"key2": "value"}, {"key2": "value"}, {"key2": "value"}], {"key3": "value"}]}"#,
    );

    let expected = Value::Array(vec![
        object_value("key1", "value"),
        Value::Objects(vec![
            object(&[("key2", "value")]),
            object(&[("key2", "value")]),
            object(&[("key2", "value")]),
        ]),
        object_value("key3", "value"),
    ]);
    assert_eq!(items, entries(vec![("key", expected)]));
}

#[test]
fn test_nested_slices_of_object_slices() {
    let items = merge_into_new(
        r#"{"key": [[{"key1": "value"},[{"key21": "value"}, {"key22": "value"}, {"key23": "value"}]],[{"key11": "value"},[{"key12": "value"}, {"key13": "value"}, {"key11": "value"}],[{"key31": "value"},[{"key32": "value"}, {"key33": "value"}, {"key34": "value"}]], {"key3": "value"}]]}"#,
    );

    let expected = Value::Array(vec![
        Value::Array(vec![
            object_value("key1", "value"),
            Value::Objects(vec![
                object(&[("key21", "value")]),
                object(&[("key22", "value")]),
                object(&[("key23", "value")]),
            ]),
        ]),
        Value::Array(vec![
            object_value("key11", "value"),
            Value::Objects(vec![
                object(&[("key12", "value")]),
                object(&[("key13", "value")]),
                object(&[("key11", "value")]),
            ]),
            Value::Array(vec![
                object_value("key31", "value"),
                Value::Objects(vec![
                    object(&[("key32", "value")]),
                    object(&[("key33", "value")]),
                    object(&[("key34", "value")]),
                ]),
            ]),
            object_value("key3", "value"),
        ]),
    ]);
    assert_eq!(items, entries(vec![("key", expected)]));
}

#[test]
fn test_objects_inside_objects_inside_arrays() {
    let items = merge_into_new(r#"{"a": [{"b": {"c": [1, {"d": null}]}}]}"#);

    let a = items["a"].as_objects().expect("a is an array of maps");
    let b = a[0].get("b").expect("b should exist");
    let c = b.as_object().expect("b is a map").get("c").expect("c should exist");
    let c = c.as_array().expect("c is a general array");

    assert_eq!(c[0], 1i64);
    let d = c[1].as_object().expect("second element is a map").get("d");
    assert_eq!(d, Some(Value::Null));
}

#[test]
fn test_empty_containers() {
    let items = merge_into_new(r#"{"array": [], "object": {}}"#);

    assert_eq!(items["array"], Value::Array(vec![]));
    let object = items["object"].as_object().expect("empty object is a map");
    assert!(object.is_empty());
}

#[test]
fn test_scalars_keep_generic_numbers() {
    let items = merge_into_new(
        r#"{"big": 18446744073709551615, "neg": -5, "float": 0.25, "flag": false, "none": null}"#,
    );

    assert_eq!(
        items["big"].as_number().and_then(|n| n.as_u64()),
        Some(u64::MAX)
    );
    assert_eq!(items["neg"], -5i64);
    assert_eq!(items["float"].as_f64(), Some(0.25));
    assert_eq!(items["flag"], false);
    assert!(items["none"].is_null());
}

#[test]
fn test_nested_maps_are_fresh_instances() {
    let items = merge_into_new(r#"{"a": {"x": 1}, "b": {"x": 1}}"#);

    let a = items["a"].as_object().expect("a is a map");
    let b = items["b"].as_object().expect("b is a map");
    assert_eq!(a, b);

    a.set("y".to_string(), Value::Null);
    assert!(!b.contains_key("y"));
}
