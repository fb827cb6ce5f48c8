#![allow(dead_code)]

use json_lens_path::{Path, PathSegment};
use json_lens_util::JsonValue;
use proptest::prelude::*;

pub fn v(value: serde_json::Value) -> JsonValue {
    JsonValue::from(value)
}

/// Copy without sharing any allocation with `value`.
pub fn deep_copy(value: &JsonValue) -> JsonValue {
    JsonValue::from(serde_json::Value::from(value))
}

/// Every path in `value`, pre-order, root first.
pub fn all_paths(value: &JsonValue) -> Vec<Path> {
    let mut out = Vec::new();
    collect_paths(value, &mut Vec::new(), &mut out);
    out
}

fn collect_paths(value: &JsonValue, path: &mut Path, out: &mut Vec<Path>) {
    out.push(path.clone());
    match value {
        JsonValue::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                path.push(PathSegment::Index(i));
                collect_paths(item, path, out);
                path.pop();
            }
        }
        JsonValue::Object(map) => {
            for (key, item) in map.iter() {
                path.push(PathSegment::Key(key.clone()));
                collect_paths(item, path, out);
                path.pop();
            }
        }
        _ => {}
    }
}

pub fn arb_leaf() -> impl Strategy<Value = JsonValue> {
    prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::from),
        (-50i64..50).prop_map(JsonValue::from),
        "[a-d ]{0,6}".prop_map(JsonValue::from),
    ]
}

pub fn arb_json() -> impl Strategy<Value = JsonValue> {
    arb_leaf().prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(JsonValue::from),
            prop::collection::vec(("(id|name|[a-c]{1,2})", inner), 0..5)
                .prop_map(|pairs| JsonValue::object(pairs.into_iter().collect())),
        ]
    })
}
