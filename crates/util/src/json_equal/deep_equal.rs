use serde_json::Number;

use crate::value::JsonValue;

/// Performs a deep equality check between two JSON values.
///
/// This function compares values recursively, checking equality for:
/// - Primitives (null, bool, number, string)
/// - Arrays (element-by-element comparison)
/// - Objects (key-by-key comparison, key order ignored)
///
/// Shared subtrees short-circuit on pointer equality.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_lens_util::{deep_equal, JsonValue};
///
/// let a = JsonValue::from(json!({"foo": [1, 2, 3]}));
/// let b = JsonValue::from(json!({"foo": [1, 2, 3]}));
/// let c = JsonValue::from(json!({"foo": [1, 2, 4]}));
///
/// assert!(deep_equal(&a, &b));
/// assert!(!deep_equal(&a, &c));
/// ```
pub fn deep_equal(a: &JsonValue, b: &JsonValue) -> bool {
    if a.ptr_eq(b) {
        return true;
    }
    match (a, b) {
        (JsonValue::Null, JsonValue::Null) => true,
        (JsonValue::Bool(a), JsonValue::Bool(b)) => a == b,
        (JsonValue::Number(a), JsonValue::Number(b)) => numbers_equal(a, b),
        (JsonValue::String(a), JsonValue::String(b)) => a == b,

        // Arrays
        (JsonValue::Array(arr_a), JsonValue::Array(arr_b)) => {
            arr_a.len() == arr_b.len()
                && arr_a.iter().zip(arr_b.iter()).all(|(x, y)| deep_equal(x, y))
        }

        // Objects
        (JsonValue::Object(obj_a), JsonValue::Object(obj_b)) => {
            if obj_a.len() != obj_b.len() {
                return false;
            }
            obj_a.iter().all(|(key, val_a)| match obj_b.get(key) {
                Some(val_b) => deep_equal(val_a, val_b),
                None => false,
            })
        }

        // Different types are never equal
        _ => false,
    }
}

/// Numeric equality: `1` and `1.0` are the same number.
pub fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}
