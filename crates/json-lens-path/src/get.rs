use json_lens_util::JsonValue;

use crate::types::{Path, PathSegment};
use crate::util::{is_valid_index, parse_json_pointer};
use crate::PathError;

/// Get a value from a JSON document by path.
///
/// Returns `None` as soon as a step misses: an index past the end, a missing
/// key, a key applied to an array, or any step into a leaf.
pub fn get<'a>(val: &'a JsonValue, path: &[PathSegment]) -> Option<&'a JsonValue> {
    let mut current = val;
    for step in path {
        current = match (current, step) {
            (JsonValue::Array(arr), PathSegment::Index(idx)) => arr.get(*idx)?,
            (JsonValue::Object(map), PathSegment::Key(key)) => map.get(key)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Turn a JSON Pointer into a typed [`Path`] by walking `root`.
///
/// Steps into arrays become indices and steps into objects become keys.
/// Returns `Ok(None)` when the pointer does not resolve.
///
/// # Errors
///
/// Returns [`PathError::InvalidPointer`] for a malformed pointer string.
pub fn resolve_pointer(root: &JsonValue, pointer: &str) -> Result<Option<Path>, PathError> {
    let steps = parse_json_pointer(pointer)?;
    let mut path = Path::with_capacity(steps.len());
    let mut current = root;
    for step in steps {
        let (segment, next) = match current {
            JsonValue::Array(arr) => {
                if !is_valid_index(&step) {
                    return Ok(None);
                }
                let Ok(idx) = step.parse::<usize>() else {
                    return Ok(None);
                };
                match arr.get(idx) {
                    Some(v) => (PathSegment::Index(idx), v),
                    None => return Ok(None),
                }
            }
            JsonValue::Object(map) => match map.get(&step) {
                Some(v) => (PathSegment::Key(step), v),
                None => return Ok(None),
            },
            _ => return Ok(None),
        };
        path.push(segment);
        current = next;
    }
    Ok(Some(path))
}
