//! Immutable path-addressed edits.
//!
//! Every function takes the current root and returns a new one. Only the
//! containers on the way from the root to the edited node are copied; every
//! other subtree is the same allocation as before. When an edit does not fit
//! the shape of the document the input root is returned as is.

use json_lens_path::{get, to_display, Path, PathSegment};
use json_lens_util::JsonValue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use json_lens_path::get as get_at;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("NOT_FOUND: {0}")]
    NotFound(String),
    #[error("NOT_AN_OBJECT: {0}")]
    NotAnObject(String),
    #[error("NOT_AN_ARRAY: {0}")]
    NotAnArray(String),
}

// ── Spine rebuild ─────────────────────────────────────────────────────────

/// Apply `f` to the node at `path` and rebuild its ancestors around the result.
///
/// `None` from `f`, or a path that does not resolve, aborts the whole edit.
fn update_at<F>(node: &JsonValue, path: &[PathSegment], f: F) -> Option<JsonValue>
where
    F: FnOnce(&JsonValue) -> Option<JsonValue>,
{
    let Some((head, rest)) = path.split_first() else {
        return f(node);
    };
    match (node, head) {
        (JsonValue::Object(map), PathSegment::Key(key)) => {
            let child = update_at(map.get(key)?, rest, f)?;
            let mut next = (**map).clone();
            next.insert(key.clone(), child);
            Some(JsonValue::object(next))
        }
        (JsonValue::Array(items), PathSegment::Index(idx)) => {
            let child = update_at(items.get(*idx)?, rest, f)?;
            let mut next = (**items).clone();
            next[*idx] = child;
            Some(JsonValue::array(next))
        }
        _ => None,
    }
}

fn finish(root: &JsonValue, edited: Option<JsonValue>, what: &str, path: &[PathSegment]) -> JsonValue {
    match edited {
        Some(value) => value,
        None => {
            tracing::trace!(op = what, path = %to_display(path), "edit does not fit document shape");
            root.clone()
        }
    }
}

// ── Operations ────────────────────────────────────────────────────────────

/// Replace the value at `path`.
///
/// An empty path replaces the whole root. The parent must exist; the last
/// step may name a new object key or the index one past the end of an array.
pub fn set_at(root: &JsonValue, path: &[PathSegment], value: JsonValue) -> JsonValue {
    let Some((last, parent)) = path.split_last() else {
        return value;
    };
    let edited = update_at(root, parent, |node| match (node, last) {
        (JsonValue::Object(map), PathSegment::Key(key)) => {
            let mut next = (**map).clone();
            next.insert(key.clone(), value);
            Some(JsonValue::object(next))
        }
        (JsonValue::Array(items), PathSegment::Index(idx)) if *idx <= items.len() => {
            let mut next = (**items).clone();
            if *idx == next.len() {
                next.push(value);
            } else {
                next[*idx] = value;
            }
            Some(JsonValue::array(next))
        }
        _ => None,
    });
    finish(root, edited, "set", path)
}

/// Remove the entry at `path`.
///
/// Array elements after the removed one shift down; object keys keep their
/// relative order. Deleting the root is a no-op.
pub fn delete_at(root: &JsonValue, path: &[PathSegment]) -> JsonValue {
    let Some((last, parent)) = path.split_last() else {
        return root.clone();
    };
    let edited = update_at(root, parent, |node| match (node, last) {
        (JsonValue::Object(map), PathSegment::Key(key)) if map.contains_key(key) => {
            let next = map
                .iter()
                .filter(|(k, _)| k.as_str() != key.as_str())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            Some(JsonValue::object(next))
        }
        (JsonValue::Array(items), PathSegment::Index(idx)) if *idx < items.len() => {
            let mut next = (**items).clone();
            next.remove(*idx);
            Some(JsonValue::array(next))
        }
        _ => None,
    });
    finish(root, edited, "delete", path)
}

/// Insert or overwrite `key` in the object at `parent_path`.
pub fn add_key_at(root: &JsonValue, parent_path: &[PathSegment], key: &str, value: JsonValue) -> JsonValue {
    let edited = update_at(root, parent_path, |node| {
        let map = node.as_object()?;
        let mut next = map.clone();
        next.insert(key.to_string(), value);
        Some(JsonValue::object(next))
    });
    finish(root, edited, "add_key", parent_path)
}

/// Push `value` onto the array at `parent_path`.
pub fn append_at(root: &JsonValue, parent_path: &[PathSegment], value: JsonValue) -> JsonValue {
    let edited = update_at(root, parent_path, |node| {
        let items = node.as_array()?;
        let mut next = items.to_vec();
        next.push(value);
        Some(JsonValue::array(next))
    });
    finish(root, edited, "append", parent_path)
}

/// Insert `value` into the array at `parent_path` before position `index`.
///
/// Positions past the end append.
pub fn insert_at(root: &JsonValue, parent_path: &[PathSegment], index: usize, value: JsonValue) -> JsonValue {
    let edited = update_at(root, parent_path, |node| {
        let items = node.as_array()?;
        let mut next = items.to_vec();
        next.insert(index.min(next.len()), value);
        Some(JsonValue::array(next))
    });
    finish(root, edited, "insert", parent_path)
}

// ── Edit descriptions ─────────────────────────────────────────────────────

/// A requested change, as produced by an editing UI or read from JSON.
///
/// ```
/// use json_lens::edit::{apply_edit, EditOp};
/// use json_lens_util::JsonValue;
/// use serde_json::json;
///
/// let op: EditOp = serde_json::from_value(json!({"op": "set", "path": ["a"], "value": 2})).unwrap();
/// let root = JsonValue::from(json!({"a": 1}));
/// assert_eq!(apply_edit(&root, &op), JsonValue::from(json!({"a": 2})));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    Set { path: Path, value: JsonValue },
    Delete { path: Path },
    AddKey { path: Path, key: String, value: JsonValue },
    AppendItem { path: Path, value: JsonValue },
    InsertItem { path: Path, index: usize, value: JsonValue },
}

/// Apply an edit, silently returning `root` when it does not fit.
pub fn apply_edit(root: &JsonValue, op: &EditOp) -> JsonValue {
    match op {
        EditOp::Set { path, value } => set_at(root, path, value.clone()),
        EditOp::Delete { path } => delete_at(root, path),
        EditOp::AddKey { path, key, value } => add_key_at(root, path, key, value.clone()),
        EditOp::AppendItem { path, value } => append_at(root, path, value.clone()),
        EditOp::InsertItem { path, index, value } => insert_at(root, path, *index, value.clone()),
    }
}

/// Apply an edit, reporting why it does not fit instead of ignoring it.
///
/// # Errors
///
/// - `NotFound` when the target (or, for `set`, its parent) does not exist
/// - `NotAnObject` / `NotAnArray` when the container has the wrong kind
pub fn apply_edit_checked(root: &JsonValue, op: &EditOp) -> Result<JsonValue, EditError> {
    match op {
        EditOp::Set { path, .. } => {
            if let Some((last, parent)) = path.split_last() {
                let node = lookup(root, parent)?;
                match (node, last) {
                    (JsonValue::Object(_), PathSegment::Key(_)) => {}
                    (JsonValue::Array(items), PathSegment::Index(idx)) => {
                        if *idx > items.len() {
                            return Err(EditError::NotFound(to_display(path)));
                        }
                    }
                    (_, PathSegment::Key(_)) => return Err(EditError::NotAnObject(to_display(parent))),
                    (_, PathSegment::Index(_)) => return Err(EditError::NotAnArray(to_display(parent))),
                }
            }
        }
        EditOp::Delete { path } => {
            if !path.is_empty() {
                lookup(root, path)?;
            }
        }
        EditOp::AddKey { path, .. } => {
            if !lookup(root, path)?.is_object() {
                return Err(EditError::NotAnObject(to_display(path)));
            }
        }
        EditOp::AppendItem { path, .. } | EditOp::InsertItem { path, .. } => {
            if !lookup(root, path)?.is_array() {
                return Err(EditError::NotAnArray(to_display(path)));
            }
        }
    }
    Ok(apply_edit(root, op))
}

fn lookup<'a>(root: &'a JsonValue, path: &[PathSegment]) -> Result<&'a JsonValue, EditError> {
    get(root, path).ok_or_else(|| EditError::NotFound(to_display(path)))
}
