//! Structural JSON diff.
//!
//! Produces a flat list of [`DiffEntry`] records addressed by [`Path`]. Objects
//! are compared key by key; arrays are matched element by element, either by
//! position or, when the elements carry a usable identity field, by that field
//! so reordered items show up as moves instead of a cascade of changes.

use json_lens_path::{Path, PathSegment};
use json_lens_util::{deep_equal, JsonType, JsonValue};
use serde::{Deserialize, Serialize};

mod array;
mod map;

pub use array::{detect_array_key, DEFAULT_KEY_CANDIDATES};
pub use map::{build_diff_map, DiffMap};

/// Arrays longer than this are always compared by position.
pub const INDEX_DIFF_THRESHOLD: usize = 10_000;

// ── Types ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Added,
    Removed,
    Changed,
    Moved,
}

/// Which pane of a side-by-side view a move marker belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// One difference between two documents.
///
/// Moves come in pairs: a `Left` entry at the element's old index and a
/// `Right` entry at its new index, both carrying the same indices.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum DiffEntry {
    Added {
        path: Path,
        right_value: JsonValue,
        right_type: JsonType,
    },
    Removed {
        path: Path,
        left_value: JsonValue,
        left_type: JsonType,
    },
    Changed {
        path: Path,
        left_value: JsonValue,
        right_value: JsonValue,
        left_type: JsonType,
        right_type: JsonType,
    },
    Moved {
        path: Path,
        from_index: usize,
        to_index: usize,
        side: Side,
    },
}

impl DiffEntry {
    pub fn path(&self) -> &Path {
        match self {
            DiffEntry::Added { path, .. }
            | DiffEntry::Removed { path, .. }
            | DiffEntry::Changed { path, .. }
            | DiffEntry::Moved { path, .. } => path,
        }
    }

    fn path_mut(&mut self) -> &mut Path {
        match self {
            DiffEntry::Added { path, .. }
            | DiffEntry::Removed { path, .. }
            | DiffEntry::Changed { path, .. }
            | DiffEntry::Moved { path, .. } => path,
        }
    }

    pub fn kind(&self) -> DiffKind {
        match self {
            DiffEntry::Added { .. } => DiffKind::Added,
            DiffEntry::Removed { .. } => DiffKind::Removed,
            DiffEntry::Changed { .. } => DiffKind::Changed,
            DiffEntry::Moved { .. } => DiffKind::Moved,
        }
    }

    /// The pane a move belongs to; `None` for every other kind.
    pub fn side(&self) -> Option<Side> {
        match self {
            DiffEntry::Moved { side, .. } => Some(*side),
            _ => None,
        }
    }

    fn added(path: Path, right: &JsonValue) -> Self {
        DiffEntry::Added {
            path,
            right_value: right.clone(),
            right_type: right.json_type(),
        }
    }

    fn removed(path: Path, left: &JsonValue) -> Self {
        DiffEntry::Removed {
            path,
            left_value: left.clone(),
            left_type: left.json_type(),
        }
    }

    fn changed(path: Path, left: &JsonValue, right: &JsonValue) -> Self {
        DiffEntry::Changed {
            path,
            left_value: left.clone(),
            right_value: right.clone(),
            left_type: left.json_type(),
            right_type: right.json_type(),
        }
    }
}

/// Tuning for [`diff_with_options`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiffOptions {
    /// Identity field to match array elements by, instead of the built-in
    /// candidates. It must still pass the same uniqueness checks.
    pub array_match_key: Option<String>,
    /// Arrays longer than this skip key matching.
    pub index_diff_threshold: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            array_match_key: None,
            index_diff_threshold: INDEX_DIFF_THRESHOLD,
        }
    }
}

/// Entry counts, with each move pair counted once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
    pub moved: usize,
}

impl DiffSummary {
    pub fn from_entries(entries: &[DiffEntry]) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            match entry {
                DiffEntry::Added { .. } => summary.added += 1,
                DiffEntry::Removed { .. } => summary.removed += 1,
                DiffEntry::Changed { .. } => summary.changed += 1,
                DiffEntry::Moved { side: Side::Left, .. } => summary.moved += 1,
                DiffEntry::Moved { side: Side::Right, .. } => {}
            }
        }
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.added + self.removed + self.changed + self.moved == 0
    }
}

// ── Public API ────────────────────────────────────────────────────────────

/// Diff two documents with default options.
///
/// ```
/// use json_lens::diff::{diff, DiffEntry};
/// use json_lens_util::JsonValue;
/// use serde_json::json;
///
/// let entries = diff(&JsonValue::from(json!({"a": 1})), &JsonValue::from(json!({"a": 2})));
/// assert_eq!(entries.len(), 1);
/// assert!(matches!(entries[0], DiffEntry::Changed { .. }));
/// ```
pub fn diff(left: &JsonValue, right: &JsonValue) -> Vec<DiffEntry> {
    diff_with_options(left, right, &DiffOptions::default())
}

pub fn diff_with_options(left: &JsonValue, right: &JsonValue, options: &DiffOptions) -> Vec<DiffEntry> {
    let mut out = Vec::new();
    let differ = Differ { options };
    differ.diff_at(left, right, &Path::new(), &mut out);
    tracing::debug!(entries = out.len(), "structural diff complete");
    out
}

// ── Core recursive differ ─────────────────────────────────────────────────

struct Differ<'a> {
    options: &'a DiffOptions,
}

impl Differ<'_> {
    fn diff_at(&self, left: &JsonValue, right: &JsonValue, path: &Path, out: &mut Vec<DiffEntry>) {
        if left.ptr_eq(right) {
            return;
        }
        match (left, right) {
            (JsonValue::Object(l), JsonValue::Object(r)) => {
                for (key, lv) in l.iter() {
                    let child = child_path(path, PathSegment::Key(key.clone()));
                    match r.get(key) {
                        Some(rv) => self.diff_at(lv, rv, &child, out),
                        None => out.push(DiffEntry::removed(child, lv)),
                    }
                }
                for (key, rv) in r.iter() {
                    if !l.contains_key(key) {
                        out.push(DiffEntry::added(child_path(path, PathSegment::Key(key.clone())), rv));
                    }
                }
            }
            (JsonValue::Array(l), JsonValue::Array(r)) => self.diff_arrays(l, r, path, out),
            _ if left.json_type() != right.json_type() => {
                out.push(DiffEntry::changed(path.clone(), left, right));
            }
            _ => {
                if !deep_equal(left, right) {
                    out.push(DiffEntry::changed(path.clone(), left, right));
                }
            }
        }
    }

    fn diff_arrays(&self, left: &[JsonValue], right: &[JsonValue], path: &Path, out: &mut Vec<DiffEntry>) {
        let threshold = self.options.index_diff_threshold;
        if left.len() > threshold || right.len() > threshold {
            tracing::debug!(
                left_len = left.len(),
                right_len = right.len(),
                threshold,
                "array above threshold, diffing by index"
            );
            return self.diff_by_index(left, right, path, out);
        }
        match detect_array_key(left, right, self.options.array_match_key.as_deref()) {
            Some(field) => {
                tracing::trace!(field = %field, "matching array elements by key");
                self.diff_by_key(left, right, &field, path, out);
            }
            None => self.diff_by_index(left, right, path, out),
        }
    }

    fn diff_by_index(&self, left: &[JsonValue], right: &[JsonValue], path: &Path, out: &mut Vec<DiffEntry>) {
        for i in 0..left.len().max(right.len()) {
            let child = child_path(path, PathSegment::Index(i));
            match (left.get(i), right.get(i)) {
                (Some(lv), Some(rv)) => self.diff_at(lv, rv, &child, out),
                (Some(lv), None) => out.push(DiffEntry::removed(child, lv)),
                (None, Some(rv)) => out.push(DiffEntry::added(child, rv)),
                (None, None) => {}
            }
        }
    }
}

fn child_path(path: &Path, segment: PathSegment) -> Path {
    let mut child = Vec::with_capacity(path.len() + 1);
    child.extend_from_slice(path);
    child.push(segment);
    child
}

/// Point `entry` at `index` instead of whatever index it had at depth `depth`.
fn rebase(mut entry: DiffEntry, depth: usize, index: usize) -> DiffEntry {
    if let Some(seg) = entry.path_mut().get_mut(depth) {
        *seg = PathSegment::Index(index);
    }
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use json_lens_path::path;
    use serde_json::json;

    fn v(value: serde_json::Value) -> JsonValue {
        JsonValue::from(value)
    }

    #[test]
    fn identical_documents_have_no_entries() {
        let doc = v(json!({"a": [1, {"b": null}], "c": "x"}));
        assert!(diff(&doc, &doc.clone()).is_empty());
        assert!(diff(&doc, &v(json!({"a": [1, {"b": null}], "c": "x"}))).is_empty());
    }

    #[test]
    fn changed_scalar() {
        let entries = diff(&v(json!({"a": 1})), &v(json!({"a": 2})));
        assert_eq!(
            entries,
            vec![DiffEntry::Changed {
                path: path!["a"],
                left_value: v(json!(1)),
                right_value: v(json!(2)),
                left_type: JsonType::Number,
                right_type: JsonType::Number,
            }]
        );
    }

    #[test]
    fn type_change_stops_recursion() {
        let entries = diff(&v(json!({"a": {"x": 1}})), &v(json!({"a": [1]})));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind(), DiffKind::Changed);
        assert_eq!(entries[0].path(), &path!["a"]);
    }

    #[test]
    fn null_versus_object_is_a_change() {
        let entries = diff(&v(json!(null)), &v(json!({})));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind(), DiffKind::Changed);
    }

    #[test]
    fn added_and_removed_keys() {
        let entries = diff(&v(json!({"a": 1, "b": 2})), &v(json!({"b": 2, "c": 3})));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind(), DiffKind::Removed);
        assert_eq!(entries[0].path(), &path!["a"]);
        assert_eq!(entries[1].kind(), DiffKind::Added);
        assert_eq!(entries[1].path(), &path!["c"]);
    }

    #[test]
    fn index_aligned_arrays() {
        let entries = diff(&v(json!([1, 2, 3])), &v(json!([1, 5])));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind(), DiffKind::Changed);
        assert_eq!(entries[0].path(), &path![1]);
        assert_eq!(entries[1].kind(), DiffKind::Removed);
        assert_eq!(entries[1].path(), &path![2]);
    }

    #[test]
    fn integer_and_float_forms_are_equal() {
        assert!(diff(&v(json!({"n": 1})), &v(json!({"n": 1.0}))).is_empty());
    }

    #[test]
    fn entry_serializes_with_type_tag() {
        let entries = diff(&v(json!({"a": 1})), &v(json!({"a": "1"})));
        let out = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(
            out,
            json!({
                "type": "changed",
                "path": ["a"],
                "leftValue": 1,
                "rightValue": "1",
                "leftType": "number",
                "rightType": "string"
            })
        );
    }

    #[test]
    fn summary_counts_move_pairs_once() {
        let left = v(json!([{"id": 1}, {"id": 2}]));
        let right = v(json!([{"id": 2}, {"id": 1}, {"id": 3}]));
        let summary = DiffSummary::from_entries(&diff(&left, &right));
        assert_eq!(summary, DiffSummary { added: 1, removed: 0, changed: 0, moved: 2 });
        assert!(!summary.is_empty());
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let opts: DiffOptions = serde_json::from_value(json!({"arrayMatchKey": "sku"})).unwrap();
        assert_eq!(opts.array_match_key.as_deref(), Some("sku"));
        assert_eq!(opts.index_diff_threshold, INDEX_DIFF_THRESHOLD);
    }
}
