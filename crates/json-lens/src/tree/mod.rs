//! Flatten a JSON value into the rows a tree view shows.
//!
//! The walk is pre-order and only descends into nodes the caller has
//! expanded. The root is always expanded.

use std::collections::HashSet;

use json_lens_path::{ancestors, to_map_key, Path, PathSegment};
use json_lens_util::{preview, JsonType, JsonValue};
use serde::Serialize;

use crate::diff::{DiffKind, DiffMap, Side};

mod index;

pub use index::{build_path_index, PathIndex};

// ── Types ─────────────────────────────────────────────────────────────────

/// One visible node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatRow {
    pub path: Path,
    /// Map-key form of `path`.
    pub path_string: String,
    /// Object key or array index of this node; `None` at the root.
    pub key_name: Option<String>,
    pub value: JsonValue,
    pub depth: usize,
    pub value_type: JsonType,
    pub is_expandable: bool,
    pub is_expanded: bool,
    pub child_count: usize,
    pub is_root: bool,
    pub preview: String,
    pub diff_kind: Option<DiffKind>,
    pub has_nested_diff: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FlattenOptions<'a> {
    /// Paths that matched a search.
    pub match_set: Option<&'a HashSet<Path>>,
    /// Hide subtrees without a match. Needs a non-empty query and match set.
    pub filter_mode: bool,
    pub search_query: &'a str,
    pub diff_map: Option<&'a DiffMap>,
    /// Pane being rendered; move markers for the other pane are ignored.
    pub side: Option<Side>,
}

// ── Flattening ────────────────────────────────────────────────────────────

/// Rows for every visible node of `root`.
///
/// A non-root container is expanded when its path is in `expanded`.
pub fn flatten(root: &JsonValue, expanded: &HashSet<Path>, options: &FlattenOptions<'_>) -> Vec<FlatRow> {
    let reveal = match options.match_set {
        Some(matches) if options.filter_mode && !options.search_query.is_empty() && !matches.is_empty() => {
            Some(reveal_set(matches))
        }
        _ => None,
    };
    let walker = Walker {
        expanded,
        options,
        reveal: reveal.as_ref(),
    };
    let mut rows = Vec::new();
    let mut path = Path::new();
    walker.visit(root, None, &mut path, &mut rows);
    tracing::trace!(rows = rows.len(), filtered = reveal.is_some(), "flattened tree");
    rows
}

/// Every match plus every ancestor of one.
fn reveal_set(matches: &HashSet<Path>) -> HashSet<Path> {
    let mut out = HashSet::with_capacity(matches.len() * 2);
    for path in matches {
        out.extend(ancestors(path));
        out.insert(path.clone());
    }
    out
}

struct Walker<'a> {
    expanded: &'a HashSet<Path>,
    options: &'a FlattenOptions<'a>,
    reveal: Option<&'a HashSet<Path>>,
}

impl Walker<'_> {
    fn visit(&self, value: &JsonValue, key_name: Option<String>, path: &mut Path, out: &mut Vec<FlatRow>) {
        let is_root = path.is_empty();
        let child_count = value.child_count().unwrap_or(0);
        let is_expandable = child_count > 0;
        let is_expanded = is_root || (is_expandable && self.expanded.contains(path.as_slice()));
        let (diff_kind, has_nested_diff) = self.diff_at(path);

        out.push(FlatRow {
            path: path.clone(),
            path_string: to_map_key(path),
            key_name,
            value: value.clone(),
            depth: path.len(),
            value_type: value.json_type(),
            is_expandable,
            is_expanded,
            child_count,
            is_root,
            preview: preview(value),
            diff_kind,
            has_nested_diff,
        });

        if !is_expanded || !is_expandable {
            return;
        }
        match value {
            JsonValue::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    self.visit_child(item, PathSegment::Index(i), i.to_string(), path, out);
                }
            }
            JsonValue::Object(map) => {
                for (key, item) in map.iter() {
                    self.visit_child(item, PathSegment::Key(key.clone()), key.clone(), path, out);
                }
            }
            _ => {}
        }
    }

    fn visit_child(
        &self,
        value: &JsonValue,
        segment: PathSegment,
        key_name: String,
        path: &mut Path,
        out: &mut Vec<FlatRow>,
    ) {
        path.push(segment);
        if self.reveal.map_or(true, |reveal| reveal.contains(path.as_slice())) {
            self.visit(value, Some(key_name), path, out);
        }
        path.pop();
    }

    fn diff_at(&self, path: &[PathSegment]) -> (Option<DiffKind>, bool) {
        let Some(map) = self.options.diff_map else {
            return (None, false);
        };
        let kind = map.get(path).and_then(|entry| match (entry.side(), self.options.side) {
            (Some(entry_side), Some(pane)) if entry_side != pane => None,
            _ => Some(entry.kind()),
        });
        (kind, map.has_nested_diff(path))
    }
}
