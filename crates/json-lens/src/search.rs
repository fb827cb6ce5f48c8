//! Case-insensitive substring search over a whole document.
//!
//! Search ignores expansion state. It returns the matching paths plus every
//! ancestor that has to be opened for the matches to be visible.

use std::collections::HashSet;

use json_lens_path::{ancestors, Path, PathSegment};
use json_lens_util::{render_scalar, JsonValue};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub match_set: HashSet<Path>,
    /// Strict ancestors of every match, including the root.
    pub expand_ancestors: HashSet<Path>,
    /// Matches in pre-order.
    pub ordered_matches: Vec<Path>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.ordered_matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ordered_matches.len()
    }

    /// `expanded` plus everything needed to reveal the matches.
    pub fn merge_expansion(&self, expanded: &HashSet<Path>) -> HashSet<Path> {
        expanded.union(&self.expand_ancestors).cloned().collect()
    }

    fn record(&mut self, path: &Path) {
        if !self.match_set.insert(path.clone()) {
            return;
        }
        self.expand_ancestors.extend(ancestors(path));
        self.ordered_matches.push(path.clone());
    }
}

/// Find every leaf whose text contains `query`, and every object key that does.
///
/// A key match records the path of the value under that key. An empty query
/// matches nothing.
///
/// ```
/// use json_lens::search::search;
/// use json_lens_path::path;
/// use json_lens_util::JsonValue;
/// use serde_json::json;
///
/// let doc = JsonValue::from(json!({"user": {"name": "Ada"}}));
/// let found = search(&doc, "ada");
/// assert_eq!(found.ordered_matches, vec![path!["user", "name"]]);
/// assert!(found.expand_ancestors.contains(&path!["user"]));
/// ```
pub fn search(root: &JsonValue, query: &str) -> SearchResult {
    let mut result = SearchResult::default();
    if query.is_empty() {
        return result;
    }
    let needle = query.to_lowercase();
    let mut path = Path::new();
    visit(root, &needle, &mut path, &mut result);
    tracing::debug!(query, matches = result.len(), "search complete");
    result
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn visit(value: &JsonValue, needle: &str, path: &mut Path, result: &mut SearchResult) {
    match value {
        JsonValue::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                path.push(PathSegment::Index(i));
                visit(item, needle, path, result);
                path.pop();
            }
        }
        JsonValue::Object(map) => {
            for (key, item) in map.iter() {
                path.push(PathSegment::Key(key.clone()));
                if contains_ci(key, needle) {
                    result.record(path);
                }
                visit(item, needle, path, result);
                path.pop();
            }
        }
        leaf => {
            if render_scalar(leaf).is_some_and(|text| contains_ci(&text, needle)) {
                result.record(path);
            }
        }
    }
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
    fn empty_query_matches_nothing() {
        let found = search(&v(json!({"a": "b"})), "");
        assert!(found.is_empty());
        assert!(found.expand_ancestors.is_empty());
    }

    #[test]
    fn values_match_case_insensitively() {
        let found = search(&v(json!({"a": "Hello", "b": ["HELLO there", 3]})), "hello");
        assert_eq!(found.ordered_matches, vec![path!["a"], path!["b", 0]]);
        assert!(found.expand_ancestors.contains(&path![]));
        assert!(found.expand_ancestors.contains(&path!["b"]));
        assert!(!found.expand_ancestors.contains(&path!["b", 0]));
    }

    #[test]
    fn keys_match_independently_of_values() {
        let found = search(&v(json!({"config": {"port": 80}})), "port");
        assert_eq!(found.ordered_matches, vec![path!["config", "port"]]);
    }

    #[test]
    fn key_and_value_match_record_once() {
        let found = search(&v(json!({"name": "name"})), "name");
        assert_eq!(found.ordered_matches, vec![path!["name"]]);
    }

    #[test]
    fn scalars_render_for_matching() {
        let doc = v(json!({"n": 1234, "t": true, "z": null}));
        assert_eq!(search(&doc, "23").ordered_matches, vec![path!["n"]]);
        assert_eq!(search(&doc, "TRU").ordered_matches, vec![path!["t"]]);
        assert_eq!(search(&doc, "nul").ordered_matches, vec![path!["z"]]);
    }

    #[test]
    fn container_values_do_not_match_themselves() {
        let found = search(&v(json!([[], {}])), "[");
        assert!(found.is_empty());
    }

    #[test]
    fn scalar_root_match_has_no_ancestors() {
        let found = search(&v(json!("needle")), "need");
        assert_eq!(found.ordered_matches, vec![path![]]);
        assert!(found.expand_ancestors.is_empty());
    }

    #[test]
    fn merge_expansion_unions_sets() {
        let found = search(&v(json!({"a": {"b": "x"}})), "x");
        let mine: HashSet<Path> = [path!["zzz"]].into_iter().collect();
        let merged = found.merge_expansion(&mine);
        assert!(merged.contains(&path!["zzz"]));
        assert!(merged.contains(&path!["a"]));
        assert!(merged.contains(&path![]));
    }
}
