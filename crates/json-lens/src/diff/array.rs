use std::collections::{HashMap, HashSet};

use json_lens_path::{Path, PathSegment};
use json_lens_util::JsonValue;

use super::{child_path, rebase, DiffEntry, Differ, Side};

/// Identity fields tried, in order, when no override is given.
pub const DEFAULT_KEY_CANDIDATES: &[&str] = &["id", "_id", "key", "name", "uuid", "slug"];

/// Identity of an element under a key field.
///
/// Integral floats collapse onto integers so `1` and `1.0` match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum MatchKey {
    Str(String),
    Int(i128),
    Float(u64),
}

fn match_key(item: &JsonValue, field: &str) -> Option<MatchKey> {
    match item.as_object()?.get(field)? {
        JsonValue::String(s) => Some(MatchKey::Str(s.to_string())),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(MatchKey::Int(i as i128));
            }
            if let Some(u) = n.as_u64() {
                return Some(MatchKey::Int(u as i128));
            }
            let f = n.as_f64()?;
            if f.fract() == 0.0 && f.abs() < 1e18 {
                Some(MatchKey::Int(f as i128))
            } else {
                Some(MatchKey::Float(f.to_bits()))
            }
        }
        _ => None,
    }
}

/// Whether `field` can identify elements on one side: every element carrying
/// it holds a string or number, and no two values collide.
fn field_usable_on(items: &[JsonValue], field: &str, seen_any: &mut bool) -> bool {
    let mut seen = HashSet::new();
    for item in items {
        let Some(map) = item.as_object() else { continue };
        if !map.contains_key(field) {
            continue;
        }
        *seen_any = true;
        match match_key(item, field) {
            Some(key) => {
                if !seen.insert(key) {
                    return false;
                }
            }
            None => return false,
        }
    }
    true
}

fn field_usable(left: &[JsonValue], right: &[JsonValue], field: &str) -> bool {
    let mut seen_any = false;
    field_usable_on(left, field, &mut seen_any) && field_usable_on(right, field, &mut seen_any) && seen_any
}

/// Pick the field to match array elements by, if any.
///
/// Requires at least half of all elements to be objects. With `override_key`
/// only that field is considered; otherwise [`DEFAULT_KEY_CANDIDATES`] are
/// tried in order and the first usable one wins.
pub fn detect_array_key(left: &[JsonValue], right: &[JsonValue], override_key: Option<&str>) -> Option<String> {
    let total = left.len() + right.len();
    if total == 0 {
        return None;
    }
    let objects = left.iter().chain(right).filter(|v| v.is_object()).count();
    if objects * 2 < total {
        return None;
    }
    match override_key {
        Some(field) => field_usable(left, right, field).then(|| field.to_string()),
        None => DEFAULT_KEY_CANDIDATES
            .iter()
            .find(|field| field_usable(left, right, field))
            .map(|field| field.to_string()),
    }
}

impl Differ<'_> {
    /// Match elements by `field`.
    ///
    /// Unmatched left elements are removed at their left index and unmatched
    /// right elements added at their right index. A matched pair whose index
    /// changed gets a move pair, and its inner differences are reported under
    /// both the old and the new index. Elements lacking the field fall back to
    /// positional pairing with other keyless elements.
    pub(super) fn diff_by_key(
        &self,
        left: &[JsonValue],
        right: &[JsonValue],
        field: &str,
        path: &Path,
        out: &mut Vec<DiffEntry>,
    ) {
        let right_index: HashMap<MatchKey, usize> = right
            .iter()
            .enumerate()
            .filter_map(|(i, item)| match_key(item, field).map(|k| (k, i)))
            .collect();
        let left_keys: HashSet<MatchKey> = left.iter().filter_map(|item| match_key(item, field)).collect();

        for (li, lv) in left.iter().enumerate() {
            let here = child_path(path, PathSegment::Index(li));
            let Some(key) = match_key(lv, field) else {
                match right.get(li) {
                    Some(rv) if match_key(rv, field).is_none() => self.diff_at(lv, rv, &here, out),
                    _ => out.push(DiffEntry::removed(here, lv)),
                }
                continue;
            };
            let Some(&ri) = right_index.get(&key) else {
                out.push(DiffEntry::removed(here, lv));
                continue;
            };
            if li == ri {
                self.diff_at(lv, &right[ri], &here, out);
                continue;
            }
            out.push(DiffEntry::Moved {
                path: here.clone(),
                from_index: li,
                to_index: ri,
                side: Side::Left,
            });
            out.push(DiffEntry::Moved {
                path: child_path(path, PathSegment::Index(ri)),
                from_index: li,
                to_index: ri,
                side: Side::Right,
            });
            let mut inner = Vec::new();
            self.diff_at(lv, &right[ri], &here, &mut inner);
            let depth = path.len();
            let rebased: Vec<DiffEntry> = inner.iter().cloned().map(|e| rebase(e, depth, ri)).collect();
            out.extend(inner);
            out.extend(rebased);
        }

        for (ri, rv) in right.iter().enumerate() {
            let added = match match_key(rv, field) {
                Some(key) => !left_keys.contains(&key),
                None => !matches!(left.get(ri), Some(lv) if match_key(lv, field).is_none()),
            };
            if added {
                out.push(DiffEntry::added(child_path(path, PathSegment::Index(ri)), rv));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{diff, diff_with_options, DiffKind, DiffOptions};
    use json_lens_path::path;
    use serde_json::json;

    fn items(value: serde_json::Value) -> Vec<JsonValue> {
        JsonValue::from(value).as_array().unwrap().to_vec()
    }

    fn v(value: serde_json::Value) -> JsonValue {
        JsonValue::from(value)
    }

    #[test]
    fn detects_id_field() {
        let l = items(json!([{"id": 1}, {"id": 2}]));
        let r = items(json!([{"id": 2}]));
        assert_eq!(detect_array_key(&l, &r, None).as_deref(), Some("id"));
    }

    #[test]
    fn falls_through_candidates_in_order() {
        let l = items(json!([{"id": 1, "name": "a"}, {"id": 1, "name": "b"}]));
        assert_eq!(detect_array_key(&l, &[], None).as_deref(), Some("name"));
    }

    #[test]
    fn rejects_duplicate_values() {
        let l = items(json!([{"id": 1}, {"id": 1}]));
        assert_eq!(detect_array_key(&l, &[], None), None);
    }

    #[test]
    fn rejects_non_scalar_identity() {
        let l = items(json!([{"id": {"x": 1}}, {"id": 2}]));
        assert_eq!(detect_array_key(&l, &[], None), None);
    }

    #[test]
    fn rejects_mostly_scalar_arrays() {
        let l = items(json!([1, 2, 3, {"id": 1}]));
        assert_eq!(detect_array_key(&l, &[], None), None);
    }

    #[test]
    fn half_objects_is_enough() {
        let l = items(json!([1, {"id": 1}]));
        assert_eq!(detect_array_key(&l, &[], None).as_deref(), Some("id"));
    }

    #[test]
    fn override_replaces_candidates() {
        let l = items(json!([{"id": 1, "sku": "a"}, {"id": 2, "sku": "b"}]));
        assert_eq!(detect_array_key(&l, &[], Some("sku")).as_deref(), Some("sku"));
        assert_eq!(detect_array_key(&l, &[], Some("missing")), None);
    }

    #[test]
    fn swap_emits_two_move_pairs() {
        let entries = diff(&v(json!([{"id": 1}, {"id": 2}])), &v(json!([{"id": 2}, {"id": 1}])));
        assert_eq!(entries.len(), 4);
        assert!(entries.iter().all(|e| e.kind() == DiffKind::Moved));
        assert_eq!(
            entries[0],
            DiffEntry::Moved { path: path![0], from_index: 0, to_index: 1, side: Side::Left }
        );
        assert_eq!(
            entries[1],
            DiffEntry::Moved { path: path![1], from_index: 0, to_index: 1, side: Side::Right }
        );
    }

    #[test]
    fn moved_item_changes_are_reported_at_both_indices() {
        let entries = diff(
            &v(json!([{"id": "a", "v": 1}, {"id": "b", "v": 2}])),
            &v(json!([{"id": "b", "v": 2}, {"id": "a", "v": 9}])),
        );
        let changed: Vec<&Path> = entries
            .iter()
            .filter(|e| e.kind() == DiffKind::Changed)
            .map(|e| e.path())
            .collect();
        assert_eq!(changed, vec![&path![0, "v"], &path![1, "v"]]);
    }

    #[test]
    fn removed_at_left_index_added_at_right_index() {
        let entries = diff(
            &v(json!([{"id": 1}, {"id": 2}, {"id": 3}])),
            &v(json!([{"id": 1}, {"id": 3}, {"id": 4}])),
        );
        let removed: Vec<_> = entries.iter().filter(|e| e.kind() == DiffKind::Removed).collect();
        let added: Vec<_> = entries.iter().filter(|e| e.kind() == DiffKind::Added).collect();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].path(), &path![1]);
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].path(), &path![2]);
    }

    #[test]
    fn keyless_elements_pair_by_position() {
        let entries = diff(
            &v(json!([{"id": 1}, {"x": 1}])),
            &v(json!([{"id": 1}, {"x": 2}])),
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind(), DiffKind::Changed);
        assert_eq!(entries[0].path(), &path![1, "x"]);
    }

    #[test]
    fn above_threshold_uses_index_alignment() {
        let opts = DiffOptions { index_diff_threshold: 1, ..DiffOptions::default() };
        let entries = diff_with_options(
            &v(json!([{"id": 1}, {"id": 2}])),
            &v(json!([{"id": 2}, {"id": 1}])),
            &opts,
        );
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.kind() == DiffKind::Changed));
    }
}
