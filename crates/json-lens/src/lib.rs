//! json-lens: data core of an interactive JSON viewer.
//!
//! Structural diff with key-based array matching, inline text diff, tree
//! flattening with a path index for windowed rendering, full-document search,
//! and immutable path edits that share every untouched subtree.
//!
//! Everything is addressed by [`json_lens_path::Path`] and operates on
//! [`json_lens_util::JsonValue`].
//!
//! # Example
//!
//! ```
//! use std::collections::HashSet;
//!
//! use json_lens::{diff, flatten, search, set_at, DiffMap, FlattenOptions};
//! use json_lens_path::path;
//! use json_lens_util::JsonValue;
//! use serde_json::json;
//!
//! let before = JsonValue::from(json!({"users": [{"id": 1, "name": "Ada"}]}));
//! let after = set_at(&before, &path!["users", 0, "name"], JsonValue::from("Grace"));
//!
//! let map = DiffMap::build(&diff(&before, &after));
//! assert!(map.path_has_diff(&path!["users"]));
//!
//! let found = search(&after, "grace");
//! let expanded = found.merge_expansion(&HashSet::new());
//! let rows = flatten(&after, &expanded, &FlattenOptions { diff_map: Some(&map), ..Default::default() });
//! assert_eq!(rows.len(), 5);
//! ```

pub mod diff;
pub mod edit;
pub mod json_cli;
pub mod search;
pub mod text_diff;
pub mod tree;

pub use diff::{
    build_diff_map, detect_array_key, diff, diff_with_options, DiffEntry, DiffKind, DiffMap,
    DiffOptions, DiffSummary, Side,
};
pub use edit::{
    add_key_at, append_at, apply_edit, apply_edit_checked, delete_at, get_at, insert_at, set_at,
    EditError, EditOp,
};
pub use search::{search, SearchResult};
pub use text_diff::{char_diff, segments_dst, segments_src, Segment, SegmentKind};
pub use tree::{build_path_index, flatten, FlatRow, FlattenOptions, PathIndex};
