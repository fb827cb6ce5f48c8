//! String forms of a path.
//!
//! - map-key form: `users.0.name`, every segment joined with `.`
//! - display form: `users[0].name`, `a["weird key"]`
//! - JSON Pointer form: `/users/0/name`

use std::sync::OnceLock;

use regex::Regex;

use crate::types::PathSegment;
use crate::util::escape_component;

fn identifier_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap())
}

/// True when `key` can be written after a `.` in display form.
pub fn is_identifier(key: &str) -> bool {
    identifier_regex().is_match(key)
}

/// Join every segment with `.`.
///
/// Stable and total, but an object key `"0"` and an array index `0` produce
/// the same text. Use the [`Path`](crate::Path) itself where identity matters.
///
/// ```
/// use json_lens_path::{path, to_map_key};
///
/// assert_eq!(to_map_key(&path!["users", 0, "name"]), "users.0.name");
/// assert_eq!(to_map_key(&[]), "");
/// ```
pub fn to_map_key(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for (i, seg) in path.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        match seg {
            PathSegment::Index(idx) => out.push_str(&idx.to_string()),
            PathSegment::Key(key) => out.push_str(key),
        }
    }
    out
}

/// Human-readable form for copying.
///
/// The first segment is written bare; later indices as `[n]`, identifier keys
/// as `.key`, anything else as `["key"]`.
///
/// ```
/// use json_lens_path::{path, to_display};
///
/// assert_eq!(to_display(&path!["users", 0, "name"]), "users[0].name");
/// assert_eq!(to_display(&path!["a", "b-c"]), "a[\"b-c\"]");
/// assert_eq!(to_display(&[]), "");
/// ```
pub fn to_display(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for (i, seg) in path.iter().enumerate() {
        match seg {
            PathSegment::Index(idx) if i == 0 => out.push_str(&idx.to_string()),
            PathSegment::Key(key) if i == 0 => out.push_str(key),
            PathSegment::Index(idx) => {
                out.push('[');
                out.push_str(&idx.to_string());
                out.push(']');
            }
            PathSegment::Key(key) if is_identifier(key) => {
                out.push('.');
                out.push_str(key);
            }
            PathSegment::Key(key) => {
                out.push_str("[\"");
                out.push_str(key);
                out.push_str("\"]");
            }
        }
    }
    out
}

/// Format a path as a JSON Pointer (RFC 6901).
///
/// Returns an empty string for the root path.
///
/// ```
/// use json_lens_path::{path, to_json_pointer};
///
/// assert_eq!(to_json_pointer(&path!["a/b", 0]), "/a~1b/0");
/// assert_eq!(to_json_pointer(&[]), "");
/// ```
pub fn to_json_pointer(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for seg in path {
        out.push('/');
        match seg {
            PathSegment::Index(idx) => out.push_str(&idx.to_string()),
            PathSegment::Key(key) => out.push_str(&escape_component(key)),
        }
    }
    out
}
