//! Escaping and path relationships.

use crate::types::{Path, PathSegment};
use crate::PathError;

/// Unescapes a JSON Pointer path component.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 before ~0
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse a JSON Pointer string into raw, untyped steps.
///
/// # Errors
///
/// Returns [`PathError::InvalidPointer`] when a non-empty pointer does not
/// start with `/`.
///
/// ```
/// use json_lens_path::parse_json_pointer;
///
/// assert_eq!(parse_json_pointer("").unwrap(), Vec::<String>::new());
/// assert_eq!(parse_json_pointer("/a~1b/0").unwrap(), vec!["a/b", "0"]);
/// assert!(parse_json_pointer("a").is_err());
/// ```
pub fn parse_json_pointer(pointer: &str) -> Result<Vec<String>, PathError> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    let Some(rest) = pointer.strip_prefix('/') else {
        return Err(PathError::InvalidPointer(pointer.to_string()));
    };
    Ok(rest.split('/').map(unescape_component).collect())
}

/// Check if a string represents a valid non-negative integer array index.
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

/// Check if a path points to the root value.
pub fn is_root(path: &[PathSegment]) -> bool {
    path.is_empty()
}

/// Check if `parent` is a strict prefix of `child`.
///
/// ```
/// use json_lens_path::{is_child, path};
///
/// assert!(is_child(&path!["a"], &path!["a", 0]));
/// assert!(!is_child(&path!["a", 0], &path!["a"]));
/// assert!(is_child(&[], &path!["a"]));
/// ```
pub fn is_child(parent: &[PathSegment], child: &[PathSegment]) -> bool {
    parent.len() < child.len() && child.starts_with(parent)
}

/// Get the parent path of a given path.
///
/// # Errors
///
/// Returns [`PathError::NoParent`] for the root path.
pub fn parent(path: &[PathSegment]) -> Result<Path, PathError> {
    match path.split_last() {
        Some((_, init)) => Ok(init.to_vec()),
        None => Err(PathError::NoParent),
    }
}

/// Every strict prefix of `path`, root (`[]`) first.
///
/// ```
/// use json_lens_path::{ancestors, path};
///
/// let all: Vec<_> = ancestors(&path!["a", 1]).collect();
/// assert_eq!(all, vec![path![], path!["a"]]);
/// ```
pub fn ancestors(path: &[PathSegment]) -> impl Iterator<Item = Path> + '_ {
    (0..path.len()).map(move |len| path[..len].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;

    #[test]
    fn escape_roundtrip() {
        for raw in ["", "plain", "a~b", "c/d", "~/~1"] {
            assert_eq!(unescape_component(&escape_component(raw)), raw);
        }
    }

    #[test]
    fn parse_slash_only_is_empty_key() {
        assert_eq!(parse_json_pointer("/").unwrap(), vec![""]);
    }

    #[test]
    fn parse_rejects_relative() {
        assert_eq!(
            parse_json_pointer("foo/bar"),
            Err(PathError::InvalidPointer("foo/bar".into()))
        );
    }

    #[test]
    fn valid_indices() {
        assert!(is_valid_index("0"));
        assert!(is_valid_index("123"));
        assert!(!is_valid_index("01"));
        assert!(!is_valid_index("-1"));
        assert!(!is_valid_index("1.5"));
        assert!(!is_valid_index(""));
    }

    #[test]
    fn parent_of_root_fails() {
        assert_eq!(parent(&[]), Err(PathError::NoParent));
        assert_eq!(parent(&path!["a", 0]).unwrap(), path!["a"]);
    }

    #[test]
    fn root_has_no_ancestors() {
        assert_eq!(ancestors(&[]).count(), 0);
        assert!(is_root(&[]));
    }

    #[test]
    fn path_is_not_its_own_child() {
        let p = path!["a", "b"];
        assert!(!is_child(&p, &p));
    }
}
