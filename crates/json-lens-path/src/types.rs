//! Type definitions for paths.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A step in a path.
///
/// Either an object key or an array index. The two never compare equal, so a
/// [`Path`] is an unambiguous key even when an object key looks numeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

/// A location inside a JSON value, root first.
pub type Path = Vec<PathSegment>;

impl PathSegment {
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathSegment::Key(k) => Some(k.as_str()),
            PathSegment::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::Index(i) => Some(*i),
            PathSegment::Key(_) => None,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(i) => write!(f, "{i}"),
            PathSegment::Key(k) => f.write_str(k),
        }
    }
}

impl From<usize> for PathSegment {
    fn from(i: usize) -> Self {
        PathSegment::Index(i)
    }
}

impl From<&str> for PathSegment {
    fn from(k: &str) -> Self {
        PathSegment::Key(k.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(k: String) -> Self {
        PathSegment::Key(k)
    }
}

/// Build a [`Path`] from keys and indices.
///
/// ```
/// use json_lens_path::{path, PathSegment};
///
/// let p = path!["users", 0, "name"];
/// assert_eq!(p[1], PathSegment::Index(0));
/// assert!(path![].is_empty());
/// ```
#[macro_export]
macro_rules! path {
    () => { $crate::Path::new() };
    ($($seg:expr),+ $(,)?) => {
        vec![$($crate::PathSegment::from($seg)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_and_index_never_collide() {
        assert_ne!(PathSegment::from("0"), PathSegment::from(0usize));
        let a: Path = path!["0"];
        let b: Path = path![0usize];
        assert_ne!(a, b);
    }

    #[test]
    fn integer_literals_become_indices() {
        let p = path!["a", 2];
        assert_eq!(p, vec![PathSegment::Key("a".into()), PathSegment::Index(2)]);
    }

    #[test]
    fn serde_is_untagged() {
        let p = path!["a", 1];
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"["a",1]"#);
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
