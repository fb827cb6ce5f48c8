//! Typed paths into JSON values.
//!
//! A [`Path`] is a list of [`PathSegment`]s, each an object key or an array
//! index. Paths are `Hash + Eq`, so they are used directly as set and map keys.
//! String forms exist for people and for interop:
//!
//! - [`to_map_key`]: `users.0.name`
//! - [`to_display`]: `users[0].name`
//! - [`to_json_pointer`]: `/users/0/name`
//!
//! # Example
//!
//! ```
//! use json_lens_path::{get, path, to_display};
//! use json_lens_util::JsonValue;
//! use serde_json::json;
//!
//! let doc = JsonValue::from(json!({"users": [{"name": "ada"}]}));
//! let p = path!["users", 0, "name"];
//! assert_eq!(get(&doc, &p), Some(&JsonValue::from("ada")));
//! assert_eq!(to_display(&p), "users[0].name");
//! ```

use thiserror::Error;

pub mod format;
pub mod get;
pub mod types;
pub mod util;

pub use format::{is_identifier, to_display, to_json_pointer, to_map_key};
pub use get::{get, resolve_pointer};
pub use types::{Path, PathSegment};
pub use util::{
    ancestors, escape_component, is_child, is_root, is_valid_index, parent, parse_json_pointer,
    unescape_component,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("NO_PARENT")]
    NoParent,
    #[error("POINTER_INVALID: {0}")]
    InvalidPointer(String),
}
