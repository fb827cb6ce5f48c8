//! json-lens-util - shared value model for json-lens
//!
//! Holds the immutable, reference-counted [`JsonValue`] every other json-lens
//! crate operates on, plus equality and display helpers.

pub mod json_equal;
pub mod strings;
pub mod value;

// Re-exports for convenience
pub use json_equal::{deep_equal, numbers_equal};
pub use strings::{preview, render_scalar, truncate_chars, PREVIEW_STRING_CHARS};
pub use value::{JsonMap, JsonType, JsonValue};
