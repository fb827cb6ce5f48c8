//! String utilities.
//!
//! Truncation and the one-line previews shown next to tree rows.

mod preview;

pub use preview::{preview, render_scalar, truncate_chars, PREVIEW_STRING_CHARS};
