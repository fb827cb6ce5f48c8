use crate::value::JsonValue;

/// Longest string body (in chars) a preview shows before eliding.
pub const PREVIEW_STRING_CHARS: usize = 40;

/// Keep the first `max` chars of `s`; the flag reports whether anything was cut.
pub fn truncate_chars(s: &str, max: usize) -> (String, bool) {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => (s[..byte_idx].to_string(), true),
        None => (s.to_string(), false),
    }
}

/// One-line summary of a value.
///
/// Strings are quoted and elided past [`PREVIEW_STRING_CHARS`], scalars print
/// literally, and containers show `[]`/`Array(n)` or `{}`/`Object(n)`.
///
/// ```
/// use json_lens_util::{preview, JsonValue};
/// use serde_json::json;
///
/// assert_eq!(preview(&JsonValue::from(json!([1, 2]))), "Array(2)");
/// assert_eq!(preview(&JsonValue::from(json!({}))), "{}");
/// assert_eq!(preview(&JsonValue::from("hi")), "\"hi\"");
/// ```
pub fn preview(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "null".to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => {
            let (head, cut) = truncate_chars(s, PREVIEW_STRING_CHARS);
            if cut {
                format!("\"{head}…\"")
            } else {
                format!("\"{head}\"")
            }
        }
        JsonValue::Array(items) if items.is_empty() => "[]".to_string(),
        JsonValue::Array(items) => format!("Array({})", items.len()),
        JsonValue::Object(map) if map.is_empty() => "{}".to_string(),
        JsonValue::Object(map) => format!("Object({})", map.len()),
    }
}

/// Plain-text rendering of a leaf, as matched by search.
///
/// Returns `None` for arrays and objects.
pub fn render_scalar(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => Some("null".to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::String(s) => Some(s.to_string()),
        JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}
