//! Immutable JSON value with shared subtrees.
//!
//! Containers hold their children behind an [`Arc`], so cloning a value is a
//! reference-count bump and edits can rebuild only the spine they touch.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Number;

/// Insertion-ordered object storage.
pub type JsonMap = IndexMap<String, JsonValue>;

/// A JSON document node.
#[derive(Debug, Clone, Default)]
pub enum JsonValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(Arc<str>),
    Array(Arc<Vec<JsonValue>>),
    Object(Arc<JsonMap>),
}

/// The kind tag of a [`JsonValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl JsonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonType::Null => "null",
            JsonType::Boolean => "boolean",
            JsonType::Number => "number",
            JsonType::String => "string",
            JsonType::Array => "array",
            JsonType::Object => "object",
        }
    }

    /// Arrays and objects; everything else is a leaf.
    pub fn is_container(&self) -> bool {
        matches!(self, JsonType::Array | JsonType::Object)
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Constructors ──────────────────────────────────────────────────────────

impl JsonValue {
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        JsonValue::String(s.into())
    }

    pub fn array(items: Vec<JsonValue>) -> Self {
        JsonValue::Array(Arc::new(items))
    }

    pub fn object(map: JsonMap) -> Self {
        JsonValue::Object(Arc::new(map))
    }

    /// Parse JSON text, keeping object keys in document order.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

// ── Accessors ─────────────────────────────────────────────────────────────

impl JsonValue {
    pub fn json_type(&self) -> JsonType {
        match self {
            JsonValue::Null => JsonType::Null,
            JsonValue::Bool(_) => JsonType::Boolean,
            JsonValue::Number(_) => JsonType::Number,
            JsonValue::String(_) => JsonType::String,
            JsonValue::Array(_) => JsonType::Array,
            JsonValue::Object(_) => JsonType::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(&**s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&JsonMap> {
        match self {
            JsonValue::Object(map) => Some(&**map),
            _ => None,
        }
    }

    /// Array length or object key count; `None` for leaves.
    pub fn child_count(&self) -> Option<usize> {
        match self {
            JsonValue::Array(items) => Some(items.len()),
            JsonValue::Object(map) => Some(map.len()),
            _ => None,
        }
    }

    /// True when both values are the same allocation.
    ///
    /// Only containers and strings can share; scalars never do.
    pub fn ptr_eq(&self, other: &JsonValue) -> bool {
        match (self, other) {
            (JsonValue::Array(a), JsonValue::Array(b)) => Arc::ptr_eq(a, b),
            (JsonValue::Object(a), JsonValue::Object(b)) => Arc::ptr_eq(a, b),
            (JsonValue::String(a), JsonValue::String(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq for JsonValue {
    fn eq(&self, other: &Self) -> bool {
        crate::json_equal::deep_equal(self, other)
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

// ── Conversions ───────────────────────────────────────────────────────────

impl From<serde_json::Value> for JsonValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => JsonValue::Null,
            serde_json::Value::Bool(b) => JsonValue::Bool(b),
            serde_json::Value::Number(n) => JsonValue::Number(n),
            serde_json::Value::String(s) => JsonValue::String(s.into()),
            serde_json::Value::Array(items) => {
                JsonValue::array(items.into_iter().map(JsonValue::from).collect())
            }
            serde_json::Value::Object(map) => JsonValue::object(
                map.into_iter()
                    .map(|(k, v)| (k, JsonValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&JsonValue> for serde_json::Value {
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => serde_json::Value::Null,
            JsonValue::Bool(b) => serde_json::Value::Bool(*b),
            JsonValue::Number(n) => serde_json::Value::Number(n.clone()),
            JsonValue::String(s) => serde_json::Value::String(s.to_string()),
            JsonValue::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            JsonValue::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Bool(b)
    }
}

impl From<i64> for JsonValue {
    fn from(n: i64) -> Self {
        JsonValue::Number(n.into())
    }
}

impl From<u64> for JsonValue {
    fn from(n: u64) -> Self {
        JsonValue::Number(n.into())
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.into())
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        JsonValue::String(s.into())
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(items: Vec<JsonValue>) -> Self {
        JsonValue::array(items)
    }
}

impl From<JsonMap> for JsonValue {
    fn from(map: JsonMap) -> Self {
        JsonValue::object(map)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

impl Serialize for JsonValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JsonValue::Null => serializer.serialize_unit(),
            JsonValue::Bool(b) => serializer.serialize_bool(*b),
            JsonValue::Number(n) => n.serialize(serializer),
            JsonValue::String(s) => serializer.serialize_str(s),
            JsonValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            JsonValue::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, val) in map.iter() {
                    out.serialize_entry(key, val)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(JsonValue::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_keeps_key_order() {
        let v = JsonValue::parse(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<&str> = v.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn serde_json_roundtrip_is_lossless() {
        let src = json!({"a": [1, 2.5, null, true], "b": {"c": "d"}});
        let v = JsonValue::from(src.clone());
        assert_eq!(serde_json::Value::from(&v), src);
        assert_eq!(serde_json::to_value(&v).unwrap(), src);
    }

    #[test]
    fn clone_shares_children() {
        let v = JsonValue::from(json!({"a": [1, 2]}));
        let copy = v.clone();
        assert!(v.ptr_eq(&copy));
    }

    #[test]
    fn type_tags() {
        assert_eq!(JsonValue::Null.json_type().as_str(), "null");
        assert_eq!(JsonValue::from(true).json_type().as_str(), "boolean");
        assert_eq!(JsonValue::from(3i64).json_type().as_str(), "number");
        assert_eq!(JsonValue::from("x").json_type().as_str(), "string");
        assert_eq!(JsonValue::from(json!([])).json_type().as_str(), "array");
        assert_eq!(JsonValue::from(json!({})).json_type().as_str(), "object");
    }

    #[test]
    fn child_count_only_for_containers() {
        assert_eq!(JsonValue::from(json!([1, 2, 3])).child_count(), Some(3));
        assert_eq!(JsonValue::from(json!({"a": 1})).child_count(), Some(1));
        assert_eq!(JsonValue::from("abc").child_count(), None);
    }

    #[test]
    fn display_is_compact_json() {
        let v = JsonValue::from(json!({"a": [1, "x"]}));
        assert_eq!(v.to_string(), r#"{"a":[1,"x"]}"#);
    }
}
