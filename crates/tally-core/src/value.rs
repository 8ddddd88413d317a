//! Schema-less document value model.
//!
//! Asset records carry no declared schema: fields appear and disappear per
//! record, and numeric fields produced by spreadsheet ingestion can
//! legitimately hold NaN or ±Infinity. `serde_json::Value` cannot represent
//! non-finite floats, so documents are held as [`FieldValue`] trees inside
//! the store and only become JSON at the response boundary, after
//! sanitization (see [`crate::sanitize`]).

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// An asset record: an insertion-ordered mapping from field name to value.
pub type Document = IndexMap<String, FieldValue>;

/// A single field value inside a schema-less document.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    /// All numbers are held as f64; non-finite values are representable
    /// here (unlike in `serde_json::Value`) and normalized on output.
    Number(f64),
    String(String),
    Array(Vec<FieldValue>),
    Map(IndexMap<String, FieldValue>),
}

impl FieldValue {
    /// True when the value carries no usable information: null, or a
    /// non-finite number.
    pub fn is_no_value(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Number(n) => !n.is_finite(),
            _ => false,
        }
    }

    /// String view, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view, if this is a number (finite or not).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// True for the exact empty string.
    pub fn is_empty_string(&self) -> bool {
        matches!(self, FieldValue::String(s) if s.is_empty())
    }

    /// Lossy JSON conversion: non-finite numbers become JSON null.
    ///
    /// Response paths must sanitize first; this conversion exists for
    /// ingestion round-trips and diagnostics where a policy choice has
    /// already been applied or does not matter.
    pub fn to_json(&self) -> JsonValue {
        match self {
            FieldValue::Null => JsonValue::Null,
            FieldValue::Bool(b) => JsonValue::Bool(*b),
            FieldValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            FieldValue::String(s) => JsonValue::String(s.clone()),
            FieldValue::Array(items) => {
                JsonValue::Array(items.iter().map(FieldValue::to_json).collect())
            }
            FieldValue::Map(map) => JsonValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<JsonValue> for FieldValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => FieldValue::Null,
            JsonValue::Bool(b) => FieldValue::Bool(b),
            JsonValue::Number(n) => FieldValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            JsonValue::String(s) => FieldValue::String(s),
            JsonValue::Array(items) => {
                FieldValue::Array(items.into_iter().map(FieldValue::from).collect())
            }
            JsonValue::Object(map) => FieldValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, FieldValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

/// Build a [`Document`] from a JSON object. Returns `None` for non-objects.
pub fn document_from_json(value: JsonValue) -> Option<Document> {
    match value {
        JsonValue::Object(map) => Some(
            map.into_iter()
                .map(|(k, v)| (k, FieldValue::from(v)))
                .collect(),
        ),
        _ => None,
    }
}
