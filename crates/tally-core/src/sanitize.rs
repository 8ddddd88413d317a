//! JSON-safe normalization of non-finite and missing values.
//!
//! Spreadsheet-ingested records routinely carry NaN / ±Infinity numbers and
//! nulls, none of which survive strict JSON serialization unchanged. Every
//! read path pushes records through [`sanitize`] before responding.
//!
//! Two substitute conventions exist across the API and are deliberately kept
//! as distinct named policies rather than unified: the asset listing replaces
//! non-finite numbers with `0` and nulls with `"N/A"`, while the unassigned
//! and employee-index reports replace all of them with JSON `null`. Existing
//! clients depend on the specific convention of the endpoint they call.

use serde_json::Value as JsonValue;

use crate::value::{Document, FieldValue};

/// Substitute convention applied to non-finite numbers and nulls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizePolicy {
    /// Listing convention: NaN/±Infinity become `0`, null becomes `"N/A"`.
    ZeroWithPlaceholder,
    /// Reporting convention: NaN/±Infinity become `null`, null stays `null`.
    NullForAny,
}

impl SanitizePolicy {
    fn non_finite_substitute(self) -> JsonValue {
        match self {
            SanitizePolicy::ZeroWithPlaceholder => JsonValue::from(0),
            SanitizePolicy::NullForAny => JsonValue::Null,
        }
    }

    fn null_substitute(self) -> JsonValue {
        match self {
            SanitizePolicy::ZeroWithPlaceholder => JsonValue::from("N/A"),
            SanitizePolicy::NullForAny => JsonValue::Null,
        }
    }
}

/// Recursively convert a value into JSON, substituting non-finite numbers
/// and nulls per `policy`. Always returns a fresh copy; all other values
/// pass through unchanged.
pub fn sanitize(value: &FieldValue, policy: SanitizePolicy) -> JsonValue {
    match value {
        FieldValue::Null => policy.null_substitute(),
        FieldValue::Bool(b) => JsonValue::Bool(*b),
        FieldValue::Number(n) if !n.is_finite() => policy.non_finite_substitute(),
        FieldValue::Number(n) => serde_json::Number::from_f64(*n)
            .map(JsonValue::Number)
            .unwrap_or_else(|| policy.non_finite_substitute()),
        FieldValue::String(s) => JsonValue::String(s.clone()),
        FieldValue::Array(items) => {
            JsonValue::Array(items.iter().map(|v| sanitize(v, policy)).collect())
        }
        FieldValue::Map(map) => JsonValue::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), sanitize(v, policy)))
                .collect(),
        ),
    }
}

/// Sanitize a whole document into a JSON object.
pub fn sanitize_document(
    doc: &Document,
    policy: SanitizePolicy,
) -> serde_json::Map<String, JsonValue> {
    doc.iter()
        .map(|(k, v)| (k.clone(), sanitize(v, policy)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::document_from_json;
    use serde_json::json;

    fn nested_fixture() -> FieldValue {
        let mut inner = indexmap::IndexMap::new();
        inner.insert("price".to_string(), FieldValue::Number(f64::NAN));
        inner.insert("qty".to_string(), FieldValue::Number(3.0));

        let mut outer = indexmap::IndexMap::new();
        outer.insert("name".to_string(), FieldValue::from("Desk"));
        outer.insert("missing".to_string(), FieldValue::Null);
        outer.insert(
            "specs".to_string(),
            FieldValue::Array(vec![
                FieldValue::Number(f64::INFINITY),
                FieldValue::from("wood"),
                FieldValue::Map(inner),
            ]),
        );
        FieldValue::Map(outer)
    }

    #[test]
    fn test_null_for_any_flattens_non_finite_to_null() {
        let out = sanitize(&nested_fixture(), SanitizePolicy::NullForAny);
        assert_eq!(
            out,
            json!({
                "name": "Desk",
                "missing": null,
                "specs": [null, "wood", {"price": null, "qty": 3.0}]
            })
        );
    }

    #[test]
    fn test_zero_with_placeholder_substitutes_zero_and_na() {
        let out = sanitize(&nested_fixture(), SanitizePolicy::ZeroWithPlaceholder);
        assert_eq!(
            out,
            json!({
                "name": "Desk",
                "missing": "N/A",
                "specs": [0, "wood", {"price": 0, "qty": 3.0}]
            })
        );
    }

    #[test]
    fn test_ordinary_values_pass_through() {
        let doc = document_from_json(json!({
            "Material Name": "Chair",
            "Total Price": 1299.5,
            "In Use": true
        }))
        .unwrap();

        for policy in [SanitizePolicy::ZeroWithPlaceholder, SanitizePolicy::NullForAny] {
            let out = sanitize_document(&doc, policy);
            assert_eq!(out["Material Name"], json!("Chair"));
            assert_eq!(out["Total Price"], json!(1299.5));
            assert_eq!(out["In Use"], json!(true));
        }
    }

    #[test]
    fn test_sanitize_preserves_field_order() {
        let doc = document_from_json(json!({"z": 1.0, "a": 2.0, "m": 3.0})).unwrap();
        let out = sanitize_document(&doc, SanitizePolicy::NullForAny);
        let keys: Vec<&str> = out.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_negative_infinity_handled() {
        let v = FieldValue::Number(f64::NEG_INFINITY);
        assert_eq!(sanitize(&v, SanitizePolicy::ZeroWithPlaceholder), json!(0));
        assert_eq!(sanitize(&v, SanitizePolicy::NullForAny), json!(null));
    }
}
