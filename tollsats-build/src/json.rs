//! JSON field coercion helpers for irregular source documents
//!
//! The government datasets are loosely typed: identifiers show up as
//! strings or numbers, list fields occasionally hold a single object, and
//! whole records may be malformed. These helpers normalize without failing.

use serde_json::Value;

/// Coerce a JSON value to a trimmed, non-empty string.
///
/// Strings are trimmed, numbers are formatted; everything else (and text
/// that is empty after trimming) yields `None` so callers can chain
/// fallbacks.
pub(crate) fn coerce_string(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// First non-empty string among the named fields of a JSON object.
pub(crate) fn first_string(
    fields: &serde_json::Map<String, Value>,
    keys: &[&str],
) -> Option<String> {
    keys.iter().find_map(|key| coerce_string(fields.get(*key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_string_trims_and_rejects_empty() {
        assert_eq!(
            coerce_string(Some(&json!("  0712  "))),
            Some("0712".to_string())
        );
        assert_eq!(coerce_string(Some(&json!("   "))), None);
        assert_eq!(coerce_string(Some(&json!(null))), None);
        assert_eq!(coerce_string(None), None);
    }

    #[test]
    fn test_coerce_string_formats_numbers() {
        assert_eq!(coerce_string(Some(&json!(7129090))), Some("7129090".to_string()));
    }

    #[test]
    fn test_first_string_falls_through_keys() {
        let value = json!({ "kode": "", "id": "TGB" });
        let fields = value.as_object().unwrap();
        assert_eq!(
            first_string(fields, &["kode", "id"]),
            Some("TGB".to_string())
        );
    }
}
