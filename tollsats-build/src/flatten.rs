//! Tariff tree flattener
//!
//! The customs tariff structure file is an arbitrarily deep tree in which
//! container nodes nest children under any of five collection fields, and a
//! `type == "commodity"` leaf carries the code. Flattening walks the tree
//! depth-first and emits one search entry per distinct code.

use crate::json::coerce_string;
use serde_json::Value;
use std::collections::HashSet;
use tollsats_common::model::CommodityEntry;

/// Child-collection fields, visited in this fixed order.
const CHILD_KEYS: [&str; 5] = [
    "sections",
    "chapters",
    "divisions",
    "headings",
    "subchapters",
];

/// Flatten the structure document into deduplicated search entries.
///
/// Duplicate codes keep their first occurrence; traversal order is
/// otherwise preserved. Malformed nodes contribute nothing.
pub fn flatten_structure(doc: &Value) -> Vec<CommodityEntry> {
    let mut raw = Vec::new();
    if let Some(sections) = doc.get("sections") {
        walk(sections, &mut raw);
    }

    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for entry in raw {
        if seen.insert(entry.code.clone()) {
            entries.push(entry);
        }
    }
    entries
}

fn walk(node: &Value, out: &mut Vec<CommodityEntry>) {
    match node {
        Value::Array(items) => {
            for item in items {
                walk(item, out);
            }
        }
        Value::Object(fields) => {
            if fields.get("type").and_then(Value::as_str) == Some("commodity") {
                let code = coerce_string(fields.get("id"))
                    .or_else(|| coerce_string(fields.get("hsNumber")))
                    .unwrap_or_default();
                let name = coerce_string(fields.get("item")).unwrap_or_default();
                if !code.is_empty() {
                    out.push(CommodityEntry {
                        code,
                        name,
                        description: String::new(),
                    });
                }
            }
            // A child field may hold an array or a single object; walk()
            // handles both shapes.
            for key in CHILD_KEYS {
                if let Some(child) = fields.get(key) {
                    walk(child, out);
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flattens_nested_tree_depth_first() {
        let doc = json!({
            "sections": [
                {
                    "type": "section",
                    "chapters": [
                        {
                            "type": "chapter",
                            "headings": [
                                { "type": "commodity", "id": "07129090", "item": "Dried vegetables" },
                                { "type": "commodity", "id": "07020000", "item": "Tomatoes" }
                            ]
                        }
                    ]
                },
                { "type": "commodity", "id": "25081000", "item": "Bentonite" }
            ]
        });
        let entries = flatten_structure(&doc);
        let codes: Vec<&str> = entries.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, ["07129090", "07020000", "25081000"]);
    }

    #[test]
    fn test_duplicate_codes_keep_first_occurrence() {
        let doc = json!({
            "sections": [
                { "type": "commodity", "id": "07129090", "item": "First" },
                { "type": "commodity", "id": "07129090", "item": "Second" }
            ]
        });
        let entries = flatten_structure(&doc);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "First");
    }

    #[test]
    fn test_single_object_child_is_treated_as_sequence() {
        let doc = json!({
            "sections": {
                "type": "section",
                "chapters": {
                    "type": "commodity",
                    "id": "01012100",
                    "item": "Pure-bred breeding horses"
                }
            }
        });
        let entries = flatten_structure(&doc);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].code, "01012100");
    }

    #[test]
    fn test_hs_number_fallback_when_id_missing_or_blank() {
        let doc = json!({
            "sections": [
                { "type": "commodity", "hsNumber": "0101", "item": "Horses" },
                { "type": "commodity", "id": "  ", "hsNumber": "0102", "item": "Cattle" }
            ]
        });
        let entries = flatten_structure(&doc);
        let codes: Vec<&str> = entries.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, ["0101", "0102"]);
    }

    #[test]
    fn test_numeric_id_is_coerced_to_string() {
        let doc = json!({
            "sections": [
                { "type": "commodity", "id": 7129090, "item": "Dried vegetables" }
            ]
        });
        let entries = flatten_structure(&doc);
        assert_eq!(entries[0].code, "7129090");
    }

    #[test]
    fn test_blank_code_contributes_nothing() {
        let doc = json!({
            "sections": [
                { "type": "commodity", "item": "No code at all" },
                { "type": "commodity", "id": " ", "hsNumber": "", "item": "Blank code" }
            ]
        });
        assert!(flatten_structure(&doc).is_empty());
    }

    #[test]
    fn test_non_object_nodes_are_skipped() {
        let doc = json!({
            "sections": [
                "stray string",
                42,
                null,
                { "type": "commodity", "id": "0901", "item": "Coffee" }
            ]
        });
        let entries = flatten_structure(&doc);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_names_are_trimmed() {
        let doc = json!({
            "sections": [
                { "type": "commodity", "id": " 0901 ", "item": "  Coffee  " }
            ]
        });
        let entries = flatten_structure(&doc);
        assert_eq!(entries[0].code, "0901");
        assert_eq!(entries[0].name, "Coffee");
    }

    #[test]
    fn test_missing_sections_yields_empty_index() {
        assert!(flatten_structure(&json!({})).is_empty());
        assert!(flatten_structure(&json!([1, 2, 3])).is_empty());
    }
}
