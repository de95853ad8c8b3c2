//! Agreement index builder
//!
//! Maps each commodity code to the trade-agreement groups listed under each
//! duty classifier in the raw `ratetradeagreements.json` dataset. The
//! resulting index is what gets chapter-partitioned for the client.

use crate::json::coerce_string;
use serde_json::Value;
use tollsats_common::model::AgreementIndex;

/// Build the per-code agreement index from the raw FTA document.
///
/// Rows with an empty classifier or a non-list `landCodes` are skipped;
/// land codes are deduplicated per classifier, first occurrence wins.
pub fn build_agreement_index(doc: &Value) -> AgreementIndex {
    let mut out = AgreementIndex::new();
    let commodities = doc
        .get("commodities")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for row in commodities {
        let Some(fields) = row.as_object() else {
            continue;
        };
        let Some(code) = coerce_string(fields.get("id")) else {
            continue;
        };
        let classifiers = out.entry(code).or_default();

        let rate_agreements = fields
            .get("rateTradeAgreements")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for agreement in rate_agreements {
            let classifier = agreement
                .get("customDuty")
                .and_then(|duty| duty.get("classifier"))
                .and_then(Value::as_str)
                .unwrap_or("");
            if classifier.is_empty() {
                continue;
            }
            let Some(land_codes) = agreement.get("landCodes").and_then(Value::as_array) else {
                continue;
            };
            let groups = classifiers.entry(classifier.to_string()).or_default();
            for land_code in land_codes {
                let Some(land_code) = land_code.as_str() else {
                    continue;
                };
                if !land_code.is_empty() && !groups.iter().any(|g| g == land_code) {
                    groups.push(land_code.to_string());
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_groups_by_classifier() {
        let doc = json!({ "commodities": [
            {
                "id": "07129090",
                "rateTradeAgreements": [
                    { "customDuty": { "classifier": "FREE" }, "landCodes": ["EU", "EFTA"] },
                    { "customDuty": { "classifier": "NA" }, "landCodes": ["GSP"] }
                ]
            }
        ] });
        let index = build_agreement_index(&doc);
        let entry = &index["07129090"];
        assert_eq!(entry["FREE"], vec!["EU", "EFTA"]);
        assert_eq!(entry["NA"], vec!["GSP"]);
    }

    #[test]
    fn test_land_codes_deduplicate_across_rows() {
        let doc = json!({ "commodities": [
            {
                "id": "0712",
                "rateTradeAgreements": [
                    { "customDuty": { "classifier": "FREE" }, "landCodes": ["EU"] },
                    { "customDuty": { "classifier": "FREE" }, "landCodes": ["EU", "GB"] }
                ]
            }
        ] });
        let index = build_agreement_index(&doc);
        assert_eq!(index["0712"]["FREE"], vec!["EU", "GB"]);
    }

    #[test]
    fn test_empty_classifier_and_bad_land_codes_are_skipped() {
        let doc = json!({ "commodities": [
            {
                "id": "0712",
                "rateTradeAgreements": [
                    { "customDuty": { "classifier": "" }, "landCodes": ["EU"] },
                    { "customDuty": { "classifier": "FREE" }, "landCodes": "EU" },
                    { "landCodes": ["EU"] }
                ]
            }
        ] });
        let index = build_agreement_index(&doc);
        // The code still appears, with no classifiers
        assert!(index["0712"].is_empty());
    }

    #[test]
    fn test_codes_without_id_are_skipped() {
        let doc = json!({ "commodities": [
            { "rateTradeAgreements": [] },
            { "id": "", "rateTradeAgreements": [] },
            "not an object"
        ] });
        assert!(build_agreement_index(&doc).is_empty());
    }

    #[test]
    fn test_numeric_id_is_coerced() {
        let doc = json!({ "commodities": [
            { "id": 7129090, "rateTradeAgreements": [
                { "customDuty": { "classifier": "FREE" }, "landCodes": ["IN"] }
            ] }
        ] });
        let index = build_agreement_index(&doc);
        assert_eq!(index["7129090"]["FREE"], vec!["IN"]);
    }
}
