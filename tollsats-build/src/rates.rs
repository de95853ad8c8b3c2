//! Duty-rate aggregator
//!
//! Scans the `tollavgiftssats.json` item records and keeps, per commodity
//! code, the minimum ordinary duty rate and the minimum rate for each
//! preferential agreement group. Records that fail structural expectations
//! are dropped; the scan never aborts on one bad record.

use crate::json::coerce_string;
use serde::Deserialize;
use serde_json::Value;
use tollsats_common::model::{
    AgreementRate, CodeRates, RateIndex, RateRecord, RateType, ORDINARY_GROUPS,
};
use tollsats_common::numeric::parse_decimal_comma;

#[derive(Debug, Default, Deserialize)]
struct RatesFile {
    #[serde(default)]
    varer: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ItemRecord {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    avtalesatser: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct GroupRates {
    #[serde(default)]
    landgruppe: Option<String>,
    #[serde(default)]
    sats: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RateQuotation {
    #[serde(rename = "satsVerdi", default)]
    sats_verdi: Option<Value>,
    #[serde(rename = "satsEnhet", default)]
    sats_enhet: Option<String>,
}

/// Aggregate the duty-rate document into a per-code rate index.
///
/// A code appears in the output only when at least one of its quotations
/// survives parsing; agreement groups keep their first-encounter order.
pub fn aggregate_rates(doc: Value) -> RateIndex {
    let file: RatesFile = serde_json::from_value(doc).unwrap_or_default();

    let mut index = RateIndex::new();
    let mut skipped_records = 0usize;

    for raw_item in file.varer {
        let Ok(item) = serde_json::from_value::<ItemRecord>(raw_item) else {
            skipped_records += 1;
            continue;
        };
        let Some(code) = coerce_string(item.id.as_ref()) else {
            continue;
        };

        for raw_group in item.avtalesatser {
            let Ok(group_rates) = serde_json::from_value::<GroupRates>(raw_group) else {
                continue;
            };
            let group = group_rates
                .landgruppe
                .as_deref()
                .unwrap_or("")
                .trim()
                .to_string();
            if group.is_empty() {
                continue;
            }
            let is_ordinary = ORDINARY_GROUPS.contains(&group.as_str());

            for raw_quotation in group_rates.sats {
                let Ok(quotation) = serde_json::from_value::<RateQuotation>(raw_quotation) else {
                    continue;
                };
                let Some(value) = coerce_string(quotation.sats_verdi.as_ref())
                    .and_then(|s| parse_decimal_comma(&s))
                else {
                    continue;
                };
                let unit_code = quotation.sats_enhet.as_deref().unwrap_or("").trim();
                if unit_code.is_empty() {
                    continue;
                }
                let (rate_type, unit) = RateType::from_unit_code(unit_code);

                // The entry is created on the first retained quotation, so
                // codes whose quotations all fail parsing never appear.
                let entry = index.entry(code.clone()).or_insert_with(CodeRates::default);
                if is_ordinary {
                    let beats_current = entry
                        .ordinary
                        .as_ref()
                        .map_or(true, |current| value < current.value);
                    if beats_current {
                        entry.ordinary = Some(RateRecord {
                            value,
                            rate_type,
                            unit,
                        });
                    }
                } else {
                    match entry.agreements.iter_mut().find(|a| a.code == group) {
                        Some(existing) => {
                            if value < existing.value {
                                existing.value = value;
                                existing.rate_type = rate_type;
                                existing.unit = unit;
                            }
                        }
                        None => entry.agreements.push(AgreementRate {
                            code: group.clone(),
                            value,
                            rate_type,
                            unit,
                        }),
                    }
                }
            }
        }
    }

    if skipped_records > 0 {
        tracing::warn!("Skipped {} malformed rate records", skipped_records);
    }
    index
}
