//! Zero-duty view
//!
//! Derived from the aggregated rate index: for each commodity code, the
//! agreement groups whose retained minimum duty is exactly zero. Codes
//! without any zero-duty group are absent from the view.

use tollsats_common::model::{RateIndex, ZeroDutyGroup, ZeroDutyIndex};

pub fn zero_duty_view(rates: &RateIndex) -> ZeroDutyIndex {
    let mut out = ZeroDutyIndex::new();
    for (code, entry) in rates {
        let groups: Vec<ZeroDutyGroup> = entry
            .agreements
            .iter()
            .filter(|a| a.value == 0.0)
            .map(|a| ZeroDutyGroup {
                code: a.code.clone(),
                rate_type: a.rate_type,
                unit: a.unit.clone(),
            })
            .collect();
        if !groups.is_empty() {
            out.insert(code.clone(), groups);
        }
    }
    out
}
