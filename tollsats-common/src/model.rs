//! Core data model shared by the build pipeline and the lookup facade
//!
//! Every artifact written by the build is read back by the lookup side, so
//! both use these serde shapes. Emitted maps are `BTreeMap` so output bytes
//! are deterministic across runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Landgroup codes that carry the ordinary (non-preferential) duty rate.
pub const ORDINARY_GROUPS: [&str; 3] = ["TAL", "TALL", "ALLE"];

/// One searchable commodity classification entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommodityEntry {
    /// Government-assigned hierarchical tariff code
    pub code: String,
    /// Commodity item name
    pub name: String,
    /// Longer description (empty in current upstream data)
    #[serde(default)]
    pub description: String,
}

/// How a duty rate is denominated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateType {
    Percent,
    PerKg,
    PerItem,
}

impl RateType {
    /// Map a raw `satsEnhet` unit code to a rate type and display unit.
    ///
    /// `P` is an ad valorem percentage, `K` is NOK per kilogram, anything
    /// else is a per-item amount.
    pub fn from_unit_code(unit_code: &str) -> (Self, Option<String>) {
        match unit_code {
            "P" => (Self::Percent, None),
            "K" => (Self::PerKg, Some("kg".to_string())),
            _ => (Self::PerItem, None),
        }
    }
}

/// One minimum duty rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRecord {
    pub value: f64,
    pub rate_type: RateType,
    pub unit: Option<String>,
}

/// Minimum duty rate retained for one trade-agreement group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgreementRate {
    /// Landgroup code of the agreement
    pub code: String,
    pub value: f64,
    pub rate_type: RateType,
    pub unit: Option<String>,
}

/// Aggregated duty rates for one commodity code.
///
/// `ordinary` is the minimum over the baseline groups; `agreements` holds
/// the minimum per preferential group, in first-encounter order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeRates {
    pub ordinary: Option<RateRecord>,
    #[serde(default)]
    pub agreements: Vec<AgreementRate>,
}

/// Agreement group that charges zero duty for one commodity code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZeroDutyGroup {
    pub code: String,
    pub rate_type: RateType,
    pub unit: Option<String>,
}

/// One landgroup: display name plus member countries (ISO alpha-2).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Landgroup {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub countries: Vec<String>,
}

/// The `landgroups_map.json` reference table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandgroupMap {
    #[serde(default)]
    pub groups: BTreeMap<String, Landgroup>,
}

/// A country resolved to its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub iso: String,
    pub name: String,
}

/// Rate index artifact: code -> aggregated rates.
pub type RateIndex = BTreeMap<String, CodeRates>;

/// Agreement index artifact: code -> classifier -> landgroup codes.
pub type AgreementIndex = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Zero-duty artifact: code -> agreement groups charging zero duty.
pub type ZeroDutyIndex = BTreeMap<String, Vec<ZeroDutyGroup>>;

/// Country-name reference table: ISO alpha-2 -> display name.
pub type CountryNames = BTreeMap<String, String>;
