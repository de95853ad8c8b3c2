//! Query result types

use serde::Serialize;
use tollsats_common::model::{Country, RateType};

/// Outcome of a best-origin query for a code that has rate data.
///
/// A code with no rate data at all is represented by `None` at the facade
/// level, distinct from both variants here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BestOrigin {
    /// No preferential agreement undercuts the ordinary rate.
    NoAgreements,
    /// Countries of every agreement group tied at the minimum rate.
    Cheapest {
        countries: Vec<Country>,
        min_value: f64,
        rate_type: RateType,
        unit: Option<String>,
    },
}

/// One classifier's agreement groups, expanded to countries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgreementEntry {
    /// Raw classifier label from the agreement index
    pub agreement: String,
    /// Resolved display name, falling back to the raw label
    pub agreement_name: String,
    pub countries: Vec<Country>,
}

/// All trade agreements applicable to one code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeAgreements {
    pub code: String,
    pub agreements: Vec<AgreementEntry>,
}
