//! Landgroup alias resolution and country expansion
//!
//! Upstream datasets name the same country groups two ways: the FTA dataset
//! uses short labels ("EU", "GSP+") while the duty-rate dataset uses
//! landgruppe codes ("EUE", "TGSP"). The resolver translates through a
//! fixed alias table, then expands a group into its member countries with
//! display names from the country-name table.

use crate::model::{Country, CountryNames, LandgroupMap};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// FTA land-code aliases to canonical landgruppe codes.
static GROUP_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("EU", "EUE"),
        ("EEA", "TOES"),
        ("EFTA", "TEF"),
        ("GB", "TUK"),
        ("IN", "TIN"),
        ("MD", "TMD"),
        ("GSP", "TGB"),
        ("GSP+", "TGSP"),
        ("GSP-LDC", "TGS1"),
        ("GCC", "TGCC"),
        ("SACU", "TSAC"),
    ])
});

/// Resolves landgroup codes to display names and member country lists.
///
/// Both tables are read-only after construction; unresolved codes fall back
/// to the raw code string rather than failing.
#[derive(Debug, Clone, Default)]
pub struct LandgroupResolver {
    groups: LandgroupMap,
    country_names: CountryNames,
}

impl LandgroupResolver {
    pub fn new(groups: LandgroupMap, country_names: CountryNames) -> Self {
        Self {
            groups,
            country_names,
        }
    }

    /// Canonical landgruppe code, translating through the alias table when
    /// the direct lookup misses.
    fn canonical<'a>(&self, code: &'a str) -> &'a str {
        if self.groups.groups.contains_key(code) {
            return code;
        }
        GROUP_ALIASES.get(code).copied().unwrap_or(code)
    }

    /// Display name for a landgroup code.
    ///
    /// `None` for an empty code; the code itself when unresolved.
    pub fn name(&self, code: &str) -> Option<String> {
        if code.is_empty() {
            return None;
        }
        let canonical = self.canonical(code);
        if let Some(group) = self.groups.groups.get(canonical) {
            return Some(
                group
                    .name
                    .clone()
                    .unwrap_or_else(|| canonical.to_string()),
            );
        }
        Some(code.to_string())
    }

    /// Member countries of a landgroup, resolved to display names.
    ///
    /// Empty for an empty or unresolved code.
    pub fn countries(&self, code: &str) -> Vec<Country> {
        if code.is_empty() {
            return Vec::new();
        }
        let canonical = self.canonical(code);
        let Some(group) = self.groups.groups.get(canonical) else {
            return Vec::new();
        };
        group
            .countries
            .iter()
            .map(|iso| Country {
                iso: iso.clone(),
                name: self.country_name(iso),
            })
            .collect()
    }

    /// Display name for an ISO alpha-2 code, falling back to the code.
    pub fn country_name(&self, iso: &str) -> String {
        self.country_names
            .get(iso)
            .cloned()
            .unwrap_or_else(|| iso.to_string())
    }
}

/// Deduplicate countries by ISO code, first occurrence wins. Entries with
/// an empty ISO code are dropped.
pub fn dedup_by_iso(countries: impl IntoIterator<Item = Country>) -> Vec<Country> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for country in countries {
        if country.iso.is_empty() {
            continue;
        }
        if seen.insert(country.iso.clone()) {
            out.push(country);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Landgroup;

    fn resolver() -> LandgroupResolver {
        let mut groups = LandgroupMap::default();
        groups.groups.insert(
            "EUE".to_string(),
            Landgroup {
                name: Some("European Union".to_string()),
                countries: vec!["DE".to_string(), "FR".to_string()],
            },
        );
        groups.groups.insert(
            "TEF".to_string(),
            Landgroup {
                name: None,
                countries: vec!["NO".to_string(), "IS".to_string()],
            },
        );
        let mut names = CountryNames::new();
        names.insert("DE".to_string(), "Germany".to_string());
        names.insert("FR".to_string(), "France".to_string());
        LandgroupResolver::new(groups, names)
    }

    #[test]
    fn test_alias_resolves_to_same_countries_as_canonical() {
        let r = resolver();
        assert_eq!(r.countries("EU"), r.countries("EUE"));
        assert_eq!(r.countries("EU").len(), 2);
    }

    #[test]
    fn test_country_names_resolve_with_iso_fallback() {
        let r = resolver();
        let countries = r.countries("EFTA");
        assert_eq!(countries[0].iso, "NO");
        // NO is not in the name table, so the ISO code stands in
        assert_eq!(countries[0].name, "NO");
    }

    #[test]
    fn test_unresolved_code_falls_back() {
        let r = resolver();
        assert_eq!(r.name("XYZ"), Some("XYZ".to_string()));
        assert!(r.countries("XYZ").is_empty());
    }

    #[test]
    fn test_empty_code() {
        let r = resolver();
        assert_eq!(r.name(""), None);
        assert!(r.countries("").is_empty());
    }

    #[test]
    fn test_group_without_name_uses_canonical_code() {
        let r = resolver();
        assert_eq!(r.name("EFTA"), Some("TEF".to_string()));
    }

    #[test]
    fn test_dedup_by_iso_first_wins() {
        let deduped = dedup_by_iso(vec![
            Country {
                iso: "DE".to_string(),
                name: "Germany".to_string(),
            },
            Country {
                iso: "DE".to_string(),
                name: "Deutschland".to_string(),
            },
            Country {
                iso: "".to_string(),
                name: "nowhere".to_string(),
            },
            Country {
                iso: "FR".to_string(),
                name: "France".to_string(),
            },
        ]);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].name, "Germany");
        assert_eq!(deduped[1].iso, "FR");
    }
}
