//! Landgroup map builder
//!
//! Combines the official `landgruppe.json` code/name table with the
//! `medlemsland.json` country-membership table, then folds in country lists
//! from the FTA dataset, producing the `landgroups_map.json` reference
//! table. The upstream files disagree on field names between publications,
//! so every field is probed through a list of candidates.

use crate::json::{coerce_string, first_string};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tollsats_common::model::{Landgroup, LandgroupMap};

/// Build the landgroup reference table.
///
/// Membership from `medlemsland` is authoritative for country lists; the
/// FTA document contributes additional groups and unions extra countries
/// into existing ones.
pub fn build_landgroup_map(
    landgruppe: &Value,
    medlemsland: &Value,
    fta: Option<&Value>,
) -> LandgroupMap {
    let mut groups: BTreeMap<String, Landgroup> = BTreeMap::new();

    for row in rows(landgruppe, &["landgrupper", "groups", "data"], true) {
        let Some(fields) = row.as_object() else {
            continue;
        };
        let Some(code) = first_string(fields, &["landgruppekode", "kode", "landgruppe", "id"])
        else {
            continue;
        };
        let name = first_string(fields, &["landgruppenavn", "navn", "beskrivelse", "name"]);
        let countries = string_list(first_list(fields, &["land", "landkoder", "countries"]));
        groups.insert(code, Landgroup { name, countries });
    }

    // Reverse the membership table into group -> ISO2 set, then overwrite
    // each group's country list with it (sorted).
    let mut members: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for row in rows(medlemsland, &["medlemsland", "countries"], false) {
        let Some(fields) = row.as_object() else {
            continue;
        };
        let Some(iso) = first_string(fields, &["landkode", "iso"]) else {
            continue;
        };
        let member_groups = fields
            .get("landgrupper")
            .or_else(|| fields.get("groups"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for item in member_groups {
            let code = match item {
                Value::String(s) => Some(s.trim().to_string()).filter(|c| !c.is_empty()),
                Value::Object(group_fields) => {
                    first_string(group_fields, &["landgruppekode", "kode"])
                }
                _ => None,
            };
            if let Some(code) = code {
                members.entry(code).or_default().insert(iso.clone());
            }
        }
    }
    for (code, group) in groups.iter_mut() {
        group.countries = members
            .get(code)
            .map(|isos| isos.iter().cloned().collect())
            .unwrap_or_default();
    }

    // FTA integration covers bilateral and GSP categories missing from the
    // official membership table.
    if let Some(fta) = fta {
        merge_fta_groups(&mut groups, fta);
    }

    LandgroupMap { groups }
}

fn merge_fta_groups(groups: &mut BTreeMap<String, Landgroup>, fta: &Value) {
    for row in rows(fta, &["agreements", "freeTradeAgreements", "data"], false) {
        let Some(fields) = row.as_object() else {
            continue;
        };
        let Some(code) = first_string(fields, &["agreementcode", "kode", "id"]) else {
            continue;
        };
        let name = first_string(fields, &["agreementname", "name", "navn"]);

        let mut iso_list: Vec<String> = Vec::new();
        if let Some(countries) = fields.get("countries").and_then(Value::as_array) {
            for country in countries {
                let iso = match country {
                    Value::String(s) => Some(s.trim().to_string()).filter(|c| !c.is_empty()),
                    Value::Object(country_fields) => {
                        first_string(country_fields, &["iso", "countrycode", "landkode"])
                    }
                    _ => None,
                };
                if let Some(iso) = iso {
                    iso_list.push(iso);
                }
            }
        }

        let entry = groups.entry(code).or_default();
        if name.is_some() {
            entry.name = name;
        }
        if !iso_list.is_empty() {
            let merged: BTreeSet<String> = entry
                .countries
                .iter()
                .cloned()
                .chain(iso_list)
                .collect();
            entry.countries = merged.into_iter().collect();
        }
    }
}

/// Row sequence of an irregular document: the first named key holding a
/// list, optionally falling back to any list-valued field.
fn rows<'a>(doc: &'a Value, keys: &[&str], fallback_any_list: bool) -> &'a [Value] {
    if let Some(fields) = doc.as_object() {
        for key in keys {
            if let Some(Value::Array(items)) = fields.get(*key) {
                return items;
            }
        }
        if fallback_any_list {
            for value in fields.values() {
                if let Value::Array(items) = value {
                    return items;
                }
            }
        }
    }
    &[]
}

/// First list-valued field among the named keys.
fn first_list<'a>(fields: &'a serde_json::Map<String, Value>, keys: &[&str]) -> Option<&'a [Value]> {
    keys.iter().find_map(|key| {
        fields
            .get(*key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    })
}

/// Coerce a list of JSON values into trimmed, non-empty strings.
fn string_list(items: Option<&[Value]>) -> Vec<String> {
    items
        .unwrap_or_default()
        .iter()
        .filter_map(|item| coerce_string(Some(item)))
        .collect()
}
