//! Build pipeline orchestration
//!
//! Runs every build step start to finish, single-threaded. A missing source
//! file skips its step with a diagnostic; the rest of the build continues.

use crate::{agreements, emit, flatten, landgroups_build, rates, zero};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tollsats_common::model::AgreementIndex;
use tollsats_common::Result;
use tracing::{info, warn};

/// Input and output locations for one build run.
#[derive(Debug, Clone)]
pub struct BuildPaths {
    pub data_root: PathBuf,
    pub out_dir: PathBuf,
}

impl BuildPaths {
    pub fn new(data_root: PathBuf, out_dir: PathBuf) -> Self {
        Self { data_root, out_dir }
    }

    fn raw(&self, name: &str) -> PathBuf {
        self.data_root.join("raw").join(name)
    }

    fn data(&self, name: &str) -> PathBuf {
        self.data_root.join(name)
    }
}

/// Counts of what one build run produced, written to `build_manifest.json`.
#[derive(Debug, Default, Serialize)]
pub struct BuildSummary {
    pub commodities: usize,
    pub rate_codes: usize,
    pub zero_duty_codes: usize,
    pub agreement_codes: usize,
    pub landgroups: usize,
    pub generated_at: String,
}

/// Run the full build: search index, rate index, zero-duty view, agreement
/// index, reference tables.
pub fn run(paths: &BuildPaths) -> Result<BuildSummary> {
    fs::create_dir_all(&paths.out_dir)?;
    let mut summary = BuildSummary {
        generated_at: chrono::Utc::now().to_rfc3339(),
        ..BuildSummary::default()
    };

    // Search index from the tariff structure tree
    if let Some(doc) = load_json(&paths.raw("customstariffstructure.json")) {
        let entries = flatten::flatten_structure(&doc);
        summary.commodities = entries.len();
        emit::write_json(&paths.out_dir.join("htc_index.json"), &entries)?;
        info!("Wrote htc_index.json with {} commodities", entries.len());
    }

    // Rate index and the zero-duty view derived from it
    if let Some(doc) = load_json(&paths.raw("tollavgiftssats.json")) {
        let index = rates::aggregate_rates(doc);
        summary.rate_codes = index.len();
        let zero_view = zero::zero_duty_view(&index);
        summary.zero_duty_codes = zero_view.len();
        emit::write_partitions(&paths.out_dir, "best_origin", index)?;
        emit::write_partitions(&paths.out_dir, "best_zero", zero_view)?;
    }

    // Agreement index: prefer the raw dataset, fall back to a pre-built index
    if let Some(doc) = load_json(&paths.raw("ratetradeagreements.json")) {
        let index = agreements::build_agreement_index(&doc);
        summary.agreement_codes = index.len();
        emit::write_partitions(&paths.out_dir, "ratetradeagreements", index)?;
    } else if let Some(doc) = load_json(&paths.data("ratetradeagreements_index.json")) {
        match serde_json::from_value::<AgreementIndex>(doc) {
            Ok(index) => {
                summary.agreement_codes = index.len();
                emit::write_partitions(&paths.out_dir, "ratetradeagreements", index)?;
            }
            Err(err) => warn!("Unusable ratetradeagreements_index.json: {}", err),
        }
    }

    // Landgroup map: build from the raw tables, fall back to copying an
    // existing map
    let landgruppe = load_json(&paths.raw("landgruppe.json"));
    let medlemsland = load_json(&paths.raw("medlemsland.json"));
    if let (Some(landgruppe), Some(medlemsland)) = (landgruppe, medlemsland) {
        let fta = load_json(&paths.raw("ratetradeagreements.json"));
        let map = landgroups_build::build_landgroup_map(&landgruppe, &medlemsland, fta.as_ref());
        summary.landgroups = map.groups.len();
        emit::write_json(&paths.out_dir.join("landgroups_map.json"), &map)?;
        info!("Wrote landgroups_map.json with {} groups", map.groups.len());
    } else {
        emit::copy_json(
            &paths.data("landgroups_map.json"),
            &paths.out_dir,
            "landgroups_map.json",
        )?;
    }

    // Country names are copied through unchanged
    emit::copy_json(
        &paths.data("country_names.json"),
        &paths.out_dir,
        "country_names.json",
    )?;

    emit::write_json(&paths.out_dir.join("build_manifest.json"), &summary)?;
    Ok(summary)
}

/// Load a JSON document, warning and returning `None` when the file is
/// missing or unreadable, so the caller can skip that step.
fn load_json(path: &Path) -> Option<Value> {
    if !path.exists() {
        warn!("Missing {}", path.display());
        return None;
    }
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!("Unreadable {}: {}", path.display(), err);
            return None;
        }
    };
    match serde_json::from_str(&text) {
        Ok(doc) => Some(doc),
        Err(err) => {
            warn!("Invalid JSON in {}: {}", path.display(), err);
            None
        }
    }
}
