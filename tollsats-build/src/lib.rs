//! # Tollsats Build Pipeline
//!
//! Offline transformation of the raw Norwegian customs tariff datasets into
//! the compact, chapter-partitioned JSON artifacts served to the static
//! lookup client:
//! - Search index flattened from the tariff structure tree
//! - Per-code minimum duty rates (ordinary and per agreement group)
//! - Zero-duty view derived from the rate aggregation
//! - Agreement index grouped by duty classifier
//! - Landgroup and country-name reference tables

pub mod agreements;
pub mod emit;
pub mod flatten;
pub mod landgroups_build;
pub mod pipeline;
pub mod rates;
pub mod zero;

mod json;

pub use pipeline::{run, BuildPaths, BuildSummary};
