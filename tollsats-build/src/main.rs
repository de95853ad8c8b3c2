//! tollsats-build - offline static-data builder
//!
//! Reads the raw Norwegian customs tariff datasets and writes the
//! chapter-partitioned JSON artifacts consumed by the lookup facade.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tollsats_build::BuildPaths;
use tollsats_common::config::{resolve_data_root, DATA_ROOT_ENV};
use tracing::info;

/// Build the static tariff data tree from the raw datasets.
#[derive(Parser, Debug)]
#[command(name = "tollsats-build", version, about)]
struct Cli {
    /// Data root containing raw/ inputs and reference tables
    #[arg(long)]
    data_root: Option<String>,

    /// Output directory for built artifacts (defaults to <data_root>/static)
    #[arg(long)]
    out: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let data_root = resolve_data_root(cli.data_root.as_deref(), DATA_ROOT_ENV);
    let out_dir = cli
        .out
        .map(PathBuf::from)
        .unwrap_or_else(|| data_root.join("static"));

    info!("Data root: {}", data_root.display());
    info!("Output: {}", out_dir.display());

    let summary = tollsats_build::run(&BuildPaths::new(data_root, out_dir))?;
    info!(
        "Static data build done: {} commodities, {} rate codes, {} zero-duty codes, {} agreement codes",
        summary.commodities, summary.rate_codes, summary.zero_duty_codes, summary.agreement_codes
    );
    Ok(())
}
