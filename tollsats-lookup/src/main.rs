//! tollsats-lookup - query CLI over a built static data tree
//!
//! Answers the same three queries as the web client, printing JSON, against
//! either a local artifact directory or a static file host.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tollsats_lookup::{FsRetriever, HttpRetriever, Retrieve, TariffLookup};

/// Query the static tariff data: search, best origin, agreements.
#[derive(Parser, Debug)]
#[command(name = "tollsats-lookup", version, about)]
struct Cli {
    /// Directory containing built artifacts
    #[arg(long, conflicts_with = "base_url")]
    data: Option<String>,

    /// Base URL of a static file host serving the artifacts
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search commodity codes by code or name substring
    Search {
        query: String,
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
    /// Countries in the agreement groups with the lowest duty for a code
    BestOrigin { code: String },
    /// Trade agreements applicable to a code
    Agreements { code: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.base_url {
        Some(url) => run(TariffLookup::new(HttpRetriever::new(url)), cli.command).await,
        None => {
            let root = cli.data.unwrap_or_else(|| "data/static".to_string());
            run(TariffLookup::new(FsRetriever::new(root)), cli.command).await
        }
    }
}

async fn run<R: Retrieve>(lookup: TariffLookup<R>, command: Command) -> Result<()> {
    match command {
        Command::Search { query, limit } => {
            let results = lookup.search(&query, limit).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Command::BestOrigin { code } => match lookup.best_origin(&code).await? {
            Some(best) => println!("{}", serde_json::to_string_pretty(&best)?),
            None => println!(
                "{}",
                serde_json::json!({ "code": code, "message": "No data for this code" })
            ),
        },
        Command::Agreements { code } => {
            let result = lookup.agreements_for(&code).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }
    Ok(())
}
