//! # Tollsats Lookup Facade
//!
//! Query-time companion to the build pipeline: loads the static JSON
//! artifacts on demand (one chapter partition at a time), caches them for
//! the lifetime of the facade, and answers three queries:
//! - text search over commodity codes and names
//! - best-origin countries (lowest preferential duty) for a code
//! - trade agreements applicable to a code

pub mod facade;
pub mod retrieve;
pub mod types;

pub use facade::{LookupError, TariffLookup};
pub use retrieve::{FsRetriever, HttpRetriever, Retrieve, RetrieveError};
