//! Lookup facade
//!
//! Loads chapter partitions and reference tables on demand, caches them for
//! the lifetime of the facade, and answers the three tariff queries. A
//! missing partition means "no data for this chapter"; only transport and
//! decoding failures are errors.

use crate::retrieve::{Retrieve, RetrieveError};
use crate::types::{AgreementEntry, BestOrigin, CodeAgreements};
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tollsats_common::chapter::chapter_of;
use tollsats_common::landgroups::{dedup_by_iso, LandgroupResolver};
use tollsats_common::model::{CodeRates, CommodityEntry, CountryNames, LandgroupMap};

/// Hard ceiling on search results.
const SEARCH_RESULT_CAP: usize = 200;

/// Lookup failures. Absent data is never an error; these are transport and
/// decoding problems only.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The underlying retrieval failed for a reason other than not-found.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The artifact was retrieved but is not valid JSON of the expected
    /// shape.
    #[error("Malformed artifact {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

type ChapterCache<T> = RwLock<HashMap<String, Arc<T>>>;

/// Per-chapter map shape of the agreement index artifact.
type AgreementChapter = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Cached, transport-agnostic tariff lookup.
///
/// All caches are append-only and keyed by chapter or table name;
/// concurrent queries may fetch the same uncached chapter twice, which is
/// harmless because the underlying artifacts are immutable.
pub struct TariffLookup<R: Retrieve> {
    retriever: R,
    search_index: RwLock<Option<Arc<Vec<CommodityEntry>>>>,
    resolver: RwLock<Option<Arc<LandgroupResolver>>>,
    rate_chapters: ChapterCache<BTreeMap<String, CodeRates>>,
    agreement_chapters: ChapterCache<AgreementChapter>,
}

impl<R: Retrieve> TariffLookup<R> {
    pub fn new(retriever: R) -> Self {
        Self {
            retriever,
            search_index: RwLock::new(None),
            resolver: RwLock::new(None),
            rate_chapters: RwLock::new(HashMap::new()),
            agreement_chapters: RwLock::new(HashMap::new()),
        }
    }

    /// Case-insensitive substring search over code and name.
    ///
    /// An empty or whitespace query returns the head of the index; results
    /// are capped at `min(limit, 200)`.
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<CommodityEntry>, LookupError> {
        let index = self.load_search_index().await?;
        let cap = limit.min(SEARCH_RESULT_CAP);
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(index.iter().take(cap).cloned().collect());
        }
        Ok(index
            .iter()
            .filter(|entry| {
                entry.code.contains(&needle) || entry.name.to_lowercase().contains(&needle)
            })
            .take(cap)
            .cloned()
            .collect())
    }

    /// Countries of the agreement groups tied at the lowest duty rate.
    ///
    /// `None` means the code has no rate data at all (short code, missing
    /// chapter, or no entry); that is distinct from
    /// [`BestOrigin::NoAgreements`], where rate data exists but no
    /// preferential agreement undercuts the ordinary rate.
    pub async fn best_origin(&self, code: &str) -> Result<Option<BestOrigin>, LookupError> {
        let Some(chapter) = chapter_of(code) else {
            return Ok(None);
        };
        let rates = self
            .load_chapter(&self.rate_chapters, "best_origin", chapter)
            .await?;
        let Some(entry) = rates.get(code) else {
            return Ok(None);
        };
        if entry.agreements.is_empty() {
            return Ok(Some(BestOrigin::NoAgreements));
        }

        let mut min_value = f64::INFINITY;
        for agreement in &entry.agreements {
            if agreement.value < min_value {
                min_value = agreement.value;
            }
        }
        // Every group tied at the minimum contributes countries; the first
        // tied group's metadata is authoritative for the rate details.
        let tied: Vec<_> = entry
            .agreements
            .iter()
            .filter(|agreement| agreement.value == min_value)
            .collect();

        let resolver = self.load_resolver().await?;
        let countries = dedup_by_iso(
            tied.iter()
                .flat_map(|agreement| resolver.countries(&agreement.code)),
        );
        let first = tied[0];
        Ok(Some(BestOrigin::Cheapest {
            countries,
            min_value,
            rate_type: first.rate_type,
            unit: first.unit.clone(),
        }))
    }

    /// Every trade agreement listed for the code, grouped by classifier.
    ///
    /// Classifier order is stable (sorted) for a given partition.
    pub async fn agreements_for(&self, code: &str) -> Result<CodeAgreements, LookupError> {
        let empty = CodeAgreements {
            code: code.to_string(),
            agreements: Vec::new(),
        };
        let Some(chapter) = chapter_of(code) else {
            return Ok(empty);
        };
        let index = self
            .load_chapter(&self.agreement_chapters, "ratetradeagreements", chapter)
            .await?;
        let Some(entry) = index.get(code) else {
            return Ok(empty);
        };

        let resolver = self.load_resolver().await?;
        let mut agreements = Vec::new();
        for (classifier, group_codes) in entry {
            let countries = dedup_by_iso(
                group_codes
                    .iter()
                    .flat_map(|group| resolver.countries(group)),
            );
            agreements.push(AgreementEntry {
                agreement: classifier.clone(),
                agreement_name: resolver
                    .name(classifier)
                    .unwrap_or_else(|| classifier.clone()),
                countries,
            });
        }
        Ok(CodeAgreements {
            code: code.to_string(),
            agreements,
        })
    }

    /// Fetch and decode one artifact. `Ok(None)` means the key is absent.
    async fn fetch_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, LookupError> {
        match self.retriever.retrieve(key).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|source| LookupError::Decode {
                    key: key.to_string(),
                    source,
                }),
            Err(RetrieveError::NotFound(_)) => {
                tracing::debug!("No artifact at {}", key);
                Ok(None)
            }
            Err(RetrieveError::Transport(message)) => Err(LookupError::Transport(message)),
        }
    }

    async fn load_search_index(&self) -> Result<Arc<Vec<CommodityEntry>>, LookupError> {
        if let Some(index) = self.search_index.read().await.as_ref() {
            return Ok(Arc::clone(index));
        }
        let index: Vec<CommodityEntry> =
            self.fetch_json("htc_index.json").await?.unwrap_or_default();
        let index = Arc::new(index);
        *self.search_index.write().await = Some(Arc::clone(&index));
        Ok(index)
    }

    /// Landgroup and country-name tables, loaded together on first use.
    /// Missing reference tables degrade to empty tables: names fall back to
    /// raw codes, country lists to empty.
    async fn load_resolver(&self) -> Result<Arc<LandgroupResolver>, LookupError> {
        if let Some(resolver) = self.resolver.read().await.as_ref() {
            return Ok(Arc::clone(resolver));
        }
        let groups: LandgroupMap = self
            .fetch_json("landgroups_map.json")
            .await?
            .unwrap_or_default();
        let names: CountryNames = self
            .fetch_json("country_names.json")
            .await?
            .unwrap_or_default();
        let resolver = Arc::new(LandgroupResolver::new(groups, names));
        *self.resolver.write().await = Some(Arc::clone(&resolver));
        Ok(resolver)
    }

    /// One chapter partition of a partitioned index. An absent partition is
    /// cached as an empty map so it is not re-fetched.
    async fn load_chapter<T>(
        &self,
        cache: &ChapterCache<T>,
        prefix: &str,
        chapter: &str,
    ) -> Result<Arc<T>, LookupError>
    where
        T: DeserializeOwned + Default + Send + Sync,
    {
        if let Some(cached) = cache.read().await.get(chapter) {
            return Ok(Arc::clone(cached));
        }
        let loaded: T = self
            .fetch_json(&format!("{prefix}/{chapter}.json"))
            .await?
            .unwrap_or_default();
        let loaded = Arc::new(loaded);
        let mut guard = cache.write().await;
        let entry = guard
            .entry(chapter.to_string())
            .or_insert_with(|| Arc::clone(&loaded));
        Ok(Arc::clone(entry))
    }
}
