//! Chapter partitioning of code-keyed mappings
//!
//! A "chapter" is the first two characters of a commodity code, used purely
//! as a storage key so clients can load small per-chapter files instead of
//! the whole index. Partition membership never changes query semantics.

use std::collections::BTreeMap;

/// Chapter key for a commodity code; `None` when the code is shorter than
/// two characters.
pub fn chapter_of(code: &str) -> Option<&str> {
    code.get(..2)
}

/// Group a code-keyed mapping by chapter, dropping codes shorter than two
/// characters. Both the chapter keys and the codes within each chapter come
/// out in sorted order, so emission is deterministic.
pub fn partition_by_chapter<V>(
    entries: impl IntoIterator<Item = (String, V)>,
) -> BTreeMap<String, BTreeMap<String, V>> {
    let mut by_chapter: BTreeMap<String, BTreeMap<String, V>> = BTreeMap::new();
    for (code, value) in entries {
        let Some(chapter) = chapter_of(&code).map(str::to_owned) else {
            continue;
        };
        by_chapter.entry(chapter).or_default().insert(code, value);
    }
    by_chapter
}
