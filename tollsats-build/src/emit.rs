//! Artifact emission
//!
//! Writes build outputs as compact JSON, one directory of per-chapter files
//! for each partitioned index, plus unpartitioned reference files.

use serde::Serialize;
use std::fs;
use std::path::Path;
use tollsats_common::chapter::partition_by_chapter;
use tollsats_common::Result;

/// Write `value` as JSON to `path`, creating parent directories as needed.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Partition a code-keyed mapping by chapter and write one file per chapter
/// under `<out_dir>/<subdir>/`. Returns the number of chapters written.
pub fn write_partitions<V: Serialize>(
    out_dir: &Path,
    subdir: &str,
    entries: impl IntoIterator<Item = (String, V)>,
) -> Result<usize> {
    let by_chapter = partition_by_chapter(entries);
    let dir = out_dir.join(subdir);
    fs::create_dir_all(&dir)?;
    for (chapter, chunk) in &by_chapter {
        write_json(&dir.join(format!("{chapter}.json")), chunk)?;
    }
    tracing::info!("Wrote {}/ with {} chapters", subdir, by_chapter.len());
    Ok(by_chapter.len())
}

/// Copy a reference JSON file into the output tree unchanged.
///
/// Returns `false` (with a diagnostic) when the source is missing, so the
/// caller can continue with the rest of the build.
pub fn copy_json(src: &Path, out_dir: &Path, name: &str) -> Result<bool> {
    if !src.exists() {
        tracing::warn!("Missing {}", src.display());
        return Ok(false);
    }
    fs::create_dir_all(out_dir)?;
    fs::copy(src, out_dir.join(name))?;
    tracing::info!("Copied {}", name);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_write_partitions_creates_one_file_per_chapter() {
        let dir = tempfile::tempdir().unwrap();
        let entries = vec![
            ("07129090".to_string(), 1),
            ("07020000".to_string(), 2),
            ("25081000".to_string(), 3),
            ("7".to_string(), 4),
        ];
        let written = write_partitions(dir.path(), "best_origin", entries).unwrap();
        assert_eq!(written, 2);

        let chapter07 = fs::read_to_string(dir.path().join("best_origin/07.json")).unwrap();
        let parsed: BTreeMap<String, i32> = serde_json::from_str(&chapter07).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["07129090"], 1);
        assert!(!dir.path().join("best_origin/7.json").exists());
    }

    #[test]
    fn test_copy_json_reports_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let copied = copy_json(
            &dir.path().join("does_not_exist.json"),
            dir.path(),
            "out.json",
        )
        .unwrap();
        assert!(!copied);
    }
}
