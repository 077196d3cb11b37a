//! Stale-entry computation for the eviction sweep.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{CacheCollector, SourcePathHasher};

/// Immediate children of a directory.
///
/// A missing or unreadable directory yields an empty list rather than an
/// error: a cache root that was never populated, or was removed concurrently,
/// must not fail the sweep.
fn child_entries(dir: &Path) -> Vec<PathBuf> {
    match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Computes the stale cache entries for one source document.
///
/// For each cache root, every immediate child directory named by the hash of
/// `source_path` is inspected:
///
/// - with an empty `alive` set the whole directory is stale (this is how the
///   document-delete path forces full removal);
/// - otherwise each file inside it is stale unless the collector reported it
///   alive.
///
/// Directories whose name matches no currently-known source path are left
/// untouched, so caches of documents that are simply not open right now
/// survive the periodic sweep.
pub fn stale_entries_for_source(
    source_path: &Path,
    alive: &HashSet<PathBuf>,
    roots: &[PathBuf],
    hasher: &SourcePathHasher,
) -> HashSet<PathBuf> {
    let mut stale = HashSet::new();

    for root in roots {
        for source_cache_dir in child_entries(root) {
            if hasher.is_cache_dir_for(&source_cache_dir, source_path) && alive.is_empty() {
                stale.insert(source_cache_dir);
                continue;
            }

            for artifact in child_entries(&source_cache_dir) {
                if !hasher.is_cache_dir_for(&source_cache_dir, source_path)
                    || alive.contains(&artifact)
                {
                    continue;
                }

                stale.insert(artifact);
            }
        }
    }

    stale
}

/// Computes the union of stale entries across all registered collectors.
///
/// Idempotent: re-running with unchanged collector state and no file-system
/// mutation yields the same set.
pub fn collect_stale(
    collectors: &[Arc<CacheCollector>],
    roots: &[PathBuf],
    hasher: &SourcePathHasher,
) -> HashSet<PathBuf> {
    collectors
        .iter()
        .flat_map(|collector| {
            stale_entries_for_source(
                collector.source_path(),
                &collector.alive_files(),
                roots,
                hasher,
            )
        })
        .collect()
}
