//! Per-render-session alive-file collector.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

/// Tracks which cached artifacts of one source document are still alive.
///
/// One collector is created per render of a document and registered with the
/// cache manager. The registry is cleared every sweep, so a document still
/// open is expected to re-register on its next render.
#[derive(Debug)]
pub struct CacheCollector {
    source_path: PathBuf,
    alive: Mutex<HashSet<PathBuf>>,
}

impl CacheCollector {
    /// Creates a collector for a source document.
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            alive: Mutex::new(HashSet::new()),
        }
    }

    /// Canonical path of the source document this collector tracks.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Marks one artifact file as alive.
    pub fn add_alive_file(&self, path: impl Into<PathBuf>) {
        self.alive.lock().insert(path.into());
    }

    /// Snapshot of the alive set.
    pub fn alive_files(&self) -> HashSet<PathBuf> {
        self.alive.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collector_starts_empty() {
        let collector = CacheCollector::new("/docs/readme.md");

        assert_eq!(collector.source_path(), Path::new("/docs/readme.md"));
        assert!(collector.alive_files().is_empty());
    }

    #[test]
    fn test_add_alive_file_deduplicates() {
        let collector = CacheCollector::new("/docs/readme.md");
        collector.add_alive_file("/cache/ab/img.png");
        collector.add_alive_file("/cache/ab/img.png");

        assert_eq!(collector.alive_files().len(), 1);
    }

    #[test]
    fn test_alive_files_is_snapshot() {
        let collector = CacheCollector::new("/docs/readme.md");
        collector.add_alive_file("/cache/ab/one.png");

        let snapshot = collector.alive_files();
        collector.add_alive_file("/cache/ab/two.png");

        assert_eq!(snapshot.len(), 1);
        assert_eq!(collector.alive_files().len(), 2);
    }
}
