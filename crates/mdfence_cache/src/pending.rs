//! Deletion paths accumulated outside the regular sweep.

use std::collections::HashSet;
use std::path::PathBuf;

use parking_lot::Mutex;

/// Paths discovered as stale outside the periodic sweep, typically when a
/// source document is deleted. Merged into the next sweep's deletion batch,
/// then cleared.
#[derive(Debug, Default)]
pub struct PendingDeletions {
    inner: Mutex<HashSet<PathBuf>>,
}

impl PendingDeletions {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unions the given paths into the pending set.
    pub fn add_all(&self, paths: impl IntoIterator<Item = PathBuf>) {
        self.inner.lock().extend(paths);
    }

    /// Returns the current contents and clears the set in one step.
    ///
    /// Paths added after the snapshot is taken survive to the next drain.
    pub fn drain(&self) -> HashSet<PathBuf> {
        std::mem::take(&mut *self.inner.lock())
    }

    /// Number of pending paths.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether no paths are pending.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_all_unions() {
        let pending = PendingDeletions::new();
        pending.add_all([PathBuf::from("/cache/a"), PathBuf::from("/cache/b")]);
        pending.add_all([PathBuf::from("/cache/b"), PathBuf::from("/cache/c")]);

        assert_eq!(pending.len(), 3);
    }

    #[test]
    fn test_drain_clears() {
        let pending = PendingDeletions::new();
        pending.add_all([PathBuf::from("/cache/a")]);

        let drained = pending.drain();

        assert_eq!(drained.len(), 1);
        assert!(pending.is_empty());
    }

    #[test]
    fn test_add_after_drain_survives_to_next_drain() {
        let pending = PendingDeletions::new();
        pending.drain();
        pending.add_all([PathBuf::from("/cache/late")]);

        assert_eq!(pending.drain().len(), 1);
    }

    #[test]
    fn test_add_all_empty_is_noop() {
        let pending = PendingDeletions::new();
        pending.add_all(Vec::new());

        assert!(pending.is_empty());
    }
}
