//! Registry of collectors for the current sweep window.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::CacheCollector;

/// Holds the collectors registered since the last sweep.
///
/// Keyed by source path, so duplicate registration for the same document is
/// a no-op in effect. Registration may race with a sweep; a collector
/// registered while a sweep is snapshotting is simply processed by the next
/// sweep.
#[derive(Debug, Default)]
pub struct CollectorRegistry {
    inner: Mutex<HashMap<PathBuf, Arc<CacheCollector>>>,
}

impl CollectorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a collector. Idempotent per source path: a collector for an
    /// already-registered path replaces the earlier one.
    pub fn register(&self, collector: Arc<CacheCollector>) {
        self.inner
            .lock()
            .insert(collector.source_path().to_path_buf(), collector);
    }

    /// Atomically returns the current collector set and empties the
    /// registry.
    pub fn snapshot_and_clear(&self) -> Vec<Arc<CacheCollector>> {
        let drained = std::mem::take(&mut *self.inner.lock());
        drained.into_values().collect()
    }

    /// Number of registered collectors.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether no collectors are registered.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
