//! Cache lifecycle owner: registry, pending deletions, periodic sweep.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use mdfence_plugin::ExtensionRegistry;
use tracing::debug;

use crate::{
    CacheCollector, CollectorRegistry, PendingDeletions, RepeatingTask, SourcePathHasher,
    collect_stale, stale_entries_for_source,
};

/// Owns the mutable cache-eviction state for a preview session.
///
/// Collectors registered by render sessions and paths queued by
/// document-delete notifications feed the periodic sweep, which deletes the
/// union best-effort and clears both. Constructed once at session start and
/// handed to consumers by `Arc`.
pub struct CacheManager {
    extensions: Arc<ExtensionRegistry>,
    collectors: CollectorRegistry,
    pending: PendingDeletions,
    hasher: SourcePathHasher,
    sweep_interval: Duration,
    timer: RepeatingTask,
}

impl CacheManager {
    /// Creates a manager with the default path-hash contract.
    pub fn new(extensions: Arc<ExtensionRegistry>, sweep_interval: Duration) -> Self {
        Self::with_hasher(extensions, sweep_interval, SourcePathHasher::default())
    }

    /// Creates a manager with a specific hasher.
    ///
    /// The hasher must match the one used by the artifact-producing side, or
    /// existing cache directories will never be recognized.
    pub fn with_hasher(
        extensions: Arc<ExtensionRegistry>,
        sweep_interval: Duration,
        hasher: SourcePathHasher,
    ) -> Self {
        Self {
            extensions,
            collectors: CollectorRegistry::new(),
            pending: PendingDeletions::new(),
            hasher,
            sweep_interval,
            timer: RepeatingTask::new(),
        }
    }

    /// The shared path hasher.
    pub fn hasher(&self) -> &SourcePathHasher {
        &self.hasher
    }

    /// The extension registry this manager sweeps for.
    pub fn extensions(&self) -> &Arc<ExtensionRegistry> {
        &self.extensions
    }

    /// Registers a collector for the current sweep window.
    pub fn register_collector(&self, collector: Arc<CacheCollector>) {
        self.collectors.register(collector);
    }

    /// Handles a document-delete notification.
    ///
    /// The stale set for the deleted path is computed with an empty alive
    /// set, so a matching cache directory is queued for removal wholesale.
    /// A document with no cache directory contributes nothing.
    pub fn on_source_file_deleted(&self, source_path: &Path) {
        let roots = self.extensions.cacheable_roots();
        let stale = stale_entries_for_source(source_path, &HashSet::new(), &roots, &self.hasher);

        if !stale.is_empty() {
            debug!(
                "Queued {} cache entries of deleted document {}",
                stale.len(),
                source_path.display()
            );
        }
        self.pending.add_all(stale);
    }

    /// Snapshots and clears the collector registry, returning the stale set
    /// for the snapshot.
    pub fn collect_files_to_remove(&self) -> HashSet<PathBuf> {
        let collectors = self.collectors.snapshot_and_clear();
        let roots = self.extensions.cacheable_roots();
        collect_stale(&collectors, &roots, &self.hasher)
    }

    /// Runs one sweep: computes stale entries, merges pending deletions,
    /// dispatches best-effort asynchronous removal, and resets state.
    ///
    /// The compute phase is synchronous; the deletion phase is
    /// fire-and-forget and never surfaces errors.
    ///
    /// Must be called from within a tokio runtime when the batch is
    /// non-empty, since deletion is dispatched with `tokio::spawn`.
    pub fn run_sweep(&self) {
        let mut batch = self.collect_files_to_remove();
        batch.extend(self.pending.drain());

        if batch.is_empty() {
            debug!("Sweep found no stale cache entries");
            return;
        }

        debug!("Sweep deleting {} stale cache entries", batch.len());
        spawn_delete(batch);
    }

    /// Starts the periodic sweep. Call as `Arc::clone(&manager).start()`.
    ///
    /// The timer holds only a weak reference, so dropping the manager stops
    /// the task even without an explicit `shutdown`.
    pub fn start(self: Arc<Self>) {
        let manager = Arc::downgrade(&self);
        self.timer.start(self.sweep_interval, move || {
            if let Some(manager) = manager.upgrade() {
                manager.run_sweep();
            }
        });
    }

    /// Cancels the pending sweep timer. In-flight deletions are not
    /// cancelled, only not rescheduled.
    pub fn shutdown(&self) {
        self.timer.stop();
    }

    /// Whether the periodic sweep is scheduled.
    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Number of collectors awaiting the next sweep.
    pub fn registered_collectors(&self) -> usize {
        self.collectors.len()
    }

    /// Number of paths queued for the next sweep's deletion batch.
    pub fn pending_deletions(&self) -> usize {
        self.pending.len()
    }
}

/// Best-effort asynchronous removal of a deletion batch.
///
/// Failures (permissions, concurrent removal) are logged and dropped; a
/// path that survives is re-detected by a later sweep.
fn spawn_delete(paths: HashSet<PathBuf>) {
    tokio::spawn(async move {
        for path in paths {
            let result = if path.is_dir() {
                tokio::fs::remove_dir_all(&path).await
            } else {
                tokio::fs::remove_file(&path).await
            };

            if let Err(err) = result {
                debug!("Failed to delete {}: {}", path.display(), err);
            }
        }
    });
}
