//! Document lifecycle events.
//!
//! The host IDE owns the real file-system watcher; it publishes events on
//! this bus instead of the cache layer listening to a global notification
//! API.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use mdfence_cache::CacheManager;
use parking_lot::Mutex;
use tracing::debug;

/// A document lifecycle event published by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    /// A document was deleted; the path is its canonical path.
    Deleted { path: PathBuf },
}

type Subscriber = Arc<dyn Fn(&DocumentEvent) + Send + Sync>;

/// A minimal event bus for document lifecycle notifications.
///
/// Delivery is synchronous and at-least-once per subscriber; subscribers
/// must tolerate being called from any thread.
#[derive(Default)]
pub struct DocumentEventBus {
    subscribers: Mutex<Vec<Subscriber>>,
}

impl DocumentEventBus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes a callback to all future events.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&DocumentEvent) + Send + Sync + 'static,
    {
        self.subscribers.lock().push(Arc::new(callback));
    }

    /// Publishes an event to every subscriber.
    pub fn publish(&self, event: &DocumentEvent) {
        let subscribers = self.subscribers.lock().clone();
        for subscriber in subscribers {
            subscriber(event);
        }
    }
}

/// Whether a path names a markdown document handled by the preview.
pub fn is_markdown_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            ext == "md" || ext == "markdown"
        })
        .unwrap_or(false)
}

/// Subscribes the cache manager to document-delete notifications.
///
/// Only markdown documents are forwarded; deleting any other file type does
/// not touch the cache.
pub fn connect_cache(bus: &DocumentEventBus, manager: Arc<CacheManager>) {
    bus.subscribe(move |event| {
        let DocumentEvent::Deleted { path } = event;
        if is_markdown_path(path) {
            debug!("Markdown document deleted: {}", path.display());
            manager.on_source_file_deleted(path);
        }
    });
}
