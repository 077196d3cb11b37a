//! # mdfence_cache
//!
//! Artifact cache and eviction sweep for mdfence.
//!
//! This crate provides:
//! - The path-hash naming contract for per-source-file cache directories
//! - Per-render-session collectors tracking which artifacts are alive
//! - The periodic eviction sweep computing and deleting stale entries
//! - The `CacheManager` lifecycle object owning the shared state
//!
//! ## Architecture
//!
//! Renderers write artifact files under `cache_root/<hash(source path)>/`.
//! Each render session registers a [`CacheCollector`] reporting which of
//! those files are still referenced. A background sweep periodically
//! enumerates the cache roots, marks everything a collector no longer claims
//! alive as stale, merges in paths queued by document-delete notifications,
//! and deletes the union best-effort.
//!
//! ## Example
//!
//! ```rust,ignore
//! use mdfence_cache::{CacheCollector, CacheManager};
//!
//! let manager = Arc::new(CacheManager::new(extensions, Duration::from_secs(600)));
//! manager.start();
//!
//! let collector = Arc::new(CacheCollector::new("/doc/readme.md"));
//! collector.add_alive_file("/cache/puml/ab12/diagram.png");
//! manager.register_collector(collector);
//! ```

mod collector;
mod error;
mod hasher;
mod manager;
mod pending;
mod registry;
mod sweep;
mod timer;

pub use collector::CacheCollector;
pub use error::CacheError;
pub use hasher::{SOURCE_PATH_SALT, SourcePathHasher};
pub use manager::CacheManager;
pub use pending::PendingDeletions;
pub use registry::CollectorRegistry;
pub use sweep::{collect_stale, stale_entries_for_source};
pub use timer::RepeatingTask;
