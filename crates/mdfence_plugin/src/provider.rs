//! Fence rendering provider traits.

use std::path::{Path, PathBuf};

use crate::{CodeFence, ProviderError};

/// Output of rendering a single fence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFence {
    /// HTML fragment replacing the fence in the preview.
    pub html: String,
    /// Artifact files written by the provider, if any.
    ///
    /// For cacheable providers these paths live under the cache directory
    /// passed to [`FenceGeneratingProvider::render`] and are reported to the
    /// eviction sweep as alive.
    pub artifacts: Vec<PathBuf>,
}

impl RenderedFence {
    /// Creates a rendered fence with no on-disk artifacts.
    pub fn html_only(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            artifacts: Vec::new(),
        }
    }
}

/// A renderer for fenced code blocks of a specific sub-language.
///
/// Implementations turn fence content (diagram sources, formulas, ...) into
/// HTML, optionally backed by generated files on disk.
pub trait FenceGeneratingProvider: Send + Sync {
    /// Stable identifier for this provider.
    fn id(&self) -> &str;

    /// Whether this provider handles a fence with the given info string.
    fn accepts(&self, info_string: &str) -> bool;

    /// Renders one fence.
    ///
    /// `cache_dir` is the per-source-file cache directory for providers with
    /// the cacheable capability, and `None` otherwise. Artifact files must be
    /// written under `cache_dir` and returned in
    /// [`RenderedFence::artifacts`], or they will be treated as stale by the
    /// next sweep.
    fn render(
        &self,
        fence: &CodeFence,
        cache_dir: Option<&Path>,
    ) -> Result<RenderedFence, ProviderError>;

    /// The cacheable capability, if this provider keeps a path-based cache.
    ///
    /// Providers that manage their own storage return `None` (the default)
    /// and are skipped by the path-based eviction sweep.
    fn as_cacheable(&self) -> Option<&dyn CacheableProvider> {
        None
    }
}

/// Capability for providers whose artifacts live in a sweepable directory
/// tree.
pub trait CacheableProvider {
    /// Root directory under which this provider's cache entries live.
    ///
    /// Stable for the lifetime of the provider type; not document-specific.
    /// Per-source-file subdirectories underneath are named by the shared
    /// path-hash contract.
    fn cache_root(&self) -> PathBuf;
}
