//! Render sessions tying fence providers to the artifact cache.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use mdfence_cache::{CacheCollector, CacheManager};
use mdfence_plugin::{CodeFence, ExtensionRegistry, LanguageId};
use tracing::warn;

use crate::{CoreError, PreviewConfig, extract_fences};

/// One rendered fence within a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlock {
    /// The fence this block was rendered from.
    pub fence: CodeFence,
    /// HTML fragment for the preview.
    pub html: String,
    /// Provider that produced the HTML, `None` for pass-through blocks.
    pub provider_id: Option<String>,
    /// Highlight language for pass-through blocks.
    pub language: Option<LanguageId>,
}

/// Result of rendering one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutcome {
    /// Rendered blocks in document order.
    pub blocks: Vec<RenderedBlock>,
}

/// Renders the fenced code blocks of markdown documents.
///
/// Every render creates and registers a fresh [`CacheCollector`] reporting
/// the artifacts still alive for the document; the collector registry is
/// cleared each sweep, so re-registration on the next render is the expected
/// protocol.
pub struct FenceRenderer {
    cache: Arc<CacheManager>,
    cache_enabled: bool,
}

impl FenceRenderer {
    /// Creates a renderer backed by the given cache manager, with artifact
    /// caching enabled.
    pub fn new(cache: Arc<CacheManager>) -> Self {
        Self {
            cache,
            cache_enabled: true,
        }
    }

    /// Creates a renderer honoring the configuration's `cache` flag.
    pub fn from_config(cache: Arc<CacheManager>, config: &PreviewConfig) -> Self {
        Self {
            cache,
            cache_enabled: config.cache,
        }
    }

    /// Disables artifact caching: providers render without a cache
    /// directory and no collector is registered.
    pub fn disable_cache(&mut self) {
        self.cache_enabled = false;
    }

    /// Enables artifact caching.
    pub fn enable_cache(&mut self) {
        self.cache_enabled = true;
    }

    /// Returns whether artifact caching is enabled.
    pub fn is_cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    /// The extension registry providers are looked up in.
    pub fn extensions(&self) -> &Arc<ExtensionRegistry> {
        self.cache.extensions()
    }

    /// Renders every fence of a document.
    ///
    /// A provider that fails to render is skipped with a warning and its
    /// fence passed through; the preview never fails wholesale on one bad
    /// fence. The session's collector is registered with the cache manager
    /// even when no artifacts were produced, so artifacts of fences removed
    /// from the document become stale on the next sweep. With caching
    /// disabled, providers render without a cache directory and nothing is
    /// registered.
    pub fn render_document(
        &self,
        source_path: &Path,
        text: &str,
    ) -> Result<RenderOutcome, CoreError> {
        let fences = extract_fences(text)?;
        let collector = Arc::new(CacheCollector::new(source_path));
        let extensions = self.cache.extensions();

        let mut blocks = Vec::with_capacity(fences.len());
        for fence in fences {
            let Some(provider) = extensions.provider_for(&fence.info_string) else {
                blocks.push(self.pass_through(fence));
                continue;
            };

            let cache_dir = if self.cache_enabled {
                provider.as_cacheable().map(|cacheable| {
                    self.cache
                        .hasher()
                        .cache_dir_for(&cacheable.cache_root(), source_path)
                })
            } else {
                None
            };
            if let Some(dir) = &cache_dir
                && let Err(err) = fs::create_dir_all(dir)
            {
                warn!("Failed to create cache dir {}: {}", dir.display(), err);
                blocks.push(self.pass_through(fence));
                continue;
            }

            match provider.render(&fence, cache_dir.as_deref()) {
                Ok(rendered) => {
                    for artifact in &rendered.artifacts {
                        collector.add_alive_file(artifact.clone());
                    }
                    blocks.push(RenderedBlock {
                        provider_id: Some(provider.id().to_string()),
                        language: None,
                        html: rendered.html,
                        fence,
                    });
                }
                Err(err) => {
                    warn!(
                        "Provider {} failed on fence `{}`: {}",
                        provider.id(),
                        fence.info_string,
                        err
                    );
                    blocks.push(self.pass_through(fence));
                }
            }
        }

        if self.cache_enabled {
            self.cache.register_collector(collector);
        }
        Ok(RenderOutcome { blocks })
    }

    /// Renders a fence no provider claimed as a plain highlighted block.
    fn pass_through(&self, fence: CodeFence) -> RenderedBlock {
        let language = self.extensions().resolve_language(&fence.info_string);
        let class = language
            .as_ref()
            .map(|id| format!(" class=\"language-{}\"", id))
            .unwrap_or_default();
        let html = format!("<pre><code{}>{}</code></pre>", class, escape(&fence.content));

        RenderedBlock {
            html,
            provider_id: None,
            language,
            fence,
        }
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
