//! Extension registry for fence providers.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::{FenceCompletion, FenceGeneratingProvider, FenceLanguageProvider, LanguageId};

/// Ordered registry of fence providers.
///
/// Constructed once at session start and shared by `Arc`; consumers receive
/// an owning reference instead of looking providers up through a global
/// extension point.
#[derive(Default)]
pub struct ExtensionRegistry {
    generating: Vec<Arc<dyn FenceGeneratingProvider>>,
    language: Vec<Arc<dyn FenceLanguageProvider>>,
}

impl ExtensionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fence rendering provider. Order is significant: the first
    /// accepting provider wins.
    pub fn register_generating(&mut self, provider: Arc<dyn FenceGeneratingProvider>) {
        debug!("Registered generating provider: {}", provider.id());
        self.generating.push(provider);
    }

    /// Registers a language selection provider.
    pub fn register_language(&mut self, provider: Arc<dyn FenceLanguageProvider>) {
        self.language.push(provider);
    }

    /// All registered generating providers, in registration order.
    pub fn generating_providers(&self) -> &[Arc<dyn FenceGeneratingProvider>] {
        &self.generating
    }

    /// The first provider accepting the given info string.
    pub fn provider_for(&self, info_string: &str) -> Option<&Arc<dyn FenceGeneratingProvider>> {
        self.generating.iter().find(|p| p.accepts(info_string))
    }

    /// Cache roots of all providers with the cacheable capability.
    ///
    /// Deduplicated, registration order preserved. Providers without the
    /// capability contribute no root and are skipped by path-based eviction.
    pub fn cacheable_roots(&self) -> Vec<PathBuf> {
        let mut roots: Vec<PathBuf> = Vec::new();
        for provider in &self.generating {
            if let Some(cacheable) = provider.as_cacheable() {
                let root = cacheable.cache_root();
                if !roots.contains(&root) {
                    roots.push(root);
                }
            }
        }
        roots
    }

    /// Resolves the highlight language for an info string.
    ///
    /// The first language provider returning `Some` wins; with no custom
    /// rule, the lowercased first token of the info string is used.
    pub fn resolve_language(&self, info_string: &str) -> Option<LanguageId> {
        for provider in &self.language {
            if let Some(id) = provider.language_for_info_string(info_string) {
                return Some(id);
            }
        }

        info_string
            .split_whitespace()
            .next()
            .map(|token| LanguageId::new(token.to_ascii_lowercase()))
    }

    /// Completion variants from all language providers, in registration
    /// order.
    pub fn completion_variants(&self) -> Vec<FenceCompletion> {
        self.language
            .iter()
            .flat_map(|p| p.completion_variants())
            .collect()
    }
}
