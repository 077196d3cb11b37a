//! # mdfence_plugin
//!
//! Provider extension points for mdfence markdown previews.
//!
//! This crate provides:
//! - The `FenceGeneratingProvider` trait for renderers of fenced code blocks
//! - The `CacheableProvider` capability for providers with on-disk caches
//! - The `FenceLanguageProvider` trait for custom syntax-highlight selection
//! - The `ExtensionRegistry` holding the ordered provider lists
//!
//! ## Architecture
//!
//! Providers are plain trait objects registered once at session start and
//! shared by `Arc`. A provider whose artifacts live on disk opts into the
//! `CacheableProvider` capability; its cache root is then visible to the
//! eviction sweep in `mdfence_cache`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use mdfence_plugin::ExtensionRegistry;
//!
//! let mut registry = ExtensionRegistry::new();
//! registry.register_generating(Arc::new(PlantUmlProvider::new(cache_root)));
//!
//! let provider = registry.provider_for("puml");
//! ```

mod error;
mod fence;
mod language;
mod provider;
mod registry;

pub use error::ProviderError;
pub use fence::CodeFence;
pub use language::{FenceCompletion, FenceLanguageProvider, LanguageId};
pub use provider::{CacheableProvider, FenceGeneratingProvider, RenderedFence};
pub use registry::ExtensionRegistry;
