//! # mdfence_core
//!
//! Preview orchestration for mdfence.
//!
//! This crate provides:
//! - Configuration loading (`.mdfence.jsonc` / `.mdfence.json`)
//! - Fenced code block extraction from markdown sources
//! - The `FenceRenderer` render session tying providers to the cache
//! - A document event bus feeding delete notifications into the sweep
//!
//! ## Example
//!
//! ```rust,ignore
//! use mdfence_core::{FenceRenderer, PreviewConfig};
//!
//! let config = PreviewConfig::from_file(".mdfence.jsonc")?;
//! let renderer = FenceRenderer::new(extensions, cache_manager);
//!
//! let outcome = renderer.render_document("/docs/readme.md", &source)?;
//! for block in &outcome.blocks {
//!     println!("{}", block.html);
//! }
//! ```

mod config;
mod error;
mod events;
mod fence;
mod session;

pub use config::PreviewConfig;
pub use error::CoreError;
pub use events::{DocumentEvent, DocumentEventBus, connect_cache, is_markdown_path};
pub use fence::extract_fences;
pub use session::{FenceRenderer, RenderOutcome, RenderedBlock};

pub use mdfence_plugin::{CodeFence, ExtensionRegistry, LanguageId};
