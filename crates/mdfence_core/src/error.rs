//! Core error types.

use thiserror::Error;

/// Errors that can occur while orchestrating previews.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Markdown parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Provider error.
    #[error("Provider error: {0}")]
    Provider(#[from] mdfence_plugin::ProviderError),

    /// Cache error.
    #[error("Cache error: {0}")]
    Cache(#[from] mdfence_cache::CacheError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
