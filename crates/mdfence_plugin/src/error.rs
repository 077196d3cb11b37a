//! Provider error types.

use thiserror::Error;

/// Errors that can occur in the provider extension system.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider failed to render a fence.
    #[error("Render failed: {0}")]
    RenderFailed(String),

    /// The fence is not supported by this provider.
    #[error("Unsupported fence: {0}")]
    Unsupported(String),

    /// A cacheable provider was invoked without a cache directory.
    #[error("Missing cache directory for provider: {0}")]
    MissingCacheDir(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProviderError {
    /// Creates a render error.
    pub fn render(message: impl Into<String>) -> Self {
        Self::RenderFailed(message.into())
    }

    /// Creates an unsupported-fence error.
    pub fn unsupported(info_string: impl Into<String>) -> Self {
        Self::Unsupported(info_string.into())
    }
}
