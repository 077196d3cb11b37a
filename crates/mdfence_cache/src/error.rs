//! Cache error types.

use thiserror::Error;

/// Errors that can occur in the cache layer.
///
/// The eviction sweep itself never surfaces errors; this type covers the
/// producing side (cache directory creation) and configuration.
#[derive(Debug, Error)]
pub enum CacheError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cache directory resolution failed.
    #[error("Cache directory resolution failed")]
    DirResolutionFailed,
}
