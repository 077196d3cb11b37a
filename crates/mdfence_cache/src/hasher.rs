//! Path-hash naming contract for cache directories.

use std::path::{Path, PathBuf};

/// Salt mixed into every source path hash.
///
/// This value is a fixed contract shared with the artifact-producing side:
/// the directory written at render time and the directory recognized by the
/// sweep must hash identically. Changing it orphans every existing cache
/// directory.
pub const SOURCE_PATH_SALT: &str = "mdfence-source-path-v1";

/// Maps a source document path to its cache subdirectory name.
///
/// Deterministic: the same path and salt always produce the same name. The
/// hash is used only for directory naming, not for security; collisions are
/// not defended against.
#[derive(Debug, Clone)]
pub struct SourcePathHasher {
    salt: String,
}

impl SourcePathHasher {
    /// Creates a hasher with a specific salt.
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    /// Computes the cache directory name for a source path.
    pub fn hash(&self, source_path: &Path) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.salt.as_bytes());
        hasher.update(&[0]);
        hasher.update(source_path.to_string_lossy().as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    /// The cache directory for a source path under the given root.
    pub fn cache_dir_for(&self, root: &Path, source_path: &Path) -> PathBuf {
        root.join(self.hash(source_path))
    }

    /// Whether `dir` is the cache directory for `source_path`.
    ///
    /// Membership test is file-name equality with the hash of the source
    /// path.
    pub fn is_cache_dir_for(&self, dir: &Path, source_path: &Path) -> bool {
        dir.file_name()
            .map(|name| *name == *self.hash(source_path).as_str())
            .unwrap_or(false)
    }
}

impl Default for SourcePathHasher {
    fn default() -> Self {
        Self::new(SOURCE_PATH_SALT)
    }
}
