//! Preview configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Configuration for the preview cache layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Whether artifact caching is enabled.
    #[serde(default = "default_cache")]
    pub cache: bool,

    /// Base directory for provider cache roots. Defaults to the platform
    /// cache directory.
    #[serde(default)]
    pub cache_dir: Option<String>,

    /// Interval between eviction sweeps, in milliseconds.
    #[serde(default = "default_sweep_interval_ms")]
    pub sweep_interval_ms: u64,

    /// File patterns hosts should treat as markdown documents.
    #[serde(default)]
    pub include: Vec<String>,

    /// File patterns to exclude from preview handling.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Base directory for resolving relative paths, usually the directory
    /// containing the configuration file.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

fn default_cache() -> bool {
    true
}

fn default_sweep_interval_ms() -> u64 {
    600_000
}

impl PreviewConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self {
            cache: true,
            cache_dir: None,
            sweep_interval_ms: default_sweep_interval_ms(),
            include: Vec::new(),
            exclude: Vec::new(),
            base_dir: None,
        }
    }

    /// Loads configuration from a file.
    ///
    /// Supports `.mdfence.jsonc`, `.mdfence.json`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| CoreError::config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;

        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }

        Ok(config)
    }

    /// Parses configuration from a JSON or JSONC string.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let value = jsonc_parser::parse_to_serde_value(json, &Default::default())
            .map_err(|e| CoreError::config(format!("Invalid JSON: {}", e)))?
            .ok_or_else(|| CoreError::config("Empty config"))?;

        serde_json::from_value(value)
            .map_err(|e| CoreError::config(format!("Invalid config: {}", e)))
    }

    /// Resolves the base directory under which provider cache roots live.
    pub fn cache_base_dir(&self) -> Result<PathBuf, CoreError> {
        if let Some(dir) = &self.cache_dir {
            let path = PathBuf::from(dir);
            return Ok(match (&self.base_dir, path.is_relative()) {
                (Some(base), true) => base.join(path),
                _ => path,
            });
        }

        dirs::cache_dir()
            .map(|base| base.join("mdfence"))
            .ok_or(CoreError::Cache(mdfence_cache::CacheError::DirResolutionFailed))
    }

    /// The sweep interval as a `Duration`.
    pub fn sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.sweep_interval_ms)
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_new_defaults() {
        let config = PreviewConfig::new();
        assert!(config.cache);
        assert_eq!(config.sweep_interval_ms, 600_000);
        assert!(config.cache_dir.is_none());
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{ "cache": false, "sweep_interval_ms": 1000 }"#;

        let config = PreviewConfig::from_json(json).unwrap();
        assert!(!config.cache);
        assert_eq!(config.sweep_interval_ms, 1000);
    }

    #[test]
    fn test_config_from_jsonc_with_comments() {
        let jsonc = r#"{
            // Sweep every minute.
            "sweep_interval_ms": 60000,
        }"#;

        let config = PreviewConfig::from_json(jsonc).unwrap();
        assert_eq!(config.sweep_interval_ms, 60_000);
    }

    #[test]
    fn test_config_invalid_json() {
        assert!(PreviewConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_config_from_file_sets_base_dir() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(".mdfence.json");
        fs::write(&path, r#"{ "cache_dir": "artifacts" }"#).unwrap();

        let config = PreviewConfig::from_file(&path).unwrap();

        assert_eq!(config.base_dir.as_deref(), Some(temp.path()));
        assert_eq!(
            config.cache_base_dir().unwrap(),
            temp.path().join("artifacts")
        );
    }

    #[test]
    fn test_cache_base_dir_absolute_override() {
        let mut config = PreviewConfig::new();
        config.cache_dir = Some("/var/cache/mdfence".to_string());

        assert_eq!(
            config.cache_base_dir().unwrap(),
            PathBuf::from("/var/cache/mdfence")
        );
    }

    #[test]
    fn test_sweep_interval_duration() {
        let mut config = PreviewConfig::new();
        config.sweep_interval_ms = 250;

        assert_eq!(config.sweep_interval(), std::time::Duration::from_millis(250));
    }
}
