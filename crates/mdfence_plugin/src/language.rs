//! Custom language selection for fenced code blocks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a syntax-highlighting language, e.g. `"rust"` or `"puml"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageId(String);

impl LanguageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A completion item for fence info strings.
///
/// Variants contributed by language providers are prepended to the default
/// language list offered after an opening fence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FenceCompletion {
    /// Text inserted into the info string.
    pub info_string: String,
    /// Human-readable label, shown instead of `info_string` when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FenceCompletion {
    pub fn new(info_string: impl Into<String>) -> Self {
        Self {
            info_string: info_string.into(),
            label: None,
        }
    }

    pub fn with_label(info_string: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            info_string: info_string.into(),
            label: Some(label.into()),
        }
    }
}

/// Extension point for choosing which language to highlight inside a fence.
pub trait FenceLanguageProvider: Send + Sync {
    /// Custom rule for selecting the language for the given info string.
    ///
    /// The info string is passed verbatim (not trimmed nor lowercased).
    /// Returning `None` means no custom rule applies and the default
    /// info-string token is used.
    fn language_for_info_string(&self, info_string: &str) -> Option<LanguageId>;

    /// Extra completion variants for info strings.
    fn completion_variants(&self) -> Vec<FenceCompletion> {
        Vec::new()
    }
}
