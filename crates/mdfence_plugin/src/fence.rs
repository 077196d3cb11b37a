//! Fenced code block value type.

/// A fenced code block extracted from a markdown document.
///
/// The info string is kept verbatim (not trimmed nor lowercased) so that
/// providers can apply their own matching rules, per the CommonMark
/// info-string convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeFence {
    /// The fence info string, e.g. `"puml"` or `"math display"`.
    pub info_string: String,
    /// The fence body.
    pub content: String,
    /// 1-based line of the opening fence, when known.
    pub line: Option<usize>,
}

impl CodeFence {
    /// Creates a fence with no position information.
    pub fn new(info_string: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            info_string: info_string.into(),
            content: content.into(),
            line: None,
        }
    }

    /// The first whitespace-delimited token of the info string, lowercased.
    ///
    /// This is the default language tag when no language provider claims the
    /// fence.
    pub fn language_token(&self) -> Option<String> {
        self.info_string
            .split_whitespace()
            .next()
            .map(|token| token.to_ascii_lowercase())
    }
}
