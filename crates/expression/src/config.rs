//! Completion settings

use serde::{Deserialize, Serialize};

/// Settings for [`ExpressionSuggester`](crate::ExpressionSuggester)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Upper bound on returned suggestions
    pub max_suggestions: usize,
    /// Match the typed prefix case-sensitively
    pub case_sensitive: bool,
    /// Offer methods as well as fields
    pub include_methods: bool,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            max_suggestions: 50,
            case_sensitive: false,
            include_methods: true,
        }
    }
}

impl CompletionConfig {
    /// Whether `name` starts with `prefix` under these settings
    pub(crate) fn matches(&self, name: &str, prefix: &str) -> bool {
        if self.case_sensitive {
            name.starts_with(prefix)
        } else {
            name.to_lowercase().starts_with(&prefix.to_lowercase())
        }
    }
}
