//! Registry configuration

use crate::types::DEFAULT_SEPARATOR;
use serde::{Deserialize, Serialize};

/// Registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Separator joining an action and its resource in exported permission strings
    pub separator: String,

    /// Seed the alias table with the built-in aliases (`manage`)
    pub builtin_aliases: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            builtin_aliases: true,
        }
    }
}

impl RegistryConfig {
    /// Use a custom separator for exported permission strings
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Enable or disable the built-in aliases
    pub fn with_builtin_aliases(mut self, enabled: bool) -> Self {
        self.builtin_aliases = enabled;
        self
    }
}
