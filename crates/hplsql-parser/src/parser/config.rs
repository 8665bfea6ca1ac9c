//! Parser configuration.

use serde::{Deserialize, Serialize};

/// What the parser does after a syntax error in a top-level statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryMode {
    /// Return the first error.
    #[default]
    Fail,
    /// Record the error, skip to the next statement boundary and keep going.
    Resynchronize,
}

/// Parser settings. Every field has a default, so a partial JSON or TOML
/// document deserializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Error recovery policy.
    pub recovery: RecoveryMode,
    /// Upper bound on recorded errors under [`RecoveryMode::Resynchronize`].
    pub max_errors: usize,
    /// Parse `AND` at a tighter level than `OR`. Off by default: both
    /// share one left-associative level.
    pub and_binds_tighter: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            recovery: RecoveryMode::Fail,
            max_errors: 100,
            and_binds_tighter: false,
        }
    }
}

impl ParserConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the recovery mode.
    #[must_use]
    pub const fn with_recovery(mut self, recovery: RecoveryMode) -> Self {
        self.recovery = recovery;
        self
    }

    /// Sets the maximum number of recorded errors.
    #[must_use]
    pub const fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    /// Enables or disables standard AND-over-OR precedence.
    #[must_use]
    pub const fn with_and_binds_tighter(mut self, enabled: bool) -> Self {
        self.and_binds_tighter = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParserConfig::default();
        assert_eq!(config.recovery, RecoveryMode::Fail);
        assert!(!config.and_binds_tighter);
        assert_eq!(config.max_errors, 100);
    }

    #[test]
    fn test_builder() {
        let config = ParserConfig::new()
            .with_recovery(RecoveryMode::Resynchronize)
            .with_max_errors(3)
            .with_and_binds_tighter(true);
        assert_eq!(config.recovery, RecoveryMode::Resynchronize);
        assert_eq!(config.max_errors, 3);
        assert!(config.and_binds_tighter);
    }

    #[test]
    fn test_partial_json() {
        let config: ParserConfig = serde_json::from_str(r#"{"recovery":"resynchronize"}"#).unwrap();
        assert_eq!(config.recovery, RecoveryMode::Resynchronize);
        assert_eq!(config.max_errors, 100);
    }
}
