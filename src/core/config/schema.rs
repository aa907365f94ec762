//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$ICT_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/ict/config.toml`
//! 3. `~/.ict/config.toml` (canonical write location)
//!
//! # Workspace Config
//!
//! Located at `<workspace root>/.ict/config.toml`.
//!
//! # Validation
//!
//! Config values are validated after parsing: strings that are set must not
//! be blank, and the suggestion limit must be at least one.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// runner = "bazelisk"
/// farm_url = "https://farm.example.org"
/// suggestion_limit = 10
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Runner executable (e.g., "bazel", "bazelisk")
    pub runner: Option<String>,

    /// Default farm base URL
    pub farm_url: Option<String>,

    /// How many suggestions to show for a missing target
    pub suggestion_limit: Option<usize>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_non_blank("runner", self.runner.as_deref())?;
        validate_non_blank("farm_url", self.farm_url.as_deref())?;
        validate_limit(self.suggestion_limit)
    }
}

/// Workspace configuration.
///
/// # Example
///
/// ```toml
/// universe = "kind(system_test, //rs/tests/...)"
/// farm_url = "https://farm.staging.example.org"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WorkspaceConfig {
    /// Runner executable, overriding the global one
    pub runner: Option<String>,

    /// Farm base URL, overriding the global one
    pub farm_url: Option<String>,

    /// Suggestion limit, overriding the global one
    pub suggestion_limit: Option<usize>,

    /// Bazel query expression listing the targets suggestions come from
    pub universe: Option<String>,
}

impl WorkspaceConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_non_blank("runner", self.runner.as_deref())?;
        validate_non_blank("farm_url", self.farm_url.as_deref())?;
        validate_non_blank("universe", self.universe.as_deref())?;
        validate_limit(self.suggestion_limit)
    }
}

fn validate_non_blank(key: &str, value: Option<&str>) -> Result<(), ConfigError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(ConfigError::InvalidValue(format!(
            "'{key}' cannot be empty"
        ))),
        _ => Ok(()),
    }
}

fn validate_limit(limit: Option<usize>) -> Result<(), ConfigError> {
    match limit {
        Some(0) => Err(ConfigError::InvalidValue(
            "'suggestion_limit' must be at least 1".into(),
        )),
        _ => Ok(()),
    }
}
