//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! ict has two configuration scopes:
//! - **Global**: User-level settings
//! - **Workspace**: Per-Bazel-workspace overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Workspace config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$ICT_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/ict/config.toml`
//! 3. `~/.ict/config.toml` (canonical write location)
//!
//! # Workspace Config Location
//!
//! `<workspace root>/.ict/config.toml`, see [`crate::core::paths`].
//!
//! # Example
//!
//! ```no_run
//! use ict::core::config::Config;
//! use ict::core::paths::WorkspacePaths;
//! use std::path::Path;
//!
//! let workspace = WorkspacePaths::discover(Path::new("."));
//! let result = Config::load(workspace.as_ref()).unwrap();
//! let config = result.config;
//!
//! println!("Runner: {}", config.runner());
//! println!("Suggestions: {}", config.suggestion_limit());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, WorkspaceConfig};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use super::paths::WorkspacePaths;
use super::suggest::DEFAULT_SUGGESTION_LIMIT;
use crate::engine::assemble::DEFAULT_RUNNER;
use crate::query::DEFAULT_UNIVERSE;

/// Environment variable naming the global config file.
pub const CONFIG_ENV: &str = "ICT_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}'")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}'")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence: workspace config overrides global config,
/// which overrides built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Workspace configuration (if in a workspace with a config file)
    pub workspace: Option<WorkspaceConfig>,
    global_path: Option<PathBuf>,
    workspace_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `workspace` is provided, also loads its workspace config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or hold
    /// invalid values. Missing config files are not an error.
    pub fn load(workspace: Option<&WorkspacePaths>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();
        let global_path = Self::locate_global(&mut warnings);
        let mut result = Self::load_from(global_path.as_deref(), workspace)?;
        warnings.append(&mut result.warnings);
        result.warnings = warnings;
        Ok(result)
    }

    /// Load configuration from an explicit global config path.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_from(
        global_path: Option<&Path>,
        workspace: Option<&WorkspacePaths>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let (global, global_path) = match global_path {
            Some(path) if path.is_file() => (read_config(path)?, Some(path.to_path_buf())),
            _ => (GlobalConfig::default(), None),
        };

        let (ws, workspace_path) = match workspace.map(WorkspacePaths::config_path) {
            Some(path) if path.is_file() => {
                let config: WorkspaceConfig = read_config(&path)?;
                (Some(config), Some(path))
            }
            _ => (None, None),
        };

        global.validate()?;
        if let Some(ref w) = ws {
            w.validate()?;
        }

        debug!(
            global = ?global_path,
            workspace = ?workspace_path,
            "loaded configuration"
        );

        Ok(ConfigLoadResult {
            config: Config {
                global,
                workspace: ws,
                global_path,
                workspace_path,
            },
            warnings: Vec::new(),
        })
    }

    /// Find the global config file, if any.
    fn locate_global(warnings: &mut Vec<ConfigWarning>) -> Option<PathBuf> {
        // 1. Check $ICT_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.is_file() {
                return Some(path);
            }
            warnings.push(ConfigWarning {
                message: format!("${CONFIG_ENV} points to a missing file, ignoring it"),
                path,
            });
        }

        // 2. Check $XDG_CONFIG_HOME/ict/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("ict/config.toml");
            if path.is_file() {
                return Some(path);
            }
        }

        // 3. Check ~/.ict/config.toml
        dirs::home_dir()
            .map(|home| home.join(".ict/config.toml"))
            .filter(|path| path.is_file())
    }

    /// Get the canonical path for global config.
    ///
    /// Returns `~/.ict/config.toml`.
    pub fn global_config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".ict/config.toml"))
    }

    /// Path that global edits should go to.
    ///
    /// The file this config was loaded from, else `$ICT_CONFIG`, else the
    /// canonical location.
    pub fn global_write_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.global_path {
            return Ok(path.clone());
        }
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Ok(PathBuf::from(path)),
            _ => Self::global_config_path(),
        }
    }

    /// Write global config atomically to `path`.
    pub fn write_global_to(path: &Path, config: &GlobalConfig) -> Result<(), ConfigError> {
        config.validate()?;
        write_config_atomic(path, config)
    }

    /// Write workspace config atomically.
    pub fn write_workspace(
        workspace: &WorkspacePaths,
        config: &WorkspaceConfig,
    ) -> Result<PathBuf, ConfigError> {
        config.validate()?;
        let path = workspace.config_path();
        write_config_atomic(&path, config)?;
        Ok(path)
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Runner executable.
    ///
    /// Defaults to "bazel" if not configured.
    pub fn runner(&self) -> &str {
        self.workspace
            .as_ref()
            .and_then(|w| w.runner.as_deref())
            .or(self.global.runner.as_deref())
            .unwrap_or(DEFAULT_RUNNER)
    }

    /// Farm base URL, if configured anywhere.
    pub fn farm_url(&self) -> Option<&str> {
        self.workspace
            .as_ref()
            .and_then(|w| w.farm_url.as_deref())
            .or(self.global.farm_url.as_deref())
    }

    /// Number of suggestions for a missing target.
    ///
    /// Defaults to 7 if not configured.
    pub fn suggestion_limit(&self) -> usize {
        self.workspace
            .as_ref()
            .and_then(|w| w.suggestion_limit)
            .or(self.global.suggestion_limit)
            .unwrap_or(DEFAULT_SUGGESTION_LIMIT)
    }

    /// Query expression for the suggestion universe.
    ///
    /// Defaults to `tests(//rs/tests/...)` if not configured.
    pub fn universe(&self) -> &str {
        self.workspace
            .as_ref()
            .and_then(|w| w.universe.as_deref())
            .unwrap_or(DEFAULT_UNIVERSE)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded workspace config file.
    pub fn workspace_config_loaded_from(&self) -> Option<&Path> {
        self.workspace_path.as_deref()
    }
}

/// Read and parse a config file.
fn read_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write a config file atomically.
///
/// Creates parent directories if needed, writes a temp file next to the
/// target and renames it into place.
fn write_config_atomic<T: serde::Serialize>(path: &Path, config: &T) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let contents =
        toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

    let temp_path = path.with_extension("toml.tmp");
    let write_err = |source| ConfigError::WriteError {
        path: temp_path.clone(),
        source,
    };
    let mut file = fs::File::create(&temp_path).map_err(write_err)?;
    file.write_all(contents.as_bytes()).map_err(write_err)?;
    file.sync_all().map_err(write_err)?;

    fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}
