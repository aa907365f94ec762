//! config command - Get, set, or list configuration values

use anyhow::{bail, Context as _, Result};

use super::Session;
use crate::core::config::{Config, GlobalConfig, WorkspaceConfig};
use crate::engine::Context;
use crate::ui::output;

/// Keys understood by `config get` and `config set`.
pub const KEYS: [&str; 4] = ["runner", "farm_url", "suggestion_limit", "universe"];

/// Effective value of `key`, or `None` if it is unset.
fn effective(config: &Config, key: &str) -> Result<Option<String>> {
    Ok(match key {
        "runner" => Some(config.runner().to_string()),
        "farm_url" => config.farm_url().map(str::to_string),
        "suggestion_limit" => Some(config.suggestion_limit().to_string()),
        "universe" => Some(config.universe().to_string()),
        _ => bail!(
            "Unknown configuration key: {key} (expected one of: {})",
            KEYS.join(", ")
        ),
    })
}

fn parse_limit(value: &str) -> Result<usize> {
    value
        .parse()
        .with_context(|| format!("Invalid suggestion_limit '{value}': expected a positive integer"))
}

/// Get a configuration value.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let session = Session::open(ctx)?;

    // Unset keys print nothing
    if let Some(value) = effective(&session.config, key)? {
        println!("{}", value);
    }
    Ok(())
}

/// Set a configuration value.
///
/// Writes the workspace config unless `global` is set.
pub fn set(ctx: &Context, key: &str, value: &str, global: bool) -> Result<()> {
    let session = Session::open(ctx)?;
    effective(&session.config, key)?;

    let path = if global {
        let mut config: GlobalConfig = session.config.global.clone();
        match key {
            "runner" => config.runner = Some(value.to_string()),
            "farm_url" => config.farm_url = Some(value.to_string()),
            "suggestion_limit" => config.suggestion_limit = Some(parse_limit(value)?),
            _ => bail!("'{key}' can only be set in the workspace config"),
        }
        let path = session
            .config
            .global_write_path()
            .context("Failed to locate global config")?;
        Config::write_global_to(&path, &config).context("Failed to write config")?;
        path
    } else {
        let Some(workspace) = session.workspace.as_ref() else {
            bail!(
                "Not inside a Bazel workspace (no MODULE.bazel, WORKSPACE.bazel or WORKSPACE found). \
                 Use --global to set a user-level value."
            );
        };
        let mut config: WorkspaceConfig = session.config.workspace.clone().unwrap_or_default();
        match key {
            "runner" => config.runner = Some(value.to_string()),
            "farm_url" => config.farm_url = Some(value.to_string()),
            "suggestion_limit" => config.suggestion_limit = Some(parse_limit(value)?),
            _ => config.universe = Some(value.to_string()),
        }
        Config::write_workspace(workspace, &config).context("Failed to write config")?
    };

    output::print(
        format!("Set {} = {} ({})", key, value, path.display()),
        ctx.verbosity(),
    );
    Ok(())
}

/// List all configuration values.
pub fn list(ctx: &Context) -> Result<()> {
    let session = Session::open(ctx)?;
    let config = &session.config;

    println!("# Effective configuration");
    for key in KEYS {
        match effective(config, key)? {
            Some(value) => println!("{} = {}", key, value),
            None => println!("{} = (not set)", key),
        }
    }

    if ctx.verbosity() != output::Verbosity::Quiet {
        println!();
        println!("# Sources");
        match config.global_config_loaded_from() {
            Some(path) => println!("global = {}", path.display()),
            None => println!("global = (none)"),
        }
        match config.workspace_config_loaded_from() {
            Some(path) => println!("workspace = {}", path.display()),
            None => println!("workspace = (none)"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_defaults() {
        let config = Config::default();
        assert_eq!(effective(&config, "runner").unwrap().as_deref(), Some("bazel"));
        assert_eq!(effective(&config, "farm_url").unwrap(), None);
        assert_eq!(
            effective(&config, "suggestion_limit").unwrap().as_deref(),
            Some("7")
        );
    }

    #[test]
    fn unknown_key_lists_known_ones() {
        let err = effective(&Config::default(), "trunk").unwrap_err();
        assert!(err.to_string().contains("farm_url"));
    }

    #[test]
    fn limit_must_be_numeric() {
        assert_eq!(parse_limit("4").unwrap(), 4);
        assert!(parse_limit("four").is_err());
        assert!(parse_limit("-1").is_err());
    }
}
