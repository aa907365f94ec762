//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens a [`Session`] (working directory, workspace, configuration)
//! 2. Calls the engine or query layer
//! 3. Formats and displays output
//!
//! Handlers return the process exit code. Only `test` can return a non-zero
//! code without an error: the runner's own exit code.

mod completion;
mod config_cmd;
mod targets;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, set as config_set};
pub use targets::targets;
pub use test::test;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use tracing::debug;

use crate::cli::args::{Command, ConfigAction};
use crate::core::config::Config;
use crate::core::paths::WorkspacePaths;
use crate::engine::Context;
use crate::query::BazelQuery;
use crate::ui::output;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<i32> {
    match command {
        Command::Test {
            target,
            dry_run,
            keepalive,
            include_tests,
            farm_url,
            bazel_args,
        } => test::test(
            ctx,
            &target,
            dry_run,
            keepalive,
            include_tests.as_deref(),
            farm_url.as_deref(),
            &bazel_args,
        ),
        Command::Targets { filter, json } => {
            targets::targets(ctx, filter.as_deref(), json).map(|()| 0)
        }
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set { key, value, global } => config_cmd::set(ctx, &key, &value, global),
            ConfigAction::List => config_cmd::list(ctx),
        }
        .map(|()| 0),
        Command::Completion { shell } => completion::completion(shell).map(|()| 0),
    }
}

/// Where a command runs and with which configuration.
#[derive(Debug)]
pub(crate) struct Session {
    /// Working directory.
    pub dir: PathBuf,
    /// Enclosing Bazel workspace, if any.
    pub workspace: Option<WorkspacePaths>,
    /// Merged configuration.
    pub config: Config,
}

impl Session {
    /// Discover the workspace and load configuration for `ctx`.
    ///
    /// Config warnings are printed (unless quiet).
    pub fn open(ctx: &Context) -> Result<Self> {
        let dir = ctx.working_dir()?;
        let workspace = WorkspacePaths::discover(&dir);
        debug!(dir = %dir.display(), workspace = ?workspace.as_ref().map(|w| &w.root), "session");

        let loaded = Config::load(workspace.as_ref()).context("Failed to load configuration")?;
        for warning in &loaded.warnings {
            output::warn(
                format!("{} ({})", warning.message, warning.path.display()),
                ctx.verbosity(),
            );
        }

        Ok(Self {
            dir,
            workspace,
            config: loaded.config,
        })
    }

    /// Target index for this session's runner, universe and directory.
    pub fn index(&self) -> BazelQuery {
        BazelQuery::new(self.config.runner())
            .with_universe(self.config.universe())
            .in_dir(&self.dir)
    }
}
