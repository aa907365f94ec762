//! cli
//!
//! Command-line interface layer for ict.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install diagnostic logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! handlers that call into [`crate::engine`] and [`crate::query`]. Resolving
//! and running a target always goes through [`crate::engine::run_test`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use crate::engine;
use crate::ui::logging;
use anyhow::Result;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`. Returns the exit code
/// the process should end with.
pub fn run() -> Result<i32> {
    let cli = Cli::parse_args();

    let ctx = engine::Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };
    logging::init(ctx.verbosity());

    commands::dispatch(cli.command, &ctx)
}
