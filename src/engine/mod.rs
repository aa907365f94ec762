//! engine
//!
//! Resolves a test target and runs it.
//!
//! # Architecture
//!
//! 1. **Resolve** ([`resolve`]): ask the [`crate::query::TargetIndex`] whether the
//!    target exists; for a missing target, rank the universe for suggestions
//! 2. **Assemble** ([`assemble`]): build the exact runner command line
//! 3. **Invoke** ([`driver`]): print the command, then run it with inherited
//!    stdio unless this is a dry run
//!
//! [`runner::run_test`] ties the three together and maps failures into
//! [`runner::RunError`].
//!
//! # Invariants
//!
//! - Resolution, ranking and assembly are pure with respect to their inputs
//! - The runner's exit code is never translated
//! - Nothing is retried

pub mod assemble;
pub mod driver;
pub mod resolve;
pub mod runner;

pub use assemble::{assemble, ArgumentVector, RunConfig};
pub use driver::{invoke, ExitResult, LaunchError};
pub use resolve::{resolve, Resolution, ResolveError};
pub use runner::{run_test, RunError, TestRequest};

use std::path::PathBuf;

use anyhow::{Context as _, Result};

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    /// The directory commands act in: `--cwd` if given, else the process's.
    pub fn working_dir(&self) -> Result<PathBuf> {
        match &self.cwd {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().context("Failed to determine current directory"),
        }
    }

    /// Output verbosity implied by the flags.
    pub fn verbosity(&self) -> crate::ui::output::Verbosity {
        crate::ui::output::Verbosity::from_flags(self.quiet, self.debug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::output::Verbosity;

    mod context {
        use super::*;

        #[test]
        fn default_values() {
            let ctx = Context::default();
            assert!(ctx.cwd.is_none());
            assert!(!ctx.debug);
            assert!(!ctx.quiet);
            assert_eq!(ctx.verbosity(), Verbosity::Normal);
        }

        #[test]
        fn cwd_override_wins() {
            let ctx = Context {
                cwd: Some(PathBuf::from("/custom")),
                ..Default::default()
            };
            assert_eq!(ctx.working_dir().unwrap(), PathBuf::from("/custom"));
        }

        #[test]
        fn quiet_beats_debug() {
            let ctx = Context {
                cwd: None,
                debug: true,
                quiet: true,
            };
            assert_eq!(ctx.verbosity(), Verbosity::Quiet);
        }
    }
}
