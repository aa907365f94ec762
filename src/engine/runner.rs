//! engine::runner
//!
//! The single entry point for running a system test.
//!
//! # Lifecycle
//!
//! ```text
//! Resolve -> (exists)  Assemble -> Invoke -> exit code
//!         -> (missing) Suggest  -> RunError::NotFound*
//! ```
//!
//! # Invariants
//!
//! - Nothing is assembled or invoked for a target that did not resolve
//! - Every failure is reported once; nothing is retried
//! - A runner that exits non-zero is a result, not a `RunError`
//!
//! # Example
//!
//! ```
//! use ict::core::suggest::Suggester;
//! use ict::core::types::TargetLabel;
//! use ict::engine::assemble::RunConfig;
//! use ict::engine::runner::{run_test, TestRequest};
//! use ict::query::mock::MockIndex;
//!
//! let index = MockIndex::with_targets(["//rs/tests:basic_health_test"]);
//! let request = TestRequest {
//!     target: TargetLabel::new("//rs/tests:basic_health_test").unwrap(),
//!     config: RunConfig { dry_run: true, ..Default::default() },
//!     passthrough: vec![],
//!     dir: None,
//! };
//!
//! let mut out = Vec::new();
//! let result = run_test(&index, &Suggester::default(), &request, &mut out).unwrap();
//! assert!(result.is_success());
//! ```

use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

use super::assemble::{assemble, RunConfig};
use super::driver::{invoke, ExitResult, LaunchError};
use super::resolve::{resolve, Resolution, ResolveError};
use crate::core::suggest::Suggester;
use crate::core::types::TargetLabel;
use crate::query::{QueryError, TargetIndex};

/// Errors from running a test target.
#[derive(Debug, Error)]
pub enum RunError {
    /// Checking whether the target exists failed.
    #[error("failed to look up test target `{target}`")]
    Lookup {
        /// The requested target
        target: TargetLabel,
        /// The query failure
        source: QueryError,
    },

    /// Listing targets for suggestions failed.
    #[error("failed to list test targets")]
    UniverseQuery(#[source] QueryError),

    /// The target does not exist and nothing resembles it.
    #[error("No test target `{target}` was found")]
    NotFound {
        /// The requested target
        target: TargetLabel,
    },

    /// The target does not exist; these are the closest candidates.
    #[error(
        "No test target `{target}` was found:\nDid you mean any of:\n{}",
        join_lines(.suggestions)
    )]
    NotFoundWithSuggestions {
        /// The requested target
        target: TargetLabel,
        /// Closest candidates, best first
        suggestions: Vec<TargetLabel>,
    },

    /// The runner could not be started.
    #[error(transparent)]
    Launch(#[from] LaunchError),
}

impl RunError {
    /// Whether this error means the target does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RunError::NotFound { .. } | RunError::NotFoundWithSuggestions { .. }
        )
    }

    /// Suggestions carried by a not-found error.
    pub fn suggestions(&self) -> &[TargetLabel] {
        match self {
            RunError::NotFoundWithSuggestions { suggestions, .. } => suggestions,
            _ => &[],
        }
    }
}

fn join_lines(labels: &[TargetLabel]) -> String {
    labels
        .iter()
        .map(TargetLabel::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Everything needed to run one target.
#[derive(Debug, Clone)]
pub struct TestRequest {
    /// The target to run.
    pub target: TargetLabel,
    /// Resolved options.
    pub config: RunConfig,
    /// Arguments given after `--`, forwarded verbatim.
    pub passthrough: Vec<String>,
    /// Directory the runner starts in; the one the target was resolved from.
    pub dir: Option<PathBuf>,
}

/// Resolve, assemble and invoke a test target.
///
/// The assembled command is written to `out` before it runs (or in place of
/// running it, on a dry run).
///
/// # Errors
///
/// See [`RunError`].
pub fn run_test(
    index: &dyn TargetIndex,
    suggester: &Suggester,
    request: &TestRequest,
    out: &mut dyn Write,
) -> Result<ExitResult, RunError> {
    let target = &request.target;

    match resolve(index, suggester, target) {
        Ok(Resolution::Exists) => {}
        Ok(Resolution::NotFound(suggestions)) if suggestions.is_empty() => {
            return Err(RunError::NotFound {
                target: target.clone(),
            });
        }
        Ok(Resolution::NotFound(suggestions)) => {
            return Err(RunError::NotFoundWithSuggestions {
                target: target.clone(),
                suggestions,
            });
        }
        Err(ResolveError::Lookup(source)) => {
            return Err(RunError::Lookup {
                target: target.clone(),
                source,
            });
        }
        Err(ResolveError::Universe(source)) => return Err(RunError::UniverseQuery(source)),
    }

    let argv = assemble(target, &request.config, &request.passthrough);
    Ok(invoke(
        &argv,
        request.config.dry_run,
        request.dir.as_deref(),
        out,
    )?)
}
