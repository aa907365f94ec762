//! query::interface
//!
//! The capability trait through which ict asks the build graph about targets.
//!
//! # Design
//!
//! The surface is deliberately two methods wide: "does this target exist"
//! and "which targets are there". Everything ict decides about targets is
//! computed on top of these answers, so the decision logic runs unchanged
//! against [`super::BazelQuery`] or the in-memory [`super::mock::MockIndex`].
//!
//! # Error Handling
//!
//! A target that does not exist is an `Ok(false)` answer, never an error.
//! Errors mean the question could not be answered:
//! - [`QueryError::Unavailable`]: the query tool could not be started
//! - [`QueryError::Failed`]: the query tool ran and reported a failure

use std::collections::BTreeSet;

use thiserror::Error;

use crate::core::types::TargetLabel;

/// Errors from target queries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The query tool could not be launched.
    #[error("could not run `{program}`: {message}")]
    Unavailable {
        /// The program that failed to start
        program: String,
        /// The underlying OS error
        message: String,
    },

    /// The query ran but did not succeed.
    #[error("query `{expression}` failed ({status}): {stderr}")]
    Failed {
        /// The query expression
        expression: String,
        /// Exit status description
        status: String,
        /// Captured standard error, trimmed
        stderr: String,
    },
}

/// Read-only access to the set of known targets.
pub trait TargetIndex {
    /// Whether `target` names a target in the build graph.
    fn exists(&self, target: &TargetLabel) -> Result<bool, QueryError>;

    /// Every target in the universe ict suggests from.
    fn enumerate(&self) -> Result<BTreeSet<TargetLabel>, QueryError>;
}

impl<T: TargetIndex + ?Sized> TargetIndex for &T {
    fn exists(&self, target: &TargetLabel) -> Result<bool, QueryError> {
        (**self).exists(target)
    }

    fn enumerate(&self) -> Result<BTreeSet<TargetLabel>, QueryError> {
        (**self).enumerate()
    }
}
