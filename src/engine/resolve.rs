//! engine::resolve
//!
//! Decides whether a requested target exists, and if not, what the user
//! probably meant.
//!
//! # Query Order
//!
//! 1. `exists(target)`. An error here aborts; nothing else is queried.
//! 2. Only for a missing target: `enumerate()`, then rank the universe with
//!    the [`Suggester`]. An error here replaces the not-found answer.

use thiserror::Error;
use tracing::debug;

use crate::core::suggest::Suggester;
use crate::core::types::TargetLabel;
use crate::query::{QueryError, TargetIndex};

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The target is in the build graph.
    Exists,
    /// The target is not; closest candidates first (possibly none).
    NotFound(Vec<TargetLabel>),
}

/// A resolution question the index could not answer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The existence check failed.
    #[error(transparent)]
    Lookup(QueryError),

    /// Enumerating the universe for suggestions failed.
    #[error(transparent)]
    Universe(QueryError),
}

/// Resolve `target` against `index`.
pub fn resolve(
    index: &dyn TargetIndex,
    suggester: &Suggester,
    target: &TargetLabel,
) -> Result<Resolution, ResolveError> {
    if index.exists(target).map_err(ResolveError::Lookup)? {
        debug!(%target, "target exists");
        return Ok(Resolution::Exists);
    }

    let universe = index.enumerate().map_err(ResolveError::Universe)?;
    let suggestions = suggester.suggest(target.as_str(), &universe);
    debug!(
        %target,
        universe = universe.len(),
        suggestions = suggestions.len(),
        "target missing"
    );
    Ok(Resolution::NotFound(suggestions))
}
