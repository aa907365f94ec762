//! query
//!
//! Single interface for asking the build graph about targets.
//!
//! # Architecture
//!
//! The rest of ict sees targets only through the [`TargetIndex`] trait.
//! [`BazelQuery`] is the production implementation; [`mock::MockIndex`]
//! answers from memory for tests.
//!
//! # Invariants
//!
//! - "Target does not exist" is an answer (`Ok(false)`), not an error
//! - No other module shells out to `bazel query`

mod bazel;
mod interface;
pub mod mock;

pub use bazel::{BazelQuery, DEFAULT_UNIVERSE};
pub use interface::{QueryError, TargetIndex};
