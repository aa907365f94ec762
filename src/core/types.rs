//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`TargetLabel`] - A build-graph target identifier (e.g. `//rs/tests:basic_health_test`)
//!
//! # Validation
//!
//! Labels are validated at construction time. Beyond being non-blank the
//! format is opaque here: whether a label names a real target is decided by
//! the [`crate::query::TargetIndex`].
//!
//! # Examples
//!
//! ```
//! use ict::core::types::TargetLabel;
//!
//! let label = TargetLabel::new("//rs/tests:basic_health_test").unwrap();
//! assert_eq!(label.name(), "basic_health_test");
//!
//! assert!(TargetLabel::new("").is_err());
//! assert!(TargetLabel::new("   ").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid target label: {0}")]
    InvalidTargetLabel(String),
}

/// A validated build target label.
///
/// The only structural rule is that a label is never empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetLabel(String);

impl TargetLabel {
    /// Create a new validated target label.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidTargetLabel` if the label is empty or blank.
    pub fn new(label: impl Into<String>) -> Result<Self, TypeError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(TypeError::InvalidTargetLabel(
                "target label cannot be empty".into(),
            ));
        }
        Ok(Self(label))
    }

    /// Get the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The target-name part of the label.
    ///
    /// This is the text after the last `:`, or after the last `/` when the
    /// label has no `:`. For `//rs/tests:foo` this is `foo`; for `//rs/foo`
    /// it is `foo`.
    pub fn name(&self) -> &str {
        target_name(&self.0)
    }
}

/// Target-name part of a raw label string. See [`TargetLabel::name`].
pub(crate) fn target_name(label: &str) -> &str {
    match label.rfind(':') {
        Some(idx) => &label[idx + 1..],
        None => match label.rfind('/') {
            Some(idx) => &label[idx + 1..],
            None => label,
        },
    }
}

impl TryFrom<String> for TargetLabel {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TargetLabel> for String {
    fn from(label: TargetLabel) -> Self {
        label.0
    }
}

impl std::str::FromStr for TargetLabel {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for TargetLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
