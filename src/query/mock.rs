//! query::mock
//!
//! In-memory target index for deterministic testing.
//!
//! # Design
//!
//! `MockIndex` answers from a fixed set of labels, can be told to fail either
//! query, and records every call so tests can assert which queries happened.
//!
//! # Example
//!
//! ```
//! use ict::core::types::TargetLabel;
//! use ict::query::mock::{MockIndex, MockOperation};
//! use ict::query::TargetIndex;
//!
//! let index = MockIndex::with_targets(["//rs/tests:basic_health_test"]);
//! let label = TargetLabel::new("//rs/tests:basic_health_test").unwrap();
//!
//! assert!(index.exists(&label).unwrap());
//! assert_eq!(index.operations(), vec![MockOperation::Exists(label)]);
//! ```

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use super::interface::{QueryError, TargetIndex};
use crate::core::types::TargetLabel;

/// Mock target index for testing.
///
/// Clones share state, so a test can keep a handle for inspecting operations
/// after passing the index to the code under test.
#[derive(Debug, Clone, Default)]
pub struct MockIndex {
    inner: Arc<Mutex<MockIndexInner>>,
}

#[derive(Debug, Default)]
struct MockIndexInner {
    targets: BTreeSet<TargetLabel>,
    fail_on: Option<FailOn>,
    operations: Vec<MockOperation>,
}

/// Which query should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail `exists` with the given error.
    Exists(QueryError),
    /// Fail `enumerate` with the given error.
    Enumerate(QueryError),
}

/// Recorded query for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    Exists(TargetLabel),
    Enumerate,
}

impl MockIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an index knowing the given labels.
    ///
    /// Blank labels are ignored.
    pub fn with_targets<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let targets = targets
            .into_iter()
            .filter_map(|t| TargetLabel::new(t).ok())
            .collect();
        Self {
            inner: Arc::new(Mutex::new(MockIndexInner {
                targets,
                ..Default::default()
            })),
        }
    }

    /// Configure the index to fail a query.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.lock().fail_on = Some(fail_on);
        self
    }

    /// All queries made so far, in call order.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.lock().operations.clone()
    }

    /// Whether `enumerate` was ever called.
    pub fn enumerated(&self) -> bool {
        self.lock()
            .operations
            .iter()
            .any(|op| *op == MockOperation::Enumerate)
    }

    fn lock(&self) -> MutexGuard<'_, MockIndexInner> {
        // A poisoned lock only means another test thread panicked.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TargetIndex for MockIndex {
    fn exists(&self, target: &TargetLabel) -> Result<bool, QueryError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::Exists(target.clone()));
        if let Some(FailOn::Exists(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        Ok(inner.targets.contains(target))
    }

    fn enumerate(&self) -> Result<BTreeSet<TargetLabel>, QueryError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::Enumerate);
        if let Some(FailOn::Enumerate(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        Ok(inner.targets.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> TargetLabel {
        TargetLabel::new(s).unwrap()
    }

    #[test]
    fn answers_from_targets() {
        let index = MockIndex::with_targets(["//a:b", "//a:c"]);
        assert!(index.exists(&label("//a:b")).unwrap());
        assert!(!index.exists(&label("//a:d")).unwrap());
        assert_eq!(index.enumerate().unwrap().len(), 2);
    }

    #[test]
    fn records_operations_in_order() {
        let index = MockIndex::new();
        let _ = index.exists(&label("//x:y"));
        let _ = index.enumerate();
        assert_eq!(
            index.operations(),
            vec![MockOperation::Exists(label("//x:y")), MockOperation::Enumerate]
        );
        assert!(index.enumerated());
    }

    #[test]
    fn fail_on_exists() {
        let err = QueryError::Unavailable {
            program: "bazel".into(),
            message: "gone".into(),
        };
        let index = MockIndex::with_targets(["//a:b"]).fail_on(FailOn::Exists(err.clone()));
        assert_eq!(index.exists(&label("//a:b")), Err(err));
        assert!(index.enumerate().is_ok());
    }

    #[test]
    fn fail_on_enumerate() {
        let err = QueryError::Failed {
            expression: "tests(//...)".into(),
            status: "exit status: 1".into(),
            stderr: "boom".into(),
        };
        let index = MockIndex::new().fail_on(FailOn::Enumerate(err.clone()));
        assert_eq!(index.enumerate(), Err(err));
    }

    #[test]
    fn clones_share_operations() {
        let index = MockIndex::new();
        let handle = index.clone();
        let _ = index.enumerate();
        assert!(handle.enumerated());
    }
}
