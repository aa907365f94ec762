//! query::bazel
//!
//! [`TargetIndex`] backed by `bazel query`.
//!
//! # Existence
//!
//! `bazel query <target>` exits successfully and prints the label when the
//! target exists. A successful query that prints no label is answered as
//! `Ok(false)`. When the target does not exist, Bazel fails with a "no such
//! target", "no such package" or (for `...` patterns) "no targets found
//! beneath" diagnostic; those are answered as `Ok(false)` too. Any other
//! failure is a [`QueryError::Failed`] carrying Bazel's stderr.
//!
//! # Universe
//!
//! The universe is the label output of a configurable query expression,
//! `tests(//rs/tests/...)` unless overridden.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tracing::debug;

use super::interface::{QueryError, TargetIndex};
use crate::core::types::TargetLabel;

/// Query expression enumerating system-test targets.
pub const DEFAULT_UNIVERSE: &str = "tests(//rs/tests/...)";

/// Stderr fragments Bazel prints when a label or pattern names nothing.
const MISSING_TARGET_MARKERS: [&str; 3] = [
    "no such target",
    "no such package",
    "no targets found beneath",
];

/// Target index answering through the Bazel CLI.
#[derive(Debug, Clone)]
pub struct BazelQuery {
    program: String,
    universe: String,
    cwd: Option<PathBuf>,
}

impl BazelQuery {
    /// Create a query interface invoking `program` (usually `bazel`).
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            universe: DEFAULT_UNIVERSE.to_string(),
            cwd: None,
        }
    }

    /// Use a different query expression for the suggestion universe.
    pub fn with_universe(mut self, universe: impl Into<String>) -> Self {
        self.universe = universe.into();
        self
    }

    /// Run queries from `dir` instead of the current directory.
    pub fn in_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// The program queries are run with.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The universe query expression.
    pub fn universe(&self) -> &str {
        &self.universe
    }

    fn query(&self, expression: &str) -> Result<Output, QueryError> {
        debug!(program = %self.program, %expression, "running build graph query");

        let mut cmd = Command::new(&self.program);
        cmd.arg("query")
            .arg(expression)
            .arg("--output=label")
            .stdin(Stdio::null());
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        cmd.output().map_err(|e| QueryError::Unavailable {
            program: self.program.clone(),
            message: e.to_string(),
        })
    }

    fn failed(expression: &str, output: &Output) -> QueryError {
        QueryError::Failed {
            expression: expression.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

impl TargetIndex for BazelQuery {
    fn exists(&self, target: &TargetLabel) -> Result<bool, QueryError> {
        let output = self.query(target.as_str())?;
        if output.status.success() {
            // A set expression can succeed and still evaluate to nothing.
            let found = !parse_labels(&String::from_utf8_lossy(&output.stdout)).is_empty();
            if !found {
                debug!(%target, "query matched no targets");
            }
            return Ok(found);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if is_missing_target(&stderr) {
            debug!(%target, "target not in build graph");
            return Ok(false);
        }

        Err(Self::failed(target.as_str(), &output))
    }

    fn enumerate(&self) -> Result<BTreeSet<TargetLabel>, QueryError> {
        let output = self.query(&self.universe)?;
        if !output.status.success() {
            return Err(Self::failed(&self.universe, &output));
        }

        let labels = parse_labels(&String::from_utf8_lossy(&output.stdout));
        debug!(count = labels.len(), universe = %self.universe, "enumerated targets");
        Ok(labels)
    }
}

/// Whether Bazel's stderr says the queried label does not exist.
fn is_missing_target(stderr: &str) -> bool {
    MISSING_TARGET_MARKERS
        .iter()
        .any(|marker| stderr.contains(marker))
}

/// Parse `--output=label` output, one label per line.
fn parse_labels(stdout: &str) -> BTreeSet<TargetLabel> {
    stdout
        .lines()
        .map(str::trim)
        .filter_map(|line| TargetLabel::new(line).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_labels_skips_blank_lines() {
        let labels = parse_labels("//a:b\n\n  //a:c  \n\n");
        let got: Vec<&str> = labels.iter().map(|l| l.as_str()).collect();
        assert_eq!(got, vec!["//a:b", "//a:c"]);
    }

    #[test]
    fn parse_labels_dedupes() {
        let labels = parse_labels("//a:b\n//a:b\n");
        assert_eq!(labels.len(), 1);
    }

    #[test]
    fn missing_target_markers() {
        assert!(is_missing_target(
            "ERROR: no such target '//rs/tests:nope': target 'nope' not declared in package 'rs/tests'"
        ));
        assert!(is_missing_target(
            "ERROR: no such package 'rs/nope': BUILD file not found"
        ));
        assert!(is_missing_target(
            "ERROR: Skipping '//rs/tests/nsn/...': no targets found beneath 'rs/tests/nsn'"
        ));
        assert!(!is_missing_target("ERROR: server terminated abruptly"));
    }

    #[test]
    fn builder_defaults() {
        let q = BazelQuery::new("bazel");
        assert_eq!(q.program(), "bazel");
        assert_eq!(q.universe(), DEFAULT_UNIVERSE);

        let q = q.with_universe("kind(system_test, //...)");
        assert_eq!(q.universe(), "kind(system_test, //...)");
    }

    #[test]
    fn missing_program_is_unavailable() {
        let q = BazelQuery::new("ict-test-no-such-program");
        let label = TargetLabel::new("//a:b").unwrap();
        match q.exists(&label) {
            Err(QueryError::Unavailable { program, .. }) => {
                assert_eq!(program, "ict-test-no-such-program")
            }
            other => panic!("expected Unavailable, got {other:?}"),
        }
        assert!(matches!(
            q.enumerate(),
            Err(QueryError::Unavailable { .. })
        ));
    }

    /// A runner script answering every query with `body`.
    #[cfg(unix)]
    fn scripted(body: &str) -> (tempfile::TempDir, BazelQuery) {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join("bazel");
        std::fs::write(&script, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        let query = BazelQuery::new(script.display().to_string()).in_dir(dir.path());
        (dir, query)
    }

    #[cfg(unix)]
    #[test]
    fn exists_when_query_prints_label() {
        let (_dir, q) = scripted("echo //a:b");
        assert_eq!(q.exists(&TargetLabel::new("//a:b").unwrap()), Ok(true));
    }

    #[cfg(unix)]
    #[test]
    fn empty_successful_query_is_missing() {
        let (_dir, q) = scripted("exit 0");
        assert_eq!(q.exists(&TargetLabel::new("//a:b - //a:b").unwrap()), Ok(false));
    }

    #[cfg(unix)]
    #[test]
    fn empty_wildcard_pattern_is_missing() {
        let (_dir, q) = scripted(
            "echo \"ERROR: no targets found beneath 'rs/tests/nsn'\" >&2; exit 7",
        );
        assert_eq!(q.exists(&TargetLabel::new("//rs/tests/nsn/...").unwrap()), Ok(false));
    }

    #[cfg(unix)]
    #[test]
    fn other_failures_are_errors() {
        let (_dir, q) = scripted("echo 'ERROR: server crashed' >&2; exit 37");
        match q.exists(&TargetLabel::new("//a:b").unwrap()) {
            Err(QueryError::Failed { stderr, .. }) => assert_eq!(stderr, "ERROR: server crashed"),
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
