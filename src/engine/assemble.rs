//! engine::assemble
//!
//! Builds the exact `bazel test` command line for a resolved target.
//!
//! # Composition
//!
//! The command starts as `<runner> test <target> --config=systest` followed by
//! the pass-through arguments, then runs through [`RULES`] in order. Each rule
//! looks at the arguments accumulated so far plus the [`RunConfig`] and may
//! append to them:
//!
//! 1. [`disable_test_caching`]: `--cache_test_results=no`, unless some argument
//!    already contains `--cache_test_results`
//! 2. [`include_tests`]: `--test_arg=--include-tests=<filter>`
//! 3. [`farm_url`]: `--test_arg=--farm-base-url=<url>`
//! 4. [`keepalive`]: `--test_timeout=3600`, `--test_arg=--debug-keepalive`
//!
//! The caching check is substring containment, so `--cache_test_results=yes`
//! or `--nocache_test_results` passed through by the user both suppress the
//! default. Rule order is part of the output format.
//!
//! # Example
//!
//! ```
//! use ict::core::types::TargetLabel;
//! use ict::engine::assemble::{assemble, RunConfig};
//!
//! let target = TargetLabel::new("//rs/tests:basic_health_test").unwrap();
//! let argv = assemble(&target, &RunConfig::default(), &[]);
//! assert_eq!(
//!     argv.to_string(),
//!     "bazel test //rs/tests:basic_health_test --config=systest --cache_test_results=no"
//! );
//! ```

use std::fmt;

use crate::core::types::TargetLabel;

/// Runner executable used unless configured otherwise.
pub const DEFAULT_RUNNER: &str = "bazel";
/// Runner subcommand.
pub const TEST_SUBCOMMAND: &str = "test";
/// Bazel configuration every system test runs under.
pub const SYSTEST_CONFIG_FLAG: &str = "--config=systest";
/// Substring marking a user-supplied caching choice.
pub const CACHE_MARKER: &str = "--cache_test_results";
/// Appended when the user made no caching choice.
pub const CACHE_DISABLED_FLAG: &str = "--cache_test_results=no";
/// Keepalive runs get one hour.
pub const KEEPALIVE_TIMEOUT_SECS: u64 = 3600;
/// Asks the test driver to keep the test environment alive.
pub const DEBUG_KEEPALIVE_FLAG: &str = "--test_arg=--debug-keepalive";

/// Resolved options for one `ict test` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Print the command instead of running it.
    pub dry_run: bool,
    /// Extend the timeout and keep the test environment alive.
    pub keep_alive: bool,
    /// Only run test functions whose name contains this substring.
    pub include_tests: Option<String>,
    /// Farm service base URL override.
    pub farm_url: Option<String>,
    /// Runner executable.
    pub runner: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            keep_alive: false,
            include_tests: None,
            farm_url: None,
            runner: DEFAULT_RUNNER.to_string(),
        }
    }
}

impl RunConfig {
    /// Test-name filter, if non-empty.
    pub fn include_tests(&self) -> Option<&str> {
        non_empty(self.include_tests.as_deref())
    }

    /// Farm URL override, if non-empty.
    pub fn farm_url(&self) -> Option<&str> {
        non_empty(self.farm_url.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// An ordered command line: program followed by its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentVector(Vec<String>);

impl ArgumentVector {
    /// The executable (first element), if any.
    pub fn program(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Everything after the executable.
    pub fn args(&self) -> &[String] {
        self.0.get(1..).unwrap_or(&[])
    }

    /// All elements, program included.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Whether any element contains `needle`.
    pub fn contains_substring(&self, needle: &str) -> bool {
        self.0.iter().any(|arg| arg.contains(needle))
    }

    fn push(mut self, arg: impl Into<String>) -> Self {
        self.0.push(arg.into());
        self
    }
}

impl<S: Into<String>> FromIterator<S> for ArgumentVector {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<ArgumentVector> for Vec<String> {
    fn from(argv: ArgumentVector) -> Self {
        argv.0
    }
}

impl fmt::Display for ArgumentVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

/// An append rule: a pure step from one accumulator to the next.
pub type Rule = fn(ArgumentVector, &RunConfig) -> ArgumentVector;

/// The rules applied after the pass-through arguments, in order.
pub const RULES: [Rule; 4] = [disable_test_caching, include_tests, farm_url, keepalive];

/// Assemble the runner command for `target`.
pub fn assemble(target: &TargetLabel, cfg: &RunConfig, passthrough: &[String]) -> ArgumentVector {
    let base: ArgumentVector = [
        cfg.runner.as_str(),
        TEST_SUBCOMMAND,
        target.as_str(),
        SYSTEST_CONFIG_FLAG,
    ]
    .into_iter()
    .chain(passthrough.iter().map(String::as_str))
    .collect();

    RULES.iter().fold(base, |argv, rule| rule(argv, cfg))
}

/// Disable Bazel's test result cache unless the user already chose.
pub fn disable_test_caching(argv: ArgumentVector, _cfg: &RunConfig) -> ArgumentVector {
    if argv.contains_substring(CACHE_MARKER) {
        argv
    } else {
        argv.push(CACHE_DISABLED_FLAG)
    }
}

/// Forward the test-name filter to the test driver.
pub fn include_tests(argv: ArgumentVector, cfg: &RunConfig) -> ArgumentVector {
    match cfg.include_tests() {
        Some(filter) => argv.push(format!("--test_arg=--include-tests={filter}")),
        None => argv,
    }
}

/// Forward the farm URL override to the test driver.
pub fn farm_url(argv: ArgumentVector, cfg: &RunConfig) -> ArgumentVector {
    match cfg.farm_url() {
        Some(url) => argv.push(format!("--test_arg=--farm-base-url={url}")),
        None => argv,
    }
}

/// Extend the timeout and keep the environment alive.
pub fn keepalive(argv: ArgumentVector, cfg: &RunConfig) -> ArgumentVector {
    if cfg.keep_alive {
        argv.push(format!("--test_timeout={KEEPALIVE_TIMEOUT_SECS}"))
            .push(DEBUG_KEEPALIVE_FLAG)
    } else {
        argv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(s: &str) -> TargetLabel {
        TargetLabel::new(s).unwrap()
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn strings(argv: &ArgumentVector) -> Vec<&str> {
        argv.as_slice().iter().map(String::as_str).collect()
    }

    #[test]
    fn base_command_with_default_caching() {
        let argv = assemble(&target("//a:b"), &RunConfig::default(), &[]);
        assert_eq!(
            strings(&argv),
            vec!["bazel", "test", "//a:b", "--config=systest", "--cache_test_results=no"]
        );
    }

    #[test]
    fn passthrough_verbatim_and_in_order() {
        let pass = args(&["--test_output=errors", "--test_tmpdir=./tmp"]);
        let argv = assemble(&target("//a:b"), &RunConfig::default(), &pass);
        assert_eq!(
            &strings(&argv)[4..6],
            &["--test_output=errors", "--test_tmpdir=./tmp"]
        );
    }

    #[test]
    fn user_caching_choice_suppresses_default() {
        let pass = args(&["--cache_test_results=yes"]);
        let argv = assemble(&target("//a:b"), &RunConfig::default(), &pass);
        assert_eq!(
            strings(&argv),
            vec!["bazel", "test", "//a:b", "--config=systest", "--cache_test_results=yes"]
        );
    }

    #[test]
    fn caching_check_is_substring_not_exact() {
        let pass = args(&["--nocache_test_results"]);
        let argv = assemble(&target("//a:b"), &RunConfig::default(), &pass);
        assert!(!strings(&argv).contains(&CACHE_DISABLED_FLAG));
    }

    #[test]
    fn caching_check_sees_target() {
        // The marker inside the target label itself counts.
        let argv = assemble(
            &target("//a:x--cache_test_results"),
            &RunConfig::default(),
            &[],
        );
        assert!(!strings(&argv).contains(&CACHE_DISABLED_FLAG));
    }

    #[test]
    fn include_tests_is_last_without_other_options() {
        let cfg = RunConfig {
            include_tests: Some("Foo".into()),
            ..Default::default()
        };
        let argv = assemble(&target("//x:y"), &cfg, &[]);
        assert_eq!(
            argv.as_slice().last().map(String::as_str),
            Some("--test_arg=--include-tests=Foo")
        );
        assert!(!argv.contains_substring("farm-base-url"));
        assert!(!argv.contains_substring("keepalive"));
        assert!(!argv.contains_substring("--test_timeout"));
    }

    #[test]
    fn empty_strings_are_absent() {
        let cfg = RunConfig {
            include_tests: Some(String::new()),
            farm_url: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            assemble(&target("//x:y"), &cfg, &[]),
            assemble(&target("//x:y"), &RunConfig::default(), &[])
        );
    }

    #[test]
    fn full_ordering() {
        let cfg = RunConfig {
            dry_run: true,
            keep_alive: true,
            include_tests: Some("upgrade".into()),
            farm_url: Some("https://farm.example.org".into()),
            runner: "bazelisk".into(),
        };
        let pass = args(&["--verbose_explanations"]);
        let argv = assemble(&target("//rs/tests:t"), &cfg, &pass);
        assert_eq!(
            strings(&argv),
            vec![
                "bazelisk",
                "test",
                "//rs/tests:t",
                "--config=systest",
                "--verbose_explanations",
                "--cache_test_results=no",
                "--test_arg=--include-tests=upgrade",
                "--test_arg=--farm-base-url=https://farm.example.org",
                "--test_timeout=3600",
                "--test_arg=--debug-keepalive",
            ]
        );
    }

    #[test]
    fn keepalive_after_filter_and_url() {
        let cfg = RunConfig {
            keep_alive: true,
            farm_url: Some("http://f".into()),
            ..Default::default()
        };
        let argv = assemble(&target("//x:y"), &cfg, &[]);
        let s = strings(&argv);
        let url = s.iter().position(|a| a.contains("farm-base-url")).unwrap();
        let timeout = s.iter().position(|a| *a == "--test_timeout=3600").unwrap();
        let debug = s.iter().position(|a| *a == DEBUG_KEEPALIVE_FLAG).unwrap();
        assert!(url < timeout && timeout < debug);
    }

    #[test]
    fn rules_are_independent() {
        let base: ArgumentVector = ["bazel", "test", "//a:b"].into_iter().collect();
        let cfg = RunConfig::default();
        assert_eq!(include_tests(base.clone(), &cfg), base);
        assert_eq!(farm_url(base.clone(), &cfg), base);
        assert_eq!(keepalive(base.clone(), &cfg), base);
        assert_eq!(disable_test_caching(base.clone(), &cfg).as_slice().len(), 4);
    }

    #[test]
    fn deterministic() {
        let cfg = RunConfig {
            keep_alive: true,
            include_tests: Some("x".into()),
            ..Default::default()
        };
        let pass = args(&["--a", "--b"]);
        let t = target("//a:b");
        assert_eq!(assemble(&t, &cfg, &pass), assemble(&t, &cfg, &pass));
    }

    #[test]
    fn argument_vector_accessors() {
        let argv: ArgumentVector = ["sh", "-c", "exit 0"].into_iter().collect();
        assert_eq!(argv.program(), Some("sh"));
        assert_eq!(argv.args(), &["-c".to_string(), "exit 0".to_string()]);
        assert_eq!(argv.to_string(), "sh -c exit 0");

        let empty: ArgumentVector = Vec::<String>::new().into_iter().collect();
        assert_eq!(empty.program(), None);
        assert!(empty.args().is_empty());
    }
}
