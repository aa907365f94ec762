//! ui::logging
//!
//! Diagnostic logging through `tracing`.
//!
//! Events go to stderr so they never mix with command output on stdout.
//! `--debug` turns on `debug` level for ict itself; otherwise `RUST_LOG`
//! decides, falling back to `warn`.

use tracing_subscriber::EnvFilter;

use super::output::Verbosity;

/// Filter used when `RUST_LOG` is unset and `--debug` is off.
pub const DEFAULT_FILTER: &str = "warn";

/// Filter directive for `verbosity`, given the `RUST_LOG` value if any.
pub fn filter_directive(verbosity: Verbosity, rust_log: Option<&str>) -> String {
    match (verbosity, rust_log) {
        (Verbosity::Debug, _) => "ict=debug".to_string(),
        (_, Some(directive)) if !directive.trim().is_empty() => directive.to_string(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Install the global subscriber.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(verbosity: Verbosity) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::try_new(filter_directive(verbosity, rust_log.as_deref()))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_wins() {
        assert_eq!(
            filter_directive(Verbosity::Debug, Some("error")),
            "ict=debug"
        );
    }

    #[test]
    fn rust_log_respected() {
        assert_eq!(
            filter_directive(Verbosity::Normal, Some("ict=trace")),
            "ict=trace"
        );
    }

    #[test]
    fn default_when_unset_or_blank() {
        assert_eq!(filter_directive(Verbosity::Normal, None), "warn");
        assert_eq!(filter_directive(Verbosity::Quiet, Some(" ")), "warn");
    }

    #[test]
    fn init_twice_is_harmless() {
        init(Verbosity::Normal);
        init(Verbosity::Debug);
    }
}
