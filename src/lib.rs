//! ict - resolve and run Bazel system tests
//!
//! ict takes a system-test target label, checks that it exists in the build
//! graph, and runs it with `bazel test` using the flags system tests need.
//! A missing target gets a short list of similarly named targets instead.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Resolve → Assemble → Invoke
//! - [`core`] - Target labels, suggestion ranking, configuration, paths
//! - [`query`] - Single interface for asking the build graph about targets
//! - [`ui`] - Output and logging
//!
//! # Correctness Invariants
//!
//! 1. A target that does not resolve is never run
//! 2. The same inputs always produce the same command line
//! 3. The command line is printed before anything runs
//! 4. The runner's exit code is passed through unchanged

pub mod cli;
pub mod core;
pub mod engine;
pub mod query;
pub mod ui;
