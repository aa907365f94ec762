//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ict - resolve and run Bazel system tests
#[derive(Parser, Debug)]
#[command(name = "ict")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if ict was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a system_test target with Bazel
    #[command(
        name = "test",
        visible_aliases = ["system_test", "t"],
        override_usage = "ict test <TARGET> [OPTIONS] [-- <BAZEL_ARGS>...]",
        long_about = "Run a system_test target with Bazel.\n\n\
            The target is checked against the build graph first. If it does not \
            exist, ict lists the closest matching test targets instead of running \
            anything. The raw Bazel command is always printed before it runs.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Run a system test
    ict test //rs/tests:basic_health_test

    # Only print the Bazel command
    ict test //rs/tests:basic_health_test --dry-run

    # Forward extra arguments to Bazel
    ict test //rs/tests:basic_health_test -- --test_tmpdir=./tmp --test_output=errors

    # Keep the test environment alive for an hour after the test
    ict test //rs/tests:basic_health_test --keepalive"
    )]
    Test {
        /// The system test target (e.g. //rs/tests:basic_health_test)
        target: String,

        /// Print the raw Bazel command without executing it
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Keep the test system alive for 60 minutes
        #[arg(short = 'k', long = "keepalive")]
        keepalive: bool,

        /// Only run test functions whose name contains this substring
        #[arg(short = 'i', long = "include-tests", value_name = "SUBSTRING")]
        include_tests: Option<String>,

        /// Use a custom URL for the Farm webservice
        #[arg(long = "farm-url", value_name = "URL")]
        farm_url: Option<String>,

        /// Arguments forwarded verbatim to Bazel
        #[arg(last = true, value_name = "BAZEL_ARGS")]
        bazel_args: Vec<String>,
    },

    /// List the test targets ict knows about
    #[command(
        name = "targets",
        long_about = "List the test targets ict suggests from.\n\n\
            The list comes from the workspace's universe query \
            (see `ict config get universe`).",
        after_help = "\
WORKFLOW EXAMPLES:
    # All test targets
    ict targets

    # Only targets containing a substring
    ict targets upgrade

    # Machine-readable
    ict targets --json"
    )]
    Targets {
        /// Only list targets containing this substring
        filter: Option<String>,

        /// Print a JSON array instead of one target per line
        #[arg(long)]
        json: bool,
    },

    /// Get, set, or list configuration values
    #[command(
        name = "config",
        after_help = "\
KEYS:
    runner             Runner executable (default: bazel)
    farm_url           Default Farm base URL
    suggestion_limit   Suggestions shown for a missing target (default: 7)
    universe           Bazel query listing test targets (workspace only)

WORKFLOW EXAMPLES:
    ict config list
    ict config set farm_url https://farm.example.org
    ict config set --global runner bazelisk"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for ict commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    ict completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    ict completion zsh >> ~/.zshrc

    # Fish
    ict completion fish > ~/.config/fish/completions/ict.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
        /// Write to the global config instead of the workspace config
        #[arg(long)]
        global: bool,
    },
    /// List all configuration values
    List,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
