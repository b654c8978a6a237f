//! Command-line interface for mapd-bench.
//!
//! Provides the `run` and `batch` commands wrapping the solver harness.

mod commands;

pub use commands::{parse_cli, run_with_cli, Cli, Commands};
