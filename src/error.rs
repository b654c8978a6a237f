//! Error types for mapd-bench operations.
//!
//! Defines error types for the harness subsystems:
//! - Solver process invocation
//! - Report parsing and aggregation
//! - Batch discovery and orchestration

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while invoking the solver executable.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Failed to start solver '{}': {source}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Solver terminated with {status}: {stderr}")]
    NonZeroExit {
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Errors that can occur while parsing or aggregating a solver report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report too short: expected at least {expected} lines, got {got}")]
    Truncated { expected: usize, got: usize },

    #[error("Header line {index} has no ':<tab>' delimiter: '{line}'")]
    MalformedHeader { index: usize, line: String },

    #[error("Agent row {index} has no tab-separated completion time: '{line}'")]
    MalformedAgentRow { index: usize, line: String },

    #[error("Agent row {index} completion time '{value}' is not an integer")]
    InvalidCompletionTime {
        index: usize,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Report lists no agents: makespan and ttt are undefined")]
    EmptyInstance,
}

/// Errors that can occur during batch orchestration.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Solver execution failed: {0}")]
    Execution(#[from] ExecutionError),

    #[error("Malformed solver report: {0}")]
    Report(#[from] ReportError),

    #[error("Instance file not found: {}", .0.display())]
    MissingInstanceFile(PathBuf),

    #[error(
        "Cannot pair positionally under '{}': {agents} .agents files vs {tasks} .tasks files",
        root.display()
    )]
    PairCountMismatch {
        root: PathBuf,
        agents: usize,
        tasks: usize,
    },

    #[error("No .tasks file matches the stem of '{}'", .0.display())]
    UnmatchedAgents(PathBuf),

    #[error("No .agents file matches the stem of '{}'", .0.display())]
    UnmatchedTasks(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
