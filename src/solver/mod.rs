//! Solver invocation.
//!
//! Execution is modeled as a capability trait so the batch orchestrator and
//! tests can substitute an in-process mock for the real executable.
//!
//! The process contract with the solver is fixed: it is invoked with exactly
//! `--a <agentsFile> --t <tasksFile>`, reads nothing from stdin, and emits
//! its report on stdout.

pub mod process;

use std::path::Path;
use std::time::Duration;

use crate::error::ExecutionError;

/// Captured output of one solver invocation.
#[derive(Debug, Clone)]
pub struct SolverOutput {
    /// Full standard output, decoded as UTF-8.
    pub stdout: String,
    /// Full standard error, decoded as UTF-8.
    pub stderr: String,
    /// Wall-clock duration of the invocation.
    pub duration: Duration,
}

/// Capability interface for running the solver on one instance pair.
///
/// Implementations block until the solver terminates; no timeout is
/// enforced, so a non-terminating solver blocks the caller indefinitely.
pub trait SolverInvoker {
    /// Runs the solver on the given instance files and captures its output.
    ///
    /// Fails with [`ExecutionError`] when the process cannot be started or
    /// exits with a failure status; stderr is attached for diagnosis.
    fn invoke(&self, agents_file: &Path, tasks_file: &Path) -> Result<SolverOutput, ExecutionError>;
}

pub use process::ProcessInvoker;
