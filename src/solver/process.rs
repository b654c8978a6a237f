//! Process-backed solver invoker.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

use tracing::{debug, info};

use crate::error::ExecutionError;

use super::{SolverInvoker, SolverOutput};

/// Runs the solver executable as a child process.
///
/// Spawns and reaps exactly one child per [`invoke`](SolverInvoker::invoke)
/// call; no retry.
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    executable: PathBuf,
}

impl ProcessInvoker {
    /// Creates an invoker for the given solver executable.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Path of the wrapped executable.
    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl SolverInvoker for ProcessInvoker {
    fn invoke(&self, agents_file: &Path, tasks_file: &Path) -> Result<SolverOutput, ExecutionError> {
        info!(
            "Running {} --a {} --t {}",
            self.executable.display(),
            agents_file.display(),
            tasks_file.display()
        );

        let start = Instant::now();
        let output = Command::new(&self.executable)
            .arg("--a")
            .arg(agents_file)
            .arg("--t")
            .arg(tasks_file)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ExecutionError::Spawn {
                path: self.executable.clone(),
                source,
            })?;
        let duration = start.elapsed();

        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        if !output.status.success() {
            return Err(ExecutionError::NonZeroExit {
                status: output.status,
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        debug!(
            "Solver finished in {:?} ({} bytes of stdout)",
            duration,
            stdout.len()
        );

        Ok(SolverOutput {
            stdout,
            stderr,
            duration,
        })
    }
}
