//! mapd-bench: benchmark harness for external MAPD solvers.
//!
//! Invokes a solver executable on paired `.agents`/`.tasks` instance files,
//! parses the solver's fixed-format stdout report, and aggregates per-agent
//! completion times into makespan and total-time-traveled.

pub mod batch;
pub mod cli;
pub mod error;
pub mod report;
pub mod solver;

// Re-export commonly used error types
pub use error::{ExecutionError, HarnessError, ReportError};
