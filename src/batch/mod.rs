//! Batch orchestration across a directory of instance pairs.
//!
//! Discovers `.agents`/`.tasks` files under an instances directory, pairs
//! them, and runs solver + parser for each pair strictly sequentially.
//!
//! Pairing is positional by default: the two extension-filtered listings are
//! zipped in directory-listing order, reproducing the original convention.
//! That convention is fragile (it assumes the filesystem returns both
//! listings in corresponding order), so [`PairingMode::ByStem`] is offered
//! as a stricter alternative that matches files by shared base name.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::HarnessError;
use crate::report::{parse_report, InstanceResult};
use crate::solver::SolverInvoker;

/// Extension of agents instance files.
pub const AGENTS_EXTENSION: &str = "agents";
/// Extension of tasks instance files.
pub const TASKS_EXTENSION: &str = "tasks";

/// A matched pair of instance files fed to one solver invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstancePair {
    /// Path of the `.agents` file.
    pub agents_file: PathBuf,
    /// Path of the `.tasks` file.
    pub tasks_file: PathBuf,
}

impl InstancePair {
    /// Creates a pair, checking that both files exist.
    pub fn new(
        agents_file: impl Into<PathBuf>,
        tasks_file: impl Into<PathBuf>,
    ) -> Result<Self, HarnessError> {
        let agents_file = agents_file.into();
        let tasks_file = tasks_file.into();
        for path in [&agents_file, &tasks_file] {
            if !path.is_file() {
                return Err(HarnessError::MissingInstanceFile(path.clone()));
            }
        }
        Ok(Self {
            agents_file,
            tasks_file,
        })
    }
}

/// How `.agents` and `.tasks` files are matched into pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingMode {
    /// Zip the two listings positionally, in directory-listing order.
    #[default]
    Positional,
    /// Match files by shared base name, in stem order.
    ByStem,
}

/// What happens when one pair fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abort the whole batch on the first failing pair, discarding
    /// results already computed.
    #[default]
    FailFast,
    /// Record each pair's outcome and return the mixed set.
    Collect,
}

/// Configuration for a batch run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Pairing mode for discovered instance files.
    pub pairing: PairingMode,
    /// Per-pair failure policy.
    pub failure_policy: FailurePolicy,
}

impl BatchConfig {
    /// Sets the pairing mode.
    pub fn with_pairing(mut self, pairing: PairingMode) -> Self {
        self.pairing = pairing;
        self
    }

    /// Sets the failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

/// Outcome of one instance pair within a batch.
#[derive(Debug)]
pub struct InstanceOutcome {
    /// The pair that was run.
    pub pair: InstancePair,
    /// Parsed result, or the error that pair produced.
    pub result: Result<InstanceResult, HarnessError>,
}

impl InstanceOutcome {
    /// Returns true if this pair produced a result.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runs solver + parser across every instance pair in a directory.
pub struct BatchRunner {
    invoker: Box<dyn SolverInvoker>,
    config: BatchConfig,
}

impl BatchRunner {
    /// Creates a batch runner with default configuration.
    pub fn new(invoker: Box<dyn SolverInvoker>) -> Self {
        Self {
            invoker,
            config: BatchConfig::default(),
        }
    }

    /// Creates a batch runner with the given configuration.
    pub fn with_config(invoker: Box<dyn SolverInvoker>, config: BatchConfig) -> Self {
        Self { invoker, config }
    }

    /// Runs every discovered pair under `root`, in pairing order.
    ///
    /// Under [`FailurePolicy::FailFast`] the first per-pair error aborts the
    /// batch; under [`FailurePolicy::Collect`] each pair's outcome (success
    /// or error) is recorded and the mixed set is returned.
    pub fn run_all(&self, root: &Path) -> Result<Vec<InstanceOutcome>, HarnessError> {
        let pairs = discover_pairs(root, self.config.pairing)?;
        info!(
            "Discovered {} instance pair(s) under {}",
            pairs.len(),
            root.display()
        );

        let mut outcomes = Vec::with_capacity(pairs.len());
        for pair in pairs {
            match evaluate_pair(self.invoker.as_ref(), &pair) {
                Ok(result) => {
                    debug!(
                        "{}: makespan={} ttt={}",
                        pair.agents_file.display(),
                        result.makespan,
                        result.ttt
                    );
                    outcomes.push(InstanceOutcome {
                        pair,
                        result: Ok(result),
                    });
                }
                Err(err) => match self.config.failure_policy {
                    FailurePolicy::FailFast => {
                        error!("{} failed, aborting batch: {}", pair.agents_file.display(), err);
                        return Err(err);
                    }
                    FailurePolicy::Collect => {
                        warn!("{} failed: {}", pair.agents_file.display(), err);
                        outcomes.push(InstanceOutcome {
                            pair,
                            result: Err(err),
                        });
                    }
                },
            }
        }

        Ok(outcomes)
    }
}

/// Runs solver + parser + aggregation for one instance pair.
pub fn evaluate_pair(
    invoker: &dyn SolverInvoker,
    pair: &InstancePair,
) -> Result<InstanceResult, HarnessError> {
    let output = invoker.invoke(&pair.agents_file, &pair.tasks_file)?;
    let report = parse_report(&output.stdout)?;
    Ok(report.aggregate()?)
}

/// Discovers instance pairs directly under `root` (non-recursive).
///
/// Files are selected by extension only; no naming convention beyond that
/// is enforced. An empty directory yields an empty set.
pub fn discover_pairs(root: &Path, mode: PairingMode) -> Result<Vec<InstancePair>, HarnessError> {
    let mut agents_files = Vec::new();
    let mut tasks_files = Vec::new();

    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() {
            continue;
        }
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(AGENTS_EXTENSION) => agents_files.push(path),
            Some(TASKS_EXTENSION) => tasks_files.push(path),
            _ => {}
        }
    }

    match mode {
        PairingMode::Positional => pair_positionally(root, agents_files, tasks_files),
        PairingMode::ByStem => pair_by_stem(agents_files, tasks_files),
    }
}

fn pair_positionally(
    root: &Path,
    agents_files: Vec<PathBuf>,
    tasks_files: Vec<PathBuf>,
) -> Result<Vec<InstancePair>, HarnessError> {
    if agents_files.len() != tasks_files.len() {
        return Err(HarnessError::PairCountMismatch {
            root: root.to_path_buf(),
            agents: agents_files.len(),
            tasks: tasks_files.len(),
        });
    }

    Ok(agents_files
        .into_iter()
        .zip(tasks_files)
        .map(|(agents_file, tasks_file)| InstancePair {
            agents_file,
            tasks_file,
        })
        .collect())
}

fn pair_by_stem(
    mut agents_files: Vec<PathBuf>,
    tasks_files: Vec<PathBuf>,
) -> Result<Vec<InstancePair>, HarnessError> {
    let mut tasks_by_stem: HashMap<OsString, PathBuf> = tasks_files
        .into_iter()
        .map(|path| (stem_of(&path), path))
        .collect();

    agents_files.sort_by_key(|path| stem_of(path));

    let mut pairs = Vec::with_capacity(agents_files.len());
    for agents_file in agents_files {
        let tasks_file = tasks_by_stem
            .remove(&stem_of(&agents_file))
            .ok_or_else(|| HarnessError::UnmatchedAgents(agents_file.clone()))?;
        pairs.push(InstancePair {
            agents_file,
            tasks_file,
        });
    }

    if let Some(orphan) = tasks_by_stem.into_values().next() {
        return Err(HarnessError::UnmatchedTasks(orphan));
    }

    Ok(pairs)
}

fn stem_of(path: &Path) -> OsString {
    path.file_stem().unwrap_or_default().to_os_string()
}
