//! CLI command definitions for mapd-bench.
//!
//! Two commands: `run` evaluates a single agents/tasks instance pair,
//! `batch` evaluates every pair found in a directory. Results are printed
//! as pretty JSON on stdout.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use crate::batch::{
    evaluate_pair, BatchConfig, BatchRunner, FailurePolicy, InstanceOutcome, InstancePair,
    PairingMode,
};
use crate::report::{parse_report, InstanceResult};
use crate::solver::{ProcessInvoker, SolverInvoker};

/// MAPD solver benchmark harness.
#[derive(Parser)]
#[command(name = "mapd-bench")]
#[command(about = "Run a MAPD solver on instance pairs and aggregate its reported metrics")]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Run the solver on a single agents/tasks instance pair.
    Run(RunArgs),

    /// Run the solver on every instance pair in a directory.
    Batch(BatchArgs),
}

/// Arguments for `mapd-bench run`.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the solver executable.
    #[arg(short, long)]
    pub solver: PathBuf,

    /// Path to the .agents instance file.
    #[arg(short, long)]
    pub agents: PathBuf,

    /// Path to the .tasks instance file.
    #[arg(short, long)]
    pub tasks: PathBuf,

    /// Print the raw per-agent span instead of the aggregated metrics.
    #[arg(long)]
    pub raw: bool,
}

/// Arguments for `mapd-bench batch`.
#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// Path to the solver executable.
    #[arg(short, long)]
    pub solver: PathBuf,

    /// Directory containing .agents/.tasks instance files.
    #[arg(short, long)]
    pub instances: PathBuf,

    /// How instance files are matched into pairs.
    #[arg(long, value_enum, default_value = "positional")]
    pub pairing: PairingArg,

    /// Record per-pair failures and keep going instead of aborting the batch.
    #[arg(long)]
    pub keep_going: bool,
}

/// CLI-facing pairing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PairingArg {
    /// Zip listings positionally (original convention).
    Positional,
    /// Match files by shared base name.
    ByStem,
}

impl From<PairingArg> for PairingMode {
    fn from(arg: PairingArg) -> Self {
        match arg {
            PairingArg::Positional => PairingMode::Positional,
            PairingArg::ByStem => PairingMode::ByStem,
        }
    }
}

/// JSON row for one batch outcome.
#[derive(Debug, Serialize)]
struct OutcomeRow<'a> {
    agents_file: &'a std::path::Path,
    tasks_file: &'a std::path::Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a InstanceResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a InstanceOutcome> for OutcomeRow<'a> {
    fn from(outcome: &'a InstanceOutcome) -> Self {
        Self {
            agents_file: &outcome.pair.agents_file,
            tasks_file: &outcome.pair.tasks_file,
            result: outcome.result.as_ref().ok(),
            error: outcome.result.as_ref().err().map(ToString::to_string),
        }
    }
}

/// Parses CLI arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Executes the parsed CLI command.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Run(args) => run_single(args),
        Commands::Batch(args) => run_batch(args),
    }
}

fn run_single(args: RunArgs) -> anyhow::Result<()> {
    let pair = InstancePair::new(&args.agents, &args.tasks)?;
    let invoker = ProcessInvoker::new(&args.solver);

    if args.raw {
        let output = invoker.invoke(&pair.agents_file, &pair.tasks_file)?;
        let report = parse_report(&output.stdout)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let result = evaluate_pair(&invoker, &pair)?;
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}

fn run_batch(args: BatchArgs) -> anyhow::Result<()> {
    let config = BatchConfig::default()
        .with_pairing(args.pairing.into())
        .with_failure_policy(if args.keep_going {
            FailurePolicy::Collect
        } else {
            FailurePolicy::FailFast
        });

    let invoker = ProcessInvoker::new(&args.solver);
    let runner = BatchRunner::with_config(Box::new(invoker), config);
    let outcomes = runner.run_all(&args.instances)?;

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    if failed > 0 {
        warn!("{failed} of {} pair(s) failed", outcomes.len());
    } else {
        info!("All {} pair(s) succeeded", outcomes.len());
    }

    let rows: Vec<OutcomeRow> = outcomes.iter().map(OutcomeRow::from).collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairing_arg_maps_to_mode() {
        assert_eq!(
            PairingMode::from(PairingArg::Positional),
            PairingMode::Positional
        );
        assert_eq!(PairingMode::from(PairingArg::ByStem), PairingMode::ByStem);
    }

    #[test]
    fn test_cli_parses_batch_flags() {
        let cli = Cli::try_parse_from([
            "mapd-bench",
            "batch",
            "--solver",
            "./out/evaluation",
            "--instances",
            "./a40_t130",
            "--pairing",
            "by-stem",
            "--keep-going",
        ])
        .unwrap();

        match cli.command {
            Commands::Batch(args) => {
                assert_eq!(args.pairing, PairingArg::ByStem);
                assert!(args.keep_going);
            }
            _ => panic!("expected batch command"),
        }
    }

    #[test]
    fn test_cli_parses_run_flags() {
        let cli = Cli::try_parse_from([
            "mapd-bench",
            "run",
            "--solver",
            "./out/evaluation",
            "--agents",
            "0.agents",
            "--tasks",
            "0.tasks",
            "--raw",
        ])
        .unwrap();

        match cli.command {
            Commands::Run(args) => {
                assert!(args.raw);
                assert_eq!(args.agents, PathBuf::from("0.agents"));
            }
            _ => panic!("expected run command"),
        }
    }
}
