use std::path::PathBuf;

use clap::Parser;
use skat_core::model::round::Verbosity;

use skat_bench::config::{BenchmarkConfig, ResolvedOutputs};
use skat_bench::logging::init_logging;
use skat_bench::tournament::TournamentRunner;

/// Tournament harness for the Skat strategies.
#[derive(Debug, Parser)]
#[command(
    name = "skat-bench",
    author,
    version,
    about = "Deterministic Skat tournament harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of rounds to play.
    #[arg(long, value_name = "ROUNDS")]
    rounds: Option<usize>,

    /// Override the master seed for deck generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Round event verbosity: silent, scores or verbose.
    #[arg(long, value_name = "LEVEL")]
    verbosity: Option<Verbosity>,

    /// Exit after validating the configuration.
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(rounds) = cli.rounds {
        config.deals.rounds = rounds;
    }

    if let Some(seed) = cli.seed {
        config.deals.seed = Some(seed);
    }

    if let Some(verbosity) = cli.verbosity {
        config.logging.verbosity = verbosity;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let rounds = config.deals.rounds;
    let roster = config
        .agents
        .iter()
        .map(|agent| format!("{} ({})", agent.name, agent.kind))
        .collect::<Vec<_>>()
        .join(", ");

    println!("Loaded configuration '{run_id}': {rounds} rounds, agents {roster}");

    if cli.validate_only {
        println!("Validation-only mode: tournament execution skipped.");
        return Ok(());
    }

    let logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let runner = TournamentRunner::new(config, outputs)?;
    let summary = runner.run()?;

    println!(
        "Tournament complete for '{run_id}': {} rounds → {} rows at {}",
        summary.rounds_played,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    for agent in &summary.report.agents {
        println!(
            "  {:<12} mean {:>8.2} ± {:.2} over {} rounds",
            agent.name, agent.mean, agent.sem, agent.rounds
        );
    }
    if let Some(path) = logging_guard.telemetry_path.as_ref() {
        println!("Telemetry log: {}", path.display());
    }

    Ok(())
}
