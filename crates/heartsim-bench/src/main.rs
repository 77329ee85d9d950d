use std::path::PathBuf;

use clap::Parser;

use heartsim_bench::config::{BenchmarkConfig, ResolvedOutputs};
use heartsim_bench::logging::init_logging;
use heartsim_bench::tournament::TournamentRunner;

/// Compares Hearts strategies over many independent games.
#[derive(Debug, Parser)]
#[command(
    name = "heartsim-bench",
    author,
    version,
    about = "Deterministic Hearts strategy comparison"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the master seed games are derived from.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the worker thread count (0 picks one per core).
    #[arg(long, value_name = "COUNT")]
    threads: Option<usize>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.games.count = games;
    }

    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }

    if let Some(threads) = cli.threads {
        config.games.threads = threads;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let games = config.games.count;
    let lineup = config
        .agents
        .iter()
        .map(|agent| format!("{} ({})", agent.name, agent.kind))
        .collect::<Vec<_>>()
        .join(", ");

    println!("Loaded configuration '{run_id}': {games} games, seats {lineup}");

    let logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = TournamentRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: no games played.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Tournament complete for '{run_id}': {} games → {} rows at {}",
        summary.games_played,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    for agent in &summary.analytics.agents {
        println!(
            "  {:<20} lost {:>4}/{:<4} ({:.1}%, CI {:.1}%..{:.1}%)",
            agent.name,
            agent.losses,
            agent.games,
            agent.loss_rate * 100.0,
            agent.loss_ci.0 * 100.0,
            agent.loss_ci.1 * 100.0
        );
    }
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(guard) = logging_guard.as_ref() {
        println!("Event log: {}", guard.events_path.display());
    }

    Ok(())
}
