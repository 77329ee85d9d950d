mod agents;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use agents::AgentBlueprint;
use heartsim_bots::PolicyKind;
use heartsim_core::model::player::PlayerPosition;
use heartsim_core::{Game, GameError, GameResult};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::analytics::{AnalyticsCollector, AnalyticsError, AnalyticsSummary};
use crate::config::{BenchmarkConfig, ResolvedOutputs};

/// Primary entry point for orchestrating tournaments.
pub struct TournamentRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    agents: Vec<AgentBlueprint>,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub games_played: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub analytics: AnalyticsSummary,
}

/// A finished game and who sat where.
pub struct GameOutcome {
    pub game_index: usize,
    pub seed: u64,
    pub seats: Vec<SeatAssignment>,
    pub result: GameResult,
}

#[derive(Debug, Clone)]
pub struct SeatAssignment {
    pub seat: PlayerPosition,
    pub agent_name: String,
    pub kind: PolicyKind,
}

impl TournamentRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let agents = AgentBlueprint::from_configs(&config.agents);

        if agents.len() != 4 {
            return Err(RunnerError::SeatCount {
                found: agents.len(),
            });
        }

        Ok(Self {
            config,
            outputs,
            agents,
        })
    }

    /// Plays every configured game, then writes JSONL rows and the summary.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let seeds = game_seeds(self.config.games.master_seed(), self.config.games.count);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.games.threads)
            .build()?;

        event!(
            target: "heartsim_bench::run",
            Level::INFO,
            run_id = %self.config.run_id,
            games = seeds.len(),
            threads = pool.current_num_threads(),
            "tournament started"
        );

        let outcomes = play_in_order(&pool, &seeds, |game_index, seed| {
            self.play_game(game_index, seed)
        })?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut analytics = AnalyticsCollector::new(&self.config);
        let mut rows_written = 0usize;
        for outcome in &outcomes {
            analytics.record_game(outcome)?;
            write_game_row(&mut writer, &self.config.run_id, outcome)?;
            rows_written += 1;
        }
        writer.flush()?;

        let summary = analytics.finalize()?;
        summary.write_markdown(&self.outputs.summary_md)?;

        event!(
            target: "heartsim_bench::run",
            Level::INFO,
            run_id = %self.config.run_id,
            rows_written,
            "tournament complete"
        );

        Ok(RunSummary {
            games_played: outcomes.len(),
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            analytics: summary,
        })
    }

    fn play_game(&self, game_index: usize, seed: u64) -> Result<GameOutcome, RunnerError> {
        let policies = self
            .agents
            .iter()
            .enumerate()
            .map(|(seat_index, agent)| agent.spawn_policy(seed, seat_index))
            .collect();
        let mut game = Game::new(policies, self.config.games.game_options(seed))
            .map_err(|source| RunnerError::game(game_index, seed, source))?;
        let result = game
            .play_game()
            .map_err(|source| RunnerError::game(game_index, seed, source))?;

        let seats = PlayerPosition::LOOP
            .iter()
            .zip(&self.agents)
            .map(|(&seat, agent)| SeatAssignment {
                seat,
                agent_name: agent.name().to_string(),
                kind: agent.kind(),
            })
            .collect();

        event!(
            target: "heartsim_bench::game",
            Level::DEBUG,
            run_id = %self.config.run_id,
            game_index,
            seed,
            rounds = result.rounds_played(),
            scores = ?result.scores,
            "game finished"
        );

        Ok(GameOutcome {
            game_index,
            seed,
            seats,
            result,
        })
    }
}

/// One seed per game, drawn in order from the master seed so that results
/// do not depend on scheduling.
pub fn game_seeds(master_seed: u64, count: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(master_seed);
    (0..count).map(|_| rng.next_u64()).collect()
}

/// Plays every seed on `pool`. Results keep game order and the error
/// reported is the failing game with the lowest index.
fn play_in_order<T, F>(
    pool: &rayon::ThreadPool,
    seeds: &[u64],
    play: F,
) -> Result<Vec<T>, RunnerError>
where
    T: Send,
    F: Fn(usize, u64) -> Result<T, RunnerError> + Sync,
{
    let results: Vec<Result<T, RunnerError>> = pool.install(|| {
        seeds
            .par_iter()
            .enumerate()
            .map(|(game_index, &seed)| play(game_index, seed))
            .collect()
    });
    results.into_iter().collect()
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_game_row(
    writer: &mut BufWriter<File>,
    run_id: &str,
    outcome: &GameOutcome,
) -> Result<(), RunnerError> {
    let result = &outcome.result;
    let winners = result.winners();
    let seats = outcome
        .seats
        .iter()
        .map(|assignment| SeatRow {
            seat: assignment.seat.label(),
            agent: assignment.agent_name.clone(),
            kind: assignment.kind,
            score: result.scores[assignment.seat.index()],
            lost: result.scores[assignment.seat.index()] >= result.score_limit,
            won: winners.contains(&assignment.seat),
            moon_shots: result.moon_shots(assignment.seat),
        })
        .collect();

    let row = GameLogRow {
        run_id: run_id.to_string(),
        game_index: outcome.game_index,
        game_seed: outcome.seed,
        score_limit: result.score_limit,
        rounds: result.rounds_played(),
        seats,
    };

    serde_json::to_writer(&mut *writer, &row)?;
    writer.write_all(b"\n")?;
    Ok(())
}

#[derive(Serialize)]
struct GameLogRow {
    run_id: String,
    game_index: usize,
    game_seed: u64,
    score_limit: u32,
    rounds: usize,
    seats: Vec<SeatRow>,
}

#[derive(Serialize)]
struct SeatRow {
    seat: &'static str,
    agent: String,
    kind: PolicyKind,
    score: u32,
    lost: bool,
    won: bool,
    moon_shots: usize,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game {game_index} (seed {seed}) aborted: {source}")]
    Game {
        game_index: usize,
        seed: u64,
        #[source]
        source: GameError,
    },
    #[error("configuration requires exactly 4 agents but found {found}")]
    SeatCount { found: usize },
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}

impl RunnerError {
    fn game(game_index: usize, seed: u64, source: GameError) -> Self {
        RunnerError::Game {
            game_index,
            seed,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_seeds_are_a_stable_prefix() {
        let short = game_seeds(7, 3);
        let long = game_seeds(7, 10);
        assert_eq!(short, long[..3]);
        assert_ne!(game_seeds(8, 3), short);
    }

    #[test]
    fn earliest_failing_game_is_reported() {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .unwrap();
        let seeds = game_seeds(1, 32);
        let err = play_in_order(&pool, &seeds, |game_index, seed| {
            if game_index == 5 {
                std::thread::sleep(std::time::Duration::from_millis(50));
            }
            if game_index >= 5 && game_index % 5 == 0 {
                return Err(RunnerError::game(
                    game_index,
                    seed,
                    GameError::SeatCount { found: 0 },
                ));
            }
            Ok(game_index)
        })
        .unwrap_err();

        match err {
            RunnerError::Game {
                game_index, seed, ..
            } => {
                assert_eq!(game_index, 5);
                assert_eq!(seed, seeds[5]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn successful_games_keep_their_order() {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(3)
            .build()
            .unwrap();
        let seeds = game_seeds(2, 20);
        let indices = play_in_order(&pool, &seeds, |game_index, _| Ok(game_index)).unwrap();
        assert_eq!(indices, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn rules_violations_name_the_game() {
        let err = RunnerError::game(3, 99, GameError::SeatCount { found: 2 });
        let message = err.to_string();
        assert!(message.contains("game 3"));
        assert!(message.contains("seed 99"));
    }
}
