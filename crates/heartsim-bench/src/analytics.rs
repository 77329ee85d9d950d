use std::collections::HashMap;
use std::fs;
use std::path::Path;

use heartsim_bots::PolicyKind;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

use crate::config::BenchmarkConfig;
use crate::tournament::GameOutcome;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("agent '{0}' defined in results but missing from configuration")]
    UnknownAgent(String),
    #[error("cannot build a {confidence} confidence interval: {message}")]
    Confidence { confidence: f64, message: String },
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Folds finished games into per-agent statistics.
pub struct AnalyticsCollector {
    run_id: String,
    score_limit: u32,
    confidence: f64,
    agents: HashMap<String, AgentAccumulator>,
    agent_order: Vec<String>,
    games: usize,
}

impl AnalyticsCollector {
    pub fn new(config: &BenchmarkConfig) -> Self {
        let mut agents = HashMap::new();
        let mut order = Vec::new();
        for agent in &config.agents {
            agents.insert(
                agent.name.clone(),
                AgentAccumulator::new(agent.name.clone(), agent.kind),
            );
            order.push(agent.name.clone());
        }

        Self {
            run_id: config.run_id.clone(),
            score_limit: config.games.score_limit,
            confidence: config.metrics.confidence,
            agents,
            agent_order: order,
            games: 0,
        }
    }

    pub fn record_game(&mut self, outcome: &GameOutcome) -> Result<(), AnalyticsError> {
        let result = &outcome.result;
        let winners = result.winners();
        let losers = result.losers();

        for seat in &outcome.seats {
            let acc = self
                .agents
                .get_mut(&seat.agent_name)
                .ok_or_else(|| AnalyticsError::UnknownAgent(seat.agent_name.clone()))?;

            acc.record_game(
                result.scores[seat.seat.index()],
                losers.contains(&seat.seat),
                winners.contains(&seat.seat),
                result.moon_shots(seat.seat),
                result.rounds_played(),
            );
        }
        self.games += 1;
        Ok(())
    }

    pub fn finalize(mut self) -> Result<AnalyticsSummary, AnalyticsError> {
        let z = two_sided_z(self.confidence)?;
        let mut reports = Vec::new();
        for name in &self.agent_order {
            if let Some(acc) = self.agents.remove(name) {
                reports.push(acc.into_report(z));
            }
        }

        Ok(AnalyticsSummary {
            run_id: self.run_id,
            games: self.games,
            score_limit: self.score_limit,
            confidence: self.confidence,
            agents: reports,
        })
    }
}

struct AgentAccumulator {
    name: String,
    kind: PolicyKind,
    games: usize,
    losses: usize,
    wins: usize,
    total_score: u64,
    moon_shots: usize,
    rounds: usize,
}

impl AgentAccumulator {
    fn new(name: String, kind: PolicyKind) -> Self {
        Self {
            name,
            kind,
            games: 0,
            losses: 0,
            wins: 0,
            total_score: 0,
            moon_shots: 0,
            rounds: 0,
        }
    }

    fn record_game(&mut self, score: u32, lost: bool, won: bool, moon_shots: usize, rounds: usize) {
        self.games += 1;
        self.total_score += u64::from(score);
        if lost {
            self.losses += 1;
        }
        if won {
            self.wins += 1;
        }
        self.moon_shots += moon_shots;
        self.rounds += rounds;
    }

    fn into_report(self, z: f64) -> AgentReport {
        let (loss_rate, loss_ci) = wilson_interval(self.losses, self.games, z);
        let avg_score = if self.games == 0 {
            0.0
        } else {
            self.total_score as f64 / self.games as f64
        };

        AgentReport {
            name: self.name,
            kind: self.kind,
            games: self.games,
            losses: self.losses,
            loss_rate,
            loss_ci,
            wins: self.wins,
            avg_score,
            moon_shots: self.moon_shots,
            rounds: self.rounds,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentReport {
    pub name: String,
    pub kind: PolicyKind,
    pub games: usize,
    pub losses: usize,
    pub loss_rate: f64,
    pub loss_ci: (f64, f64),
    pub wins: usize,
    pub avg_score: f64,
    pub moon_shots: usize,
    pub rounds: usize,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsSummary {
    pub run_id: String,
    pub games: usize,
    pub score_limit: u32,
    pub confidence: f64,
    pub agents: Vec<AgentReport>,
}

impl AnalyticsSummary {
    pub fn agent(&self, name: &str) -> Option<&AgentReport> {
        self.agents.iter().find(|agent| agent.name == name)
    }

    pub fn to_markdown(&self) -> String {
        let mut rows = String::new();
        rows.push_str("# Tournament Summary\n\n");
        rows.push_str(&format!(
            "Run `{}`: {} games to {} points. Loss intervals are Wilson at {:.0}% confidence.\n\n",
            self.run_id,
            self.games,
            self.score_limit,
            self.confidence * 100.0
        ));
        rows.push_str("| Agent | Kind | Games | Losses | Loss % | CI | Wins | Avg score | Moon shots | Rounds |\n");
        rows.push_str("|-------|------|-------|--------|--------|----|------|-----------|------------|--------|\n");

        for agent in &self.agents {
            rows.push_str(&format!(
                "| {name} | {kind} | {games} | {losses} | {rate:.1}% | [{low:.1}%, {high:.1}%] | {wins} | {avg:.2} | {moons} | {rounds} |\n",
                name = agent.name,
                kind = agent.kind,
                games = agent.games,
                losses = agent.losses,
                rate = agent.loss_rate * 100.0,
                low = agent.loss_ci.0 * 100.0,
                high = agent.loss_ci.1 * 100.0,
                wins = agent.wins,
                avg = agent.avg_score,
                moons = agent.moon_shots,
                rounds = agent.rounds,
            ));
        }
        rows
    }

    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
        fs::write(path.as_ref(), self.to_markdown()).map_err(|e| AnalyticsError::Io {
            context: "writing summary markdown",
            source: e,
        })
    }
}

/// Standard normal quantile for a two-sided interval at `confidence`.
fn two_sided_z(confidence: f64) -> Result<f64, AnalyticsError> {
    let normal = Normal::new(0.0, 1.0).map_err(|err| AnalyticsError::Confidence {
        confidence,
        message: err.to_string(),
    })?;
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(AnalyticsError::Confidence {
            confidence,
            message: "level must lie in (0, 1)".to_string(),
        });
    }
    Ok(normal.inverse_cdf(1.0 - (1.0 - confidence) / 2.0))
}

/// Observed proportion and its Wilson score interval.
fn wilson_interval(successes: usize, trials: usize, z: f64) -> (f64, (f64, f64)) {
    if trials == 0 {
        return (0.0, (0.0, 0.0));
    }
    let n = trials as f64;
    let p = successes as f64 / n;
    let z2 = z * z;
    let denom = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denom;
    let margin = z * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt() / denom;
    (p, ((center - margin).max(0.0), (center + margin).min(1.0)))
}
