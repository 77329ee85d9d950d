use crate::error::GameError;
use crate::game::match_state::MatchState;
use crate::game::options::GameOptions;
use crate::model::passing::PassingDirection;
use crate::model::player::PlayerPosition;
use crate::model::round::{PlayOutcome, RoundState};
use crate::model::score::ScoreBoard;
use crate::policy::{Policy, PolicyContext};
use serde::Serialize;
use tracing::{Level, event};

/// Outcome of one completed round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    pub round_index: u32,
    pub passing_direction: PassingDirection,
    pub points: [u8; 4],
    pub moon_shooter: Option<PlayerPosition>,
    pub totals: [u32; 4],
}

/// Final standings of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub seed: u64,
    pub score_limit: u32,
    pub scores: [u32; 4],
    pub rounds: Vec<RoundSummary>,
}

impl GameResult {
    pub fn rounds_played(&self) -> usize {
        self.rounds.len()
    }

    /// Seats that finished at or above the score limit.
    pub fn losers(&self) -> Vec<PlayerPosition> {
        PlayerPosition::LOOP
            .iter()
            .copied()
            .filter(|seat| self.scores[seat.index()] >= self.score_limit)
            .collect()
    }

    /// Seats sharing the lowest final score.
    pub fn winners(&self) -> Vec<PlayerPosition> {
        let best = self.scores.iter().copied().min().unwrap_or(0);
        PlayerPosition::LOOP
            .iter()
            .copied()
            .filter(|seat| self.scores[seat.index()] == best)
            .collect()
    }

    pub fn moon_shots(&self, seat: PlayerPosition) -> usize {
        self.rounds
            .iter()
            .filter(|round| round.moon_shooter == Some(seat))
            .count()
    }
}

/// Four seated policies playing rounds until the score limit is reached.
pub struct Game {
    policies: [Box<dyn Policy>; 4],
    state: MatchState,
    history: Vec<RoundSummary>,
    last_round: Option<RoundState>,
}

impl Game {
    /// Seats `policies` in order (North, East, South, West).
    pub fn new(policies: Vec<Box<dyn Policy>>, options: GameOptions) -> Result<Self, GameError> {
        let found = policies.len();
        let policies: [Box<dyn Policy>; 4] = policies
            .try_into()
            .map_err(|_| GameError::SeatCount { found })?;
        Ok(Self::with_state(policies, MatchState::new(&options)))
    }

    pub fn with_state(policies: [Box<dyn Policy>; 4], state: MatchState) -> Self {
        Self {
            policies,
            state,
            history: Vec::new(),
            last_round: None,
        }
    }

    pub fn scores(&self) -> &ScoreBoard {
        self.state.scores()
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn history(&self) -> &[RoundSummary] {
        &self.history
    }

    /// The most recently finished round, captures included.
    pub fn last_round(&self) -> Option<&RoundState> {
        self.last_round.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        !self.history.is_empty() && self.state.is_finished()
    }

    /// Plays rounds until, at a round boundary, some seat has reached the
    /// score limit. A finished game returns its result without dealing again.
    pub fn play_game(&mut self) -> Result<GameResult, GameError> {
        while !self.is_finished() {
            self.play_round()?;
        }

        let result = GameResult {
            seed: self.state.seed(),
            score_limit: self.state.score_limit(),
            scores: *self.state.scores().standings(),
            rounds: self.history.clone(),
        };
        event!(
            Level::DEBUG,
            seed = result.seed,
            rounds = result.rounds_played(),
            scores = ?result.scores,
            "game finished"
        );
        Ok(result)
    }

    /// Deals, passes, plays thirteen tricks and scores one round.
    pub fn play_round(&mut self) -> Result<RoundSummary, GameError> {
        let round_index = self.state.round_index();
        let (deck, passing_direction) = self.state.next_deal();
        let mut round = RoundState::deal(&deck, passing_direction);

        if passing_direction.requires_selection() {
            self.run_passing(&mut round, round_index)?;
        }

        while !round.is_complete() {
            let seat = round.to_act();
            let card = {
                let ctx = PolicyContext {
                    seat,
                    round: &round,
                    scores: self.state.scores(),
                    round_index,
                    passing_direction,
                };
                self.policies[seat.index()].choose_play(&ctx)
            };

            match round.play_card(seat, card) {
                Ok(PlayOutcome::TrickCompleted { winner, points }) => {
                    event!(
                        Level::TRACE,
                        round_index,
                        trick = round.tricks_completed(),
                        winner = winner.label(),
                        points,
                        "trick resolved"
                    );
                }
                Ok(PlayOutcome::Played) => {}
                Err(source) => {
                    tracing::warn!(round_index, seat = seat.label(), %card, %source, "illegal play");
                    return Err(GameError::IllegalPlay { seat, card, source });
                }
            }
        }

        let points = round.round_points();
        let scoring = self.state.record_round(points);
        let summary = RoundSummary {
            round_index,
            passing_direction,
            points,
            moon_shooter: scoring.moon_shooter,
            totals: *self.state.scores().standings(),
        };

        event!(
            Level::DEBUG,
            round_index,
            direction = passing_direction.as_str(),
            points = ?summary.points,
            moon_shooter = summary.moon_shooter.map(PlayerPosition::label),
            totals = ?summary.totals,
            "round scored"
        );

        self.history.push(summary.clone());
        self.last_round = Some(round);
        Ok(summary)
    }

    /// Every seat chooses against its dealt hand; cards move only once all
    /// four selections are in.
    fn run_passing(&mut self, round: &mut RoundState, round_index: u32) -> Result<(), GameError> {
        let passing_direction = round.passing_direction();
        for seat in PlayerPosition::LOOP {
            let cards = {
                let ctx = PolicyContext {
                    seat,
                    round: &*round,
                    scores: self.state.scores(),
                    round_index,
                    passing_direction,
                };
                self.policies[seat.index()].choose_pass(&ctx)
            };

            round.submit_pass(seat, cards).map_err(|source| {
                tracing::warn!(round_index, seat = seat.label(), ?cards, %source, "illegal pass");
                GameError::IllegalPass {
                    seat,
                    cards,
                    source,
                }
            })?;
        }

        round
            .resolve_passes()
            .map_err(GameError::PassResolution)?;
        event!(
            Level::TRACE,
            round_index,
            direction = passing_direction.as_str(),
            leader = round.to_act().label(),
            "passes resolved"
        );
        Ok(())
    }
}
