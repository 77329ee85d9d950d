use crate::model::player::PlayerPosition;
use serde::Serialize;

/// Every round distributes exactly this many points.
pub const POINTS_PER_ROUND: u8 = 26;
/// Added to each opponent when a player shoots the moon.
pub const MOON_PENALTY: u32 = 30;
pub const DEFAULT_SCORE_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBoard {
    totals: [u32; 4],
}

/// Effect of one round on the cumulative totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundScoring {
    pub deltas: [u32; 4],
    pub moon_shooter: Option<PlayerPosition>,
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self { totals: [0; 4] }
    }

    pub fn add_penalty(&mut self, seat: PlayerPosition, points: u32) {
        self.totals[seat.index()] += points;
    }

    #[cfg(test)]
    pub(crate) fn set_totals(&mut self, totals: [u32; 4]) {
        self.totals = totals;
    }

    pub fn score(&self, seat: PlayerPosition) -> u32 {
        self.totals[seat.index()]
    }

    pub fn standings(&self) -> &[u32; 4] {
        &self.totals
    }

    pub fn max_score(&self) -> u32 {
        self.totals.iter().copied().max().unwrap_or(0)
    }

    pub fn reached(&self, limit: u32) -> bool {
        self.max_score() >= limit
    }

    /// Folds one round's captured points into the totals.
    pub fn apply_round(&mut self, points: [u8; 4]) -> RoundScoring {
        let scoring = score_round(points);
        for seat in PlayerPosition::LOOP {
            self.add_penalty(seat, scoring.deltas[seat.index()]);
        }
        scoring
    }
}

/// Pure moon-shoot rule: a lone 26 leaves the shooter alone and charges
/// everyone else the penalty; otherwise each seat takes its own points.
pub fn score_round(points: [u8; 4]) -> RoundScoring {
    let shooters: Vec<PlayerPosition> = PlayerPosition::LOOP
        .iter()
        .copied()
        .filter(|seat| points[seat.index()] == POINTS_PER_ROUND)
        .collect();

    if let [shooter] = shooters.as_slice() {
        let mut deltas = [MOON_PENALTY; 4];
        deltas[shooter.index()] = 0;
        return RoundScoring {
            deltas,
            moon_shooter: Some(*shooter),
        };
    }

    RoundScoring {
        deltas: points.map(u32::from),
        moon_shooter: None,
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}
