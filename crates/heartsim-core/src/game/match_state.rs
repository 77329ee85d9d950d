use crate::game::options::{DEFAULT_SEED, GameOptions};
use crate::model::deck::Deck;
use crate::model::passing::PassingDirection;
use crate::model::score::{RoundScoring, ScoreBoard};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::VecDeque;

/// State that survives round boundaries: cumulative scores, the round
/// counter and the deal source.
#[derive(Debug, Clone)]
pub struct MatchState {
    scores: ScoreBoard,
    round_index: u32,
    score_limit: u32,
    rng: StdRng,
    seed: u64,
    stacked: VecDeque<Deck>,
}

impl MatchState {
    pub fn new(options: &GameOptions) -> Self {
        let seed = options.seed.unwrap_or(DEFAULT_SEED);
        Self {
            scores: ScoreBoard::new(),
            round_index: 0,
            score_limit: options.score_limit,
            rng: StdRng::seed_from_u64(seed),
            seed,
            stacked: VecDeque::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(&GameOptions::seeded(seed))
    }

    /// Scripted deals: `decks` are dealt in order before falling back to
    /// seeded shuffles.
    pub fn with_stacked_decks(options: &GameOptions, decks: Vec<Deck>) -> Self {
        let mut state = Self::new(options);
        state.stacked = decks.into();
        state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    /// Zero-based index of the round about to be (or being) played.
    pub fn round_index(&self) -> u32 {
        self.round_index
    }

    pub fn score_limit(&self) -> u32 {
        self.score_limit
    }

    pub fn passing_direction(&self) -> PassingDirection {
        PassingDirection::for_round(self.round_index)
    }

    /// A fresh deck and pass direction for the current round.
    pub fn next_deal(&mut self) -> (Deck, PassingDirection) {
        let deck = match self.stacked.pop_front() {
            Some(deck) => deck,
            None => Deck::shuffled(&mut self.rng),
        };
        (deck, self.passing_direction())
    }

    /// Scores a finished round and advances the round counter.
    pub fn record_round(&mut self, points: [u8; 4]) -> RoundScoring {
        let scoring = self.scores.apply_round(points);
        self.round_index += 1;
        scoring
    }

    pub fn is_finished(&self) -> bool {
        self.scores.reached(self.score_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::MatchState;
    use crate::game::options::GameOptions;
    use crate::model::deck::Deck;
    use crate::model::passing::PassingDirection;

    #[test]
    fn new_match_starts_with_left_pass() {
        let match_state = MatchState::with_seed(0);
        assert_eq!(match_state.round_index(), 0);
        assert_eq!(match_state.passing_direction(), PassingDirection::Left);
    }

    #[test]
    fn recording_rounds_rotates_passing_direction() {
        let mut match_state = MatchState::with_seed(0);

        match_state.record_round([26, 0, 0, 0]);
        assert_eq!(match_state.round_index(), 1);
        assert_eq!(match_state.passing_direction(), PassingDirection::Right);

        match_state.record_round([0, 13, 13, 0]);
        assert_eq!(match_state.passing_direction(), PassingDirection::Across);
        match_state.record_round([0, 13, 13, 0]);
        assert_eq!(match_state.passing_direction(), PassingDirection::Hold);
        match_state.record_round([0, 13, 13, 0]);
        assert_eq!(match_state.passing_direction(), PassingDirection::Left);
        assert_eq!(match_state.scores().standings(), &[0, 69, 69, 30]);
    }

    #[test]
    fn match_seed_is_exposed_and_reproducible() {
        let mut a = MatchState::with_seed(1234);
        let mut b = MatchState::with_seed(1234);
        assert_eq!(a.seed(), 1234);
        assert_eq!(a.next_deal().0, b.next_deal().0);
        assert_eq!(a.next_deal().0, b.next_deal().0);
    }

    #[test]
    fn unseeded_matches_deal_from_the_default_seed() {
        let mut unseeded = MatchState::new(&GameOptions::default());
        let mut seeded = MatchState::with_seed(0);
        assert_eq!(unseeded.seed(), 0);
        assert_eq!(unseeded.next_deal().0, seeded.next_deal().0);
    }

    #[test]
    fn stacked_decks_are_dealt_first() {
        let options = GameOptions::seeded(5);
        let mut state = MatchState::with_stacked_decks(&options, vec![Deck::standard()]);
        assert_eq!(state.next_deal().0, Deck::standard());
        assert_ne!(state.next_deal().0, Deck::standard());
    }

    #[test]
    fn finishes_once_anyone_reaches_the_limit() {
        let mut state = MatchState::new(&GameOptions::seeded(0).with_score_limit(40));
        state.record_round([13, 13, 0, 0]);
        assert!(!state.is_finished());
        state.record_round([26, 0, 0, 0]);
        assert!(state.is_finished());
    }
}
