use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::passing::PassingDirection;
use crate::model::player::PlayerPosition;
use crate::model::round::RoundState;
use crate::model::rules;
use crate::model::score::ScoreBoard;

/// Context provided to policies for decision-making.
///
/// `round` exposes every seat's hand, not only `seat`'s own. Policies are
/// benchmarked with full information.
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext<'a> {
    pub seat: PlayerPosition,
    pub round: &'a RoundState,
    pub scores: &'a ScoreBoard,
    pub round_index: u32,
    pub passing_direction: PassingDirection,
}

impl<'a> PolicyContext<'a> {
    pub fn hand(&self) -> &'a Hand {
        self.round.hand(self.seat)
    }

    pub fn legal_moves(&self) -> Vec<Card> {
        rules::legal_moves(self.round, self.seat)
    }

    pub fn pass_target(&self) -> PlayerPosition {
        self.passing_direction.target(self.seat)
    }
}

/// Decision-making seam between the engine and a strategy.
///
/// The engine rejects, and never repairs, a card that is not held or not
/// legal, and a pass that repeats a card or names one not held.
pub trait Policy: Send {
    /// Choose 3 cards to pass. Called once per passing round, against the
    /// hand as dealt.
    fn choose_pass(&mut self, ctx: &PolicyContext) -> [Card; 3];

    /// Choose 1 card to play.
    fn choose_play(&mut self, ctx: &PolicyContext) -> Card;
}
