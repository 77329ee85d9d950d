use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::passing::{PassingDirection, PassingError, PassingState};
use crate::model::player::PlayerPosition;
use crate::model::rules;
use crate::model::suit::Suit;
use crate::model::trick::{Trick, TrickError};
use std::{array, vec::Vec};
use thiserror::Error;

/// All mutable state of one round: hands, captures, the open trick and the
/// hearts-broken flag. Nothing here outlives the round.
#[derive(Debug, Clone)]
pub struct RoundState {
    hands: [Hand; 4],
    captured: [Vec<Card>; 4],
    current_trick: Trick,
    trick_history: Vec<Trick>,
    starting_player: PlayerPosition,
    to_act: PlayerPosition,
    passing_direction: PassingDirection,
    phase: RoundPhase,
    hearts_broken: bool,
}

#[derive(Debug, Clone)]
pub enum RoundPhase {
    Passing(PassingState),
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    TrickCompleted { winner: PlayerPosition, points: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("round is still in the passing phase")]
    NotInPlayPhase,
    #[error("round is already complete")]
    RoundComplete,
    #[error("expected {expected} to play but got {actual}")]
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    #[error("{0} is not in the player's hand")]
    CardNotInHand(Card),
    #[error("the first lead of a round must be the two of clubs")]
    MustLeadTwoOfClubs,
    #[error("must follow the led suit {0}")]
    MustFollowSuit(Suit),
    #[error("point cards cannot be led before points are broken")]
    PointsNotBroken,
    #[error(transparent)]
    Trick(#[from] TrickError),
}

fn two_of_clubs_holder(hands: &[Hand; 4]) -> PlayerPosition {
    PlayerPosition::LOOP
        .iter()
        .copied()
        .find(|seat| hands[seat.index()].contains(Card::TWO_OF_CLUBS))
        .unwrap_or(PlayerPosition::North)
}

impl RoundState {
    /// Deals `deck` in seat order. Hold rounds go straight to play.
    pub fn deal(deck: &Deck, passing_direction: PassingDirection) -> Self {
        let hands = deck.deal();
        let starting_player = two_of_clubs_holder(&hands);

        let phase = if passing_direction.requires_selection() {
            RoundPhase::Passing(PassingState::new(passing_direction))
        } else {
            RoundPhase::Playing
        };

        Self {
            hands,
            captured: array::from_fn(|_| Vec::new()),
            current_trick: Trick::new(starting_player),
            trick_history: Vec::new(),
            starting_player,
            to_act: starting_player,
            passing_direction,
            phase,
            hearts_broken: false,
        }
    }

    pub fn passing_direction(&self) -> PassingDirection {
        self.passing_direction
    }

    pub fn phase(&self) -> &RoundPhase {
        &self.phase
    }

    pub fn hand(&self, seat: PlayerPosition) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn hands(&self) -> &[Hand; 4] {
        &self.hands
    }

    pub fn captured(&self, seat: PlayerPosition) -> &[Card] {
        &self.captured[seat.index()]
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn trick_history(&self) -> &[Trick] {
        &self.trick_history
    }

    pub fn tricks_completed(&self) -> usize {
        self.trick_history.len()
    }

    pub fn starting_player(&self) -> PlayerPosition {
        self.starting_player
    }

    pub fn to_act(&self) -> PlayerPosition {
        self.to_act
    }

    pub fn hearts_broken(&self) -> bool {
        self.hearts_broken
    }

    pub fn is_first_trick(&self) -> bool {
        self.trick_history.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, RoundPhase::Playing) && self.hands[self.to_act.index()].is_empty()
    }

    pub fn submit_pass(
        &mut self,
        seat: PlayerPosition,
        cards: [Card; 3],
    ) -> Result<(), PassingError> {
        match &mut self.phase {
            RoundPhase::Passing(state) => state.submit(seat, cards, &self.hands[seat.index()]),
            RoundPhase::Playing => Err(PassingError::NotInPassingPhase),
        }
    }

    /// Applies every submitted pass at once and hands the lead to whoever
    /// now holds the two of clubs.
    pub fn resolve_passes(&mut self) -> Result<(), PassingError> {
        let state = match &self.phase {
            RoundPhase::Passing(state) => state.clone(),
            RoundPhase::Playing => return Err(PassingError::NotInPassingPhase),
        };

        if !state.is_complete() {
            return Err(PassingError::Incomplete);
        }

        state.apply(&mut self.hands)?;

        let leader = two_of_clubs_holder(&self.hands);
        self.starting_player = leader;
        self.to_act = leader;
        self.current_trick = Trick::new(leader);
        self.phase = RoundPhase::Playing;
        Ok(())
    }

    /// Points captured so far by each seat.
    pub fn round_points(&self) -> [u8; 4] {
        self.captured
            .each_ref()
            .map(|cards| cards.iter().map(|card| card.points()).sum())
    }

    /// Every card the round currently accounts for: hands, captures and the
    /// open trick. Always the full deck.
    pub fn accounted_cards(&self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(52);
        for hand in &self.hands {
            cards.extend(hand.iter().copied());
        }
        for pile in &self.captured {
            cards.extend(pile.iter().copied());
        }
        cards.extend(self.current_trick.cards());
        cards
    }

    /// Plays `card` for `seat`, resolving the trick when it is the fourth.
    pub fn play_card(
        &mut self,
        seat: PlayerPosition,
        card: Card,
    ) -> Result<PlayOutcome, PlayError> {
        if !matches!(self.phase, RoundPhase::Playing) {
            return Err(PlayError::NotInPlayPhase);
        }

        if self.is_complete() {
            return Err(PlayError::RoundComplete);
        }

        if self.to_act != seat {
            return Err(PlayError::OutOfTurn {
                expected: self.to_act,
                actual: seat,
            });
        }

        if !self.hands[seat.index()].contains(card) {
            return Err(PlayError::CardNotInHand(card));
        }

        rules::check_play(self, seat, card)?;

        self.current_trick.play(seat, card)?;
        self.hands[seat.index()].remove(card);
        if card.points() > 0 {
            self.hearts_broken = true;
        }

        if !self.current_trick.is_complete() {
            self.to_act = seat.left();
            return Ok(PlayOutcome::Played);
        }

        let winner = self
            .current_trick
            .winner()
            .unwrap_or(self.current_trick.leader());
        let points = self.current_trick.points();
        let finished = std::mem::replace(&mut self.current_trick, Trick::new(winner));
        self.captured[winner.index()].extend(finished.cards());
        self.trick_history.push(finished);
        self.to_act = winner;
        Ok(PlayOutcome::TrickCompleted { winner, points })
    }
}
