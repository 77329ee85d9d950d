use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::PlayerPosition;
use serde::{Deserialize, Serialize};
use std::array;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassingDirection {
    Left,
    Right,
    Across,
    Hold,
}

impl PassingDirection {
    pub const CYCLE: [PassingDirection; 4] = [
        PassingDirection::Left,
        PassingDirection::Right,
        PassingDirection::Across,
        PassingDirection::Hold,
    ];

    /// Direction for a zero-based round index; depends on nothing else.
    pub const fn for_round(round_index: u32) -> PassingDirection {
        Self::CYCLE[(round_index % 4) as usize]
    }

    pub const fn requires_selection(self) -> bool {
        !matches!(self, PassingDirection::Hold)
    }

    pub const fn target(self, seat: PlayerPosition) -> PlayerPosition {
        match self {
            PassingDirection::Left => seat.left(),
            PassingDirection::Right => seat.right(),
            PassingDirection::Across => seat.across(),
            PassingDirection::Hold => seat,
        }
    }

    /// Pass-target map indexed by giver seat.
    pub fn targets(self) -> [PlayerPosition; 4] {
        PlayerPosition::LOOP.map(|seat| self.target(seat))
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PassingDirection::Left => "Left",
            PassingDirection::Right => "Right",
            PassingDirection::Across => "Across",
            PassingDirection::Hold => "Hold",
        }
    }
}

/// Pass selections gathered before any card moves.
#[derive(Debug, Clone)]
pub struct PassingState {
    direction: PassingDirection,
    submissions: [Option<[Card; 3]>; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PassingError {
    #[error("round is not in the passing phase")]
    NotInPassingPhase,
    #[error("no cards are passed this round")]
    DirectionDoesNotPass,
    #[error("{0} already submitted a pass")]
    AlreadySubmitted(PlayerPosition),
    #[error("{0} is not in the passer's hand")]
    CardNotInHand(Card),
    #[error("{0} was selected more than once")]
    DuplicateCard(Card),
    #[error("not every seat has submitted a pass")]
    Incomplete,
}

impl PassingState {
    pub fn new(direction: PassingDirection) -> Self {
        Self {
            direction,
            submissions: array::from_fn(|_| None),
        }
    }

    /// Records a selection after checking it against the untouched hand.
    pub fn submit(
        &mut self,
        seat: PlayerPosition,
        cards: [Card; 3],
        hand: &Hand,
    ) -> Result<(), PassingError> {
        if !self.direction.requires_selection() {
            return Err(PassingError::DirectionDoesNotPass);
        }

        if self.submissions[seat.index()].is_some() {
            return Err(PassingError::AlreadySubmitted(seat));
        }

        for (i, card) in cards.iter().enumerate() {
            if !hand.contains(*card) {
                return Err(PassingError::CardNotInHand(*card));
            }
            if cards[..i].contains(card) {
                return Err(PassingError::DuplicateCard(*card));
            }
        }

        self.submissions[seat.index()] = Some(cards);
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.submissions
            .iter()
            .all(|submission| submission.is_some())
    }

    /// Moves every selection at once: all removals, then all additions.
    pub fn apply(self, hands: &mut [Hand; 4]) -> Result<(), PassingError> {
        if !self.direction.requires_selection() {
            return Err(PassingError::DirectionDoesNotPass);
        }

        let mut selections = [[Card::TWO_OF_CLUBS; 3]; 4];
        for seat in PlayerPosition::LOOP {
            selections[seat.index()] = self.submissions[seat.index()].ok_or(PassingError::Incomplete)?;
        }

        for seat in PlayerPosition::LOOP {
            let hand = &mut hands[seat.index()];
            for card in selections[seat.index()] {
                if !hand.remove(card) {
                    return Err(PassingError::CardNotInHand(card));
                }
            }
        }

        for seat in PlayerPosition::LOOP {
            let target = self.direction.target(seat);
            for card in selections[seat.index()] {
                hands[target.index()].add(card);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{PassingDirection, PassingError, PassingState};
    use crate::model::card::Card;
    use crate::model::deck::Deck;
    use crate::model::hand::Hand;
    use crate::model::player::PlayerPosition;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;
    use std::collections::HashSet;

    #[test]
    fn rotation_repeats_every_four_rounds() {
        assert_eq!(PassingDirection::for_round(0), PassingDirection::Left);
        assert_eq!(PassingDirection::for_round(1), PassingDirection::Right);
        assert_eq!(PassingDirection::for_round(2), PassingDirection::Across);
        assert_eq!(PassingDirection::for_round(3), PassingDirection::Hold);
        assert_eq!(PassingDirection::for_round(4), PassingDirection::Left);
        assert_eq!(PassingDirection::for_round(4_001), PassingDirection::Right);
    }

    #[test]
    fn targets_form_a_permutation() {
        for direction in PassingDirection::CYCLE {
            let targets = direction.targets();
            let unique: HashSet<_> = targets.iter().copied().collect();
            assert_eq!(unique.len(), 4, "{direction:?} targets must be a bijection");
        }
    }

    #[test]
    fn target_mapping_works() {
        assert_eq!(
            PassingDirection::Left.target(PlayerPosition::North),
            PlayerPosition::West
        );
        assert_eq!(
            PassingDirection::Right.target(PlayerPosition::North),
            PlayerPosition::East
        );
        assert_eq!(
            PassingDirection::Across.target(PlayerPosition::North),
            PlayerPosition::South
        );
        assert_eq!(
            PassingDirection::Hold.targets(),
            PlayerPosition::LOOP
        );
    }

    #[test]
    fn submit_leaves_hand_untouched_and_apply_distributes() {
        let mut state = PassingState::new(PassingDirection::Left);
        let mut hands = Deck::standard().deal();

        for seat in PlayerPosition::LOOP {
            let hand = &hands[seat.index()];
            let cards = [hand.cards()[0], hand.cards()[1], hand.cards()[2]];
            state.submit(seat, cards, hand).unwrap();
            assert_eq!(hands[seat.index()].len(), 13);
        }

        state.apply(&mut hands).unwrap();
        for seat in PlayerPosition::LOOP {
            assert_eq!(hands[seat.index()].len(), 13);
        }
        // North held every club and passed 2C-4C to West.
        let west = &hands[PlayerPosition::West.index()];
        assert!(west.contains(Card::TWO_OF_CLUBS));
        assert!(!hands[PlayerPosition::North.index()].contains(Card::TWO_OF_CLUBS));
        // North receives East's three lowest diamonds.
        assert!(hands[PlayerPosition::North.index()].contains(Card::new(Rank::Two, Suit::Diamonds)));
    }

    #[test]
    fn apply_requires_every_submission() {
        let mut state = PassingState::new(PassingDirection::Across);
        let mut hands = Deck::standard().deal();
        let hand = &hands[0];
        let cards = [hand.cards()[0], hand.cards()[1], hand.cards()[2]];
        state.submit(PlayerPosition::North, cards, hand).unwrap();
        assert!(!state.is_complete());
        assert_eq!(state.apply(&mut hands), Err(PassingError::Incomplete));
    }

    #[test]
    fn cannot_submit_missing_card() {
        let mut state = PassingState::new(PassingDirection::Left);
        let hand = Hand::new();
        match state.submit(
            PlayerPosition::North,
            [
                Card::new(Rank::Two, Suit::Clubs),
                Card::new(Rank::Three, Suit::Clubs),
                Card::new(Rank::Four, Suit::Clubs),
            ],
            &hand,
        ) {
            Err(PassingError::CardNotInHand(_)) => {}
            other => panic!("expected missing card error, got {other:?}"),
        }
    }

    #[test]
    fn cannot_submit_duplicate_cards() {
        let mut state = PassingState::new(PassingDirection::Left);
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Two, Suit::Clubs),
            Card::new(Rank::Three, Suit::Clubs),
            Card::new(Rank::Four, Suit::Clubs),
        ]);

        let duplicate = [
            Card::new(Rank::Two, Suit::Clubs),
            Card::new(Rank::Three, Suit::Clubs),
            Card::new(Rank::Two, Suit::Clubs),
        ];

        assert_eq!(
            state.submit(PlayerPosition::North, duplicate, &hand),
            Err(PassingError::DuplicateCard(Card::TWO_OF_CLUBS))
        );
    }

    #[test]
    fn hold_direction_rejects_submissions() {
        let mut state = PassingState::new(PassingDirection::Hold);
        let hand = Hand::new();
        assert_eq!(
            state.submit(PlayerPosition::North, [Card::TWO_OF_CLUBS; 3], &hand),
            Err(PassingError::DirectionDoesNotPass)
        );
    }

    #[test]
    fn labels_match_direction_names() {
        assert_eq!(PassingDirection::Left.as_str(), "Left");
        assert_eq!(PassingDirection::Hold.as_str(), "Hold");
    }
}
