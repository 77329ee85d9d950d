use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Serialize)]
pub struct Trick {
    leader: PlayerPosition,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Play {
    pub position: PlayerPosition,
    pub card: Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrickError {
    #[error("trick already complete")]
    TrickComplete,
    #[error("expected {expected} to play next but got {actual}")]
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    #[error("{0} has already played this trick")]
    AlreadyPlayed(PlayerPosition),
}

impl Trick {
    pub fn new(leader: PlayerPosition) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(4),
        }
    }

    pub fn leader(&self) -> PlayerPosition {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.plays.iter().map(|play| play.card)
    }

    pub fn play(&mut self, position: PlayerPosition, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }

        if self.plays.iter().any(|play| play.position == position) {
            return Err(TrickError::AlreadyPlayed(position));
        }

        let expected = self.expected_position();
        if expected != position {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: position,
            });
        }

        self.plays.push(Play { position, card });
        Ok(())
    }

    /// Play currently holding the trick: highest card of the led suit.
    ///
    /// Folds over the plays in order; the best only moves when a later card
    /// follows the led suit and outranks it, so off-suit cards never win.
    pub fn leading_play(&self) -> Option<Play> {
        let (first, rest) = self.plays.split_first()?;
        Some(rest.iter().fold(*first, |best, play| {
            if play.card.suit == best.card.suit && play.card.rank > best.card.rank {
                *play
            } else {
                best
            }
        }))
    }

    pub fn winner(&self) -> Option<PlayerPosition> {
        if !self.is_complete() {
            return None;
        }
        self.leading_play().map(|play| play.position)
    }

    pub fn points(&self) -> u8 {
        self.plays.iter().map(|play| play.card.points()).sum()
    }

    fn expected_position(&self) -> PlayerPosition {
        self.plays
            .last()
            .map(|play| play.position.left())
            .unwrap_or(self.leader)
    }
}

#[cfg(test)]
mod tests {
    use super::{Trick, TrickError};
    use crate::model::card::Card;
    use crate::model::player::PlayerPosition;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn trick_from(leader: PlayerPosition, cards: [Card; 4]) -> Trick {
        let mut trick = Trick::new(leader);
        let mut seat = leader;
        for card in cards {
            trick.play(seat, card).unwrap();
            seat = seat.left();
        }
        trick
    }

    #[test]
    fn plays_follow_turn_order() {
        let mut trick = Trick::new(PlayerPosition::North);
        assert!(
            trick
                .play(PlayerPosition::North, Card::new(Rank::Two, Suit::Clubs))
                .is_ok()
        );
        assert!(matches!(
            trick.play(PlayerPosition::East, Card::new(Rank::Three, Suit::Clubs)),
            Err(TrickError::OutOfTurn {
                expected: PlayerPosition::West,
                ..
            })
        ));
    }

    #[test]
    fn off_suit_cards_never_win() {
        // 7C, KC, 2H, AC: the ace of the led suit wins despite the heart.
        let trick = trick_from(
            PlayerPosition::North,
            [
                Card::new(Rank::Seven, Suit::Clubs),
                Card::new(Rank::King, Suit::Clubs),
                Card::new(Rank::Two, Suit::Hearts),
                Card::new(Rank::Ace, Suit::Clubs),
            ],
        );
        let last = trick.plays()[3].position;
        assert_eq!(trick.winner(), Some(last));
        assert_eq!(trick.points(), 1);
    }

    #[test]
    fn winner_is_highest_card_of_lead_suit() {
        let trick = trick_from(
            PlayerPosition::East,
            [
                Card::new(Rank::Ten, Suit::Clubs),
                Card::new(Rank::Queen, Suit::Clubs),
                Card::new(Rank::Four, Suit::Clubs),
                Card::new(Rank::Ace, Suit::Spades),
            ],
        );

        assert_eq!(trick.winner(), Some(PlayerPosition::North));
        assert_eq!(trick.points(), 0);
    }

    #[test]
    fn leader_wins_when_nobody_follows() {
        let trick = trick_from(
            PlayerPosition::South,
            [
                Card::new(Rank::Two, Suit::Diamonds),
                Card::new(Rank::Ace, Suit::Hearts),
                Card::QUEEN_OF_SPADES,
                Card::new(Rank::King, Suit::Clubs),
            ],
        );
        assert_eq!(trick.winner(), Some(PlayerPosition::South));
        assert_eq!(trick.points(), 14);
    }

    #[test]
    fn incomplete_trick_has_no_winner() {
        let mut trick = Trick::new(PlayerPosition::North);
        trick.play(PlayerPosition::North, Card::TWO_OF_CLUBS).unwrap();
        assert_eq!(trick.winner(), None);
        assert_eq!(
            trick.leading_play().map(|p| p.card),
            Some(Card::TWO_OF_CLUBS)
        );
        assert_eq!(trick.lead_suit(), Some(Suit::Clubs));
    }
}
