use crate::error::CardError;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const TWO_OF_CLUBS: Card = Card::new(Rank::Two, Suit::Clubs);
    pub const QUEEN_OF_SPADES: Card = Card::new(Rank::Queen, Suit::Spades);

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Builds a card from a rank index in `0..=12` and a suit index in `0..=3`.
    pub fn from_indices(rank: u8, suit: u8) -> Result<Self, CardError> {
        let rank = Rank::from_index(rank).ok_or(CardError::RankOutOfRange(rank))?;
        let suit = Suit::from_index(suit as usize).ok_or(CardError::SuitOutOfRange(suit))?;
        Ok(Self::new(rank, suit))
    }

    pub const fn is_point_card(self) -> bool {
        matches!(self.suit, Suit::Hearts) || self.is_queen_of_spades()
    }

    pub const fn is_queen_of_spades(self) -> bool {
        matches!(self.rank, Rank::Queen) && matches!(self.suit, Suit::Spades)
    }

    pub const fn points(self) -> u8 {
        if self.is_queen_of_spades() {
            13
        } else if self.suit.is_heart() {
            1
        } else {
            0
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        let mut chars = text.chars();
        let suit_symbol = chars
            .next_back()
            .ok_or_else(|| CardError::Malformed(text.to_string()))?;
        let rank_text = chars.as_str();
        if rank_text.is_empty() {
            return Err(CardError::Malformed(text.to_string()));
        }
        let suit = Suit::from_symbol(suit_symbol).ok_or(CardError::UnknownSuit(suit_symbol))?;
        let rank =
            Rank::from_symbol(rank_text).ok_or_else(|| CardError::Malformed(text.to_string()))?;
        Ok(Card::new(rank, suit))
    }
}
