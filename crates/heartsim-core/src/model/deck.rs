use crate::error::DeckError;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::array;
use std::collections::HashSet;

pub const DECK_SIZE: usize = 52;
pub const HAND_SIZE: usize = 13;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Suit-major, rank-ascending: 2C..AC, 2D..AD, 2S..AS, 2H..AH.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    /// Accepts an injected ordering, e.g. a scripted deal for replay.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, DeckError> {
        if cards.len() != DECK_SIZE {
            return Err(DeckError::WrongSize(cards.len()));
        }
        let mut seen = HashSet::with_capacity(DECK_SIZE);
        for card in cards.iter().copied() {
            if !seen.insert(card) {
                return Err(DeckError::Duplicate(card));
            }
        }
        Ok(Self { cards })
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Splits the deck into four contiguous 13-card hands in seat order.
    pub fn deal(&self) -> [Hand; 4] {
        array::from_fn(|seat| {
            let start = seat * HAND_SIZE;
            Hand::with_cards(self.cards[start..start + HAND_SIZE].to_vec())
        })
    }
}
