use crate::model::card::Card;
use crate::model::passing::PassingError;
use crate::model::player::PlayerPosition;
use crate::model::round::PlayError;
use thiserror::Error;

/// Rejected card construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("rank index {0} is outside 0..=12")]
    RankOutOfRange(u8),
    #[error("suit index {0} is outside 0..=3")]
    SuitOutOfRange(u8),
    #[error("unrecognized suit symbol {0:?}")]
    UnknownSuit(char),
    #[error("malformed card {0:?}")]
    Malformed(String),
}

/// Rejected injected deck ordering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("deck must hold 52 cards but has {0}")]
    WrongSize(usize),
    #[error("card {0} appears more than once")]
    Duplicate(Card),
}

/// Failures that abort a game.
///
/// `SeatCount` is raised before any simulation runs. The rules variants carry
/// the offending seat and card(s) so the driver can name the broken policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("a game requires exactly 4 players but {found} were supplied")]
    SeatCount { found: usize },
    #[error("{seat} played illegal card {card}: {source}")]
    IllegalPlay {
        seat: PlayerPosition,
        card: Card,
        #[source]
        source: PlayError,
    },
    #[error("{seat} passed illegal cards {cards:?}: {source}")]
    IllegalPass {
        seat: PlayerPosition,
        cards: [Card; 3],
        #[source]
        source: PassingError,
    },
    #[error("pass resolution failed: {0}")]
    PassResolution(PassingError),
}

impl GameError {
    /// Seat whose policy produced the violation, if any.
    pub fn offender(&self) -> Option<PlayerPosition> {
        match self {
            GameError::SeatCount { .. } | GameError::PassResolution(_) => None,
            GameError::IllegalPlay { seat, .. } | GameError::IllegalPass { seat, .. } => {
                Some(*seat)
            }
        }
    }
}
