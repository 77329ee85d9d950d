#![deny(warnings)]

pub mod error;
pub mod game;
pub mod model;
pub mod policy;

pub use error::{CardError, DeckError, GameError};
pub use game::{Game, GameOptions, GameResult, RoundSummary};
pub use policy::{Policy, PolicyContext};
