pub mod card;
pub mod deck;
pub mod hand;
pub mod passing;
pub mod player;
pub mod rank;
pub mod round;
pub mod rules;
pub mod score;
pub mod suit;
pub mod trick;
