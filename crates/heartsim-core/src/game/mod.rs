pub mod match_state;
pub mod options;
pub mod table;

pub use match_state::MatchState;
pub use options::GameOptions;
pub use table::{Game, GameResult, RoundSummary};
