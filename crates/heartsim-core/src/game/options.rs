use crate::model::score::DEFAULT_SCORE_LIMIT;
use serde::{Deserialize, Serialize};

/// Deal seed used when none is configured.
pub const DEFAULT_SEED: u64 = 0;

/// Knobs for a single game. Embedded directly in driver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOptions {
    /// Seeds the deal shuffle; `DEFAULT_SEED` when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// The game ends after the first round that leaves anyone at or above this.
    #[serde(default = "default_score_limit")]
    pub score_limit: u32,
}

impl GameOptions {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn with_score_limit(mut self, score_limit: u32) -> Self {
        self.score_limit = score_limit;
        self
    }
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            seed: None,
            score_limit: DEFAULT_SCORE_LIMIT,
        }
    }
}

fn default_score_limit() -> u32 {
    DEFAULT_SCORE_LIMIT
}
