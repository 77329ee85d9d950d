use super::{ConservativePolicy, FirstLegalPolicy, MoonShooterPolicy, Policy, RandomPolicy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Named strategy that can be instantiated per game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    FirstLegal,
    Random,
    Conservative,
    MoonShooter,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown policy kind '{0}' (expected first_legal, random, conservative or moon_shooter)")]
pub struct UnknownPolicyKind(pub String);

impl PolicyKind {
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::FirstLegal,
        PolicyKind::Random,
        PolicyKind::Conservative,
        PolicyKind::MoonShooter,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PolicyKind::FirstLegal => "first_legal",
            PolicyKind::Random => "random",
            PolicyKind::Conservative => "conservative",
            PolicyKind::MoonShooter => "moon_shooter",
        }
    }

    /// Fresh policy instance. `seed` only matters for randomized kinds.
    pub fn spawn(self, seed: u64) -> Box<dyn Policy> {
        match self {
            PolicyKind::FirstLegal => Box::new(FirstLegalPolicy::new()),
            PolicyKind::Random => Box::new(RandomPolicy::new(seed)),
            PolicyKind::Conservative => Box::new(ConservativePolicy::new()),
            PolicyKind::MoonShooter => Box::new(MoonShooterPolicy::new()),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = UnknownPolicyKind;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        PolicyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownPolicyKind(raw.to_string()))
    }
}
