use heartsim_bots::PolicyKind;
use heartsim_core::policy::Policy;

use crate::config::AgentConfig;

/// A configured participant, able to produce a fresh policy for each game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AgentBlueprint {
    name: String,
    kind: PolicyKind,
}

impl AgentBlueprint {
    pub(crate) fn from_configs(configs: &[AgentConfig]) -> Vec<Self> {
        configs.iter().map(Self::from_config).collect()
    }

    fn from_config(config: &AgentConfig) -> Self {
        Self {
            name: config.name.clone(),
            kind: config.kind,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn kind(&self) -> PolicyKind {
        self.kind
    }

    /// Policy for `seat_index` in the game seeded with `game_seed`.
    pub(crate) fn spawn_policy(&self, game_seed: u64, seat_index: usize) -> Box<dyn Policy> {
        self.kind.spawn(seat_seed(game_seed, seat_index))
    }
}

fn seat_seed(game_seed: u64, seat_index: usize) -> u64 {
    game_seed ^ (seat_index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blueprints_keep_seat_order() {
        let configs = vec![
            AgentConfig {
                name: "a".into(),
                kind: PolicyKind::Random,
            },
            AgentConfig {
                name: "b".into(),
                kind: PolicyKind::FirstLegal,
            },
        ];
        let blueprints = AgentBlueprint::from_configs(&configs);
        assert_eq!(blueprints[0].name(), "a");
        assert_eq!(blueprints[1].kind(), PolicyKind::FirstLegal);
    }

    #[test]
    fn seats_get_distinct_seeds() {
        let seeds: Vec<u64> = (0..4).map(|seat| seat_seed(17, seat)).collect();
        for (i, a) in seeds.iter().enumerate() {
            for b in &seeds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
