use super::{Policy, PolicyContext, log_pass_decision, log_play_decision};
use heartsim_core::model::card::Card;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Uniformly random legal play; passes a random sample of three cards.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn choose_pass(&mut self, ctx: &PolicyContext) -> [Card; 3] {
        let mut picks = ctx.hand().cards().choose_multiple(&mut self.rng, 3).copied();
        let mut next = || picks.next().unwrap_or(Card::TWO_OF_CLUBS);
        let selection = [next(), next(), next()];
        log_pass_decision(ctx, "random", &selection);
        selection
    }

    fn choose_play(&mut self, ctx: &PolicyContext) -> Card {
        let legal_moves = ctx.legal_moves();
        let chosen = legal_moves
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Card::TWO_OF_CLUBS);
        log_play_decision(ctx, "random", &legal_moves, chosen);
        chosen
    }
}
