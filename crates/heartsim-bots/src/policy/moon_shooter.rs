use super::{Policy, PolicyContext, log_pass_decision, log_play_decision, would_capture};
use heartsim_core::model::card::Card;

/// Tries to capture every point in the round.
///
/// Passes its three lowest cards, leads its highest card and follows with
/// its highest card whenever that takes the trick. When it cannot win it
/// throws away its lowest card.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoonShooterPolicy;

impl MoonShooterPolicy {
    pub fn new() -> Self {
        Self
    }
}

fn lowest(cards: &[Card]) -> Option<Card> {
    cards.iter().copied().min_by_key(|card| (card.rank, card.suit))
}

fn highest(cards: &[Card]) -> Option<Card> {
    cards.iter().copied().max_by_key(|card| (card.rank, card.suit))
}

impl Policy for MoonShooterPolicy {
    fn choose_pass(&mut self, ctx: &PolicyContext) -> [Card; 3] {
        let mut cards = ctx.hand().cards().to_vec();
        cards.sort_by_key(|card| (card.rank, card.suit));
        let selection = [cards[0], cards[1], cards[2]];
        log_pass_decision(ctx, "moon_shooter", &selection);
        selection
    }

    fn choose_play(&mut self, ctx: &PolicyContext) -> Card {
        let legal_moves = ctx.legal_moves();
        let winners: Vec<Card> = legal_moves
            .iter()
            .copied()
            .filter(|card| would_capture(ctx, *card))
            .collect();

        let chosen = highest(&winners)
            .or_else(|| lowest(&legal_moves))
            .unwrap_or(Card::TWO_OF_CLUBS);
        log_play_decision(ctx, "moon_shooter", &legal_moves, chosen);
        chosen
    }
}
