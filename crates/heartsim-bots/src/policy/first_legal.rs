use super::{Policy, PolicyContext, log_pass_decision, log_play_decision};
use heartsim_core::model::card::Card;

/// Plays the first legal card of its sorted hand and passes its first
/// three cards. Fully deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstLegalPolicy;

impl FirstLegalPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for FirstLegalPolicy {
    fn choose_pass(&mut self, ctx: &PolicyContext) -> [Card; 3] {
        let cards = ctx.hand().cards();
        let selection = [cards[0], cards[1], cards[2]];
        log_pass_decision(ctx, "first_legal", &selection);
        selection
    }

    fn choose_play(&mut self, ctx: &PolicyContext) -> Card {
        let legal_moves = ctx.legal_moves();
        let chosen = legal_moves[0];
        log_play_decision(ctx, "first_legal", &legal_moves, chosen);
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::testing::{card, context, play, split_clubs};
    use heartsim_core::model::deck::Deck;
    use heartsim_core::model::passing::PassingDirection;
    use heartsim_core::model::player::PlayerPosition;
    use heartsim_core::model::round::RoundState;
    use heartsim_core::model::score::ScoreBoard;

    #[test]
    fn passes_the_first_three_cards() {
        let round = RoundState::deal(&Deck::standard(), PassingDirection::Left);
        let scores = ScoreBoard::new();
        let ctx = context(&round, &scores, PlayerPosition::South);
        let selection = FirstLegalPolicy::new().choose_pass(&ctx);
        assert_eq!(selection, [card("2S"), card("3S"), card("4S")]);
    }

    #[test]
    fn opens_with_two_of_clubs_then_lowest_follow() {
        let mut round = split_clubs();
        let scores = ScoreBoard::new();
        let mut policy = FirstLegalPolicy::new();

        let ctx = context(&round, &scores, PlayerPosition::North);
        assert_eq!(policy.choose_play(&ctx), Card::TWO_OF_CLUBS);

        play(&mut round, &["2C"]);
        let ctx = context(&round, &scores, PlayerPosition::West);
        assert_eq!(policy.choose_play(&ctx), card("2H"));
    }
}
