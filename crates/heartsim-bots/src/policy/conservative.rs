use super::{Policy, PolicyContext, log_pass_decision, log_play_decision};
use heartsim_core::model::card::Card;
use heartsim_core::model::rank::Rank;
use heartsim_core::model::suit::Suit;

/// Avoids taking tricks.
///
/// Cards are ranked by danger: points first, then rank, then suit. The
/// policy leads its safest card. When following it sheds the most dangerous
/// card that stays under the led card, falling back to its safest card when
/// none does. It passes away its three safest cards.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConservativePolicy;

impl ConservativePolicy {
    pub fn new() -> Self {
        Self
    }
}

fn danger(card: &Card) -> (u8, Rank, Suit) {
    (card.points(), card.rank, card.suit)
}

/// Off-suit or lower than the card that opened the trick.
fn stays_under_lead(lead: Card, card: Card) -> bool {
    card.suit != lead.suit || card.rank < lead.rank
}

impl Policy for ConservativePolicy {
    fn choose_pass(&mut self, ctx: &PolicyContext) -> [Card; 3] {
        let mut cards = ctx.hand().cards().to_vec();
        cards.sort_by_key(danger);
        let selection = [cards[0], cards[1], cards[2]];
        log_pass_decision(ctx, "conservative", &selection);
        selection
    }

    fn choose_play(&mut self, ctx: &PolicyContext) -> Card {
        let mut legal_moves = ctx.legal_moves();
        legal_moves.sort_by_key(danger);
        let safest = legal_moves[0];

        let chosen = match ctx.round.current_trick().plays().first() {
            None => safest,
            Some(lead) => legal_moves
                .iter()
                .rev()
                .copied()
                .find(|card| stays_under_lead(lead.card, *card))
                .unwrap_or(safest),
        };
        log_play_decision(ctx, "conservative", &legal_moves, chosen);
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::testing::{card, context, deal, play, split_clubs};
    use heartsim_core::model::deck::Deck;
    use heartsim_core::model::passing::PassingDirection;
    use heartsim_core::model::player::PlayerPosition;
    use heartsim_core::model::round::RoundState;
    use heartsim_core::model::score::ScoreBoard;

    #[test]
    fn passes_its_three_safest_cards() {
        let round = RoundState::deal(&Deck::standard(), PassingDirection::Left);
        let scores = ScoreBoard::new();
        let mut policy = ConservativePolicy::new();

        let ctx = context(&round, &scores, PlayerPosition::South);
        assert_eq!(
            policy.choose_pass(&ctx),
            [card("2S"), card("3S"), card("4S")]
        );

        let ctx = context(&round, &scores, PlayerPosition::North);
        assert_eq!(policy.choose_pass(&ctx), [card("2C"), card("3C"), card("4C")]);

        let ctx = context(&round, &scores, PlayerPosition::West);
        assert_eq!(policy.choose_pass(&ctx), [card("2H"), card("3H"), card("4H")]);
    }

    #[test]
    fn void_followers_dump_their_worst_cards() {
        let mut round = RoundState::deal(&Deck::standard(), PassingDirection::Hold);
        let scores = ScoreBoard::new();
        let mut policy = ConservativePolicy::new();
        play(&mut round, &["2C"]);

        // West, South and East act in that order after North.
        let ctx = context(&round, &scores, PlayerPosition::West);
        assert_eq!(policy.choose_play(&ctx), card("AH"));
        play(&mut round, &["AH"]);

        let ctx = context(&round, &scores, PlayerPosition::South);
        assert_eq!(policy.choose_play(&ctx), Card::QUEEN_OF_SPADES);
        play(&mut round, &["QS"]);

        let ctx = context(&round, &scores, PlayerPosition::East);
        assert_eq!(policy.choose_play(&ctx), card("AD"));
    }

    #[test]
    fn ducks_under_the_lead_with_its_highest_loser() {
        let mut round = split_clubs();
        let scores = ScoreBoard::new();
        let mut policy = ConservativePolicy::new();
        play(&mut round, &["2C", "2H", "2S", "8C", "JC"]);

        assert_eq!(round.to_act(), PlayerPosition::North);
        let ctx = context(&round, &scores, PlayerPosition::North);
        assert_eq!(policy.choose_play(&ctx), card("7C"));
    }

    #[test]
    fn takes_the_cheapest_win_when_every_card_captures() {
        let mut round = split_clubs();
        let scores = ScoreBoard::new();
        let mut policy = ConservativePolicy::new();
        play(&mut round, &["2C", "2H", "2S"]);

        let ctx = context(&round, &scores, PlayerPosition::East);
        assert_eq!(policy.choose_play(&ctx), card("8C"));
    }

    #[test]
    fn leads_its_safest_card() {
        let mut round = RoundState::deal(&Deck::standard(), PassingDirection::Hold);
        let scores = ScoreBoard::new();
        play(&mut round, &["2C", "2H", "2S", "2D"]);

        assert_eq!(round.to_act(), PlayerPosition::North);
        let ctx = context(&round, &scores, PlayerPosition::North);
        assert_eq!(ConservativePolicy::new().choose_play(&ctx), card("3C"));
    }

    #[test]
    fn ducks_under_the_led_card_not_the_current_winner() {
        let mut round = deal(
            [
                [
                    "2C", "10C", "2D", "3D", "4D", "5D", "6D", "7D", "8D", "9D", "10D", "JD", "QD",
                ],
                [
                    "AC", "6C", "7C", "9C", "JC", "QC", "KC", "KD", "AD", "AS", "QH", "KH", "AH",
                ],
                [
                    "4C", "2S", "3S", "4S", "5S", "6S", "7S", "8S", "9S", "10S", "JS", "QS", "KS",
                ],
                [
                    "3C", "5C", "8C", "2H", "3H", "4H", "5H", "6H", "7H", "8H", "9H", "10H", "JH",
                ],
            ],
            PassingDirection::Hold,
        );
        let scores = ScoreBoard::new();
        play(&mut round, &["2C", "3C", "4C", "AC", "6C", "10C"]);

        // 8C loses to 10C but beats the 6C lead, so only 5C counts as a duck.
        assert_eq!(round.to_act(), PlayerPosition::West);
        let ctx = context(&round, &scores, PlayerPosition::West);
        assert_eq!(ConservativePolicy::new().choose_play(&ctx), card("5C"));
    }
}
