//! Legality checks for a single play. Holding the card is checked by the
//! round engine; these functions only judge the rules of Hearts.

use crate::model::card::Card;
use crate::model::deck::HAND_SIZE;
use crate::model::player::PlayerPosition;
use crate::model::round::{PlayError, RoundState};

/// Explains why `card` may not be played by `seat` right now.
pub fn check_play(round: &RoundState, seat: PlayerPosition, card: Card) -> Result<(), PlayError> {
    let hand = round.hand(seat);

    if let Some(led) = round.current_trick().lead_suit() {
        if card.suit != led && hand.has_suit(led) {
            return Err(PlayError::MustFollowSuit(led));
        }
        return Ok(());
    }

    // A full hand on lead means nobody has played yet this round.
    if hand.len() == HAND_SIZE {
        if card != Card::TWO_OF_CLUBS {
            return Err(PlayError::MustLeadTwoOfClubs);
        }
        return Ok(());
    }

    if card.is_point_card() && !round.hearts_broken() && !hand.only_point_cards() {
        return Err(PlayError::PointsNotBroken);
    }

    Ok(())
}

pub fn is_legal(round: &RoundState, seat: PlayerPosition, card: Card) -> bool {
    check_play(round, seat, card).is_ok()
}

/// Cards in `seat`'s hand that may be played now, in hand order.
pub fn legal_moves(round: &RoundState, seat: PlayerPosition) -> Vec<Card> {
    round
        .hand(seat)
        .iter()
        .copied()
        .filter(|card| is_legal(round, seat, *card))
        .collect()
}
