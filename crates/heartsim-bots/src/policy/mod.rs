mod conservative;
mod first_legal;
mod kind;
mod moon_shooter;
mod random;

pub use conservative::ConservativePolicy;
pub use first_legal::FirstLegalPolicy;
pub use heartsim_core::policy::{Policy, PolicyContext};
pub use kind::{PolicyKind, UnknownPolicyKind};
pub use moon_shooter::MoonShooterPolicy;
pub use random::RandomPolicy;

use heartsim_core::model::card::Card;
use tracing::{Level, event};

fn log_pass_decision(ctx: &PolicyContext, policy: &'static str, selection: &[Card; 3]) {
    if !tracing::enabled!(Level::TRACE) {
        return;
    }

    let cards = selection
        .iter()
        .map(|card| card.to_string())
        .collect::<Vec<_>>()
        .join(",");

    event!(
        target: "heartsim_bots::pass",
        Level::TRACE,
        seat = ctx.seat.label(),
        policy,
        round_index = ctx.round_index,
        direction = ctx.passing_direction.as_str(),
        cards = %cards
    );
}

fn log_play_decision(ctx: &PolicyContext, policy: &'static str, legal_moves: &[Card], chosen: Card) {
    if !tracing::enabled!(Level::TRACE) {
        return;
    }

    let legal_preview = if legal_moves.len() <= 6 {
        legal_moves
            .iter()
            .map(|card| card.to_string())
            .collect::<Vec<_>>()
            .join(",")
    } else {
        format!("{} moves", legal_moves.len())
    };

    event!(
        target: "heartsim_bots::play",
        Level::TRACE,
        seat = ctx.seat.label(),
        policy,
        legal_count = legal_moves.len(),
        legal_moves = %legal_preview,
        chosen = %chosen,
        hearts_broken = ctx.round.hearts_broken(),
        trick_cards = ctx.round.current_trick().plays().len(),
    );
}

/// Whether `card` would take the lead of the trick in progress.
fn would_capture(ctx: &PolicyContext, card: Card) -> bool {
    match ctx.round.current_trick().leading_play() {
        Some(best) => card.suit == best.card.suit && card.rank > best.card.rank,
        None => true,
    }
}
