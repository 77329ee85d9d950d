use heartsim_bots::PolicyKind;
use heartsim_core::game::{Game, GameOptions};
use heartsim_core::policy::Policy;

fn table(kinds: [PolicyKind; 4], seed: u64) -> Game {
    let policies: Vec<Box<dyn Policy>> = kinds
        .iter()
        .enumerate()
        .map(|(seat, kind)| kind.spawn(seed.wrapping_add(seat as u64)))
        .collect();
    Game::new(policies, GameOptions::seeded(seed)).unwrap()
}

#[test]
fn every_strategy_finishes_games_without_violations() {
    let lineups = [
        [PolicyKind::Conservative; 4],
        [PolicyKind::Random; 4],
        [PolicyKind::MoonShooter; 4],
        [
            PolicyKind::Conservative,
            PolicyKind::Random,
            PolicyKind::MoonShooter,
            PolicyKind::FirstLegal,
        ],
    ];
    for (index, lineup) in lineups.into_iter().enumerate() {
        for seed in 0..5u64 {
            let result = table(lineup, seed * 31 + index as u64)
                .play_game()
                .unwrap_or_else(|err| panic!("{lineup:?} seed {seed}: {err}"));
            assert!(result.scores.iter().any(|&score| score >= 100));
            assert!(!result.losers().is_empty());
        }
    }
}

#[test]
fn seeded_tables_are_reproducible() {
    let lineup = [
        PolicyKind::Random,
        PolicyKind::Conservative,
        PolicyKind::Random,
        PolicyKind::MoonShooter,
    ];
    let first = table(lineup, 404).play_game().unwrap();
    let second = table(lineup, 404).play_game().unwrap();
    assert_eq!(first, second);
}

#[test]
fn conservative_table_beats_random_players_on_average() {
    let lineup = [
        PolicyKind::Conservative,
        PolicyKind::Random,
        PolicyKind::Conservative,
        PolicyKind::Random,
    ];
    let mut conservative = 0u64;
    let mut random = 0u64;
    for seed in 0..40u64 {
        let result = table(lineup, seed).play_game().unwrap();
        conservative += u64::from(result.scores[0] + result.scores[2]);
        random += u64::from(result.scores[1] + result.scores[3]);
    }
    assert!(conservative < random, "conservative {conservative} vs random {random}");
}
