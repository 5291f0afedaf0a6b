//! End-to-end games on the standard board.

use monopoly_sim::rng::ScriptedRng;
use monopoly_sim::{
    init_game, play_round, play_turn, run_game, Board, ConfigError, EventKind, Game, GameConfig, GameOutcome,
    Phase, VisitOutcome,
};

fn two_player(rng: ScriptedRng) -> Game {
    Game::with_rng(GameConfig::default(), Board::standard().unwrap(), Box::new(rng)).unwrap()
}

#[test]
fn one_or_nine_players_are_rejected() {
    for n in [1, 9] {
        let err = init_game(GameConfig { n_players: n, ..GameConfig::default() }).err().unwrap();
        assert!(matches!(err, ConfigError::PlayerCount { got, min: 2, max: 8 } if got == n));
    }
}

#[test]
fn rent_moves_between_players() {
    // Player 1 lands on Baltic (3) and buys, player 2 follows.
    let rng = ScriptedRng::new(0).with_rolls(&[(1, 2), (2, 1)]).with_flips(&[true]);
    let mut game = two_player(rng);
    game.update_round();

    play_turn(&mut game, 0);
    assert_eq!(game.players[0].cash, 1440);
    assert_eq!(game.board.property(3).unwrap().owner, Some(1));

    let rent = game.board.property(3).unwrap().rent_now;
    let events = play_turn(&mut game, 1);
    assert!(events
        .iter()
        .any(|e| e.kind == EventKind::Visited { position: 3, outcome: VisitOutcome::PaidRent { to: 1, amount: rent } }));
    assert_eq!(game.players[1].cash, 1500 - rent);
    assert_eq!(game.players[0].cash, 1440 + rent);
}

#[test]
fn thousand_round_game_terminates_with_full_history() {
    for seed in [1, 7, 42, 2024] {
        let mut game = init_game(GameConfig { max_rounds: 1000, seed, ..GameConfig::default() }).unwrap();
        let outcome = run_game(&mut game);

        assert!(game.round >= 1 && game.round <= 1000);
        match &outcome {
            GameOutcome::Winner(id) => {
                assert_eq!(game.players_remaining, 1);
                assert!(!game.player(*id).unwrap().bankrupt);
            }
            GameOutcome::Stalemate { round, remaining } => {
                assert_eq!(*round, 1000);
                assert!(remaining.len() > 1);
            }
        }
        assert_eq!(game.phase, Phase::GameOver(outcome));

        for round in 1..=game.round {
            let row = game.snapshots.get(round).unwrap_or_else(|| panic!("round {round} missing"));
            assert_eq!(row.round, round);
            assert_eq!(row.players.len(), 2);
        }
        assert!(game.snapshots.get(game.round + 1).is_none());
    }
}

#[test]
fn same_seed_same_game() {
    let config = GameConfig { n_players: 4, max_rounds: 200, seed: 99, ..GameConfig::default() };
    let mut a = init_game(config.clone()).unwrap();
    let mut b = init_game(config).unwrap();
    assert_eq!(run_game(&mut a), run_game(&mut b));
    let rows_a: Vec<_> = a.snapshots.completed().cloned().collect();
    let rows_b: Vec<_> = b.snapshots.completed().cloned().collect();
    assert_eq!(rows_a, rows_b);
}

#[test]
fn money_is_conserved_apart_from_go_bonus() {
    let mut game = init_game(GameConfig { n_players: 6, max_rounds: 300, seed: 5, ..GameConfig::default() }).unwrap();
    let mut expected = game.money_supply();
    while !game.is_over() && game.round < 300 && game.players_remaining > 1 {
        let events = play_round(&mut game);
        let bonuses: usize = events
            .iter()
            .filter_map(|e| match e.kind {
                EventKind::Moved { passed_go, .. } => Some(passed_go),
                _ => None,
            })
            .sum();
        expected += 200 * bonuses as i64;
        assert_eq!(game.money_supply(), expected);
    }
}

#[test]
fn owners_never_revert() {
    let mut game = init_game(GameConfig { n_players: 3, max_rounds: 400, seed: 11, ..GameConfig::default() }).unwrap();
    let mut seen: Vec<Option<u8>> = vec![None; 40];
    while game.players_remaining > 1 && game.round < 400 {
        play_round(&mut game);
        for (position, slot) in seen.iter_mut().enumerate() {
            let owner = game.board.property(position).and_then(|p| p.owner);
            if let Some(before) = *slot {
                assert_eq!(owner, Some(before));
            }
            *slot = owner;
        }
        for player in &game.players {
            for &position in &player.properties {
                assert_eq!(game.board.property(position).unwrap().owner, Some(player.id));
            }
            for group in &player.monopolies {
                assert!(game
                    .board
                    .group_positions(group)
                    .all(|pos| game.board.property(pos).unwrap().owner == Some(player.id)));
            }
        }
    }
}

#[test]
fn bankruptcy_mid_round_stops_the_round() {
    // Three players: player 2 cannot pay the income tax and player 3 is already out.
    let rng = ScriptedRng::new(0).with_rolls(&[(1, 2), (1, 3)]).with_flips(&[false]);
    let config = GameConfig { n_players: 3, ..GameConfig::default() };
    let mut game = Game::with_rng(config, Board::standard().unwrap(), Box::new(rng)).unwrap();
    game.players[2].bankrupt = true;
    game.players[1].cash = 10;
    game.update();

    let events = play_round(&mut game);
    assert!(game.players[1].bankrupt);
    assert_eq!(game.players_remaining, 1);
    assert!(events.iter().all(|e| e.player != 3));
    assert_eq!(run_game(&mut game), GameOutcome::Winner(1));
}
