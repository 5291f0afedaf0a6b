pub mod board;
pub mod bot;
pub mod dice;
pub mod error;
pub mod game;
pub mod model;
pub mod player;
pub mod rng;
pub mod rules;

pub use board::{Board, BoardSource, Property, Space};
pub use error::{BoardError, ConfigError, TurnError};
pub use game::{Game, GameConfig};
pub use model::*;

use player::JailDecision;
use tracing::{info, warn};

/// Builds a game on the standard board.
pub fn init_game(config: GameConfig) -> Result<Game, ConfigError> {
    Game::new(config, Board::standard()?)
}

fn pair_mut(players: &mut [Player], a: usize, b: usize) -> (&mut Player, &mut Player) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = players.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = players.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

/// Applies whatever the space under player `idx` demands.
fn resolve_space(game: &mut Game, idx: usize, events: &mut Vec<Event>) {
    let position = game.players[idx].position;
    let id = game.players[idx].id;

    match game.board.space(position) {
        Space::Tax { tax, .. } => {
            let tax = *tax;
            match game.players[idx].pay(tax, &mut game.bank) {
                Ok(()) => {
                    let ev = game.event(id, EventKind::PaidTax { amount: tax });
                    events.push(ev);
                }
                Err(err) => {
                    info!(player = id, %err, "cannot pay tax");
                    game.players[idx].go_bankrupt(Counterparty::Bank);
                    let ev = game.event(id, EventKind::Bankrupt { creditor: Counterparty::Bank });
                    events.push(ev);
                }
            }
        }
        Space::Street(_) | Space::Railroad(_) | Space::Utility(_) => {
            let owner_idx = game
                .board
                .property(position)
                .and_then(|p| p.owner)
                .filter(|&owner| owner != id)
                .and_then(|owner| game.players.iter().position(|p| p.id == owner));

            let result = match owner_idx {
                Some(o) => {
                    let (visitor, owner) = pair_mut(&mut game.players, idx, o);
                    visitor.visit_property(position, &mut game.board, owner, game.rng.as_mut())
                }
                None => game.players[idx].visit_property(position, &mut game.board, &mut game.bank, game.rng.as_mut()),
            };

            match result {
                Ok(outcome) => {
                    let creditor = match outcome {
                        VisitOutcome::Bankrupt { creditor, .. } => Some(creditor),
                        _ => None,
                    };
                    let ev = game.event(id, EventKind::Visited { position, outcome });
                    events.push(ev);
                    if let Some(creditor) = creditor {
                        let ev = game.event(id, EventKind::Bankrupt { creditor });
                        events.push(ev);
                    }
                }
                Err(err) => warn!(player = id, position, %err, "property visit failed"),
            }
        }
        Space::Chance | Space::Chest | Space::Jail { .. } | Space::Idle { .. } => {}
    }
}

/// Plays one turn for the player at index `idx` and returns what happened.
/// Bankrupt players get no turn.
pub fn play_turn(game: &mut Game, idx: usize) -> Vec<Event> {
    let mut events = vec![];
    if game.players[idx].bankrupt {
        return events;
    }
    let id = game.players[idx].id;
    game.pass_dice();

    loop {
        game.dice.roll(game.rng.as_mut());
        let (faces, double, sum) = (game.dice.faces, game.dice.double, game.dice.sum);
        tracing::debug!(player = id, ?faces, "rolled");
        let ev = game.event(id, EventKind::Rolled { dice: faces, double });
        events.push(ev);

        if game.dice.third_double() {
            game.players[idx].go_to_jail();
            let ev = game.event(id, EventKind::ThirdDouble);
            events.push(ev);
            let ev = game.event(id, EventKind::SentToJail);
            events.push(ev);
            break;
        }

        let mut released = false;
        if game.players[idx].in_jail() {
            match game.players[idx].choose_jail_strategy(double, &mut game.bank) {
                JailDecision::Stay { turns_left } => {
                    let ev = game.event(id, EventKind::StayedInJail { turns_left });
                    events.push(ev);
                    break;
                }
                JailDecision::Leave(how) => {
                    let ev = game.event(id, EventKind::LeftJail { how });
                    events.push(ev);
                    released = true;
                }
            }
        }

        let from = game.players[idx].position;
        let passed_go = game.players[idx].move_by(sum as usize);
        let to = game.players[idx].position;
        let ev = game.event(id, EventKind::Moved { from, to, passed_go });
        events.push(ev);

        resolve_space(game, idx, &mut events);

        let player = &mut game.players[idx];
        if player.owns_monopoly && !player.bankrupt {
            if let Some(built) = player.buy_building(&mut game.board, &mut game.bank, game.rng.as_mut()) {
                let ev = game.event(id, EventKind::Built(built));
                events.push(ev);
            }
        }

        let again = game.config.reroll_on_double && double && !released && !game.players[idx].bankrupt;
        if !again {
            break;
        }
    }

    game.update();
    events
}

/// Starts the next round and gives every player a turn, stopping early once
/// a single player is left. Does nothing once the game is over or the round
/// cap has been played.
pub fn play_round(game: &mut Game) -> Vec<Event> {
    if game.is_over() || game.round >= game.config.max_rounds {
        return vec![];
    }
    game.update_round();
    let mut events = vec![];
    for idx in 0..game.players.len() {
        if game.players_remaining <= 1 {
            break;
        }
        events.extend(play_turn(game, idx));
    }
    events
}

/// Plays rounds until one player is left or the round cap is hit.
pub fn run_game(game: &mut Game) -> GameOutcome {
    if let Phase::GameOver(outcome) = &game.phase {
        return outcome.clone();
    }

    while game.players_remaining > 1 && game.round < game.config.max_rounds {
        play_round(game);
    }

    let outcome = match game.solvent_players().as_slice() {
        [winner] => {
            info!(winner = *winner, round = game.round, "game over");
            GameOutcome::Winner(*winner)
        }
        remaining => {
            warn!(round = game.round, players = remaining.len(), "round cap reached, stalemate");
            GameOutcome::Stalemate { round: game.round, remaining: remaining.to_vec() }
        }
    };
    game.phase = Phase::GameOver(outcome.clone());
    outcome
}
