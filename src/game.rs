use tracing::info;

use crate::board::Board;
use crate::bot::PurchasePolicy;
use crate::dice::Dice;
use crate::error::ConfigError;
use crate::model::{Bank, Event, EventKind, Phase, Player, PlayerId, PlayerSnapshot, RoundSnapshot, SnapshotTable};
use crate::rng::{GameRng, RandomSource};
use crate::rules::{MAX_PLAYERS, MIN_PLAYERS};

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub n_players: usize,
    /// Rounds played before the game is called a stalemate.
    pub max_rounds: u32,
    pub seed: u64,
    /// Roll again after a double, making three doubles in a turn possible.
    pub reroll_on_double: bool,
    pub purchase_policy: PurchasePolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            n_players: 2,
            max_rounds: 10,
            seed: 42,
            reroll_on_double: false,
            purchase_policy: PurchasePolicy::CoinFlip,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.n_players) {
            return Err(ConfigError::PlayerCount { got: self.n_players, min: MIN_PLAYERS, max: MAX_PLAYERS });
        }
        if self.max_rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        Ok(())
    }
}

/// Every piece on the table plus the per-round history.
pub struct Game {
    pub config: GameConfig,
    pub round: u32,
    pub players: Vec<Player>,
    pub bank: Bank,
    pub board: Board,
    pub phase: Phase,
    pub players_remaining: usize,
    pub snapshots: SnapshotTable,
    pub(crate) dice: Dice,
    pub(crate) rng: Box<dyn RandomSource>,
    events_seq: u64,
}

impl Game {
    pub fn new(config: GameConfig, board: Board) -> Result<Self, ConfigError> {
        let rng = Box::new(GameRng::seed_from_u64(config.seed));
        Self::with_rng(config, board, rng)
    }

    pub fn with_rng(config: GameConfig, board: Board, rng: Box<dyn RandomSource>) -> Result<Self, ConfigError> {
        config.validate()?;
        let players: Vec<Player> = (1..=config.n_players as PlayerId)
            .map(|id| Player { policy: config.purchase_policy, ..Player::new(id) })
            .collect();
        Ok(Self {
            round: 0,
            bank: Bank::for_players(players.len()),
            players_remaining: players.len(),
            snapshots: SnapshotTable::with_rounds(config.max_rounds),
            players,
            board,
            phase: Phase::NotStarted,
            dice: Dice::new(),
            rng,
            events_seq: 0,
            config,
        })
    }

    /// Hands a fresh pair of dice to the next player.
    pub fn pass_dice(&mut self) {
        self.dice = Dice::new();
    }

    pub fn dice(&self) -> &Dice { &self.dice }

    /// Opens the next round. A finished game stays finished.
    pub fn update_round(&mut self) {
        if self.is_over() {
            return;
        }
        self.round += 1;
        self.phase = Phase::RoundActive;
        info!(round = self.round, "starting round");
    }

    /// Recounts solvent players and records the current round's row.
    pub fn update(&mut self) {
        self.players_remaining = self.players.iter().filter(|p| !p.bankrupt).count();
        let players = self
            .players
            .iter()
            .map(|p| PlayerSnapshot {
                id: p.id,
                cash: p.cash,
                properties: p.properties.len(),
                monopolies: p.monopolies.len(),
                buildings: p.building_count(&self.board),
                bankrupt: p.bankrupt,
            })
            .collect();
        self.snapshots.record(RoundSnapshot { round: self.round, players });
    }

    pub fn is_over(&self) -> bool { matches!(self.phase, Phase::GameOver(_)) }

    pub fn player(&self, id: PlayerId) -> Option<&Player> { self.players.iter().find(|p| p.id == id) }

    pub fn solvent_players(&self) -> Vec<PlayerId> {
        self.players.iter().filter(|p| !p.bankrupt).map(|p| p.id).collect()
    }

    /// Total money in play: every player plus the bank.
    pub fn money_supply(&self) -> i64 {
        self.players.iter().map(|p| p.cash).sum::<i64>() + self.bank.cash
    }

    pub(crate) fn event(&mut self, player: PlayerId, kind: EventKind) -> Event {
        self.events_seq += 1;
        Event { seq: self.events_seq, round: self.round, player, kind }
    }
}
