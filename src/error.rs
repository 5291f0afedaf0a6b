use thiserror::Error;

use crate::model::{Cash, Counterparty, PlayerId};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("a game must have between {min} and {max} players, got {got}")]
    PlayerCount { got: usize, min: usize, max: usize },
    #[error("round cap must be at least 1")]
    NoRounds,
    #[error("board error: {0}")]
    Board(#[from] BoardError),
}

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("board must have {expected} spaces, found {found}")]
    WrongSize { expected: usize, found: usize },
    #[error("group {group} declares {declared} members but the board has {found}")]
    GroupSize { group: String, declared: usize, found: usize },
    #[error("street {name} needs 5 building rent tiers, found {found}")]
    RentTiers { name: String, found: usize },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TurnError {
    #[error("player {player} needs {needed} but holds {available}")]
    InsufficientFunds { player: PlayerId, needed: Cash, available: Cash },
    #[error("space {0} is not a property")]
    NotAProperty(usize),
    #[error("space {position} already belongs to player {owner}")]
    AlreadyOwned { position: usize, owner: PlayerId },
    #[error("space {position} settles with {expected}, not {got}")]
    WrongCounterparty { position: usize, expected: Counterparty, got: Counterparty },
}
