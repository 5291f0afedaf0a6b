use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bot::PurchasePolicy;
use crate::rules::{BANK_RESERVE, STARTING_CASH};

pub type Cash = i64;
pub type PlayerId = u8;
/// Identifier shared by every property of a monopoly group ("Brown", "Railroad", ...).
pub type GroupId = String;

/// Anything that can receive money: a player or the bank.
pub trait Account {
    fn credit(&mut self, amount: Cash);
    fn label(&self) -> String;
    fn counterparty(&self) -> Counterparty;
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub cash: Cash,
    /// Board positions of owned properties.
    pub properties: Vec<usize>,
    pub position: usize,
    pub jail_cards: u8,
    pub jail_turns: u8,
    pub bankrupt: bool,
    pub owns_monopoly: bool,
    pub monopolies: BTreeSet<GroupId>,
    pub policy: PurchasePolicy,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            cash: STARTING_CASH,
            properties: vec![],
            position: 0,
            jail_cards: 0,
            jail_turns: 0,
            bankrupt: false,
            owns_monopoly: false,
            monopolies: BTreeSet::new(),
            policy: PurchasePolicy::default(),
        }
    }

    pub fn in_jail(&self) -> bool { self.jail_turns > 0 }
}

impl Account for Player {
    fn credit(&mut self, amount: Cash) { self.cash += amount; }
    fn label(&self) -> String { format!("player {}", self.id) }
    fn counterparty(&self) -> Counterparty { Counterparty::Player(self.id) }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bank {
    pub cash: Cash,
}

impl Bank {
    /// The reserve left after handing starting cash to `n_players`.
    pub fn for_players(n_players: usize) -> Self {
        Self { cash: BANK_RESERVE - n_players as Cash * STARTING_CASH }
    }
}

impl Account for Bank {
    fn credit(&mut self, amount: Cash) { self.cash += amount; }
    fn label(&self) -> String { "bank".to_string() }
    fn counterparty(&self) -> Counterparty { Counterparty::Bank }
}

/// Who is owed money in a transaction, for reporting.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Counterparty {
    Bank,
    Player(PlayerId),
}

impl fmt::Display for Counterparty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Counterparty::Bank => write!(f, "bank"),
            Counterparty::Player(id) => write!(f, "player {}", id),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    RoundActive,
    GameOver(GameOutcome),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(PlayerId),
    /// Round cap reached with several players still solvent.
    Stalemate { round: u32, remaining: Vec<PlayerId> },
}

/// Result of landing on a property.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum VisitOutcome {
    PaidRent { to: PlayerId, amount: Cash },
    Bought { price: Cash },
    Declined,
    CannotAfford { price: Cash },
    OwnProperty,
    Mortgaged,
    Bankrupt { creditor: Counterparty, owed: Cash },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildOutcome {
    pub position: usize,
    pub buildings: u8,
    pub cost: Cash,
    pub rent_now: Cash,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum EventKind {
    Rolled { dice: [u8; 2], double: bool },
    ThirdDouble,
    SentToJail,
    LeftJail { how: JailExit },
    StayedInJail { turns_left: u8 },
    Moved { from: usize, to: usize, passed_go: usize },
    PaidTax { amount: Cash },
    Visited { position: usize, outcome: VisitOutcome },
    Built(BuildOutcome),
    Bankrupt { creditor: Counterparty },
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum JailExit { Double, Card, Fee }

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    pub seq: u64,
    pub round: u32,
    pub player: PlayerId,
    pub kind: EventKind,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub cash: Cash,
    pub properties: usize,
    pub monopolies: usize,
    pub buildings: u32,
    pub bankrupt: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundSnapshot {
    pub round: u32,
    pub players: Vec<PlayerSnapshot>,
}

/// One row per round up to the round cap. Rows are allocated as rounds are
/// played, so any round not reached yet reads as unset.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SnapshotTable {
    #[serde(skip)]
    cap: u32,
    pub rows: Vec<Option<RoundSnapshot>>,
}

impl SnapshotTable {
    pub fn with_rounds(max_rounds: u32) -> Self {
        Self { cap: max_rounds, rows: vec![] }
    }

    pub fn get(&self, round: u32) -> Option<&RoundSnapshot> {
        let idx = (round as usize).checked_sub(1)?;
        self.rows.get(idx)?.as_ref()
    }

    /// Stores the row for `snapshot.round`. Rounds outside `1..=cap` are dropped.
    pub fn record(&mut self, snapshot: RoundSnapshot) {
        if snapshot.round == 0 || snapshot.round > self.cap {
            return;
        }
        let idx = snapshot.round as usize - 1;
        if idx >= self.rows.len() {
            self.rows.resize(idx + 1, None);
        }
        self.rows[idx] = Some(snapshot);
    }

    pub fn completed(&self) -> impl Iterator<Item = &RoundSnapshot> {
        self.rows.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(round: u32) -> RoundSnapshot {
        RoundSnapshot { round, players: vec![] }
    }

    #[test]
    fn snapshot_rows_grow_with_play_and_stop_at_the_cap() {
        let mut table = SnapshotTable::with_rounds(4_000_000_000);
        assert!(table.rows.is_empty());
        table.record(row(2));
        assert_eq!(table.rows.len(), 2);
        assert!(table.get(1).is_none());
        assert_eq!(table.get(2), Some(&row(2)));
        assert!(table.get(3).is_none());

        let mut table = SnapshotTable::with_rounds(3);
        table.record(row(0));
        table.record(row(3));
        table.record(row(4));
        assert_eq!(table.rows.len(), 3);
        assert!(table.get(4).is_none());
        assert_eq!(table.completed().count(), 1);
    }
}
