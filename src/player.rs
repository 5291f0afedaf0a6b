//! Turn actions a player can take against the board and the bank.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::board::Board;
use crate::bot::{pick_building_site, wants_to_buy};
use crate::error::TurnError;
use crate::model::{Account, BuildOutcome, Cash, Counterparty, JailExit, Player, VisitOutcome};
use crate::rng::RandomSource;
use crate::rules::{advance, is_hotel, GO_BONUS, JAIL_FEE, JAIL_POSITION, JAIL_SENTENCE, MAX_BUILDINGS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JailDecision {
    Leave(JailExit),
    Stay { turns_left: u8 },
}

impl JailDecision {
    pub fn stays(&self) -> bool { matches!(self, JailDecision::Stay { .. }) }
}

impl Player {
    /// Moves forward by `roll`, collecting the Go bonus once per lap.
    /// Returns the number of times Go was passed.
    pub fn move_by(&mut self, roll: usize) -> usize {
        let old_position = self.position;
        let (position, laps) = advance(self.position, roll);
        self.position = position;
        debug!(player = self.id, from = old_position, to = position, "moved");

        if laps > 0 {
            let bonus = GO_BONUS * laps as Cash;
            self.cash += bonus;
            debug!(player = self.id, bonus, "passed Go");
        }
        laps
    }

    /// Transfers `amount` to `recipient`. Nothing moves when the player is short.
    pub fn pay(&mut self, amount: Cash, recipient: &mut dyn Account) -> Result<(), TurnError> {
        if self.cash < amount {
            return Err(TurnError::InsufficientFunds { player: self.id, needed: amount, available: self.cash });
        }
        self.cash -= amount;
        recipient.credit(amount);
        debug!(player = self.id, amount, to = %recipient.label(), "paid");
        Ok(())
    }

    /// Resolves landing on the property at `position`. `counterparty` must be
    /// the owner when another player holds the property and the bank when
    /// nobody does; any other account is rejected before money moves.
    pub fn visit_property(
        &mut self,
        position: usize,
        board: &mut Board,
        counterparty: &mut dyn Account,
        rng: &mut dyn RandomSource,
    ) -> Result<VisitOutcome, TurnError> {
        let property = board.property(position).ok_or(TurnError::NotAProperty(position))?;
        let (owner, mortgaged, rent, price) = (property.owner, property.mortgaged, property.rent_now, property.price);

        let expected = match owner {
            Some(id) if id != self.id => Some(Counterparty::Player(id)),
            Some(_) => None,
            None => Some(Counterparty::Bank),
        };
        if let Some(expected) = expected {
            let got = counterparty.counterparty();
            if got != expected {
                return Err(TurnError::WrongCounterparty { position, expected, got });
            }
        }

        match owner {
            Some(id) if id == self.id => Ok(VisitOutcome::OwnProperty),
            Some(_) if mortgaged => Ok(VisitOutcome::Mortgaged),
            Some(id) => {
                if self.cash >= rent {
                    self.pay(rent, counterparty)?;
                    Ok(VisitOutcome::PaidRent { to: id, amount: rent })
                } else {
                    let creditor = Counterparty::Player(id);
                    self.go_bankrupt(creditor);
                    Ok(VisitOutcome::Bankrupt { creditor, owed: rent })
                }
            }
            None if self.cash >= price => {
                if wants_to_buy(self.policy, rng) {
                    self.buy_property(position, board, counterparty)?;
                    Ok(VisitOutcome::Bought { price })
                } else {
                    info!(player = self.id, property = %board.space(position).name(), "declined to purchase");
                    Ok(VisitOutcome::Declined)
                }
            }
            None => Ok(VisitOutcome::CannotAfford { price }),
        }
    }

    /// Buys the unowned property at `position` from `seller`.
    pub fn buy_property(&mut self, position: usize, board: &mut Board, seller: &mut dyn Account) -> Result<(), TurnError> {
        let property = board.property_mut(position).ok_or(TurnError::NotAProperty(position))?;
        if let Some(owner) = property.owner {
            return Err(TurnError::AlreadyOwned { position, owner });
        }
        let price = property.price;
        self.pay(price, seller)?;
        property.owner = Some(self.id);
        self.properties.push(position);
        info!(player = self.id, price, property = %property.name, "bought property");

        self.count_monopolies(board);
        Ok(())
    }

    /// Credits every group whose members are now all held by this player.
    /// Groups already credited are skipped, so repeated calls change nothing.
    pub fn count_monopolies(&mut self, board: &Board) -> usize {
        let mut countdown: HashMap<&str, usize> = HashMap::new();
        for &position in &self.properties {
            let Some(property) = board.property(position) else { continue };
            if self.monopolies.contains(&property.group) {
                continue;
            }

            let left = countdown
                .entry(property.group.as_str())
                .and_modify(|n| *n = n.saturating_sub(1))
                .or_insert(property.group_size.saturating_sub(1));
            if *left == 0 {
                self.owns_monopoly = true;
                self.monopolies.insert(property.group.clone());
                info!(player = self.id, group = %property.group, "now holds a monopoly");
            }
        }
        self.monopolies.len()
    }

    /// Buys one house (or the hotel) on a random eligible street.
    pub fn buy_building(&mut self, board: &mut Board, bank: &mut dyn Account, rng: &mut dyn RandomSource) -> Option<BuildOutcome> {
        let eligible: Vec<usize> = self
            .properties
            .iter()
            .copied()
            .filter(|&position| {
                let space = board.space(position);
                space.is_street()
                    && space.property().is_some_and(|p| {
                        self.monopolies.contains(&p.group) && p.build_cost <= self.cash && p.buildings < MAX_BUILDINGS
                    })
            })
            .collect();

        let position = pick_building_site(&eligible, rng)?;
        let property = board.property_mut(position)?;
        let cost = property.build_cost;
        self.pay(cost, bank).ok()?;
        let buildings = property.add_building();

        let kind = if is_hotel(buildings) { "hotel" } else { "house" };
        info!(player = self.id, property = %property.name, kind, rent = property.rent_now, "bought building");
        Some(BuildOutcome { position, buildings, cost, rent_now: property.rent_now })
    }

    pub fn building_count(&self, board: &Board) -> u32 {
        self.properties
            .iter()
            .filter_map(|&position| board.property(position))
            .map(|p| p.buildings as u32)
            .sum()
    }

    pub fn go_to_jail(&mut self) {
        self.position = JAIL_POSITION;
        self.jail_turns = JAIL_SENTENCE;
        info!(player = self.id, "went to jail");
    }

    /// Tries, in order: the double just rolled, a card, the fee. Otherwise
    /// serves one more turn.
    pub fn choose_jail_strategy(&mut self, rolled_double: bool, bank: &mut dyn Account) -> JailDecision {
        if rolled_double {
            self.jail_turns = 0;
            info!(player = self.id, "rolled a double out of jail");
            return JailDecision::Leave(JailExit::Double);
        }

        if self.jail_cards > 0 {
            self.jail_turns = 0;
            self.jail_cards -= 1;
            info!(player = self.id, "used a get out of jail card");
            return JailDecision::Leave(JailExit::Card);
        }

        if self.pay(JAIL_FEE, bank).is_ok() {
            self.jail_turns = 0;
            info!(player = self.id, fee = JAIL_FEE, "paid to leave jail");
            return JailDecision::Leave(JailExit::Fee);
        }

        self.jail_turns = self.jail_turns.saturating_sub(1);
        JailDecision::Stay { turns_left: self.jail_turns }
    }

    /// Marks the player out of the game. Holdings stay where they are.
    pub fn go_bankrupt(&mut self, creditor: Counterparty) {
        self.bankrupt = true;
        info!(player = self.id, %creditor, cash = self.cash, "went bankrupt");
    }
}
