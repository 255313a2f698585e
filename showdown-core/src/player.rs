use crate::cards::Card;
use crate::{Currency, GameError};
use serde::{Deserialize, Serialize};

pub const POCKET_SIZE: usize = 2;

bitflags::bitflags! {
    /// Which players an iterator over a round's players should yield
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PlayerFilter: u8 {
        const ALL = 0;
        /// Hasn't folded (or sat out) this round
        const POT_ELIGIBLE = 1 << 0;
        const HAS_CHIPS = 1 << 1;
        /// Still able to put chips in, i.e. not folded and not all in
        const MAY_BET = Self::POT_ELIGIBLE.bits() | Self::HAS_CHIPS.bits();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub balance: Currency,
    pub pocket: Option<[Card; POCKET_SIZE]>,
    /// Still contesting the pot this round
    pub active: bool,
    /// Chips put in on the current street
    pub committed: Currency,
}

impl Player {
    pub fn new<S: Into<String>>(name: S, balance: Currency) -> Self {
        Self {
            name: name.into(),
            balance,
            pocket: None,
            active: balance > 0,
            committed: 0,
        }
    }

    pub const fn has_chips(&self) -> bool {
        self.balance > 0
    }

    pub fn matches(&self, filter: PlayerFilter) -> bool {
        (!filter.contains(PlayerFilter::POT_ELIGIBLE) || self.active)
            && (!filter.contains(PlayerFilter::HAS_CHIPS) || self.has_chips())
    }

    /// What it costs this player to match `current_bet`
    pub fn to_call(&self, current_bet: Currency) -> Currency {
        (current_bet - self.committed).max(0)
    }

    /// Move `amount` from the balance into this street's commitment.
    pub(crate) fn commit(&mut self, amount: Currency) -> Result<(), GameError> {
        if amount < 0 {
            return Err(GameError::InvalidAction(format!(
                "can't put in a negative amount ({amount})"
            )));
        }
        if amount > self.balance {
            return Err(GameError::InsufficientBalance);
        }
        self.balance -= amount;
        self.committed += amount;
        Ok(())
    }

    pub(crate) fn fold(&mut self) {
        self.active = false;
    }

    /// Forget everything from the last round. Players without chips sit this one out.
    pub(crate) fn reset(&mut self) {
        self.pocket = None;
        self.committed = 0;
        self.active = self.has_chips();
    }
}
