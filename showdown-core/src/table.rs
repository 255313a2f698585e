use crate::cards::{Deck, DeckSeed};
use crate::log::Log;
use crate::player::{Player, PlayerFilter};
use crate::round::{self, Decider, Payout, RoundState};
use crate::{Currency, GameError, SeatIdx};
use ::log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub starting_balance: Currency,
    pub small_blind: Currency,
    pub big_blind: Currency,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_balance: 1000,
            small_blind: 10,
            big_blind: 20,
        }
    }
}

/// What happened in one round
#[derive(Debug, Clone)]
pub struct RoundSummary {
    /// Replaying a round with this seed and the same decisions gives the same result
    pub seed: DeckSeed,
    pub payouts: Vec<Payout>,
    pub log: Log,
}

/// Players sitting down for a series of rounds. The dealer button moves one seat to the left
/// after every round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    players: Vec<Player>,
    config: TableConfig,
    dealer: SeatIdx,
    rounds_played: usize,
}

impl Table {
    pub fn new<I, S>(names: I, config: TableConfig) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let players: Vec<Player> = names
            .into_iter()
            .map(|name| Player::new(name, config.starting_balance))
            .collect();
        if players.len() < 2 {
            return Err(GameError::NotEnoughPlayers);
        }
        Ok(Self {
            players,
            config,
            dealer: 0,
            rounds_played: 0,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn dealer(&self) -> SeatIdx {
        self.dealer
    }

    pub fn rounds_played(&self) -> usize {
        self.rounds_played
    }

    pub fn players_with_chips(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.has_chips())
    }

    /// True once fewer than two players have chips left
    pub fn is_over(&self) -> bool {
        self.players_with_chips().count() < 2
    }

    pub fn play_round<D: Decider + ?Sized>(
        &mut self,
        decider: &mut D,
    ) -> Result<RoundSummary, GameError> {
        self.play_round_with_seed(&DeckSeed::default(), decider)
    }

    /// Play one round with a deck shuffled by `seed`. If the round fails part way the
    /// balances are left as they were before it started.
    pub fn play_round_with_seed<D: Decider + ?Sized>(
        &mut self,
        seed: &DeckSeed,
        decider: &mut D,
    ) -> Result<RoundSummary, GameError> {
        if self.is_over() {
            return Err(GameError::NotEnoughPlayers);
        }
        info!(
            "Round {} with deck seed {seed}",
            self.rounds_played + 1
        );
        let mut deck = Deck::with_seed(seed);
        let mut state = RoundState::new(
            self.players.clone(),
            self.dealer,
            self.config.small_blind,
            self.config.big_blind,
        )?;
        let payouts = round::play_round(&mut state, &mut deck, decider)?;
        let (players, log) = state.into_parts();
        self.players = players;
        self.rounds_played += 1;
        self.rotate_dealer();
        Ok(RoundSummary {
            seed: *seed,
            payouts,
            log,
        })
    }

    /// Move the button to the next player on the left who still has chips
    fn rotate_dealer(&mut self) {
        let n = self.players.len();
        if let Some(next) = (1..=n)
            .map(|i| (self.dealer + i) % n)
            .find(|&s| self.players[s].matches(PlayerFilter::HAS_CHIPS))
        {
            self.dealer = next;
        }
    }
}
