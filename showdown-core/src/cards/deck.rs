use super::card::{all_cards, Card};
use base64ct::{Base64, Encoding};
use rand::prelude::*;
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DECK_LEN: usize = 52;
const SEED_LEN: usize = 32;
const ENCODED_SEED_LEN: usize = 4 * ((SEED_LEN + 3 - 1) / 3); // 4 * ceil(SEED_LEN / 3)

#[derive(PartialEq, Debug, derive_more::Display)]
pub enum DeckError {
    #[display(fmt = "No more cards in deck")]
    DeckExhausted,
    #[display(fmt = "Bad deck seed: {}", _0)]
    SeedDecode(base64ct::Error),
}

impl std::error::Error for DeckError {}

impl From<base64ct::Error> for DeckError {
    fn from(e: base64ct::Error) -> Self {
        Self::SeedDecode(e)
    }
}

/// A single 52 card deck. Cards are drawn from the end of `cards` and never put back, so
/// `len() + drawn()` is always `DECK_LEN`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
    drawn: usize,
}

/// A freshly shuffled deck
impl Default for Deck {
    fn default() -> Self {
        Self::shuffled()
    }
}

impl Deck {
    /// All 52 cards, unshuffled, in construction order (2c 2d 2h 2s 3c ... As).
    pub fn new() -> Self {
        let cards = all_cards().to_vec();
        assert_eq!(cards.len(), DECK_LEN);
        Deck { cards, drawn: 0 }
    }

    /// Generate a new deck of cards, shuffled with a random seed
    pub fn shuffled() -> Self {
        let mut d = Self::new();
        d.shuffle();
        d
    }

    /// Generate a new deck of cards whose order is fully determined by `seed`
    pub fn with_seed(seed: &DeckSeed) -> Self {
        let mut d = Self::new();
        d.seeded_shuffle(seed);
        d
    }

    /// Shuffle the remaining cards in-place
    pub fn shuffle(&mut self) {
        self.seeded_shuffle(&DeckSeed::default());
    }

    pub fn seeded_shuffle(&mut self, seed: &DeckSeed) {
        let mut rng = ChaChaRng::from_seed(seed.0);
        // For determinism given the same seed, the cards need to be in a known order before shuffling.
        self.cards.sort_unstable();
        self.cards.shuffle(&mut rng);
    }

    /// Draw the topmost card and return it, or an error if there are no more cards.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        let c = self.cards.pop().ok_or(DeckError::DeckExhausted)?;
        self.drawn += 1;
        Ok(c)
    }

    /// Draw `n` cards. Nothing is drawn if fewer than `n` remain.
    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if n > self.cards.len() {
            return Err(DeckError::DeckExhausted);
        }
        (0..n).map(|_| self.draw()).collect()
    }

    /// Throw away the topmost card
    pub fn burn(&mut self) -> Result<(), DeckError> {
        self.draw().map(|_| ())
    }

    /// Cards left to draw
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards drawn (or burned) since this deck was built
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckSeed([u8; SEED_LEN]);

impl DeckSeed {
    pub fn new(b: [u8; SEED_LEN]) -> Self {
        Self(b)
    }
}

impl Default for DeckSeed {
    fn default() -> Self {
        let mut b = [0u8; SEED_LEN];
        thread_rng().fill_bytes(&mut b);
        Self(b)
    }
}

impl fmt::Display for DeckSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut b = [0u8; ENCODED_SEED_LEN];
        let s = Base64::encode(&self.0, &mut b).map_err(|_| fmt::Error)?;
        write!(f, "{}", s)
    }
}

impl FromStr for DeckSeed {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut b: [u8; SEED_LEN] = [0; SEED_LEN];
        let decoded = Base64::decode(s.trim(), &mut b)?;
        if decoded.len() != SEED_LEN {
            return Err(DeckError::SeedDecode(base64ct::Error::InvalidLength));
        }
        Ok(DeckSeed(b))
    }
}
