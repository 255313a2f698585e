pub mod cards;
pub mod log;
pub mod player;
pub mod round;
pub mod table;

pub use cards::{card, deck, hand};

use cards::{DeckError, HandError};
use round::Street;

pub type Currency = i64;
pub type SeqNum = usize;
/// Index into a round's (or table's) player list
pub type SeatIdx = usize;

#[derive(Debug, PartialEq, derive_more::Display)]
pub enum GameError {
    #[display(fmt = "{}", _0)]
    Deck(DeckError),
    #[display(fmt = "{}", _0)]
    Hand(HandError),
    #[display(fmt = "Need at least two players with chips")]
    NotEnoughPlayers,
    #[display(fmt = "Not enough chips")]
    InsufficientBalance,
    #[display(fmt = "Invalid action: {}", _0)]
    InvalidAction(String),
    #[display(fmt = "Nobody is left in the hand")]
    NoActivePlayers,
    #[display(fmt = "Can't deal that during the {}", _0)]
    WrongStreet(Street),
}

impl std::error::Error for GameError {}

impl From<DeckError> for GameError {
    fn from(e: DeckError) -> Self {
        Self::Deck(e)
    }
}

impl From<HandError> for GameError {
    fn from(e: HandError) -> Self {
        Self::Hand(e)
    }
}
