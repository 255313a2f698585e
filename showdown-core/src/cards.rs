pub mod card;
pub mod deck;
pub mod hand;

pub use card::{cards_from_str, Card, Rank, Suit};
pub use deck::{Deck, DeckError, DeckSeed};
pub use hand::{best_cards, best_hand, best_of, evaluate, HandCategory, HandError, HandRank};
