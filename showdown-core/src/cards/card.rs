use enum_map::Enum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SPADE: char = 's';
pub const HEART: char = 'h';
pub const DIAMOND: char = 'd';
pub const CLUB: char = 'c';
const SPADE_SYMBOL: char = '♠';
const HEART_SYMBOL: char = '♥';
const DIAMOND_SYMBOL: char = '♦';
const CLUB_SYMBOL: char = '♣';

pub const ALL_SUITS: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];
pub const ALL_RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum CardParseError {
    #[display(fmt = "'{}' is not a card rank", _0)]
    BadRank(char),
    #[display(fmt = "'{}' is not a card suit", _0)]
    BadSuit(char),
    #[display(fmt = "a card is 2 or 3 characters, got {}", _0)]
    WrongLength(usize),
    #[display(fmt = "card rank without a suit")]
    MissingSuit,
}

impl std::error::Error for CardParseError {}

/// Strength of a card. The discriminant is the strength index, 2 is 0 and A is 12.
#[derive(
    Hash, Enum, Clone, Copy, Debug, PartialEq, PartialOrd, Eq, Ord, Serialize, Deserialize,
)]
pub enum Rank {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

impl Rank {
    /// Strength index, 0 for a two through 12 for an ace.
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Two => write!(f, "2"),
            Self::Three => write!(f, "3"),
            Self::Four => write!(f, "4"),
            Self::Five => write!(f, "5"),
            Self::Six => write!(f, "6"),
            Self::Seven => write!(f, "7"),
            Self::Eight => write!(f, "8"),
            Self::Nine => write!(f, "9"),
            Self::Ten => write!(f, "T"),
            Self::Jack => write!(f, "J"),
            Self::Queen => write!(f, "Q"),
            Self::King => write!(f, "K"),
            Self::Ace => write!(f, "A"),
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = CardParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Ok(match c.to_ascii_uppercase() {
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => return Err(CardParseError::BadRank(c)),
        })
    }
}

/// Suits carry no strength, the ordering only exists so cards can be sorted.
#[derive(
    Hash, Enum, Clone, Copy, Debug, PartialEq, PartialOrd, Eq, Ord, Serialize, Deserialize,
)]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
}

impl Suit {
    pub const fn symbol(self) -> char {
        match self {
            Self::Club => CLUB_SYMBOL,
            Self::Diamond => DIAMOND_SYMBOL,
            Self::Heart => HEART_SYMBOL,
            Self::Spade => SPADE_SYMBOL,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Club => write!(f, "{}", CLUB),
            Self::Diamond => write!(f, "{}", DIAMOND),
            Self::Heart => write!(f, "{}", HEART),
            Self::Spade => write!(f, "{}", SPADE),
        }
    }
}

impl TryFrom<char> for Suit {
    type Error = CardParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            CLUB | CLUB_SYMBOL => Ok(Self::Club),
            DIAMOND | DIAMOND_SYMBOL => Ok(Self::Diamond),
            HEART | HEART_SYMBOL => Ok(Self::Heart),
            SPADE | SPADE_SYMBOL => Ok(Self::Spade),
            _ => Err(CardParseError::BadSuit(c)),
        }
    }
}

#[derive(Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

/// `{}` prints `Ah`, `{:#}` prints `A♥`.
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{}{}", self.rank, self.suit.symbol())
        } else {
            write!(f, "{}{}", self.rank, self.suit)
        }
    }
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn suit(self) -> Suit {
        self.suit
    }

    pub const fn rank(self) -> Rank {
        self.rank
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.trim().chars().collect();
        match chars[..] {
            ['1', '0', s] => Ok(Card::new(Rank::Ten, s.try_into()?)),
            [r, s] => Ok(Card::new(r.try_into()?, s.try_into()?)),
            _ => Err(CardParseError::WrongLength(chars.len())),
        }
    }
}

/// Parse a run of cards such as `"AhKhQhJhTh"`. Whitespace and commas between cards are
/// ignored and `10` may stand in for `T`.
pub fn cards_from_str(s: &str) -> Result<Vec<Card>, CardParseError> {
    let mut v = vec![];
    let mut chars = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .peekable();
    while let Some(r) = chars.next() {
        let rank = if r == '1' {
            match chars.next() {
                Some('0') => Rank::Ten,
                _ => return Err(CardParseError::BadRank(r)),
            }
        } else {
            r.try_into()?
        };
        let suit = chars.next().ok_or(CardParseError::MissingSuit)?;
        v.push(Card::new(rank, suit.try_into()?));
    }
    Ok(v)
}

/// Returns an UNSHUFFLED array of cards, ordered by rank and then suit
pub fn all_cards() -> [Card; 52] {
    use itertools::Itertools;
    let mut cards: [Card; 52] = [Card::new(Rank::Two, Suit::Club); 52];
    let c_iter = ALL_RANKS
        .iter()
        .cartesian_product(ALL_SUITS.iter())
        .map(|(r, s)| Card::new(*r, *s));
    for (i, c) in c_iter.enumerate() {
        cards[i] = c;
    }
    cards
}
