use super::card::{Card, Rank};
use enum_map::EnumMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of cards in a poker hand
pub const HAND_SIZE: usize = 5;

/// The wheel (A2345) plays as a five high straight, so the ace sorts last.
const WHEEL_TIEBREAK: [Rank; HAND_SIZE] = [Rank::Five, Rank::Four, Rank::Three, Rank::Two, Rank::Ace];

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum HandError {
    #[display(fmt = "A hand needs exactly 5 cards (or at least 5 to choose from), got {}", _0)]
    InvalidHandSize(usize),
}

impl std::error::Error for HandError {}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl HandCategory {
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HighCard => write!(f, "High Card"),
            Self::Pair => write!(f, "Pair"),
            Self::TwoPair => write!(f, "Two Pair"),
            Self::ThreeOfAKind => write!(f, "Three of a Kind"),
            Self::Straight => write!(f, "Straight"),
            Self::Flush => write!(f, "Flush"),
            Self::FullHouse => write!(f, "Full House"),
            Self::FourOfAKind => write!(f, "Four of a Kind"),
            Self::StraightFlush => write!(f, "Straight Flush"),
            Self::RoyalFlush => write!(f, "Royal Flush"),
        }
    }
}

/// Comparison key for a five card hand.
///
/// Ordering is by category first and then lexicographically by the tie-break ranks, which is
/// exactly the derived ordering given the field order. The tie-break is all five ranks sorted by
/// descending strength, so 2-2-2-A-A outranks 3-3-3-K-K. A wheel is listed five high.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandRank {
    category: HandCategory,
    tiebreak: [Rank; HAND_SIZE],
}

impl HandRank {
    pub const fn category(&self) -> HandCategory {
        self.category
    }

    pub const fn tiebreak(&self) -> [Rank; HAND_SIZE] {
        self.tiebreak
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.category, self.tiebreak.iter().join(" "))
    }
}

/// Straight test over exactly five ranks. Duplicated ranks are never a straight, the ace
/// counts high and also low for the wheel.
pub fn is_straight(ranks: &[Rank]) -> bool {
    if ranks.len() != HAND_SIZE || ranks.iter().unique().count() != HAND_SIZE {
        return false;
    }
    if is_wheel(ranks) {
        return true;
    }
    match ranks.iter().map(|r| r.index()).minmax().into_option() {
        Some((min, max)) => max - min == 4,
        None => false,
    }
}

fn is_wheel(ranks: &[Rank]) -> bool {
    ranks.len() == HAND_SIZE
        && ranks.iter().copied().sorted_unstable().eq([
            Rank::Two,
            Rank::Three,
            Rank::Four,
            Rank::Five,
            Rank::Ace,
        ])
}

fn descending(ranks: &[Rank]) -> [Rank; HAND_SIZE] {
    let mut t = [Rank::Two; HAND_SIZE];
    for (slot, r) in t.iter_mut().zip(ranks.iter().copied().sorted_unstable().rev()) {
        *slot = r;
    }
    t
}

/// Classify exactly five cards.
///
/// Categories are tested strongest first and the first match wins, which matters because a
/// straight flush also satisfies the flush and straight tests, a full house the trips test,
/// and so on.
pub fn evaluate(cards: &[Card]) -> Result<HandRank, HandError> {
    if cards.len() != HAND_SIZE {
        return Err(HandError::InvalidHandSize(cards.len()));
    }
    let mut counts: EnumMap<Rank, u8> = EnumMap::default();
    for c in cards {
        counts[c.rank()] += 1;
    }
    let ranks: Vec<Rank> = cards.iter().map(|c| c.rank()).collect();
    let is_flush = cards.iter().map(|c| c.suit()).all_equal();
    let is_straight = is_straight(&ranks);
    let tiebreak = if is_straight && is_wheel(&ranks) {
        WHEEL_TIEBREAK
    } else {
        descending(&ranks)
    };
    let has = |n: u8| counts.values().any(|&c| c == n);
    let pairs = counts.values().filter(|&&c| c == 2).count();

    use HandCategory::*;
    let category = if is_flush && is_straight && tiebreak[0] == Rank::Ace {
        RoyalFlush
    } else if is_flush && is_straight {
        StraightFlush
    } else if has(4) {
        FourOfAKind
    } else if has(3) && has(2) {
        FullHouse
    } else if is_flush {
        Flush
    } else if is_straight {
        Straight
    } else if has(3) {
        ThreeOfAKind
    } else if pairs == 2 {
        TwoPair
    } else if has(2) {
        Pair
    } else {
        HighCard
    };
    Ok(HandRank { category, tiebreak })
}

/// Best five card hand out of `cards` along with the five cards that make it. Every
/// combination is evaluated, 21 of them for seven cards and just the one for five.
/// When several combinations share the best rank the first one found is returned.
pub fn best_cards(cards: &[Card]) -> Result<(HandRank, [Card; HAND_SIZE]), HandError> {
    if cards.len() < HAND_SIZE {
        return Err(HandError::InvalidHandSize(cards.len()));
    }
    let mut best: Option<(HandRank, [Card; HAND_SIZE])> = None;
    for combo in cards.iter().copied().combinations(HAND_SIZE) {
        let rank = evaluate(&combo)?;
        if best.map_or(true, |(b, _)| rank > b) {
            let hand: [Card; HAND_SIZE] = combo
                .try_into()
                .map_err(|v: Vec<Card>| HandError::InvalidHandSize(v.len()))?;
            best = Some((rank, hand));
        }
    }
    best.ok_or(HandError::InvalidHandSize(cards.len()))
}

/// Best rank among all five card combinations of `cards`
pub fn best_of(cards: &[Card]) -> Result<HandRank, HandError> {
    best_cards(cards).map(|(rank, _)| rank)
}

/// Best rank a player can make from their pocket and the community cards dealt so far
pub fn best_hand(private: &[Card], community: &[Card]) -> Result<HandRank, HandError> {
    let cards: Vec<Card> = private.iter().chain(community).copied().collect();
    best_of(&cards)
}

/// Group hands into tiers of equal rank, strongest tier first. The first tier holds whoever
/// wins the showdown. Inside a tier entries keep their input order.
pub fn rank_hands<K: Clone>(hands: &[(K, HandRank)]) -> Vec<Vec<(K, HandRank)>> {
    let mut sorted = hands.to_vec();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    let mut tiers: Vec<Vec<(K, HandRank)>> = vec![];
    for entry in sorted {
        match tiers.last_mut() {
            Some(tier) if tier[0].1 == entry.1 => tier.push(entry),
            _ => tiers.push(vec![entry]),
        }
    }
    tiers
}
