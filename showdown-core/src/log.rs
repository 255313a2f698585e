use crate::cards::hand::HandRank;
use crate::cards::Card;
use crate::player::POCKET_SIZE;
use crate::round::Action;
use crate::{Currency, SeatIdx, SeqNum};
use ::log::{debug, info, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogItem {
    NewRound(SeatIdx), // dealer seat
    BlindPosted(SeatIdx, Currency),
    PocketDealt(SeatIdx, [Card; POCKET_SIZE]),
    Flop(Card, Card, Card),
    Turn(Card),
    River(Card),
    Action(SeatIdx, Action),
    Rejected(SeatIdx, Action),
    ForcedFold(SeatIdx),
    Showdown(SeatIdx, HandRank),
    Payout(SeatIdx, Currency),
}

impl LogItem {
    fn emit(&self) {
        match self {
            LogItem::Showdown(..) | LogItem::Payout(..) | LogItem::NewRound(_) => info!("{self}"),
            LogItem::ForcedFold(_) => warn!("{self}"),
            _ => debug!("{self}"),
        }
    }
}

impl std::fmt::Display for LogItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogItem::NewRound(dealer) => write!(f, "New round, dealer is seat {dealer}"),
            LogItem::BlindPosted(seat, amount) => write!(f, "Seat {seat} posts a {amount} blind"),
            LogItem::PocketDealt(seat, p) => write!(f, "Seat {seat} dealt {}{}", p[0], p[1]),
            LogItem::Flop(c1, c2, c3) => write!(f, "Flop: {c1} {c2} {c3}"),
            LogItem::Turn(c) => write!(f, "Turn: {c}"),
            LogItem::River(c) => write!(f, "River: {c}"),
            LogItem::Action(seat, a) => write!(f, "Seat {seat} {a}"),
            LogItem::Rejected(seat, a) => write!(f, "Seat {seat} can't do that: {a}"),
            LogItem::ForcedFold(seat) => write!(f, "Seat {seat} folded after too many bad actions"),
            LogItem::Showdown(seat, rank) => write!(f, "Seat {seat} shows {rank}"),
            LogItem::Payout(seat, amount) => write!(f, "Seat {seat} wins {amount}"),
        }
    }
}

/// Sequence numbered record of everything that happened in a round. Every item pushed is also
/// sent to the `log` facade.
#[derive(Debug, PartialEq, Eq, Default, Clone, Serialize, Deserialize)]
pub struct Log {
    items: Vec<(SeqNum, LogItem)>,
    last_seq_num: SeqNum,
}

impl Log {
    pub(crate) fn push(&mut self, item: LogItem) {
        item.emit();
        let seq = self.last_seq_num + 1;
        self.items.push((seq, item));
        self.last_seq_num = seq;
    }

    pub(crate) fn extend<I: IntoIterator<Item = LogItem>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(SeqNum, LogItem)> {
        self.items.iter()
    }

    pub fn last_seq_num(&self) -> SeqNum {
        self.last_seq_num
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl std::fmt::Display for Log {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (seq, item) in &self.items {
            writeln!(f, "{seq:>3} {item}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::cards_from_str;

    #[test]
    fn seq_nums() {
        let mut log = Log::default();
        assert!(log.is_empty());
        log.push(LogItem::NewRound(0));
        log.extend([LogItem::BlindPosted(1, 10), LogItem::BlindPosted(2, 20)]);
        assert_eq!(log.len(), 3);
        assert_eq!(log.last_seq_num(), 3);
        let seqs: Vec<SeqNum> = log.iter().map(|(seq, _)| *seq).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
        let items: Vec<&LogItem> = log.iter().skip(1).map(|(_, item)| item).collect();
        assert_eq!(
            items,
            vec![&LogItem::BlindPosted(1, 10), &LogItem::BlindPosted(2, 20)]
        );
    }

    #[test]
    fn display() {
        let c = cards_from_str("AhKd7c").unwrap();
        assert_eq!(LogItem::Flop(c[0], c[1], c[2]).to_string(), "Flop: Ah Kd 7c");
        assert_eq!(
            LogItem::PocketDealt(3, [c[0], c[1]]).to_string(),
            "Seat 3 dealt AhKd"
        );
        assert_eq!(
            LogItem::Action(1, Action::Raise(40)).to_string(),
            "Seat 1 raises to 40"
        );
        let mut log = Log::default();
        log.push(LogItem::Payout(2, 60));
        assert_eq!(log.to_string(), "  1 Seat 2 wins 60\n");
    }
}
