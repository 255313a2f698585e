//! One hand of Hold'em from the deal to the payout.
//!
//! All state for the hand lives in a [`RoundState`] that each phase function takes by `&mut`.
//! [`play_round`] runs the phases in order, but they can also be driven one at a time.
use crate::cards::hand::{best_cards, rank_hands, HandRank, HAND_SIZE};
use crate::cards::{Card, Deck};
use crate::log::{Log, LogItem};
use crate::player::{Player, PlayerFilter, POCKET_SIZE};
use crate::{Currency, GameError, SeatIdx};
use ::log::warn;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

pub const COMMUNITY_SIZE: usize = 5;
/// A player whose actions keep getting rejected is folded after this many tries
pub const MAX_REJECTIONS: usize = 16;

#[derive(
    Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, derive_more::Display, Serialize, Deserialize,
)]
pub enum Street {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Fold,
    Check,
    /// Match the current bet, or go all in trying
    Call,
    /// Raise the street's bet to this total
    Raise(Currency),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => write!(f, "folds"),
            Action::Check => write!(f, "checks"),
            Action::Call => write!(f, "calls"),
            Action::Raise(x) => write!(f, "raises to {x}"),
        }
    }
}

/// Source of player decisions: a console prompt, a script, a bot.
pub trait Decider {
    /// Pick an action for the player in `seat`. It's their turn and they can still bet.
    fn decide(&mut self, state: &RoundState, seat: SeatIdx) -> Action;

    /// `action` from the last call to `decide` couldn't be taken. `decide` is asked again.
    fn rejected(&mut self, _state: &RoundState, _seat: SeatIdx, _action: Action, _err: &GameError) {
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowdownEntry {
    pub seat: SeatIdx,
    pub rank: HandRank,
    /// The five cards making `rank`
    pub cards: [Card; HAND_SIZE],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub seat: SeatIdx,
    pub amount: Currency,
    /// The winning hand, or `None` when everyone else folded
    pub hand: Option<HandRank>,
    pub cards: Option<[Card; HAND_SIZE]>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    players: Vec<Player>,
    community: Vec<Card>,
    pot: Currency,
    /// What every player must have committed this street to stay in
    current_bet: Currency,
    dealer: SeatIdx,
    big_blind_seat: Option<SeatIdx>,
    small_blind: Currency,
    big_blind: Currency,
    street: Street,
    log: Log,
}

impl RoundState {
    /// Start a round. Every player's pocket and commitment is cleared and players without chips
    /// sit out.
    pub fn new(
        mut players: Vec<Player>,
        dealer: SeatIdx,
        small_blind: Currency,
        big_blind: Currency,
    ) -> Result<Self, GameError> {
        for p in players.iter_mut() {
            p.reset();
        }
        if players.iter().filter(|p| p.has_chips()).count() < 2 {
            return Err(GameError::NotEnoughPlayers);
        }
        let dealer = dealer % players.len();
        let mut log = Log::default();
        log.push(LogItem::NewRound(dealer));
        Ok(Self {
            players,
            community: Vec::with_capacity(COMMUNITY_SIZE),
            pot: 0,
            current_bet: 0,
            dealer,
            big_blind_seat: None,
            small_blind,
            big_blind,
            street: Street::PreFlop,
            log,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: SeatIdx) -> Option<&Player> {
        self.players.get(seat)
    }

    pub fn players_iter(&self, filter: PlayerFilter) -> impl Iterator<Item = (SeatIdx, &Player)> {
        self.players
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.matches(filter))
    }

    pub fn community(&self) -> &[Card] {
        &self.community
    }

    pub fn pot(&self) -> Currency {
        self.pot
    }

    pub fn current_bet(&self) -> Currency {
        self.current_bet
    }

    pub fn dealer(&self) -> SeatIdx {
        self.dealer
    }

    pub fn small_blind(&self) -> Currency {
        self.small_blind
    }

    pub fn big_blind(&self) -> Currency {
        self.big_blind
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn log(&self) -> &Log {
        &self.log
    }

    /// Hand the players (with their new balances) and the round's log back
    pub fn into_parts(self) -> (Vec<Player>, Log) {
        (self.players, self.log)
    }

    /// Seats matching `filter` in clockwise order, starting with the one after `seat` and
    /// ending with `seat` itself if it matches.
    pub fn seats_after(&self, seat: SeatIdx, filter: PlayerFilter) -> Vec<SeatIdx> {
        let n = self.players.len();
        (1..=n)
            .map(|i| (seat + i) % n)
            .filter(|&s| self.players[s].matches(filter))
            .collect()
    }

    fn start_street(&mut self, street: Street) {
        for p in self.players.iter_mut() {
            p.committed = 0;
        }
        self.current_bet = 0;
        self.street = street;
    }

    /// Put up to `amount` in for `seat` whether they like it or not, returning what they
    /// actually put in.
    fn force_bet(&mut self, seat: SeatIdx, amount: Currency) -> Result<Currency, GameError> {
        let p = &mut self.players[seat];
        let amount = amount.min(p.balance);
        p.commit(amount)?;
        self.pot += amount;
        Ok(amount)
    }

    fn apply_action(&mut self, seat: SeatIdx, action: Action) -> Result<(), GameError> {
        let current_bet = self.current_bet;
        let p = &mut self.players[seat];
        let owes = p.to_call(current_bet);
        let put_in = match action {
            Action::Fold => {
                p.fold();
                0
            }
            Action::Check if owes > 0 => {
                return Err(GameError::InvalidAction(format!(
                    "can't check, {owes} to call"
                )));
            }
            Action::Check => 0,
            Action::Call => {
                let amount = owes.min(p.balance);
                p.commit(amount)?;
                amount
            }
            Action::Raise(to) => {
                if to <= current_bet {
                    return Err(GameError::InvalidAction(format!(
                        "raise to {to} is not above the current bet of {current_bet}"
                    )));
                }
                let amount = to - p.committed;
                p.commit(amount)?;
                self.current_bet = to;
                amount
            }
        };
        self.pot += put_in;
        self.log.push(LogItem::Action(seat, action));
        Ok(())
    }
}

/// Deal two cards to every player in the round, one at a time, starting left of the dealer.
pub fn deal_pockets(state: &mut RoundState, deck: &mut Deck) -> Result<(), GameError> {
    let seats = state.seats_after(state.dealer, PlayerFilter::POT_ELIGIBLE);
    let mut dealt: Vec<Vec<Card>> = vec![Vec::with_capacity(POCKET_SIZE); seats.len()];
    for _ in 0..POCKET_SIZE {
        for pocket in dealt.iter_mut() {
            pocket.push(deck.draw()?);
        }
    }
    for (seat, cards) in seats.into_iter().zip(dealt) {
        let pocket = [cards[0], cards[1]];
        state.players[seat].pocket = Some(pocket);
        state.log.push(LogItem::PocketDealt(seat, pocket));
    }
    Ok(())
}

/// Post the small blind from the first player with chips left of the dealer and the big blind
/// from the next. Heads up, the dealer posts the big blind. A player who can't cover their
/// blind is all in for what they have. Returns the small and big blind seats.
pub fn post_blinds(state: &mut RoundState) -> Result<(SeatIdx, SeatIdx), GameError> {
    let order = state.seats_after(state.dealer, PlayerFilter::MAY_BET);
    if order.len() < 2 {
        return Err(GameError::NotEnoughPlayers);
    }
    let (sb, bb) = (order[0], order[1]);
    let sb_amount = state.force_bet(sb, state.small_blind)?;
    state.log.push(LogItem::BlindPosted(sb, sb_amount));
    let bb_amount = state.force_bet(bb, state.big_blind)?;
    state.log.push(LogItem::BlindPosted(bb, bb_amount));
    state.current_bet = state.big_blind;
    state.big_blind_seat = Some(bb);
    Ok((sb, bb))
}

fn deal_street(
    state: &mut RoundState,
    deck: &mut Deck,
    street: Street,
    count: usize,
) -> Result<Vec<Card>, GameError> {
    let expected_len = match street {
        Street::Flop => 0,
        Street::Turn => 3,
        Street::River => 4,
        Street::PreFlop | Street::Showdown => return Err(GameError::WrongStreet(street)),
    };
    if state.community.len() != expected_len || state.street >= street {
        return Err(GameError::WrongStreet(state.street));
    }
    deck.burn()?;
    let cards = deck.draw_n(count)?;
    state.community.extend(&cards);
    state.start_street(street);
    Ok(cards)
}

/// Burn one, then deal three community cards.
pub fn deal_flop(state: &mut RoundState, deck: &mut Deck) -> Result<(), GameError> {
    let c = deal_street(state, deck, Street::Flop, 3)?;
    state.log.push(LogItem::Flop(c[0], c[1], c[2]));
    Ok(())
}

pub fn deal_turn(state: &mut RoundState, deck: &mut Deck) -> Result<(), GameError> {
    let c = deal_street(state, deck, Street::Turn, 1)?;
    state.log.push(LogItem::Turn(c[0]));
    Ok(())
}

pub fn deal_river(state: &mut RoundState, deck: &mut Deck) -> Result<(), GameError> {
    let c = deal_street(state, deck, Street::River, 1)?;
    state.log.push(LogItem::River(c[0]));
    Ok(())
}

/// Ask `decider` for the player's action until one is valid. After [`MAX_REJECTIONS`] bad
/// answers the player folds.
fn take_action<D: Decider + ?Sized>(
    state: &mut RoundState,
    decider: &mut D,
    seat: SeatIdx,
) -> Result<Action, GameError> {
    for _ in 0..MAX_REJECTIONS {
        let action = decider.decide(state, seat);
        match state.apply_action(seat, action) {
            Ok(()) => return Ok(action),
            Err(e) => {
                state.log.push(LogItem::Rejected(seat, action));
                decider.rejected(state, seat, action, &e);
            }
        }
    }
    warn!("Giving up on seat {seat} after {MAX_REJECTIONS} rejected actions");
    state.log.push(LogItem::ForcedFold(seat));
    state.apply_action(seat, Action::Fold)?;
    Ok(Action::Fold)
}

/// One street of betting.
///
/// Action starts left of the big blind pre-flop and left of the dealer afterward, and goes
/// around until everyone still able to bet has matched the current bet. A raise makes everyone
/// else act again. Players who are all in are skipped, and betting stops as soon as only one
/// player hasn't folded.
pub fn betting_round<D: Decider + ?Sized>(
    state: &mut RoundState,
    decider: &mut D,
) -> Result<(), GameError> {
    let start = match (state.street, state.big_blind_seat) {
        (Street::PreFlop, Some(bb)) => bb,
        _ => state.dealer,
    };
    let mut pending: VecDeque<SeatIdx> = state.seats_after(start, PlayerFilter::MAY_BET).into();
    while let Some(seat) = pending.pop_front() {
        if state.players_iter(PlayerFilter::POT_ELIGIBLE).count() < 2 {
            break;
        }
        let p = &state.players[seat];
        if !p.matches(PlayerFilter::MAY_BET) {
            continue;
        }
        // nobody left to bet against
        if p.to_call(state.current_bet) == 0
            && state.players_iter(PlayerFilter::MAY_BET).count() < 2
        {
            continue;
        }
        if let Action::Raise(_) = take_action(state, decider, seat)? {
            pending = state
                .seats_after(seat, PlayerFilter::MAY_BET)
                .into_iter()
                .filter(|&s| s != seat)
                .collect();
        }
    }
    Ok(())
}

/// Best hand for every player still in, in seat order starting left of the dealer.
pub fn showdown(state: &RoundState) -> Result<Vec<ShowdownEntry>, GameError> {
    let seats = state.seats_after(state.dealer, PlayerFilter::POT_ELIGIBLE);
    if seats.is_empty() {
        return Err(GameError::NoActivePlayers);
    }
    seats
        .into_iter()
        .map(|seat| {
            let pocket: &[Card] = state.players[seat]
                .pocket
                .as_ref()
                .map_or(&[][..], |p| &p[..]);
            let available: Vec<Card> = pocket.iter().chain(&state.community).copied().collect();
            let (rank, cards) = best_cards(&available)?;
            Ok(ShowdownEntry { seat, rank, cards })
        })
        .collect()
}

/// Split `pot` as evenly as possible. The first `pot % winners` shares get one extra chip.
pub fn split_pot(pot: Currency, winners: usize) -> Vec<Currency> {
    if winners == 0 {
        return vec![];
    }
    let n = winners as Currency;
    let (share, remainder) = (pot / n, pot % n);
    (0..n)
        .map(|i| if i < remainder { share + 1 } else { share })
        .collect()
}

/// Award the pot. A lone player left in takes it uncontested, otherwise the best hands at
/// showdown split it with odd chips going to the winners closest to the dealer's left.
pub fn settle(state: &mut RoundState) -> Result<Vec<Payout>, GameError> {
    let contenders = state.seats_after(state.dealer, PlayerFilter::POT_ELIGIBLE);
    let winners: Vec<(SeatIdx, Option<ShowdownEntry>)> = match contenders[..] {
        [] => return Err(GameError::NoActivePlayers),
        [only] => vec![(only, None)],
        _ => {
            let entries = showdown(state)?;
            state.log.extend(
                entries
                    .iter()
                    .map(|e| LogItem::Showdown(e.seat, e.rank)),
            );
            let hands: Vec<(ShowdownEntry, HandRank)> =
                entries.iter().map(|e| (*e, e.rank)).collect();
            rank_hands(&hands)
                .into_iter()
                .next()
                .unwrap_or_default()
                .into_iter()
                .map(|(e, _)| (e.seat, Some(e)))
                .collect()
        }
    };
    let shares = split_pot(state.pot, winners.len());
    let mut payouts = Vec::with_capacity(winners.len());
    for ((seat, shown), amount) in winners.into_iter().zip(shares) {
        state.players[seat].balance += amount;
        state.log.push(LogItem::Payout(seat, amount));
        payouts.push(Payout {
            seat,
            amount,
            hand: shown.map(|e| e.rank),
            cards: shown.map(|e| e.cards),
        });
    }
    state.pot = 0;
    state.street = Street::Showdown;
    Ok(payouts)
}

/// Play the whole round: pockets, blinds, then a betting round after the deal and after each
/// of the flop, turn, and river as long as two or more players are still in.
pub fn play_round<D: Decider + ?Sized>(
    state: &mut RoundState,
    deck: &mut Deck,
    decider: &mut D,
) -> Result<Vec<Payout>, GameError> {
    deal_pockets(state, deck)?;
    post_blinds(state)?;
    betting_round(state, decider)?;
    for deal in [deal_flop, deal_turn, deal_river] {
        if state.players_iter(PlayerFilter::POT_ELIGIBLE).count() < 2 {
            break;
        }
        deal(state, deck)?;
        betting_round(state, decider)?;
    }
    settle(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::hand::{evaluate, HandCategory};
    use crate::cards::{cards_from_str, DeckSeed};

    /// Plays back a fixed list of actions, then checks (or calls when checking isn't allowed).
    struct Script {
        actions: VecDeque<(SeatIdx, Action)>,
        rejections: usize,
    }

    impl Script {
        fn new(actions: &[(SeatIdx, Action)]) -> Self {
            Self {
                actions: actions.iter().copied().collect(),
                rejections: 0,
            }
        }
    }

    impl Decider for Script {
        fn decide(&mut self, state: &RoundState, seat: SeatIdx) -> Action {
            match self.actions.front() {
                Some((s, _)) if *s == seat => self.actions.pop_front().map(|(_, a)| a).unwrap(),
                _ => match state.player(seat).unwrap().to_call(state.current_bet()) {
                    0 => Action::Check,
                    _ => Action::Call,
                },
            }
        }

        fn rejected(&mut self, _: &RoundState, _: SeatIdx, _: Action, _: &GameError) {
            self.rejections += 1;
        }
    }

    struct Stubborn;

    impl Decider for Stubborn {
        fn decide(&mut self, _: &RoundState, _: SeatIdx) -> Action {
            Action::Raise(0)
        }
    }

    fn players(balances: &[Currency]) -> Vec<Player> {
        balances
            .iter()
            .enumerate()
            .map(|(i, b)| Player::new(format!("p{i}"), *b))
            .collect()
    }

    fn state(balances: &[Currency], dealer: SeatIdx) -> RoundState {
        RoundState::new(players(balances), dealer, 10, 20).unwrap()
    }

    fn total(state: &RoundState) -> Currency {
        state.players().iter().map(|p| p.balance).sum::<Currency>() + state.pot()
    }

    #[test]
    fn needs_two_players() {
        assert_eq!(
            RoundState::new(players(&[100]), 0, 10, 20),
            Err(GameError::NotEnoughPlayers)
        );
        assert_eq!(
            RoundState::new(players(&[100, 0, 0]), 0, 10, 20),
            Err(GameError::NotEnoughPlayers)
        );
    }

    #[test]
    fn pockets_dealt_left_of_dealer() {
        let mut s = state(&[100, 100, 0, 100], 0);
        let mut deck = Deck::new();
        deal_pockets(&mut s, &mut deck).unwrap();
        // unshuffled deck deals As Ah Ad Ac Ks Kh ...
        let c = cards_from_str("AsAhAdAcKsKh").unwrap();
        assert_eq!(s.players()[1].pocket, Some([c[0], c[3]]));
        assert_eq!(s.players()[3].pocket, Some([c[1], c[4]]));
        assert_eq!(s.players()[0].pocket, Some([c[2], c[5]]));
        assert_eq!(s.players()[2].pocket, None);
        assert_eq!(deck.drawn(), 6);
    }

    #[test]
    fn blinds() {
        let mut s = state(&[100, 100, 100], 0);
        assert_eq!(post_blinds(&mut s).unwrap(), (1, 2));
        assert_eq!(s.pot(), 30);
        assert_eq!(s.current_bet(), 20);
        assert_eq!(s.players()[1].balance, 90);
        assert_eq!(s.players()[2].balance, 80);

        let mut s = state(&[100, 100], 1);
        assert_eq!(post_blinds(&mut s).unwrap(), (0, 1));

        // short big blind goes all in
        let mut s = state(&[100, 100, 5], 0);
        post_blinds(&mut s).unwrap();
        assert_eq!(s.pot(), 15);
        assert_eq!(s.players()[2].balance, 0);
        assert_eq!(s.current_bet(), 20);
    }

    #[test]
    fn streets_in_order() {
        let mut s = state(&[100, 100], 0);
        let mut deck = Deck::new();
        assert_eq!(
            deal_turn(&mut s, &mut deck),
            Err(GameError::WrongStreet(Street::PreFlop))
        );
        deal_flop(&mut s, &mut deck).unwrap();
        assert_eq!(s.community().len(), 3);
        assert_eq!(deck.drawn(), 4);
        assert_eq!(
            deal_flop(&mut s, &mut deck),
            Err(GameError::WrongStreet(Street::Flop))
        );
        deal_turn(&mut s, &mut deck).unwrap();
        deal_river(&mut s, &mut deck).unwrap();
        assert_eq!(s.community().len(), COMMUNITY_SIZE);
        assert_eq!(deck.drawn(), 8);
        assert!(deal_river(&mut s, &mut deck).is_err());
        assert_eq!(s.street(), Street::River);
    }

    #[test]
    fn invalid_actions_are_rejected() {
        let mut s = state(&[100, 100, 100], 0);
        post_blinds(&mut s).unwrap();
        // seat 0 acts first: check facing a bet, raise not above the bet, raise too big
        let mut d = Script::new(&[
            (0, Action::Check),
            (0, Action::Raise(20)),
            (0, Action::Raise(101)),
            (0, Action::Fold),
        ]);
        betting_round(&mut s, &mut d).unwrap();
        assert_eq!(d.rejections, 3);
        assert!(!s.players()[0].active);
        assert_eq!(s.pot(), 40);
        let rejected = s
            .log()
            .iter()
            .filter(|(_, i)| matches!(i, LogItem::Rejected(0, _)))
            .count();
        assert_eq!(rejected, 3);
    }

    #[test]
    fn raise_reopens_action() {
        let mut s = state(&[100, 100, 100], 0);
        post_blinds(&mut s).unwrap();
        let mut d = Script::new(&[(0, Action::Call), (1, Action::Call), (2, Action::Raise(50))]);
        betting_round(&mut s, &mut d).unwrap();
        // 0 and 1 call the raise after 2 raises
        for p in s.players() {
            assert_eq!(p.committed, 50);
            assert_eq!(p.balance, 50);
        }
        assert_eq!(s.pot(), 150);
        let actions: Vec<SeatIdx> = s
            .log()
            .iter()
            .filter_map(|(_, i)| match i {
                LogItem::Action(seat, _) => Some(*seat),
                _ => None,
            })
            .collect();
        assert_eq!(actions, vec![0, 1, 2, 0, 1]);
    }

    #[test]
    fn big_blind_gets_option() {
        let mut s = state(&[100, 100, 100], 0);
        post_blinds(&mut s).unwrap();
        let mut d = Script::new(&[(2, Action::Raise(40))]);
        betting_round(&mut s, &mut d).unwrap();
        assert_eq!(s.current_bet(), 40);
        assert_eq!(s.pot(), 120);
    }

    #[test]
    fn everyone_folds_to_one() {
        let mut s = state(&[100, 100, 100], 0);
        let mut deck = Deck::with_seed(&DeckSeed::new([7; 32]));
        let mut d = Script::new(&[(0, Action::Fold), (1, Action::Fold)]);
        let before = total(&s);
        let payouts = play_round(&mut s, &mut deck, &mut d).unwrap();
        assert_eq!(
            payouts,
            vec![Payout {
                seat: 2,
                amount: 30,
                hand: None,
                cards: None,
            }]
        );
        assert!(s.community().is_empty());
        assert_eq!(s.players()[2].balance, 110);
        assert_eq!(s.players()[1].balance, 90);
        assert_eq!(total(&s), before);
        assert_eq!(s.street(), Street::Showdown);
    }

    #[test]
    fn stubborn_player_is_folded() {
        let mut s = state(&[100, 100], 0);
        post_blinds(&mut s).unwrap();
        betting_round(&mut s, &mut Stubborn).unwrap();
        // heads up the dealer (seat 0) is the big blind, so seat 1 acts first and gets folded
        assert!(!s.players()[1].active);
        assert!(s.players()[0].active);
        assert!(s
            .log()
            .iter()
            .any(|(_, i)| *i == LogItem::ForcedFold(1)));
    }

    #[test]
    fn split_pot_keeps_every_chip() {
        assert_eq!(split_pot(100, 1), vec![100]);
        assert_eq!(split_pot(100, 2), vec![50, 50]);
        assert_eq!(split_pot(100, 3), vec![34, 33, 33]);
        assert_eq!(split_pot(5, 4), vec![2, 1, 1, 1]);
        assert!(split_pot(100, 0).is_empty());
        for n in 1..=9 {
            assert_eq!(split_pot(1001, n).iter().sum::<Currency>(), 1001);
        }
    }

    /// Replace the dealt pockets and board with known cards
    fn rig(s: &mut RoundState, pockets: &[&'static str], board: &'static str) {
        for (p, cards) in s.players.iter_mut().zip(pockets) {
            let c = cards_from_str(cards).unwrap();
            p.pocket = Some([c[0], c[1]]);
        }
        s.community = cards_from_str(board).unwrap();
    }

    #[test]
    fn showdown_best_hand_wins() {
        let mut s = state(&[100, 100, 100], 0);
        post_blinds(&mut s).unwrap();
        s.apply_action(0, Action::Call).unwrap();
        s.apply_action(1, Action::Call).unwrap();
        rig(&mut s, &["AhAd", "KcKd", "2c3d"], "As7h8c9dKs");
        let entries = showdown(&s).unwrap();
        let seats: Vec<SeatIdx> = entries.iter().map(|e| e.seat).collect();
        assert_eq!(seats, vec![1, 2, 0]);
        assert_eq!(entries[2].rank.category(), HandCategory::ThreeOfAKind);
        for e in &entries {
            assert_eq!(evaluate(&e.cards).unwrap(), e.rank);
        }
        // pocket first, then the board in the order it was dealt
        assert_eq!(&entries[2].cards[..], &cards_from_str("AhAdAs9dKs").unwrap()[..]);
        let payouts = settle(&mut s).unwrap();
        assert_eq!(payouts.len(), 1);
        assert_eq!(payouts[0].seat, 0);
        assert_eq!(payouts[0].amount, 60);
        assert_eq!(payouts[0].cards, Some(entries[2].cards));
        assert_eq!(s.players()[0].balance, 140);
        assert_eq!(s.pot(), 0);
    }

    #[test]
    fn tie_splits_with_odd_chip_left_of_dealer() {
        let mut s = state(&[100, 100, 100], 1);
        post_blinds(&mut s).unwrap();
        // dealer 1, sb 2, bb 0. Seat 1 folds, leaving 30 + 1 odd chip for the test
        s.apply_action(1, Action::Fold).unwrap();
        s.pot += 1;
        rig(&mut s, &["2c3d", "4s5s", "2d3c"], "AhKhQhJh9c");
        let payouts = settle(&mut s).unwrap();
        let got: Vec<(SeatIdx, Currency)> = payouts.iter().map(|p| (p.seat, p.amount)).collect();
        assert_eq!(got, vec![(2, 16), (0, 15)]);
        assert_eq!(payouts[0].hand, payouts[1].hand);
    }

    #[test]
    fn showdown_needs_someone() {
        let mut s = state(&[100, 100], 0);
        s.players[0].fold();
        s.players[1].fold();
        assert_eq!(showdown(&s), Err(GameError::NoActivePlayers));
        assert_eq!(settle(&mut s), Err(GameError::NoActivePlayers));
    }

    #[test]
    fn full_round_keeps_chips() {
        let mut s = state(&[1000, 1000, 1000, 1000], 2);
        let mut deck = Deck::with_seed(&DeckSeed::new([3; 32]));
        let mut d = Script::new(&[(3, Action::Raise(60))]);
        let payouts = play_round(&mut s, &mut deck, &mut d).unwrap();
        assert_eq!(s.community().len(), COMMUNITY_SIZE);
        // 4 pockets, 3 burns, 5 community
        assert_eq!(deck.drawn(), 16);
        assert_eq!(payouts.iter().map(|p| p.amount).sum::<Currency>(), 240);
        assert_eq!(total(&s), 4000);
        assert!(payouts.iter().all(|p| p.hand.is_some()));
    }
}
