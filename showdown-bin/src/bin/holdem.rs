use std::error::Error;
use std::io::{stdin, stdout, BufRead, Write};

use itertools::Itertools;
use log::warn;
use showdown_core::{
    deck::DeckSeed,
    round::{Action, Decider, RoundState},
    table::{RoundSummary, Table, TableConfig},
    Currency, GameError, SeatIdx,
};
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(name = "holdem", about = "Texas Hold'em for everyone sitting at this keyboard")]
struct Opt {
    #[structopt(long, default_value = "1000")]
    starting_balance: Currency,
    #[structopt(long, default_value = "10")]
    small_blind: Currency,
    #[structopt(long, default_value = "20")]
    big_blind: Currency,
    #[structopt(long, help = "Deck seed (base64) for the first round")]
    seed: Option<DeckSeed>,
    #[structopt(
        long,
        use_delimiter = true,
        help = "Comma separated player names. Asked for if not given"
    )]
    players: Vec<String>,
    #[structopt(
        long,
        help = "Silence game prompts (useful for tests with set input)"
    )]
    no_prompts: bool,
}

fn print_help() {
    println!("Known commands are:");
    for (cmds, desc) in [
        ("(h)elp", "This output."),
        ("(f)old", "Give up on this hand."),
        ("(c)all", "Match the current bet."),
        ("chec(k)", "Pass when there is nothing to call."),
        ("(r)aise X", "Raise the current bet to X."),
    ] {
        println!("  {:9}: {}", cmds, desc);
    }
    println!("Raise amounts are your total bet for the current betting round.");
}

enum Command {
    Action(Action),
    Help,
}

fn try_parse_command(buf: &str) -> Result<Command, Box<dyn Error>> {
    let words: Vec<&str> = buf.split_whitespace().collect();
    if words.is_empty() {
        return Err("Empty input".into());
    } else if words.len() > 2 {
        return Err("Wrong number of words".into());
    }
    let a = match words[0].to_lowercase().as_str() {
        "help" | "h" => return Ok(Command::Help),
        "fold" | "f" => Action::Fold,
        "call" | "c" => Action::Call,
        "check" | "k" => Action::Check,
        "raise" | "r" => {
            let amount = words.get(1).ok_or("Raise to how much?")?;
            Action::Raise(amount.parse()?)
        }
        _ => return Err("Invalid action. Please choose 'f', 'c', 'k', or 'r X'".into()),
    };
    Ok(Command::Action(a))
}

/// Asks whoever's turn it is over stdin
struct Console<R: BufRead> {
    input: R,
    prompts: bool,
    /// Input ran out or failed. Everyone folds from here on.
    closed: bool,
}

impl<R: BufRead> Console<R> {
    /// Returns `None` at end of input
    fn read_line(&mut self, q: &str) -> Result<Option<String>, Box<dyn Error>> {
        if self.prompts {
            print!("{}", q);
            stdout().flush()?;
        }
        let mut s = String::new();
        if self.input.read_line(&mut s)? == 0 {
            self.closed = true;
            return Ok(None);
        }
        Ok(Some(s))
    }

    fn read_names(&mut self) -> Result<Vec<String>, Box<dyn Error>> {
        let line = self
            .read_line("Enter player names separated by commas: ")?
            .unwrap_or_default();
        Ok(line
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect())
    }

    fn play_again(&mut self) -> Result<bool, Box<dyn Error>> {
        let answer = self.read_line("Play another round? (y/n): ")?;
        Ok(matches!(answer, Some(a) if a.trim().eq_ignore_ascii_case("y")))
    }
}

impl<R: BufRead> Decider for Console<R> {
    fn decide(&mut self, state: &RoundState, seat: SeatIdx) -> Action {
        if self.closed {
            return Action::Fold;
        }
        let p = &state.players()[seat];
        if self.prompts {
            let pocket = p
                .pocket
                .map(|c| format!("{:#} {:#}", c[0], c[1]))
                .unwrap_or_default();
            let community = state.community().iter().map(|c| format!("{:#}", c)).join(" ");
            println!();
            println!("{}, your hand: {} | Community Cards: {}", p.name, pocket, community);
            println!(
                "Your balance: {} | Current bet: {} | To call: {} | Pot: {}",
                p.balance,
                state.current_bet(),
                p.to_call(state.current_bet()),
                state.pot()
            );
        }
        loop {
            let line = match self.read_line("Fold, call, check, or raise? (f/c/k/r X): ") {
                Ok(Some(line)) => line,
                Ok(None) => return Action::Fold,
                Err(e) => {
                    warn!("Can't read input, folding from here on: {}", e);
                    self.closed = true;
                    return Action::Fold;
                }
            };
            match try_parse_command(&line) {
                Ok(Command::Action(a)) => return a,
                Ok(Command::Help) => print_help(),
                Err(e) => println!("{}", e),
            }
        }
    }

    fn rejected(&mut self, _state: &RoundState, _seat: SeatIdx, _action: Action, err: &GameError) {
        println!("{}. Please try again.", err);
    }
}

fn print_results(table: &Table, summary: &RoundSummary) {
    for payout in &summary.payouts {
        let p = &table.players()[payout.seat];
        match payout.hand {
            None => println!("{} wins {} uncontested", p.name, payout.amount),
            Some(hand) => {
                let pocket = p
                    .pocket
                    .map(|c| format!("{:#} {:#}", c[0], c[1]))
                    .unwrap_or_default();
                let cards = payout
                    .cards
                    .map(|c| c.iter().map(|c| format!("{:#}", c)).join(" "))
                    .unwrap_or_default();
                println!(
                    "{} wins {} with {}: {} [pocket {}]",
                    p.name, payout.amount, hand, cards, pocket
                );
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_target(false)
        .format_timestamp_millis()
        .init();
    let opt = Opt::from_args();
    let config = TableConfig {
        starting_balance: opt.starting_balance,
        small_blind: opt.small_blind,
        big_blind: opt.big_blind,
    };
    let mut console = Console {
        input: stdin().lock(),
        prompts: !opt.no_prompts,
        closed: false,
    };
    let names = if opt.players.is_empty() {
        console.read_names()?
    } else {
        opt.players.clone()
    };
    let mut table = Table::new(names, config)?;
    let mut seed = opt.seed;
    while !table.is_over() {
        println!("\n--- New Round ---");
        let round_seed = seed.take().unwrap_or_default();
        if console.prompts {
            println!("DeckSeed: {}", round_seed);
        }
        let summary = table.play_round_with_seed(&round_seed, &mut console)?;
        print_results(&table, &summary);

        println!("\nCurrent standings:");
        for p in table.players() {
            println!("{}: ${}", p.name, p.balance);
        }
        if table.is_over() || console.closed || !console.play_again()? {
            break;
        }
    }

    println!("\nGame Over!");
    for p in table.players() {
        println!("{} finished with ${}", p.name, p.balance);
    }
    Ok(())
}
