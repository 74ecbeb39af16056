mod util;

pub use util::{bid_incrementally, count_certain_tricks, random_cards, random_play};
pub(crate) use util::{log_bid, log_declare, log_play};

use crate::policy::{BobPolicy, DonaldPolicy, KennyPolicy, NihilistPolicy};
use skat_core::game::strategy::Strategy;
use skat_core::model::seat::Seat;
use std::fmt;
use std::str::FromStr;

/// The built-in strategies, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Random bids, games and plays.
    Kenny,
    /// Never bids, plays at random.
    Bob,
    /// Bids only on safe null hands.
    Nihilist,
    /// Bids trump games on jacks and aces.
    Donald,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Kenny,
        StrategyKind::Bob,
        StrategyKind::Nihilist,
        StrategyKind::Donald,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Kenny => "kenny",
            StrategyKind::Bob => "bob",
            StrategyKind::Nihilist => "nihilist",
            StrategyKind::Donald => "donald",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kenny" | "random" => Ok(StrategyKind::Kenny),
            "bob" | "silent_bob" | "pass" => Ok(StrategyKind::Bob),
            "nihilist" | "null" => Ok(StrategyKind::Nihilist),
            "donald" | "trump" => Ok(StrategyKind::Donald),
            other => Err(format!(
                "unknown strategy '{other}' (expected kenny, bob, nihilist or donald)"
            )),
        }
    }
}

/// Build a fresh strategy for `seat`. The same seed always yields the same
/// decisions.
pub fn make_strategy(kind: StrategyKind, seat: Seat, seed: u64) -> Box<dyn Strategy> {
    match kind {
        StrategyKind::Kenny => Box::new(KennyPolicy::new(seat, seed)),
        StrategyKind::Bob => Box::new(BobPolicy::new(seat, seed)),
        StrategyKind::Nihilist => Box::new(NihilistPolicy::new(seat, seed)),
        StrategyKind::Donald => Box::new(DonaldPolicy::new(seat, seed)),
    }
}
