pub mod bot;
pub mod policy;

pub use bot::{
    StrategyKind, bid_incrementally, count_certain_tricks, make_strategy, random_cards,
    random_play,
};
pub use policy::{BobPolicy, DonaldPolicy, KennyPolicy, NihilistPolicy};
