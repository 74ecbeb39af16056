use crate::bot::{
    bid_incrementally, count_certain_tricks, log_bid, log_declare, log_play, random_play,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use skat_core::game::strategy::{GameChoice, Strategy, StrategyContext};
use skat_core::model::bidding::Bid;
use skat_core::model::card::Card;
use skat_core::model::declaration::Modifier;
use skat_core::model::game_type::GameType;
use skat_core::model::hand::{Bucket, reorganize};
use skat_core::model::seat::Seat;
use skat_core::model::valuation::{
    NULL_NO_KITTY_REVEALS_VALUE, NULL_NO_KITTY_VALUE, NULL_VALUE, null_value,
};

/// Bids only for null, sized by how many tricks the hand is sure to lose.
#[derive(Debug)]
pub struct NihilistPolicy {
    seat: Seat,
    rng: StdRng,
}

impl NihilistPolicy {
    pub fn new(seat: Seat, seed: u64) -> Self {
        Self {
            seat,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    /// Highest bid a null game from `cards` can carry.
    pub fn max_bid(cards: &[Card]) -> u16 {
        match safe_tricks(cards) {
            10.. => NULL_NO_KITTY_REVEALS_VALUE,
            9 => NULL_NO_KITTY_VALUE,
            8 => NULL_VALUE,
            _ => 0,
        }
    }
}

fn safe_tricks(cards: &[Card]) -> usize {
    let buckets = reorganize(cards.iter().copied(), GameType::Null);
    Bucket::ALL
        .iter()
        .filter(|bucket| **bucket != Bucket::Trump)
        .map(|bucket| count_certain_tricks(&buckets[bucket.index()], true))
        .sum()
}

impl Strategy for NihilistPolicy {
    fn bid(&mut self, ctx: &StrategyContext) -> Bid {
        let max = Self::max_bid(&ctx.hand.cards());
        let bid = bid_incrementally(&ctx.round, max);
        log_bid(ctx, "nihilist", bid, max);
        bid
    }

    /// Picking up leaves only the plain null value.
    fn kitty(&mut self, ctx: &StrategyContext) -> bool {
        ctx.round.standing_bid() <= NULL_VALUE
    }

    /// Drop the two cards most likely to take a trick.
    fn discard(&mut self, ctx: &StrategyContext) -> [Card; 2] {
        let mut cards = ctx.hand.cards();
        cards.sort_by_key(|card| std::cmp::Reverse(card.rank.null_strength()));
        [cards[0], cards[1]]
    }

    fn declare(&mut self, ctx: &StrategyContext) -> GameChoice {
        let no_kitty = ctx.round.took_kitty() == Some(false);
        let reveals = ctx.round.standing_bid() > null_value(no_kitty, false);
        let choice = if reveals {
            GameChoice::with(GameType::Null, &[Modifier::Reveals])
        } else {
            GameChoice::plain(GameType::Null)
        };
        log_declare(ctx, "nihilist", &choice);
        choice
    }

    fn play(&mut self, ctx: &StrategyContext) -> Card {
        let legal = ctx.legal_plays();
        let card = random_play(&legal, &mut self.rng);
        log_play(ctx, "nihilist", &legal, card, "random");
        card
    }
}
