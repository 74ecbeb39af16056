use crate::bot::{bid_incrementally, log_bid, log_declare, log_play, random_cards, random_play};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use skat_core::game::strategy::{GameChoice, Strategy, StrategyContext};
use skat_core::model::bidding::{Bid, LEGAL_BIDS};
use skat_core::model::card::Card;
use skat_core::model::game_type::GameType;
use skat_core::model::seat::Seat;
use skat_core::model::valuation::NULL_VALUE;

/// Plays at random. Its bidding limit comes from coin flips: each heads
/// climbs one step up the bid table.
#[derive(Debug)]
pub struct KennyPolicy {
    seat: Seat,
    max_bid: u16,
    rng: StdRng,
}

impl KennyPolicy {
    pub fn new(seat: Seat, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut heads = 0usize;
        while heads < LEGAL_BIDS.len() && rng.gen_bool(0.5) {
            heads += 1;
        }
        let max_bid = match heads {
            0 => 0,
            n => LEGAL_BIDS[n - 1],
        };
        Self { seat, max_bid, rng }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn max_bid(&self) -> u16 {
        self.max_bid
    }
}

impl Strategy for KennyPolicy {
    fn bid(&mut self, ctx: &StrategyContext) -> Bid {
        let bid = bid_incrementally(&ctx.round, self.max_bid);
        log_bid(ctx, "kenny", bid, self.max_bid);
        bid
    }

    fn kitty(&mut self, _ctx: &StrategyContext) -> bool {
        true
    }

    fn discard(&mut self, ctx: &StrategyContext) -> [Card; 2] {
        let picks = random_cards(ctx.hand, 2, &mut self.rng);
        [picks[0], picks[1]]
    }

    fn declare(&mut self, ctx: &StrategyContext) -> GameChoice {
        let null_allowed = ctx.round.standing_bid() <= NULL_VALUE;
        let games: Vec<GameType> = GameType::ALL
            .iter()
            .copied()
            .filter(|game| null_allowed || !game.is_null())
            .collect();
        let game = games.choose(&mut self.rng).copied().unwrap_or(GameType::Grand);
        let choice = GameChoice::plain(game);
        log_declare(ctx, "kenny", &choice);
        choice
    }

    fn play(&mut self, ctx: &StrategyContext) -> Card {
        let legal = ctx.legal_plays();
        let card = random_play(&legal, &mut self.rng);
        log_play(ctx, "kenny", &legal, card, "random");
        card
    }
}
