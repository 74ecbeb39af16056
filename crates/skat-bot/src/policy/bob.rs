use crate::bot::{log_play, random_play};
use rand::SeedableRng;
use rand::rngs::StdRng;
use skat_core::game::strategy::{GameChoice, Strategy, StrategyContext};
use skat_core::model::bidding::Bid;
use skat_core::model::card::Card;
use skat_core::model::game_type::GameType;
use skat_core::model::seat::Seat;

/// Never bids, so the declarer-only decisions are never requested.
#[derive(Debug)]
pub struct BobPolicy {
    seat: Seat,
    rng: StdRng,
}

impl BobPolicy {
    pub fn new(seat: Seat, seed: u64) -> Self {
        Self {
            seat,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }
}

impl Strategy for BobPolicy {
    fn bid(&mut self, _ctx: &StrategyContext) -> Bid {
        Bid::Pass
    }

    fn kitty(&mut self, _ctx: &StrategyContext) -> bool {
        false
    }

    fn discard(&mut self, ctx: &StrategyContext) -> [Card; 2] {
        let cards = ctx.hand.cards();
        [cards[0], cards[1]]
    }

    fn declare(&mut self, _ctx: &StrategyContext) -> GameChoice {
        GameChoice::plain(GameType::Grand)
    }

    fn play(&mut self, ctx: &StrategyContext) -> Card {
        let legal = ctx.legal_plays();
        let card = random_play(&legal, &mut self.rng);
        log_play(ctx, "bob", &legal, card, "random");
        card
    }
}
