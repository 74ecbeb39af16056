use crate::bot::{bid_incrementally, log_bid, log_declare, log_play, random_play};
use rand::SeedableRng;
use rand::rngs::StdRng;
use skat_core::game::strategy::{GameChoice, Strategy, StrategyContext};
use skat_core::model::bidding::Bid;
use skat_core::model::card::Card;
use skat_core::model::game_type::GameType;
use skat_core::model::rank::Rank;
use skat_core::model::seat::Seat;
use skat_core::model::suit::Suit;
use skat_core::model::trick::winning_index;
use skat_core::model::valuation::jack_multiplier;

const MIN_HONOURS: usize = 4;

/// Trump-game specialist. Needs four jacks and aces between them to bid,
/// plays grand with the two highest jacks and otherwise its longest suit.
#[derive(Debug)]
pub struct DonaldPolicy {
    seat: Seat,
    rng: StdRng,
    game: Option<GameType>,
}

impl DonaldPolicy {
    pub fn new(seat: Seat, seed: u64) -> Self {
        Self {
            seat,
            rng: StdRng::seed_from_u64(seed),
            game: None,
        }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    /// The game worth bidding on with `cards`, if any.
    pub fn choose_game(cards: &[Card]) -> Option<GameType> {
        let honours = cards
            .iter()
            .filter(|card| card.is_jack() || card.rank == Rank::Ace)
            .count();
        (honours >= MIN_HONOURS).then(|| preferred_game(cards))
    }

    /// Estimated value of the chosen game with the kitty picked up.
    pub fn max_bid(cards: &[Card]) -> u16 {
        let Some(game) = Self::choose_game(cards) else {
            return 0;
        };
        let multiplier = jack_multiplier(cards, game).unwrap_or(1);
        game.base_value()
            .map(|base| base * (1 + u16::from(multiplier)))
            .unwrap_or(0)
    }
}

/// Both of the two highest grand trumps held (JC and JH).
fn holds_top_jacks(cards: &[Card]) -> bool {
    GameType::Grand
        .trumps()
        .iter()
        .rev()
        .take(2)
        .all(|jack| cards.contains(jack))
}

/// Grand with the two top jacks; otherwise the longest suit, preferring one
/// whose ace is missing so the ace stays a side winner.
fn preferred_game(cards: &[Card]) -> GameType {
    if holds_top_jacks(cards) {
        return GameType::Grand;
    }
    let suit = Suit::ALL
        .iter()
        .copied()
        .max_by_key(|suit| {
            let length = cards
                .iter()
                .filter(|card| card.suit == *suit && !card.is_jack())
                .count();
            let has_ace = cards.contains(&Card::new(Rank::Ace, *suit));
            (length, !has_ace, suit.index())
        })
        .unwrap_or(Suit::Clubs);
    GameType::Suit(suit)
}

/// Trumps outrank everything; plain cards compare within the game's order.
fn strength(game: GameType, card: Card) -> u16 {
    match game.trump_strength(card) {
        Some(trump) => 100 + u16::from(trump),
        None => u16::from(game.sort_key(card)),
    }
}

impl DonaldPolicy {
    fn lead(
        &self,
        ctx: &StrategyContext,
        legal: &[Card],
        game: GameType,
    ) -> Option<(Card, &'static str)> {
        if ctx.is_declarer() {
            let best_trump = legal
                .iter()
                .copied()
                .filter(|card| game.is_trump(*card))
                .max_by_key(|card| strength(game, *card));
            if let Some(card) = best_trump {
                return Some((card, "bleed trump"));
            }
        }

        let longest = legal
            .iter()
            .map(|card| game.bucket_of(*card))
            .max_by_key(|bucket| {
                let length = legal
                    .iter()
                    .filter(|card| game.bucket_of(**card) == *bucket)
                    .count();
                (length, bucket.index())
            });
        legal
            .iter()
            .copied()
            .filter(|card| Some(game.bucket_of(*card)) == longest)
            .max_by_key(|card| strength(game, *card))
            .map(|card| (card, "longest suit"))
    }

    fn follow(
        &self,
        ctx: &StrategyContext,
        legal: &[Card],
        game: GameType,
    ) -> Option<(Card, &'static str)> {
        let played = ctx.round.current_trick().cards();
        let cheapest_winner = legal
            .iter()
            .copied()
            .filter(|card| {
                let mut cards = played.clone();
                cards.push(*card);
                winning_index(&cards, game) == Some(played.len())
            })
            .min_by_key(|card| strength(game, *card));
        if let Some(card) = cheapest_winner {
            return Some((card, "win"));
        }

        legal
            .iter()
            .copied()
            .min_by_key(|card| (card.points(), strength(game, *card)))
            .map(|card| (card, "duck"))
    }
}

impl Strategy for DonaldPolicy {
    fn bid(&mut self, ctx: &StrategyContext) -> Bid {
        let max = Self::max_bid(&ctx.hand.cards());
        let bid = bid_incrementally(&ctx.round, max);
        log_bid(ctx, "donald", bid, max);
        bid
    }

    fn kitty(&mut self, _ctx: &StrategyContext) -> bool {
        true
    }

    /// Keep every trump; shed the cheapest side cards.
    fn discard(&mut self, ctx: &StrategyContext) -> [Card; 2] {
        let mut cards = ctx.hand.cards();
        let game = preferred_game(&cards);
        self.game = Some(game);
        cards.sort_by_key(|card| (game.is_trump(*card), card.points(), strength(game, *card)));
        [cards[0], cards[1]]
    }

    fn declare(&mut self, ctx: &StrategyContext) -> GameChoice {
        let game = self
            .game
            .take()
            .unwrap_or_else(|| preferred_game(&ctx.hand.cards()));
        let choice = GameChoice::plain(game);
        log_declare(ctx, "donald", &choice);
        choice
    }

    fn play(&mut self, ctx: &StrategyContext) -> Card {
        let legal = ctx.legal_plays();
        let Some(game) = ctx.round.game_type() else {
            return random_play(&legal, &mut self.rng);
        };
        let chosen = if ctx.round.current_trick().is_empty() {
            self.lead(ctx, &legal, game)
        } else {
            self.follow(ctx, &legal, game)
        };
        let (card, reason) =
            chosen.unwrap_or_else(|| (random_play(&legal, &mut self.rng), "random"));
        log_play(ctx, "donald", &legal, card, reason);
        card
    }
}
