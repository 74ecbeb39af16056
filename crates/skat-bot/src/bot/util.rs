use rand::Rng;
use rand::seq::SliceRandom;
use skat_core::game::strategy::{GameChoice, StrategyContext};
use skat_core::model::bidding::{Bid, MIN_BID, next_legal_bid};
use skat_core::model::card::Card;
use skat_core::model::hand::Hand;
use skat_core::model::rank::Rank;
use skat_core::model::round::RoundView;
use tracing::{Level, event};

/// Raise one legal step at a time up to `max`, answering an opponent's raise
/// with a hold while it stays within reach.
pub fn bid_incrementally(view: &RoundView, max: u16) -> Bid {
    let standing = view.standing_bid();
    let answering = standing >= MIN_BID && matches!(view.last_bid(), Some(Bid::Raise(_)));
    if answering {
        return if standing <= max { Bid::Hold } else { Bid::Pass };
    }
    match next_legal_bid(standing) {
        Some(next) if next <= max => Bid::Raise(next),
        _ => Bid::Pass,
    }
}

/// Tricks one suit is sure to win (or, for null, sure to lose) when a single
/// opponent holds the rest of it.
pub fn count_certain_tricks(suit_cards: &[Card], null: bool) -> usize {
    let order: Vec<Rank> = if null {
        Rank::NULL_ORDERED.to_vec()
    } else {
        Rank::ORDERED
            .iter()
            .rev()
            .copied()
            .filter(|rank| *rank != Rank::Jack)
            .collect()
    };

    let holds = |rank: &Rank| suit_cards.iter().any(|card| card.rank == *rank);
    let certain = order.iter().take_while(|rank| holds(rank)).count();
    let gaps = order.len() - certain;
    if certain >= gaps {
        suit_cards.len()
    } else {
        certain
    }
}

pub fn random_cards<R: Rng + ?Sized>(hand: &Hand, count: usize, rng: &mut R) -> Vec<Card> {
    hand.cards().choose_multiple(rng, count).copied().collect()
}

/// Any one of `legal`, which must not be empty. The round only asks a seat
/// to play while it still holds cards, and every hand has a legal card.
pub fn random_play<R: Rng + ?Sized>(legal: &[Card], rng: &mut R) -> Card {
    debug_assert!(!legal.is_empty(), "no legal play offered");
    legal[rng.gen_range(0..legal.len())]
}

pub(crate) fn log_bid(ctx: &StrategyContext, policy: &str, bid: Bid, max: u16) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }
    event!(
        target: "skat_bot::bid",
        Level::DEBUG,
        seat = %ctx.seat,
        policy,
        standing = ctx.round.standing_bid(),
        max,
        bid = %bid
    );
}

pub(crate) fn log_declare(ctx: &StrategyContext, policy: &str, choice: &GameChoice) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }
    let modifiers = choice
        .modifiers
        .iter()
        .map(|modifier| modifier.as_str())
        .collect::<Vec<_>>()
        .join(",");
    event!(
        target: "skat_bot::declare",
        Level::DEBUG,
        seat = %ctx.seat,
        policy,
        game = %choice.game_type,
        modifiers = %modifiers,
        bid = ctx.round.standing_bid()
    );
}

pub(crate) fn log_play(
    ctx: &StrategyContext,
    policy: &str,
    legal: &[Card],
    chosen: Card,
    reason: &str,
) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }
    let legal_preview = if legal.len() <= 6 {
        legal
            .iter()
            .map(Card::to_string)
            .collect::<Vec<_>>()
            .join(",")
    } else {
        format!("{} moves", legal.len())
    };
    event!(
        target: "skat_bot::play",
        Level::DEBUG,
        seat = %ctx.seat,
        policy,
        legal_count = legal.len(),
        legal_moves = %legal_preview,
        chosen = %chosen,
        trick_cards = ctx.round.current_trick().plays().len(),
        reason,
    );
}
