use proptest::prelude::*;
use skat_core::model::card::Card;
use skat_core::model::deck::Deck;
use skat_core::model::game_type::GameType;
use skat_core::model::hand::{Hand, reorganize};
use skat_core::model::seat::Seat;
use skat_core::model::trick::{Trick, legal_plays, winning_index};
use skat_core::model::valuation::jack_multiplier;
use std::collections::HashSet;

fn game_type() -> impl Strategy<Value = GameType> {
    (0..GameType::ALL.len()).prop_map(|index| GameType::ALL[index])
}

fn trump_game() -> impl Strategy<Value = GameType> {
    game_type().prop_filter("null has no trump", |game| !game.is_null())
}

/// `len` distinct cards from a deck shuffled with `seed`.
fn drawn(seed: u64, len: usize) -> Vec<Card> {
    Deck::shuffled_with_seed(seed).cards()[..len].to_vec()
}

proptest! {
    #[test]
    fn reorganize_is_idempotent_and_keeps_every_card(
        seed in any::<u64>(),
        len in 0usize..=12,
        game in game_type(),
    ) {
        let cards = drawn(seed, len);
        let once = reorganize(cards.iter().copied(), game);
        let twice = reorganize(once.iter().flatten().copied(), game);
        prop_assert_eq!(&once, &twice);

        let before: HashSet<Card> = cards.iter().copied().collect();
        let after: HashSet<Card> = once.iter().flatten().copied().collect();
        prop_assert_eq!(once.iter().map(Vec::len).sum::<usize>(), cards.len());
        prop_assert_eq!(before, after);
    }

    #[test]
    fn jack_multiplier_stays_in_bounds(
        seed in any::<u64>(),
        len in 0usize..=12,
        game in trump_game(),
    ) {
        let held = drawn(seed, len);
        let multiplier = jack_multiplier(&held, game).unwrap() as usize;
        prop_assert!(multiplier >= 1);
        prop_assert!(multiplier <= game.trump_count() + 1);
    }

    #[test]
    fn holding_all_or_no_trumps_gives_the_maximum(game in trump_game()) {
        let maximum = (game.trump_count() + 1) as u8;
        prop_assert_eq!(jack_multiplier(&game.trumps(), game), Some(maximum));
        prop_assert_eq!(jack_multiplier(&[], game), Some(maximum));
    }

    #[test]
    fn legal_plays_follow_the_led_bucket(seed in any::<u64>(), game in game_type()) {
        let cards = drawn(seed, 11);
        let mut hand = Hand::with_cards(Seat::Middlehand, "Bea", cards[1..].to_vec());
        hand.reorganize(game);
        let mut trick = Trick::new(Seat::Forehand);
        trick.play(Seat::Forehand, cards[0]).unwrap();

        let led = game.bucket_of(cards[0]);
        let following: Vec<Card> = hand
            .cards()
            .into_iter()
            .filter(|card| game.bucket_of(*card) == led)
            .collect();
        let legal = legal_plays(&hand, &trick, game);

        if following.is_empty() {
            prop_assert_eq!(legal, hand.cards());
        } else {
            prop_assert!(legal.iter().all(|card| game.bucket_of(*card) == led));
            prop_assert_eq!(legal, following);
        }
    }

    #[test]
    fn trick_winner_is_deterministic_and_eligible(seed in any::<u64>(), game in game_type()) {
        let cards = drawn(seed, 3);
        let first = winning_index(&cards, game).unwrap();
        prop_assert_eq!(Some(first), winning_index(&cards, game));

        let winner = cards[first];
        if cards.iter().any(|card| game.is_trump(*card)) {
            prop_assert!(game.is_trump(winner));
            let strength = game.trump_strength(winner).unwrap();
            for card in cards.iter().filter(|card| game.is_trump(**card)) {
                prop_assert!(game.trump_strength(*card).unwrap() <= strength);
            }
        } else {
            prop_assert_eq!(winner.suit, cards[0].suit);
            for card in cards.iter().filter(|card| card.suit == cards[0].suit) {
                prop_assert!(game.sort_key(*card) <= game.sort_key(winner));
            }
        }

        let mut trick = Trick::new(Seat::Rearhand);
        for (offset, card) in cards.iter().enumerate() {
            trick.play(Seat::Rearhand.offset(offset), *card).unwrap();
        }
        prop_assert_eq!(trick.winner(game), Some(Seat::Rearhand.offset(first)));
    }
}
