use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

pub const DECK_SIZE: usize = 32;
pub const HAND_SIZE: usize = 10;
pub const KITTY_SIZE: usize = 2;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

/// Three hands of ten, indexed by seat, and the two-card kitty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub hands: [Vec<Card>; 3],
    pub kitty: [Card; KITTY_SIZE],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    WrongSize(usize),
    Duplicate(Card),
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::WrongSize(len) => write!(f, "deck must hold {DECK_SIZE} cards, got {len}"),
            DeckError::Duplicate(card) => write!(f, "card {card} appears more than once"),
        }
    }
}

impl std::error::Error for DeckError {}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    /// Accepts any permutation of the 32 cards, e.g. a prearranged deal.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, DeckError> {
        if cards.len() != DECK_SIZE {
            return Err(DeckError::WrongSize(cards.len()));
        }
        let mut seen = HashSet::with_capacity(DECK_SIZE);
        for card in &cards {
            if !seen.insert(*card) {
                return Err(DeckError::Duplicate(*card));
            }
        }
        Ok(Self { cards })
    }

    /// Deal the given cards to each seat and the kitty, topping up short
    /// holdings with the remaining cards in standard order.
    pub fn arranged(hands: [&[Card]; 3], kitty: &[Card]) -> Result<Self, DeckError> {
        if let Some(hand) = hands.iter().find(|hand| hand.len() > HAND_SIZE) {
            return Err(DeckError::WrongSize(hand.len()));
        }
        if kitty.len() > KITTY_SIZE {
            return Err(DeckError::WrongSize(kitty.len()));
        }

        let placed: Vec<Card> = hands
            .iter()
            .flat_map(|hand| hand.iter())
            .chain(kitty)
            .copied()
            .collect();
        let mut spare = Self::standard()
            .cards
            .into_iter()
            .filter(|card| !placed.contains(card));

        let mut cards = Vec::with_capacity(DECK_SIZE);
        let targets = hands
            .iter()
            .map(|hand| (*hand, HAND_SIZE))
            .chain([(kitty, KITTY_SIZE)]);
        for (part, size) in targets {
            cards.extend_from_slice(part);
            cards.extend(spare.by_ref().take(size - part.len()));
        }
        Self::from_cards(cards)
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn deal(&self) -> Deal {
        let chunk = |seat: usize| self.cards[seat * HAND_SIZE..(seat + 1) * HAND_SIZE].to_vec();
        let tail = 3 * HAND_SIZE;
        Deal {
            hands: [chunk(0), chunk(1), chunk(2)],
            kitty: [self.cards[tail], self.cards[tail + 1]],
        }
    }
}
