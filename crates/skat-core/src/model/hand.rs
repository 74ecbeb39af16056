use crate::model::card::Card;
use crate::model::game_type::GameType;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use core::fmt;

/// One of the five partitions of a hand: a plain suit or the trump suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Suit(Suit),
    Trump,
}

impl Bucket {
    pub const ALL: [Bucket; 5] = [
        Bucket::Suit(Suit::Diamonds),
        Bucket::Suit(Suit::Spades),
        Bucket::Suit(Suit::Hearts),
        Bucket::Suit(Suit::Clubs),
        Bucket::Trump,
    ];

    pub const fn index(self) -> usize {
        match self {
            Bucket::Suit(suit) => suit.index(),
            Bucket::Trump => 4,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::Suit(suit) => f.write_str(suit.name()),
            Bucket::Trump => f.write_str("trump"),
        }
    }
}

pub type Buckets = [Vec<Card>; 5];

/// Partition `cards` into suit and trump buckets for `game_type`, each sorted
/// weakest first. Pure, so reorganizing an already organized hand is a no-op.
pub fn reorganize<I>(cards: I, game_type: GameType) -> Buckets
where
    I: IntoIterator<Item = Card>,
{
    let mut buckets: Buckets = Default::default();
    for card in cards {
        buckets[game_type.bucket_of(card).index()].push(card);
    }
    for bucket in buckets.iter_mut() {
        bucket.sort_by_key(|card| game_type.sort_key(*card));
    }
    buckets
}

#[derive(Debug, Clone)]
pub struct Hand {
    seat: Seat,
    name: String,
    buckets: Buckets,
    game_type: Option<GameType>,
}

impl Hand {
    pub fn new(seat: Seat, name: impl Into<String>) -> Self {
        Self {
            seat,
            name: name.into(),
            buckets: Default::default(),
            game_type: None,
        }
    }

    pub fn with_cards(seat: Seat, name: impl Into<String>, cards: Vec<Card>) -> Self {
        let mut hand = Self::new(seat, name);
        hand.extend(cards);
        hand
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn game_type(&self) -> Option<GameType> {
        self.game_type
    }

    /// Until a game type is fixed, new cards share the trump bucket.
    pub fn add(&mut self, card: Card) {
        match self.game_type {
            Some(game_type) => {
                let bucket = &mut self.buckets[game_type.bucket_of(card).index()];
                bucket.push(card);
                bucket.sort_by_key(|c| game_type.sort_key(*c));
            }
            None => self.buckets[Bucket::Trump.index()].push(card),
        }
    }

    pub fn extend<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        for card in cards {
            self.add(card);
        }
    }

    pub fn remove(&mut self, card: Card) -> bool {
        for bucket in self.buckets.iter_mut() {
            if let Some(index) = bucket.iter().position(|&c| c == card) {
                bucket.remove(index);
                return true;
            }
        }
        false
    }

    pub fn contains(&self, card: Card) -> bool {
        self.iter().any(|&c| c == card)
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Cards in bucket order: diamonds, spades, hearts, clubs, trump.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.buckets.iter().flatten()
    }

    pub fn cards(&self) -> Vec<Card> {
        self.iter().copied().collect()
    }

    pub fn bucket(&self, bucket: Bucket) -> &[Card] {
        &self.buckets[bucket.index()]
    }

    pub fn buckets(&self) -> &Buckets {
        &self.buckets
    }

    pub fn trumps(&self) -> &[Card] {
        self.bucket(Bucket::Trump)
    }

    pub fn reorganize(&mut self, game_type: GameType) {
        let cards = self.cards();
        self.buckets = reorganize(cards, game_type);
        self.game_type = Some(game_type);
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name)?;
        for (i, bucket) in self.buckets.iter().enumerate() {
            if i > 0 {
                f.write_str(" |")?;
            }
            for card in bucket {
                write!(f, " {card}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Bucket, Hand, reorganize};
    use crate::model::card::Card;
    use crate::model::game_type::GameType;
    use crate::model::seat::Seat;
    use crate::model::suit::Suit;

    fn cards(list: &[&str]) -> Vec<Card> {
        list.iter().map(|c| c.parse().unwrap()).collect()
    }

    #[test]
    fn add_and_remove_cards() {
        let mut hand = Hand::new(Seat::Forehand, "Kenny");
        let card: Card = "7D".parse().unwrap();
        hand.add(card);
        assert!(hand.contains(card));
        assert!(hand.remove(card));
        assert!(!hand.contains(card));
        assert!(!hand.remove(card));
    }

    #[test]
    fn unorganized_cards_share_one_bucket() {
        let hand = Hand::with_cards(Seat::Forehand, "Bob", cards(&["7D", "JC", "AH"]));
        assert_eq!(hand.trumps().len(), 3);
        assert_eq!(hand.game_type(), None);
    }

    #[test]
    fn suit_game_moves_jacks_into_trump_above_suit_cards() {
        let mut hand = Hand::with_cards(
            Seat::Middlehand,
            "Kenny",
            cards(&["JD", "AH", "7H", "JC", "10S", "KD"]),
        );
        hand.reorganize(GameType::Suit(Suit::Hearts));
        assert_eq!(hand.trumps(), cards(&["7H", "AH", "JD", "JC"]).as_slice());
        assert_eq!(hand.bucket(Bucket::Suit(Suit::Spades)), cards(&["10S"]).as_slice());
        assert_eq!(hand.bucket(Bucket::Suit(Suit::Diamonds)), cards(&["KD"]).as_slice());
        assert!(hand.bucket(Bucket::Suit(Suit::Hearts)).is_empty());
    }

    #[test]
    fn null_game_sorts_by_null_order_and_has_no_trump() {
        let mut hand = Hand::with_cards(
            Seat::Rearhand,
            "Nihilist",
            cards(&["KC", "10C", "JC", "7C"]),
        );
        hand.reorganize(GameType::Null);
        assert!(hand.trumps().is_empty());
        assert_eq!(
            hand.bucket(Bucket::Suit(Suit::Clubs)),
            cards(&["7C", "10C", "JC", "KC"]).as_slice()
        );
    }

    #[test]
    fn reorganize_is_idempotent_and_partition_preserving() {
        let original = cards(&["JH", "AS", "9S", "10D", "QC", "JS", "8H", "KH", "7C", "AD"]);
        for game in GameType::ALL {
            let once = reorganize(original.clone(), game);
            let twice = reorganize(once.iter().flatten().copied(), game);
            assert_eq!(once, twice, "{game}");
            let mut flat: Vec<_> = once.iter().flatten().copied().collect();
            let mut expected = original.clone();
            flat.sort_by_key(|c| (c.suit, c.rank.strength()));
            expected.sort_by_key(|c| (c.suit, c.rank.strength()));
            assert_eq!(flat, expected);
        }
    }

    #[test]
    fn cards_added_after_reorganizing_land_in_place() {
        let mut hand = Hand::with_cards(Seat::Forehand, "Donald", cards(&["AS", "7S"]));
        hand.reorganize(GameType::Grand);
        hand.add("JD".parse().unwrap());
        hand.add("9S".parse().unwrap());
        assert_eq!(hand.trumps(), cards(&["JD"]).as_slice());
        assert_eq!(hand.bucket(Bucket::Suit(Suit::Spades)), cards(&["7S", "9S", "AS"]).as_slice());
    }

    #[test]
    fn display_separates_buckets() {
        let mut hand = Hand::with_cards(Seat::Forehand, "Bob", cards(&["JC", "AD"]));
        hand.reorganize(GameType::Grand);
        assert_eq!(hand.to_string(), "Bob: AD | | | | JC");
    }
}
