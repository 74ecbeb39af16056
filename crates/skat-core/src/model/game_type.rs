use crate::model::card::Card;
use crate::model::hand::Bucket;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use core::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameType {
    Null,
    Suit(Suit),
    Grand,
}

impl GameType {
    pub const ALL: [GameType; 6] = [
        GameType::Null,
        GameType::Suit(Suit::Diamonds),
        GameType::Suit(Suit::Spades),
        GameType::Suit(Suit::Hearts),
        GameType::Suit(Suit::Clubs),
        GameType::Grand,
    ];

    /// Multiplicand for suit and grand games. Null values are fixed constants.
    pub const fn base_value(self) -> Option<u16> {
        match self {
            GameType::Null => None,
            GameType::Suit(Suit::Diamonds) => Some(9),
            GameType::Suit(Suit::Spades) => Some(10),
            GameType::Suit(Suit::Hearts) => Some(11),
            GameType::Suit(Suit::Clubs) => Some(12),
            GameType::Grand => Some(24),
        }
    }

    pub const fn is_null(self) -> bool {
        matches!(self, GameType::Null)
    }

    /// The full trump set, weakest first.
    pub fn trumps(self) -> Vec<Card> {
        let mut trumps = Vec::with_capacity(11);
        if let GameType::Suit(suit) = self {
            trumps.extend(
                Rank::ORDERED
                    .iter()
                    .copied()
                    .filter(|rank| *rank != Rank::Jack)
                    .map(|rank| Card::new(rank, suit)),
            );
        }
        if !self.is_null() {
            trumps.extend(Suit::ALL.iter().map(|suit| Card::new(Rank::Jack, *suit)));
        }
        trumps
    }

    pub const fn trump_count(self) -> usize {
        match self {
            GameType::Null => 0,
            GameType::Suit(_) => 11,
            GameType::Grand => 4,
        }
    }

    /// Index of `card` in [`GameType::trumps`], or `None` for a non-trump.
    pub const fn trump_strength(self, card: Card) -> Option<u8> {
        match self {
            GameType::Null => None,
            _ if card.is_jack() => Some(self.trump_count() as u8 - 4 + card.suit.index() as u8),
            GameType::Suit(suit) if card.suit as u8 == suit as u8 => Some(card.rank.strength()),
            _ => None,
        }
    }

    pub const fn is_trump(self, card: Card) -> bool {
        self.trump_strength(card).is_some()
    }

    pub const fn bucket_of(self, card: Card) -> Bucket {
        if self.is_trump(card) {
            Bucket::Trump
        } else {
            Bucket::Suit(card.suit)
        }
    }

    /// Ordering key within a bucket: trump strength for trumps, the
    /// applicable rank order for everything else.
    pub const fn sort_key(self, card: Card) -> u8 {
        match self.trump_strength(card) {
            Some(strength) => strength,
            None if self.is_null() => card.rank.null_strength(),
            None => card.rank.strength(),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            GameType::Null => "null",
            GameType::Suit(suit) => suit.name(),
            GameType::Grand => "grand",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        GameType::ALL
            .iter()
            .copied()
            .find(|game| game.as_str() == wanted)
            .ok_or_else(|| format!("unknown game type '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::GameType;
    use crate::model::card::Card;
    use crate::model::hand::Bucket;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn card(text: &str) -> Card {
        text.parse().unwrap()
    }

    #[test]
    fn trump_sets_have_expected_sizes() {
        assert!(GameType::Null.trumps().is_empty());
        assert_eq!(GameType::Grand.trumps().len(), 4);
        for suit in Suit::ALL {
            assert_eq!(GameType::Suit(suit).trumps().len(), 11);
        }
    }

    #[test]
    fn suit_game_trumps_run_from_seven_to_club_jack() {
        let trumps = GameType::Suit(Suit::Hearts).trumps();
        assert_eq!(trumps.first(), Some(&card("7H")));
        assert_eq!(trumps[6], card("AH"));
        assert_eq!(&trumps[7..], &[card("JD"), card("JS"), card("JH"), card("JC")]);
    }

    #[test]
    fn trump_strength_matches_trump_order() {
        for game in GameType::ALL {
            for (i, trump) in game.trumps().iter().enumerate() {
                assert_eq!(game.trump_strength(*trump), Some(i as u8), "{game} {trump}");
            }
        }
        assert_eq!(GameType::Grand.trump_strength(card("AC")), None);
        assert_eq!(GameType::Null.trump_strength(card("JC")), None);
    }

    #[test]
    fn jacks_always_land_in_trump_bucket_outside_null() {
        let jack = Card::new(Rank::Jack, Suit::Spades);
        assert_eq!(GameType::Grand.bucket_of(jack), Bucket::Trump);
        assert_eq!(GameType::Suit(Suit::Hearts).bucket_of(jack), Bucket::Trump);
        assert_eq!(GameType::Null.bucket_of(jack), Bucket::Suit(Suit::Spades));
        assert_eq!(
            GameType::Suit(Suit::Hearts).bucket_of(card("AS")),
            Bucket::Suit(Suit::Spades)
        );
    }

    #[test]
    fn base_values_follow_suit_precedence() {
        assert_eq!(GameType::Suit(Suit::Diamonds).base_value(), Some(9));
        assert_eq!(GameType::Suit(Suit::Clubs).base_value(), Some(12));
        assert_eq!(GameType::Grand.base_value(), Some(24));
        assert_eq!(GameType::Null.base_value(), None);
    }

    #[test]
    fn names_roundtrip() {
        for game in GameType::ALL {
            assert_eq!(game.to_string().parse::<GameType>(), Ok(game));
        }
        assert!("ramsch".parse::<GameType>().is_err());
    }
}
