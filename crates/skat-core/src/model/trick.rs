use crate::model::card::Card;
use crate::model::game_type::GameType;
use crate::model::hand::{Bucket, Hand};
use crate::model::seat::Seat;
use std::fmt;

pub const TRICK_SIZE: usize = 3;

#[derive(Debug, Clone)]
pub struct Trick {
    leader: Seat,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickError {
    TrickComplete,
    OutOfTurn { expected: Seat, actual: Seat },
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::TrickComplete => write!(f, "trick already complete"),
            TrickError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
        }
    }
}

impl std::error::Error for TrickError {}

impl Trick {
    pub fn new(leader: Seat) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(TRICK_SIZE),
        }
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn cards(&self) -> Vec<Card> {
        self.plays.iter().map(|play| play.card).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == TRICK_SIZE
    }

    pub fn led_card(&self) -> Option<Card> {
        self.plays.first().map(|play| play.card)
    }

    /// Bucket followers must play from: trump if trump was led, else the led suit.
    pub fn led_bucket(&self, game_type: GameType) -> Option<Bucket> {
        self.led_card().map(|card| game_type.bucket_of(card))
    }

    pub fn expected_seat(&self) -> Seat {
        self.plays
            .last()
            .map(|play| play.seat.next())
            .unwrap_or(self.leader)
    }

    pub fn play(&mut self, seat: Seat, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }

        let expected = self.expected_seat();
        if expected != seat {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        self.plays.push(Play { seat, card });
        Ok(())
    }

    /// Seat currently holding the trick; the final winner once complete.
    pub fn winner(&self, game_type: GameType) -> Option<Seat> {
        winning_index(&self.cards(), game_type).map(|index| self.leader.offset(index))
    }

    pub fn points(&self) -> u16 {
        self.plays.iter().map(|play| u16::from(play.card.points())).sum()
    }
}

/// Index of the strongest card in `cards` (led first). Any trump makes only
/// trumps eligible; otherwise only cards of the led suit compete.
pub fn winning_index(cards: &[Card], game_type: GameType) -> Option<usize> {
    let led = cards.first()?;
    let trumped = cards.iter().any(|card| game_type.is_trump(*card));
    cards
        .iter()
        .enumerate()
        .filter_map(|(index, card)| {
            let strength = if trumped {
                game_type.trump_strength(*card)?
            } else if card.suit == led.suit {
                game_type.sort_key(*card)
            } else {
                return None;
            };
            Some((index, strength))
        })
        .max_by_key(|(_, strength)| *strength)
        .map(|(index, _)| index)
}

/// Cards `hand` may play into `trick`: the led bucket when it can be
/// followed, anything otherwise.
pub fn legal_plays(hand: &Hand, trick: &Trick, game_type: GameType) -> Vec<Card> {
    let all = hand.cards();
    let Some(required) = trick.led_bucket(game_type) else {
        return all;
    };
    let following: Vec<Card> = all
        .iter()
        .copied()
        .filter(|card| game_type.bucket_of(*card) == required)
        .collect();
    if following.is_empty() { all } else { following }
}

#[cfg(test)]
mod tests {
    use super::{Trick, TrickError, legal_plays, winning_index};
    use crate::model::card::Card;
    use crate::model::game_type::GameType;
    use crate::model::hand::Hand;
    use crate::model::seat::Seat;
    use crate::model::suit::Suit;

    fn card(text: &str) -> Card {
        text.parse().unwrap()
    }

    fn trick(leader: Seat, cards: &[&str]) -> Trick {
        let mut trick = Trick::new(leader);
        let mut seat = leader;
        for text in cards {
            trick.play(seat, card(text)).unwrap();
            seat = seat.next();
        }
        trick
    }

    #[test]
    fn plays_follow_turn_order() {
        let mut trick = Trick::new(Seat::Middlehand);
        trick.play(Seat::Middlehand, card("7C")).unwrap();
        assert_eq!(
            trick.play(Seat::Forehand, card("8C")),
            Err(TrickError::OutOfTurn {
                expected: Seat::Rearhand,
                actual: Seat::Forehand
            })
        );
    }

    #[test]
    fn complete_trick_rejects_fourth_card() {
        let mut trick = trick(Seat::Forehand, &["7C", "8C", "9C"]);
        assert_eq!(
            trick.play(Seat::Forehand, card("10C")),
            Err(TrickError::TrickComplete)
        );
    }

    #[test]
    fn highest_of_led_suit_wins_without_trump() {
        let trick = trick(Seat::Forehand, &["KS", "10S", "AH"]);
        assert_eq!(trick.winner(GameType::Suit(Suit::Clubs)), Some(Seat::Middlehand));
        assert_eq!(trick.points(), 25);
    }

    #[test]
    fn null_uses_null_order() {
        let trick = trick(Seat::Forehand, &["KS", "10S", "7S"]);
        assert_eq!(trick.winner(GameType::Null), Some(Seat::Forehand));
    }

    #[test]
    fn any_trump_beats_the_led_suit() {
        let trick = trick(Seat::Rearhand, &["AS", "7H", "10S"]);
        assert_eq!(trick.winner(GameType::Suit(Suit::Hearts)), Some(Seat::Forehand));
    }

    #[test]
    fn jacks_outrank_suit_trumps_by_suit_precedence() {
        let trick = trick(Seat::Forehand, &["AD", "JD", "JS"]);
        assert_eq!(trick.winner(GameType::Suit(Suit::Diamonds)), Some(Seat::Rearhand));
        assert_eq!(winning_index(&[card("JH"), card("AH"), card("JC")], GameType::Grand), Some(2));
    }

    #[test]
    fn led_jack_is_trump_not_its_suit() {
        let trick = trick(Seat::Forehand, &["JS", "AS", "7D"]);
        assert_eq!(trick.winner(GameType::Grand), Some(Seat::Forehand));
        assert_eq!(trick.winner(GameType::Null), Some(Seat::Middlehand));
    }

    #[test]
    fn followers_must_follow_trump_with_jacks() {
        let mut hand = Hand::with_cards(
            Seat::Middlehand,
            "Kenny",
            vec![card("JD"), card("AS"), card("7H")],
        );
        hand.reorganize(GameType::Suit(Suit::Hearts));
        let led = trick(Seat::Forehand, &["AH"]);
        let legal = legal_plays(&hand, &led, GameType::Suit(Suit::Hearts));
        assert_eq!(legal, vec![card("7H"), card("JD")]);
    }

    #[test]
    fn led_suit_excludes_its_jack() {
        let hand = Hand::with_cards(Seat::Middlehand, "Kenny", vec![card("JS"), card("7D")]);
        let led = trick(Seat::Forehand, &["AS"]);
        let legal = legal_plays(&hand, &led, GameType::Grand);
        assert_eq!(legal.len(), 2, "JS is trump, so spades cannot be followed");
    }

    #[test]
    fn void_player_may_play_anything() {
        let hand = Hand::with_cards(Seat::Rearhand, "Bob", vec![card("7D"), card("8C")]);
        let led = trick(Seat::Forehand, &["AS"]);
        assert_eq!(legal_plays(&hand, &led, GameType::Null).len(), 2);
        assert_eq!(legal_plays(&hand, &Trick::new(Seat::Rearhand), GameType::Null).len(), 2);
    }
}
