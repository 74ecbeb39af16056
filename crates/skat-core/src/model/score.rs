use crate::model::card::Card;
use crate::model::declaration::{Declaration, Modifier, Outcome};
use crate::model::valuation::{game_value, overbid_penalty};

pub const TOTAL_POINTS: u16 = 120;

pub fn card_points(cards: &[Card]) -> u16 {
    cards.iter().map(|card| u16::from(card.points())).sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoring {
    pub won: bool,
    /// Card points captured by the declarer.
    pub points: u16,
    /// Game value the score is based on, after any overbid rounding.
    pub value: u16,
    pub score: i32,
}

/// Tag `declaration` with the round's outcomes and compute the declarer's
/// signed score from the two capture piles.
pub fn score_round(
    declaration: &mut Declaration,
    declarer_pile: &[Card],
    defender_pile: &[Card],
    bid: u16,
    jack_multiplier: u8,
) -> Scoring {
    let points = card_points(declarer_pile);

    if points * 4 >= TOTAL_POINTS * 3 {
        declaration.record_outcome(Outcome::TakesThreeQuarters);
    } else if points * 4 <= TOTAL_POINTS {
        declaration.record_outcome(Outcome::LosesThreeQuarters);
    }

    if defender_pile.is_empty() {
        declaration.record_outcome(Outcome::TakesEverything);
    } else if declarer_pile.is_empty() {
        declaration.record_outcome(Outcome::LosesEverything);
    }

    let won = if declaration.game_type().is_null() {
        declaration.has_outcome(Outcome::LosesEverything)
    } else {
        let missed_call = (declaration.has(Modifier::CallsThreeQuarters)
            && !declaration.has_outcome(Outcome::TakesThreeQuarters))
            || (declaration.has(Modifier::CallsEverything)
                && !declaration.has_outcome(Outcome::TakesEverything));
        points * 2 > TOTAL_POINTS && !missed_call
    };

    let mut value = game_value(declaration, true, jack_multiplier);
    let score = if won {
        i32::from(value)
    } else {
        if let Some(penalty) = overbid_penalty(bid, declaration.game_type(), value) {
            value = penalty;
        }
        -2 * i32::from(value)
    };

    Scoring {
        won,
        points,
        value,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::{TOTAL_POINTS, card_points, score_round};
    use crate::model::card::Card;
    use crate::model::declaration::{Declaration, Modifier, Outcome};
    use crate::model::deck::Deck;
    use crate::model::game_type::GameType;
    use crate::model::suit::Suit;

    fn cards(list: &[&str]) -> Vec<Card> {
        list.iter().map(|c| c.parse().unwrap()).collect()
    }

    fn split(declarer: &[&str]) -> (Vec<Card>, Vec<Card>) {
        let declarer = cards(declarer);
        let defenders = Deck::standard()
            .cards()
            .iter()
            .copied()
            .filter(|card| !declarer.contains(card))
            .collect();
        (declarer, defenders)
    }

    #[test]
    fn whole_deck_is_worth_120() {
        assert_eq!(card_points(Deck::standard().cards()), TOTAL_POINTS);
    }

    #[test]
    fn suit_game_needs_more_than_sixty() {
        let hearts = GameType::Suit(Suit::Hearts);
        // Four aces and two tens: 44 + 20 = 64.
        let (mine, theirs) = split(&["AD", "AS", "AH", "AC", "10D", "10S"]);
        let mut declaration = Declaration::new(hearts, false, &[]).unwrap();
        let scoring = score_round(&mut declaration, &mine, &theirs, 18, 1);
        assert!(scoring.won);
        assert_eq!(scoring.points, 64);
        assert_eq!(scoring.score, 11 * 2);

        // Exactly sixty is a loss.
        let (mine, theirs) = split(&["AD", "AS", "AH", "AC", "10D", "QS", "QH", "9C"]);
        let mut declaration = Declaration::new(hearts, false, &[]).unwrap();
        let scoring = score_round(&mut declaration, &mine, &theirs, 18, 1);
        assert_eq!(scoring.points, 60);
        assert!(!scoring.won);
        assert_eq!(scoring.score, -2 * 22);
    }

    #[test]
    fn heavy_loss_adds_a_multiplier() {
        let (mine, theirs) = split(&["AD"]);
        let mut declaration = Declaration::new(GameType::Grand, false, &[]).unwrap();
        let scoring = score_round(&mut declaration, &mine, &theirs, 60, 1);
        // 1 + jack(1) + loses three quarters = 3, so 72 clears the bid.
        assert!(declaration.has_outcome(Outcome::LosesThreeQuarters));
        assert_eq!(scoring.value, 72);
        assert_eq!(scoring.score, -144);
    }

    #[test]
    fn missed_call_loses_and_rounds_up() {
        let (mine, theirs) = split(&["AD", "AS", "AH", "AC", "10D", "10S", "10H"]);
        let mut declaration = Declaration::new(
            GameType::Suit(Suit::Diamonds),
            true,
            &[Modifier::CallsThreeQuarters],
        )
        .unwrap();
        let scoring = score_round(&mut declaration, &mine, &theirs, 54, 1);
        assert_eq!(scoring.points, 74);
        assert!(!scoring.won);
        // Value 9 * (1 + 1 + no kitty + call) = 36 < 54, so the bid is rounded to 54.
        assert_eq!(scoring.value, 54);
        assert_eq!(scoring.score, -108);
    }

    #[test]
    fn null_is_won_only_without_tricks() {
        let mut declaration = Declaration::new(GameType::Null, false, &[]).unwrap();
        let (mine, theirs) = split(&[]);
        let scoring = score_round(&mut declaration, &mine, &theirs, 23, 0);
        assert!(scoring.won);
        assert_eq!(scoring.score, 23);

        // One trick with no points still loses.
        let mut declaration = Declaration::new(GameType::Null, false, &[]).unwrap();
        let (mine, theirs) = split(&["7D", "8D", "9D"]);
        let scoring = score_round(&mut declaration, &mine, &theirs, 18, 0);
        assert!(!scoring.won);
        assert!(!declaration.has_outcome(Outcome::LosesEverything));
        assert_eq!(scoring.score, -46);
    }

    #[test]
    fn sweep_tags_both_outcomes() {
        let (mine, theirs) = split(&[]);
        let (theirs, mine) = (mine, theirs);
        let mut declaration = Declaration::new(GameType::Grand, true, &[Modifier::CallsEverything])
            .unwrap();
        let scoring = score_round(&mut declaration, &mine, &theirs, 18, 4);
        assert!(declaration.has_outcome(Outcome::TakesThreeQuarters));
        assert!(declaration.has_outcome(Outcome::TakesEverything));
        assert!(scoring.won);
        // 1 + 4 + no kitty + call + takes 3/4 + takes everything = 9.
        assert_eq!(scoring.score, 24 * 9);
    }
}
