use crate::model::bidding::{Auction, AuctionOutcome, Bid, BidError, BidRecord};
use crate::model::card::Card;
use crate::model::declaration::{Declaration, DeclarationError, Modifier};
use crate::model::deck::{DECK_SIZE, Deck, KITTY_SIZE};
use crate::model::game_type::GameType;
use crate::model::hand::{Bucket, Hand};
use crate::model::score::{Scoring, score_round};
use crate::model::seat::Seat;
use crate::model::trick::{Play, Trick, TrickError, legal_plays};
use crate::model::valuation::{game_value, jack_multiplier, overbid_penalty};
use core::fmt;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{Level, event};

/// How much of a round is reported through `tracing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    #[default]
    Silent,
    Scores,
    Verbose,
}

impl Verbosity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Verbosity::Silent => "silent",
            Verbosity::Scores => "scores",
            Verbosity::Verbose => "verbose",
        }
    }

    const fn events(self) -> bool {
        matches!(self, Verbosity::Verbose)
    }

    const fn scores(self) -> bool {
        !matches!(self, Verbosity::Silent)
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "silent" => Ok(Verbosity::Silent),
            "scores" => Ok(Verbosity::Scores),
            "verbose" => Ok(Verbosity::Verbose),
            other => Err(format!("unknown verbosity '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundPhase {
    Dealing,
    Bidding,
    Kitty,
    Discarding,
    Declaring,
    Valuation,
    Playing,
    Scoring,
    Finished,
}

impl RoundPhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            RoundPhase::Dealing => "dealing",
            RoundPhase::Bidding => "bidding",
            RoundPhase::Kitty => "kitty",
            RoundPhase::Discarding => "discarding",
            RoundPhase::Declaring => "declaring",
            RoundPhase::Valuation => "valuation",
            RoundPhase::Playing => "playing",
            RoundPhase::Scoring => "scoring",
            RoundPhase::Finished => "finished",
        }
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A strategy handed the round something it may not accept. Never repaired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    WrongPhase {
        expected: RoundPhase,
        actual: RoundPhase,
    },
    MissingContract,
    Bid(BidError),
    Declaration(DeclarationError),
    Trick(TrickError),
    CardNotInHand {
        seat: Seat,
        card: Card,
    },
    IllegalPlay {
        card: Card,
        required: Bucket,
    },
    DuplicateDiscard(Card),
    NullOverbid {
        bid: u16,
        value: u16,
    },
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractViolation::WrongPhase { expected, actual } => {
                write!(f, "expected the {expected} phase but the round is {actual}")
            }
            ContractViolation::MissingContract => {
                write!(f, "no declarer or declaration recorded yet")
            }
            ContractViolation::Bid(err) => write!(f, "illegal bid: {err}"),
            ContractViolation::Declaration(err) => write!(f, "illegal declaration: {err}"),
            ContractViolation::Trick(err) => write!(f, "illegal play: {err}"),
            ContractViolation::CardNotInHand { seat, card } => {
                write!(f, "{seat} does not hold {card}")
            }
            ContractViolation::IllegalPlay { card, required } => {
                write!(f, "{card} played while holding {required} to follow")
            }
            ContractViolation::DuplicateDiscard(card) => write!(f, "{card} discarded twice"),
            ContractViolation::NullOverbid { bid, value } => {
                write!(f, "null game worth {value} cannot cover a bid of {bid}")
            }
        }
    }
}

impl std::error::Error for ContractViolation {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContractViolation::Bid(err) => Some(err),
            ContractViolation::Declaration(err) => Some(err),
            ContractViolation::Trick(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BidError> for ContractViolation {
    fn from(err: BidError) -> Self {
        ContractViolation::Bid(err)
    }
}

impl From<DeclarationError> for ContractViolation {
    fn from(err: DeclarationError) -> Self {
        ContractViolation::Declaration(err)
    }
}

impl From<TrickError> for ContractViolation {
    fn from(err: TrickError) -> Self {
        ContractViolation::Trick(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    TrickCompleted { winner: Seat, points: u16 },
}

/// State of one deal from shuffle to score. Hands are private to their
/// seats; strategies see the round through [`RoundView`].
#[derive(Debug, Clone)]
pub struct Round {
    hands: [Hand; 3],
    kitty: Vec<Card>,
    auction: Auction,
    declarer: Option<Seat>,
    took_kitty: Option<bool>,
    declaration: Option<Declaration>,
    jack_multiplier: Option<u8>,
    overbid: Option<u16>,
    current_trick: Trick,
    trick_history: Vec<Trick>,
    declarer_pile: Vec<Card>,
    defender_pile: Vec<Card>,
    unplayed: Vec<Card>,
    play_history: Vec<Play>,
    scoring: Option<Scoring>,
    phase: RoundPhase,
    verbosity: Verbosity,
}

impl Round {
    pub fn new<S: Into<String>>(names: [S; 3], verbosity: Verbosity) -> Self {
        let [forehand, middlehand, rearhand] = names;
        Self {
            hands: [
                Hand::new(Seat::Forehand, forehand),
                Hand::new(Seat::Middlehand, middlehand),
                Hand::new(Seat::Rearhand, rearhand),
            ],
            kitty: Vec::with_capacity(KITTY_SIZE),
            auction: Auction::new(),
            declarer: None,
            took_kitty: None,
            declaration: None,
            jack_multiplier: None,
            overbid: None,
            current_trick: Trick::new(Seat::Forehand),
            trick_history: Vec::new(),
            declarer_pile: Vec::new(),
            defender_pile: Vec::new(),
            unplayed: Vec::new(),
            play_history: Vec::new(),
            scoring: None,
            phase: RoundPhase::Dealing,
            verbosity,
        }
    }

    pub fn generate_deck<R: rand::Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<(), ContractViolation> {
        self.deal(&Deck::shuffled(rng))
    }

    pub fn deal(&mut self, deck: &Deck) -> Result<(), ContractViolation> {
        self.expect_phase(RoundPhase::Dealing)?;
        let deal = deck.deal();
        for (hand, cards) in self.hands.iter_mut().zip(deal.hands) {
            hand.extend(cards);
        }
        self.kitty = deal.kitty.to_vec();
        self.unplayed = deck.cards().to_vec();
        self.phase = RoundPhase::Bidding;
        Ok(())
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn hands(&self) -> &[Hand; 3] {
        &self.hands
    }

    pub fn name(&self, seat: Seat) -> &str {
        self.hands[seat.index()].name()
    }

    pub fn kitty(&self) -> &[Card] {
        &self.kitty
    }

    pub fn auction(&self) -> &Auction {
        &self.auction
    }

    pub fn standing_bid(&self) -> u16 {
        self.auction.standing_bid()
    }

    pub fn bid_history(&self) -> &[BidRecord] {
        self.auction.history()
    }

    pub fn declarer(&self) -> Option<Seat> {
        self.declarer
    }

    pub fn took_kitty(&self) -> Option<bool> {
        self.took_kitty
    }

    pub fn declaration(&self) -> Option<&Declaration> {
        self.declaration.as_ref()
    }

    pub fn game_type(&self) -> Option<GameType> {
        self.declaration.as_ref().map(Declaration::game_type)
    }

    pub fn jack_multiplier(&self) -> Option<u8> {
        self.jack_multiplier
    }

    /// Penalty value when the declaration could not cover the bid.
    pub fn overbid(&self) -> Option<u16> {
        self.overbid
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn trick_history(&self) -> &[Trick] {
        &self.trick_history
    }

    pub fn declarer_pile(&self) -> &[Card] {
        &self.declarer_pile
    }

    pub fn defender_pile(&self) -> &[Card] {
        &self.defender_pile
    }

    /// Cards not yet played to a trick.
    pub fn unplayed(&self) -> &[Card] {
        &self.unplayed
    }

    pub fn play_history(&self) -> &[Play] {
        &self.play_history
    }

    pub fn scoring(&self) -> Option<&Scoring> {
        self.scoring.as_ref()
    }

    pub fn whose_turn(&self) -> Option<Seat> {
        match self.phase {
            RoundPhase::Bidding => self.auction.to_act(),
            RoundPhase::Kitty | RoundPhase::Discarding | RoundPhase::Declaring => self.declarer,
            RoundPhase::Playing => Some(self.current_trick.expected_seat()),
            _ => None,
        }
    }

    pub fn view(&self) -> RoundView<'_> {
        RoundView { round: self }
    }

    /// Cards `seat` may play into the current trick.
    pub fn legal_plays(&self, seat: Seat) -> Vec<Card> {
        let hand = &self.hands[seat.index()];
        match self.game_type() {
            Some(game_type) => legal_plays(hand, &self.current_trick, game_type),
            None => hand.cards(),
        }
    }

    /// Every card the round is holding, wherever it is.
    pub fn card_census(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.hands.iter().flat_map(Hand::cards).collect();
        cards.extend_from_slice(&self.kitty);
        cards.extend(self.current_trick.cards());
        cards.extend_from_slice(&self.declarer_pile);
        cards.extend_from_slice(&self.defender_pile);
        cards
    }

    pub fn submit_bid(
        &mut self,
        seat: Seat,
        bid: Bid,
    ) -> Result<Option<AuctionOutcome>, ContractViolation> {
        self.expect_phase(RoundPhase::Bidding)?;
        self.auction.submit(seat, bid)?;

        if self.verbosity.events() {
            event!(
                target: "skat_core::round",
                Level::INFO,
                player = self.name(seat),
                bid = %bid,
                standing = self.auction.standing_bid()
            );
        }

        let outcome = self.auction.outcome();
        match outcome {
            Some(AuctionOutcome::Declarer { seat, bid }) => {
                self.declarer = Some(seat);
                self.phase = RoundPhase::Kitty;
                if self.verbosity.events() {
                    event!(
                        target: "skat_core::round",
                        Level::INFO,
                        declarer = self.name(seat),
                        bid,
                        "auction won"
                    );
                }
            }
            Some(AuctionOutcome::NoBid) => {
                self.phase = RoundPhase::Finished;
                if self.verbosity.scores() {
                    event!(target: "skat_core::round", Level::INFO, "no one bid");
                }
            }
            None => {}
        }
        Ok(outcome)
    }

    /// Taking the kitty moves both cards into the declarer's hand; skipping
    /// leaves them where they are and later records `NoKitty`.
    pub fn resolve_kitty(&mut self, take: bool) -> Result<(), ContractViolation> {
        self.expect_phase(RoundPhase::Kitty)?;
        let declarer = self.declarer.ok_or(ContractViolation::MissingContract)?;
        self.took_kitty = Some(take);

        if take {
            let kitty = std::mem::take(&mut self.kitty);
            self.hands[declarer.index()].extend(kitty);
            self.phase = RoundPhase::Discarding;
        } else {
            self.phase = RoundPhase::Declaring;
        }

        if self.verbosity.events() {
            event!(
                target: "skat_core::round",
                Level::INFO,
                declarer = self.name(declarer),
                takes_kitty = take
            );
        }
        Ok(())
    }

    pub fn discard(&mut self, cards: [Card; KITTY_SIZE]) -> Result<(), ContractViolation> {
        self.expect_phase(RoundPhase::Discarding)?;
        let declarer = self.declarer.ok_or(ContractViolation::MissingContract)?;
        if cards[0] == cards[1] {
            return Err(ContractViolation::DuplicateDiscard(cards[0]));
        }

        let hand = &mut self.hands[declarer.index()];
        if let Some(card) = cards.iter().copied().find(|card| !hand.contains(*card)) {
            return Err(ContractViolation::CardNotInHand {
                seat: declarer,
                card,
            });
        }
        for card in cards {
            hand.remove(card);
        }
        self.kitty = cards.to_vec();
        self.phase = RoundPhase::Declaring;
        Ok(())
    }

    pub fn declare(
        &mut self,
        game_type: GameType,
        modifiers: &[Modifier],
    ) -> Result<&Declaration, ContractViolation> {
        self.expect_phase(RoundPhase::Declaring)?;
        let declarer = self.declarer.ok_or(ContractViolation::MissingContract)?;
        let skipped_kitty = self.took_kitty == Some(false);
        let declaration = Declaration::new(game_type, skipped_kitty, modifiers)?;

        let bid = self.auction.standing_bid();
        if game_type.is_null() {
            let value = game_value(&declaration, false, 0);
            if bid > value {
                return Err(ContractViolation::NullOverbid { bid, value });
            }
        }

        if self.verbosity.events() {
            event!(
                target: "skat_core::round",
                Level::INFO,
                declarer = self.name(declarer),
                declaration = %declaration
            );
        }

        self.phase = RoundPhase::Valuation;
        Ok(self.declaration.insert(declaration))
    }

    /// Sort every hand for the declared game, fix the jack multiplier from
    /// the declarer's hand plus the kitty, and test the bid against the
    /// optimistic game value. Returns the penalty value on an overbid, which
    /// ends the round.
    pub fn check_overbid(&mut self) -> Result<Option<u16>, ContractViolation> {
        self.expect_phase(RoundPhase::Valuation)?;
        let declarer = self.declarer.ok_or(ContractViolation::MissingContract)?;
        let declaration = self
            .declaration
            .as_ref()
            .ok_or(ContractViolation::MissingContract)?;
        let game_type = declaration.game_type();

        for hand in self.hands.iter_mut() {
            hand.reorganize(game_type);
        }

        let mut held = self.hands[declarer.index()].trumps().to_vec();
        held.extend(self.kitty.iter().copied().filter(|card| game_type.is_trump(*card)));
        let multiplier = jack_multiplier(&held, game_type);

        let bid = self.auction.standing_bid();
        let value = game_value(declaration, false, multiplier.unwrap_or(0));
        debug_assert!(!game_type.is_null() || bid <= value);
        let penalty = overbid_penalty(bid, game_type, value);

        if self.verbosity.events() {
            for hand in &self.hands {
                event!(target: "skat_core::round", Level::INFO, hand = %hand);
            }
            event!(
                target: "skat_core::round",
                Level::INFO,
                jack_multiplier = ?multiplier,
                value,
                bid
            );
        }

        self.jack_multiplier = multiplier;
        match penalty {
            Some(penalty) => {
                self.overbid = Some(penalty);
                self.phase = RoundPhase::Finished;
                if self.verbosity.scores() {
                    event!(
                        target: "skat_core::round",
                        Level::INFO,
                        declarer = self.name(declarer),
                        bid,
                        penalty,
                        score = -2 * i32::from(penalty),
                        "overbid"
                    );
                }
            }
            None => {
                self.current_trick = Trick::new(declarer);
                self.phase = RoundPhase::Playing;
            }
        }
        Ok(penalty)
    }

    /// Play `card` for `seat`. A third card resolves the trick on the spot and
    /// hands the lead to its winner.
    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<PlayOutcome, ContractViolation> {
        self.expect_phase(RoundPhase::Playing)?;
        let declarer = self.declarer.ok_or(ContractViolation::MissingContract)?;
        let game_type = self.game_type().ok_or(ContractViolation::MissingContract)?;

        let expected = self.current_trick.expected_seat();
        if expected != seat {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: seat,
            }
            .into());
        }
        if !self.hands[seat.index()].contains(card) {
            return Err(ContractViolation::CardNotInHand { seat, card });
        }
        if let Some(required) = self.current_trick.led_bucket(game_type) {
            if !self.legal_plays(seat).contains(&card) {
                return Err(ContractViolation::IllegalPlay { card, required });
            }
        }

        self.current_trick.play(seat, card)?;
        self.hands[seat.index()].remove(card);
        self.unplayed.retain(|&c| c != card);
        self.play_history.push(Play { seat, card });

        if !self.current_trick.is_complete() {
            return Ok(PlayOutcome::Played);
        }

        let leader = self.current_trick.leader();
        let winner = self.current_trick.winner(game_type).unwrap_or(leader);
        let finished = std::mem::replace(&mut self.current_trick, Trick::new(winner));
        let points = finished.points();
        let pile = if winner == declarer {
            &mut self.declarer_pile
        } else {
            &mut self.defender_pile
        };
        pile.extend(finished.cards());

        if self.verbosity.events() {
            let cards = finished
                .cards()
                .iter()
                .map(Card::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            event!(
                target: "skat_core::round",
                Level::INFO,
                leader = self.name(leader),
                cards = %cards,
                winner = self.name(winner),
                points
            );
        }

        self.trick_history.push(finished);
        if self.hands.iter().all(Hand::is_empty) {
            self.phase = RoundPhase::Scoring;
        }
        debug_assert_eq!(self.card_census().len(), DECK_SIZE);
        Ok(PlayOutcome::TrickCompleted { winner, points })
    }

    /// Tag the declaration with its outcomes and settle the declarer's score.
    pub fn score(&mut self) -> Result<Scoring, ContractViolation> {
        self.expect_phase(RoundPhase::Scoring)?;
        let declarer = self.declarer.ok_or(ContractViolation::MissingContract)?;
        let bid = self.auction.standing_bid();
        let multiplier = self.jack_multiplier.unwrap_or(0);
        let declaration = self
            .declaration
            .as_mut()
            .ok_or(ContractViolation::MissingContract)?;

        let scoring = score_round(
            declaration,
            &self.declarer_pile,
            &self.defender_pile,
            bid,
            multiplier,
        );

        if self.verbosity.scores() {
            event!(
                target: "skat_core::round",
                Level::INFO,
                declarer = self.hands[declarer.index()].name(),
                declaration = %declaration,
                points = scoring.points,
                score = scoring.score
            );
        }

        self.scoring = Some(scoring);
        self.phase = RoundPhase::Finished;
        Ok(scoring)
    }

    /// Declarer's signed result so far; zero until the round settles.
    pub fn declarer_score(&self) -> i32 {
        if let Some(scoring) = &self.scoring {
            scoring.score
        } else if let Some(penalty) = self.overbid {
            -2 * i32::from(penalty)
        } else {
            0
        }
    }

    /// Per-seat ledger for this round: defenders always score zero.
    pub fn scores(&self) -> [i32; 3] {
        let mut scores = [0; 3];
        if let Some(declarer) = self.declarer {
            scores[declarer.index()] = self.declarer_score();
        }
        scores
    }

    pub(crate) fn expect_phase(&self, expected: RoundPhase) -> Result<(), ContractViolation> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(ContractViolation::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }
}

/// Public information about a round, as one seat sees it.
#[derive(Debug, Clone, Copy)]
pub struct RoundView<'a> {
    round: &'a Round,
}

impl<'a> RoundView<'a> {
    pub fn phase(&self) -> RoundPhase {
        self.round.phase
    }

    pub fn name(&self, seat: Seat) -> &'a str {
        self.round.name(seat)
    }

    pub fn standing_bid(&self) -> u16 {
        self.round.auction.standing_bid()
    }

    pub fn bid_history(&self) -> &'a [BidRecord] {
        self.round.auction.history()
    }

    pub fn last_bid(&self) -> Option<Bid> {
        self.round.auction.last_bid()
    }

    pub fn declarer(&self) -> Option<Seat> {
        self.round.declarer
    }

    pub fn took_kitty(&self) -> Option<bool> {
        self.round.took_kitty
    }

    pub fn declaration(&self) -> Option<&'a Declaration> {
        self.round.declaration.as_ref()
    }

    pub fn game_type(&self) -> Option<GameType> {
        self.round.game_type()
    }

    pub fn jack_multiplier(&self) -> Option<u8> {
        self.round.jack_multiplier
    }

    pub fn current_trick(&self) -> &'a Trick {
        &self.round.current_trick
    }

    pub fn trick_history(&self) -> &'a [Trick] {
        &self.round.trick_history
    }

    pub fn play_history(&self) -> &'a [Play] {
        &self.round.play_history
    }

    pub fn unplayed(&self) -> &'a [Card] {
        &self.round.unplayed
    }

    pub fn whose_turn(&self) -> Option<Seat> {
        self.round.whose_turn()
    }

    /// Cards from `hand` that may be played into the current trick.
    pub fn legal_plays(&self, hand: &Hand) -> Vec<Card> {
        match self.round.game_type() {
            Some(game_type) => legal_plays(hand, &self.round.current_trick, game_type),
            None => hand.cards(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ContractViolation, PlayOutcome, Round, RoundPhase, Verbosity};
    use crate::model::bidding::{AuctionOutcome, Bid, BidError};
    use crate::model::card::Card;
    use crate::model::deck::{DECK_SIZE, Deck};
    use crate::model::game_type::GameType;
    use crate::model::hand::Bucket;
    use crate::model::seat::Seat;
    use crate::model::suit::Suit;
    use crate::model::trick::TrickError;

    fn cards(list: &[&str]) -> Vec<Card> {
        list.iter().map(|c| c.parse().unwrap()).collect()
    }

    fn card(text: &str) -> Card {
        text.parse().unwrap()
    }

    fn dealt(deck: &Deck) -> Round {
        let mut round = Round::new(["Ann", "Bea", "Cid"], Verbosity::Silent);
        round.deal(deck).unwrap();
        round
    }

    /// Middlehand and rearhand pass, forehand opens at 18.
    fn forehand_declares(round: &mut Round) {
        round.submit_bid(Seat::Middlehand, Bid::Pass).unwrap();
        round.submit_bid(Seat::Rearhand, Bid::Pass).unwrap();
        let outcome = round.submit_bid(Seat::Forehand, Bid::Raise(18)).unwrap();
        assert_eq!(
            outcome,
            Some(AuctionOutcome::Declarer {
                seat: Seat::Forehand,
                bid: 18
            })
        );
    }

    #[test]
    fn dealing_gives_ten_cards_each_and_a_kitty() {
        let round = dealt(&Deck::shuffled_with_seed(3));
        for seat in Seat::LOOP {
            assert_eq!(round.hand(seat).len(), 10, "{seat} should hold 10 cards");
        }
        assert_eq!(round.kitty().len(), 2);
        assert_eq!(round.unplayed().len(), DECK_SIZE);
        assert_eq!(round.phase(), RoundPhase::Bidding);
        assert_eq!(round.whose_turn(), Some(Seat::Middlehand));
    }

    #[test]
    fn dealing_twice_is_rejected() {
        let deck = Deck::standard();
        let mut round = dealt(&deck);
        assert_eq!(
            round.deal(&deck).unwrap_err(),
            ContractViolation::WrongPhase {
                expected: RoundPhase::Dealing,
                actual: RoundPhase::Bidding
            }
        );
    }

    #[test]
    fn three_passes_finish_without_scores() {
        let mut round = dealt(&Deck::standard());
        round.submit_bid(Seat::Middlehand, Bid::Pass).unwrap();
        round.submit_bid(Seat::Rearhand, Bid::Pass).unwrap();
        let outcome = round.submit_bid(Seat::Forehand, Bid::Pass).unwrap();
        assert_eq!(outcome, Some(AuctionOutcome::NoBid));
        assert_eq!(round.phase(), RoundPhase::Finished);
        assert_eq!(round.scores(), [0, 0, 0]);
    }

    #[test]
    fn bidding_errors_surface_as_violations() {
        let mut round = dealt(&Deck::standard());
        round.submit_bid(Seat::Middlehand, Bid::Raise(18)).unwrap();
        assert_eq!(
            round.submit_bid(Seat::Forehand, Bid::Raise(20)).unwrap_err(),
            ContractViolation::Bid(BidError::ConsecutiveRaises {
                previous: 18,
                bid: 20
            })
        );
    }

    #[test]
    fn taking_the_kitty_requires_two_discards() {
        let deck = Deck::arranged([&cards(&["JC"]), &[], &[]], &cards(&["7D", "7S"])).unwrap();
        let mut round = dealt(&deck);
        forehand_declares(&mut round);
        round.resolve_kitty(true).unwrap();
        assert_eq!(round.hand(Seat::Forehand).len(), 12);
        assert!(round.kitty().is_empty());
        assert_eq!(round.card_census().len(), DECK_SIZE);

        assert_eq!(
            round.discard([card("7D"), card("7D")]).unwrap_err(),
            ContractViolation::DuplicateDiscard(card("7D"))
        );
        let foreign = round.hand(Seat::Middlehand).cards()[0];
        assert_eq!(
            round.discard([card("7D"), foreign]).unwrap_err(),
            ContractViolation::CardNotInHand {
                seat: Seat::Forehand,
                card: foreign
            }
        );
        assert_eq!(round.hand(Seat::Forehand).len(), 12);

        round.discard([card("7D"), card("7S")]).unwrap();
        assert_eq!(round.hand(Seat::Forehand).len(), 10);
        assert_eq!(round.kitty(), cards(&["7D", "7S"]).as_slice());
        assert_eq!(round.phase(), RoundPhase::Declaring);
    }

    #[test]
    fn skipping_the_kitty_goes_straight_to_declaring() {
        let mut round = dealt(&Deck::standard());
        forehand_declares(&mut round);
        round.resolve_kitty(false).unwrap();
        assert_eq!(round.phase(), RoundPhase::Declaring);
        let declaration = round.declare(GameType::Grand, &[]).unwrap();
        assert_eq!(declaration.to_string(), "grand, no kitty");
    }

    #[test]
    fn null_declaration_must_cover_the_bid() {
        let mut round = dealt(&Deck::standard());
        round.submit_bid(Seat::Middlehand, Bid::Raise(24)).unwrap();
        round.submit_bid(Seat::Forehand, Bid::Pass).unwrap();
        round.submit_bid(Seat::Rearhand, Bid::Pass).unwrap();
        assert_eq!(round.declarer(), Some(Seat::Middlehand));
        round.resolve_kitty(true).unwrap();
        let held = round.hand(Seat::Middlehand).cards();
        round.discard([held[0], held[1]]).unwrap();
        assert_eq!(
            round.declare(GameType::Null, &[]).unwrap_err(),
            ContractViolation::NullOverbid { bid: 24, value: 23 }
        );
    }

    #[test]
    fn overbid_ends_the_round_before_play() {
        // Holding the top jack but not the second: multiplier 1.
        let deck = Deck::arranged(
            [&cards(&["JC", "AD", "10D", "KD"]), &cards(&["JS"]), &[]],
            &cards(&["7S", "8S"]),
        )
        .unwrap();
        let mut round = dealt(&deck);
        round.submit_bid(Seat::Middlehand, Bid::Pass).unwrap();
        round.submit_bid(Seat::Rearhand, Bid::Pass).unwrap();
        round.submit_bid(Seat::Forehand, Bid::Raise(60)).unwrap();
        round.resolve_kitty(false).unwrap();
        round.declare(GameType::Suit(Suit::Diamonds), &[]).unwrap();
        // Skipping the kitty adds one: 9 * (1 + 1 + 1) = 27, still short of 60.
        assert_eq!(round.check_overbid().unwrap(), Some(63));
        assert_eq!(round.jack_multiplier(), Some(1));
        assert_eq!(round.phase(), RoundPhase::Finished);
        assert_eq!(round.scores(), [-126, 0, 0]);
    }

    #[test]
    fn play_is_checked_for_turn_custody_and_suit() {
        let deck = Deck::arranged(
            [
                &cards(&["AS", "7D"]),
                &cards(&["KS", "8D"]),
                &cards(&["QS", "9D"]),
            ],
            &[],
        )
        .unwrap();
        let mut round = dealt(&deck);
        forehand_declares(&mut round);
        round.resolve_kitty(false).unwrap();
        round.declare(GameType::Grand, &[]).unwrap();
        assert_eq!(round.check_overbid().unwrap(), None);
        assert_eq!(round.whose_turn(), Some(Seat::Forehand));

        assert_eq!(
            round.play_card(Seat::Middlehand, card("KS")).unwrap_err(),
            ContractViolation::Trick(TrickError::OutOfTurn {
                expected: Seat::Forehand,
                actual: Seat::Middlehand
            })
        );
        assert_eq!(
            round.play_card(Seat::Forehand, card("KS")).unwrap_err(),
            ContractViolation::CardNotInHand {
                seat: Seat::Forehand,
                card: card("KS")
            }
        );

        assert_eq!(
            round.play_card(Seat::Forehand, card("AS")).unwrap(),
            PlayOutcome::Played
        );
        assert_eq!(
            round.play_card(Seat::Middlehand, card("8D")).unwrap_err(),
            ContractViolation::IllegalPlay {
                card: card("8D"),
                required: Bucket::Suit(Suit::Spades)
            }
        );
        round.play_card(Seat::Middlehand, card("KS")).unwrap();
        let outcome = round.play_card(Seat::Rearhand, card("QS")).unwrap();
        assert_eq!(
            outcome,
            PlayOutcome::TrickCompleted {
                winner: Seat::Forehand,
                points: 18
            }
        );
        assert_eq!(round.declarer_pile().len(), 3);
        assert_eq!(round.current_trick().leader(), Seat::Forehand);
        assert_eq!(round.unplayed().len(), DECK_SIZE - 3);
        assert_eq!(round.card_census().len(), DECK_SIZE);
    }

    #[test]
    fn verbosity_parses_case_insensitively() {
        assert_eq!("Verbose".parse::<Verbosity>().unwrap(), Verbosity::Verbose);
        assert_eq!("scores".parse::<Verbosity>().unwrap(), Verbosity::Scores);
        assert!("loud".parse::<Verbosity>().is_err());
    }
}
