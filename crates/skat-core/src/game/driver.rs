use crate::game::strategy::{Strategy, StrategyContext};
use crate::model::bidding::AuctionOutcome;
use crate::model::round::{ContractViolation, PlayOutcome, Round, RoundPhase};
use crate::model::seat::Seat;
use serde::{Deserialize, Serialize};

/// How a round ended. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoundOutcome {
    NoBid,
    Overbid { bid: u16, penalty: u16 },
    Completed { won: bool, points: u16, value: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub declarer: Option<Seat>,
    pub scores: [i32; 3],
    pub outcome: RoundOutcome,
}

impl RoundResult {
    pub fn declarer_score(&self) -> i32 {
        self.declarer
            .map(|seat| self.scores[seat.index()])
            .unwrap_or(0)
    }
}

impl Round {
    pub fn get_bid(
        &mut self,
        seat: Seat,
        strategy: &mut dyn Strategy,
    ) -> Result<Option<AuctionOutcome>, ContractViolation> {
        let bid = {
            let ctx = self.context(seat);
            strategy.bid(&ctx)
        };
        self.submit_bid(seat, bid)
    }

    pub fn get_kitty_decision(
        &mut self,
        strategy: &mut dyn Strategy,
    ) -> Result<bool, ContractViolation> {
        self.expect_phase(RoundPhase::Kitty)?;
        let declarer = self.declarer().ok_or(ContractViolation::MissingContract)?;
        let take = {
            let ctx = self.context(declarer);
            strategy.kitty(&ctx)
        };
        self.resolve_kitty(take)?;
        Ok(take)
    }

    pub fn get_kitty_discards(
        &mut self,
        strategy: &mut dyn Strategy,
    ) -> Result<(), ContractViolation> {
        self.expect_phase(RoundPhase::Discarding)?;
        let declarer = self.declarer().ok_or(ContractViolation::MissingContract)?;
        let cards = {
            let ctx = self.context(declarer);
            strategy.discard(&ctx)
        };
        self.discard(cards)
    }

    pub fn get_declaration(
        &mut self,
        strategy: &mut dyn Strategy,
    ) -> Result<(), ContractViolation> {
        self.expect_phase(RoundPhase::Declaring)?;
        let declarer = self.declarer().ok_or(ContractViolation::MissingContract)?;
        let choice = {
            let ctx = self.context(declarer);
            strategy.declare(&ctx)
        };
        self.declare(choice.game_type, &choice.modifiers)?;
        Ok(())
    }

    pub fn get_play(
        &mut self,
        seat: Seat,
        strategy: &mut dyn Strategy,
    ) -> Result<PlayOutcome, ContractViolation> {
        let card = {
            let ctx = self.context(seat);
            strategy.play(&ctx)
        };
        self.play_card(seat, card)
    }

    fn context(&self, seat: Seat) -> StrategyContext<'_> {
        StrategyContext {
            seat,
            hand: self.hand(seat),
            round: self.view(),
        }
    }
}

/// Drive a freshly dealt round to its end: auction, kitty, declaration,
/// overbid check, ten tricks and the score.
pub fn play_round(
    round: &mut Round,
    strategies: &mut [Box<dyn Strategy>; 3],
) -> Result<RoundResult, ContractViolation> {
    round.expect_phase(RoundPhase::Bidding)?;

    while round.phase() == RoundPhase::Bidding {
        let Some(seat) = round.whose_turn() else {
            break;
        };
        round.get_bid(seat, strategies[seat.index()].as_mut())?;
    }

    let Some(declarer) = round.declarer() else {
        return Ok(RoundResult {
            declarer: None,
            scores: [0; 3],
            outcome: RoundOutcome::NoBid,
        });
    };

    let strategy = strategies[declarer.index()].as_mut();
    if round.get_kitty_decision(strategy)? {
        round.get_kitty_discards(strategy)?;
    }
    round.get_declaration(strategy)?;

    if let Some(penalty) = round.check_overbid()? {
        return Ok(RoundResult {
            declarer: Some(declarer),
            scores: round.scores(),
            outcome: RoundOutcome::Overbid {
                bid: round.standing_bid(),
                penalty,
            },
        });
    }

    while round.phase() == RoundPhase::Playing {
        let Some(seat) = round.whose_turn() else {
            break;
        };
        round.get_play(seat, strategies[seat.index()].as_mut())?;
    }

    let scoring = round.score()?;
    Ok(RoundResult {
        declarer: Some(declarer),
        scores: round.scores(),
        outcome: RoundOutcome::Completed {
            won: scoring.won,
            points: scoring.points,
            value: scoring.value,
        },
    })
}
