use crate::model::seat::Seat;
use core::fmt;
use serde::{Deserialize, Serialize};

pub const LEGAL_BIDS: [u16; 20] = [
    18, 20, 22, 23, 24, 27, 30, 33, 35, 36, 40, 44, 45, 46, 48, 50, 54, 55, 59, 60,
];
pub const MIN_BID: u16 = LEGAL_BIDS[0];
/// Standing bid before anyone has raised.
pub const OPENING_BID: u16 = MIN_BID - 1;

/// A single auction response. `Hold` accepts the standing bid, `Pass` drops out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bid {
    Pass,
    Hold,
    Raise(u16),
}

impl Bid {
    pub const fn is_raise(self) -> bool {
        matches!(self, Bid::Raise(_))
    }

    pub const fn is_pass(self) -> bool {
        matches!(self, Bid::Pass)
    }
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bid::Pass => f.write_str("pass"),
            Bid::Hold => f.write_str("hold"),
            Bid::Raise(value) => write!(f, "{value}"),
        }
    }
}

pub fn is_legal_bid(value: u16) -> bool {
    LEGAL_BIDS.contains(&value)
}

/// Smallest legal bid strictly above `bid`.
pub fn next_legal_bid(bid: u16) -> Option<u16> {
    LEGAL_BIDS.iter().copied().find(|&value| value > bid)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidRecord {
    pub seat: Seat,
    pub bid: Bid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuctionOutcome {
    Declarer { seat: Seat, bid: u16 },
    NoBid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Middlehand says, forehand answers.
    Opening { turn: Seat },
    /// Rearhand says, the survivor of the opening answers.
    Closing { advancer: Seat, turn: Seat },
    /// Nobody has bid and rearhand passed: the advancer gets one offer.
    LastChance { advancer: Seat },
    Done(AuctionOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BidError {
    AuctionClosed,
    OutOfTurn { expected: Seat, actual: Seat },
    ConsecutiveRaises { previous: u16, bid: u16 },
    NotARaise { bid: u16, standing: u16 },
    IllegalValue(u16),
}

impl fmt::Display for BidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BidError::AuctionClosed => write!(f, "auction is already settled"),
            BidError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to bid next but got {actual}")
            }
            BidError::ConsecutiveRaises { previous, bid } => {
                write!(f, "raise to {bid} must answer the raise to {previous} first")
            }
            BidError::NotARaise { bid, standing } => {
                write!(f, "bid {bid} does not exceed the standing bid {standing}")
            }
            BidError::IllegalValue(value) => write!(f, "{value} is not a legal bid"),
        }
    }
}

impl std::error::Error for BidError {}

/// Turn-ordered auction. Validates every response and tracks the standing bid.
#[derive(Debug, Clone)]
pub struct Auction {
    standing: u16,
    history: Vec<BidRecord>,
    stage: Stage,
}

impl Auction {
    pub fn new() -> Self {
        Self {
            standing: OPENING_BID,
            history: Vec::new(),
            stage: Stage::Opening {
                turn: Seat::Middlehand,
            },
        }
    }

    pub fn standing_bid(&self) -> u16 {
        self.standing
    }

    pub fn has_bid(&self) -> bool {
        self.standing >= MIN_BID
    }

    pub fn history(&self) -> &[BidRecord] {
        &self.history
    }

    pub fn last_bid(&self) -> Option<Bid> {
        self.history.last().map(|record| record.bid)
    }

    /// Seat expected to respond next, or `None` once the auction is settled.
    pub fn to_act(&self) -> Option<Seat> {
        match self.stage {
            Stage::Opening { turn } | Stage::Closing { turn, .. } => Some(turn),
            Stage::LastChance { advancer } => Some(advancer),
            Stage::Done(_) => None,
        }
    }

    pub fn outcome(&self) -> Option<AuctionOutcome> {
        match self.stage {
            Stage::Done(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn submit(&mut self, seat: Seat, bid: Bid) -> Result<(), BidError> {
        let expected = self.to_act().ok_or(BidError::AuctionClosed)?;
        if expected != seat {
            return Err(BidError::OutOfTurn {
                expected,
                actual: seat,
            });
        }
        self.check(bid)?;

        if let Bid::Raise(value) = bid {
            self.standing = value;
        }
        self.history.push(BidRecord { seat, bid });
        self.stage = self.advance(bid);
        Ok(())
    }

    fn check(&self, bid: Bid) -> Result<(), BidError> {
        let Bid::Raise(value) = bid else {
            return Ok(());
        };
        if let Some(Bid::Raise(previous)) = self.last_bid() {
            return Err(BidError::ConsecutiveRaises {
                previous,
                bid: value,
            });
        }
        if value <= self.standing {
            return Err(BidError::NotARaise {
                bid: value,
                standing: self.standing,
            });
        }
        if !is_legal_bid(value) {
            return Err(BidError::IllegalValue(value));
        }
        Ok(())
    }

    fn advance(&self, bid: Bid) -> Stage {
        match self.stage {
            Stage::Opening { turn } => {
                let other = match turn {
                    Seat::Middlehand => Seat::Forehand,
                    _ => Seat::Middlehand,
                };
                if bid.is_pass() {
                    Stage::Closing {
                        advancer: other,
                        turn: Seat::Rearhand,
                    }
                } else {
                    Stage::Opening { turn: other }
                }
            }
            Stage::Closing { advancer, turn } if turn == Seat::Rearhand => {
                if !bid.is_pass() {
                    Stage::Closing {
                        advancer,
                        turn: advancer,
                    }
                } else if self.has_bid() {
                    self.settle(advancer)
                } else {
                    Stage::LastChance { advancer }
                }
            }
            Stage::Closing { advancer, .. } => {
                if !bid.is_pass() {
                    Stage::Closing {
                        advancer,
                        turn: Seat::Rearhand,
                    }
                } else if self.has_bid() {
                    self.settle(Seat::Rearhand)
                } else {
                    Stage::Done(AuctionOutcome::NoBid)
                }
            }
            Stage::LastChance { advancer } if bid.is_raise() => self.settle(advancer),
            Stage::LastChance { .. } => Stage::Done(AuctionOutcome::NoBid),
            Stage::Done(outcome) => Stage::Done(outcome),
        }
    }

    fn settle(&self, seat: Seat) -> Stage {
        Stage::Done(AuctionOutcome::Declarer {
            seat,
            bid: self.standing,
        })
    }
}

impl Default for Auction {
    fn default() -> Self {
        Self::new()
    }
}
