use super::driver::{RoundOutcome, RoundResult};
use crate::model::bidding::BidRecord;
use crate::model::round::Round;
use crate::model::seat::Seat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayRecord {
    pub seat: Seat,
    pub card: String,
}

/// Everything worth keeping from a finished round, with cards and the
/// declaration rendered as text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundRecord {
    pub players: [String; 3],
    pub declarer: Option<Seat>,
    pub bid: Option<u16>,
    #[serde(default)]
    pub took_kitty: Option<bool>,
    #[serde(default)]
    pub declaration: Vec<String>,
    #[serde(default)]
    pub jack_multiplier: Option<u8>,
    pub bids: Vec<BidRecord>,
    #[serde(default)]
    pub plays: Vec<PlayRecord>,
    pub outcome: RoundOutcome,
    pub scores: [i32; 3],
}

impl RoundRecord {
    pub fn capture(round: &Round, result: &RoundResult) -> Self {
        RoundRecord {
            players: Seat::LOOP.map(|seat| round.name(seat).to_string()),
            declarer: result.declarer,
            bid: result.declarer.map(|_| round.standing_bid()),
            took_kitty: round.took_kitty(),
            declaration: round
                .declaration()
                .map(|declaration| declaration.labels())
                .unwrap_or_default(),
            jack_multiplier: round.jack_multiplier(),
            bids: round.bid_history().to_vec(),
            plays: round
                .play_history()
                .iter()
                .map(|play| PlayRecord {
                    seat: play.seat,
                    card: play.card.to_string(),
                })
                .collect(),
            outcome: result.outcome,
            scores: result.scores,
        }
    }

    pub fn to_json(round: &Round, result: &RoundResult) -> serde_json::Result<String> {
        let record = Self::capture(round, result);
        serde_json::to_string_pretty(&record)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
