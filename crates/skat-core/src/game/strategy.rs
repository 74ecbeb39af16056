use crate::model::bidding::Bid;
use crate::model::card::Card;
use crate::model::declaration::Modifier;
use crate::model::game_type::GameType;
use crate::model::hand::Hand;
use crate::model::round::RoundView;
use crate::model::seat::Seat;

/// Context handed to a strategy for one decision.
pub struct StrategyContext<'a> {
    pub seat: Seat,
    pub hand: &'a Hand,
    pub round: RoundView<'a>,
}

impl StrategyContext<'_> {
    /// Legal cards for this seat in the current trick.
    pub fn legal_plays(&self) -> Vec<Card> {
        self.round.legal_plays(self.hand)
    }

    pub fn is_declarer(&self) -> bool {
        self.round.declarer() == Some(self.seat)
    }
}

/// A declarer's announcement: the game and any extras on top of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameChoice {
    pub game_type: GameType,
    pub modifiers: Vec<Modifier>,
}

impl GameChoice {
    pub fn plain(game_type: GameType) -> Self {
        Self {
            game_type,
            modifiers: Vec::new(),
        }
    }

    pub fn with(game_type: GameType, modifiers: &[Modifier]) -> Self {
        Self {
            game_type,
            modifiers: modifiers.to_vec(),
        }
    }
}

/// Decision-making for one seat. The round validates every answer and
/// fails the round on an illegal one.
pub trait Strategy: Send {
    /// Called each time the auction reaches this seat.
    fn bid(&mut self, ctx: &StrategyContext) -> Bid;

    /// `true` to pick up the kitty.
    fn kitty(&mut self, ctx: &StrategyContext) -> bool;

    /// Two distinct cards from the twelve held after the pickup.
    fn discard(&mut self, ctx: &StrategyContext) -> [Card; 2];

    fn declare(&mut self, ctx: &StrategyContext) -> GameChoice;

    /// Must be one of `ctx.legal_plays()`.
    fn play(&mut self, ctx: &StrategyContext) -> Card;
}
