pub mod bidding;
pub mod card;
pub mod declaration;
pub mod deck;
pub mod game_type;
pub mod hand;
pub mod rank;
pub mod round;
pub mod score;
pub mod seat;
pub mod suit;
pub mod trick;
pub mod valuation;
