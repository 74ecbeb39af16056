//! Jack multiplier, game value and overbid rounding.

use crate::model::card::Card;
use crate::model::declaration::{Declaration, Modifier, Outcome};
use crate::model::game_type::GameType;

pub const NULL_VALUE: u16 = 23;
pub const NULL_NO_KITTY_VALUE: u16 = 35;
pub const NULL_REVEALS_VALUE: u16 = 46;
pub const NULL_NO_KITTY_REVEALS_VALUE: u16 = 59;

/// Length of the streak of trumps, counted from the top, that the declarer
/// either all holds or all lacks. A complete streak counts one extra.
/// Returns `None` for null, which has no trump.
pub fn jack_multiplier(held: &[Card], game_type: GameType) -> Option<u8> {
    let trumps = game_type.trumps();
    let top = *trumps.last()?;
    let top_held = held.contains(&top);
    let streak = trumps
        .iter()
        .rev()
        .take_while(|trump| held.contains(trump) == top_held)
        .count();
    let multiplier = if streak == trumps.len() {
        streak + 1
    } else {
        streak
    };
    Some(multiplier as u8)
}

pub const fn null_value(no_kitty: bool, reveals: bool) -> u16 {
    match (no_kitty, reveals) {
        (true, true) => NULL_NO_KITTY_REVEALS_VALUE,
        (true, false) => NULL_NO_KITTY_VALUE,
        (false, true) => NULL_REVEALS_VALUE,
        (false, false) => NULL_VALUE,
    }
}

/// Value of `declaration`. Before the round is over, announced calls are
/// assumed to succeed; afterwards only the recorded outcome tags count.
pub fn game_value(declaration: &Declaration, round_over: bool, jack_multiplier: u8) -> u16 {
    let game_type = declaration.game_type();
    let Some(base) = game_type.base_value() else {
        return null_value(
            declaration.has(Modifier::NoKitty),
            declaration.has(Modifier::Reveals),
        );
    };

    let mut multiplier = 1 + u16::from(jack_multiplier);
    multiplier += declaration.modifiers().len() as u16;
    multiplier += declaration.outcomes().len() as u16;

    if !round_over {
        if declaration.has(Modifier::CallsThreeQuarters)
            && !declaration.has_outcome(Outcome::TakesThreeQuarters)
        {
            multiplier += 1;
        }
        if declaration.has(Modifier::CallsEverything)
            && !declaration.has_outcome(Outcome::TakesEverything)
        {
            multiplier += 1;
        }
    }

    base * multiplier
}

/// Next multiple of `base` at or above `bid`.
pub const fn round_up_overbid(bid: u16, base: u16) -> u16 {
    bid.div_ceil(base) * base
}

/// Penalty value if `bid` exceeds `value`; null games never round.
pub fn overbid_penalty(bid: u16, game_type: GameType, value: u16) -> Option<u16> {
    if bid <= value {
        return None;
    }
    game_type.base_value().map(|base| round_up_overbid(bid, base))
}
