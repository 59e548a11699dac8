//! Dice: roll under the target.

use crate::errors::{FairdrawResult, GameParameterError};
use crate::games::types::{GameDetails, GameResult, Roll};
use crate::money::{Amount, Multiplier};

pub const MIN_TARGET: Roll = Roll::from_hundredths(101);
pub const MAX_TARGET: Roll = Roll::from_hundredths(9_900);

/// `(100 / target) * (1 - edge)`, floored to whole micros.
pub fn dice_multiplier(target: Roll, edge_bps: u32) -> Result<Multiplier, GameParameterError> {
    if target < MIN_TARGET || target > MAX_TARGET {
        return Err(GameParameterError::InvalidDiceTarget {
            target: target.to_string(),
        });
    }
    let keep = 10_000u64.saturating_sub(edge_bps as u64);
    Ok(Multiplier::from_micros(
        keep * Multiplier::SCALE / target.hundredths() as u64,
    ))
}

/// Win iff `roll < target`. A roll equal to the target loses.
pub fn play_dice(bet: Amount, target: Roll, roll: Roll, edge_bps: u32) -> FairdrawResult<GameResult> {
    let multiplier = dice_multiplier(target, edge_bps)?;
    let details = GameDetails::Dice { roll, target };

    if roll < target {
        GameResult::settle(bet, multiplier, details)
    } else {
        Ok(GameResult::loss(details))
    }
}
