//! Crash: the curve stops at a seeded crash point, the player's auto cash-out
//! wins if it is at or below that point.

use crate::errors::{FairdrawResult, GameParameterError};
use crate::games::types::{GameDetails, GameResult, Roll};
use crate::money::{Amount, Multiplier};

pub const MIN_CRASH_POINT: Multiplier = Multiplier::from_hundredths(101);
pub const MAX_CRASH_POINT: Multiplier = Multiplier::from_whole(1_000);

const MAX_ROLL: u32 = 9_999;

/// `0.01 + 99.99 / (100 - roll)`, with the roll clamped to 99.99 and the result
/// clamped to `[1.01, 1000]`.
pub fn crash_point(roll: Roll) -> Multiplier {
    let r = roll.hundredths().min(MAX_ROLL) as u64;
    // 99.99 / ((10000 - r) / 100) == 9999 / (10000 - r)
    let micros = 10_000 + 9_999 * Multiplier::SCALE / (10_000 - r);
    Multiplier::from_micros(micros).clamp(MIN_CRASH_POINT, MAX_CRASH_POINT)
}

pub fn play_crash(bet: Amount, cashout: Multiplier, roll: Roll) -> FairdrawResult<GameResult> {
    if cashout < MIN_CRASH_POINT || cashout > MAX_CRASH_POINT {
        return Err(GameParameterError::InvalidCashout {
            cashout: cashout.to_string(),
        }
        .into());
    }

    let point = crash_point(roll);
    let details = GameDetails::Crash {
        roll,
        crash_point: point,
        cashout,
    };

    if cashout <= point {
        GameResult::settle(bet, cashout, details)
    } else {
        Ok(GameResult::loss(details))
    }
}
