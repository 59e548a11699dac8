//! Plinko with fixed-odds payout tables.

use crate::errors::{FairdrawResult, GameParameterError};
use crate::games::seed_engine::RollStream;
use crate::games::types::{GameDetails, GameResult};
use crate::money::{Amount, Multiplier};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlinkoRisk {
    Low,
    Medium,
    High,
}

impl fmt::Display for PlinkoRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlinkoRisk::Low => write!(f, "low"),
            PlinkoRisk::Medium => write!(f, "medium"),
            PlinkoRisk::High => write!(f, "high"),
        }
    }
}

pub const SUPPORTED_ROWS: [u8; 3] = [8, 12, 16];

// Multipliers in hundredths, indexed by slot (number of right bounces).
// These encode the house edge; do not edit.
const ROWS_8_LOW: [u64; 9] = [560, 210, 110, 100, 50, 100, 110, 210, 560];
const ROWS_8_MEDIUM: [u64; 9] = [1300, 300, 130, 70, 40, 70, 130, 300, 1300];
const ROWS_8_HIGH: [u64; 9] = [2900, 400, 150, 30, 20, 30, 150, 400, 2900];

const ROWS_12_LOW: [u64; 13] = [1000, 300, 160, 140, 110, 100, 50, 100, 110, 140, 160, 300, 1000];
const ROWS_12_MEDIUM: [u64; 13] = [3300, 1100, 400, 200, 110, 60, 30, 60, 110, 200, 400, 1100, 3300];
const ROWS_12_HIGH: [u64; 13] = [17000, 2400, 810, 200, 70, 20, 20, 20, 70, 200, 810, 2400, 17000];

const ROWS_16_LOW: [u64; 17] = [
    1600, 900, 200, 140, 140, 120, 110, 100, 50, 100, 110, 120, 140, 140, 200, 900, 1600,
];
const ROWS_16_MEDIUM: [u64; 17] = [
    11000, 4100, 1000, 500, 300, 150, 100, 50, 30, 50, 100, 150, 300, 500, 1000, 4100, 11000,
];
const ROWS_16_HIGH: [u64; 17] = [
    100000, 13000, 2600, 900, 400, 200, 20, 20, 20, 20, 20, 200, 400, 900, 2600, 13000, 100000,
];

/// Payout table for a board, in hundredths per slot
pub fn payout_table(rows: u8, risk: PlinkoRisk) -> Result<&'static [u64], GameParameterError> {
    let table: &'static [u64] = match (rows, risk) {
        (8, PlinkoRisk::Low) => &ROWS_8_LOW,
        (8, PlinkoRisk::Medium) => &ROWS_8_MEDIUM,
        (8, PlinkoRisk::High) => &ROWS_8_HIGH,
        (12, PlinkoRisk::Low) => &ROWS_12_LOW,
        (12, PlinkoRisk::Medium) => &ROWS_12_MEDIUM,
        (12, PlinkoRisk::High) => &ROWS_12_HIGH,
        (16, PlinkoRisk::Low) => &ROWS_16_LOW,
        (16, PlinkoRisk::Medium) => &ROWS_16_MEDIUM,
        (16, PlinkoRisk::High) => &ROWS_16_HIGH,
        _ => return Err(GameParameterError::InvalidPlinkoRows { rows }),
    };
    Ok(table)
}

/// One left/right draw per row
pub fn drop_ball(stream: &mut RollStream, rows: u8) -> Vec<bool> {
    (0..rows).map(|_| stream.next_below(2) == 1).collect()
}

pub fn play_plinko(
    bet: Amount,
    rows: u8,
    risk: PlinkoRisk,
    stream: &mut RollStream,
) -> FairdrawResult<GameResult> {
    let table = payout_table(rows, risk)?;
    let path = drop_ball(stream, rows);
    let slot = path.iter().filter(|&&right| right).count() as u8;
    let multiplier = Multiplier::from_hundredths(table[slot as usize]);

    GameResult::settle(
        bet,
        multiplier,
        GameDetails::Plinko {
            rows,
            risk,
            path,
            slot,
        },
    )
}
