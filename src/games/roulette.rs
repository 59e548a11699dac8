//! European single-zero roulette.

use crate::errors::{FairdrawResult, GameParameterError};
use crate::games::seed_engine::RollStream;
use crate::games::types::{GameDetails, GameResult};
use crate::money::{Amount, Multiplier};
use serde::{Deserialize, Serialize};

pub const POCKETS: u8 = 37;

const RED_NUMBERS: [u8; 18] = [1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RouletteColor {
    Green,
    Red,
    Black,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RouletteBet {
    Straight(u8),
    Red,
    Black,
    Odd,
    Even,
    /// 1-18
    Low,
    /// 19-36
    High,
    /// 1 = 1-12, 2 = 13-24, 3 = 25-36
    Dozen(u8),
    /// 1 = 1, 4, 7, ... 34
    Column(u8),
}

impl RouletteBet {
    fn validate(self) -> Result<(), GameParameterError> {
        match self {
            RouletteBet::Straight(n) if n >= POCKETS => {
                Err(GameParameterError::InvalidRouletteNumber { number: n })
            }
            RouletteBet::Dozen(i) if !(1..=3).contains(&i) => {
                Err(GameParameterError::InvalidRouletteGroup { kind: "dozen", index: i })
            }
            RouletteBet::Column(i) if !(1..=3).contains(&i) => {
                Err(GameParameterError::InvalidRouletteGroup { kind: "column", index: i })
            }
            _ => Ok(()),
        }
    }

    /// Total return including the stake
    pub fn multiplier(self) -> Multiplier {
        match self {
            RouletteBet::Straight(_) => Multiplier::from_whole(36),
            RouletteBet::Dozen(_) | RouletteBet::Column(_) => Multiplier::from_whole(3),
            _ => Multiplier::from_whole(2),
        }
    }

    pub fn covers(self, number: u8) -> bool {
        if number == 0 {
            return self == RouletteBet::Straight(0);
        }
        match self {
            RouletteBet::Straight(n) => n == number,
            RouletteBet::Red => is_red(number),
            RouletteBet::Black => is_black(number),
            RouletteBet::Odd => number % 2 == 1,
            RouletteBet::Even => number % 2 == 0,
            RouletteBet::Low => number <= 18,
            RouletteBet::High => number >= 19,
            RouletteBet::Dozen(i) => (number - 1) / 12 + 1 == i,
            RouletteBet::Column(i) => (number - 1) % 3 + 1 == i,
        }
    }
}

pub fn is_red(number: u8) -> bool {
    RED_NUMBERS.contains(&number)
}

pub fn is_black(number: u8) -> bool {
    (1..=36).contains(&number) && !is_red(number)
}

pub fn color(number: u8) -> RouletteColor {
    if is_red(number) {
        RouletteColor::Red
    } else if is_black(number) {
        RouletteColor::Black
    } else {
        RouletteColor::Green
    }
}

pub fn spin_wheel(stream: &mut RollStream) -> u8 {
    stream.next_below(POCKETS as u32) as u8
}

pub fn play_roulette(bet: Amount, wager: RouletteBet, stream: &mut RollStream) -> FairdrawResult<GameResult> {
    wager.validate()?;

    let number = spin_wheel(stream);
    let details = GameDetails::Roulette {
        number,
        color: color(number),
        bet: wager,
    };

    if wager.covers(number) {
        GameResult::settle(bet, wager.multiplier(), details)
    } else {
        Ok(GameResult::loss(details))
    }
}
