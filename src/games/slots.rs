//! Three-reel slots.

use crate::errors::FairdrawResult;
use crate::games::seed_engine::RollStream;
use crate::games::types::{GameDetails, GameResult};
use crate::money::{Amount, Multiplier};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SlotSymbol {
    Cherry,
    Lemon,
    Orange,
    Plum,
    Bell,
    Bar,
    Seven,
}

impl SlotSymbol {
    pub const ALL: [SlotSymbol; 7] = [
        SlotSymbol::Cherry,
        SlotSymbol::Lemon,
        SlotSymbol::Orange,
        SlotSymbol::Plum,
        SlotSymbol::Bell,
        SlotSymbol::Bar,
        SlotSymbol::Seven,
    ];

    /// Stops on each reel
    pub const fn weight(self) -> u32 {
        match self {
            SlotSymbol::Cherry => 9,
            SlotSymbol::Lemon => 7,
            SlotSymbol::Orange => 6,
            SlotSymbol::Plum => 4,
            SlotSymbol::Bell => 3,
            SlotSymbol::Bar => 2,
            SlotSymbol::Seven => 1,
        }
    }

    /// Three of a kind, in hundredths
    const fn triple_pays(self) -> u64 {
        match self {
            SlotSymbol::Cherry => 1_000,
            SlotSymbol::Lemon => 1_200,
            SlotSymbol::Orange => 2_000,
            SlotSymbol::Plum => 3_000,
            SlotSymbol::Bell => 5_000,
            SlotSymbol::Bar => 10_000,
            SlotSymbol::Seven => 25_000,
        }
    }
}

pub const REEL_STOPS: u32 = 32;

// Cherry on reels one and two, or reel one only, in hundredths
const TWO_CHERRIES_PAYS: u64 = 400;
const ONE_CHERRY_PAYS: u64 = 50;

fn spin_reel(stream: &mut RollStream) -> SlotSymbol {
    let mut stop = stream.next_below(REEL_STOPS);
    for symbol in SlotSymbol::ALL {
        if stop < symbol.weight() {
            return symbol;
        }
        stop -= symbol.weight();
    }
    SlotSymbol::Seven
}

/// Paytable lookup for a reel line
pub fn line_multiplier(reels: [SlotSymbol; 3]) -> Multiplier {
    use SlotSymbol::Cherry;

    let hundredths = match reels {
        [a, b, c] if a == b && b == c => a.triple_pays(),
        [Cherry, Cherry, _] => TWO_CHERRIES_PAYS,
        [Cherry, _, _] => ONE_CHERRY_PAYS,
        _ => 0,
    };
    Multiplier::from_hundredths(hundredths)
}

pub fn play_slots(bet: Amount, stream: &mut RollStream) -> FairdrawResult<GameResult> {
    let reels = [spin_reel(stream), spin_reel(stream), spin_reel(stream)];
    let multiplier = line_multiplier(reels);
    let details = GameDetails::Slots { reels };

    if multiplier == Multiplier::ZERO {
        return Ok(GameResult::loss(details));
    }
    GameResult::settle(bet, multiplier, details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::seed_engine::GameSeed;

    #[test]
    fn test_weights_fill_reel() {
        let total: u32 = SlotSymbol::ALL.iter().map(|s| s.weight()).sum();
        assert_eq!(total, REEL_STOPS);
    }

    #[test]
    fn test_paytable() {
        use SlotSymbol::*;
        assert_eq!(line_multiplier([Seven, Seven, Seven]), Multiplier::from_whole(250));
        assert_eq!(line_multiplier([Cherry, Cherry, Cherry]), Multiplier::from_whole(10));
        assert_eq!(line_multiplier([Cherry, Cherry, Bell]), Multiplier::from_whole(4));
        assert_eq!(line_multiplier([Cherry, Bar, Cherry]), Multiplier::from_hundredths(50));
        assert_eq!(line_multiplier([Bar, Cherry, Cherry]), Multiplier::ZERO);
    }

    #[test]
    fn test_return_to_player_is_exact() {
        // Sum of weight products times multiplier over every reel line.
        let mut weighted_micros: u128 = 0;
        for a in SlotSymbol::ALL {
            for b in SlotSymbol::ALL {
                for c in SlotSymbol::ALL {
                    let ways = (a.weight() * b.weight() * c.weight()) as u128;
                    weighted_micros += ways * line_multiplier([a, b, c]).micros() as u128;
                }
            }
        }
        // RTP 15405 / 16384, over 32^3 lines
        assert_eq!(weighted_micros, 30_810 * Multiplier::SCALE as u128);
        assert!(weighted_micros < (REEL_STOPS as u128).pow(3) * Multiplier::SCALE as u128);
    }

    #[test]
    fn test_spin_deterministic() {
        let seed = GameSeed::new("slots", "client", 42);
        let a = play_slots(Amount(500), &mut RollStream::new(&seed).unwrap()).unwrap();
        let b = play_slots(Amount(500), &mut RollStream::new(&seed).unwrap()).unwrap();
        assert_eq!(a, b);
    }
}
