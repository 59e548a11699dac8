use crate::errors::FairdrawResult;
use crate::games::types::{CoinChoice, GameDetails, GameResult, Roll};
use crate::money::{Amount, Multiplier};

const HEADS_BELOW: Roll = Roll::from_hundredths(5_000);

/// Rolls under 50.00 land heads
pub fn compute_coinflip(roll: Roll) -> CoinChoice {
    if roll < HEADS_BELOW {
        CoinChoice::Heads
    } else {
        CoinChoice::Tails
    }
}

/// `2 * (1 - edge)`
pub fn coinflip_multiplier(edge_bps: u32) -> Multiplier {
    Multiplier::from_whole(2).with_house_edge(edge_bps)
}

pub fn play_coinflip(bet: Amount, choice: CoinChoice, roll: Roll, edge_bps: u32) -> FairdrawResult<GameResult> {
    let result_choice = compute_coinflip(roll);
    let details = GameDetails::CoinFlip {
        roll,
        player_choice: choice,
        result_choice,
    };

    if result_choice == choice {
        GameResult::settle(bet, coinflip_multiplier(edge_bps), details)
    } else {
        Ok(GameResult::loss(details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coinflip_boundary() {
        assert_eq!(compute_coinflip(Roll::from_hundredths(0)), CoinChoice::Heads);
        assert_eq!(compute_coinflip(Roll::from_hundredths(4_999)), CoinChoice::Heads);
        assert_eq!(compute_coinflip(Roll::from_hundredths(5_000)), CoinChoice::Tails);
        assert_eq!(compute_coinflip(Roll::from_hundredths(9_999)), CoinChoice::Tails);
    }

    #[test]
    fn test_heads_wins_under_fifty() {
        let result = play_coinflip(Amount(1_000), CoinChoice::Heads, Roll::from_hundredths(1_234), 100).unwrap();
        assert!(result.win);
        assert_eq!(result.multiplier, Multiplier::from_hundredths(198));
        assert_eq!(result.payout, Amount(1_980));
        assert!(matches!(
            result.details,
            GameDetails::CoinFlip { result_choice: CoinChoice::Heads, .. }
        ));
    }

    #[test]
    fn test_wrong_call_loses() {
        let result = play_coinflip(Amount(1_000), CoinChoice::Tails, Roll::from_hundredths(1_234), 100).unwrap();
        assert!(!result.win);
        assert_eq!(result.payout, Amount::ZERO);
    }
}
