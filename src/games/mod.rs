pub mod types;
pub mod seed_engine;
pub mod seed_session;
pub mod validation;
pub mod processor;

pub mod coinflip;
pub mod crash;
pub mod dice;
pub mod mines;
pub mod plinko;
pub mod roulette;
pub mod slots;
pub mod video_poker;

pub use types::*;
pub use seed_engine::{hash_roll, server_seed_commitment, GameSeed, ProvablyFairResult, RollStream};
pub use seed_session::{RevealedSeed, SeedSession};
pub use validation::{validate_bet, BetLimits};
pub use processor::GameProcessor;

use crate::config::HouseConfig;
use crate::errors::FairdrawResult;
use crate::money::Amount;

/// Compute the outcome of one bet from its seed. Pure: the same inputs always
/// give the same result, which is what makes a revealed seed auditable.
pub fn evaluate(
    seed: &GameSeed,
    bet: Amount,
    params: &GameParams,
    house: &HouseConfig,
) -> FairdrawResult<GameResult> {
    let mut stream = RollStream::new(seed)?;

    match params {
        GameParams::Dice { target } => {
            dice::play_dice(bet, *target, stream.next_roll(), house.dice_edge_bps)
        }
        GameParams::Crash { cashout } => crash::play_crash(bet, *cashout, stream.next_roll()),
        GameParams::Mines { mines, tiles } => {
            mines::play_mines(bet, *mines, tiles, &mut stream, house.mines_edge_bps)
        }
        GameParams::Plinko { rows, risk } => plinko::play_plinko(bet, *rows, *risk, &mut stream),
        GameParams::Slots => slots::play_slots(bet, &mut stream),
        GameParams::Roulette { bet: wager } => roulette::play_roulette(bet, *wager, &mut stream),
        GameParams::CoinFlip { choice } => {
            coinflip::play_coinflip(bet, *choice, stream.next_roll(), house.coinflip_edge_bps)
        }
        GameParams::VideoPoker { holds } => video_poker::play_video_poker(bet, *holds, &mut stream),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_games_use_published_roll() {
        let seed = GameSeed::new("server", "client", 3);
        let published = hash_roll(&seed).unwrap();
        let house = HouseConfig::default();

        let result = evaluate(
            &seed,
            Amount(100),
            &GameParams::Dice {
                target: Roll::from_hundredths(5_000),
            },
            &house,
        )
        .unwrap();

        match result.details {
            GameDetails::Dice { roll, .. } => assert_eq!(roll, published.roll),
            other => panic!("unexpected details {:?}", other),
        }
    }

    #[test]
    fn test_every_game_evaluates() {
        let seed = GameSeed::new("server", "client", 0);
        let house = HouseConfig::default();
        let all = [
            GameParams::Dice { target: Roll::from_hundredths(2_500) },
            GameParams::Crash { cashout: crate::money::Multiplier::from_whole(2) },
            GameParams::Mines { mines: 3, tiles: vec![0, 1] },
            GameParams::Plinko { rows: 12, risk: plinko::PlinkoRisk::Low },
            GameParams::Slots,
            GameParams::Roulette { bet: roulette::RouletteBet::Odd },
            GameParams::CoinFlip { choice: CoinChoice::Tails },
            GameParams::VideoPoker { holds: [false; 5] },
        ];

        for params in &all {
            let a = evaluate(&seed, Amount(1_000), params, &house).unwrap();
            let b = evaluate(&seed, Amount(1_000), params, &house).unwrap();
            assert_eq!(a, b, "{} is not deterministic", params.game_type());
            assert!(a.payout <= a.multiplier.apply(Amount(1_000)).unwrap());
        }
    }

    #[test]
    fn test_empty_seed_rejected_before_play() {
        let err = evaluate(
            &GameSeed::new("", "client", 0),
            Amount(1),
            &GameParams::Slots,
            &HouseConfig::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Server seed must not be empty"));
    }
}
