//! Mines on a 5x5 board.

use crate::errors::{FairdrawResult, GameParameterError};
use crate::games::seed_engine::RollStream;
use crate::games::types::{GameDetails, GameResult};
use crate::money::{Amount, Multiplier};

pub const TILE_COUNT: u8 = 25;
pub const MIN_MINES: u8 = 1;
pub const MAX_MINES: u8 = 24;

// Working precision for the compounding step, 1e12 per 1x.
const PRECISION: u128 = 1_000_000_000_000;

/// Place `mines` mines with a partial Fisher-Yates shuffle of the board.
/// Returns exactly `mines` unique positions in `0..25`, sorted ascending.
pub fn generate_mine_positions(stream: &mut RollStream, mines: u8) -> Result<Vec<u8>, GameParameterError> {
    check_mine_count(mines)?;

    let mut board: Vec<u8> = (0..TILE_COUNT).collect();
    for i in 0..mines as usize {
        let j = i + stream.next_below((board.len() - i) as u32) as usize;
        board.swap(i, j);
    }

    let mut positions = board[..mines as usize].to_vec();
    positions.sort_unstable();
    Ok(positions)
}

/// `1.15^gems * (1 - edge)`, floored at each step
pub fn mines_multiplier(gems: usize, edge_bps: u32) -> Multiplier {
    let mut value = PRECISION;
    for _ in 0..gems {
        value = value * 115 / 100;
    }
    let micros = value * Multiplier::SCALE as u128 / PRECISION;
    Multiplier::from_micros(micros as u64).with_house_edge(edge_bps)
}

pub fn play_mines(
    bet: Amount,
    mines: u8,
    tiles: &[u8],
    stream: &mut RollStream,
    edge_bps: u32,
) -> FairdrawResult<GameResult> {
    check_mine_count(mines)?;
    check_tiles(mines, tiles)?;

    let mine_positions = generate_mine_positions(stream, mines)?;
    let hit = tiles
        .iter()
        .copied()
        .find(|t| mine_positions.binary_search(t).is_ok());

    let details = GameDetails::Mines {
        mine_positions,
        revealed: tiles.to_vec(),
        hit,
    };

    match hit {
        Some(_) => Ok(GameResult::loss(details)),
        None => GameResult::settle(bet, mines_multiplier(tiles.len(), edge_bps), details),
    }
}

fn check_mine_count(mines: u8) -> Result<(), GameParameterError> {
    if !(MIN_MINES..=MAX_MINES).contains(&mines) {
        return Err(GameParameterError::InvalidMineCount { mines });
    }
    Ok(())
}

fn check_tiles(mines: u8, tiles: &[u8]) -> Result<(), GameParameterError> {
    let max = (TILE_COUNT - mines) as usize;
    if tiles.is_empty() || tiles.len() > max {
        return Err(GameParameterError::InvalidRevealCount {
            revealed: tiles.len(),
            max,
        });
    }

    let mut seen = [false; TILE_COUNT as usize];
    for &tile in tiles {
        if tile >= TILE_COUNT {
            return Err(GameParameterError::InvalidTile { tile });
        }
        if std::mem::replace(&mut seen[tile as usize], true) {
            return Err(GameParameterError::DuplicateTile { tile });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::seed_engine::GameSeed;

    fn stream(nonce: u64) -> RollStream {
        RollStream::new(&GameSeed::new("mines-server", "mines-client", nonce)).unwrap()
    }

    #[test]
    fn test_positions_unique_sorted_in_range() {
        for k in MIN_MINES..=MAX_MINES {
            for nonce in 0..20 {
                let positions = generate_mine_positions(&mut stream(nonce), k).unwrap();
                assert_eq!(positions.len(), k as usize);
                assert!(positions.windows(2).all(|w| w[0] < w[1]));
                assert!(positions.iter().all(|&p| p < TILE_COUNT));
            }
        }
    }

    #[test]
    fn test_positions_deterministic() {
        let a = generate_mine_positions(&mut stream(3), 5).unwrap();
        let b = generate_mine_positions(&mut stream(3), 5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_mine_counts() {
        assert_eq!(
            generate_mine_positions(&mut stream(0), 0),
            Err(GameParameterError::InvalidMineCount { mines: 0 })
        );
        assert!(generate_mine_positions(&mut stream(0), 25).is_err());
    }

    #[test]
    fn test_multiplier_values() {
        assert_eq!(mines_multiplier(0, 0), Multiplier::ONE);
        assert_eq!(mines_multiplier(1, 100), Multiplier::from_micros(1_138_500));
        // 1.15^2 * 0.99 = 1.309275
        assert_eq!(mines_multiplier(2, 100), Multiplier::from_micros(1_309_275));
        assert!(mines_multiplier(24, 100) > Multiplier::from_whole(28));
    }

    #[test]
    fn test_hit_and_safe_reveal() {
        let mines = 3;
        let positions = generate_mine_positions(&mut stream(11), mines).unwrap();

        let bomb = positions[0];
        let lost = play_mines(Amount(1_000), mines, &[bomb], &mut stream(11), 100).unwrap();
        assert!(!lost.win);
        assert_eq!(lost.payout, Amount::ZERO);
        assert!(matches!(lost.details, GameDetails::Mines { hit: Some(t), .. } if t == bomb));

        let safe: Vec<u8> = (0..TILE_COUNT).filter(|t| !positions.contains(t)).take(2).collect();
        let won = play_mines(Amount(1_000), mines, &safe, &mut stream(11), 100).unwrap();
        assert!(won.win);
        assert_eq!(won.payout, Amount(1_309));
    }

    #[test]
    fn test_tile_validation() {
        let mut s = stream(0);
        assert!(matches!(
            play_mines(Amount(1), 3, &[], &mut s, 100),
            Err(crate::errors::FairdrawError::Game(GameParameterError::InvalidRevealCount {
                revealed: 0,
                max: 22
            }))
        ));
        assert!(play_mines(Amount(1), 3, &[25], &mut s, 100).is_err());
        assert!(play_mines(Amount(1), 3, &[4, 4], &mut s, 100).is_err());
        let too_many: Vec<u8> = (0..23).collect();
        assert!(play_mines(Amount(1), 3, &too_many, &mut s, 100).is_err());
    }
}
