use crate::games::{
    plinko::PlinkoRisk,
    roulette::{RouletteBet, RouletteColor},
    slots::SlotSymbol,
    video_poker::{Card, HandRank},
};
use crate::money::{Amount, Multiplier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported game types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    Dice,
    Crash,
    Mines,
    Plinko,
    Slots,
    Roulette,
    CoinFlip,
    VideoPoker,
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameType::Dice => "dice",
            GameType::Crash => "crash",
            GameType::Mines => "mines",
            GameType::Plinko => "plinko",
            GameType::Slots => "slots",
            GameType::Roulette => "roulette",
            GameType::CoinFlip => "coin_flip",
            GameType::VideoPoker => "video_poker",
        };
        f.write_str(name)
    }
}

/// Token a bet is denominated in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mint_address: Option<String>,
    /// Number of decimal places in one whole token
    pub decimals: u8,
}

impl Token {
    /// Native SOL, amounts in lamports
    pub fn sol() -> Self {
        Self {
            symbol: "SOL".to_string(),
            mint_address: None,
            decimals: 9,
        }
    }

    /// USDC SPL token
    pub fn usdc() -> Self {
        Self {
            symbol: "USDC".to_string(),
            mint_address: Some("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".to_string()),
            decimals: 6,
        }
    }

    /// USDT SPL token
    pub fn usdt() -> Self {
        Self {
            symbol: "USDT".to_string(),
            mint_address: Some("Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB".to_string()),
            decimals: 6,
        }
    }

    /// Off-chain play balance in cents
    pub fn usd() -> Self {
        Self {
            symbol: "USD".to_string(),
            mint_address: None,
            decimals: 2,
        }
    }

    /// List of all supported tokens
    pub fn all_supported() -> Vec<Self> {
        vec![Self::sol(), Self::usdc(), Self::usdt(), Self::usd()]
    }

    pub fn by_symbol(symbol: &str) -> Option<Self> {
        Self::all_supported()
            .into_iter()
            .find(|t| t.symbol.eq_ignore_ascii_case(symbol))
    }
}

/// A roll in hundredths of a percentage point: `Roll(4999)` is 49.99.
///
/// Draws from the seed engine are always in `0..=9999`. Larger values can be
/// constructed so callers can exercise clamping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Roll(u32);

impl Roll {
    /// Exclusive upper bound of engine draws (100.00)
    pub const RANGE: u32 = 10_000;

    pub const fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths)
    }

    pub const fn hundredths(self) -> u32 {
        self.0
    }

    /// Presentation only
    pub fn as_percent(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Coin flip side, used for both the player's choice and the result
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CoinChoice {
    Heads,
    Tails,
}

impl fmt::Display for CoinChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinChoice::Heads => write!(f, "heads"),
            CoinChoice::Tails => write!(f, "tails"),
        }
    }
}

/// Per-game bet parameters (discriminated union)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum GameParams {
    /// Win if the roll lands strictly under `target`
    Dice { target: Roll },
    /// Auto cash-out multiplier
    Crash { cashout: Multiplier },
    Mines { mines: u8, tiles: Vec<u8> },
    Plinko { rows: u8, risk: PlinkoRisk },
    Slots,
    Roulette { bet: RouletteBet },
    CoinFlip { choice: CoinChoice },
    /// Cards to keep from the initial deal
    VideoPoker { holds: [bool; 5] },
}

impl GameParams {
    pub fn game_type(&self) -> GameType {
        match self {
            GameParams::Dice { .. } => GameType::Dice,
            GameParams::Crash { .. } => GameType::Crash,
            GameParams::Mines { .. } => GameType::Mines,
            GameParams::Plinko { .. } => GameType::Plinko,
            GameParams::Slots => GameType::Slots,
            GameParams::Roulette { .. } => GameType::Roulette,
            GameParams::CoinFlip { .. } => GameType::CoinFlip,
            GameParams::VideoPoker { .. } => GameType::VideoPoker,
        }
    }
}

/// Game-specific outcome data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum GameDetails {
    Dice {
        roll: Roll,
        target: Roll,
    },
    Crash {
        roll: Roll,
        crash_point: Multiplier,
        cashout: Multiplier,
    },
    Mines {
        mine_positions: Vec<u8>,
        revealed: Vec<u8>,
        /// First revealed tile that held a mine
        #[serde(skip_serializing_if = "Option::is_none")]
        hit: Option<u8>,
    },
    Plinko {
        rows: u8,
        risk: PlinkoRisk,
        /// `true` is a bounce to the right
        path: Vec<bool>,
        slot: u8,
    },
    Slots {
        reels: [SlotSymbol; 3],
    },
    Roulette {
        number: u8,
        color: RouletteColor,
        bet: RouletteBet,
    },
    CoinFlip {
        roll: Roll,
        player_choice: CoinChoice,
        result_choice: CoinChoice,
    },
    VideoPoker {
        initial_hand: [Card; 5],
        final_hand: [Card; 5],
        holds: [bool; 5],
        rank: Option<HandRank>,
    },
}

/// Outcome of a single bet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameResult {
    pub win: bool,
    /// Amount credited back, stake included. Zero on a loss.
    pub payout: Amount,
    pub multiplier: Multiplier,
    pub details: GameDetails,
}

impl GameResult {
    /// Settle `bet` at `multiplier`. A payout of at least the stake is a win.
    pub(crate) fn settle(
        bet: Amount,
        multiplier: Multiplier,
        details: GameDetails,
    ) -> crate::errors::FairdrawResult<Self> {
        let payout = multiplier.apply(bet)?;
        Ok(Self {
            win: multiplier >= Multiplier::ONE,
            payout,
            multiplier,
            details,
        })
    }

    pub(crate) fn loss(details: GameDetails) -> Self {
        Self {
            win: false,
            payout: Amount::ZERO,
            multiplier: Multiplier::ZERO,
            details,
        }
    }
}

/// Player information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerInfo {
    /// Player identifier (wallet address or session ID)
    pub player_id: String,
}

/// Payment information for the game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentInfo {
    pub token: Token,
    pub bet_amount: Amount,
    pub payout_amount: Amount,
}

/// What a player can see about the seed before it is revealed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FairnessProof {
    /// Hex SHA-256 of the server seed, published before the bet
    pub server_seed_commitment: String,
    pub client_seed: String,
    pub nonce: u64,
    /// Hex HMAC-SHA256 of the first round
    pub hash: String,
}

/// Request to play one round of any game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetRequest {
    pub player_id: String,
    pub token: Token,
    pub bet_amount: Amount,
    pub params: GameParams,
}

/// Complete, auditable record of one bet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameRecord {
    pub game_id: String,
    pub game_type: GameType,
    pub player: PlayerInfo,
    pub payment: PaymentInfo,
    pub params: GameParams,
    pub result: GameResult,
    pub proof: FairnessProof,
    pub timestamp: DateTime<Utc>,
}
