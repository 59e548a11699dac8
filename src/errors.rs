//! Error types for the fairdraw outcome core
//!
//! Every failure here is a local validation failure. Nothing is retried and
//! nothing has side effects, so callers either surface the error or reject the
//! bet.

use thiserror::Error;

/// Root error type for all fairdraw operations
#[derive(Debug, Error)]
pub enum FairdrawError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Seed material is missing or unusable
    #[error("Seed error: {0}")]
    Seed(#[from] SeedError),

    /// Bet amount rejected before any outcome was computed
    #[error("Bet error: {0}")]
    Bet(#[from] BetError),

    /// Game specific parameter out of range
    #[error("Game parameter error: {0}")]
    Game(#[from] GameParameterError),

    /// Audit of a revealed seed failed
    #[error("Verification error: {0}")]
    Verification(#[from] VerificationError),
}

/// Configuration and validation errors
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Seed errors (INVALID_SEED)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedError {
    #[error("Server seed must not be empty")]
    EmptyServerSeed,

    #[error("Client seed must not be empty")]
    EmptyClientSeed,

    #[error("Client seed is {len} bytes (max {max})")]
    ClientSeedTooLong { len: usize, max: usize },

    #[error("Nonce space exhausted for this seed pair, rotate seeds")]
    NonceExhausted,
}

/// Bet amount errors (InvalidBetAmount)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BetError {
    #[error("Bet amount must be positive")]
    ZeroAmount,

    #[error("Bet amount {amount} is below the minimum of {min}")]
    BelowMinimum { amount: u64, min: u64 },

    #[error("Bet amount {amount} is above the maximum of {max}")]
    AboveMaximum { amount: u64, max: u64 },

    #[error("Bet amount {amount} exceeds balance {balance}")]
    InsufficientBalance { amount: u64, balance: u64 },

    #[error("Unsupported token: {0}")]
    UnsupportedToken(String),

    #[error("Payout for bet {amount} overflows the amount range")]
    PayoutOverflow { amount: u64 },

    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: String },
}

/// Game parameter errors (InvalidGameParameter)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameParameterError {
    #[error("Dice target {target} is outside 1.01..=99.00")]
    InvalidDiceTarget { target: String },

    #[error("Cash-out multiplier {cashout} is outside 1.01x..=1000x")]
    InvalidCashout { cashout: String },

    #[error("Mine count {mines} is outside 1..=24")]
    InvalidMineCount { mines: u8 },

    #[error("Tile {tile} is outside 0..=24")]
    InvalidTile { tile: u8 },

    #[error("Tile {tile} revealed more than once")]
    DuplicateTile { tile: u8 },

    #[error("Revealed {revealed} tiles, allowed 1..={max}")]
    InvalidRevealCount { revealed: usize, max: usize },

    #[error("Plinko supports 8, 12 or 16 rows, got {rows}")]
    InvalidPlinkoRows { rows: u8 },

    #[error("Roulette number {number} is outside 0..=36")]
    InvalidRouletteNumber { number: u8 },

    #[error("Roulette {kind} {index} is outside 1..=3")]
    InvalidRouletteGroup { kind: &'static str, index: u8 },
}

/// Audit failures. These imply tampering and must never be swallowed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Seed integrity failure: expected hash {expected}, computed {actual}")]
    SeedIntegrity { expected: String, actual: String },

    #[error("Server seed does not match commitment {commitment}")]
    CommitmentMismatch { commitment: String },

    #[error("Client seed mismatch: record has '{record}', reveal has '{revealed}'")]
    ClientSeedMismatch { record: String, revealed: String },

    #[error("Nonce {nonce} was never issued under this seed pair (last issued {last_issued:?})")]
    NonceNotIssued { nonce: u64, last_issued: Option<u64> },

    #[error("Replayed outcome for game {game_id} does not match the recorded result")]
    OutcomeMismatch { game_id: String },
}

// Convenience type alias for Results
pub type FairdrawResult<T> = Result<T, FairdrawError>;
