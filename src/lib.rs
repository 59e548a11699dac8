//! Fairdraw - provably fair outcome core
//!
//! Deterministic game outcomes from a committed server seed, a client seed and
//! a nonce. Outcomes are keyed HMAC-SHA256 draws, money is integer minor units,
//! and every bet produces a [`GameRecord`] that a third party can audit once the
//! server seed is revealed.
//!
//! ```
//! use fairdraw::{evaluate, Amount, GameParams, GameSeed, HouseConfig, Roll};
//!
//! let seed = GameSeed::new("server", "client", 0);
//! let params = GameParams::Dice { target: Roll::from_hundredths(5_000) };
//! let result = evaluate(&seed, Amount(100), &params, &HouseConfig::default()).unwrap();
//! assert!(result.payout <= Amount(198));
//! ```

pub mod config;
pub mod errors;
pub mod fairness;
pub mod games;
pub mod money;
pub mod telemetry;

pub use config::{ConfigLoader, FairdrawConfig, HouseConfig, LoggingConfig, SeedConfig, TokenLimits};
pub use errors::{
    BetError, ConfigurationError, FairdrawError, FairdrawResult, GameParameterError, SeedError,
    VerificationError,
};
pub use fairness::{verify_commitment, verify_proof, verify_record};
pub use games::{
    evaluate, hash_roll, server_seed_commitment, validate_bet, BetLimits, BetRequest, CoinChoice,
    FairnessProof, GameDetails, GameParams, GameProcessor, GameRecord, GameResult, GameSeed,
    GameType, ProvablyFairResult, RevealedSeed, Roll, RollStream, SeedSession, Token,
};
pub use money::{format_amount, parse_amount, Amount, Multiplier};
