//! Configuration management with validation and defaults
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! `FAIRDRAW_*` environment variables, and are validated last.

use crate::errors::{ConfigurationError, FairdrawResult};
use crate::games::validation::BetLimits;
use crate::money::Amount;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Highest house edge any game may be configured with (10%)
pub const MAX_EDGE_BPS: u32 = 1_000;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FairdrawConfig {
    pub house: HouseConfig,
    pub limits: Vec<TokenLimits>,
    pub seeds: SeedConfig,
    pub logging: LoggingConfig,
}

impl Default for FairdrawConfig {
    fn default() -> Self {
        Self {
            house: HouseConfig::default(),
            limits: default_limits(),
            seeds: SeedConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl FairdrawConfig {
    pub fn limits_for(&self, symbol: &str) -> Option<BetLimits> {
        self.limits
            .iter()
            .find(|l| l.symbol.eq_ignore_ascii_case(symbol))
            .map(|l| BetLimits {
                min_bet: l.min_bet,
                max_bet: l.max_bet,
            })
    }
}

/// House edges, in basis points, for games priced by formula.
/// Table games (plinko, slots, roulette, video poker) carry their edge in
/// their payout tables.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HouseConfig {
    pub dice_edge_bps: u32,
    pub coinflip_edge_bps: u32,
    pub mines_edge_bps: u32,
}

impl Default for HouseConfig {
    fn default() -> Self {
        Self {
            dice_edge_bps: 100,
            coinflip_edge_bps: 100,
            mines_edge_bps: 100,
        }
    }
}

/// Stake limits for one token, in its minor units
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenLimits {
    pub symbol: String,
    pub min_bet: Amount,
    pub max_bet: Amount,
}

impl TokenLimits {
    fn new(symbol: &str, min_bet: u64, max_bet: u64) -> Self {
        Self {
            symbol: symbol.to_string(),
            min_bet: Amount(min_bet),
            max_bet: Amount(max_bet),
        }
    }
}

pub fn default_limits() -> Vec<TokenLimits> {
    vec![
        TokenLimits::new("SOL", 1_000_000, 100_000_000_000), // 0.001 - 100 SOL
        TokenLimits::new("USDC", 10_000, 10_000_000_000),    // 0.01 - 10k USDC
        TokenLimits::new("USDT", 10_000, 10_000_000_000),
        TokenLimits::new("USD", 10, 1_000_000), // cents
    ]
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SeedConfig {
    pub max_client_seed_len: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            max_client_seed_len: 64,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "fairdraw=info".to_string(),
            ansi: true,
        }
    }
}

/// Configuration loader with environment variable support
#[derive(Default)]
pub struct ConfigLoader {
    config_path: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_string_lossy().to_string());
        self
    }

    /// Load configuration from file and process environment
    pub fn load(&self) -> FairdrawResult<FairdrawConfig> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    /// Load configuration, reading overrides through `env`
    pub fn load_with_env<F>(&self, env: F) -> FairdrawResult<FairdrawConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match self.config_path {
            Some(ref path) => self.load_from_file(path)?,
            None => FairdrawConfig::default(),
        };

        apply_env_overrides(&mut config, env)?;
        validate(&config)?;

        Ok(config)
    }

    fn load_from_file(&self, path: &str) -> FairdrawResult<FairdrawConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to read {}: {}", path, e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to parse TOML: {}", e)).into())
    }

    /// Save configuration to file
    pub fn save(&self, config: &FairdrawConfig, path: &str) -> FairdrawResult<()> {
        let toml_string = toml::to_string_pretty(config)
            .map_err(|e| ConfigurationError::SaveFailed(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, toml_string)
            .map_err(|e| ConfigurationError::SaveFailed(format!("Failed to write to {}: {}", path, e)).into())
    }
}

fn apply_env_overrides<F>(config: &mut FairdrawConfig, env: F) -> FairdrawResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let parse_u32 = |key: &str, value: String| {
        value.parse::<u32>().map_err(|_| ConfigurationError::InvalidValue {
            field: key.to_string(),
            value,
            reason: "Expected a non-negative integer".to_string(),
        })
    };

    if let Some(v) = env("FAIRDRAW_DICE_EDGE_BPS") {
        config.house.dice_edge_bps = parse_u32("FAIRDRAW_DICE_EDGE_BPS", v)?;
    }
    if let Some(v) = env("FAIRDRAW_COINFLIP_EDGE_BPS") {
        config.house.coinflip_edge_bps = parse_u32("FAIRDRAW_COINFLIP_EDGE_BPS", v)?;
    }
    if let Some(v) = env("FAIRDRAW_MINES_EDGE_BPS") {
        config.house.mines_edge_bps = parse_u32("FAIRDRAW_MINES_EDGE_BPS", v)?;
    }
    if let Some(v) = env("FAIRDRAW_MAX_CLIENT_SEED_LEN") {
        config.seeds.max_client_seed_len = parse_u32("FAIRDRAW_MAX_CLIENT_SEED_LEN", v)? as usize;
    }
    if let Some(v) = env("FAIRDRAW_LOG_FILTER") {
        config.logging.filter = v;
    }

    Ok(())
}

/// Validate configuration values
pub fn validate(config: &FairdrawConfig) -> FairdrawResult<()> {
    let edges = [
        ("house.dice_edge_bps", config.house.dice_edge_bps),
        ("house.coinflip_edge_bps", config.house.coinflip_edge_bps),
        ("house.mines_edge_bps", config.house.mines_edge_bps),
    ];
    for (field, value) in edges {
        if value > MAX_EDGE_BPS {
            return Err(ConfigurationError::InvalidValue {
                field: field.to_string(),
                value: value.to_string(),
                reason: format!("House edge cannot exceed {} bps", MAX_EDGE_BPS),
            }
            .into());
        }
    }

    if config.limits.is_empty() {
        return Err(ConfigurationError::InvalidValue {
            field: "limits".to_string(),
            value: "[]".to_string(),
            reason: "At least one token must be configured".to_string(),
        }
        .into());
    }

    let mut symbols = HashSet::new();
    for limits in &config.limits {
        let field = format!("limits.{}", limits.symbol);
        if !symbols.insert(limits.symbol.to_ascii_uppercase()) {
            return Err(ConfigurationError::InvalidValue {
                field,
                value: limits.symbol.clone(),
                reason: "Duplicate token symbol".to_string(),
            }
            .into());
        }
        if limits.min_bet.is_zero() {
            return Err(ConfigurationError::InvalidValue {
                field,
                value: "0".to_string(),
                reason: "Minimum bet must be positive".to_string(),
            }
            .into());
        }
        if limits.min_bet > limits.max_bet {
            return Err(ConfigurationError::InvalidValue {
                field,
                value: format!("{}..{}", limits.min_bet, limits.max_bet),
                reason: "Minimum bet exceeds maximum bet".to_string(),
            }
            .into());
        }
    }

    if config.seeds.max_client_seed_len == 0 || config.seeds.max_client_seed_len > 256 {
        return Err(ConfigurationError::InvalidValue {
            field: "seeds.max_client_seed_len".to_string(),
            value: config.seeds.max_client_seed_len.to_string(),
            reason: "Must be within 1..=256".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Write the default configuration to `path`
pub fn generate_sample_config(path: &str) -> FairdrawResult<()> {
    ConfigLoader::new().save(&FairdrawConfig::default(), path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FairdrawError;
    use std::collections::HashMap;
    use tempfile::NamedTempFile;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config() {
        let config = ConfigLoader::new().load_with_env(no_env).unwrap();
        assert_eq!(config.house.dice_edge_bps, 100);
        assert_eq!(config.seeds.max_client_seed_len, 64);
        assert_eq!(
            config.limits_for("sol"),
            Some(BetLimits {
                min_bet: Amount(1_000_000),
                max_bet: Amount(100_000_000_000)
            })
        );
        assert!(config.limits_for("DOGE").is_none());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("FAIRDRAW_DICE_EDGE_BPS", "250"),
            ("FAIRDRAW_LOG_FILTER", "fairdraw=debug"),
        ]
        .into_iter()
        .collect();

        let config = ConfigLoader::new()
            .load_with_env(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.house.dice_edge_bps, 250);
        assert_eq!(config.house.coinflip_edge_bps, 100);
        assert_eq!(config.logging.filter, "fairdraw=debug");
    }

    #[test]
    fn test_bad_env_value() {
        let err = ConfigLoader::new()
            .load_with_env(|k| (k == "FAIRDRAW_MINES_EDGE_BPS").then(|| "lots".to_string()))
            .unwrap_err();
        assert!(matches!(
            err,
            FairdrawError::Configuration(ConfigurationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let mut config = FairdrawConfig::default();
        assert!(validate(&config).is_ok());

        config.house.dice_edge_bps = MAX_EDGE_BPS + 1;
        assert!(validate(&config).is_err());
        config.house.dice_edge_bps = 100;

        config.limits.push(TokenLimits::new("sol", 1, 2));
        assert!(validate(&config).is_err());
        config.limits.pop();

        config.limits[0].min_bet = Amount(0);
        assert!(validate(&config).is_err());
        config.limits[0] = TokenLimits::new("SOL", 10, 5);
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_save_and_load_config() -> FairdrawResult<()> {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        generate_sample_config(path)?;
        let loaded = ConfigLoader::new().with_path(path).load_with_env(no_env)?;

        assert_eq!(loaded.house, HouseConfig::default());
        assert_eq!(loaded.limits, default_limits());
        Ok(())
    }

    #[test]
    fn test_partial_toml_uses_defaults() -> FairdrawResult<()> {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "[house]\nmines_edge_bps = 200\n").unwrap();

        let loaded = ConfigLoader::new()
            .with_path(temp_file.path())
            .load_with_env(no_env)?;
        assert_eq!(loaded.house.mines_edge_bps, 200);
        assert_eq!(loaded.house.dice_edge_bps, 100);
        assert_eq!(loaded.limits, default_limits());
        Ok(())
    }
}
