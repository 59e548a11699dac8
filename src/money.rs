//! Integer money arithmetic.
//!
//! Balances and payouts are whole minor units (lamports, micro-USDC, cents).
//! Multipliers are fixed point with [`Multiplier::SCALE`] micros per 1x.
//! Floats only appear in the display helpers at the bottom of this module.

use crate::errors::{BetError, FairdrawResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount in minor units of some token
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Amount(pub u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn new(minor_units: u64) -> Self {
        Self(minor_units)
    }

    pub const fn minor_units(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Convert to a float for presentation. Never feed this back into a balance.
    pub fn to_display(self, decimals: u8) -> f64 {
        self.0 as f64 / 10f64.powi(decimals as i32)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed point payout multiplier, `SCALE` micros per 1x
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Multiplier(u64);

impl Multiplier {
    pub const SCALE: u64 = 1_000_000;
    pub const ZERO: Multiplier = Multiplier(0);
    pub const ONE: Multiplier = Multiplier(Self::SCALE);

    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    /// Build from hundredths, e.g. `from_hundredths(198)` is 1.98x
    pub const fn from_hundredths(hundredths: u64) -> Self {
        Self(hundredths * (Self::SCALE / 100))
    }

    pub const fn from_whole(whole: u64) -> Self {
        Self(whole * Self::SCALE)
    }

    pub const fn micros(self) -> u64 {
        self.0
    }

    /// `floor(bet * self)`. Truncation always favours the house.
    pub fn apply(self, bet: Amount) -> FairdrawResult<Amount> {
        let product = bet.0 as u128 * self.0 as u128 / Self::SCALE as u128;
        u64::try_from(product)
            .map(Amount)
            .map_err(|_| BetError::PayoutOverflow { amount: bet.0 }.into())
    }

    /// Scale by `(10000 - edge_bps) / 10000`, flooring.
    pub fn with_house_edge(self, edge_bps: u32) -> Self {
        let keep = 10_000u128.saturating_sub(edge_bps as u128);
        Self((self.0 as u128 * keep / 10_000) as u64)
    }

    /// Presentation only
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / Self::SCALE;
        let frac = (self.0 % Self::SCALE) / (Self::SCALE / 100);
        write!(f, "{}.{:02}x", whole, frac)
    }
}

/// Most fractional digits a token can have while `10^decimals` fits in a `u64`
pub const MAX_DECIMALS: u8 = 19;

/// Render minor units as a fixed decimal string, e.g. `1500000000` with 9
/// decimals is `"1.500000000"`.
pub fn format_amount(amount: Amount, decimals: u8) -> String {
    if decimals == 0 {
        return amount.0.to_string();
    }
    let width = decimals as usize;
    let digits = format!("{:0>len$}", amount.0, len = width + 1);
    let (whole, frac) = digits.split_at(digits.len() - width);
    format!("{}.{}", whole, frac)
}

/// Parse a decimal string into minor units without going through a float.
/// Extra fractional digits beyond `decimals` are rejected rather than rounded.
pub fn parse_amount(input: &str, decimals: u8) -> FairdrawResult<Amount> {
    let invalid = |reason: &str| BetError::InvalidAmount {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = input.trim();
    let (whole, frac) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid("empty").into());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("not a decimal number").into());
    }
    if frac.len() > decimals as usize {
        return Err(invalid("too many fractional digits").into());
    }

    let scale = 10u64
        .checked_pow(decimals as u32)
        .ok_or_else(|| invalid("unsupported token decimals"))?;
    let whole_units = if whole.is_empty() {
        0
    } else {
        whole.parse::<u64>().map_err(|_| invalid("too large"))?
    };
    let frac_units = if frac.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac, width = decimals as usize);
        padded.parse::<u64>().map_err(|_| invalid("too large"))?
    };

    whole_units
        .checked_mul(scale)
        .and_then(|w| w.checked_add(frac_units))
        .map(Amount)
        .ok_or_else(|| invalid("too large").into())
}
