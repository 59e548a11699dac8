use crate::errors::BetError;
use crate::money::Amount;
use serde::{Deserialize, Serialize};

/// Per-token stake limits in minor units
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BetLimits {
    pub min_bet: Amount,
    pub max_bet: Amount,
}

/// Reject a stake before any outcome is computed.
///
/// Checks run in order: zero, below minimum, above maximum, exceeds balance.
pub fn validate_bet(amount: Amount, balance: Amount, limits: &BetLimits) -> Result<(), BetError> {
    if amount.is_zero() {
        return Err(BetError::ZeroAmount);
    }
    if amount < limits.min_bet {
        return Err(BetError::BelowMinimum {
            amount: amount.minor_units(),
            min: limits.min_bet.minor_units(),
        });
    }
    if amount > limits.max_bet {
        return Err(BetError::AboveMaximum {
            amount: amount.minor_units(),
            max: limits.max_bet.minor_units(),
        });
    }
    if amount > balance {
        return Err(BetError::InsufficientBalance {
            amount: amount.minor_units(),
            balance: balance.minor_units(),
        });
    }
    Ok(())
}
