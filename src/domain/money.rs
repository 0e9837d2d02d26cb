//! Monetary types for stakes and payout ratios.

use rust_decimal::Decimal;

/// Dollar amount represented as a Decimal for precision.
pub type Money = Decimal;

/// Profit per $1 staked ("decimal odds minus one").
pub type Multiplier = Decimal;
