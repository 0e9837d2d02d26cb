//! American odds and their conversion to payout multipliers.
//!
//! A payout multiplier is "decimal odds minus one": the profit returned per
//! $1 staked when the bet wins. Positive American odds quote the profit on a
//! $100 stake, negative odds quote the stake needed to profit $100.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::money::Multiplier;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// A sportsbook price in American notation.
///
/// Ordering is numeric, which is also the hedger's preference order: `+150`
/// beats `-110`, and `-110` beats `-400` because it needs less stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AmericanOdds(i64);

impl AmericanOdds {
    /// Wrap a raw American price. Zero is accepted here and rejected on use.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// The raw signed price.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Profit per $1 staked.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidOdds`] when the price is zero.
    pub fn multiplier(self) -> Result<Multiplier, DomainError> {
        convert_to_multiplier(self)
    }

    /// Total return per $1 staked, stake included.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidOdds`] when the price is zero.
    pub fn decimal_odds(self) -> Result<Decimal, DomainError> {
        Ok(Decimal::ONE + self.multiplier()?)
    }

    /// Break-even win probability implied by the price, vig included.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidOdds`] when the price is zero.
    pub fn implied_probability(self) -> Result<Decimal, DomainError> {
        Ok(Decimal::ONE / self.decimal_odds()?)
    }
}

/// Convert American odds to a payout multiplier.
///
/// `+250` gives `2.5`, `-200` gives `0.5`, and both `+100` and `-100` give `1`.
///
/// # Errors
///
/// Returns [`DomainError::InvalidOdds`] when `odds` is zero.
///
/// # Examples
///
/// ```
/// use hedgepro::domain::odds::{convert_to_multiplier, AmericanOdds};
/// use rust_decimal_macros::dec;
///
/// assert_eq!(convert_to_multiplier(AmericanOdds::new(200)).unwrap(), dec!(2));
/// assert_eq!(convert_to_multiplier(AmericanOdds::new(-200)).unwrap(), dec!(0.5));
/// ```
pub fn convert_to_multiplier(odds: AmericanOdds) -> Result<Multiplier, DomainError> {
    match odds.0 {
        0 => Err(DomainError::InvalidOdds),
        v if v > 0 => Ok(Decimal::from(v) / HUNDRED),
        v => Ok(HUNDRED / Decimal::from(v.unsigned_abs())),
    }
}

impl fmt::Display for AmericanOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<i64> for AmericanOdds {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl FromStr for AmericanOdds {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = s.trim().replace(',', "");
        cleaned
            .parse::<i64>()
            .map(Self::new)
            .map_err(|_| DomainError::ParseOdds {
                input: s.to_string(),
            })
    }
}
