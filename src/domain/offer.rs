//! Promotional offer terms.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::money::Money;

/// Refund rate assumed for no-sweat offers when none is given.
///
/// Refunds usually arrive as a bonus bet, which converts to roughly 70% cash.
pub const DEFAULT_REFUND_RATE: Decimal = dec!(0.70);

/// The promotional terms attached to the source-side wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromoOffer {
    /// Site credit: winnings are paid, the stake itself is never returned.
    BonusBet { stake: Money },
    /// Cash bet whose net winnings are increased by `boost_pct` percent.
    ProfitBoost { stake: Money, boost_pct: Decimal },
    /// Cash bet refunded at `refund_rate` of the stake if it loses.
    NoSweatBet { stake: Money, refund_rate: Decimal },
}

/// Offer family without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromoKind {
    BonusBet,
    ProfitBoost,
    NoSweatBet,
}

impl PromoKind {
    /// Stable identifier used in logs and JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BonusBet => "bonus_bet",
            Self::ProfitBoost => "profit_boost",
            Self::NoSweatBet => "no_sweat_bet",
        }
    }
}

impl fmt::Display for PromoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PromoOffer {
    #[must_use]
    pub const fn bonus_bet(stake: Money) -> Self {
        Self::BonusBet { stake }
    }

    #[must_use]
    pub const fn profit_boost(stake: Money, boost_pct: Decimal) -> Self {
        Self::ProfitBoost { stake, boost_pct }
    }

    #[must_use]
    pub const fn no_sweat(stake: Money, refund_rate: Decimal) -> Self {
        Self::NoSweatBet { stake, refund_rate }
    }

    /// No-sweat offer at [`DEFAULT_REFUND_RATE`].
    #[must_use]
    pub const fn no_sweat_default(stake: Money) -> Self {
        Self::no_sweat(stake, DEFAULT_REFUND_RATE)
    }

    /// The promo stake `W`.
    #[must_use]
    pub const fn stake(&self) -> Money {
        match *self {
            Self::BonusBet { stake }
            | Self::ProfitBoost { stake, .. }
            | Self::NoSweatBet { stake, .. } => stake,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PromoKind {
        match self {
            Self::BonusBet { .. } => PromoKind::BonusBet,
            Self::ProfitBoost { .. } => PromoKind::ProfitBoost,
            Self::NoSweatBet { .. } => PromoKind::NoSweatBet,
        }
    }

    /// Check stake, boost and refund-rate bounds.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule as a [`DomainError`].
    pub fn validate(&self) -> Result<(), DomainError> {
        let stake = self.stake();
        if stake <= Decimal::ZERO {
            return Err(DomainError::InvalidStake { stake });
        }
        match *self {
            Self::ProfitBoost { boost_pct, .. } if boost_pct < Decimal::ZERO => {
                Err(DomainError::InvalidBoost { boost_pct })
            }
            Self::NoSweatBet { refund_rate, .. }
                if refund_rate < Decimal::ZERO || refund_rate > Decimal::ONE =>
            {
                Err(DomainError::InvalidRefundRate { rate: refund_rate })
            }
            _ => Ok(()),
        }
    }
}
