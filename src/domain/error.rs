//! Domain validation errors for odds, offers and games.
//!
//! These errors are returned when an input violates a domain rule: a zero
//! price, a non-positive stake, a refund rate outside `[0, 1]`, or a game
//! whose quotes do not describe exactly two sides.
//!
//! # Examples
//!
//! ```
//! use hedgepro::domain::error::DomainError;
//! use hedgepro::domain::odds::AmericanOdds;
//!
//! let result = AmericanOdds::new(0).multiplier();
//! assert!(matches!(result, Err(DomainError::InvalidOdds)));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// American odds of zero have no payout multiplier.
    #[error("american odds cannot be zero")]
    InvalidOdds,

    /// The promo stake must be strictly positive.
    #[error("stake must be positive, got {stake}")]
    InvalidStake {
        /// The invalid stake that was provided.
        stake: Decimal,
    },

    /// A profit boost cannot be negative.
    #[error("boost percentage must be non-negative, got {boost_pct}")]
    InvalidBoost {
        /// The invalid boost percentage.
        boost_pct: Decimal,
    },

    /// Refund rates are fractions of the stake.
    #[error("refund rate must be within [0, 1], got {rate}")]
    InvalidRefundRate {
        /// The invalid refund rate.
        rate: Decimal,
    },

    /// A game must expose exactly two outcome labels.
    #[error("game '{game}' has {labels} distinct outcome labels, expected 2")]
    MalformedGame {
        /// Display name of the game.
        game: String,
        /// Number of distinct labels found across its quotes.
        labels: usize,
    },

    /// A stake or payout does not fit in the decimal range.
    #[error("amount out of range: stake or odds too large")]
    Overflow,

    /// Text could not be read as American odds.
    #[error("cannot parse american odds from '{input}'")]
    ParseOdds {
        /// The rejected input.
        input: String,
    },
}
