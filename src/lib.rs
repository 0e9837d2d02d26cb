//! Hedgepro - Sportsbook promo conversion.
//!
//! This crate turns promotional wagers (bonus bets, profit boosts and
//! no-sweat refunds) into guaranteed cash by sizing a hedge on the opposing
//! outcome at another book, and ranks cross-book pairings by how much of the
//! promo they convert.
//!
//! # Modules
//!
//! - [`domain`] - Odds conversion, hedge sizing and the opportunity scanner
//! - [`feed`] - Odds feed documents to typed games
//! - [`config`] - Configuration loading from TOML files
//! - [`error`] - Error types for the crate
//! - [`cli`] - Command-line front end
//!
//! # Example
//!
//! ```
//! use hedgepro::domain::{compute_hedge, AmericanOdds, PromoOffer};
//! use rust_decimal_macros::dec;
//!
//! let offer = PromoOffer::no_sweat_default(dec!(100));
//! let result = compute_hedge(&offer, AmericanOdds::new(300), AmericanOdds::new(-350)).unwrap();
//!
//! assert!(result.guaranteed_profit > dec!(43));
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
