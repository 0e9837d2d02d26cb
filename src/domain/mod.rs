//! Sportsbook-agnostic domain logic.
//!
//! - [`odds`] - American odds and payout multipliers
//! - [`offer`] - Promotional offer terms
//! - [`hedge`] - Equalized hedge sizing
//! - [`game`] - Games and per-book quotes
//! - [`opportunity`] - Ranked source/hedge pairings
//! - [`scanner`] - Cross-book opportunity scan

pub mod error;
pub mod game;
pub mod hedge;
pub mod ids;
pub mod money;
pub mod odds;
pub mod offer;
pub mod opportunity;
pub mod scanner;

pub use error::DomainError;
pub use game::{Game, Quote, Sides};
pub use hedge::{compute_hedge, HedgeCalculator, HedgeResult, Rounding, Scenario};
pub use ids::BookId;
pub use money::{Money, Multiplier};
pub use odds::{convert_to_multiplier, AmericanOdds};
pub use offer::{PromoKind, PromoOffer, DEFAULT_REFUND_RATE};
pub use opportunity::{Matchup, Opportunity, OpportunityBuildError, OpportunityBuilder};
pub use scanner::{
    best_hedge, scan_opportunities, BookFilter, ScanConfig, ScanFailure, ScanReport, ScanRequest,
    Scanner, SkipReason,
};
