//! Opportunity type with builder pattern.
//!
//! An `Opportunity` pairs a promo-side quote with the best opposing hedge
//! quote for one game, along with the sized hedge and its ranking key.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use super::game::{Game, Quote};
use super::hedge::HedgeResult;
use super::offer::PromoKind;

/// Error returned when building an Opportunity fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpportunityBuildError {
    /// Game is required but was not provided.
    MissingGame,
    /// Source quote is required but was not provided.
    MissingSource,
    /// Hedge quote is required but was not provided.
    MissingHedge,
    /// Hedge result and promo kind are required but were not provided.
    MissingResult,
}

impl fmt::Display for OpportunityBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingGame => write!(f, "game is required"),
            Self::MissingSource => write!(f, "source quote is required"),
            Self::MissingHedge => write!(f, "hedge quote is required"),
            Self::MissingResult => write!(f, "result and promo kind are required"),
        }
    }
}

impl std::error::Error for OpportunityBuildError {}

/// Identifying fields of the game an opportunity belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Matchup {
    pub home: String,
    pub away: String,
    pub start_time: DateTime<Utc>,
}

impl From<&Game> for Matchup {
    fn from(game: &Game) -> Self {
        Self {
            home: game.home.clone(),
            away: game.away.clone(),
            start_time: game.start_time,
        }
    }
}

impl fmt::Display for Matchup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.away, self.home)
    }
}

/// Ranking key for a hedge result under a given promo.
///
/// Boosts are compared in dollars since the boost size is fixed across games;
/// bonus bets and no-sweats are compared by conversion percentage.
#[must_use]
pub fn rating(kind: PromoKind, result: &HedgeResult) -> Decimal {
    match kind {
        PromoKind::ProfitBoost => result.guaranteed_profit,
        PromoKind::BonusBet | PromoKind::NoSweatBet => result.conversion_pct,
    }
}

/// A ranked source/hedge pairing.
///
/// Use `Opportunity::builder()` to construct instances.
/// The builder derives the rating from the promo kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Opportunity {
    game: Matchup,
    source: Quote,
    hedge: Quote,
    result: HedgeResult,
    rating: Decimal,
}

impl Opportunity {
    /// Create a new builder for constructing an Opportunity.
    pub fn builder() -> OpportunityBuilder {
        OpportunityBuilder::new()
    }

    pub fn game(&self) -> &Matchup {
        &self.game
    }

    /// The promo-side quote.
    pub fn source(&self) -> &Quote {
        &self.source
    }

    /// The opposing quote the hedge is placed on.
    pub fn hedge(&self) -> &Quote {
        &self.hedge
    }

    pub fn result(&self) -> &HedgeResult {
        &self.result
    }

    pub fn rating(&self) -> Decimal {
        self.rating
    }
}

/// Builder for constructing `Opportunity` instances.
///
/// # Example
///
/// ```ignore
/// let opportunity = Opportunity::builder()
///     .game(&game)
///     .source(source_quote)
///     .hedge(hedge_quote)
///     .result(PromoKind::BonusBet, result)
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct OpportunityBuilder {
    game: Option<Matchup>,
    source: Option<Quote>,
    hedge: Option<Quote>,
    result: Option<(PromoKind, HedgeResult)>,
}

impl OpportunityBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn game(mut self, game: &Game) -> Self {
        self.game = Some(Matchup::from(game));
        self
    }

    pub fn source(mut self, quote: Quote) -> Self {
        self.source = Some(quote);
        self
    }

    pub fn hedge(mut self, quote: Quote) -> Self {
        self.hedge = Some(quote);
        self
    }

    /// Set the sized hedge and the promo kind it was sized for.
    pub fn result(mut self, kind: PromoKind, result: HedgeResult) -> Self {
        self.result = Some((kind, result));
        self
    }

    /// Build the Opportunity, deriving its rating.
    ///
    /// # Errors
    ///
    /// Returns `OpportunityBuildError` if any required field is missing.
    pub fn build(self) -> Result<Opportunity, OpportunityBuildError> {
        let game = self.game.ok_or(OpportunityBuildError::MissingGame)?;
        let source = self.source.ok_or(OpportunityBuildError::MissingSource)?;
        let hedge = self.hedge.ok_or(OpportunityBuildError::MissingHedge)?;
        let (kind, result) = self.result.ok_or(OpportunityBuildError::MissingResult)?;

        Ok(Opportunity {
            game,
            source,
            hedge,
            rating: rating(kind, &result),
            result,
        })
    }
}
