//! Odds feed boundary.
//!
//! Converts an already-fetched odds feed document into [`Game`] records. The
//! expected shape is an array of events, each with bookmakers carrying an
//! `h2h` (moneyline) market:
//!
//! ```json
//! [{
//!   "id": "e1",
//!   "home_team": "Chiefs",
//!   "away_team": "Bills",
//!   "commence_time": "2026-10-18T17:00:00Z",
//!   "bookmakers": [{
//!     "key": "fanduel",
//!     "last_update": "2026-10-18T12:00:00Z",
//!     "markets": [{ "key": "h2h", "outcomes": [
//!       { "name": "Chiefs", "price": -140 },
//!       { "name": "Bills", "price": 120 }
//!     ]}]
//!   }]
//! }]
//! ```
//!
//! Shape is validated here so the scanner can assume typed input. Fetching,
//! caching and pagination belong to whoever produced the document.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::{AmericanOdds, Game, Quote};

/// Market key for two-way moneyline prices.
const MONEYLINE: &str = "h2h";

/// Errors raised while reading an odds feed document.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("malformed odds feed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{book} price {price} for '{outcome}' in {event} is not an integral american price")]
    NonIntegralPrice {
        event: String,
        book: String,
        outcome: String,
        price: f64,
    },
}

/// Layout of the games document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedFormat {
    /// Event list with bookmakers and markets.
    #[default]
    Events,
    /// Serialized [`Game`] records.
    Games,
}

#[derive(Debug, Deserialize)]
struct FeedEvent {
    #[serde(default)]
    id: String,
    home_team: String,
    away_team: String,
    commence_time: DateTime<Utc>,
    #[serde(default)]
    bookmakers: Vec<FeedBookmaker>,
}

#[derive(Debug, Deserialize)]
struct FeedBookmaker {
    key: String,
    #[serde(default)]
    last_update: Option<DateTime<Utc>>,
    #[serde(default)]
    markets: Vec<FeedMarket>,
}

#[derive(Debug, Deserialize)]
struct FeedMarket {
    key: String,
    #[serde(default)]
    outcomes: Vec<FeedOutcome>,
}

#[derive(Debug, Deserialize)]
struct FeedOutcome {
    name: String,
    price: f64,
}

fn american_price(event: &FeedEvent, book: &str, outcome: &FeedOutcome) -> Result<AmericanOdds, FeedError> {
    let price = outcome.price;
    // i64::MIN as f64 is exact; the upper bound is exclusive.
    let in_range = price >= i64::MIN as f64 && price < i64::MAX as f64;
    if !price.is_finite() || price.fract() != 0.0 || !in_range {
        return Err(FeedError::NonIntegralPrice {
            event: format!("{} @ {}", event.away_team, event.home_team),
            book: book.to_string(),
            outcome: outcome.name.clone(),
            price,
        });
    }
    Ok(AmericanOdds::new(price as i64))
}

impl FeedEvent {
    fn into_game(self) -> Result<Game, FeedError> {
        let mut quotes = Vec::new();
        for bookmaker in &self.bookmakers {
            for market in bookmaker.markets.iter().filter(|m| m.key == MONEYLINE) {
                for outcome in &market.outcomes {
                    let odds = american_price(&self, &bookmaker.key, outcome)?;
                    let mut quote = Quote::new(bookmaker.key.as_str(), outcome.name.as_str(), odds);
                    quote.updated_at = bookmaker.last_update;
                    quotes.push(quote);
                }
            }
        }
        debug!(event = %self.id, quotes = quotes.len(), "Parsed feed event");
        Ok(Game::new(self.home_team, self.away_team, self.commence_time).with_quotes(quotes))
    }
}

/// Parse an event-list feed document into games.
///
/// # Errors
///
/// Returns [`FeedError`] for invalid JSON, missing required fields or
/// fractional prices.
pub fn parse_events(json: &str) -> Result<Vec<Game>, FeedError> {
    let events: Vec<FeedEvent> = serde_json::from_str(json)?;
    events.into_iter().map(FeedEvent::into_game).collect()
}

/// Parse a document of serialized games.
///
/// # Errors
///
/// Returns [`FeedError::Json`] when the document does not match [`Game`].
pub fn parse_games(json: &str) -> Result<Vec<Game>, FeedError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a games document from disk.
///
/// # Errors
///
/// Returns an IO error when the file cannot be read, or a feed error when it
/// cannot be parsed.
pub fn load<P: AsRef<Path>>(path: P, format: FeedFormat) -> crate::error::Result<Vec<Game>> {
    let content = std::fs::read_to_string(path)?;
    let games = match format {
        FeedFormat::Events => parse_events(&content)?,
        FeedFormat::Games => parse_games(&content)?,
    };
    Ok(games)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"[
      {
        "id": "evt-1",
        "home_team": "Chiefs",
        "away_team": "Bills",
        "commence_time": "2026-10-18T17:00:00Z",
        "bookmakers": [
          {
            "key": "fanduel",
            "title": "FanDuel",
            "last_update": "2026-10-18T12:00:00Z",
            "markets": [
              { "key": "h2h", "outcomes": [
                { "name": "Chiefs", "price": -140 },
                { "name": "Bills", "price": 120 }
              ]},
              { "key": "spreads", "outcomes": [
                { "name": "Chiefs", "price": -110, "point": -2.5 }
              ]}
            ]
          },
          {
            "key": "DraftKings",
            "markets": [
              { "key": "h2h", "outcomes": [
                { "name": "Chiefs", "price": -135.0 },
                { "name": "Bills", "price": 115 }
              ]}
            ]
          }
        ]
      }
    ]"#;

    #[test]
    fn parses_moneyline_quotes_only() {
        let games = parse_events(FEED).unwrap();
        assert_eq!(games.len(), 1);

        let game = &games[0];
        assert_eq!(game.to_string(), "Bills @ Chiefs");
        assert_eq!(game.quotes.len(), 4);
        assert_eq!(game.quotes[0].book.as_str(), "fanduel");
        assert_eq!(game.quotes[0].odds, AmericanOdds::new(-140));
        assert!(game.quotes[0].updated_at.is_some());
        assert_eq!(game.quotes[2].book.as_str(), "draftkings");
        assert_eq!(game.quotes[2].odds, AmericanOdds::new(-135));
        assert!(game.quotes[2].updated_at.is_none());
    }

    #[test]
    fn rejects_fractional_price() {
        let feed = FEED.replace("-140", "1.71");
        let err = parse_events(&feed).unwrap_err();
        assert!(matches!(err, FeedError::NonIntegralPrice { price, .. } if price == 1.71));
    }

    #[test]
    fn rejects_event_without_teams() {
        let err = parse_events(r#"[{"commence_time": "2026-10-18T17:00:00Z"}]"#).unwrap_err();
        assert!(matches!(err, FeedError::Json(_)));
    }

    #[test]
    fn event_without_bookmakers_has_no_quotes() {
        let games = parse_events(
            r#"[{"home_team": "A", "away_team": "B", "commence_time": "2026-10-18T17:00:00Z"}]"#,
        )
        .unwrap();
        assert!(games[0].quotes.is_empty());
    }

    #[test]
    fn parses_native_games_document() {
        let games = parse_events(FEED).unwrap();
        let json = serde_json::to_string(&games).unwrap();
        assert_eq!(parse_games(&json).unwrap(), games);
    }
}
