//! Games and per-book quotes supplied by the odds feed.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::ids::BookId;
use super::odds::AmericanOdds;

/// One book's price on one side of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub book: BookId,
    pub outcome: String,
    pub odds: AmericanOdds,
    /// When the book last refreshed this price, if the feed reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Quote {
    pub fn new(book: impl Into<BookId>, outcome: impl Into<String>, odds: AmericanOdds) -> Self {
        Self {
            book: book.into(),
            outcome: outcome.into(),
            odds,
            updated_at: None,
        }
    }

    #[must_use]
    pub fn with_updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = Some(at);
        self
    }
}

/// A two-sided game with quotes from any number of books.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub home: String,
    pub away: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub quotes: Vec<Quote>,
}

/// The two outcome labels of a well-formed game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sides<'a> {
    first: &'a str,
    second: &'a str,
}

impl<'a> Sides<'a> {
    /// The label opposing `label`, or `None` if `label` is not one of the sides.
    #[must_use]
    pub fn opposing(&self, label: &str) -> Option<&'a str> {
        if label == self.first {
            Some(self.second)
        } else if label == self.second {
            Some(self.first)
        } else {
            None
        }
    }
}

impl Game {
    pub fn new(home: impl Into<String>, away: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            home: home.into(),
            away: away.into(),
            start_time,
            quotes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_quote(mut self, quote: Quote) -> Self {
        self.quotes.push(quote);
        self
    }

    #[must_use]
    pub fn with_quotes(mut self, quotes: impl IntoIterator<Item = Quote>) -> Self {
        self.quotes.extend(quotes);
        self
    }

    /// Distinct outcome labels across all quotes, in first-seen order.
    #[must_use]
    pub fn outcome_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for quote in &self.quotes {
            if !labels.contains(&quote.outcome.as_str()) {
                labels.push(&quote.outcome);
            }
        }
        labels
    }

    /// Check that the quotes describe exactly two sides.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MalformedGame`] for an empty game, a one-sided
    /// game, or a game quoting more than two labels.
    pub fn sides(&self) -> Result<Sides<'_>, DomainError> {
        let labels = self.outcome_labels();
        match *labels.as_slice() {
            [first, second] => Ok(Sides { first, second }),
            _ => Err(DomainError::MalformedGame {
                game: self.to_string(),
                labels: labels.len(),
            }),
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.away, self.home)
    }
}
