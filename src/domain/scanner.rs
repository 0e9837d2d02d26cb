//! Cross-book opportunity scanning.
//!
//! For every game, each quote from the promo book is paired with the best
//! opposing price from the allowed hedge books, the hedge is sized, and
//! pairings that do not clear the profit threshold are dropped. Survivors are
//! ranked by [`rating`](super::opportunity::rating), highest first.
//!
//! A scan never fails as a whole. Malformed games, zero prices and invalid
//! offer terms are recorded per item in the [`ScanReport`] and skipped.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::DomainError;
use super::game::{Game, Quote};
use super::hedge::{HedgeCalculator, Rounding};
use super::ids::BookId;
use super::offer::PromoOffer;
use super::opportunity::{Opportunity, OpportunityBuildError};

/// Default number of ranked opportunities returned.
pub const DEFAULT_TOP_N: usize = 10;

/// Which books a side of the pairing may come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookFilter {
    /// Any book, excluding the source quote's own book on the hedge side.
    Any,
    /// Exactly this book.
    Book(BookId),
}

impl BookFilter {
    #[must_use]
    pub fn matches(&self, book: &BookId) -> bool {
        match self {
            Self::Any => true,
            Self::Book(id) => id == book,
        }
    }
}

impl fmt::Display for BookFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Book(id) => write!(f, "{id}"),
        }
    }
}

impl From<&str> for BookFilter {
    /// `any`, `*` or an empty string match every book.
    fn from(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s == "*" || s.eq_ignore_ascii_case("any") {
            Self::Any
        } else {
            Self::Book(BookId::new(s))
        }
    }
}

impl FromStr for BookFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<BookId> for BookFilter {
    fn from(id: BookId) -> Self {
        Self::Book(id)
    }
}

/// Tunable scanner thresholds.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ScanConfig {
    /// Pairings must make strictly more than this guaranteed profit.
    ///
    /// A small negative value surfaces near-breakeven pairings.
    #[serde(default)]
    pub min_profit: Decimal,

    /// Rounding applied to each sized hedge stake.
    #[serde(default)]
    pub rounding: Rounding,

    /// Quotes refreshed longer ago than this are ignored when scanning `as_of`
    /// a given instant.
    #[serde(default)]
    pub max_quote_age_secs: Option<u64>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_profit: Decimal::ZERO,
            rounding: Rounding::Exact,
            max_quote_age_secs: None,
        }
    }
}

/// Per-scan inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub offer: PromoOffer,
    pub source_book: BookFilter,
    pub hedge_book: BookFilter,
    pub top_n: usize,
    /// Reference instant for recency checks. `None` disables them.
    pub as_of: Option<DateTime<Utc>>,
}

impl ScanRequest {
    pub fn new(offer: PromoOffer, source_book: impl Into<BookFilter>, hedge_book: BookFilter) -> Self {
        Self {
            offer,
            source_book: source_book.into(),
            hedge_book,
            top_n: DEFAULT_TOP_N,
            as_of: None,
        }
    }

    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    #[must_use]
    pub fn as_of(mut self, at: DateTime<Utc>) -> Self {
        self.as_of = Some(at);
        self
    }
}

/// Why an item was left out of the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The game does not have exactly two sides.
    MalformedGame(DomainError),
    /// The game started at or before the scan instant.
    Started,
    /// A quote carries an unusable price.
    InvalidQuote { quote: Quote, error: DomainError },
    /// Sizing the hedge failed for this pairing.
    Pairing { source: Quote, hedge: Quote, error: DomainError },
    /// The sized pairing could not be assembled into an opportunity.
    Incomplete {
        source: Quote,
        hedge: Quote,
        error: OpportunityBuildError,
    },
}

/// A recorded per-item skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFailure {
    pub game: String,
    pub reason: SkipReason,
}

impl fmt::Display for ScanFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            SkipReason::MalformedGame(error) => write!(f, "{error}"),
            SkipReason::Started => write!(f, "{}: already started", self.game),
            SkipReason::InvalidQuote { quote, error } => write!(
                f,
                "{}: {} quote on {}: {error}",
                self.game, quote.book, quote.outcome
            ),
            SkipReason::Pairing { source, hedge, error } => write!(
                f,
                "{}: {} {} vs {} {}: {error}",
                self.game, source.book, source.odds, hedge.book, hedge.odds
            ),
            SkipReason::Incomplete { source, hedge, error } => write!(
                f,
                "{}: {} {} vs {} {}: {error}",
                self.game, source.book, source.odds, hedge.book, hedge.odds
            ),
        }
    }
}

/// Ranked opportunities plus everything that was skipped along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub opportunities: Vec<Opportunity>,
    pub failures: Vec<ScanFailure>,
    /// Number of source/hedge pairings that were sized.
    pub pairings: usize,
    /// Quotes ignored as stale.
    pub stale_quotes: usize,
}

/// Pick the hedge quote with the numerically largest American price.
///
/// Exact ties keep the earliest candidate.
pub fn best_hedge<'a, I>(candidates: I) -> Option<&'a Quote>
where
    I: IntoIterator<Item = &'a Quote>,
{
    candidates
        .into_iter()
        .reduce(|best, q| if q.odds > best.odds { q } else { best })
}

/// Opportunity scanner with fixed thresholds.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    config: ScanConfig,
    calculator: HedgeCalculator,
}

impl Scanner {
    #[must_use]
    pub fn new(config: ScanConfig) -> Self {
        let calculator = HedgeCalculator::new(config.rounding);
        Self { config, calculator }
    }

    /// Scan `games` and rank the surviving pairings.
    ///
    /// The output is a pure function of the inputs. Equal ratings keep input
    /// order: earlier games first, then earlier source quotes.
    pub fn scan(&self, games: &[Game], request: &ScanRequest) -> ScanReport {
        let mut report = ScanReport::default();

        for game in games {
            self.scan_game(game, request, &mut report);
        }

        report
            .opportunities
            .sort_by(|a, b| b.rating().cmp(&a.rating()));
        report.opportunities.truncate(request.top_n);

        debug!(
            games = games.len(),
            pairings = report.pairings,
            surfaced = report.opportunities.len(),
            skipped = report.failures.len(),
            "Scan complete"
        );

        report
    }

    fn scan_game(&self, game: &Game, request: &ScanRequest, report: &mut ScanReport) {
        if let Some(as_of) = request.as_of {
            if game.start_time <= as_of {
                debug!(game = %game, "Game already started, skipping");
                report.failures.push(ScanFailure {
                    game: game.to_string(),
                    reason: SkipReason::Started,
                });
                return;
            }
        }

        let sides = match game.sides() {
            Ok(sides) => sides,
            Err(error) => {
                debug!(game = %game, error = %error, "Skipping malformed game");
                report.failures.push(ScanFailure {
                    game: game.to_string(),
                    reason: SkipReason::MalformedGame(error),
                });
                return;
            }
        };

        let mut usable: Vec<&Quote> = Vec::with_capacity(game.quotes.len());
        for quote in &game.quotes {
            if self.is_stale(quote, request.as_of) {
                report.stale_quotes += 1;
                continue;
            }
            if let Err(error) = quote.odds.multiplier() {
                warn!(game = %game, book = %quote.book, error = %error, "Skipping invalid quote");
                report.failures.push(ScanFailure {
                    game: game.to_string(),
                    reason: SkipReason::InvalidQuote {
                        quote: quote.clone(),
                        error,
                    },
                });
                continue;
            }
            usable.push(quote);
        }

        for source in usable
            .iter()
            .copied()
            .filter(|q| request.source_book.matches(&q.book))
        {
            let Some(opposing) = sides.opposing(&source.outcome) else {
                continue;
            };

            let candidates = usable.iter().copied().filter(|q| {
                q.outcome == opposing
                    && q.book != source.book
                    && request.hedge_book.matches(&q.book)
            });
            let Some(hedge) = best_hedge(candidates) else {
                debug!(game = %game, book = %source.book, "No opposing hedge quote");
                continue;
            };

            report.pairings += 1;
            let result = match self
                .calculator
                .compute(&request.offer, source.odds, hedge.odds)
            {
                Ok(result) => result,
                Err(error) => {
                    warn!(game = %game, error = %error, "Hedge sizing failed");
                    report.failures.push(ScanFailure {
                        game: game.to_string(),
                        reason: SkipReason::Pairing {
                            source: source.clone(),
                            hedge: hedge.clone(),
                            error,
                        },
                    });
                    continue;
                }
            };

            if result.guaranteed_profit <= self.config.min_profit {
                debug!(
                    game = %game,
                    source = %source.odds,
                    hedge = %hedge.odds,
                    profit = %result.guaranteed_profit,
                    "Below profit threshold"
                );
                continue;
            }

            let built = Opportunity::builder()
                .game(game)
                .source(source.clone())
                .hedge(hedge.clone())
                .result(request.offer.kind(), result)
                .build();
            match built {
                Ok(opportunity) => report.opportunities.push(opportunity),
                Err(error) => {
                    warn!(game = %game, error = %error, "Incomplete opportunity");
                    report.failures.push(ScanFailure {
                        game: game.to_string(),
                        reason: SkipReason::Incomplete {
                            source: source.clone(),
                            hedge: hedge.clone(),
                            error,
                        },
                    });
                }
            }
        }
    }

    fn is_stale(&self, quote: &Quote, as_of: Option<DateTime<Utc>>) -> bool {
        let (Some(as_of), Some(max_age), Some(updated_at)) =
            (as_of, self.config.max_quote_age_secs, quote.updated_at)
        else {
            return false;
        };
        let age = as_of.signed_duration_since(updated_at).num_seconds();
        u64::try_from(age).is_ok_and(|age| age > max_age)
    }
}

/// Rank opportunities for `offer` across `games` with default thresholds.
///
/// Per-item failures are skipped silently; use [`Scanner::scan`] to inspect
/// them.
pub fn scan_opportunities(
    games: &[Game],
    offer: &PromoOffer,
    source_book: BookFilter,
    hedge_book: BookFilter,
    top_n: usize,
) -> Vec<Opportunity> {
    let request = ScanRequest::new(*offer, source_book, hedge_book).with_top_n(top_n);
    Scanner::default().scan(games, &request).opportunities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::odds::AmericanOdds;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn kickoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 11, 1, 18, 0, 0).unwrap()
    }

    fn quote(book: &str, outcome: &str, odds: i64) -> Quote {
        Quote::new(book, outcome, AmericanOdds::new(odds))
    }

    fn game(quotes: Vec<Quote>) -> Game {
        Game::new("Home", "Away", kickoff()).with_quotes(quotes)
    }

    fn request() -> ScanRequest {
        ScanRequest::new(
            PromoOffer::bonus_bet(dec!(100)),
            BookId::from("promo"),
            BookFilter::Any,
        )
    }

    #[test]
    fn best_hedge_prefers_largest_value() {
        let quotes = [quote("a", "Home", -110), quote("b", "Home", -400), quote("c", "Home", 150)];
        assert_eq!(best_hedge(&quotes).unwrap().odds, AmericanOdds::new(150));

        let quotes = [quote("a", "Home", -110), quote("b", "Home", -400)];
        assert_eq!(best_hedge(&quotes).unwrap().odds, AmericanOdds::new(-110));
    }

    #[test]
    fn best_hedge_keeps_first_on_tie() {
        let quotes = [quote("a", "Home", -110), quote("b", "Home", -110)];
        assert_eq!(best_hedge(&quotes).unwrap().book.as_str(), "a");
    }

    #[test]
    fn best_hedge_of_nothing_is_none() {
        assert!(best_hedge(std::iter::empty()).is_none());
    }

    #[test]
    fn book_filter_parses_any() {
        assert_eq!("any".parse::<BookFilter>().unwrap(), BookFilter::Any);
        assert_eq!("*".parse::<BookFilter>().unwrap(), BookFilter::Any);
        assert_eq!(
            "FanDuel".parse::<BookFilter>().unwrap(),
            BookFilter::Book(BookId::from("fanduel"))
        );
    }

    #[test]
    fn book_filter_from_str_slice() {
        assert_eq!(BookFilter::from(" ANY "), BookFilter::Any);
        assert_eq!(BookFilter::from(""), BookFilter::Any);
        assert_eq!(
            BookFilter::from(" Caesars "),
            BookFilter::Book(BookId::from("caesars"))
        );
    }

    #[test]
    fn incomplete_failure_names_both_quotes() {
        let failure = ScanFailure {
            game: "Away @ Home".to_string(),
            reason: SkipReason::Incomplete {
                source: quote("promo", "Away", 300),
                hedge: quote("other", "Home", -350),
                error: OpportunityBuildError::MissingResult,
            },
        };
        assert_eq!(
            failure.to_string(),
            "Away @ Home: promo +300 vs other -350: result and promo kind are required"
        );
    }

    #[test]
    fn pairs_source_with_opposing_label_from_other_book() {
        let games = [game(vec![
            quote("promo", "Away", 300),
            quote("promo", "Home", -280),
            quote("other", "Home", -350),
            quote("other", "Away", 250),
        ])];

        let report = Scanner::default().scan(&games, &request());

        // Promo Home -280 vs other Away +250 and promo Away +300 vs other Home -350.
        assert_eq!(report.pairings, 2);
        let first = &report.opportunities[0];
        assert_eq!(first.source().outcome, "Away");
        assert_eq!(first.hedge().book.as_str(), "other");
        assert_eq!(first.hedge().outcome, "Home");
    }

    #[test]
    fn never_hedges_at_the_source_book() {
        let games = [game(vec![quote("promo", "Away", 300), quote("promo", "Home", -350)])];
        let report = Scanner::default().scan(&games, &request());
        assert!(report.opportunities.is_empty());
        assert_eq!(report.pairings, 0);
    }

    #[test]
    fn hedge_filter_restricts_books() {
        let games = [game(vec![
            quote("promo", "Away", 300),
            quote("best", "Home", -300),
            quote("chosen", "Home", -400),
        ])];
        let mut req = request();
        req.hedge_book = BookFilter::Book(BookId::from("chosen"));

        let report = Scanner::default().scan(&games, &req);
        assert_eq!(report.opportunities[0].hedge().book.as_str(), "chosen");
    }

    #[test]
    fn malformed_game_is_recorded_not_raised() {
        let games = [
            game(vec![quote("promo", "Away", 300), quote("other", "Away", 280)]),
            game(vec![]),
        ];
        let report = Scanner::default().scan(&games, &request());

        assert!(report.opportunities.is_empty());
        assert_eq!(report.failures.len(), 2);
        assert!(matches!(
            report.failures[0].reason,
            SkipReason::MalformedGame(DomainError::MalformedGame { labels: 1, .. })
        ));
    }

    #[test]
    fn zero_priced_source_quote_is_recorded_and_skipped() {
        let games = [game(vec![
            quote("promo", "Away", 0),
            quote("promo", "Home", 200),
            quote("other", "Home", -350),
            quote("other", "Away", -150),
        ])];
        let report = Scanner::default().scan(&games, &request());

        assert_eq!(report.opportunities.len(), 1);
        assert_eq!(report.opportunities[0].source().outcome, "Home");
        assert!(matches!(
            &report.failures[0].reason,
            SkipReason::InvalidQuote { error: DomainError::InvalidOdds, .. }
        ));
    }

    #[test]
    fn invalid_offer_fails_per_pairing() {
        let games = [game(vec![quote("promo", "Away", 300), quote("other", "Home", -350)])];
        let mut req = request();
        req.offer = PromoOffer::bonus_bet(Decimal::ZERO);

        let report = Scanner::default().scan(&games, &req);
        assert!(report.opportunities.is_empty());
        assert!(matches!(report.failures[0].reason, SkipReason::Pairing { .. }));
    }

    #[test]
    fn discards_non_positive_profit() {
        // Cash no-sweat at 0% refund on a fair line makes nothing.
        let games = [game(vec![quote("promo", "Away", 100), quote("other", "Home", -100)])];
        let mut req = request();
        req.offer = PromoOffer::no_sweat(dec!(100), Decimal::ZERO);

        assert!(Scanner::default().scan(&games, &req).opportunities.is_empty());

        let lenient = Scanner::new(ScanConfig {
            min_profit: dec!(-2.0),
            ..ScanConfig::default()
        });
        assert_eq!(lenient.scan(&games, &req).opportunities.len(), 1);
    }

    #[test]
    fn started_games_are_skipped_when_scanning_as_of() {
        let games = [game(vec![quote("promo", "Away", 300), quote("other", "Home", -350)])];
        let req = request().as_of(kickoff());

        let report = Scanner::default().scan(&games, &req);
        assert!(report.opportunities.is_empty());
        assert_eq!(report.failures[0].reason, SkipReason::Started);
    }

    #[test]
    fn stale_quotes_are_ignored() {
        let as_of = kickoff() - Duration::hours(2);
        let games = [game(vec![
            quote("promo", "Away", 300).with_updated_at(as_of - Duration::minutes(1)),
            quote("other", "Home", -200).with_updated_at(as_of - Duration::hours(1)),
            quote("third", "Home", -350).with_updated_at(as_of - Duration::minutes(5)),
        ])];
        let scanner = Scanner::new(ScanConfig {
            max_quote_age_secs: Some(900),
            ..ScanConfig::default()
        });

        let report = scanner.scan(&games, &request().as_of(as_of));
        assert_eq!(report.stale_quotes, 1);
        assert_eq!(report.opportunities[0].hedge().book.as_str(), "third");
    }

    #[test]
    fn truncates_to_top_n() {
        let games: Vec<Game> = (0..5)
            .map(|i| game(vec![quote("promo", "Away", 300 + i * 10), quote("other", "Home", -350)]))
            .collect();
        let opps = scan_opportunities(
            &games,
            &PromoOffer::bonus_bet(dec!(50)),
            BookFilter::Book(BookId::from("promo")),
            BookFilter::Any,
            3,
        );
        assert_eq!(opps.len(), 3);
        assert_eq!(opps[0].source().odds, AmericanOdds::new(340));
    }
}
