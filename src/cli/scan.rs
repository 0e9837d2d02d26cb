//! Handler for the `scan` command.

use std::path::Path;

use rust_decimal::Decimal;
use serde_json::json;
use tabled::Tabled;
use tracing::info;

use super::calc::{dollars, percent};
use super::{output, FormatArg, ScanArgs};
use crate::config::Config;
use crate::domain::{BookFilter, Opportunity, PromoKind, ScanRequest, Scanner};
use crate::error::Result;
use crate::feed::{self, FeedFormat};

impl From<FormatArg> for FeedFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Events => Self::Events,
            FormatArg::Games => Self::Games,
        }
    }
}

#[derive(Tabled)]
struct OpportunityRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Game")]
    game: String,
    #[tabled(rename = "Bet")]
    source: String,
    #[tabled(rename = "Hedge")]
    hedge: String,
    #[tabled(rename = "Hedge stake")]
    stake: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Conversion")]
    conversion: String,
}

impl OpportunityRow {
    fn new(rank: usize, opportunity: &Opportunity) -> Self {
        let source = opportunity.source();
        let hedge = opportunity.hedge();
        let result = opportunity.result();
        Self {
            rank,
            game: opportunity.game().to_string(),
            source: format!("{} {} @ {}", source.outcome, source.odds, source.book),
            hedge: format!("{} {} @ {}", hedge.outcome, hedge.odds, hedge.book),
            stake: dollars(result.hedge_stake),
            profit: output::signed(
                dollars(result.guaranteed_profit),
                result.guaranteed_profit > Decimal::ZERO,
            ),
            conversion: percent(result.conversion_pct),
        }
    }
}

/// Execute `scan`.
pub fn execute(config_path: &Path, args: &ScanArgs) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    config.init_logging();

    let games = feed::load(&args.games, args.format.into())?;
    let offer = args.offer.to_offer(config.calculator.refund_rate);
    offer.validate()?;

    let mut scan_config = config.scan_config();
    if let Some(min_profit) = args.min_profit {
        scan_config.min_profit = min_profit;
    }
    if let Some(round) = args.offer.round {
        scan_config.rounding = round.into();
    }

    let source_book = BookFilter::from(args.source_book.as_str());
    let hedge_book = BookFilter::from(args.hedge_book.as_str());
    let mut request = ScanRequest::new(offer, source_book, hedge_book)
        .with_top_n(args.top.unwrap_or(config.scanner.top_n));
    if let Some(at) = args.as_of {
        request = request.as_of(at);
    }

    let report = Scanner::new(scan_config).scan(&games, &request);
    info!(
        games = games.len(),
        pairings = report.pairings,
        opportunities = report.opportunities.len(),
        skipped = report.failures.len(),
        "Scan complete"
    );

    if output::is_json() {
        for opportunity in &report.opportunities {
            output::json_output("opportunity", json!(opportunity));
        }
        for failure in &report.failures {
            output::warning(&failure.to_string());
        }
        output::json_output(
            "summary",
            json!({
                "games": games.len(),
                "pairings": report.pairings,
                "opportunities": report.opportunities.len(),
                "skipped": report.failures.len(),
                "stale_quotes": report.stale_quotes,
            }),
        );
        return Ok(());
    }

    output::section(&format!(
        "{} opportunities ({} via {} -> {})",
        match offer.kind() {
            PromoKind::BonusBet => "Bonus bet",
            PromoKind::ProfitBoost => "Profit boost",
            PromoKind::NoSweatBet => "No-sweat",
        },
        dollars(offer.stake()),
        request.source_book,
        request.hedge_book,
    ));
    for failure in &report.failures {
        output::warning(&failure.to_string());
    }

    if report.opportunities.is_empty() {
        output::note("No opportunities above the profit threshold");
    } else {
        output::table(
            report
                .opportunities
                .iter()
                .enumerate()
                .map(|(i, opportunity)| OpportunityRow::new(i + 1, opportunity)),
        );
    }

    output::field("Games", games.len());
    output::field("Pairings sized", report.pairings);
    if report.stale_quotes > 0 {
        output::field("Stale quotes", report.stale_quotes);
    }
    Ok(())
}
