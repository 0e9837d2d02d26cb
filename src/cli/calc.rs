//! Handler for the `calc` command.

use std::path::Path;

use rust_decimal::Decimal;
use serde_json::json;
use tabled::Tabled;
use tracing::debug;

use super::{output, CalcArgs};
use crate::config::Config;
use crate::domain::{HedgeCalculator, HedgeResult, Money, PromoOffer, Scenario};
use crate::error::Result;

#[derive(Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Outcome")]
    outcome: &'static str,
    #[tabled(rename = "Payout")]
    payout: String,
    #[tabled(rename = "Outlay")]
    outlay: String,
    #[tabled(rename = "Profit")]
    profit: String,
}

impl ScenarioRow {
    fn new(outcome: &'static str, scenario: &Scenario) -> Self {
        Self {
            outcome,
            payout: dollars(scenario.payout),
            outlay: dollars(scenario.outlay),
            profit: dollars(scenario.profit),
        }
    }
}

pub(super) fn dollars(value: Money) -> String {
    format!("${:.2}", value.round_dp(2))
}

pub(super) fn percent(value: Decimal) -> String {
    format!("{:.2}%", value.round_dp(2))
}

fn describe(offer: &PromoOffer) -> String {
    match *offer {
        PromoOffer::BonusBet { stake } => format!("{} bonus bet", dollars(stake)),
        PromoOffer::ProfitBoost { stake, boost_pct } => {
            format!("{} with {boost_pct}% profit boost", dollars(stake))
        }
        PromoOffer::NoSweatBet { stake, refund_rate } => format!(
            "{} no-sweat, refund converted at {}",
            dollars(stake),
            percent(refund_rate * Decimal::ONE_HUNDRED)
        ),
    }
}

/// Execute `calc`.
pub fn execute(config_path: &Path, args: &CalcArgs) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    config.init_logging();

    let offer = args.offer.to_offer(config.calculator.refund_rate);
    let calculator = args
        .offer
        .round
        .map_or_else(|| config.calculator(), |round| HedgeCalculator::new(round.into()));
    let result = calculator.compute(&offer, args.source, args.hedge)?;
    debug!(
        promo = offer.kind().as_str(),
        rounding = calculator.rounding().as_str(),
        source = %args.source,
        hedge = %args.hedge,
        hedge_stake = %result.hedge_stake,
        "Sized hedge"
    );

    if output::is_json() {
        output::json_output(
            "hedge",
            json!({
                "offer": offer,
                "source_odds": args.source,
                "hedge_odds": args.hedge,
                "result": result,
            }),
        );
        return Ok(());
    }

    render(&offer, args, &result);
    Ok(())
}

fn render(offer: &PromoOffer, args: &CalcArgs, result: &HedgeResult) {
    output::section("Hedge");
    output::field("Promo", describe(offer));
    output::field("Source odds", args.source);
    output::field("Hedge odds", args.hedge);
    output::field("Hedge stake", output::highlight(dollars(result.hedge_stake)));
    output::field(
        "Guaranteed profit",
        output::signed(
            dollars(result.guaranteed_profit),
            result.guaranteed_profit > Decimal::ZERO,
        ),
    );
    output::field("Conversion", percent(result.conversion_pct));

    output::section("Scenarios");
    output::table([
        ScenarioRow::new("Promo wins", &result.if_source_wins),
        ScenarioRow::new("Hedge wins", &result.if_hedge_wins),
    ]);
}
