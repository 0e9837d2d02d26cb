//! Handler for the `convert` command.

use rust_decimal::Decimal;
use serde_json::json;
use tabled::Tabled;

use super::{output, ConvertArgs};
use crate::error::Result;

#[derive(Tabled)]
struct PriceRow {
    #[tabled(rename = "American")]
    american: String,
    #[tabled(rename = "Multiplier")]
    multiplier: String,
    #[tabled(rename = "Decimal")]
    decimal: String,
    #[tabled(rename = "Implied")]
    implied: String,
}

/// Execute `convert`.
pub fn execute(args: &ConvertArgs) -> Result<()> {
    let mut rows = Vec::with_capacity(args.odds.len());
    for odds in &args.odds {
        let multiplier = odds.multiplier()?;
        let decimal = odds.decimal_odds()?;
        let implied = odds.implied_probability()?;

        if output::is_json() {
            output::json_output(
                "price",
                json!({
                    "american": odds,
                    "multiplier": multiplier,
                    "decimal_odds": decimal,
                    "implied_probability": implied,
                }),
            );
            continue;
        }

        rows.push(PriceRow {
            american: odds.to_string(),
            multiplier: format!("{:.4}", multiplier.round_dp(4)),
            decimal: format!("{:.4}", decimal.round_dp(4)),
            implied: format!("{:.2}%", (implied * Decimal::ONE_HUNDRED).round_dp(2)),
        });
    }

    output::table(rows);
    Ok(())
}
