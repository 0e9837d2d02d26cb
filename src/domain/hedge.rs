//! Hedge sizing for promotional offers.
//!
//! The hedge stake `H` is chosen so the net result is the same whichever side
//! wins. Writing `R` for the total returned by the promo leg when it wins,
//! `F` for the value returned when it loses (the no-sweat refund), and `h` for
//! the hedge multiplier, both outcomes pay the same cash outlay, so
//! equalizing them reduces to `R = H·(1 + h) + F`, i.e.
//!
//! ```text
//! H = (R − F) / (1 + h)
//! ```
//!
//! | offer        | R             | F     | cash outlay |
//! |--------------|---------------|-------|-------------|
//! | bonus bet    | `W·s`         | 0     | `H`         |
//! | profit boost | `W·(1 + s')`  | 0     | `W + H`     |
//! | no-sweat     | `W·(1 + s)`   | `W·r` | `W + H`     |
//!
//! with `s' = s·(1 + boost/100)`. The guaranteed profit is the smaller of the
//! two branch profits, which only differ once the stake has been rounded.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::money::{Money, Multiplier};
use super::odds::AmericanOdds;
use super::offer::PromoOffer;

/// Post-processing applied to the hedge stake before profits are settled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Keep the exact equalizing stake.
    #[default]
    Exact,
    /// Round to whole dollars, the way most books accept stakes.
    NearestUnit,
    /// Round to cents.
    Cents,
}

impl Rounding {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::NearestUnit => "nearest_unit",
            Self::Cents => "cents",
        }
    }

    /// Apply this policy to a stake. Midpoints round away from zero.
    #[must_use]
    pub fn apply(self, value: Money) -> Money {
        let dp = match self {
            Self::Exact => return value,
            Self::NearestUnit => 0,
            Self::Cents => 2,
        };
        value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Money flow of one settlement branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scenario {
    /// Total credited back to the bettor, refunds included.
    pub payout: Money,
    /// Cash put at risk across both legs.
    pub outlay: Money,
    /// `payout − outlay`.
    pub profit: Money,
}

impl Scenario {
    fn new(payout: Money, outlay: Money) -> Self {
        Self {
            payout,
            outlay,
            profit: payout - outlay,
        }
    }
}

/// Outcome of sizing a hedge against one promo wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HedgeResult {
    pub hedge_stake: Money,
    /// Floor of the two branch profits.
    pub guaranteed_profit: Money,
    /// Guaranteed profit as a percentage of the promo stake.
    pub conversion_pct: Decimal,
    pub if_source_wins: Scenario,
    pub if_hedge_wins: Scenario,
}

/// Promo-leg cash flows, independent of the hedge stake.
struct PromoLeg {
    stake: Money,
    cash_stake: Money,
    win_return: Money,
    loss_return: Money,
}

fn mul(a: Decimal, b: Decimal) -> Result<Decimal, DomainError> {
    a.checked_mul(b).ok_or(DomainError::Overflow)
}

fn add(a: Decimal, b: Decimal) -> Result<Decimal, DomainError> {
    a.checked_add(b).ok_or(DomainError::Overflow)
}

fn div(a: Decimal, b: Decimal) -> Result<Decimal, DomainError> {
    a.checked_div(b).ok_or(DomainError::Overflow)
}

impl PromoLeg {
    fn new(offer: &PromoOffer, source: Multiplier) -> Result<Self, DomainError> {
        let leg = match *offer {
            PromoOffer::BonusBet { stake } => Self {
                stake,
                cash_stake: Decimal::ZERO,
                win_return: mul(stake, source)?,
                loss_return: Decimal::ZERO,
            },
            PromoOffer::ProfitBoost { stake, boost_pct } => {
                let factor = add(Decimal::ONE, div(boost_pct, Decimal::ONE_HUNDRED)?)?;
                let boosted = mul(source, factor)?;
                Self {
                    stake,
                    cash_stake: stake,
                    win_return: mul(stake, add(Decimal::ONE, boosted)?)?,
                    loss_return: Decimal::ZERO,
                }
            }
            PromoOffer::NoSweatBet { stake, refund_rate } => Self {
                stake,
                cash_stake: stake,
                win_return: mul(stake, add(Decimal::ONE, source)?)?,
                loss_return: mul(stake, refund_rate)?,
            },
        };
        Ok(leg)
    }

    fn equalizing_hedge(&self, hedge: Multiplier) -> Result<Money, DomainError> {
        // win_return >= loss_return >= 0
        div(self.win_return - self.loss_return, add(Decimal::ONE, hedge)?)
    }

    fn settle(&self, hedge_stake: Money, hedge: Multiplier) -> Result<HedgeResult, DomainError> {
        let outlay = add(self.cash_stake, hedge_stake)?;
        let if_source_wins = Scenario::new(self.win_return, outlay);
        let hedge_payout = mul(hedge_stake, add(Decimal::ONE, hedge)?)?;
        let if_hedge_wins = Scenario::new(add(hedge_payout, self.loss_return)?, outlay);
        let guaranteed_profit = if_source_wins.profit.min(if_hedge_wins.profit);

        Ok(HedgeResult {
            hedge_stake,
            guaranteed_profit,
            conversion_pct: mul(div(guaranteed_profit, self.stake)?, Decimal::ONE_HUNDRED)?,
            if_source_wins,
            if_hedge_wins,
        })
    }
}

/// Hedge sizer with an explicit rounding policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HedgeCalculator {
    rounding: Rounding,
}

impl HedgeCalculator {
    #[must_use]
    pub const fn new(rounding: Rounding) -> Self {
        Self { rounding }
    }

    #[must_use]
    pub const fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Size the hedge for `offer` placed at `source_odds`, hedged at `hedge_odds`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidStake`], [`DomainError::InvalidBoost`] or
    /// [`DomainError::InvalidRefundRate`] for bad offer terms,
    /// [`DomainError::InvalidOdds`] when either price is zero, and
    /// [`DomainError::Overflow`] when a payout leaves the decimal range.
    pub fn compute(
        &self,
        offer: &PromoOffer,
        source_odds: AmericanOdds,
        hedge_odds: AmericanOdds,
    ) -> Result<HedgeResult, DomainError> {
        offer.validate()?;
        let source = source_odds.multiplier()?;
        let hedge = hedge_odds.multiplier()?;

        let leg = PromoLeg::new(offer, source)?;
        let stake = self.rounding.apply(leg.equalizing_hedge(hedge)?);
        leg.settle(stake, hedge)
    }
}

/// Size a hedge with the exact (unrounded) stake.
///
/// # Errors
///
/// See [`HedgeCalculator::compute`].
///
/// # Examples
///
/// ```
/// use hedgepro::domain::hedge::compute_hedge;
/// use hedgepro::domain::odds::AmericanOdds;
/// use hedgepro::domain::offer::PromoOffer;
/// use rust_decimal_macros::dec;
///
/// let offer = PromoOffer::bonus_bet(dec!(100));
/// let result = compute_hedge(&offer, AmericanOdds::new(400), AmericanOdds::new(-400)).unwrap();
///
/// assert_eq!(result.hedge_stake, dec!(320));
/// assert_eq!(result.guaranteed_profit, dec!(80));
/// ```
pub fn compute_hedge(
    offer: &PromoOffer,
    source_odds: AmericanOdds,
    hedge_odds: AmericanOdds,
) -> Result<HedgeResult, DomainError> {
    HedgeCalculator::default().compute(offer, source_odds, hedge_odds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const TOLERANCE: Decimal = dec!(0.000001);

    fn close(a: Decimal, b: Decimal) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn odds(v: i64) -> AmericanOdds {
        AmericanOdds::new(v)
    }

    #[test]
    fn bonus_bet_equalizes_both_branches() {
        let offer = PromoOffer::bonus_bet(dec!(100));
        let r = compute_hedge(&offer, odds(250), odds(-200)).unwrap();

        // H = 250 / 1.5
        assert!(close(r.hedge_stake, dec!(166.666667)));
        assert!(close(r.if_source_wins.profit, dec!(250) - r.hedge_stake));
        assert!(close(r.if_hedge_wins.profit, r.hedge_stake * dec!(0.5)));
        assert!(close(r.if_source_wins.profit, r.if_hedge_wins.profit));
        assert!(close(r.guaranteed_profit, dec!(83.333333)));
        assert!(r.if_source_wins.profit >= Decimal::ZERO);
        assert!(r.if_hedge_wins.profit >= Decimal::ZERO);
    }

    #[test]
    fn bonus_bet_outlay_is_hedge_only() {
        let r = compute_hedge(&PromoOffer::bonus_bet(dec!(50)), odds(300), odds(-300)).unwrap();
        assert_eq!(r.if_source_wins.outlay, r.hedge_stake);
        assert_eq!(r.if_source_wins.payout, dec!(150));
    }

    #[test]
    fn profit_boost_applies_to_net_winnings() {
        // s = 1.5, boosted to 2.25; R = 100 * 3.25 = 325; h = 100/120
        let offer = PromoOffer::profit_boost(dec!(100), dec!(50));
        let r = compute_hedge(&offer, odds(150), odds(-120)).unwrap();

        assert_eq!(r.if_source_wins.payout, dec!(325));
        // H = 325 / (1 + 5/6) = 177.2727...
        assert!(close(r.hedge_stake, dec!(177.272727)));
        assert!(close(r.if_source_wins.profit, r.if_hedge_wins.profit));
        assert!(close(r.guaranteed_profit, dec!(47.727273)));
    }

    #[test]
    fn zero_boost_is_plain_cash_bet() {
        let offer = PromoOffer::profit_boost(dec!(100), Decimal::ZERO);
        let r = compute_hedge(&offer, odds(100), odds(-100)).unwrap();
        assert_eq!(r.hedge_stake, dec!(100));
        assert_eq!(r.guaranteed_profit, Decimal::ZERO);
    }

    #[test]
    fn no_sweat_regression_fixture() {
        // s = 3, h = 2/7; H = 100 * 3.3 / (9/7) = 256.666...
        let offer = PromoOffer::no_sweat(dec!(100), dec!(0.70));
        let r = compute_hedge(&offer, odds(300), odds(-350)).unwrap();

        assert!(close(r.hedge_stake, dec!(256.666667)));
        assert!(close(r.guaranteed_profit, dec!(43.333333)));
        assert!(close(r.conversion_pct, dec!(43.333333)));
        assert!(close(r.if_source_wins.profit, r.if_hedge_wins.profit));
        assert_eq!(r.if_hedge_wins.outlay, dec!(100) + r.hedge_stake);
    }

    #[test]
    fn full_refund_no_sweat_only_needs_net_hedge() {
        // r = 1 means losing costs nothing: H = W·s / (1 + h)
        let offer = PromoOffer::no_sweat(dec!(100), Decimal::ONE);
        let r = compute_hedge(&offer, odds(200), odds(-200)).unwrap();
        assert!(close(r.hedge_stake, dec!(133.333333)));
    }

    #[test]
    fn conversion_pct_is_profit_over_stake() {
        let r = compute_hedge(&PromoOffer::bonus_bet(dec!(100)), odds(400), odds(-400)).unwrap();
        assert_eq!(r.hedge_stake, dec!(320));
        assert_eq!(r.guaranteed_profit, dec!(80));
        assert_eq!(r.conversion_pct, dec!(80));
    }

    #[test]
    fn identical_inputs_give_identical_results() {
        let offer = PromoOffer::no_sweat_default(dec!(40));
        let first = compute_hedge(&offer, odds(275), odds(-320)).unwrap();
        let second = compute_hedge(&offer, odds(275), odds(-320)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rounding_rederives_profit_from_rounded_stake() {
        let offer = PromoOffer::bonus_bet(dec!(100));
        let exact = compute_hedge(&offer, odds(250), odds(-200)).unwrap();
        let rounded = HedgeCalculator::new(Rounding::NearestUnit)
            .compute(&offer, odds(250), odds(-200))
            .unwrap();

        assert_eq!(rounded.hedge_stake, dec!(167));
        assert_eq!(rounded.if_source_wins.profit, dec!(83));
        assert_eq!(rounded.if_hedge_wins.profit, dec!(83.5));
        assert_eq!(rounded.guaranteed_profit, dec!(83));
        assert_ne!(rounded.guaranteed_profit, exact.guaranteed_profit);
    }

    #[test]
    fn cents_rounding_keeps_two_places() {
        let offer = PromoOffer::no_sweat_default(dec!(100));
        let r = HedgeCalculator::new(Rounding::Cents)
            .compute(&offer, odds(300), odds(-350))
            .unwrap();
        assert_eq!(r.hedge_stake, dec!(256.67));
        assert_eq!(r.if_source_wins.profit, dec!(43.33));
    }

    #[test]
    fn rounding_policy_midpoint_goes_away_from_zero() {
        assert_eq!(Rounding::NearestUnit.apply(dec!(12.5)), dec!(13));
        assert_eq!(Rounding::Cents.apply(dec!(0.125)), dec!(0.13));
        assert_eq!(Rounding::Exact.apply(dec!(0.125)), dec!(0.125));
    }

    #[test]
    fn rejects_non_positive_stake() {
        let result = compute_hedge(&PromoOffer::bonus_bet(dec!(0)), odds(200), odds(-200));
        assert_eq!(
            result,
            Err(DomainError::InvalidStake {
                stake: Decimal::ZERO
            })
        );
    }

    #[test]
    fn propagates_invalid_odds_from_either_side() {
        let offer = PromoOffer::bonus_bet(dec!(10));
        assert_eq!(
            compute_hedge(&offer, odds(0), odds(-200)),
            Err(DomainError::InvalidOdds)
        );
        assert_eq!(
            compute_hedge(&offer, odds(200), odds(0)),
            Err(DomainError::InvalidOdds)
        );
    }

    #[test]
    fn oversized_stake_is_an_error_not_a_panic() {
        let offer = PromoOffer::bonus_bet(Decimal::MAX);
        assert_eq!(
            compute_hedge(&offer, odds(500), odds(-200)),
            Err(DomainError::Overflow)
        );
    }

    #[test]
    fn extreme_price_overflow_is_reported() {
        let offer = PromoOffer::bonus_bet(dec!(1_000_000_000_000_000));
        assert_eq!(
            compute_hedge(&offer, odds(i64::MAX), odds(-200)),
            Err(DomainError::Overflow)
        );

        let boost = PromoOffer::profit_boost(dec!(100), Decimal::MAX);
        assert_eq!(
            compute_hedge(&boost, odds(250), odds(-300)),
            Err(DomainError::Overflow)
        );
    }

    #[test]
    fn extreme_hedge_price_still_sizes() {
        let offer = PromoOffer::no_sweat_default(dec!(100));
        let r = compute_hedge(&offer, odds(300), odds(i64::MAX)).unwrap();
        assert!(r.hedge_stake > Decimal::ZERO);
        assert!(r.guaranteed_profit > Decimal::ZERO);
    }
}
