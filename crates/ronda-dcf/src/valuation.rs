//! Terminal value, firm and equity value, and the fair-value verdict.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::debug;

use ronda_capital::DiscountRateBand;
use ronda_core::{Result, ValuationError};

use crate::projection::{Projection, ProjectionAssumptions, project_cash_flows};

/// Scalar inputs shared by every valuation scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationInputs {
    /// Trailing-twelve-month revenue the projection grows from.
    pub baseline_revenue: f64,
    /// Debt netted out of the firm value.
    pub net_debt: f64,
    /// Cash and equivalents added back to the equity value.
    pub cash: f64,
    /// Diluted shares outstanding, must be positive.
    pub shares_outstanding: f64,
    /// Current market price per share the verdict is judged against.
    pub market_price: f64,
}

/// One discount-rate scenario's DCF outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioValuation {
    /// Explicit-horizon projection the scenario was built from.
    pub projection: Projection,
    /// Gordon Growth value of cash flows beyond the horizon.
    pub terminal_value: f64,
    /// Terminal value discounted back to today.
    pub terminal_value_pv: f64,
    /// Sum of the discounted explicit-horizon cash flows.
    pub pv_of_cash_flows: f64,
    /// PV of cash flows plus PV of the terminal value.
    pub firm_value: f64,
    /// Firm value less net debt plus cash.
    pub equity_value: f64,
    /// Equity value per share outstanding.
    pub implied_share_price: f64,
}

impl ScenarioValuation {
    /// Discount rate the scenario was valued at.
    #[must_use]
    pub const fn discount_rate(&self) -> f64 {
        self.projection.discount_rate
    }
}

/// Categorical call of the market price against the implied band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Verdict {
    /// Market price sits below the lowest implied share price.
    #[display("undervalued")]
    Undervalued,
    /// Market price falls inside the implied band.
    #[display("fairly valued")]
    FairlyValued,
    /// Market price sits above the highest implied share price.
    #[display("overvalued")]
    Overvalued,
}

/// Three scenario valuations and the verdict their band implies.
///
/// Scenarios are keyed by discount rate; because a lower rate discounts
/// less, the lower-rate scenario carries the higher implied price. The
/// `implied_low`/`implied_high` band is therefore ordered by value, not
/// by scenario label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Scenario at the lower discount-rate bound.
    pub lower: ScenarioValuation,
    /// Scenario at the mid discount rate.
    pub mid: ScenarioValuation,
    /// Scenario at the upper discount-rate bound.
    pub upper: ScenarioValuation,
    /// Low end of the implied share-price band.
    pub implied_low: f64,
    /// High end of the implied share-price band.
    pub implied_high: f64,
    /// Market price the band was judged against.
    pub market_price: f64,
    /// Categorical call implied by the band.
    pub verdict: Verdict,
}

/// Gordon Growth value of the flows beyond the explicit horizon.
///
/// # Errors
///
/// Returns [`ValuationError::NonConvergentTerminalValue`] whenever the
/// discount rate does not exceed the terminal growth rate; the perpetuity
/// does not converge there and no clamping is applied.
pub fn terminal_value(last_fcf: f64, discount_rate: f64, terminal_growth: f64) -> Result<f64> {
    if discount_rate <= terminal_growth {
        return Err(ValuationError::NonConvergentTerminalValue {
            discount_rate,
            terminal_growth,
        });
    }
    Ok(last_fcf * (1.0 + terminal_growth) / (discount_rate - terminal_growth))
}

/// Values one discount-rate scenario end to end.
///
/// Projects cash flows, caps them with the Gordon Growth terminal value,
/// and bridges from firm value to an implied share price.
///
/// # Errors
///
/// Returns [`ValuationError::DegenerateInput`] when shares outstanding
/// are not positive, [`ValuationError::NonConvergentTerminalValue`] when
/// the rate does not exceed terminal growth, and any projection error
/// from [`project_cash_flows`].
pub fn value_scenario(
    inputs: &ValuationInputs,
    assumptions: &ProjectionAssumptions,
    discount_rate: f64,
) -> Result<ScenarioValuation> {
    if inputs.shares_outstanding <= 0.0 {
        return Err(ValuationError::DegenerateInput {
            context: format!(
                "shares outstanding must be positive, got {}",
                inputs.shares_outstanding
            ),
        });
    }

    let projection = project_cash_flows(inputs.baseline_revenue, assumptions, discount_rate)?;
    let last_fcf = projection
        .periods
        .last()
        .map(|p| p.free_cash_flow)
        .ok_or_else(|| ValuationError::InsufficientData {
            required: 1,
            actual: 0,
            context: "projected periods".to_string(),
        })?;

    let terminal = terminal_value(last_fcf, discount_rate, assumptions.terminal_growth)?;
    let terminal_value_pv = terminal / (1.0 + discount_rate).powi(assumptions.horizon as i32);
    let pv_of_cash_flows = projection.present_value_total();
    let firm_value = pv_of_cash_flows + terminal_value_pv;
    let equity_value = firm_value - inputs.net_debt + inputs.cash;
    let implied_share_price = equity_value / inputs.shares_outstanding;

    debug!(discount_rate, implied_share_price, "valued scenario");

    Ok(ScenarioValuation {
        projection,
        terminal_value: terminal,
        terminal_value_pv,
        pv_of_cash_flows,
        firm_value,
        equity_value,
        implied_share_price,
    })
}

/// Values all three discount-rate scenarios and classifies the market
/// price against the implied band.
///
/// # Errors
///
/// Propagates the first scenario failure; see [`value_scenario`].
pub fn value_equity(
    inputs: &ValuationInputs,
    assumptions: &ProjectionAssumptions,
    rates: &DiscountRateBand,
) -> Result<ValuationResult> {
    let lower = value_scenario(inputs, assumptions, rates.lower.wacc)?;
    let mid = value_scenario(inputs, assumptions, rates.mid.wacc)?;
    let upper = value_scenario(inputs, assumptions, rates.upper.wacc)?;

    let implied_low = lower
        .implied_share_price
        .min(mid.implied_share_price)
        .min(upper.implied_share_price);
    let implied_high = lower
        .implied_share_price
        .max(mid.implied_share_price)
        .max(upper.implied_share_price);
    let verdict = classify(inputs.market_price, implied_low, implied_high);

    debug!(implied_low, implied_high, %verdict, "assembled fair-value band");

    Ok(ValuationResult {
        lower,
        mid,
        upper,
        implied_low,
        implied_high,
        market_price: inputs.market_price,
        verdict,
    })
}

/// Classifies a market price against an implied fair-value band.
///
/// Prices on the band edges count as fairly valued.
#[must_use]
pub const fn classify(market_price: f64, implied_low: f64, implied_high: f64) -> Verdict {
    if market_price < implied_low {
        Verdict::Undervalued
    } else if market_price > implied_high {
        Verdict::Overvalued
    } else {
        Verdict::FairlyValued
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ronda_capital::DiscountRateEstimate;

    use super::*;

    fn base_inputs() -> ValuationInputs {
        ValuationInputs {
            baseline_revenue: 100.0,
            net_debt: 0.0,
            cash: 0.0,
            shares_outstanding: 10.0,
            market_price: 40.0,
        }
    }

    fn single_period_assumptions() -> ProjectionAssumptions {
        ProjectionAssumptions {
            horizon: 1,
            growth_rates: vec![0.10],
            operating_margins: vec![0.40],
            reinvestment_rates: vec![0.20],
            terminal_growth: 0.03,
            tax_rate: 0.25,
        }
    }

    fn rate_estimate(wacc: f64) -> DiscountRateEstimate {
        DiscountRateEstimate {
            cost_of_equity: wacc,
            cost_of_debt: 0.05,
            tax_rate: 0.25,
            equity_weight: 1.0,
            debt_weight: 0.0,
            wacc,
        }
    }

    fn band(lower: f64, mid: f64, upper: f64) -> DiscountRateBand {
        DiscountRateBand {
            lower: rate_estimate(lower),
            mid: rate_estimate(mid),
            upper: rate_estimate(upper),
        }
    }

    #[test]
    fn test_single_period_valuation() {
        let scenario =
            value_scenario(&base_inputs(), &single_period_assumptions(), 0.10).unwrap();

        let period = &scenario.projection.periods[0];
        assert_relative_eq!(period.revenue, 110.0, epsilon = 1e-9);
        assert_relative_eq!(period.operating_income, 44.0, epsilon = 1e-9);
        assert_relative_eq!(period.nopat, 33.0, epsilon = 1e-9);
        assert_relative_eq!(period.free_cash_flow, 26.4, epsilon = 1e-9);
        assert_relative_eq!(period.present_value, 24.0, epsilon = 1e-9);

        // TV = 26.4 * 1.03 / 0.07, discounted one period at 10%
        assert_relative_eq!(scenario.terminal_value, 388.45714285714286, epsilon = 1e-9);
        assert_relative_eq!(
            scenario.terminal_value_pv,
            353.14285714285717,
            epsilon = 1e-9
        );
        assert_relative_eq!(scenario.pv_of_cash_flows, 24.0, epsilon = 1e-9);
        assert_relative_eq!(scenario.firm_value, 377.14285714285717, epsilon = 1e-9);
        assert_relative_eq!(scenario.equity_value, scenario.firm_value);
        assert_relative_eq!(
            scenario.implied_share_price,
            37.714285714285715,
            epsilon = 1e-9
        );
        assert_relative_eq!(scenario.discount_rate(), 0.10);
    }

    #[test]
    fn test_equity_bridge_nets_debt_and_adds_cash() {
        let inputs = ValuationInputs {
            net_debt: 50.0,
            cash: 20.0,
            ..base_inputs()
        };
        let unlevered =
            value_scenario(&base_inputs(), &single_period_assumptions(), 0.10).unwrap();
        let levered = value_scenario(&inputs, &single_period_assumptions(), 0.10).unwrap();

        assert_relative_eq!(levered.firm_value, unlevered.firm_value);
        assert_relative_eq!(
            levered.equity_value,
            unlevered.equity_value - 30.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            levered.implied_share_price,
            levered.equity_value / 10.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_terminal_value_requires_rate_above_growth() {
        assert!(terminal_value(26.4, 0.10, 0.03).is_ok());
        assert!(terminal_value(26.4, 0.0301, 0.03).is_ok());

        for (rate, growth) in [(0.03, 0.03), (0.02, 0.03), (-0.01, 0.0)] {
            let err = terminal_value(26.4, rate, growth).unwrap_err();
            match err {
                ValuationError::NonConvergentTerminalValue {
                    discount_rate,
                    terminal_growth,
                } => {
                    assert_relative_eq!(discount_rate, rate);
                    assert_relative_eq!(terminal_growth, growth);
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_scenario_fails_when_rate_at_terminal_growth() {
        let err = value_scenario(&base_inputs(), &single_period_assumptions(), 0.03).unwrap_err();
        assert!(matches!(
            err,
            ValuationError::NonConvergentTerminalValue { .. }
        ));
    }

    #[test]
    fn test_zero_or_negative_shares_rejected() {
        for shares in [0.0, -5.0] {
            let inputs = ValuationInputs {
                shares_outstanding: shares,
                ..base_inputs()
            };
            let err = value_scenario(&inputs, &single_period_assumptions(), 0.10).unwrap_err();
            assert!(matches!(err, ValuationError::DegenerateInput { .. }));
        }
    }

    #[test]
    fn test_band_is_ordered_by_value_not_label() {
        let result = value_equity(
            &base_inputs(),
            &single_period_assumptions(),
            &band(0.08, 0.10, 0.12),
        )
        .unwrap();

        // The lower-rate scenario discounts least and prices highest.
        assert_relative_eq!(result.implied_high, result.lower.implied_share_price);
        assert_relative_eq!(result.implied_low, result.upper.implied_share_price);
        assert!(result.implied_low < result.mid.implied_share_price);
        assert!(result.mid.implied_share_price < result.implied_high);
        assert_relative_eq!(result.market_price, 40.0);
    }

    #[test]
    fn test_classify_against_band() {
        assert_eq!(classify(50.0, 35.0, 45.0), Verdict::Overvalued);
        assert_eq!(classify(30.0, 35.0, 45.0), Verdict::Undervalued);
        assert_eq!(classify(40.0, 35.0, 45.0), Verdict::FairlyValued);
        // Band edges count as fairly valued.
        assert_eq!(classify(35.0, 35.0, 45.0), Verdict::FairlyValued);
        assert_eq!(classify(45.0, 35.0, 45.0), Verdict::FairlyValued);
    }

    #[test]
    fn test_verdict_labels() {
        assert_eq!(Verdict::Undervalued.to_string(), "undervalued");
        assert_eq!(Verdict::FairlyValued.to_string(), "fairly valued");
        assert_eq!(Verdict::Overvalued.to_string(), "overvalued");
    }

    #[test]
    fn test_verdict_tracks_market_price() {
        let assumptions = single_period_assumptions();
        let rates = band(0.08, 0.10, 0.12);

        let cheap = ValuationInputs {
            market_price: 20.0,
            ..base_inputs()
        };
        assert_eq!(
            value_equity(&cheap, &assumptions, &rates).unwrap().verdict,
            Verdict::Undervalued
        );

        let rich = ValuationInputs {
            market_price: 80.0,
            ..base_inputs()
        };
        assert_eq!(
            value_equity(&rich, &assumptions, &rates).unwrap().verdict,
            Verdict::Overvalued
        );

        let fair = ValuationInputs {
            market_price: 38.0,
            ..base_inputs()
        };
        assert_eq!(
            value_equity(&fair, &assumptions, &rates).unwrap().verdict,
            Verdict::FairlyValued
        );
    }
}
