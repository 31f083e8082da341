//! Multi-period free-cash-flow projection.
//!
//! Revenue rolls forward from a trailing baseline through per-period
//! growth rates; margins and reinvestment rates then shape each period's
//! free cash flow, which is discounted back at a single scenario rate.

use serde::{Deserialize, Serialize};

use ronda_core::{Result, ValuationError};

/// Per-period assumptions driving a projection.
///
/// The three rate sequences must each hold exactly `horizon` entries,
/// one per projected period in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionAssumptions {
    /// Number of explicitly projected periods, at least 1.
    pub horizon: usize,
    /// Revenue growth per period, decimal.
    pub growth_rates: Vec<f64>,
    /// Operating margin per period, decimal.
    pub operating_margins: Vec<f64>,
    /// Share of NOPAT reinvested per period, decimal.
    pub reinvestment_rates: Vec<f64>,
    /// Perpetual growth rate beyond the horizon, decimal.
    pub terminal_growth: f64,
    /// Effective tax rate applied to operating income, in [0, 1).
    pub tax_rate: f64,
}

impl ProjectionAssumptions {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.horizon == 0 {
            return Err(ValuationError::InsufficientData {
                required: 1,
                actual: 0,
                context: "projection horizon".to_string(),
            });
        }
        for (name, seq) in [
            ("growth rates", &self.growth_rates),
            ("operating margins", &self.operating_margins),
            ("reinvestment rates", &self.reinvestment_rates),
        ] {
            if seq.len() != self.horizon {
                return Err(ValuationError::ShapeMismatch {
                    expected: self.horizon,
                    actual: seq.len(),
                    context: name.to_string(),
                });
            }
        }
        if !(0.0..1.0).contains(&self.tax_rate) {
            return Err(ValuationError::InvalidRange {
                field: "tax_rate".to_string(),
                value: self.tax_rate,
                bounds: "[0, 1)".to_string(),
            });
        }
        Ok(())
    }
}

/// One projected fiscal period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPeriod {
    /// 1-based offset from the baseline period.
    pub period: usize,
    /// revenue(t) = revenue(t-1) * (1 + growth(t))
    pub revenue: f64,
    /// revenue(t) * margin(t)
    pub operating_income: f64,
    /// operating income(t) * (1 - tax rate)
    pub nopat: f64,
    /// NOPAT(t) * (1 - reinvestment rate(t))
    pub free_cash_flow: f64,
    /// FCF(t) / (1 + r)^t
    pub present_value: f64,
}

/// Explicit-horizon projection for one discount-rate scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Discount rate the cash flows were discounted at.
    pub discount_rate: f64,
    /// Projected periods, t = 1 through the horizon.
    pub periods: Vec<ProjectedPeriod>,
}

impl Projection {
    /// Sum of the discounted explicit-horizon cash flows.
    #[must_use]
    pub fn present_value_total(&self) -> f64 {
        self.periods.iter().map(|p| p.present_value).sum()
    }
}

/// Projects free cash flows over the explicit horizon and discounts them.
///
/// Revenue is seeded with `baseline_revenue` and compounds through
/// `growth_rates` period by period.
///
/// # Errors
///
/// Returns [`ValuationError::InsufficientData`] when the horizon is zero,
/// [`ValuationError::ShapeMismatch`] when an assumption sequence does not
/// match the horizon, and [`ValuationError::InvalidRange`] when the tax
/// rate lies outside [0, 1).
pub fn project_cash_flows(
    baseline_revenue: f64,
    assumptions: &ProjectionAssumptions,
    discount_rate: f64,
) -> Result<Projection> {
    assumptions.validate()?;

    let mut periods = Vec::with_capacity(assumptions.horizon);
    let mut revenue = baseline_revenue;
    for t in 1..=assumptions.horizon {
        let idx = t - 1;
        revenue *= 1.0 + assumptions.growth_rates[idx];
        let operating_income = revenue * assumptions.operating_margins[idx];
        let nopat = operating_income * (1.0 - assumptions.tax_rate);
        let free_cash_flow = nopat * (1.0 - assumptions.reinvestment_rates[idx]);
        let present_value = free_cash_flow / (1.0 + discount_rate).powi(t as i32);

        periods.push(ProjectedPeriod {
            period: t,
            revenue,
            operating_income,
            nopat,
            free_cash_flow,
            present_value,
        });
    }

    Ok(Projection {
        discount_rate,
        periods,
    })
}
