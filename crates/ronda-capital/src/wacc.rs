//! CAPM cost of equity and the weighted average cost of capital.
//!
//! The WACC is produced as a (lower, mid, upper) band by substituting each
//! beta confidence bound into the CAPM. The cost of debt and the capital
//! weights are shared across the three scenarios; only the beta varies.

use serde::{Deserialize, Serialize};
use tracing::debug;

use ronda_core::{CapitalStructureSnapshot, Result, ValuationError};

use crate::regression::RiskEstimate;

/// Weight sums further than this from 1 are rejected.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Scalar assumptions for the cost-of-capital computation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WaccInputs {
    /// Risk-free rate, decimal
    pub risk_free_rate: f64,
    /// Equity market risk premium, decimal
    pub equity_risk_premium: f64,
    /// Pre-tax cost of debt, decimal
    pub cost_of_debt: f64,
    /// Equity weight wE
    pub equity_weight: f64,
    /// Debt weight wD
    pub debt_weight: f64,
    /// Marginal tax rate, in [0, 1)
    pub tax_rate: f64,
}

impl WaccInputs {
    /// Fills the capital weights from a snapshot, leaving rates untouched.
    #[must_use]
    pub fn with_capital_structure(mut self, capital: &CapitalStructureSnapshot) -> Self {
        self.equity_weight = capital.equity_weight();
        self.debt_weight = capital.debt_weight();
        self
    }
}

/// One discount-rate scenario.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DiscountRateEstimate {
    /// CAPM cost of equity at the scenario's beta
    pub cost_of_equity: f64,
    /// Pre-tax cost of debt
    pub cost_of_debt: f64,
    /// Marginal tax rate
    pub tax_rate: f64,
    /// Equity weight
    pub equity_weight: f64,
    /// Debt weight
    pub debt_weight: f64,
    /// Weighted average cost of capital
    pub wacc: f64,
}

/// The three discount-rate scenarios implied by the beta interval.
///
/// With a positive risk premium, a lower beta bound gives a lower WACC.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DiscountRateBand {
    /// Scenario at the lower beta confidence bound
    pub lower: DiscountRateEstimate,
    /// Scenario at the point beta estimate
    pub mid: DiscountRateEstimate,
    /// Scenario at the upper beta confidence bound
    pub upper: DiscountRateEstimate,
}

/// CAPM cost of equity: rf + beta × ERP.
#[must_use]
pub const fn cost_of_equity(risk_free_rate: f64, beta: f64, equity_risk_premium: f64) -> f64 {
    risk_free_rate + beta * equity_risk_premium
}

/// Assembles the WACC band from a risk estimate and scalar assumptions.
///
/// # Errors
///
/// Returns [`ValuationError::InvalidRange`] when a weight is negative,
/// the weights do not sum to 1, or the tax rate lies outside [0, 1).
///
/// # Example
///
/// ```rust,ignore
/// use ronda_capital::{wacc_band, WaccInputs};
///
/// let band = wacc_band(&risk, &inputs)?;
/// println!("WACC {:.2}% [{:.2}%, {:.2}%]",
///     100.0 * band.mid.wacc, 100.0 * band.lower.wacc, 100.0 * band.upper.wacc);
/// ```
pub fn wacc_band(risk: &RiskEstimate, inputs: &WaccInputs) -> Result<DiscountRateBand> {
    validate(inputs)?;

    let lower = scenario(risk.beta_lower, inputs);
    let mid = scenario(risk.beta, inputs);
    let upper = scenario(risk.beta_upper, inputs);

    debug!(
        lower = lower.wacc,
        mid = mid.wacc,
        upper = upper.wacc,
        "assembled discount rate band"
    );

    Ok(DiscountRateBand { lower, mid, upper })
}

fn validate(inputs: &WaccInputs) -> Result<()> {
    if inputs.equity_weight < 0.0 {
        return Err(ValuationError::InvalidRange {
            field: "equity weight".to_string(),
            value: inputs.equity_weight,
            bounds: "[0, 1]".to_string(),
        });
    }
    if inputs.debt_weight < 0.0 {
        return Err(ValuationError::InvalidRange {
            field: "debt weight".to_string(),
            value: inputs.debt_weight,
            bounds: "[0, 1]".to_string(),
        });
    }
    let weight_sum = inputs.equity_weight + inputs.debt_weight;
    if (weight_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ValuationError::InvalidRange {
            field: "capital weight sum".to_string(),
            value: weight_sum,
            bounds: "1".to_string(),
        });
    }
    if !(0.0..1.0).contains(&inputs.tax_rate) {
        return Err(ValuationError::InvalidRange {
            field: "tax rate".to_string(),
            value: inputs.tax_rate,
            bounds: "[0, 1)".to_string(),
        });
    }
    Ok(())
}

fn scenario(beta: f64, inputs: &WaccInputs) -> DiscountRateEstimate {
    let ke = cost_of_equity(inputs.risk_free_rate, beta, inputs.equity_risk_premium);
    let wacc = inputs.equity_weight * ke
        + inputs.debt_weight * inputs.cost_of_debt * (1.0 - inputs.tax_rate);

    DiscountRateEstimate {
        cost_of_equity: ke,
        cost_of_debt: inputs.cost_of_debt,
        tax_rate: inputs.tax_rate,
        equity_weight: inputs.equity_weight,
        debt_weight: inputs.debt_weight,
        wacc,
    }
}
