//! Cost-of-capital estimation for the Ronda valuation engine.
//!
//! This crate covers the risk and discount-rate stage:
//! - CAPM beta via ordinary least squares, with a Student-t confidence
//!   interval on the slope
//! - Credit-spread resolution from a static rating table
//! - Weighted average cost of capital as a (lower, mid, upper) band
//!
//! # Example
//!
//! ```rust,ignore
//! use ronda_capital::{estimate_beta, wacc_band, RegressionConfig, WaccInputs};
//! use ronda_capital::spread::cost_of_debt;
//!
//! let risk = estimate_beta(&stock, &index, &RegressionConfig::default())?;
//! let inputs = WaccInputs {
//!     risk_free_rate: 0.045,
//!     equity_risk_premium: 0.05,
//!     cost_of_debt: cost_of_debt(0.045, "A2/A")?,
//!     equity_weight: capital.equity_weight(),
//!     debt_weight: capital.debt_weight(),
//!     tax_rate: 0.25,
//! };
//! let band = wacc_band(&risk, &inputs)?;
//! ```

pub mod regression;
pub mod spread;
pub mod wacc;

// Re-export main types
pub use regression::{RegressionConfig, RiskEstimate, estimate_beta};
pub use spread::{CREDIT_SPREADS, RatingTier, cost_of_debt, spread_for_rating, tier_for_coverage};
pub use wacc::{DiscountRateBand, DiscountRateEstimate, WaccInputs, cost_of_equity, wacc_band};
