//! Cash-flow projection and intrinsic valuation for ronda.
//!
//! This crate carries the final stage of the valuation pipeline:
//! - Multi-period free-cash-flow projection from a trailing revenue base
//! - Gordon Growth terminal value with an explicit convergence guard
//! - Firm-to-equity bridge and implied share price per discount-rate
//!   scenario
//! - A categorical verdict of the market price against the implied band
//!
//! # Example
//!
//! ```rust,ignore
//! use ronda_dcf::{ProjectionAssumptions, ValuationInputs, value_equity};
//!
//! // Value the equity across the (lower, mid, upper) discount-rate band
//! let result = value_equity(&inputs, &assumptions, &rates)?;
//! println!(
//!     "implied {:.2}..{:.2} vs market {:.2}: {}",
//!     result.implied_low, result.implied_high, result.market_price, result.verdict,
//! );
//! ```

pub mod projection;
pub mod valuation;

// Re-export main types
pub use projection::{ProjectedPeriod, Projection, ProjectionAssumptions, project_cash_flows};
pub use valuation::{
    ScenarioValuation, ValuationInputs, ValuationResult, Verdict, classify, terminal_value,
    value_equity, value_scenario,
};
