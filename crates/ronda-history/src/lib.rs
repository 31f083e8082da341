//! Historical ratio derivation for ronda.
//!
//! This crate turns reported financial statements into the ratios a DCF
//! projection is seeded from:
//! - Period-over-period revenue and operating income growth
//! - Gross, operating, and EBITDA margins
//! - Net working capital levels and changes
//! - NOPAT, reinvestment, and the reinvestment rate
//! - Trailing-twelve-month revenue baselines
//!
//! # Example
//!
//! ```rust,ignore
//! use ronda_history::{derive_metrics, ltm_revenue};
//!
//! // Derive per-period metrics and their means from annual statements
//! let derived = derive_metrics(&financials, 0.25)?;
//! println!("mean revenue growth: {}", derived.summary.revenue_growth);
//!
//! // Anchor the projection on the last four reported quarters
//! let baseline = ltm_revenue(&quarterly_revenue)?;
//! ```

pub mod baseline;
pub mod metrics;

// Re-export main types
pub use baseline::ltm_revenue;
pub use metrics::{DerivedHistoricalMetrics, MetricsSummary, PeriodMetrics, derive_metrics};
