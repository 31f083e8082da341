//! Common types used throughout the Ronda valuation engine.
//!
//! This module defines the strongly-typed inputs shared by the computation
//! stages: return series, capital-structure snapshots, and per-period
//! financial-statement rows. Invariants are checked at construction so the
//! arithmetic stages never re-validate shapes.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValuationError};
use crate::stats;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A date-labelled series of periodic returns for one asset or index.
///
/// Labels are strictly increasing and there is exactly one return per
/// label. Two series at the same cadence (subject and benchmark) are the
/// input to beta estimation; co-indexing across series is checked by the
/// regression, not here.
///
/// # Example
///
/// ```
/// use ronda_core::{Date, ReturnSeries};
///
/// let dates = vec![
///     Date::from_ymd_opt(2024, 1, 31).unwrap(),
///     Date::from_ymd_opt(2024, 2, 29).unwrap(),
///     Date::from_ymd_opt(2024, 3, 31).unwrap(),
/// ];
/// let series = ReturnSeries::new(dates, vec![0.02, -0.01, 0.03]).unwrap();
/// assert_eq!(series.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ReturnSeries {
    dates: Vec<Date>,
    returns: Array1<f64>,
}

impl ReturnSeries {
    /// Creates a return series from period labels and return values.
    ///
    /// # Errors
    ///
    /// Returns [`ValuationError::ShapeMismatch`] when labels and values have
    /// different lengths, and [`ValuationError::DegenerateInput`] when the
    /// labels are not strictly increasing.
    pub fn new(dates: Vec<Date>, returns: Vec<f64>) -> Result<Self> {
        if dates.len() != returns.len() {
            return Err(ValuationError::ShapeMismatch {
                expected: dates.len(),
                actual: returns.len(),
                context: "return series period labels vs values".to_string(),
            });
        }
        if !dates.windows(2).all(|w| w[0] < w[1]) {
            return Err(ValuationError::DegenerateInput {
                context: "return series period labels must be strictly increasing".to_string(),
            });
        }
        Ok(Self {
            dates,
            returns: Array1::from_vec(returns),
        })
    }

    /// Creates a return series from a price series.
    ///
    /// Returns are percentage changes between consecutive prices; the first
    /// label is dropped, mirroring the one-observation loss of the change
    /// computation.
    ///
    /// # Errors
    ///
    /// Fails when labels and prices disagree in length, when fewer than two
    /// prices are supplied, or when a price of zero makes a change undefined.
    pub fn from_prices(dates: Vec<Date>, prices: &[f64]) -> Result<Self> {
        if dates.len() != prices.len() {
            return Err(ValuationError::ShapeMismatch {
                expected: dates.len(),
                actual: prices.len(),
                context: "price series period labels vs values".to_string(),
            });
        }
        let returns = stats::simple_returns(&Array1::from_vec(prices.to_vec()))?;
        Self::new(dates[1..].to_vec(), returns.to_vec())
    }

    /// The period labels, oldest first.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// The return values, co-indexed with [`Self::dates`].
    #[must_use]
    pub const fn returns(&self) -> &Array1<f64> {
        &self.returns
    }

    /// Number of observations in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the series is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Market value of equity and debt at a single point in time.
///
/// Capital weights derived from the snapshot sum to one by construction.
#[derive(Debug, Clone, Copy)]
pub struct CapitalStructureSnapshot {
    market_equity: f64,
    total_debt: f64,
}

impl CapitalStructureSnapshot {
    /// Creates a snapshot from the market value of equity and total debt.
    ///
    /// # Errors
    ///
    /// Returns [`ValuationError::InvalidRange`] when either value is
    /// negative or non-finite, and [`ValuationError::DegenerateInput`] when
    /// both are zero (weights would be undefined).
    pub fn new(market_equity: f64, total_debt: f64) -> Result<Self> {
        if !market_equity.is_finite() || market_equity < 0.0 {
            return Err(ValuationError::InvalidRange {
                field: "market value of equity".to_string(),
                value: market_equity,
                bounds: "[0, inf)".to_string(),
            });
        }
        if !total_debt.is_finite() || total_debt < 0.0 {
            return Err(ValuationError::InvalidRange {
                field: "total debt".to_string(),
                value: total_debt,
                bounds: "[0, inf)".to_string(),
            });
        }
        if market_equity + total_debt == 0.0 {
            return Err(ValuationError::DegenerateInput {
                context: "capital structure has zero total value".to_string(),
            });
        }
        Ok(Self {
            market_equity,
            total_debt,
        })
    }

    /// Market value of equity.
    #[must_use]
    pub const fn market_equity(&self) -> f64 {
        self.market_equity
    }

    /// Total debt.
    #[must_use]
    pub const fn total_debt(&self) -> f64 {
        self.total_debt
    }

    /// Combined value of equity and debt.
    #[must_use]
    pub const fn total_capital(&self) -> f64 {
        self.market_equity + self.total_debt
    }

    /// Equity weight wE = E / (E + D).
    #[must_use]
    pub const fn equity_weight(&self) -> f64 {
        self.market_equity / (self.market_equity + self.total_debt)
    }

    /// Debt weight wD = D / (E + D).
    #[must_use]
    pub const fn debt_weight(&self) -> f64 {
        self.total_debt / (self.market_equity + self.total_debt)
    }
}

/// One fiscal period's financial-statement figures.
///
/// All monetary fields share whatever currency unit the caller supplies;
/// the engine only ever forms ratios and differences of them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiscalPeriod {
    /// Last day of the fiscal period.
    pub period_end: Date,
    /// Total revenue.
    pub revenue: f64,
    /// Operating income (EBIT).
    pub operating_income: f64,
    /// Gross profit.
    pub gross_profit: f64,
    /// Current assets.
    pub current_assets: f64,
    /// Current liabilities.
    pub current_liabilities: f64,
    /// Capital expenditure.
    pub capital_expenditure: f64,
    /// Depreciation and amortization.
    pub depreciation_amortization: f64,
}

/// Chronologically ordered financial-statement rows, oldest first.
///
/// Ordering is validated at construction. Growth computations additionally
/// require at least two periods; that check lives with the derivation, not
/// here.
#[derive(Debug, Clone)]
pub struct PeriodFinancials {
    periods: Vec<FiscalPeriod>,
}

impl PeriodFinancials {
    /// Creates an ordered collection of fiscal periods.
    ///
    /// # Errors
    ///
    /// Returns [`ValuationError::DegenerateInput`] when period end dates are
    /// not strictly increasing.
    pub fn new(periods: Vec<FiscalPeriod>) -> Result<Self> {
        if !periods.windows(2).all(|w| w[0].period_end < w[1].period_end) {
            return Err(ValuationError::DegenerateInput {
                context: "fiscal periods must be strictly increasing by period end".to_string(),
            });
        }
        Ok(Self { periods })
    }

    /// The fiscal periods, oldest first.
    #[must_use]
    pub fn periods(&self) -> &[FiscalPeriod] {
        &self.periods
    }

    /// Number of fiscal periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}
