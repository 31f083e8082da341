//! Per-period operating metrics derived from reported financials.
//!
//! Each record compares a fiscal period against its predecessor, so a
//! history of `n` periods yields `n - 1` records. Ratios are computed as
//! written and may be non-finite when a denominator is zero; only the
//! reinvestment rate is explicitly masked to NaN, which happens whenever
//! NOPAT is non-positive and the ratio would be meaningless.

use serde::{Deserialize, Serialize};
use tracing::warn;

use ronda_core::stats::{mean, nan_mean};
use ronda_core::{Date, PeriodFinancials, Result, ValuationError};

/// Metrics derived for one fiscal period relative to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetrics {
    /// Last day of the fiscal period the record describes.
    pub period_end: Date,
    /// revenue(t) / revenue(t-1) - 1
    pub revenue_growth: f64,
    /// operating income(t) / operating income(t-1) - 1
    pub operating_income_growth: f64,
    /// gross profit(t) / revenue(t)
    pub gross_margin: f64,
    /// operating income(t) / revenue(t)
    pub operating_margin: f64,
    /// operating income(t) + depreciation and amortization(t)
    pub ebitda: f64,
    /// EBITDA(t) / revenue(t)
    pub ebitda_margin: f64,
    /// current assets(t) - current liabilities(t)
    pub net_working_capital: f64,
    /// NWC(t) - NWC(t-1)
    pub nwc_change: f64,
    /// operating income(t) * (1 - tax rate)
    pub nopat: f64,
    /// capex(t) - D&A(t) + change in NWC(t)
    pub reinvestment: f64,
    /// reinvestment(t) / NOPAT(t), or NaN when NOPAT(t) <= 0
    pub reinvestment_rate: f64,
}

/// Arithmetic means of each derived series.
///
/// The reinvestment rate mean skips NaN entries so a single loss-making
/// period does not poison the summary. Every other series is averaged as
/// is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    /// Mean period-over-period revenue growth.
    pub revenue_growth: f64,
    /// Mean period-over-period operating income growth.
    pub operating_income_growth: f64,
    /// Mean gross margin.
    pub gross_margin: f64,
    /// Mean operating margin.
    pub operating_margin: f64,
    /// Mean EBITDA margin.
    pub ebitda_margin: f64,
    /// Mean net working capital level.
    pub net_working_capital: f64,
    /// Mean change in net working capital.
    pub nwc_change: f64,
    /// Mean after-tax operating profit.
    pub nopat: f64,
    /// Mean reinvestment outlay.
    pub reinvestment: f64,
    /// Mean reinvestment rate over periods where it is defined, NaN when
    /// no period qualifies.
    pub reinvestment_rate: f64,
    /// Number of records the means cover.
    pub periods: usize,
}

/// Per-period records together with their summary means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedHistoricalMetrics {
    /// One record per fiscal period after the first.
    pub records: Vec<PeriodMetrics>,
    /// Arithmetic means across the records.
    pub summary: MetricsSummary,
}

/// Derives growth, margin, working-capital, and reinvestment metrics from
/// a chronological financial history.
///
/// Requires at least two periods, since every record is relative to its
/// predecessor. `tax_rate` must lie in `[0, 1)` and is applied to
/// operating income to obtain NOPAT.
///
/// # Errors
///
/// Returns [`ValuationError::InvalidRange`] when `tax_rate` is outside
/// `[0, 1)` and [`ValuationError::InsufficientData`] when fewer than two
/// periods are available.
pub fn derive_metrics(
    financials: &PeriodFinancials,
    tax_rate: f64,
) -> Result<DerivedHistoricalMetrics> {
    if !(0.0..1.0).contains(&tax_rate) {
        return Err(ValuationError::InvalidRange {
            field: "tax_rate".to_string(),
            value: tax_rate,
            bounds: "[0, 1)".to_string(),
        });
    }
    let periods = financials.periods();
    if periods.len() < 2 {
        return Err(ValuationError::InsufficientData {
            required: 2,
            actual: periods.len(),
            context: "historical metric derivation".to_string(),
        });
    }

    let mut records = Vec::with_capacity(periods.len() - 1);
    for pair in periods.windows(2) {
        let prev = &pair[0];
        let curr = &pair[1];

        let nwc_prev = prev.current_assets - prev.current_liabilities;
        let nwc = curr.current_assets - curr.current_liabilities;
        let nwc_change = nwc - nwc_prev;
        let nopat = curr.operating_income * (1.0 - tax_rate);
        let ebitda = curr.operating_income + curr.depreciation_amortization;
        let reinvestment = curr.capital_expenditure - curr.depreciation_amortization + nwc_change;
        let reinvestment_rate = if nopat <= 0.0 {
            warn!(
                period_end = %curr.period_end,
                nopat,
                "non-positive NOPAT, reinvestment rate undefined"
            );
            f64::NAN
        } else {
            reinvestment / nopat
        };

        records.push(PeriodMetrics {
            period_end: curr.period_end,
            revenue_growth: curr.revenue / prev.revenue - 1.0,
            operating_income_growth: curr.operating_income / prev.operating_income - 1.0,
            gross_margin: curr.gross_profit / curr.revenue,
            operating_margin: curr.operating_income / curr.revenue,
            ebitda,
            ebitda_margin: ebitda / curr.revenue,
            net_working_capital: nwc,
            nwc_change,
            nopat,
            reinvestment,
            reinvestment_rate,
        });
    }

    let summary = summarize(&records);
    Ok(DerivedHistoricalMetrics { records, summary })
}

fn summarize(records: &[PeriodMetrics]) -> MetricsSummary {
    MetricsSummary {
        revenue_growth: mean(&column(records, |r| r.revenue_growth)),
        operating_income_growth: mean(&column(records, |r| r.operating_income_growth)),
        gross_margin: mean(&column(records, |r| r.gross_margin)),
        operating_margin: mean(&column(records, |r| r.operating_margin)),
        ebitda_margin: mean(&column(records, |r| r.ebitda_margin)),
        net_working_capital: mean(&column(records, |r| r.net_working_capital)),
        nwc_change: mean(&column(records, |r| r.nwc_change)),
        nopat: mean(&column(records, |r| r.nopat)),
        reinvestment: mean(&column(records, |r| r.reinvestment)),
        reinvestment_rate: nan_mean(&column(records, |r| r.reinvestment_rate)),
        periods: records.len(),
    }
}

fn column(records: &[PeriodMetrics], pick: impl Fn(&PeriodMetrics) -> f64) -> Vec<f64> {
    records.iter().map(pick).collect()
}
