//! Full Valuation Pipeline
//!
//! Walks the three engine stages end to end on synthetic inputs: beta
//! regression into a WACC band, historical ratio derivation from five
//! annual statements, and a five-year DCF capped with a Gordon Growth
//! terminal value. Everything is hard-coded so the example runs offline.
//!
//! ## Running
//!
//! ```bash
//! cargo run --release --example full_valuation
//! ```

use chrono::Months;
use ronda::capital::{RegressionConfig, WaccInputs, cost_of_debt, estimate_beta, wacc_band};
use ronda::dcf::{ProjectionAssumptions, ValuationInputs, value_equity};
use ronda::history::{derive_metrics, ltm_revenue};
use ronda::{CapitalStructureSnapshot, Date, FiscalPeriod, PeriodFinancials, ReturnSeries};

/// Months of synthetic return history for the regression.
const MONTHS: usize = 36;

/// Scalar market assumptions.
const RISK_FREE_RATE: f64 = 0.045;
const EQUITY_RISK_PREMIUM: f64 = 0.05;
const TAX_RATE: f64 = 0.25;
const CREDIT_RATING: &str = "Baa2/BBB";

/// Projection setup.
const HORIZON: usize = 5;
const TERMINAL_GROWTH: f64 = 0.025;

/// Company snapshot ($m except per-share figures).
const MARKET_PRICE: f64 = 40.0;
const SHARES_OUTSTANDING: f64 = 45.0;
const TOTAL_DEBT: f64 = 450.0;
const CASH: f64 = 180.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // =========================================================================
    // 1. Cost of capital: beta regression -> CAPM -> WACC band
    // =========================================================================
    let start = Date::from_ymd_opt(2022, 1, 31).expect("valid calendar date");
    let dates: Vec<Date> = (0..MONTHS).map(|i| start + Months::new(i as u32)).collect();

    // Synthetic monthly returns: the subject tracks the benchmark at a
    // beta of roughly 1.15 with an idiosyncratic ripple on top.
    let benchmark_returns: Vec<f64> = (0..MONTHS)
        .map(|i| 0.012 * (i as f64 * 0.9).sin() + 0.006)
        .collect();
    let subject_returns: Vec<f64> = benchmark_returns
        .iter()
        .enumerate()
        .map(|(i, r)| 1.15 * r + 0.003 * (i as f64 * 1.7).cos())
        .collect();

    let benchmark = ReturnSeries::new(dates.clone(), benchmark_returns)?;
    let subject = ReturnSeries::new(dates, subject_returns)?;
    let risk = estimate_beta(&subject, &benchmark, &RegressionConfig::default())?;

    let kd = cost_of_debt(RISK_FREE_RATE, CREDIT_RATING)?;
    let capital = CapitalStructureSnapshot::new(MARKET_PRICE * SHARES_OUTSTANDING, TOTAL_DEBT)?;
    let wacc_inputs = WaccInputs {
        risk_free_rate: RISK_FREE_RATE,
        equity_risk_premium: EQUITY_RISK_PREMIUM,
        cost_of_debt: kd,
        equity_weight: 0.0,
        debt_weight: 0.0,
        tax_rate: TAX_RATE,
    }
    .with_capital_structure(&capital);
    let rates = wacc_band(&risk, &wacc_inputs)?;

    // =========================================================================
    // 2. Historical ratios from five annual statements
    // =========================================================================
    let statements = PeriodFinancials::new(vec![
        year(2020, 900.0, 189.0, 378.0, 300.0, 180.0, 72.0, 45.0),
        year(2021, 972.0, 209.0, 410.0, 320.0, 190.0, 78.0, 49.0),
        year(2022, 1050.0, 228.0, 443.0, 342.0, 201.0, 84.0, 53.0),
        year(2023, 1134.0, 250.0, 479.0, 366.0, 213.0, 91.0, 57.0),
        year(2024, 1225.0, 270.0, 518.0, 392.0, 226.0, 98.0, 61.0),
    ])?;
    let derived = derive_metrics(&statements, TAX_RATE)?;
    let summary = derived.summary;

    // =========================================================================
    // 3. Project, discount, and judge the market price
    // =========================================================================
    let baseline = ltm_revenue(&[295.0, 302.0, 310.0, 318.0])?;

    // Fade growth linearly from the historical mean to the terminal rate.
    let growth_rates: Vec<f64> = (0..HORIZON)
        .map(|t| {
            let w = t as f64 / (HORIZON - 1) as f64;
            summary.revenue_growth + w * (TERMINAL_GROWTH - summary.revenue_growth)
        })
        .collect();
    let assumptions = ProjectionAssumptions {
        horizon: HORIZON,
        growth_rates,
        operating_margins: vec![summary.operating_margin; HORIZON],
        reinvestment_rates: vec![summary.reinvestment_rate; HORIZON],
        terminal_growth: TERMINAL_GROWTH,
        tax_rate: TAX_RATE,
    };
    let inputs = ValuationInputs {
        baseline_revenue: baseline,
        net_debt: TOTAL_DEBT,
        cash: CASH,
        shares_outstanding: SHARES_OUTSTANDING,
        market_price: MARKET_PRICE,
    };
    let result = value_equity(&inputs, &assumptions, &rates)?;

    // =========================================================================
    // 4. Display results
    // =========================================================================
    println!("\nDCF Valuation (synthetic inputs)");
    println!("════════════════════════════════");
    println!("Cost of capital:");
    println!(
        "  Beta:           {:.2} [{:.2}, {:.2}] at {:.0}% confidence",
        risk.beta,
        risk.beta_lower,
        risk.beta_upper,
        risk.confidence_level * 100.0
    );
    println!("  R²:             {:.2}", risk.r_squared);
    println!(
        "  Cost of equity: {:.2}%  (rf {:.2}% + beta x ERP {:.2}%)",
        rates.mid.cost_of_equity * 100.0,
        RISK_FREE_RATE * 100.0,
        EQUITY_RISK_PREMIUM * 100.0
    );
    println!(
        "  Cost of debt:   {:.2}%  ({} over risk-free)",
        kd * 100.0,
        CREDIT_RATING
    );
    println!(
        "  WACC band:      {:.2}% / {:.2}% / {:.2}%",
        rates.lower.wacc * 100.0,
        rates.mid.wacc * 100.0,
        rates.upper.wacc * 100.0
    );
    println!();
    println!("Historical record:");
    println!(
        "  {:>10}  {:>8}  {:>8}  {:>8}",
        "period", "growth", "op mgn", "reinv"
    );
    for rec in &derived.records {
        println!(
            "  {:>10}  {:>7.1}%  {:>7.1}%  {:>7.1}%",
            rec.period_end,
            rec.revenue_growth * 100.0,
            rec.operating_margin * 100.0,
            rec.reinvestment_rate * 100.0
        );
    }
    println!(
        "  mean        {:>7.1}%  {:>7.1}%  {:>7.1}%",
        summary.revenue_growth * 100.0,
        summary.operating_margin * 100.0,
        summary.reinvestment_rate * 100.0
    );
    println!();
    println!("Valuation (baseline revenue {baseline:.0}):");
    for (label, scenario) in [
        ("lower", &result.lower),
        ("mid", &result.mid),
        ("upper", &result.upper),
    ] {
        println!(
            "  {:<6} r {:>5.2}%  firm {:>7.1}  equity {:>7.1}  implied {:>6.2}",
            label,
            scenario.discount_rate() * 100.0,
            scenario.firm_value,
            scenario.equity_value,
            scenario.implied_share_price
        );
    }
    println!();
    println!(
        "Market price {:.2} vs implied {:.2}..{:.2}: {}",
        result.market_price, result.implied_low, result.implied_high, result.verdict
    );
    println!();

    Ok(())
}

/// Build one December-ending fiscal year row.
#[allow(clippy::too_many_arguments)]
fn year(
    end_year: i32,
    revenue: f64,
    operating_income: f64,
    gross_profit: f64,
    current_assets: f64,
    current_liabilities: f64,
    capital_expenditure: f64,
    depreciation_amortization: f64,
) -> FiscalPeriod {
    FiscalPeriod {
        period_end: Date::from_ymd_opt(end_year, 12, 31).expect("valid calendar date"),
        revenue,
        operating_income,
        gross_profit,
        current_assets,
        current_liabilities,
        capital_expenditure,
        depreciation_amortization,
    }
}
