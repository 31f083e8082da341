//! Static credit-spread table and rating resolution.
//!
//! Fifteen rating tiers map a credit rating, or an interest-coverage
//! ratio, to a default spread over the risk-free rate. The table is data;
//! resolution is an exact match on the normalized rating label, never a
//! silent fallback.

use ronda_core::{Result, ValuationError};

/// One tier of the credit-spread table.
///
/// Coverage intervals are half-open: a tier applies to ratios in
/// `[coverage_low, coverage_high)`. The tiers tile the whole coverage
/// line, so every finite ratio resolves to exactly one tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingTier {
    /// Combined Moody's / S&P style rating label.
    pub rating: &'static str,
    /// Default spread over the risk-free rate, in decimal form.
    pub spread: f64,
    /// Inclusive lower bound of the interest-coverage interval.
    pub coverage_low: f64,
    /// Exclusive upper bound of the interest-coverage interval.
    pub coverage_high: f64,
}

const fn tier(
    rating: &'static str,
    spread: f64,
    coverage_low: f64,
    coverage_high: f64,
) -> RatingTier {
    RatingTier { rating, spread, coverage_low, coverage_high }
}

/// Credit-spread tiers ordered by ascending interest coverage.
pub const CREDIT_SPREADS: [RatingTier; 15] = [
    tier("D2/D", 0.1900, f64::NEG_INFINITY, 0.2),
    tier("C2/C", 0.1550, 0.2, 0.65),
    tier("Ca2/CC", 0.1010, 0.65, 0.8),
    tier("Caa/CCC", 0.0728, 0.8, 1.25),
    tier("B3/B-", 0.0442, 1.25, 1.5),
    tier("B2/B", 0.0300, 1.5, 1.75),
    tier("B1/B+", 0.0261, 1.75, 2.0),
    tier("Ba2/BB", 0.0183, 2.0, 2.25),
    tier("Ba1/BB+", 0.0155, 2.25, 2.5),
    tier("Baa2/BBB", 0.0120, 2.5, 3.0),
    tier("A3/A-", 0.0095, 3.0, 4.25),
    tier("A2/A", 0.0085, 4.25, 5.5),
    tier("A1/A+", 0.0077, 5.5, 6.5),
    tier("Aa2/AA", 0.0060, 6.5, 8.5),
    tier("Aaa/AAA", 0.0045, 8.5, f64::INFINITY),
];

/// Resolves the default spread for a credit rating.
///
/// The match is exact on the normalized label: surrounding whitespace is
/// trimmed and case is ignored. An unrecognized rating is an error, never
/// a zero spread, since a silent default would bias the valuation.
///
/// # Errors
///
/// Returns [`ValuationError::DegenerateInput`] when no tier carries the
/// given label.
///
/// # Example
///
/// ```
/// use ronda_capital::spread::spread_for_rating;
///
/// let spread = spread_for_rating("Aaa/AAA").unwrap();
/// assert!((spread - 0.0045).abs() < 1e-12);
/// ```
pub fn spread_for_rating(rating: &str) -> Result<f64> {
    let needle = rating.trim();
    CREDIT_SPREADS
        .iter()
        .find(|tier| tier.rating.eq_ignore_ascii_case(needle))
        .map(|tier| tier.spread)
        .ok_or_else(|| ValuationError::DegenerateInput {
            context: format!("unrecognized credit rating '{needle}'"),
        })
}

/// Resolves the rating tier implied by an interest-coverage ratio.
///
/// This is the synthetic-rating direction of the table: higher coverage
/// maps to a better rating and a thinner spread.
///
/// # Errors
///
/// Returns [`ValuationError::DegenerateInput`] when the ratio is NaN or
/// infinite.
pub fn tier_for_coverage(coverage: f64) -> Result<RatingTier> {
    if !coverage.is_finite() {
        return Err(ValuationError::DegenerateInput {
            context: format!("interest coverage ratio {coverage} is not finite"),
        });
    }
    CREDIT_SPREADS
        .iter()
        .find(|tier| coverage >= tier.coverage_low && coverage < tier.coverage_high)
        .copied()
        .ok_or_else(|| ValuationError::DegenerateInput {
            context: format!("no rating tier covers interest coverage {coverage}"),
        })
}

/// Pre-tax cost of debt: risk-free rate plus the rating's default spread.
///
/// # Errors
///
/// Propagates the lookup error for an unrecognized rating.
pub fn cost_of_debt(risk_free_rate: f64, rating: &str) -> Result<f64> {
    Ok(risk_free_rate + spread_for_rating(rating)?)
}
