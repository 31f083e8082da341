//! Small statistics helpers shared by the computation stages.
//!
//! These cover the series arithmetic the engine needs before regression:
//! sample moments with Bessel's correction, NaN-aware averaging for flagged
//! series, and price-to-return conversion.

use ndarray::Array1;

use crate::error::{Result, ValuationError};

/// Minimum sample variance treated as nonzero.
/// Values at or below this threshold count as zero variance.
pub const MIN_VARIANCE_THRESHOLD: f64 = 1e-10;

/// Arithmetic mean of a slice. Empty input yields NaN.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Arithmetic mean over the finite entries of a slice.
///
/// NaN entries mark periods where a ratio was undefined; they are excluded
/// from the average rather than poisoning it. All-NaN (or empty) input
/// yields NaN.
#[must_use]
pub fn nan_mean(values: &[f64]) -> f64 {
    let finite: Vec<f64> = values.iter().copied().filter(|x| x.is_finite()).collect();
    if finite.is_empty() {
        return f64::NAN;
    }
    finite.iter().sum::<f64>() / finite.len() as f64
}

/// Sample variance with N-1 denominator (Bessel's correction).
///
/// Fewer than two observations yield NaN.
#[must_use]
pub fn sample_variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (n - 1) as f64
}

/// Sample covariance with N-1 denominator.
///
/// Mismatched lengths or fewer than two observations yield NaN.
#[must_use]
pub fn sample_covariance(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n != y.len() || n < 2 {
        return f64::NAN;
    }
    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut cov = 0.0;
    for i in 0..n {
        cov += (x[i] - mean_x) * (y[i] - mean_y);
    }
    cov / (n - 1) as f64
}

/// Percentage change between consecutive observations of a price series.
///
/// The result has one fewer entry than the input: result[i] =
/// prices[i+1] / prices[i] - 1.
///
/// # Errors
///
/// Returns [`ValuationError::InsufficientData`] when fewer than two prices
/// are supplied, and [`ValuationError::DegenerateInput`] when a price of
/// zero makes the following change undefined.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use ronda_core::stats::simple_returns;
///
/// let prices = array![100.0, 110.0, 121.0];
/// let returns = simple_returns(&prices).unwrap();
/// assert_eq!(returns.len(), 2);
/// assert!((returns[0] - 0.10).abs() < 1e-12);
/// assert!((returns[1] - 0.10).abs() < 1e-12);
/// ```
pub fn simple_returns(prices: &Array1<f64>) -> Result<Array1<f64>> {
    let n = prices.len();
    if n < 2 {
        return Err(ValuationError::InsufficientData {
            required: 2,
            actual: n,
            context: "price series".to_string(),
        });
    }

    let mut returns = Vec::with_capacity(n - 1);
    for i in 0..n - 1 {
        let prev = prices[i];
        if prev == 0.0 {
            return Err(ValuationError::DegenerateInput {
                context: format!("price of zero at index {i} makes the next return undefined"),
            });
        }
        returns.push(prices[i + 1] / prev - 1.0);
    }
    Ok(Array1::from_vec(returns))
}

/// Subtracts a per-period risk-free rate from every return.
///
/// The rate must already be expressed at the series cadence (a monthly
/// series takes a monthly rate).
#[must_use]
pub fn excess_returns(returns: &Array1<f64>, risk_free_rate: f64) -> Array1<f64> {
    returns - risk_free_rate
}
