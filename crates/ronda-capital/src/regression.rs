//! Beta estimation via ordinary least squares.
//!
//! Regresses subject returns on benchmark returns (the benchmark is the
//! explanatory variable). The slope is the CAPM beta; its standard error
//! comes from the residual variance, and the confidence interval uses the
//! two-tailed Student-t critical value with n - 2 degrees of freedom.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};
use tracing::debug;

use ronda_core::stats::MIN_VARIANCE_THRESHOLD;
use ronda_core::{Result, ReturnSeries, ValuationError};

/// Minimum paired observations for a slope with a finite standard error.
const MIN_OBSERVATIONS: usize = 3;

/// Configuration for beta estimation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RegressionConfig {
    /// Confidence level for the beta interval, strictly inside (0, 1)
    pub confidence_level: f64,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
        }
    }
}

/// OLS beta estimate with its uncertainty.
///
/// Derived once per analysis and immutable thereafter. The interval is
/// symmetric about the point estimate; a wider confidence level produces
/// a wider interval on the same data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskEstimate {
    /// Slope of the regression: the subject's sensitivity to the benchmark
    pub beta: f64,
    /// Intercept of the regression: return unexplained by the benchmark
    pub alpha: f64,
    /// Standard error of the slope
    pub beta_std_error: f64,
    /// Coefficient of determination of the fit
    pub r_squared: f64,
    /// Confidence level the interval was computed at
    pub confidence_level: f64,
    /// Lower confidence bound on beta
    pub beta_lower: f64,
    /// Upper confidence bound on beta
    pub beta_upper: f64,
    /// Residual degrees of freedom (n - 2)
    pub df: usize,
    /// Number of paired observations
    pub n_obs: usize,
}

/// Estimate beta by regressing subject returns on benchmark returns.
///
/// The two series must be co-indexed: equal length and identical period
/// labels.
///
/// # Errors
///
/// - [`ValuationError::ShapeMismatch`] when the series lengths differ
/// - [`ValuationError::DegenerateInput`] when the period labels differ or
///   the benchmark has zero variance
/// - [`ValuationError::InsufficientData`] when fewer than 3 paired
///   observations are supplied
/// - [`ValuationError::InvalidRange`] when the confidence level is not
///   strictly inside (0, 1)
///
/// # Example
///
/// ```rust,ignore
/// use ronda_capital::{estimate_beta, RegressionConfig};
///
/// let estimate = estimate_beta(&stock, &index, &RegressionConfig::default())?;
/// println!("beta = {:.2} [{:.2}, {:.2}]", estimate.beta, estimate.beta_lower, estimate.beta_upper);
/// ```
pub fn estimate_beta(
    subject: &ReturnSeries,
    benchmark: &ReturnSeries,
    config: &RegressionConfig,
) -> Result<RiskEstimate> {
    if subject.len() != benchmark.len() {
        return Err(ValuationError::ShapeMismatch {
            expected: subject.len(),
            actual: benchmark.len(),
            context: "subject vs benchmark return series".to_string(),
        });
    }
    if subject.dates() != benchmark.dates() {
        return Err(ValuationError::DegenerateInput {
            context: "subject and benchmark period labels differ".to_string(),
        });
    }

    let n = subject.len();
    if n < MIN_OBSERVATIONS {
        return Err(ValuationError::InsufficientData {
            required: MIN_OBSERVATIONS,
            actual: n,
            context: "beta regression".to_string(),
        });
    }

    let confidence_level = config.confidence_level;
    if confidence_level <= 0.0 || confidence_level >= 1.0 {
        return Err(ValuationError::InvalidRange {
            field: "confidence level".to_string(),
            value: confidence_level,
            bounds: "(0, 1)".to_string(),
        });
    }

    let fit = ols_fit(benchmark.returns(), subject.returns())?;

    let df = n - 2;
    let residual_variance = fit.ssr / df as f64;
    let beta_std_error = (residual_variance / fit.sxx).sqrt();
    let r_squared = if fit.syy > 0.0 {
        1.0 - fit.ssr / fit.syy
    } else {
        f64::NAN
    };

    let t_crit = two_tailed_t_critical(confidence_level, df)?;
    let half_width = t_crit * beta_std_error;

    debug!(
        beta = fit.beta,
        r_squared,
        n_obs = n,
        "fitted beta regression"
    );

    Ok(RiskEstimate {
        beta: fit.beta,
        alpha: fit.alpha,
        beta_std_error,
        r_squared,
        confidence_level,
        beta_lower: fit.beta - half_width,
        beta_upper: fit.beta + half_width,
        df,
        n_obs: n,
    })
}

/// Sums of squares and coefficients of a simple OLS fit.
struct OlsFit {
    beta: f64,
    alpha: f64,
    ssr: f64,
    sxx: f64,
    syy: f64,
}

/// Fit y = alpha + beta * x by least squares.
fn ols_fit(x: &Array1<f64>, y: &Array1<f64>) -> Result<OlsFit> {
    let n = x.len();
    let x_mean = x.mean().unwrap_or(f64::NAN);
    let y_mean = y.mean().unwrap_or(f64::NAN);

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx / (n - 1) as f64 <= MIN_VARIANCE_THRESHOLD {
        return Err(ValuationError::DegenerateInput {
            context: "benchmark return series has zero variance".to_string(),
        });
    }

    let beta = sxy / sxx;
    let alpha = y_mean - beta * x_mean;

    let mut ssr = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        let resid = yi - alpha - beta * xi;
        ssr += resid * resid;
    }

    Ok(OlsFit {
        beta,
        alpha,
        ssr,
        sxx,
        syy,
    })
}

/// Two-tailed Student-t critical value for the given confidence level.
fn two_tailed_t_critical(confidence_level: f64, df: usize) -> Result<f64> {
    let dist =
        StudentsT::new(0.0, 1.0, df as f64).map_err(|e| ValuationError::DegenerateInput {
            context: format!("t distribution with {df} degrees of freedom: {e}"),
        })?;
    Ok(dist.inverse_cdf(0.5 + confidence_level / 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ronda_core::stats::{sample_covariance, sample_variance};
    use ronda_core::Date;

    fn series_pair(subject: Vec<f64>, benchmark: Vec<f64>) -> (ReturnSeries, ReturnSeries) {
        let dates: Vec<Date> = (0..subject.len())
            .map(|i| Date::from_ymd_opt(2024, 1, (i + 1) as u32).unwrap())
            .collect();
        let s = ReturnSeries::new(dates.clone(), subject).unwrap();
        let b = ReturnSeries::new(dates, benchmark).unwrap();
        (s, b)
    }

    #[test]
    fn test_default_config() {
        let config = RegressionConfig::default();
        assert_relative_eq!(config.confidence_level, 0.95);
    }

    #[test]
    fn test_perfect_linear_fit() {
        let (subject, benchmark) =
            series_pair(vec![0.02, 0.04, 0.06, 0.08], vec![0.01, 0.02, 0.03, 0.04]);
        let est = estimate_beta(&subject, &benchmark, &RegressionConfig::default()).unwrap();

        assert_relative_eq!(est.beta, 2.0, epsilon = 1e-12);
        assert!(est.alpha.abs() < 1e-12);
        assert!(est.beta_std_error.abs() < 1e-10);
        assert_relative_eq!(est.r_squared, 1.0, epsilon = 1e-12);
        // With zero residual error the interval collapses to the point
        assert_relative_eq!(est.beta_lower, 2.0, epsilon = 1e-8);
        assert_relative_eq!(est.beta_upper, 2.0, epsilon = 1e-8);
        assert_eq!(est.df, 2);
        assert_eq!(est.n_obs, 4);
    }

    #[test]
    fn test_known_regression_values() {
        // x = [0.01, 0.02, 0.03], y = [0.02, 0.03, 0.05]:
        // beta = 1.5, alpha = 1/300, se = 1/sqrt(12), R^2 = 27/28
        let (subject, benchmark) = series_pair(vec![0.02, 0.03, 0.05], vec![0.01, 0.02, 0.03]);
        let est = estimate_beta(&subject, &benchmark, &RegressionConfig::default()).unwrap();

        assert_relative_eq!(est.beta, 1.5, epsilon = 1e-10);
        assert_relative_eq!(est.alpha, 1.0 / 300.0, epsilon = 1e-10);
        assert_relative_eq!(est.beta_std_error, 1.0 / 12.0_f64.sqrt(), epsilon = 1e-10);
        assert_relative_eq!(est.r_squared, 27.0 / 28.0, epsilon = 1e-10);
        assert_eq!(est.df, 1);

        // t(0.975, df=1) = 12.7062...
        let half_width = est.beta_upper - est.beta;
        assert_relative_eq!(half_width / est.beta_std_error, 12.706204736, max_relative = 1e-4);
    }

    #[test]
    fn test_slope_matches_covariance_ratio() {
        let x = vec![0.011, -0.004, 0.027, 0.003, -0.016, 0.009];
        let y = vec![0.019, -0.011, 0.032, 0.001, -0.024, 0.017];
        let (subject, benchmark) = series_pair(y.clone(), x.clone());
        let est = estimate_beta(&subject, &benchmark, &RegressionConfig::default()).unwrap();

        let closed_form = sample_covariance(&x, &y) / sample_variance(&x);
        assert_relative_eq!(est.beta, closed_form, epsilon = 1e-12);
    }

    #[test]
    fn test_interval_symmetric_about_beta() {
        let (subject, benchmark) = series_pair(
            vec![0.02, -0.01, 0.04, 0.00, 0.03],
            vec![0.01, -0.02, 0.03, 0.01, 0.02],
        );
        let est = estimate_beta(&subject, &benchmark, &RegressionConfig::default()).unwrap();

        let below = est.beta - est.beta_lower;
        let above = est.beta_upper - est.beta;
        assert_relative_eq!(below, above, epsilon = 1e-12);
    }

    #[test]
    fn test_interval_widens_with_confidence() {
        let (subject, benchmark) = series_pair(
            vec![0.02, -0.01, 0.04, 0.00, 0.03],
            vec![0.01, -0.02, 0.03, 0.01, 0.02],
        );

        let mut widths = Vec::new();
        for confidence_level in [0.80, 0.90, 0.95, 0.99] {
            let est = estimate_beta(
                &subject,
                &benchmark,
                &RegressionConfig { confidence_level },
            )
            .unwrap();
            widths.push(est.beta_upper - est.beta_lower);
        }
        assert!(widths.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_insufficient_observations() {
        let (subject, benchmark) = series_pair(vec![0.02, 0.03], vec![0.01, 0.02]);
        let err = estimate_beta(&subject, &benchmark, &RegressionConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ValuationError::InsufficientData { required: 3, actual: 2, .. }
        ));
    }

    #[test]
    fn test_zero_variance_benchmark() {
        let (subject, benchmark) = series_pair(vec![0.02, 0.03, 0.05], vec![0.01, 0.01, 0.01]);
        let err = estimate_beta(&subject, &benchmark, &RegressionConfig::default()).unwrap_err();
        assert!(matches!(err, ValuationError::DegenerateInput { .. }));
    }

    #[test]
    fn test_length_mismatch() {
        let dates3: Vec<Date> = (1..=3)
            .map(|d| Date::from_ymd_opt(2024, 1, d).unwrap())
            .collect();
        let dates4: Vec<Date> = (1..=4)
            .map(|d| Date::from_ymd_opt(2024, 1, d).unwrap())
            .collect();
        let subject = ReturnSeries::new(dates3, vec![0.02, 0.03, 0.05]).unwrap();
        let benchmark = ReturnSeries::new(dates4, vec![0.01, 0.02, 0.03, 0.04]).unwrap();

        let err = estimate_beta(&subject, &benchmark, &RegressionConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ValuationError::ShapeMismatch { expected: 3, actual: 4, .. }
        ));
    }

    #[test]
    fn test_label_mismatch() {
        let dates_a: Vec<Date> = (1..=3)
            .map(|d| Date::from_ymd_opt(2024, 1, d).unwrap())
            .collect();
        let dates_b: Vec<Date> = (1..=3)
            .map(|d| Date::from_ymd_opt(2024, 2, d).unwrap())
            .collect();
        let subject = ReturnSeries::new(dates_a, vec![0.02, 0.03, 0.05]).unwrap();
        let benchmark = ReturnSeries::new(dates_b, vec![0.01, 0.02, 0.03]).unwrap();

        let err = estimate_beta(&subject, &benchmark, &RegressionConfig::default()).unwrap_err();
        assert!(matches!(err, ValuationError::DegenerateInput { .. }));
    }

    #[test]
    fn test_invalid_confidence_level() {
        let (subject, benchmark) = series_pair(vec![0.02, 0.03, 0.05], vec![0.01, 0.02, 0.03]);
        for confidence_level in [0.0, 1.0, -0.5, 1.5] {
            let err = estimate_beta(
                &subject,
                &benchmark,
                &RegressionConfig { confidence_level },
            )
            .unwrap_err();
            assert!(matches!(err, ValuationError::InvalidRange { .. }));
        }
    }
}
