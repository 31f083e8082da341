//! Trailing-twelve-month baselines for projection seeding.

use ronda_core::{Result, ValuationError};

/// Number of trailing quarters aggregated into an LTM figure.
const LTM_QUARTERS: usize = 4;

/// Sums the four most recent quarterly revenues into a trailing
/// twelve-month baseline.
///
/// `quarterly_revenue` must be ordered oldest to newest; entries before
/// the final four are ignored.
///
/// # Errors
///
/// Returns [`ValuationError::InsufficientData`] when fewer than four
/// quarters are supplied.
///
/// # Example
///
/// ```
/// let ltm = ronda_history::ltm_revenue(&[24.0, 25.0, 26.0, 27.0, 28.0])?;
/// assert_eq!(ltm, 106.0);
/// # Ok::<(), ronda_core::ValuationError>(())
/// ```
pub fn ltm_revenue(quarterly_revenue: &[f64]) -> Result<f64> {
    if quarterly_revenue.len() < LTM_QUARTERS {
        return Err(ValuationError::InsufficientData {
            required: LTM_QUARTERS,
            actual: quarterly_revenue.len(),
            context: "trailing twelve month revenue".to_string(),
        });
    }
    let start = quarterly_revenue.len() - LTM_QUARTERS;
    Ok(quarterly_revenue[start..].iter().sum())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_ltm_revenue_exact_window() {
        let ltm = ltm_revenue(&[10.0, 11.0, 12.0, 13.0]).unwrap();
        assert_relative_eq!(ltm, 46.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ltm_revenue_uses_latest_quarters() {
        let ltm = ltm_revenue(&[1.0, 2.0, 10.0, 11.0, 12.0, 13.0]).unwrap();
        assert_relative_eq!(ltm, 46.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ltm_revenue_short_history() {
        let err = ltm_revenue(&[10.0, 11.0, 12.0]).unwrap_err();
        assert!(matches!(
            err,
            ValuationError::InsufficientData {
                required: 4,
                actual: 3,
                ..
            }
        ));
    }
}
