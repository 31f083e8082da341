//! Error types for the Ronda valuation engine.
//!
//! This module defines the single error taxonomy shared by every Ronda
//! crate. All errors are raised synchronously at the point of detection;
//! the engine never retries and never substitutes defaults for malformed
//! numeric input.

use thiserror::Error;

/// The main error type for Ronda computations.
///
/// Each variant corresponds to one class of malformed input or
/// non-computable result. Carrying structured fields (rather than
/// preformatted strings) lets the presentation layer decide how to
/// render a failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValuationError {
    /// Too few observations for the requested computation.
    #[error("insufficient data for {context}: required {required}, got {actual}")]
    InsufficientData {
        /// Minimum number of observations required.
        required: usize,
        /// Number of observations actually supplied.
        actual: usize,
        /// What was being computed.
        context: String,
    },

    /// Input that makes the computation undefined (zero-variance
    /// benchmark, zero shares outstanding, unrecognized credit rating).
    #[error("degenerate input: {context}")]
    DegenerateInput {
        /// Description of the degenerate condition.
        context: String,
    },

    /// Two sequences that must be co-indexed have different lengths.
    #[error("shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
        /// Which sequences disagreed.
        context: String,
    },

    /// The Gordon Growth perpetuity is undefined because the discount
    /// rate does not exceed the terminal growth rate.
    #[error(
        "terminal value does not converge: discount rate {discount_rate} <= terminal growth {terminal_growth}"
    )]
    NonConvergentTerminalValue {
        /// Scenario discount rate.
        discount_rate: f64,
        /// Terminal (steady-state) growth rate.
        terminal_growth: f64,
    },

    /// A scalar parameter lies outside its valid domain.
    #[error("{field} out of range: {value} not in {bounds}")]
    InvalidRange {
        /// Name of the offending parameter.
        field: String,
        /// The supplied value.
        value: f64,
        /// Human-readable description of the valid domain.
        bounds: String,
    },
}

/// A specialized Result type for Ronda computations.
///
/// This is a convenience type that uses [`ValuationError`] as the error type.
pub type Result<T> = std::result::Result<T, ValuationError>;
