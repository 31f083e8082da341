#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and helpers for the Ronda valuation engine.
//!
//! This crate provides the validated input types, the shared error
//! taxonomy, and the series statistics used by every computation stage.

/// The version of the ronda-core crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{Result, ValuationError};
pub use types::{CapitalStructureSnapshot, Date, FiscalPeriod, PeriodFinancials, ReturnSeries};
