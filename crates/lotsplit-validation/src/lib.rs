//! Lot Split Validation
//!
//! Submission gate for a subdivided lot set.
//!
//! # Overview
//!
//! The gate provides:
//! - **Blocking checks**: every lot named, percentages totalling 100 ± 0.1
//!   and, optionally, every lot sized
//! - **Advisories**: land + building out of step with the purchase price
//!
//! # Example
//!
//! ```rust
//! use lotsplit_core::{Lot, LotSet, ParentCostBase};
//! use lotsplit_validation::{ValidationError, ValidationGate};
//!
//! let lots = LotSet::from_lots(vec![
//!     Lot::new("Lot 1", "").with_locked_percentage(40.0),
//!     Lot::new("Lot 2", "").with_locked_percentage(50.0),
//! ])
//! .unwrap();
//!
//! let report = ValidationGate::new().check(&lots, &ParentCostBase::default());
//! assert!(matches!(
//!     report.into_result(),
//!     Err(ValidationError::PercentageImbalance { .. })
//! ));
//! ```

#![warn(missing_docs)]

pub mod gate;

// Re-exports
pub use gate::{
    Advisory, GateConfig, ValidationError, ValidationGate, ValidationReport,
    DEFAULT_COST_MISMATCH_TOLERANCE, DEFAULT_PERCENTAGE_TOLERANCE, MISSING_INFORMATION,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
