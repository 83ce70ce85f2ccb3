//! Lot Split Allocation
//!
//! Keeps allocation percentages consistent with lot sizes and turns them
//! into per-lot cost bases.
//!
//! # Core Concepts
//!
//! - [`AllocationEngine`]: Rederives unlocked percentages after a size or lock change
//! - [`AllocationPlan`]: The locked/remaining split behind one recompute
//! - [`CostBaseApportioner`]: Parent cost base to per-lot cost base
//! - [`apportion`]: The single-lot formula, for live preview
//!
//! # Example
//!
//! ```rust
//! use lotsplit_allocation::{apportion, AllocationEngine};
//! use lotsplit_core::{LotSet, LotUpdate, ParentCostBase};
//!
//! let mut lots = LotSet::seeded("12 Orchard Rd");
//! let ids: Vec<_> = lots.ids().collect();
//! lots.update(ids[0], LotUpdate::Size(100.0)).unwrap();
//! lots.update(ids[1], LotUpdate::Size(300.0)).unwrap();
//!
//! let lots = AllocationEngine::new().recompute(&lots);
//! assert_eq!(lots.percentages(), vec![25.0, 75.0]);
//!
//! let parent = ParentCostBase::from_purchase_price(400_000.0);
//! assert_eq!(apportion(25.0, &parent, true), 100_000.0);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod apportion;
mod engine;

#[cfg(test)]
mod fixtures;

// Re-exports
pub use apportion::{apportion, CostBaseApportioner, LotCostPreview};
pub use engine::{AllocationEngine, AllocationMode, AllocationPlan, FULL_ALLOCATION};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
