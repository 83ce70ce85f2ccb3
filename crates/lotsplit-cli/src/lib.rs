//! Lot Split CLI
//!
//! Loads a subdivision plan file and runs the allocation engine over it.
//!
//! # Commands
//!
//! - `preview`: per-lot share and cost base
//! - `validate`: submission checks only
//! - `submit`: dry-run commit, printing the request JSON
//! - `convert`: area conversion between units

#![warn(missing_docs)]

pub mod commands;
pub mod plan;

pub use plan::{PlanFile, PlanLot};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
