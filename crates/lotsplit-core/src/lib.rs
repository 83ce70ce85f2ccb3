//! Lot Split Core
//!
//! Data model for splitting one property into several lots.
//!
//! # Core Concepts
//!
//! - [`Lot`]: A proposed piece of the subdivided land
//! - [`LotSet`]: Ordered lots under edit; the first is the main lot
//! - [`AllocationShare`]: A lot's percentage, tagged `Auto` or `Locked`
//! - [`AreaUnit`]: Square metres (canonical), hectares, acres
//! - [`ParentCostBase`]: Purchase price with optional land/building split
//! - [`SubdivisionFees`]: Costs of the subdivision itself
//!
//! # Example
//!
//! ```rust
//! use lotsplit_core::{AreaUnit, LotSet, LotUpdate};
//!
//! let mut lots = LotSet::seeded("12 Orchard Rd");
//! let main = lots.main_lot().id;
//! lots.update(main, LotUpdate::Size(AreaUnit::Hectares.to_canonical(0.5))).unwrap();
//!
//! assert_eq!(lots.total_size(), 5_000.0);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod cost_base;
mod error;
mod lot;
mod lot_set;
mod share;
mod units;

// Re-exports
pub use cost_base::{ParentCostBase, SubdivisionFees};
pub use error::LotSetError;
pub use lot::{Lot, LotId, LotUpdate};
pub use lot_set::{default_lot_name, LotSet, MIN_LOTS};
pub use share::{clamp_percentage, AllocationShare, MAX_PERCENTAGE, MIN_PERCENTAGE};
pub use units::{
    clamp_area, parse_area_input, AreaUnit, UnknownUnit, SQM_PER_ACRE, SQM_PER_HECTARE,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for lot editing
    pub use crate::{
        AllocationShare, AreaUnit, Lot, LotId, LotSet, LotUpdate, ParentCostBase, SubdivisionFees,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
