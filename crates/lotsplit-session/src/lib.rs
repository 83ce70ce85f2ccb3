//! Lot Split Session
//!
//! Ties lot editing, allocation, validation and commit together for one
//! parent property.
//!
//! # Core Concepts
//!
//! - **Session**: owns the lot set and recomputes it after size changes and
//!   lot add/remove
//! - **Recompute trigger**: whether lock transitions also recompute
//! - **Commit request**: the camelCase payload handed to a committer
//! - **Committer**: the external collaborator that persists child properties,
//!   called at most once per session
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use lotsplit_session::{JsonCommitter, ParentProperty, SessionConfig, SubdivisionSession};
//!
//! let parent = ParentProperty::new("parent-1", "Farm", "10 Rural Rd");
//! let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
//! let mut session = SubdivisionSession::new(parent, date, SessionConfig::default());
//!
//! let lots: Vec<_> = session.lots().ids().collect();
//! session.set_lot_size(lots[0], 0.25).unwrap();
//! session.set_lot_size(lots[1], 0.75).unwrap();
//! assert_eq!(session.lots().percentages(), vec![25.0, 75.0]);
//!
//! let mut committer = JsonCommitter::new(Vec::new());
//! session.submit(&mut committer).unwrap();
//! assert!(session.is_committed());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod committer;
mod config;
mod error;
mod property;
mod request;
mod session;

// Re-exports
pub use committer::{CommitReceipt, JsonCommitter, SubdivisionCommitter};
pub use config::{RecomputeTrigger, SessionConfig};
pub use error::{CommitError, ConfigError, SessionError};
pub use property::{plan_child_properties, ChildProperty, ParentProperty};
pub use request::{CostBreakdown, LotSubmission, SubdivisionRequest};
pub use session::{SubdivisionSession, SubmitOutcome};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a subdivision session
    pub use crate::{
        ParentProperty, SessionConfig, SessionError, SubdivisionCommitter, SubdivisionRequest,
        SubdivisionSession,
    };
    pub use lotsplit_core::prelude::*;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
