//! Error types for lot set edits

use crate::lot::LotId;

/// Structural edit rejected by a [`LotSet`](crate::LotSet)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LotSetError {
    /// No lot with this ID
    #[error("lot not found: {0}")]
    LotNotFound(LotId),

    /// Removal would leave fewer lots than a subdivision needs
    #[error("a subdivision needs at least {minimum} lots")]
    BelowMinimum {
        /// Minimum lot count
        minimum: usize,
    },

    /// Fewer seed lots than the minimum
    #[error("cannot build a lot set from {given} lots (minimum {minimum})")]
    TooFewLots {
        /// Lots supplied
        given: usize,
        /// Minimum lot count
        minimum: usize,
    },

    /// The same ID appears twice
    #[error("duplicate lot id: {0}")]
    DuplicateLot(LotId),
}
