//! Allocation share with its lock state
//!
//! A lot's allocation percentage is owned either by the allocation engine
//! ([`AllocationShare::Auto`]) or by the user ([`AllocationShare::Locked`]).
//!
//! # Transitions
//!
//! ```text
//!   Auto(p) --edit(v)--> Locked(clamp(v))
//!   Auto(p) --toggle---> Locked(p)
//! Locked(p) --toggle---> Auto(p)        (p is stale until the next recompute)
//! Locked(p) --edit(v)--> Locked(clamp(v))
//! ```
//!
//! The engine only ever writes through [`AllocationShare::derive`], which is a
//! no-op on locked shares.

use serde::{Deserialize, Serialize};

/// Lowest allocation percentage a user may enter
pub const MIN_PERCENTAGE: f64 = 0.0;

/// Highest allocation percentage a user may enter
pub const MAX_PERCENTAGE: f64 = 100.0;

/// Clamp a manually entered percentage into `[0, 100]`
///
/// NaN reads as zero.
#[inline]
#[must_use]
pub fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_PERCENTAGE;
    }
    value.clamp(MIN_PERCENTAGE, MAX_PERCENTAGE)
}

/// Lot allocation percentage tagged with who owns it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "percentage", rename_all = "snake_case")]
pub enum AllocationShare {
    /// Derived by the allocation engine; overwritten on every recompute
    Auto(f64),

    /// Fixed by the user; the allocation engine skips it
    Locked(f64),
}

impl AllocationShare {
    /// Current percentage, whoever owns it
    #[inline]
    #[must_use]
    pub fn percentage(self) -> f64 {
        match self {
            Self::Auto(p) | Self::Locked(p) => p,
        }
    }

    /// Whether the user owns the percentage
    #[inline]
    #[must_use]
    pub fn is_locked(self) -> bool {
        matches!(self, Self::Locked(_))
    }

    /// Manual edit: clamps the value and locks the share
    #[inline]
    #[must_use]
    pub fn edit(self, value: f64) -> Self {
        Self::Locked(clamp_percentage(value))
    }

    /// Flip the lock without touching the stored value
    #[inline]
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Auto(p) => Self::Locked(p),
            Self::Locked(p) => Self::Auto(p),
        }
    }

    /// Lock at the current value
    #[inline]
    #[must_use]
    pub fn lock(self) -> Self {
        Self::Locked(self.percentage())
    }

    /// Unlock, keeping the (now stale) value
    #[inline]
    #[must_use]
    pub fn unlock(self) -> Self {
        Self::Auto(self.percentage())
    }

    /// Engine write: replaces an auto value, leaves a locked one alone
    ///
    /// Derived values are not clamped: locked totals above 100 drive them
    /// negative.
    #[inline]
    #[must_use]
    pub fn derive(self, value: f64) -> Self {
        match self {
            Self::Auto(_) => Self::Auto(value),
            locked @ Self::Locked(_) => locked,
        }
    }
}

impl Default for AllocationShare {
    fn default() -> Self {
        Self::Auto(0.0)
    }
}
