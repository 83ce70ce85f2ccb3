//! Lot records

use crate::share::AllocationShare;
use crate::units::clamp_area;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable lot identifier, never reused within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LotId(pub Uuid);

impl LotId {
    /// Generate a new lot ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LotId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A candidate piece of subdivided land
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    /// Identifier
    pub id: LotId,
    /// Free-text label, required at submission
    pub name: String,
    /// Street address, empty when not given
    pub address: String,
    /// Area in square metres
    pub lot_size: f64,
    /// Allocation percentage and its owner
    pub share: AllocationShare,
}

impl Lot {
    /// Create an unsized, auto-allocated lot
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: LotId::new(),
            name: name.into(),
            address: address.into(),
            lot_size: 0.0,
            share: AllocationShare::default(),
        }
    }

    /// With area in square metres (negative clamps to zero)
    #[inline]
    #[must_use]
    pub fn with_size(mut self, sqm: f64) -> Self {
        self.lot_size = clamp_area(sqm);
        self
    }

    /// With a user-locked percentage
    #[inline]
    #[must_use]
    pub fn with_locked_percentage(mut self, percentage: f64) -> Self {
        self.share = self.share.edit(percentage);
        self
    }

    /// With a share in a given state
    #[inline]
    #[must_use]
    pub fn with_share(mut self, share: AllocationShare) -> Self {
        self.share = share;
        self
    }

    /// Allocation percentage
    #[inline]
    #[must_use]
    pub fn allocation_percentage(&self) -> f64 {
        self.share.percentage()
    }

    /// Whether the percentage is user-owned
    #[inline]
    #[must_use]
    pub fn is_percentage_locked(&self) -> bool {
        self.share.is_locked()
    }

    /// Whether the name is usable at submission
    #[inline]
    #[must_use]
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Single-field edit applied to a lot
#[derive(Debug, Clone, PartialEq)]
pub enum LotUpdate {
    /// Replace the name
    Name(String),
    /// Replace the address
    Address(String),
    /// Replace the area, in square metres
    Size(f64),
    /// Manual percentage entry (implicitly locks)
    Percentage(f64),
    /// Flip the lock
    ToggleLock,
}

impl LotUpdate {
    /// Whether this edit changes an input of the allocation engine
    #[inline]
    #[must_use]
    pub fn touches_size(&self) -> bool {
        matches!(self, Self::Size(_))
    }

    /// Whether this edit can change the lock state
    #[inline]
    #[must_use]
    pub fn touches_lock(&self) -> bool {
        matches!(self, Self::Percentage(_) | Self::ToggleLock)
    }

    /// Apply to a lot; returns `true` if the lock state changed
    pub fn apply(self, lot: &mut Lot) -> bool {
        let was_locked = lot.share.is_locked();
        match self {
            Self::Name(name) => lot.name = name,
            Self::Address(address) => lot.address = address,
            Self::Size(sqm) => lot.lot_size = clamp_area(sqm),
            Self::Percentage(value) => lot.share = lot.share.edit(value),
            Self::ToggleLock => lot.share = lot.share.toggle(),
        }
        was_locked != lot.share.is_locked()
    }
}
