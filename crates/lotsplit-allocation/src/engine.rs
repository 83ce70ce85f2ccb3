//! Allocation percentage recompute
//!
//! Provides [`AllocationEngine`], which derives the percentage of every
//! unlocked lot from lot sizes while leaving locked lots untouched.

use lotsplit_core::{Lot, LotSet};
use serde::Serialize;

/// Percentage the whole parent cost base represents
pub const FULL_ALLOCATION: f64 = 100.0;

/// How unlocked lots receive the remaining percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationMode {
    /// Proportional to lot size
    Proportional,

    /// Unlocked lots have no area yet; split equally
    EqualSplit,

    /// Every lot is locked; nothing to derive
    AllLocked,
}

/// Intermediate quantities of one recompute pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AllocationPlan {
    /// Sum of locked percentages
    pub locked_percentage: f64,

    /// `100 - locked_percentage`; negative when locked lots exceed 100%
    pub remaining_percentage: f64,

    /// Combined area of unlocked lots, square metres
    pub unlocked_total_size: f64,

    /// Number of unlocked lots
    pub unlocked_count: usize,

    /// Distribution rule in effect
    pub mode: AllocationMode,
}

impl AllocationPlan {
    /// Whether locked lots alone claim more than the whole
    #[inline]
    #[must_use]
    pub fn is_overcommitted(&self) -> bool {
        self.remaining_percentage < 0.0
    }

    /// Percentage an unlocked lot of `lot_size` receives under this plan
    #[must_use]
    pub fn share_for(&self, lot_size: f64) -> f64 {
        match self.mode {
            AllocationMode::AllLocked => 0.0,
            AllocationMode::EqualSplit => {
                #[allow(clippy::cast_precision_loss)]
                let n = self.unlocked_count as f64;
                self.remaining_percentage / n
            }
            AllocationMode::Proportional => {
                (lot_size / self.unlocked_total_size) * self.remaining_percentage
            }
        }
    }
}

/// Derives unlocked allocation percentages from lot sizes
///
/// Recompute is a pure function from one [`LotSet`] snapshot to the next and
/// is idempotent: a second pass with no edit in between changes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllocationEngine;

impl AllocationEngine {
    /// Create new engine
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Work out the distribution without applying it
    #[must_use]
    pub fn plan(&self, lots: &LotSet) -> AllocationPlan {
        let (locked, unlocked): (Vec<&Lot>, Vec<&Lot>) =
            lots.iter().partition(|lot| lot.is_percentage_locked());

        let locked_percentage: f64 = locked.iter().map(|l| l.allocation_percentage()).sum();
        let remaining_percentage = FULL_ALLOCATION - locked_percentage;
        let unlocked_total_size: f64 = unlocked.iter().map(|l| l.lot_size).sum();

        let mode = if unlocked.is_empty() {
            AllocationMode::AllLocked
        } else if unlocked_total_size == 0.0 {
            AllocationMode::EqualSplit
        } else {
            AllocationMode::Proportional
        };

        AllocationPlan {
            locked_percentage,
            remaining_percentage,
            unlocked_total_size,
            unlocked_count: unlocked.len(),
            mode,
        }
    }

    /// Produce the next snapshot with every unlocked percentage rederived
    #[must_use]
    pub fn recompute(&self, lots: &LotSet) -> LotSet {
        let plan = self.plan(lots);

        tracing::debug!(
            locked = plan.locked_percentage,
            remaining = plan.remaining_percentage,
            unlocked_size = plan.unlocked_total_size,
            mode = ?plan.mode,
            "Recomputing lot allocation"
        );
        if plan.is_overcommitted() {
            tracing::warn!(
                "Locked lots claim {:.1}%, unlocked lots will go negative",
                plan.locked_percentage
            );
        }

        let mut next = lots.clone();
        if plan.mode == AllocationMode::AllLocked {
            return next;
        }

        for lot in next.iter_mut() {
            lot.share = lot.share.derive(plan.share_for(lot.lot_size));
        }
        next
    }
}
