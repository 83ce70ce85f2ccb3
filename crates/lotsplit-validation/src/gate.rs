//! Validation gate for subdivision commits
//!
//! Checks a lot set against its parent cost base at submission time and
//! separates findings that block the commit from advisories that do not.

use lotsplit_core::{LotId, LotSet, ParentCostBase};
use serde::{Deserialize, Serialize};

/// Allowed distance of the percentage total from 100
pub const DEFAULT_PERCENTAGE_TOLERANCE: f64 = 0.1;

/// Allowed gap, in dollars, between land + building and the purchase price
pub const DEFAULT_COST_MISMATCH_TOLERANCE: f64 = 1.0;

/// Title used for missing-field warnings
pub const MISSING_INFORMATION: &str = "Missing information";

/// Gate thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Allowed `|total - 100|`
    pub percentage_tolerance: f64,
    /// Allowed `|land + building - purchase price|`
    pub cost_mismatch_tolerance: f64,
    /// Block lots with no area entered
    pub require_lot_sizes: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            percentage_tolerance: DEFAULT_PERCENTAGE_TOLERANCE,
            cost_mismatch_tolerance: DEFAULT_COST_MISMATCH_TOLERANCE,
            require_lot_sizes: false,
        }
    }
}

/// Finding that refuses the commit
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// One or more lots have an empty name
    #[error("Missing information: please provide a name for every lot ({} missing)", .lots.len())]
    MissingName {
        /// Lots without a name
        lots: Vec<LotId>,
    },

    /// One or more lots have no area
    #[error("Missing information: please provide a valid lot size for every lot ({} missing)", .lots.len())]
    MissingSize {
        /// Lots with zero area
        lots: Vec<LotId>,
    },

    /// Allocation percentages do not add up to 100
    #[error("Allocation percentages must total 100% (currently {total:.1}%)")]
    PercentageImbalance {
        /// Actual total
        total: f64,
    },
}

impl ValidationError {
    /// Short title for a user-facing warning
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::MissingName { .. } | Self::MissingSize { .. } => MISSING_INFORMATION,
            Self::PercentageImbalance { .. } => "Allocation mismatch",
        }
    }

    /// Lots the finding points at (empty for set-wide findings)
    #[must_use]
    pub fn lots(&self) -> &[LotId] {
        match self {
            Self::MissingName { lots } | Self::MissingSize { lots } => lots,
            Self::PercentageImbalance { .. } => &[],
        }
    }
}

/// Finding shown to the user without refusing the commit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// Land + building differs from the recorded purchase price
    CostComponentMismatch {
        /// Recorded land value
        land_value: f64,
        /// Recorded building value
        building_value: f64,
        /// Recorded purchase price
        purchase_price: f64,
    },
}

impl Advisory {
    /// Short title for a user-facing notice
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::CostComponentMismatch { .. } => "Cost base mismatch",
        }
    }

    /// User-facing message
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::CostComponentMismatch {
                land_value,
                building_value,
                purchase_price,
            } => format!(
                "Land value ({land_value:.2}) plus building value ({building_value:.2}) \
                 totals {:.2}, which differs from the purchase price ({purchase_price:.2}). \
                 This is allowed; the recorded values will be used as entered.",
                land_value + building_value
            ),
        }
    }
}

/// Outcome of one gate check
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// Findings that refuse the commit, in check order
    pub blocking: Vec<ValidationError>,
    /// Findings that do not refuse the commit
    pub advisories: Vec<Advisory>,
}

impl ValidationReport {
    /// Whether the commit may proceed
    #[inline]
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.blocking.is_empty()
    }

    /// Advisories on success, first blocking finding otherwise
    ///
    /// # Errors
    /// The first [`ValidationError`] when any check blocks.
    pub fn into_result(self) -> Result<Vec<Advisory>, ValidationError> {
        match self.blocking.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.advisories),
        }
    }
}

/// Submission-time checks; never mutates its input
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationGate {
    config: GateConfig,
}

impl ValidationGate {
    /// Gate with default thresholds
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gate with explicit thresholds
    #[inline]
    #[must_use]
    pub fn with_config(config: GateConfig) -> Self {
        Self { config }
    }

    /// Thresholds in effect
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Run every check
    #[must_use]
    pub fn check(&self, lots: &LotSet, parent: &ParentCostBase) -> ValidationReport {
        let mut report = ValidationReport::default();

        let unnamed: Vec<LotId> = lots.iter().filter(|l| !l.has_name()).map(|l| l.id).collect();
        if !unnamed.is_empty() {
            report.blocking.push(ValidationError::MissingName { lots: unnamed });
        }

        if self.config.require_lot_sizes {
            let unsized_lots: Vec<LotId> = lots
                .iter()
                .filter(|l| l.lot_size <= 0.0)
                .map(|l| l.id)
                .collect();
            if !unsized_lots.is_empty() {
                report
                    .blocking
                    .push(ValidationError::MissingSize { lots: unsized_lots });
            }
        }

        let total = lots.total_percentage();
        if (total - 100.0).abs() > self.config.percentage_tolerance {
            report
                .blocking
                .push(ValidationError::PercentageImbalance { total });
        }

        let mismatch = parent
            .component_difference()
            .is_some_and(|d| d.abs() > self.config.cost_mismatch_tolerance);
        if let (true, Some(land_value), Some(building_value)) =
            (mismatch, parent.land_value, parent.building_value)
        {
            report.advisories.push(Advisory::CostComponentMismatch {
                land_value,
                building_value,
                purchase_price: parent.purchase_price,
            });
        }

        if report.is_ok() {
            tracing::debug!(advisories = report.advisories.len(), "Lot set passed validation");
        } else {
            tracing::warn!(blocking = report.blocking.len(), "Lot set failed validation");
        }
        report
    }
}
