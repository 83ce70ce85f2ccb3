//! Outbound commit request
//!
//! Wire shape is camelCase JSON; optional sections are omitted when absent.

use chrono::NaiveDate;
use lotsplit_core::{Lot, LotSet, ParentCostBase, SubdivisionFees};
use serde::{Deserialize, Serialize};

/// One lot as submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotSubmission {
    /// Lot name
    pub name: String,
    /// Lot address
    pub address: String,
    /// Area in square metres
    pub lot_size: f64,
    /// Allocation percentage
    pub allocation_percentage: f64,
    /// Whether the percentage was set by the user
    pub is_percentage_locked: bool,
}

impl From<&Lot> for LotSubmission {
    fn from(lot: &Lot) -> Self {
        Self {
            name: lot.name.clone(),
            address: lot.address.clone(),
            lot_size: lot.lot_size,
            allocation_percentage: lot.allocation_percentage(),
            is_percentage_locked: lot.is_percentage_locked(),
        }
    }
}

/// Land and building components recorded for the parent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// Land value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub land_value: Option<f64>,
    /// Building value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_value: Option<f64>,
}

impl CostBreakdown {
    /// Components of a parent cost base; `None` when neither is recorded
    #[must_use]
    pub fn from_parent(parent: &ParentCostBase) -> Option<Self> {
        if parent.land_value.is_none() && parent.building_value.is_none() {
            return None;
        }
        Some(Self {
            land_value: parent.land_value,
            building_value: parent.building_value,
        })
    }
}

/// Request handed to a [`SubdivisionCommitter`](crate::SubdivisionCommitter)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubdivisionRequest {
    /// Parent property record
    pub parent_property_id: String,
    /// Date the subdivision takes effect
    pub subdivision_date: NaiveDate,
    /// Lots in display order; the first is the main lot
    pub lots: Vec<LotSubmission>,
    /// Parent cost components, when any are recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_breakdown: Option<CostBreakdown>,
    /// Subdivision fees, when any are non-zero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<SubdivisionFees>,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SubdivisionRequest {
    /// Assemble from a lot set
    ///
    /// Zero fee entries are dropped and an all-zero fee table is omitted.
    /// Blank notes are omitted.
    #[must_use]
    pub fn new(
        parent_property_id: impl Into<String>,
        subdivision_date: NaiveDate,
        lots: &LotSet,
        cost_base: &ParentCostBase,
        fees: SubdivisionFees,
        notes: Option<&str>,
    ) -> Self {
        let fees = fees.normalized();
        Self {
            parent_property_id: parent_property_id.into(),
            subdivision_date,
            lots: lots.iter().map(LotSubmission::from).collect(),
            cost_breakdown: CostBreakdown::from_parent(cost_base),
            fees: (!fees.is_empty()).then_some(fees),
            notes: notes
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(ToOwned::to_owned),
        }
    }

    /// Pretty JSON for the wire
    ///
    /// # Errors
    /// Propagates `serde_json` failures.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
