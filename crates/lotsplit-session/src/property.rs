//! Parent and child property records

use crate::request::SubdivisionRequest;
use lotsplit_allocation::CostBaseApportioner;
use lotsplit_core::{default_lot_name, ParentCostBase};
use serde::{Deserialize, Serialize};

/// The property being subdivided
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentProperty {
    /// External record identifier
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Street address; seeds new lot addresses
    #[serde(default)]
    pub address: String,
    /// Recorded cost base
    #[serde(flatten)]
    pub cost_base: ParentCostBase,
}

impl ParentProperty {
    /// Create with an empty cost base
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            cost_base: ParentCostBase::default(),
        }
    }

    /// With cost base
    #[inline]
    #[must_use]
    pub fn with_cost_base(mut self, cost_base: ParentCostBase) -> Self {
        self.cost_base = cost_base;
        self
    }
}

/// What a committer creates for one lot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildProperty {
    /// Name, falling back to `"{parent} - Lot N"`
    pub name: String,
    /// Address, falling back to `"{parent address} (Lot N)"`
    pub address: String,
    /// `"Lot N"`, 1-based
    pub lot_number: String,
    /// Whether this lot continues the parent's history
    pub is_main_lot_continuation: bool,
    /// Area in square metres
    pub lot_size: f64,
    /// Allocation percentage
    pub allocation_percentage: f64,
    /// Cost base carried by this lot, fee share included
    pub allocated_cost_base: f64,
}

/// Child records for every lot in a request
///
/// Blank names and addresses are filled from the parent. The first lot is
/// the main-lot continuation and carries the building value.
#[must_use]
pub fn plan_child_properties(parent: &ParentProperty, request: &SubdivisionRequest) -> Vec<ChildProperty> {
    let apportioner = CostBaseApportioner::new(parent.cost_base)
        .with_fees(request.fees.unwrap_or_default());
    let lot_count = request.lots.len();

    request
        .lots
        .iter()
        .enumerate()
        .map(|(index, lot)| {
            let lot_number = default_lot_name(index + 1);
            let is_main = index == 0;
            let name = if lot.name.trim().is_empty() {
                format!("{} - {lot_number}", parent.name)
            } else {
                lot.name.clone()
            };
            let address = if lot.address.trim().is_empty() {
                format!("{} ({lot_number})", parent.address)
            } else {
                lot.address.clone()
            };
            ChildProperty {
                name,
                address,
                is_main_lot_continuation: is_main,
                lot_size: lot.lot_size,
                allocation_percentage: lot.allocation_percentage,
                allocated_cost_base: apportioner.allocated_cost_base(
                    lot.allocation_percentage,
                    is_main,
                    lot_count,
                ),
                lot_number,
            }
        })
        .collect()
}
