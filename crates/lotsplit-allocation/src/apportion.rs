//! Cost-base apportionment
//!
//! Provides [`CostBaseApportioner`] for turning a lot's allocation percentage
//! into the share of the parent cost base it carries forward.
//!
//! # Rules
//!
//! - The apportionable base is the land value when recorded, otherwise the
//!   purchase price. It is split by percentage.
//! - The building value is never split: it attaches wholly to the main lot.
//! - Subdivision fees are split equally across all lots.

use lotsplit_core::{LotId, LotSet, ParentCostBase, SubdivisionFees};
use serde::Serialize;

/// Cost base allocated to one lot, from its percentage alone
///
/// Pure; absent components contribute zero.
#[must_use]
pub fn apportion(percentage: f64, parent: &ParentCostBase, is_main_lot: bool) -> f64 {
    let mut allocated = parent.apportionable_base() * (percentage / 100.0);
    if is_main_lot {
        if let Some(building) = parent.building_value {
            allocated += building;
        }
    }
    allocated
}

/// Cost base breakdown for one lot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LotCostPreview {
    /// Lot
    pub lot_id: LotId,
    /// Whether this is the main lot
    pub is_main_lot: bool,
    /// Allocation percentage used
    pub allocation_percentage: f64,
    /// `lot size / total size` as a percentage; `None` when no area is entered
    pub area_proportion: Option<f64>,
    /// Percentage share of the apportionable base
    pub apportioned: f64,
    /// Building value carried (main lot only)
    pub building: f64,
    /// Equal share of subdivision fees
    pub fees: f64,
}

impl LotCostPreview {
    /// Allocated cost base including fees
    #[inline]
    #[must_use]
    pub fn total(&self) -> f64 {
        self.apportioned + self.building + self.fees
    }
}

/// Apportions a parent cost base across lots
#[derive(Debug, Clone, Copy, Default)]
pub struct CostBaseApportioner {
    parent: ParentCostBase,
    fees: SubdivisionFees,
}

impl CostBaseApportioner {
    /// Create for a parent cost base, no fees
    #[inline]
    #[must_use]
    pub fn new(parent: ParentCostBase) -> Self {
        Self {
            parent,
            fees: SubdivisionFees::default(),
        }
    }

    /// With subdivision fees
    #[inline]
    #[must_use]
    pub fn with_fees(mut self, fees: SubdivisionFees) -> Self {
        self.fees = fees;
        self
    }

    /// Parent cost base
    #[inline]
    #[must_use]
    pub fn parent(&self) -> &ParentCostBase {
        &self.parent
    }

    /// Subdivision fees
    #[inline]
    #[must_use]
    pub fn fees(&self) -> &SubdivisionFees {
        &self.fees
    }

    /// Allocated cost base for a lot, fee share included
    #[must_use]
    pub fn allocated_cost_base(&self, percentage: f64, is_main_lot: bool, lot_count: usize) -> f64 {
        apportion(percentage, &self.parent, is_main_lot) + self.fees.per_lot(lot_count)
    }

    /// Breakdown for every lot, in display order
    #[must_use]
    pub fn preview(&self, lots: &LotSet) -> Vec<LotCostPreview> {
        let total_size = lots.total_size();
        let fee_share = self.fees.per_lot(lots.len());

        lots.iter()
            .map(|lot| {
                let is_main_lot = lots.is_main(lot.id);
                let percentage = lot.allocation_percentage();
                let apportioned = apportion(percentage, &self.parent, false);
                let building = if is_main_lot {
                    self.parent.building_value.unwrap_or(0.0)
                } else {
                    0.0
                };
                LotCostPreview {
                    lot_id: lot.id,
                    is_main_lot,
                    allocation_percentage: percentage,
                    area_proportion: (total_size > 0.0)
                        .then(|| lot.lot_size * 100.0 / total_size),
                    apportioned,
                    building,
                    fees: fee_share,
                }
            })
            .collect()
    }

    /// Sum of allocated cost bases across all lots
    #[must_use]
    pub fn total_allocated(&self, lots: &LotSet) -> f64 {
        self.preview(lots).iter().map(LotCostPreview::total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::lot_set;

    fn parent() -> ParentCostBase {
        ParentCostBase::from_purchase_price(1_000_000.0)
            .with_land_value(600_000.0)
            .with_building_value(200_000.0)
    }

    #[test]
    fn main_lot_carries_building() {
        assert_eq!(apportion(60.0, &parent(), true), 560_000.0);
        assert_eq!(apportion(40.0, &parent(), false), 240_000.0);
    }

    #[test]
    fn purchase_price_without_land_value() {
        let parent = ParentCostBase::from_purchase_price(800_000.0).with_building_value(50_000.0);
        assert_eq!(apportion(25.0, &parent, false), 200_000.0);
        assert_eq!(apportion(75.0, &parent, true), 650_000.0);
    }

    #[test]
    fn zero_inputs_give_zero() {
        assert_eq!(apportion(0.0, &parent(), false), 0.0);
        assert_eq!(apportion(50.0, &ParentCostBase::default(), true), 0.0);
    }

    #[test]
    fn fees_are_split_equally() {
        let fees = SubdivisionFees {
            surveyor_fees: Some(4_000.0),
            title_fees: Some(2_000.0),
            ..SubdivisionFees::default()
        };
        let apportioner = CostBaseApportioner::new(ParentCostBase::from_purchase_price(900_000.0))
            .with_fees(fees);
        assert_eq!(apportioner.allocated_cost_base(50.0, false, 3), 452_000.0);
    }

    #[test]
    fn preview_breakdown() {
        let lots = lot_set(&[(600.0, Some(60.0)), (400.0, Some(40.0))]);
        let preview = CostBaseApportioner::new(parent()).preview(&lots);

        assert_eq!(preview.len(), 2);
        assert!(preview[0].is_main_lot);
        assert_eq!(preview[0].building, 200_000.0);
        assert_eq!(preview[0].total(), 560_000.0);
        assert_eq!(preview[0].area_proportion, Some(60.0));
        assert!(!preview[1].is_main_lot);
        assert_eq!(preview[1].total(), 240_000.0);
    }

    #[test]
    fn preview_without_area() {
        let lots = lot_set(&[(0.0, None), (0.0, None)]);
        let preview = CostBaseApportioner::new(parent()).preview(&lots);
        assert!(preview.iter().all(|p| p.area_proportion.is_none()));
    }

    #[test]
    fn total_allocated_covers_land_and_building() {
        let lots = lot_set(&[(1.0, Some(30.0)), (1.0, Some(70.0))]);
        let total = CostBaseApportioner::new(parent()).total_allocated(&lots);
        assert!((total - 800_000.0).abs() < 1e-6);
    }
}
