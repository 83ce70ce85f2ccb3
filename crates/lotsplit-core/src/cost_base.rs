//! Cost-base inputs supplied by the parent property

use serde::{Deserialize, Serialize};

/// Recorded cost base of the property being subdivided
///
/// Land and building values need not add up to the purchase price; earlier
/// partial records can legitimately leave them out of step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentCostBase {
    /// Purchase price (zero when unknown)
    #[serde(default)]
    pub purchase_price: f64,
    /// Land component, if recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub land_value: Option<f64>,
    /// Building component, if recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_value: Option<f64>,
}

impl ParentCostBase {
    /// Cost base from a purchase price alone
    #[inline]
    #[must_use]
    pub fn from_purchase_price(purchase_price: f64) -> Self {
        Self {
            purchase_price,
            ..Self::default()
        }
    }

    /// With land value
    #[inline]
    #[must_use]
    pub fn with_land_value(mut self, value: f64) -> Self {
        self.land_value = Some(value);
        self
    }

    /// With building value
    #[inline]
    #[must_use]
    pub fn with_building_value(mut self, value: f64) -> Self {
        self.building_value = Some(value);
        self
    }

    /// Amount split by percentage: land value if recorded, else purchase price
    #[inline]
    #[must_use]
    pub fn apportionable_base(&self) -> f64 {
        self.land_value.unwrap_or(self.purchase_price)
    }

    /// Nothing to apportion: no purchase price and no land value
    #[inline]
    #[must_use]
    pub fn is_unrecorded(&self) -> bool {
        self.purchase_price == 0.0 && self.land_value.is_none()
    }

    /// `land + building - purchase price` when both components are recorded
    #[must_use]
    pub fn component_difference(&self) -> Option<f64> {
        match (self.land_value, self.building_value) {
            (Some(land), Some(building)) => Some(land + building - self.purchase_price),
            _ => None,
        }
    }
}

/// One-off costs of carrying out the subdivision
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubdivisionFees {
    /// Surveyor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surveyor_fees: Option<f64>,
    /// Planning / council
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planning_fees: Option<f64>,
    /// Legal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_fees: Option<f64>,
    /// Title registration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_fees: Option<f64>,
}

impl SubdivisionFees {
    /// Sum of all recorded fees
    #[must_use]
    pub fn total(&self) -> f64 {
        [
            self.surveyor_fees,
            self.planning_fees,
            self.legal_fees,
            self.title_fees,
        ]
        .into_iter()
        .flatten()
        .sum()
    }

    /// Equal share of the total for each of `lot_count` lots
    #[must_use]
    pub fn per_lot(&self, lot_count: usize) -> f64 {
        if lot_count == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let n = lot_count as f64;
        self.total() / n
    }

    /// Whether no fee carries a nonzero amount
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0.0
    }

    /// Drop zero entries, matching how the commit payload omits them
    #[must_use]
    pub fn normalized(self) -> Self {
        let keep = |v: Option<f64>| v.filter(|x| *x != 0.0);
        Self {
            surveyor_fees: keep(self.surveyor_fees),
            planning_fees: keep(self.planning_fees),
            legal_fees: keep(self.legal_fees),
            title_fees: keep(self.title_fees),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn land_value_takes_precedence() {
        let base = ParentCostBase::from_purchase_price(1_000_000.0).with_land_value(600_000.0);
        assert_eq!(base.apportionable_base(), 600_000.0);
        assert_eq!(
            ParentCostBase::from_purchase_price(500_000.0).apportionable_base(),
            500_000.0
        );
    }

    #[test]
    fn component_difference_needs_both() {
        let base = ParentCostBase::from_purchase_price(1_000_000.0).with_land_value(500_000.0);
        assert_eq!(base.component_difference(), None);
        let base = base.with_building_value(250_000.0);
        assert_eq!(base.component_difference(), Some(-250_000.0));
    }

    #[test]
    fn unrecorded_means_no_price_and_no_land() {
        assert!(ParentCostBase::default().is_unrecorded());
        assert!(ParentCostBase::default().with_building_value(200_000.0).is_unrecorded());
        assert!(!ParentCostBase::from_purchase_price(1.0).is_unrecorded());
        assert!(!ParentCostBase::default().with_land_value(0.0).is_unrecorded());
    }

    #[test]
    fn fees_split_equally() {
        let fees = SubdivisionFees {
            surveyor_fees: Some(3_000.0),
            legal_fees: Some(1_500.0),
            ..SubdivisionFees::default()
        };
        assert_eq!(fees.total(), 4_500.0);
        assert_eq!(fees.per_lot(3), 1_500.0);
        assert_eq!(fees.per_lot(0), 0.0);
    }

    #[test]
    fn normalized_drops_zeros() {
        let fees = SubdivisionFees {
            surveyor_fees: Some(0.0),
            title_fees: Some(120.0),
            ..SubdivisionFees::default()
        }
        .normalized();
        assert_eq!(fees.surveyor_fees, None);
        assert_eq!(fees.title_fees, Some(120.0));
    }

    #[test]
    fn camel_case_wire_names() {
        let base: ParentCostBase =
            serde_json::from_str(r#"{"purchasePrice": 10, "landValue": 6}"#).unwrap();
        assert_eq!(base.land_value, Some(6.0));
        assert_eq!(base.building_value, None);
    }
}
