//! Testing utilities for the Lot Split workspace
//!
//! Shared fixtures, a recording committer and float assertions.

#![allow(missing_docs)]

use chrono::NaiveDate;
use lotsplit_core::{AllocationShare, Lot, LotSet, ParentCostBase};
use lotsplit_session::{
    CommitError, CommitReceipt, ParentProperty, SessionConfig, SubdivisionCommitter,
    SubdivisionRequest, SubdivisionSession,
};

pub const PARENT_ID: &str = "parent-1";

pub fn subdivision_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
}

/// $1,000,000 purchase, no recorded components
pub fn create_parent() -> ParentProperty {
    ParentProperty::new(PARENT_ID, "Farm", "10 Rural Rd")
        .with_cost_base(ParentCostBase::from_purchase_price(1_000_000.0))
}

/// $1,000,000 purchase split into $600,000 land and $200,000 building
pub fn create_parent_with_components() -> ParentProperty {
    ParentProperty::new(PARENT_ID, "Farm", "10 Rural Rd").with_cost_base(
        ParentCostBase::from_purchase_price(1_000_000.0)
            .with_land_value(600_000.0)
            .with_building_value(200_000.0),
    )
}

/// Lots from `(size in sqm, locked percentage)` pairs, named "Lot N"
pub fn create_lot_set(layout: &[(f64, Option<f64>)]) -> LotSet {
    LotSet::from_lots(layout.iter().enumerate().map(|(i, (size, locked))| {
        let share = match locked {
            Some(p) => AllocationShare::Locked(*p),
            None => AllocationShare::Auto(0.0),
        };
        Lot::new(format!("Lot {}", i + 1), "")
            .with_size(*size)
            .with_share(share)
    }))
    .unwrap()
}

pub fn setup_session(parent: ParentProperty) -> SubdivisionSession {
    SubdivisionSession::new(parent, subdivision_date(), SessionConfig::default())
}

pub fn setup_session_with_config(parent: ParentProperty, config: SessionConfig) -> SubdivisionSession {
    SubdivisionSession::new(parent, subdivision_date(), config)
}

pub fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "length mismatch: {actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-9, "{actual:?} != {expected:?}");
    }
}

/// Committer that keeps every request and can be told to fail
#[derive(Debug, Default)]
pub struct RecordingCommitter {
    pub requests: Vec<SubdivisionRequest>,
    pub reject_with: Option<String>,
}

impl RecordingCommitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(reason: &str) -> Self {
        Self {
            requests: Vec::new(),
            reject_with: Some(reason.to_string()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.len()
    }
}

impl SubdivisionCommitter for RecordingCommitter {
    fn subdivide_property(&mut self, request: SubdivisionRequest) -> Result<CommitReceipt, CommitError> {
        let lot_count = request.lots.len();
        self.requests.push(request);
        if let Some(reason) = &self.reject_with {
            return Err(CommitError::Rejected(reason.clone()));
        }
        Ok(CommitReceipt {
            child_property_ids: (1..=lot_count).map(|n| format!("child-{n}")).collect(),
        })
    }
}
