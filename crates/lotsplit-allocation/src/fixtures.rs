//! Lot set builders shared by the unit tests

use lotsplit_core::{Lot, LotSet};

/// Lots from `(size, locked percentage)` pairs, named "Lot 1", "Lot 2", ...
pub(crate) fn lot_set(layout: &[(f64, Option<f64>)]) -> LotSet {
    let lots = layout.iter().enumerate().map(|(i, (size, locked))| {
        let lot = Lot::new(format!("Lot {}", i + 1), "").with_size(*size);
        match locked {
            Some(pct) => lot.with_locked_percentage(*pct),
            None => lot,
        }
    });
    LotSet::from_lots(lots).unwrap()
}

pub(crate) fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-9, "{actual:?} vs {expected:?}");
    }
}
