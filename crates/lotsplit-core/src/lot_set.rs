//! The collection of lots being edited
//!
//! [`LotSet`] keeps lots in insertion order. The first lot is the main lot:
//! it continues the parent property's CGT history and is the only lot that
//! can carry the building value.

use crate::error::LotSetError;
use crate::lot::{Lot, LotId, LotUpdate};
use indexmap::IndexMap;

/// Minimum number of lots in a subdivision
pub const MIN_LOTS: usize = 2;

/// Ordered lot collection keyed by [`LotId`]
#[derive(Debug, Clone, PartialEq)]
pub struct LotSet {
    lots: IndexMap<LotId, Lot>,
}

impl LotSet {
    /// Fresh set of two unsized lots, "Lot 1" and "Lot 2", at the parent address
    #[must_use]
    pub fn seeded(parent_address: &str) -> Self {
        let mut lots = IndexMap::with_capacity(MIN_LOTS);
        for n in 1..=MIN_LOTS {
            let lot = Lot::new(default_lot_name(n), parent_address);
            lots.insert(lot.id, lot);
        }
        Self { lots }
    }

    /// Build from existing lots; the first becomes the main lot
    ///
    /// # Errors
    /// [`LotSetError::TooFewLots`] below [`MIN_LOTS`],
    /// [`LotSetError::DuplicateLot`] on repeated IDs.
    pub fn from_lots(lots: impl IntoIterator<Item = Lot>) -> Result<Self, LotSetError> {
        let mut map = IndexMap::new();
        for lot in lots {
            let id = lot.id;
            if map.insert(id, lot).is_some() {
                return Err(LotSetError::DuplicateLot(id));
            }
        }
        if map.len() < MIN_LOTS {
            return Err(LotSetError::TooFewLots {
                given: map.len(),
                minimum: MIN_LOTS,
            });
        }
        Ok(Self { lots: map })
    }

    /// Append a lot named "Lot N" where N is the new count
    pub fn add_lot(&mut self, address: &str) -> LotId {
        let lot = Lot::new(default_lot_name(self.lots.len() + 1), address);
        let id = lot.id;
        self.lots.insert(id, lot);
        id
    }

    /// Append an already-built lot
    ///
    /// # Errors
    /// [`LotSetError::DuplicateLot`] if the ID is present.
    pub fn push(&mut self, lot: Lot) -> Result<LotId, LotSetError> {
        let id = lot.id;
        if self.lots.contains_key(&id) {
            return Err(LotSetError::DuplicateLot(id));
        }
        self.lots.insert(id, lot);
        Ok(id)
    }

    /// Remove a lot, keeping the order of the rest
    ///
    /// Any lot may go, the first included; the next lot then becomes the
    /// main lot.
    ///
    /// # Errors
    /// Unknown lot, or removal below [`MIN_LOTS`].
    pub fn remove(&mut self, id: LotId) -> Result<Lot, LotSetError> {
        if !self.lots.contains_key(&id) {
            return Err(LotSetError::LotNotFound(id));
        }
        if self.lots.len() <= MIN_LOTS {
            return Err(LotSetError::BelowMinimum { minimum: MIN_LOTS });
        }
        self.lots
            .shift_remove(&id)
            .ok_or(LotSetError::LotNotFound(id))
    }

    /// Apply a single-field edit; returns `true` if the lock state changed
    ///
    /// # Errors
    /// [`LotSetError::LotNotFound`] for an unknown ID.
    pub fn update(&mut self, id: LotId, update: LotUpdate) -> Result<bool, LotSetError> {
        let lot = self.lots.get_mut(&id).ok_or(LotSetError::LotNotFound(id))?;
        Ok(update.apply(lot))
    }

    /// Look up a lot
    #[inline]
    #[must_use]
    pub fn get(&self, id: LotId) -> Option<&Lot> {
        self.lots.get(&id)
    }

    /// Mutable lookup
    #[inline]
    pub fn get_mut(&mut self, id: LotId) -> Option<&mut Lot> {
        self.lots.get_mut(&id)
    }

    /// The main lot (always present)
    #[must_use]
    pub fn main_lot(&self) -> &Lot {
        // Never fewer than MIN_LOTS entries
        &self.lots[0]
    }

    /// Whether `id` is the main lot
    #[inline]
    #[must_use]
    pub fn is_main(&self, id: LotId) -> bool {
        self.lots.get_index_of(&id) == Some(0)
    }

    /// Position of a lot in display order
    #[inline]
    #[must_use]
    pub fn position(&self, id: LotId) -> Option<usize> {
        self.lots.get_index_of(&id)
    }

    /// Lots in display order
    pub fn iter(&self) -> impl Iterator<Item = &Lot> {
        self.lots.values()
    }

    /// Mutable lots in display order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Lot> {
        self.lots.values_mut()
    }

    /// Lot IDs in display order
    pub fn ids(&self) -> impl Iterator<Item = LotId> + '_ {
        self.lots.keys().copied()
    }

    /// Number of lots
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lots.len()
    }

    /// Always false for a constructed set; provided for API completeness
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    /// Total area in square metres
    #[must_use]
    pub fn total_size(&self) -> f64 {
        self.lots.values().map(|l| l.lot_size).sum()
    }

    /// Sum of all allocation percentages
    #[must_use]
    pub fn total_percentage(&self) -> f64 {
        self.lots.values().map(Lot::allocation_percentage).sum()
    }

    /// Allocation percentages in display order
    #[must_use]
    pub fn percentages(&self) -> Vec<f64> {
        self.lots.values().map(Lot::allocation_percentage).collect()
    }
}

impl<'a> IntoIterator for &'a LotSet {
    type Item = &'a Lot;
    type IntoIter = indexmap::map::Values<'a, LotId, Lot>;

    fn into_iter(self) -> Self::IntoIter {
        self.lots.values()
    }
}

/// Default name for the n-th lot (1-based)
#[inline]
#[must_use]
pub fn default_lot_name(n: usize) -> String {
    format!("Lot {n}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::share::AllocationShare;
    use pretty_assertions::assert_eq;

    #[test]
    fn seeded_has_two_named_lots() {
        let set = LotSet::seeded("12 Orchard Rd");
        let names: Vec<_> = set.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Lot 1", "Lot 2"]);
        assert!(set.iter().all(|l| l.address == "12 Orchard Rd"));
        assert!(set.iter().all(|l| l.lot_size == 0.0));
    }

    #[test]
    fn add_lot_numbers_by_count() {
        let mut set = LotSet::seeded("");
        let id = set.add_lot("x");
        assert_eq!(set.get(id).unwrap().name, "Lot 3");
        assert_eq!(set.len(), 3);
        assert_eq!(set.position(id), Some(2));
    }

    #[test]
    fn remove_rejects_below_minimum() {
        let mut set = LotSet::seeded("");
        let second = set.ids().nth(1).unwrap();
        assert_eq!(
            set.remove(second),
            Err(LotSetError::BelowMinimum { minimum: MIN_LOTS })
        );
    }

    #[test]
    fn removing_first_lot_promotes_the_next() {
        let mut set = LotSet::seeded("");
        set.add_lot("");
        let first = set.main_lot().id;
        let second = set.ids().nth(1).unwrap();

        let removed = set.remove(first).unwrap();
        assert_eq!(removed.id, first);
        assert_eq!(set.main_lot().id, second);
        assert!(set.is_main(second));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn remove_keeps_order() {
        let mut set = LotSet::seeded("");
        let third = set.add_lot("");
        let fourth = set.add_lot("");
        set.remove(third).unwrap();
        assert_eq!(set.position(fourth), Some(2));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn remove_unknown_lot() {
        let mut set = LotSet::seeded("");
        let stray = LotId::new();
        assert_eq!(set.remove(stray), Err(LotSetError::LotNotFound(stray)));
    }

    #[test]
    fn from_lots_validates() {
        assert_eq!(
            LotSet::from_lots(vec![Lot::new("solo", "")]),
            Err(LotSetError::TooFewLots { given: 1, minimum: 2 })
        );

        let a = Lot::new("a", "");
        let dup = a.clone();
        assert_eq!(
            LotSet::from_lots(vec![a.clone(), dup]),
            Err(LotSetError::DuplicateLot(a.id))
        );
    }

    #[test]
    fn update_reports_lock_transition() {
        let mut set = LotSet::seeded("");
        let id = set.main_lot().id;
        assert!(set.update(id, LotUpdate::Percentage(60.0)).unwrap());
        assert_eq!(set.get(id).unwrap().share, AllocationShare::Locked(60.0));
        assert!(!set.update(id, LotUpdate::Name("Front".into())).unwrap());
    }

    #[test]
    fn totals() {
        let set = LotSet::from_lots(vec![
            Lot::new("a", "").with_size(100.0).with_locked_percentage(40.0),
            Lot::new("b", "").with_size(300.0).with_locked_percentage(50.0),
        ])
        .unwrap();
        assert_eq!(set.total_size(), 400.0);
        assert_eq!(set.total_percentage(), 90.0);
        assert_eq!(set.percentages(), vec![40.0, 50.0]);
    }
}
