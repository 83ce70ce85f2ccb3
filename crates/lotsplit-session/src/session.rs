//! Subdivision editing session
//!
//! Owns the lot set for one parent property from the first edit to the
//! single commit. Every mutating edit goes through here so the allocation
//! engine runs at the right moments.

use crate::committer::{CommitReceipt, SubdivisionCommitter};
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::property::ParentProperty;
use crate::request::SubdivisionRequest;
use chrono::NaiveDate;
use lotsplit_allocation::{AllocationEngine, CostBaseApportioner, LotCostPreview};
use lotsplit_core::{parse_area_input, AreaUnit, Lot, LotId, LotSet, LotUpdate, SubdivisionFees};
use lotsplit_validation::{Advisory, ValidationGate, ValidationReport};

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    /// What the committer reported
    pub receipt: CommitReceipt,
    /// Non-blocking findings to show alongside the success notice
    pub advisories: Vec<Advisory>,
}

/// Editing session for one subdivision
#[derive(Debug, Clone)]
pub struct SubdivisionSession {
    /// Configuration
    config: SessionConfig,
    /// Property being subdivided
    parent: ParentProperty,
    /// Effective date
    subdivision_date: NaiveDate,
    /// Current lots
    lots: LotSet,
    /// One-off subdivision costs
    fees: SubdivisionFees,
    /// Free-text notes
    notes: Option<String>,
    /// Allocation engine
    engine: AllocationEngine,
    /// Submission gate
    gate: ValidationGate,
    /// Set once the committer succeeds
    committed: bool,
}

impl SubdivisionSession {
    /// Start with two lots at the parent address, split evenly
    #[must_use]
    pub fn new(parent: ParentProperty, subdivision_date: NaiveDate, config: SessionConfig) -> Self {
        let lots = LotSet::seeded(&parent.address);
        Self::with_lots(parent, subdivision_date, config, lots)
    }

    /// Resume from existing lots; unlocked shares are recomputed
    #[must_use]
    pub fn with_lots(
        parent: ParentProperty,
        subdivision_date: NaiveDate,
        config: SessionConfig,
        lots: LotSet,
    ) -> Self {
        let engine = AllocationEngine::new();
        let lots = engine.recompute(&lots);
        tracing::info!(parent = %parent.id, lots = lots.len(), "Subdivision session started");
        Self {
            gate: ValidationGate::with_config(config.gate_config()),
            config,
            parent,
            subdivision_date,
            lots,
            fees: SubdivisionFees::default(),
            notes: None,
            engine,
            committed: false,
        }
    }

    /// With subdivision fees
    #[inline]
    #[must_use]
    pub fn with_fees(mut self, fees: SubdivisionFees) -> Self {
        self.fees = fees;
        self
    }

    /// With notes
    #[inline]
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Current lots
    #[inline]
    #[must_use]
    pub fn lots(&self) -> &LotSet {
        &self.lots
    }

    /// Look up one lot
    #[inline]
    #[must_use]
    pub fn lot(&self, id: LotId) -> Option<&Lot> {
        self.lots.get(id)
    }

    /// Parent property
    #[inline]
    #[must_use]
    pub fn parent(&self) -> &ParentProperty {
        &self.parent
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Effective date
    #[inline]
    #[must_use]
    pub fn subdivision_date(&self) -> NaiveDate {
        self.subdivision_date
    }

    /// Subdivision fees
    #[inline]
    #[must_use]
    pub fn fees(&self) -> &SubdivisionFees {
        &self.fees
    }

    /// Notes
    #[inline]
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Whether the subdivision has been committed
    #[inline]
    #[must_use]
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Change the effective date
    pub fn set_subdivision_date(&mut self, date: NaiveDate) {
        self.subdivision_date = date;
    }

    /// Replace the fee table
    pub fn set_fees(&mut self, fees: SubdivisionFees) {
        self.fees = fees;
    }

    /// Replace the notes
    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes;
    }

    /// Append a lot at the parent address
    ///
    /// # Errors
    /// [`SessionError::AlreadyCommitted`] after a commit.
    pub fn add_lot(&mut self) -> Result<LotId, SessionError> {
        self.ensure_open()?;
        let id = self.lots.add_lot(&self.parent.address);
        tracing::info!(lot = %id, count = self.lots.len(), "Lot added");
        self.recompute();
        Ok(id)
    }

    /// Remove a lot; removing the first promotes the next to main lot
    ///
    /// # Errors
    /// Unknown lot, or a removal that would leave fewer than two lots.
    pub fn remove_lot(&mut self, id: LotId) -> Result<Lot, SessionError> {
        self.ensure_open()?;
        let removed = self.lots.remove(id)?;
        tracing::info!(lot = %id, count = self.lots.len(), "Lot removed");
        self.recompute();
        Ok(removed)
    }

    /// Rename a lot
    ///
    /// # Errors
    /// Unknown lot or closed session.
    pub fn rename_lot(&mut self, id: LotId, name: impl Into<String>) -> Result<(), SessionError> {
        self.update(id, LotUpdate::Name(name.into()))
    }

    /// Change a lot's address
    ///
    /// # Errors
    /// Unknown lot or closed session.
    pub fn set_address(&mut self, id: LotId, address: impl Into<String>) -> Result<(), SessionError> {
        self.update(id, LotUpdate::Address(address.into()))
    }

    /// Set a lot's area in the display unit
    ///
    /// # Errors
    /// Unknown lot or closed session.
    pub fn set_lot_size(&mut self, id: LotId, value: f64) -> Result<(), SessionError> {
        let sqm = self.config.display_unit.to_canonical(value);
        self.set_lot_size_sqm(id, sqm)
    }

    /// Set a lot's area from raw input text in the display unit
    ///
    /// Unparseable text counts as zero.
    ///
    /// # Errors
    /// Unknown lot or closed session.
    pub fn set_lot_size_input(&mut self, id: LotId, text: &str) -> Result<(), SessionError> {
        let sqm = parse_area_input(text, self.config.display_unit);
        self.set_lot_size_sqm(id, sqm)
    }

    /// Set a lot's area in square metres
    ///
    /// # Errors
    /// Unknown lot or closed session.
    pub fn set_lot_size_sqm(&mut self, id: LotId, sqm: f64) -> Result<(), SessionError> {
        self.update(id, LotUpdate::Size(sqm))
    }

    /// Enter a percentage by hand; the lot becomes locked
    ///
    /// # Errors
    /// Unknown lot or closed session.
    pub fn edit_percentage(&mut self, id: LotId, value: f64) -> Result<(), SessionError> {
        self.update(id, LotUpdate::Percentage(value))
    }

    /// Flip a lot's lock, keeping its current value
    ///
    /// # Errors
    /// Unknown lot or closed session.
    pub fn toggle_lock(&mut self, id: LotId) -> Result<(), SessionError> {
        self.update(id, LotUpdate::ToggleLock)
    }

    /// Apply a single-field edit and recompute when the trigger calls for it
    ///
    /// # Errors
    /// Unknown lot or closed session.
    pub fn update(&mut self, id: LotId, update: LotUpdate) -> Result<(), SessionError> {
        self.ensure_open()?;
        let touches_size = update.touches_size();
        let lock_changed = self.lots.update(id, update)?;
        if lock_changed {
            tracing::debug!(lot = %id, "Lock state changed");
        }
        if touches_size || (lock_changed && self.config.recompute_trigger.on_lock_change()) {
            self.recompute();
        }
        Ok(())
    }

    /// Re-derive every unlocked percentage
    pub fn recompute(&mut self) {
        self.lots = self.engine.recompute(&self.lots);
    }

    /// Change the display unit; stored sizes are untouched
    pub fn set_display_unit(&mut self, unit: AreaUnit) {
        self.config.display_unit = unit;
    }

    /// A lot's area in the display unit
    #[must_use]
    pub fn display_size(&self, id: LotId) -> Option<f64> {
        self.lots
            .get(id)
            .map(|lot| self.config.display_unit.from_canonical(lot.lot_size))
    }

    /// Total area formatted in the display unit, e.g. `"1.2500 ha"`
    #[must_use]
    pub fn total_size_display(&self) -> String {
        self.config.display_unit.format(self.lots.total_size())
    }

    /// Apportioner for the parent cost base and current fees
    #[must_use]
    pub fn apportioner(&self) -> CostBaseApportioner {
        CostBaseApportioner::new(self.parent.cost_base).with_fees(self.fees)
    }

    /// Cost base breakdown for every lot
    #[must_use]
    pub fn preview(&self) -> Vec<LotCostPreview> {
        self.apportioner().preview(&self.lots)
    }

    /// Run the submission checks without committing
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        self.gate.check(&self.lots, &self.parent.cost_base)
    }

    /// Request as it would be sent to the committer
    #[must_use]
    pub fn build_request(&self) -> SubdivisionRequest {
        SubdivisionRequest::new(
            self.parent.id.clone(),
            self.subdivision_date,
            &self.lots,
            &self.parent.cost_base,
            self.fees,
            self.notes.as_deref(),
        )
    }

    /// Validate and hand the request to the committer
    ///
    /// A blocked submission never reaches the committer. A successful one
    /// closes the session.
    ///
    /// # Errors
    /// [`SessionError::Blocked`] with the first blocking finding,
    /// [`SessionError::Commit`] when the committer fails,
    /// [`SessionError::AlreadyCommitted`] on a second call.
    pub fn submit<C>(&mut self, committer: &mut C) -> Result<SubmitOutcome, SessionError>
    where
        C: SubdivisionCommitter + ?Sized,
    {
        self.ensure_open()?;

        let report = self.validate();
        let advisories = match report.into_result() {
            Ok(advisories) => advisories,
            Err(err) => {
                tracing::warn!(parent = %self.parent.id, "Submission blocked: {}", err);
                return Err(err.into());
            }
        };
        for advisory in &advisories {
            tracing::warn!(parent = %self.parent.id, "{}", advisory.message());
        }

        let request = self.build_request();
        tracing::info!(
            parent = %self.parent.id,
            lots = request.lots.len(),
            "Issuing subdivision commit"
        );
        let receipt = committer.subdivide_property(request)?;
        self.committed = true;
        tracing::info!(
            parent = %self.parent.id,
            children = receipt.child_property_ids.len(),
            "Subdivision committed"
        );

        Ok(SubmitOutcome { receipt, advisories })
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.committed {
            Err(SessionError::AlreadyCommitted)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecomputeTrigger;
    use crate::error::CommitError;
    use lotsplit_core::{LotSetError, ParentCostBase};
    use pretty_assertions::assert_eq;

    struct CountingCommitter {
        calls: usize,
    }

    impl SubdivisionCommitter for CountingCommitter {
        fn subdivide_property(&mut self, request: SubdivisionRequest) -> Result<CommitReceipt, CommitError> {
            self.calls += 1;
            Ok(CommitReceipt {
                child_property_ids: (1..=request.lots.len()).map(|n| format!("child-{n}")).collect(),
            })
        }
    }

    fn session(config: SessionConfig) -> SubdivisionSession {
        SubdivisionSession::new(
            ParentProperty::new("parent-1", "Farm", "10 Rural Rd"),
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            config,
        )
    }

    fn ids(session: &SubdivisionSession) -> Vec<LotId> {
        session.lots().ids().collect()
    }

    #[test]
    fn starts_with_two_even_lots() {
        let s = session(SessionConfig::default());
        assert_eq!(s.lots().percentages(), vec![50.0, 50.0]);
        assert!(s.lots().iter().all(|l| l.address == "10 Rural Rd"));
    }

    #[test]
    fn size_edits_recompute_in_display_unit() {
        let mut s = session(SessionConfig::default());
        let lots = ids(&s);
        s.set_lot_size(lots[0], 0.01).unwrap();
        s.set_lot_size(lots[1], 0.03).unwrap();

        assert_eq!(s.lot(lots[0]).unwrap().lot_size, 100.0);
        assert_eq!(s.lots().percentages(), vec![25.0, 75.0]);
        assert_eq!(s.total_size_display(), "0.0400 ha");
    }

    #[test]
    fn bad_size_input_counts_as_zero() {
        let mut s = session(SessionConfig::default().with_display_unit(AreaUnit::SquareMetres));
        let lots = ids(&s);
        s.set_lot_size_input(lots[0], "300").unwrap();
        s.set_lot_size_input(lots[1], "abc").unwrap();
        assert_eq!(s.lots().percentages(), vec![100.0, 0.0]);
    }

    #[test]
    fn unlock_waits_for_next_size_change_by_default() {
        let mut s = session(SessionConfig::default());
        let lots = ids(&s);
        s.edit_percentage(lots[0], 30.0).unwrap();
        assert_eq!(s.lots().percentages(), vec![30.0, 50.0]);

        s.toggle_lock(lots[0]).unwrap();
        assert!(!s.lot(lots[0]).unwrap().is_percentage_locked());
        assert_eq!(s.lots().percentages(), vec![30.0, 50.0]);

        s.set_lot_size_sqm(lots[1], 0.0).unwrap();
        assert_eq!(s.lots().percentages(), vec![50.0, 50.0]);
    }

    #[test]
    fn lock_changes_recompute_when_configured() {
        let config = SessionConfig::default().with_recompute_trigger(RecomputeTrigger::SizeOrLockChange);
        let mut s = session(config);
        let lots = ids(&s);
        s.edit_percentage(lots[0], 30.0).unwrap();
        assert_eq!(s.lots().percentages(), vec![30.0, 70.0]);
    }

    #[test]
    fn add_and_remove_recompute() {
        let mut s = session(SessionConfig::default());
        let third = s.add_lot().unwrap();
        assert_eq!(s.lot(third).unwrap().name, "Lot 3");
        assert_eq!(s.lots().len(), 3);
        assert!((s.lots().total_percentage() - 100.0).abs() < 1e-9);

        s.remove_lot(third).unwrap();
        assert_eq!(s.lots().percentages(), vec![50.0, 50.0]);
    }

    #[test]
    fn removing_first_lot_hands_main_role_to_the_next() {
        let parent = ParentProperty::new("parent-1", "Farm", "10 Rural Rd").with_cost_base(
            ParentCostBase::from_purchase_price(1_000_000.0)
                .with_land_value(600_000.0)
                .with_building_value(200_000.0),
        );
        let mut s = SubdivisionSession::new(
            parent,
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            SessionConfig::default(),
        );
        s.add_lot().unwrap();
        let lots = ids(&s);

        s.remove_lot(lots[0]).unwrap();
        assert_eq!(s.lots().main_lot().id, lots[1]);

        let preview = s.preview();
        assert_eq!(preview[0].lot_id, lots[1]);
        assert!(preview[0].is_main_lot);
        assert_eq!(preview[0].building, 200_000.0);
        assert_eq!(preview[0].total(), 500_000.0);
        assert!(!preview[1].is_main_lot);
        assert_eq!(preview[1].building, 0.0);
    }

    #[test]
    fn removal_stops_at_two_lots() {
        let mut s = session(SessionConfig::default());
        let lots = ids(&s);
        for id in lots {
            assert!(matches!(
                s.remove_lot(id),
                Err(SessionError::Lot(LotSetError::BelowMinimum { .. }))
            ));
        }
        assert_eq!(s.lots().len(), 2);
    }

    #[test]
    fn blocked_submit_never_reaches_committer() {
        let mut s = session(SessionConfig::default());
        let lots = ids(&s);
        s.edit_percentage(lots[0], 40.0).unwrap();
        s.edit_percentage(lots[1], 50.0).unwrap();

        let mut committer = CountingCommitter { calls: 0 };
        let err = s.submit(&mut committer).unwrap_err();
        assert!(matches!(err, SessionError::Blocked(_)));
        assert!(err.is_user_fixable());
        assert_eq!(committer.calls, 0);
        assert!(!s.is_committed());
    }

    #[test]
    fn second_submit_is_refused() {
        let mut s = session(SessionConfig::default());
        let mut committer = CountingCommitter { calls: 0 };

        let outcome = s.submit(&mut committer).unwrap();
        assert_eq!(outcome.receipt.child_property_ids, vec!["child-1", "child-2"]);
        assert!(s.is_committed());

        assert!(matches!(s.submit(&mut committer), Err(SessionError::AlreadyCommitted)));
        assert!(matches!(s.add_lot(), Err(SessionError::AlreadyCommitted)));
        assert_eq!(committer.calls, 1);
    }
}
