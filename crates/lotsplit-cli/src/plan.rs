//! Subdivision plan files
//!
//! A plan is TOML, or JSON when the file ends in `.json`:
//!
//! ```toml
//! date = "2024-07-01"
//! notes = "Two-lot split"
//!
//! [parent]
//! id = "parent-1"
//! name = "Farm"
//! address = "10 Rural Rd"
//! purchasePrice = 1000000.0
//! landValue = 600000.0
//!
//! [[lots]]
//! name = "Homestead"
//! size = 0.25
//!
//! [[lots]]
//! size = 0.75
//! percentage = 70.0
//!
//! [config]
//! display_unit = "hectares"
//! ```
//!
//! Lot sizes are in the configured display unit. A `percentage` locks the lot.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use lotsplit_core::{default_lot_name, Lot, LotSet, SubdivisionFees};
use lotsplit_session::{ParentProperty, SessionConfig, SubdivisionSession};
use serde::Deserialize;
use std::path::Path;

/// One lot as written in a plan
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanLot {
    /// Defaults to "Lot N"
    pub name: Option<String>,
    /// Defaults to the parent address
    pub address: Option<String>,
    /// Area in the display unit
    pub size: Option<f64>,
    /// Locked percentage; omitted lots are auto-allocated
    pub percentage: Option<f64>,
}

/// Parsed plan file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanFile {
    /// Property being subdivided
    pub parent: ParentProperty,
    /// Subdivision date
    pub date: NaiveDate,
    /// Lots; two blank lots when empty
    #[serde(default)]
    pub lots: Vec<PlanLot>,
    /// Subdivision fees
    #[serde(default)]
    pub fees: SubdivisionFees,
    /// Free-text notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Session settings
    #[serde(default)]
    pub config: SessionConfig,
}

impl PlanFile {
    /// Read and parse a plan, choosing the format by extension
    ///
    /// # Errors
    /// Unreadable file, malformed content or out-of-range settings.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read plan file {}", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let plan = if is_json {
            Self::from_json_str(&source)
        } else {
            Self::from_toml_str(&source)
        };
        plan.with_context(|| format!("invalid plan file {}", path.display()))
    }

    /// Parse a TOML plan
    ///
    /// # Errors
    /// Malformed TOML or out-of-range settings.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let plan: Self = toml::from_str(source)?;
        plan.checked()
    }

    /// Parse a JSON plan
    ///
    /// # Errors
    /// Malformed JSON or out-of-range settings.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let plan: Self = serde_json::from_str(source)?;
        plan.checked()
    }

    /// Whether the parent carries neither a purchase price nor a land value
    ///
    /// Unknown keys under `[parent]` are absorbed by its flattened cost base,
    /// so a misspelled `purchasePrice` parses as a zero price.
    #[inline]
    #[must_use]
    pub fn lacks_cost_base(&self) -> bool {
        self.parent.cost_base.is_unrecorded()
    }

    fn checked(self) -> Result<Self> {
        self.config.validate()?;
        if self.lacks_cost_base() {
            tracing::warn!(
                parent = %self.parent.id,
                "Plan records no purchasePrice or landValue; every lot will carry a zero cost base"
            );
        }
        Ok(self)
    }

    /// Open a session with the plan's lots, recomputed
    ///
    /// # Errors
    /// A plan listing exactly one lot.
    pub fn into_session(self) -> Result<SubdivisionSession> {
        let Self {
            parent,
            date,
            lots,
            fees,
            notes,
            config,
        } = self;

        let mut session = if lots.is_empty() {
            SubdivisionSession::new(parent, date, config)
        } else {
            let unit = config.display_unit;
            let built = lots.into_iter().enumerate().map(|(index, plan_lot)| {
                let name = plan_lot.name.unwrap_or_else(|| default_lot_name(index + 1));
                let address = plan_lot.address.unwrap_or_else(|| parent.address.clone());
                let lot = Lot::new(name, address).with_size(unit.to_canonical(plan_lot.size.unwrap_or(0.0)));
                match plan_lot.percentage {
                    Some(pct) => lot.with_locked_percentage(pct),
                    None => lot,
                }
            });
            let lot_set = LotSet::from_lots(built).context("plan must list at least two lots")?;
            SubdivisionSession::with_lots(parent, date, config, lot_set)
        };

        session.set_fees(fees);
        session.set_notes(notes);
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotsplit_core::AreaUnit;
    use pretty_assertions::assert_eq;

    const PLAN: &str = r#"
date = "2024-07-01"

[parent]
id = "parent-1"
name = "Farm"
address = "10 Rural Rd"
purchasePrice = 1000000.0

[[lots]]
name = "Homestead"
size = 0.01

[[lots]]
size = 0.03
"#;

    #[test]
    fn parses_toml_plan() {
        let plan = PlanFile::from_toml_str(PLAN).unwrap();
        assert_eq!(plan.parent.cost_base.purchase_price, 1_000_000.0);
        assert_eq!(plan.lots.len(), 2);
        assert_eq!(plan.config.display_unit, AreaUnit::Hectares);
    }

    #[test]
    fn session_fills_defaults_and_recomputes() {
        let session = PlanFile::from_toml_str(PLAN).unwrap().into_session().unwrap();
        let lots: Vec<_> = session.lots().iter().collect();
        assert_eq!(lots[0].name, "Homestead");
        assert_eq!(lots[1].name, "Lot 2");
        assert_eq!(lots[1].address, "10 Rural Rd");
        assert_eq!(session.lots().percentages(), vec![25.0, 75.0]);
    }

    #[test]
    fn empty_lot_list_seeds_two() {
        let plan = PlanFile::from_toml_str(
            r#"
date = "2024-07-01"
[parent]
id = "p"
"#,
        )
        .unwrap();
        let session = plan.into_session().unwrap();
        assert_eq!(session.lots().percentages(), vec![50.0, 50.0]);
    }

    #[test]
    fn single_lot_is_rejected() {
        let plan = PlanFile::from_toml_str(
            r#"
date = "2024-07-01"
[parent]
id = "p"
[[lots]]
name = "Only"
"#,
        )
        .unwrap();
        assert!(plan.into_session().is_err());
    }

    #[test]
    fn unknown_top_level_key_is_rejected() {
        let source = PLAN.replace("date =", "dates =");
        assert!(PlanFile::from_toml_str(&source).is_err());

        let source = format!("note = \"typo\"\n{PLAN}");
        assert!(PlanFile::from_toml_str(&source).is_err());
    }

    #[test]
    fn misspelled_price_leaves_cost_base_unrecorded() {
        assert!(!PlanFile::from_toml_str(PLAN).unwrap().lacks_cost_base());

        let source = PLAN.replace("purchasePrice", "purchase_price");
        let plan = PlanFile::from_toml_str(&source).unwrap();
        assert!(plan.lacks_cost_base());
        assert_eq!(plan.parent.cost_base.purchase_price, 0.0);
    }

    #[test]
    fn bad_config_is_rejected() {
        let source = format!("{PLAN}\n[config]\ncost_mismatch_tolerance = -5.0\n");
        assert!(PlanFile::from_toml_str(&source).is_err());
    }
}
