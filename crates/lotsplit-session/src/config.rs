//! Session configuration
//!
//! Every field has a default, so an empty TOML document is a valid config.

use crate::error::ConfigError;
use lotsplit_core::AreaUnit;
use lotsplit_validation::{GateConfig, DEFAULT_COST_MISMATCH_TOLERANCE, DEFAULT_PERCENTAGE_TOLERANCE};
use serde::{Deserialize, Serialize};

/// Which edits trigger an automatic recompute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecomputeTrigger {
    /// Size edits and lot add/remove only; lock changes wait for the next one
    #[default]
    SizeChange,

    /// Size edits, lot add/remove and any lock transition
    SizeOrLockChange,
}

impl RecomputeTrigger {
    /// Whether a lock transition recomputes immediately
    #[inline]
    #[must_use]
    pub fn on_lock_change(self) -> bool {
        matches!(self, Self::SizeOrLockChange)
    }
}

/// Session configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Unit for size input and display
    pub display_unit: AreaUnit,
    /// When recompute runs automatically
    pub recompute_trigger: RecomputeTrigger,
    /// Allowed `|total - 100|` at submission
    pub percentage_tolerance: f64,
    /// Allowed land + building vs purchase price gap before an advisory
    pub cost_mismatch_tolerance: f64,
    /// Block submission while any lot has no area
    pub require_lot_sizes: bool,
}

impl SessionConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With display unit
    #[inline]
    #[must_use]
    pub fn with_display_unit(mut self, unit: AreaUnit) -> Self {
        self.display_unit = unit;
        self
    }

    /// With recompute trigger
    #[inline]
    #[must_use]
    pub fn with_recompute_trigger(mut self, trigger: RecomputeTrigger) -> Self {
        self.recompute_trigger = trigger;
        self
    }

    /// With lot sizes required at submission
    #[inline]
    #[must_use]
    pub fn with_required_lot_sizes(mut self, required: bool) -> Self {
        self.require_lot_sizes = required;
        self
    }

    /// Gate thresholds derived from this config
    #[must_use]
    pub fn gate_config(&self) -> GateConfig {
        GateConfig {
            percentage_tolerance: self.percentage_tolerance,
            cost_mismatch_tolerance: self.cost_mismatch_tolerance,
            require_lot_sizes: self.require_lot_sizes,
        }
    }

    /// Parse and check a TOML document
    ///
    /// # Errors
    /// [`ConfigError::Toml`] on malformed input, [`ConfigError::Invalid`] on
    /// out-of-range values.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("percentage_tolerance", self.percentage_tolerance),
            ("cost_mismatch_tolerance", self.cost_mismatch_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{field} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            display_unit: AreaUnit::Hectares,
            recompute_trigger: RecomputeTrigger::SizeChange,
            percentage_tolerance: DEFAULT_PERCENTAGE_TOLERANCE,
            cost_mismatch_tolerance: DEFAULT_COST_MISMATCH_TOLERANCE,
            require_lot_sizes: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(SessionConfig::from_toml_str("").unwrap(), SessionConfig::default());
    }

    #[test]
    fn toml_overrides() {
        let config = SessionConfig::from_toml_str(
            r#"
            display_unit = "acres"
            recompute_trigger = "size_or_lock_change"
            require_lot_sizes = true
            "#,
        )
        .unwrap();
        assert_eq!(config.display_unit, AreaUnit::Acres);
        assert!(config.recompute_trigger.on_lock_change());
        assert!(config.gate_config().require_lot_sizes);
        assert_eq!(config.percentage_tolerance, 0.1);
    }

    #[test]
    fn rejects_negative_tolerance() {
        let err = SessionConfig::from_toml_str("percentage_tolerance = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("percentage_tolerance")));
    }

    #[test]
    fn rejects_unknown_unit() {
        assert!(matches!(
            SessionConfig::from_toml_str(r#"display_unit = "furlongs""#),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn builders() {
        let config = SessionConfig::new()
            .with_display_unit(AreaUnit::SquareMetres)
            .with_recompute_trigger(RecomputeTrigger::SizeOrLockChange)
            .with_required_lot_sizes(true);
        assert_eq!(config.display_unit, AreaUnit::SquareMetres);
        assert_eq!(config.recompute_trigger, RecomputeTrigger::SizeOrLockChange);
        assert!(config.require_lot_sizes);
    }
}
