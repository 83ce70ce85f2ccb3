//! Area units
//!
//! Lot sizes are always stored in square metres. [`AreaUnit`] converts
//! between that canonical value and whatever unit the user is viewing.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Square metres per hectare
pub const SQM_PER_HECTARE: f64 = 10_000.0;

/// Square metres per acre
pub const SQM_PER_ACRE: f64 = 4_046.86;

/// Display unit for a lot area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AreaUnit {
    /// Square metres (canonical)
    #[serde(rename = "sqms")]
    SquareMetres,

    /// Hectares
    #[default]
    #[serde(rename = "hectares")]
    Hectares,

    /// Acres
    #[serde(rename = "acres")]
    Acres,
}

impl AreaUnit {
    /// All units in selector order
    pub const ALL: [AreaUnit; 3] = [Self::Acres, Self::Hectares, Self::SquareMetres];

    /// Square metres represented by one of this unit
    #[inline]
    #[must_use]
    pub fn sqm_factor(self) -> f64 {
        match self {
            Self::SquareMetres => 1.0,
            Self::Hectares => SQM_PER_HECTARE,
            Self::Acres => SQM_PER_ACRE,
        }
    }

    /// Convert a value in this unit to square metres
    #[inline]
    #[must_use]
    pub fn to_canonical(self, value: f64) -> f64 {
        match self {
            Self::SquareMetres => value,
            other => value * other.sqm_factor(),
        }
    }

    /// Convert square metres to this unit
    #[inline]
    #[must_use]
    pub fn from_canonical(self, sqm: f64) -> f64 {
        match self {
            Self::SquareMetres => sqm,
            other => sqm / other.sqm_factor(),
        }
    }

    /// Decimal places shown for this unit
    #[inline]
    #[must_use]
    pub fn display_precision(self) -> usize {
        match self {
            Self::SquareMetres => 0,
            Self::Hectares => 4,
            Self::Acres => 3,
        }
    }

    /// Short label shown next to a value
    #[inline]
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SquareMetres => "sqms",
            Self::Hectares => "ha",
            Self::Acres => "acres",
        }
    }

    /// Increment used by numeric inputs in this unit
    #[inline]
    #[must_use]
    pub fn input_step(self) -> f64 {
        match self {
            Self::SquareMetres => 1.0,
            Self::Hectares => 0.0001,
            Self::Acres => 0.001,
        }
    }

    /// Format a canonical area for display in this unit, e.g. `1.2500 ha`
    #[must_use]
    pub fn format(self, sqm: f64) -> String {
        format!(
            "{:.*} {}",
            self.display_precision(),
            self.from_canonical(sqm),
            self.label()
        )
    }

    /// Serialized name of the unit
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SquareMetres => "sqms",
            Self::Hectares => "hectares",
            Self::Acres => "acres",
        }
    }
}

impl std::fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown unit name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown area unit: '{0}' (expected sqms, hectares or acres)")]
pub struct UnknownUnit(pub String);

impl FromStr for AreaUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqms" | "sqm" | "m2" | "square_metres" => Ok(Self::SquareMetres),
            "hectares" | "hectare" | "ha" => Ok(Self::Hectares),
            "acres" | "acre" | "ac" => Ok(Self::Acres),
            _ => Err(UnknownUnit(s.to_string())),
        }
    }
}

/// Parse a user-entered area into square metres
///
/// Empty or unparsable text reads as zero, negative values clamp to zero.
#[must_use]
pub fn parse_area_input(text: &str, unit: AreaUnit) -> f64 {
    let value = text.trim().parse::<f64>().unwrap_or(0.0);
    unit.to_canonical(clamp_area(value))
}

/// Clamp an area to the valid, non-negative range
#[inline]
#[must_use]
pub fn clamp_area(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hectares_to_sqm() {
        assert_eq!(AreaUnit::Hectares.to_canonical(1.5), 15_000.0);
        assert_eq!(AreaUnit::Hectares.from_canonical(2_500.0), 0.25);
    }

    #[test]
    fn acres_to_sqm() {
        assert!((AreaUnit::Acres.to_canonical(2.0) - 8_093.72).abs() < 1e-9);
        assert!((AreaUnit::Acres.from_canonical(4_046.86) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn sqm_is_identity() {
        assert_eq!(AreaUnit::SquareMetres.to_canonical(612.5), 612.5);
        assert_eq!(AreaUnit::SquareMetres.from_canonical(612.5), 612.5);
    }

    #[test]
    fn format_uses_unit_precision() {
        assert_eq!(AreaUnit::SquareMetres.format(612.4), "612 sqms");
        assert_eq!(AreaUnit::Hectares.format(12_345.0), "1.2345 ha");
        assert_eq!(AreaUnit::Acres.format(4_046.86), "1.000 acres");
    }

    #[test]
    fn format_does_not_round_storage() {
        let sqm = AreaUnit::Hectares.to_canonical(0.123_456);
        assert_eq!(AreaUnit::Hectares.format(sqm), "0.1235 ha");
        assert!((AreaUnit::Hectares.from_canonical(sqm) - 0.123_456).abs() < 1e-12);
    }

    #[test]
    fn parse_unit_names() {
        assert_eq!("ha".parse::<AreaUnit>().unwrap(), AreaUnit::Hectares);
        assert_eq!("Acres".parse::<AreaUnit>().unwrap(), AreaUnit::Acres);
        assert_eq!("sqms".parse::<AreaUnit>().unwrap(), AreaUnit::SquareMetres);
        assert!("furlongs".parse::<AreaUnit>().is_err());
    }

    #[test]
    fn serde_names_match_display() {
        for unit in AreaUnit::ALL {
            let json = serde_json::to_string(&unit).unwrap();
            assert_eq!(json, format!("\"{unit}\""));
        }
    }

    #[test]
    fn parse_input_defaults_to_zero() {
        assert_eq!(parse_area_input("", AreaUnit::Hectares), 0.0);
        assert_eq!(parse_area_input("abc", AreaUnit::Acres), 0.0);
        assert_eq!(parse_area_input("-3", AreaUnit::SquareMetres), 0.0);
        assert_eq!(parse_area_input(" 0.05 ", AreaUnit::Hectares), 500.0);
    }

    proptest! {
        #[test]
        fn prop_round_trip(
            value in 0.0f64..1.0e7,
            unit in prop_oneof![
                Just(AreaUnit::SquareMetres),
                Just(AreaUnit::Hectares),
                Just(AreaUnit::Acres),
            ]
        ) {
            let back = unit.from_canonical(unit.to_canonical(value));
            prop_assert!((back - value).abs() <= 1e-9 * value.max(1.0));
        }
    }
}
