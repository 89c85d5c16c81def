//! Panel settings
//!
//! The settings record handed to the panelizer after validation, plus
//! JSON/TOML settings files so a run can be repeated from the command line.

use crate::error::{SettingsError, SettingsResult};
use pcbpanel_core::{Coord, UnitScale};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Gap sizes offered by the settings form, in millimetres
pub const GAP_PRESETS_MM: [f64; 5] = [1.0, 1.5, 2.0, 2.5, 5.0];

/// How neighbouring board copies are separated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeparationMethod {
    /// Straight scored grooves across the whole panel
    #[default]
    #[serde(alias = "V-Cut", alias = "V-score", alias = "vscore")]
    VScore,
    /// Perforated break-away tabs
    #[serde(alias = "Mousebites")]
    Mousebites,
}

impl SeparationMethod {
    /// True when the unit boundary is replaced by the frame and cut lines
    pub fn strips_boundary(&self) -> bool {
        matches!(self, Self::VScore)
    }
}

impl fmt::Display for SeparationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VScore => write!(f, "V-score"),
            Self::Mousebites => write!(f, "Mousebites"),
        }
    }
}

impl FromStr for SeparationMethod {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "v-cut" | "v-score" | "vscore" | "vcut" => Ok(Self::VScore),
            "mousebites" | "mouse-bites" => Ok(Self::Mousebites),
            _ => Err(SettingsError::UnknownMethod(s.to_string())),
        }
    }
}

/// Validated panelization settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    /// Board copies along X
    pub columns: u32,
    /// Board copies along Y
    pub rows: u32,
    /// Space between neighbouring copies (mm)
    pub gap_mm: f64,
    pub method: SeparationMethod,
    /// Outer frame width (mm)
    pub panel_width_mm: f64,
    /// Outer frame height (mm)
    pub panel_height_mm: f64,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            columns: 2,
            rows: 2,
            gap_mm: GAP_PRESETS_MM[2],
            method: SeparationMethod::VScore,
            panel_width_mm: 100.0,
            panel_height_mm: 100.0,
        }
    }
}

impl PanelSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every field against its allowed range
    pub fn validate(&self) -> SettingsResult<()> {
        if self.columns == 0 {
            return Err(SettingsError::invalid("columns", "must be at least 1"));
        }
        if self.rows == 0 {
            return Err(SettingsError::invalid("rows", "must be at least 1"));
        }
        if !self.gap_mm.is_finite() || self.gap_mm < 0.0 {
            return Err(SettingsError::invalid(
                "gap_mm",
                format!("must be a finite value >= 0, got {}", self.gap_mm),
            ));
        }
        for (key, value) in [
            ("panel_width_mm", self.panel_width_mm),
            ("panel_height_mm", self.panel_height_mm),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::invalid(
                    key,
                    format!("must be a finite value > 0, got {}", value),
                ));
            }
        }
        Ok(())
    }

    pub fn gap(&self, scale: UnitScale) -> Coord {
        scale.to_units(self.gap_mm)
    }

    pub fn panel_width(&self, scale: UnitScale) -> Coord {
        scale.to_units(self.panel_width_mm)
    }

    pub fn panel_height(&self, scale: UnitScale) -> Coord {
        scale.to_units(self.panel_height_mm)
    }

    /// Load settings from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let settings: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_form() {
        let s = PanelSettings::default();
        assert_eq!((s.columns, s.rows), (2, 2));
        assert_eq!(s.gap_mm, 2.0);
        assert_eq!(s.method, SeparationMethod::VScore);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut s = PanelSettings::default();
        s.columns = 0;
        assert!(matches!(
            s.validate(),
            Err(SettingsError::InvalidSetting { ref key, .. }) if key == "columns"
        ));

        let mut s = PanelSettings::default();
        s.gap_mm = -0.5;
        assert!(s.validate().is_err());

        let mut s = PanelSettings::default();
        s.panel_height_mm = 0.0;
        assert!(s.validate().is_err());

        let mut s = PanelSettings::default();
        s.panel_width_mm = f64::NAN;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_zero_gap_is_valid() {
        let mut s = PanelSettings::default();
        s.gap_mm = 0.0;
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("V-Cut".parse::<SeparationMethod>().unwrap(), SeparationMethod::VScore);
        assert_eq!("vscore".parse::<SeparationMethod>().unwrap(), SeparationMethod::VScore);
        assert_eq!(
            " Mousebites ".parse::<SeparationMethod>().unwrap(),
            SeparationMethod::Mousebites
        );
        assert!("laser".parse::<SeparationMethod>().is_err());
        assert!(SeparationMethod::VScore.strips_boundary());
        assert!(!SeparationMethod::Mousebites.strips_boundary());
    }

    #[test]
    fn test_default_method_is_vscore() {
        assert_eq!(SeparationMethod::default(), SeparationMethod::VScore);
        assert_eq!(PanelSettings::default().method, SeparationMethod::VScore);
    }

    #[test]
    fn test_unit_conversion() {
        let s = PanelSettings {
            gap_mm: 2.0,
            panel_width_mm: 105.0,
            panel_height_mm: 65.0,
            ..PanelSettings::default()
        };
        let scale = UnitScale::default();
        assert_eq!(s.gap(scale), 2_000_000);
        assert_eq!(s.panel_width(scale), 105_000_000);
        assert_eq!(s.panel_height(scale), 65_000_000);
    }
}
