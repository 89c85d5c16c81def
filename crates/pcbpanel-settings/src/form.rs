//! Raw settings form input
//!
//! A settings form collects free text. Parsing turns it into a validated
//! [`PanelSettings`]; any field that does not parse, or a record that does
//! not validate, yields no settings at all so the run is skipped.

use crate::config::{PanelSettings, SeparationMethod, GAP_PRESETS_MM};
use tracing::debug;

/// Text fields as entered by the user
#[derive(Debug, Clone, PartialEq)]
pub struct PanelForm {
    pub columns: String,
    pub rows: String,
    pub gap_mm: String,
    pub method: String,
    pub panel_width_mm: String,
    pub panel_height_mm: String,
}

impl Default for PanelForm {
    fn default() -> Self {
        let defaults = PanelSettings::default();
        Self {
            columns: defaults.columns.to_string(),
            rows: defaults.rows.to_string(),
            gap_mm: format!("{:.1}", GAP_PRESETS_MM[2]),
            method: SeparationMethod::VScore.to_string(),
            panel_width_mm: format!("{}", defaults.panel_width_mm),
            panel_height_mm: format!("{}", defaults.panel_height_mm),
        }
    }
}

impl PanelForm {
    /// Parse and validate, `None` when any field is unusable
    pub fn parse(&self) -> Option<PanelSettings> {
        let settings = PanelSettings {
            columns: self.columns.trim().parse().ok()?,
            rows: self.rows.trim().parse().ok()?,
            gap_mm: self.gap_mm.trim().parse().ok()?,
            method: self.method.parse().ok()?,
            panel_width_mm: self.panel_width_mm.trim().parse().ok()?,
            panel_height_mm: self.panel_height_mm.trim().parse().ok()?,
        };

        match settings.validate() {
            Ok(()) => Some(settings),
            Err(e) => {
                debug!("Discarding form input: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_parses() {
        let settings = PanelForm::default().parse().unwrap();
        assert_eq!(settings, PanelSettings::default());
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let form = PanelForm {
            columns: " 3 ".into(),
            rows: "1".into(),
            gap_mm: "1.5".into(),
            method: "Mousebites".into(),
            panel_width_mm: "160.5".into(),
            panel_height_mm: " 80".into(),
        };
        let s = form.parse().unwrap();
        assert_eq!(s.columns, 3);
        assert_eq!(s.method, SeparationMethod::Mousebites);
        assert_eq!(s.panel_width_mm, 160.5);
    }

    #[test]
    fn test_invalid_inputs() {
        let form = PanelForm {
            columns: "two".into(),
            ..PanelForm::default()
        };
        assert!(form.parse().is_none());

        let form = PanelForm {
            panel_height_mm: "".into(),
            ..PanelForm::default()
        };
        assert!(form.parse().is_none());

        let form = PanelForm {
            rows: "0".into(),
            ..PanelForm::default()
        };
        assert!(form.parse().is_none());

        let form = PanelForm {
            columns: "-1".into(),
            ..PanelForm::default()
        };
        assert!(form.parse().is_none());
    }
}
