//! Error types for the panelizer crate.
//!
//! Validation failures (`MissingBoundary`, `PanelTooSmall`, `Settings`) are
//! raised before the host database is touched. The remaining variants can
//! only appear once mutation has begun and are not rolled back.

use pcbpanel_core::{Coord, CoreError, PrimitiveId, UnitScale};
use pcbpanel_settings::SettingsError;
use thiserror::Error;

/// Errors that can occur during a panelization run.
#[derive(Error, Debug)]
pub enum PanelError {
    /// No drawing on the boundary layer, so the board size is unknown.
    #[error("No board outline found on the boundary layer")]
    MissingBoundary,

    /// The requested grid does not fit inside the panel.
    #[error(
        "Panel size is too small: required {}, specified {}",
        size_mm(.scale, .required_width, .required_height),
        size_mm(.scale, .specified_width, .specified_height)
    )]
    PanelTooSmall {
        required_width: Coord,
        required_height: Coord,
        specified_width: Coord,
        specified_height: Coord,
        scale: UnitScale,
    },

    /// A captured source primitive vanished before it could be duplicated.
    #[error("Primitive {0} is no longer in the design")]
    StalePrimitive(PrimitiveId),

    /// The settings record failed validation.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// The host database rejected an operation.
    #[error("Design database error: {0}")]
    Core(#[from] CoreError),
}

impl PanelError {
    /// True for failures the user is told about through the host
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::MissingBoundary | Self::PanelTooSmall { .. })
    }

    /// Dialog title for a user-facing failure
    pub fn title(&self) -> &'static str {
        match self {
            Self::PanelTooSmall { .. } => "Panel Too Small",
            _ => "Error",
        }
    }

    /// Dialog body for a user-facing failure
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingBoundary => "No Edge.Cuts found!".to_string(),
            Self::PanelTooSmall {
                required_width,
                required_height,
                specified_width,
                specified_height,
                scale,
            } => format!(
                "Error: Panel size is too small!\n\nRequired: {}\nSpecified: {}",
                size_mm(scale, required_width, required_height),
                size_mm(scale, specified_width, specified_height)
            ),
            other => other.to_string(),
        }
    }
}

/// "102.00 mm x 62.00 mm"
fn size_mm(scale: &UnitScale, width: &Coord, height: &Coord) -> String {
    format!("{} x {}", scale.format_mm(*width), scale.format_mm(*height))
}

/// Result type alias for panelization.
pub type PanelResult<T> = Result<T, PanelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_too_small_message() {
        let err = PanelError::PanelTooSmall {
            required_width: 102_000_000,
            required_height: 62_000_000,
            specified_width: 100_000_000,
            specified_height: 65_000_000,
            scale: UnitScale::default(),
        };
        assert_eq!(err.title(), "Panel Too Small");
        assert_eq!(
            err.user_message(),
            "Error: Panel size is too small!\n\nRequired: 102.00 mm x 62.00 mm\nSpecified: 100.00 mm x 65.00 mm"
        );
        assert_eq!(
            err.to_string(),
            "Panel size is too small: required 102.00 mm x 62.00 mm, specified 100.00 mm x 65.00 mm"
        );
        assert!(err.is_user_facing());
    }

    #[test]
    fn test_missing_boundary_message() {
        let err = PanelError::MissingBoundary;
        assert_eq!(err.title(), "Error");
        assert_eq!(err.user_message(), "No Edge.Cuts found!");
        assert!(err.is_user_facing());
    }

    #[test]
    fn test_error_conversion() {
        let err: PanelError = SettingsError::UnknownMethod("laser".into()).into();
        assert!(matches!(err, PanelError::Settings(_)));
        assert!(!err.is_user_facing());

        let err: PanelError = CoreError::UnknownPrimitive(PrimitiveId(3)).into();
        assert!(matches!(err, PanelError::Core(_)));
    }
}
