//! PCB Panel Settings Crate
//!
//! Holds the validated panelization settings record, parses raw form
//! input into it, and persists it as JSON or TOML.

pub mod config;
pub mod error;
pub mod form;

pub use config::{PanelSettings, SeparationMethod, GAP_PRESETS_MM};
pub use error::{SettingsError, SettingsResult};
pub use form::PanelForm;
