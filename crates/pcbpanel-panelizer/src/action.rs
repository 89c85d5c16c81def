//! Host action
//!
//! The entry point a PCB host invokes. Initialisation is two-phase: build a
//! [`PanelAction`], then [`PanelAction::register`] it with the host's
//! [`ActionRegistry`]. A failed registration is returned to the caller.
//!
//! When run, the action asks the settings collaborator for a settings record
//! (none means cancelled or invalid input, and the run is skipped), runs the
//! panelizer, and reports the user-facing failures through the host.

use crate::error::PanelError;
use crate::panelizer::{PanelReport, Panelizer};
use pcbpanel_core::DesignDatabase;
use pcbpanel_settings::PanelSettings;
use thiserror::Error;
use tracing::{error, info, warn};

/// Metadata a host shows for an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionInfo {
    pub name: String,
    pub category: String,
    pub description: String,
    pub show_toolbar_button: bool,
}

/// Registration with the host failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Action '{0}' is already registered")]
    Duplicate(String),

    #[error("Host rejected action '{name}': {reason}")]
    Rejected { name: String, reason: String },
}

/// Host side of action registration
pub trait ActionRegistry {
    fn register(&mut self, info: &ActionInfo) -> Result<(), RegistrationError>;
}

/// Host side of user-visible error reporting
pub trait HostNotifier {
    fn show_error(&mut self, title: &str, message: &str);
}

/// Settings collaborator, e.g. a dialog. `None` skips the run.
pub trait SettingsSource {
    fn request_settings(&mut self) -> Option<PanelSettings>;
}

impl SettingsSource for Option<PanelSettings> {
    fn request_settings(&mut self) -> Option<PanelSettings> {
        self.take()
    }
}

/// Simple registry keeping actions in registration order
#[derive(Debug, Clone, Default)]
pub struct ActionTable {
    actions: Vec<ActionInfo>,
}

impl ActionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> &[ActionInfo] {
        &self.actions
    }

    pub fn find(&self, name: &str) -> Option<&ActionInfo> {
        self.actions.iter().find(|a| a.name == name)
    }
}

impl ActionRegistry for ActionTable {
    fn register(&mut self, info: &ActionInfo) -> Result<(), RegistrationError> {
        if self.find(&info.name).is_some() {
            return Err(RegistrationError::Duplicate(info.name.clone()));
        }
        self.actions.push(info.clone());
        Ok(())
    }
}

/// Result of invoking the action
#[derive(Debug)]
pub enum ActionOutcome {
    /// No settings were supplied
    Cancelled,
    Completed(PanelReport),
    Failed(PanelError),
}

/// The panelizer as a host action
#[derive(Debug, Clone)]
pub struct PanelAction {
    info: ActionInfo,
}

impl Default for PanelAction {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelAction {
    pub fn new() -> Self {
        Self {
            info: ActionInfo {
                name: "PCB Panelizer".to_string(),
                category: "Panelize".to_string(),
                description: "Panelize PCB with V-Score and Mousebites".to_string(),
                show_toolbar_button: true,
            },
        }
    }

    pub fn info(&self) -> &ActionInfo {
        &self.info
    }

    /// Second initialisation phase: make the action known to the host
    pub fn register<R: ActionRegistry + ?Sized>(
        &self,
        registry: &mut R,
    ) -> Result<(), RegistrationError> {
        match registry.register(&self.info) {
            Ok(()) => {
                info!("Registered action '{}'", self.info.name);
                Ok(())
            }
            Err(e) => {
                error!("Failed to register action '{}': {}", self.info.name, e);
                Err(e)
            }
        }
    }

    /// Run against the host's design with settings from `source`
    pub fn run<D, N, S>(&self, db: &mut D, notifier: &mut N, source: &mut S) -> ActionOutcome
    where
        D: DesignDatabase + ?Sized,
        N: HostNotifier + ?Sized,
        S: SettingsSource + ?Sized,
    {
        let Some(settings) = source.request_settings() else {
            info!("No settings supplied, panelization skipped");
            return ActionOutcome::Cancelled;
        };

        let result = Panelizer::new(settings).and_then(|panelizer| panelizer.run(db));
        match result {
            Ok(report) => ActionOutcome::Completed(report),
            Err(e) => {
                if e.is_user_facing() {
                    warn!("{}", e);
                    notifier.show_error(e.title(), &e.user_message());
                } else {
                    error!("Panelization failed: {}", e);
                }
                ActionOutcome::Failed(e)
            }
        }
    }
}
