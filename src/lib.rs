//! # PCB Panel
//!
//! Replicates a single PCB design onto a framed manufacturing panel.
//!
//! ## Architecture
//!
//! The workspace is split into crates:
//!
//! 1. **pcbpanel-core** - Distance units, geometry, primitives, host design database
//! 2. **pcbpanel-settings** - Panel settings record, form parsing, settings files
//! 3. **pcbpanel-panelizer** - Outline extraction, layout, replication, V-score lines
//! 4. **pcbpanel** - Command-line host that panelizes a board stored as JSON
//!
//! ## Features
//!
//! - **Grid Layout**: columns x rows copies with a configurable gap, centred in the panel
//! - **Fit Validation**: nothing is modified when the grid does not fit
//! - **Separation**: V-score lines split at every intersection, with labels
//! - **Outline Extraction**: chaining of segments and arcs into a closed polygon

pub mod cli;

pub use pcbpanel_core::{
    BoundingBox, Coord, CoreError, DesignDatabase, Layer, MemoryBoard, Point, Primitive,
    PrimitiveId, PrimitiveKind, Shape, UnitScale,
};

pub use pcbpanel_panelizer::{
    ActionInfo, ActionOutcome, ActionRegistry, ActionTable, HostNotifier, LayoutPlan,
    PanelAction, PanelError, PanelReport, Panelizer, RegistrationError, SettingsSource,
};

pub use pcbpanel_settings::{PanelForm, PanelSettings, SeparationMethod, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with line numbers and targets
/// - RUST_LOG environment variable support, INFO by default
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
