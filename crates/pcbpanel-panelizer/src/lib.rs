//! # PCB Panelizer
//!
//! Turns a single board design into a manufacturing panel: copies of the
//! board on a regular grid, a rectangular frame, and separation lines.
//!
//! ## Components
//!
//! - **Outline**: boundary bounding box, outline polygon extraction and rendering
//! - **Layout**: array extent, fit validation, frame centring and cut coordinates
//! - **Replicate**: duplicates the source primitives into every grid cell
//! - **Separation**: V-score lines with intersection splitting and labels
//! - **Panelizer**: the ordered run over a host design database
//! - **Action**: host registration, settings request and error reporting

pub mod action;
pub mod error;
pub mod layout;
pub mod outline;
pub mod panelizer;
pub mod replicate;
pub mod separation;

pub use action::{
    ActionInfo, ActionOutcome, ActionRegistry, ActionTable, HostNotifier, PanelAction,
    RegistrationError, SettingsSource,
};
pub use error::{PanelError, PanelResult};
pub use layout::{plan_layout, FitError, GridSpec, LayoutPlan};
pub use outline::{
    board_bounding_box, board_size_mm, emit_rectangle_outline, extract_board_outline,
    extract_boundary_polygon, render_polygon, BoundaryPolygon, OutlineExtraction, PolygonSet,
};
pub use panelizer::{PanelReport, Panelizer};
pub use replicate::{capture_sources, replicate, ReplicationSummary};
pub use separation::{
    plan_vscore, synthesize, CutLabel, CutOrientation, CutSegment, SeparationPlan,
    SeparationStrategy, SeparationSummary,
};
