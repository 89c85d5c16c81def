//! Panelization run
//!
//! Ties the pieces together in a fixed order. Steps 1-3 only read the
//! design; nothing is modified unless the board outline exists and the grid
//! fits the panel. Once mutation starts it runs to completion with no
//! rollback.
//!
//! 1. Board bounding box from the boundary layer
//! 2. Settings validation
//! 3. Layout planning and fit check
//! 4. Capture of source primitives
//! 5. Removal of the unit outline (V-score only)
//! 6. Replication into every non-origin cell
//! 7. Panel frame on the boundary layer, stroke width = gap
//! 8. Separation lines
//! 9. View refresh

use crate::error::{PanelError, PanelResult};
use crate::layout::{plan_layout, GridSpec, LayoutPlan};
use crate::outline::{board_bounding_box, emit_rectangle_outline};
use crate::replicate::{capture_sources, replicate};
use crate::separation::{synthesize, SeparationSummary};
use pcbpanel_core::{DesignDatabase, PrimitiveId};
use pcbpanel_settings::PanelSettings;
use tracing::{debug, info};

/// What a completed run added and removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelReport {
    pub plan: LayoutPlan,
    /// Cells that received a copy (all but the origin)
    pub replicated_cells: usize,
    /// Primitives inserted by replication
    pub duplicated_primitives: usize,
    /// Boundary drawings removed from the source board
    pub removed_boundary: usize,
    /// The four frame segments
    pub frame: Vec<PrimitiveId>,
    pub separation: SeparationSummary,
}

impl PanelReport {
    /// Board copies on the panel, the source included
    pub fn board_copies(&self) -> usize {
        self.replicated_cells + 1
    }
}

/// Runs panelization against a host design database
#[derive(Debug, Clone)]
pub struct Panelizer {
    settings: PanelSettings,
}

impl Panelizer {
    /// Create a panelizer, rejecting invalid settings
    pub fn new(settings: PanelSettings) -> PanelResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &PanelSettings {
        &self.settings
    }

    /// Steps 1-3: compute the layout without modifying the design
    pub fn plan<D: DesignDatabase + ?Sized>(&self, db: &D) -> PanelResult<LayoutPlan> {
        let board = board_bounding_box(db).ok_or(PanelError::MissingBoundary)?;
        self.settings.validate()?;

        let scale = db.scale();
        let spec = GridSpec::from_settings(&self.settings, &board, scale);
        let plan = plan_layout(&board, &spec).map_err(|e| e.into_panel_error(scale))?;

        debug!(
            "Layout: board {}x{}, array {}x{}, frame at ({}, {}), margins {}/{}",
            board.width,
            board.height,
            plan.array_width,
            plan.array_height,
            plan.frame.x,
            plan.frame.y,
            plan.margin_x,
            plan.margin_y
        );
        Ok(plan)
    }

    /// Panelize the design in place
    pub fn run<D: DesignDatabase + ?Sized>(&self, db: &mut D) -> PanelResult<PanelReport> {
        let settings = &self.settings;
        info!(
            "Panelizing {}x{} grid, gap {:.2} mm, {} separation, panel {:.2} x {:.2} mm",
            settings.columns,
            settings.rows,
            settings.gap_mm,
            settings.method,
            settings.panel_width_mm,
            settings.panel_height_mm
        );

        let plan = self.plan(db)?;
        let gap = plan.spec.gap;

        let sources = capture_sources(db, settings.method);

        let mut removed_boundary = 0;
        if settings.method.strips_boundary() {
            for id in db.boundary_drawings() {
                if db.remove(id).is_some() {
                    removed_boundary += 1;
                }
            }
            debug!("Removed {} boundary drawings", removed_boundary);
        }

        let replication = replicate(db, &sources, &plan)?;

        let frame = emit_rectangle_outline(
            db,
            plan.frame.origin(),
            plan.spec.panel_width,
            plan.spec.panel_height,
            gap,
        );

        let separation = synthesize(db, settings.method, &plan, gap);

        db.refresh_view();

        info!(
            "Panel complete: {} copies, {} duplicated primitives, {} cut segments, {} labels",
            plan.spec.total_copies(),
            replication.primitives(),
            separation.segments.len(),
            separation.labels.len()
        );

        Ok(PanelReport {
            replicated_cells: replication.cells,
            duplicated_primitives: replication.primitives(),
            removed_boundary,
            frame,
            separation,
            plan,
        })
    }
}
