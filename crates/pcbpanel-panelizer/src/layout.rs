//! # Grid Layout Module
//!
//! Pure arithmetic for placing `columns x rows` copies of a board inside a
//! fixed-size panel:
//! - array extent and fit validation
//! - centred frame placement
//! - per-cell translation vectors
//! - cut-line coordinates between neighbouring cells

use crate::error::PanelError;
use pcbpanel_core::{BoundingBox, Coord, Point, UnitScale};
use pcbpanel_settings::PanelSettings;
use thiserror::Error;

/// Grid request in host distance units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    /// Number of columns (>= 1)
    pub columns: u32,
    /// Number of rows (>= 1)
    pub rows: u32,
    /// Space between neighbouring copies (>= 0)
    pub gap: Coord,
    pub board_width: Coord,
    pub board_height: Coord,
    pub panel_width: Coord,
    pub panel_height: Coord,
}

impl GridSpec {
    /// Build from validated settings and the source board bounds
    pub fn from_settings(settings: &PanelSettings, board: &BoundingBox, scale: UnitScale) -> Self {
        Self {
            columns: settings.columns,
            rows: settings.rows,
            gap: settings.gap(scale),
            board_width: board.width,
            board_height: board.height,
            panel_width: settings.panel_width(scale),
            panel_height: settings.panel_height(scale),
        }
    }

    /// Horizontal distance between neighbouring copies
    pub fn pitch_x(&self) -> Coord {
        self.board_width + self.gap
    }

    /// Vertical distance between neighbouring copies
    pub fn pitch_y(&self) -> Coord {
        self.board_height + self.gap
    }

    /// Width of all columns and the gaps between them, `None` on overflow
    pub fn array_width(&self) -> Option<Coord> {
        extent(self.columns, self.board_width, self.gap)
    }

    /// Height of all rows and the gaps between them, `None` on overflow
    pub fn array_height(&self) -> Option<Coord> {
        extent(self.rows, self.board_height, self.gap)
    }

    /// Board copies on the panel, the source included
    pub fn total_copies(&self) -> u64 {
        u64::from(self.columns) * u64::from(self.rows)
    }
}

fn extent(count: u32, size: Coord, gap: Coord) -> Option<Coord> {
    let n = Coord::from(count);
    n.checked_mul(size)?.checked_add((n - 1).checked_mul(gap)?)
}

/// The grid does not fit inside the requested panel. A required extent
/// that overflows the coordinate range is reported as `Coord::MAX`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error(
    "array {required_width}x{required_height} does not fit panel {specified_width}x{specified_height}"
)]
pub struct FitError {
    pub required_width: Coord,
    pub required_height: Coord,
    pub specified_width: Coord,
    pub specified_height: Coord,
}

impl FitError {
    /// Convert to the user-facing error, reported in millimetres
    pub fn into_panel_error(self, scale: UnitScale) -> PanelError {
        PanelError::PanelTooSmall {
            required_width: self.required_width,
            required_height: self.required_height,
            specified_width: self.specified_width,
            specified_height: self.specified_height,
            scale,
        }
    }
}

/// Result of a successful layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    pub spec: GridSpec,
    /// Bounds of the source board (cell 0,0)
    pub board: BoundingBox,
    pub array_width: Coord,
    pub array_height: Coord,
    /// Space between the array and the frame on the left/right
    pub margin_x: Coord,
    /// Space between the array and the frame on the top/bottom
    pub margin_y: Coord,
    /// Outer panel frame
    pub frame: BoundingBox,
    /// Vertical cut lines, `columns + 1` of them
    pub cut_x: Vec<Coord>,
    /// Horizontal cut lines, `rows + 1` of them
    pub cut_y: Vec<Coord>,
}

impl LayoutPlan {
    /// Translation from the source board to cell (`column`, `row`)
    pub fn cell_offset(&self, column: u32, row: u32) -> Point {
        Point::new(
            Coord::from(column) * self.spec.pitch_x(),
            Coord::from(row) * self.spec.pitch_y(),
        )
    }

    /// Bounds of the board copy in cell (`column`, `row`)
    pub fn cell_bounds(&self, column: u32, row: u32) -> BoundingBox {
        self.board.translated(self.cell_offset(column, row))
    }

    /// Every cell as `(row, column)`, row-major
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.spec.rows).flat_map(move |r| (0..self.spec.columns).map(move |c| (r, c)))
    }

    /// Cells that need a copy; the origin cell holds the source itself
    pub fn replica_cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.cells().filter(|&cell| cell != (0, 0))
    }
}

/// Compute the panel layout, rejecting grids that do not fit.
///
/// An exact fit is accepted. Centring uses integer division, so an odd
/// remainder leaves the extra unit on the right/bottom. Grids whose
/// coordinates would leave the `Coord` range are rejected as not fitting.
pub fn plan_layout(board: &BoundingBox, spec: &GridSpec) -> Result<LayoutPlan, FitError> {
    debug_assert!(spec.columns >= 1 && spec.rows >= 1, "empty grid");
    debug_assert!(spec.gap >= 0, "negative gap");

    let array_width = spec.array_width();
    let array_height = spec.array_height();
    let fit_error = FitError {
        required_width: array_width.unwrap_or(Coord::MAX),
        required_height: array_height.unwrap_or(Coord::MAX),
        specified_width: spec.panel_width,
        specified_height: spec.panel_height,
    };

    let (Some(array_width), Some(array_height)) = (array_width, array_height) else {
        return Err(fit_error);
    };
    if spec.panel_width < array_width || spec.panel_height < array_height {
        return Err(fit_error);
    }

    // Frame and cut coordinates all lie within origin +/- (panel + gap)
    if !reachable(board.x, spec.panel_width, spec.gap)
        || !reachable(board.y, spec.panel_height, spec.gap)
    {
        return Err(fit_error);
    }

    let margin_x = (spec.panel_width - array_width) / 2;
    let margin_y = (spec.panel_height - array_height) / 2;
    let frame = BoundingBox::new(
        board.x - margin_x,
        board.y - margin_y,
        spec.panel_width,
        spec.panel_height,
    );

    let half_gap = spec.gap / 2;
    let cut_x = (0..=Coord::from(spec.columns))
        .map(|c| board.x + c * spec.pitch_x() - half_gap)
        .collect();
    let cut_y = (0..=Coord::from(spec.rows))
        .map(|r| board.y + r * spec.pitch_y() - half_gap)
        .collect();

    Ok(LayoutPlan {
        spec: *spec,
        board: *board,
        array_width,
        array_height,
        margin_x,
        margin_y,
        frame,
        cut_x,
        cut_y,
    })
}

fn reachable(origin: Coord, panel: Coord, gap: Coord) -> bool {
    panel
        .checked_add(gap)
        .is_some_and(|reach| origin.checked_add(reach).is_some() && origin.checked_sub(reach).is_some())
}
