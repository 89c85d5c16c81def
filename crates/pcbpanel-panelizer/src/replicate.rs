//! Board replication
//!
//! Copies a captured set of source primitives into every non-origin cell of
//! the layout. Each copy is an independent duplicate moved by the cell's
//! translation vector.

use crate::error::{PanelError, PanelResult};
use crate::layout::LayoutPlan;
use pcbpanel_core::{DesignDatabase, PrimitiveId, PrimitiveKind};
use pcbpanel_settings::SeparationMethod;
use tracing::debug;

/// Outcome of a replication pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplicationSummary {
    /// Cells that received a copy
    pub cells: usize,
    /// Handles of every inserted duplicate
    pub added: Vec<PrimitiveId>,
}

impl ReplicationSummary {
    pub fn primitives(&self) -> usize {
        self.added.len()
    }
}

/// Source primitives to copy: tracks, footprints, zones and drawings, in that
/// order. Boundary drawings are left out when `method` replaces the outline,
/// so handles that are about to be removed are never captured.
pub fn capture_sources<D: DesignDatabase + ?Sized>(
    db: &D,
    method: SeparationMethod,
) -> Vec<PrimitiveId> {
    let mut sources = Vec::new();
    for kind in PrimitiveKind::ALL {
        let ids = db.enumerate(kind);
        if kind == PrimitiveKind::Drawing && method.strips_boundary() {
            sources.extend(ids.into_iter().filter(|id| !db.is_boundary(*id)));
        } else {
            sources.extend(ids);
        }
    }
    sources
}

/// Duplicate `sources` into every cell except (0, 0).
///
/// Each copy is inserted at the source position and then moved by the host,
/// so a host that rejects the move fails the run with [`PanelError::Core`].
pub fn replicate<D: DesignDatabase + ?Sized>(
    db: &mut D,
    sources: &[PrimitiveId],
    plan: &LayoutPlan,
) -> PanelResult<ReplicationSummary> {
    let mut summary = ReplicationSummary::default();

    for (row, column) in plan.replica_cells() {
        let offset = plan.cell_offset(column, row);
        for id in sources {
            let copy = db.duplicate(*id).ok_or(PanelError::StalePrimitive(*id))?;
            let added = db.add(copy);
            db.translate(added, offset)?;
            summary.added.push(added);
        }
        summary.cells += 1;
        debug!(
            "Replicated {} primitives into cell ({}, {}) at offset ({}, {})",
            sources.len(),
            row,
            column,
            offset.x,
            offset.y
        );
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{plan_layout, GridSpec};
    use pcbpanel_core::{
        BoundingBox, CoreError, CoreResult, Layer, MemoryBoard, Point, Primitive, Shape, Track,
    };

    /// Host that records moves and can refuse them
    struct RecordingHost {
        board: MemoryBoard,
        moves: Vec<(PrimitiveId, Point)>,
        reject_moves: bool,
    }

    impl DesignDatabase for RecordingHost {
        fn enumerate(&self, kind: PrimitiveKind) -> Vec<PrimitiveId> {
            self.board.enumerate(kind)
        }

        fn get(&self, id: PrimitiveId) -> Option<&Primitive> {
            self.board.get(id)
        }

        fn translate(&mut self, id: PrimitiveId, vector: Point) -> CoreResult<()> {
            if self.reject_moves {
                return Err(CoreError::UnknownPrimitive(id));
            }
            self.moves.push((id, vector));
            self.board.translate(id, vector)
        }

        fn add(&mut self, primitive: Primitive) -> PrimitiveId {
            self.board.add(primitive)
        }

        fn remove(&mut self, id: PrimitiveId) -> Option<Primitive> {
            self.board.remove(id)
        }

        fn refresh_view(&mut self) {}
    }

    fn board_with_outline() -> (MemoryBoard, PrimitiveId, PrimitiveId) {
        let mut board = MemoryBoard::new();
        let track = board.add(Primitive::Track(Track {
            start: Point::new(10, 10),
            end: Point::new(90, 10),
            width: 5,
            layer: Layer::FrontCopper,
            net: Some("VCC".into()),
        }));
        let edge = board.add(Primitive::Shape(Shape::segment(
            Point::new(0, 0),
            Point::new(100, 0),
            Layer::EdgeCuts,
            0,
        )));
        (board, track, edge)
    }

    fn plan(columns: u32, rows: u32) -> LayoutPlan {
        let spec = GridSpec {
            columns,
            rows,
            gap: 20,
            board_width: 100,
            board_height: 50,
            panel_width: 1000,
            panel_height: 1000,
        };
        plan_layout(&BoundingBox::new(0, 0, 100, 50), &spec).unwrap()
    }

    #[test]
    fn test_capture_excludes_boundary_for_vscore() {
        let (board, track, edge) = board_with_outline();
        assert_eq!(capture_sources(&board, SeparationMethod::VScore), vec![track]);
        assert_eq!(
            capture_sources(&board, SeparationMethod::Mousebites),
            vec![track, edge]
        );
    }

    #[test]
    fn test_replicate_translates_copies() {
        let (mut board, track, _) = board_with_outline();
        let summary = replicate(&mut board, &[track], &plan(3, 1)).unwrap();
        assert_eq!(summary.cells, 2);
        assert_eq!(summary.primitives(), 2);

        let positions: Vec<Point> = summary
            .added
            .iter()
            .map(|id| board.get(*id).unwrap().position())
            .collect();
        assert_eq!(positions, vec![Point::new(130, 10), Point::new(250, 10)]);
        assert_eq!(board.get(track).unwrap().position(), Point::new(10, 10));
    }

    #[test]
    fn test_single_cell_adds_nothing() {
        let (mut board, track, _) = board_with_outline();
        let before = board.len();
        let summary = replicate(&mut board, &[track], &plan(1, 1)).unwrap();
        assert_eq!(summary, ReplicationSummary::default());
        assert_eq!(board.len(), before);
    }

    #[test]
    fn test_copies_are_moved_by_the_host() {
        let (board, track, _) = board_with_outline();
        let mut host = RecordingHost {
            board,
            moves: Vec::new(),
            reject_moves: false,
        };
        let summary = replicate(&mut host, &[track], &plan(2, 2)).unwrap();
        let expected: Vec<_> = summary
            .added
            .iter()
            .copied()
            .zip([Point::new(120, 0), Point::new(0, 70), Point::new(120, 70)])
            .collect();
        assert_eq!(host.moves, expected);
    }

    #[test]
    fn test_rejected_move_fails_replication() {
        let (board, track, _) = board_with_outline();
        let mut host = RecordingHost {
            board,
            moves: Vec::new(),
            reject_moves: true,
        };
        let err = replicate(&mut host, &[track], &plan(2, 1)).unwrap_err();
        assert!(matches!(err, PanelError::Core(CoreError::UnknownPrimitive(_))));
    }

    #[test]
    fn test_stale_source_is_reported() {
        let (mut board, track, _) = board_with_outline();
        board.remove(track);
        let err = replicate(&mut board, &[track], &plan(2, 1)).unwrap_err();
        assert!(matches!(err, PanelError::StalePrimitive(id) if id == track));
    }
}
