//! Board outline utilities
//!
//! Reads the boundary layer of a design: its bounding box, and a best-effort
//! closed polygon of the true outline. Also writes outlines back as line
//! segments on a chosen layer.
//!
//! # Outline extraction
//!
//! 1. The first circle on the boundary layer wins and is discretised into
//!    a [`CIRCLE_STEPS`]-gon.
//! 2. Otherwise the first rectangle wins and yields its four corners.
//! 3. Otherwise segments and arcs are chained end to end. Arcs contribute
//!    only their endpoints, so curved edges become chords. The walk is
//!    greedy with no backtracking: it starts at the first edge's start
//!    point and stops when no unused edge touches the current point.
//!    Branching or multi-loop outlines are not guaranteed to close.

use pcbpanel_core::{
    BoundingBox, Coord, DesignDatabase, GraphicShape, Layer, Point, Primitive, PrimitiveId,
    Shape,
};
use std::collections::HashMap;
use std::f64::consts::TAU;
use tracing::{debug, warn};

/// Endpoints closer than this are treated as connected
pub const CHAIN_TOLERANCE: Coord = 100;

/// Vertices used to approximate a circular outline
pub const CIRCLE_STEPS: usize = 64;

/// Stroke width for rendered polygons
pub const OUTLINE_STROKE_MM: f64 = 0.1;

/// Bounding box of everything on the boundary layer, `None` if it is empty
pub fn board_bounding_box<D: DesignDatabase + ?Sized>(db: &D) -> Option<BoundingBox> {
    db.boundary_drawings()
        .into_iter()
        .filter_map(|id| db.bounding_box_of(id))
        .reduce(|acc, b| acc.merge(&b))
}

/// Board width and height in millimetres
pub fn board_size_mm<D: DesignDatabase + ?Sized>(db: &D) -> Option<(f64, f64)> {
    let bbox = board_bounding_box(db)?;
    let scale = db.scale();
    Some((scale.to_mm(bbox.width), scale.to_mm(bbox.height)))
}

/// Add a closed rectangle of four segments on the boundary layer.
///
/// Segment `i` runs from corner `i` to corner `(i + 1) % 4`, corners in the
/// order top-left, top-right, bottom-right, bottom-left.
pub fn emit_rectangle_outline<D: DesignDatabase + ?Sized>(
    db: &mut D,
    origin: Point,
    width: Coord,
    height: Coord,
    line_width: Coord,
) -> Vec<PrimitiveId> {
    let corners = [
        origin,
        origin + Point::new(width, 0),
        origin + Point::new(width, height),
        origin + Point::new(0, height),
    ];
    (0..4)
        .map(|i| {
            db.add(Primitive::Shape(Shape::segment(
                corners[i],
                corners[(i + 1) % 4],
                Layer::EdgeCuts,
                line_width,
            )))
        })
        .collect()
}

/// One ring of an outline. The closing edge from the last point back to the
/// first is implicit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoundaryPolygon {
    pub points: Vec<Point>,
}

impl BoundaryPolygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.points.iter().copied())
    }

    /// Edges of the ring including the closing edge
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        let count = if n < 2 { 0 } else { n };
        (0..count).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

/// A set of rings, e.g. an outline and its cut-outs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolygonSet {
    pub outlines: Vec<BoundaryPolygon>,
}

impl From<BoundaryPolygon> for PolygonSet {
    fn from(ring: BoundaryPolygon) -> Self {
        Self {
            outlines: vec![ring],
        }
    }
}

/// Result of outline extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineExtraction {
    /// The walk returned to its start; the ring is implicitly closed
    Closed(BoundaryPolygon),
    /// Chaining stopped before returning to the start
    Unclosed(BoundaryPolygon),
    /// Nothing usable on the boundary layer
    Empty,
}

impl OutlineExtraction {
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed(_))
    }

    /// The polygon, only if it is closed
    pub fn closed(self) -> Option<BoundaryPolygon> {
        match self {
            Self::Closed(polygon) => Some(polygon),
            _ => None,
        }
    }

    /// Whatever points were gathered, closed or not
    pub fn points(&self) -> &[Point] {
        match self {
            Self::Closed(p) | Self::Unclosed(p) => &p.points,
            Self::Empty => &[],
        }
    }
}

/// Extract the outline from the boundary-layer drawings of a design
pub fn extract_board_outline<D: DesignDatabase + ?Sized>(db: &D) -> OutlineExtraction {
    let ids = db.boundary_drawings();
    extract_boundary_polygon(ids.iter().filter_map(|id| db.get(*id)))
}

/// Build one outline polygon from primitives. Anything not on the boundary
/// layer is ignored.
pub fn extract_boundary_polygon<'a>(
    primitives: impl IntoIterator<Item = &'a Primitive>,
) -> OutlineExtraction {
    let shapes: Vec<&GraphicShape> = primitives
        .into_iter()
        .filter_map(|p| match p {
            Primitive::Shape(s) if s.layer.is_boundary() => Some(&s.geometry),
            _ => None,
        })
        .collect();

    if shapes.is_empty() {
        return OutlineExtraction::Empty;
    }

    if let Some((center, radius)) = shapes.iter().find_map(|s| match s {
        GraphicShape::Circle { center, radius } => Some((*center, *radius)),
        _ => None,
    }) {
        return OutlineExtraction::Closed(discretize_circle(center, radius, CIRCLE_STEPS));
    }

    if let Some(rect) = shapes
        .iter()
        .find(|s| matches!(s, GraphicShape::Rect { .. }))
    {
        let b = rect.bounding_box();
        return OutlineExtraction::Closed(BoundaryPolygon::new(vec![
            Point::new(b.left(), b.top()),
            Point::new(b.right(), b.top()),
            Point::new(b.right(), b.bottom()),
            Point::new(b.left(), b.bottom()),
        ]));
    }

    let edges: Vec<(Point, Point)> = shapes.iter().filter_map(|s| s.endpoints()).collect();
    chain_edges(&edges, CHAIN_TOLERANCE)
}

/// Regular `steps`-gon on a circle, first vertex at angle zero
pub fn discretize_circle(center: Point, radius: Coord, steps: usize) -> BoundaryPolygon {
    let r = radius as f64;
    let points = (0..steps)
        .map(|i| {
            let a = TAU * i as f64 / steps as f64;
            Point::new(
                center.x + (r * a.cos()).round() as Coord,
                center.y + (r * a.sin()).round() as Coord,
            )
        })
        .collect();
    BoundaryPolygon::new(points)
}

type Cell = (i64, i64);

fn cell_of(p: Point, size: Coord) -> Cell {
    (p.x.div_euclid(size), p.y.div_euclid(size))
}

/// Greedy end-to-end walk over open edges.
///
/// Endpoints are bucketed into a grid of `tolerance`-sized cells so a match
/// only needs the 3x3 neighbourhood of the current point.
pub fn chain_edges(edges: &[(Point, Point)], tolerance: Coord) -> OutlineExtraction {
    let Some(&(first_start, first_end)) = edges.first() else {
        return OutlineExtraction::Empty;
    };

    let size = tolerance.max(1);
    let mut endpoint_map: HashMap<Cell, Vec<usize>> = HashMap::new();
    for (i, (start, end)) in edges.iter().enumerate() {
        endpoint_map.entry(cell_of(*start, size)).or_default().push(i);
        endpoint_map.entry(cell_of(*end, size)).or_default().push(i);
    }

    let mut used = vec![false; edges.len()];
    used[0] = true;
    let mut points = vec![first_start, first_end];
    let mut current = first_end;

    loop {
        let (cx, cy) = cell_of(current, size);
        let mut candidates: Vec<usize> = (-1..=1)
            .flat_map(|dx| (-1..=1).map(move |dy| (cx + dx, cy + dy)))
            .filter_map(|cell| endpoint_map.get(&cell))
            .flatten()
            .copied()
            .filter(|i| !used[*i])
            .collect();
        candidates.sort_unstable();
        candidates.dedup();

        let next = candidates.into_iter().find_map(|i| {
            let (start, end) = edges[i];
            if start.within(current, tolerance) {
                Some((i, end))
            } else if end.within(current, tolerance) {
                Some((i, start))
            } else {
                None
            }
        });

        match next {
            Some((i, far)) => {
                used[i] = true;
                points.push(far);
                current = far;
            }
            None => break,
        }
    }

    let used_count = used.iter().filter(|u| **u).count();
    let returned = points.len() > 2
        && points
            .last()
            .is_some_and(|last| last.within(first_start, tolerance));

    if returned && points.len() >= 4 {
        points.pop();
        debug!(
            "Chained {} of {} boundary edges into a closed outline",
            used_count,
            edges.len()
        );
        OutlineExtraction::Closed(BoundaryPolygon::new(points))
    } else {
        warn!(
            "Boundary chaining stopped after {} of {} edges without closing",
            used_count,
            edges.len()
        );
        OutlineExtraction::Unclosed(BoundaryPolygon::new(points))
    }
}

/// Draw every ring as line segments on `layer`, closing each ring
pub fn render_polygon<D: DesignDatabase + ?Sized>(
    db: &mut D,
    polygon: &PolygonSet,
    layer: Layer,
) -> Vec<PrimitiveId> {
    let width = db.scale().to_units(OUTLINE_STROKE_MM);
    let mut ids = Vec::new();
    for ring in &polygon.outlines {
        for (start, end) in ring.edges() {
            ids.push(db.add(Primitive::Shape(Shape::segment(
                start,
                end,
                layer.clone(),
                width,
            ))));
        }
    }
    ids
}
