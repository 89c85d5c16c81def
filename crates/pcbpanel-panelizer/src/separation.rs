//! Separation lines between board copies
//!
//! V-score lines are drawn on the fabrication layer at every cut coordinate.
//! Each line is split wherever it crosses a perpendicular cut so the panel
//! reads as a grid of independent segments, and every line gets one
//! "VSCORE" label just outside the frame.
//!
//! Vertical lines are split at the horizontal cuts plus the frame's top and
//! bottom edges, clipped to the frame. Horizontal lines are split only at
//! the vertical cuts. Pieces shorter than [`MIN_SEGMENT_LENGTH`] are dropped.
//!
//! Mousebites are a recognised method with no geometry yet.

use crate::layout::LayoutPlan;
use pcbpanel_core::{
    Coord, DesignDatabase, Layer, Point, Primitive, PrimitiveId, Shape, Text, UnitScale,
};
use pcbpanel_settings::SeparationMethod;
use tracing::{debug, trace};

/// Shorter candidate segments are numerically degenerate and never emitted
pub const MIN_SEGMENT_LENGTH: Coord = 100;

pub const VSCORE_LABEL: &str = "VSCORE";

/// Distance between the frame and a cut label (mm)
pub const LABEL_OFFSET_MM: f64 = 5.0;
pub const LABEL_SIZE_MM: f64 = 1.0;
pub const LABEL_THICKNESS_MM: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutOrientation {
    Vertical,
    Horizontal,
}

/// One straight piece of a cut line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutSegment {
    pub start: Point,
    pub end: Point,
    pub orientation: CutOrientation,
}

impl CutSegment {
    pub fn length(&self) -> Coord {
        (self.end.x - self.start.x).abs() + (self.end.y - self.start.y).abs()
    }
}

/// Annotation placed next to a cut line
#[derive(Debug, Clone, PartialEq)]
pub struct CutLabel {
    pub text: String,
    pub position: Point,
    /// Rotation in degrees
    pub angle: f64,
}

/// Geometry to add for one separation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeparationPlan {
    pub segments: Vec<CutSegment>,
    pub labels: Vec<CutLabel>,
    pub stroke_width: Coord,
}

impl SeparationPlan {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.labels.is_empty()
    }
}

/// Handles of the primitives a separation pass added
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeparationSummary {
    pub segments: Vec<PrimitiveId>,
    pub labels: Vec<PrimitiveId>,
}

/// A way of separating the copies on a panel
pub trait SeparationStrategy {
    fn method(&self) -> SeparationMethod;

    /// Compute the geometry for `plan`; `gap` is the spacing between copies
    fn plan(&self, plan: &LayoutPlan, gap: Coord, scale: UnitScale) -> SeparationPlan;
}

/// Straight full-length scored grooves
#[derive(Debug, Clone, Copy, Default)]
pub struct VScore;

/// Perforated break-away tabs; produces nothing yet
#[derive(Debug, Clone, Copy, Default)]
pub struct Mousebites;

impl SeparationStrategy for VScore {
    fn method(&self) -> SeparationMethod {
        SeparationMethod::VScore
    }

    fn plan(&self, plan: &LayoutPlan, gap: Coord, scale: UnitScale) -> SeparationPlan {
        plan_vscore(plan, gap, scale)
    }
}

impl SeparationStrategy for Mousebites {
    fn method(&self) -> SeparationMethod {
        SeparationMethod::Mousebites
    }

    fn plan(&self, _plan: &LayoutPlan, _gap: Coord, _scale: UnitScale) -> SeparationPlan {
        SeparationPlan::default()
    }
}

pub fn strategy_for(method: SeparationMethod) -> Box<dyn SeparationStrategy> {
    match method {
        SeparationMethod::VScore => Box::new(VScore),
        SeparationMethod::Mousebites => Box::new(Mousebites),
    }
}

/// Sorted, de-duplicated split points
fn split_points(values: impl IntoIterator<Item = Coord>) -> Vec<Coord> {
    let mut points: Vec<Coord> = values.into_iter().collect();
    points.sort_unstable();
    points.dedup();
    points
}

/// Consecutive spans of `bounds` long enough to draw
fn spans(bounds: &[Coord]) -> impl Iterator<Item = (Coord, Coord)> + '_ {
    bounds.windows(2).filter_map(|w| {
        let (a, b) = (w[0], w[1]);
        if b - a < MIN_SEGMENT_LENGTH {
            trace!("Suppressing {} unit cut segment at {}..{}", b - a, a, b);
            None
        } else {
            Some((a, b))
        }
    })
}

/// V-score lines for every cut coordinate in `plan`
pub fn plan_vscore(plan: &LayoutPlan, gap: Coord, scale: UnitScale) -> SeparationPlan {
    let frame = plan.frame;
    let label_offset = scale.to_units(LABEL_OFFSET_MM);

    let y_bounds: Vec<Coord> = split_points(
        [frame.top(), frame.bottom()]
            .into_iter()
            .chain(plan.cut_y.iter().copied()),
    )
    .into_iter()
    .filter(|y| (frame.top()..=frame.bottom()).contains(y))
    .collect();
    let x_bounds = split_points(plan.cut_x.iter().copied());

    let mut result = SeparationPlan {
        stroke_width: gap,
        ..SeparationPlan::default()
    };

    for &x in &plan.cut_x {
        result
            .segments
            .extend(spans(&y_bounds).map(|(y1, y2)| CutSegment {
                start: Point::new(x, y1),
                end: Point::new(x, y2),
                orientation: CutOrientation::Vertical,
            }));
        result.labels.push(CutLabel {
            text: VSCORE_LABEL.to_string(),
            position: Point::new(x, frame.top() - label_offset),
            angle: 90.0,
        });
    }

    for &y in &plan.cut_y {
        result
            .segments
            .extend(spans(&x_bounds).map(|(x1, x2)| CutSegment {
                start: Point::new(x1, y),
                end: Point::new(x2, y),
                orientation: CutOrientation::Horizontal,
            }));
        result.labels.push(CutLabel {
            text: VSCORE_LABEL.to_string(),
            position: Point::new(frame.left() - label_offset, y),
            angle: 0.0,
        });
    }

    result
}

/// Add a separation plan to the design on the front fabrication layer
pub fn emit_separation<D: DesignDatabase + ?Sized>(
    db: &mut D,
    plan: &SeparationPlan,
) -> SeparationSummary {
    let scale = db.scale();
    let size = scale.to_units(LABEL_SIZE_MM);
    let thickness = scale.to_units(LABEL_THICKNESS_MM);

    let segments = plan
        .segments
        .iter()
        .map(|s| {
            db.add(Primitive::Shape(Shape::segment(
                s.start,
                s.end,
                Layer::FrontFab,
                plan.stroke_width,
            )))
        })
        .collect();

    let labels = plan
        .labels
        .iter()
        .map(|l| {
            db.add(Primitive::Text(Text {
                text: l.text.clone(),
                position: l.position,
                angle: l.angle,
                size: Point::new(size, size),
                thickness,
                layer: Layer::FrontFab,
            }))
        })
        .collect();

    SeparationSummary { segments, labels }
}

/// Plan and emit separation geometry for `method`
pub fn synthesize<D: DesignDatabase + ?Sized>(
    db: &mut D,
    method: SeparationMethod,
    plan: &LayoutPlan,
    gap: Coord,
) -> SeparationSummary {
    let strategy = strategy_for(method);
    let separation = strategy.plan(plan, gap, db.scale());
    if separation.is_empty() {
        debug!("{} separation produced no geometry", strategy.method());
        return SeparationSummary::default();
    }
    emit_separation(db, &separation)
}
