//! Board primitive model
//!
//! Mirrors the objects a PCB host keeps in its design database: tracks,
//! footprints, copper zones and graphical drawings (shapes and text).
//! Every primitive can report its layer and bounding box and can be moved
//! by a translation vector. `Clone` produces a deep, independent copy.

use crate::geometry::{BoundingBox, Point};
use crate::units::Coord;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;

/// Board layer assignment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Physical board outline
    #[serde(rename = "Edge.Cuts")]
    EdgeCuts,
    #[serde(rename = "F.Fab")]
    FrontFab,
    #[serde(rename = "B.Fab")]
    BackFab,
    #[serde(rename = "F.Cu")]
    FrontCopper,
    #[serde(rename = "B.Cu")]
    BackCopper,
    #[serde(rename = "F.SilkS")]
    FrontSilkscreen,
    #[serde(rename = "B.SilkS")]
    BackSilkscreen,
    #[serde(rename = "F.Mask")]
    FrontMask,
    #[serde(rename = "B.Mask")]
    BackMask,
    User(String),
}

impl Layer {
    /// True for the layer whose primitives define the board outline
    pub fn is_boundary(&self) -> bool {
        matches!(self, Layer::EdgeCuts)
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::EdgeCuts => write!(f, "Edge.Cuts"),
            Layer::FrontFab => write!(f, "F.Fab"),
            Layer::BackFab => write!(f, "B.Fab"),
            Layer::FrontCopper => write!(f, "F.Cu"),
            Layer::BackCopper => write!(f, "B.Cu"),
            Layer::FrontSilkscreen => write!(f, "F.SilkS"),
            Layer::BackSilkscreen => write!(f, "B.SilkS"),
            Layer::FrontMask => write!(f, "F.Mask"),
            Layer::BackMask => write!(f, "B.Mask"),
            Layer::User(name) => write!(f, "{}", name),
        }
    }
}

/// Enumeration category used by the host database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Track,
    Footprint,
    Zone,
    Drawing,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 4] = [
        PrimitiveKind::Track,
        PrimitiveKind::Footprint,
        PrimitiveKind::Zone,
        PrimitiveKind::Drawing,
    ];
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Track => write!(f, "track"),
            Self::Footprint => write!(f, "footprint"),
            Self::Zone => write!(f, "zone"),
            Self::Drawing => write!(f, "drawing"),
        }
    }
}

/// Conductive track segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub start: Point,
    pub end: Point,
    pub width: Coord,
    pub layer: Layer,
    #[serde(default)]
    pub net: Option<String>,
}

/// Footprint pad, positioned relative to its footprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pad {
    pub number: String,
    pub offset: Point,
    /// Pad extent (width, height)
    pub size: Point,
}

/// Placed component footprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub reference: String,
    pub position: Point,
    /// Rotation in degrees
    #[serde(default)]
    pub rotation: f64,
    pub layer: Layer,
    #[serde(default)]
    pub pads: Vec<Pad>,
}

impl Footprint {
    fn pad_center(&self, pad: &Pad) -> Point {
        if self.rotation == 0.0 {
            return self.position + pad.offset;
        }
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let dx = pad.offset.x as f64;
        let dy = pad.offset.y as f64;
        self.position
            + Point::new(
                (dx * cos - dy * sin).round() as Coord,
                (dx * sin + dy * cos).round() as Coord,
            )
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.pads
            .iter()
            .map(|pad| {
                let c = self.pad_center(pad);
                BoundingBox::new(
                    c.x - pad.size.x / 2,
                    c.y - pad.size.y / 2,
                    pad.size.x,
                    pad.size.y,
                )
            })
            .reduce(|a, b| a.merge(&b))
            .unwrap_or_else(|| BoundingBox::new(self.position.x, self.position.y, 0, 0))
    }
}

/// Copper fill area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub outline: Vec<Point>,
    pub layer: Layer,
    #[serde(default)]
    pub net: Option<String>,
    #[serde(default)]
    pub filled: bool,
}

/// Geometry of a graphical drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum GraphicShape {
    Segment { start: Point, end: Point },
    /// Counter-clockwise sweep from `start` to `end` around `center`
    Arc { center: Point, start: Point, end: Point },
    Circle { center: Point, radius: Coord },
    /// Axis-aligned rectangle between two opposite corners
    Rect { start: Point, end: Point },
    Polygon { points: Vec<Point> },
}

impl GraphicShape {
    /// Geometric bounds, ignoring stroke width
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            GraphicShape::Segment { start, end } | GraphicShape::Rect { start, end } => {
                BoundingBox::from_corners(*start, *end)
            }
            GraphicShape::Circle { center, radius } => {
                BoundingBox::new(center.x - radius, center.y - radius, 2 * radius, 2 * radius)
            }
            GraphicShape::Arc { center, start, end } => arc_bounds(*center, *start, *end),
            GraphicShape::Polygon { points } => BoundingBox::from_points(points.iter().copied())
                .unwrap_or_default(),
        }
    }

    pub fn translate(&mut self, v: Point) {
        match self {
            GraphicShape::Segment { start, end } | GraphicShape::Rect { start, end } => {
                *start += v;
                *end += v;
            }
            GraphicShape::Arc { center, start, end } => {
                *center += v;
                *start += v;
                *end += v;
            }
            GraphicShape::Circle { center, .. } => *center += v,
            GraphicShape::Polygon { points } => points.iter_mut().for_each(|p| *p += v),
        }
    }

    /// Start and end point of an open stroke (segments and arcs)
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        match self {
            GraphicShape::Segment { start, end } | GraphicShape::Arc { start, end, .. } => {
                Some((*start, *end))
            }
            _ => None,
        }
    }
}

fn arc_bounds(center: Point, start: Point, end: Point) -> BoundingBox {
    let radius = center.distance_to(start);
    let angle_of = |p: Point| ((p.y - center.y) as f64).atan2((p.x - center.x) as f64);
    let a0 = angle_of(start);
    let sweep = (angle_of(end) - a0).rem_euclid(TAU);

    let mut points = vec![start, end];
    for cardinal in [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2] {
        if (cardinal - a0).rem_euclid(TAU) <= sweep {
            points.push(Point::new(
                center.x + (radius * cardinal.cos()).round() as Coord,
                center.y + (radius * cardinal.sin()).round() as Coord,
            ));
        }
    }
    BoundingBox::from_points(points).unwrap_or_default()
}

/// Graphical drawing on any layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    #[serde(flatten)]
    pub geometry: GraphicShape,
    pub layer: Layer,
    /// Stroke width
    pub width: Coord,
    #[serde(default)]
    pub filled: bool,
}

impl Shape {
    pub fn segment(start: Point, end: Point, layer: Layer, width: Coord) -> Self {
        Self {
            geometry: GraphicShape::Segment { start, end },
            layer,
            width,
            filled: false,
        }
    }
}

/// Free text drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
    pub position: Point,
    /// Rotation in degrees
    #[serde(default)]
    pub angle: f64,
    /// Glyph size (width, height)
    pub size: Point,
    pub thickness: Coord,
    pub layer: Layer,
}

impl Text {
    /// Approximate extent, centred on the anchor
    pub fn bounding_box(&self) -> BoundingBox {
        let len = self.text.chars().count() as Coord;
        let (w, h) = (len * self.size.x, self.size.y);
        let quarter_turn = (self.angle.rem_euclid(180.0) - 90.0).abs() < 45.0;
        let (w, h) = if quarter_turn { (h, w) } else { (w, h) };
        BoundingBox::new(self.position.x - w / 2, self.position.y - h / 2, w, h)
    }
}

/// Any object held by the host design database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Track(Track),
    Footprint(Footprint),
    Zone(Zone),
    Shape(Shape),
    Text(Text),
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Track(_) => PrimitiveKind::Track,
            Primitive::Footprint(_) => PrimitiveKind::Footprint,
            Primitive::Zone(_) => PrimitiveKind::Zone,
            Primitive::Shape(_) | Primitive::Text(_) => PrimitiveKind::Drawing,
        }
    }

    pub fn layer(&self) -> &Layer {
        match self {
            Primitive::Track(t) => &t.layer,
            Primitive::Footprint(f) => &f.layer,
            Primitive::Zone(z) => &z.layer,
            Primitive::Shape(s) => &s.layer,
            Primitive::Text(t) => &t.layer,
        }
    }

    /// True for drawings on the boundary layer
    pub fn is_boundary(&self) -> bool {
        self.kind() == PrimitiveKind::Drawing && self.layer().is_boundary()
    }

    /// Bounds as a host reports them: strokes grow by half their width
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Primitive::Track(t) => BoundingBox::from_corners(t.start, t.end).inflate(t.width / 2),
            Primitive::Footprint(f) => f.bounding_box(),
            Primitive::Zone(z) => {
                BoundingBox::from_points(z.outline.iter().copied()).unwrap_or_default()
            }
            Primitive::Shape(s) => s.geometry.bounding_box().inflate(s.width / 2),
            Primitive::Text(t) => t.bounding_box(),
        }
    }

    /// Reference position used when comparing copies
    pub fn position(&self) -> Point {
        match self {
            Primitive::Track(t) => t.start,
            Primitive::Footprint(f) => f.position,
            Primitive::Zone(z) => z.outline.first().copied().unwrap_or_default(),
            Primitive::Shape(s) => match &s.geometry {
                GraphicShape::Segment { start, .. }
                | GraphicShape::Arc { start, .. }
                | GraphicShape::Rect { start, .. } => *start,
                GraphicShape::Circle { center, .. } => *center,
                GraphicShape::Polygon { points } => points.first().copied().unwrap_or_default(),
            },
            Primitive::Text(t) => t.position,
        }
    }

    /// Move in place by `v`
    pub fn translate(&mut self, v: Point) {
        match self {
            Primitive::Track(t) => {
                t.start += v;
                t.end += v;
            }
            Primitive::Footprint(f) => f.position += v,
            Primitive::Zone(z) => z.outline.iter_mut().for_each(|p| *p += v),
            Primitive::Shape(s) => s.geometry.translate(v),
            Primitive::Text(t) => t.position += v,
        }
    }

    /// Copy moved by `v`, leaving `self` untouched
    pub fn translated(&self, v: Point) -> Primitive {
        let mut copy = self.clone();
        copy.translate(v);
        copy
    }
}
