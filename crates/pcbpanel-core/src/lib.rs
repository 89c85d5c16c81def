//! # PCB Panel Core
//!
//! Core types shared by the panelization crates:
//! fixed-point distance units, integer geometry, the board primitive model
//! and the host design database interface.

pub mod database;
pub mod error;
pub mod geometry;
pub mod primitive;
pub mod units;

pub use database::{BoardDocument, DesignDatabase, MemoryBoard, PrimitiveId};
pub use error::{CoreError, CoreResult};
pub use geometry::{BoundingBox, Point};
pub use primitive::{
    Footprint, GraphicShape, Layer, Pad, Primitive, PrimitiveKind, Shape, Text, Track, Zone,
};
pub use units::{Coord, UnitScale, NANOMETRES_PER_MM};
