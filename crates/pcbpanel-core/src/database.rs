//! Host design database interface
//!
//! The panelization engine never talks to a concrete PCB tool. It is handed
//! an exclusively borrowed [`DesignDatabase`] for the duration of a run and
//! only enumerates, queries, adds and removes primitives through it.
//! [`MemoryBoard`] is a self-contained implementation backed by an ordered
//! map, used by the command-line host and by tests.

use crate::error::{CoreError, CoreResult};
use crate::geometry::{BoundingBox, Point};
use crate::primitive::{Primitive, PrimitiveKind};
use crate::units::UnitScale;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Opaque handle to a primitive owned by the host. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrimitiveId(pub u64);

impl fmt::Display for PrimitiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Operations the panelizer requires from the host design database.
pub trait DesignDatabase {
    /// Handles of every live primitive of the given kind, in host order
    fn enumerate(&self, kind: PrimitiveKind) -> Vec<PrimitiveId>;

    /// Borrow a primitive
    fn get(&self, id: PrimitiveId) -> Option<&Primitive>;

    /// Move a stored primitive in place. Replicated copies are positioned
    /// through this call after insertion.
    fn translate(&mut self, id: PrimitiveId, vector: Point) -> CoreResult<()>;

    /// Insert a primitive, returning its new handle
    fn add(&mut self, primitive: Primitive) -> PrimitiveId;

    /// Remove a primitive, returning it if it was live
    fn remove(&mut self, id: PrimitiveId) -> Option<Primitive>;

    /// Ask the host to redraw
    fn refresh_view(&mut self);

    /// Distance unit resolution of this host
    fn scale(&self) -> UnitScale {
        UnitScale::default()
    }

    fn is_boundary(&self, id: PrimitiveId) -> bool {
        self.get(id).is_some_and(Primitive::is_boundary)
    }

    fn bounding_box_of(&self, id: PrimitiveId) -> Option<BoundingBox> {
        self.get(id).map(Primitive::bounding_box)
    }

    /// Deep copy of a stored primitive, not yet inserted
    fn duplicate(&self, id: PrimitiveId) -> Option<Primitive> {
        self.get(id).cloned()
    }

    /// Handles of all drawings on the boundary layer
    fn boundary_drawings(&self) -> Vec<PrimitiveId> {
        self.enumerate(PrimitiveKind::Drawing)
            .into_iter()
            .filter(|id| self.is_boundary(*id))
            .collect()
    }
}

/// On-disk representation of a board
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardDocument {
    #[serde(default)]
    pub scale: UnitScale,
    #[serde(default)]
    pub primitives: Vec<Primitive>,
}

/// In-memory design database
#[derive(Debug, Clone, Default)]
pub struct MemoryBoard {
    scale: UnitScale,
    next_id: u64,
    primitives: BTreeMap<PrimitiveId, Primitive>,
    refresh_count: usize,
}

impl MemoryBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scale(scale: UnitScale) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }

    pub fn from_document(doc: BoardDocument) -> Self {
        let mut board = Self::with_scale(doc.scale);
        for primitive in doc.primitives {
            board.add(primitive);
        }
        board
    }

    pub fn to_document(&self) -> BoardDocument {
        BoardDocument {
            scale: self.scale,
            primitives: self.primitives.values().cloned().collect(),
        }
    }

    /// Load a board from a JSON file
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let doc: BoardDocument = serde_json::from_str(&content)?;
        if doc.scale.units_per_mm <= 0 {
            return Err(CoreError::BoardFile(format!(
                "invalid unit scale {} in {}",
                doc.scale.units_per_mm,
                path.display()
            )));
        }
        debug!(
            "Loaded {} primitives from {}",
            doc.primitives.len(),
            path.display()
        );
        Ok(Self::from_document(doc))
    }

    /// Save the board as pretty-printed JSON
    pub fn save_to_file(&self, path: &Path) -> CoreResult<()> {
        let content = serde_json::to_string_pretty(&self.to_document())?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PrimitiveId, &Primitive)> {
        self.primitives.iter().map(|(id, p)| (*id, p))
    }

    /// Number of view refreshes requested so far
    pub fn refresh_count(&self) -> usize {
        self.refresh_count
    }
}

impl DesignDatabase for MemoryBoard {
    fn enumerate(&self, kind: PrimitiveKind) -> Vec<PrimitiveId> {
        self.primitives
            .iter()
            .filter(|(_, p)| p.kind() == kind)
            .map(|(id, _)| *id)
            .collect()
    }

    fn get(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.primitives.get(&id)
    }

    fn translate(&mut self, id: PrimitiveId, vector: Point) -> CoreResult<()> {
        self.primitives
            .get_mut(&id)
            .ok_or(CoreError::UnknownPrimitive(id))?
            .translate(vector);
        Ok(())
    }

    fn add(&mut self, primitive: Primitive) -> PrimitiveId {
        let id = PrimitiveId(self.next_id);
        self.next_id += 1;
        self.primitives.insert(id, primitive);
        id
    }

    fn remove(&mut self, id: PrimitiveId) -> Option<Primitive> {
        self.primitives.remove(&id)
    }

    fn refresh_view(&mut self) {
        self.refresh_count += 1;
    }

    fn scale(&self) -> UnitScale {
        self.scale
    }
}
