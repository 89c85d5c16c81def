//! Unit conversion utilities
//!
//! Board coordinates are fixed-point integers (nanometres by default).
//! The host decides how many units make up a millimetre; everything
//! user-facing is reported in millimetres.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed-point board distance
pub type Coord = i64;

/// Nanometres per millimetre, the default host resolution
pub const NANOMETRES_PER_MM: Coord = 1_000_000;

/// Conversion between host distance units and millimetres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitScale {
    /// Number of distance units in one millimetre
    pub units_per_mm: Coord,
}

impl Default for UnitScale {
    fn default() -> Self {
        Self::nanometres()
    }
}

impl UnitScale {
    /// Create a scale with the given resolution
    pub fn new(units_per_mm: Coord) -> Self {
        debug_assert!(units_per_mm > 0, "units_per_mm must be positive");
        Self { units_per_mm }
    }

    /// Nanometre resolution
    pub fn nanometres() -> Self {
        Self::new(NANOMETRES_PER_MM)
    }

    /// Convert millimetres to host units, rounding to the nearest unit
    pub fn to_units(&self, mm: f64) -> Coord {
        (mm * self.units_per_mm as f64).round() as Coord
    }

    /// Convert host units to millimetres
    pub fn to_mm(&self, units: Coord) -> f64 {
        units as f64 / self.units_per_mm as f64
    }

    /// Format a distance for display, two decimals with unit suffix
    pub fn format_mm(&self, units: Coord) -> String {
        format!("{:.2} mm", self.to_mm(units))
    }
}

impl fmt::Display for UnitScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} units/mm", self.units_per_mm)
    }
}
