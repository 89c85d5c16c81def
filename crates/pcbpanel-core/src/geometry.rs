//! Integer plane geometry: points, translation vectors and axis-aligned boxes.

use crate::units::Coord;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Neg, Sub};

/// A point (or translation vector) in host distance units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

impl Point {
    pub fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        dx.hypot(dy)
    }

    /// True when `other` lies strictly closer than `tolerance`
    pub fn within(&self, other: Point, tolerance: Coord) -> bool {
        self.distance_to(other) < tolerance as f64
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Axis-aligned rectangle. `width` and `height` are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: Coord,
    pub y: Coord,
    pub width: Coord,
    pub height: Coord,
}

impl BoundingBox {
    /// Create a box, normalising negative extents
    pub fn new(x: Coord, y: Coord, width: Coord, height: Coord) -> Self {
        let (x, width) = if width < 0 { (x + width, -width) } else { (x, width) };
        let (y, height) = if height < 0 {
            (y + height, -height)
        } else {
            (y, height)
        };
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box spanning two opposite corners
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, a.x.max(b.x) - x, a.y.max(b.y) - y)
    }

    /// Smallest box containing every point, `None` for an empty input
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some(Self::from_corners(min, max))
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn left(&self) -> Coord {
        self.x
    }

    pub fn top(&self) -> Coord {
        self.y
    }

    pub fn right(&self) -> Coord {
        self.x + self.width
    }

    pub fn bottom(&self) -> Coord {
        self.y + self.height
    }

    /// Smallest box containing both boxes
    pub fn merge(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        BoundingBox::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    /// Grow every side by `amount`
    pub fn inflate(&self, amount: Coord) -> BoundingBox {
        BoundingBox::new(
            self.x - amount,
            self.y - amount,
            self.width + 2 * amount,
            self.height + 2 * amount,
        )
    }

    pub fn translated(&self, vector: Point) -> BoundingBox {
        BoundingBox {
            x: self.x + vector.x,
            y: self.y + vector.y,
            ..*self
        }
    }

    /// True when `other` lies entirely inside (edges inclusive)
    pub fn contains(&self, other: &BoundingBox) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_extent_is_normalised() {
        let b = BoundingBox::new(10, 10, -4, -6);
        assert_eq!(b, BoundingBox::new(6, 4, 4, 6));
    }

    #[test]
    fn test_merge() {
        let a = BoundingBox::new(0, 0, 10, 10);
        let b = BoundingBox::new(5, -5, 20, 5);
        let m = a.merge(&b);
        assert_eq!(m, BoundingBox::new(0, -5, 25, 15));
        assert!(m.contains(&a));
        assert!(m.contains(&b));
    }

    #[test]
    fn test_from_points() {
        assert!(BoundingBox::from_points(Vec::new()).is_none());
        let b = BoundingBox::from_points([
            Point::new(3, 9),
            Point::new(-1, 2),
            Point::new(7, 4),
        ])
        .unwrap();
        assert_eq!(b, BoundingBox::new(-1, 2, 8, 7));
    }

    #[test]
    fn test_point_tolerance() {
        let a = Point::new(0, 0);
        assert!(a.within(Point::new(99, 0), 100));
        assert!(!a.within(Point::new(100, 0), 100));
        assert_eq!(a - Point::new(3, 4), Point::new(-3, -4));
        assert_eq!(a.distance_to(Point::new(3, 4)), 5.0);
    }

    #[test]
    fn test_translated() {
        let b = BoundingBox::new(1, 2, 3, 4).translated(Point::new(10, 20));
        assert_eq!(b, BoundingBox::new(11, 22, 3, 4));
    }
}
