// src/math/types/bounds.rs

use crate::math::types::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Achsenparallele Bounding Box (3D, für ebene Geometrie ist z = 0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Erstellt eine Bounding Box aus Position und Größe
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Point::new(x, y),
            max: Point::new(x + width, y + height),
        }
    }

    /// Erstellt eine Bounding Box aus zwei beliebigen Punkten
    pub fn from_points(p1: Point, p2: Point) -> Self {
        Self {
            min: Point::new_3d(p1.x.min(p2.x), p1.y.min(p2.y), p1.z.min(p2.z)),
            max: Point::new_3d(p1.x.max(p2.x), p1.y.max(p2.y), p1.z.max(p2.z)),
        }
    }

    /// Bounding Box aller Punkte; ohne Punkte ungültig
    pub fn from_points_iter<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        points.into_iter().fold(Self::empty(), |mut bounds, p| {
            bounds.include_point(p);
            bounds
        })
    }

    /// Leere Bounding Box (ungültig, negative Größe)
    pub fn empty() -> Self {
        Self {
            min: Point::new_3d(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Point::new_3d(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Prüft ob die Bounding Box gültig ist
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    pub fn x(&self) -> f32 {
        self.min.x
    }

    pub fn y(&self) -> f32 {
        self.min.y
    }

    /// Breite; negativ für ungültige Boxen
    pub fn width(&self) -> f32 {
        if self.is_valid() {
            self.max.x - self.min.x
        } else {
            -1.0
        }
    }

    /// Höhe; negativ für ungültige Boxen
    pub fn height(&self) -> f32 {
        if self.is_valid() {
            self.max.y - self.min.y
        } else {
            -1.0
        }
    }

    pub fn depth(&self) -> f32 {
        if self.is_valid() {
            self.max.z - self.min.z
        } else {
            -1.0
        }
    }

    pub fn size(&self) -> Point {
        Point::new_3d(self.width(), self.height(), self.depth())
    }

    pub fn center(&self) -> Point {
        (self.min + self.max) * 0.5
    }

    /// Erweitert die Box um einen Punkt
    pub fn include_point(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Vereinigung zweier Boxen; ungültige Boxen werden ignoriert
    pub fn union(&self, other: &Bounds) -> Bounds {
        if !self.is_valid() {
            return *other;
        }
        if !other.is_valid() {
            return *self;
        }
        Self::from_points(
            Point::new_3d(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            Point::new_3d(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        )
    }

    /// Prüft ob ein Punkt (inklusive Rand) in der Box liegt
    pub fn contains_point(&self, p: Point) -> bool {
        self.is_valid()
            && p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
    }

    /// Prüft ob `other` echt innerhalb liegt (2D)
    pub fn strictly_contains(&self, other: &Bounds) -> bool {
        self.is_valid()
            && other.is_valid()
            && self.min.x < other.min.x
            && self.min.y < other.min.y
            && self.max.x > other.max.x
            && self.max.y > other.max.y
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "Bounds(invalid)");
        }
        write!(
            f,
            "Bounds({}, {}, {}x{})",
            self.min.x,
            self.min.y,
            self.width(),
            self.height()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bounds_are_invalid() {
        let b = Bounds::empty();
        assert!(!b.is_valid());
        assert_eq!(b.width(), -1.0);
        assert_eq!(Bounds::from_points_iter(Vec::new()), b);
    }

    #[test]
    fn test_bounds_from_points() {
        let b = Bounds::from_points_iter(vec![
            Point::new(10.0, 20.0),
            Point::new(30.0, 20.0),
            Point::new(20.0, 30.0),
        ]);
        assert!(b.is_valid());
        assert_eq!(b.min, Point::new(10.0, 20.0));
        assert_eq!(b.max, Point::new(30.0, 30.0));
        assert_eq!(b.width(), 20.0);
        assert_eq!(b.height(), 10.0);
    }

    #[test]
    fn test_union_ignores_invalid() {
        let a = Bounds::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(a.union(&Bounds::empty()), a);
        assert_eq!(Bounds::empty().union(&a), a);
        let b = Bounds::new(2.0, 2.0, 1.0, 1.0);
        assert_eq!(a.union(&b), Bounds::new(0.0, 0.0, 3.0, 3.0));
        assert!(Bounds::new(-1.0, -1.0, 5.0, 5.0).strictly_contains(&b));
    }
}
