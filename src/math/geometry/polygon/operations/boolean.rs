// src/math/geometry/polygon/operations/boolean.rs

use super::clipping::{ClipperConfig, PathRole, PolygonClipper};
use crate::math::geometry::polygon::{Polygon, Polyline};
use crate::math::error::MathResult;
use std::ops::{Add, BitAnd, BitOr, BitXor, Sub};

/// Boolean-Operationstypen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOperation {
    /// Union (A ∪ B)
    Union,
    /// Intersection (A ∩ B)
    Intersection,
    /// Difference (A - B)
    Difference,
    /// Exclusive Or (A ⊕ B)
    Xor,
}

/// Boolean-Engine für Polygon-Operationen
#[derive(Debug, Clone, Default)]
pub struct PolygonBoolean {
    config: ClipperConfig,
}

impl PolygonBoolean {
    /// Erstellt eine neue Boolean-Engine
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ClipperConfig) -> Self {
        self.config = config;
        self
    }

    /// Führt eine Boolean-Operation durch.
    ///
    /// Teilen beide Operanden dieselben Daten, wird ohne Clipping abgekürzt:
    /// `A - A` und `A ^ A` sind leer, `A & A` und `A | A` liefern `A`.
    pub fn execute(&self, lhs: &Polygon, rhs: &Polygon, operation: BooleanOperation) -> Polygon {
        if lhs.shares_data(rhs) {
            return match operation {
                BooleanOperation::Difference | BooleanOperation::Xor => Polygon::new(),
                BooleanOperation::Intersection | BooleanOperation::Union => lhs.clone(),
            };
        }

        let mut clipper = PolygonClipper::new(self.config);
        clipper.add_polygon(lhs, PathRole::Subject);
        clipper.add_polygon(rhs, PathRole::Clip);
        clipper.execute(operation).to_polygon(&self.config)
    }
}

/// Vereinfachte API für häufige Boolean-Operationen
pub struct BooleanOperations;

impl BooleanOperations {
    /// Wendet die Operation der Reihe nach auf alle Polygone an
    pub fn batch_operation(polygons: &[Polygon], operation: BooleanOperation) -> Polygon {
        let engine = PolygonBoolean::new();
        let mut iter = polygons.iter();
        let Some(first) = iter.next() else {
            return Polygon::new();
        };
        iter.fold(first.clone(), |acc, polygon| {
            engine.execute(&acc, polygon, operation)
        })
    }

    /// Union aller Polygone
    pub fn union_many(polygons: &[Polygon]) -> Polygon {
        Self::batch_operation(polygons, BooleanOperation::Union)
    }
}

impl Polygon {
    pub fn union(&self, other: &Polygon) -> Polygon {
        PolygonBoolean::new().execute(self, other, BooleanOperation::Union)
    }

    pub fn intersection(&self, other: &Polygon) -> Polygon {
        PolygonBoolean::new().execute(self, other, BooleanOperation::Intersection)
    }

    pub fn difference(&self, other: &Polygon) -> Polygon {
        PolygonBoolean::new().execute(self, other, BooleanOperation::Difference)
    }

    pub fn xor(&self, other: &Polygon) -> Polygon {
        PolygonBoolean::new().execute(self, other, BooleanOperation::Xor)
    }

    /// Prüft ob sich die Flächen überschneiden
    pub fn intersects(&self, other: &Polygon) -> bool {
        !self.intersection(other).is_empty()
    }

    /// Hängt Konturen ohne Clipping an
    pub fn concat(&self, other: &Polygon) -> Polygon {
        let polylines = self.iter().chain(other.iter()).cloned().collect();
        Polygon::from_parts(polylines, Default::default())
    }

    /// Hängt einen Linienzug an; ein Loch darf nicht die erste Kontur werden
    pub fn appended(&self, polyline: &Polyline) -> MathResult<Polygon> {
        Polygon::from_polylines(self.iter().chain(std::iter::once(polyline)).cloned())
    }
}

macro_rules! impl_polygon_op {
    ($trait:ident, $method:ident, $op:path) => {
        impl $trait<&Polygon> for &Polygon {
            type Output = Polygon;

            fn $method(self, rhs: &Polygon) -> Polygon {
                $op(self, rhs)
            }
        }

        impl $trait<Polygon> for Polygon {
            type Output = Polygon;

            fn $method(self, rhs: Polygon) -> Polygon {
                $op(&self, &rhs)
            }
        }

        impl $trait<&Polygon> for Polygon {
            type Output = Polygon;

            fn $method(self, rhs: &Polygon) -> Polygon {
                $op(&self, rhs)
            }
        }
    };
}

impl_polygon_op!(Add, add, Polygon::concat);
impl_polygon_op!(Sub, sub, Polygon::difference);
impl_polygon_op!(BitAnd, bitand, Polygon::intersection);
impl_polygon_op!(BitOr, bitor, Polygon::union);
impl_polygon_op!(BitXor, bitxor, Polygon::xor);
