// src/math/geometry/mod.rs

pub mod polygon;

// Re-Exporte für einen schnellen Zugriff auf die Kern-Geometrietypen,
// falls man nicht das gesamte `math::prelude` importieren möchte.
pub use self::polygon::{
    CapType, EllipseOptions, JoinType, Polygon, Polyline, RectOptions, RectRound, ShapeGenerators,
    ShapeKind, StrokeStyle,
    operations::{
        boolean::{BooleanOperation, BooleanOperations, PolygonBoolean},
        clipping::{ClipTree, ClipperConfig, PolygonClipper},
        offset::PolygonOffsetter,
        triangulation::{PolygonTriangulator, Triangulation, TriangulationAlgorithm},
    },
};
