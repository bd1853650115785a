// src/math/geometry/polygon/mod.rs

// Deklaration der Untermodule für Polygon-spezifische Funktionalität
pub mod core; // Enthält die Polygon-Struktur selbst
pub mod operations; // boolean, clipping, offset, triangulation
pub mod polyline;
pub mod shapes; // Fabrikfunktionen für Grundformen
pub mod style;

// Re-Exporte für den einfachen Zugriff auf die wichtigsten Polygon-Elemente
pub use self::core::{Polygon, ShapeKind};
pub use self::polyline::{Polyline, PolylineBuilder};
pub use self::shapes::{EllipseOptions, RectOptions, RectRound, ShapeGenerators};
pub use self::style::{CapType, JoinType, StrokeStyle};

pub use self::operations::{
    boolean::{BooleanOperation, BooleanOperations, PolygonBoolean},
    clipping::{ClipNode, ClipTree, ClipperConfig, PathRole, PolygonClipper},
    offset::{PathEnd, PolygonOffsetter},
    triangulation::{
        PolygonTriangulator, Triangle, Triangulation, TriangulationAlgorithm, TriangulationUtils,
    },
};
