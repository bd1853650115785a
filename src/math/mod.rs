// src/math/mod.rs

pub mod algorithms;
pub mod error;
pub mod geometry;
pub mod types;
pub mod utils;

// Re-exports für einfache Verwendung
pub use error::{MathError, MathResult};
pub use types::*;

// Öffentliche API
pub mod prelude {
    pub use super::{
        algorithms::spline::SplineType,
        error::{MathError, MathResult},
        geometry::polygon::{
            CapType, EllipseOptions, JoinType, Polygon, Polyline, RectOptions, RectRound,
            ShapeGenerators, ShapeKind, StrokeStyle, operations::*,
        },
        types::*,
    };
}
