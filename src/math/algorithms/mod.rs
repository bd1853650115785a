// src/math/algorithms/mod.rs

pub mod spline;

pub use self::spline::{
    BezierSpline, CatmullRomSpline, HermiteSpline, SplineBasis, SplineType, sample_spline,
};
