// src/math/geometry/polygon/operations/mod.rs

pub mod boolean;
pub mod clipping;
pub mod offset; // Strichkonturen und Flächen-Offset
pub mod triangulation;

pub use boolean::*;
pub use clipping::*;
pub use offset::{PathEnd, PolygonOffsetter};
pub use triangulation::*;
