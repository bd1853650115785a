// src/lib.rs

pub mod debug;
pub mod math;
pub mod render;

pub mod prelude {
    pub use crate::math::prelude::*;
    pub use crate::render::{DrawMode, DrawRecorder, DrawTarget, StrokeSettings};
}
