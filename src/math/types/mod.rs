// src/math/types/mod.rs
pub mod bounds;
pub mod color;
pub mod color_space;
pub mod point;

pub use bounds::*;
pub use color::*;
pub use color_space::*;
pub use point::*;
