// src/render/mod.rs

pub mod painter; // Brücke zwischen Polygonen und einem Zeichenziel

pub use self::painter::{
    DrawCall, DrawMode, DrawRecorder, DrawTarget, RecordedDraw, StrokeSettings, fill_polygon,
    stroke_outline, stroke_polygon,
};
