// src/debug/visualization/mod.rs

pub mod svg; // SVG-Dumps von Polygonen zur Fehlersuche

pub use self::svg::{SvgLayerStyle, create_polygon_debug_svg, polygon_svg_document};
