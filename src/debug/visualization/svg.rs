// src/debug/visualization/svg.rs

use crate::math::{
    geometry::polygon::{Polygon, Polyline},
    types::Bounds,
};
use svg::Document;
use svg::node::element::{Path, Rectangle, path::Data};
use tracing::info;

/// Darstellung einer Polygon-Ebene im Debug-SVG
#[derive(Debug, Clone, PartialEq)]
pub struct SvgLayerStyle {
    pub fill: String,
    pub fill_opacity: f32,
    pub stroke: String,
    /// Relativ zur mittleren Kantenlänge der ViewBox
    pub stroke_scale: f32,
}

impl Default for SvgLayerStyle {
    fn default() -> Self {
        Self {
            fill: "#c896ff".to_string(),
            fill_opacity: 0.7,
            stroke: "#5500aa".to_string(),
            stroke_scale: 0.005,
        }
    }
}

impl SvgLayerStyle {
    pub fn new(fill: impl Into<String>, stroke: impl Into<String>) -> Self {
        Self {
            fill: fill.into(),
            stroke: stroke.into(),
            ..Default::default()
        }
    }
}

fn polyline_data(data: Data, polyline: &Polyline) -> Data {
    let mut points = polyline.iter();
    let Some(first) = points.next() else {
        return data;
    };
    let data = points.fold(data.move_to((first.x, first.y)), |data, p| {
        data.line_to((p.x, p.y))
    });
    if polyline.closed() { data.close() } else { data }
}

/// Außenkontur samt direkt folgender Löcher als ein `<path>` (evenodd),
/// offene Linienzüge als ungefüllte Pfade
fn polygon_paths(polygon: &Polygon, style: &SvgLayerStyle, stroke_width: f32) -> Vec<Path> {
    let filled = |data: Data| {
        Path::new()
            .set("fill", style.fill.as_str())
            .set("fill-opacity", style.fill_opacity)
            .set("fill-rule", "evenodd")
            .set("stroke", style.stroke.as_str())
            .set("stroke-width", stroke_width)
            .set("d", data)
    };

    let mut paths = Vec::new();
    let mut current: Option<Data> = None;
    for polyline in polygon {
        if !polyline.closed() {
            paths.push(
                Path::new()
                    .set("fill", "none")
                    .set("stroke", style.stroke.as_str())
                    .set("stroke-width", stroke_width)
                    .set("d", polyline_data(Data::new(), polyline)),
            );
            continue;
        }
        if polyline.hole() {
            if let Some(data) = current.take() {
                current = Some(polyline_data(data, polyline));
            }
            continue;
        }
        if let Some(data) = current.replace(polyline_data(Data::new(), polyline)) {
            paths.push(filled(data));
        }
    }
    if let Some(data) = current {
        paths.push(filled(data));
    }
    paths
}

/// Baut ein SVG-Dokument aus mehreren Polygon-Ebenen
pub fn polygon_svg_document(layers: &[(&Polygon, SvgLayerStyle)]) -> Document {
    let bounds = layers
        .iter()
        .fold(Bounds::empty(), |acc, (polygon, _)| acc.union(&polygon.bounds()));
    let (x, y, width, height) = if bounds.is_valid() {
        let pad = (bounds.width() + bounds.height()) * 0.05 + 1.0;
        (
            bounds.min.x - pad,
            bounds.min.y - pad,
            bounds.width() + pad * 2.0,
            bounds.height() + pad * 2.0,
        )
    } else {
        (0.0, 0.0, 1.0, 1.0)
    };

    let background = Rectangle::new()
        .set("x", x)
        .set("y", y)
        .set("width", width)
        .set("height", height)
        .set("fill", "#f0f0f0");

    let mut document = Document::new()
        .set("viewBox", (x, y, width, height))
        .add(background);
    for (polygon, style) in layers {
        let stroke_width = (width + height) / 2.0 * style.stroke_scale;
        for path in polygon_paths(polygon, style, stroke_width) {
            document = document.add(path);
        }
    }
    document
}

/// Schreibt die Polygone mit Standardfarben in eine SVG-Datei
pub fn create_polygon_debug_svg(polygons: &[Polygon], filename: &str) -> std::io::Result<()> {
    let palette = [
        SvgLayerStyle::default(),
        SvgLayerStyle::new("#96ff96", "#00aa00"),
        SvgLayerStyle::new("#ffdc96", "#ffaa00"),
        SvgLayerStyle::new("#aaccff", "#0000cc"),
    ];
    let layers: Vec<(&Polygon, SvgLayerStyle)> = polygons
        .iter()
        .zip(palette.iter().cycle())
        .map(|(polygon, style)| (polygon, style.clone()))
        .collect();

    let document = polygon_svg_document(&layers);
    svg::save(filename, &document)?;
    info!("Debug SVG '{}' wurde erstellt.", filename);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::geometry::polygon::{RectOptions, ShapeGenerators};
    use crate::math::types::Point;

    #[test]
    fn test_paths_group_holes_with_outline() {
        let outer = ShapeGenerators::rect(0.0, 0.0, 30.0, 30.0, RectOptions::default());
        let inner = ShapeGenerators::rect(10.0, 10.0, 10.0, 10.0, RectOptions::default());
        let far = ShapeGenerators::rect(50.0, 0.0, 10.0, 10.0, RectOptions::default());
        let polygon = &(&outer - &inner) + &far;

        let svg = polygon_svg_document(&[(&polygon, SvgLayerStyle::default())]).to_string();
        assert_eq!(svg.matches("<path").count(), 2);
        assert_eq!(svg.matches("fill-rule=\"evenodd\"").count(), 2);
        assert!(svg.contains("viewBox"));
    }

    #[test]
    fn test_open_polyline_is_unfilled() {
        let line = ShapeGenerators::line(&[Point::new(0.0, 0.0), Point::new(5.0, 5.0)], false);
        let svg = polygon_svg_document(&[(&line, SvgLayerStyle::default())]).to_string();
        assert_eq!(svg.matches("<path").count(), 1);
        assert!(svg.contains("fill=\"none\""));
    }

    #[test]
    fn test_empty_document() {
        let svg = polygon_svg_document(&[]).to_string();
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn test_save_to_file() {
        let path = std::env::temp_dir().join("polyshape_debug_test.svg");
        let filename = path.to_string_lossy().to_string();
        let rect = ShapeGenerators::rect(0.0, 0.0, 10.0, 10.0, RectOptions::default());
        create_polygon_debug_svg(&[rect], &filename).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<path"));
        let _ = std::fs::remove_file(&path);
    }
}
