// src/render/painter.rs

use crate::math::{
    error::{MathError, MathResult},
    geometry::polygon::{CapType, JoinType, Polygon, Polyline, StrokeStyle},
    types::{Color, Coord3, Point},
};
use tracing::debug;

/// Primitivtyp eines Zeichenaufrufs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawMode {
    Triangles,
    TriangleFan,
    LineStrip,
    LineLoop,
}

/// Ein Zeichenaufruf mit geliehenen Vertexpuffern
#[derive(Debug, Clone, Copy)]
pub struct DrawCall<'a> {
    pub mode: DrawMode,
    pub color: Color,
    pub points: &'a [Point],
    /// Drei Indizes pro Dreieck bei [`DrawMode::Triangles`]
    pub indices: Option<&'a [u32]>,
    pub colors: Option<&'a [Color]>,
    pub texcoords: Option<&'a [Coord3]>,
}

impl<'a> DrawCall<'a> {
    fn polyline(mode: DrawMode, color: Color, polyline: &'a Polyline) -> Self {
        Self {
            mode,
            color,
            points: polyline.points(),
            indices: None,
            colors: polyline.colors(),
            texcoords: polyline.texcoords(),
        }
    }
}

/// Empfänger für Zeichenaufrufe, z.B. ein GPU-Backend
pub trait DrawTarget {
    fn draw(&mut self, call: DrawCall<'_>);
}

/// Strichparameter eines Painters
pub trait StrokeSettings {
    fn stroke_width(&self) -> f32;
    fn stroke_cap(&self) -> CapType;
    fn stroke_join(&self) -> JoinType;
    fn miter_limit(&self) -> f32;
    /// 0 = innen, 0.5 = zentriert, 1 = außen
    fn stroke_outset(&self) -> f32;
}

impl StrokeSettings for StrokeStyle {
    fn stroke_width(&self) -> f32 {
        self.width
    }

    fn stroke_cap(&self) -> CapType {
        self.cap
    }

    fn stroke_join(&self) -> JoinType {
        self.join
    }

    fn miter_limit(&self) -> f32 {
        self.miter_limit
    }

    fn stroke_outset(&self) -> f32 {
        self.outset
    }
}

/// Füllt das Polygon.
///
/// Rechtecke und Ellipsen ohne Loch werden direkt als Dreiecksfächer gezeichnet,
/// alles andere über die zwischengespeicherte Triangulierung.
pub fn fill_polygon<T>(polygon: &Polygon, target: &mut T, color: Color) -> MathResult<()>
where
    T: DrawTarget + ?Sized,
{
    if !color.is_valid() || polygon.is_empty() {
        return Ok(());
    }

    if polygon.kind().is_fan() {
        if polygon.len() != 1 {
            return Err(MathError::invalid_state(format!(
                "fan shape must have exactly one contour, found {}",
                polygon.len()
            )));
        }
        target.draw(DrawCall::polyline(DrawMode::TriangleFan, color, &polygon[0]));
        return Ok(());
    }

    let triangulation = polygon.triangulation();
    if triangulation.is_empty() {
        debug!(contours = polygon.len(), "nothing to fill");
        return Ok(());
    }
    target.draw(DrawCall {
        mode: DrawMode::Triangles,
        color,
        points: triangulation.points(),
        indices: Some(triangulation.indices()),
        colors: triangulation.colors(),
        texcoords: triangulation.texcoords(),
    });
    Ok(())
}

/// Zeichnet die Kontur des Polygons.
///
/// Bei Breite 0 wird jeder Linienzug als Linie gezeichnet, sonst werden die
/// Strichflächen aus [`stroke_outline`] gefüllt.
pub fn stroke_polygon<S, T>(
    polygon: &Polygon,
    settings: &S,
    target: &mut T,
    color: Color,
) -> MathResult<()>
where
    S: StrokeSettings + ?Sized,
    T: DrawTarget + ?Sized,
{
    if !color.is_valid() || polygon.is_empty() {
        return Ok(());
    }

    if settings.stroke_width() <= 0.0 {
        for polyline in polygon.iter().filter(|p| p.is_valid()) {
            let mode = if polyline.closed() {
                DrawMode::LineLoop
            } else {
                DrawMode::LineStrip
            };
            target.draw(DrawCall::polyline(mode, color, polyline));
        }
        return Ok(());
    }

    for stroke in stroke_pieces(polygon, settings) {
        fill_polygon(&stroke, target, color)?;
    }
    Ok(())
}

/// Strichgeometrie ohne zu zeichnen; leer bei Breite 0
pub fn stroke_outline<S>(polygon: &Polygon, settings: &S) -> Polygon
where
    S: StrokeSettings + ?Sized,
{
    if settings.stroke_width() <= 0.0 {
        return Polygon::new();
    }
    stroke_pieces(polygon, settings)
        .iter()
        .fold(Polygon::new(), |acc, piece| acc.concat(piece))
}

/// Offene Linienzüge werden direkt umrandet, geschlossene erst um den
/// Outset-Anteil verschoben und dann als Ring umrandet.
fn stroke_pieces<S>(polygon: &Polygon, settings: &S) -> Vec<Polygon>
where
    S: StrokeSettings + ?Sized,
{
    let width = settings.stroke_width();
    let cap = settings.stroke_cap();
    let join = settings.stroke_join();
    let miter_limit = settings.miter_limit();
    let half = width / 2.0;

    let mut pieces: Vec<Polygon> = polygon
        .iter()
        .filter(|polyline| !polyline.closed())
        .filter_map(|polyline| polyline.expand(half, cap, join, miter_limit))
        .collect();

    if !polygon.iter().any(Polyline::closed) {
        return pieces;
    }

    let inset = (-0.5 + settings.stroke_outset()) * width;
    let outline = if inset == 0.0 {
        Some(polygon.clone())
    } else {
        polygon.expand(inset, cap, join, miter_limit)
    };
    let Some(outline) = outline else {
        debug!(inset, "stroke outline vanished");
        return pieces;
    };

    pieces.extend(
        outline
            .iter()
            .filter(|polyline| polyline.closed())
            .filter_map(|polyline| polyline.expand(half, cap, join, miter_limit)),
    );
    pieces
}

/// Aufgezeichneter Zeichenaufruf mit eigenen Puffern
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub mode: DrawMode,
    pub color: Color,
    pub points: Vec<Point>,
    pub indices: Option<Vec<u32>>,
    pub colors: Option<Vec<Color>>,
    pub texcoords: Option<Vec<Coord3>>,
}

impl RecordedDraw {
    /// Dreiecke als flache Punktliste, unabhängig vom Modus
    pub fn triangle_points(&self) -> Vec<Point> {
        match (self.mode, &self.indices) {
            (DrawMode::Triangles, Some(indices)) => {
                indices.iter().map(|&i| self.points[i as usize]).collect()
            }
            (DrawMode::Triangles, None) => self.points.clone(),
            (DrawMode::TriangleFan, _) => (1..self.points.len().saturating_sub(1))
                .flat_map(|i| [self.points[0], self.points[i], self.points[i + 1]])
                .collect(),
            (DrawMode::LineStrip | DrawMode::LineLoop, _) => Vec::new(),
        }
    }
}

/// [`DrawTarget`], das alle Aufrufe speichert
#[derive(Debug, Clone, Default)]
pub struct DrawRecorder {
    calls: Vec<RecordedDraw>,
}

impl DrawRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[RecordedDraw] {
        &self.calls
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Summe der gezeichneten Dreiecksflächen
    pub fn filled_area(&self) -> f32 {
        self.calls
            .iter()
            .map(|call| {
                call.triangle_points()
                    .chunks_exact(3)
                    .map(|t| ((t[1] - t[0]).cross(t[2] - t[0]) * 0.5).abs())
                    .sum::<f32>()
            })
            .sum()
    }
}

impl DrawTarget for DrawRecorder {
    fn draw(&mut self, call: DrawCall<'_>) {
        self.calls.push(RecordedDraw {
            mode: call.mode,
            color: call.color,
            points: call.points.to_vec(),
            indices: call.indices.map(<[u32]>::to_vec),
            colors: call.colors.map(<[Color]>::to_vec),
            texcoords: call.texcoords.map(<[Coord3]>::to_vec),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::geometry::polygon::{EllipseOptions, RectOptions, ShapeGenerators};
    use approx::assert_relative_eq;

    fn pts(coords: &[f32]) -> Vec<Point> {
        coords.chunks(2).map(|c| Point::new(c[0], c[1])).collect()
    }

    #[test]
    fn test_fill_rect_uses_fan() {
        let rect = ShapeGenerators::rect(0.0, 0.0, 10.0, 10.0, RectOptions::default());
        let mut recorder = DrawRecorder::new();
        fill_polygon(&rect, &mut recorder, Color::WHITE).unwrap();

        assert_eq!(recorder.calls().len(), 1);
        assert_eq!(recorder.calls()[0].mode, DrawMode::TriangleFan);
        assert_eq!(recorder.calls()[0].points.len(), 4);
        assert_relative_eq!(recorder.filled_area(), 100.0, epsilon = 1e-3);
    }

    #[test]
    fn test_fill_contours_uses_triangulation() {
        let l = Polygon::from_points(
            pts(&[0.0, 0.0, 2.0, 0.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 0.0, 2.0]),
            true,
        );
        let mut recorder = DrawRecorder::new();
        fill_polygon(&l, &mut recorder, Color::WHITE).unwrap();

        let call = &recorder.calls()[0];
        assert_eq!(call.mode, DrawMode::Triangles);
        assert_eq!(call.indices.as_ref().unwrap().len(), 12);
        assert_relative_eq!(recorder.filled_area(), 3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_fill_ellipse_with_hole_uses_triangulation() {
        let options = EllipseOptions::new().with_hole(Point::new(4.0, 4.0));
        let ring = ShapeGenerators::ellipse(0.0, 0.0, 10.0, 10.0, options);
        let mut recorder = DrawRecorder::new();
        fill_polygon(&ring, &mut recorder, Color::WHITE).unwrap();
        assert_eq!(recorder.calls()[0].mode, DrawMode::Triangles);
    }

    #[test]
    fn test_fan_with_extra_contour_is_invalid_state() {
        let rect = ShapeGenerators::rect(0.0, 0.0, 10.0, 10.0, RectOptions::default());
        let moved = rect.map_points(|p| p + Point::new(20.0, 0.0));
        let doubled = Polygon::from_parts(
            vec![rect[0].clone(), moved[0].clone()],
            rect.kind(),
        );
        let result = fill_polygon(&doubled, &mut DrawRecorder::new(), Color::WHITE);
        assert!(matches!(result, Err(MathError::InvalidState { .. })));
    }

    #[test]
    fn test_invalid_color_and_empty_polygon_are_noops() {
        let rect = ShapeGenerators::rect(0.0, 0.0, 10.0, 10.0, RectOptions::default());
        let mut recorder = DrawRecorder::new();
        fill_polygon(&rect, &mut recorder, Color::NONE).unwrap();
        stroke_polygon(&rect, &StrokeStyle::default(), &mut recorder, Color::NONE).unwrap();
        fill_polygon(&Polygon::new(), &mut recorder, Color::WHITE).unwrap();
        stroke_polygon(&Polygon::new(), &StrokeStyle::default(), &mut recorder, Color::WHITE).unwrap();
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_zero_width_stroke_draws_lines() {
        let polygon = ShapeGenerators::rect(0.0, 0.0, 10.0, 10.0, RectOptions::default())
            + ShapeGenerators::line(&pts(&[0.0, 20.0, 10.0, 20.0]), false);
        let style = StrokeStyle::new().with_width(0.0);
        let mut recorder = DrawRecorder::new();
        stroke_polygon(&polygon, &style, &mut recorder, Color::WHITE).unwrap();

        let modes: Vec<DrawMode> = recorder.calls().iter().map(|c| c.mode).collect();
        assert_eq!(modes, vec![DrawMode::LineLoop, DrawMode::LineStrip]);
        assert!(stroke_outline(&polygon, &style).is_empty());
    }

    #[test]
    fn test_centered_stroke_of_square() {
        let square = Polygon::from_points(pts(&[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0]), true);
        let style = StrokeStyle::new().with_width(2.0);
        let outline = stroke_outline(&square, &style);

        assert_eq!(outline.len(), 2);
        assert!(outline[1].hole());
        assert_relative_eq!(outline.bounds().min.x, -1.0, epsilon = 1e-3);
        assert_relative_eq!(outline.bounds().max.x, 11.0, epsilon = 1e-3);
        assert_relative_eq!(outline[1].bounds().min.x, 1.0, epsilon = 1e-3);

        let mut recorder = DrawRecorder::new();
        stroke_polygon(&square, &style, &mut recorder, Color::WHITE).unwrap();
        assert_relative_eq!(recorder.filled_area(), 144.0 - 64.0, epsilon = 0.1);
    }

    #[test]
    fn test_inner_stroke_stays_inside() {
        let square = Polygon::from_points(pts(&[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0]), true);
        let style = StrokeStyle::new().with_width(2.0).with_outset(0.0);
        let outline = stroke_outline(&square, &style);
        assert_relative_eq!(outline.bounds().min.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(outline.bounds().max.x, 10.0, epsilon = 1e-3);
        assert_relative_eq!(outline[1].bounds().min.x, 2.0, epsilon = 1e-3);
    }

    #[test]
    fn test_open_stroke_uses_caps() {
        let line = ShapeGenerators::line(&pts(&[0.0, 0.0, 10.0, 0.0]), false);
        let butt = stroke_outline(&line, &StrokeStyle::new().with_width(2.0));
        assert_relative_eq!(butt.bounds().min.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(butt.bounds().min.y, -1.0, epsilon = 1e-3);

        let square = stroke_outline(&line, &StrokeStyle::new().with_width(2.0).with_cap(CapType::Square));
        assert_relative_eq!(square.bounds().min.x, -1.0, epsilon = 1e-3);
        assert_relative_eq!(square.bounds().max.x, 11.0, epsilon = 1e-3);
    }
}
