// src/math/geometry/polygon/core.rs

use crate::math::{
    error::{MathError, MathResult, resolve_index},
    geometry::polygon::{
        operations::{
            offset::{self, PathEnd},
            triangulation::{PolygonTriangulator, Triangulation},
        },
        polyline::Polyline,
        style::{CapType, JoinType},
    },
    types::{Bounds, Color, Coord3, Point},
};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Art der Entstehung eines Polygons, bestimmt den Schnellpfad beim Füllen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Beliebige Konturen, Füllen über Triangulierung
    #[default]
    Contours,
    /// Rechteck mit genau einer konvexen Kontur
    Rect,
    /// Ellipse bzw. Bogen; `fan` wenn als Dreiecksfächer füllbar (ohne Loch)
    Ellipse { fan: bool },
}

impl ShapeKind {
    /// Füllbar als Fächer über die erste Kontur
    pub fn is_fan(&self) -> bool {
        matches!(self, Self::Rect | Self::Ellipse { fan: true })
    }
}

#[derive(Debug, Default)]
struct PolygonData {
    polylines: Vec<Polyline>,
    kind: ShapeKind,
    bounds: OnceLock<Bounds>,
    triangulation: OnceLock<Triangulation>,
}

/// Unveränderliches Polygon aus einer geordneten Liste von Linienzügen.
///
/// Jeder Linienzug ohne Loch-Flag beginnt eine Außenkontur, die direkt folgenden
/// Löcher gehören zu ihr. Bounds und Triangulierung werden beim ersten Zugriff
/// berechnet und zwischengespeichert. Klonen teilt die Daten.
#[derive(Debug, Clone, Default)]
pub struct Polygon {
    data: Arc<PolygonData>,
}

impl Polygon {
    /// Erstellt ein leeres Polygon
    pub fn new() -> Self {
        Self::default()
    }

    /// Eine gefüllte Kontur aus Punkten
    pub fn from_points(points: Vec<Point>, closed: bool) -> Self {
        let polyline = Polyline::builder(points).closed(closed).fill(true);
        match polyline.build() {
            Ok(polyline) => Self::from_parts(vec![polyline], ShapeKind::Contours),
            Err(_) => Self::new(),
        }
    }

    /// Eine gefüllte Kontur mit optionalen Farben und Texturkoordinaten
    pub fn from_points_with(
        points: Vec<Point>,
        closed: bool,
        colors: Option<Vec<Color>>,
        texcoords: Option<Vec<Coord3>>,
    ) -> MathResult<Self> {
        let polyline = Polyline::builder(points)
            .closed(closed)
            .fill(true)
            .maybe_colors(colors)
            .maybe_texcoords(texcoords)
            .build()?;
        Ok(Self::from_parts(vec![polyline], ShapeKind::Contours))
    }

    pub fn from_polyline(polyline: Polyline) -> MathResult<Self> {
        Self::from_polylines(std::iter::once(polyline))
    }

    /// Erstellt ein Polygon aus Linienzügen; der erste darf kein Loch sein
    pub fn from_polylines<I>(polylines: I) -> MathResult<Self>
    where
        I: IntoIterator<Item = Polyline>,
    {
        let polylines: Vec<Polyline> = polylines.into_iter().collect();
        if polylines.first().is_some_and(Polyline::hole) {
            return Err(MathError::invalid_argument(
                "the first polyline of a polygon must not be a hole",
            ));
        }
        Ok(Self::from_parts(polylines, ShapeKind::Contours))
    }

    /// Interner Konstruktor ohne Lochprüfung
    pub(crate) fn from_parts(polylines: Vec<Polyline>, kind: ShapeKind) -> Self {
        Self {
            data: Arc::new(PolygonData {
                polylines,
                kind,
                ..Default::default()
            }),
        }
    }

    pub(crate) fn shares_data(&self, other: &Polygon) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    pub fn kind(&self) -> ShapeKind {
        self.data.kind
    }

    pub fn polylines(&self) -> &[Polyline] {
        &self.data.polylines
    }

    /// Anzahl der Konturen
    pub fn len(&self) -> usize {
        self.data.polylines.len()
    }

    /// Keine Konturen
    pub fn is_empty(&self) -> bool {
        self.data.polylines.is_empty()
    }

    /// Keine Konturen oder nur Konturen ohne Punkte
    pub fn is_empty_deep(&self) -> bool {
        self.data.polylines.iter().all(Polyline::is_empty)
    }

    /// Leer oder mit mindestens einem gültigen Linienzug
    pub fn is_valid(&self) -> bool {
        self.is_empty() || self.data.polylines.iter().any(Polyline::is_valid)
    }

    pub fn get(&self, index: usize) -> Option<&Polyline> {
        self.data.polylines.get(index)
    }

    /// Indexzugriff, negative Indizes zählen vom Ende
    pub fn at(&self, index: isize) -> MathResult<&Polyline> {
        let i = resolve_index(index, self.len())?;
        Ok(&self.data.polylines[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Polyline> {
        self.data.polylines.iter()
    }

    /// Bounding Box aller Punkte; ungültig für leere Polygone
    pub fn bounds(&self) -> Bounds {
        *self.data.bounds.get_or_init(|| {
            self.iter()
                .fold(Bounds::empty(), |acc, polyline| acc.union(&polyline.bounds()))
        })
    }

    /// Offset aller Konturen um `width`.
    ///
    /// Geschlossene Konturen werden als Fläche erweitert (negative Breite schrumpft),
    /// offene Konturen als Strich mit `cap` erzeugt. Liefert `None` für `width == 0`
    /// oder wenn keine Kontur verwendet werden konnte.
    pub fn expand(
        &self,
        width: f32,
        cap: CapType,
        join: JoinType,
        miter_limit: f32,
    ) -> Option<Polygon> {
        if width == 0.0 {
            return None;
        }
        offset::expand_paths(
            self.iter()
                .map(|polyline| (polyline, PathEnd::for_polyline(polyline, cap, true))),
            width,
            join,
            miter_limit,
            &Default::default(),
        )
    }

    /// Zwischengespeicherte indizierte Triangulierung
    pub fn triangulation(&self) -> &Triangulation {
        self.data
            .triangulation
            .get_or_init(|| PolygonTriangulator::new().triangulate(self))
    }

    /// Dreiecke als flache Punktliste (3 Punkte pro Dreieck)
    pub fn triangulate(&self) -> Option<Vec<Point>> {
        let triangulation = self.triangulation();
        if triangulation.is_empty() {
            None
        } else {
            Some(triangulation.triangle_points())
        }
    }

    /// Transformiert alle Punkte, die Art des Polygons bleibt erhalten
    pub fn map_points<F>(&self, f: F) -> Polygon
    where
        F: Fn(Point) -> Point,
    {
        let polylines = self.iter().map(|polyline| polyline.map_points(&f)).collect();
        Self::from_parts(polylines, self.kind())
    }
}

impl PartialEq for Polygon {
    fn eq(&self, other: &Self) -> bool {
        self.shares_data(other) || self.data.polylines == other.data.polylines
    }
}

impl std::ops::Index<usize> for Polygon {
    type Output = Polyline;

    fn index(&self, index: usize) -> &Polyline {
        &self.data.polylines[index]
    }
}

impl<'a> IntoIterator for &'a Polygon {
    type Item = &'a Polyline;
    type IntoIter = std::slice::Iter<'a, Polyline>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon(")?;
        for (i, polyline) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{polyline}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::geometry::polygon::ShapeGenerators;
    use approx::assert_relative_eq;

    fn pts(coords: &[f32]) -> Vec<Point> {
        coords.chunks(2).map(|c| Point::new(c[0], c[1])).collect()
    }

    fn hole(coords: &[f32]) -> Polyline {
        Polyline::builder(pts(coords))
            .closed(true)
            .hole(true)
            .build()
            .unwrap()
    }

    #[test]
    fn test_from_points() {
        let p = Polygon::from_points(pts(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]), true);
        assert_eq!(p.len(), 1);
        assert!(p[0].closed());
        assert!(p[0].fill());

        let open = Polygon::from_points(pts(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]), false);
        assert!(!open[0].closed());
        assert!(open[0].fill());
    }

    #[test]
    fn test_from_points_with_streams() {
        let ok = Polygon::from_points_with(
            pts(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0]),
            true,
            Some(vec![Color::WHITE; 3]),
            None,
        );
        assert!(ok.is_ok());

        let err = Polygon::from_points_with(
            pts(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0]),
            true,
            Some(vec![Color::WHITE; 2]),
            None,
        );
        assert!(matches!(err, Err(MathError::InvalidArgument { .. })));
    }

    #[test]
    fn test_first_polyline_must_not_be_hole() {
        let h = hole(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0]);
        assert!(Polygon::from_polyline(h.clone()).is_err());

        let outer = Polyline::new(pts(&[0.0, 0.0, 10.0, 0.0, 10.0, 10.0]), true);
        assert!(Polygon::from_polylines(vec![h.clone(), outer.clone()]).is_err());
        assert_eq!(Polygon::from_polylines(vec![outer, h]).unwrap().len(), 2);
    }

    #[test]
    fn test_empty_polylines_are_kept() {
        let hollow = Polygon::from_polylines(vec![
            Polyline::new(Vec::new(), true),
            Polyline::new(Vec::new(), false),
        ])
        .unwrap();
        assert_eq!(hollow.len(), 2);
        assert!(!hollow.is_empty());
        assert!(hollow.is_empty_deep());
        assert!(!hollow.is_valid());
        assert!(!hollow.bounds().is_valid());

        let mixed = Polygon::from_polylines(vec![
            Polyline::new(Vec::new(), true),
            Polyline::new(pts(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0]), true),
        ])
        .unwrap();
        assert_eq!(mixed.len(), 2);
        assert!(!mixed.is_empty_deep());
        assert!(mixed.is_valid());
        assert!(mixed.at(0).unwrap().is_empty());

        assert!(Polygon::new().is_empty());
        assert!(Polygon::new().is_empty_deep());
        assert!(Polygon::new().is_valid());
    }

    #[test]
    fn test_index_access() {
        let p = ShapeGenerators::rect(0.0, 0.0, 10.0, 10.0, Default::default())
            + ShapeGenerators::rect(20.0, 0.0, 10.0, 10.0, Default::default());
        assert_eq!(p.at(-1).unwrap(), &p[1]);
        assert_eq!(p.at(0).unwrap(), &p[0]);
        assert!(matches!(
            p.at(2),
            Err(MathError::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert!(p.at(-3).is_err());
        assert!(p.get(2).is_none());
        assert_eq!(p.iter().count(), 2);
    }

    #[test]
    fn test_bounds() {
        let p = Polygon::from_points(pts(&[10.0, 20.0, 30.0, 20.0, 20.0, 30.0]), true);
        let b = p.bounds();
        assert_eq!(b.min, Point::new(10.0, 20.0));
        assert_eq!(b.max, Point::new(30.0, 30.0));
        assert!(!Polygon::new().bounds().is_valid());
    }

    #[test]
    fn test_expand_zero_width() {
        let rect = ShapeGenerators::rect(0.0, 0.0, 10.0, 10.0, Default::default());
        assert!(rect.expand(0.0, CapType::Butt, JoinType::Miter, 2.0).is_none());
        assert!(Polygon::new().expand(1.0, CapType::Butt, JoinType::Miter, 2.0).is_none());
    }

    #[test]
    fn test_expand_closed_square() {
        let square = Polygon::from_points(
            pts(&[10.0, 10.0, 20.0, 10.0, 20.0, 20.0, 10.0, 20.0]),
            true,
        );
        let grown = square.expand(1.0, CapType::Butt, JoinType::Miter, 2.0).unwrap();
        assert_eq!(grown.len(), 1);
        assert_eq!(grown[0].len(), 4);
        assert_eq!(grown.bounds(), Bounds::new(9.0, 9.0, 12.0, 12.0));

        let shrunk = square.expand(-1.0, CapType::Butt, JoinType::Miter, 2.0).unwrap();
        assert_eq!(shrunk.bounds(), Bounds::new(11.0, 11.0, 8.0, 8.0));
    }

    #[test]
    fn test_expand_open_fill_contour() {
        let open = Polygon::from_points(pts(&[10.0, 10.0, 20.0, 10.0, 30.0, 20.0]), false);
        let stroke = open.expand(1.0, CapType::Butt, JoinType::Miter, 2.0).unwrap();
        assert_eq!(stroke.len(), 1);
        assert_eq!(stroke[0].len(), 6);
    }

    #[test]
    fn test_expand_with_hole_shrinks_hole() {
        let ring = Polygon::from_polylines(vec![
            Polyline::new(pts(&[0.0, 0.0, 30.0, 0.0, 30.0, 30.0, 0.0, 30.0]), true),
            hole(&[10.0, 10.0, 20.0, 10.0, 20.0, 20.0, 10.0, 20.0]),
        ])
        .unwrap();
        let grown = ring.expand(1.0, CapType::Butt, JoinType::Miter, 2.0).unwrap();
        assert_eq!(grown.len(), 2);
        assert!(grown[1].hole());
        assert_eq!(grown[1].bounds(), Bounds::new(11.0, 11.0, 8.0, 8.0));
    }

    #[test]
    fn test_triangulate_square() {
        let square = Polygon::from_points(pts(&[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0]), true);
        let triangles = square.triangulate().unwrap();
        assert_eq!(triangles.len(), 6);
        let area: f32 = triangles
            .chunks(3)
            .map(|t| ((t[1] - t[0]).cross(t[2] - t[0]) * 0.5).abs())
            .sum();
        assert_relative_eq!(area, 100.0, epsilon = 1e-3);
    }

    #[test]
    fn test_triangulate_nothing() {
        assert!(Polygon::new().triangulate().is_none());
        let line = Polygon::from_polyline(Polyline::new(pts(&[0.0, 0.0, 1.0, 1.0]), false)).unwrap();
        assert!(line.triangulate().is_none());
    }

    #[test]
    fn test_map_points_keeps_kind() {
        let rect = ShapeGenerators::rect(0.0, 0.0, 10.0, 10.0, Default::default());
        let moved = rect.map_points(|p| p + Point::new(5.0, 5.0));
        assert_eq!(moved.kind(), ShapeKind::Rect);
        assert_eq!(moved.bounds(), Bounds::new(5.0, 5.0, 10.0, 10.0));
    }

    #[test]
    fn test_display() {
        let p = Polygon::from_points(pts(&[1.0, 2.0, 3.0, 4.0]), false);
        assert_eq!(
            p.to_string(),
            "Polygon(Polyline([1,2, 3,4] loop:false fill:true hole:false colors:0 texcoords:0))"
        );
    }
}
