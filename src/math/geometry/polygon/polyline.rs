// src/math/geometry/polygon/polyline.rs

use crate::math::{
    error::{MathError, MathResult, resolve_index},
    geometry::polygon::{
        core::Polygon,
        operations::offset::{self, PathEnd},
        style::{CapType, JoinType},
    },
    types::{Bounds, Color, Coord3, Point},
};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, PartialEq)]
struct PolylineData {
    points: Vec<Point>,
    colors: Option<Vec<Color>>,
    texcoords: Option<Vec<Coord3>>,
    closed: bool,
    fill: bool,
    hole: bool,
}

/// Unveränderlicher Linienzug mit optionalen Farben und Texturkoordinaten pro Punkt.
///
/// Klonen teilt die Daten (`Arc`).
#[derive(Debug, Clone)]
pub struct Polyline {
    data: Arc<PolylineData>,
}

impl Polyline {
    /// Erstellt einen Linienzug; `fill` folgt `closed`
    pub fn new(points: Vec<Point>, closed: bool) -> Self {
        Self::from_data(PolylineData {
            points,
            colors: None,
            texcoords: None,
            closed,
            fill: closed,
            hole: false,
        })
    }

    pub fn builder(points: Vec<Point>) -> PolylineBuilder {
        PolylineBuilder::new(points)
    }

    fn from_data(data: PolylineData) -> Self {
        Self {
            data: Arc::new(data),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.data.points
    }

    pub fn colors(&self) -> Option<&[Color]> {
        self.data.colors.as_deref()
    }

    pub fn texcoords(&self) -> Option<&[Coord3]> {
        self.data.texcoords.as_deref()
    }

    /// Geschlossener Linienzug (Loop)
    pub fn closed(&self) -> bool {
        self.data.closed
    }

    pub fn fill(&self) -> bool {
        self.data.fill
    }

    pub fn hole(&self) -> bool {
        self.data.hole
    }

    pub fn len(&self) -> usize {
        self.data.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.points.is_empty()
    }

    /// Ein Linienzug ist gültig, wenn er Punkte enthält
    pub fn is_valid(&self) -> bool {
        !self.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Point> {
        self.data.points.get(index).copied()
    }

    /// Indexzugriff, negative Indizes zählen vom Ende
    pub fn at(&self, index: isize) -> MathResult<Point> {
        let i = resolve_index(index, self.len())?;
        Ok(self.data.points[i])
    }

    /// Punkte in Konstruktionsreihenfolge; `.rev()` liefert die Lochreihenfolge
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, Point>> {
        self.data.points.iter().copied()
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_points_iter(self.iter())
    }

    /// Erzeugt die Strichkontur mit Abstand `width` zu beiden Seiten.
    ///
    /// Liefert `None` für `width == 0` oder einen leeren Linienzug.
    pub fn expand(
        &self,
        width: f32,
        cap: CapType,
        join: JoinType,
        miter_limit: f32,
    ) -> Option<Polygon> {
        if width == 0.0 || self.is_empty() {
            return None;
        }
        let end = PathEnd::for_polyline(self, cap, false);
        offset::expand_paths(
            std::iter::once((self, end)),
            width,
            join,
            miter_limit,
            &Default::default(),
        )
    }

    /// Kopie mit neuen Punkten; Flags und Farbströme bleiben erhalten.
    pub fn with_points(&self, points: Vec<Point>) -> MathResult<Polyline> {
        PolylineBuilder {
            points,
            colors: self.data.colors.clone(),
            texcoords: self.data.texcoords.clone(),
            closed: self.closed(),
            fill: Some(self.fill()),
            hole: self.hole(),
        }
        .build()
    }

    /// Transformiert alle Punkte
    pub fn map_points<F>(&self, f: F) -> Polyline
    where
        F: Fn(Point) -> Point,
    {
        Self::from_data(PolylineData {
            points: self.iter().map(f).collect(),
            colors: self.data.colors.clone(),
            texcoords: self.data.texcoords.clone(),
            closed: self.closed(),
            fill: self.fill(),
            hole: self.hole(),
        })
    }

    /// Umgekehrte Punktreihenfolge inklusive Farb- und Texturströme
    pub fn reversed(&self) -> Polyline {
        fn rev<T: Copy>(values: &[T]) -> Vec<T> {
            values.iter().rev().copied().collect()
        }
        Self::from_data(PolylineData {
            points: rev(&self.data.points),
            colors: self.data.colors.as_deref().map(rev),
            texcoords: self.data.texcoords.as_deref().map(rev),
            closed: self.closed(),
            fill: self.fill(),
            hole: self.hole(),
        })
    }

    /// Kopie mit geändertem Loch-Flag
    pub(crate) fn as_hole(&self, hole: bool) -> Polyline {
        if self.hole() == hole {
            return self.clone();
        }
        Self::from_data(PolylineData {
            points: self.data.points.clone(),
            colors: self.data.colors.clone(),
            texcoords: self.data.texcoords.clone(),
            closed: self.closed(),
            fill: self.fill(),
            hole,
        })
    }
}

impl PartialEq for Polyline {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data) || self.data == other.data
    }
}

impl std::ops::Index<usize> for Polyline {
    type Output = Point;

    fn index(&self, index: usize) -> &Point {
        &self.data.points[index]
    }
}

impl<'a> IntoIterator for &'a Polyline {
    type Item = Point;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Point>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Polyline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let points = self
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "Polyline([{}] loop:{} fill:{} hole:{} colors:{} texcoords:{})",
            points,
            self.closed(),
            self.fill(),
            self.hole(),
            self.colors().map_or(0, <[Color]>::len),
            self.texcoords().map_or(0, <[Coord3]>::len),
        )
    }
}

/// Builder für [`Polyline`] mit Längenprüfung der Farbströme
#[derive(Debug, Clone)]
pub struct PolylineBuilder {
    points: Vec<Point>,
    colors: Option<Vec<Color>>,
    texcoords: Option<Vec<Coord3>>,
    closed: bool,
    fill: Option<bool>,
    hole: bool,
}

impl PolylineBuilder {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            colors: None,
            texcoords: None,
            closed: false,
            fill: None,
            hole: false,
        }
    }

    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    pub fn fill(mut self, fill: bool) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn hole(mut self, hole: bool) -> Self {
        self.hole = hole;
        self
    }

    pub fn colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn texcoords(mut self, texcoords: Vec<Coord3>) -> Self {
        self.texcoords = Some(texcoords);
        self
    }

    pub(crate) fn maybe_colors(mut self, colors: Option<Vec<Color>>) -> Self {
        self.colors = colors;
        self
    }

    pub(crate) fn maybe_texcoords(mut self, texcoords: Option<Vec<Coord3>>) -> Self {
        self.texcoords = texcoords;
        self
    }

    pub fn build(self) -> MathResult<Polyline> {
        let count = self.points.len();
        let colors = check_stream("colors", self.colors, count)?;
        let texcoords = check_stream("texcoords", self.texcoords, count)?;

        Ok(Polyline::from_data(PolylineData {
            points: self.points,
            colors,
            texcoords,
            closed: self.closed,
            fill: self.fill.unwrap_or(self.closed),
            hole: self.hole,
        }))
    }
}

fn check_stream<T>(name: &str, stream: Option<Vec<T>>, count: usize) -> MathResult<Option<Vec<T>>> {
    match stream {
        Some(values) if values.len() != count => Err(MathError::invalid_argument(format!(
            "{name} length {} does not match point count {count}",
            values.len()
        ))),
        Some(values) if values.is_empty() => Ok(None),
        other => Ok(other),
    }
}
